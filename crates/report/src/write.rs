use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::error::ReportError;

/// Content staged next to its destination, not yet visible there.
pub(crate) struct Staged {
    file: NamedTempFile,
    target: PathBuf,
}

/// Write `contents` to a temporary file in `target`'s directory.
pub(crate) fn stage(target: &Path, contents: &str) -> Result<Staged, ReportError> {
    let dir = match target.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut file = NamedTempFile::new_in(dir).map_err(|err| ReportError::write(target, err))?;
    file.write_all(contents.as_bytes())
        .and_then(|()| file.as_file().sync_all())
        .map_err(|err| ReportError::write(target, err))?;
    Ok(Staged {
        file,
        target: target.to_path_buf(),
    })
}

impl Staged {
    /// Rename the staged file over the destination.
    pub(crate) fn commit(self) -> Result<PathBuf, ReportError> {
        let Staged { file, target } = self;
        file.persist(&target)
            .map_err(|err| ReportError::write(&target, err.error))?;
        Ok(target)
    }
}
