//! Reading documents from files or stdin.

use std::io::Read;
use std::path::{Path, PathBuf};

use rayon::prelude::*;

use crate::error::CliError;

/// Display name of a document read from stdin.
const STDIN_NAME: &str = "<stdin>";

/// One input document, as raw bytes.
#[derive(Debug)]
pub(crate) struct Source {
    /// `None` for stdin.
    pub(crate) path: Option<PathBuf>,
    pub(crate) bytes: Vec<u8>,
}

impl Source {
    /// Name used in reports and messages.
    pub(crate) fn name(&self) -> String {
        self.path
            .as_ref()
            .map_or_else(|| STDIN_NAME.to_owned(), |path| path.display().to_string())
    }

    /// Content as text, for commands that parse Markdown.
    pub(crate) fn text(&self) -> Result<&str, CliError> {
        std::str::from_utf8(&self.bytes).map_err(|_| CliError::InvalidUtf8(self.name()))
    }
}

/// Read one file.
pub(crate) fn read_file(path: &Path) -> Result<Source, CliError> {
    let bytes = std::fs::read(path).map_err(|source| CliError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(Source {
        path: Some(path.to_path_buf()),
        bytes,
    })
}

/// Read stdin to the end.
pub(crate) fn read_stdin() -> Result<Source, CliError> {
    let mut bytes = Vec::new();
    std::io::stdin().lock().read_to_end(&mut bytes)?;
    Ok(Source { path: None, bytes })
}

/// Read `file`, or stdin when it is `None`.
pub(crate) fn read_one(file: Option<&Path>) -> Result<Source, CliError> {
    file.map_or_else(read_stdin, read_file)
}

/// Read every file in parallel, or stdin when `files` is empty.
///
/// Sources come back in argument order.
pub(crate) fn read_all(files: &[PathBuf]) -> Result<Vec<Source>, CliError> {
    if files.is_empty() {
        return Ok(vec![read_stdin()?]);
    }
    tracing::debug!(count = files.len(), "Reading input files");
    files.par_iter().map(|path| read_file(path)).collect()
}
