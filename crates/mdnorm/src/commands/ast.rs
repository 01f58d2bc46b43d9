//! `mdnorm ast` command implementation.

use std::io::Write;
use std::path::PathBuf;

use clap::Args;

use super::Status;
use crate::error::CliError;
use crate::input;

/// Arguments for the ast command.
#[derive(Args)]
pub(crate) struct AstArgs {
    /// Markdown file to parse (default: read stdin).
    file: Option<PathBuf>,
}

impl AstArgs {
    /// Execute the ast command.
    ///
    /// # Errors
    ///
    /// Returns an error if the input cannot be read or is not UTF-8.
    pub(crate) fn execute(self) -> Result<Status, CliError> {
        let source = input::read_one(self.file.as_deref())?;
        let mut stdout = std::io::stdout().lock();
        write_ast(&mut stdout, source.text()?)?;
        stdout.flush()?;
        Ok(Status::Clean)
    }
}

fn write_ast(out: &mut impl Write, markdown: &str) -> Result<(), CliError> {
    let tree = mdnorm_tree::parse(markdown);
    tracing::debug!(nodes = tree.len(), "Parsed document");
    serde_json::to_writer_pretty(&mut *out, &tree.to_ast())?;
    writeln!(out)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_ast() {
        let mut out = Vec::new();
        write_ast(&mut out, "# Title\n").unwrap();

        let json: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(json["type"], "document");
        assert_eq!(json["children"][0]["type"], "heading");
        assert_eq!(json["children"][0]["attrs"]["level"], 1);
        assert_eq!(json["children"][0]["children"][0]["literal"], "Title");
    }
}
