//! `mdnorm fmt` command implementation.

use std::io::Write;
use std::path::PathBuf;

use clap::Args;
use mdnorm_config::{CliSettings, Config};
use mdnorm_fmt::{MarkdownRenderer, RenderResult};
use rayon::prelude::*;

use super::Status;
use crate::error::CliError;
use crate::input::{self, Source};
use crate::output::Output;

/// Arguments for the fmt command.
#[derive(Args)]
pub(crate) struct FmtArgs {
    /// Markdown files to format (default: read stdin).
    files: Vec<PathBuf>,

    /// Write the result back to each file instead of stdout.
    #[arg(short, long)]
    write: bool,

    /// Wrap column; 0 disables wrapping (overrides config).
    #[arg(long)]
    line_width: Option<i32>,

    /// Indent of a nested list, in spaces (overrides config).
    #[arg(long)]
    list_indent: Option<String>,

    /// Unordered list bullet: '-', '+' or '*' (overrides config).
    #[arg(long)]
    bullet: Option<String>,

    /// Horizontal rule character: '-', '*' or '_' (overrides config).
    #[arg(long)]
    hr_char: Option<String>,

    /// Horizontal rule length (overrides config).
    #[arg(long)]
    hr_length: Option<usize>,

    /// Heading style: atx or setext (overrides config).
    #[arg(long)]
    heading_style: Option<String>,

    /// Path to configuration file (default: auto-discover mdnorm.toml).
    #[arg(short, long, env = "MDNORM_CONFIG")]
    config: Option<PathBuf>,
}

impl FmtArgs {
    /// Execute the fmt command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration is invalid, an input cannot be read
    /// or a document fails to render.
    pub(crate) fn execute(self) -> Result<Status, CliError> {
        let output = Output::new();

        if self.write && self.files.is_empty() {
            return Err(CliError::Validation(
                "--write requires at least one file".to_owned(),
            ));
        }

        let cli_settings = CliSettings {
            line_width: self.line_width,
            list_indent: self.list_indent,
            bullet: self.bullet,
            hr_char: self.hr_char,
            hr_length: self.hr_length,
            heading_style: self.heading_style,
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        let renderer = MarkdownRenderer::new().with_options(config.format_options()?);

        let sources = input::read_all(&self.files)?;
        let results = format_all(&renderer, &sources)?;

        let mut stdout = std::io::stdout().lock();
        for (source, result) in sources.iter().zip(&results) {
            for warning in &result.warnings {
                output.warning(&format!("{}: {warning}", source.name()));
            }
            if self.write {
                if write_back(source, result)? {
                    output.success(&format!("Formatted {}", source.name()));
                } else {
                    output.info(&format!("Unchanged {}", source.name()));
                }
            } else {
                stdout.write_all(result.markdown.as_bytes())?;
            }
        }
        stdout.flush()?;

        Ok(Status::Clean)
    }
}

/// Render every source in parallel, one renderer state per document.
fn format_all(renderer: &MarkdownRenderer, sources: &[Source]) -> Result<Vec<RenderResult>, CliError> {
    sources
        .par_iter()
        .map(|source| format_source(renderer, source))
        .collect()
}

fn format_source(renderer: &MarkdownRenderer, source: &Source) -> Result<RenderResult, CliError> {
    let result = renderer
        .render_markdown(source.text()?)
        .map_err(|err| CliError::Render {
            name: source.name(),
            source: err,
        })?;
    tracing::debug!(
        name = %source.name(),
        pushes = result.stats.pushes,
        max_depth = result.stats.max_depth,
        "Formatted document"
    );
    Ok(result)
}

/// Write the formatted text over its file. Returns whether the file changed.
fn write_back(source: &Source, result: &RenderResult) -> Result<bool, CliError> {
    let Some(path) = &source.path else {
        return Ok(false);
    };
    if source.bytes == result.markdown.as_bytes() {
        return Ok(false);
    }
    std::fs::write(path, &result.markdown)?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn args(files: Vec<PathBuf>, config: PathBuf) -> FmtArgs {
        FmtArgs {
            files,
            write: true,
            line_width: None,
            list_indent: None,
            bullet: None,
            hr_char: None,
            hr_length: None,
            heading_style: None,
            config: Some(config),
        }
    }

    #[test]
    fn test_write_back_rewrites_changed_files_only() {
        let dir = tempfile::tempdir().unwrap();
        let config = dir.path().join("mdnorm.toml");
        std::fs::write(&config, "").unwrap();
        let messy = dir.path().join("messy.md");
        let clean = dir.path().join("clean.md");
        std::fs::write(&messy, "Title\n=====\n\n* a\n* b\n").unwrap();
        std::fs::write(&clean, "# Clean\n").unwrap();
        let clean_mtime = std::fs::metadata(&clean).unwrap().modified().unwrap();

        let status = args(vec![messy.clone(), clean.clone()], config)
            .execute()
            .unwrap();

        assert_eq!(status, Status::Clean);
        assert_eq!(
            std::fs::read_to_string(&messy).unwrap(),
            "# Title\n\n- a\n- b\n"
        );
        assert_eq!(std::fs::read_to_string(&clean).unwrap(), "# Clean\n");
        assert_eq!(
            std::fs::metadata(&clean).unwrap().modified().unwrap(),
            clean_mtime
        );
    }

    #[test]
    fn test_cli_settings_override_config() {
        let dir = tempfile::tempdir().unwrap();
        let config = dir.path().join("mdnorm.toml");
        std::fs::write(&config, "[format]\nbullet = \"+\"\n").unwrap();
        let doc = dir.path().join("doc.md");
        std::fs::write(&doc, "- a\n\n---\n").unwrap();

        let mut fmt = args(vec![doc.clone()], config);
        fmt.bullet = Some("*".to_owned());
        fmt.hr_char = Some("_".to_owned());
        fmt.execute().unwrap();

        assert_eq!(std::fs::read_to_string(&doc).unwrap(), "* a\n\n___\n");
    }

    #[test]
    fn test_write_requires_files() {
        let dir = tempfile::tempdir().unwrap();
        let config = dir.path().join("mdnorm.toml");
        std::fs::write(&config, "").unwrap();

        let err = args(Vec::new(), config).execute().unwrap_err();
        assert!(matches!(err, CliError::Validation(_)));
    }

    #[test]
    fn test_invalid_option_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let config = dir.path().join("mdnorm.toml");
        std::fs::write(&config, "").unwrap();
        let doc = dir.path().join("doc.md");
        std::fs::write(&doc, "text\n").unwrap();

        let mut fmt = args(vec![doc], config);
        fmt.bullet = Some("x".to_owned());
        let err = fmt.execute().unwrap_err();
        assert!(matches!(err, CliError::Config(_)));
    }

    #[test]
    fn test_format_all_keeps_order() {
        let renderer = MarkdownRenderer::new();
        let sources: Vec<Source> = (1..=5)
            .map(|i| Source {
                path: None,
                bytes: format!("Doc {i}\n---\n\n* item\n").into_bytes(),
            })
            .collect();

        let results = format_all(&renderer, &sources).unwrap();

        let rendered: Vec<&str> = results.iter().map(|r| r.markdown.as_str()).collect();
        let expected: Vec<String> = (1..=5).map(|i| format!("## Doc {i}\n\n- item\n")).collect();
        assert_eq!(rendered, expected);
    }
}
