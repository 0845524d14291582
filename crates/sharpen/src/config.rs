//! `sharpen.toml`, looked up from the working directory upwards.

use anyhow::Context;
use camino::Utf8Path;
use serde::Deserialize;
use sharpen_fmt::NormalizeOptions;
use sharpen_syntax::{DocumentationMode, ParseOptions};

pub(crate) const FILE_NAME: &str = "sharpen.toml";

#[derive(Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct Config {
    pub(crate) parse: ParseConfig,
    pub(crate) format: FormatConfig,
}

#[derive(Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
pub(crate) struct ParseConfig {
    /// Preprocessor symbols defined before the first line.
    pub(crate) defines: Vec<String>,
    pub(crate) documentation: Documentation,
}

#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub(crate) enum Documentation {
    None,
    #[default]
    Parse,
    Diagnose,
}

#[derive(Debug, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
pub(crate) struct FormatConfig {
    /// Spaces per indentation level.
    pub(crate) indent: usize,
    pub(crate) end_of_line: LineEnding,
}

impl Default for FormatConfig {
    fn default() -> Self {
        Self { indent: 4, end_of_line: LineEnding::default() }
    }
}

#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Eq, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub(crate) enum LineEnding {
    #[default]
    Crlf,
    Lf,
}

impl LineEnding {
    pub(crate) fn as_str(self) -> &'static str {
        match self {
            Self::Crlf => "\r\n",
            Self::Lf => "\n",
        }
    }
}

impl Config {
    /// The nearest `sharpen.toml` at or above `start`, or the defaults.
    pub(crate) fn discover(start: &Utf8Path) -> anyhow::Result<Self> {
        for dir in start.ancestors() {
            let path = dir.join(FILE_NAME);
            if path.is_file() {
                return Self::load(&path);
            }
        }
        tracing::debug!(%start, "no {FILE_NAME} found, using defaults");
        Ok(Self::default())
    }

    pub(crate) fn load(path: &Utf8Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read `{path}`"))?;
        let config = toml::from_str(&text).with_context(|| format!("invalid configuration in `{path}`"))?;
        tracing::debug!(%path, "loaded configuration");
        Ok(config)
    }

    pub(crate) fn parse_options(&self) -> ParseOptions {
        let mode = match self.parse.documentation {
            Documentation::None => DocumentationMode::None,
            Documentation::Parse => DocumentationMode::Parse,
            Documentation::Diagnose => DocumentationMode::Diagnose,
        };
        ParseOptions::default()
            .with_preprocessor_symbols(&self.parse.defines)
            .with_documentation_mode(mode)
    }

    pub(crate) fn normalize_options(&self) -> NormalizeOptions {
        NormalizeOptions::default()
            .with_indentation(" ".repeat(self.format.indent))
            .with_end_of_line(self.format.end_of_line.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_is_the_default() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.normalize_options(), NormalizeOptions::default());
    }

    #[test]
    fn sections_are_read() {
        let config: Config = toml::from_str(
            r#"
            [parse]
            defines = ["DEBUG", "TRACE"]
            documentation = "none"

            [format]
            indent = 2
            end-of-line = "lf"
            "#,
        )
        .unwrap();

        let parse = config.parse_options();
        assert!(parse.is_defined("DEBUG"));
        assert!(parse.is_defined("TRACE"));
        assert_eq!(parse.documentation_mode(), DocumentationMode::None);

        let format = config.normalize_options();
        assert_eq!(format.indentation, "  ");
        assert_eq!(format.end_of_line, "\n");
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let error = toml::from_str::<Config>("[format]\ntabs = true\n").unwrap_err();
        assert!(error.to_string().contains("tabs"), "{error}");
    }
}
