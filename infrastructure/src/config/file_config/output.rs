//! Output configuration from TOML (`[output]` section)

use research_domain::OutputFormat;
use serde::{Deserialize, Serialize};

/// How command results are printed.
///
/// # Example
///
/// ```toml
/// [output]
/// format = "summary"    # "full", "summary" or "json"
/// color = true
/// show_progress = true  # phase and subtask progress on stderr
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileOutputConfig {
    /// Rendering of the research outcome; `--output` overrides it.
    pub format: Option<OutputFormat>,
    /// Colored terminal output.
    pub color: bool,
    /// Report phase and subtask progress while researching.
    pub show_progress: bool,
}

impl FileOutputConfig {
    /// Format to render with: the command-line choice, then this file, then
    /// [`OutputFormat::Summary`].
    pub fn resolve_format(&self, cli: Option<OutputFormat>) -> OutputFormat {
        cli.or(self.format).unwrap_or_default()
    }

    /// `--quiet` disables progress regardless of `show_progress`.
    pub fn progress_enabled(&self, quiet: bool) -> bool {
        !quiet && self.show_progress
    }
}

impl Default for FileOutputConfig {
    fn default() -> Self {
        Self {
            format: None,
            color: true,
            show_progress: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FileConfig;

    #[test]
    fn test_output_section_deserialize() {
        let toml_str = r#"
[output]
format = "json"
show_progress = false
"#;
        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.output.format, Some(OutputFormat::Json));
        assert!(!config.output.show_progress);
        assert!(config.output.color);
    }

    #[test]
    fn test_command_line_format_wins_over_file() {
        let config = FileOutputConfig {
            format: Some(OutputFormat::Json),
            ..Default::default()
        };
        assert_eq!(config.resolve_format(Some(OutputFormat::Full)), OutputFormat::Full);
        assert_eq!(config.resolve_format(None), OutputFormat::Json);
        assert_eq!(
            FileOutputConfig::default().resolve_format(None),
            OutputFormat::Summary
        );
    }

    #[test]
    fn test_quiet_disables_progress() {
        let config = FileOutputConfig::default();
        assert!(config.progress_enabled(false));
        assert!(!config.progress_enabled(true));
        let silent = FileOutputConfig {
            show_progress: false,
            ..Default::default()
        };
        assert!(!silent.progress_enabled(false));
    }
}
