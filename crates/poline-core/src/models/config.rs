//! Configuration structures for the extraction pipeline.

use serde::{Deserialize, Serialize};

use crate::extract::{DEFAULT_TERMINAL_MARKERS, LinePairExtractor, PageDriver};

/// Main configuration for poline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PolineConfig {
    /// Line-item extraction configuration.
    pub extraction: ExtractionConfig,

    /// Output configuration.
    pub output: OutputConfig,
}

/// Line-item extraction configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Line prefixes that end the scan of a page (case-sensitive).
    pub terminal_markers: Vec<String>,

    /// Scan pages in parallel when the `parallel` feature is enabled.
    pub parallel_pages: bool,

    /// Maximum pages to scan (0 = unlimited).
    pub max_pages: usize,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            terminal_markers: DEFAULT_TERMINAL_MARKERS.iter().map(|m| m.to_string()).collect(),
            parallel_pages: true,
            max_pages: 0,
        }
    }
}

/// Serialized output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Json,
    Csv,
    Xml,
    Text,
}

/// Output configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Default output format when none is given on the command line.
    pub format: OutputFormat,

    /// Pretty-print JSON output.
    pub pretty_json: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Json,
            pretty_json: true,
        }
    }
}

impl PolineConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<(), std::io::Error> {
        let content = serde_json::to_string_pretty(self).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })?;
        std::fs::write(path, content)
    }

    /// Build a page driver from the extraction settings.
    pub fn to_driver(&self) -> PageDriver {
        let extractor =
            LinePairExtractor::new().with_terminal_markers(self.extraction.terminal_markers.clone());

        PageDriver::new(extractor)
            .with_parallel(self.extraction.parallel_pages)
            .with_max_pages(self.extraction.max_pages)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_markers() {
        let config = PolineConfig::default();
        assert_eq!(config.extraction.terminal_markers, vec!["Subtotal", "Total"]);
        assert_eq!(config.extraction.terminal_markers, DEFAULT_TERMINAL_MARKERS);
        assert_eq!(config.extraction.max_pages, 0);
        assert_eq!(config.output.format, OutputFormat::Json);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let config: PolineConfig =
            serde_json::from_str(r#"{"output": {"format": "csv"}}"#).unwrap();

        assert_eq!(config.output.format, OutputFormat::Csv);
        assert!(config.output.pretty_json);
        assert_eq!(config.extraction.terminal_markers, vec!["Subtotal", "Total"]);
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let mut config = PolineConfig::default();
        config.extraction.terminal_markers = vec!["Grand Total".to_string()];
        config.extraction.max_pages = 3;
        config.save(&path).unwrap();

        let loaded = PolineConfig::from_file(&path).unwrap();
        assert_eq!(loaded.extraction.terminal_markers, vec!["Grand Total"]);
        assert_eq!(loaded.extraction.max_pages, 3);
    }

    #[test]
    fn test_invalid_file_is_invalid_data() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{ not json").unwrap();

        let err = PolineConfig::from_file(&path).unwrap_err();
        assert_eq!(err.kind(), std::io::ErrorKind::InvalidData);
    }
}
