//! Configuration management.
//!
//! Layered the usual way: built-in defaults, then an optional TOML file,
//! then `INSIGHT_SCOUT_*` environment variables.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Base URLs of the three upstream services
    #[serde(default)]
    pub endpoints: EndpointConfig,

    /// Fetch behavior
    #[serde(default)]
    pub fetch: FetchConfig,

    /// Export settings
    #[serde(default)]
    pub export: ExportConfig,
}

/// Base URLs of the upstream services (overridable for testing)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EndpointConfig {
    /// arXiv API base URL
    #[serde(default = "default_arxiv_base")]
    pub arxiv_base: String,

    /// PatentsView API base URL
    #[serde(default = "default_patents_base")]
    pub patents_base: String,

    /// Google Trends base URL
    #[serde(default = "default_trends_base")]
    pub trends_base: String,
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            arxiv_base: default_arxiv_base(),
            patents_base: default_patents_base(),
            trends_base: default_trends_base(),
        }
    }
}

fn default_arxiv_base() -> String {
    "http://export.arxiv.org".to_string()
}

fn default_patents_base() -> String {
    "https://api.patentsview.org".to_string()
}

fn default_trends_base() -> String {
    "https://trends.google.com".to_string()
}

/// Fetch behavior configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchConfig {
    /// Per-request timeout in seconds. The upstream services impose none;
    /// this bound keeps a stalled upstream from blocking the cycle.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Maximum results requested from the paper and patent sources
    #[serde(default = "default_result_cap")]
    pub result_cap: usize,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            result_cap: default_result_cap(),
        }
    }
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_result_cap() -> usize {
    10
}

/// Export configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Directory the CSV artifact is written into
    #[serde(default = "default_export_dir")]
    pub directory: PathBuf,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            directory: default_export_dir(),
        }
    }
}

fn default_export_dir() -> PathBuf {
    PathBuf::from(".")
}

/// Load configuration from a file, with environment overrides
pub fn load_config(path: &PathBuf) -> Result<Config, config::ConfigError> {
    let settings = config::Config::builder()
        .add_source(config::File::from(path.as_path()))
        .add_source(config::Environment::with_prefix("INSIGHT_SCOUT"))
        .build()?;

    settings.try_deserialize()
}

/// Look for a config file in the default locations
pub fn find_config_file() -> Option<PathBuf> {
    let candidates = [
        PathBuf::from("insight-scout.toml"),
        PathBuf::from(".insight-scout.toml"),
    ];
    candidates.into_iter().find(|p| p.is_file())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.fetch.timeout_secs, 10);
        assert_eq!(config.fetch.result_cap, 10);
        assert_eq!(config.endpoints.arxiv_base, "http://export.arxiv.org");
        assert_eq!(config.export.directory, PathBuf::from("."));
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let toml = r#"
            [fetch]
            timeout_secs = 3
        "#;
        let settings = config::Config::builder()
            .add_source(config::File::from_str(toml, config::FileFormat::Toml))
            .build()
            .unwrap();
        let config: Config = settings.try_deserialize().unwrap();
        assert_eq!(config.fetch.timeout_secs, 3);
        assert_eq!(config.fetch.result_cap, 10);
        assert_eq!(config.endpoints.patents_base, "https://api.patentsview.org");
    }
}
