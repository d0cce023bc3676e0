//! Startup configuration.
//!
//! Three secret API keys are required and loaded from a TOML file before
//! any network call is made. A missing file or missing key is fatal; the
//! binary prints [`SETUP_HELP`] with a sample config so the user can fix
//! it. Endpoint URLs, the page bound, and the election cycles are
//! optional overrides with defaults matching the public services.

use std::path::Path;

use serde::Deserialize;

/// Remediation instructions printed when configuration loading fails.
pub const SETUP_HELP: &str = r#"
It looks like you're missing API keys. Double-check that you have a
config.toml next to the shotbot binary (or pass --config) containing:

    geocoding_api_key = "<your Google Geocoding API key>"
    legislator_api_key = "<your legislator lookup API key>"
    crp_api_key = "<your OpenSecrets API key>"
"#;

/// Errors from loading the configuration file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("could not read config file '{path}': {source}")]
    Read {
        /// Path that was attempted.
        path: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The file was read but is not valid configuration (malformed TOML
    /// or a missing required key).
    #[error("invalid config file '{path}': {source}")]
    Parse {
        /// Path that was attempted.
        path: String,
        /// Underlying TOML error.
        source: Box<toml::de::Error>,
    },
}

/// Pipeline configuration, loaded once at startup and passed explicitly
/// into each stage's constructor.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// API key for the geocoding service.
    pub geocoding_api_key: String,
    /// API key shared by the national and state legislator services.
    pub legislator_api_key: String,
    /// API key for the campaign-finance service.
    pub crp_api_key: String,
    /// Override for the number of archive listing pages to scan.
    #[serde(default)]
    pub max_pages: Option<u32>,
    /// Override for the election cycles summed by the contribution
    /// fetcher.
    #[serde(default)]
    pub cycles: Option<Vec<u16>>,
    /// External service endpoints.
    #[serde(default)]
    pub endpoints: Endpoints,
}

/// External service endpoints, overridable for tests and mirrors.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Endpoints {
    /// Archive root, used to resolve relative incident detail links.
    pub archive_root: String,
    /// Archive listing URL (paginated via a `page` query value).
    pub archive_pages: String,
    /// Geocoding endpoint.
    pub geocoding: String,
    /// National legislator point-lookup endpoint.
    pub national_legislators: String,
    /// State legislator point-lookup endpoint.
    pub state_legislators: String,
    /// Campaign-finance totals endpoint.
    pub contributions: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            archive_root: "http://www.gunviolencearchive.org".to_owned(),
            archive_pages: "http://www.gunviolencearchive.org/last-72-hours".to_owned(),
            geocoding: "https://maps.googleapis.com/maps/api/geocode/json".to_owned(),
            national_legislators: "https://congress.api.sunlightfoundation.com/legislators/locate"
                .to_owned(),
            state_legislators: "https://openstates.org/api/v1/legislators/geo/".to_owned(),
            contributions: "http://www.opensecrets.org/api/".to_owned(),
        }
    }
}

impl Config {
    /// Loads the configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file cannot be read or any required
    /// key is missing or malformed.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;

        toml::de::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source: Box::new(source),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEYS_ONLY: &str = r#"
        geocoding_api_key = "geo-key"
        legislator_api_key = "leg-key"
        crp_api_key = "crp-key"
    "#;

    #[test]
    fn parses_minimal_config_with_defaults() {
        let config: Config = toml::de::from_str(KEYS_ONLY).unwrap();
        assert_eq!(config.geocoding_api_key, "geo-key");
        assert_eq!(config.max_pages, None);
        assert_eq!(config.cycles, None);
        assert_eq!(
            config.endpoints.archive_root,
            "http://www.gunviolencearchive.org"
        );
    }

    #[test]
    fn missing_key_is_an_error() {
        let result: Result<Config, _> = toml::de::from_str(
            r#"
            geocoding_api_key = "geo-key"
            crp_api_key = "crp-key"
            "#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn parses_overrides() {
        let config: Config = toml::de::from_str(
            r#"
            geocoding_api_key = "geo-key"
            legislator_api_key = "leg-key"
            crp_api_key = "crp-key"
            max_pages = 3
            cycles = [2022, 2024]

            [endpoints]
            geocoding = "http://localhost:9000/geocode"
            "#,
        )
        .unwrap();
        assert_eq!(config.max_pages, Some(3));
        assert_eq!(config.cycles.as_deref(), Some(&[2022, 2024][..]));
        assert_eq!(config.endpoints.geocoding, "http://localhost:9000/geocode");
        // Untouched endpoints keep their defaults.
        assert_eq!(
            config.endpoints.contributions,
            "http://www.opensecrets.org/api/"
        );
    }

    #[test]
    fn load_reports_missing_file() {
        let err = Config::load(Path::new("/nonexistent/config.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }
}
