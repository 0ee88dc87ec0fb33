use config::{Config as ConfigBuilder, ConfigError, Environment, File as ConfigFile};
use statelog_core::Config;
use std::path::Path;

/// Load configuration from `path`, or from an optional `statelog.toml` in
/// the working directory, overlaid with `STATELOG_*` variables
/// (`STATELOG_DISPLAY__ADDRESS_CHARS=8`).
pub fn load_configuration(path: Option<&Path>) -> Result<Config, ConfigError> {
    let builder = match path {
        Some(path) => ConfigBuilder::builder().add_source(ConfigFile::from(path).required(true)),
        None => ConfigBuilder::builder().add_source(ConfigFile::with_name("statelog").required(false)),
    };
    builder
        .add_source(
            Environment::with_prefix("STATELOG")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        )
        .build()?
        .try_deserialize::<Config>()
}

#[cfg(test)]
mod tests {
    use super::*;
    use statelog_core::config::MissingTimestamp;
    use std::io::Write;

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            "[extraction]\nmissing_timestamp = \"extraction_time\"\n\n[display]\naddress_chars = 4"
        )
        .unwrap();

        let config = load_configuration(Some(file.path())).unwrap();
        assert_eq!(config.extraction.missing_timestamp, MissingTimestamp::ExtractionTime);
        assert!(config.extraction.visited_hostnames);
        assert_eq!(config.display.address_chars, 4);
        assert_eq!(config.display.ether_decimals, 6);
    }

    #[test]
    fn test_environment_overrides_defaults() {
        std::env::set_var("STATELOG_DISPLAY__LOCAL_TIME", "true");
        let config = load_configuration(None);
        std::env::remove_var("STATELOG_DISPLAY__LOCAL_TIME");

        let config = config.unwrap();
        assert!(config.display.local_time);
        assert_eq!(config.display.default_chain_id, "1");
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        assert!(load_configuration(Some(Path::new("/nonexistent/statelog.toml"))).is_err());
    }
}
