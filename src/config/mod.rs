mod types;

pub use types::{
    default_emulator_port, AiConfig, Config, ConnectorSettings, EmulatorConfig, FirebaseConfig,
    StateConfig,
};

use crate::error::{MarqueeError, Result};
use std::fs;

/// Environment variable that redirects every operation to a local emulator
pub const EMULATOR_HOST_ENV: &str = "DATA_CONNECT_EMULATOR_HOST";

/// Environment variable holding the signed-in user's ID token
pub const ID_TOKEN_ENV: &str = "FIREBASE_ID_TOKEN";

/// Load configuration from a TOML file
pub fn load_config(path: &str) -> Result<Config> {
    let contents = fs::read_to_string(path)
        .map_err(|e| MarqueeError::Config(format!("Failed to read config file '{}': {}", path, e)))?;

    let config: Config = toml::from_str(&contents)?;
    validate(&config)?;

    Ok(config)
}

/// Save configuration to a TOML file
pub fn save_config(config: &Config, path: &str) -> Result<()> {
    validate(config)?;

    let toml_string = toml::to_string_pretty(config)?;
    fs::write(path, toml_string)
        .map_err(|e| MarqueeError::Config(format!("Failed to write config file '{}': {}", path, e)))?;

    Ok(())
}

fn validate(config: &Config) -> Result<()> {
    if config.firebase.project_id.trim().is_empty() {
        return Err(MarqueeError::Config("firebase.project_id must not be empty".to_string()));
    }
    if config.firebase.api_key.trim().is_empty() {
        return Err(MarqueeError::Config("firebase.api_key must not be empty".to_string()));
    }

    config.connector.validate().map_err(MarqueeError::Config)?;

    if let Some(ref endpoint) = config.ai.endpoint {
        if !endpoint.starts_with("http://") && !endpoint.starts_with("https://") {
            return Err(MarqueeError::Config(format!(
                "AI endpoint '{}' must be a valid URL (http:// or https://)",
                endpoint
            )));
        }
    }

    Ok(())
}

/// Resolve the emulator target, giving DATA_CONNECT_EMULATOR_HOST precedence over the file
pub fn resolve_emulator(config: &Config) -> Option<EmulatorConfig> {
    let from_env = std::env::var(EMULATOR_HOST_ENV).ok();
    resolve_emulator_from(from_env.as_deref(), config.emulator.as_ref())
}

fn resolve_emulator_from(
    env_value: Option<&str>,
    configured: Option<&EmulatorConfig>,
) -> Option<EmulatorConfig> {
    match env_value.map(str::trim).filter(|v| !v.is_empty()) {
        Some(value) => Some(parse_emulator_host(value)),
        None => configured.cloned(),
    }
}

/// Parse `host`, `host:port`, `[v6]` or `[v6]:port`; without a port the fixed emulator port is used.
///
/// A bare IPv6 address is bracketed so it can be placed in a URL.
pub fn parse_emulator_host(value: &str) -> EmulatorConfig {
    let (host, port) = split_host_port(value);

    EmulatorConfig {
        host,
        port: port.unwrap_or_else(default_emulator_port),
        ssl: false,
    }
}

fn split_host_port(value: &str) -> (String, Option<u16>) {
    if let Some(rest) = value.strip_prefix('[') {
        if let Some((addr, tail)) = rest.split_once(']') {
            let port = tail.strip_prefix(':').and_then(|p| p.parse::<u16>().ok());
            return (format!("[{}]", addr), port);
        }
    }

    match value.rsplit_once(':') {
        Some((host, port)) if !host.contains(':') => match port.parse::<u16>() {
            Ok(port) => (host.to_string(), Some(port)),
            Err(_) => (value.to_string(), None),
        },
        Some(_) => (format!("[{}]", value), None),
        None => (value.to_string(), None),
    }
}

/// Example configuration written by `marquee init`
pub fn example_config() -> Config {
    Config {
        firebase: FirebaseConfig {
            project_id: "your-project-id".to_string(),
            api_key: "your-web-api-key".to_string(),
            app_id: None,
        },
        connector: ConnectorSettings::default(),
        emulator: None,
        ai: AiConfig::default(),
        state: StateConfig::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_valid_config() {
        let mut temp_file = NamedTempFile::new().unwrap();
        let config_content = r#"
[firebase]
project_id = "movies-demo"
api_key = "AIza-test"
app_id = "1:123:web:abc"

[emulator]
host = "127.0.0.1"

[ai]
model = "gemini-2.5-flash"
google_search = false
"#;
        temp_file.write_all(config_content.as_bytes()).unwrap();
        temp_file.flush().unwrap();

        let config = load_config(temp_file.path().to_str().unwrap()).unwrap();

        assert_eq!(config.firebase.project_id, "movies-demo");
        assert_eq!(config.firebase.app_id.as_deref(), Some("1:123:web:abc"));
        assert_eq!(config.connector, ConnectorSettings::default());
        assert_eq!(config.emulator.as_ref().unwrap().port, 9399);
        assert_eq!(config.ai.model, "gemini-2.5-flash");
        assert!(!config.ai.google_search);
        assert_eq!(config.state.path, ".marquee/state.json");
    }

    #[test]
    fn test_load_rejects_empty_project() {
        let mut temp_file = NamedTempFile::new().unwrap();
        let config_content = r#"
[firebase]
project_id = ""
api_key = "AIza-test"
"#;
        temp_file.write_all(config_content.as_bytes()).unwrap();
        temp_file.flush().unwrap();

        assert!(load_config(temp_file.path().to_str().unwrap()).is_err());
    }

    #[test]
    fn test_load_rejects_invalid_ai_endpoint() {
        let mut temp_file = NamedTempFile::new().unwrap();
        let config_content = r#"
[firebase]
project_id = "movies-demo"
api_key = "AIza-test"

[ai]
endpoint = "localhost:8080"
"#;
        temp_file.write_all(config_content.as_bytes()).unwrap();
        temp_file.flush().unwrap();

        assert!(load_config(temp_file.path().to_str().unwrap()).is_err());
    }

    #[test]
    fn test_save_and_load_config() {
        let config = example_config();

        let temp_file = NamedTempFile::new().unwrap();
        let path = temp_file.path().to_str().unwrap();

        save_config(&config, path).unwrap();
        let loaded = load_config(path).unwrap();

        assert_eq!(loaded.firebase.project_id, config.firebase.project_id);
        assert_eq!(loaded.connector, config.connector);
        assert!(loaded.emulator.is_none());
    }

    #[test]
    fn test_parse_emulator_host_without_port() {
        let emulator = parse_emulator_host("localhost");
        assert_eq!(emulator.host, "localhost");
        assert_eq!(emulator.port, 9399);
    }

    #[test]
    fn test_parse_emulator_host_with_port() {
        let emulator = parse_emulator_host("127.0.0.1:9400");
        assert_eq!(emulator.host, "127.0.0.1");
        assert_eq!(emulator.port, 9400);
    }

    #[test]
    fn test_parse_emulator_host_ipv6() {
        let emulator = parse_emulator_host("::1");
        assert_eq!(emulator.host, "[::1]");
        assert_eq!(emulator.port, 9399);

        let emulator = parse_emulator_host("[::1]:9400");
        assert_eq!(emulator.host, "[::1]");
        assert_eq!(emulator.port, 9400);

        let emulator = parse_emulator_host("[fe80::2]");
        assert_eq!(emulator.host, "[fe80::2]");
        assert_eq!(emulator.port, 9399);
    }

    #[test]
    fn test_env_emulator_overrides_file() {
        let configured = EmulatorConfig {
            host: "configured".to_string(),
            port: 1234,
            ssl: true,
        };

        let resolved = resolve_emulator_from(Some("from-env"), Some(&configured)).unwrap();
        assert_eq!(resolved.host, "from-env");
        assert_eq!(resolved.port, 9399);

        let resolved = resolve_emulator_from(Some("  "), Some(&configured)).unwrap();
        assert_eq!(resolved, configured);

        assert!(resolve_emulator_from(None, None).is_none());
    }
}
