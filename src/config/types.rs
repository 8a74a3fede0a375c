use serde::{Deserialize, Serialize};

/// Top-level configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub firebase: FirebaseConfig,

    #[serde(default)]
    pub connector: ConnectorSettings,

    /// Optional local emulator (overridden by DATA_CONNECT_EMULATOR_HOST)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emulator: Option<EmulatorConfig>,

    #[serde(default)]
    pub ai: AiConfig,

    #[serde(default)]
    pub state: StateConfig,
}

/// Firebase project credentials
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FirebaseConfig {
    pub project_id: String,

    /// Web API key sent as `x-goog-api-key`
    pub api_key: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub app_id: Option<String>,
    // ID token is read from FIREBASE_ID_TOKEN environment variable
}

/// Data Connect connector the generated operations target
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectorSettings {
    #[serde(default = "default_connector")]
    pub connector: String,

    #[serde(default = "default_service")]
    pub service: String,

    #[serde(default = "default_location")]
    pub location: String,
}

impl Default for ConnectorSettings {
    fn default() -> Self {
        Self {
            connector: default_connector(),
            service: default_service(),
            location: default_location(),
        }
    }
}

impl ConnectorSettings {
    pub fn validate(&self) -> Result<(), String> {
        for (field, value) in [
            ("connector", &self.connector),
            ("service", &self.service),
            ("location", &self.location),
        ] {
            if value.is_empty() {
                return Err(format!("Connector {} must not be empty", field));
            }
            if value.contains('/') {
                return Err(format!("Connector {} '{}' must not contain '/'", field, value));
            }
        }
        Ok(())
    }
}

fn default_connector() -> String {
    "connector".to_string()
}

fn default_service() -> String {
    "app".to_string()
}

fn default_location() -> String {
    "us-central1".to_string()
}

/// Local Data Connect emulator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmulatorConfig {
    pub host: String,

    #[serde(default = "default_emulator_port")]
    pub port: u16,

    #[serde(default)]
    pub ssl: bool,
}

pub fn default_emulator_port() -> u16 {
    9399
}

/// Generative model used by the theatre search
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AiConfig {
    #[serde(default = "default_model")]
    pub model: String,

    /// Ground answers with Google Search
    #[serde(default = "default_google_search")]
    pub google_search: bool,

    /// Override of the Firebase AI endpoint (e.g. a local proxy)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            google_search: default_google_search(),
            endpoint: None,
        }
    }
}

fn default_model() -> String {
    "gemini-3-pro-preview".to_string()
}

fn default_google_search() -> bool {
    true
}

/// Where persisted client flags live
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StateConfig {
    #[serde(default = "default_state_path")]
    pub path: String,
}

impl Default for StateConfig {
    fn default() -> Self {
        Self {
            path: default_state_path(),
        }
    }
}

fn default_state_path() -> String {
    ".marquee/state.json".to_string()
}
