use crate::config::{self, Config, ConnectorSettings, EmulatorConfig};
use crate::error::{MarqueeError, Result};
use reqwest::Client;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, OnceLock};

/// Production Data Connect origin
pub const PRODUCTION_ORIGIN: &str = "https://firebasedataconnect.googleapis.com";

/// Identifies which backend schema an operation targets.
///
/// Must match the server-side deployment exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConnectorConfig {
    pub connector: &'static str,
    pub service: &'static str,
    pub location: &'static str,
}

/// The movie app's connector
pub const CONNECTOR_CONFIG: ConnectorConfig = ConnectorConfig {
    connector: "connector",
    service: "app",
    location: "us-central1",
};

impl From<ConnectorConfig> for ConnectorSettings {
    fn from(config: ConnectorConfig) -> Self {
        ConnectorSettings {
            connector: config.connector.to_string(),
            service: config.service.to_string(),
            location: config.location.to_string(),
        }
    }
}

/// Options for building a [`DataConnect`] handle
#[derive(Debug, Clone)]
pub struct DataConnectOptions {
    pub project_id: String,
    pub api_key: String,
    pub app_id: Option<String>,
    pub connector: ConnectorSettings,
}

impl DataConnectOptions {
    pub fn new(project_id: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            project_id: project_id.into(),
            api_key: api_key.into(),
            app_id: None,
            connector: CONNECTOR_CONFIG.into(),
        }
    }
}

static DEFAULT_INSTANCE: OnceLock<Arc<DataConnect>> = OnceLock::new();

/// Client handle for one Data Connect connector.
///
/// # Example
///
/// ```no_run
/// use marquee::connect::{DataConnect, DataConnectOptions};
///
/// let dc = DataConnect::new(DataConnectOptions::new("movies-demo", "api-key"))
///     .connect_emulator("localhost", 9399, false);
/// assert!(dc.emulator().is_some());
/// ```
#[derive(Debug)]
pub struct DataConnect {
    options: DataConnectOptions,
    emulator: Option<EmulatorConfig>,
    auth_token: Option<String>,
    generated_sdk: AtomicBool,
    client: Client,
}

impl DataConnect {
    pub fn new(options: DataConnectOptions) -> Self {
        Self {
            options,
            emulator: None,
            auth_token: None,
            generated_sdk: AtomicBool::new(false),
            client: Client::new(),
        }
    }

    /// Build a handle from file configuration and the environment
    pub fn from_config(config: &Config) -> Self {
        let options = DataConnectOptions {
            project_id: config.firebase.project_id.clone(),
            api_key: config.firebase.api_key.clone(),
            app_id: config.firebase.app_id.clone(),
            connector: config.connector.clone(),
        };

        let mut dc = Self::new(options);

        if let Some(emulator) = config::resolve_emulator(config) {
            tracing::info!("Using Data Connect emulator at {}:{}", emulator.host, emulator.port);
            dc = dc.connect_emulator(&emulator.host, emulator.port, emulator.ssl);
        }

        if let Ok(token) = std::env::var(config::ID_TOKEN_ENV) {
            if !token.is_empty() {
                dc = dc.with_auth_token(token);
            }
        }

        dc
    }

    /// Route every operation to a local emulator instead of production
    pub fn connect_emulator(mut self, host: &str, port: u16, ssl: bool) -> Self {
        self.emulator = Some(EmulatorConfig {
            host: host.to_string(),
            port,
            ssl,
        });
        self
    }

    pub fn with_auth_token(mut self, token: impl Into<String>) -> Self {
        self.auth_token = Some(token.into());
        self
    }

    /// Install the process-wide handle used by the `*_ref_default` call shape.
    ///
    /// Returns false if a default was already installed.
    pub fn install_default(dc: Arc<DataConnect>) -> bool {
        DEFAULT_INSTANCE.set(dc).is_ok()
    }

    pub fn default_instance() -> Result<Arc<DataConnect>> {
        DEFAULT_INSTANCE.get().cloned().ok_or_else(|| {
            MarqueeError::invalid("no default Data Connect instance installed; pass a client explicitly")
        })
    }

    /// Record that this handle is driven by generated operation code
    pub fn use_generated_sdk(&self) {
        self.generated_sdk.store(true, Ordering::Relaxed);
    }

    pub fn is_generated_sdk(&self) -> bool {
        self.generated_sdk.load(Ordering::Relaxed)
    }

    pub(crate) fn validate(&self) -> Result<()> {
        if self.options.project_id.trim().is_empty() {
            return Err(MarqueeError::invalid("client handle has an empty project id"));
        }
        self.options
            .connector
            .validate()
            .map_err(|e| MarqueeError::invalid(format!("client handle is malformed: {}", e)))
    }

    /// `projects/{project}/locations/{location}/services/{service}/connectors/{connector}`
    pub fn resource_name(&self) -> String {
        let connector = &self.options.connector;
        format!(
            "projects/{}/locations/{}/services/{}/connectors/{}",
            self.options.project_id, connector.location, connector.service, connector.connector
        )
    }

    pub fn origin(&self) -> String {
        match &self.emulator {
            Some(emulator) => {
                let scheme = if emulator.ssl { "https" } else { "http" };
                format!("{}://{}:{}", scheme, emulator.host, emulator.port)
            }
            None => PRODUCTION_ORIGIN.to_string(),
        }
    }

    pub fn emulator(&self) -> Option<&EmulatorConfig> {
        self.emulator.as_ref()
    }

    pub fn connector(&self) -> &ConnectorSettings {
        &self.options.connector
    }

    pub(crate) fn api_key(&self) -> &str {
        &self.options.api_key
    }

    pub(crate) fn app_id(&self) -> Option<&str> {
        self.options.app_id.as_deref()
    }

    pub(crate) fn auth_token(&self) -> Option<&str> {
        self.auth_token.as_deref()
    }

    pub(crate) fn http(&self) -> &Client {
        &self.client
    }
}
