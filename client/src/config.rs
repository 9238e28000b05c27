use para_core::utils::Redact;
use para_core::Context;
use std::fmt::{Debug, Formatter};

/// Env name of the Para endpoint.
pub const PARA_ENDPOINT: &str = "PARA_ENDPOINT";
/// Env name of the api path prefix.
pub const PARA_API_PATH: &str = "PARA_API_PATH";
/// Env name of the access key, the app id.
pub const PARA_ACCESS_KEY: &str = "PARA_ACCESS_KEY";
/// Env name of the secret key.
pub const PARA_SECRET_KEY: &str = "PARA_SECRET_KEY";

/// Endpoint used when none is configured.
pub const DEFAULT_ENDPOINT: &str = "https://paraio.com";
/// Api path prefix used when none is configured.
pub const DEFAULT_API_PATH: &str = "/v1/";

/// Config carries all the configuration for a Para client.
#[derive(Clone, Default)]
pub struct Config {
    /// `endpoint` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`PARA_ENDPOINT`]
    /// - default to [`DEFAULT_ENDPOINT`]
    pub endpoint: Option<String>,
    /// `api_path` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`PARA_API_PATH`]
    /// - default to [`DEFAULT_API_PATH`]
    pub api_path: Option<String>,
    /// `access_key` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`PARA_ACCESS_KEY`]
    pub access_key: Option<String>,
    /// `secret_key` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`PARA_SECRET_KEY`]
    ///
    /// A client without secret key sends anonymous requests until it signs in.
    pub secret_key: Option<String>,
}

impl Debug for Config {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("endpoint", &self.endpoint)
            .field("api_path", &self.api_path)
            .field("access_key", &self.access_key)
            .field("secret_key", &Redact::from(&self.secret_key))
            .finish()
    }
}

impl Config {
    /// Create a config with the given keys.
    pub fn new(access_key: impl Into<String>, secret_key: impl Into<String>) -> Self {
        Self {
            access_key: Some(access_key.into()),
            secret_key: Some(secret_key.into()),
            ..Default::default()
        }
    }

    /// Set the endpoint.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Load config from env.
    pub fn from_env(mut self, ctx: &Context) -> Self {
        let envs = ctx.env_vars();

        if let Some(v) = envs.get(PARA_ENDPOINT) {
            self.endpoint.get_or_insert(v.clone());
        }
        if let Some(v) = envs.get(PARA_API_PATH) {
            self.api_path.get_or_insert(v.clone());
        }
        if let Some(v) = envs.get(PARA_ACCESS_KEY) {
            self.access_key.get_or_insert(v.clone());
        }
        if let Some(v) = envs.get(PARA_SECRET_KEY) {
            self.secret_key.get_or_insert(v.clone());
        }

        self
    }
}
