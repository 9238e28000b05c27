// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

use crate::{Error, Result};
use bytes::Bytes;
use std::collections::HashMap;
use std::fmt::Debug;
use std::sync::{Arc, Mutex};

/// Context carries every side effect the client needs: sending http
/// requests, reading the environment and persisting session state.
///
/// ## Important
///
/// No component is wired in by default. Any unconfigured component uses a
/// no-op implementation that returns errors or empty values when called.
///
/// ## Example
///
/// ```
/// use para_core::{Context, MemoryPreferenceStore, OsEnv};
///
/// let ctx = Context::new()
///     .with_env(OsEnv)
///     .with_preference_store(MemoryPreferenceStore::default());
/// ```
#[derive(Clone)]
pub struct Context {
    http: Arc<dyn HttpSend>,
    env: Arc<dyn Env>,
    prefs: Arc<dyn PreferenceStore>,
}

impl Debug for Context {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Context")
            .field("http", &self.http)
            .field("env", &self.env)
            .field("prefs", &self.prefs)
            .finish()
    }
}

impl Default for Context {
    fn default() -> Self {
        Self::new()
    }
}

impl Context {
    /// Create a new Context with no-op implementations.
    pub fn new() -> Self {
        Self {
            http: Arc::new(NoopHttpSend),
            env: Arc::new(NoopEnv),
            prefs: Arc::new(NoopPreferenceStore),
        }
    }

    /// Replace the HTTP client implementation.
    pub fn with_http_send(mut self, http: impl HttpSend) -> Self {
        self.http = Arc::new(http);
        self
    }

    /// Replace the environment implementation.
    pub fn with_env(mut self, env: impl Env) -> Self {
        self.env = Arc::new(env);
        self
    }

    /// Replace the preference store used to persist session tokens.
    pub fn with_preference_store(mut self, prefs: impl PreferenceStore) -> Self {
        self.prefs = Arc::new(prefs);
        self
    }

    /// Send http request and return the response.
    #[inline]
    pub async fn http_send(&self, req: http::Request<Bytes>) -> Result<http::Response<Bytes>> {
        self.http.http_send(req).await
    }

    /// Get the environment variable.
    ///
    /// - Returns `Some(v)` if the environment variable is found and is valid utf-8.
    /// - Returns `None` if the environment variable is not found or value is invalid.
    #[inline]
    pub fn env_var(&self, key: &str) -> Option<String> {
        self.env.var(key)
    }

    /// Returns an hashmap of (variable, value) pairs of strings, for all the
    /// environment variables of the current process.
    #[inline]
    pub fn env_vars(&self) -> HashMap<String, String> {
        self.env.vars()
    }

    /// Store `value` under `key` in the preference store.
    #[inline]
    pub fn pref_save(&self, key: &str, value: &str) -> Result<()> {
        self.prefs.save(key, value)
    }

    /// Load the value stored under `key`, if any.
    #[inline]
    pub fn pref_load(&self, key: &str) -> Option<String> {
        self.prefs.load(key)
    }

    /// Remove `key` from the preference store.
    #[inline]
    pub fn pref_clear(&self, key: &str) -> Result<()> {
        self.prefs.clear(key)
    }
}

/// HttpSend is used to send the http requests built by the client.
///
/// Implementations must not follow their own retry policy, every request
/// is sent exactly once.
#[async_trait::async_trait]
pub trait HttpSend: Debug + Send + Sync + 'static {
    /// Send http request and return the response.
    async fn http_send(&self, req: http::Request<Bytes>) -> Result<http::Response<Bytes>>;
}

/// Permits parameterizing environment lookups.
pub trait Env: Debug + Send + Sync + 'static {
    /// Get an environment variable.
    ///
    /// - Returns `Some(v)` if the environment variable is found and is valid utf-8.
    /// - Returns `None` if the environment variable is not found or value is invalid.
    fn var(&self, key: &str) -> Option<String>;

    /// Returns an hashmap of (variable, value) pairs of strings, for all the
    /// environment variables of the current process.
    fn vars(&self) -> HashMap<String, String>;
}

/// PreferenceStore is a small synchronous key-value store that keeps the
/// session token across process restarts.
///
/// No transactional guarantees are expected: each call stands alone.
pub trait PreferenceStore: Debug + Send + Sync + 'static {
    /// Store `value` under `key`, replacing any previous value.
    fn save(&self, key: &str, value: &str) -> Result<()>;

    /// Load the value stored under `key`.
    fn load(&self, key: &str) -> Option<String>;

    /// Remove `key`. Removing a missing key is not an error.
    fn clear(&self, key: &str) -> Result<()>;
}

/// Implements Env for the OS context.
#[derive(Debug, Copy, Clone)]
pub struct OsEnv;

impl Env for OsEnv {
    fn var(&self, key: &str) -> Option<String> {
        std::env::var_os(key)?.into_string().ok()
    }

    fn vars(&self) -> HashMap<String, String> {
        std::env::vars().collect()
    }
}

/// StaticEnv provides a static env environment.
///
/// This is useful for testing or for providing a fixed environment.
#[derive(Debug, Clone, Default)]
pub struct StaticEnv {
    /// The environment variables to use.
    pub envs: HashMap<String, String>,
}

impl Env for StaticEnv {
    fn var(&self, key: &str) -> Option<String> {
        self.envs.get(key).cloned()
    }

    fn vars(&self) -> HashMap<String, String> {
        self.envs.clone()
    }
}

/// MemoryPreferenceStore keeps preferences in process memory.
///
/// Clones share the same underlying map, so a test can hand one clone to
/// the client and inspect the other.
#[derive(Debug, Clone, Default)]
pub struct MemoryPreferenceStore {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryPreferenceStore {
    /// Create a store pre-populated with the given entries.
    pub fn with_entries<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        let entries = entries
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Self {
            entries: Arc::new(Mutex::new(entries)),
        }
    }

    /// Snapshot of every stored entry.
    pub fn entries(&self) -> HashMap<String, String> {
        self.entries.lock().expect("lock poisoned").clone()
    }
}

impl PreferenceStore for MemoryPreferenceStore {
    fn save(&self, key: &str, value: &str) -> Result<()> {
        self.entries
            .lock()
            .expect("lock poisoned")
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn load(&self, key: &str) -> Option<String> {
        self.entries.lock().expect("lock poisoned").get(key).cloned()
    }

    fn clear(&self, key: &str) -> Result<()> {
        self.entries.lock().expect("lock poisoned").remove(key);
        Ok(())
    }
}

/// NoopHttpSend is a no-op implementation that always returns an error.
///
/// This is used when no HTTP client is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopHttpSend;

#[async_trait::async_trait]
impl HttpSend for NoopHttpSend {
    async fn http_send(&self, _req: http::Request<Bytes>) -> Result<http::Response<Bytes>> {
        Err(Error::unexpected(
            "HTTP sending not supported: no HTTP client configured",
        ))
    }
}

/// NoopEnv is a no-op implementation that always returns None/empty.
///
/// This is used when no environment is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopEnv;

impl Env for NoopEnv {
    fn var(&self, _key: &str) -> Option<String> {
        None
    }

    fn vars(&self) -> HashMap<String, String> {
        HashMap::new()
    }
}

/// NoopPreferenceStore forgets everything it is given.
///
/// This is used when no preference store is configured, so session tokens
/// only live as long as the client.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopPreferenceStore;

impl PreferenceStore for NoopPreferenceStore {
    fn save(&self, _key: &str, _value: &str) -> Result<()> {
        Ok(())
    }

    fn load(&self, _key: &str) -> Option<String> {
        None
    }

    fn clear(&self, _key: &str) -> Result<()> {
        Ok(())
    }
}
