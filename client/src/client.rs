use crate::config::{Config, DEFAULT_API_PATH, DEFAULT_ENDPOINT};
use crate::dispatch::{Dispatcher, Invocation, Params, Reply, Secret};
use crate::session::{parse_auth_response, Session, Token, TokenStatus};
use http::Method;
use log::{debug, warn};
use para_core::{Context, Error, Result};
use serde_json::Value;
use std::fmt::{Debug, Formatter};
use std::sync::{Arc, RwLock};

/// Resource path of the JWT endpoint. Never prefixed by the api path.
pub const JWT_PATH: &str = "/jwt_auth";

/// Client of a Para server.
///
/// Cheap to clone, clones share the session and the keys.
///
/// ```no_run
/// use para_client::{Client, Config};
/// use para_core::Context;
///
/// # async fn example(ctx: Context) -> para_core::Result<()> {
/// let client = Client::new(ctx, Config::new("app:myapp", "secret"));
/// let version = client.server_version().await?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct Client {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    ctx: Context,
    dispatcher: Dispatcher,
    access_key: String,
    secret_key: RwLock<String>,
    endpoint: RwLock<String>,
    api_path: RwLock<String>,
    session: Session,
}

impl Debug for Client {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("endpoint", &self.endpoint())
            .field("api_path", &self.api_path())
            .field("access_key", &self.inner.access_key)
            .field("session", &self.inner.session)
            .finish_non_exhaustive()
    }
}

impl Client {
    /// Create a client.
    ///
    /// A JWT session persisted in the context's preference store is restored.
    pub fn new(ctx: Context, config: Config) -> Self {
        Self::with_dispatcher(ctx, config, Dispatcher::default())
    }

    /// Create a client with a custom dispatcher.
    pub fn with_dispatcher(ctx: Context, config: Config, dispatcher: Dispatcher) -> Self {
        let access_key = config.access_key.unwrap_or_default();
        if access_key.is_empty() {
            warn!("access key not provided, every request will be refused");
        }
        let secret_key = config.secret_key.unwrap_or_default();
        if secret_key.is_empty() {
            warn!("secret key not provided, requests are anonymous until sign in");
        }

        let session = Session::load(ctx.clone());
        let client = Self {
            inner: Arc::new(ClientInner {
                ctx,
                dispatcher,
                access_key,
                secret_key: RwLock::new(secret_key),
                endpoint: RwLock::new(String::new()),
                api_path: RwLock::new(String::new()),
                session,
            }),
        };
        client.set_endpoint(config.endpoint.as_deref().unwrap_or_default());
        client.set_api_path(config.api_path.as_deref().unwrap_or_default());
        client
    }

    pub(crate) fn ctx(&self) -> &Context {
        &self.inner.ctx
    }

    pub(crate) fn session(&self) -> &Session {
        &self.inner.session
    }

    /// The access key, also the app id.
    pub fn access_key(&self) -> &str {
        &self.inner.access_key
    }

    pub(crate) fn set_secret_key(&self, secret_key: impl Into<String>) {
        *self.inner.secret_key.write().expect("lock poisoned") = secret_key.into();
    }

    /// The server root url.
    pub fn endpoint(&self) -> String {
        self.inner.endpoint.read().expect("lock poisoned").clone()
    }

    /// Set the server root url, a blank value restores the default.
    pub fn set_endpoint(&self, endpoint: &str) {
        let endpoint = if endpoint.trim().is_empty() {
            DEFAULT_ENDPOINT
        } else {
            endpoint.trim()
        };
        *self.inner.endpoint.write().expect("lock poisoned") = endpoint.to_string();
    }

    /// The api path prefix, always ending with `/`.
    pub fn api_path(&self) -> String {
        self.inner.api_path.read().expect("lock poisoned").clone()
    }

    /// Set the api path prefix, a blank value restores the default.
    pub fn set_api_path(&self, path: &str) {
        let path = path.trim();
        let path = if path.is_empty() {
            DEFAULT_API_PATH.to_string()
        } else if path.ends_with('/') {
            path.to_string()
        } else {
            format!("{path}/")
        };
        *self.inner.api_path.write().expect("lock poisoned") = path;
    }

    /// Absolute path of a resource.
    ///
    /// The JWT endpoint is used as is, everything else is placed below the
    /// api path.
    pub fn full_path(&self, resource_path: &str) -> String {
        if resource_path.starts_with(JWT_PATH) {
            return resource_path.to_string();
        }
        let resource_path = resource_path.strip_prefix('/').unwrap_or(resource_path);
        format!("{}{resource_path}", self.api_path())
    }

    /// Current status of the JWT session.
    pub fn token_status(&self) -> TokenStatus {
        self.session().status()
    }

    /// Secret to authenticate the next call with: the JWT when signed in,
    /// the secret key otherwise.
    fn current_secret(&self) -> Secret {
        match self.session().token() {
            Some(token) if !token.value.is_empty() => Secret::Bearer(token.value),
            _ => Secret::key(self.inner.secret_key.read().expect("lock poisoned").as_str()),
        }
    }

    pub(crate) async fn dispatch(
        &self,
        method: Method,
        resource_path: &str,
        secret: &Secret,
        params: &Params,
        body: Option<&Value>,
    ) -> Result<Option<Reply>> {
        let endpoint = self.endpoint();
        let path = self.full_path(resource_path);
        self.inner
            .dispatcher
            .invoke(
                self.ctx(),
                self.access_key(),
                secret,
                Invocation {
                    method,
                    endpoint: &endpoint,
                    path: &path,
                    params,
                    body,
                },
            )
            .await
    }

    async fn invoke(
        &self,
        method: Method,
        resource_path: &str,
        params: &Params,
        body: Option<&Value>,
    ) -> Result<Option<Reply>> {
        let secret = self.current_secret();
        self.dispatch(method, resource_path, &secret, params, body)
            .await
    }

    /// Send a GET request.
    ///
    /// A token that is due for a refresh is refreshed first. The request
    /// itself still carries the token captured before the refresh.
    pub async fn invoke_get(&self, resource_path: &str, params: &Params) -> Result<Option<Reply>> {
        let secret = self.current_secret();
        if !resource_path.starts_with(JWT_PATH) && self.token_status() == TokenStatus::RefreshDue {
            if let Err(err) = self.refresh_token().await {
                warn!("refresh jwt before {resource_path} failed: {err}");
            }
        }
        self.dispatch(Method::GET, resource_path, &secret, params, None)
            .await
    }

    /// Send a POST request with an optional JSON body.
    pub async fn invoke_post(&self, resource_path: &str, body: Option<&Value>) -> Result<Option<Reply>> {
        self.invoke(Method::POST, resource_path, &Params::new(), body)
            .await
    }

    /// Send a POST request with query parameters and no body.
    pub async fn invoke_post_with_params(
        &self,
        resource_path: &str,
        params: &Params,
    ) -> Result<Option<Reply>> {
        self.invoke(Method::POST, resource_path, params, None).await
    }

    /// Send a PUT request with an optional JSON body.
    pub async fn invoke_put(&self, resource_path: &str, body: Option<&Value>) -> Result<Option<Reply>> {
        self.invoke(Method::PUT, resource_path, &Params::new(), body)
            .await
    }

    /// Send a PATCH request with an optional JSON body.
    pub async fn invoke_patch(&self, resource_path: &str, body: Option<&Value>) -> Result<Option<Reply>> {
        self.invoke(Method::PATCH, resource_path, &Params::new(), body)
            .await
    }

    /// Send a DELETE request.
    pub async fn invoke_delete(&self, resource_path: &str, params: &Params) -> Result<Option<Reply>> {
        self.invoke(Method::DELETE, resource_path, params, None)
            .await
    }

    /// Refresh the JWT if it is due.
    ///
    /// Returns `Ok(true)` if a new token was stored, `Ok(false)` if no
    /// refresh was due or the server sent back no token. A failed refresh
    /// signs the client out.
    pub async fn refresh_token(&self) -> Result<bool> {
        let Some(token) = self.session().token() else {
            return Ok(false);
        };
        if !token.should_refresh(para_core::time::now_millis()) {
            return Ok(false);
        }

        debug!("refreshing jwt");
        let secret = Secret::Bearer(token.value);
        let res = self
            .dispatch(Method::GET, JWT_PATH, &secret, &Params::new(), None)
            .await
            .and_then(|reply| match reply {
                Some(reply) => parse_auth_response(reply.into_raw()?),
                None => Ok(None),
            });

        match res {
            Ok(Some((_, token))) => {
                self.session().save(token);
                Ok(true)
            }
            Ok(None) => Ok(false),
            Err(err) => {
                self.session().clear();
                Err(Error::credential_expired("failed to refresh jwt").with_source(err))
            }
        }
    }

    /// The cached JWT, if any.
    pub fn access_token(&self) -> Option<String> {
        self.session().token().map(|t| t.value)
    }

    /// Use `jwt` for all following requests.
    ///
    /// The expiry and refresh times are read from the token payload, the
    /// token is kept in memory only.
    pub fn set_access_token(&self, jwt: &str) -> Result<()> {
        if jwt.is_empty() {
            return Err(Error::credential_invalid("access token is blank"));
        }
        let token = Token::from_jwt(jwt)?;
        self.session().set(token);
        Ok(())
    }

    /// Forget the JWT, locally and in the preference store.
    ///
    /// Nothing is sent to the server, see [`Client::revoke_all_tokens`].
    pub fn sign_out(&self) {
        self.session().clear();
    }
}
