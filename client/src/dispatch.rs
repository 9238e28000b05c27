//! Request dispatching: building, authenticating and sending one API call.

use crate::ParaObject;
use bytes::Bytes;
use http::header::{AUTHORIZATION, CONTENT_TYPE};
use http::{HeaderValue, Method, StatusCode, Uri};
use log::{debug, error};
use para_core::hash::{hex_sha256, EMPTY_STRING_SHA256};
use para_core::{Context, Error, Result, SignRequest, SigningRequest};
use para_v4::{encode_uri_component, Credential, RequestSigner};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt::{Debug, Formatter};

const APPLICATION_JSON: &str = "application/json";

/// Returns true if the `Content-Type` value names JSON, parameters ignored.
fn is_json_content_type(value: &str) -> bool {
    let media_type = value.split(';').next().unwrap_or_default();
    media_type.trim().eq_ignore_ascii_case(APPLICATION_JSON)
}

/// The secret used to authenticate one call.
#[derive(Clone, PartialEq, Eq)]
pub enum Secret {
    /// Sign the call with this secret key.
    Key(String),
    /// Send the call with this JWT as bearer token, unsigned.
    Bearer(String),
    /// Send the call as `Anonymous {access_key}`.
    Anonymous,
}

impl Secret {
    /// Build a signing secret, an empty key means anonymous.
    pub fn key(secret: impl Into<String>) -> Self {
        let secret = secret.into();
        if secret.is_empty() {
            Secret::Anonymous
        } else {
            Secret::Key(secret)
        }
    }

    /// Build a bearer secret, a leading `Bearer ` is stripped.
    pub fn bearer(token: &str) -> Self {
        let token = token.strip_prefix("Bearer ").unwrap_or(token).trim();
        Secret::Bearer(token.to_string())
    }
}

impl Debug for Secret {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Secret::Key(_) => f.write_str("Key(***)"),
            Secret::Bearer(_) => f.write_str("Bearer(***)"),
            Secret::Anonymous => f.write_str("Anonymous"),
        }
    }
}

/// A single query parameter value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamValue {
    One(String),
    Many(Vec<String>),
}

/// Query parameters of a call, kept sorted by name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params(BTreeMap<String, ParamValue>);

impl Params {
    /// Create an empty parameter set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a single valued parameter.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.0.insert(key.into(), ParamValue::One(value.into()));
        self
    }

    /// Add a multi valued parameter, rendered as `key=a&key=b`.
    ///
    /// An empty list adds nothing.
    pub fn with_list<I, S>(mut self, key: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let values = values.into_iter().map(Into::into).collect::<Vec<_>>();
        if !values.is_empty() {
            self.0.insert(key.into(), ParamValue::Many(values));
        }
        self
    }

    /// Returns true if there are no parameters.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Query string that is sent over the wire, every value of a list included.
    pub fn literal_query(&self) -> String {
        self.render(false)
    }

    /// Query string covered by the signature.
    ///
    /// The server only verifies the first value of a multi valued
    /// parameter, so lists contribute their first element here.
    pub fn signing_query(&self) -> String {
        self.render(true)
    }

    fn render(&self, first_only: bool) -> String {
        let mut pairs = Vec::with_capacity(self.0.len());
        for (k, v) in self.0.iter() {
            let key = encode_uri_component(k);
            match v {
                ParamValue::One(v) => pairs.push(format!("{key}={}", encode_uri_component(v))),
                ParamValue::Many(vs) => {
                    let n = if first_only { 1 } else { vs.len() };
                    for v in vs.iter().take(n) {
                        pairs.push(format!("{key}={}", encode_uri_component(v)));
                    }
                }
            }
        }
        pairs.join("&")
    }
}

/// One API call to dispatch.
#[derive(Debug, Clone)]
pub struct Invocation<'a> {
    pub method: Method,
    /// Server root, e.g. `https://paraio.com`.
    pub endpoint: &'a str,
    /// Absolute path below the endpoint, e.g. `/v1/dog/1`.
    pub path: &'a str,
    pub params: &'a Params,
    /// JSON body, serialized as is.
    pub body: Option<&'a Value>,
}

/// Successful, non-empty response of a call.
#[derive(Debug, Clone)]
pub struct Reply {
    status: StatusCode,
    is_json: bool,
    body: Bytes,
}

impl Reply {
    /// Status code of the response.
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Returns true if the response declares a JSON body.
    pub fn is_json(&self) -> bool {
        self.is_json
    }

    /// Raw body bytes.
    pub fn body(&self) -> &Bytes {
        &self.body
    }

    /// Decode the body as text.
    pub fn into_text(self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Decode the body as a raw value.
    ///
    /// JSON bodies are parsed into `T`, anything else is handed to `T` as
    /// a JSON string.
    pub fn into_raw<T: DeserializeOwned>(self) -> Result<T> {
        if self.is_json {
            return Ok(serde_json::from_slice(&self.body)?);
        }
        let text = self.into_text();
        Ok(serde_json::from_value(Value::String(text))?)
    }

    /// Decode the body as a [`ParaObject`].
    pub fn into_object(self) -> Result<ParaObject> {
        Ok(serde_json::from_slice(&self.body)?)
    }
}

/// Dispatcher turns an [`Invocation`] into an authenticated http request,
/// sends it through the [`Context`] and classifies the response.
#[derive(Debug, Default)]
pub struct Dispatcher {
    signer: RequestSigner,
}

impl Dispatcher {
    /// Create a dispatcher with a custom signer.
    pub fn new(signer: RequestSigner) -> Self {
        Self { signer }
    }

    /// Dispatch a call.
    ///
    /// Returns `Ok(None)` for `404 Not Found` and for empty bodies, and an
    /// error of kind `ServiceRejected` for every other non-2xx status.
    pub async fn invoke(
        &self,
        ctx: &Context,
        access_key: &str,
        secret: &Secret,
        call: Invocation<'_>,
    ) -> Result<Option<Reply>> {
        if access_key.is_empty() {
            return Err(Error::config_invalid(
                "access key is blank, the request can't be dispatched",
            ));
        }

        let req = self.build_request(access_key, secret, &call)?;
        debug!("dispatching request: {} {}", req.method(), req.uri());

        let resp = ctx.http_send(req).await?;
        let status = resp.status();
        if status == StatusCode::NOT_FOUND {
            debug!("{} {} returned 404, treated as absent", call.method, call.path);
            return Ok(None);
        }
        if !status.is_success() {
            let body = String::from_utf8_lossy(resp.body());
            error!("{} {} failed with {status}: {body}", call.method, call.path);
            return Err(Error::service_rejected(status, body));
        }

        let is_json = resp
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(is_json_content_type);
        let body = resp.into_body();
        if body.is_empty() {
            return Ok(None);
        }

        Ok(Some(Reply {
            status,
            is_json,
            body,
        }))
    }

    fn build_request(
        &self,
        access_key: &str,
        secret: &Secret,
        call: &Invocation<'_>,
    ) -> Result<http::Request<Bytes>> {
        let url = format!(
            "{}{}",
            call.endpoint.trim_end_matches('/'),
            call.path
        );

        let query = call.params.literal_query();
        let uri: Uri = if query.is_empty() {
            url.parse()?
        } else {
            format!("{url}?{query}").parse()?
        };

        let body = match call.body {
            Some(v) => Some(Bytes::from(serde_json::to_vec(v)?)),
            None => None,
        };

        let mut req = http::Request::builder()
            .method(call.method.clone())
            .uri(uri)
            .body(body.clone().unwrap_or_default())?;
        if body.is_some() {
            req.headers_mut()
                .insert(CONTENT_TYPE, HeaderValue::from_static(APPLICATION_JSON));
        }

        match secret {
            Secret::Anonymous => {
                let mut value = HeaderValue::from_str(&format!("Anonymous {access_key}"))?;
                value.set_sensitive(true);
                req.headers_mut().insert(AUTHORIZATION, value);
            }
            Secret::Bearer(token) => {
                let mut value = HeaderValue::from_str(&format!("Bearer {token}"))?;
                value.set_sensitive(true);
                req.headers_mut().insert(AUTHORIZATION, value);
            }
            Secret::Key(secret_key) => {
                let digest = match &body {
                    Some(bs) => hex_sha256(bs),
                    None => EMPTY_STRING_SHA256.to_string(),
                };
                let signing_uri = self.signing_uri(&url, call.params)?;
                let mut signing = SigningRequest::build(call.method.clone(), &signing_uri, digest)?;
                self.signer.sign_request(
                    &mut signing,
                    &Credential::new(access_key, secret_key.as_str()),
                )?;
                signing.apply(req.headers_mut());
            }
        }

        Ok(req)
    }

    /// Url the signature is computed over: no trailing slash, and only the
    /// first value of every list parameter.
    fn signing_uri(&self, url: &str, params: &Params) -> Result<Uri> {
        let url = url.strip_suffix('/').unwrap_or(url);
        let query = params.signing_query();
        let uri = if query.is_empty() {
            url.parse()?
        } else {
            format!("{url}?{query}").parse()?
        };
        Ok(uri)
    }
}
