use crate::{Error, Result};
use http::header::{self, HeaderName};
use http::HeaderMap;
use http::HeaderValue;
use http::Method;
use http::Uri;

/// Signing context for a request.
///
/// Holds the pieces of an outgoing request that take part in the signature.
/// The path and query are kept exactly as they appear in the url, nothing is
/// decoded, so an encoded `%2F` inside a segment survives.
#[derive(Debug, Clone)]
pub struct SigningRequest {
    /// HTTP method.
    pub method: Method,
    /// `host[:port]` of the target, the port only when it is not the scheme's default.
    pub host: String,
    /// Raw, still encoded url path. May be empty.
    pub path: String,
    /// Raw query string without the leading `?`. Empty when absent.
    pub query: String,
    /// Headers that take part in the signature.
    pub headers: HeaderMap,
    /// Hex encoded SHA256 of the request body.
    pub payload_digest: String,
}

impl SigningRequest {
    /// Build a signing context from a method, a full url and a body digest.
    ///
    /// The url must be absolute, a url without host can't be signed.
    pub fn build(method: Method, uri: &Uri, payload_digest: impl Into<String>) -> Result<Self> {
        let host = uri
            .host()
            .ok_or_else(|| Error::request_invalid("request without host is invalid for signing"))?;
        let host = match (uri.scheme_str(), uri.port_u16()) {
            (Some("https"), Some(443)) | (Some("http"), Some(80)) | (_, None) => host.to_string(),
            (_, Some(port)) => format!("{host}:{port}"),
        };

        Ok(SigningRequest {
            method,
            host,
            path: uri.path().to_string(),
            query: uri.query().unwrap_or_default().to_string(),
            headers: HeaderMap::new(),
            payload_digest: payload_digest.into(),
        })
    }

    /// Insert a header that will take part in the signature.
    pub fn header_insert(&mut self, name: HeaderName, value: &str) -> Result<()> {
        self.headers.insert(name, HeaderValue::from_str(value)?);
        Ok(())
    }

    /// Get header value by name.
    ///
    /// Returns empty string if header not found.
    #[inline]
    pub fn header_get_or_default(&self, key: &HeaderName) -> Result<&str> {
        match self.headers.get(key) {
            Some(v) => v
                .to_str()
                .map_err(|e| Error::request_invalid("header value is not visible ascii").with_source(e)),
            None => Ok(""),
        }
    }

    /// Header names taking part in the signature, sorted.
    ///
    /// `authorization` is never part of its own signature.
    pub fn header_name_to_vec_sorted(&self) -> Vec<&str> {
        let mut h = self
            .headers
            .keys()
            .filter(|k| *k != header::AUTHORIZATION)
            .map(|k| k.as_str())
            .collect::<Vec<&str>>();
        h.sort_unstable();

        h
    }

    /// Copy the signing headers onto the real request.
    ///
    /// `host` is left out, the http client derives it from the url.
    pub fn apply(self, headers: &mut HeaderMap) {
        for (name, value) in self.headers.iter() {
            if name == header::HOST {
                continue;
            }
            headers.insert(name.clone(), value.clone());
        }
    }
}
