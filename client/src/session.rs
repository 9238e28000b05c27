//! JWT session state and its persistence.

use log::{debug, warn};
use para_core::hash::base64_url_decode;
use para_core::time::now_millis;
use para_core::utils::Redact;
use para_core::{Context, Error, Result};
use serde::Deserialize;
use serde_json::Value;
use std::fmt::{Debug, Formatter};
use std::sync::RwLock;

/// Preference key of the JWT.
pub const TOKEN_KEY: &str = "tokenKey";
/// Preference key of the expiry time in epoch millis.
pub const TOKEN_EXPIRES_KEY: &str = "tokenKeyExpires";
/// Preference key of the next refresh time in epoch millis.
pub const TOKEN_NEXT_REFRESH_KEY: &str = "tokenKeyNextRefresh";

/// Status of the cached JWT.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenStatus {
    /// No token cached.
    Absent,
    /// Token is usable as is.
    Valid,
    /// Token is still valid but due for a refresh.
    RefreshDue,
    /// Token has expired.
    Expired,
}

/// A JWT with its expiry and refresh schedule.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Token {
    /// The raw JWT.
    pub value: String,
    /// Expiry time in epoch millis.
    pub expires_at: Option<i64>,
    /// Time after which the token should be refreshed, in epoch millis.
    pub next_refresh_at: Option<i64>,
}

impl Debug for Token {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Token")
            .field("value", &Redact::from(&self.value))
            .field("expires_at", &self.expires_at)
            .field("next_refresh_at", &self.next_refresh_at)
            .finish()
    }
}

#[derive(Deserialize)]
struct Claims {
    /// Expiry in epoch seconds.
    exp: Option<i64>,
    /// Next refresh in epoch millis.
    refresh: Option<i64>,
}

impl Token {
    /// Build a token from a raw JWT, reading `exp` and `refresh` from its
    /// payload.
    pub fn from_jwt(jwt: &str) -> Result<Self> {
        let payload = jwt
            .split('.')
            .nth(1)
            .ok_or_else(|| Error::credential_invalid("token is not a well formed jwt"))?;
        let claims: Claims = serde_json::from_slice(&base64_url_decode(payload)?).map_err(|e| {
            Error::credential_invalid("jwt payload is not valid json").with_source(e)
        })?;

        let expires_at = claims
            .exp
            .map(|v| {
                v.checked_mul(1000)
                    .ok_or_else(|| Error::credential_invalid("jwt exp out of range"))
            })
            .transpose()?;

        Ok(Token {
            value: jwt.to_string(),
            expires_at,
            next_refresh_at: claims.refresh,
        })
    }

    /// Status of this token at `now` (epoch millis).
    pub fn status(&self, now: i64) -> TokenStatus {
        if self.value.is_empty() {
            return TokenStatus::Absent;
        }
        if self.expires_at.is_some_and(|v| v <= now) {
            return TokenStatus::Expired;
        }
        if self.should_refresh(now) {
            return TokenStatus::RefreshDue;
        }
        TokenStatus::Valid
    }

    /// Returns true if the token should be refreshed at `now`.
    ///
    /// A refresh happens only while the token is still alive and a refresh
    /// time is known that is either past or beyond the expiry.
    pub fn should_refresh(&self, now: i64) -> bool {
        let Some(expires_at) = self.expires_at else {
            return false;
        };
        let Some(next_refresh_at) = self.next_refresh_at else {
            return false;
        };

        !self.value.is_empty()
            && expires_at > now
            && (next_refresh_at < now || next_refresh_at > expires_at)
    }
}

/// `jwt` object of an authentication response.
#[derive(Debug, Deserialize)]
struct JwtResponse {
    access_token: String,
    expires: Option<i64>,
    refresh: Option<i64>,
}

impl From<JwtResponse> for Token {
    fn from(v: JwtResponse) -> Self {
        Token {
            value: v.access_token,
            expires_at: v.expires,
            next_refresh_at: v.refresh,
        }
    }
}

/// Pick the user and the token out of an authentication response.
///
/// Returns `None` if either part is missing.
pub(crate) fn parse_auth_response(body: Value) -> Result<Option<(Value, Token)>> {
    let Value::Object(mut map) = body else {
        return Ok(None);
    };
    let (Some(user), Some(jwt)) = (map.remove("user"), map.remove("jwt")) else {
        return Ok(None);
    };
    if user.is_null() || jwt.is_null() {
        return Ok(None);
    }

    let jwt: JwtResponse = serde_json::from_value(jwt)?;
    Ok(Some((user, jwt.into())))
}

/// Session holds the current token in memory and mirrors it into the
/// preference store.
pub(crate) struct Session {
    ctx: Context,
    token: RwLock<Option<Token>>,
}

impl Debug for Session {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("token", &self.token())
            .finish()
    }
}

impl Session {
    /// Restore the session persisted in the context's preference store.
    pub fn load(ctx: Context) -> Self {
        let token = ctx.pref_load(TOKEN_KEY).filter(|v| !v.is_empty()).map(|value| {
            let millis = |key: &str| ctx.pref_load(key).and_then(|v| v.parse::<i64>().ok());
            Token {
                value,
                expires_at: millis(TOKEN_EXPIRES_KEY),
                next_refresh_at: millis(TOKEN_NEXT_REFRESH_KEY),
            }
        });
        if token.is_some() {
            debug!("restored jwt session from preferences");
        }

        Self {
            ctx,
            token: RwLock::new(token),
        }
    }

    pub fn token(&self) -> Option<Token> {
        self.token.read().expect("lock poisoned").clone()
    }

    pub fn status(&self) -> TokenStatus {
        match self.token() {
            None => TokenStatus::Absent,
            Some(token) => token.status(now_millis()),
        }
    }

    /// Keep the token in memory only.
    pub fn set(&self, token: Token) {
        *self.token.write().expect("lock poisoned") = Some(token);
    }

    /// Keep the token in memory and persist it.
    pub fn save(&self, token: Token) {
        self.persist(&token);
        self.set(token);
    }

    /// Drop the token from memory and from the preference store.
    pub fn clear(&self) {
        *self.token.write().expect("lock poisoned") = None;
        for key in [TOKEN_KEY, TOKEN_EXPIRES_KEY, TOKEN_NEXT_REFRESH_KEY] {
            if let Err(err) = self.ctx.pref_clear(key) {
                warn!("failed to clear preference {key}: {err}");
            }
        }
    }

    fn persist(&self, token: &Token) {
        let entries = [
            (TOKEN_KEY, Some(token.value.clone())),
            (TOKEN_EXPIRES_KEY, token.expires_at.map(|v| v.to_string())),
            (TOKEN_NEXT_REFRESH_KEY, token.next_refresh_at.map(|v| v.to_string())),
        ];
        for (key, value) in entries {
            let res = match value {
                Some(v) => self.ctx.pref_save(key, &v),
                None => self.ctx.pref_clear(key),
            };
            if let Err(err) = res {
                warn!("failed to persist preference {key}: {err}");
            }
        }
    }
}
