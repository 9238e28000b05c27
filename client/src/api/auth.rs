use crate::client::JWT_PATH;
use crate::dispatch::Params;
use crate::session::parse_auth_response;
use crate::{Client, ParaObject};
use log::{debug, warn};
use para_core::{Error, Result};
use serde_json::json;

impl Client {
    /// Sign in with an identity provider token.
    ///
    /// `provider` is one of `facebook`, `google`, `twitter`, `github`,
    /// `linkedin`, `microsoft`, `password` and the like. Twitter tokens are
    /// passed as `{oauth_token}:{oauth_token_secret}`.
    ///
    /// On success the user is returned and, if `remember` is set, the JWT
    /// is cached and used for every following call. Any failure leaves the
    /// client signed out.
    pub async fn sign_in(
        &self,
        provider: &str,
        provider_token: &str,
        remember: bool,
    ) -> Result<Option<ParaObject>> {
        if provider.is_empty() || provider_token.is_empty() {
            return Ok(None);
        }

        let body = json!({
            "appid": self.access_key(),
            "provider": provider,
            "token": provider_token,
        });
        let res = self
            .invoke_post(JWT_PATH, Some(&body))
            .await
            .and_then(|reply| match reply {
                Some(reply) => parse_auth_response(reply.into_raw()?),
                None => Ok(None),
            })
            .and_then(|parsed| {
                parsed
                    .map(|(user, token)| {
                        let user: ParaObject = serde_json::from_value(user)?;
                        Ok::<_, Error>((user, token))
                    })
                    .transpose()
            });

        match res {
            Ok(Some((user, token))) => {
                if remember {
                    self.session().save(token);
                }
                debug!("signed in as {}", user.id);
                Ok(Some(user))
            }
            Ok(None) => {
                warn!("sign in with {provider} returned no user");
                self.session().clear();
                Ok(None)
            }
            Err(err) => {
                self.session().clear();
                Err(err)
            }
        }
    }

    /// Revoke every token of the signed in user on the server.
    ///
    /// Returns true if the server acknowledged.
    pub async fn revoke_all_tokens(&self) -> Result<bool> {
        let res = self.invoke_delete(JWT_PATH, &Params::new()).await?;
        Ok(res.is_some())
    }
}
