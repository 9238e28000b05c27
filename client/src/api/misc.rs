use super::{is_true, map, object, raw_or_default};
use crate::dispatch::{Params, Secret};
use crate::{Client, ParaObject};
use http::Method;
use log::info;
use para_core::Result;
use serde_json::{Map, Value};
use std::collections::BTreeMap;

impl Client {
    /// Generate a new key pair for the app. The old keys stop working.
    ///
    /// The client switches to the new secret key right away.
    pub async fn new_keys(&self) -> Result<Map<String, Value>> {
        let keys = map(self.invoke_post("_newkeys", None).await?)?;
        if let Some(Value::String(secret_key)) = keys.get("secretKey") {
            info!("secret key rotated for {}", self.access_key());
            self.set_secret_key(secret_key.as_str());
        }
        Ok(keys)
    }

    /// Registered types of the app, keyed by plural.
    pub async fn types(&self) -> Result<BTreeMap<String, String>> {
        raw_or_default(self.invoke_get("_types", &Params::new()).await?)
    }

    /// Number of objects of each type.
    pub async fn types_count(&self) -> Result<BTreeMap<String, u64>> {
        let params = Params::new().with("count", "true");
        raw_or_default(self.invoke_get("_types", &params).await?)
    }

    /// The user or app currently authenticated.
    ///
    /// With `access_token` the call is made as that token's owner, whatever
    /// the client's own session is.
    pub async fn me(&self, access_token: Option<&str>) -> Result<Option<ParaObject>> {
        match access_token.filter(|v| !v.is_empty()) {
            None => object(self.invoke_get("_me", &Params::new()).await?),
            Some(token) => {
                let secret = Secret::bearer(token);
                object(
                    self.dispatch(Method::GET, "_me", &secret, &Params::new(), None)
                        .await?,
                )
            }
        }
    }

    /// Upvote `obj` on behalf of `voter_id`. Returns true if the vote counted.
    pub async fn vote_up(&self, obj: &ParaObject, voter_id: &str) -> Result<bool> {
        self.vote(obj, "_voteup", voter_id).await
    }

    /// Downvote `obj` on behalf of `voter_id`. Returns true if the vote counted.
    pub async fn vote_down(&self, obj: &ParaObject, voter_id: &str) -> Result<bool> {
        self.vote(obj, "_votedown", voter_id).await
    }

    async fn vote(&self, obj: &ParaObject, direction: &str, voter_id: &str) -> Result<bool> {
        if obj.id.is_empty() || voter_id.is_empty() {
            return Ok(false);
        }
        let mut body = Map::new();
        body.insert(direction.to_string(), Value::from(voter_id));
        let body = Value::Object(body);
        Ok(is_true(
            self.invoke_patch(&obj.object_uri(), Some(&body)).await?,
        ))
    }

    /// Rebuild the search index, into `destination_index` when given.
    pub async fn rebuild_index(&self, destination_index: Option<&str>) -> Result<Map<String, Value>> {
        let params = match destination_index.filter(|v| !v.is_empty()) {
            Some(index) => Params::new().with("destinationIndex", index),
            None => Params::new(),
        };
        map(self.invoke_post_with_params("_reindex", &params).await?)
    }

    /// Version of the Para server, `unknown` when it doesn't say.
    pub async fn server_version(&self) -> Result<String> {
        let res = map(self.invoke_get("", &Params::new()).await?)?;
        match res.get("version") {
            Some(Value::String(v)) if !v.is_empty() => Ok(v.clone()),
            _ => Ok("unknown".to_string()),
        }
    }
}
