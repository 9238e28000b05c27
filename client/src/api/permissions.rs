use super::{is_true, map};
use crate::dispatch::Params;
use crate::Client;
use para_core::Result;
use para_v4::encode_uri_component;
use serde_json::{Map, Value};

/// Subject id matching every user.
const ANY_SUBJECT: &str = "*";
/// Extra permission that lets unauthenticated users in.
const GUEST_ACCESS: &str = "?";

fn permission_path(subject_id: &str, resource_path: &str) -> String {
    format!(
        "_permissions/{}/{}",
        encode_uri_component(subject_id),
        encode_uri_component(resource_path)
    )
}

impl Client {
    /// Permissions of every subject, or of `subject_id` only.
    pub async fn resource_permissions(&self, subject_id: Option<&str>) -> Result<Map<String, Value>> {
        let path = match subject_id.filter(|v| !v.is_empty()) {
            Some(id) => format!("_permissions/{}", encode_uri_component(id)),
            None => "_permissions".to_string(),
        };
        map(self.invoke_get(&path, &Params::new()).await?)
    }

    /// Allow `subject_id` to call `methods` on `resource_path`.
    ///
    /// With `allow_guest_access` and the `*` subject, unauthenticated
    /// callers are let in as well.
    pub async fn grant_resource_permission<S: AsRef<str>>(
        &self,
        subject_id: &str,
        resource_path: &str,
        methods: &[S],
        allow_guest_access: bool,
    ) -> Result<Map<String, Value>> {
        if subject_id.is_empty() || resource_path.is_empty() || methods.is_empty() {
            return Ok(Map::new());
        }
        let mut permits = methods
            .iter()
            .map(|v| v.as_ref().to_string())
            .collect::<Vec<_>>();
        if allow_guest_access && subject_id == ANY_SUBJECT {
            permits.push(GUEST_ACCESS.to_string());
        }
        let body = Value::from(permits);
        map(
            self.invoke_put(&permission_path(subject_id, resource_path), Some(&body))
                .await?,
        )
    }

    /// Take away every permission of `subject_id` on `resource_path`.
    pub async fn revoke_resource_permission(
        &self,
        subject_id: &str,
        resource_path: &str,
    ) -> Result<Map<String, Value>> {
        if subject_id.is_empty() || resource_path.is_empty() {
            return Ok(Map::new());
        }
        map(
            self.invoke_delete(&permission_path(subject_id, resource_path), &Params::new())
                .await?,
        )
    }

    /// Take away every permission of `subject_id`.
    pub async fn revoke_all_resource_permissions(&self, subject_id: &str) -> Result<Map<String, Value>> {
        if subject_id.is_empty() {
            return Ok(Map::new());
        }
        let path = format!("_permissions/{}", encode_uri_component(subject_id));
        map(self.invoke_delete(&path, &Params::new()).await?)
    }

    /// Check if `subject_id` may call `method` on `resource_path`.
    pub async fn is_allowed_to(
        &self,
        subject_id: &str,
        resource_path: &str,
        method: &str,
    ) -> Result<bool> {
        if subject_id.is_empty() || resource_path.is_empty() || method.is_empty() {
            return Ok(false);
        }
        let path = format!(
            "{}/{}",
            permission_path(subject_id, resource_path),
            encode_uri_component(method)
        );
        Ok(is_true(self.invoke_get(&path, &Params::new()).await?))
    }
}
