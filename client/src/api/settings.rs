use super::map;
use crate::dispatch::Params;
use crate::Client;
use para_core::Result;
use para_v4::encode_uri_component;
use serde_json::{json, Map, Value};

impl Client {
    /// All app settings, or `{"value": ...}` of the setting `key`.
    pub async fn app_settings(&self, key: Option<&str>) -> Result<Map<String, Value>> {
        let path = match key.map(str::trim).filter(|v| !v.is_empty()) {
            Some(key) => format!("_settings/{}", encode_uri_component(key)),
            None => "_settings".to_string(),
        };
        map(self.invoke_get(&path, &Params::new()).await?)
    }

    /// Add or overwrite the setting `key`.
    pub async fn add_app_setting(&self, key: &str, value: Value) -> Result<Option<Map<String, Value>>> {
        if key.is_empty() {
            return Ok(None);
        }
        let path = format!("_settings/{}", encode_uri_component(key));
        let body = json!({ "value": value });
        map(self.invoke_put(&path, Some(&body)).await?).map(Some)
    }

    /// Replace every app setting with `settings`.
    pub async fn set_app_settings(&self, settings: &Map<String, Value>) -> Result<Option<Map<String, Value>>> {
        if settings.is_empty() {
            return Ok(None);
        }
        let body = Value::Object(settings.clone());
        map(self.invoke_put("_settings", Some(&body)).await?).map(Some)
    }

    /// Remove the setting `key`.
    pub async fn remove_app_setting(&self, key: &str) -> Result<Option<Map<String, Value>>> {
        if key.is_empty() {
            return Ok(None);
        }
        let path = format!("_settings/{}", encode_uri_component(key));
        map(self.invoke_delete(&path, &Params::new()).await?).map(Some)
    }
}
