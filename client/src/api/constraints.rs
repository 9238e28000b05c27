use super::map;
use crate::dispatch::Params;
use crate::{Client, Constraint};
use para_core::Result;
use para_v4::encode_uri_component;
use serde_json::{Map, Value};

impl Client {
    /// Validation constraints of every type, or of `object_type` only.
    pub async fn validation_constraints(&self, object_type: Option<&str>) -> Result<Map<String, Value>> {
        let path = match object_type.filter(|v| !v.is_empty()) {
            Some(ty) => format!("_constraints/{}", encode_uri_component(ty)),
            None => "_constraints".to_string(),
        };
        map(self.invoke_get(&path, &Params::new()).await?)
    }

    /// Add a constraint on `field` of `object_type`.
    pub async fn add_validation_constraint(
        &self,
        object_type: &str,
        field: &str,
        constraint: &Constraint,
    ) -> Result<Map<String, Value>> {
        if object_type.is_empty() || field.is_empty() {
            return Ok(Map::new());
        }
        let path = constraint_path(object_type, field, constraint.name());
        let body = Value::Object(constraint.payload().clone());
        map(self.invoke_put(&path, Some(&body)).await?)
    }

    /// Remove the constraint `name` from `field` of `object_type`.
    pub async fn remove_validation_constraint(
        &self,
        object_type: &str,
        field: &str,
        name: &str,
    ) -> Result<Map<String, Value>> {
        if object_type.is_empty() || field.is_empty() || name.is_empty() {
            return Ok(Map::new());
        }
        let path = constraint_path(object_type, field, name);
        map(self.invoke_delete(&path, &Params::new()).await?)
    }
}

fn constraint_path(object_type: &str, field: &str, name: &str) -> String {
    format!(
        "_constraints/{}/{}/{}",
        encode_uri_component(object_type),
        encode_uri_component(field),
        encode_uri_component(name)
    )
}
