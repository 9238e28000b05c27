//! The generic Para domain object.

use para_core::Result;
use para_v4::encode_uri_component;
use serde::de::{Deserialize, Deserializer};
use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::{Map, Value};

/// Names of the well-known fields of [`ParaObject`] as they appear on the wire.
pub const CORE_FIELDS: [&str; 14] = [
    "id",
    "timestamp",
    "type",
    "plural",
    "appid",
    "parentid",
    "creatorid",
    "updated",
    "name",
    "tags",
    "votes",
    "stored",
    "indexed",
    "cached",
];

const DEFAULT_TYPE: &str = "sysprop";
const DEFAULT_NAME: &str = "ParaObject";

/// A Para object: a fixed set of well-known fields plus an open map of
/// custom properties.
///
/// On the wire both parts are one flat JSON object. When a custom property
/// has the same name as a well-known field, the well-known field wins and
/// the property is dropped from the output.
#[derive(Debug, Clone, PartialEq, serde::Deserialize)]
pub struct ParaObject {
    /// Unique id, assigned by the server when blank.
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: String,
    /// Creation time in epoch millis.
    #[serde(default)]
    pub timestamp: Option<i64>,
    /// Object type, e.g. `user` or `dog`.
    #[serde(
        rename = "type",
        default = "default_type",
        deserialize_with = "null_as_default"
    )]
    pub object_type: String,
    /// Plural form of the type, derived from it when blank.
    #[serde(default, deserialize_with = "null_as_default")]
    pub plural: String,
    /// Id of the app owning this object.
    #[serde(default, deserialize_with = "null_as_default")]
    pub appid: String,
    /// Id of the parent object.
    #[serde(default, deserialize_with = "null_as_default")]
    pub parentid: String,
    /// Id of the creator.
    #[serde(default, deserialize_with = "null_as_default")]
    pub creatorid: String,
    /// Last update time in epoch millis.
    #[serde(default)]
    pub updated: Option<i64>,
    /// Display name.
    #[serde(default = "default_name", deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tags: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub votes: i64,
    #[serde(default = "default_true", deserialize_with = "null_as_true")]
    pub stored: bool,
    #[serde(default = "default_true", deserialize_with = "null_as_true")]
    pub indexed: bool,
    #[serde(default = "default_true", deserialize_with = "null_as_true")]
    pub cached: bool,
    /// Every field that is not a well-known one.
    #[serde(flatten)]
    pub properties: Map<String, Value>,
}

impl Default for ParaObject {
    fn default() -> Self {
        Self {
            id: String::new(),
            timestamp: None,
            object_type: default_type(),
            plural: String::new(),
            appid: String::new(),
            parentid: String::new(),
            creatorid: String::new(),
            updated: None,
            name: default_name(),
            tags: Vec::new(),
            votes: 0,
            stored: true,
            indexed: true,
            cached: true,
            properties: Map::new(),
        }
    }
}

impl ParaObject {
    /// Create an object with the given id and type.
    pub fn new(id: impl Into<String>, object_type: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            object_type: object_type.into(),
            ..Default::default()
        }
    }

    /// Build an object from a flat field map.
    pub fn from_fields(fields: Map<String, Value>) -> Result<Self> {
        Ok(serde_json::from_value(Value::Object(fields))?)
    }

    /// Flat field map of this object, well-known fields and properties merged.
    pub fn fields(&self) -> Map<String, Value> {
        match serde_json::to_value(self) {
            Ok(Value::Object(map)) => map,
            _ => Map::new(),
        }
    }

    /// Get a custom property.
    pub fn property(&self, key: &str) -> Option<&Value> {
        self.properties.get(key)
    }

    /// Set a field by its wire name.
    ///
    /// Well-known names update the matching field, everything else lands in
    /// [`ParaObject::properties`].
    pub fn set_field(&mut self, key: impl Into<String>, value: Value) -> Result<()> {
        let key = key.into();
        if !CORE_FIELDS.contains(&key.as_str()) {
            self.properties.insert(key, value);
            return Ok(());
        }

        let mut fields = self.fields();
        fields.insert(key, value);
        *self = Self::from_fields(fields)?;
        Ok(())
    }

    /// The plural name of the object. For example: `user` -> `users`.
    pub fn plural(&self) -> String {
        if !self.plural.is_empty() {
            return self.plural.clone();
        }
        let ty = if self.object_type.chars().count() < 2 {
            DEFAULT_TYPE
        } else {
            self.object_type.as_str()
        };

        if ty.ends_with('s') {
            format!("{ty}es")
        } else if let Some(stem) = ty.strip_suffix('y') {
            format!("{stem}ies")
        } else {
            format!("{ty}s")
        }
    }

    /// The resource path of this object: `/{type}/{id}`, or `/{type}` when
    /// the id is blank. Both parts are percent encoded.
    pub fn object_uri(&self) -> String {
        let base = format!("/{}", encode_uri_component(&self.object_type));
        if self.id.is_empty() {
            base
        } else {
            format!("{base}/{}", encode_uri_component(&self.id))
        }
    }
}

impl Serialize for ParaObject {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let extra = self
            .properties
            .iter()
            .filter(|(k, _)| !CORE_FIELDS.contains(&k.as_str()))
            .collect::<Vec<_>>();
        let mut map = serializer.serialize_map(Some(CORE_FIELDS.len() + extra.len()))?;

        map.serialize_entry("id", &self.id)?;
        if let Some(timestamp) = self.timestamp {
            map.serialize_entry("timestamp", &timestamp)?;
        }
        map.serialize_entry("type", &self.object_type)?;
        map.serialize_entry("plural", &self.plural())?;
        map.serialize_entry("appid", &self.appid)?;
        map.serialize_entry("parentid", &self.parentid)?;
        map.serialize_entry("creatorid", &self.creatorid)?;
        if let Some(updated) = self.updated {
            map.serialize_entry("updated", &updated)?;
        }
        map.serialize_entry("name", &self.name)?;
        map.serialize_entry("tags", &self.tags)?;
        map.serialize_entry("votes", &self.votes)?;
        map.serialize_entry("stored", &self.stored)?;
        map.serialize_entry("indexed", &self.indexed)?;
        map.serialize_entry("cached", &self.cached)?;
        for (k, v) in extra {
            map.serialize_entry(k, v)?;
        }

        map.end()
    }
}

fn default_type() -> String {
    DEFAULT_TYPE.to_string()
}

fn default_name() -> String {
    DEFAULT_NAME.to_string()
}

fn default_true() -> bool {
    true
}

fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn null_as_true<'de, D>(deserializer: D) -> std::result::Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<bool>::deserialize(deserializer)?.unwrap_or(true))
}
