//! The Para REST API, one module per resource family.

mod auth;
mod constraints;
mod links;
mod misc;
mod permissions;
mod persistence;
mod search;
mod settings;
mod utils;

use crate::dispatch::Reply;
use crate::pager::PageResponse;
use crate::{Page, ParaObject};
use para_core::Result;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

/// Decode an optional reply as an object.
pub(crate) fn object(reply: Option<Reply>) -> Result<Option<ParaObject>> {
    reply.map(Reply::into_object).transpose()
}

/// Decode an optional reply as a raw value, `T::default()` when absent.
pub(crate) fn raw_or_default<T: DeserializeOwned + Default>(reply: Option<Reply>) -> Result<T> {
    Ok(reply.map(Reply::into_raw).transpose()?.unwrap_or_default())
}

/// Decode an optional reply as a JSON object, empty when absent or not an
/// object.
pub(crate) fn map(reply: Option<Reply>) -> Result<Map<String, Value>> {
    match reply.map(Reply::into_raw::<Value>).transpose()? {
        Some(Value::Object(map)) => Ok(map),
        _ => Ok(Map::new()),
    }
}

/// Decode an optional reply as text.
pub(crate) fn text(reply: Option<Reply>) -> Option<String> {
    reply.map(Reply::into_text)
}

/// Returns true if the reply body is the literal `true`.
pub(crate) fn is_true(reply: Option<Reply>) -> bool {
    text(reply).is_some_and(|v| v.trim() == "true")
}

/// Decode an optional list or search reply.
pub(crate) fn page(reply: Option<Reply>) -> Result<Page> {
    Ok(reply
        .map(Reply::into_raw::<PageResponse>)
        .transpose()?
        .map(Page::from)
        .unwrap_or_default())
}
