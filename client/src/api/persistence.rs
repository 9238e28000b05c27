use super::{object, page, raw_or_default};
use crate::dispatch::Params;
use crate::pager::pager_params;
use crate::{Client, Page, Pager, ParaObject};
use para_core::Result;
use para_v4::encode_uri_component;

const BATCH_PATH: &str = "_batch";

impl Client {
    /// Persist an object.
    ///
    /// An object with both id and type is written to `/{type}/{id}`, anything
    /// else is posted to `/{type}` and gets its id from the server.
    pub async fn create(&self, obj: &ParaObject) -> Result<Option<ParaObject>> {
        let body = serde_json::to_value(obj)?;
        let reply = if obj.id.is_empty() || obj.object_type.is_empty() {
            self.invoke_post(&encode_uri_component(&obj.object_type), Some(&body))
                .await?
        } else {
            self.invoke_put(&obj.object_uri(), Some(&body)).await?
        };
        object(reply)
    }

    /// Read an object by id, scoped to `object_type` when given.
    pub async fn read(&self, object_type: Option<&str>, id: &str) -> Result<Option<ParaObject>> {
        if id.is_empty() {
            return Ok(None);
        }
        let path = match object_type.filter(|v| !v.is_empty()) {
            Some(ty) => format!("{}/{}", encode_uri_component(ty), encode_uri_component(id)),
            None => format!("_id/{}", encode_uri_component(id)),
        };
        object(self.invoke_get(&path, &Params::new()).await?)
    }

    /// Update an object, only the fields present are changed.
    pub async fn update(&self, obj: &ParaObject) -> Result<Option<ParaObject>> {
        let body = serde_json::to_value(obj)?;
        object(self.invoke_patch(&obj.object_uri(), Some(&body)).await?)
    }

    /// Delete an object.
    pub async fn delete(&self, obj: &ParaObject) -> Result<()> {
        self.invoke_delete(&obj.object_uri(), &Params::new())
            .await?;
        Ok(())
    }

    /// Persist many objects in one call.
    pub async fn create_all(&self, objects: &[ParaObject]) -> Result<Vec<ParaObject>> {
        if objects.is_empty() {
            return Ok(Vec::new());
        }
        let body = serde_json::to_value(objects)?;
        raw_or_default(self.invoke_post(BATCH_PATH, Some(&body)).await?)
    }

    /// Read many objects by id.
    pub async fn read_all<S: AsRef<str>>(&self, ids: &[S]) -> Result<Vec<ParaObject>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let params = Params::new().with_list("ids", ids.iter().map(|v| v.as_ref().to_string()));
        raw_or_default(self.invoke_get(BATCH_PATH, &params).await?)
    }

    /// Update many objects in one call.
    pub async fn update_all(&self, objects: &[ParaObject]) -> Result<Vec<ParaObject>> {
        if objects.is_empty() {
            return Ok(Vec::new());
        }
        let body = serde_json::to_value(objects)?;
        raw_or_default(self.invoke_patch(BATCH_PATH, Some(&body)).await?)
    }

    /// Delete many objects by id.
    pub async fn delete_all<S: AsRef<str>>(&self, ids: &[S]) -> Result<()> {
        if ids.is_empty() {
            return Ok(());
        }
        let params = Params::new().with_list("ids", ids.iter().map(|v| v.as_ref().to_string()));
        self.invoke_delete(BATCH_PATH, &params).await?;
        Ok(())
    }

    /// List objects of a type. Without a pager the server picks the page and order.
    pub async fn list(&self, object_type: &str, pager: Option<&Pager>) -> Result<Page> {
        if object_type.is_empty() {
            return Ok(Page::default());
        }
        let params = pager_params(pager);
        page(
            self.invoke_get(&encode_uri_component(object_type), &params)
                .await?,
        )
    }
}
