use super::{is_true, page, text};
use crate::dispatch::Params;
use crate::pager::pager_params;
use crate::{Client, Page, Pager, ParaObject};
use para_core::Result;
use para_v4::encode_uri_component;

fn links_path(obj: &ParaObject, type2: &str) -> String {
    format!("{}/links/{}", obj.object_uri(), encode_uri_component(type2))
}

impl Client {
    /// Count the objects of `type2` linked to `obj`.
    pub async fn count_links(&self, obj: &ParaObject, type2: &str) -> Result<u64> {
        if obj.id.is_empty() || type2.is_empty() {
            return Ok(0);
        }
        let params = Params::new().with("count", "true");
        let page = page(self.invoke_get(&links_path(obj, type2), &params).await?)?;
        Ok(page.total_hits)
    }

    /// Objects of `type2` linked to `obj` in a many-to-many relation.
    pub async fn get_linked_objects(
        &self,
        obj: &ParaObject,
        type2: &str,
        pager: Option<&Pager>,
    ) -> Result<Page> {
        if obj.id.is_empty() || type2.is_empty() {
            return Ok(Page::default());
        }
        let params = pager_params(pager);
        page(self.invoke_get(&links_path(obj, type2), &params).await?)
    }

    /// Search the objects of `type2` linked to `obj`. `query` defaults to `*`.
    pub async fn find_linked_objects(
        &self,
        obj: &ParaObject,
        type2: &str,
        field: &str,
        query: Option<&str>,
        pager: Option<&Pager>,
    ) -> Result<Page> {
        if obj.id.is_empty() || type2.is_empty() {
            return Ok(Page::default());
        }
        let params = pager_params(pager)
            .with("field", field)
            .with("q", query.unwrap_or("*"));
        page(self.invoke_get(&links_path(obj, type2), &params).await?)
    }

    /// Check if `obj` is linked to the object `type2/id2`.
    pub async fn is_linked(&self, obj: &ParaObject, type2: &str, id2: &str) -> Result<bool> {
        if obj.id.is_empty() || type2.is_empty() || id2.is_empty() {
            return Ok(false);
        }
        let path = format!("{}/{}", links_path(obj, type2), encode_uri_component(id2));
        Ok(is_true(self.invoke_get(&path, &Params::new()).await?))
    }

    /// Check if `obj` is linked to `to_obj`.
    pub async fn is_linked_to_object(&self, obj: &ParaObject, to_obj: &ParaObject) -> Result<bool> {
        if obj.id.is_empty() || to_obj.id.is_empty() {
            return Ok(false);
        }
        self.is_linked(obj, &to_obj.object_type, &to_obj.id).await
    }

    /// Link `obj` to the object with id `id2`.
    ///
    /// Returns the id of the link object.
    pub async fn link(&self, obj: &ParaObject, id2: &str) -> Result<Option<String>> {
        if obj.id.is_empty() || id2.is_empty() {
            return Ok(None);
        }
        let path = format!("{}/links/{}", obj.object_uri(), encode_uri_component(id2));
        Ok(text(self.invoke_post(&path, None).await?))
    }

    /// Remove the link between `obj` and `type2/id2`. The objects stay.
    pub async fn unlink(&self, obj: &ParaObject, type2: &str, id2: &str) -> Result<()> {
        if obj.id.is_empty() || type2.is_empty() || id2.is_empty() {
            return Ok(());
        }
        let path = format!("{}/{}", links_path(obj, type2), encode_uri_component(id2));
        self.invoke_delete(&path, &Params::new()).await?;
        Ok(())
    }

    /// Remove every link of `obj`.
    pub async fn unlink_all(&self, obj: &ParaObject) -> Result<()> {
        if obj.id.is_empty() {
            return Ok(());
        }
        let path = format!("{}/links", obj.object_uri());
        self.invoke_delete(&path, &Params::new()).await?;
        Ok(())
    }

    /// Count the children of `obj` with type `type2`.
    pub async fn count_children(&self, obj: &ParaObject, type2: &str) -> Result<u64> {
        if obj.id.is_empty() || type2.is_empty() {
            return Ok(0);
        }
        let params = Params::new()
            .with("count", "true")
            .with("childrenonly", "true");
        let page = page(self.invoke_get(&links_path(obj, type2), &params).await?)?;
        Ok(page.total_hits)
    }

    /// Children of `obj` with type `type2`, linked through their `parentid`.
    pub async fn get_children(
        &self,
        obj: &ParaObject,
        type2: &str,
        pager: Option<&Pager>,
    ) -> Result<Page> {
        if obj.id.is_empty() || type2.is_empty() {
            return Ok(Page::default());
        }
        let params = pager_params(pager)
            .with("childrenonly", "true");
        page(self.invoke_get(&links_path(obj, type2), &params).await?)
    }

    /// Children of `obj` with type `type2` whose `field` equals `term`.
    pub async fn get_children_by_term(
        &self,
        obj: &ParaObject,
        type2: &str,
        field: &str,
        term: &str,
        pager: Option<&Pager>,
    ) -> Result<Page> {
        if obj.id.is_empty() || type2.is_empty() {
            return Ok(Page::default());
        }
        let params = pager_params(pager)
            .with("childrenonly", "true")
            .with("field", field)
            .with("term", term);
        page(self.invoke_get(&links_path(obj, type2), &params).await?)
    }

    /// Search the children of `obj` with type `type2`. `query` defaults to `*`.
    pub async fn find_children(
        &self,
        obj: &ParaObject,
        type2: &str,
        query: Option<&str>,
        pager: Option<&Pager>,
    ) -> Result<Page> {
        if obj.id.is_empty() || type2.is_empty() {
            return Ok(Page::default());
        }
        let params = pager_params(pager)
            .with("childrenonly", "true")
            .with("q", query.unwrap_or("*"));
        page(self.invoke_get(&links_path(obj, type2), &params).await?)
    }

    /// Delete every child of `obj` with type `type2`.
    pub async fn delete_children(&self, obj: &ParaObject, type2: &str) -> Result<()> {
        if obj.id.is_empty() || type2.is_empty() {
            return Ok(());
        }
        let params = Params::new().with("childrenonly", "true");
        self.invoke_delete(&links_path(obj, type2), &params).await?;
        Ok(())
    }
}
