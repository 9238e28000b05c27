use super::page;
use crate::dispatch::Params;
use crate::pager::pager_params;
use crate::{Client, Page, Pager, ParaObject};
use para_core::Result;
use para_v4::encode_uri_component;
use std::fmt::Display;

fn terms_list<K, V>(terms: &[(K, V)]) -> Vec<String>
where
    K: Display,
    V: Display,
{
    terms.iter().map(|(k, v)| format!("{k}:{v}")).collect()
}

impl Client {
    /// Run a search query of the given kind.
    ///
    /// The query goes to `/{type}/search/{query_type}` when `object_type` is
    /// set, to `/search/{query_type}` otherwise. A blank `query_type` runs
    /// the `default` query.
    pub async fn find(
        &self,
        query_type: &str,
        object_type: Option<&str>,
        params: Params,
    ) -> Result<Page> {
        let query_type = if query_type.is_empty() {
            "default".to_string()
        } else {
            encode_uri_component(query_type)
        };
        let (path, params) = match object_type.filter(|v| !v.is_empty()) {
            Some(ty) => (
                format!("{}/search/{query_type}", encode_uri_component(ty)),
                params.with("type", ty),
            ),
            None => (format!("search/{query_type}"), params),
        };

        page(self.invoke_get(&path, &params).await?)
    }

    /// Find an object by id through the search index.
    pub async fn find_by_id(&self, id: &str) -> Result<Option<ParaObject>> {
        let page = self.find("id", None, Params::new().with("id", id)).await?;
        Ok(page.items.into_iter().next())
    }

    /// Find objects by ids through the search index.
    pub async fn find_by_ids<S: AsRef<str>>(&self, ids: &[S]) -> Result<Vec<ParaObject>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let params = Params::new().with_list("ids", ids.iter().map(|v| v.as_ref().to_string()));
        Ok(self.find("ids", None, params).await?.items)
    }

    /// Find objects within `radius` km of a point.
    pub async fn find_nearby(
        &self,
        object_type: &str,
        query: &str,
        radius: u32,
        lat: f64,
        lng: f64,
        pager: Option<&Pager>,
    ) -> Result<Page> {
        let params = pager_params(pager)
            .with("latlng", format!("{lat},{lng}"))
            .with("radius", radius.to_string())
            .with("q", query);
        self.find("nearby", Some(object_type), params).await
    }

    /// Find objects whose `field` starts with `prefix`.
    pub async fn find_prefix(
        &self,
        object_type: &str,
        field: &str,
        prefix: &str,
        pager: Option<&Pager>,
    ) -> Result<Page> {
        let params = pager_params(pager)
            .with("field", field)
            .with("prefix", prefix);
        self.find("prefix", Some(object_type), params).await
    }

    /// Full text search.
    pub async fn find_query(&self, object_type: &str, query: &str, pager: Option<&Pager>) -> Result<Page> {
        let params = pager_params(pager).with("q", query);
        self.find("", Some(object_type), params).await
    }

    /// Full text search within nested objects under `field`.
    pub async fn find_nested_query(
        &self,
        object_type: &str,
        field: &str,
        query: &str,
        pager: Option<&Pager>,
    ) -> Result<Page> {
        let params = pager_params(pager).with("q", query).with("field", field);
        self.find("nested", Some(object_type), params).await
    }

    /// Find objects similar to `like_text`, excluding `filter_key`.
    pub async fn find_similar<S: AsRef<str>>(
        &self,
        object_type: &str,
        filter_key: &str,
        fields: &[S],
        like_text: &str,
        pager: Option<&Pager>,
    ) -> Result<Page> {
        let params = pager_params(pager)
            .with_list("fields", fields.iter().map(|v| v.as_ref().to_string()))
            .with("filterid", filter_key)
            .with("like", like_text);
        self.find("similar", Some(object_type), params).await
    }

    /// Find objects tagged with all of `tags`.
    pub async fn find_tagged<S: AsRef<str>>(
        &self,
        object_type: &str,
        tags: &[S],
        pager: Option<&Pager>,
    ) -> Result<Page> {
        let params =
            pager_params(pager).with_list("tags", tags.iter().map(|v| v.as_ref().to_string()));
        self.find("tagged", Some(object_type), params).await
    }

    /// Find tags starting with `keyword`, every tag when absent.
    pub async fn find_tags(&self, keyword: Option<&str>, pager: Option<&Pager>) -> Result<Page> {
        let wildcard = match keyword.filter(|v| !v.is_empty()) {
            Some(kw) => format!("{kw}*"),
            None => "*".to_string(),
        };
        self.find_wildcard("tag", "tag", &wildcard, pager).await
    }

    /// Find objects whose `field` equals one of `terms`.
    pub async fn find_term_in_list<S: AsRef<str>>(
        &self,
        object_type: &str,
        field: &str,
        terms: &[S],
        pager: Option<&Pager>,
    ) -> Result<Page> {
        let params = pager_params(pager)
            .with("field", field)
            .with_list("terms", terms.iter().map(|v| v.as_ref().to_string()));
        self.find("in", Some(object_type), params).await
    }

    /// Find objects matching `field:value` terms, all of them when
    /// `match_all`, any of them otherwise.
    pub async fn find_terms<K, V>(
        &self,
        object_type: &str,
        terms: &[(K, V)],
        match_all: bool,
        pager: Option<&Pager>,
    ) -> Result<Page>
    where
        K: Display,
        V: Display,
    {
        if terms.is_empty() {
            return Ok(Page::default());
        }
        let params = pager_params(pager)
            .with("matchall", match_all.to_string())
            .with_list("terms", terms_list(terms));
        self.find("terms", Some(object_type), params).await
    }

    /// Find objects whose `field` matches a wildcard like `cat*`.
    pub async fn find_wildcard(
        &self,
        object_type: &str,
        field: &str,
        wildcard: &str,
        pager: Option<&Pager>,
    ) -> Result<Page> {
        let params = pager_params(pager).with("field", field).with("q", wildcard);
        self.find("wildcard", Some(object_type), params).await
    }

    /// Count indexed objects of a type.
    pub async fn get_count(&self, object_type: &str) -> Result<u64> {
        let page = self.find("count", Some(object_type), Params::new()).await?;
        Ok(page.total_hits)
    }

    /// Count indexed objects of a type matching every `field:value` term.
    pub async fn get_count_terms<K, V>(&self, object_type: &str, terms: &[(K, V)]) -> Result<u64>
    where
        K: Display,
        V: Display,
    {
        if terms.is_empty() {
            return Ok(0);
        }
        let params = Params::new()
            .with_list("terms", terms_list(terms))
            .with("count", "true");
        let page = self.find("terms", Some(object_type), params).await?;
        Ok(page.total_hits)
    }
}
