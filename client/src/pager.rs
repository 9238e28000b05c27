use crate::dispatch::Params;
use crate::ParaObject;
use serde::Deserialize;

/// Pagination and sorting options for list and search calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pager {
    /// 1-based page number.
    pub page: u64,
    /// Max items per page.
    pub limit: u64,
    /// Field to sort by, `None` keeps the server default.
    pub sort_by: Option<String>,
    /// Sort descending.
    pub desc: bool,
    /// Key of the last item seen, enables deep pagination.
    pub last_key: Option<String>,
}

impl Default for Pager {
    fn default() -> Self {
        Self {
            page: 1,
            limit: 30,
            sort_by: Some("timestamp".to_string()),
            desc: true,
            last_key: None,
        }
    }
}

impl Pager {
    /// Create a pager for the given page and limit.
    pub fn new(page: u64, limit: u64) -> Self {
        Self {
            page,
            limit,
            ..Default::default()
        }
    }

    /// Pager for the page that follows `page`.
    pub fn next_page<T>(&self, page: &Page<T>) -> Pager {
        Pager {
            page: self.page + 1,
            last_key: page.last_key.clone().or_else(|| self.last_key.clone()),
            ..self.clone()
        }
    }

    pub(crate) fn to_params(&self) -> Params {
        let mut params = Params::new()
            .with("page", self.page.to_string())
            .with("desc", self.desc.to_string())
            .with("limit", self.limit.to_string());
        if let Some(last_key) = &self.last_key {
            params = params.with("lastKey", last_key);
        }
        if let Some(sort_by) = &self.sort_by {
            params = params.with("sort", sort_by);
        }
        params
    }
}

/// Query parameters for an optional pager, none at all without one so the
/// server applies its own defaults.
pub(crate) fn pager_params(pager: Option<&Pager>) -> Params {
    pager.map(Pager::to_params).unwrap_or_default()
}

/// One page of results.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T = ParaObject> {
    /// Items on this page.
    pub items: Vec<T>,
    /// Number of matches across all pages.
    pub total_hits: u64,
    /// Key of the last item, feed it into [`Pager::next_page`].
    pub last_key: Option<String>,
}

impl<T> Default for Page<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            total_hits: 0,
            last_key: None,
        }
    }
}

impl<T> Page<T> {
    /// Returns true if this page has no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<T> IntoIterator for Page<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

/// Wire shape of list and search responses.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PageResponse {
    #[serde(default)]
    items: Option<Vec<ParaObject>>,
    #[serde(default)]
    total_hits: Option<u64>,
    #[serde(default)]
    last_key: Option<String>,
}

impl From<PageResponse> for Page {
    fn from(v: PageResponse) -> Self {
        Page {
            items: v.items.unwrap_or_default(),
            total_hits: v.total_hits.unwrap_or_default(),
            last_key: v.last_key,
        }
    }
}
