use super::text;
use crate::dispatch::Params;
use crate::Client;
use para_core::{Error, Result};

impl Client {
    /// Generate a new unique id.
    pub async fn new_id(&self) -> Result<Option<String>> {
        Ok(text(self.invoke_get("utils/newid", &Params::new()).await?))
    }

    /// Current server time in epoch millis, `0` when the server sends nothing.
    pub async fn get_timestamp(&self) -> Result<u64> {
        let Some(v) = text(self.invoke_get("utils/timestamp", &Params::new()).await?) else {
            return Ok(0);
        };
        v.trim().parse().map_err(|e| {
            Error::unexpected(format!("timestamp {v:?} is not a number")).with_source(e)
        })
    }

    /// Format the current date with a pattern like `yyyy-MM-dd` in `locale`.
    pub async fn format_date(&self, format: &str, locale: &str) -> Result<Option<String>> {
        let params = Params::new().with("format", format).with("locale", locale);
        Ok(text(self.invoke_get("utils/formatdate", &params).await?))
    }

    /// Replace whitespace in `s` with `replacement`.
    pub async fn no_spaces(&self, s: &str, replacement: &str) -> Result<Option<String>> {
        let params = Params::new()
            .with("string", s)
            .with("replacement", replacement);
        Ok(text(self.invoke_get("utils/nospaces", &params).await?))
    }

    /// Strip symbols, punctuation, whitespace and control chars from `s`.
    pub async fn strip_and_trim(&self, s: &str) -> Result<Option<String>> {
        let params = Params::new().with("string", s);
        Ok(text(self.invoke_get("utils/nosymbols", &params).await?))
    }

    /// Render markdown as HTML.
    pub async fn markdown_to_html(&self, md: &str) -> Result<Option<String>> {
        let params = Params::new().with("md", md);
        Ok(text(self.invoke_get("utils/md2html", &params).await?))
    }

    /// Human readable form of a time delta in millis, e.g. `5 minutes`.
    pub async fn approximately(&self, delta: u64) -> Result<Option<String>> {
        let params = Params::new().with("delta", delta.to_string());
        Ok(text(self.invoke_get("utils/timeago", &params).await?))
    }
}
