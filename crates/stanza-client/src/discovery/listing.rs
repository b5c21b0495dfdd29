//! Remote directory listings.
//!
//! The listing API answers `GET <listing_url>/<root>?per_page=P&page=k` with a
//! JSON array of `{name, type}` objects, the shape GitHub's contents API
//! uses. Anything else is a malformed response.

use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::{Deserialize, Serialize};

use crate::store::transport_error;
use crate::{Error, Result};

/// Kind of a listing entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    /// A regular file.
    File,
    /// A directory.
    Dir,
    /// Symlinks, submodules, and anything else; never matched.
    #[serde(other)]
    Other,
}

/// One entry of a directory listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingEntry {
    /// Entry name, without its parent path.
    pub name: String,
    /// Entry kind.
    #[serde(rename = "type")]
    pub kind: EntryKind,
}

impl ListingEntry {
    /// A directory entry.
    pub fn dir(name: &str) -> Self {
        Self {
            name: name.to_string(),
            kind: EntryKind::Dir,
        }
    }

    /// A file entry.
    pub fn file(name: &str) -> Self {
        Self {
            name: name.to_string(),
            kind: EntryKind::File,
        }
    }
}

/// Enumerates the entries directly under a root.
#[async_trait]
pub trait DirectoryListing: Send + Sync {
    /// List every entry under `root`, across all pages.
    async fn list(&self, root: &str) -> Result<Vec<ListingEntry>>;
}

/// Paginated listing over HTTP.
#[derive(Debug, Clone)]
pub struct HttpListing {
    client: Client,
    base: Url,
    per_page: u32,
    max_pages: u32,
}

impl HttpListing {
    /// Create a listing client for the API rooted at `listing_url`.
    pub fn new(client: Client, listing_url: &str, per_page: u32, max_pages: u32) -> Result<Self> {
        let base = Url::parse(listing_url)
            .map_err(|e| stanza_core::Error::invalid_url(listing_url, e.to_string()))?;
        if base.cannot_be_a_base() {
            return Err(stanza_core::Error::invalid_url(listing_url, "not a base URL").into());
        }
        Ok(Self {
            client,
            base,
            per_page: per_page.max(1),
            max_pages: max_pages.max(1),
        })
    }

    /// URL of page `page` (1-based) of `root`.
    pub fn page_url(&self, root: &str, page: u32) -> Result<Url> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|()| stanza_core::Error::invalid_url(self.base.as_str(), "not a base URL"))?
            .pop_if_empty()
            .extend(root.split('/').filter(|s| !s.is_empty()));
        url.query_pairs_mut()
            .append_pair("per_page", &self.per_page.to_string())
            .append_pair("page", &page.to_string());
        Ok(url)
    }

    async fn fetch_page(&self, url: &Url) -> Result<Vec<ListingEntry>> {
        let response = self
            .client
            .get(url.clone())
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| transport_error(url, &e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(stanza_core::Error::http(status.as_u16(), url.as_str()).into());
        }

        let body = response.text().await.map_err(|e| transport_error(url, &e))?;
        serde_json::from_str(&body).map_err(|source| Error::MalformedListing {
            url: url.to_string(),
            source,
        })
    }
}

#[async_trait]
impl DirectoryListing for HttpListing {
    async fn list(&self, root: &str) -> Result<Vec<ListingEntry>> {
        let mut entries: Vec<ListingEntry> = Vec::new();
        let mut previous_first: Option<String> = None;

        for page in 1..=self.max_pages {
            let url = self.page_url(root, page)?;
            let batch = self.fetch_page(&url).await?;
            let count = batch.len();
            tracing::debug!(root, page, count, "Fetched listing page");

            // A server that ignores pagination answers every page with the
            // first one.
            let first = batch.first().map(|e| e.name.clone());
            if page > 1 && first.is_some() && first == previous_first {
                tracing::debug!(root, page, "Listing page repeats, stopping");
                break;
            }
            previous_first = first;
            entries.extend(batch);

            if count < self.per_page as usize {
                return Ok(entries);
            }
            if page == self.max_pages {
                tracing::warn!(
                    root,
                    max_pages = self.max_pages,
                    "Listing truncated at page limit"
                );
            }
        }
        Ok(entries)
    }
}
