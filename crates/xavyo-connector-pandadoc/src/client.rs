//! PandaDoc public API client.
//!
//! Each list call issues exactly one GET. Retries and rate limiting are left
//! to the host.

use reqwest::header::{ACCEPT, AUTHORIZATION};
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use std::future::Future;
use tracing::{debug, instrument, warn};
use url::Url;

use crate::cursor::PageCursor;
use crate::models::{ListResponse, User, Workspace};
use crate::resource_types::{USER_RESOURCE_TYPE_ID, WORKSPACE_RESOURCE_TYPE_ID};
use crate::{PandaDocConfig, PandaDocError, PandaDocResult};

/// Largest page the users and workspaces endpoints serve.
pub const MAX_PAGE_SIZE: u32 = 50;

const USERS_PATH: &str = "users";
const WORKSPACES_PATH: &str = "workspaces";

/// Page parameters as requested by a caller, before clamping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PageOptions {
    /// 1-based page number; `<= 0` means the first page.
    pub page: i64,
    /// Items per page; outside `1..=50` means 50.
    pub count: i64,
}

impl PageOptions {
    pub fn new(page: u32, count: u32) -> Self {
        Self {
            page: i64::from(page),
            count: i64::from(count),
        }
    }

    /// Page number sent upstream.
    pub fn effective_page(&self) -> u32 {
        if self.page <= 0 {
            1
        } else {
            u32::try_from(self.page).unwrap_or(u32::MAX)
        }
    }

    /// Page size sent upstream.
    pub fn effective_count(&self) -> u32 {
        match u32::try_from(self.count) {
            Ok(count) if (1..=MAX_PAGE_SIZE).contains(&count) => count,
            _ => MAX_PAGE_SIZE,
        }
    }
}

/// One page of an upstream collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// Page to request next, `None` on the last page.
    pub next_page: Option<u32>,
    /// Collection size reported upstream.
    pub total: u64,
}

/// Whether items remain after `page` of size `count`.
fn has_more(page: u32, count: u32, returned: usize, total: u64) -> bool {
    returned > 0 && u64::from(page) * u64::from(count) < total
}

/// PandaDoc API client.
#[derive(Debug)]
pub struct PandaDocClient {
    http_client: reqwest::Client,
    base_url: Url,
    api_key: SecretString,
    page_size: u32,
}

impl PandaDocClient {
    /// Creates a new client.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid (including a base
    /// URL that does not parse) or the HTTP client cannot be created.
    pub fn new(config: &PandaDocConfig) -> PandaDocResult<Self> {
        config.check()?;
        let base_url = config.base_url()?;

        let http_client = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .build()
            .map_err(|e| PandaDocError::Config(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            http_client,
            base_url,
            api_key: SecretString::from(config.api_key.expose_secret().to_owned()),
            page_size: config.page_size,
        })
    }

    /// Returns the API base URL.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Page size used by the `list_all_*` loops.
    #[must_use]
    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    fn endpoint_url(&self, path: &str) -> PandaDocResult<Url> {
        let base = self.base_url.as_str().trim_end_matches('/');
        Ok(Url::parse(&format!("{base}/{path}"))?)
    }

    /// Lists one page of users.
    #[instrument(skip(self))]
    pub async fn list_users(&self, options: PageOptions) -> PandaDocResult<Page<User>> {
        self.get_page(USERS_PATH, options).await
    }

    /// Lists one page of workspaces.
    #[instrument(skip(self))]
    pub async fn list_workspaces(&self, options: PageOptions) -> PandaDocResult<Page<Workspace>> {
        self.get_page(WORKSPACES_PATH, options).await
    }

    /// Fetches every page of users.
    #[instrument(skip(self))]
    pub async fn list_all_users(&self) -> PandaDocResult<Vec<User>> {
        fetch_all(USER_RESOURCE_TYPE_ID, self.page_size, |options| {
            self.list_users(options)
        })
        .await
    }

    /// Fetches every page of workspaces.
    #[instrument(skip(self))]
    pub async fn list_all_workspaces(&self) -> PandaDocResult<Vec<Workspace>> {
        fetch_all(WORKSPACE_RESOURCE_TYPE_ID, self.page_size, |options| {
            self.list_workspaces(options)
        })
        .await
    }

    async fn get_page<T: DeserializeOwned>(
        &self,
        path: &str,
        options: PageOptions,
    ) -> PandaDocResult<Page<T>> {
        let page = options.effective_page();
        let count = options.effective_count();
        let url = self.endpoint_url(path)?;

        debug!(%url, page, count, "Fetching page");

        let response = self
            .http_client
            .get(url)
            .header(
                AUTHORIZATION,
                format!("API-Key {}", self.api_key.expose_secret()),
            )
            .header(ACCEPT, "application/json")
            .query(&[("count", count), ("page", page)])
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            warn!(path, %status, "PandaDoc request failed");
            return Err(PandaDocError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let list: ListResponse<T> = serde_json::from_str(&body)?;
        let next_page = has_more(page, count, list.results.len(), list.total).then(|| page + 1);

        Ok(Page {
            items: list.results,
            next_page,
            total: list.total,
        })
    }
}

/// Walks every page of a collection, starting from page 1, until the cursor
/// reports no next page. Any failure discards what was already fetched.
pub(crate) async fn fetch_all<T, F, Fut>(
    resource_type_id: &str,
    page_size: u32,
    mut fetch: F,
) -> PandaDocResult<Vec<T>>
where
    F: FnMut(PageOptions) -> Fut,
    Fut: Future<Output = PandaDocResult<Page<T>>>,
{
    let mut token = String::new();
    let mut all = Vec::new();

    loop {
        let cursor = PageCursor::decode(&token, resource_type_id)?;
        let page = fetch(PageOptions::new(cursor.page(), page_size)).await?;

        debug!(
            resource_type = resource_type_id,
            page = cursor.page(),
            items = page.items.len(),
            "Fetched page"
        );

        all.extend(page.items);
        token = cursor.advance(page.next_page)?;
        if token.is_empty() {
            break;
        }
    }

    Ok(all)
}
