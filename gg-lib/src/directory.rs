use crate::object_model::{Repo, Visibility};
use crate::result::GgResult;
use async_trait::async_trait;

/// Affiliation that scopes listings to repositories the owner owns.
pub const OWNER_AFFILIATION: &str = "owner";

/// Page marker meaning no further pages exist.
pub const LAST_PAGE: u32 = 0;

/// Page number the service starts at when no page is requested.
pub const FIRST_PAGE: u32 = 1;

/// One request for a page of repositories, in the service's own vocabulary.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ListRequest {
    /// Owner to list, or `None` for the authenticated user.
    pub owner: Option<String>,
    /// Page to fetch, or `None` for the service's first page.
    pub page: Option<u32>,
    pub affiliation: &'static str,
    pub sort: &'static str,
    pub visibility: Option<Visibility>,
}

impl ListRequest {
    pub fn at_page(&self, page: Option<u32>) -> Self {
        Self {
            page,
            ..self.clone()
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Page {
    pub items: Vec<Repo>,
    /// Next page number, or [`LAST_PAGE`].
    pub next_page: u32,
}

/// A remote service that lists repositories one page at a time.
#[async_trait]
pub trait RepositoryDirectory: Send + Sync {
    async fn list_owned_repositories(&self, request: &ListRequest) -> GgResult<Page>;
}
