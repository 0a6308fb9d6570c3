use crate::directory::{ListRequest, Page, RepositoryDirectory, LAST_PAGE};
use crate::error::GgError;
use crate::link_urls::PageLinks;
use crate::logging_middleware::LoggingMiddleware;
use crate::object_model::Repo;
use crate::result::GgResult;
use anyhow::anyhow;
use async_trait::async_trait;
use log::{debug, Level};
use reqwest::header::{ACCEPT, USER_AGENT};
use reqwest::{Client, IntoUrl, Url};
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};

pub const DEFAULT_API_URL: &str = "https://api.github.com/";

const API_VERSION: &str = "2022-11-28";

/// GitHub REST implementation of [`RepositoryDirectory`].
pub struct GitHubClient {
    url: Url,
    token: String,
    client: ClientWithMiddleware,
}

impl GitHubClient {
    pub fn new<U>(url: U, token: &str) -> GgResult<Self>
    where
        U: IntoUrl,
    {
        let url = url.into_url().map_err(|e| GgError::Other(anyhow!(e)))?;
        if url.cannot_be_a_base() {
            return Err(GgError::Other(anyhow!("{url} cannot be used as an API base URL")));
        }

        let client = ClientBuilder::new(Client::new())
            .with(LoggingMiddleware::new(Level::Debug))
            .build();

        Ok(Self {
            url,
            token: String::from(token),
            client,
        })
    }

    /// `user/repos` for the authenticated user, `users/{owner}/repos` otherwise.
    fn repos_url(&self, owner: Option<&str>) -> GgResult<Url> {
        let mut url = self.url.clone();
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|_| anyhow!("{} cannot be used as an API base URL", self.url))?;
            segments.pop_if_empty();
            match owner {
                Some(owner) => segments.extend(["users", owner, "repos"]),
                None => segments.extend(["user", "repos"]),
            };
        }
        Ok(url)
    }

    fn query_pairs(request: &ListRequest) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("affiliation", String::from(request.affiliation)),
            ("sort", String::from(request.sort)),
        ];
        if let Some(visibility) = request.visibility {
            pairs.push(("visibility", String::from(visibility.as_str())));
        }
        if let Some(page) = request.page {
            pairs.push(("page", page.to_string()));
        }
        pairs
    }
}

#[async_trait]
impl RepositoryDirectory for GitHubClient {
    async fn list_owned_repositories(&self, request: &ListRequest) -> GgResult<Page> {
        let url = self.repos_url(request.owner.as_deref())?;

        let response = self
            .client
            .get(url)
            .query(&Self::query_pairs(request))
            .header(USER_AGENT, "gg")
            .header(ACCEPT, "application/vnd.github+json")
            .header("X-GitHub-Api-Version", API_VERSION)
            .bearer_auth(&self.token)
            .send()
            .await
            .map_err(|e| GgError::Other(anyhow!(e)))?
            .error_for_status()
            .map_err(|e| GgError::Other(anyhow!(e)))?;

        let links = PageLinks::from_headers(response.headers())?;

        let items = response
            .json::<Vec<Repo>>()
            .await
            .map_err(|e| GgError::Other(anyhow!(e)))?;

        debug!(
            "page {} returned {} repositories (next {:?}, last {:?})",
            request.page.map_or_else(|| String::from("first"), |p| p.to_string()),
            items.len(),
            links.next_page,
            links.last_page
        );

        Ok(Page {
            items,
            next_page: links.next_page.unwrap_or(LAST_PAGE),
        })
    }
}
