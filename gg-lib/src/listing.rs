//! Paginated listing of owned repositories.
//!
//! [`list_repositories`] walks the directory page by page, drops forks and
//! archived repositories unless asked to keep them, and yields entries in the
//! order the service returned them. Sorting is left to the service.

use crate::directory::{
    ListRequest, Page, RepositoryDirectory, FIRST_PAGE, LAST_PAGE, OWNER_AFFILIATION,
};
use crate::error::GgError;
use crate::object_model::{Repo, Visibility};
use crate::result::GgResult;
use futures_util::stream::{self, Stream, TryStreamExt};
use log::{debug, trace};
use std::str::FromStr;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SortKey {
    #[default]
    Name,
    Created,
    Updated,
    Pushed,
}

impl SortKey {
    /// Sort field understood by the service.
    pub fn api_field(&self) -> &'static str {
        match self {
            Self::Name => "full_name",
            Self::Created => "created",
            Self::Updated => "updated",
            Self::Pushed => "pushed",
        }
    }
}

impl FromStr for SortKey {
    type Err = GgError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "name" => Ok(Self::Name),
            "created" => Ok(Self::Created),
            "updated" => Ok(Self::Updated),
            "pushed" => Ok(Self::Pushed),
            _ => Err(GgError::UnknownSortKey(String::from(s))),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum VisibilityFilter {
    #[default]
    Any,
    PublicOnly,
    PrivateOnly,
}

impl VisibilityFilter {
    /// `None` leaves the parameter off the request.
    pub fn api_visibility(&self) -> Option<Visibility> {
        match self {
            Self::Any => None,
            Self::PublicOnly => Some(Visibility::Public),
            Self::PrivateOnly => Some(Visibility::Private),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ListOptions {
    pub user: Option<String>,
    pub visibility: VisibilityFilter,
    pub include_forks: bool,
    pub include_archived: bool,
    pub sort: SortKey,
}

impl ListOptions {
    fn request(&self) -> ListRequest {
        ListRequest {
            owner: self.user.clone().filter(|u| !u.is_empty()),
            page: None,
            affiliation: OWNER_AFFILIATION,
            sort: self.sort.api_field(),
            visibility: self.visibility.api_visibility(),
        }
    }

    fn filter(&self) -> RepoFilter {
        RepoFilter {
            include_forks: self.include_forks,
            include_archived: self.include_archived,
        }
    }
}

#[derive(Clone, Copy)]
struct RepoFilter {
    include_forks: bool,
    include_archived: bool,
}

impl RepoFilter {
    fn admits(&self, repo: &Repo) -> bool {
        if repo.fork && !self.include_forks {
            trace!("skipping fork {}", repo.name);
            return false;
        }
        if repo.archived && !self.include_archived {
            trace!("skipping archived {}", repo.name);
            return false;
        }
        true
    }
}

/// A repository that made it through the filters.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RepoEntry {
    pub name: String,
    pub description: String,
}

impl From<Repo> for RepoEntry {
    fn from(repo: Repo) -> Self {
        Self {
            name: repo.name,
            description: repo.description.unwrap_or_default(),
        }
    }
}

enum Cursor {
    Start,
    At(u32),
    Invalid { page: u32, next_page: u32 },
    Done,
}

/// Fetches pages one at a time until the service reports the last one.
///
/// Each next page must be strictly greater than the page just fetched, so a
/// page is never requested twice and the stream always ends. A page that
/// breaks this rule is still yielded before the error.
pub fn pages<'a, D>(
    directory: &'a D,
    request: ListRequest,
) -> impl Stream<Item = GgResult<Vec<Repo>>> + 'a
where
    D: RepositoryDirectory + ?Sized,
{
    stream::try_unfold(Cursor::Start, move |cursor| {
        let request = request.clone();
        async move {
            let page = match cursor {
                Cursor::Start => None,
                Cursor::At(page) => Some(page),
                Cursor::Invalid { page, next_page } => {
                    return Err(GgError::Pagination { page, next_page })
                }
                Cursor::Done => return Ok(None),
            };

            let Page { items, next_page } = directory
                .list_owned_repositories(&request.at_page(page))
                .await?;

            let current = page.unwrap_or(FIRST_PAGE);
            let cursor = if next_page == LAST_PAGE {
                Cursor::Done
            } else if next_page > current {
                Cursor::At(next_page)
            } else {
                Cursor::Invalid {
                    page: current,
                    next_page,
                }
            };

            debug!("page {} yielded {} repositories", current, items.len());
            Ok(Some((items, cursor)))
        }
    })
}

/// Lists the owner's repositories as a lazy stream of filtered entries.
///
/// A failing page ends the stream with its error; entries from earlier
/// pages have already been yielded.
pub fn list_repositories<'a, D>(
    options: &ListOptions,
    directory: &'a D,
) -> impl Stream<Item = GgResult<RepoEntry>> + 'a
where
    D: RepositoryDirectory + ?Sized,
{
    let filter = options.filter();
    pages(directory, options.request())
        .map_ok(move |items| {
            stream::iter(
                items
                    .into_iter()
                    .filter(move |repo| filter.admits(repo))
                    .map(|repo| Ok::<_, GgError>(RepoEntry::from(repo))),
            )
        })
        .try_flatten()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockDirectory;
    use futures_util::StreamExt;

    fn page(items: Vec<Repo>, next_page: u32) -> Page {
        Page { items, next_page }
    }

    fn three_repos() -> Vec<Repo> {
        vec![
            Repo::new("a").with_description("plain"),
            Repo::new("b").with_description("fork").forked(),
            Repo::new("c").with_description("archived").archived(),
        ]
    }

    async fn collect(
        options: &ListOptions,
        directory: &MockDirectory,
    ) -> Vec<GgResult<RepoEntry>> {
        list_repositories(options, directory).collect().await
    }

    async fn names(options: &ListOptions, directory: &MockDirectory) -> Vec<String> {
        list_repositories(options, directory)
            .map_ok(|entry| entry.name)
            .try_collect()
            .await
            .unwrap()
    }

    #[test]
    fn sort_keys_translate_to_api_fields() {
        assert_eq!("full_name", "name".parse::<SortKey>().unwrap().api_field());
        assert_eq!("created", "created".parse::<SortKey>().unwrap().api_field());
        assert_eq!("updated", "updated".parse::<SortKey>().unwrap().api_field());
        assert_eq!("pushed", "pushed".parse::<SortKey>().unwrap().api_field());
        assert!(matches!(
            "stars".parse::<SortKey>(),
            Err(GgError::UnknownSortKey(s)) if s == "stars"
        ));
    }

    #[tokio::test]
    async fn excludes_forks_and_archived_by_default() {
        let directory = MockDirectory::new().with_page(page(three_repos(), LAST_PAGE));

        let entries = collect(&ListOptions::default(), &directory).await;

        assert_eq!(1, entries.len());
        assert_eq!(
            &RepoEntry {
                name: String::from("a"),
                description: String::from("plain"),
            },
            entries[0].as_ref().unwrap()
        );
    }

    #[tokio::test]
    async fn includes_everything_when_asked() {
        let directory = MockDirectory::new().with_page(page(three_repos(), LAST_PAGE));
        let options = ListOptions {
            include_forks: true,
            include_archived: true,
            ..ListOptions::default()
        };

        assert_eq!(vec!["a", "b", "c"], names(&options, &directory).await);
    }

    #[tokio::test]
    async fn fork_and_archived_switches_are_independent() {
        let forks = ListOptions {
            include_forks: true,
            ..ListOptions::default()
        };
        let directory = MockDirectory::new().with_page(page(three_repos(), LAST_PAGE));
        assert_eq!(vec!["a", "b"], names(&forks, &directory).await);

        let archived = ListOptions {
            include_archived: true,
            ..ListOptions::default()
        };
        let directory = MockDirectory::new().with_page(page(three_repos(), LAST_PAGE));
        assert_eq!(vec!["a", "c"], names(&archived, &directory).await);
    }

    #[tokio::test]
    async fn archived_fork_needs_both_switches() {
        let repos = vec![Repo::new("old-fork").forked().archived()];
        let forks_only = ListOptions {
            include_forks: true,
            ..ListOptions::default()
        };
        let directory = MockDirectory::new().with_page(page(repos, LAST_PAGE));

        assert!(names(&forks_only, &directory).await.is_empty());
    }

    #[tokio::test]
    async fn missing_description_becomes_empty() {
        let directory = MockDirectory::new().with_page(page(vec![Repo::new("bare")], LAST_PAGE));

        let entries = collect(&ListOptions::default(), &directory).await;

        assert_eq!("", entries[0].as_ref().unwrap().description);
    }

    #[tokio::test]
    async fn follows_pages_once_each_in_order() {
        let directory = MockDirectory::new()
            .with_page(page(vec![Repo::new("x")], 2))
            .with_page(page(vec![Repo::new("y")], LAST_PAGE));

        assert_eq!(vec!["x", "y"], names(&ListOptions::default(), &directory).await);

        let requests = directory.requests();
        assert_eq!(2, requests.len());
        assert_eq!(None, requests[0].page);
        assert_eq!(Some(2), requests[1].page);
    }

    #[tokio::test]
    async fn filtering_keeps_page_order() {
        let directory = MockDirectory::new()
            .with_page(page(
                vec![Repo::new("m"), Repo::new("f").forked(), Repo::new("b")],
                3,
            ))
            .with_page(page(vec![Repo::new("z"), Repo::new("a")], LAST_PAGE));

        assert_eq!(
            vec!["m", "b", "z", "a"],
            names(&ListOptions::default(), &directory).await
        );
    }

    #[tokio::test]
    async fn request_carries_owner_sort_and_visibility() {
        let directory = MockDirectory::new().with_page(Page::default());
        let options = ListOptions {
            user: Some(String::from("octocat")),
            visibility: VisibilityFilter::PublicOnly,
            sort: SortKey::Updated,
            ..ListOptions::default()
        };

        assert!(names(&options, &directory).await.is_empty());

        assert_eq!(
            vec![ListRequest {
                owner: Some(String::from("octocat")),
                page: None,
                affiliation: "owner",
                sort: "updated",
                visibility: Some(Visibility::Public),
            }],
            directory.requests()
        );
    }

    #[tokio::test]
    async fn empty_user_means_authenticated_user() {
        let directory = MockDirectory::new().with_page(Page::default());
        let options = ListOptions {
            user: Some(String::new()),
            ..ListOptions::default()
        };

        names(&options, &directory).await;

        let requests = directory.requests();
        assert_eq!(None, requests[0].owner);
        assert_eq!("full_name", requests[0].sort);
        assert_eq!(None, requests[0].visibility);
    }

    #[tokio::test]
    async fn repeated_page_is_a_protocol_violation() {
        let directory = MockDirectory::new()
            .with_page(page(vec![Repo::new("x")], 2))
            .with_page(page(vec![Repo::new("y")], 2));

        let entries = collect(&ListOptions::default(), &directory).await;

        assert_eq!(3, entries.len());
        assert_eq!("x", entries[0].as_ref().unwrap().name);
        assert_eq!("y", entries[1].as_ref().unwrap().name);
        assert!(matches!(
            entries[2],
            Err(GgError::Pagination {
                page: 2,
                next_page: 2
            })
        ));
        assert_eq!(2, directory.requests().len());
    }

    #[tokio::test]
    async fn first_page_pointing_back_to_itself_is_rejected() {
        let directory = MockDirectory::new().with_page(page(vec![Repo::new("x")], 1));

        let entries = collect(&ListOptions::default(), &directory).await;

        assert!(matches!(
            entries.last(),
            Some(Err(GgError::Pagination {
                page: 1,
                next_page: 1
            }))
        ));
        assert_eq!(1, directory.requests().len());
    }

    #[tokio::test]
    async fn service_error_stops_after_earlier_entries() {
        let directory = MockDirectory::new()
            .with_page(page(vec![Repo::new("x")], 2))
            .with_failure("connection reset");

        let entries = collect(&ListOptions::default(), &directory).await;

        assert_eq!(2, entries.len());
        assert_eq!("x", entries[0].as_ref().unwrap().name);
        assert!(entries[1]
            .as_ref()
            .unwrap_err()
            .to_string()
            .contains("connection reset"));
    }
}
