mod credentials;
mod directory;
mod error;
mod github_client;
mod link_urls;
mod listing;
mod logging_middleware;
mod mock;
mod object_model;
mod result;

pub use self::credentials::{load_token, read_token, token_path, TOKEN_PATH_ENV};
pub use self::directory::{
    ListRequest, Page, RepositoryDirectory, FIRST_PAGE, LAST_PAGE, OWNER_AFFILIATION,
};
pub use self::error::GgError;
pub use self::github_client::{GitHubClient, DEFAULT_API_URL};
pub use self::listing::{
    list_repositories, pages, ListOptions, RepoEntry, SortKey, VisibilityFilter,
};
pub use self::logging_middleware::LoggingMiddleware;
pub use self::mock::MockDirectory;
pub use self::object_model::{Repo, Visibility};
pub use self::result::GgResult;
