use crate::directory::{ListRequest, Page, RepositoryDirectory};
use crate::error::GgError;
use crate::result::GgResult;
use anyhow::anyhow;
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;

enum Reply {
    Page(Page),
    Failure(String),
}

/// In-memory directory serving canned pages in order.
///
/// Every request is recorded so tests can check what the pipeline asked for.
/// Running out of canned replies is an error rather than a hang.
#[derive(Default)]
pub struct MockDirectory {
    replies: Mutex<VecDeque<Reply>>,
    requests: Mutex<Vec<ListRequest>>,
}

impl MockDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(self, page: Page) -> Self {
        self.push(Reply::Page(page));
        self
    }

    pub fn with_failure(self, message: &str) -> Self {
        self.push(Reply::Failure(String::from(message)));
        self
    }

    pub fn requests(&self) -> Vec<ListRequest> {
        self.requests
            .lock()
            .map(|requests| requests.clone())
            .unwrap_or_default()
    }

    fn push(&self, reply: Reply) {
        if let Ok(mut replies) = self.replies.lock() {
            replies.push_back(reply);
        }
    }
}

#[async_trait]
impl RepositoryDirectory for MockDirectory {
    async fn list_owned_repositories(&self, request: &ListRequest) -> GgResult<Page> {
        self.requests
            .lock()
            .map_err(|e| anyhow!("{e}"))?
            .push(request.clone());

        let reply = self
            .replies
            .lock()
            .map_err(|e| anyhow!("{e}"))?
            .pop_front();

        match reply {
            Some(Reply::Page(page)) => Ok(page),
            Some(Reply::Failure(message)) => Err(GgError::Other(anyhow!(message))),
            None => Err(GgError::Other(anyhow!(
                "no page available for request {:?}",
                request
            ))),
        }
    }
}
