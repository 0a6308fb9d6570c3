use serde::Deserialize;
use std::fmt::{Display, Formatter, Result as FmtResult};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Visibility {
    Public,
    Private,
}

impl Visibility {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Public => "public",
            Self::Private => "private",
        }
    }
}

impl Display for Visibility {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

/// One repository as reported by the API at fetch time.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct Repo {
    #[serde(rename = "name")]
    pub name: String,

    #[serde(rename = "description", default)]
    pub description: Option<String>,

    #[serde(rename = "fork", default)]
    pub fork: bool,

    #[serde(rename = "archived", default)]
    pub archived: bool,

    #[serde(rename = "private", default)]
    pub private: bool,
}

impl Repo {
    pub fn new(name: &str) -> Self {
        Self {
            name: String::from(name),
            description: None,
            fork: false,
            archived: false,
            private: false,
        }
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.description = Some(String::from(description));
        self
    }

    pub fn forked(mut self) -> Self {
        self.fork = true;
        self
    }

    pub fn archived(mut self) -> Self {
        self.archived = true;
        self
    }

    pub fn private(mut self) -> Self {
        self.private = true;
        self
    }

    pub fn visibility(&self) -> Visibility {
        if self.private {
            Visibility::Private
        } else {
            Visibility::Public
        }
    }
}
