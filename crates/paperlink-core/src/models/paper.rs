use serde::{Deserialize, Serialize};

use super::author::{Author, Institution};
use super::link::Link;
use super::venue::Venue;

/// An author's appearance on a paper.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PaperAuthor {
    pub author: Author,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub affiliations: Vec<Institution>,
}

impl From<Author> for PaperAuthor {
    fn from(author: Author) -> Self {
        Self {
            author,
            affiliations: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Release {
    pub venue: Venue,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub status: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Topic {
    pub name: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Paper {
    pub title: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub abstract_text: Option<String>,

    #[serde(default)]
    pub authors: Vec<PaperAuthor>,

    #[serde(default)]
    pub releases: Vec<Release>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub topics: Vec<Topic>,

    #[serde(default)]
    pub links: Vec<Link>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub citation_count: Option<u32>,
}

impl Paper {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }

    pub fn with_author(mut self, author: Author) -> Self {
        self.authors.push(author.into());
        self
    }

    pub fn with_release(mut self, venue: Venue) -> Self {
        self.releases.push(Release {
            venue,
            status: String::new(),
        });
        self
    }

    /// Year of the first release, if it has a dated venue.
    pub fn year(&self) -> Option<i32> {
        self.releases.first().and_then(|r| r.venue.year())
    }
}
