use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::link::{Link, LinkStatus};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Institution {
    pub name: String,
}

impl Institution {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// A position held at an institution.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Role {
    pub institution: Institution,
    pub role: String,
    pub start_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
}

/// An author as described by some catalog.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Author {
    pub name: String,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub aliases: Vec<String>,

    #[serde(default)]
    pub links: Vec<Link>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub roles: Vec<Role>,
}

impl Author {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_link(mut self, link: Link) -> Self {
        self.links.push(link);
        self
    }

    /// Ids of every link whose type is `scheme`. Rejected links are not ids
    /// of this author.
    pub fn ids_of<'a>(&'a self, scheme: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.links
            .iter()
            .filter(move |l| l.kind == scheme && l.status != LinkStatus::Rejected)
            .map(|l| l.link.as_str())
    }
}

/// A known person whose identity has been established, as stored by the
/// persistence layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Researcher {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub links: Vec<Link>,
}

impl Researcher {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            links: Vec::new(),
        }
    }

    pub fn with_link(mut self, link: Link) -> Self {
        self.links.push(link);
        self
    }

    /// Links of the given scheme, whatever their status.
    pub fn links_of<'a>(&'a self, scheme: &'a str) -> impl Iterator<Item = &'a Link> + 'a {
        self.links.iter().filter(move |l| l.kind == scheme)
    }

    /// Ids of the given scheme carrying exactly `status`.
    pub fn ids_with_status(&self, scheme: &str, status: LinkStatus) -> Vec<String> {
        self.links_of(scheme)
            .filter(|l| l.status == status)
            .map(|l| l.link.clone())
            .collect()
    }
}
