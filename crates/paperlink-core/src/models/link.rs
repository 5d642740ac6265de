use serde::{Deserialize, Serialize};

/// Whether a link has been confirmed as belonging to its owner.
///
/// Only meaningful on researcher links; links scraped from catalogs are
/// `Confirmed` by default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LinkStatus {
    #[default]
    Confirmed,
    Rejected,
    Unknown,
}

impl LinkStatus {
    pub fn is_confirmed(&self) -> bool {
        matches!(self, Self::Confirmed)
    }
}

impl std::fmt::Display for LinkStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Confirmed => "confirmed",
            Self::Rejected => "rejected",
            Self::Unknown => "unknown",
        };
        write!(f, "{s}")
    }
}

/// An external link: a scheme tag plus an opaque identifier or URL.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "LinkRepr")]
pub struct Link {
    #[serde(rename = "type")]
    pub kind: String,
    pub link: String,
    #[serde(default, skip_serializing_if = "LinkStatus::is_confirmed")]
    pub status: LinkStatus,
}

impl Link {
    pub fn new(kind: impl Into<String>, link: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            link: link.into(),
            status: LinkStatus::Confirmed,
        }
    }

    pub fn with_status(mut self, status: LinkStatus) -> Self {
        self.status = status;
        self
    }

    /// The `(type, link)` pair, ignoring status.
    pub fn pair(&self) -> (&str, &str) {
        (&self.kind, &self.link)
    }
}

// Older dumps mark excluded links with a `!` in front of the type.
#[derive(Deserialize)]
struct LinkRepr {
    #[serde(rename = "type")]
    kind: String,
    link: String,
    #[serde(default)]
    status: Option<LinkStatus>,
}

impl From<LinkRepr> for Link {
    fn from(repr: LinkRepr) -> Self {
        match repr.kind.strip_prefix('!') {
            Some(kind) => Self {
                kind: kind.to_string(),
                link: repr.link,
                status: repr.status.unwrap_or(LinkStatus::Rejected),
            },
            None => Self {
                kind: repr.kind,
                link: repr.link,
                status: repr.status.unwrap_or_default(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_link_json_uses_type_field() {
        let link = Link::new("arxiv", "2101.00001");
        let json = serde_json::to_string(&link).unwrap();
        assert_eq!(json, r#"{"type":"arxiv","link":"2101.00001"}"#);

        let back: Link = serde_json::from_str(&json).unwrap();
        assert_eq!(back, link);
    }

    #[test]
    fn test_bang_prefix_maps_to_rejected() {
        let link: Link = serde_json::from_str(r#"{"type":"!openreview","link":"~Jane_Doe1"}"#).unwrap();
        assert_eq!(link.kind, "openreview");
        assert_eq!(link.status, LinkStatus::Rejected);
    }

    #[test]
    fn test_explicit_status_is_kept() {
        let link: Link =
            serde_json::from_str(r#"{"type":"orcid","link":"0001","status":"unknown"}"#).unwrap();
        assert_eq!(link.status, LinkStatus::Unknown);

        let json = serde_json::to_string(&link).unwrap();
        assert!(json.contains(r#""status":"unknown""#));
    }
}
