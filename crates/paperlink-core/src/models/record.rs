use serde::{Deserialize, Serialize};

use super::author::Author;
use super::link::Link;
use super::paper::Paper;
use super::venue::Venue;

/// Any displayable bibliographic entity.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "record", rename_all = "snake_case")]
pub enum Record {
    Paper(Paper),
    Author(Author),
    Venue(Venue),
}

impl Record {
    pub fn links(&self) -> &[Link] {
        match self {
            Self::Paper(p) => &p.links,
            Self::Author(a) => &a.links,
            Self::Venue(v) => &v.links,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Paper(p) => &p.title,
            Self::Author(a) => &a.name,
            Self::Venue(v) => &v.name,
        }
    }
}

impl From<Paper> for Record {
    fn from(p: Paper) -> Self {
        Self::Paper(p)
    }
}

impl From<Author> for Record {
    fn from(a: Author) -> Self {
        Self::Author(a)
    }
}

impl From<Venue> for Record {
    fn from(v: Venue) -> Self {
        Self::Venue(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_tagging() {
        let json = r#"[
            {"record":"paper","title":"Attention"},
            {"record":"author","name":"Jane Doe"},
            {"record":"venue","name":"NeurIPS","type":"conference"}
        ]"#;
        let records: Vec<Record> = serde_json::from_str(json).unwrap();
        assert!(matches!(records[0], Record::Paper(_)));
        assert!(matches!(records[1], Record::Author(_)));
        assert!(matches!(records[2], Record::Venue(_)));
        assert_eq!(records[2].name(), "NeurIPS");
    }
}
