use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use super::link::Link;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VenueType {
    Journal,
    Conference,
    Workshop,
    Preprint,
    Book,
    #[default]
    Unknown,
}

impl std::fmt::Display for VenueType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use VenueType::*;
        let s = match self {
            Journal => "journal",
            Conference => "conference",
            Workshop => "workshop",
            Preprint => "preprint",
            Book => "book",
            Unknown => "unknown",
        };
        write!(f, "{s}")
    }
}

/// How much of a venue date is actually known.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DatePrecision {
    Year,
    Month,
    #[default]
    Day,
}

impl DatePrecision {
    pub fn format(&self, date: NaiveDate) -> String {
        match self {
            Self::Year => format!("{:04}", date.year()),
            Self::Month => format!("{:04}-{:02}", date.year(), date.month()),
            Self::Day => date.format("%Y-%m-%d").to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Venue {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub series: Option<String>,

    #[serde(rename = "type", default)]
    pub kind: VenueType,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub aliases: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,

    #[serde(default)]
    pub date_precision: DatePrecision,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<Link>,
}

impl Venue {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn year(&self) -> Option<i32> {
        self.date.map(|d| d.year())
    }

    /// Date formatted to its known precision, or `"n/a"`.
    pub fn formatted_date(&self) -> String {
        self.date
            .map(|d| self.date_precision.format(d))
            .unwrap_or_else(|| "n/a".to_string())
    }
}
