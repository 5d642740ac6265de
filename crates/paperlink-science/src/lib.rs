//! Paperlink Science: link canonicalization, display and author disambiguation.

pub mod error;
pub mod identifiers;
pub mod links;
pub mod display;
pub mod disambiguation;

pub use error::{Result, ScienceError};
pub use identifiers::url_to_id;
pub use links::{canonicalize_links, expand_links, primary_url, LinkRanker, RankPolicy};
pub use display::{render, Detail, RenderContext};
pub use disambiguation::{
    CandidateMatch, CandidateSource, Decision, DecisionSink, Disambiguator, ProgressObserver,
    RankedCandidates,
};
