use std::path::Path;

use futures::stream::{self, BoxStream, StreamExt};
use paperlink_core::{load_json, Author, Paper};
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// An external author profile together with the papers it claims.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Candidate {
    pub author: Author,
    #[serde(default)]
    pub papers: Vec<Paper>,
}

impl Candidate {
    pub fn new(author: Author, papers: Vec<Paper>) -> Self {
        Self { author, papers }
    }
}

/// Looks up external author profiles by display name.
///
/// Implementations own pagination, rate limiting and retries. Failures are
/// yielded as [`ScienceError::Upstream`](crate::ScienceError::Upstream) items
/// and end the session.
pub trait CandidateSource: Send + Sync {
    fn query_name<'a>(&'a self, name: &'a str) -> BoxStream<'a, Result<Candidate>>;
}

/// Serves a fixed list of candidates, e.g. loaded from a JSON dump.
///
/// A candidate matches a query when its name or one of its aliases equals the
/// query, ignoring case.
#[derive(Debug, Clone, Default)]
pub struct StaticCandidateSource {
    candidates: Vec<Candidate>,
}

impl StaticCandidateSource {
    pub fn new(candidates: Vec<Candidate>) -> Self {
        Self { candidates }
    }

    /// Loads a JSON list of `{author, papers}` entries.
    pub fn from_file(path: &Path) -> Result<Self> {
        let candidates: Vec<Candidate> = load_json(path)?;
        Ok(Self::new(candidates))
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }
}

impl CandidateSource for StaticCandidateSource {
    fn query_name<'a>(&'a self, name: &'a str) -> BoxStream<'a, Result<Candidate>> {
        let query = name.to_lowercase();
        stream::iter(self.candidates.iter().filter(move |c| {
            c.author.name.to_lowercase() == query
                || c.author.aliases.iter().any(|a| a.to_lowercase() == query)
        }))
        .map(|c| Ok(c.clone()))
        .boxed()
    }
}

#[cfg(test)]
mod tests {
    use futures::TryStreamExt;
    use tempfile::TempDir;

    use super::*;
    use crate::error::ScienceError;

    #[tokio::test]
    async fn test_static_source_matches_name_and_alias() {
        let mut aliased = Author::new("J. Doe");
        aliased.aliases.push("Jane Doe".to_string());
        let source = StaticCandidateSource::new(vec![
            Candidate::new(Author::new("Jane Doe"), vec![]),
            Candidate::new(Author::new("John Roe"), vec![]),
            Candidate::new(aliased, vec![]),
        ]);

        let found: Vec<Candidate> = source.query_name("jane doe").try_collect().await.unwrap();
        let names: Vec<&str> = found.iter().map(|c| c.author.name.as_str()).collect();
        assert_eq!(names, vec!["Jane Doe", "J. Doe"]);
    }

    #[tokio::test]
    async fn test_static_source_no_match() {
        let source = StaticCandidateSource::new(vec![Candidate::new(Author::new("Jane Doe"), vec![])]);
        let found: Vec<Candidate> = source.query_name("Nobody").try_collect().await.unwrap();
        assert!(found.is_empty());
    }

    #[tokio::test]
    async fn test_source_from_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("candidates.json");
        std::fs::write(
            &path,
            r#"[{"author":{"name":"Jane Doe","links":[{"type":"semantic_scholar","link":"42"}]},
                "papers":[{"title":"A"}]}]"#,
        )
        .unwrap();

        let source = StaticCandidateSource::from_file(&path).unwrap();
        assert_eq!(source.len(), 1);
        let found: Vec<Candidate> = source.query_name("Jane Doe").try_collect().await.unwrap();
        assert_eq!(found[0].papers.len(), 1);
    }

    #[test]
    fn test_unreadable_file_is_a_core_error() {
        let err = StaticCandidateSource::from_file(Path::new("/nonexistent/candidates.json")).unwrap_err();
        assert!(matches!(err, ScienceError::Core(paperlink_core::CoreError::Io(_))));
    }
}
