use paperlink_core::{Link, LinkStatus, Researcher};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::Result;

/// Outcome of a human review of a candidate id.
pub type Validity = LinkStatus;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Decision {
    pub author_id: Uuid,
    pub scheme: String,
    pub external_id: String,
    pub validity: Validity,
}

impl Decision {
    pub fn new(
        author_id: Uuid,
        scheme: impl Into<String>,
        external_id: impl Into<String>,
        validity: Validity,
    ) -> Self {
        Self {
            author_id,
            scheme: scheme.into(),
            external_id: external_id.into(),
            validity,
        }
    }
}

/// Persists review decisions. Called by the review front-end, never by the
/// scorer itself.
pub trait DecisionSink {
    fn record(&mut self, decision: Decision) -> Result<()>;
}

/// Keeps decisions in memory, in the order they were made.
#[derive(Debug, Clone, Default)]
pub struct MemoryDecisionSink {
    decisions: Vec<Decision>,
}

impl MemoryDecisionSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn decisions(&self) -> &[Decision] {
        &self.decisions
    }

    /// Latest validity recorded for the given id.
    pub fn status_of(&self, author_id: Uuid, scheme: &str, external_id: &str) -> Option<Validity> {
        self.decisions
            .iter()
            .rev()
            .find(|d| d.author_id == author_id && d.scheme == scheme && d.external_id == external_id)
            .map(|d| d.validity)
    }

    /// Writes every decision about `researcher` onto its links, adding links
    /// that do not exist yet.
    pub fn apply_to(&self, researcher: &mut Researcher) {
        for decision in self.decisions.iter().filter(|d| d.author_id == researcher.id) {
            match researcher
                .links
                .iter_mut()
                .find(|l| l.kind == decision.scheme && l.link == decision.external_id)
            {
                Some(link) => link.status = decision.validity,
                None => researcher.links.push(
                    Link::new(decision.scheme.clone(), decision.external_id.clone())
                        .with_status(decision.validity),
                ),
            }
        }
    }
}

impl DecisionSink for MemoryDecisionSink {
    fn record(&mut self, decision: Decision) -> Result<()> {
        self.decisions.push(decision);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_last_decision_wins() {
        let id = Uuid::new_v4();
        let mut sink = MemoryDecisionSink::new();
        sink.record(Decision::new(id, "openreview", "~A1", LinkStatus::Confirmed)).unwrap();
        sink.record(Decision::new(id, "openreview", "~A1", LinkStatus::Rejected)).unwrap();

        assert_eq!(sink.decisions().len(), 2);
        assert_eq!(sink.status_of(id, "openreview", "~A1"), Some(LinkStatus::Rejected));
        assert_eq!(sink.status_of(id, "openreview", "~A2"), None);
        assert_eq!(sink.status_of(Uuid::new_v4(), "openreview", "~A1"), None);
    }

    #[test]
    fn test_apply_updates_and_adds_links() {
        let mut researcher = Researcher::new("A. Smith").with_link(Link::new("semantic_scholar", "1"));
        let other = Uuid::new_v4();

        let mut sink = MemoryDecisionSink::new();
        sink.record(Decision::new(researcher.id, "semantic_scholar", "1", LinkStatus::Rejected))
            .unwrap();
        sink.record(Decision::new(researcher.id, "semantic_scholar", "2", LinkStatus::Unknown))
            .unwrap();
        sink.record(Decision::new(other, "semantic_scholar", "3", LinkStatus::Confirmed))
            .unwrap();
        sink.apply_to(&mut researcher);

        assert_eq!(researcher.links.len(), 2);
        assert_eq!(researcher.links[0].status, LinkStatus::Rejected);
        assert_eq!(researcher.links[1], Link::new("semantic_scholar", "2").with_status(LinkStatus::Unknown));
    }
}
