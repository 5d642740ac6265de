use std::collections::{HashMap, HashSet};

use paperlink_core::{LinkStatus, Researcher};

/// Known external ids of one scheme, each credited to a researcher name.
///
/// Built fresh for every disambiguation session and never mutated after.
#[derive(Debug, Clone, Default)]
pub struct IdentityIndex {
    scheme: String,
    names: HashMap<String, String>,
}

impl IdentityIndex {
    /// Indexes every `scheme` link of every researcher, whatever its status.
    /// When two researchers claim the same id, the later one wins.
    pub fn build<'a, I>(roster: I, scheme: &str) -> Self
    where
        I: IntoIterator<Item = &'a Researcher>,
    {
        let mut names = HashMap::new();
        for researcher in roster {
            for link in researcher.links_of(scheme) {
                names.insert(link.link.clone(), researcher.name.clone());
            }
        }
        Self {
            scheme: scheme.to_string(),
            names,
        }
    }

    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    /// Name credited with `id`.
    pub fn get(&self, id: &str) -> Option<&str> {
        self.names.get(id).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// Decisions already recorded for the researcher being resolved.
#[derive(Debug, Clone, Default)]
pub struct PriorDecisions {
    confirmed: HashSet<String>,
    rejected: HashSet<String>,
}

impl PriorDecisions {
    pub fn for_researcher(researcher: &Researcher, scheme: &str) -> Self {
        Self {
            confirmed: researcher
                .ids_with_status(scheme, LinkStatus::Confirmed)
                .into_iter()
                .collect(),
            rejected: researcher
                .ids_with_status(scheme, LinkStatus::Rejected)
                .into_iter()
                .collect(),
        }
    }

    pub fn status_of(&self, id: &str) -> LinkStatus {
        if self.rejected.contains(id) {
            LinkStatus::Rejected
        } else if self.confirmed.contains(id) {
            LinkStatus::Confirmed
        } else {
            LinkStatus::Unknown
        }
    }

    pub fn rejected(&self) -> &HashSet<String> {
        &self.rejected
    }
}

/// Selects which researchers of a roster to resolve.
#[derive(Debug, Clone, Default)]
pub struct RosterFilter {
    /// Exact names, compared case-insensitively.
    pub names: Option<Vec<String>>,
    /// Keep names whose prefix sorts before this bound.
    pub before: Option<String>,
    /// Keep names whose prefix sorts after this bound.
    pub after: Option<String>,
}

impl RosterFilter {
    /// Matching researchers, sorted by name.
    pub fn apply<'a>(&self, roster: &'a [Researcher]) -> Vec<&'a Researcher> {
        let names: Option<Vec<String>> = self
            .names
            .as_ref()
            .map(|ns| ns.iter().map(|n| n.to_lowercase()).collect());

        let mut selected: Vec<&Researcher> = roster
            .iter()
            .filter(|r| match &names {
                Some(ns) => ns.contains(&r.name.to_lowercase()),
                None => true,
            })
            .collect();
        selected.sort_by(|a, b| a.name.cmp(&b.name));

        if let Some(before) = &self.before {
            let bound = before.to_lowercase();
            selected.retain(|r| name_prefix(&r.name, &bound) < bound);
        }
        if let Some(after) = &self.after {
            let bound = after.to_lowercase();
            selected.retain(|r| name_prefix(&r.name, &bound) > bound);
        }
        selected
    }
}

fn name_prefix(name: &str, bound: &str) -> String {
    name.chars().take(bound.chars().count()).collect::<String>().to_lowercase()
}
