//! Expansion of canonical links into concrete, display-ordered URLs.

use paperlink_core::Link;
use serde::Serialize;

use crate::error::{Result, ScienceError};

/// URL template for one kind of page within a link family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinkTemplate {
    pub family: &'static str,
    pub kind: &'static str,
    pub template: &'static str,
}

impl LinkTemplate {
    /// `family.kind`, the label used for display ranking.
    pub fn label(&self) -> String {
        format!("{}.{}", self.family, self.kind)
    }

    pub fn render(&self, id: &str) -> String {
        self.template.replace("{}", id)
    }
}

const fn tpl(family: &'static str, kind: &'static str, template: &'static str) -> LinkTemplate {
    LinkTemplate {
        family,
        kind,
        template,
    }
}

/// Registered templates. Within a family, kinds are emitted in this order.
pub const LINK_TEMPLATES: &[LinkTemplate] = &[
    tpl("arxiv", "abstract", "https://arxiv.org/abs/{}"),
    tpl("arxiv", "pdf", "https://arxiv.org/pdf/{}.pdf"),
    tpl("pubmed", "abstract", "https://pubmed.ncbi.nlm.nih.gov/{}"),
    tpl("pmc", "abstract", "https://www.ncbi.nlm.nih.gov/pmc/articles/{}"),
    tpl("doi", "abstract", "https://doi.org/{}"),
    tpl("openreview", "abstract", "https://openreview.net/forum?id={}"),
    tpl("openreview", "pdf", "https://openreview.net/pdf?id={}"),
    tpl("dblp", "abstract", "https://dblp.uni-trier.de/rec/{}"),
    tpl("semantic_scholar", "abstract", "https://www.semanticscholar.org/paper/{}"),
];

/// Priority used when showing papers, authors and venues.
pub const DISPLAY_PRIORITY: &[&str] = &[
    "arxiv.abstract",
    "arxiv.pdf",
    "pubmed.abstract",
    "openreview.abstract",
    "openreview.pdf",
    "pmc.abstract",
    "dblp.abstract",
    "pdf",
    "doi.abstract",
    "html",
    "semantic_scholar.abstract",
    "corpusid",
    "mag",
    "xml",
    "patent",
    "unknown",
    "unknown_",
];

/// Priority for records converted from the legacy academic-graph dump. Every
/// label that dump can produce is listed.
pub const LEGACY_PRIORITY: &[&str] = &[
    "arxiv.abstract",
    "arxiv.pdf",
    "pubmed.abstract",
    "openreview.abstract",
    "openreview.pdf",
    "pmc.abstract",
    "doi.abstract",
    "pdf",
    "html",
    "mag",
    "xml",
    "patent",
    "unknown",
    "unknown_",
];

pub fn is_family(kind: &str) -> bool {
    LINK_TEMPLATES.iter().any(|t| t.family == kind)
}

pub fn templates_for<'a>(family: &'a str) -> impl Iterator<Item = &'static LinkTemplate> + 'a {
    LINK_TEMPLATES.iter().filter(move |t| t.family == family)
}

/// What to do with a label missing from the priority table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RankPolicy {
    /// Fail with [`ScienceError::UnknownLinkLabel`].
    Strict,
    /// Sort after every tabled label, keeping input order.
    Permissive,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExpandedLink {
    pub label: String,
    pub url: String,
}

/// Orders expanded links by a fixed label priority table.
#[derive(Debug, Clone)]
pub struct LinkRanker {
    priority: Vec<String>,
    policy: RankPolicy,
}

impl LinkRanker {
    pub fn new<S: Into<String>>(priority: impl IntoIterator<Item = S>, policy: RankPolicy) -> Self {
        Self {
            priority: priority.into_iter().map(Into::into).collect(),
            policy,
        }
    }

    /// Permissive ranking for record display.
    pub fn display() -> Self {
        Self::new(DISPLAY_PRIORITY.iter().copied(), RankPolicy::Permissive)
    }

    /// Strict ranking for legacy dump records.
    pub fn legacy() -> Self {
        Self::new(LEGACY_PRIORITY.iter().copied(), RankPolicy::Strict)
    }

    pub fn policy(&self) -> RankPolicy {
        self.policy
    }

    fn rank(&self, label: &str) -> Result<usize> {
        match self.priority.iter().position(|p| p == label) {
            Some(idx) => Ok(idx),
            None => match self.policy {
                RankPolicy::Strict => Err(ScienceError::UnknownLinkLabel(label.to_string())),
                RankPolicy::Permissive => Ok(self.priority.len()),
            },
        }
    }

    /// Expands template families and sorts the result by priority.
    pub fn expand<'a, I>(&self, links: I) -> Result<Vec<ExpandedLink>>
    where
        I: IntoIterator<Item = &'a Link>,
    {
        let mut ranked = Vec::new();
        for expanded in links.into_iter().flat_map(expand_one) {
            let rank = self.rank(&expanded.label)?;
            ranked.push((rank, expanded));
        }
        ranked.sort_by_key(|(rank, _)| *rank);
        Ok(ranked.into_iter().map(|(_, link)| link).collect())
    }
}

impl Default for LinkRanker {
    fn default() -> Self {
        Self::display()
    }
}

fn expand_one(link: &Link) -> Vec<ExpandedLink> {
    if is_family(&link.kind) {
        templates_for(&link.kind)
            .map(|t| ExpandedLink {
                label: t.label(),
                url: t.render(&link.link),
            })
            .collect()
    } else {
        vec![ExpandedLink {
            label: link.kind.clone(),
            url: link.link.clone(),
        }]
    }
}

pub fn expand_links<'a, I>(links: I, ranker: &LinkRanker) -> Result<Vec<ExpandedLink>>
where
    I: IntoIterator<Item = &'a Link>,
{
    ranker.expand(links)
}

/// Highest-priority URL among `links`.
pub fn primary_url<'a, I>(links: I, ranker: &LinkRanker) -> Result<Option<String>>
where
    I: IntoIterator<Item = &'a Link>,
{
    Ok(ranker.expand(links)?.into_iter().next().map(|l| l.url))
}
