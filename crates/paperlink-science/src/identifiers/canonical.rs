//! Mapping of catalog URLs to `(scheme, id)` pairs.
//!
//! Patterns are tried in table order and the first one matching at the start
//! of the URL wins. Several schemes have more than one entry (mirrors, older
//! URL layouts), so the order is part of the contract.

use once_cell::sync::Lazy;
use regex::Regex;

/// Ordered `(pattern, scheme)` table. Patterns are implicitly anchored at the
/// start of the URL; trailing text is allowed unless the pattern ends in `$`.
pub const URL_PATTERNS: &[(&str, &str)] = &[
    (r"https?://[a-z.]*arxiv\.org/(?:abs|pdf)/([0-9]{4}\.[0-9]+).*", "arxiv"),
    (r"https?://[a-z.]*arxiv-vanity\.com/papers/([0-9]{4}\.[0-9]+).*", "arxiv"),
    (r"https?://(?:[^/]*)arxiv(?:[^/]*)\.cornell\.edu/abs/([0-9]{4}\.[0-9]+).*", "arxiv"),
    (r"https?://scirate\.com/arxiv/([0-9]{4}\.[0-9]+).*", "arxiv"),
    (r"https?://pubmed\.ncbi\.nlm\.nih\.gov/([^/]*)/", "pubmed"),
    (r"https?://pubmed\.ncbi\.nlm\.nih\.gov/([0-9]+)$", "pubmed"),
    (r"https?://www\.ncbi\.nlm\.nih\.gov/pubmed/([^/]*)", "pubmed"),
    (r"https?://www\.ncbi\.nlm\.nih\.gov/pmc/articles/([^/]*)", "pmc"),
    (r"https?://europepmc.org/article/PMC/([^/]*)", "pmc"),
    (r"https?://(?:dx\.)?doi\.org/(.*)", "doi"),
    (r"https?://(?:www\.)?openreview\.net/(?:pdf\?|forum\?)id=(.*)", "openreview"),
    (r"https?://(?:www\.)?openreview\.net/profile\?id=(.*)", "openreview"),
    (r"https?://dblp.uni-trier.de/db/([^/]+)/([^/]+)/[^/]+\.html#(.*)", "dblp"),
    (r"https?://dblp\.(?:uni-trier\.de|org)/rec/(.+?)(?:\.html)?$", "dblp"),
    (
        r"https?://(?:www\.)?semanticscholar\.org/paper/(?:[^/]+/)?([0-9a-f]{40})",
        "semantic_scholar",
    ),
];

static EXTRACTORS: Lazy<Vec<(Regex, &'static str)>> = Lazy::new(|| {
    URL_PATTERNS
        .iter()
        .map(|(pattern, scheme)| {
            let anchored = format!("^(?:{pattern})");
            (Regex::new(&anchored).unwrap(), *scheme)
        })
        .collect()
});

/// Returns the `(scheme, id)` named by `url`, or `None` when no pattern
/// recognizes it. Multiple capture groups are joined with `/`.
pub fn url_to_id(url: &str) -> Option<(&'static str, String)> {
    EXTRACTORS.iter().find_map(|(re, scheme)| {
        let caps = re.captures(url)?;
        let id = caps
            .iter()
            .skip(1)
            .flatten()
            .map(|m| m.as_str())
            .collect::<Vec<_>>()
            .join("/");
        Some((*scheme, id))
    })
}

/// Index in [`URL_PATTERNS`] of the first pattern matching `url`.
pub fn matching_pattern(url: &str) -> Option<usize> {
    EXTRACTORS.iter().position(|(re, _)| re.is_match(url))
}
