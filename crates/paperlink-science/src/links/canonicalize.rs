use std::collections::{BTreeMap, BTreeSet};

use paperlink_core::{Link, LinkStatus};

use crate::identifiers::canonical::url_to_id;

/// Canonical `(type, link)` pair for a single raw link.
///
/// Falls back to the link's own pair when its URL is not recognized. A
/// recognized id that is itself a catalog URL is resolved again, so the
/// result is a fixed point.
pub fn canonical_pair(link: &Link) -> (String, String) {
    let Some((mut scheme, mut id)) = url_to_id(&link.link) else {
        return (link.kind.clone(), link.link.clone());
    };
    // Each match strips at least the URL prefix, so this terminates.
    while let Some((inner_scheme, inner_id)) = url_to_id(&id) {
        scheme = inner_scheme;
        id = inner_id;
    }
    (scheme.to_string(), id)
}

/// The set of canonical pairs named by `links`.
pub fn canonical_pairs<'a, I>(links: I) -> BTreeSet<(String, String)>
where
    I: IntoIterator<Item = &'a Link>,
{
    links.into_iter().map(canonical_pair).collect()
}

/// Deduplicates raw links into canonical links.
///
/// Links whose URLs canonicalize to the same pair collapse to one entry that
/// keeps the status of the first occurrence. The returned order is
/// deterministic but carries no meaning; use
/// [`expand_links`](crate::links::expand_links) for display order.
pub fn canonicalize_links<'a, I>(links: I) -> Vec<Link>
where
    I: IntoIterator<Item = &'a Link>,
{
    let mut canonical: BTreeMap<(String, String), LinkStatus> = BTreeMap::new();
    for link in links {
        canonical.entry(canonical_pair(link)).or_insert(link.status);
    }

    canonical
        .into_iter()
        .map(|((kind, link), status)| Link { kind, link, status })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    fn raw(kind: &str, link: &str) -> Link {
        Link::new(kind, link)
    }

    #[test]
    fn test_recognized_url_is_replaced() {
        let out = canonicalize_links(&[raw("html", "https://arxiv.org/abs/2101.00001")]);
        assert_eq!(out, vec![raw("arxiv", "2101.00001")]);
    }

    #[test]
    fn test_unrecognized_url_is_preserved() {
        let out = canonicalize_links(&[raw("unknown", "https://example.com/paper")]);
        assert_eq!(out, vec![raw("unknown", "https://example.com/paper")]);
    }

    #[test]
    fn test_differently_shaped_urls_collapse() {
        let links = vec![
            raw("html", "https://arxiv.org/abs/2101.00001"),
            raw("pdf", "https://arxiv.org/pdf/2101.00001v3.pdf"),
            raw("html", "https://scirate.com/arxiv/2101.00001"),
            raw("arxiv", "2101.00001"),
            raw("doi", "https://doi.org/10.1000/xyz"),
            raw("doi", "https://dx.doi.org/10.1000/xyz"),
        ];
        let out = canonicalize_links(&links);
        assert_eq!(out, vec![raw("arxiv", "2101.00001"), raw("doi", "10.1000/xyz")]);
    }

    #[test]
    fn test_no_duplicate_pairs() {
        let links = vec![
            raw("mag", "123"),
            raw("mag", "123"),
            raw("pdf", "https://example.com/a.pdf"),
            raw("pdf", "https://example.com/a.pdf"),
            raw("html", "https://www.ncbi.nlm.nih.gov/pmc/articles/PMC1"),
            raw("html", "https://europepmc.org/article/PMC/PMC1"),
        ];
        let out = canonicalize_links(&links);
        let pairs: HashSet<(&str, &str)> = out.iter().map(Link::pair).collect();
        assert_eq!(pairs.len(), out.len());
        assert_eq!(out.len(), 3);
    }

    #[test]
    fn test_idempotent() {
        let links = vec![
            raw("html", "https://openreview.net/forum?id=abc"),
            raw("pdf", "https://openreview.net/pdf?id=abc"),
            raw("html", "https://dblp.uni-trier.de/db/conf/icml/icml2020.html#Smith20"),
            raw("unknown", "https://example.com/paper"),
            raw("pubmed", "https://www.ncbi.nlm.nih.gov/pubmed/42"),
        ];
        let once = canonicalize_links(&links);
        let twice = canonicalize_links(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_nested_catalog_url_resolves_fully() {
        let links = vec![
            raw("html", "https://doi.org/https://doi.org/10.1/x"),
            raw("html", "https://openreview.net/forum?id=https://openreview.net/pdf?id=abc"),
        ];
        let once = canonicalize_links(&links);
        assert_eq!(once, vec![raw("doi", "10.1/x"), raw("openreview", "abc")]);
        assert_eq!(canonicalize_links(&once), once);
    }

    #[test]
    fn test_first_status_wins_on_collapse() {
        let links = vec![
            raw("html", "https://arxiv.org/abs/2101.00001").with_status(LinkStatus::Rejected),
            raw("arxiv", "2101.00001"),
        ];
        let out = canonicalize_links(&links);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].status, LinkStatus::Rejected);
    }

    #[test]
    fn test_canonical_pairs() {
        let links = vec![
            raw("html", "https://doi.org/10.1/a"),
            raw("doi", "10.1/a"),
        ];
        let pairs = canonical_pairs(&links);
        assert_eq!(pairs.len(), 1);
        assert!(pairs.contains(&("doi".to_string(), "10.1/a".to_string())));
    }
}
