pub mod canonicalize;
pub mod expand;

pub use canonicalize::{canonical_pair, canonical_pairs, canonicalize_links};
pub use expand::{
    expand_links, primary_url, ExpandedLink, LinkRanker, LinkTemplate, RankPolicy,
    DISPLAY_PRIORITY, LEGACY_PRIORITY, LINK_TEMPLATES,
};
