//! Plain-text rendering of papers, authors and venues.

use std::fmt::Write;

use crossterm::style::Stylize;
use paperlink_core::{Author, DisplayConfig, Paper, Record, Venue};

use crate::error::Result;
use crate::links::{LinkRanker, RankPolicy};

const FALLBACK_WIDTH: usize = 80;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Detail {
    /// Title, authors, releases and the main URL.
    Short,
    #[default]
    Full,
}

/// Everything the renderer needs to know about its output.
#[derive(Debug, Clone)]
pub struct RenderContext {
    pub width: usize,
    pub styled: bool,
    pub detail: Detail,
    pub ranker: LinkRanker,
}

impl Default for RenderContext {
    fn default() -> Self {
        Self {
            width: FALLBACK_WIDTH,
            styled: false,
            detail: Detail::Full,
            ranker: LinkRanker::display(),
        }
    }
}

impl RenderContext {
    pub fn plain(width: usize) -> Self {
        Self {
            width,
            ..Default::default()
        }
    }

    /// Builds a context from config, asking the terminal for its width when
    /// the config does not pin one.
    pub fn from_config(cfg: &DisplayConfig) -> Self {
        let width = cfg
            .width
            .map(usize::from)
            .or_else(|| crossterm::terminal::size().ok().map(|(cols, _)| cols as usize))
            .unwrap_or(FALLBACK_WIDTH);
        let ranker = if cfg.priority.is_empty() {
            LinkRanker::display()
        } else {
            LinkRanker::new(cfg.priority.iter().cloned(), RankPolicy::Permissive)
        };
        Self {
            width,
            styled: cfg.styled,
            detail: Detail::Full,
            ranker,
        }
    }

    pub fn with_detail(mut self, detail: Detail) -> Self {
        self.detail = detail;
        self
    }

    fn title(&self, s: &str) -> String {
        if self.styled {
            s.bold().cyan().to_string()
        } else {
            s.to_string()
        }
    }

    fn strong(&self, s: &str) -> String {
        if self.styled {
            s.bold().to_string()
        } else {
            s.to_string()
        }
    }

    fn label(&self, s: &str) -> String {
        if self.styled {
            s.bold().green().to_string()
        } else {
            s.to_string()
        }
    }

    fn accent(&self, s: &str) -> String {
        if self.styled {
            s.bold().magenta().to_string()
        } else {
            s.to_string()
        }
    }

    /// Writes `title: contents`, wrapping contents to the context width.
    fn field(&self, out: &mut String, title: &str, contents: &str, strong: bool) -> Result<()> {
        let prefix_len = title.chars().count() + 2;
        let wrapped = wrap(&format!("{title}: {contents}"), self.width);
        let body: String = wrapped.chars().skip(prefix_len).collect();
        let body = if strong { self.strong(&body) } else { body };
        writeln!(out, "{} {}", self.title(&format!("{title}:")), body)?;
        Ok(())
    }
}

/// Greedy word wrap. Words longer than `width` get a line of their own.
fn wrap(text: &str, width: usize) -> String {
    let width = width.max(1);
    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        let needed = if current.is_empty() {
            word.chars().count()
        } else {
            current.chars().count() + 1 + word.chars().count()
        };
        if needed > width && !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines.join("\n")
}

/// Renders any record to text.
pub fn render(record: &Record, ctx: &RenderContext) -> Result<String> {
    let mut out = String::new();
    match record {
        Record::Paper(paper) => match ctx.detail {
            Detail::Short => render_paper_short(&mut out, paper, ctx)?,
            Detail::Full => render_paper(&mut out, paper, ctx)?,
        },
        Record::Author(author) => render_author(&mut out, author, ctx)?,
        Record::Venue(venue) => render_venue(&mut out, venue, ctx)?,
    }
    Ok(out)
}

fn render_paper_short(out: &mut String, paper: &Paper, ctx: &RenderContext) -> Result<()> {
    ctx.field(out, "Title", &paper.title, true)?;
    let names: Vec<&str> = paper.authors.iter().map(|a| a.author.name.as_str()).collect();
    ctx.field(out, "Authors", &names.join(", "), false)?;
    for release in &paper.releases {
        ctx.field(out, "Date", &release.venue.formatted_date(), false)?;
        ctx.field(out, "Venue", &release.venue.name, false)?;
    }
    if let Some(url) = crate::links::primary_url(&paper.links, &ctx.ranker)? {
        ctx.field(out, "URL", &url, false)?;
    }
    Ok(())
}

fn render_paper(out: &mut String, paper: &Paper, ctx: &RenderContext) -> Result<()> {
    ctx.field(out, "Title", &paper.title, false)?;
    ctx.field(out, "Authors", "", false)?;
    for pa in &paper.authors {
        let affiliations: Vec<&str> = pa.affiliations.iter().map(|a| a.name.as_str()).collect();
        writeln!(out, " * {:30} {}", pa.author.name, affiliations.join(", "))?;
    }
    ctx.field(out, "Abstract", paper.abstract_text.as_deref().unwrap_or(""), false)?;
    ctx.field(out, "Venue", "", false)?;
    for release in &paper.releases {
        let venue = &release.venue;
        writeln!(
            out,
            "  {} {} {}",
            ctx.label(&venue.formatted_date()),
            ctx.accent(&release.status),
            venue.name
        )?;
    }
    let topics: Vec<&str> = paper.topics.iter().map(|t| t.name.as_str()).collect();
    ctx.field(out, "Topics", &topics.join(", "), false)?;
    ctx.field(out, "Sources", "", false)?;
    for link in ctx.ranker.expand(&paper.links)? {
        writeln!(out, "  {} {}", ctx.label(&link.label), link.url)?;
    }
    let citations = paper
        .citation_count
        .map(|c| c.to_string())
        .unwrap_or_else(|| "n/a".to_string());
    ctx.field(out, "Citations", &citations, false)?;
    Ok(())
}

fn render_author(out: &mut String, author: &Author, ctx: &RenderContext) -> Result<()> {
    ctx.field(out, "Name", &author.name, true)?;
    if !author.roles.is_empty() {
        ctx.field(out, "Affiliations", "", false)?;
        for role in &author.roles {
            let end = role
                .end_date
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_else(|| "-".to_string());
            writeln!(
                out,
                "* {:20} as {:20} from {} to {}",
                role.institution.name,
                role.role,
                role.start_date.format("%Y-%m-%d"),
                end
            )?;
        }
    }
    render_links(out, &author.links, ctx)
}

fn render_venue(out: &mut String, venue: &Venue, ctx: &RenderContext) -> Result<()> {
    ctx.field(out, "Venue", &venue.name, true)?;
    ctx.field(out, "Series", venue.series.as_deref().unwrap_or(""), true)?;
    ctx.field(out, "Type", &venue.kind.to_string(), true)?;
    if !venue.aliases.is_empty() {
        ctx.field(out, "Aliases", "", false)?;
        for alias in &venue.aliases {
            writeln!(out, "* {alias}")?;
        }
    }
    ctx.field(out, "Date", &venue.formatted_date(), false)?;
    render_links(out, &venue.links, ctx)
}

fn render_links(out: &mut String, links: &[paperlink_core::Link], ctx: &RenderContext) -> Result<()> {
    ctx.field(out, "Links", "", false)?;
    for link in ctx.ranker.expand(links)? {
        writeln!(out, "  {} {}", ctx.label(&format!("{:20}", link.label)), link.url)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use paperlink_core::{Institution, Link, Role, VenueType};

    use super::*;

    fn sample_paper() -> Paper {
        let mut venue = Venue::new("NeurIPS 2017");
        venue.date = NaiveDate::from_ymd_opt(2017, 12, 4);
        let mut paper = Paper::new("Attention Is All You Need")
            .with_author(Author::new("Ashish Vaswani"))
            .with_author(Author::new("Noam Shazeer"))
            .with_release(venue);
        paper.links = vec![
            Link::new("doi", "10.5555/3295222"),
            Link::new("arxiv", "1706.03762"),
        ];
        paper.citation_count = Some(100);
        paper
    }

    #[test]
    fn test_wrap_respects_width() {
        let text = "Title: one two three four five six";
        let wrapped = wrap(text, 12);
        assert!(wrapped.lines().all(|l| l.chars().count() <= 12));
        assert_eq!(wrapped.split_whitespace().count(), 7);
    }

    #[test]
    fn test_wrap_keeps_long_words() {
        assert_eq!(wrap("abcdefghij xy", 4), "abcdefghij\nxy");
    }

    #[test]
    fn test_short_paper_view_uses_primary_url() {
        let ctx = RenderContext::plain(120).with_detail(Detail::Short);
        let text = render(&Record::Paper(sample_paper()), &ctx).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Title: Attention Is All You Need");
        assert_eq!(lines[1], "Authors: Ashish Vaswani, Noam Shazeer");
        assert_eq!(lines[2], "Date: 2017-12-04");
        assert_eq!(lines[3], "Venue: NeurIPS 2017");
        assert_eq!(lines[4], "URL: https://arxiv.org/abs/1706.03762");
    }

    #[test]
    fn test_full_paper_view_lists_sources_in_priority_order() {
        let text = render(&Record::Paper(sample_paper()), &RenderContext::plain(120)).unwrap();
        let sources: Vec<&str> = text
            .lines()
            .skip_while(|l| !l.starts_with("Sources:"))
            .skip(1)
            .take(3)
            .collect();
        assert_eq!(
            sources,
            vec![
                "  arxiv.abstract https://arxiv.org/abs/1706.03762",
                "  arxiv.pdf https://arxiv.org/pdf/1706.03762.pdf",
                "  doi.abstract https://doi.org/10.5555/3295222",
            ]
        );
        assert!(text.contains("Citations: 100"));
    }

    #[test]
    fn test_author_view() {
        let mut author = Author::new("Jane Doe").with_link(Link::new("openreview", "~Jane_Doe1"));
        author.roles.push(Role {
            institution: Institution::new("Mila"),
            role: "phd".to_string(),
            start_date: NaiveDate::from_ymd_opt(2020, 9, 1).unwrap(),
            end_date: None,
        });
        let text = render(&Record::Author(author), &RenderContext::plain(80)).unwrap();
        assert!(text.starts_with("Name: Jane Doe\n"));
        assert!(text.contains("* Mila"));
        assert!(text.contains("from 2020-09-01 to -"));
        assert!(text.contains("https://openreview.net/forum?id=~Jane_Doe1"));
    }

    #[test]
    fn test_venue_view() {
        let mut venue = Venue::new("ICML");
        venue.kind = VenueType::Conference;
        venue.aliases = vec!["International Conference on Machine Learning".to_string()];
        let text = render(&Record::Venue(venue), &RenderContext::plain(80)).unwrap();
        assert!(text.contains("Type: conference"));
        assert!(text.contains("* International Conference on Machine Learning"));
        assert!(text.contains("Date: n/a"));
    }

    #[test]
    fn test_styled_output_contains_escape_codes() {
        let ctx = RenderContext {
            styled: true,
            ..RenderContext::plain(80)
        };
        let text = render(&Record::Venue(Venue::new("ICLR")), &ctx).unwrap();
        assert!(text.contains('\u{1b}'));
    }

    #[test]
    fn test_config_priority_overrides_table() {
        let cfg = DisplayConfig {
            width: Some(60),
            styled: false,
            priority: vec!["doi.abstract".to_string()],
        };
        let ctx = RenderContext::from_config(&cfg).with_detail(Detail::Short);
        assert_eq!(ctx.width, 60);
        let text = render(&Record::Paper(sample_paper()), &ctx).unwrap();
        assert!(text.contains("URL: https://doi.org/10.5555/3295222"));
    }
}
