use std::collections::{BTreeSet, HashMap, VecDeque};
use std::sync::Arc;

use futures::StreamExt;
use paperlink_core::{Author, DisambiguationConfig, LinkStatus, Paper, Researcher};
use tracing::{debug, warn};

use crate::disambiguation::index::{IdentityIndex, PriorDecisions};
use crate::disambiguation::progress::{CandidateReport, ProgressObserver, TracingObserver};
use crate::disambiguation::source::{Candidate, CandidateSource};
use crate::error::{Result, ScienceError};

/// Co-authors of a candidate that are already known, per known name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Overlap {
    buckets: HashMap<String, usize>,
}

impl Overlap {
    /// Counts, over all `papers`, the authors whose `index.scheme()` id is in
    /// the index. An author appearing on several papers counts once per paper.
    pub fn compute(papers: &[Paper], index: &IdentityIndex) -> Self {
        let mut buckets: HashMap<String, usize> = HashMap::new();
        for paper in papers {
            for pa in &paper.authors {
                for id in pa.author.ids_of(index.scheme()) {
                    if let Some(name) = index.get(id) {
                        *buckets.entry(name.to_string()).or_default() += 1;
                    }
                }
            }
        }
        Self { buckets }
    }

    pub fn total(&self) -> usize {
        self.buckets.values().sum()
    }

    pub fn get(&self, name: &str) -> usize {
        self.buckets.get(name).copied().unwrap_or(0)
    }

    pub fn buckets(&self) -> &HashMap<String, usize> {
        &self.buckets
    }

    /// Buckets by descending count, ties by name.
    pub fn sorted(&self) -> Vec<(String, usize)> {
        let mut out: Vec<(String, usize)> =
            self.buckets.iter().map(|(k, v)| (k.clone(), *v)).collect();
        out.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        out
    }
}

#[derive(Debug, Clone)]
pub struct ScoredCandidate {
    pub author: Author,
    pub papers: Vec<Paper>,
    pub overlap: Overlap,
}

impl ScoredCandidate {
    pub fn score(candidate: Candidate, index: &IdentityIndex) -> Self {
        let overlap = Overlap::compute(&candidate.papers, index);
        Self {
            author: candidate.author,
            papers: candidate.papers,
            overlap,
        }
    }

    fn rank_key(&self) -> (usize, usize) {
        (self.overlap.total(), self.papers.len())
    }
}

/// Sorts by descending `(overlap, paper count)`. Ties keep their order.
pub fn rank(candidates: &mut [ScoredCandidate]) {
    candidates.sort_by(|a, b| b.rank_key().cmp(&a.rank_key()));
}

/// Finds and ranks external profiles that may belong to a researcher.
#[derive(Clone)]
pub struct Disambiguator {
    scheme: String,
    minimum: Option<usize>,
    observer: Arc<dyn ProgressObserver>,
}

impl Disambiguator {
    pub fn new(scheme: impl Into<String>) -> Self {
        Self {
            scheme: scheme.into(),
            minimum: None,
            observer: Arc::new(TracingObserver),
        }
    }

    pub fn from_config(cfg: &DisambiguationConfig) -> Self {
        Self::new(cfg.scheme.clone()).with_minimum(cfg.minimum_papers)
    }

    /// Candidates need strictly more than `minimum` papers. `None` and `0`
    /// keep everyone.
    pub fn with_minimum(mut self, minimum: Option<usize>) -> Self {
        self.minimum = minimum.filter(|m| *m > 0);
        self
    }

    pub fn with_observer(mut self, observer: Arc<dyn ProgressObserver>) -> Self {
        self.observer = observer;
        self
    }

    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    /// Queries `source` for `target` and ranks what comes back against the
    /// ids known from `roster`.
    ///
    /// Every candidate is fetched and scored before this returns; the papers
    /// are then handed out lazily by the returned iterator.
    pub async fn candidates<S>(
        &self,
        roster: &[Researcher],
        target: &Researcher,
        source: &S,
    ) -> Result<RankedCandidates>
    where
        S: CandidateSource + ?Sized,
    {
        let index = IdentityIndex::build(roster, &self.scheme);
        let priors = PriorDecisions::for_researcher(target, &self.scheme);
        debug!(
            scheme = %self.scheme,
            known_ids = index.len(),
            rejected = priors.rejected().len(),
            "identity index built for {}",
            target.name
        );

        let mut scored = Vec::new();
        let mut results = source.query_name(&target.name);
        while let Some(candidate) = results.next().await {
            let candidate = candidate?;
            if let Some(minimum) = self.minimum
                && candidate.papers.len() <= minimum
            {
                continue;
            }
            scored.push(ScoredCandidate::score(candidate, &index));
        }
        rank(&mut scored);

        Ok(RankedCandidates {
            researcher: target.name.clone(),
            scheme: self.scheme.clone(),
            priors,
            observer: Arc::clone(&self.observer),
            pending: scored.into(),
            current: None,
        })
    }
}

/// One paper of a ranked candidate, ready for review.
#[derive(Debug, Clone)]
pub struct CandidateMatch {
    pub author: Arc<Author>,
    pub candidate_id: String,
    pub paper: Paper,
    /// What the researcher's own links already say about `candidate_id`.
    pub prior: LinkStatus,
    pub overlap: usize,
}

impl CandidateMatch {
    pub fn is_rejected(&self) -> bool {
        self.prior == LinkStatus::Rejected
    }
}

struct OpenCandidate {
    author: Arc<Author>,
    id: String,
    prior: LinkStatus,
    overlap: usize,
    papers: std::vec::IntoIter<Paper>,
}

/// Ranked candidates, yielded paper by paper.
///
/// Single pass: nothing is recomputed and dropping the iterator ends all
/// work. A candidate without exactly one id of the session scheme yields one
/// `Err` and is skipped.
pub struct RankedCandidates {
    researcher: String,
    scheme: String,
    priors: PriorDecisions,
    observer: Arc<dyn ProgressObserver>,
    pending: VecDeque<ScoredCandidate>,
    current: Option<OpenCandidate>,
}

impl RankedCandidates {
    pub fn researcher(&self) -> &str {
        &self.researcher
    }

    /// Candidates not yet opened, in rank order.
    pub fn pending(&self) -> impl Iterator<Item = &ScoredCandidate> {
        self.pending.iter()
    }

    fn open(&self, candidate: ScoredCandidate) -> Result<OpenCandidate> {
        let ids: Vec<&str> = candidate.author.ids_of(&self.scheme).collect();
        let id = match ids.as_slice() {
            [id] => id.to_string(),
            _ => {
                warn!(
                    candidate = %candidate.author.name,
                    found = ids.len(),
                    "skipping candidate without a unique {} id",
                    self.scheme
                );
                return Err(ScienceError::ContractViolation {
                    scheme: self.scheme.clone(),
                    found: ids.len(),
                });
            }
        };

        let mut aliases: BTreeSet<String> = candidate.author.aliases.iter().cloned().collect();
        aliases.insert(candidate.author.name.clone());
        aliases.remove(&self.researcher);

        let mut papers: Vec<(Option<i32>, usize, Paper)> = candidate
            .papers
            .into_iter()
            .enumerate()
            .map(|(i, p)| (p.year(), i, p))
            .collect();
        papers.sort_by(|a, b| (b.0, b.1).cmp(&(a.0, a.1)));

        let years = papers.iter().filter_map(|(y, _, _)| *y);
        let start_year = years.clone().min();
        let end_year = years.max();

        let report = CandidateReport {
            researcher: self.researcher.clone(),
            candidate_id: id.clone(),
            paper_count: papers.len(),
            overlap: candidate.overlap.sorted(),
            aliases: aliases.into_iter().collect(),
            start_year,
            end_year,
        };
        self.observer.candidate(&report);

        Ok(OpenCandidate {
            author: Arc::new(candidate.author),
            prior: self.priors.status_of(&id),
            id,
            overlap: candidate.overlap.total(),
            papers: papers
                .into_iter()
                .map(|(_, _, p)| p)
                .collect::<Vec<_>>()
                .into_iter(),
        })
    }
}

impl Iterator for RankedCandidates {
    type Item = Result<CandidateMatch>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(current) = self.current.as_mut() {
                if let Some(paper) = current.papers.next() {
                    return Some(Ok(CandidateMatch {
                        author: Arc::clone(&current.author),
                        candidate_id: current.id.clone(),
                        paper,
                        prior: current.prior,
                        overlap: current.overlap,
                    }));
                }
                self.current = None;
            }

            let candidate = self.pending.pop_front()?;
            if candidate.papers.is_empty() {
                continue;
            }
            match self.open(candidate) {
                Ok(open) => self.current = Some(open),
                Err(e) => return Some(Err(e)),
            }
        }
    }
}
