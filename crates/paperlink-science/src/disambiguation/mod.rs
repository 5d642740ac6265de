pub mod index;
pub mod progress;
pub mod scorer;
pub mod sink;
pub mod source;

pub use index::{IdentityIndex, PriorDecisions, RosterFilter};
pub use progress::{CandidateReport, NoopObserver, ProgressObserver, TracingObserver};
pub use scorer::{rank, CandidateMatch, Disambiguator, Overlap, RankedCandidates, ScoredCandidate};
pub use sink::{Decision, DecisionSink, MemoryDecisionSink, Validity};
pub use source::{Candidate, CandidateSource, StaticCandidateSource};
