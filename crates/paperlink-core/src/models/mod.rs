pub mod author;
pub mod link;
pub mod paper;
pub mod record;
pub mod venue;

pub use author::*;
pub use link::*;
pub use paper::*;
pub use record::*;
pub use venue::*;
