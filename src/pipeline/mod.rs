//! Pipeline entry points for feed generation.
//!
//! - `run_extraction`: Pull items out of a parsed document
//! - `assemble`: Fold extracted items into a feed record
//! - `FeedService`: Request in, serialized feed out

pub mod assemble;
pub mod extract;
pub mod service;

pub use assemble::{assemble, canonical_link};
pub use extract::{run_extraction, Extraction};
pub use service::{build_feed, FeedResponse, FeedService, RenderedFeed};
