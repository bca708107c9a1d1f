//! Service layer for html2feed.
//!
//! This module contains the business logic for:
//! - Request parameter parsing (`parse_request`)
//! - Item extraction (`ItemExtractor`)
//! - Feed serialization (`write_feed`)

pub mod items;
pub mod spec;
pub mod writer;

pub use items::ItemExtractor;
pub use spec::{parse_item_spec, parse_request};
pub use writer::write_feed;
