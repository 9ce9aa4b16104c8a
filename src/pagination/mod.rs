//! Pagination module
//!
//! Supports: Link Header, Next Page URL, Next Page Token, Offset,
//! Persistent Token, Persistent Link
//!
//! # Overview
//!
//! Each paging strategy needs a different subset of settings. The
//! [`PollerPaging`] enum carries exactly that subset per variant, and
//! [`paging_document`] projects it into the instance `paging` block,
//! returning `None` when the connector does not page at all.

mod project;
mod types;

pub use project::paging_document;
pub use types::PollerPaging;
