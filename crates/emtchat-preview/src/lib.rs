//! # EMTChat Document Preview Routing
//!
//! This crate decides which specialized viewer renders a given file in the
//! EMTChat chat and document-list surfaces. It does not parse file contents
//! and it has no error channel: every input combination maps to a defined
//! outcome, and missing inputs degrade to visible notice states.
//!
//! ## Overview
//!
//! The emtchat-preview crate handles:
//! - **Targets**: the `PreviewTarget` input model and the closed
//!   `DocumentKind` enum
//! - **Routing**: `route_preview`, the ordered first-match-wins dispatch to
//!   a viewer family or notice state
//! - **Sources**: the `BlobStore` that materializes inline text as
//!   `memblob://` URLs with scoped, drop-based release
//!
//! ## Usage
//!
//! ```rust
//! use emtchat_preview::{route_preview, BlobStore, PreviewRoute, PreviewTarget};
//!
//! let blobs = BlobStore::new();
//! let target = PreviewTarget::from_file_name("discharge-summary.pdf")
//!     .with_source_url("https://files.emtchat.app/doc/123");
//!
//! match route_preview(&target, &blobs) {
//!     PreviewRoute::Pdf { source_url } => { /* mount the PDF viewer */ }
//!     other => { /* notice or fallback */ }
//! }
//! ```
//!
//! Viewers themselves (PDF, Word, spreadsheet, plain-text/markdown) are
//! external collaborators; this crate only selects among them and hands over
//! a resolvable content source.

pub mod dispatch;
pub mod source;
pub mod target;

// Re-export main types for convenience
pub use dispatch::{route_preview, PreviewRoute, TextSource};
pub use source::{Blob, BlobStore, BlobUrl};
pub use target::{DocumentKind, PreviewTarget};
