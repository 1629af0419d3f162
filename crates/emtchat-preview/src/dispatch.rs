//! Preview routing
//!
//! [`route_preview`] deterministically selects exactly one rendering
//! strategy for a [`PreviewTarget`] without parsing file contents. The
//! routing is total: absence of required inputs always degrades to a notice
//! route rather than an error, and every route carries a dismiss affordance
//! in the consuming UI.

use tracing::debug;

use crate::source::{BlobStore, BlobUrl};
use crate::target::{DocumentKind, PreviewTarget};

/// Content source for the plain-text/markdown viewer.
#[derive(Debug)]
pub enum TextSource {
    /// A retrievable URL supplied by the caller.
    Remote {
        /// The file's source URL.
        url: String,
    },
    /// Inline text materialized as an in-memory blob. Dropping the handle
    /// (viewer close) revokes the synthesized URL.
    Synthesized {
        /// Owning handle to the synthesized `memblob://` URL.
        blob: BlobUrl,
    },
}

impl TextSource {
    /// URL the viewer loads from, regardless of origin.
    pub fn url(&self) -> &str {
        match self {
            TextSource::Remote { url } => url,
            TextSource::Synthesized { blob } => blob.url(),
        }
    }
}

/// The selected rendering strategy for one preview target.
///
/// Viewer variants name the external viewer component to mount; notice
/// variants are designed fallback states, not errors.
#[derive(Debug)]
pub enum PreviewRoute {
    /// Mount the PDF viewer on the source URL.
    Pdf {
        /// Retrievable URL of the PDF binary.
        source_url: String,
    },

    /// Mount the Word viewer on the source URL.
    Word {
        /// Retrievable URL of the document binary.
        source_url: String,
    },

    /// Mount the spreadsheet viewer on the source URL.
    Spreadsheet {
        /// Retrievable URL of the workbook binary.
        source_url: String,
    },

    /// Mount the plain-text/markdown viewer.
    PlainText {
        /// Where the viewer reads the text from.
        source: TextSource,
    },

    /// No content source is available for a previewable kind.
    OriginalRequired {
        /// File name for the notice.
        file_name: String,
        /// Kind the notice names.
        kind: DocumentKind,
    },

    /// No viewer family exists for this kind.
    Unsupported {
        /// File name for the notice.
        file_name: String,
        /// Direct download, offered only when a source URL exists.
        download_url: Option<String>,
    },
}

impl PreviewRoute {
    /// User-visible message for notice routes, `None` for viewer routes.
    pub fn notice(&self) -> Option<String> {
        match self {
            PreviewRoute::OriginalRequired { kind, .. } => Some(format!(
                "{} preview requires the original file",
                kind.display_name()
            )),
            PreviewRoute::Unsupported { .. } => {
                Some("Preview is not available for this file type".to_string())
            }
            _ => None,
        }
    }
}

/// Select the rendering strategy for `target`.
///
/// Ordered, first match wins:
/// 1. PDF with a source URL → PDF viewer; inline-text fallback; else notice.
/// 2. Word documents, same three-way fallback.
/// 3. Spreadsheets require a source URL — except csv with inline text, which
///    prefers the plain-text viewer for cleaner rendering of small tables.
/// 4. Text/markdown, or any kind with inline text, → plain-text viewer,
///    synthesizing a `memblob://` source from the text when no URL exists
///    (tagged `text/csv` for csv, `text/plain` otherwise).
/// 5. Anything else → unsupported notice, with a download action only if a
///    source URL exists.
///
/// Never panics; synthesized blobs are registered in `blobs` and owned by
/// the returned route.
pub fn route_preview(target: &PreviewTarget, blobs: &BlobStore) -> PreviewRoute {
    let route = match target.kind {
        DocumentKind::Pdf => match &target.source_url {
            Some(url) => PreviewRoute::Pdf {
                source_url: url.clone(),
            },
            None => text_or_original_required(target, blobs),
        },

        DocumentKind::Doc | DocumentKind::Docx => match &target.source_url {
            Some(url) => PreviewRoute::Word {
                source_url: url.clone(),
            },
            None => text_or_original_required(target, blobs),
        },

        // Small csv bodies render cleaner as text than through the
        // spreadsheet viewer.
        DocumentKind::Csv if target.inline_text.is_some() => {
            text_or_original_required(target, blobs)
        }

        DocumentKind::Xls | DocumentKind::Xlsx | DocumentKind::Csv => match &target.source_url {
            Some(url) => PreviewRoute::Spreadsheet {
                source_url: url.clone(),
            },
            None => text_or_original_required(target, blobs),
        },

        DocumentKind::Txt | DocumentKind::Markdown => text_or_original_required(target, blobs),

        DocumentKind::Other => {
            if target.inline_text.is_some() {
                text_or_original_required(target, blobs)
            } else {
                PreviewRoute::Unsupported {
                    file_name: target.file_name.clone(),
                    download_url: target.source_url.clone(),
                }
            }
        }
    };

    debug!(
        file_name = %target.file_name,
        kind = ?target.kind,
        route = ?route_label(&route),
        "Routed preview"
    );
    route
}

/// Plain-text route preferring inline text, falling back to the source URL,
/// degrading to the original-file notice when neither exists.
fn text_or_original_required(target: &PreviewTarget, blobs: &BlobStore) -> PreviewRoute {
    if let Some(text) = &target.inline_text {
        let mime = match target.kind {
            DocumentKind::Csv => "text/csv",
            _ => "text/plain",
        };
        let blob = blobs.create(text.clone().into_bytes(), mime);
        return PreviewRoute::PlainText {
            source: TextSource::Synthesized { blob },
        };
    }

    if let Some(url) = &target.source_url {
        return PreviewRoute::PlainText {
            source: TextSource::Remote { url: url.clone() },
        };
    }

    PreviewRoute::OriginalRequired {
        file_name: target.file_name.clone(),
        kind: target.kind,
    }
}

fn route_label(route: &PreviewRoute) -> &'static str {
    match route {
        PreviewRoute::Pdf { .. } => "pdf",
        PreviewRoute::Word { .. } => "word",
        PreviewRoute::Spreadsheet { .. } => "spreadsheet",
        PreviewRoute::PlainText { .. } => "plain-text",
        PreviewRoute::OriginalRequired { .. } => "original-required",
        PreviewRoute::Unsupported { .. } => "unsupported",
    }
}
