//! Preview targets and document kinds
//!
//! A [`PreviewTarget`] describes one file the chat or document-list UI wants
//! previewed: its name, its normalized kind, and whichever content sources
//! are available (a retrievable source URL, inline text, both, or neither).

use serde::{Deserialize, Serialize};

/// Normalized document kind, parsed from a type token or file extension.
///
/// The set is closed so routing matches are exhaustive; anything the product
/// has no viewer family for is [`DocumentKind::Other`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentKind {
    /// PDF document
    Pdf,
    /// Legacy Word document
    Doc,
    /// Word document
    Docx,
    /// Legacy Excel spreadsheet
    Xls,
    /// Excel spreadsheet
    Xlsx,
    /// Comma-separated values
    Csv,
    /// Plain text
    Txt,
    /// Markdown
    #[serde(rename = "md", alias = "markdown")]
    Markdown,
    /// Anything without a dedicated viewer family
    #[serde(other)]
    Other,
}

impl DocumentKind {
    /// Parse a kind from a type token. Matching is case-insensitive.
    pub fn from_token(token: &str) -> Self {
        match token.to_lowercase().as_str() {
            "pdf" => DocumentKind::Pdf,
            "doc" => DocumentKind::Doc,
            "docx" => DocumentKind::Docx,
            "xls" => DocumentKind::Xls,
            "xlsx" => DocumentKind::Xlsx,
            "csv" => DocumentKind::Csv,
            "txt" => DocumentKind::Txt,
            "md" | "markdown" => DocumentKind::Markdown,
            _ => DocumentKind::Other,
        }
    }

    /// Parse a kind from a file name's extension.
    pub fn from_file_name(name: &str) -> Self {
        match name.rsplit_once('.') {
            Some((_, extension)) => Self::from_token(extension),
            None => DocumentKind::Other,
        }
    }

    /// Human-readable name used in notice messages.
    pub fn display_name(&self) -> &'static str {
        match self {
            DocumentKind::Pdf => "PDF",
            DocumentKind::Doc | DocumentKind::Docx => "Word document",
            DocumentKind::Xls | DocumentKind::Xlsx => "Spreadsheet",
            DocumentKind::Csv => "CSV",
            DocumentKind::Txt => "Text",
            DocumentKind::Markdown => "Markdown",
            DocumentKind::Other => "File",
        }
    }
}

/// Input to the preview dispatcher: one file and its available sources.
///
/// At least one of `source_url` / `inline_text` should be present for any
/// previewable kind; when neither is, routing resolves to a notice rather
/// than an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewTarget {
    /// File name shown in the viewer chrome
    pub file_name: String,

    /// Normalized document kind
    pub kind: DocumentKind,

    /// URL the file's binary content can be retrieved from, if any
    #[serde(default)]
    pub source_url: Option<String>,

    /// Inline text content, if any (extracted text, chat attachments)
    #[serde(default)]
    pub inline_text: Option<String>,
}

impl PreviewTarget {
    /// Create a target with an explicit type token.
    pub fn new(file_name: impl Into<String>, type_token: &str) -> Self {
        Self {
            file_name: file_name.into(),
            kind: DocumentKind::from_token(type_token),
            source_url: None,
            inline_text: None,
        }
    }

    /// Create a target, deriving the kind from the file extension.
    pub fn from_file_name(file_name: impl Into<String>) -> Self {
        let file_name = file_name.into();
        let kind = DocumentKind::from_file_name(&file_name);
        Self {
            file_name,
            kind,
            source_url: None,
            inline_text: None,
        }
    }

    /// Attach a source URL.
    pub fn with_source_url(mut self, url: impl Into<String>) -> Self {
        self.source_url = Some(url.into());
        self
    }

    /// Attach inline text content.
    pub fn with_inline_text(mut self, text: impl Into<String>) -> Self {
        self.inline_text = Some(text.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_parsing_is_case_insensitive() {
        assert_eq!(DocumentKind::from_token("PDF"), DocumentKind::Pdf);
        assert_eq!(DocumentKind::from_token("Docx"), DocumentKind::Docx);
        assert_eq!(DocumentKind::from_token("markdown"), DocumentKind::Markdown);
        assert_eq!(DocumentKind::from_token("md"), DocumentKind::Markdown);
        assert_eq!(DocumentKind::from_token("zip"), DocumentKind::Other);
        assert_eq!(DocumentKind::from_token(""), DocumentKind::Other);
    }

    #[test]
    fn test_kind_from_file_name() {
        assert_eq!(DocumentKind::from_file_name("intake-form.PDF"), DocumentKind::Pdf);
        assert_eq!(DocumentKind::from_file_name("notes.tar.gz"), DocumentKind::Other);
        assert_eq!(DocumentKind::from_file_name("README"), DocumentKind::Other);
        assert_eq!(DocumentKind::from_file_name("labs.csv"), DocumentKind::Csv);
    }

    #[test]
    fn test_builder() {
        let target = PreviewTarget::from_file_name("protocol.md")
            .with_source_url("https://files.example.com/protocol.md")
            .with_inline_text("# Protocol");

        assert_eq!(target.kind, DocumentKind::Markdown);
        assert!(target.source_url.is_some());
        assert!(target.inline_text.is_some());
    }

    #[test]
    fn test_wire_decoding() {
        let json = r#"{"fileName":"report.pdf","kind":"pdf","sourceUrl":"blob://x"}"#;
        let target: PreviewTarget = serde_json::from_str(json).unwrap();
        assert_eq!(target.kind, DocumentKind::Pdf);
        assert_eq!(target.source_url.as_deref(), Some("blob://x"));
        assert!(target.inline_text.is_none());
    }

    #[test]
    fn test_unknown_kind_decodes_as_other() {
        let json = r#"{"fileName":"scan.heic","kind":"heic"}"#;
        let target: PreviewTarget = serde_json::from_str(json).unwrap();
        assert_eq!(target.kind, DocumentKind::Other);
    }
}
