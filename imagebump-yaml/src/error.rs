//! Parse failures for the YAML subset.

use thiserror::Error;

/// Errors produced while parsing a document.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The input contains no content lines.
    #[error("document is empty")]
    EmptyDocument,

    #[error("line {line}: tab character in indentation")]
    TabIndent { line: usize },

    /// Anchors, aliases, tags, directives, explicit block-scalar indents.
    #[error("line {line}: unsupported construct: {what}")]
    Unsupported { line: usize, what: String },

    #[error("line {line}: multiple documents in one stream")]
    MultipleDocuments { line: usize },

    #[error("line {line}: content after the document root")]
    TrailingContent { line: usize },

    #[error("line {line}: unterminated quoted scalar")]
    UnterminatedQuote { line: usize },

    #[error("line {line}: invalid escape sequence")]
    BadEscape { line: usize },

    #[error("line {line}: flow collection does not close on its line")]
    UnclosedFlow { line: usize },

    #[error("line {line}: unexpected indentation")]
    BadIndent { line: usize },
}
