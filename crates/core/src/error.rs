use std::fmt;

/// The closed set of frontend error kinds.
///
/// Every error the lexer or parser can raise falls into exactly one of
/// these; the CLI relies on `name()` for machine-readable output.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ErrorKind {
    /// The tokenizer could not classify the input at some offset.
    #[error("unrecognized character '{0}'")]
    UnrecognizedCharacter(char),

    /// An opened `(` never closes.
    #[error("missing matching parenthesis")]
    MissingParen,

    /// An opened `[` never closes.
    #[error("missing matching bracket")]
    MissingBracket,

    /// An opened `{` never closes (statement bodies and interpolation scopes).
    #[error("missing matching curly brace")]
    MissingBrace,

    /// A token sequence matches no leading expression pattern, or a
    /// required sub-range is degenerate (e.g. an empty parenthesized group).
    #[error("invalid expression: {0}")]
    InvalidExpression(String),

    /// A construct requiring a named identifier lacks one.
    #[error("missing identifier: expected {0}")]
    MissingIdentifier(String),

    /// A required literal token is absent.
    #[error("missing token: expected {0}")]
    MissingToken(String),

    /// Leftover tokens after a form has been fully consumed.
    #[error("unexpected token: {0}")]
    UnexpectedToken(String),

    /// Internal invariant violation (e.g. a zero-length interpolation scope).
    #[error("internal error: {0}")]
    Unknown(String),
}

impl ErrorKind {
    /// Stable machine-readable tag for JSON error output.
    pub fn name(&self) -> &'static str {
        match self {
            ErrorKind::UnrecognizedCharacter(_) => "unrecognized_character",
            ErrorKind::MissingParen => "missing_paren",
            ErrorKind::MissingBracket => "missing_bracket",
            ErrorKind::MissingBrace => "missing_brace",
            ErrorKind::InvalidExpression(_) => "invalid_expression",
            ErrorKind::MissingIdentifier(_) => "missing_identifier",
            ErrorKind::MissingToken(_) => "missing_token",
            ErrorKind::UnexpectedToken(_) => "unexpected_token",
            ErrorKind::Unknown(_) => "unknown",
        }
    }
}

/// A frontend error: a kind plus the file and line it originated from.
/// Immutable once raised; carries no recovery state.
#[derive(Debug, Clone, PartialEq)]
pub struct CompileError {
    pub kind: ErrorKind,
    pub file: String,
    pub line: u32,
}

impl CompileError {
    pub fn new(kind: ErrorKind, file: &str, line: u32) -> Self {
        CompileError {
            kind,
            file: file.to_owned(),
            line,
        }
    }

    /// Serialize to a JSON value for `--output json` error reporting.
    pub fn to_json_value(&self) -> serde_json::Value {
        serde_json::json!({
            "file": self.file,
            "kind": self.kind.name(),
            "line": self.line,
            "message": self.kind.to_string(),
        })
    }
}

impl fmt::Display for CompileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}: {}", self.file, self.line, self.kind)
    }
}

impl std::error::Error for CompileError {}
