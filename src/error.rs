//! Error types for parsing and compilation

use std::path::PathBuf;

use ariadne::{Color, Label, Report, ReportKind, Source};
use thiserror::Error;

/// Byte range in source text
pub type Span = std::ops::Range<usize>;

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("Parse error at {span:?}: {message}")]
    Syntax {
        span: Span,
        message: String,
        expected: Vec<String>,
    },
}

impl ParseError {
    /// Format the error with source context using ariadne
    pub fn format(&self, source: &str, filename: &str) -> String {
        let mut buf = Vec::new();
        match self {
            ParseError::Syntax {
                span,
                message,
                expected,
            } => {
                let expected_str = if expected.is_empty() {
                    String::new()
                } else {
                    format!("\nExpected: {}", expected.join(", "))
                };

                let written = Report::build(ReportKind::Error, filename, span.start)
                    .with_message(message)
                    .with_label(
                        Label::new((filename, span.clone()))
                            .with_message(format!("{}{}", message, expected_str))
                            .with_color(Color::Red),
                    )
                    .finish()
                    .write((filename, Source::from(source)), &mut buf);
                if written.is_err() {
                    return self.to_string();
                }
            }
        }
        String::from_utf8_lossy(&buf).into_owned()
    }
}

impl<'a> From<chumsky::error::Rich<'a, crate::parser::lexer::Token>> for ParseError {
    fn from(err: chumsky::error::Rich<'a, crate::parser::lexer::Token>) -> Self {
        use chumsky::error::RichReason;

        let message = match err.reason() {
            RichReason::ExpectedFound { found, .. } => {
                let found_str = match found {
                    Some(tok) => format_token(tok),
                    None => "end of input".to_string(),
                };
                format!("Unexpected {}", found_str)
            }
            RichReason::Custom(msg) => msg.to_string(),
        };

        let expected: Vec<String> = err
            .expected()
            .filter_map(|e| match e {
                chumsky::error::RichPattern::Token(tok) => Some(format_token(tok)),
                chumsky::error::RichPattern::Label(label) => Some(label.to_string()),
                chumsky::error::RichPattern::EndOfInput => Some("end of input".to_string()),
                chumsky::error::RichPattern::Identifier(s) => Some(format!("identifier '{}'", s)),
                chumsky::error::RichPattern::Any => Some("any token".to_string()),
                chumsky::error::RichPattern::SomethingElse => None,
            })
            .collect();

        ParseError::Syntax {
            span: err.span().into_range(),
            message,
            expected,
        }
    }
}

/// Format a token for human-readable error messages
fn format_token(tok: &crate::parser::lexer::Token) -> String {
    use crate::parser::lexer::Token;
    match tok {
        Token::Open => "'<'".to_string(),
        Token::CloseOpen => "'</'".to_string(),
        Token::TagEnd => "'>'".to_string(),
        Token::EmptyEnd => "'/>'".to_string(),
        Token::Equals => "'='".to_string(),
        Token::Name(s) => format!("name '{}'", s),
        Token::Value(s) => format!("value \"{}\"", s),
        Token::Text(s) => format!("text \"{}\"", s),
    }
}

fn format_parse_errors(errors: &[ParseError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Errors that abort a descriptor-to-code compilation
#[derive(Debug, Error)]
pub enum CompileError {
    /// Input path does not exist
    #[error("no such file: {}", path.display())]
    SourceNotFound { path: PathBuf },

    /// External converter missing, exited non-zero, or produced nothing
    #[error("descriptor conversion failed: {reason}")]
    ConversionFailed { reason: String },

    /// Converter output is not well-formed XML
    #[error("parse errors: {}", format_parse_errors(.0))]
    Parse(Vec<ParseError>),

    /// No top-level view under `document/objects`
    #[error("descriptor has no top-level view")]
    MissingRootView,

    /// Descriptor uses a feature the compiler does not model
    #[error("unsupported feature: {feature}")]
    UnsupportedFeature { feature: String },

    /// No handler registered for an element
    #[error("can't parse xib object: {element}")]
    UnknownObjectType { element: String },

    /// Two elements share an identifier
    #[error("duplicate identifier '{id}'")]
    DuplicateIdentifier { id: String },

    /// A constraint endpoint names no node
    #[error("constraint {constraint} references unknown identifier '{id}'")]
    DanglingReference { id: String, constraint: String },

    /// Output directory or files cannot be written
    #[error("can't write output {}: {message}", path.display())]
    OutputWriteFailed { path: PathBuf, message: String },
}

impl From<Vec<ParseError>> for CompileError {
    fn from(errors: Vec<ParseError>) -> Self {
        CompileError::Parse(errors)
    }
}

impl CompileError {
    pub fn conversion_failed(reason: impl Into<String>) -> Self {
        Self::ConversionFailed {
            reason: reason.into(),
        }
    }

    pub fn unsupported(feature: impl Into<String>) -> Self {
        Self::UnsupportedFeature {
            feature: feature.into(),
        }
    }

    pub fn unknown_object(element: impl Into<String>) -> Self {
        Self::UnknownObjectType {
            element: element.into(),
        }
    }

    pub fn duplicate_identifier(id: impl Into<String>) -> Self {
        Self::DuplicateIdentifier { id: id.into() }
    }

    pub fn dangling(id: impl Into<String>, constraint: impl Into<String>) -> Self {
        Self::DanglingReference {
            id: id.into(),
            constraint: constraint.into(),
        }
    }

    pub fn output_write_failed(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::OutputWriteFailed {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Text for the terminal: source snippets for parse errors, then the summary
    pub fn report(&self, source: &str, filename: &str) -> String {
        let mut out = String::new();
        if let CompileError::Parse(errors) = self {
            for error in errors {
                out.push_str(&error.format(source, filename));
            }
        }
        out.push_str(&format!("Error: {}\n", self));
        out
    }
}
