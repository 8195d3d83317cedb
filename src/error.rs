//! Error types for icon resolution and catalog loading

use ariadne::{Color, Label, Report, ReportKind, Source};
use thiserror::Error;

use crate::catalog::Variant;

/// Byte range in source text
pub type Span = std::ops::Range<usize>;

/// Errors raised while resolving or caching an icon.
///
/// Every variant is a caller or catalog-data mistake; none of them is
/// transient, so nothing here is worth retrying.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum IconError {
    /// Icon name was empty
    #[error("icon name must not be empty")]
    EmptyName,

    /// Name or variant was given as something other than a string or symbol
    #[error("{what} must be a string or symbol, got {found}")]
    InvalidIdentifier { what: &'static str, found: String },

    /// No icon with this name in the catalog
    #[error("unknown icon '{name}'")]
    UnknownIcon { name: String },

    /// Variant name is not one this crate knows about
    #[error("unknown variant '{variant}' (expected one of: {})", Variant::ALL_NAMES.join(", "))]
    UnknownVariant { variant: String },

    /// Icon exists but lacks data for the requested variant
    #[error("icon '{name}' has no '{variant}' variant (available: {})", available.join(", "))]
    UnsupportedVariant {
        name: String,
        variant: String,
        available: Vec<String>,
    },

    /// Preload batch was not a list, had the wrong length, or held a malformed item
    #[error("invalid preload batch: {reason}")]
    InvalidBatch { reason: String },
}

impl IconError {
    /// All icon errors are argument errors; kept for callers that branch on the kind
    pub fn is_invalid_argument(&self) -> bool {
        true
    }

    pub(crate) fn batch(reason: impl Into<String>) -> Self {
        Self::InvalidBatch {
            reason: reason.into(),
        }
    }
}

/// Errors that can occur when loading a catalog
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse catalog JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to parse catalog TOML: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("invalid catalog entry '{icon}': {reason}")]
    Invalid { icon: String, reason: String },

    #[error("unsupported catalog file extension: {extension:?}")]
    UnknownFormat { extension: Option<String> },
}

impl CatalogError {
    /// Byte range of the offending text in the catalog source, when known
    pub fn span(&self, source: &str) -> Option<Span> {
        match self {
            CatalogError::Toml(err) => err.span(),
            CatalogError::Json(err) => {
                let start = offset_of(source, err.line(), err.column())?;
                let end = (start + 1).min(source.len());
                Some(start..end)
            }
            _ => None,
        }
    }

    /// Format the error with source context using ariadne
    ///
    /// Falls back to the plain message when the error carries no position.
    pub fn format(&self, source: &str, filename: &str) -> String {
        let Some(span) = self.span(source) else {
            return self.to_string();
        };

        let message = match self {
            CatalogError::Toml(err) => err.message().to_string(),
            other => other.to_string(),
        };

        let mut buf = Vec::new();
        let written = Report::build(ReportKind::Error, filename, span.start)
            .with_message("invalid icon catalog")
            .with_label(
                Label::new((filename, span))
                    .with_message(message)
                    .with_color(Color::Red),
            )
            .finish()
            .write((filename, Source::from(source)), &mut buf);

        match written {
            Ok(()) => String::from_utf8_lossy(&buf).into_owned(),
            Err(_) => self.to_string(),
        }
    }
}

/// Errors that can occur when loading render configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config TOML: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Convert serde_json's 1-based line/column into a byte offset
fn offset_of(source: &str, line: usize, column: usize) -> Option<usize> {
    if line == 0 {
        return None;
    }
    let mut offset = 0;
    for (index, text) in source.split_inclusive('\n').enumerate() {
        if index + 1 == line {
            let column = column.saturating_sub(1).min(text.len());
            return Some(offset + column);
        }
        offset += text.len();
    }
    Some(source.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offset_of_first_line() {
        assert_eq!(offset_of("abc\ndef", 1, 2), Some(1));
    }

    #[test]
    fn test_offset_of_second_line() {
        assert_eq!(offset_of("abc\ndef", 2, 1), Some(4));
    }

    #[test]
    fn test_offset_of_unknown_line() {
        assert_eq!(offset_of("abc", 0, 0), None);
    }

    #[test]
    fn test_unknown_variant_message_lists_choices() {
        let err = IconError::UnknownVariant {
            variant: "blarf".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "unknown variant 'blarf' (expected one of: outline, solid, mini, micro)"
        );
    }

    #[test]
    fn test_format_without_span_is_plain_message() {
        let err = CatalogError::Invalid {
            icon: "x".to_string(),
            reason: "width must be positive".to_string(),
        };
        assert_eq!(
            err.format("{}", "catalog.json"),
            "invalid catalog entry 'x': width must be positive"
        );
    }

    #[test]
    fn test_format_toml_error_mentions_filename() {
        let source = "[x\nname = 1";
        let err = CatalogError::from(toml::from_str::<toml::Table>(source).unwrap_err());
        let report = err.format(source, "catalog.toml");
        assert!(report.contains("catalog.toml"));
    }
}
