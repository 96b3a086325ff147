// crates/addressing-core/src/error.rs

//! Error taxonomy for the crate.
//!
//! Lookups that legitimately find nothing (an unknown subdivision, a country
//! without predefined data) return `Option` or empty maps instead of an error.
//! The variants below are reserved for structurally invalid input and for
//! dataset access failures.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AddressingError {
    /// A country-specific entity was requested for a code missing from the
    /// country metadata table.
    #[error("Unknown country code: {0}")]
    UnknownCountry(String),

    /// No locale candidate was present in the available set.
    #[error("Unknown locale: {0}")]
    UnknownLocale(String),

    /// A mandatory construction property was omitted.
    #[error("Missing required property {0}.")]
    MissingProperty(&'static str),

    /// A value is not a member of its closed value set.
    #[error("{value} is not a valid {kind} value.")]
    InvalidEnumValue { kind: &'static str, value: String },

    /// A field name is not a recognized address field.
    #[error("{0} is not a valid AddressField value.")]
    InvalidField(String),

    #[error("Unrecognized option {0}.")]
    UnrecognizedOption(String),

    #[error("The option `{option}` must be {expected}.")]
    InvalidOptionType {
        option: &'static str,
        expected: &'static str,
    },

    #[error("The {0} option cannot be empty.")]
    MissingOption(&'static str),

    #[error("Invalid postal code pattern {pattern:?}: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("Dataset not found: {0}")]
    NotFound(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, AddressingError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_offending_value() {
        let err = AddressingError::UnknownLocale("de".into());
        assert_eq!(err.to_string(), "Unknown locale: de");

        let err = AddressingError::InvalidEnumValue {
            kind: "PostalCodeType",
            value: "invalid".into(),
        };
        assert_eq!(err.to_string(), "invalid is not a valid PostalCodeType value.");

        let err = AddressingError::InvalidOptionType {
            option: "html",
            expected: "a boolean",
        };
        assert_eq!(err.to_string(), "The option `html` must be a boolean.");
    }
}
