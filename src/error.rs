//! Structural (builder-time) errors. Section 7 of the spec: "Structural"
//! failures are fatal and surfaced to the caller as invalid-input, as
//! opposed to the semantic contradictions the search recovers from on its
//! own.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum CspError {
    #[error("duplicate variable name `{0}`")]
    DuplicateVariable(String),

    #[error("constraint `{constraint}` references unknown variable `{variable}`")]
    UnknownVariable {
        constraint: String,
        variable: String,
    },

    #[error("malformed problem input: {0}")]
    MalformedInput(String),

    #[error("empty domain for variable `{0}`")]
    EmptyDomain(String),
}
