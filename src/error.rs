use std::path::PathBuf;
use thiserror::Error;

/// The primary error type for all fallible operations in the `ionkey` library.
///
/// Only two error kinds arise from the core normalization and mapping
/// operations: an unparseable formula and a missing map key. The remaining
/// variants cover loading a custom element table from disk. The type
/// implements `std::error::Error`, allowing it to be composed with other
/// error types in application code.
#[derive(Error, Debug)]
pub enum IonKeyError {
    /// Indicates that a string could not be interpreted as a chemical formula.
    ///
    /// Formula syntax errors are not transient; callers should not retry.
    /// The offending input and a short description of the first problem
    /// encountered are provided for diagnostics.
    #[error("invalid chemical formula '{formula}': {reason}")]
    InvalidFormula {
        /// The input string that failed to parse, as given by the caller.
        formula: String,
        /// A short description of why parsing failed.
        reason: String,
    },

    /// Indicates that a `FormulaMap` lookup or removal found no entry for
    /// the standardized form of the requested key.
    ///
    /// The standardized key is reported, not the raw input, since that is
    /// the form under which entries are actually stored.
    #[error("no entry for standardized formula '{0}'")]
    KeyNotFound(String),

    /// An I/O error that occurred while attempting to read an element table
    /// file.
    ///
    /// The path to the file and the underlying I/O error are provided for
    /// context.
    #[error("I/O error at path '{path}': {source}")]
    Io {
        /// The path of the file that caused the I/O error.
        path: PathBuf,
        /// The underlying `std::io::Error`.
        #[source]
        source: std::io::Error,
    },

    /// An error that occurred while parsing an element table, typically
    /// indicating invalid TOML or a structural mismatch with the expected
    /// `ElementTable` format.
    #[error("failed to deserialize TOML element table: {0}")]
    Deserialization(#[from] toml::de::Error),
}
