//! Error types and handling
//!
//! Domain-specific error enums for feature resolution and installation.
//! The taxonomy is split into per-domain enums (Configuration, Feature) that
//! are wrapped in the crate-level [`EsactlError`] for unified handling at the
//! CLI boundary.

use thiserror::Error;

/// Configuration and parameter validation errors
///
/// All of these are fatal and abort the run before any install attempt.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The acceptLicense parameter was not supplied at all
    #[error("The acceptLicense parameter is missing.")]
    MissingLicenseParameter,

    /// The acceptLicense parameter was supplied but is false
    #[error(
        "The acceptLicense input is false. To accept the license, set acceptLicense to true."
    )]
    LicenseNotAccepted,

    /// Standalone invocation without a feature reference or a server XML path
    #[error("Missing feature or serverXmlFile parameter.")]
    MissingFeatureSource,

    /// A single-feature reference with an unsupported shape
    #[error("Invalid feature reference '{reference}': {message}")]
    InvalidFeatureReference { reference: String, message: String },

    /// A supplied server configuration document that cannot be read or parsed
    #[error("The server xml is invalid: {path}: {message}")]
    InvalidServerXml { path: String, message: String },
}

/// Feature resolution and installation errors
#[derive(Error, Debug)]
pub enum FeatureError {
    /// A 3-segment reference whose version does not equal the runtime version
    #[error(
        "Feature version doesn't match runtime version: requested {requested}, runtime is {runtime}"
    )]
    VersionMismatch { requested: String, runtime: String },

    /// A 4-segment reference whose type is not `esa` or whose version does not match
    #[error("Feature version doesn't match runtime version or type is not esa: {reference}")]
    VersionOrTypeMismatch { reference: String },

    /// The runtime version manifest cannot be opened or lacks the product version key
    #[error("Cannot read runtime version from {path}: {message}")]
    VersionFileUnreadable { path: String, message: String },

    /// The target runtime's home directory does not exist
    #[error("Runtime installation directory does not exist: {path}")]
    InstallRootMissing { path: String },

    /// Hard failure from an installer capability
    #[error("Feature installation failed: {message}")]
    Installation { message: String },
}

/// Main error enum wrapping all domain-specific errors
#[derive(Error, Debug)]
pub enum EsactlError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Feature-related errors
    #[error("Feature error: {0}")]
    Feature(#[from] FeatureError),
}

/// Convenience type alias for Results with EsactlError
pub type Result<T> = std::result::Result<T, EsactlError>;
