//! Feature reference parsing
//!
//! This module provides the [`FeatureRef`] type and the parser for single
//! colon-delimited feature references as supplied on the command line.
//! References come in four shapes, classified by segment count:
//!
//! - `name` — a feature short name
//! - `group:artifact` — the artifact segment is the feature name
//! - `group:artifact:version` — version must equal the detected runtime version
//! - `group:artifact:type:version` — type must be `esa` and version must match
//!
//! Version and type mismatches are hard errors: installing a feature built
//! for a different runtime version is unsafe, so the whole operation aborts.

use crate::errors::{ConfigError, FeatureError, Result};
use tracing::debug;

/// Suffix marking a feature reference as a packaged Subsystem Archive
pub const ESA_SUFFIX: &str = ".esa";

/// Archive type accepted in 4-segment references
pub const ESA_TYPE: &str = "esa";

/// A single validated feature reference
///
/// Identifies one feature either by short name or by archive filename.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureRef {
    /// Feature short name or archive filename; never empty
    pub name: String,
    /// True when the reference denotes a packaged archive file rather than a
    /// registry-resolvable short name
    pub archive: bool,
}

impl FeatureRef {
    /// Create a named (non-archive) feature reference
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            archive: false,
        }
    }

    /// Create an archive feature reference
    pub fn archive(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            archive: true,
        }
    }
}

/// Parse a colon-delimited feature reference string
///
/// `detect_version` supplies the runtime's product version; it is only
/// invoked for 3- and 4-segment references, so version-manifest problems do
/// not affect the shorter shapes.
///
/// # Errors
///
/// - [`ConfigError::InvalidFeatureReference`] for an empty reference or an
///   unsupported segment count
/// - [`FeatureError::VersionMismatch`] when a 3-segment version does not
///   equal the runtime version
/// - [`FeatureError::VersionOrTypeMismatch`] when a 4-segment reference has
///   a type other than `esa` or a non-matching version
/// - [`FeatureError::VersionFileUnreadable`] propagated from `detect_version`
pub fn parse_feature_reference<F>(reference: &str, detect_version: F) -> Result<FeatureRef>
where
    F: FnOnce() -> Result<String>,
{
    let trimmed = reference.trim();
    if trimmed.is_empty() {
        return Err(ConfigError::InvalidFeatureReference {
            reference: reference.to_string(),
            message: "feature reference cannot be empty".to_string(),
        }
        .into());
    }

    let segments: Vec<&str> = trimmed.split(':').collect();
    if segments.iter().any(|s| s.is_empty()) {
        return Err(ConfigError::InvalidFeatureReference {
            reference: reference.to_string(),
            message: "feature reference contains an empty segment".to_string(),
        }
        .into());
    }

    match segments.as_slice() {
        // Feature short name
        [name] => Ok(FeatureRef::named(*name)),
        // groupId:artifactId; the group is informational only
        [_group, artifact] => Ok(FeatureRef::named(*artifact)),
        // groupId:artifactId:version
        [_group, artifact, version] => {
            let runtime_version = detect_version()?;
            if *version == runtime_version {
                debug!("Version {} matches runtime, adding {}", version, artifact);
                Ok(FeatureRef::named(*artifact))
            } else {
                Err(FeatureError::VersionMismatch {
                    requested: version.to_string(),
                    runtime: runtime_version,
                }
                .into())
            }
        }
        // groupId:artifactId:type:version
        [_group, artifact, kind, version] => {
            let runtime_version = detect_version()?;
            if *kind == ESA_TYPE && *version == runtime_version {
                debug!(
                    "Type esa and version {} match runtime, adding {}",
                    version, artifact
                );
                Ok(FeatureRef::named(*artifact))
            } else {
                Err(FeatureError::VersionOrTypeMismatch {
                    reference: trimmed.to_string(),
                }
                .into())
            }
        }
        _ => Err(ConfigError::InvalidFeatureReference {
            reference: reference.to_string(),
            message: format!("expected 1 to 4 colon-delimited segments, got {}", segments.len()),
        }
        .into()),
    }
}
