//! Dependency feature scanning
//!
//! Extracts feature names from already-resolved project dependency metadata.
//! A dependency contributes a feature when its declared type is `esa`. Pure
//! transformation; no filesystem or network access.

use crate::feature_ref::ESA_TYPE;
use indexmap::IndexSet;
use tracing::debug;

/// One project dependency descriptor, as supplied by the host build tool
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencyRef {
    /// Artifact identifier; becomes the feature name when the type is `esa`
    pub artifact_id: String,
    /// Declared dependency type (e.g. `esa`, `jar`)
    pub kind: String,
}

impl DependencyRef {
    pub fn new(artifact_id: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            artifact_id: artifact_id.into(),
            kind: kind.into(),
        }
    }
}

/// Collect the artifact ids of all dependencies declared with type `esa`
pub fn dependency_features(dependencies: &[DependencyRef]) -> IndexSet<String> {
    let mut result = IndexSet::new();
    for dependency in dependencies {
        if dependency.kind == ESA_TYPE {
            debug!("Dependency feature: {}", dependency.artifact_id);
            result.insert(dependency.artifact_id.clone());
        }
    }
    result
}
