//! Runtime installation inspection
//!
//! Represents the on-disk runtime installation directory targeted by an
//! install run. This module only reads the installation; all mutation is
//! delegated to the installer capabilities.

use crate::errors::{FeatureError, Result};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Relative path of the version manifest inside an installation
const VERSION_MANIFEST: &str = "lib/versions/openliberty.properties";

/// Key in the version manifest holding the product version string
const PRODUCT_VERSION_KEY: &str = "com.ibm.websphere.productVersion";

/// Handle to a target runtime installation directory
///
/// Read-only for this crate: it is scanned for existence and version, never
/// mutated directly.
#[derive(Debug, Clone)]
pub struct RuntimeInstallation {
    root: PathBuf,
}

impl RuntimeInstallation {
    /// Create a handle for the given installation root
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The installation root directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Whether the installation root exists on disk
    pub fn exists(&self) -> bool {
        self.root.is_dir()
    }

    /// Detect the runtime product version from the version manifest
    ///
    /// Reads the line-oriented key=value manifest at
    /// `<root>/lib/versions/openliberty.properties` and returns the value of
    /// the first `com.ibm.websphere.productVersion` line, trimmed.
    ///
    /// Fails with [`FeatureError::VersionFileUnreadable`] when the manifest
    /// cannot be opened or the key is absent. Callers only invoke this when a
    /// version comparison is actually required.
    pub fn detect_version(&self) -> Result<String> {
        let manifest = self.root.join(VERSION_MANIFEST);

        let file = File::open(&manifest).map_err(|e| FeatureError::VersionFileUnreadable {
            path: manifest.display().to_string(),
            message: e.to_string(),
        })?;

        for line in BufReader::new(file).lines() {
            let line = line.map_err(|e| FeatureError::VersionFileUnreadable {
                path: manifest.display().to_string(),
                message: e.to_string(),
            })?;
            if let Some((key, value)) = line.split_once('=') {
                if key.trim() == PRODUCT_VERSION_KEY {
                    let version = value.trim().to_string();
                    debug!("Detected runtime version: {}", version);
                    return Ok(version);
                }
            }
        }

        Err(FeatureError::VersionFileUnreadable {
            path: manifest.display().to_string(),
            message: format!("missing {} key", PRODUCT_VERSION_KEY),
        }
        .into())
    }
}
