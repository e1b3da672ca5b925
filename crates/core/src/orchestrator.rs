//! Installation orchestration
//!
//! Top-level control flow for one install run: validate prerequisites,
//! gather feature references from every input channel, pick exactly one
//! installation strategy, and invoke it. A run terminates in one of three
//! outcomes: installed, skipped, or failed (the `Err` arm of the returned
//! `Result`).
//!
//! The run owns its [`FeatureSet`] for the whole invocation; nothing here is
//! shared across concurrent runs, and the target directory is only read.
//! Writes are the installer capability's responsibility.

use crate::dependencies::{dependency_features, DependencyRef};
use crate::errors::{ConfigError, FeatureError, Result};
use crate::feature_ref::parse_feature_reference;
use crate::feature_set::{combine, FeatureSet};
use crate::installer::{
    FeatureInstaller, InstallerAcquisition, InstallerProvider, LegacyInstallRequest,
    LegacyInstaller,
};
use crate::runtime::RuntimeInstallation;
use crate::server_config::parse_server_xml;
use std::path::PathBuf;
use tracing::{debug, info, instrument};

/// Terminal outcome of a successful run; failures are the `Err` arm
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstallOutcome {
    /// An installation strategy ran to completion
    Installed,
    /// The run was deliberately not performed (skip flag, or no feature
    /// configuration when the full installer was unavailable)
    Skipped,
}

/// Inputs for one install run
#[derive(Debug, Default)]
pub struct InstallFeaturesRequest {
    /// Globally disable the operation
    pub skip: bool,
    /// Explicitly declared feature configuration; `None` when the caller
    /// never asked for feature installation
    pub features: Option<FeatureSet>,
    /// Single colon-delimited feature reference (CLI channel)
    pub single_feature: Option<String>,
    /// Path to a server configuration document listing required features
    pub server_xml: Option<PathBuf>,
    /// Whether this invocation runs without a backing project descriptor
    pub standalone: bool,
    /// License acceptance supplied as a CLI parameter, distinct from the
    /// declared configuration's flag
    pub accept_license: Option<bool>,
    /// Project dependency metadata
    pub dependencies: Vec<DependencyRef>,
    /// Target server directory scanned for already-installed features
    pub server_dir: Option<PathBuf>,
    /// Server identity for the legacy installer
    pub server_name: String,
    /// User directory for the legacy installer
    pub user_dir: Option<PathBuf>,
    /// Output directory for the legacy installer
    pub output_dir: Option<PathBuf>,
}

/// Run one feature installation end to end
///
/// Control flow:
/// 1. Honor the skip flag with no side effects.
/// 2. Substitute an empty declared configuration when none was supplied,
///    remembering that fact for the fallback decision.
/// 3. Fail fast when the installation root does not exist.
/// 4. In standalone mode, validate license acceptance and parse the CLI
///    feature reference and server configuration document.
/// 5. Attempt to acquire the full installer; when its prerequisites are
///    unavailable, either skip (nothing was declared) or fall back to the
///    legacy installer.
/// 6. On the normal path, combine plugin-listed, dependency-derived, and
///    already-installed features and invoke a single install.
#[instrument(level = "debug", skip_all, fields(install_root = %runtime.root().display()))]
pub fn install_features<P, L>(
    runtime: &RuntimeInstallation,
    request: InstallFeaturesRequest,
    provider: &P,
    legacy: &L,
) -> Result<InstallOutcome>
where
    P: InstallerProvider,
    L: LegacyInstaller,
{
    if request.skip {
        info!("Feature installation skipped");
        return Ok(InstallOutcome::Skipped);
    }

    // When no features configuration was supplied, remember that: if the
    // full installer turns out to be unavailable, installation is skipped
    // rather than silently requiring license acceptance the caller never
    // gave. An empty configuration keeps downstream logic uniform.
    let no_features_section = request.features.is_none();
    let mut features = request.features.clone().unwrap_or_default();

    if !runtime.exists() {
        return Err(FeatureError::InstallRootMissing {
            path: runtime.root().display().to_string(),
        }
        .into());
    }

    if request.standalone {
        debug!("Running standalone, gathering command line features");
        validate_standalone_parameters(&request)?;
        add_command_line_features(runtime, &request, &mut features)?;
    }

    let accept_license = features.accept_license || request.accept_license.unwrap_or(false);
    let (named, archives) = features.split_by_archive();

    let installer = match provider.acquire(
        runtime.root(),
        features.from.as_deref(),
        features.to.as_deref(),
        &archives,
    )? {
        InstallerAcquisition::Available(installer) => installer,
        InstallerAcquisition::PrereqUnavailable { reason } => {
            debug!("Full installer unavailable: {}", reason);
            if no_features_section {
                debug!(
                    "Skipping feature installation because no features \
                     configuration was supplied"
                );
                return Ok(InstallOutcome::Skipped);
            }
            debug!("Installing features via the legacy installer");
            legacy.install(&LegacyInstallRequest {
                install_root: runtime.root(),
                server_name: &request.server_name,
                user_dir: request.user_dir.as_deref(),
                output_dir: request.output_dir.as_deref(),
                accept_license,
                features: features.names(),
                from: features.from.as_deref(),
                to: features.to.as_deref(),
                when_file_exists: features.when_file_exists,
            })?;
            return Ok(InstallOutcome::Installed);
        }
    };

    let dependency_derived = dependency_features(&request.dependencies);
    let installed = match &request.server_dir {
        Some(dir) if dir.exists() => Some(installer.scan_installed(dir)?),
        _ => None,
    };

    let to_install: Vec<String> = combine(&named, &dependency_derived, installed.as_ref())
        .into_iter()
        .collect();
    debug!("Combined features to install: {:?}", to_install);

    installer.install(accept_license, &to_install)?;
    Ok(InstallOutcome::Installed)
}

/// Standalone runs must carry license acceptance and at least one feature
/// source before any installer is touched
fn validate_standalone_parameters(request: &InstallFeaturesRequest) -> Result<()> {
    match request.accept_license {
        None => return Err(ConfigError::MissingLicenseParameter.into()),
        Some(false) => return Err(ConfigError::LicenseNotAccepted.into()),
        Some(true) => {}
    }

    let has_feature = request
        .single_feature
        .as_deref()
        .is_some_and(|f| !f.is_empty());
    if !has_feature && request.server_xml.is_none() {
        return Err(ConfigError::MissingFeatureSource.into());
    }

    Ok(())
}

/// Parse the single CLI reference and the server configuration document into
/// the working feature set
fn add_command_line_features(
    runtime: &RuntimeInstallation,
    request: &InstallFeaturesRequest,
    features: &mut FeatureSet,
) -> Result<()> {
    if let Some(reference) = request.single_feature.as_deref() {
        if !reference.is_empty() {
            let parsed = parse_feature_reference(reference, || runtime.detect_version())?;
            features.add(parsed);
        }
    }

    if let Some(server_xml) = &request.server_xml {
        for feature in parse_server_xml(server_xml)? {
            features.add(feature);
        }
    }

    Ok(())
}
