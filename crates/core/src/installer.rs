//! Installer capabilities
//!
//! The orchestrator depends on installation through two narrow trait
//! boundaries: [`FeatureInstaller`] (scan the target, install a feature
//! list) and [`LegacyInstaller`] (the fallback path). Constructing the full
//! installer can fail recoverably when the environment lacks its
//! prerequisites; that outcome is modeled as the explicit
//! [`InstallerAcquisition`] enum rather than an error unwound through the
//! orchestrator.
//!
//! Concrete implementations wrap the runtime's own install launchers:
//! `bin/featureUtility` for the full path and `bin/installUtility` for the
//! legacy path.

use crate::errors::{FeatureError, Result};
use crate::feature_set::WhenFileExists;
use crate::server_config::parse_server_xml;
use indexmap::IndexSet;
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::{debug, info};

/// Capability to scan a target and install a validated feature list
pub trait FeatureInstaller {
    /// Discover feature names already present on the target server directory
    fn scan_installed(&self, server_dir: &Path) -> Result<IndexSet<String>>;

    /// Install the given features; hard failures abort the run
    fn install(&self, accept_license: bool, features: &[String]) -> Result<()>;
}

/// Outcome of attempting to construct the full installer capability
///
/// `PrereqUnavailable` is a recoverable condition, not an error: the
/// orchestrator reacts by falling back to the legacy installer or skipping
/// the run entirely.
#[derive(Debug)]
pub enum InstallerAcquisition<I> {
    /// The full installer is available
    Available(I),
    /// The environment lacks the prerequisites for the full installer
    PrereqUnavailable { reason: String },
}

/// Factory for the full installer capability
pub trait InstallerProvider {
    type Installer: FeatureInstaller;

    /// Attempt to construct the full installer for the given installation
    /// root, source/target location hints, and plugin-listed archive subset
    fn acquire(
        &self,
        install_root: &Path,
        from: Option<&str>,
        to: Option<&str>,
        archives: &IndexSet<String>,
    ) -> Result<InstallerAcquisition<Self::Installer>>;
}

/// Everything the legacy installer path needs for one invocation
#[derive(Debug)]
pub struct LegacyInstallRequest<'a> {
    pub install_root: &'a Path,
    pub server_name: &'a str,
    pub user_dir: Option<&'a Path>,
    pub output_dir: Option<&'a Path>,
    pub accept_license: bool,
    pub features: Vec<String>,
    pub from: Option<&'a str>,
    pub to: Option<&'a str>,
    pub when_file_exists: WhenFileExists,
}

/// Fallback installer capability; failures are hard errors
pub trait LegacyInstaller {
    fn install(&self, request: &LegacyInstallRequest<'_>) -> Result<()>;
}

/// Full installer backed by the runtime's `bin/featureUtility` launcher
#[derive(Debug)]
pub struct UtilityInstaller {
    launcher: PathBuf,
    from: Option<String>,
    to: Option<String>,
    archives: IndexSet<String>,
}

impl UtilityInstaller {
    fn run_launcher(&self, args: &[String]) -> Result<()> {
        debug!("Running {} {}", self.launcher.display(), args.join(" "));
        let output = Command::new(&self.launcher).args(args).output().map_err(|e| {
            FeatureError::Installation {
                message: format!("failed to launch {}: {}", self.launcher.display(), e),
            }
        })?;

        if output.status.success() {
            Ok(())
        } else {
            Err(FeatureError::Installation {
                message: format!(
                    "{} exited with {}: {}",
                    self.launcher.display(),
                    output.status,
                    String::from_utf8_lossy(&output.stderr).trim()
                ),
            }
            .into())
        }
    }
}

impl FeatureInstaller for UtilityInstaller {
    fn scan_installed(&self, server_dir: &Path) -> Result<IndexSet<String>> {
        let features = parse_server_xml(&server_dir.join("server.xml"))?;
        Ok(features.into_iter().map(|f| f.name).collect())
    }

    fn install(&self, accept_license: bool, features: &[String]) -> Result<()> {
        if features.is_empty() && self.archives.is_empty() {
            // An empty combined set is a legitimate no-op install
            debug!("No features to install");
            return Ok(());
        }

        let mut args = vec!["installFeature".to_string()];
        args.extend(features.iter().cloned());
        args.extend(self.archives.iter().cloned());
        if accept_license {
            args.push("--acceptLicense".to_string());
        }
        if let Some(from) = &self.from {
            args.push(format!("--from={}", from));
        }
        if let Some(to) = &self.to {
            args.push(format!("--to={}", to));
        }

        info!("Installing features: {}", features.join(", "));
        self.run_launcher(&args)
    }
}

/// Provider that locates `bin/featureUtility` under the installation root
#[derive(Debug, Default)]
pub struct UtilityInstallerProvider;

impl InstallerProvider for UtilityInstallerProvider {
    type Installer = UtilityInstaller;

    fn acquire(
        &self,
        install_root: &Path,
        from: Option<&str>,
        to: Option<&str>,
        archives: &IndexSet<String>,
    ) -> Result<InstallerAcquisition<UtilityInstaller>> {
        let launcher = match find_launcher(install_root, "featureUtility") {
            Some(path) => path,
            None => {
                return Ok(InstallerAcquisition::PrereqUnavailable {
                    reason: format!(
                        "featureUtility launcher not found under {}",
                        install_root.join("bin").display()
                    ),
                });
            }
        };

        Ok(InstallerAcquisition::Available(UtilityInstaller {
            launcher,
            from: from.map(str::to_string),
            to: to.map(str::to_string),
            archives: archives.clone(),
        }))
    }
}

/// Legacy installer backed by the runtime's `bin/installUtility` launcher
#[derive(Debug, Default)]
pub struct InstallUtilityLegacy;

impl LegacyInstaller for InstallUtilityLegacy {
    fn install(&self, request: &LegacyInstallRequest<'_>) -> Result<()> {
        if request.features.is_empty() {
            debug!("No features to install via installUtility");
            return Ok(());
        }

        let launcher = find_launcher(request.install_root, "installUtility").ok_or_else(|| {
            FeatureError::Installation {
                message: format!(
                    "installUtility launcher not found under {}",
                    request.install_root.join("bin").display()
                ),
            }
        })?;

        let mut args = vec!["install".to_string()];
        args.extend(request.features.iter().cloned());
        if request.accept_license {
            args.push("--acceptLicense".to_string());
        }
        if let Some(from) = request.from {
            args.push(format!("--from={}", from));
        }
        if let Some(to) = request.to {
            args.push(format!("--to={}", to));
        }
        args.push(format!(
            "--whenFileExists={}",
            request.when_file_exists.as_str()
        ));

        let mut command = Command::new(&launcher);
        command.args(&args);
        if let Some(user_dir) = request.user_dir {
            command.env("WLP_USER_DIR", user_dir);
        }
        if let Some(output_dir) = request.output_dir {
            command.env("WLP_OUTPUT_DIR", output_dir);
        }

        info!(
            "Installing features for server {} via installUtility: {}",
            request.server_name,
            request.features.join(", ")
        );
        debug!("Running {} {}", launcher.display(), args.join(" "));

        let output = command.output().map_err(|e| FeatureError::Installation {
            message: format!("failed to launch {}: {}", launcher.display(), e),
        })?;

        if output.status.success() {
            Ok(())
        } else {
            Err(FeatureError::Installation {
                message: format!(
                    "{} exited with {}: {}",
                    launcher.display(),
                    output.status,
                    String::from_utf8_lossy(&output.stderr).trim()
                ),
            }
            .into())
        }
    }
}

/// Locate a runtime launcher script under `<root>/bin`, accounting for the
/// Windows batch variant
fn find_launcher(install_root: &Path, name: &str) -> Option<PathBuf> {
    let bin = install_root.join("bin");
    let script = bin.join(name);
    if script.is_file() {
        return Some(script);
    }
    let batch = bin.join(format!("{}.bat", name));
    if batch.is_file() {
        return Some(batch);
    }
    None
}
