//! Install command implementation
//!
//! Maps CLI arguments onto an orchestrator request and the concrete
//! installer capabilities, then reports the outcome.

use anyhow::{bail, Result};
use esactl_core::dependencies::DependencyRef;
use esactl_core::feature_ref::{FeatureRef, ESA_SUFFIX};
use esactl_core::feature_set::{FeatureSet, WhenFileExists};
use esactl_core::installer::{InstallUtilityLegacy, UtilityInstallerProvider};
use esactl_core::orchestrator::{install_features, InstallFeaturesRequest, InstallOutcome};
use esactl_core::runtime::RuntimeInstallation;
use std::path::PathBuf;
use tracing::{debug, info};

/// Install command arguments
#[derive(Debug)]
pub struct InstallArgs {
    pub install_dir: PathBuf,
    pub skip: bool,
    pub feature: Option<String>,
    pub server_xml: Option<PathBuf>,
    pub accept_license: Option<bool>,
    pub features: Vec<String>,
    pub dependencies: Vec<String>,
    pub from: Option<String>,
    pub to: Option<String>,
    pub when_file_exists: WhenFileExists,
    pub server_name: String,
    pub server_dir: Option<PathBuf>,
    pub user_dir: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
}

/// Execute the install command
pub fn execute_install(args: InstallArgs) -> Result<()> {
    debug!("Install args: {:?}", args);

    let runtime = RuntimeInstallation::new(&args.install_dir);
    let dependencies = parse_dependencies(&args.dependencies)?;

    // A non-empty --features list is the declared configuration channel;
    // without it the invocation is standalone and must carry its own
    // license acceptance and feature source.
    let declared = if args.features.is_empty() {
        None
    } else {
        let mut set: FeatureSet = args
            .features
            .iter()
            .map(|name| {
                if name.ends_with(ESA_SUFFIX) {
                    FeatureRef::archive(name.clone())
                } else {
                    FeatureRef::named(name.clone())
                }
            })
            .collect();
        set.accept_license = args.accept_license.unwrap_or(false);
        set.from = args.from.clone();
        set.to = args.to.clone();
        set.when_file_exists = args.when_file_exists;
        Some(set)
    };
    let standalone = declared.is_none();

    let request = InstallFeaturesRequest {
        skip: args.skip,
        features: declared,
        single_feature: args.feature,
        server_xml: args.server_xml,
        standalone,
        accept_license: args.accept_license,
        dependencies,
        server_dir: args.server_dir,
        server_name: args.server_name,
        user_dir: args.user_dir,
        output_dir: args.output_dir,
    };

    let provider = UtilityInstallerProvider;
    let legacy = InstallUtilityLegacy;

    match install_features(&runtime, request, &provider, &legacy)? {
        InstallOutcome::Installed => {
            info!("Feature installation completed");
        }
        InstallOutcome::Skipped => {
            info!("Feature installation skipped");
        }
    }

    Ok(())
}

/// Parse repeated `artifactId:type` descriptors
fn parse_dependencies(raw: &[String]) -> Result<Vec<DependencyRef>> {
    let mut dependencies = Vec::with_capacity(raw.len());
    for descriptor in raw {
        match descriptor.split_once(':') {
            Some((artifact_id, kind)) if !artifact_id.is_empty() && !kind.is_empty() => {
                dependencies.push(DependencyRef::new(artifact_id, kind));
            }
            _ => bail!(
                "Unmatched argument format: dependency must match <artifactId>:<type>, got '{}'",
                descriptor
            ),
        }
    }
    Ok(dependencies)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_dependencies() {
        let parsed = parse_dependencies(&[
            "mpHealth-4.0:esa".to_string(),
            "some-library:jar".to_string(),
        ])
        .unwrap();
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[0], DependencyRef::new("mpHealth-4.0", "esa"));
        assert_eq!(parsed[1], DependencyRef::new("some-library", "jar"));
    }

    #[test]
    fn test_parse_dependencies_rejects_bad_format() {
        assert!(parse_dependencies(&["no-type".to_string()]).is_err());
        assert!(parse_dependencies(&[":esa".to_string()]).is_err());
        assert!(parse_dependencies(&["artifact:".to_string()]).is_err());
    }
}
