//! Feature set building and combination
//!
//! A [`FeatureSet`] accumulates feature references from the declared
//! configuration, CLI parsing, and server-configuration parsing into one
//! insertion-ordered, name-deduplicated collection, together with the
//! install-wide settings (license flag, from/to locations, file-conflict
//! policy). [`combine`] performs the final three-way union handed to the
//! installer capability.

use crate::feature_ref::{FeatureRef, ESA_SUFFIX};
use indexmap::{IndexMap, IndexSet};
use tracing::debug;

/// Policy applied when an installed file already exists on the target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WhenFileExists {
    /// Abort the install when a conflicting file exists
    #[default]
    Fail,
    /// Overwrite the existing file
    Replace,
    /// Keep the existing file and continue
    Ignore,
}

impl WhenFileExists {
    /// Stable lowercase name, as passed to the legacy installer
    pub fn as_str(&self) -> &'static str {
        match self {
            WhenFileExists::Fail => "fail",
            WhenFileExists::Replace => "replace",
            WhenFileExists::Ignore => "ignore",
        }
    }
}

/// Aggregate configuration for one installation request
///
/// Owned exclusively by the orchestrator for the duration of a run. Feature
/// references are deduplicated by name on insertion; the first insertion
/// wins, preserving document/CLI order.
#[derive(Debug, Clone, Default)]
pub struct FeatureSet {
    features: IndexMap<String, FeatureRef>,
    /// Whether the declared configuration accepts the feature license terms
    pub accept_license: bool,
    /// Optional source location hint for the installer
    pub from: Option<String>,
    /// Optional target location hint for the installer
    pub to: Option<String>,
    /// Policy for conflicting files on the target
    pub when_file_exists: WhenFileExists,
}

impl FeatureSet {
    /// Create an empty feature set with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a feature reference, deduplicating by name
    pub fn add(&mut self, feature: FeatureRef) {
        if !self.features.contains_key(&feature.name) {
            self.features.insert(feature.name.clone(), feature);
        }
    }

    /// Number of distinct features in the set
    pub fn len(&self) -> usize {
        self.features.len()
    }

    /// Whether the set contains no features
    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    /// Whether a feature with the given name is present
    pub fn contains(&self, name: &str) -> bool {
        self.features.contains_key(name)
    }

    /// Iterate the references in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &FeatureRef> {
        self.features.values()
    }

    /// Feature names in insertion order
    pub fn names(&self) -> Vec<String> {
        self.features.keys().cloned().collect()
    }

    /// Split the set's names into named features and `.esa` archives
    ///
    /// A reference belongs to the archive subset iff its name ends with
    /// `.esa` (case-sensitive). The two subsets are validated and reported
    /// differently downstream, so they travel separately.
    pub fn split_by_archive(&self) -> (IndexSet<String>, IndexSet<String>) {
        let mut named = IndexSet::new();
        let mut archives = IndexSet::new();
        for name in self.features.keys() {
            if name.ends_with(ESA_SUFFIX) {
                debug!("Plugin listed ESA: {}", name);
                archives.insert(name.clone());
            } else {
                debug!("Plugin listed feature: {}", name);
                named.insert(name.clone());
            }
        }
        (named, archives)
    }
}

impl FromIterator<FeatureRef> for FeatureSet {
    fn from_iter<I: IntoIterator<Item = FeatureRef>>(iter: I) -> Self {
        let mut set = FeatureSet::new();
        for feature in iter {
            set.add(feature);
        }
        set
    }
}

/// Union the three feature-name sources into the final install list
///
/// `installed` is absent when the target directory does not exist (first
/// install). Already-installed names are unioned in rather than diffed out;
/// idempotence on re-install is the installer capability's concern. The
/// result preserves first-seen order, and membership is stable regardless of
/// input ordering.
pub fn combine(
    plugin_listed: &IndexSet<String>,
    dependency_derived: &IndexSet<String>,
    installed: Option<&IndexSet<String>>,
) -> IndexSet<String> {
    let mut combined: IndexSet<String> = IndexSet::new();
    combined.extend(plugin_listed.iter().cloned());
    combined.extend(dependency_derived.iter().cloned());
    if let Some(installed) = installed {
        combined.extend(installed.iter().cloned());
    }
    combined
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set_of(names: &[&str]) -> IndexSet<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_add_deduplicates_by_name() {
        let mut set = FeatureSet::new();
        set.add(FeatureRef::named("servlet-4.0"));
        set.add(FeatureRef::named("jsp-2.3"));
        set.add(FeatureRef::named("servlet-4.0"));
        assert_eq!(set.len(), 2);
        assert_eq!(set.names(), vec!["servlet-4.0", "jsp-2.3"]);
    }

    #[test]
    fn test_first_insertion_wins() {
        let mut set = FeatureSet::new();
        set.add(FeatureRef::archive("thing.esa"));
        set.add(FeatureRef::named("thing.esa"));
        assert_eq!(set.len(), 1);
        assert!(set.iter().next().unwrap().archive);
    }

    #[test]
    fn test_split_by_archive_suffix() {
        let set: FeatureSet = ["foo", "bar.esa", "baz"]
            .iter()
            .map(|n| FeatureRef::named(*n))
            .collect();

        let (named, archives) = set.split_by_archive();
        assert_eq!(named, set_of(&["foo", "baz"]));
        assert_eq!(archives, set_of(&["bar.esa"]));
    }

    #[test]
    fn test_split_is_case_sensitive() {
        let set: FeatureSet = [FeatureRef::named("upper.ESA")].into_iter().collect();
        let (named, archives) = set.split_by_archive();
        assert_eq!(named, set_of(&["upper.ESA"]));
        assert!(archives.is_empty());
    }

    #[test]
    fn test_combine_unions_all_sources() {
        let combined = combine(
            &set_of(&["a", "b"]),
            &set_of(&["b", "c"]),
            Some(&set_of(&["c", "d"])),
        );
        assert_eq!(combined, set_of(&["a", "b", "c", "d"]));
    }

    #[test]
    fn test_combine_membership_is_order_insensitive() {
        let one = combine(
            &set_of(&["a", "b"]),
            &set_of(&["b", "c"]),
            Some(&set_of(&["c", "d"])),
        );
        let other = combine(
            &set_of(&["c", "d"]),
            &set_of(&["a", "b"]),
            Some(&set_of(&["b", "c"])),
        );
        for name in &one {
            assert!(other.contains(name));
        }
        assert_eq!(one.len(), other.len());
    }

    #[test]
    fn test_combine_without_installed_set() {
        let combined = combine(&set_of(&["a"]), &set_of(&["b"]), None);
        assert_eq!(combined, set_of(&["a", "b"]));
    }

    #[test]
    fn test_combine_empty_inputs() {
        let combined = combine(&IndexSet::new(), &IndexSet::new(), None);
        assert!(combined.is_empty());
    }

    #[test]
    fn test_when_file_exists_default_and_names() {
        assert_eq!(WhenFileExists::default(), WhenFileExists::Fail);
        assert_eq!(WhenFileExists::Fail.as_str(), "fail");
        assert_eq!(WhenFileExists::Replace.as_str(), "replace");
        assert_eq!(WhenFileExists::Ignore.as_str(), "ignore");
    }
}
