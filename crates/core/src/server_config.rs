//! Server configuration document parsing
//!
//! Extracts feature names from a server XML document. The document contains
//! zero or more `featureManager` elements, each containing zero or more
//! `feature` elements whose trimmed text content is a feature name. Entries
//! are returned in document order as named (non-archive) references.

use crate::errors::{ConfigError, Result};
use crate::feature_ref::FeatureRef;
use quick_xml::events::Event;
use quick_xml::Reader;
use std::path::Path;
use tracing::debug;

/// Parse the feature list out of a server configuration document
///
/// Fails with [`ConfigError::InvalidServerXml`] when the file is missing,
/// unreadable, or not well-formed. A document without any `featureManager`
/// section yields an empty list.
pub fn parse_server_xml(path: &Path) -> Result<Vec<FeatureRef>> {
    let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::InvalidServerXml {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;

    parse_features(&contents).map_err(|message| {
        ConfigError::InvalidServerXml {
            path: path.display().to_string(),
            message,
        }
        .into()
    })
}

fn parse_features(document: &str) -> std::result::Result<Vec<FeatureRef>, String> {
    let mut reader = Reader::from_str(document);

    let mut features = Vec::new();
    let mut manager_depth = 0usize;
    let mut in_feature = false;

    loop {
        match reader.read_event().map_err(|e| e.to_string())? {
            Event::Start(e) => match e.name().as_ref() {
                b"featureManager" => manager_depth += 1,
                b"feature" if manager_depth > 0 => in_feature = true,
                _ => {}
            },
            Event::End(e) => match e.name().as_ref() {
                b"featureManager" => manager_depth = manager_depth.saturating_sub(1),
                b"feature" => in_feature = false,
                _ => {}
            },
            Event::Text(e) if manager_depth > 0 && in_feature => {
                let text = e.unescape().map_err(|e| e.to_string())?;
                let name = text.trim();
                if !name.is_empty() {
                    debug!("Server xml listed feature: {}", name);
                    features.push(FeatureRef::named(name));
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(features)
}
