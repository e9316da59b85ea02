//! draw.io (diagrams.net) label extraction.
//!
//! draw.io documents are `mxfile > mxGraphModel > root > mxCell` trees
//! where the visible text of a node lives in the cell's `value`
//! attribute. The extractor walks every element, ignoring namespace
//! prefixes, and returns the normalized labels for comparison against the
//! expected-component reference list.

use std::collections::HashSet;

use roxmltree::Document;

use crate::text::normalize;

/// Tag carrying diagram node text.
const NODE_TAG: &str = "mxCell";
/// Attribute holding the label markup.
const LABEL_ATTR: &str = "value";
/// Labels shorter than this after normalization are noise.
const MIN_LABEL_LEN: usize = 2;

/// Extract the text labels from draw.io XML.
///
/// Malformed or empty input yields an empty list; extraction never fails.
/// Labels are normalized, de-duplicated case-insensitively (first-seen
/// casing wins), and returned in document order.
pub fn extract_labels(xml: &str) -> Vec<String> {
    if xml.trim().is_empty() {
        return Vec::new();
    }
    let doc = match Document::parse(xml) {
        Ok(doc) => doc,
        Err(e) => {
            tracing::debug!(error = %e, "diagram XML did not parse; no labels extracted");
            return Vec::new();
        }
    };

    let mut labels = Vec::new();
    let mut seen: HashSet<String> = HashSet::new();
    for node in doc.descendants() {
        if !node.is_element() || node.tag_name().name() != NODE_TAG {
            continue;
        }
        let Some(value) = node.attribute(LABEL_ATTR) else {
            continue;
        };
        let clean = normalize(value);
        if clean.chars().count() < MIN_LABEL_LEN {
            continue;
        }
        if seen.insert(clean.to_lowercase()) {
            labels.push(clean);
        }
    }
    labels
}
