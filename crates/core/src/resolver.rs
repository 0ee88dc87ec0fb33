//! Source resolver: locate a logical field across the legacy layouts.
//!
//! The same setting lives at different JSON paths depending on the wallet
//! flavour and export version. Each logical field is described by an ordered
//! list of [`FieldPath`]s; the first path holding a value wins.
//!
//! JSON `null` counts as absent, as does any path that runs through a
//! non-object node.

use serde_json::Value;
use std::fmt;

fn walk<'a, 's>(value: &'a Value, segments: impl IntoIterator<Item = &'s str>) -> Option<&'a Value> {
    let mut node = value;
    for segment in segments {
        node = node.as_object()?.get(segment)?;
    }
    (!node.is_null()).then_some(node)
}

/// Walk `segments` object keys down from `value`.
pub fn lookup<'a>(value: &'a Value, segments: &[&str]) -> Option<&'a Value> {
    walk(value, segments.iter().copied())
}

/// One candidate location of a field.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FieldPath {
    segments: Vec<String>,
}

impl FieldPath {
    /// Build a path from object keys.
    pub fn new<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            segments: segments.into_iter().map(Into::into).collect(),
        }
    }

    /// A key at the top level of the document.
    pub fn root(field: &str) -> Self {
        Self::new([field])
    }

    /// A key under a mobile controller (`engine.backgroundState.<controller>`).
    pub fn controller(controller: &str, field: &str) -> Self {
        Self::new(["engine", "backgroundState", controller, field])
    }

    /// Probe this path in `doc`.
    pub fn lookup<'a>(&self, doc: &'a Value) -> Option<&'a Value> {
        walk(doc, self.segments.iter().map(String::as_str))
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.segments.join("."))
    }
}

/// The generic priority chain shared by all settings:
/// 1. top level
/// 2. `engine.backgroundState.PreferencesController`
/// 3. `engine.backgroundState`
/// 4. `metamask`
pub fn generic_chain(field: &str) -> Vec<FieldPath> {
    vec![
        FieldPath::root(field),
        FieldPath::controller("PreferencesController", field),
        FieldPath::new(["engine", "backgroundState", field]),
        FieldPath::new(["metamask", field]),
    ]
}

/// First value found along `chain`, with the path that produced it.
pub fn resolve_chain_with_path<'a, 'p>(
    doc: &'a Value,
    chain: &'p [FieldPath],
) -> Option<(&'a Value, &'p FieldPath)> {
    chain
        .iter()
        .find_map(|path| path.lookup(doc).map(|value| (value, path)))
}

/// First value found along `chain`.
pub fn resolve_chain<'a>(doc: &'a Value, chain: &[FieldPath]) -> Option<&'a Value> {
    resolve_chain_with_path(doc, chain).map(|(value, _)| value)
}

/// Resolve `field` along the generic chain.
///
/// A `null` at an earlier path falls through to the next one, so
/// `{"x": null, "metamask": {"x": true}}` resolves to `true`. The legacy
/// viewer stopped at the first defined key and showed such a field as
/// unavailable.
pub fn resolve<'a>(doc: &'a Value, field: &str) -> Option<&'a Value> {
    resolve_chain(doc, &generic_chain(field))
}
