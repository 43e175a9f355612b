//! FILENAME: grid-model/src/style.rs
//! PURPOSE: Opaque style payloads and a registry that deduplicates them.
//! CONTEXT: The compositor never interprets a style; it only carries the
//! key/value bag the caller attached to each cell through to the output.
//! Renderers that build one engine-specific format object per distinct bag
//! intern the bags in a `StyleRegistry` and key their formats by `StyleId`.

use std::collections::BTreeMap;
use serde::{Deserialize, Serialize};
use rustc_hash::FxHashMap;

/// A key/value style bag, e.g. `{"background-color": "#F8F8F8"}`.
/// Keys are kept sorted so equal bags hash and compare equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct Style {
    entries: BTreeMap<String, String>,
}

impl Style {
    /// Create a new, empty style.
    pub fn new() -> Self {
        Style::default()
    }

    /// Create a style with one more attribute set.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.entries.insert(key.into(), value.into());
        self
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Inline CSS form (`a:b;c:d`), sorted by key, skipping empty values.
    pub fn to_inline_css(&self) -> String {
        self.entries
            .iter()
            .filter(|(_, v)| !v.is_empty())
            .map(|(k, v)| format!("{}:{}", k.replace('_', "-"), v))
            .collect::<Vec<_>>()
            .join(";")
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Style {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Style {
            entries: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}

/// Dense handle for a style interned in a `StyleRegistry`.
pub type StyleId = usize;

/// Interning table for the style bags of one rendering pass. Equal bags get
/// the same id; id 0 is reserved for the empty bag so unstyled cells need no
/// lookup.
#[derive(Debug, Clone)]
pub struct StyleRegistry {
    styles: Vec<Style>,
    ids: FxHashMap<Style, StyleId>,
}

impl StyleRegistry {
    pub fn new() -> Self {
        let mut registry = StyleRegistry {
            styles: Vec::new(),
            ids: FxHashMap::default(),
        };
        registry.intern(&Style::new());
        registry
    }

    pub fn intern(&mut self, style: &Style) -> StyleId {
        let styles = &mut self.styles;
        *self.ids.entry(style.clone()).or_insert_with(|| {
            styles.push(style.clone());
            styles.len() - 1
        })
    }

    pub fn style(&self, id: StyleId) -> Option<&Style> {
        self.styles.get(id)
    }

    /// Distinct bags seen so far, the empty one included.
    pub fn len(&self) -> usize {
        self.styles.len()
    }

    /// True until a non-empty bag has been interned.
    pub fn is_empty(&self) -> bool {
        self.styles.len() <= 1
    }
}

impl Default for StyleRegistry {
    fn default() -> Self {
        StyleRegistry::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_style_equality_ignores_insertion_order() {
        let a = Style::new().with("color", "red").with("font-weight", "bold");
        let b = Style::new().with("font-weight", "bold").with("color", "red");
        assert_eq!(a, b);
    }

    #[test]
    fn test_inline_css() {
        let style: Style = [("font_weight", "bold"), ("background-color", "#F8F8F8"), ("border", "")]
            .into_iter()
            .collect();
        assert_eq!(style.to_inline_css(), "background-color:#F8F8F8;font-weight:bold");
    }

    #[test]
    fn test_registry_reuses_ids_for_equal_bags() {
        let mut registry = StyleRegistry::new();
        let first = registry.intern(&Style::new().with("font-weight", "bold"));
        let second = registry.intern(&Style::new().with("font-weight", "bold"));

        assert_eq!(first, second);
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_registry_distinct_bags() {
        let mut registry = StyleRegistry::new();
        let bold = registry.intern(&Style::new().with("font-weight", "bold"));
        let italic = registry.intern(&Style::new().with("font-style", "italic"));

        assert_eq!((bold, italic), (1, 2));
        assert_eq!(registry.style(italic).and_then(|s| s.get("font-style")), Some("italic"));
    }

    #[test]
    fn test_empty_bag_is_id_zero() {
        let mut registry = StyleRegistry::new();
        assert!(registry.is_empty());
        assert_eq!(registry.intern(&Style::new()), 0);
        assert_eq!(registry.len(), 1);
        assert!(registry.style(99).is_none());
    }
}
