//! Static icon catalog
//!
//! The catalog is loaded once, before any rendering happens, and is never
//! mutated afterwards. It maps an icon name to its [`IconDefinition`], which in
//! turn maps each supported [`Variant`] to the drawing data for that style.
//! A variant missing from the map is simply not supported for that icon.

mod loader;
mod variant;

use std::collections::{BTreeMap, HashMap};

use indexmap::IndexMap;
use serde::Deserialize;

pub use variant::{Paint, Variant};

/// Drawing data for one variant of one icon
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct VariantData {
    /// Intrinsic width of the artwork
    pub width: u32,
    /// Intrinsic height of the artwork
    pub height: u32,
    /// Raw inner markup placed between the `<svg>` tags
    pub inner: String,
    /// Extra attributes this variant always carries (e.g. `stroke-width`)
    #[serde(default)]
    pub attributes: IndexMap<String, String>,
}

impl VariantData {
    pub fn new(width: u32, height: u32, inner: impl Into<String>) -> Self {
        Self {
            width,
            height,
            inner: inner.into(),
            attributes: IndexMap::new(),
        }
    }

    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }
}

/// A catalog entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconDefinition {
    pub name: String,
    pub keywords: Vec<String>,
    pub variants: BTreeMap<Variant, VariantData>,
}

impl IconDefinition {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            keywords: Vec::new(),
            variants: BTreeMap::new(),
        }
    }

    pub fn with_keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.keywords = keywords.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_variant(mut self, variant: Variant, data: VariantData) -> Self {
        self.variants.insert(variant, data);
        self
    }

    pub fn variant(&self, variant: Variant) -> Option<&VariantData> {
        self.variants.get(&variant)
    }

    /// Supported variant names, in canonical order
    pub fn variant_names(&self) -> Vec<String> {
        self.variants.keys().map(|v| v.to_string()).collect()
    }
}

/// Read-only icon catalog
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    icons: HashMap<String, IconDefinition>,
}

impl Catalog {
    pub fn lookup(&self, name: &str) -> Option<&IconDefinition> {
        self.icons.get(name)
    }

    pub fn len(&self) -> usize {
        self.icons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.icons.is_empty()
    }

    /// All icon names, sorted
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.icons.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Icons whose name or keywords contain `term`, sorted by name
    pub fn search(&self, term: &str) -> Vec<&IconDefinition> {
        let term = term.to_lowercase();
        let mut hits: Vec<&IconDefinition> = self
            .icons
            .values()
            .filter(|icon| {
                icon.name.contains(&term)
                    || icon
                        .keywords
                        .iter()
                        .any(|k| k.to_lowercase().contains(&term))
            })
            .collect();
        hits.sort_by(|a, b| a.name.cmp(&b.name));
        hits
    }
}

impl FromIterator<IconDefinition> for Catalog {
    fn from_iter<I: IntoIterator<Item = IconDefinition>>(iter: I) -> Self {
        Self {
            icons: iter
                .into_iter()
                .map(|icon| (icon.name.clone(), icon))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Catalog {
        [
            IconDefinition::new("x-mark")
                .with_keywords(["close", "Dismiss"])
                .with_variant(Variant::Outline, VariantData::new(24, 24, "")),
            IconDefinition::new("academic-cap")
                .with_variant(Variant::Solid, VariantData::new(24, 24, "<path/>")),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_lookup() {
        let catalog = sample();
        assert!(catalog.lookup("x-mark").is_some());
        assert!(catalog.lookup("missing").is_none());
        assert_eq!(catalog.len(), 2);
    }

    #[test]
    fn test_names_sorted() {
        assert_eq!(sample().names(), vec!["academic-cap", "x-mark"]);
    }

    #[test]
    fn test_search_matches_keywords_case_insensitively() {
        let catalog = sample();
        let hits = catalog.search("dismiss");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name, "x-mark");
        assert_eq!(catalog.search("cap")[0].name, "academic-cap");
    }

    #[test]
    fn test_absent_variant_is_unsupported() {
        let catalog = sample();
        let icon = catalog.lookup("x-mark").unwrap();
        assert!(icon.variant(Variant::Outline).is_some());
        assert!(icon.variant(Variant::Solid).is_none());
        assert_eq!(icon.variant_names(), vec!["outline"]);
    }
}
