//! Catalog loading from JSON or TOML
//!
//! Both formats share one schema: a table keyed by icon name, each entry
//! carrying `name`, optional `keywords`, and a `variants` table whose keys are
//! variant names and whose values are `{ width, height, inner, attributes? }`.

use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use serde::Deserialize;
use tracing::{debug, info};

use super::{Catalog, IconDefinition, Variant, VariantData};
use crate::error::CatalogError;

/// On-disk shape of a catalog entry, before variant names are checked
#[derive(Deserialize)]
struct RawIcon {
    name: String,
    #[serde(default)]
    keywords: Vec<String>,
    variants: BTreeMap<String, VariantData>,
}

impl Catalog {
    /// Load a catalog from a `.json` or `.toml` file
    pub fn from_file(path: &Path) -> Result<Self, CatalogError> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);

        let parse: fn(&str) -> Result<Self, CatalogError> = match extension.as_deref() {
            Some("json") => Self::from_json_str,
            Some("toml") => Self::from_toml_str,
            _ => return Err(CatalogError::UnknownFormat { extension }),
        };

        let content = std::fs::read_to_string(path)?;
        let catalog = parse(&content)?;
        info!("Loaded {} icons from {}", catalog.len(), path.display());
        Ok(catalog)
    }

    pub fn from_json_str(content: &str) -> Result<Self, CatalogError> {
        let raw: HashMap<String, RawIcon> = serde_json::from_str(content)?;
        Self::from_raw(raw)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, CatalogError> {
        let raw: HashMap<String, RawIcon> = toml::from_str(content)?;
        Self::from_raw(raw)
    }

    fn from_raw(raw: HashMap<String, RawIcon>) -> Result<Self, CatalogError> {
        let mut icons = HashMap::with_capacity(raw.len());

        for (key, entry) in raw {
            let icon = validate(&key, entry)?;
            debug!("Catalog icon {} ({} variants)", key, icon.variants.len());
            icons.insert(key, icon);
        }

        Ok(Catalog { icons })
    }
}

fn validate(key: &str, raw: RawIcon) -> Result<IconDefinition, CatalogError> {
    let invalid = |reason: String| CatalogError::Invalid {
        icon: key.to_string(),
        reason,
    };

    if key.is_empty() {
        return Err(invalid("icon name must not be empty".to_string()));
    }
    if raw.name != key {
        return Err(invalid(format!(
            "name '{}' does not match its catalog key",
            raw.name
        )));
    }

    let mut variants = BTreeMap::new();
    for (variant_name, data) in raw.variants {
        let variant: Variant = variant_name
            .parse()
            .map_err(|_| invalid(format!("unknown variant '{}'", variant_name)))?;

        if data.width == 0 || data.height == 0 {
            return Err(invalid(format!(
                "{} variant has zero intrinsic size {}x{}",
                variant, data.width, data.height
            )));
        }
        variants.insert(variant, data);
    }

    Ok(IconDefinition {
        name: raw.name,
        keywords: raw.keywords,
        variants,
    })
}
