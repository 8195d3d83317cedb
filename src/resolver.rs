//! Icon resolution and attribute merging
//!
//! [`Resolver::resolve`] turns `(name, variant, options)` into a
//! [`ResolvedIcon`]: final pixel size, the merged attribute list in emission
//! order, and the raw inner markup. It is a pure function of its inputs and
//! the catalog.
//!
//! # Attribute precedence
//!
//! The resolver always computes these keys and ignores user values for them:
//! `xmlns`, `class` (user classes are appended, not replaced), `viewBox`,
//! `version`, `fill`, `stroke`, `aria-hidden`, `role`. The sizing keys
//! `size`, `width` and `height` are consumed to compute the final size, and
//! `unsafe` is a rendering flag that never becomes an attribute. Every other
//! non-null user attribute is passed through in the order supplied, replacing
//! any catalog default of the same name.

use indexmap::IndexMap;
use tracing::debug;

use crate::catalog::{Catalog, Variant, VariantData};
use crate::config::RenderConfig;
use crate::error::IconError;
use crate::value::{Options, Value};

/// Keys whose values are always computed by the resolver
pub const RESERVED_KEYS: [&str; 8] = [
    "xmlns",
    "class",
    "viewBox",
    "version",
    "fill",
    "stroke",
    "aria-hidden",
    "role",
];

/// Option keys consumed by the resolver instead of being emitted
pub const CONSUMED_KEYS: [&str; 4] = ["size", "width", "height", "unsafe"];

/// Option keys read as pixel sizes
pub const SIZE_KEYS: [&str; 3] = ["size", "width", "height"];

/// Value of the `version` attribute on every icon
pub const SVG_VERSION: &str = "1.1";

pub fn is_reserved(key: &str) -> bool {
    RESERVED_KEYS.contains(&key)
}

/// A fully resolved icon, ready to serialize
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedIcon {
    name: String,
    variant: Variant,
    width: u32,
    height: u32,
    attributes: IndexMap<String, String>,
    inner: String,
}

impl ResolvedIcon {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn variant(&self) -> Variant {
        self.variant
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Merged attributes in emission order
    pub fn attributes(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attributes
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }

    pub fn inner(&self) -> &str {
        &self.inner
    }
}

/// Resolves render requests against a catalog
#[derive(Debug, Clone, Copy)]
pub struct Resolver<'a> {
    catalog: &'a Catalog,
    config: &'a RenderConfig,
}

impl<'a> Resolver<'a> {
    pub fn new(catalog: &'a Catalog, config: &'a RenderConfig) -> Self {
        Self { catalog, config }
    }

    pub fn resolve(
        &self,
        name: &Value,
        variant: &Value,
        options: &Options,
    ) -> Result<ResolvedIcon, IconError> {
        let name = name.to_identifier("icon name")?;
        if name.is_empty() {
            return Err(IconError::EmptyName);
        }
        let variant: Variant = variant.to_identifier("variant")?.parse()?;

        let icon = self
            .catalog
            .lookup(&name)
            .ok_or_else(|| IconError::UnknownIcon { name: name.clone() })?;
        let data = icon
            .variant(variant)
            .ok_or_else(|| IconError::UnsupportedVariant {
                name: name.clone(),
                variant: variant.to_string(),
                available: icon.variant_names(),
            })?;

        let (width, height) = dimensions(data, options);
        let attributes = self.merge_attributes(&name, variant, data, (width, height), options);
        debug!("Resolved {}/{} at {}x{}", variant, name, width, height);

        Ok(ResolvedIcon {
            name,
            variant,
            width,
            height,
            attributes,
            inner: data.inner.clone(),
        })
    }

    fn merge_attributes(
        &self,
        name: &str,
        variant: Variant,
        data: &VariantData,
        (width, height): (u32, u32),
        options: &Options,
    ) -> IndexMap<String, String> {
        let mut attrs = IndexMap::new();
        let base = &self.config.base_class;

        let user_class = options
            .present("class")
            .and_then(Value::to_attribute)
            .unwrap_or_default();
        let class = format!("{base} {base}-{variant}-{name} {user_class}");
        attrs.insert("class".to_string(), class.trim().to_string());

        attrs.insert(
            "viewBox".to_string(),
            format!("0 0 {} {}", data.width, data.height),
        );
        attrs.insert("width".to_string(), width.to_string());
        attrs.insert("height".to_string(), height.to_string());
        attrs.insert("version".to_string(), SVG_VERSION.to_string());

        for (key, value) in variant.presentation() {
            attrs.insert(key.to_string(), value.to_string());
        }
        for (key, value) in &data.attributes {
            if !is_reserved(key) && !CONSUMED_KEYS.contains(&key.as_str()) {
                attrs.insert(key.clone(), value.clone());
            }
        }

        if options
            .present("aria-label")
            .and_then(Value::to_attribute)
            .is_some()
        {
            attrs.insert("role".to_string(), "img".to_string());
        } else {
            attrs.insert("aria-hidden".to_string(), "true".to_string());
        }

        for (key, value) in options.present_entries() {
            if is_reserved(key) || CONSUMED_KEYS.contains(&key) {
                continue;
            }
            if let Some(text) = value.to_attribute() {
                // user attributes follow in the order supplied, even over catalog defaults
                attrs.shift_remove(key);
                attrs.insert(key.to_string(), text);
            }
        }

        attrs
    }
}

/// Final pixel size for a request
///
/// `size` sets both sides; an explicit `width` or `height` overrides it for
/// its side. With only one side known the other follows the intrinsic aspect
/// ratio, truncating. Sizes that coerce to zero or less count as not given.
pub fn dimensions(data: &VariantData, options: &Options) -> (u32, u32) {
    let size = requested(options, "size");
    let width = requested(options, "width").or(size);
    let height = requested(options, "height").or(size);

    match (width, height) {
        (None, None) => (data.width, data.height),
        (Some(w), Some(h)) => (w, h),
        (None, Some(h)) => (scale(h, data.width, data.height), h),
        (Some(w), None) => (w, scale(w, data.height, data.width)),
    }
}

/// Pixel size requested under `key`, if it coerces to a positive integer
pub fn requested(options: &Options, key: &str) -> Option<u32> {
    let n = options.present(key)?.to_int();
    (n > 0).then(|| n.min(i64::from(u32::MAX)) as u32)
}

/// `value * numerator / denominator`, truncated, at least 1
fn scale(value: u32, numerator: u32, denominator: u32) -> u32 {
    let scaled = (u64::from(value) * u64::from(numerator))
        .checked_div(u64::from(denominator))
        .unwrap_or(u64::from(value));
    u32::try_from(scaled).unwrap_or(u32::MAX).max(1)
}
