//! Heroicon - inline SVG icon rendering for templating layers
//!
//! This library resolves an icon name and style variant against a static
//! catalog, merges caller attributes with the attributes every icon carries,
//! and produces `<svg>` markup. Resolved icons are memoized in a small
//! insertion-ordered cache.
//!
//! # Example
//!
//! ```rust
//! use heroicon::{Catalog, Heroicons, IconDefinition, Options, RenderConfig, Variant, VariantData};
//!
//! let catalog: Catalog = [IconDefinition::new("x-mark")
//!     .with_variant(Variant::Outline, VariantData::new(24, 24, "<path/>"))]
//! .into_iter()
//! .collect();
//!
//! let mut icons = Heroicons::new(catalog, RenderConfig::default());
//! let svg = icons
//!     .render("x-mark", "outline", &Options::new().with("class", "h-6 w-6"))
//!     .unwrap();
//! assert!(svg.as_str().contains(r#"class="heroicon heroicon-outline-x-mark h-6 w-6""#));
//! ```

pub mod cache;
pub mod catalog;
pub mod config;
pub mod error;
pub mod markup;
pub mod resolver;
pub mod value;

use std::sync::Arc;

use thiserror::Error;
use tracing::debug;

pub use cache::{Fingerprint, IconCache, Preload, PreloadRequest, PreloadStats};
pub use catalog::{Catalog, IconDefinition, Variant, VariantData};
pub use config::RenderConfig;
pub use error::{CatalogError, ConfigError, IconError};
pub use markup::Markup;
pub use resolver::{ResolvedIcon, Resolver};
pub use value::{Options, Value};

/// Any error this crate can produce
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Icon(#[from] IconError),

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Catalog, configuration and cache behind one handle
///
/// Construct one per process (or per request context) and pass it to the
/// templating layer. It is not synchronized; wrap it in a mutex to share it
/// across threads.
#[derive(Debug)]
pub struct Heroicons {
    catalog: Arc<Catalog>,
    config: RenderConfig,
    cache: IconCache,
}

impl Heroicons {
    pub fn new(catalog: impl Into<Arc<Catalog>>, config: RenderConfig) -> Self {
        let cache = IconCache::new(config.cache_limit);
        Self {
            catalog: catalog.into(),
            config,
            cache,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    pub fn cache(&self) -> &IconCache {
        &self.cache
    }

    /// Number of resolved icons currently cached
    pub fn cache_len(&self) -> usize {
        self.cache.len()
    }

    pub fn resolver(&self) -> Resolver<'_> {
        Resolver::new(&self.catalog, &self.config)
    }

    /// Render an icon to markup, going through the cache
    ///
    /// Recognized options are `size`, `width`, `height`, `class` and
    /// `unsafe`; anything else is passed through as an attribute.
    pub fn render(
        &mut self,
        name: impl Into<Value>,
        variant: impl Into<Value>,
        options: &Options,
    ) -> Result<Markup, IconError> {
        let icon = self.resolve(&name.into(), &variant.into(), options)?;
        let raw = options.present("unsafe").is_some_and(Value::is_truthy);
        Ok(Markup::new(icon.to_svg(self.config.comment), raw))
    }

    /// Resolve an icon, returning the cached result when there is one
    pub fn resolve(
        &mut self,
        name: &Value,
        variant: &Value,
        options: &Options,
    ) -> Result<Arc<ResolvedIcon>, IconError> {
        let fingerprint = Fingerprint::compute(
            &name.to_identifier("icon name")?,
            &variant.to_identifier("variant")?,
            options,
        );
        if let Some(icon) = self.cache.get(&fingerprint) {
            debug!("Cache hit for {}", fingerprint);
            return Ok(icon);
        }

        debug!("Cache miss for {}", fingerprint);
        let icon = Arc::new(self.resolver().resolve(name, variant, options)?);
        self.cache.put(fingerprint, Arc::clone(&icon));
        Ok(icon)
    }

    /// Warm the cache with up to 20 requests; see [`IconCache::preload`]
    pub fn preload(&mut self, batch: &[PreloadRequest]) -> Result<PreloadStats, IconError> {
        let resolver = Resolver::new(&self.catalog, &self.config);
        self.cache
            .preload(batch, self.config.preload_floor, |event| match event {
                Preload::Miss(request) => resolver
                    .resolve(
                        &Value::from(request.name.as_str()),
                        &Value::from(request.variant.as_str()),
                        &request.options(),
                    )
                    .map(Some),
                Preload::Hit(_) => Ok(None),
            })
    }

    /// Drop every cached icon, e.g. after swapping catalogs
    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }
}

/// Render one icon without caching, using the default configuration
pub fn render_icon(
    catalog: &Catalog,
    name: impl Into<Value>,
    variant: impl Into<Value>,
    options: &Options,
) -> Result<String, IconError> {
    let config = RenderConfig::default();
    let icon = Resolver::new(catalog, &config).resolve(&name.into(), &variant.into(), options)?;
    Ok(icon.to_svg(config.comment))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Catalog {
        [IconDefinition::new("x")
            .with_variant(Variant::Outline, VariantData::new(24, 24, ""))
            .with_variant(Variant::Solid, VariantData::new(20, 20, ""))]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_render_caches_result() {
        let mut icons = Heroicons::new(catalog(), RenderConfig::default());
        let first = icons.render("x", "outline", &Options::new()).unwrap();
        let second = icons.render("x", "outline", &Options::new()).unwrap();
        assert_eq!(first, second);
        assert_eq!(icons.cache_len(), 1);
    }

    #[test]
    fn test_render_errors_are_not_cached() {
        let mut icons = Heroicons::new(catalog(), RenderConfig::default());
        assert!(icons.render("x", "blarf", &Options::new()).is_err());
        assert_eq!(icons.cache_len(), 0);
    }

    #[test]
    fn test_unsafe_marks_markup_raw_and_shares_cache_entry() {
        let mut icons = Heroicons::new(catalog(), RenderConfig::default());
        let safe = icons.render("x", "solid", &Options::new()).unwrap();
        let raw = icons
            .render("x", "solid", &Options::new().with("unsafe", true))
            .unwrap();
        assert!(!safe.is_raw());
        assert!(raw.is_raw());
        assert_eq!(safe.as_str(), raw.as_str());
        assert_eq!(icons.cache_len(), 1);
    }

    #[test]
    fn test_uncoercible_height_does_not_reuse_sized_entry() {
        let mut icons = Heroicons::new(catalog(), RenderConfig::default());
        let sized = icons
            .render("x", "solid", &Options::new().with("height", "32"))
            .unwrap();
        let listed = icons
            .render("x", "solid", &Options::new().with("height", vec!["32"]))
            .unwrap();
        assert!(sized.as_str().contains(r#"height="32""#));
        assert!(listed.as_str().contains(r#"width="20" height="20""#));
        assert_eq!(icons.cache_len(), 2);
    }

    #[test]
    fn test_cache_limit_from_config() {
        let config = RenderConfig::default().with_cache_limit(1);
        let mut icons = Heroicons::new(catalog(), config);
        icons.render("x", "outline", &Options::new()).unwrap();
        icons.render("x", "solid", &Options::new()).unwrap();
        assert_eq!(icons.cache_len(), 1);
    }

    #[test]
    fn test_comment_from_config() {
        let config = RenderConfig::default().with_comment(true);
        let mut icons = Heroicons::new(catalog(), config);
        let svg = icons.render("x", "solid", &Options::new()).unwrap();
        assert!(svg.as_str().starts_with("<!-- Heroicon name: solid/x -->"));
    }

    #[test]
    fn test_preload_then_render_hits() {
        let mut icons = Heroicons::new(catalog(), RenderConfig::default());
        let stats = icons
            .preload(&[PreloadRequest::new("x", "solid").with_height(32)])
            .unwrap();
        assert_eq!(stats.misses, 1);

        let icon = icons
            .resolve(&"x".into(), &"solid".into(), &Options::new().with("height", 32))
            .unwrap();
        assert_eq!(icon.width(), 32);
        assert_eq!(icons.cache_len(), 1);
    }

    #[test]
    fn test_clear_cache() {
        let mut icons = Heroicons::new(catalog(), RenderConfig::default());
        icons.render("x", "solid", &Options::new()).unwrap();
        icons.clear_cache();
        assert_eq!(icons.cache_len(), 0);
    }

    #[test]
    fn test_render_icon_uncached() {
        let svg = render_icon(&catalog(), "x", "solid", &Options::new()).unwrap();
        assert!(svg.contains(r#"fill="currentColor""#));
    }
}
