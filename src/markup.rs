//! SVG markup generation from resolved icons
//!
//! Attribute values are written as given. Escaping them is the job of the
//! host's rendering layer; [`Markup::is_raw`] tells it whether the caller asked
//! for the output to bypass that layer.

use std::fmt;

use crate::resolver::ResolvedIcon;

/// XML namespace emitted on every root element
pub const SVG_NAMESPACE: &str = "http://www.w3.org/2000/svg";

impl ResolvedIcon {
    /// Serialize to an `<svg>` element
    ///
    /// With `comment` set, a `<!-- Heroicon name: variant/name -->` line is
    /// written before the element.
    pub fn to_svg(&self, comment: bool) -> String {
        let mut out = String::new();
        if comment {
            out.push_str(&format!(
                "<!-- Heroicon name: {}/{} -->\n",
                self.variant(),
                self.name()
            ));
        }

        out.push_str(&format!(r#"<svg xmlns="{}""#, SVG_NAMESPACE));
        for (key, value) in self.attributes() {
            out.push_str(&format!(r#" {}="{}""#, key, value));
        }
        out.push('>');
        out.push_str(self.inner());
        out.push_str("</svg>");
        out
    }
}

/// Rendered icon markup handed back to a templating layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Markup {
    html: String,
    raw: bool,
}

impl Markup {
    pub fn new(html: String, raw: bool) -> Self {
        Self { html, raw }
    }

    pub fn as_str(&self) -> &str {
        &self.html
    }

    /// Whether the caller passed `unsafe` and the host should skip auto-escaping
    pub fn is_raw(&self) -> bool {
        self.raw
    }

    pub fn into_string(self) -> String {
        self.html
    }
}

impl fmt::Display for Markup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.html)
    }
}

impl AsRef<str> for Markup {
    fn as_ref(&self) -> &str {
        &self.html
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Catalog, IconDefinition, Variant, VariantData};
    use crate::config::RenderConfig;
    use crate::resolver::Resolver;
    use crate::value::Options;

    fn resolved(options: Options) -> ResolvedIcon {
        let catalog: Catalog = [IconDefinition::new("x").with_variant(
            Variant::Outline,
            VariantData::new(24, 24, r#"<path d="M6 18 18 6"/>"#),
        )]
        .into_iter()
        .collect();
        let config = RenderConfig::default();
        Resolver::new(&catalog, &config)
            .resolve(&"x".into(), &"outline".into(), &options)
            .unwrap()
    }

    #[test]
    fn test_full_markup() {
        insta::assert_snapshot!(
            resolved(Options::new()).to_svg(false),
            @r#"<svg xmlns="http://www.w3.org/2000/svg" class="heroicon heroicon-outline-x" viewBox="0 0 24 24" width="24" height="24" version="1.1" fill="none" stroke="currentColor" aria-hidden="true"><path d="M6 18 18 6"/></svg>"#
        );
    }

    #[test]
    fn test_comment_precedes_element() {
        let svg = resolved(Options::new()).to_svg(true);
        assert!(svg.starts_with("<!-- Heroicon name: outline/x -->\n<svg "));
    }

    #[test]
    fn test_namespace_is_first_attribute() {
        let svg = resolved(Options::new().with("id", "a")).to_svg(false);
        assert!(svg.starts_with(r#"<svg xmlns="http://www.w3.org/2000/svg" class="#));
        assert!(svg.contains(r#" aria-hidden="true" id="a">"#));
    }

    #[test]
    fn test_markup_display_and_flag() {
        let markup = Markup::new("<svg></svg>".to_string(), true);
        assert!(markup.is_raw());
        assert_eq!(markup.to_string(), "<svg></svg>");
        assert_eq!(markup.into_string(), "<svg></svg>");
    }
}
