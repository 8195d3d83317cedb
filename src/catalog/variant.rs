//! Icon style variants

use std::fmt;
use std::str::FromStr;

use crate::error::IconError;

/// A named visual style of an icon
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Variant {
    /// 24x24, 1.5px stroke
    Outline,
    /// 24x24, filled
    Solid,
    /// 20x20, filled
    Mini,
    /// 16x16, filled
    Micro,
}

/// How a variant paints its paths
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Paint {
    Stroke,
    Fill,
}

impl Variant {
    pub const ALL: [Variant; 4] = [
        Variant::Outline,
        Variant::Solid,
        Variant::Mini,
        Variant::Micro,
    ];

    pub const ALL_NAMES: [&'static str; 4] = ["outline", "solid", "mini", "micro"];

    pub fn as_str(self) -> &'static str {
        match self {
            Variant::Outline => "outline",
            Variant::Solid => "solid",
            Variant::Mini => "mini",
            Variant::Micro => "micro",
        }
    }

    pub fn paint(self) -> Paint {
        match self {
            Variant::Outline => Paint::Stroke,
            Variant::Solid | Variant::Mini | Variant::Micro => Paint::Fill,
        }
    }

    /// Presentation attributes implied by the variant family
    pub fn presentation(self) -> &'static [(&'static str, &'static str)] {
        match self.paint() {
            Paint::Stroke => &[("fill", "none"), ("stroke", "currentColor")],
            Paint::Fill => &[("fill", "currentColor")],
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Variant {
    type Err = IconError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Variant::ALL
            .into_iter()
            .find(|v| v.as_str() == s)
            .ok_or_else(|| IconError::UnknownVariant {
                variant: s.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_variants() {
        for name in Variant::ALL_NAMES {
            let variant: Variant = name.parse().unwrap();
            assert_eq!(variant.as_str(), name);
        }
    }

    #[test]
    fn test_parse_unknown_variant() {
        let err = "blarf".parse::<Variant>().unwrap_err();
        assert_eq!(
            err,
            IconError::UnknownVariant {
                variant: "blarf".to_string()
            }
        );
    }

    #[test]
    fn test_variant_is_case_sensitive() {
        assert!("Solid".parse::<Variant>().is_err());
    }

    #[test]
    fn test_presentation_by_family() {
        assert_eq!(
            Variant::Outline.presentation(),
            &[("fill", "none"), ("stroke", "currentColor")]
        );
        assert_eq!(Variant::Micro.presentation(), &[("fill", "currentColor")]);
    }
}
