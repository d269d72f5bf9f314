//! Locator leaf variants

use serde::{Deserialize, Serialize};
use spotter_core_types::{Point, Region};
use std::fmt;

/// Locator enumeration
///
/// A locator is a leaf specification of "what to find". The set is closed
/// at the type level but extensible through the typename registry, which
/// maps literal text onto these variants.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Locator {
    /// Absolute screen coordinates
    Coordinates { x: i32, y: i32 },

    /// Offset relative to the current anchor
    Offset { dx: i32, dy: i32 },

    /// A single point
    Point(Point),

    /// A rectangular region
    Region(Region),

    /// An on-screen image template
    Image(ImageTemplate),

    /// Text recognized by an OCR backend
    Ocr { text: String },

    /// Backend-specific browser selector arguments
    Browser { args: Vec<String> },

    /// Named reference into the external alias store
    Alias { name: String },
}

/// Image template reference with optional matching parameters
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ImageTemplate {
    /// Template image path
    pub path: String,

    /// Matching confidence (1-100, backend default when absent)
    pub confidence: Option<u8>,

    /// Optional source image override
    pub source: Option<String>,
}

impl Locator {
    /// Registry typename for this variant
    pub fn type_name(&self) -> &'static str {
        match self {
            Locator::Coordinates { .. } => "coordinates",
            Locator::Offset { .. } => "offset",
            Locator::Point(_) => "point",
            Locator::Region(_) => "region",
            Locator::Image(_) => "image",
            Locator::Ocr { .. } => "ocr",
            Locator::Browser { .. } => "browser",
            Locator::Alias { .. } => "alias",
        }
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Locator::Coordinates { x, y } => write!(f, "coordinates:{},{}", x, y),
            Locator::Offset { dx, dy } => write!(f, "offset:{},{}", dx, dy),
            Locator::Point(point) => write!(f, "{}", point),
            Locator::Region(region) => write!(f, "{}", region),
            Locator::Image(template) => {
                write!(f, "image:{}", template.path)?;
                if let Some(confidence) = template.confidence {
                    write!(f, ",{}", confidence)?;
                }
                if let Some(source) = &template.source {
                    write!(f, ",{}", source)?;
                }
                Ok(())
            }
            Locator::Ocr { text } => write!(f, "ocr:{}", text),
            Locator::Browser { args } => write!(f, "browser:{}", args.join(",")),
            Locator::Alias { name } => write!(f, "alias:{}", name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_display_forms() {
        assert_eq!(
            Locator::Coordinates { x: 10, y: 20 }.to_string(),
            "coordinates:10,20"
        );
        assert_eq!(Locator::Point(Point::new(1, 2)).to_string(), "point:1,2");
        assert_eq!(
            Locator::Image(ImageTemplate {
                path: "logo.png".to_string(),
                confidence: Some(90),
                source: None,
            })
            .to_string(),
            "image:logo.png,90"
        );
        assert_eq!(
            Locator::Alias {
                name: "login button".to_string()
            }
            .to_string(),
            "alias:login button"
        );
    }

    #[test]
    fn equality_is_structural() {
        let a = Locator::Offset { dx: 3, dy: -4 };
        let b = Locator::Offset { dx: 3, dy: -4 };
        assert_eq!(a, b);
        assert_ne!(a, Locator::Offset { dx: 3, dy: 4 });
    }
}
