//! File-backed finder over a screenshot image
//!
//! Maps locator leaves onto a grayscale screenshot held in memory. Point
//! and coordinate leaves anchor 1x1 regions, offsets translate the current
//! anchor, image leaves run the template matcher (scoped to the anchor
//! region when one is set). OCR and browser leaves need engines this
//! binary does not ship; they surface the environment-unavailable failure
//! instead of pretending "no match".

use image::GrayImage;
use locator_expr::{Anchor, ExprError, Finder, ImageTemplate, Locator};
use spotter_core_types::Region;
use std::path::PathBuf;
use template_match::{MatchError, MatchOptions, TemplateMatcher};
use tracing::debug;

/// Finder backend resolving locators against a screenshot
pub struct ImageFinder {
    screen: GrayImage,
    base_dir: PathBuf,
}

impl ImageFinder {
    /// Create a finder over the given screenshot
    pub fn new(screen: GrayImage) -> Self {
        Self {
            screen,
            base_dir: PathBuf::from("."),
        }
    }

    /// Resolve template paths relative to this directory
    pub fn with_base_dir(mut self, base_dir: impl Into<PathBuf>) -> Self {
        self.base_dir = base_dir.into();
        self
    }

    fn find_template(
        &self,
        template: &ImageTemplate,
        context: &Anchor<Region>,
    ) -> Result<Vec<Region>, ExprError> {
        let path = self.base_dir.join(&template.path);
        let pixels = image::open(&path)
            .map_err(|err| {
                ExprError::Backend(format!(
                    "cannot load template '{}': {}",
                    path.display(),
                    err
                ))
            })?
            .to_luma8();

        let mut options = MatchOptions::new();
        if let Some(confidence) = template.confidence {
            options = options.with_confidence(confidence);
        }
        if let Anchor::Match(region) = context {
            options = options.with_region(*region);
        }

        match TemplateMatcher::find(&self.screen, &pixels, &options) {
            Ok(regions) => {
                debug!(template = %template.path, matches = regions.len(), "template found");
                Ok(regions)
            }
            // an exhausted search is an empty leaf, not a dispatch failure
            Err(MatchError::NoMatches) => Ok(Vec::new()),
            Err(err) => Err(ExprError::Backend(err.to_string())),
        }
    }
}

impl Finder<Region> for ImageFinder {
    fn find(&mut self, context: &Anchor<Region>, locator: &Locator) -> Result<Vec<Region>, ExprError> {
        match locator {
            Locator::Coordinates { x, y } => Ok(vec![Region::from_size(*x, *y, 1, 1)?]),
            Locator::Point(point) => Ok(vec![Region::from_size(point.x, point.y, 1, 1)?]),
            Locator::Region(region) => Ok(vec![*region]),
            Locator::Offset { dx, dy } => match context {
                Anchor::Match(region) => Ok(vec![region.translate(*dx, *dy)]),
                Anchor::Undefined => Ok(vec![Region::from_size(*dx, *dy, 1, 1)?]),
            },
            Locator::Image(template) => self.find_template(template, context),
            Locator::Ocr { .. } => Err(ExprError::Backend(
                MatchError::Unavailable("no OCR engine is wired into this finder".to_string())
                    .to_string(),
            )),
            Locator::Browser { .. } => Err(ExprError::Backend(
                MatchError::Unavailable(
                    "no browser automation backend is wired into this finder".to_string(),
                )
                .to_string(),
            )),
            Locator::Alias { name } => Err(ExprError::UnknownAlias(name.clone())),
        }
    }
}
