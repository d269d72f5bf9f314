//! Sliding-window correlation search with non-maximum suppression

use crate::errors::MatchError;
use crate::models::MatchOptions;
use image::{imageops, GrayImage};
use spotter_core_types::Region;
use tracing::debug;

/// Hard cap on peak-extraction iterations, bounding worst-case cost on
/// pathological or noisy inputs.
pub const MAX_MATCH_ITERATIONS: usize = 256;

/// Map user-facing confidence (1-100, logarithmic) onto the linear
/// correlation-coefficient tolerance in [0.01, 1.00]
///
/// Strictly monotonic increasing; out-of-range inputs are clamped first.
pub fn confidence_to_tolerance(confidence: u8) -> f64 {
    let clamped = f64::from(confidence.clamp(1, 100));
    (1.0 + 99.0 * clamped.ln() / 100f64.ln()) / 100.0
}

/// Template matching engine
pub struct TemplateMatcher;

impl TemplateMatcher {
    /// Find template occurrences in a grayscale source image
    ///
    /// Returned regions are in source-image pixel coordinates, even when
    /// `options.region` restricted the search. Regions are emitted in
    /// decreasing correlation order.
    pub fn find(
        image: &GrayImage,
        template: &GrayImage,
        options: &MatchOptions,
    ) -> Result<Vec<Region>, MatchError> {
        let (template_width, template_height) = template.dimensions();
        if template_width == 0 || template_height == 0 {
            return Err(MatchError::InvalidInput("template has no pixels".to_string()));
        }
        if image.width() == 0 || image.height() == 0 {
            return Err(MatchError::InvalidInput(
                "source image has no pixels".to_string(),
            ));
        }

        let tolerance = confidence_to_tolerance(options.confidence);
        let bounds = Region::from_size(0, 0, image.width(), image.height())?;

        // crop to the search region before any correlation work
        let cropped;
        let (search, offset_x, offset_y) = match &options.region {
            Some(region) => {
                let clipped = region.clamp(&bounds)?;
                cropped = imageops::crop_imm(
                    image,
                    clipped.left as u32,
                    clipped.top as u32,
                    clipped.width(),
                    clipped.height(),
                )
                .to_image();
                (&cropped, clipped.left, clipped.top)
            }
            None => (image, 0, 0),
        };

        if template_width > search.width() || template_height > search.height() {
            return Err(MatchError::TemplateTooLarge {
                template_width,
                template_height,
                search_width: search.width(),
                search_height: search.height(),
            });
        }

        let (mut coefficients, map_width, map_height) = correlation_map(search, template);
        debug!(
            tolerance,
            map_width, map_height, "correlation map computed"
        );

        let mut regions = Vec::new();
        for _ in 0..MAX_MATCH_ITERATIONS {
            let Some((index, peak)) = argmax(&coefficients) else {
                break;
            };
            if peak < tolerance {
                break;
            }
            let x = index % map_width;
            let y = index / map_width;
            let region = Region::from_size(
                offset_x + x as i32,
                offset_y + y as i32,
                template_width,
                template_height,
            )?;
            debug!(%region, coefficient = peak, "template match");
            regions.push(region);

            if options.limit.is_some_and(|limit| regions.len() >= limit) {
                break;
            }
            suppress(
                &mut coefficients,
                map_width,
                map_height,
                x,
                y,
                template_width,
                template_height,
            );
        }

        if regions.is_empty() {
            return Err(MatchError::NoMatches);
        }
        Ok(regions)
    }
}

/// Zero-normalized cross-correlation of the template over every window
///
/// Produces one `(W-w+1) x (H-h+1)` coefficient matrix. Windows or
/// templates without contrast get coefficient 0 rather than dividing by a
/// vanishing denominator.
fn correlation_map(search: &GrayImage, template: &GrayImage) -> (Vec<f64>, usize, usize) {
    let (search_width, search_height) = search.dimensions();
    let (template_width, template_height) = template.dimensions();
    let map_width = (search_width - template_width + 1) as usize;
    let map_height = (search_height - template_height + 1) as usize;
    let pixel_count = f64::from(template_width) * f64::from(template_height);

    let template_pixels: Vec<f64> = template.pixels().map(|p| f64::from(p[0])).collect();
    let template_mean = template_pixels.iter().sum::<f64>() / pixel_count;
    let template_dev: Vec<f64> = template_pixels
        .iter()
        .map(|value| value - template_mean)
        .collect();
    let template_norm = template_dev
        .iter()
        .map(|dev| dev * dev)
        .sum::<f64>()
        .sqrt();

    let mut coefficients = vec![0.0; map_width * map_height];
    for map_y in 0..map_height {
        for map_x in 0..map_width {
            let mut window_sum = 0.0;
            for ty in 0..template_height {
                for tx in 0..template_width {
                    window_sum +=
                        f64::from(search.get_pixel(map_x as u32 + tx, map_y as u32 + ty)[0]);
                }
            }
            let window_mean = window_sum / pixel_count;

            let mut numerator = 0.0;
            let mut window_square_sum = 0.0;
            for ty in 0..template_height {
                for tx in 0..template_width {
                    let value =
                        f64::from(search.get_pixel(map_x as u32 + tx, map_y as u32 + ty)[0])
                            - window_mean;
                    numerator += value * template_dev[(ty * template_width + tx) as usize];
                    window_square_sum += value * value;
                }
            }

            let denominator = window_square_sum.sqrt() * template_norm;
            coefficients[map_y * map_width + map_x] = if denominator > f64::EPSILON {
                numerator / denominator
            } else {
                0.0
            };
        }
    }
    (coefficients, map_width, map_height)
}

/// Position and value of the global maximum coefficient
fn argmax(coefficients: &[f64]) -> Option<(usize, f64)> {
    let mut best: Option<(usize, f64)> = None;
    for (index, &value) in coefficients.iter().enumerate() {
        match best {
            Some((_, peak)) if value <= peak => {}
            _ => best = Some((index, value)),
        }
    }
    best
}

/// Zero out a template-sized neighborhood centered on a match so the same
/// element is not re-detected
fn suppress(
    coefficients: &mut [f64],
    map_width: usize,
    map_height: usize,
    x: usize,
    y: usize,
    template_width: u32,
    template_height: u32,
) {
    let half_width = (template_width / 2) as usize;
    let half_height = (template_height / 2) as usize;
    let x0 = x.saturating_sub(half_width);
    let x1 = (x + half_width).min(map_width - 1);
    let y0 = y.saturating_sub(half_height);
    let y1 = (y + half_height).min(map_height - 1);
    for yy in y0..=y1 {
        for xx in x0..=x1 {
            coefficients[yy * map_width + xx] = 0.0;
        }
    }
}
