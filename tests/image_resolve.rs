//! Dispatch with template files on disk

use image::{GrayImage, Luma};
use locator_expr::{Anchor, LocatorRegistry, Resolver};
use spotter_cli::ImageFinder;
use spotter_core_types::Region;

fn pattern_pixel(x: u32, y: u32) -> u8 {
    ((x * 29 + y * 61) % 190) as u8 + 30
}

fn template(width: u32, height: u32) -> GrayImage {
    GrayImage::from_fn(width, height, |x, y| Luma([pattern_pixel(x, y)]))
}

fn screen_with_stamp(left: u32, top: u32) -> GrayImage {
    let mut screen = GrayImage::from_pixel(120, 80, Luma([15]));
    for dy in 0..12 {
        for dx in 0..16 {
            screen.put_pixel(left + dx, top + dy, Luma([pattern_pixel(dx, dy)]));
        }
    }
    screen
}

#[test]
fn image_leaf_matches_where_the_template_was_stamped() {
    let dir = tempfile::tempdir().unwrap();
    template(16, 12).save(dir.path().join("button.png")).unwrap();

    let resolver = Resolver::new(LocatorRegistry::new());
    let mut finder = ImageFinder::new(screen_with_stamp(40, 24)).with_base_dir(dir.path());

    let result = resolver
        .dispatch("image:button.png,80", &mut finder)
        .unwrap();
    assert_eq!(
        result,
        vec![Anchor::Match(Region::from_size(40, 24, 16, 12).unwrap())]
    );
}

#[test]
fn chain_offsets_from_the_matched_template() {
    let dir = tempfile::tempdir().unwrap();
    template(16, 12).save(dir.path().join("button.png")).unwrap();

    let resolver = Resolver::new(LocatorRegistry::new());
    let mut finder = ImageFinder::new(screen_with_stamp(40, 24)).with_base_dir(dir.path());

    let result = resolver
        .dispatch("image:button.png then offset:10,-4", &mut finder)
        .unwrap();
    assert_eq!(
        result,
        vec![Anchor::Match(Region::from_size(50, 20, 16, 12).unwrap())]
    );
}

#[test]
fn missing_template_leaf_falls_through_or() {
    let dir = tempfile::tempdir().unwrap();
    template(16, 12).save(dir.path().join("button.png")).unwrap();
    // a second template that is nowhere on screen
    GrayImage::from_fn(10, 10, |x, y| Luma([((x * 53 + y * 17) % 180) as u8 + 40]))
        .save(dir.path().join("ghost.png"))
        .unwrap();

    let resolver = Resolver::new(LocatorRegistry::new());
    let mut finder = ImageFinder::new(screen_with_stamp(40, 24)).with_base_dir(dir.path());

    let result = resolver
        .dispatch("image:ghost.png or image:button.png", &mut finder)
        .unwrap();
    assert_eq!(
        result,
        vec![Anchor::Match(Region::from_size(40, 24, 16, 12).unwrap())]
    );
}
