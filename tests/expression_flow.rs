//! End-to-end expression dispatch through the bundled image finder

use image::GrayImage;
use locator_expr::{Anchor, ExprError, InMemoryAliasStore, Locator, LocatorRegistry, Resolver};
use spotter_cli::ImageFinder;
use spotter_core_types::{Point, Region};
use std::sync::Arc;

fn resolver_with_aliases() -> Resolver {
    let mut store = InMemoryAliasStore::new();
    store.insert("origin", Locator::Point(Point::new(0, 0)));
    store.insert("corner", Locator::Coordinates { x: 90, y: 90 });
    Resolver::new(LocatorRegistry::new().with_aliases(Arc::new(store)))
}

fn screen_finder() -> ImageFinder {
    ImageFinder::new(GrayImage::from_pixel(100, 100, image::Luma([0])))
}

#[test]
fn chained_offset_lands_relative_to_each_alternative() {
    let resolver = resolver_with_aliases();
    let mut finder = screen_finder();
    let result = resolver
        .dispatch("(point:10,20 or point:20,20) then offset:200,0", &mut finder)
        .unwrap();
    // OR short-circuits to its first alternative, then the offset re-anchors
    assert_eq!(
        result,
        vec![Anchor::Match(Region::from_size(210, 20, 1, 1).unwrap())]
    );
}

#[test]
fn aliases_resolve_through_the_store() {
    let resolver = resolver_with_aliases();
    let mut finder = screen_finder();
    let result = resolver.dispatch("origin then offset:5,5", &mut finder).unwrap();
    assert_eq!(
        result,
        vec![Anchor::Match(Region::from_size(5, 5, 1, 1).unwrap())]
    );

    let missing = resolver.dispatch("nonesuch", &mut finder);
    assert_eq!(missing, Err(ExprError::UnknownAlias("nonesuch".to_string())));
}

#[test]
fn negated_missing_leaf_satisfies_and_branch() {
    let resolver = resolver_with_aliases();

    // a finder that never matches image leaves: negation succeeds
    let mut finder = |context: &Anchor<Region>, locator: &Locator| match locator {
        Locator::Image(_) => Ok(Vec::new()),
        Locator::Point(point) => Ok(vec![Region::from_size(point.x, point.y, 1, 1).unwrap()]),
        other => panic!("unexpected locator {:?} with context {:?}", other, context),
    };
    let result = resolver
        .dispatch("!image:gone.png and point:10,10", &mut finder)
        .unwrap();
    assert_eq!(
        result,
        vec![
            Anchor::Undefined,
            Anchor::Match(Region::from_size(10, 10, 1, 1).unwrap()),
        ]
    );
}

#[test]
fn results_come_back_sorted_and_unique() {
    let resolver = resolver_with_aliases();
    let mut finder = screen_finder();
    let result = resolver
        .dispatch("corner and point:10,10 and corner", &mut finder)
        .unwrap();
    assert_eq!(
        result,
        vec![
            Anchor::Match(Region::from_size(10, 10, 1, 1).unwrap()),
            Anchor::Match(Region::from_size(90, 90, 1, 1).unwrap()),
        ]
    );
}
