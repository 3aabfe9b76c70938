use super::*;

#[test]
fn shared_edge_is_not_overlap() {
    // A spans x in [0, 10], B spans x in [10, 20].
    assert!(!overlaps(Vec2::new(5.0, 5.0), Size::splat(10), Vec2::new(15.0, 5.0), Size::splat(10)));
    // Same on the vertical axis.
    assert!(!overlaps(Vec2::new(5.0, 5.0), Size::splat(10), Vec2::new(5.0, 15.0), Size::splat(10)));
}

#[test]
fn shared_corner_is_not_overlap() {
    assert!(!overlaps(Vec2::ZERO, Size::splat(2), Vec2::new(2.0, 2.0), Size::splat(2)));
}

#[test]
fn positive_area_intersection_overlaps() {
    assert!(overlaps(Vec2::new(5.0, 5.0), Size::splat(10), Vec2::new(14.9, 5.0), Size::splat(10)));
    assert!(overlaps(Vec2::new(100.0, 100.0), Size::splat(4), Vec2::new(101.0, 101.0), Size::splat(8)));
}

#[test]
fn containment_overlaps_both_ways() {
    let big = Size::new(100, 40);
    let small = Size::new(2, 2);
    assert!(overlaps(Vec2::ZERO, big, Vec2::new(10.0, -5.0), small));
    assert!(overlaps(Vec2::new(10.0, -5.0), small, Vec2::ZERO, big));
}

#[test]
fn separated_boxes_do_not_overlap() {
    assert!(!overlaps(Vec2::ZERO, Size::new(8, 8), Vec2::new(0.0, 50.0), Size::new(8, 8)));
    assert!(!overlaps(Vec2::new(-30.0, 0.0), Size::new(8, 8), Vec2::new(30.0, 0.0), Size::new(8, 8)));
}

#[test]
fn aabb_is_center_anchored() {
    let b = aabb(Vec2::new(60.0, 60.0), Size::splat(100));
    assert_eq!(b.min, Vec2::new(10.0, 10.0));
    assert_eq!(b.max, Vec2::new(110.0, 110.0));
}
