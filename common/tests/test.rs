use common::shapes::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

#[test]
fn test_new_and_getters() {
    let rect = Rect::new(0.0, 0.0, 4.0, 6.0);
    assert_eq!(rect.width(), 4.0);
    assert_eq!(rect.height(), 6.0);
    assert_eq!(rect.min(), Point::new(0.0, 0.0));
    assert_eq!(rect.max(), Point::new(4.0, 6.0));
    assert_eq!(rect.center(), Point::new(2.0, 3.0));
}

#[test]
fn test_from_corners_orders_coordinates() {
    let rect = Rect::from_corners(Point::new(10.0, -2.0), Point::new(-4.0, 8.0));
    assert_eq!(rect, Rect::new(-4.0, -2.0, 10.0, 8.0));
}

#[test]
fn test_from_center() {
    let rect = Rect::from_center(Point::new(2.0, 3.0), 4.0, 6.0);
    assert_eq!(rect, Rect::new(0.0, 0.0, 4.0, 6.0));
}

#[test]
fn test_from_points() {
    assert_eq!(Rect::from_points(&[]), None);
    let points = [
        Point::new(1.0, 5.0),
        Point::new(-3.0, 2.0),
        Point::new(4.0, -1.0),
    ];
    assert_eq!(
        Rect::from_points(&points),
        Some(Rect::new(-3.0, -1.0, 4.0, 5.0))
    );
}

#[test]
fn test_is_valid() {
    assert!(Rect::new(0.0, 0.0, 0.0, 0.0).is_valid());
    assert!(Rect::EMPTY.is_valid());
    assert!(!Rect::new(5.0, 0.0, 1.0, 1.0).is_valid());
    assert!(!Rect::new(0.0, f32::NAN, 1.0, 1.0).is_valid());
    assert!(!Rect::new(0.0, 0.0, f32::INFINITY, 1.0).is_valid());
}

#[test]
fn test_intersects_is_inclusive() {
    let a = Rect::new(0.0, 0.0, 10.0, 10.0);
    assert!(a.intersects(&Rect::new(5.0, 5.0, 20.0, 20.0)));
    assert!(a.intersects(&Rect::new(10.0, 10.0, 20.0, 20.0)));
    assert!(!a.intersects(&Rect::new(10.5, 0.0, 20.0, 20.0)));
    assert!(!a.intersects(&Rect::new(0.0, -5.0, 10.0, -0.5)));
}

#[test]
fn test_contains_point() {
    let rect = Rect::new(0.0, 0.0, 4.0, 6.0);
    assert!(rect.contains_point(Point::new(2.0, 3.0)));
    assert!(rect.contains_point(Point::new(4.0, 6.0)));
    assert!(!rect.contains_point(Point::new(6.0, 3.0)));
    assert!(!rect.contains_point(Point::new(2.0, 8.0)));
}

#[test]
fn test_contains_rect() {
    let outer = Rect::new(0.0, 0.0, 10.0, 10.0);
    assert!(outer.contains_rect(&Rect::new(1.0, 1.0, 9.0, 9.0)));
    assert!(outer.contains_rect(&outer));
    assert!(!outer.contains_rect(&Rect::new(1.0, 1.0, 11.0, 9.0)));
}

#[test]
fn test_union_and_expand_to_include() {
    let mut rect = Rect::new(0.0, 0.0, 4.0, 6.0);
    let other = Rect::new(4.0, 4.0, 8.0, 6.0);
    assert_eq!(rect.union(&other), Rect::new(0.0, 0.0, 8.0, 6.0));
    rect.expand_to_include(&Rect::new(-2.0, 1.0, 1.0, 9.0));
    assert_eq!(rect, Rect::new(-2.0, 0.0, 4.0, 9.0));
}

#[test]
fn test_expand() {
    let rect = Rect::new(0.0, 0.0, 4.0, 6.0).expanded(1.0, 2.0);
    assert_eq!(rect, Rect::new(-1.0, -2.0, 5.0, 8.0));
}

#[test]
fn test_circle_bounding_box_and_contains() {
    let circle = Circle::new(5.0, 5.0, 2.0);
    assert_eq!(circle.bounding_box(), Rect::new(3.0, 3.0, 7.0, 7.0));
    assert!(circle.contains_point(Point::new(6.0, 6.0)));
    assert!(!circle.contains_point(Point::new(7.0, 7.0)));
}

#[test]
fn test_random_point_inside() {
    let rect = Rect::new(-1.0, -1.0, 5.0, 7.0);
    let radius = 1.0;

    // Use a fixed seed for reproducibility.
    let mut rng: StdRng = SeedableRng::seed_from_u64(123);

    for _ in 0..10 {
        let point = rect.random_point_inside(radius, &mut rng);
        let circle = Circle {
            center: point,
            radius,
        };
        assert!(rect.contains_rect(&circle.bounding_box()));
    }
}

#[test]
fn test_random_point_inside_small_rectangle() {
    let rect = Rect::new(1.0, 2.0, 3.0, 4.0);
    let radius = 2.0;

    let mut rng: StdRng = SeedableRng::seed_from_u64(123);

    // The generated coordinates are clamped to the min corner plus the margin.
    let point = rect.random_point_inside(radius, &mut rng);
    assert_eq!(point, Point::new(rect.min_x + radius + 1.0, rect.min_y + radius + 1.0));
}

#[test]
fn test_random_rect_inside() {
    let bounds = Rect::new(0.0, 0.0, 500.0, 300.0);
    let mut rng: StdRng = SeedableRng::seed_from_u64(7);

    for _ in 0..100 {
        let rect = bounds.random_rect_inside(40.0, &mut rng);
        assert!(rect.is_valid());
        assert!(bounds.contains_rect(&rect));
    }
}
