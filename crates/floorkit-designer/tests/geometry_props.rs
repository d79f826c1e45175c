//! Property tests for the geometry invariants.

use floorkit_designer::geometry::{
    CanvasBounds, EntityGeometry, Point, Rect, ResizeEdges, MAX_DIMENSION, MIN_DIMENSION,
};
use proptest::prelude::*;

proptest! {
    #[test]
    fn resize_always_lands_in_range(
        w in -10_000.0f64..10_000.0,
        h in -10_000.0f64..10_000.0,
        x in -1_000.0f64..1_000.0,
        y in -1_000.0f64..1_000.0,
    ) {
        let geo = EntityGeometry::new();
        let (_, size) = geo.apply_resize(ResizeEdges::BOTTOM_RIGHT, Rect::new(x, y, w, h));
        prop_assert!(size.width >= MIN_DIMENSION && size.width <= MAX_DIMENSION);
        prop_assert!(size.height >= MIN_DIMENSION && size.height <= MAX_DIMENSION);
    }

    #[test]
    fn resize_from_left_anchors_right_edge(
        w in 1.0f64..10_000.0,
        x in -1_000.0f64..1_000.0,
    ) {
        let geo = EntityGeometry::new();
        let proposed = Rect::new(x, 0.0, w, 100.0);
        let (pos, size) = geo.apply_resize(ResizeEdges::LEFT, proposed);
        let right_before = proposed.x + proposed.width;
        prop_assert!((pos.x + size.width - right_before).abs() < 1e-9);
    }

    #[test]
    fn rotation_always_normalized(
        start in 0.0f64..360.0,
        deltas in prop::collection::vec(-720.0f64..720.0, 1..20),
    ) {
        let mut geo = EntityGeometry::new();
        geo.rotation = start;
        for d in deltas {
            geo.rotation = geo.apply_rotation(d);
            prop_assert!((0.0..360.0).contains(&geo.rotation));
        }
    }

    #[test]
    fn rotation_path_independent(
        a in -720.0f64..720.0,
        b in -720.0f64..720.0,
    ) {
        // Two deltas applied in sequence land on the same angle as their sum
        let mut geo = EntityGeometry::new();
        geo.rotation = geo.apply_rotation(a);
        geo.rotation = geo.apply_rotation(b);
        let stepped = geo.rotation;

        let mut geo = EntityGeometry::new();
        geo.rotation = geo.apply_rotation(a + b);
        prop_assert!((stepped - geo.rotation).abs() < 1e-6
            || (stepped - geo.rotation).abs() > 360.0 - 1e-6);
    }

    #[test]
    fn committed_position_stays_in_canvas(
        x in -5_000.0f64..5_000.0,
        y in -5_000.0f64..5_000.0,
    ) {
        let geo = EntityGeometry::new();
        let canvas = CanvasBounds::new(1200.0, 600.0);
        let p = geo.clamp_position(Point::new(x, y), canvas);
        let (x1, y1, x2, y2) = EntityGeometry { position: p, ..geo }.bounds();
        prop_assert!(x1 >= 0.0 && y1 >= 0.0);
        prop_assert!(x2 <= canvas.width && y2 <= canvas.height);
    }

    #[test]
    fn locked_geometry_never_moves(
        dx in -500.0f64..500.0,
        dy in -500.0f64..500.0,
        delta in -720.0f64..720.0,
        w in -1_000.0f64..1_000.0,
        h in -1_000.0f64..1_000.0,
    ) {
        let geo = EntityGeometry { locked: true, ..EntityGeometry::new() };
        prop_assert_eq!(geo.apply_translation(dx, dy), geo.position);
        prop_assert_eq!(geo.apply_rotation(delta), geo.rotation);
        let (pos, size) = geo.apply_resize(ResizeEdges::TOP_LEFT, Rect::new(0.0, 0.0, w, h));
        prop_assert_eq!(pos, geo.position);
        prop_assert_eq!(size, geo.size);
    }
}
