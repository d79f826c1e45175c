//! End-to-end exercises of the layout engine: store, gestures, lock policy,
//! and overlay working together.

use floorkit_core::EntityKind;
use floorkit_designer::{
    CanvasBounds, DetailOverlay, DismissOrigin, FloorStore, GestureController, GestureKind, Point,
    Rect, ResizeEdges,
};

#[test]
fn rack_drag_resize_rotate_lock_sequence() {
    let mut store = FloorStore::new();
    let mut controller = GestureController::new(CanvasBounds::new(1200.0, 600.0));

    // Create a rack at default geometry: origin, unrotated, unlocked
    let id = store.create(EntityKind::Rack, Vec::new());
    controller.attach(&store, id);
    {
        let rack = store.get(id).unwrap();
        assert_eq!(rack.geometry.position, Point::new(0.0, 0.0));
        assert!(!rack.geometry.locked);
    }

    // Drag by (+40, +25)
    assert!(controller.begin(&store, id, GestureKind::Drag));
    controller.drag_by(&mut store, id, 40.0, 25.0);
    controller.end(&mut store, id);
    assert_eq!(store.get(id).unwrap().geometry.position, Point::new(40.0, 25.0));

    // Resize from the bottom-right corner toward 20x20: clamps to 50x50
    assert!(controller.begin(&store, id, GestureKind::Resize));
    controller.resize_to(
        &mut store,
        id,
        ResizeEdges::BOTTOM_RIGHT,
        Rect::new(40.0, 25.0, 20.0, 20.0),
    );
    controller.end(&mut store, id);
    let size = store.get(id).unwrap().geometry.size;
    assert_eq!((size.width, size.height), (50.0, 50.0));

    // Rotate by 375 degrees: stored angle is 15
    assert!(controller.begin(&store, id, GestureKind::Rotate));
    controller.rotate_by(&mut store, id, 375.0);
    controller.end(&mut store, id);
    assert_eq!(store.get(id).unwrap().geometry.rotation, 15.0);

    // Lock, then attempt a drag: position stays at (40, 25)
    store.toggle_lock(id);
    controller.queue_rebind(id);
    controller.process_rebinds(&store);

    assert!(!controller.begin(&store, id, GestureKind::Drag));
    controller.drag_by(&mut store, id, 10.0, 10.0);
    assert_eq!(store.get(id).unwrap().geometry.position, Point::new(40.0, 25.0));
}

#[test]
fn lock_toggle_twice_restores_behavior() {
    let mut store = FloorStore::new();
    let mut controller = GestureController::new(CanvasBounds::default());
    let id = store.create(EntityKind::Pallet, Vec::new());
    controller.attach(&store, id);

    let before = store.get(id).unwrap().geometry;

    store.toggle_lock(id);
    controller.queue_rebind(id);
    controller.process_rebinds(&store);

    store.toggle_lock(id);
    controller.queue_rebind(id);
    controller.process_rebinds(&store);

    // Same position, size, rotation, and gestures accepted again
    assert_eq!(store.get(id).unwrap().geometry, before);
    assert!(controller.begin(&store, id, GestureKind::Drag));
    controller.drag_by(&mut store, id, 1.0, 1.0);
    assert_eq!(store.get(id).unwrap().geometry.position, Point::new(1.0, 1.0));
}

#[test]
fn two_pallets_receive_distinct_local_ids() {
    let mut store = FloorStore::new();
    let a = store.create(EntityKind::Pallet, Vec::new());
    let b = store.create(EntityKind::Pallet, Vec::new());

    assert_ne!(a, b);
    assert!(a.is_local() && b.is_local());
    assert_eq!(store.list(EntityKind::Pallet).len(), 2);
}

#[test]
fn hidden_door_drops_gestures_and_detail() {
    let mut store = FloorStore::new();
    let mut controller = GestureController::new(CanvasBounds::default());
    let mut overlay = DetailOverlay::new();

    let id = store.create(EntityKind::Door, Vec::new());
    controller.attach(&store, id);
    store.remove(id);

    assert!(!controller.begin(&store, id, GestureKind::Drag));
    assert!(!overlay.open_entity(&store, id));
    // The record survives as hidden
    assert!(store.contains(id));
}

#[test]
fn outside_click_closes_nested_panels() {
    let mut store = FloorStore::new();
    let mut overlay = DetailOverlay::new();

    let product = floorkit_core::Product {
        product_id: "p-7".to_string(),
        name: "Tarima".to_string(),
        price: 3.5,
        stock_quantity: 50,
        category: None,
        description: None,
        supplier: None,
    };
    let id = store.create(EntityKind::Rack, vec![product]);

    assert!(overlay.open_entity(&store, id));
    assert!(overlay.open_product(&store, "p-7"));
    assert!(overlay.dismiss_entity(DismissOrigin::OutsideClick));
    assert!(overlay.entity_panel().is_none());
    assert!(overlay.product_panel().is_none());
}
