//! Geometry model for placeable entities.
//!
//! Holds and validates the spatial attributes of one entity and exposes pure
//! transform application. The three `apply_*` functions are the single
//! enforcement point for the lock invariant: when `locked` is set they return
//! their input unchanged, and the gesture controller delegates to them rather
//! than re-checking the flag.

use serde::{Deserialize, Serialize};

/// Minimum entity dimension, per axis.
pub const MIN_DIMENSION: f64 = 50.0;
/// Maximum entity dimension, per axis.
pub const MAX_DIMENSION: f64 = 500.0;
/// Default footprint for new racks and pallets.
pub const DEFAULT_SIZE: Size = Size {
    width: 100.0,
    height: 100.0,
};
/// Fixed footprint for doors.
pub const DOOR_SIZE: Size = Size {
    width: 40.0,
    height: 40.0,
};

/// A position in canvas-local units.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    /// Creates a new point.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// An entity footprint in canvas-local units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    /// Creates a new size.
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Clamps both dimensions into the permitted range.
    pub fn clamped(self) -> Self {
        Self {
            width: self.width.clamp(MIN_DIMENSION, MAX_DIMENSION),
            height: self.height.clamp(MIN_DIMENSION, MAX_DIMENSION),
        }
    }
}

/// A proposed rectangle during a resize gesture.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    /// Creates a new rectangle.
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

/// Which edges a resize gesture is dragging. Corners set two.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ResizeEdges {
    pub left: bool,
    pub top: bool,
    pub right: bool,
    pub bottom: bool,
}

impl ResizeEdges {
    /// The right edge alone.
    pub const RIGHT: Self = Self {
        left: false,
        top: false,
        right: true,
        bottom: false,
    };
    /// The left edge alone.
    pub const LEFT: Self = Self {
        left: true,
        top: false,
        right: false,
        bottom: false,
    };
    /// The bottom-right corner.
    pub const BOTTOM_RIGHT: Self = Self {
        left: false,
        top: false,
        right: true,
        bottom: true,
    };
    /// The top-left corner.
    pub const TOP_LEFT: Self = Self {
        left: true,
        top: true,
        right: false,
        bottom: false,
    };
}

/// Canvas bounds that committed entity positions are confined to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasBounds {
    pub width: f64,
    pub height: f64,
}

impl CanvasBounds {
    /// Creates new canvas bounds.
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

impl Default for CanvasBounds {
    fn default() -> Self {
        Self {
            width: 1200.0,
            height: 600.0,
        }
    }
}

impl From<floorkit_core::CanvasConfig> for CanvasBounds {
    fn from(c: floorkit_core::CanvasConfig) -> Self {
        Self {
            width: c.width,
            height: c.height,
        }
    }
}

/// Spatial attributes of one placeable entity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EntityGeometry {
    /// Top-left position in canvas-local units.
    pub position: Point,
    /// Footprint.
    pub size: Size,
    /// Rotation in degrees, always in `[0, 360)`.
    pub rotation: f64,
    /// When set, all transforms are identity.
    pub locked: bool,
}

impl EntityGeometry {
    /// Default geometry for a new rack or pallet: origin, unrotated,
    /// unlocked.
    pub fn new() -> Self {
        Self {
            position: Point::default(),
            size: DEFAULT_SIZE,
            rotation: 0.0,
            locked: false,
        }
    }

    /// Default geometry for a new door.
    pub fn door() -> Self {
        Self {
            position: Point::default(),
            size: DOOR_SIZE,
            rotation: 0.0,
            locked: false,
        }
    }

    /// Applies a translation delta and returns the resulting position.
    ///
    /// Pure: no side effects beyond the returned value. The caller is
    /// responsible for bounds clamping (done once, at gesture end).
    pub fn apply_translation(&self, dx: f64, dy: f64) -> Point {
        if self.locked {
            return self.position;
        }
        Point::new(self.position.x + dx, self.position.y + dy)
    }

    /// Applies a resize from the given edges toward the proposed rectangle.
    ///
    /// Returns the clamped size together with a compensated position so the
    /// anchor edge (the one opposite the dragged edge) does not move when the
    /// proposed dimensions are clamped.
    pub fn apply_resize(&self, edges: ResizeEdges, proposed: Rect) -> (Point, Size) {
        if self.locked {
            return (self.position, self.size);
        }

        let size = Size::new(proposed.width, proposed.height).clamped();

        // Anchor: when dragging the left edge the right edge is fixed, so
        // the x position absorbs the difference between the proposed width
        // and the clamped one. Same for the top edge vertically. Dragging
        // right/bottom leaves the position axis untouched.
        let x = if edges.left {
            let right = proposed.x + proposed.width;
            right - size.width
        } else {
            proposed.x
        };
        let y = if edges.top {
            let bottom = proposed.y + proposed.height;
            bottom - size.height
        } else {
            proposed.y
        };

        (Point::new(x, y), size)
    }

    /// Applies a rotation delta and returns the resulting angle, normalized
    /// to `[0, 360)`.
    pub fn apply_rotation(&self, delta_deg: f64) -> f64 {
        if self.locked {
            return self.rotation;
        }
        (self.rotation + delta_deg).rem_euclid(360.0)
    }

    /// Axis-aligned bounds as `(x1, y1, x2, y2)`.
    pub fn bounds(&self) -> (f64, f64, f64, f64) {
        (
            self.position.x,
            self.position.y,
            self.position.x + self.size.width,
            self.position.y + self.size.height,
        )
    }

    /// Clamps a candidate position so this entity's bounding box stays
    /// within the canvas. Used at gesture end only ("end-only" semantics:
    /// intermediate frames may overshoot, the committed state never does).
    pub fn clamp_position(&self, candidate: Point, canvas: CanvasBounds) -> Point {
        let max_x = (canvas.width - self.size.width).max(0.0);
        let max_y = (canvas.height - self.size.height).max(0.0);
        Point::new(candidate.x.clamp(0.0, max_x), candidate.y.clamp(0.0, max_y))
    }
}

impl Default for EntityGeometry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_translation() {
        let geo = EntityGeometry::new();
        let p = geo.apply_translation(40.0, 25.0);
        assert_eq!(p, Point::new(40.0, 25.0));
    }

    #[test]
    fn test_translation_locked_is_identity() {
        let geo = EntityGeometry {
            locked: true,
            ..EntityGeometry::new()
        };
        assert_eq!(geo.apply_translation(10.0, 10.0), geo.position);
    }

    #[test]
    fn test_resize_clamps_to_minimum() {
        let geo = EntityGeometry::new();
        let (_, size) = geo.apply_resize(ResizeEdges::BOTTOM_RIGHT, Rect::new(0.0, 0.0, 20.0, 20.0));
        assert_eq!(size, Size::new(50.0, 50.0));
    }

    #[test]
    fn test_resize_clamps_to_maximum() {
        let geo = EntityGeometry::new();
        let (_, size) =
            geo.apply_resize(ResizeEdges::BOTTOM_RIGHT, Rect::new(0.0, 0.0, 900.0, 700.0));
        assert_eq!(size, Size::new(500.0, 500.0));
    }

    #[test]
    fn test_resize_from_left_keeps_right_edge_fixed() {
        let geo = EntityGeometry::new();
        // Dragging the left edge of a 100-wide box at x=100 down to 20 wide:
        // the clamp pushes width back up to 50, and x compensates so the
        // right edge stays at 200.
        let (pos, size) = geo.apply_resize(ResizeEdges::LEFT, Rect::new(180.0, 0.0, 20.0, 100.0));
        assert_eq!(size.width, 50.0);
        assert_eq!(pos.x + size.width, 200.0);
    }

    #[test]
    fn test_rotation_wraps() {
        let mut geo = EntityGeometry::new();
        geo.rotation = geo.apply_rotation(375.0);
        assert_eq!(geo.rotation, 15.0);
        geo.rotation = geo.apply_rotation(-20.0);
        assert_eq!(geo.rotation, 355.0);
    }

    #[test]
    fn test_rotation_locked_is_identity() {
        let geo = EntityGeometry {
            rotation: 45.0,
            locked: true,
            ..EntityGeometry::new()
        };
        assert_eq!(geo.apply_rotation(90.0), 45.0);
    }

    #[test]
    fn test_clamp_position_keeps_bbox_inside() {
        let geo = EntityGeometry::new();
        let canvas = CanvasBounds::new(1200.0, 600.0);
        let p = geo.clamp_position(Point::new(1150.0, -30.0), canvas);
        assert_eq!(p, Point::new(1100.0, 0.0));
    }
}
