use crate::foundation::core::{Point, Rect, Vec2};

/// Rotated rectangle anchored at a position, used for on-screen tests.
#[derive(Clone, Copy, Debug)]
pub(crate) struct OrientedBoundingBox {
    corners: [Point; 4],
}

impl OrientedBoundingBox {
    /// `origin` is the anchor offset inside the box; `width`/`height` may be negative (flips).
    pub(crate) fn new(position: Vec2, origin: Vec2, width: f64, height: f64, rotation: f64) -> Self {
        let local = [
            Vec2::new(-origin.x, -origin.y),
            Vec2::new(width - origin.x, -origin.y),
            Vec2::new(width - origin.x, height - origin.y),
            Vec2::new(-origin.x, height - origin.y),
        ];
        let (sin, cos) = rotation.sin_cos();
        let corners = local.map(|v| {
            let rotated = Vec2::new(v.x * cos - v.y * sin, v.x * sin + v.y * cos);
            (position + rotated).to_point()
        });
        Self { corners }
    }

    /// Axis-aligned bounds of the rotated box.
    pub(crate) fn aabb(&self) -> Rect {
        let mut rect = Rect::from_points(self.corners[0], self.corners[1]);
        rect = rect.union_pt(self.corners[2]);
        rect.union_pt(self.corners[3])
    }

    /// Separating-axis test against an axis-aligned rectangle.
    pub(crate) fn intersects(&self, rect: Rect) -> bool {
        let rect = rect.abs();
        let rect_corners = [
            Point::new(rect.x0, rect.y0),
            Point::new(rect.x1, rect.y0),
            Point::new(rect.x1, rect.y1),
            Point::new(rect.x0, rect.y1),
        ];

        let edge_a = self.corners[1] - self.corners[0];
        let edge_b = self.corners[3] - self.corners[0];
        let axes = [
            Vec2::new(1.0, 0.0),
            Vec2::new(0.0, 1.0),
            Vec2::new(-edge_a.y, edge_a.x),
            Vec2::new(-edge_b.y, edge_b.x),
        ];

        for axis in axes {
            if axis.hypot2() == 0.0 {
                continue;
            }
            let (a_min, a_max) = project(&self.corners, axis);
            let (b_min, b_max) = project(&rect_corners, axis);
            if a_max < b_min || b_max < a_min {
                return false;
            }
        }
        true
    }
}

fn project(points: &[Point; 4], axis: Vec2) -> (f64, f64) {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for p in points {
        let d = p.to_vec2().dot(axis);
        min = min.min(d);
        max = max.max(d);
    }
    (min, max)
}

/// Area of the overlap between two rectangles, zero when disjoint.
pub(crate) fn intersection_area(a: Rect, b: Rect) -> f64 {
    let r = a.abs().intersect(b.abs());
    (r.width() * r.height()).abs()
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
