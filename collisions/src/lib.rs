//! Exact segment narrowing for line-of-sight queries.
//!
//! Every test takes a segment `start -> end` and reports the first contact as a
//! normalized time along the segment (`0.0` at `start`, `1.0` at `end`) together
//! with a unit surface normal that faces back towards `start`.

use common::shapes::{Circle, Point, Vector};
use nalgebra::Unit;
use parry2d::query::{Ray, RayCast};
use parry2d::shape::{Ball, Segment};

const NORMAL_EPSILON: f32 = 1.0e-6;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentHit {
    pub time: f32,
    pub normal: Vector,
}

/// Segment against the edges of a closed polygon outline.
///
/// The outline is closed implicitly (last point connects back to the first), so a
/// two-point "polygon" behaves like a single line segment. The interior is not
/// solid: a segment starting inside the polygon hits the first edge it crosses.
pub fn segment_polygon(points: &[Point], start: Point, end: Point) -> Option<SegmentHit> {
    if points.len() < 2 {
        return None;
    }
    let dir = end - start;
    if dir.norm_squared() == 0.0 {
        return None;
    }
    let ray = Ray::new(start, dir);

    let mut best: Option<SegmentHit> = None;
    for (i, a) in points.iter().enumerate() {
        let b = points[(i + 1) % points.len()];
        let edge = b - *a;
        let Some(edge_normal) = Unit::try_new(Vector::new(edge.y, -edge.x), NORMAL_EPSILON) else {
            continue;
        };
        let Some(time) = Segment::new(*a, b).cast_local_ray(&ray, 1.0, false) else {
            continue;
        };
        if best.map_or(true, |hit| time < hit.time) {
            best = Some(SegmentHit {
                time,
                normal: facing(edge_normal.into_inner(), dir),
            });
        }
    }
    best
}

/// Segment against a solid circle. A segment starting inside the circle hits at
/// time zero.
pub fn segment_circle(circle: &Circle, start: Point, end: Point) -> Option<SegmentHit> {
    let dir = end - start;
    if dir.norm_squared() == 0.0 || !(circle.radius >= 0.0) {
        return None;
    }
    let local_start = Point::from(start - circle.center);
    let ray = Ray::new(local_start, dir);
    let time = Ball::new(circle.radius).cast_local_ray(&ray, 1.0, true)?;

    let contact = start + dir * time;
    let normal = match Unit::try_new(contact - circle.center, NORMAL_EPSILON) {
        Some(normal) => normal.into_inner(),
        None => -dir.normalize(),
    };
    Some(SegmentHit { time, normal })
}

// Flip a two-sided edge normal so it points against the direction of travel
fn facing(normal: Vector, dir: Vector) -> Vector {
    if normal.dot(&dir) > 0.0 {
        -normal
    } else {
        normal
    }
}
