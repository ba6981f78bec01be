use nalgebra::{Point2, Vector2};
use rand::Rng;

pub type Point = Point2<f32>;
pub type Vector = Vector2<f32>;

/// Axis-aligned rectangle stored as min/max corners in world coordinates.
///
/// Edges are inclusive: two rectangles that only touch along an edge intersect.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Rect {
    pub min_x: f32,
    pub min_y: f32,
    pub max_x: f32,
    pub max_y: f32,
}

impl Rect {
    /// The zero rectangle, returned wherever "no extent" has to be reported.
    pub const EMPTY: Rect = Rect {
        min_x: 0.0,
        min_y: 0.0,
        max_x: 0.0,
        max_y: 0.0,
    };

    pub fn new(min_x: f32, min_y: f32, max_x: f32, max_y: f32) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// Builds a rectangle from two arbitrary corners, ordering them as needed.
    pub fn from_corners(a: Point, b: Point) -> Self {
        Self {
            min_x: a.x.min(b.x),
            min_y: a.y.min(b.y),
            max_x: a.x.max(b.x),
            max_y: a.y.max(b.y),
        }
    }

    pub fn from_center(center: Point, width: f32, height: f32) -> Self {
        let half_w = width * 0.5;
        let half_h = height * 0.5;
        Self {
            min_x: center.x - half_w,
            min_y: center.y - half_h,
            max_x: center.x + half_w,
            max_y: center.y + half_h,
        }
    }

    /// Bounding rectangle of a point cloud, `None` when there are no points.
    pub fn from_points(points: &[Point]) -> Option<Self> {
        let (first, rest) = points.split_first()?;
        let mut rect = Rect::from_corners(*first, *first);
        for point in rest {
            rect.include_point(*point);
        }
        Some(rect)
    }

    /// True when every coordinate is finite and min <= max on both axes.
    pub fn is_valid(&self) -> bool {
        self.min_x.is_finite()
            && self.min_y.is_finite()
            && self.max_x.is_finite()
            && self.max_y.is_finite()
            && self.min_x <= self.max_x
            && self.min_y <= self.max_y
    }

    pub fn min(&self) -> Point {
        Point::new(self.min_x, self.min_y)
    }

    pub fn max(&self) -> Point {
        Point::new(self.max_x, self.max_y)
    }

    pub fn width(&self) -> f32 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f32 {
        self.max_y - self.min_y
    }

    pub fn center(&self) -> Point {
        Point::new(
            (self.min_x + self.max_x) * 0.5,
            (self.min_y + self.max_y) * 0.5,
        )
    }

    pub fn intersects(&self, other: &Rect) -> bool {
        self.min_x <= other.max_x
            && self.max_x >= other.min_x
            && self.min_y <= other.max_y
            && self.max_y >= other.min_y
    }

    pub fn contains_point(&self, point: Point) -> bool {
        point.x >= self.min_x
            && point.x <= self.max_x
            && point.y >= self.min_y
            && point.y <= self.max_y
    }

    // Check that `inner` is fully contained in this rectangle
    pub fn contains_rect(&self, inner: &Rect) -> bool {
        self.min_x <= inner.min_x
            && self.max_x >= inner.max_x
            && self.min_y <= inner.min_y
            && self.max_y >= inner.max_y
    }

    pub fn union(&self, other: &Rect) -> Rect {
        Rect {
            min_x: self.min_x.min(other.min_x),
            min_y: self.min_y.min(other.min_y),
            max_x: self.max_x.max(other.max_x),
            max_y: self.max_y.max(other.max_y),
        }
    }

    pub fn expand_to_include(&mut self, other: &Rect) {
        *self = self.union(other);
    }

    pub fn include_point(&mut self, point: Point) {
        self.min_x = self.min_x.min(point.x);
        self.min_y = self.min_y.min(point.y);
        self.max_x = self.max_x.max(point.x);
        self.max_y = self.max_y.max(point.y);
    }

    /// Grows the rectangle by `dx` on the left and right and `dy` on the top and bottom.
    pub fn expand(&mut self, dx: f32, dy: f32) {
        self.min_x -= dx;
        self.min_y -= dy;
        self.max_x += dx;
        self.max_y += dy;
    }

    pub fn expanded(mut self, dx: f32, dy: f32) -> Rect {
        self.expand(dx, dy);
        self
    }

    /// Random point that keeps a circle of `radius` (plus a unit margin) inside the rectangle.
    pub fn random_point_inside<R: Rng>(&self, radius: f32, rng: &mut R) -> Point {
        let margin = radius + 1.0;
        Point::new(
            safe_randf32(rng, self.min_x + margin, self.max_x - margin),
            safe_randf32(rng, self.min_y + margin, self.max_y - margin),
        )
    }

    /// Random rectangle of up to `max_size` per side, fully inside this one.
    pub fn random_rect_inside<R: Rng>(&self, max_size: f32, rng: &mut R) -> Rect {
        let width = safe_randf32(rng, 0.0, max_size);
        let height = safe_randf32(rng, 0.0, max_size);
        let min_x = safe_randf32(rng, self.min_x, self.max_x - width);
        let min_y = safe_randf32(rng, self.min_y, self.max_y - height);
        Rect::new(
            min_x,
            min_y,
            (min_x + width).min(self.max_x),
            (min_y + height).min(self.max_y),
        )
    }
}

impl Default for Rect {
    fn default() -> Self {
        Rect::EMPTY
    }
}

fn safe_randf32<R: Rng>(rng: &mut R, min: f32, max: f32) -> f32 {
    if min >= max {
        return min;
    }
    rng.gen_range(min..=max)
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Circle {
    pub center: Point,
    pub radius: f32,
}

impl Circle {
    pub fn new(x: f32, y: f32, radius: f32) -> Self {
        Self {
            center: Point::new(x, y),
            radius,
        }
    }

    pub fn x(&self) -> f32 {
        self.center.x
    }

    pub fn y(&self) -> f32 {
        self.center.y
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn contains_point(&self, point: Point) -> bool {
        (point - self.center).norm_squared() <= self.radius * self.radius
    }

    pub fn bounding_box(&self) -> Rect {
        Rect::from_center(self.center, self.radius * 2.0, self.radius * 2.0)
    }
}

impl Default for Circle {
    fn default() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }
}
