use crate::error::{GridError, GridResult};
use common::shapes::{Circle, Point, Rect, Vector};
use slotmap::Key;
use std::fmt;

slotmap::new_key_type! {
    /// Generational key of an object slot inside one database.
    pub struct ObjectKey;
}

/// Small fixed enumeration identifying an entity kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeTag(pub u8);

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Selects which objects a query returns.
#[derive(Clone, Copy)]
pub enum TypeFilter<'a> {
    Any,
    Tag(TypeTag),
    Tags(&'a [TypeTag]),
    Predicate(&'a dyn Fn(TypeTag) -> bool),
}

impl TypeFilter<'_> {
    #[inline(always)]
    pub fn matches(&self, tag: TypeTag) -> bool {
        match self {
            TypeFilter::Any => true,
            TypeFilter::Tag(wanted) => *wanted == tag,
            TypeFilter::Tags(wanted) => wanted.contains(&tag),
            TypeFilter::Predicate(test) => test(tag),
        }
    }
}

impl fmt::Debug for TypeFilter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeFilter::Any => write!(f, "Any"),
            TypeFilter::Tag(tag) => f.debug_tuple("Tag").field(tag).finish(),
            TypeFilter::Tags(tags) => f.debug_tuple("Tags").field(tags).finish(),
            TypeFilter::Predicate(_) => write!(f, "Predicate(..)"),
        }
    }
}

impl From<TypeTag> for TypeFilter<'_> {
    fn from(tag: TypeTag) -> Self {
        TypeFilter::Tag(tag)
    }
}

impl<'a> From<&'a [TypeTag]> for TypeFilter<'a> {
    fn from(tags: &'a [TypeTag]) -> Self {
        TypeFilter::Tags(tags)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DatabaseId(pub(crate) u32);

impl fmt::Display for DatabaseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Handle to an object registered in a [`GridDatabase`](super::GridDatabase).
///
/// Handles are generational: once the object is unregistered the handle stops
/// resolving, and handles from one database are rejected by every other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObjectId {
    pub(crate) database: DatabaseId,
    pub(crate) key: ObjectKey,
}

impl ObjectId {
    pub(crate) fn new(database: DatabaseId, key: ObjectKey) -> Self {
        Self { database, key }
    }

    pub fn database(&self) -> DatabaseId {
        self.database
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{:?}", self.database, self.key.data())
    }
}

/// Geometric dimensionality, used to order the flat object list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GeometryKind {
    Point,
    Line,
    #[default]
    Polygon,
}

/// Which simulation state collision circles are read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum StateIndex {
    #[default]
    Actual,
    Render,
}

/// Whether a rect query starts a new dedup sweep or continues the previous one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QuerySweep {
    #[default]
    Fresh,
    /// Reuse the stamp of the most recent query: objects that query already
    /// returned are skipped, so the two result sets merge without duplicates.
    Continue,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineOfSightHit {
    pub id: ObjectId,
    pub time: f32,
    pub normal: Vector,
}

/// Inclusive range of (unwrapped) bucket coordinates covered by an extent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BucketRange {
    pub min_x: i64,
    pub min_y: i64,
    pub max_x: i64,
    pub max_y: i64,
}

impl BucketRange {
    pub fn width(&self) -> u64 {
        (self.max_x - self.min_x + 1) as u64
    }

    pub fn height(&self) -> u64 {
        (self.max_y - self.min_y + 1) as u64
    }

    pub fn len(&self) -> u64 {
        self.width() * self.height()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Capability every indexable entity implements.
pub trait IndexedObject {
    fn type_tag(&self) -> TypeTag;

    /// Current bounding box in world coordinates.
    fn extent(&self) -> Rect;

    /// Called by the database when the extent changes through it.
    fn set_extent(&mut self, extent: Rect);

    fn geometry_kind(&self) -> GeometryKind {
        GeometryKind::Polygon
    }

    fn is_wall(&self) -> bool {
        false
    }
}

/// Exact geometry used to narrow line-of-sight candidates.
///
/// A polygon, when present, takes precedence over the circle.
pub trait CollisionGeometry {
    fn collision_polygon(&self) -> Option<&[Point]> {
        None
    }

    fn collision_circle(&self, _state: StateIndex) -> Option<Circle> {
        None
    }

    fn is_collision_enabled(&self) -> bool {
        true
    }
}

pub(crate) fn validate_extent(extent: &Rect) -> GridResult<()> {
    if !extent.is_valid() {
        return Err(GridError::InvalidExtent {
            min_x: extent.min_x,
            min_y: extent.min_y,
            max_x: extent.max_x,
            max_y: extent.max_y,
        });
    }
    Ok(())
}

pub(crate) fn validate_point(point: Point) -> GridResult<()> {
    if !(point.x.is_finite() && point.y.is_finite()) {
        return Err(GridError::InvalidPoint {
            x: point.x,
            y: point.y,
        });
    }
    Ok(())
}

// Walls go last; everything else by decreasing dimensionality
#[inline(always)]
pub(crate) fn sort_rank(kind: GeometryKind, is_wall: bool) -> u8 {
    if is_wall {
        return 3;
    }
    match kind {
        GeometryKind::Polygon => 0,
        GeometryKind::Line => 1,
        GeometryKind::Point => 2,
    }
}
