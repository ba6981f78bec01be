//! Uniform-grid spatial index.
//!
//! The world plane is cut into square cells of `1 << bucket_width_bits` units
//! and folded onto a `row_count x row_count` table of buckets, wrapping on both
//! axes. Every registered object is linked into each bucket its extent touches
//! through entries drawn from a pool shared by all databases on one
//! [`GridContext`]. Queries walk the touched buckets, dedup with a per-object
//! stamp and test the exact extent before reporting a match.

mod buckets;
mod config;
mod context;
mod extents;
mod lifecycle;
mod maintenance;
mod query_rect;
mod query_segment;
mod registry;
mod types;

pub use config::GridConfig;
pub use context::{ChunkAllocator, GridContext};
pub use types::{
    BucketRange, CollisionGeometry, DatabaseId, GeometryKind, IndexedObject, LineOfSightHit,
    ObjectId, ObjectKey, QuerySweep, StateIndex, TypeFilter, TypeTag,
};

use common::shapes::Rect;
use context::EntryKey;
use fxhash::FxHashMap;
use slotmap::SlotMap;

#[derive(Debug)]
pub(crate) struct ObjectSlot<T> {
    pub(crate) object: T,
    pub(crate) type_tag: TypeTag,
    /// Extent the buckets were last linked for.
    pub(crate) extent: Rect,
    pub(crate) range: BucketRange,
    pub(crate) query_stamp: u32,
    /// Head of this object's bucket-entry chain.
    pub(crate) chain: Option<EntryKey>,
    pub(crate) sort_rank: u8,
    /// Position inside the hot list for `type_tag`, if it has one.
    pub(crate) hot_slot: Option<usize>,
}

/// Spatial index over objects of type `T`.
///
/// The database owns its objects. [`register`](GridDatabase::register) hands
/// back an [`ObjectId`] and [`unregister`](GridDatabase::unregister) hands the
/// object back.
pub struct GridDatabase<T> {
    id: DatabaseId,
    context: GridContext,
    config: GridConfig,
    row_mask: i64,
    /// Context stamp epoch the slot stamps belong to.
    stamp_epoch: u32,
    buckets: Vec<Option<EntryKey>>,
    slots: SlotMap<ObjectKey, ObjectSlot<T>>,
    /// Registration list, ordered by geometry rank then insertion.
    all_objects: Vec<ObjectKey>,
    hot_lists: FxHashMap<TypeTag, Vec<ObjectKey>>,
}

impl<T> GridDatabase<T> {
    pub fn id(&self) -> DatabaseId {
        self.id
    }

    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    pub fn context(&self) -> &GridContext {
        &self.context
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}
