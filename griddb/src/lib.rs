pub mod error;
pub mod grid_database;

pub use common::shapes;
pub use error::{GridError, GridResult};
pub use grid_database::{
    BucketRange, CollisionGeometry, DatabaseId, GeometryKind, GridConfig, GridContext,
    GridDatabase, IndexedObject, LineOfSightHit, ObjectId, QuerySweep, StateIndex, TypeFilter,
    TypeTag,
};
