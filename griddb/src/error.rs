use crate::grid_database::{DatabaseId, ObjectId};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum GridError {
    #[error(
        "rectangle extents must be finite with min <= max (min_x: {min_x}, min_y: {min_y}, max_x: {max_x}, max_y: {max_y})"
    )]
    InvalidExtent {
        min_x: f32,
        min_y: f32,
        max_x: f32,
        max_y: f32,
    },
    #[error("segment endpoints must be finite (x: {x}, y: {y})")]
    InvalidPoint { x: f32, y: f32 },
    #[error("grid config `{field}` is out of range (value: {value})")]
    InvalidConfig { field: &'static str, value: u32 },
    #[error("object {id} is not registered")]
    NotRegistered { id: ObjectId },
    #[error("object {id} is registered in another database, not database {database}")]
    ForeignObject { id: ObjectId, database: DatabaseId },
}

pub type GridResult<T> = Result<T, GridError>;
