use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub mod garden;
pub mod plant;
pub mod request;

/// Identifier of a persisted garden.
pub type GardenId = i64;

/// Identifier of the authenticated user owning a garden.
pub type OwnerId = i64;

/// A zero-based (x, y) position within the garden grid.
/// `x` is the row, `y` the column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub struct Coordinate {
    pub x: usize,
    pub y: usize,
}
