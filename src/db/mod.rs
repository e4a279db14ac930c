use async_trait::async_trait;

use crate::{
    error::GardenResult,
    models::{
        garden::{Garden, Grid, NewGarden},
        GardenId, OwnerId,
    },
};

pub mod memory;
pub mod postgres;

pub use memory::InMemoryGardenRepository;
pub use postgres::PgGardenRepository;

/// Persistence boundary for garden records.
///
/// The grid is stored as one ordered sequence in row-major order; there is no
/// partial update, callers always write the whole grid back.
#[async_trait]
pub trait GardenRepository: Send + Sync {
    async fn insert_garden(&self, garden: NewGarden) -> GardenResult<Garden>;

    /// Fetches a garden regardless of owner; ownership is checked by callers.
    async fn load_garden(&self, id: GardenId) -> GardenResult<Option<Garden>>;

    /// Replaces the whole grid. `None` when the garden no longer exists.
    async fn save_garden_grid(&self, id: GardenId, grid: &Grid) -> GardenResult<Option<Garden>>;

    async fn load_gardens_for_owner(&self, owner_id: OwnerId) -> GardenResult<Vec<Garden>>;

    /// Deletes the garden only if `owner_id` owns it.
    async fn delete_garden(&self, id: GardenId, owner_id: OwnerId)
        -> GardenResult<Option<Garden>>;
}
