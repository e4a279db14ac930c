use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::{
    db::GardenRepository,
    error::GardenResult,
    models::{
        garden::{Garden, Grid, NewGarden},
        GardenId, OwnerId,
    },
};

#[derive(Debug, Default)]
struct Store {
    next_id: GardenId,
    gardens: BTreeMap<GardenId, Garden>,
}

/// Process-local store used by tests and when no database is configured.
/// Contents vanish on restart.
#[derive(Debug, Default)]
pub struct InMemoryGardenRepository {
    store: RwLock<Store>,
}

impl InMemoryGardenRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl GardenRepository for InMemoryGardenRepository {
    async fn insert_garden(&self, garden: NewGarden) -> GardenResult<Garden> {
        let mut store = self.store.write().await;
        store.next_id += 1;
        let now = Utc::now();
        let garden = Garden {
            id: store.next_id,
            owner_id: garden.owner_id,
            name: garden.name,
            width_cm: garden.width_cm,
            length_cm: garden.length_cm,
            grid: garden.grid,
            created_at: now,
            updated_at: now,
        };
        store.gardens.insert(garden.id, garden.clone());
        Ok(garden)
    }

    async fn load_garden(&self, id: GardenId) -> GardenResult<Option<Garden>> {
        Ok(self.store.read().await.gardens.get(&id).cloned())
    }

    async fn save_garden_grid(&self, id: GardenId, grid: &Grid) -> GardenResult<Option<Garden>> {
        let mut store = self.store.write().await;
        Ok(store.gardens.get_mut(&id).map(|garden| {
            garden.grid = grid.clone();
            garden.updated_at = Utc::now();
            garden.clone()
        }))
    }

    async fn load_gardens_for_owner(&self, owner_id: OwnerId) -> GardenResult<Vec<Garden>> {
        Ok(self
            .store
            .read()
            .await
            .gardens
            .values()
            .filter(|g| g.is_owned_by(owner_id))
            .cloned()
            .collect())
    }

    async fn delete_garden(
        &self,
        id: GardenId,
        owner_id: OwnerId,
    ) -> GardenResult<Option<Garden>> {
        let mut store = self.store.write().await;
        match store.gardens.get(&id) {
            Some(garden) if garden.is_owned_by(owner_id) => Ok(store.gardens.remove(&id)),
            _ => Ok(None),
        }
    }
}
