use std::sync::Arc;

use log::{debug, warn};

use crate::{
    db::GardenRepository,
    error::{GardenError, GardenResult},
    models::{
        garden::{Cell, Garden, NewGarden},
        request::CreateGardenRequest,
        GardenId, OwnerId,
    },
};

/// Largest accepted width or length, in centimetres.
pub const MAX_DIMENSION_CM: i64 = 1000;
pub const MAX_NAME_LEN: usize = 100;

/// Garden lifecycle and single-cell updates on top of a [`GardenRepository`].
///
/// Cell writes are read-modify-write of the whole grid: two concurrent
/// `set_cell` calls on one garden are last-write-wins.
#[derive(Clone)]
pub struct CellMutationService {
    repo: Arc<dyn GardenRepository>,
}

impl CellMutationService {
    pub fn new(repo: Arc<dyn GardenRepository>) -> Self {
        Self { repo }
    }

    pub async fn create_garden(
        &self,
        owner_id: OwnerId,
        request: CreateGardenRequest,
    ) -> GardenResult<Garden> {
        let name = request.name.trim();
        if name.is_empty() {
            return Err(GardenError::Validation("Garden name must not be empty.".into()));
        }
        if name.chars().count() > MAX_NAME_LEN {
            return Err(GardenError::Validation(format!(
                "Garden name must be at most {MAX_NAME_LEN} characters."
            )));
        }
        let width_cm = validate_dimension("widthCm", request.width_cm)?;
        let length_cm = validate_dimension("lengthCm", request.length_cm)?;

        let garden = self
            .repo
            .insert_garden(NewGarden::empty(owner_id, name.to_string(), width_cm, length_cm))
            .await?;
        debug!(
            "created garden {} for owner {owner_id} ({}x{} cells)",
            garden.id,
            garden.shape().rows,
            garden.shape().columns
        );
        Ok(garden)
    }

    pub async fn list_gardens(&self, owner_id: OwnerId) -> GardenResult<Vec<Garden>> {
        let mut gardens = self.repo.load_gardens_for_owner(owner_id).await?;
        gardens.sort_by_key(|g| g.id);
        Ok(gardens)
    }

    /// Missing and foreign gardens both yield `NotFound`.
    pub async fn get_garden(&self, id: GardenId, owner_id: OwnerId) -> GardenResult<Garden> {
        match self.repo.load_garden(id).await? {
            Some(garden) if garden.is_owned_by(owner_id) => Ok(garden),
            Some(_) => {
                warn!("owner {owner_id} requested garden {id} owned by someone else");
                Err(GardenError::NotFound)
            }
            None => Err(GardenError::NotFound),
        }
    }

    /// Places, changes or clears the plant at (x, y) and returns the stored garden.
    pub async fn set_cell(
        &self,
        id: GardenId,
        owner_id: OwnerId,
        x: i64,
        y: i64,
        cell: Cell,
    ) -> GardenResult<Garden> {
        let mut garden = self.get_garden(id, owner_id).await?;
        let idx = garden
            .shape()
            .index(x, y)
            .filter(|&idx| idx < garden.grid.len())
            .ok_or_else(|| {
                warn!("rejected cell ({x}, {y}) on garden {id}");
                GardenError::InvalidCoordinate { x, y }
            })?;

        if garden.grid[idx] == cell {
            debug!("cell ({x}, {y}) of garden {id} already up to date");
            return Ok(garden);
        }
        garden.grid[idx] = cell;

        let saved = self
            .repo
            .save_garden_grid(id, &garden.grid)
            .await?
            .ok_or(GardenError::NotFound)?;
        debug!("updated cell ({x}, {y}) → index {idx} of garden {id}");
        Ok(saved)
    }

    pub async fn delete_garden(&self, id: GardenId, owner_id: OwnerId) -> GardenResult<Garden> {
        let deleted = self
            .repo
            .delete_garden(id, owner_id)
            .await?
            .ok_or(GardenError::NotFound)?;
        debug!("deleted garden {id} of owner {owner_id}");
        Ok(deleted)
    }
}

fn validate_dimension(field: &str, value: i64) -> GardenResult<u32> {
    if !(1..=MAX_DIMENSION_CM).contains(&value) {
        return Err(GardenError::Validation(format!(
            "{field} must be between 1 and {MAX_DIMENSION_CM} cm (got {value})."
        )));
    }
    u32::try_from(value).map_err(|_| GardenError::Validation(format!("{field} is out of range.")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::InMemoryGardenRepository;
    use crate::logic::grid::GridShape;
    use crate::models::garden::{Appearance, PlacedPlant};

    const OWNER: OwnerId = 7;

    fn service() -> CellMutationService {
        CellMutationService::new(Arc::new(InMemoryGardenRepository::new()))
    }

    fn request(width_cm: i64, length_cm: i64) -> CreateGardenRequest {
        CreateGardenRequest {
            name: "Backyard".into(),
            width_cm,
            length_cm,
        }
    }

    fn tomato() -> Cell {
        Cell::Occupied(PlacedPlant {
            plant_id: "41".into(),
            display_name: "Tomato".into(),
            appearance: Appearance::Color("#e53935".into()),
        })
    }

    fn carrot() -> Cell {
        Cell::Occupied(PlacedPlant {
            plant_id: "51".into(),
            display_name: "Carrot".into(),
            appearance: Appearance::Image("https://openfarm.cc/images/root/carrot.jpg".into()),
        })
    }

    #[actix_web::test]
    async fn test_created_garden_grid_matches_shape() {
        let svc = service();
        let garden = svc.create_garden(OWNER, request(130, 260)).await.unwrap();
        let shape = GridShape::from_dimensions(130, 260);
        assert_eq!(garden.grid.len(), shape.columns * shape.rows);
        assert!(garden.grid.iter().all(Cell::is_empty));
    }

    #[actix_web::test]
    async fn test_create_rejects_bad_input() {
        let svc = service();
        for (name, w, l) in [("", 100, 100), ("   ", 100, 100), ("x", 0, 100), ("x", 100, -5), ("x", 1001, 100)] {
            let req = CreateGardenRequest {
                name: name.into(),
                width_cm: w,
                length_cm: l,
            };
            let err = svc.create_garden(OWNER, req).await.unwrap_err();
            assert!(matches!(err, GardenError::Validation(_)), "{name:?} {w}x{l} → {err:?}");
        }
    }

    #[actix_web::test]
    async fn test_create_trims_name() {
        let svc = service();
        let req = CreateGardenRequest {
            name: "  Herbs  ".into(),
            width_cm: 50,
            length_cm: 50,
        };
        assert_eq!(svc.create_garden(OWNER, req).await.unwrap().name, "Herbs");
    }

    #[actix_web::test]
    async fn test_scenario_100_by_100() {
        let svc = service();
        let garden = svc.create_garden(OWNER, request(100, 100)).await.unwrap();
        assert_eq!(garden.grid.len(), 16);

        let g = svc.set_cell(garden.id, OWNER, 0, 0, tomato()).await.unwrap();
        assert_eq!(g.grid[0], tomato());
        let g = svc.set_cell(garden.id, OWNER, 3, 3, carrot()).await.unwrap();
        assert_eq!(g.grid[15], carrot());

        let err = svc.set_cell(garden.id, OWNER, 4, 0, tomato()).await.unwrap_err();
        assert_eq!(err, GardenError::InvalidCoordinate { x: 4, y: 0 });
    }

    #[actix_web::test]
    async fn test_boundary_cells() {
        let svc = service();
        // 6 columns, 2 rows
        let garden = svc.create_garden(OWNER, request(150, 50)).await.unwrap();
        assert!(svc.set_cell(garden.id, OWNER, 1, 5, tomato()).await.is_ok());
        assert!(matches!(
            svc.set_cell(garden.id, OWNER, 2, 0, tomato()).await,
            Err(GardenError::InvalidCoordinate { .. })
        ));
        assert!(matches!(
            svc.set_cell(garden.id, OWNER, 0, 6, tomato()).await,
            Err(GardenError::InvalidCoordinate { .. })
        ));
        assert!(matches!(
            svc.set_cell(garden.id, OWNER, -1, 0, tomato()).await,
            Err(GardenError::InvalidCoordinate { .. })
        ));
    }

    #[actix_web::test]
    async fn test_set_cell_round_trip_and_clear() {
        let svc = service();
        let garden = svc.create_garden(OWNER, request(100, 100)).await.unwrap();
        svc.set_cell(garden.id, OWNER, 2, 1, tomato()).await.unwrap();
        let loaded = svc.get_garden(garden.id, OWNER).await.unwrap();
        assert_eq!(loaded.grid[9], tomato());

        svc.set_cell(garden.id, OWNER, 2, 1, Cell::Empty).await.unwrap();
        let loaded = svc.get_garden(garden.id, OWNER).await.unwrap();
        assert!(loaded.grid.iter().all(Cell::is_empty));
    }

    #[actix_web::test]
    async fn test_set_cell_is_idempotent() {
        let svc = service();
        let garden = svc.create_garden(OWNER, request(100, 100)).await.unwrap();
        let once = svc.set_cell(garden.id, OWNER, 1, 1, tomato()).await.unwrap();
        let twice = svc.set_cell(garden.id, OWNER, 1, 1, tomato()).await.unwrap();
        assert_eq!(once.grid, twice.grid);
    }

    #[actix_web::test]
    async fn test_sequential_mutations_both_persist() {
        let svc = service();
        let garden = svc.create_garden(OWNER, request(100, 100)).await.unwrap();
        svc.set_cell(garden.id, OWNER, 0, 1, tomato()).await.unwrap();
        svc.set_cell(garden.id, OWNER, 2, 3, carrot()).await.unwrap();
        let loaded = svc.get_garden(garden.id, OWNER).await.unwrap();
        assert_eq!(loaded.grid[1], tomato());
        assert_eq!(loaded.grid[11], carrot());
    }

    #[actix_web::test]
    async fn test_foreign_garden_is_not_found() {
        let svc = service();
        let garden = svc.create_garden(OWNER, request(100, 100)).await.unwrap();
        assert_eq!(svc.get_garden(garden.id, 99).await.unwrap_err(), GardenError::NotFound);
        assert_eq!(
            svc.set_cell(garden.id, 99, 0, 0, tomato()).await.unwrap_err(),
            GardenError::NotFound
        );
        assert_eq!(svc.delete_garden(garden.id, 99).await.unwrap_err(), GardenError::NotFound);
        assert_eq!(svc.get_garden(12345, OWNER).await.unwrap_err(), GardenError::NotFound);
    }

    #[actix_web::test]
    async fn test_list_and_delete() {
        let svc = service();
        let a = svc.create_garden(OWNER, request(100, 100)).await.unwrap();
        let b = svc.create_garden(OWNER, request(50, 50)).await.unwrap();
        svc.create_garden(OWNER + 1, request(50, 50)).await.unwrap();

        let ids: Vec<_> = svc.list_gardens(OWNER).await.unwrap().iter().map(|g| g.id).collect();
        assert_eq!(ids, vec![a.id, b.id]);

        svc.delete_garden(a.id, OWNER).await.unwrap();
        assert_eq!(svc.get_garden(a.id, OWNER).await.unwrap_err(), GardenError::NotFound);
        assert_eq!(svc.list_gardens(OWNER).await.unwrap().len(), 1);
    }
}
