//! Client-side copy of a garden grid with optimistic cell edits.
//!
//! An edit is applied locally first and sent to the server afterwards. The
//! server answer is authoritative: on success the local grid is replaced by the
//! server's garden, on failure (or an answer for another garden) the optimistic
//! cell is rolled back and the error kept for display. Answers arriving after the view was torn down carry an old
//! generation and are dropped.

use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use log::{debug, warn};

use crate::{
    error::{GardenError, GardenResult},
    logic::mutation::CellMutationService,
    models::{
        garden::{Cell, Garden, PlacedPlant},
        GardenId, OwnerId,
    },
};

/// What the UI should offer when a cell is picked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    /// Offer the plant picker.
    Empty,
    /// Offer change / delete for the plant already there.
    Occupied(PlacedPlant),
}

/// Ticket for an optimistic edit awaiting the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingEdit {
    pub generation: u64,
    pub x: i64,
    pub y: i64,
    pub index: usize,
    pub previous: Cell,
    pub applied: Cell,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reconciliation {
    /// Server accepted; local grid now mirrors the authoritative one.
    Confirmed,
    /// Server rejected the edit or answered for another garden; the
    /// optimistic cell was rolled back.
    Failed(GardenError),
    /// The view changed since the edit was issued; nothing applied.
    Discarded,
}

#[derive(Debug, Clone)]
pub struct ClientGridState {
    garden: Garden,
    generation: u64,
    stale: bool,
    last_error: Option<GardenError>,
}

impl ClientGridState {
    pub fn new(garden: Garden) -> Self {
        Self {
            garden,
            generation: 0,
            stale: false,
            last_error: None,
        }
    }

    pub fn garden(&self) -> &Garden {
        &self.garden
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// True while the local grid may disagree with the server.
    pub fn is_stale(&self) -> bool {
        self.stale
    }

    pub fn last_error(&self) -> Option<&GardenError> {
        self.last_error.as_ref()
    }

    /// Hands the pending error to the UI, clearing it.
    pub fn take_error(&mut self) -> Option<GardenError> {
        self.last_error.take()
    }

    fn index_of(&self, x: i64, y: i64) -> GardenResult<usize> {
        self.garden
            .shape()
            .index(x, y)
            .filter(|&idx| idx < self.garden.grid.len())
            .ok_or(GardenError::InvalidCoordinate { x, y })
    }

    pub fn cell(&self, x: i64, y: i64) -> GardenResult<&Cell> {
        Ok(&self.garden.grid[self.index_of(x, y)?])
    }

    pub fn select(&self, x: i64, y: i64) -> GardenResult<Selection> {
        Ok(match self.cell(x, y)? {
            Cell::Empty => Selection::Empty,
            Cell::Occupied(plant) => Selection::Occupied(plant.clone()),
        })
    }

    /// Writes `cell` locally before the server has seen it.
    pub fn apply_optimistic(&mut self, x: i64, y: i64, cell: Cell) -> GardenResult<PendingEdit> {
        let index = self.index_of(x, y)?;
        let previous = std::mem::replace(&mut self.garden.grid[index], cell.clone());
        Ok(PendingEdit {
            generation: self.generation,
            x,
            y,
            index,
            previous,
            applied: cell,
        })
    }

    pub fn reconcile(&mut self, edit: PendingEdit, outcome: GardenResult<Garden>) -> Reconciliation {
        if edit.generation != self.generation {
            debug!(
                "dropping answer for cell ({}, {}): generation {} is gone",
                edit.x, edit.y, edit.generation
            );
            return Reconciliation::Discarded;
        }
        match outcome {
            Ok(garden) if garden.id == self.garden.id => {
                self.resync(garden);
                Reconciliation::Confirmed
            }
            Ok(garden) => {
                let err = GardenError::Validation(format!(
                    "answer for garden {} does not belong to garden {}",
                    garden.id, self.garden.id
                ));
                warn!("cell ({}, {}) not confirmed: {err}", edit.x, edit.y);
                self.roll_back(edit, err)
            }
            Err(err) => {
                warn!("cell ({}, {}) rejected: {err}", edit.x, edit.y);
                self.roll_back(edit, err)
            }
        }
    }

    /// Restores the cell unless a later edit already overwrote it.
    fn roll_back(&mut self, edit: PendingEdit, err: GardenError) -> Reconciliation {
        if let Some(slot) = self.garden.grid.get_mut(edit.index) {
            if *slot == edit.applied {
                *slot = edit.previous;
            }
        }
        self.stale = true;
        self.last_error = Some(err.clone());
        Reconciliation::Failed(err)
    }

    /// Installs an authoritative snapshot fetched from the server.
    pub fn resync(&mut self, garden: Garden) {
        self.garden = garden;
        self.stale = false;
    }

    /// Invalidates every edit still in flight.
    pub fn teardown(&mut self) {
        self.generation += 1;
    }
}

/// Remote side of a [`GridSession`].
#[async_trait]
pub trait GardenClient: Send + Sync {
    async fn fetch_garden(&self, id: GardenId) -> GardenResult<Garden>;

    async fn set_cell(&self, id: GardenId, x: i64, y: i64, cell: Cell) -> GardenResult<Garden>;
}

/// In-process client acting as one owner against a [`CellMutationService`].
#[derive(Clone)]
pub struct LocalGardenClient {
    service: CellMutationService,
    owner_id: OwnerId,
}

impl LocalGardenClient {
    pub fn new(service: CellMutationService, owner_id: OwnerId) -> Self {
        Self { service, owner_id }
    }
}

#[async_trait]
impl GardenClient for LocalGardenClient {
    async fn fetch_garden(&self, id: GardenId) -> GardenResult<Garden> {
        self.service.get_garden(id, self.owner_id).await
    }

    async fn set_cell(&self, id: GardenId, x: i64, y: i64, cell: Cell) -> GardenResult<Garden> {
        self.service.set_cell(id, self.owner_id, x, y, cell).await
    }
}

/// Drives optimistic edits of one garden against a [`GardenClient`].
///
/// The state sits behind a mutex that is never held across an await, so a
/// view can tear the session down while a request is in flight.
pub struct GridSession<C> {
    client: C,
    garden_id: GardenId,
    state: Mutex<ClientGridState>,
}

impl<C: GardenClient> GridSession<C> {
    pub async fn open(client: C, garden_id: GardenId) -> GardenResult<Self> {
        let garden = client.fetch_garden(garden_id).await?;
        Ok(Self {
            client,
            garden_id,
            state: Mutex::new(ClientGridState::new(garden)),
        })
    }

    fn lock(&self) -> MutexGuard<'_, ClientGridState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn snapshot(&self) -> ClientGridState {
        self.lock().clone()
    }

    pub fn select(&self, x: i64, y: i64) -> GardenResult<Selection> {
        self.lock().select(x, y)
    }

    pub fn teardown(&self) {
        self.lock().teardown();
    }

    /// Applies `cell` locally, sends it, then reconciles with the server.
    ///
    /// `Err` only for edits rejected locally (nothing was sent); server-side
    /// failures come back as [`Reconciliation::Failed`].
    pub async fn set_cell(&self, x: i64, y: i64, cell: Cell) -> GardenResult<Reconciliation> {
        let edit = self.lock().apply_optimistic(x, y, cell.clone())?;

        // The saved garden stands in when the refetch fails.
        let outcome = match self.client.set_cell(self.garden_id, x, y, cell).await {
            Ok(saved) => match self.client.fetch_garden(self.garden_id).await {
                Ok(garden) => Ok(garden),
                Err(err) => {
                    warn!("refetch of garden {} after saving failed: {err}", self.garden_id);
                    Ok(saved)
                }
            },
            Err(err) => Err(err),
        };
        let generation = edit.generation;
        let result = self.lock().reconcile(edit, outcome);

        if matches!(result, Reconciliation::Failed(_)) {
            self.refresh_after_failure(generation).await;
        }
        Ok(result)
    }

    pub async fn clear_cell(&self, x: i64, y: i64) -> GardenResult<Reconciliation> {
        self.set_cell(x, y, Cell::Empty).await
    }

    async fn refresh_after_failure(&self, generation: u64) {
        match self.client.fetch_garden(self.garden_id).await {
            Ok(garden) => {
                let mut state = self.lock();
                if state.generation() == generation {
                    state.resync(garden);
                }
            }
            Err(err) => warn!("refetch of garden {} failed: {err}", self.garden_id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::garden::Appearance;
    use chrono::Utc;

    fn garden(id: GardenId) -> Garden {
        Garden {
            id,
            owner_id: 1,
            name: "Patio".into(),
            width_cm: 100,
            length_cm: 50,
            grid: vec![Cell::Empty; 8],
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn mint() -> Cell {
        Cell::Occupied(PlacedPlant {
            plant_id: "34".into(),
            display_name: "Mint".into(),
            appearance: Appearance::Color("#98ff98".into()),
        })
    }

    #[test]
    fn test_select_branches_on_occupancy() {
        let mut state = ClientGridState::new(garden(1));
        assert_eq!(state.select(1, 2).unwrap(), Selection::Empty);
        state.apply_optimistic(1, 2, mint()).unwrap();
        assert!(matches!(state.select(1, 2).unwrap(), Selection::Occupied(p) if p.display_name == "Mint"));
        assert_eq!(state.select(2, 0), Err(GardenError::InvalidCoordinate { x: 2, y: 0 }));
    }

    #[test]
    fn test_optimistic_edit_uses_server_index() {
        let mut state = ClientGridState::new(garden(1));
        let edit = state.apply_optimistic(1, 2, mint()).unwrap();
        // 100cm → 4 columns
        assert_eq!(edit.index, 6);
        assert_eq!(state.garden().grid[6], mint());
    }

    #[test]
    fn test_confirmed_edit_installs_server_grid() {
        let mut state = ClientGridState::new(garden(1));
        let edit = state.apply_optimistic(0, 0, mint()).unwrap();
        let mut server = garden(1);
        server.grid[0] = mint();
        server.grid[7] = mint();
        assert_eq!(state.reconcile(edit, Ok(server.clone())), Reconciliation::Confirmed);
        assert_eq!(state.garden().grid, server.grid);
        assert!(!state.is_stale());
    }

    #[test]
    fn test_failed_edit_rolls_back_and_reports() {
        let mut state = ClientGridState::new(garden(1));
        let edit = state.apply_optimistic(0, 3, mint()).unwrap();
        let err = GardenError::Persistence("connection reset".into());
        assert_eq!(state.reconcile(edit, Err(err.clone())), Reconciliation::Failed(err.clone()));
        assert!(state.garden().grid[3].is_empty());
        assert!(state.is_stale());
        assert_eq!(state.take_error(), Some(err));
        assert_eq!(state.last_error(), None);
    }

    #[test]
    fn test_answer_after_teardown_is_discarded() {
        let mut state = ClientGridState::new(garden(1));
        let edit = state.apply_optimistic(0, 0, mint()).unwrap();
        state.teardown();
        let outcome = state.reconcile(edit, Err(GardenError::NotFound));
        assert_eq!(outcome, Reconciliation::Discarded);
        assert!(state.last_error().is_none());
    }

    #[test]
    fn test_answer_for_other_garden_rolls_back() {
        let mut state = ClientGridState::new(garden(1));
        let edit = state.apply_optimistic(0, 0, mint()).unwrap();
        let outcome = state.reconcile(edit, Ok(garden(2)));
        assert!(matches!(outcome, Reconciliation::Failed(GardenError::Validation(_))));
        assert_eq!(state.garden().id, 1);
        assert!(state.garden().grid[0].is_empty());
        assert!(state.is_stale());
        assert!(matches!(state.last_error(), Some(GardenError::Validation(_))));
    }

    #[test]
    fn test_rollback_keeps_newer_edit() {
        let mut state = ClientGridState::new(garden(1));
        let first = state.apply_optimistic(0, 0, mint()).unwrap();
        let sage = Cell::Occupied(PlacedPlant {
            plant_id: "37".into(),
            display_name: "Sage".into(),
            appearance: Appearance::Color("#9caf88".into()),
        });
        state.apply_optimistic(0, 0, sage.clone()).unwrap();
        state.reconcile(first, Err(GardenError::Persistence("timeout".into())));
        assert_eq!(state.garden().grid[0], sage);
        assert!(state.is_stale());
    }
}
