use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::logic::grid::GridShape;
use crate::models::{GardenId, OwnerId};

/// How a placed plant is drawn: a flat color or a picture.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub enum Appearance {
    Color(String),
    Image(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PlacedPlant {
    pub plant_id: String,
    pub display_name: String,
    pub appearance: Appearance,
}

/// One addressable grid unit. Serialised as `null` when empty and as the
/// placed plant object otherwise.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "Option<PlacedPlant>", into = "Option<PlacedPlant>")]
pub enum Cell {
    #[default]
    Empty,
    Occupied(PlacedPlant),
}

impl Cell {
    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }

    pub fn plant(&self) -> Option<&PlacedPlant> {
        match self {
            Cell::Empty => None,
            Cell::Occupied(plant) => Some(plant),
        }
    }
}

impl From<Option<PlacedPlant>> for Cell {
    fn from(value: Option<PlacedPlant>) -> Self {
        value.map_or(Cell::Empty, Cell::Occupied)
    }
}

impl From<Cell> for Option<PlacedPlant> {
    fn from(cell: Cell) -> Self {
        match cell {
            Cell::Empty => None,
            Cell::Occupied(plant) => Some(plant),
        }
    }
}

/// Flat row-major grid: cell (x, y) lives at `x * columns + y`.
pub type Grid = Vec<Cell>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Garden {
    pub id: GardenId,
    pub owner_id: OwnerId,
    pub name: String,
    pub width_cm: u32,
    pub length_cm: u32,
    #[schema(value_type = Vec<Option<PlacedPlant>>)]
    pub grid: Grid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Garden {
    pub fn shape(&self) -> GridShape {
        GridShape::from_dimensions(self.width_cm, self.length_cm)
    }

    pub fn is_owned_by(&self, owner_id: OwnerId) -> bool {
        self.owner_id == owner_id
    }
}

/// A garden about to be inserted; the store assigns id and timestamps.
#[derive(Debug, Clone, PartialEq)]
pub struct NewGarden {
    pub owner_id: OwnerId,
    pub name: String,
    pub width_cm: u32,
    pub length_cm: u32,
    pub grid: Grid,
}

impl NewGarden {
    /// Builds a garden whose grid is fully empty and sized from the dimensions.
    pub fn empty(owner_id: OwnerId, name: String, width_cm: u32, length_cm: u32) -> Self {
        let shape = GridShape::from_dimensions(width_cm, length_cm);
        Self {
            owner_id,
            name,
            width_cm,
            length_cm,
            grid: vec![Cell::Empty; shape.len()],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn basil() -> PlacedPlant {
        PlacedPlant {
            plant_id: "31".into(),
            display_name: "Basil".into(),
            appearance: Appearance::Color("#4caf50".into()),
        }
    }

    #[test]
    fn test_empty_cell_serialises_as_null() {
        let json = serde_json::to_value(Cell::Empty).unwrap();
        assert!(json.is_null());
    }

    #[test]
    fn test_occupied_cell_serialises_as_plant_object() {
        let json = serde_json::to_value(Cell::Occupied(basil())).unwrap();
        assert_eq!(json["plantId"], "31");
        assert_eq!(json["displayName"], "Basil");
        assert_eq!(json["appearance"]["color"], "#4caf50");
    }

    #[test]
    fn test_grid_parses_mixed_null_and_plants() {
        let grid: Grid = serde_json::from_value(serde_json::json!([
            null,
            { "plantId": "31", "displayName": "Basil", "appearance": { "image": "https://x/basil.jpg" } }
        ]))
        .unwrap();
        assert_eq!(grid.len(), 2);
        assert!(grid[0].is_empty());
        assert_eq!(
            grid[1].plant().map(|p| &p.appearance),
            Some(&Appearance::Image("https://x/basil.jpg".into()))
        );
    }

    #[test]
    fn test_new_garden_grid_is_empty_and_sized() {
        let garden = NewGarden::empty(1, "Backyard".into(), 100, 60);
        // 100cm → 4 columns, 60cm → 3 rows
        assert_eq!(garden.grid.len(), 12);
        assert!(garden.grid.iter().all(Cell::is_empty));
    }
}
