pub mod gardens;
pub mod plants;

pub use gardens::{create_garden, delete_garden, get_garden, list_gardens, update_cell};
pub use plants::{get_plant, list_plants, lookup_image};
