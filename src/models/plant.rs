use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Entry of the built-in plant catalogue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PlantSummary {
    pub id: String,
    pub name: String,
    pub category: String,
    /// Image path, relative to the image host unless already absolute.
    pub image: String,
}
