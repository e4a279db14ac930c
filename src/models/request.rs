use std::collections::HashMap;

use actix_web::http::Method;
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;
use utoipa::{IntoParams, ToSchema};

use crate::models::{
    garden::{Garden, PlacedPlant},
    plant::PlantSummary,
};

/// Serde adapter for `actix_web::http::Method` (serialises as its uppercase string).
mod method_serde {
    use actix_web::http::Method;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(method: &Method, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(method.as_str())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Method, D::Error> {
        let s = String::deserialize(d)?;
        Method::from_bytes(s.as_bytes()).map_err(serde::de::Error::custom)
    }
}

/// A single HAL-style hyperlink.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Link {
    pub href: String,
    #[serde(with = "method_serde")]
    #[schema(value_type = String, example = "GET")]
    pub method: Method,
}

/// Map of relation name → link, serialised as the `_links` field in responses.
pub type Links = HashMap<String, Link>;

/// Helper to build a `Link` from an href and an HTTP method.
pub fn link(href: impl Into<String>, method: Method) -> Link {
    Link {
        href: href.into(),
        method,
    }
}

/// Pagination metadata included in responses that return lists.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub page: usize,
    pub per_page: usize,
    pub total: usize,
    pub total_pages: usize,
}

impl Pagination {
    /// Single page holding every item.
    pub fn single_page(total: usize) -> Self {
        Self {
            page: 1,
            per_page: total,
            total,
            total_pages: 1,
        }
    }
}

/// Generic single-item response envelope.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[aliases(
    GardenApiResponse = ApiResponse<GardenResponse>,
    PlantApiResponse = ApiResponse<PlantSummary>,
    ImageApiResponse = ApiResponse<ImageLookupResponse>
)]
pub struct ApiResponse<T> {
    pub payload: T,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<String>,
    #[serde(rename = "_links")]
    pub links: HashMap<String, Link>,
}

impl<T> ApiResponse<T> {
    pub fn new(payload: T, links: Links) -> Self {
        Self {
            payload,
            errors: vec![],
            links,
        }
    }
}

/// Generic paginated list response envelope.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[aliases(
    GardenListResponse = PaginatedResponse<GardenResponse>,
    PlantListResponse = PaginatedResponse<PlantSummary>
)]
pub struct PaginatedResponse<T> {
    pub payload: Vec<T>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<String>,
    #[serde(rename = "_links")]
    pub links: HashMap<String, Link>,
    pub pagination: Pagination,
}

impl<T> PaginatedResponse<T> {
    pub fn new(payload: Vec<T>, links: Links, pagination: Pagination) -> Self {
        Self {
            payload,
            errors: vec![],
            links,
            pagination,
        }
    }
}

/// Body of every error response.
#[skip_serializing_none]
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    pub code: Option<String>,
}

/// Garden as returned to clients, with its derived grid shape.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GardenResponse {
    #[serde(flatten)]
    pub garden: Garden,
    pub columns: usize,
    pub rows: usize,
}

impl From<Garden> for GardenResponse {
    fn from(garden: Garden) -> Self {
        let shape = garden.shape();
        Self {
            garden,
            columns: shape.columns,
            rows: shape.rows,
        }
    }
}

/// `POST /api/gardens` body. Dimensions are signed so that negative values
/// reach validation instead of failing deserialisation.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateGardenRequest {
    pub name: String,
    pub width_cm: i64,
    pub length_cm: i64,
}

/// `PATCH /api/gardens/{id}/cell` body. `cell: null` (or omitted) clears the cell.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CellUpdateRequest {
    /// Row index.
    pub x: i64,
    /// Column index.
    pub y: i64,
    #[serde(default)]
    pub cell: Option<PlacedPlant>,
}

#[derive(Debug, Clone, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ImageLookupQuery {
    /// Plant name to resolve, matched case-insensitively.
    pub name: String,
}

#[skip_serializing_none]
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ImageLookupResponse {
    pub name: String,
    pub image_url: Option<String>,
}
