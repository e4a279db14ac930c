use utoipa::OpenApi;

use crate::models::{
    garden::{Appearance, Garden, PlacedPlant},
    plant::PlantSummary,
    request::{
        CellUpdateRequest, CreateGardenRequest, ErrorResponse, GardenApiResponse,
        GardenListResponse, GardenResponse, ImageApiResponse, ImageLookupResponse, Link,
        Pagination, PlantApiResponse, PlantListResponse,
    },
    Coordinate,
};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Garden Planner API",
        description = "Create rectangular gardens, place plants on a 25cm grid and browse the plant catalogue. Every garden route expects the authenticated user id in the X-User-Id header.",
        version = "1.0.0",
        license(name = "MIT"),
    ),
    paths(
        crate::api::handlers::gardens::create_garden,
        crate::api::handlers::gardens::list_gardens,
        crate::api::handlers::gardens::get_garden,
        crate::api::handlers::gardens::update_cell,
        crate::api::handlers::gardens::delete_garden,
        crate::api::handlers::plants::list_plants,
        crate::api::handlers::plants::lookup_image,
        crate::api::handlers::plants::get_plant,
    ),
    components(
        schemas(
            // Garden
            Garden, GardenResponse, PlacedPlant, Appearance, Coordinate,
            // Requests
            CreateGardenRequest, CellUpdateRequest,
            // Plants
            PlantSummary, ImageLookupResponse,
            // Shared
            Link, Pagination, ErrorResponse,
            // Concrete response envelopes (via #[aliases])
            GardenApiResponse,
            GardenListResponse,
            PlantApiResponse,
            PlantListResponse,
            ImageApiResponse,
        )
    ),
    tags(
        (name = "gardens", description = "Garden layouts: create, list, fetch, edit one cell, delete"),
        (name = "plants",  description = "Plant catalogue and image lookup"),
    )
)]
pub struct ApiDoc;
