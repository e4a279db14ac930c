use actix_web::{get, http::Method, web, HttpResponse};

use crate::{
    api::AppState,
    data::plants::{get_all_plants, get_plant_by_id},
    models::request::{
        link, ApiResponse, ErrorResponse, ImageLookupQuery, ImageLookupResponse, Links,
        PaginatedResponse, Pagination,
    },
};

/// GET /api/plants
/// Returns the built-in plant catalogue.
#[utoipa::path(
    context_path = "/api",
    tag = "plants",
    responses((status = 200, description = "Plant catalogue", body = PlantListResponse))
)]
#[get("/plants")]
pub async fn list_plants() -> HttpResponse {
    let plants = get_all_plants();
    let total = plants.len();
    let mut links = Links::new();
    links.insert("self".into(), link("/api/plants", Method::GET));
    links.insert("image".into(), link("/api/plants/image?name={name}", Method::GET));
    HttpResponse::Ok().json(PaginatedResponse::new(
        plants,
        links,
        Pagination::single_page(total),
    ))
}

/// GET /api/plants/image?name=...
/// Resolves a plant name to an absolute image URL through the image cache.
#[utoipa::path(
    context_path = "/api",
    tag = "plants",
    params(ImageLookupQuery),
    responses((status = 200, description = "Image URL, absent when unknown", body = ImageApiResponse))
)]
#[get("/plants/image")]
pub async fn lookup_image(
    state: web::Data<AppState>,
    query: web::Query<ImageLookupQuery>,
) -> HttpResponse {
    let name = query.into_inner().name;
    let image_url = state.images.lookup(&name);
    let mut links = Links::new();
    links.insert("plants".into(), link("/api/plants", Method::GET));
    HttpResponse::Ok().json(ApiResponse::new(ImageLookupResponse { name, image_url }, links))
}

/// GET /api/plants/{id}
#[utoipa::path(
    context_path = "/api",
    tag = "plants",
    params(("id" = String, Path, description = "Plant id")),
    responses(
        (status = 200, description = "The plant", body = PlantApiResponse),
        (status = 404, description = "Unknown plant", body = ErrorResponse),
    )
)]
#[get("/plants/{id}")]
pub async fn get_plant(path: web::Path<String>) -> HttpResponse {
    let id = path.into_inner();
    match get_plant_by_id(&id) {
        None => HttpResponse::NotFound().json(ErrorResponse {
            error: format!("Plant '{id}' not found."),
            code: Some("NOT_FOUND".into()),
        }),
        Some(plant) => {
            let mut links = Links::new();
            links.insert("self".into(), link(format!("/api/plants/{id}"), Method::GET));
            links.insert("collection".into(), link("/api/plants", Method::GET));
            HttpResponse::Ok().json(ApiResponse::new(plant, links))
        }
    }
}
