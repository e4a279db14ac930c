use actix_web::{delete, get, http::Method, patch, post, web, HttpResponse};

use crate::{
    api::{auth::Caller, AppState},
    error::GardenError,
    models::{
        garden::{Cell, Garden},
        request::{
            link, ApiResponse, CellUpdateRequest, CreateGardenRequest, GardenResponse, Links,
            PaginatedResponse, Pagination,
        },
        GardenId,
    },
};

fn garden_links(id: GardenId) -> Links {
    let mut links = Links::new();
    links.insert("self".into(), link(format!("/api/gardens/{id}"), Method::GET));
    links.insert("cell".into(), link(format!("/api/gardens/{id}/cell"), Method::PATCH));
    links.insert("delete".into(), link(format!("/api/gardens/{id}"), Method::DELETE));
    links.insert("collection".into(), link("/api/gardens", Method::GET));
    links
}

fn garden_envelope(garden: Garden) -> ApiResponse<GardenResponse> {
    let links = garden_links(garden.id);
    ApiResponse::new(GardenResponse::from(garden), links)
}

/// POST /api/gardens
/// Creates a garden with an all-empty grid sized from its dimensions.
#[utoipa::path(
    context_path = "/api",
    tag = "gardens",
    request_body = CreateGardenRequest,
    params(("x-user-id" = i64, Header, description = "Authenticated user id")),
    responses(
        (status = 201, description = "Garden created", body = GardenApiResponse),
        (status = 400, description = "Invalid name or dimensions", body = ErrorResponse),
        (status = 401, description = "No authenticated caller", body = ErrorResponse),
    )
)]
#[post("/gardens")]
pub async fn create_garden(
    state: web::Data<AppState>,
    caller: Caller,
    body: web::Json<CreateGardenRequest>,
) -> Result<HttpResponse, GardenError> {
    let garden = state
        .gardens
        .create_garden(caller.user_id, body.into_inner())
        .await?;
    log::info!("garden {} created by user {}", garden.id, caller.user_id);
    Ok(HttpResponse::Created().json(garden_envelope(garden)))
}

/// GET /api/gardens
/// Lists the caller's gardens.
#[utoipa::path(
    context_path = "/api",
    tag = "gardens",
    params(("x-user-id" = i64, Header, description = "Authenticated user id")),
    responses(
        (status = 200, description = "Gardens owned by the caller", body = GardenListResponse),
        (status = 401, description = "No authenticated caller", body = ErrorResponse),
    )
)]
#[get("/gardens")]
pub async fn list_gardens(
    state: web::Data<AppState>,
    caller: Caller,
) -> Result<HttpResponse, GardenError> {
    let gardens: Vec<GardenResponse> = state
        .gardens
        .list_gardens(caller.user_id)
        .await?
        .into_iter()
        .map(GardenResponse::from)
        .collect();
    let total = gardens.len();
    let mut links = Links::new();
    links.insert("self".into(), link("/api/gardens", Method::GET));
    links.insert("create".into(), link("/api/gardens", Method::POST));
    Ok(HttpResponse::Ok().json(PaginatedResponse::new(
        gardens,
        links,
        Pagination::single_page(total),
    )))
}

/// GET /api/gardens/{id}
/// Returns one garden; gardens of other users are reported as missing.
#[utoipa::path(
    context_path = "/api",
    tag = "gardens",
    params(
        ("id" = i64, Path, description = "Garden id"),
        ("x-user-id" = i64, Header, description = "Authenticated user id"),
    ),
    responses(
        (status = 200, description = "The garden", body = GardenApiResponse),
        (status = 404, description = "Missing or not owned", body = ErrorResponse),
    )
)]
#[get("/gardens/{id}")]
pub async fn get_garden(
    state: web::Data<AppState>,
    caller: Caller,
    path: web::Path<i64>,
) -> Result<HttpResponse, GardenError> {
    let garden = state
        .gardens
        .get_garden(path.into_inner(), caller.user_id)
        .await?;
    Ok(HttpResponse::Ok().json(garden_envelope(garden)))
}

/// PATCH /api/gardens/{id}/cell
/// Places, changes or clears the plant of a single cell.
#[utoipa::path(
    context_path = "/api",
    tag = "gardens",
    request_body = CellUpdateRequest,
    params(
        ("id" = i64, Path, description = "Garden id"),
        ("x-user-id" = i64, Header, description = "Authenticated user id"),
    ),
    responses(
        (status = 200, description = "Updated garden", body = GardenApiResponse),
        (status = 400, description = "Coordinate outside the grid", body = ErrorResponse),
        (status = 404, description = "Missing or not owned", body = ErrorResponse),
        (status = 503, description = "Storage unavailable, retry later", body = ErrorResponse),
    )
)]
#[patch("/gardens/{id}/cell")]
pub async fn update_cell(
    state: web::Data<AppState>,
    caller: Caller,
    path: web::Path<i64>,
    body: web::Json<CellUpdateRequest>,
) -> Result<HttpResponse, GardenError> {
    let CellUpdateRequest { x, y, cell } = body.into_inner();
    let garden = state
        .gardens
        .set_cell(path.into_inner(), caller.user_id, x, y, Cell::from(cell))
        .await?;
    Ok(HttpResponse::Ok().json(garden_envelope(garden)))
}

/// DELETE /api/gardens/{id}
#[utoipa::path(
    context_path = "/api",
    tag = "gardens",
    params(
        ("id" = i64, Path, description = "Garden id"),
        ("x-user-id" = i64, Header, description = "Authenticated user id"),
    ),
    responses(
        (status = 200, description = "Deleted garden", body = GardenApiResponse),
        (status = 404, description = "Missing or not owned", body = ErrorResponse),
    )
)]
#[delete("/gardens/{id}")]
pub async fn delete_garden(
    state: web::Data<AppState>,
    caller: Caller,
    path: web::Path<i64>,
) -> Result<HttpResponse, GardenError> {
    let garden = state
        .gardens
        .delete_garden(path.into_inner(), caller.user_id)
        .await?;
    log::info!("garden {} deleted by user {}", garden.id, caller.user_id);
    Ok(HttpResponse::Ok().json(garden_envelope(garden)))
}
