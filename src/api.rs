use crate::logic::{images::ImageCache, mutation::CellMutationService};

pub mod auth;
pub mod handlers;
pub mod openapi;
pub mod routes;

/// Shared state handed to every handler through `web::Data`.
pub struct AppState {
    pub gardens: CellMutationService,
    pub images: ImageCache,
}

impl AppState {
    pub fn new(gardens: CellMutationService, images: ImageCache) -> Self {
        Self { gardens, images }
    }
}
