use actix_web::{error::InternalError, web, HttpResponse};

use crate::{
    api::handlers::{
        create_garden, delete_garden, get_garden, get_plant, list_gardens, list_plants,
        lookup_image, update_cell,
    },
    models::request::ErrorResponse,
};

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .service(create_garden)
            .service(list_gardens)
            .service(get_garden)
            .service(update_cell)
            .service(delete_garden)
            .service(list_plants)
            // before /plants/{id}, which would otherwise capture "image"
            .service(lookup_image)
            .service(get_plant),
    );
}

/// Turns JSON body errors into `400 {"error": ...}` instead of actix's plain text.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        let message = format!("JSON deserialization error: {err}");
        InternalError::from_response(
            err,
            HttpResponse::BadRequest().json(ErrorResponse {
                error: message,
                code: Some("MALFORMED_JSON".into()),
            }),
        )
        .into()
    })
}
