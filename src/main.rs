use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{middleware, web, App, HttpServer};
use log::{info, warn};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use garden_planner::{
    api::{openapi::ApiDoc, routes, AppState},
    config::AppConfig,
    data::plants::get_all_plants,
    db::{postgres, GardenRepository, InMemoryGardenRepository, PgGardenRepository},
    logic::{images::ImageCache, mutation::CellMutationService},
};

fn cors(origins: &[String]) -> Cors {
    if origins.is_empty() {
        return Cors::permissive();
    }
    origins
        .iter()
        .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
        .allow_any_method()
        .allow_any_header()
        .max_age(3600)
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = AppConfig::from_env();
    let repo: Arc<dyn GardenRepository> = match &config.database_url {
        Some(url) => {
            let pool = postgres::create_pool(url, config.pool_size).map_err(std::io::Error::other)?;
            postgres::run_migrations(&pool)
                .await
                .map_err(std::io::Error::other)?;
            info!("using PostgreSQL storage (pool size {})", config.pool_size);
            Arc::new(PgGardenRepository::new(pool))
        }
        None => {
            warn!("DATABASE_URL not set, gardens are kept in memory only");
            Arc::new(InMemoryGardenRepository::new())
        }
    };

    let state = web::Data::new(AppState::new(
        CellMutationService::new(repo),
        ImageCache::new(config.image_base_url.clone(), get_all_plants()),
    ));

    let bind_addr = config.bind_addr.clone();
    info!("🌱 Garden planner started at http://{bind_addr}");
    info!("   POST   /api/gardens");
    info!("   GET    /api/gardens");
    info!("   GET    /api/gardens/{{id}}");
    info!("   PATCH  /api/gardens/{{id}}/cell");
    info!("   DELETE /api/gardens/{{id}}");
    info!("   GET    /api/plants");
    info!("   📖 Swagger UI → http://{bind_addr}/swagger-ui/");

    let cors_origins = config.cors_origins.clone();
    HttpServer::new(move || {
        App::new()
            .wrap(middleware::Logger::default())
            .wrap(cors(&cors_origins))
            .app_data(state.clone())
            .app_data(routes::json_config())
            .configure(routes::configure)
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-docs/openapi.json", ApiDoc::openapi()),
            )
    })
    .bind(bind_addr)?
    .run()
    .await
}
