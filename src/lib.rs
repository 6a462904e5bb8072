pub mod application;
pub mod config;
pub mod db;
pub mod domain;
pub mod errors;
pub mod handlers;
pub mod infrastructure;
pub mod openapi;
pub mod schema;

use actix_web::{middleware::Logger, web, App, HttpServer};
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::application::order_line_service::OrderLineService;
use crate::domain::ports::OrderLineRepository;
use crate::errors::StartupError;
use crate::handlers::order_lines;
use crate::infrastructure::DieselOrderLineRepository;

pub use db::{create_pool, DbPool};

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Run any pending Diesel migrations against the pool's database.
pub fn run_migrations(pool: &DbPool) -> Result<(), StartupError> {
    let mut conn = pool.get()?;
    conn.run_pending_migrations(MIGRATIONS)
        .map_err(|e| StartupError::Migration(e.to_string()))?;
    Ok(())
}

/// Mount the `/order-lines` resource for a service backed by `R`.
///
/// The service itself must be registered as `web::Data<OrderLineService<R>>`.
pub fn configure_routes<R: OrderLineRepository>(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/order-lines")
            .route("", web::post().to(order_lines::create_order_line::<R>))
            .route("", web::get().to(order_lines::list_order_lines::<R>))
            .route("/{id}", web::get().to(order_lines::get_order_line::<R>))
            .route("/{id}", web::put().to(order_lines::update_order_line::<R>))
            .route(
                "/{id}",
                web::patch().to(order_lines::partial_update_order_line::<R>),
            )
            .route("/{id}", web::delete().to(order_lines::delete_order_line::<R>)),
    );
}

/// Build and return an actix-web `Server` bound to `host:port`.
///
/// The caller is responsible for `.await`-ing (or `tokio::spawn`-ing) the
/// returned server.
pub fn build_server(
    pool: DbPool,
    host: &str,
    port: u16,
) -> std::io::Result<actix_web::dev::Server> {
    let service = web::Data::new(OrderLineService::new(DieselOrderLineRepository::new(pool)));

    Ok(HttpServer::new(move || {
        App::new()
            .app_data(service.clone())
            .wrap(Logger::default())
            .configure(configure_routes::<DieselOrderLineRepository>)
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-docs/openapi.json", openapi::ApiDoc::openapi()),
            )
    })
    .bind((host.to_string(), port))?
    .run())
}
