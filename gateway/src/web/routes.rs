// gateway/src/web/routes.rs

use actix_web::web;

use crate::errors::AppError;
use crate::state::AppState;
use crate::web::handlers::{
  dashboard_handlers, export_handlers, health_handlers, import_handlers, product_handlers, search_handlers,
};

/// Shared state, extractor configuration and every route. Used by `main`
/// and by the HTTP tests.
pub fn configure_app(cfg: &mut web::ServiceConfig, app_state: &AppState) {
  let json_config = web::JsonConfig::default()
    .limit(app_state.config.json_body_limit)
    .error_handler(|err, _req| AppError::Validation(format!("Invalid JSON body: {}", err)).into());
  let query_config = web::QueryConfig::default()
    .error_handler(|err, _req| AppError::Validation(format!("Invalid query string: {}", err)).into());

  cfg
    .app_data(web::Data::new(app_state.clone()))
    .app_data(json_config)
    .app_data(query_config)
    .configure(configure_app_routes);
}

pub fn configure_app_routes(cfg: &mut web::ServiceConfig) {
  cfg
    .route("/", web::get().to(health_handlers::root_handler))
    .route("/health", web::get().to(health_handlers::health_check_handler))
    // Catalog
    .service(
      web::scope("/products")
        .route("", web::get().to(product_handlers::list_products_handler))
        .route("", web::post().to(product_handlers::create_product_handler))
        .route("/{id}", web::get().to(product_handlers::get_product_handler)),
    )
    .route(
      "/latest-products",
      web::get().to(product_handlers::latest_products_handler),
    )
    .route(
      "/top-rated-products",
      web::get().to(product_handlers::top_rated_products_handler),
    )
    .route("/search", web::get().to(search_handlers::search_products_handler))
    // Exporter-owned products
    .service(
      web::scope("/my-export")
        .route("", web::get().to(export_handlers::my_exports_handler))
        .route("/{id}", web::put().to(export_handlers::update_export_handler))
        .route("/{id}", web::delete().to(export_handlers::delete_export_handler)),
    )
    // Imports
    .route("/imports/{id}", web::post().to(import_handlers::create_import_handler))
    .service(
      web::scope("/my-imports")
        .route("", web::get().to(import_handlers::my_imports_handler))
        .route("/{id}", web::delete().to(import_handlers::delete_import_handler)),
    )
    // Dashboard
    .service(
      web::scope("/dashboard")
        .route("/summary", web::get().to(dashboard_handlers::summary_handler))
        .route(
          "/import-analytics",
          web::get().to(dashboard_handlers::import_analytics_handler),
        )
        .route(
          "/monthly-imports",
          web::get().to(dashboard_handlers::monthly_imports_handler),
        )
        .route(
          "/recent-imports",
          web::get().to(dashboard_handlers::recent_imports_handler),
        )
        .route(
          "/recent-exports",
          web::get().to(dashboard_handlers::recent_exports_handler),
        ),
    );
}
