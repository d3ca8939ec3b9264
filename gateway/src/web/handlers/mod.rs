// gateway/src/web/handlers/mod.rs

pub mod dashboard_handlers;
pub mod export_handlers;
pub mod health_handlers;
pub mod import_handlers;
pub mod product_handlers;
pub mod search_handlers;
