use actix_web::{web, HttpResponse, Responder};
use notes_api_types::MessageResponse;

use crate::files::FileStore;

/// Version from Cargo.toml, available at compile time
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub fn config_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/").route(web::get().to(welcome)));
    cfg.service(web::resource("/api/health").route(web::get().to(health_check)));
    cfg.service(web::resource("/api/version").route(web::get().to(get_version)));
}

async fn welcome() -> impl Responder {
    HttpResponse::Ok().json(MessageResponse {
        message: "Welcome to the File Listing API!".to_string(),
    })
}

async fn health_check(store: web::Data<FileStore>) -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "ok",
        "version": VERSION,
        "base_dir": store.root().display().to_string()
    }))
}

async fn get_version() -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({
        "version": VERSION
    }))
}
