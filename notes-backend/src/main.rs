use actix_cors::Cors;
use actix_web::middleware::{Logger, NormalizePath};
use actix_web::{web, App, HttpServer};
use dotenv::dotenv;
use std::io;

mod config;
mod controllers;
mod files;

use config::Config;
use files::FileStore;

#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenv().ok();
    env_logger::init();

    log::info!("Notes backend v{}", controllers::health::VERSION);

    let config = Config::from_env().map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;

    if config.create_base_dir && !config.base_dir.exists() {
        log::info!("Creating base directory {}", config.base_dir.display());
        std::fs::create_dir_all(&config.base_dir)?;
    }

    let store = FileStore::new(&config.base_dir).map_err(|e| {
        log::error!("Cannot serve {}: {}", config.base_dir.display(), e);
        io::Error::new(io::ErrorKind::NotFound, e)
    })?;
    log::info!("Serving notes from {}", store.root().display());

    let store = web::Data::new(store);

    log::info!(
        "Starting server on {}:{}",
        config.bind_address,
        config.port
    );

    HttpServer::new(move || {
        let cors = Cors::default()
            .allow_any_origin()
            .allow_any_method()
            .allow_any_header()
            .max_age(3600);

        App::new()
            .app_data(store.clone())
            .wrap(NormalizePath::trim())
            .wrap(Logger::default())
            .wrap(cors)
            .configure(controllers::health::config_routes)
            .configure(controllers::files::config)
    })
    .bind((config.bind_address.as_str(), config.port))?
    .run()
    .await
}
