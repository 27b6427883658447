mod web;

use std::sync::Arc;

use actix_files::Files;
use actix_web::middleware::Logger;
use actix_web::web::Data;
use actix_web::{App, HttpServer};
use tracing_subscriber::EnvFilter;

use pontonovo::admin::AdminController;
use pontonovo::client::{
    DiskUploader, EntityBackend, HttpBackend, HttpUploader, MemoryBackend, Uploader,
};
use pontonovo::common::GeneralError;
use pontonovo::config::{BackendKind, Config};
use pontonovo::db::{Database, PgBackend};
use pontonovo::site::SitePages;

fn setup_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

async fn build_backends(
    config: &Config,
) -> Result<(Arc<dyn EntityBackend>, Arc<dyn Uploader>), GeneralError> {
    let backend: Arc<dyn EntityBackend>;
    let uploader: Arc<dyn Uploader>;

    match config.backend {
        BackendKind::Http => {
            let url = config.entity_api_url.clone().unwrap_or_default();
            let http = HttpBackend::new(url, config.entity_api_token.clone())?;
            uploader = Arc::new(HttpUploader::new(http.clone()));
            backend = Arc::new(http);
        }
        BackendKind::Postgres => {
            let url = config.database_url.clone().unwrap_or_default();
            let db = Database::new(&url).await?;
            backend = Arc::new(PgBackend::new(db.pool));
            uploader = Arc::new(DiskUploader::new(&config.upload_dir, "/uploads"));
        }
        BackendKind::Memory => {
            tracing::warn!("using the in-memory backend; content is lost on restart");
            backend = Arc::new(MemoryBackend::new());
            uploader = Arc::new(DiskUploader::new(&config.upload_dir, "/uploads"));
        }
    }

    Ok((backend, uploader))
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    setup_logging();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "invalid configuration");
            std::process::exit(1);
        }
    };

    let (backend, uploader) = match build_backends(&config).await {
        Ok(pair) => pair,
        Err(e) => {
            tracing::error!(error = %e, backend = %config.backend, "failed to initialise backend");
            std::process::exit(1);
        }
    };

    std::fs::create_dir_all(&config.upload_dir)?;

    let state = Data::new(web::AppState {
        pages: SitePages::new(Arc::clone(&backend)),
        admin: AdminController::new(backend, uploader),
        rotation_ms: config.rotation_ms,
    });

    tracing::info!(addr = %config.bind_addr, backend = %config.backend, "starting server");

    let static_dir = config.static_dir.clone();
    let upload_dir = config.upload_dir.clone();
    HttpServer::new(move || {
        App::new()
            .wrap(web::middleware::SecurityHeaders)
            .wrap(Logger::default())
            .app_data(state.clone())
            .configure(web::handlers::configure)
            .service(Files::new("/static", &static_dir).prefer_utf8(true))
            .service(Files::new("/uploads", &upload_dir))
    })
    .bind(&config.bind_addr)?
    .run()
    .await
}
