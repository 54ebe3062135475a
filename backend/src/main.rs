use actix_web::{web, App, HttpResponse, HttpServer};
use env_logger::Env;
use log::{error, info};
use std::thread;
use std::time::Duration;
use survey_server::config::Config;
use survey_server::services;
use survey_server::state::AppState;
use survey_server::storage;

async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(serde_json::json!({ "error": "not found" }))
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(Env::default().default_filter_or("info"));

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("Invalid configuration: {}", e);
            return Err(std::io::Error::new(std::io::ErrorKind::InvalidInput, e));
        }
    };

    let store = match storage::open(&config) {
        Ok(store) => store,
        Err(e) => {
            error!("Could not open {:?} storage: {}", config.storage, e);
            return Err(std::io::Error::other(e));
        }
    };

    let url = config.bind_url();
    if config.open_browser {
        let admin_url = url.clone();
        thread::spawn(move || {
            thread::sleep(Duration::from_millis(500));
            let _ = webbrowser::open(&admin_url);
        });
    }

    let host = config.host.clone();
    let port = config.port;
    let payload_limit = config.max_upload_bytes;
    info!(
        "Survey server running at {} ({:?} storage in {}, links point to {})",
        url,
        config.storage,
        config.data_dir.display(),
        config.public_url
    );
    let state = AppState::new(store, config);

    HttpServer::new(move || {
        App::new()
            .app_data(web::JsonConfig::default().limit(payload_limit))
            .app_data(web::Data::new(state.clone()))
            .configure(services::configure)
            .default_service(web::route().to(not_found))
    })
    .bind((host, port))?
    .run()
    .await
}
