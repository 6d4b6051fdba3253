use actix_web::{web, App, HttpServer};
use std::io;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

use shortly::config::Config;
use shortly::services::{ApiService, LinkService, RedirectService};
use shortly::storages::StorageFactory;
use shortly::utils::AliasGenerator;

#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::from_env();

    let storage = StorageFactory::create(&config)
        .await
        .map_err(|e| io::Error::other(e.to_string()))?;
    info!(
        "Using storage backend: {}",
        storage.get_backend_name().await
    );

    let service = Arc::new(LinkService::new(
        storage,
        AliasGenerator::new(config.alias_length),
    ));

    let bind_address = config.bind_address();
    info!("Starting server at http://{}", bind_address);

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(service.clone()))
            .service(
                web::scope("/shortly")
                    .route("", web::get().to(ApiService::get_all_links))
                    .route("/", web::get().to(ApiService::get_all_links))
                    .route("/shorten", web::post().to(ApiService::post_link))
                    .route("/delete/{alias}", web::delete().to(ApiService::delete_link))
                    .route("/{alias}", web::get().to(RedirectService::handle_redirect)),
            )
    })
    .bind(bind_address)?
    .run()
    .await
}
