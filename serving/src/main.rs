use std::{io, sync::Arc};

use actix_web::{App, HttpServer, web};
use log::info;

use artifact::ArtifactCache;
use loader::ModelLoader;
use store::{HttpObjectStore, ObjectRef, StoreConfig};

mod config;
mod routes;
mod types;

use config::ServingConfig;

#[actix_web::main]
async fn main() -> io::Result<()> {
    env_logger::init();

    let config = ServingConfig::from_env().map_err(io::Error::other)?;

    let store = HttpObjectStore::new(&config.store_endpoint, StoreConfig::default())
        .map_err(io::Error::other)?;
    let cache = ArtifactCache::new(&config.cache_path);
    let object = ObjectRef::new(&config.bucket, &config.key);
    let loader = ModelLoader::new(Arc::new(store), cache, object);

    // Kick the load off before the first request arrives: a warm start is
    // ready here and now, a cold one proceeds in the background.
    if loader.get_model().is_some() {
        info!("model ready (warm start)");
    } else {
        info!("model loading in the background");
    }

    let data = web::Data::new(loader);
    let addr = (config.host.clone(), config.port);
    info!("listening at {}:{}", config.host, config.port);

    HttpServer::new(move || {
        App::new()
            .app_data(data.clone())
            .service(routes::predict)
            .service(routes::health)
    })
    .bind(addr)?
    .run()
    .await
}
