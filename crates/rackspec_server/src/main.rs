use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{web, App, HttpServer};
use log::info;

use rackspec_engine::{ChromiumRenderer, RenderSettings, ScrapeSettings, SpecStore};
use rackspec_logging::LogDestination;
use rackspec_server::{routes, AppState, ServerConfig};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    rackspec_logging::initialize(LogDestination::Terminal);

    let config = ServerConfig::from_env();
    let store = SpecStore::open(&config.db_path).map_err(std::io::Error::other)?;
    let render_settings = RenderSettings {
        chrome_executable: config.chrome_executable.clone(),
        ..RenderSettings::default()
    };
    let state = web::Data::new(AppState {
        store,
        provider: Arc::new(ChromiumRenderer::new(render_settings)),
        settings: ScrapeSettings::default(),
    });

    info!(
        "starting on 0.0.0.0:{} (database {})",
        config.port,
        config.db_path.display()
    );

    HttpServer::new(move || {
        let cors = Cors::default()
            .allow_any_origin()
            .allow_any_method()
            .allow_any_header();

        App::new()
            .wrap(cors)
            .app_data(state.clone())
            .configure(routes::configure)
    })
    .bind(("0.0.0.0", config.port))?
    .run()
    .await
}
