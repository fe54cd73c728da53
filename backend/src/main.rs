mod clients;
mod config;
mod forms;
mod send_one_off;
mod services;
mod session;
mod state;
mod validation;

use std::path::PathBuf;

use actix_web::{web, App, HttpServer};
use env_logger::Env;
use log::info;

use crate::state::AppState;

const CONFIG_ENV: &str = "NOTIFY_ADMIN_CONFIG";
const DEFAULT_CONFIG_PATH: &str = "notify-admin.toml";

fn main() -> anyhow::Result<()> {
    env_logger::init_from_env(Env::default().default_filter_or("info"));

    let config_path = std::env::var_os(CONFIG_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH));
    let cfg = config::load(config_path)?;
    let host = cfg.host.clone();
    let port = cfg.port;

    // The blocking HTTP clients refuse to be built inside the runtime.
    let state = AppState::from_config(cfg)?;

    info!("Server running at http://{}:{}", host, port);

    actix_web::rt::System::new().block_on(serve(state.clone(), host, port))?;

    // Dropped here, outside the runtime, for the same reason.
    drop(state);
    Ok(())
}

async fn serve(state: AppState, host: String, port: u16) -> std::io::Result<()> {
    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(state.clone()))
            .configure(services::configure)
    })
    .bind((host.as_str(), port))?
    .run()
    .await
}
