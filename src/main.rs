use std::io;

use actix_web::web;
use dotenvy::dotenv;
use retail_ops::{build_server, AppConfig, AppState};

#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let config =
        AppConfig::from_env().map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;
    let state = web::Data::new(AppState::new(&config));

    log::info!(
        "Starting server at http://{}:{} ({}, sample data: {})",
        config.host,
        config.port,
        config.environment,
        config.seed_sample_data
    );

    build_server(state, &config.host, config.port)?.await
}
