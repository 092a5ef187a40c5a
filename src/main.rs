use crate::{
    configuration::Configuration, configuration_handler::ConfigurationHandler,
    file_storage::FileStorage, http::create_app, local_storage::MemoryStorage,
    local_storage::NoStorage,
};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

mod appointment_store;
mod backend;
mod calendar;
mod configuration;
mod configuration_handler;
mod error;
mod file_storage;
mod fixture;
mod http;
mod local_storage;
mod slots;
#[cfg(test)]
mod testutils;
mod types;

#[tokio::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    println!("##################");
    println!("# Weekly Booking #");
    println!("##################");

    let configuration = ConfigurationHandler::parse_arguments();

    let address = format!("0.0.0.0:{}", configuration.port());
    let listener = tokio::net::TcpListener::bind(&address).await?;
    info!(%address, "Accessible");

    let app = match configuration.storage_dir() {
        Some(directory) => match FileStorage::new(&directory) {
            Ok(backend) => create_app(backend, configuration),
            Err(err) => {
                error!(?err, directory = %directory.display(), "Storage directory unavailable. Appointments will not be persisted.");
                create_app(NoStorage, configuration)
            }
        },
        None => {
            info!("No storage directory configured, appointments are kept in memory");
            create_app(MemoryStorage::default(), configuration)
        }
    };

    axum::serve(listener, app).await
}
