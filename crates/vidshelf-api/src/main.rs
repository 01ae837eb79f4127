use vidshelf_core::Config;

// Use mimalloc as the global allocator for lower fragmentation under many
// concurrent streaming uploads.
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize the application (telemetry, database, storage, routes)
    let (_state, router) = vidshelf_api::setup::initialize_app(config.clone()).await?;

    // Start the server
    vidshelf_api::setup::server::start_server(&config, router).await?;

    Ok(())
}
