use menu_server::{Server, ServerState, setup_environment};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Environment (dotenv, configuration, logging)
    let config = setup_environment();

    tracing::info!("Menu server starting...");

    // 2. Server state (database, catalog service)
    let state = ServerState::initialize(&config).await?;

    // 3. HTTP server
    let server = Server::with_state(config, state);
    server.run().await?;

    Ok(())
}
