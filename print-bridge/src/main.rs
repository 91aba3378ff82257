use print_bridge::{Server, ServerState, print_banner, setup_environment};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Environment (.env, config, logging)
    let config = setup_environment()?;

    print_banner();

    tracing::info!(
        environment = %config.environment,
        "🖨️ Print bridge starting..."
    );

    // 2. Printer check and shared state
    let state = ServerState::initialize(&config).await?;

    // 3. HTTP server until Ctrl-C
    let server = Server::with_state(config, state);

    if let Err(e) = server.run().await {
        tracing::error!("Server error: {}", e);
        return Err(e);
    }

    Ok(())
}
