use credential_gateway::{AppState, Settings, StoreError};
use dotenv::dotenv;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let config = Settings::new()?;
    info!("Configuration loaded: {:?}", config.database);

    let state = AppState::new(config).await?;
    let result = run_demo(&state).await;

    // the pool is closed on every exit path
    state.shutdown().await;
    result
}

async fn run_demo(state: &AppState) -> anyhow::Result<()> {
    state.migrate().await?;

    let is_valid_user = state.gateway.authenticate("testuser", "password123").await?;
    println!("Login successful: {}", is_valid_user);

    let is_registered = match state
        .gateway
        .register("newuser", "newpassword", "newuser@example.com")
        .await
    {
        Ok(created) => created,
        Err(StoreError::DuplicateUser { .. }) => false,
        Err(e) => return Err(e.into()),
    };
    println!("User registered: {}", is_registered);

    Ok(())
}
