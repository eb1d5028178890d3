use ledger::Ledger;

mod settings;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let settings = settings::Settings::new()?;

    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "gruzzolo={level},server={level},ledger={level}",
            level = settings.app.level
        ))
        .init();

    let bind = settings
        .server
        .bind
        .unwrap_or_else(|| "127.0.0.1".to_string());
    let addr = format!("{}:{}", bind, settings.server.port);
    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(err) => {
            tracing::error!("failed to bind server listener: {err}");
            return Err(err.into());
        }
    };

    // The session ledger starts empty and lives only as long as this process.
    if let Err(err) = server::run_with_listener(Ledger::new(), &settings.server.access_key, listener).await
    {
        tracing::error!("server failed: {err}");
        return Err(err.into());
    }

    Ok(())
}
