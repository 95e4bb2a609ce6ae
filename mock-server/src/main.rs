use mock_server::MockConfig;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), std::io::Error> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let port = std::env::var("PORT").unwrap_or_else(|_| "3000".to_string());
    let addr = format!("127.0.0.1:{port}");
    let mut config = MockConfig::default();
    if let Ok(api_key) = std::env::var("MOCK_API_KEY") {
        config.api_key = api_key;
    }
    if let Ok(base_url) = std::env::var("MOCK_BASE_URL") {
        config.base_url = base_url;
    }

    let listener = TcpListener::bind(&addr).await?;
    tracing::info!(%addr, api_key = %config.api_key, "mock Isbaşı API listening");
    mock_server::run(listener, config).await
}
