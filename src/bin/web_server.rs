use netroute::web::server::{start_server_with_config, ServerConfig};
use std::env;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut config = ServerConfig::from_env();

    // A positional port argument wins over the environment
    if let Some(arg) = env::args().nth(1) {
        match arg.parse() {
            Ok(port) => config.port = port,
            Err(_) => log::warn!("ignoring port argument {:?}", arg),
        }
    }

    log::info!(
        "configuration: address={} cors={} max_sessions={} max_nodes={}",
        config.address(),
        config.enable_cors,
        config.max_sessions,
        config.generation_limits.max_nodes
    );

    start_server_with_config(config).await?;

    Ok(())
}
