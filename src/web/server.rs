use axum::{
    http::{header, Method},
    Router,
};
use std::env;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};

use crate::web::api::{create_router, AppState, GenerationLimits};

/// Configuration for the web server
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: IpAddr,
    pub port: u16,
    pub enable_cors: bool,
    pub max_sessions: usize,
    /// Largest network `POST /api/graphs/generate` accepts
    pub generation_limits: GenerationLimits,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: 3005,
            enable_cors: true,
            max_sessions: 1000,
            generation_limits: GenerationLimits::default(),
        }
    }
}

impl ServerConfig {
    /// Defaults overridden by `NETROUTE_HOST`, `NETROUTE_PORT`, `NETROUTE_MAX_SESSIONS`,
    /// `NETROUTE_CORS`, `NETROUTE_MAX_NODES` and `NETROUTE_MAX_EDGES_PER_NODE`
    ///
    /// Unparseable values are logged and ignored.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Some(host) = env_var("NETROUTE_HOST") {
            config.host = host;
        }
        if let Some(port) = env_var("NETROUTE_PORT") {
            config.port = port;
        }
        if let Some(max_sessions) = env_var("NETROUTE_MAX_SESSIONS") {
            config.max_sessions = max_sessions;
        }
        if let Some(enable_cors) = env_var("NETROUTE_CORS") {
            config.enable_cors = enable_cors;
        }
        if let Some(max_nodes) = env_var("NETROUTE_MAX_NODES") {
            config.generation_limits.max_nodes = max_nodes;
        }
        if let Some(max_edges) = env_var("NETROUTE_MAX_EDGES_PER_NODE") {
            config.generation_limits.max_edges_per_node = max_edges;
        }
        config
    }

    pub fn address(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

fn env_var<T: std::str::FromStr>(name: &str) -> Option<T> {
    let raw = env::var(name).ok()?;
    match raw.parse() {
        Ok(value) => Some(value),
        Err(_) => {
            log::warn!("ignoring {}={:?}: not a valid value", name, raw);
            None
        }
    }
}

/// Builds the application router for a configuration
pub fn build_app(config: &ServerConfig) -> Router {
    let app_state = AppState::with_limits(config.max_sessions, config.generation_limits);
    let app = Router::new().merge(create_router()).with_state(app_state);

    if config.enable_cors {
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods([Method::GET, Method::POST])
            .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

        app.layer(ServiceBuilder::new().layer(cors).into_inner())
    } else {
        app
    }
}

/// Start the web server with custom configuration
pub async fn start_server_with_config(config: ServerConfig) -> Result<(), Box<dyn std::error::Error>> {
    let app = build_app(&config);
    let addr = config.address();

    log::info!("netroute server listening on http://{}", addr);
    log::info!("health check at http://{}/api/health", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
