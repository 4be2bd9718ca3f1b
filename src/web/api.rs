use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use ordered_float::OrderedFloat;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use uuid::Uuid;

use crate::algorithm::{
    compute_shortest_paths, PathOutcome, PathReconstructor, QueueStrategy, RoutePath,
    ShortestPathTables,
};
use crate::graph::generators::generate_random_network;
use crate::graph::{Edge, Graph, Network, Node, Point};
use crate::web::models::*;
use crate::Error;

/// Network type held by sessions
pub type RouteNetwork = Network<Point, OrderedFloat<f64>>;

type ApiResult<T> = Result<Json<T>, (StatusCode, Json<ErrorResponse>)>;

/// A session together with its parsed network and last computed tables
///
/// The network is shared so runs can work on it without holding the session lock.
#[derive(Debug)]
pub struct SessionEntry {
    pub session: Session,
    pub network: Arc<RouteNetwork>,
    pub tables: Option<ShortestPathTables<OrderedFloat<f64>>>,
    /// Insertion order; the smallest is evicted first
    sequence: u64,
    /// Bumped when a run starts; only the latest run may store its tables
    run_generation: u64,
}

impl SessionEntry {
    pub fn new(session: Session, network: RouteNetwork) -> Self {
        SessionEntry {
            session,
            network: Arc::new(network),
            tables: None,
            sequence: 0,
            run_generation: 0,
        }
    }
}

/// Upper bounds on what `POST /api/graphs/generate` will build
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerationLimits {
    pub max_nodes: usize,
    pub max_edges_per_node: usize,
}

impl Default for GenerationLimits {
    fn default() -> Self {
        Self {
            max_nodes: 100_000,
            max_edges_per_node: 16,
        }
    }
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub sessions: Arc<Mutex<HashMap<Uuid, SessionEntry>>>,
    pub max_sessions: usize,
    pub limits: GenerationLimits,
    next_sequence: Arc<AtomicU64>,
}

impl AppState {
    pub fn new() -> Self {
        Self::with_max_sessions(1000)
    }

    pub fn with_max_sessions(max_sessions: usize) -> Self {
        Self::with_limits(max_sessions, GenerationLimits::default())
    }

    pub fn with_limits(max_sessions: usize, limits: GenerationLimits) -> Self {
        Self {
            sessions: Arc::new(Mutex::new(HashMap::new())),
            max_sessions: max_sessions.max(1),
            limits,
            next_sequence: Arc::new(AtomicU64::new(0)),
        }
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<Uuid, SessionEntry>> {
        self.sessions.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Stores a new session, evicting the oldest one when full
    fn insert(&self, mut entry: SessionEntry) {
        entry.sequence = self.next_sequence.fetch_add(1, Ordering::Relaxed);
        let mut sessions = self.lock();
        while sessions.len() >= self.max_sessions {
            let oldest = sessions
                .values()
                .min_by_key(|entry| entry.sequence)
                .map(|entry| entry.session.id);
            match oldest {
                Some(id) => {
                    log::info!("evicting session {}", id);
                    sessions.remove(&id);
                }
                None => break,
            }
        }
        sessions.insert(entry.session.id, entry);
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

/// Create the API router
pub fn create_router() -> Router<AppState> {
    Router::new()
        .route("/api/graphs", post(upload_graph))
        .route("/api/graphs/generate", post(generate_graph))
        .route("/api/graphs/:session_id", get(get_graph))
        .route("/api/routes/:session_id/run", post(run_route))
        .route("/api/routes/:session_id/compare", post(compare_strategies))
        .route("/api/routes/:session_id/path/:dest", get(get_path))
        .route("/api/sessions", get(list_sessions))
        .route("/api/sessions/:session_id", get(get_session))
        .route("/api/health", get(health_check))
}

/// Generate a new random network
pub async fn generate_graph(
    State(state): State<AppState>,
    Json(request): Json<GraphGenerationRequest>,
) -> ApiResult<Session> {
    let limits = state.limits;
    if request.node_count > limits.max_nodes || request.edges_per_node > limits.max_edges_per_node {
        log::warn!(
            "rejected generation of {} nodes with {} edges each",
            request.node_count,
            request.edges_per_node
        );
        return Err(engine_error(Error::InvalidGraph(format!(
            "at most {} nodes with {} edges each can be generated, got {} with {}",
            limits.max_nodes, limits.max_edges_per_node, request.node_count, request.edges_per_node
        ))));
    }

    let seed = request.seed.unwrap_or_else(rand::random);
    let network = generate_random_network(request.node_count, request.edges_per_node, seed)
        .map_err(engine_error)?;

    let session = Session::new(convert_graph_to_web(&network));
    log::info!(
        "session {}: generated {} nodes, {} edges (seed {})",
        session.id,
        network.vertex_count(),
        network.edge_count(),
        seed
    );

    state.insert(SessionEntry::new(session.clone(), network));
    Ok(Json(session))
}

/// Store a caller-supplied network
pub async fn upload_graph(
    State(state): State<AppState>,
    Json(graph): Json<WebGraph>,
) -> ApiResult<Session> {
    let network = convert_web_graph_to_rust(&graph).map_err(|err| {
        log::warn!("rejected uploaded graph: {}", err);
        engine_error(err)
    })?;

    let session = Session::new(graph);
    log::info!(
        "session {}: uploaded {} nodes, {} edges",
        session.id,
        network.vertex_count(),
        network.edge_count()
    );

    state.insert(SessionEntry::new(session.clone(), network));
    Ok(Json(session))
}

/// Get graph data for a session
pub async fn get_graph(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> ApiResult<WebGraph> {
    let sessions = state.lock();
    let entry = sessions.get(&session_id).ok_or_else(session_not_found)?;
    Ok(Json(entry.session.graph.clone()))
}

/// Run Dijkstra from a source with the requested queue strategy
pub async fn run_route(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Json(request): Json<RunRequest>,
) -> ApiResult<RunResponse> {
    let (network, generation) = {
        let mut sessions = state.lock();
        let entry = sessions.get_mut(&session_id).ok_or_else(session_not_found)?;

        // Drop stale tables first so a failed run never leaves old paths readable
        entry.tables = None;
        entry.run_generation += 1;
        (Arc::clone(&entry.network), entry.run_generation)
    };

    let RunRequest { source, strategy } = request;
    let tables =
        run_blocking(move || compute_shortest_paths(network.as_ref(), source, strategy)).await?;

    let mut distances = HashMap::new();
    let mut predecessors = HashMap::new();
    for (node, distance) in tables.dist.iter().enumerate() {
        if distance.is_finite() {
            distances.insert(node, distance.into_inner());
            predecessors.insert(node, tables.prev[node]);
        }
    }

    let response = RunResponse {
        execution_id: Uuid::new_v4(),
        strategy: tables.strategy,
        source: tables.source,
        execution_time_ms: tables.elapsed.as_secs_f64() * 1000.0,
        reachable: distances.len(),
        distances,
        predecessors,
        stats: tables.stats,
    };

    let mut sessions = state.lock();
    match sessions.get_mut(&session_id) {
        Some(entry) if entry.run_generation == generation => {
            entry.session.last_run = Some(LastRun {
                source: response.source,
                strategy: response.strategy,
                execution_time_ms: response.execution_time_ms,
                stats: response.stats,
            });
            entry.tables = Some(tables);
        }
        Some(_) => log::debug!("session {}: run from {} was superseded", session_id, source),
        None => log::info!("session {} was evicted during a run", session_id),
    }

    Ok(Json(response))
}

/// Run both strategies from the same source and compare them
pub async fn compare_strategies(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Json(request): Json<CompareRequest>,
) -> ApiResult<CompareResponse> {
    let network = {
        let sessions = state.lock();
        let entry = sessions.get(&session_id).ok_or_else(session_not_found)?;
        Arc::clone(&entry.network)
    };

    let source = request.source;
    let (array, heap) = run_blocking(move || {
        let array = compute_shortest_paths(network.as_ref(), source, QueueStrategy::Array)?;
        let heap = compute_shortest_paths(network.as_ref(), source, QueueStrategy::Heap)?;
        Ok((array, heap))
    })
    .await?;

    let array_time_ms = array.elapsed.as_secs_f64() * 1000.0;
    let heap_time_ms = heap.elapsed.as_secs_f64() * 1000.0;
    let distances_match = array.dist == heap.dist;
    if !distances_match {
        log::warn!(
            "session {}: strategies disagree on distances from {}",
            session_id,
            request.source
        );
    }

    Ok(Json(CompareResponse {
        source: request.source,
        array_time_ms,
        heap_time_ms,
        speedup: if heap_time_ms > 0.0 { array_time_ms / heap_time_ms } else { 0.0 },
        distances_match,
        array_stats: array.stats,
        heap_stats: heap.stats,
    }))
}

/// Reconstruct the path to `dest` from the session's last run
pub async fn get_path(
    State(state): State<AppState>,
    Path((session_id, dest)): Path<(Uuid, usize)>,
) -> ApiResult<PathResponse> {
    let sessions = state.lock();
    let entry = sessions.get(&session_id).ok_or_else(session_not_found)?;
    let tables = entry
        .tables
        .as_ref()
        .ok_or_else(|| engine_error(Error::NotComputed))?;

    let route = PathReconstructor::new(entry.network.as_ref(), tables)
        .extract(dest)
        .map_err(engine_error)?;
    Ok(Json(convert_path_to_web(&route)))
}

/// List all active sessions
pub async fn list_sessions(State(state): State<AppState>) -> ApiResult<Vec<Uuid>> {
    let sessions = state.lock();
    Ok(Json(sessions.keys().cloned().collect()))
}

/// Get session information
pub async fn get_session(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> ApiResult<Session> {
    let sessions = state.lock();
    let entry = sessions.get(&session_id).ok_or_else(session_not_found)?;
    Ok(Json(entry.session.clone()))
}

/// Health check endpoint
pub async fn health_check() -> ApiResult<serde_json::Value> {
    Ok(Json(serde_json::json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "version": env!("CARGO_PKG_VERSION")
    })))
}

// Helper functions

fn session_not_found() -> (StatusCode, Json<ErrorResponse>) {
    (StatusCode::NOT_FOUND, Json(ErrorResponse {
        error: "session_not_found".to_string(),
        message: "Session not found".to_string(),
        details: None,
    }))
}

/// Runs a shortest path job on the blocking pool
async fn run_blocking<T, F>(job: F) -> Result<T, (StatusCode, Json<ErrorResponse>)>
where
    F: FnOnce() -> crate::Result<T> + Send + 'static,
    T: Send + 'static,
{
    match tokio::task::spawn_blocking(job).await {
        Ok(result) => result.map_err(engine_error),
        Err(err) => {
            log::error!("shortest path task failed: {}", err);
            Err((StatusCode::INTERNAL_SERVER_ERROR, Json(ErrorResponse {
                error: "engine_failure".to_string(),
                message: err.to_string(),
                details: None,
            })))
        }
    }
}

fn engine_error(err: Error) -> (StatusCode, Json<ErrorResponse>) {
    let (status, code) = match &err {
        Error::InvalidVertex(_) => (StatusCode::BAD_REQUEST, "invalid_vertex"),
        Error::InvalidGraph(_) => (StatusCode::BAD_REQUEST, "invalid_graph"),
        Error::NotComputed => (StatusCode::CONFLICT, "not_computed"),
        Error::LogicError(_) => (StatusCode::INTERNAL_SERVER_ERROR, "engine_failure"),
    };
    (status, Json(ErrorResponse {
        error: code.to_string(),
        message: err.to_string(),
        details: None,
    }))
}

pub fn convert_graph_to_web(network: &RouteNetwork) -> WebGraph {
    let nodes = network
        .nodes()
        .iter()
        .map(|node| WebNode {
            id: node.id,
            x: node.location.x,
            y: node.location.y,
        })
        .collect();

    let links = network
        .nodes()
        .iter()
        .flat_map(|node| node.neighbors.iter())
        .map(|edge| WebEdge {
            source: edge.source,
            target: edge.dest,
            length: edge.length.into_inner(),
        })
        .collect();

    WebGraph { nodes, links }
}

pub fn convert_web_graph_to_rust(web_graph: &WebGraph) -> crate::Result<RouteNetwork> {
    let mut nodes: Vec<Node<Point, OrderedFloat<f64>>> = web_graph
        .nodes
        .iter()
        .map(|node| Node::new(node.id, Point::new(node.x, node.y)))
        .collect();

    for link in &web_graph.links {
        let node = nodes.get_mut(link.source).ok_or_else(|| {
            Error::InvalidGraph(format!(
                "edge {} -> {} leaves a missing node",
                link.source, link.target
            ))
        })?;
        node.neighbors
            .push(Edge::new(link.source, link.target, OrderedFloat(link.length)));
    }

    Network::from_nodes(nodes)
}

pub fn convert_path_to_web(route: &RoutePath<Point, OrderedFloat<f64>>) -> PathResponse {
    let edges = route
        .edges
        .iter()
        .map(|edge| PathEdgeResponse {
            from: edge.from,
            to: edge.to,
            from_location: (edge.from_location.x, edge.from_location.y),
            to_location: (edge.to_location.x, edge.to_location.y),
            length: edge.length.into_inner(),
            label: edge.label.clone(),
        })
        .collect();

    PathResponse {
        source: route.source,
        dest: route.dest,
        reachable: route.is_reachable(),
        outcome: route.outcome,
        cost: match route.outcome {
            PathOutcome::Unreachable => None,
            _ => Some(route.cost.into_inner()),
        },
        edges,
    }
}
