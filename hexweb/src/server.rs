//! Web server module for hexlife.
//!
//! Provides the root page, the JSON board API and a WebSocket endpoint per
//! board. Manages `BoardSession`s which own a running simulation each and
//! bridge snapshots between the board task and the viewing browser.
//!
use axum::{
    Json, Router,
    extract::{
        Path, State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use axum_server::{Handle, tls_rustls::RustlsConfig};
use futures_util::{SinkExt, StreamExt};
use hexgrid::{
    grid::Grid,
    layout::{Layout, Orientation, Point},
};
use std::{collections::HashMap, net::SocketAddr, sync::Arc, time::Duration};
use tokio::{
    sync::{RwLock, mpsc},
    time::{Instant, interval_at},
};
use tokio_util::sync::CancellationToken;
use tower_http::trace::TraceLayer;
use tracing::{debug, info, warn};

use crate::{
    config::CONFIG,
    proto::{BoardCreated, BoardInfo, CellView, Command, CreateBoard, GridSnapshot, Update},
    templates::IndexTemplate,
};

/// Build identifier rendered into the root page.
const VERSION: &str = "2a03c94";

/// Pixels kept free around the canvas when fitting a grid.
const GRID_PADDING: f64 = 50.0;

/// Hexagon side length bounds, matching the page slider.
const MIN_CELL_SIZE: f64 = 5.0;
const MAX_CELL_SIZE: f64 = 40.0;

/// Tick delay bounds in milliseconds.
const MIN_DELAY_MS: u64 = 16;
const MAX_DELAY_MS: u64 = 10_000;

/// Tick delay for a fresh board, matching the page slider.
const DEFAULT_DELAY_MS: u64 = 500;

/// Most boards allowed to run at once.
const MAX_BOARDS: usize = 64;

/// Most hexagons a fitted board may have per side.
const MAX_GRID_DIM: usize = 256;

/// Represents one live simulation and its plumbing
pub(crate) struct BoardSession {
    // Sender for commands into the board task
    pub(crate) cmd_tx: mpsc::UnboundedSender<Command>,
    // Sender for updates to the viewing WebSocket client
    pub(crate) update_tx: RwLock<Option<mpsc::UnboundedSender<Update>>>,
    // Summary kept current by the board task
    pub(crate) info: RwLock<BoardInfo>,
    // CancellationToken
    pub(crate) cancel_token: CancellationToken,
}

/// Application state containing all live board sessions
pub(crate) struct AppState {
    /// Map of board IDs to their respective sessions
    pub(crate) boards: RwLock<HashMap<String, Arc<BoardSession>>>,
}

impl AppState {
    pub(crate) fn new() -> Arc<Self> {
        Arc::new(Self {
            boards: RwLock::new(HashMap::new()),
        })
    }
}

/// Start the web server, with TLS when certificate material is configured
pub async fn run() {
    let state = AppState::new();
    let app = create_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], CONFIG.port));
    let handle = Handle::new();
    tokio::spawn(shutdown_signal(handle.clone()));

    match CONFIG.tls_pair() {
        Some((cert, key)) => {
            let tls = RustlsConfig::from_pem(cert.as_bytes().to_vec(), key.as_bytes().to_vec())
                .await
                .expect("invalid TLS certificate or key");
            info!("Listening on https://{addr}");
            axum_server::bind_rustls(addr, tls)
                .handle(handle)
                .serve(app.into_make_service())
                .await
                .expect("server error");
        }
        None => {
            info!("Listening on http://{addr}");
            axum_server::bind(addr)
                .handle(handle)
                .serve(app.into_make_service())
                .await
                .expect("server error");
        }
    }
}

async fn shutdown_signal(handle: Handle<SocketAddr>) {
    tokio::signal::ctrl_c()
        .await
        .expect("failed to install CTRL+C signal handler");
    info!("Shutting down gracefully...");
    handle.graceful_shutdown(Some(Duration::from_secs(5)));
}

/// Create the router with all routes
pub(crate) fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(index_page))
        .route("/api/boards", get(list_boards).post(create_board))
        .route("/api/board/{id}", get(board_info).delete(delete_board))
        .route("/ws/{id}", get(ws_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Display the main game page
async fn index_page() -> impl IntoResponse {
    IndexTemplate { version: VERSION }
}

/// Get list of live board IDs
async fn list_boards(State(state): State<Arc<AppState>>) -> Json<Vec<String>> {
    let boards = state.boards.read().await;
    Json(boards.keys().cloned().collect())
}

/// Create a board fitted to the caller's viewport
async fn create_board(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateBoard>,
) -> Result<Json<BoardCreated>, StatusCode> {
    let mut boards = state.boards.write().await;
    if boards.len() >= MAX_BOARDS {
        warn!("board limit of {MAX_BOARDS} reached, rejecting create");
        return Err(StatusCode::SERVICE_UNAVAILABLE);
    }

    let mut id = format!("{:08x}", rand::random::<u32>());
    while boards.contains_key(&id) {
        id = format!("{:08x}", rand::random::<u32>());
    }

    let session = BoardSession::spawn(&req);
    boards.insert(id.clone(), session);
    info!("board {id} created");
    Ok(Json(BoardCreated { id }))
}

/// Get one board's summary
async fn board_info(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<BoardInfo>, StatusCode> {
    let boards = state.boards.read().await;
    let session = boards.get(&id).ok_or(StatusCode::NOT_FOUND)?;
    Ok(Json(*session.info.read().await))
}

/// Remove a board and cancel its task
pub(crate) async fn delete_board(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> StatusCode {
    let mut boards = state.boards.write().await;

    if let Some(session) = boards.remove(&id) {
        info!("deleting board session: {id}");
        session.cancel_token.cancel();
        StatusCode::OK
    } else {
        StatusCode::NOT_FOUND
    }
}

/// WebSocket handler attaching a browser to a board
async fn ws_handler(
    Path(id): Path<String>,
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> Response {
    ws.on_upgrade(move |socket| handle_ws(socket, id, state))
}

impl BoardSession {
    /// Fit a grid to the requested viewport and spawn the board task
    fn spawn(req: &CreateBoard) -> Arc<Self> {
        let cell_size = clamp_cell_size(req.cell_size);
        let rules = req.rules.normalized();
        let (cols, rows) = fit_dimensions(req.width, req.height, cell_size);
        let grid = Grid::rectangle(cols, rows, rules);

        let (cmd_tx, cmd_rx) = mpsc::unbounded_channel();
        let token = CancellationToken::new();
        let session = Arc::new(Self {
            cmd_tx,
            update_tx: RwLock::new(None),
            info: RwLock::new(BoardInfo {
                generation: 1,
                population: 0,
                running: false,
                cols,
                rows,
                cell_size,
                rules,
            }),
            cancel_token: token.clone(),
        });

        tokio::spawn(board_task(Arc::clone(&session), grid, cell_size, cmd_rx));
        session
    }
}

fn clamp_cell_size(cell_size: f64) -> f64 {
    if cell_size.is_finite() {
        cell_size.clamp(MIN_CELL_SIZE, MAX_CELL_SIZE)
    } else {
        MIN_CELL_SIZE
    }
}

/// Grid dimensions for a viewport, net of the canvas padding
fn fit_dimensions(width: f64, height: f64, cell_size: f64) -> (usize, usize) {
    let sanitize = |value: f64| {
        if value.is_finite() {
            (value - GRID_PADDING).max(0.0)
        } else {
            0.0
        }
    };
    let (cols, rows) = Grid::dimensions_for(sanitize(width), sanitize(height), cell_size);
    (cols.min(MAX_GRID_DIM), rows.min(MAX_GRID_DIM))
}

/// Long-lived task owning one board
///
/// Applies commands from the WebSocket bridge, steps the grid on a ticker
/// while running, and pushes snapshots to the attached viewer. A tick that
/// changes nothing pauses the board and reports `halted`; a tick with no
/// viewer attached pauses the board silently.
async fn board_task(
    session: Arc<BoardSession>,
    mut grid: Grid,
    cell_size: f64,
    mut cmd_rx: mpsc::UnboundedReceiver<Command>,
) {
    let mut layout = Layout::new(Orientation::Pointy, cell_size, Point::new(0.0, 0.0));
    let mut generation: u64 = 1;
    let mut running = false;
    let mut delay = Duration::from_millis(DEFAULT_DELAY_MS);
    // A paint stroke applies the inverse of the first cell it touched.
    let mut stroke_alive = false;
    let mut ticker = interval_at(Instant::now() + delay, delay);

    loop {
        tokio::select! {
            _ = session.cancel_token.cancelled() => {
                debug!("board task cancelled");
                break;
            }
            Some(cmd) = cmd_rx.recv() => {
                match cmd {
                    Command::Play => {
                        running = true;
                        ticker = interval_at(Instant::now() + delay, delay);
                        publish(&session, &grid, &layout, generation, running).await;
                    }
                    Command::Pause => {
                        running = false;
                        publish(&session, &grid, &layout, generation, running).await;
                    }
                    Command::Randomize => {
                        grid.randomize();
                        generation = 1;
                        publish(&session, &grid, &layout, generation, running).await;
                    }
                    Command::Clear => {
                        grid.clear();
                        generation = 1;
                        publish(&session, &grid, &layout, generation, running).await;
                    }
                    Command::SetSpeed { ms } => {
                        delay = Duration::from_millis(ms.clamp(MIN_DELAY_MS, MAX_DELAY_MS));
                        if running {
                            ticker = interval_at(Instant::now() + delay, delay);
                        }
                    }
                    Command::SetRules { rules } => {
                        grid.set_rules(rules.normalized());
                        publish(&session, &grid, &layout, generation, running).await;
                    }
                    Command::Paint { x, y, start } => {
                        let hex = layout.pixel_to_hex(Point::new(x, y));
                        if let Some(alive) = grid.get(hex) {
                            if start {
                                stroke_alive = !alive;
                            }
                            if alive != stroke_alive {
                                grid.set_alive(hex, stroke_alive);
                                publish(&session, &grid, &layout, generation, running).await;
                            }
                        }
                    }
                    Command::Resize { width, height, cell_size } => {
                        let cell_size = clamp_cell_size(cell_size);
                        layout = Layout::new(Orientation::Pointy, cell_size, Point::new(0.0, 0.0));
                        let (cols, rows) = fit_dimensions(width, height, cell_size);
                        grid.resize(cols, rows);
                        publish(&session, &grid, &layout, generation, running).await;
                    }
                    Command::Refresh => {
                        publish(&session, &grid, &layout, generation, running).await;
                    }
                }
            }
            _ = ticker.tick(), if running => {
                if session.update_tx.read().await.is_none() {
                    // Nobody is watching; stop stepping until the next play.
                    running = false;
                    session.info.write().await.running = false;
                    debug!("board paused, viewer gone");
                    continue;
                }
                grid.step();
                if grid.changed() {
                    generation += 1;
                    publish(&session, &grid, &layout, generation, running).await;
                } else {
                    running = false;
                    session.info.write().await.running = false;
                    info!("board stagnated at generation {generation}");
                    send_update(&session, Update::Halted { generation }).await;
                }
            }
        }
    }
}

/// Push a fresh snapshot to the viewer and refresh the board summary
async fn publish(
    session: &BoardSession,
    grid: &Grid,
    layout: &Layout,
    generation: u64,
    running: bool,
) {
    let snapshot = snapshot(grid, layout, generation, running);
    *session.info.write().await = BoardInfo {
        generation,
        population: snapshot.population,
        running,
        cols: grid.cols(),
        rows: grid.rows(),
        cell_size: layout.size,
        rules: grid.rules(),
    };
    send_update(session, Update::Grid(snapshot)).await;
}

/// Assemble the full drawing state for one board
fn snapshot(grid: &Grid, layout: &Layout, generation: u64, running: bool) -> GridSnapshot {
    let mut cells: Vec<CellView> = grid
        .cells()
        .map(|(hex, alive)| {
            let centre = layout.hex_to_pixel(hex);
            CellView {
                q: hex.q,
                r: hex.r,
                x: centre.x,
                y: centre.y,
                alive,
            }
        })
        .collect();
    // Map iteration order churns between snapshots; keep the wire stable.
    cells.sort_by_key(|cell| (cell.r, cell.q));

    let corner_offsets = std::array::from_fn(|corner| {
        let offset = layout.corner_offset(corner);
        [offset.x, offset.y]
    });

    GridSnapshot {
        generation,
        population: grid.population(),
        running,
        cols: grid.cols(),
        rows: grid.rows(),
        cell_size: layout.size,
        rules: grid.rules(),
        corner_offsets,
        cells,
    }
}

/// Hand an update to the attached viewer, dropping the sender if it died
async fn send_update(session: &BoardSession, update: Update) {
    let guard = session.update_tx.read().await;
    if let Some(tx) = &*guard {
        if tx.send(update).is_err() {
            drop(guard);
            *session.update_tx.write().await = None;
        }
    }
}

/// Bridge communication between a WebSocket viewer and a board task
async fn handle_ws(socket: WebSocket, id: String, state: Arc<AppState>) {
    let session = {
        let boards = state.boards.read().await;
        boards.get(&id).cloned()
    };

    let session = match session {
        Some(s) => s,
        None => return,
    };

    let (update_tx, mut update_rx) = mpsc::unbounded_channel::<Update>();
    let my_tx = update_tx.clone();

    {
        // A new viewer replaces the previous one.
        let mut tx_guard = session.update_tx.write().await;
        *tx_guard = Some(update_tx);
    }
    debug!("viewer attached to board {id}");

    // Prime the fresh viewer with a full snapshot.
    let _ = session.cmd_tx.send(Command::Refresh);

    let (mut ws_sender, mut ws_receiver) = socket.split();

    let session_input = Arc::clone(&session);
    let mut task_web_to_board = tokio::spawn(async move {
        while let Some(Ok(msg)) = ws_receiver.next().await {
            let Message::Text(text) = msg else { continue };
            match serde_json::from_str::<Command>(&text) {
                Ok(cmd) => {
                    if session_input.cmd_tx.send(cmd).is_err() {
                        break;
                    }
                }
                Err(err) => debug!("ignoring malformed command: {err}"),
            }
        }
    });

    let mut task_board_to_web = tokio::spawn(async move {
        while let Some(update) = update_rx.recv().await {
            let Ok(text) = serde_json::to_string(&update) else {
                break;
            };
            if ws_sender.send(Message::Text(text.into())).await.is_err() {
                break;
            }
        }
    });

    tokio::select! {
        _ = (&mut task_web_to_board) => task_board_to_web.abort(),
        _ = (&mut task_board_to_web) => task_web_to_board.abort(),
    }

    if let Some(s) = state.boards.read().await.get(&id) {
        // Leave the slot alone if another viewer already replaced us.
        let mut tx_guard = s.update_tx.write().await;
        if tx_guard.as_ref().is_some_and(|tx| tx.same_channel(&my_tx)) {
            *tx_guard = None;
        }
    }
    debug!("viewer detached from board {id}");
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, header};
    use tower::ServiceExt;

    fn app() -> Router {
        create_router(AppState::new())
    }

    async fn body_bytes(response: Response) -> Vec<u8> {
        to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body should stream")
            .to_vec()
    }

    fn get_request(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn post_json(uri: &str, json: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_owned()))
            .unwrap()
    }

    async fn wait_for(session: &BoardSession, pred: impl Fn(&BoardInfo) -> bool) {
        for _ in 0..200 {
            if pred(&*session.info.read().await) {
                return;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        panic!("board never reached the expected state");
    }

    /// Test the root page renders with the version exactly once
    #[tokio::test]
    async fn root_page_carries_version_once() {
        let response = app().oneshot(get_request("/")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_owned();
        assert!(content_type.starts_with("text/html"));
        let body = String::from_utf8(body_bytes(response).await).unwrap();
        assert_eq!(body.matches(VERSION).count(), 1);
    }

    /// Test repeated root requests return identical bytes
    #[tokio::test]
    async fn root_page_is_idempotent() {
        let app = app();
        let first = app.clone().oneshot(get_request("/")).await.unwrap();
        let second = app.oneshot(get_request("/")).await.unwrap();
        assert_eq!(body_bytes(first).await, body_bytes(second).await);
    }

    /// Test unknown paths fall through to the framework 404
    #[tokio::test]
    async fn unknown_paths_are_not_handled() {
        for uri in ["/nope", "/index.html", "/api", "/api/board"] {
            let response = app().oneshot(get_request(uri)).await.unwrap();
            assert_eq!(response.status(), StatusCode::NOT_FOUND, "{uri}");
        }
    }

    /// Test board creation, listing, summary and deletion
    #[tokio::test]
    async fn boards_crud_lifecycle() {
        let app = app();

        let response = app.clone().oneshot(get_request("/api/boards")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let ids: Vec<String> = serde_json::from_slice(&body_bytes(response).await).unwrap();
        assert!(ids.is_empty());

        let response = app
            .clone()
            .oneshot(post_json(
                "/api/boards",
                r#"{"width":800.0,"height":600.0,"cell_size":15.0}"#,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let created: BoardCreated = serde_json::from_slice(&body_bytes(response).await).unwrap();
        assert_eq!(created.id.len(), 8);

        let response = app.clone().oneshot(get_request("/api/boards")).await.unwrap();
        let ids: Vec<String> = serde_json::from_slice(&body_bytes(response).await).unwrap();
        assert_eq!(ids, vec![created.id.clone()]);

        let uri = format!("/api/board/{}", created.id);
        let response = app.clone().oneshot(get_request(&uri)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let board: BoardInfo = serde_json::from_slice(&body_bytes(response).await).unwrap();
        assert_eq!(board.generation, 1);
        assert!(!board.running);
        assert_eq!(board.population, 0);
        // 800x600 net of padding fits this many 15px hexagons.
        assert_eq!((board.cols, board.rows), (28, 24));

        let delete = Request::builder()
            .method("DELETE")
            .uri(&uri)
            .body(Body::empty())
            .unwrap();
        let response = app.clone().oneshot(delete).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = app.clone().oneshot(get_request(&uri)).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    /// Test summary lookups for unknown boards are 404
    #[tokio::test]
    async fn unknown_board_is_404() {
        let response = app()
            .oneshot(get_request("/api/board/ffffffff"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let delete = Request::builder()
            .method("DELETE")
            .uri("/api/board/ffffffff")
            .body(Body::empty())
            .unwrap();
        let response = app().oneshot(delete).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    /// Test malformed creation bodies are client errors
    #[tokio::test]
    async fn create_rejects_malformed_bodies() {
        for body in ["{}", "not json", r#"{"width":800.0}"#] {
            let response = app()
                .oneshot(post_json("/api/boards", body))
                .await
                .unwrap();
            assert!(response.status().is_client_error(), "{body}");
        }
    }

    /// Test the board cap answers 503
    #[tokio::test]
    async fn board_cap_is_enforced() {
        let state = AppState::new();
        {
            let mut boards = state.boards.write().await;
            for n in 0..MAX_BOARDS {
                let req = CreateBoard {
                    width: 200.0,
                    height: 200.0,
                    cell_size: 15.0,
                    rules: Default::default(),
                };
                boards.insert(format!("{n:08x}"), BoardSession::spawn(&req));
            }
        }
        let app = create_router(Arc::clone(&state));
        let response = app
            .oneshot(post_json(
                "/api/boards",
                r#"{"width":800.0,"height":600.0}"#,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

        // Unblock the spawned tasks.
        for session in state.boards.read().await.values() {
            session.cancel_token.cancel();
        }
    }

    /// Test cell size and viewport clamping when fitting boards
    #[test]
    fn fit_clamps_hostile_input() {
        assert_eq!(clamp_cell_size(1.0), MIN_CELL_SIZE);
        assert_eq!(clamp_cell_size(400.0), MAX_CELL_SIZE);
        assert_eq!(clamp_cell_size(f64::NAN), MIN_CELL_SIZE);
        // A degenerate viewport still produces a board.
        assert_eq!(fit_dimensions(-100.0, -100.0, 15.0), (1, 1));
        // An absurd one cannot demand an unbounded grid.
        assert_eq!(fit_dimensions(f64::MAX, 600.0, 5.0), (MAX_GRID_DIM, 73));
        assert_eq!(fit_dimensions(f64::INFINITY, f64::NAN, 15.0), (1, 1));
    }

    /// Test a board task halts on stagnation
    #[tokio::test]
    async fn board_halts_when_nothing_changes() {
        let req = CreateBoard {
            width: 300.0,
            height: 300.0,
            cell_size: 15.0,
            rules: Default::default(),
        };
        let session = BoardSession::spawn(&req);
        let (tx, mut rx) = mpsc::unbounded_channel();
        *session.update_tx.write().await = Some(tx);

        // An empty board cannot change, so the first tick halts it.
        session.cmd_tx.send(Command::SetSpeed { ms: 1 }).unwrap();
        session.cmd_tx.send(Command::Play).unwrap();
        let update = rx.recv().await.unwrap();
        assert!(matches!(update, Update::Grid(ref s) if s.running));
        let update = rx.recv().await.unwrap();
        assert!(matches!(update, Update::Halted { generation: 1 }));
        assert!(!session.info.read().await.running);

        session.cancel_token.cancel();
    }

    /// Test a playing board with no viewer pauses itself
    #[tokio::test]
    async fn viewerless_board_pauses_itself() {
        let req = CreateBoard {
            width: 300.0,
            height: 300.0,
            cell_size: 15.0,
            rules: Default::default(),
        };
        let session = BoardSession::spawn(&req);

        // No update sender is attached; play anyway.
        session.cmd_tx.send(Command::SetSpeed { ms: 300 }).unwrap();
        session.cmd_tx.send(Command::Play).unwrap();
        wait_for(&session, |info| info.running).await;

        // The first tick finds nobody watching and stops the board.
        wait_for(&session, |info| !info.running).await;
        assert_eq!(session.info.read().await.generation, 1);

        session.cancel_token.cancel();
    }

    /// Test painting flips cells and strokes keep the first state
    #[tokio::test]
    async fn paint_strokes_keep_first_inversion() {
        let req = CreateBoard {
            width: 400.0,
            height: 400.0,
            cell_size: 15.0,
            rules: Default::default(),
        };
        let session = BoardSession::spawn(&req);
        let (tx, mut rx) = mpsc::unbounded_channel();
        *session.update_tx.write().await = Some(tx);

        // Centre pixel lands on the origin cell; it starts dead, so the
        // stroke paints alive.
        session
            .cmd_tx
            .send(Command::Paint {
                x: 0.0,
                y: 0.0,
                start: true,
            })
            .unwrap();
        let Some(Update::Grid(snapshot)) = rx.recv().await else {
            panic!("expected a grid update");
        };
        assert_eq!(snapshot.population, 1);

        // Dragging to the eastern neighbour keeps the stroke's alive state.
        session
            .cmd_tx
            .send(Command::Paint {
                x: 3f64.sqrt() * 15.0,
                y: 0.0,
                start: false,
            })
            .unwrap();
        let Some(Update::Grid(snapshot)) = rx.recv().await else {
            panic!("expected a grid update");
        };
        assert_eq!(snapshot.population, 2);

        session.cancel_token.cancel();
    }

    /// Test absurd paint coordinates leave the board alive and unchanged
    #[tokio::test]
    async fn paint_far_off_board_is_ignored() {
        let req = CreateBoard {
            width: 300.0,
            height: 300.0,
            cell_size: 15.0,
            rules: Default::default(),
        };
        let session = BoardSession::spawn(&req);
        let (tx, mut rx) = mpsc::unbounded_channel();
        *session.update_tx.write().await = Some(tx);

        // A pixel nowhere near the board resolves to no cell.
        session
            .cmd_tx
            .send(Command::Paint {
                x: 1e12,
                y: 0.0,
                start: true,
            })
            .unwrap();
        // The task must still answer; the paint produced no update.
        session.cmd_tx.send(Command::Refresh).unwrap();
        let Some(Update::Grid(snapshot)) = rx.recv().await else {
            panic!("expected a grid update");
        };
        assert_eq!(snapshot.population, 0);

        session.cancel_token.cancel();
    }

    /// Test refresh answers with a full snapshot
    #[tokio::test]
    async fn refresh_returns_full_snapshot() {
        let req = CreateBoard {
            width: 300.0,
            height: 300.0,
            cell_size: 10.0,
            rules: Default::default(),
        };
        let session = BoardSession::spawn(&req);
        let (tx, mut rx) = mpsc::unbounded_channel();
        *session.update_tx.write().await = Some(tx);

        session.cmd_tx.send(Command::Refresh).unwrap();
        let Some(Update::Grid(snapshot)) = rx.recv().await else {
            panic!("expected a grid update");
        };
        let info = *session.info.read().await;
        assert_eq!(snapshot.cells.len(), info.cols * info.rows);
        // Corner offsets trace a real hexagon, not a degenerate point.
        assert_ne!(snapshot.corner_offsets[0], snapshot.corner_offsets[3]);
        assert_eq!(snapshot.generation, 1);

        session.cancel_token.cancel();
    }
}
