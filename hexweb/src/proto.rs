//! Wire types for the board API and WebSocket protocol.
//!
//! Commands flow from the page to a board task, updates flow back. Both
//! directions are JSON with a `type` tag so the page can dispatch on a
//! single field.

use hexgrid::grid::Rules;
use serde::{Deserialize, Serialize};

/// Command sent by the page over a board WebSocket.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Command {
    /// Start the generation ticker.
    Play,
    /// Stop the generation ticker.
    Pause,
    /// Give every cell a random state and restart the generation count.
    Randomize,
    /// Kill every cell and restart the generation count.
    Clear,
    /// Change the tick delay in milliseconds.
    SetSpeed { ms: u64 },
    /// Replace the life rules. Out-of-range values are clamped.
    SetRules { rules: Rules },
    /// Paint the cell under a pixel. `start` opens a stroke; the whole
    /// stroke paints the opposite of the first cell's state.
    Paint { x: f64, y: f64, start: bool },
    /// Refit the board to a new viewport or cell size.
    Resize { width: f64, height: f64, cell_size: f64 },
    /// Ask for a full snapshot.
    Refresh,
}

/// Update pushed by a board task over the WebSocket.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Update {
    /// Full board snapshot.
    Grid(GridSnapshot),
    /// A tick left the board unchanged; the task paused itself.
    Halted { generation: u64 },
}

/// One cell in a snapshot: axial coordinates, pixel centre, state.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct CellView {
    pub q: i32,
    pub r: i32,
    pub x: f64,
    pub y: f64,
    pub alive: bool,
}

/// Everything the page needs to draw a board.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct GridSnapshot {
    pub generation: u64,
    pub population: usize,
    pub running: bool,
    pub cols: usize,
    pub rows: usize,
    pub cell_size: f64,
    pub rules: Rules,
    /// Corner deltas relative to a cell centre. The page adds them to each
    /// centre to trace the hexagon, no geometry of its own.
    pub corner_offsets: [[f64; 2]; 6],
    pub cells: Vec<CellView>,
}

/// Summary returned by `GET /api/board/{id}`.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct BoardInfo {
    pub generation: u64,
    pub population: usize,
    pub running: bool,
    pub cols: usize,
    pub rows: usize,
    pub cell_size: f64,
    pub rules: Rules,
}

/// Body of `POST /api/boards`: the viewport the board must fit.
#[derive(Serialize, Deserialize, Debug, Clone, Copy)]
pub struct CreateBoard {
    /// Canvas width in pixels.
    pub width: f64,
    /// Canvas height in pixels.
    pub height: f64,
    /// Hexagon side length in pixels.
    #[serde(default = "default_cell_size")]
    pub cell_size: f64,
    /// Initial life rules.
    #[serde(default)]
    pub rules: Rules,
}

fn default_cell_size() -> f64 {
    15.0
}

/// Reply of `POST /api/boards`.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct BoardCreated {
    pub id: String,
}
