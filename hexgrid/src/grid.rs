//! Rectangular hexagon board and the life rules that evolve it.
//!
//! A `Grid` owns the dead/alive state of every cell on a rectangular board
//! of hexagons and advances it one generation at a time under a `Rules`
//! window. The board keeps the previous configuration around so callers can
//! detect stagnation after a step.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::hex::Hex;

/// Neighbour-count windows deciding survival and birth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rules {
    /// Fewest alive neighbours a live cell survives with.
    pub survive_min: u8,
    /// Most alive neighbours a live cell survives with.
    pub survive_max: u8,
    /// Fewest alive neighbours that give birth on a dead cell.
    pub birth_min: u8,
    /// Most alive neighbours that give birth on a dead cell.
    pub birth_max: u8,
}

impl Rules {
    /// Build a rule set. Each bound is clamped into `0..=6`; a window whose
    /// minimum exceeds its maximum is swapped into order.
    pub fn new(survive_min: u8, survive_max: u8, birth_min: u8, birth_max: u8) -> Self {
        let (survive_min, survive_max) = window(survive_min, survive_max);
        let (birth_min, birth_max) = window(birth_min, birth_max);
        Self {
            survive_min,
            survive_max,
            birth_min,
            birth_max,
        }
    }

    /// The same rules re-clamped, for values that arrived over the wire.
    pub fn normalized(self) -> Self {
        Rules::new(
            self.survive_min,
            self.survive_max,
            self.birth_min,
            self.birth_max,
        )
    }

    fn survives(self, neighbours: u8) -> bool {
        (self.survive_min..=self.survive_max).contains(&neighbours)
    }

    fn births(self, neighbours: u8) -> bool {
        (self.birth_min..=self.birth_max).contains(&neighbours)
    }
}

impl Default for Rules {
    fn default() -> Self {
        Rules::new(2, 3, 3, 3)
    }
}

fn window(min: u8, max: u8) -> (u8, u8) {
    let min = min.min(6);
    let max = max.min(6);
    if min <= max { (min, max) } else { (max, min) }
}

/// Rectangular board of hexagons with dead/alive state.
#[derive(Debug, Clone)]
pub struct Grid {
    cells: HashMap<Hex, bool>,
    /// Configuration before the last step, for stagnation checks.
    previous: Option<HashMap<Hex, bool>>,
    cols: usize,
    rows: usize,
    rules: Rules,
}

impl Grid {
    /// Build an all-dead rectangular board of `cols` by `rows` hexagons
    /// centred on the origin.
    pub fn rectangle(cols: usize, rows: usize, rules: Rules) -> Self {
        let mut cells = HashMap::with_capacity(cols * rows);
        let q_min = -((cols / 2) as i32);
        let r_min = -((rows / 2) as i32);
        for r in r_min..r_min + rows as i32 {
            // Shift odd rows so the rectangle stays axis-aligned on screen.
            let offset = -r.div_euclid(2);
            for q in q_min + offset..q_min + offset + cols as i32 {
                cells.insert(Hex::axial(q, r), false);
            }
        }
        Self {
            cells,
            previous: None,
            cols,
            rows,
            rules,
        }
    }

    /// How many hexagons of side `cell_size` fit a pixel viewport, at least
    /// one each way. Callers pass dimensions net of any canvas padding.
    pub fn dimensions_for(px_width: f64, px_height: f64, cell_size: f64) -> (usize, usize) {
        let hex_width = 3f64.sqrt() * cell_size;
        let cols = (px_width / hex_width - 0.5).floor();
        let rows = ((4.0 * px_height / (2.0 * cell_size) - 1.0) / 3.0).floor();
        (cols.max(1.0) as usize, rows.max(1.0) as usize)
    }

    /// State of one cell, or `None` when the hex is off the board.
    pub fn get(&self, hex: Hex) -> Option<bool> {
        self.cells.get(&hex).copied()
    }

    /// Set one cell. Returns `false` when the hex is off the board.
    pub fn set_alive(&mut self, hex: Hex, alive: bool) -> bool {
        match self.cells.get_mut(&hex) {
            Some(cell) => {
                *cell = alive;
                true
            }
            None => false,
        }
    }

    /// Give every cell an independent fifty-fifty dead/alive state.
    pub fn randomize(&mut self) {
        for alive in self.cells.values_mut() {
            *alive = rand::random();
        }
        self.previous = None;
    }

    /// Kill every cell.
    pub fn clear(&mut self) {
        for alive in self.cells.values_mut() {
            *alive = false;
        }
        self.previous = None;
    }

    /// Advance one generation. Live cells survive when their alive-neighbour
    /// count falls in the survival window, dead cells are born when it falls
    /// in the birth window. Neighbours off the board count as dead. The
    /// outgoing configuration is retained for [`Grid::changed`].
    pub fn step(&mut self) {
        let mut next = HashMap::with_capacity(self.cells.len());
        for (&hex, &alive) in &self.cells {
            let neighbours = hex
                .neighbours()
                .filter(|n| self.cells.get(n).copied().unwrap_or(false))
                .count() as u8;
            let alive_next = if alive {
                self.rules.survives(neighbours)
            } else {
                self.rules.births(neighbours)
            };
            next.insert(hex, alive_next);
        }
        self.previous = Some(std::mem::replace(&mut self.cells, next));
    }

    /// Whether the last step changed anything. A board that has not stepped
    /// since it was built, cleared, randomized or resized reports `true`.
    pub fn changed(&self) -> bool {
        self.previous.as_ref().is_none_or(|prev| *prev != self.cells)
    }

    /// Refit the board to new dimensions, carrying over the alive state of
    /// every hex present on both boards.
    pub fn resize(&mut self, cols: usize, rows: usize) {
        let old = std::mem::take(&mut self.cells);
        *self = Grid::rectangle(cols, rows, self.rules);
        for (hex, alive) in old {
            if alive {
                self.set_alive(hex, true);
            }
        }
    }

    /// Number of alive cells.
    pub fn population(&self) -> usize {
        self.cells.values().filter(|alive| **alive).count()
    }

    /// Total number of cells on the board.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Whether the board has no cells at all.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Board width in hexagons.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Board height in hexagons.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Current rule windows.
    pub fn rules(&self) -> Rules {
        self.rules
    }

    /// Replace the rule windows. Takes effect from the next step.
    pub fn set_rules(&mut self, rules: Rules) {
        self.rules = rules;
    }

    /// Iterate over every cell and its state, in no particular order.
    pub fn cells(&self) -> impl Iterator<Item = (Hex, bool)> + '_ {
        self.cells.iter().map(|(&hex, &alive)| (hex, alive))
    }
}
