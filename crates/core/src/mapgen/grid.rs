//! Cell grid shared by every generation phase, with bounds-checked queries.

use serde::{Deserialize, Serialize};

use crate::types::{Cell, Pos};

/// Side length of the square blocks the grid is partitioned into.
pub const BLOCK_SIZE: i32 = 8;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    width: i32,
    height: i32,
    cells: Vec<Cell>,
}

impl Grid {
    pub fn new(width: i32, height: i32) -> Self {
        let width = width.max(0);
        let height = height.max(0);
        Self { width, height, cells: vec![Cell::Empty; (width * height) as usize] }
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn in_range(&self, pos: Pos) -> bool {
        pos.x >= 0 && pos.y >= 0 && pos.x < self.width && pos.y < self.height
    }

    /// Kind at `pos`; anything outside the array reads as `OutOfBounds`.
    pub fn cell_at(&self, pos: Pos) -> Cell {
        if !self.in_range(pos) {
            return Cell::OutOfBounds;
        }
        self.cells[self.index(pos)]
    }

    pub fn set(&mut self, pos: Pos, cell: Cell) {
        if !self.in_range(pos) {
            return;
        }
        let index = self.index(pos);
        self.cells[index] = cell;
    }

    pub fn is_within_bounds(&self, pos: Pos) -> bool {
        self.cell_at(pos) != Cell::OutOfBounds
    }

    pub fn is_cell(&self, pos: Pos, kind: Cell) -> bool {
        self.in_range(pos) && self.cell_at(pos) == kind
    }

    pub fn is_empty_or_out_of_bounds(&self, pos: Pos) -> bool {
        matches!(self.cell_at(pos), Cell::Empty | Cell::OutOfBounds)
    }

    pub fn can_go(&self, pos: Pos) -> bool {
        self.cell_at(pos).is_walkable()
    }

    /// Origins of every block whose origin cell is in bounds, x-major like the phase scans.
    pub fn block_origins(&self) -> Vec<Pos> {
        let mut origins = Vec::new();
        for x in (0..self.width).step_by(BLOCK_SIZE as usize) {
            for y in (0..self.height).step_by(BLOCK_SIZE as usize) {
                let origin = Pos::new(x, y);
                if self.is_within_bounds(origin) {
                    origins.push(origin);
                }
            }
        }
        origins
    }

    pub fn fill_block(&mut self, origin: Pos, cell: Cell) {
        for x in 0..BLOCK_SIZE {
            for y in 0..BLOCK_SIZE {
                self.set(origin.offset(x, y), cell);
            }
        }
    }

    pub fn count(&self, kind: Cell) -> usize {
        self.cells.iter().filter(|&&cell| cell == kind).count()
    }

    pub fn positions_of(&self, kind: Cell) -> Vec<Pos> {
        let mut positions = Vec::new();
        for x in 0..self.width {
            for y in 0..self.height {
                let pos = Pos::new(x, y);
                if self.cell_at(pos) == kind {
                    positions.push(pos);
                }
            }
        }
        positions
    }

    /// One character per cell, top row (highest y) first.
    pub fn render_ascii(&self) -> String {
        let mut text = String::new();
        for y in (0..self.height).rev() {
            for x in 0..self.width {
                text.push(match self.cell_at(Pos::new(x, y)) {
                    Cell::Empty => '.',
                    Cell::BoothEmpty => 'b',
                    Cell::BoothPrize => 'P',
                    Cell::BoothUtility => 'U',
                    Cell::Entrance => 'E',
                    Cell::Dispenser => '$',
                    Cell::OutOfBounds => ' ',
                });
            }
            text.push('\n');
        }
        text
    }

    pub(crate) fn canonical_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(8 + self.cells.len());
        bytes.extend(self.width.to_le_bytes());
        bytes.extend(self.height.to_le_bytes());
        for cell in &self.cells {
            bytes.push(match cell {
                Cell::Empty => 0,
                Cell::BoothEmpty => 1,
                Cell::BoothPrize => 2,
                Cell::BoothUtility => 3,
                Cell::Entrance => 4,
                Cell::Dispenser => 5,
                Cell::OutOfBounds => 6,
            });
        }
        bytes
    }

    fn index(&self, pos: Pos) -> usize {
        (pos.y as usize) * (self.width as usize) + (pos.x as usize)
    }
}
