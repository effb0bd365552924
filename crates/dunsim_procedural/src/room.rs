//! # Room Templates
//!
//! A room is a 16x16 tile legend laid over one chunk.
//!
//! ## Legend
//!
//! | Symbol | Tile   |
//! |--------|--------|
//! | ` `    | empty  |
//! | `.`    | floor  |
//! | `#`    | wall   |
//! | `S`    | stairs |
//!
//! Stairs cells come in 2x2 blocks. Only the top-left cell of a block
//! becomes an entity; the entity's 2x2 box covers the rest.

use dunsim_core::CHUNK_DIM;
use thiserror::Error;

/// Room side in tiles. Rooms fill a chunk exactly.
pub const ROOM_DIM: usize = CHUNK_DIM as usize;

/// One cell of a room legend.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Tile {
    /// Nothing is placed.
    #[default]
    Empty = 0,
    /// Walkable floor.
    Floor = 1,
    /// Solid wall.
    Wall = 2,
    /// Part of a stairs block.
    Stairs = 3,
}

impl Tile {
    /// Parses a legend symbol.
    #[inline]
    #[must_use]
    pub const fn from_symbol(symbol: u8) -> Option<Self> {
        match symbol {
            b' ' => Some(Self::Empty),
            b'.' => Some(Self::Floor),
            b'#' => Some(Self::Wall),
            b'S' => Some(Self::Stairs),
            _ => None,
        }
    }

    /// Returns the legend symbol.
    #[inline]
    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            Self::Empty => ' ',
            Self::Floor => '.',
            Self::Wall => '#',
            Self::Stairs => 'S',
        }
    }
}

/// Errors from parsing a room legend.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TemplateError {
    /// The legend does not have 16 rows.
    #[error("room legend has {rows} rows, expected {ROOM_DIM}")]
    WrongRowCount {
        /// Rows found.
        rows: usize,
    },

    /// A row is not 16 symbols wide.
    #[error("room legend row {row} is {width} symbols wide, expected {ROOM_DIM}")]
    WrongRowWidth {
        /// Zero-based row.
        row: usize,
        /// Symbols found.
        width: usize,
    },

    /// A symbol outside the legend.
    #[error("unknown room legend symbol {symbol:?} at row {row}, column {column}")]
    UnknownSymbol {
        /// Zero-based row.
        row: usize,
        /// Zero-based column.
        column: usize,
        /// The offending symbol.
        symbol: char,
    },
}

/// The stock room: a sealed double rim with an alcove on each side, two
/// pillars and a stairs block in the upper right.
const STANDARD_LEGEND: [&str; ROOM_DIM] = [
    "################",
    "#######..#######",
    "##..........SS##",
    "##..........SS##",
    "##..##........##",
    "##..##........##",
    "##............##",
    "#..............#",
    "#..............#",
    "##............##",
    "##........##..##",
    "##........##..##",
    "##............##",
    "##............##",
    "#######..#######",
    "################",
];

/// A 16x16 grid of tiles, indexed `[y][x]`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RoomTemplate {
    tiles: [[Tile; ROOM_DIM]; ROOM_DIM],
}

impl RoomTemplate {
    /// Returns the stock room.
    #[must_use]
    pub const fn standard() -> Self {
        let mut tiles = [[Tile::Empty; ROOM_DIM]; ROOM_DIM];
        let mut y = 0;
        while y < ROOM_DIM {
            let row = STANDARD_LEGEND[y].as_bytes();
            let mut x = 0;
            while x < ROOM_DIM {
                if let Some(tile) = Tile::from_symbol(row[x]) {
                    tiles[y][x] = tile;
                }
                x += 1;
            }
            y += 1;
        }
        Self { tiles }
    }

    /// Parses a legend given one row per line.
    ///
    /// # Errors
    ///
    /// Returns a [`TemplateError`] for a wrong shape or an unknown symbol.
    pub fn parse(text: &str) -> Result<Self, TemplateError> {
        let rows: Vec<&str> = text.lines().collect();
        Self::from_rows(&rows)
    }

    /// Builds a template from legend rows.
    ///
    /// # Errors
    ///
    /// Returns a [`TemplateError`] for a wrong shape or an unknown symbol.
    pub fn from_rows<S: AsRef<str>>(rows: &[S]) -> Result<Self, TemplateError> {
        if rows.len() != ROOM_DIM {
            return Err(TemplateError::WrongRowCount { rows: rows.len() });
        }

        let mut tiles = [[Tile::Empty; ROOM_DIM]; ROOM_DIM];
        for (y, row) in rows.iter().enumerate() {
            let symbols: Vec<char> = row.as_ref().chars().collect();
            if symbols.len() != ROOM_DIM {
                return Err(TemplateError::WrongRowWidth {
                    row: y,
                    width: symbols.len(),
                });
            }
            for (x, &symbol) in symbols.iter().enumerate() {
                let tile = u8::try_from(symbol)
                    .ok()
                    .and_then(Tile::from_symbol)
                    .ok_or(TemplateError::UnknownSymbol {
                        row: y,
                        column: x,
                        symbol,
                    })?;
                tiles[y][x] = tile;
            }
        }
        Ok(Self { tiles })
    }

    /// Returns the tile at local `(x, y)`, or empty outside the room.
    #[inline]
    #[must_use]
    pub fn tile(&self, x: usize, y: usize) -> Tile {
        self.tiles
            .get(y)
            .and_then(|row| row.get(x))
            .copied()
            .unwrap_or(Tile::Empty)
    }

    /// Checks if `(x, y)` is the top-left cell of a stairs block.
    #[must_use]
    pub fn is_stairs_corner(&self, x: usize, y: usize) -> bool {
        self.tile(x, y) == Tile::Stairs
            && (x == 0 || self.tile(x - 1, y) != Tile::Stairs)
            && (y == 0 || self.tile(x, y - 1) != Tile::Stairs)
    }

    /// Iterates over every cell as `(x, y, tile)` in row order.
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize, Tile)> + '_ {
        self.tiles.iter().enumerate().flat_map(|(y, row)| {
            row.iter().enumerate().map(move |(x, &tile)| (x, y, tile))
        })
    }

    /// Counts cells holding `tile`.
    #[must_use]
    pub fn count(&self, tile: Tile) -> usize {
        self.cells().filter(|&(_, _, t)| t == tile).count()
    }

    /// Renders the template back to its legend, one row per line.
    #[must_use]
    pub fn to_legend(&self) -> String {
        let mut text = String::with_capacity(ROOM_DIM * (ROOM_DIM + 1));
        for row in &self.tiles {
            text.extend(row.iter().map(|tile| tile.symbol()));
            text.push('\n');
        }
        text
    }
}

impl Default for RoomTemplate {
    fn default() -> Self {
        Self::standard()
    }
}
