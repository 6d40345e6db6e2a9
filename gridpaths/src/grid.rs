use crate::mask::VisitMask;
use std::fmt;
use thiserror::Error;

/// Kind of a grid cell.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum CellKind {
    /// Traversable cell that every counted path must visit exactly once.
    Empty,
    /// Obstacle, never entered.
    Blocked,
    /// Cell where every path starts, never re-entered.
    Source,
    /// Cell where every path ends, never traversed through.
    Sink,
}

impl CellKind {
    /// Symbol used in the textual grid form.
    pub fn symbol(self) -> char {
        match self {
            CellKind::Empty => '.',
            CellKind::Blocked => '#',
            CellKind::Source => 'S',
            CellKind::Sink => 'E',
        }
    }

    fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            '.' => Some(CellKind::Empty),
            '#' => Some(CellKind::Blocked),
            'S' => Some(CellKind::Source),
            'E' => Some(CellKind::Sink),
            _ => None,
        }
    }
}

/// Configuration error detected while constructing a [`Grid`],
/// always before any search work begins.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum GridError {
    #[error("grid with {cells} cells exceeds the visitation mask capacity of {capacity} bits")]
    TooManyCells { cells: usize, capacity: u32 },
    #[error("grid must have nonzero dimensions")]
    EmptyGrid,
    #[error("grid has no source cell")]
    NoSource,
    #[error("grid has more than one source cell")]
    MultipleSources,
    #[error("grid has no sink cell")]
    NoSink,
    #[error("grid has more than one sink cell")]
    MultipleSinks,
    #[error("unknown grid symbol {0:?}")]
    UnknownSymbol(char),
    #[error("got {got} cells for a grid of {expected}")]
    WrongCellCount { got: usize, expected: usize },
    #[error("row {row} has {got} cells, expected {expected}")]
    RaggedRow { row: usize, got: usize, expected: usize },
}

/// Returns cell number = index of the cell with given (`col`, `row`) coordinates
/// in the grid with given number of `cols`.
#[inline(always)] pub fn cell_nr(cols: u8, col: u8, row: u8) -> u8 { row * cols + col }

/// Rectangular grid of typed cells with exactly one source and one sink.
/// Immutable after construction; all configuration errors are rejected by the constructors.
#[derive(Debug)]
pub struct Grid {
    kinds: Box<[CellKind]>,
    width: u8,
    height: u8,
    source: u8,
    sink: u8,
    target: VisitMask,
}

impl Grid {
    /// Constructs a grid of `width` x `height` cells given in row-major order.
    pub fn new(width: u8, height: u8, kinds: Vec<CellKind>) -> Result<Self, GridError> {
        if width == 0 || height == 0 { return Err(GridError::EmptyGrid); }
        let cells = width as usize * height as usize;
        if cells > VisitMask::CAPACITY as usize {
            return Err(GridError::TooManyCells { cells, capacity: VisitMask::CAPACITY });
        }
        if kinds.len() != cells {
            return Err(GridError::WrongCellCount { got: kinds.len(), expected: cells });
        }
        let mut source = None;
        let mut sink = None;
        let mut target = VisitMask::EMPTY;
        for (nr, kind) in kinds.iter().enumerate() {
            match kind {
                CellKind::Empty => target.insert(nr as u8),
                CellKind::Blocked => {}
                CellKind::Source => {
                    if source.replace(nr as u8).is_some() { return Err(GridError::MultipleSources); }
                }
                CellKind::Sink => {
                    if sink.replace(nr as u8).is_some() { return Err(GridError::MultipleSinks); }
                }
            }
        }
        Ok(Self {
            kinds: kinds.into_boxed_slice(),
            width, height,
            source: source.ok_or(GridError::NoSource)?,
            sink: sink.ok_or(GridError::NoSink)?,
            target,
        })
    }

    /// Constructs a grid from equally long textual rows
    /// built of the symbols `.` (empty), `#` (blocked), `S` (source), `E` (sink).
    pub fn from_rows<'a>(rows: impl IntoIterator<Item = &'a str>) -> Result<Self, GridError> {
        let mut kinds = Vec::new();
        let mut width = 0usize;
        let mut height = 0usize;
        for (row_nr, row) in rows.into_iter().enumerate() {
            let mut row_len = 0usize;
            for symbol in row.chars() {
                kinds.push(CellKind::from_symbol(symbol).ok_or(GridError::UnknownSymbol(symbol))?);
                row_len += 1;
            }
            if row_nr == 0 { width = row_len; }
            else if row_len != width {
                return Err(GridError::RaggedRow { row: row_nr, got: row_len, expected: width });
            }
            height = row_nr + 1;
        }
        if width == 0 || height == 0 { return Err(GridError::EmptyGrid); }
        if width * height > VisitMask::CAPACITY as usize {
            return Err(GridError::TooManyCells { cells: width * height, capacity: VisitMask::CAPACITY });
        }
        Self::new(width as u8, height as u8, kinds)
    }

    /// Constructs a grid from a multi-line string, one row per line.
    #[inline] pub fn parse(s: &str) -> Result<Self, GridError> {
        Self::from_rows(s.lines())
    }

    /// Returns kind of the cell with the given number. `cell` must be in bounds.
    #[inline(always)] pub fn kind(&self, cell: u8) -> CellKind {
        self.kinds[cell as usize]
    }

    /// Returns number of columns.
    #[inline] pub fn width(&self) -> u8 { self.width }

    /// Returns number of rows.
    #[inline] pub fn height(&self) -> u8 { self.height }

    /// Returns total number of cells.
    #[inline] pub fn len(&self) -> usize { self.kinds.len() }

    /// Returns number of the source cell.
    #[inline] pub fn source_cell(&self) -> u8 { self.source }

    /// Returns number of the sink cell.
    #[inline] pub fn sink_cell(&self) -> u8 { self.sink }

    /// Returns the mask with a bit set for every empty cell.
    /// A completed path is a solution iff its visitation mask equals this exactly.
    #[inline] pub fn target_mask(&self) -> VisitMask { self.target }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.kinds.chunks(self.width as usize) {
            for kind in row { write!(f, "{}", kind.symbol())?; }
            writeln!(f)?;
        }
        Ok(())
    }
}
