use std::fmt;

/// A direction to move/merge tiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Move {
    Up,
    Down,
    Left,
    Right,
}

impl Move {
    /// All four directions, in `[Up, Down, Left, Right]` order.
    pub const ALL: [Move; 4] = [Move::Up, Move::Down, Move::Left, Move::Right];

    /// Map an input key to a direction.
    ///
    /// Accepts arrow key codes (`ArrowLeft`), plain names (`left`) and `wasd`,
    /// case-insensitively.
    pub fn from_key(key: &str) -> Option<Move> {
        match key.trim().to_ascii_lowercase().as_str() {
            "w" | "up" | "arrowup" => Some(Move::Up),
            "s" | "down" | "arrowdown" => Some(Move::Down),
            "a" | "left" | "arrowleft" => Some(Move::Left),
            "d" | "right" | "arrowright" => Some(Move::Right),
            _ => None,
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Move::Up => "up",
            Move::Down => "down",
            Move::Left => "left",
            Move::Right => "right",
        };
        f.write_str(name)
    }
}

/// Value of a single cell: 0 when empty, otherwise a power of two >= 2.
pub type Tile = u64;
pub type Score = u64;
pub type Row = Vec<Tile>;

pub const DEFAULT_ROWS: usize = 4;
pub const DEFAULT_COLS: usize = 4;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("row {row} has {len} cells, expected {expected}")]
    Ragged { row: usize, len: usize, expected: usize },
    #[error("cell ({row}, {col}) holds {value}, which is neither empty nor a power of two >= 2")]
    InvalidTile { row: usize, col: usize, value: Tile },
    #[error("cannot insert tile value {0}: must be a power of two >= 2")]
    InvalidInsertValue(Tile),
    #[error("insert index {index} out of range: board has {empty} empty cells")]
    InsertOutOfRange { index: usize, empty: usize },
    #[error("tile total overflows {}: board cannot be scored or merged", Score::MAX)]
    TotalOverflow,
}

/// Rectangular 2048 board, stored row-major.
///
/// A `Board` is a plain value: every operation borrows it and returns a new
/// board, so callers can keep earlier states around freely. Dimensions are
/// fixed at construction.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Board {
    rows: usize,
    cols: usize,
    cells: Vec<Tile>,
}

impl Default for Board {
    /// The standard empty 4x4 board.
    fn default() -> Self {
        Board::empty(DEFAULT_ROWS, DEFAULT_COLS)
    }
}

impl Board {
    /// An all-empty board with the given dimensions.
    pub fn empty(rows: usize, cols: usize) -> Self {
        Board { rows, cols, cells: vec![0; rows * cols] }
    }

    /// Build a board from its rows, validating shape and tile values.
    ///
    /// ```
    /// use slide_2048::engine::{Board, EngineError, Tile};
    /// let rows: [[Tile; 4]; 2] = [[2, 0, 0, 4], [0, 8, 0, 0]];
    /// let b = Board::from_rows(&rows).unwrap();
    /// assert_eq!((b.rows(), b.cols()), (2, 4));
    ///
    /// let bad: [[Tile; 2]; 1] = [[2, 3]];
    /// assert!(matches!(Board::from_rows(&bad), Err(EngineError::InvalidTile { .. })));
    /// ```
    pub fn from_rows<R: AsRef<[Tile]>>(rows: &[R]) -> Result<Self, EngineError> {
        let cols = rows.first().map(|r| r.as_ref().len()).unwrap_or(0);
        let mut cells = Vec::with_capacity(rows.len() * cols);
        let mut total: Score = 0;
        for (row_idx, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != cols {
                return Err(EngineError::Ragged { row: row_idx, len: row.len(), expected: cols });
            }
            for (col_idx, &value) in row.iter().enumerate() {
                if !is_valid_tile(value) {
                    return Err(EngineError::InvalidTile { row: row_idx, col: col_idx, value });
                }
                // Merges conserve the total, so a total that fits bounds every merged tile too.
                total = total.checked_add(value).ok_or(EngineError::TotalOverflow)?;
            }
            cells.extend_from_slice(row);
        }
        Ok(Board { rows: rows.len(), cols, cells })
    }

    #[inline]
    pub fn rows(&self) -> usize { self.rows }

    #[inline]
    pub fn cols(&self) -> usize { self.cols }

    /// Borrow row `idx`. Panics if `idx >= self.rows()`.
    #[inline]
    pub fn row(&self, idx: usize) -> &[Tile] {
        assert!(idx < self.rows, "row {idx} out of range for {} rows", self.rows);
        &self.cells[idx * self.cols..(idx + 1) * self.cols]
    }

    /// Iterate rows top to bottom.
    pub fn iter_rows(&self) -> impl Iterator<Item = &[Tile]> + '_ {
        (0..self.rows).map(move |idx| self.row(idx))
    }

    /// Cell value at (`row`, `col`).
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> Tile {
        assert!(col < self.cols, "column {col} out of range for {} columns", self.cols);
        self.row(row)[col]
    }

    /// All cells in row-major order.
    #[inline]
    pub fn cells(&self) -> &[Tile] { &self.cells }

    pub fn to_rows(&self) -> Vec<Row> {
        self.iter_rows().map(<[Tile]>::to_vec).collect()
    }

    /// Count the number of empty (zero) cells.
    pub fn count_empty(&self) -> usize {
        self.cells.iter().filter(|&&v| v == 0).count()
    }

    #[inline]
    pub fn is_full(&self) -> bool { self.count_empty() == 0 }

    /// True iff no horizontally or vertically adjacent pair of cells is equal.
    ///
    /// Empty cells take part in the comparison, so two neighbouring blanks
    /// count as equal. Only meaningful on a full board; see [`Board::is_game_over`].
    pub fn is_adjacent_cells_different(&self) -> bool {
        let horizontal_match = self
            .iter_rows()
            .any(|row| row.windows(2).any(|pair| pair[0] == pair[1]));
        let vertical_match = self
            .iter_rows()
            .zip(self.iter_rows().skip(1))
            .any(|(upper, lower)| upper.iter().zip(lower).any(|(a, b)| a == b));
        !(horizontal_match || vertical_match)
    }

    /// Return true if the board is full and no two neighbours can merge.
    ///
    /// ```
    /// use slide_2048::engine::{Board, Tile};
    /// assert!(!Board::default().is_game_over());
    /// let rows: [[Tile; 2]; 2] = [[2, 4], [4, 2]];
    /// assert!(Board::from_rows(&rows).unwrap().is_game_over());
    /// ```
    pub fn is_game_over(&self) -> bool {
        self.is_full() && self.is_adjacent_cells_different()
    }

    /// Swap rows and columns. An `r x c` board becomes `c x r`.
    pub fn transpose(&self) -> Board {
        let mut cells = Vec::with_capacity(self.cells.len());
        for col in 0..self.cols {
            for row in 0..self.rows {
                cells.push(self.cells[row * self.cols + col]);
            }
        }
        Board { rows: self.cols, cols: self.rows, cells }
    }

    /// Reverse every row (left-right mirror image).
    pub fn mirror(&self) -> Board {
        let cells = self.iter_rows().flat_map(|row| row.iter().rev().copied()).collect();
        Board { rows: self.rows, cols: self.cols, cells }
    }

    /// Slide/merge every row towards column 0.
    pub fn slide_left(&self) -> Board {
        let cells = self.iter_rows().flat_map(|row| slide(row, self.cols)).collect();
        Board { rows: self.rows, cols: self.cols, cells }
    }

    pub fn slide_right(&self) -> Board {
        self.mirror().slide_left().mirror()
    }

    pub fn slide_up(&self) -> Board {
        self.transpose().slide_left().transpose()
    }

    pub fn slide_down(&self) -> Board {
        self.transpose().slide_right().transpose()
    }

    /// Return the board resulting from sliding/merging tiles in `dir` (no insertion).
    ///
    /// ```
    /// use slide_2048::engine::{Board, Move, Tile};
    /// let rows: [[Tile; 4]; 1] = [[2, 0, 2, 2]];
    /// let b = Board::from_rows(&rows).unwrap();
    /// assert_eq!(b.shift(Move::Left).row(0), &[4, 2, 0, 0]);
    /// assert_eq!(b.shift(Move::Right).row(0), &[0, 0, 2, 4]);
    /// ```
    pub fn shift(&self, dir: Move) -> Board {
        match dir {
            Move::Left => self.slide_left(),
            Move::Right => self.slide_right(),
            Move::Up => self.slide_up(),
            Move::Down => self.slide_down(),
        }
    }

    /// Write `value` into the `index`-th empty cell, counting row-major.
    ///
    /// An `index` at or beyond [`Board::count_empty`] writes nothing and
    /// returns an identical board. Use [`Board::try_insert_cell`] to have
    /// that reported instead.
    ///
    /// `value` is not validated: callers spawn 2 or 4. Writing anything that
    /// is not a power of two >= 2 leaves a board `from_rows` would reject.
    pub fn insert_cell(&self, index: usize, value: Tile) -> Board {
        debug_assert!(is_valid_tile(value), "insert_cell given invalid tile value {value}");
        let mut next = self.clone();
        if let Some(cell) = next.cells.iter_mut().filter(|v| **v == 0).nth(index) {
            *cell = value;
        }
        next
    }

    /// Like [`Board::insert_cell`] but rejects out-of-range indices and
    /// values that are not a valid tile or would overflow the board total.
    pub fn try_insert_cell(&self, index: usize, value: Tile) -> Result<Board, EngineError> {
        if value == 0 || !is_valid_tile(value) {
            return Err(EngineError::InvalidInsertValue(value));
        }
        if self.score().checked_add(value).is_none() {
            return Err(EngineError::TotalOverflow);
        }
        let empty = self.count_empty();
        if index >= empty {
            return Err(EngineError::InsertOutOfRange { index, empty });
        }
        Ok(self.insert_cell(index, value))
    }

    /// Compute the total score: the sum of all tiles.
    #[inline]
    pub fn score(&self) -> Score { self.cells.iter().sum() }

    /// Return the highest tile value present (0 on an empty board).
    pub fn highest_tile(&self) -> Tile {
        self.cells.iter().copied().max().unwrap_or(0)
    }
}

impl TryFrom<Vec<Row>> for Board {
    type Error = EngineError;

    fn try_from(rows: Vec<Row>) -> Result<Self, Self::Error> {
        Board::from_rows(&rows)
    }
}

impl From<&Board> for Vec<Row> {
    fn from(board: &Board) -> Self { board.to_rows() }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Board{:?}", self.to_rows())
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let separator = "-".repeat(self.cols * 8);
        writeln!(f)?;
        for (idx, row) in self.iter_rows().enumerate() {
            if idx > 0 {
                writeln!(f, "{separator}")?;
            }
            let cells: Vec<String> = row.iter().map(format_val).collect();
            writeln!(f, "{}", cells.join("|"))?;
        }
        Ok(())
    }
}

fn format_val(val: &Tile) -> String {
    match val {
        0 => String::from("       "),
        &x => format!("{:^7}", x),
    }
}

#[inline]
fn is_valid_tile(value: Tile) -> bool {
    value == 0 || (value >= 2 && value.is_power_of_two())
}

/// Slide and merge one line towards index 0.
///
/// Zeros are squeezed out, each equal adjacent pair merges once (left pair
/// first, a fresh merge result never merges again in the same pass), and the
/// result is right-padded with zeros up to `cols`. A line longer than `cols`
/// is never truncated.
///
/// ```
/// use slide_2048::engine::slide;
/// assert_eq!(slide(&[2, 2, 0, 0], 4), vec![4, 0, 0, 0]);
/// assert_eq!(slide(&[2, 2, 2, 2], 4), vec![4, 4, 0, 0]);
/// assert_eq!(slide(&[4, 2, 2, 4], 4), vec![4, 4, 4, 0]);
/// ```
pub fn slide(row: &[Tile], cols: usize) -> Row {
    let mut line: Row = row.iter().copied().filter(|&v| v != 0).collect();
    let mut idx = 0;
    while idx + 1 < line.len() {
        if line[idx] == line[idx + 1] {
            line[idx] *= 2;
            line[idx + 1] = 0;
            idx += 2;
        } else {
            idx += 1;
        }
    }
    line.retain(|&v| v != 0);
    if line.len() < cols {
        line.resize(cols, 0);
    }
    line
}

// Free functions mirroring the `Board` methods.

/// A new all-empty board of `rows x cols`.
pub fn empty_board(rows: usize, cols: usize) -> Board { Board::empty(rows, cols) }

pub fn count_empty_cells(board: &Board) -> usize { board.count_empty() }

pub fn is_board_full(board: &Board) -> bool { board.is_full() }

pub fn is_adjacent_cells_different(board: &Board) -> bool { board.is_adjacent_cells_different() }

pub fn is_game_over(board: &Board) -> bool { board.is_game_over() }

pub fn slide_left(board: &Board) -> Board { board.slide_left() }

pub fn slide_right(board: &Board) -> Board { board.slide_right() }

pub fn slide_up(board: &Board) -> Board { board.slide_up() }

pub fn slide_down(board: &Board) -> Board { board.slide_down() }

/// Slide/merge tiles in the given direction. No randomness.
pub fn shift(board: &Board, direction: Move) -> Board { board.shift(direction) }

/// See [`Board::insert_cell`]; out-of-range indices are a no-op.
pub fn insert_cell(index: usize, value: Tile, board: &Board) -> Board {
    board.insert_cell(index, value)
}

/// Compute the total score for a board.
pub fn calculate_score(board: &Board) -> Score { board.score() }

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, Rng, SeedableRng};

    fn board<const R: usize, const C: usize>(rows: [[Tile; C]; R]) -> Board {
        Board::from_rows(&rows).unwrap()
    }

    fn random_board<G: Rng>(rng: &mut G, rows: usize, cols: usize) -> Board {
        let rows: Vec<Row> = (0..rows)
            .map(|_| {
                (0..cols)
                    .map(|_| match rng.gen_range(0..7u32) {
                        0 => 0,
                        exp => 1 << exp,
                    })
                    .collect()
            })
            .collect();
        Board::from_rows(&rows).unwrap()
    }

    #[test]
    fn it_slide() {
        assert_eq!(slide(&[0, 0, 0, 0], 4), vec![0, 0, 0, 0]);
        assert_eq!(slide(&[2, 2, 0, 0], 4), vec![4, 0, 0, 0]);
        assert_eq!(slide(&[2, 0, 2, 2], 4), vec![4, 2, 0, 0]);
        assert_eq!(slide(&[4, 2, 2, 4], 4), vec![4, 4, 4, 0]);
        assert_eq!(slide(&[2, 4, 2, 4], 4), vec![2, 4, 2, 4]);
        assert_eq!(slide(&[0, 0, 0, 8], 4), vec![8, 0, 0, 0]);
        assert_eq!(slide(&[2, 2, 2, 2], 4), vec![4, 4, 0, 0]);
        assert_eq!(slide(&[4, 4, 8, 0], 4), vec![8, 8, 0, 0]);
    }

    #[test]
    fn it_slide_merges_first_pair_of_a_triple() {
        assert_eq!(slide(&[2, 2, 2], 3), vec![4, 2, 0]);
        assert_eq!(slide(&[2, 2, 2, 0], 4), vec![4, 2, 0, 0]);
    }

    #[test]
    fn it_slide_pads_but_never_truncates() {
        assert_eq!(slide(&[], 4), vec![0, 0, 0, 0]);
        assert_eq!(slide(&[2, 4], 4), vec![2, 4, 0, 0]);
        assert_eq!(slide(&[2, 4, 8, 16, 32], 4), vec![2, 4, 8, 16, 32]);
    }

    #[test]
    fn test_slide_left() {
        let game = board([[2, 2, 0, 0], [2, 0, 2, 2], [4, 2, 2, 4], [2, 4, 8, 16]]);
        assert_eq!(
            game.slide_left(),
            board([[4, 0, 0, 0], [4, 2, 0, 0], [4, 4, 4, 0], [2, 4, 8, 16]])
        );
    }

    #[test]
    fn test_slide_right() {
        let game = board([[2, 2, 0, 0], [2, 0, 2, 2], [4, 2, 2, 4], [2, 4, 8, 16]]);
        assert_eq!(
            game.slide_right(),
            board([[0, 0, 0, 4], [0, 0, 2, 4], [0, 4, 4, 4], [2, 4, 8, 16]])
        );
    }

    #[test]
    fn test_slide_up() {
        let game = board([[2, 2, 4, 2], [2, 0, 2, 4], [0, 2, 2, 8], [0, 2, 4, 16]]);
        assert_eq!(
            game.slide_up(),
            board([[4, 4, 4, 2], [0, 2, 4, 4], [0, 0, 4, 8], [0, 0, 0, 16]])
        );
    }

    #[test]
    fn test_slide_down() {
        let game = board([[2, 2, 4, 2], [2, 0, 2, 4], [0, 2, 2, 8], [0, 2, 4, 16]]);
        assert_eq!(
            game.slide_down(),
            board([[0, 0, 0, 2], [0, 0, 4, 4], [0, 2, 4, 8], [4, 4, 4, 16]])
        );
    }

    #[test]
    fn test_shift_dispatch() {
        let game = board([[2, 2, 4, 2], [2, 0, 2, 4], [0, 2, 2, 8], [0, 2, 4, 16]]);
        assert_eq!(shift(&game, Move::Left), slide_left(&game));
        assert_eq!(shift(&game, Move::Right), slide_right(&game));
        assert_eq!(shift(&game, Move::Up), slide_up(&game));
        assert_eq!(shift(&game, Move::Down), slide_down(&game));
    }

    #[test]
    fn test_slides_leave_input_untouched() {
        let game = board([[2, 2, 0, 0], [0, 0, 0, 0], [4, 0, 4, 0], [0, 0, 0, 2]]);
        let snapshot = game.clone();
        for dir in Move::ALL {
            let _ = game.shift(dir);
        }
        let _ = game.insert_cell(0, 2);
        assert_eq!(game, snapshot);
    }

    #[test]
    fn test_non_square_board() {
        let game = board([[2, 0, 2, 4, 4], [0, 0, 0, 0, 2], [2, 8, 8, 0, 0]]);
        assert_eq!(
            game.slide_left(),
            board([[4, 8, 0, 0, 0], [2, 0, 0, 0, 0], [2, 16, 0, 0, 0]])
        );
        assert_eq!(
            game.slide_up(),
            board([[4, 8, 2, 4, 4], [0, 0, 8, 0, 2], [0, 0, 0, 0, 0]])
        );
        let t = game.transpose();
        assert_eq!((t.rows(), t.cols()), (5, 3));
        assert_eq!(t.transpose(), game);
    }

    #[test]
    fn it_count_empty() {
        let game = Board::default();
        assert_eq!(count_empty_cells(&game), 16);
        assert!(!is_board_full(&game));
        let game = board([[2, 2, 2, 2], [0, 0, 0, 0], [2, 2, 2, 2], [0, 0, 0, 0]]);
        assert_eq!(count_empty_cells(&game), 8);
        assert_eq!(empty_board(3, 5).count_empty(), 15);
    }

    #[test]
    fn test_game_over() {
        let checkerboard = board([[2, 4, 2, 4], [4, 2, 4, 2], [2, 4, 2, 4], [4, 2, 4, 2]]);
        assert!(is_board_full(&checkerboard));
        assert!(is_adjacent_cells_different(&checkerboard));
        assert!(is_game_over(&checkerboard));

        // One vertical pair matches: still playable.
        let playable = board([[2, 4, 2, 4], [4, 2, 4, 2], [2, 4, 2, 4], [2, 8, 4, 2]]);
        assert!(is_board_full(&playable));
        assert!(!is_game_over(&playable));

        let horizontal = board([[2, 2, 8, 4], [4, 8, 4, 2], [2, 4, 2, 4], [4, 2, 4, 2]]);
        assert!(!is_game_over(&horizontal));
    }

    #[test]
    fn test_adjacency_counts_empty_pairs() {
        assert!(!Board::default().is_adjacent_cells_different());
        assert!(!Board::default().is_game_over());
        // Not full, so never over even though no neighbours match.
        let sparse = board([[2, 0], [0, 2]]);
        assert!(sparse.is_adjacent_cells_different());
        assert!(!sparse.is_game_over());
    }

    #[test]
    fn test_insert_cell() {
        let game = Board::default();
        let game = insert_cell(5, 2, &game);
        assert_eq!(game.get(1, 1), 2);
        assert_eq!(game.count_empty(), 15);

        // Index counts only empty cells, so index 0 skips the filled (0, 0).
        let game = board([[2, 0], [0, 0]]).insert_cell(0, 4);
        assert_eq!(game, board([[2, 4], [0, 0]]));
        let game = game.insert_cell(1, 8);
        assert_eq!(game, board([[2, 4], [0, 8]]));
    }

    #[test]
    fn test_insert_cell_out_of_range_is_noop() {
        let game = board([[2, 0], [4, 8]]);
        assert_eq!(game.insert_cell(1, 2), game);
        assert_eq!(game.insert_cell(usize::MAX, 2), game);
    }

    #[test]
    fn test_try_insert_cell() {
        let game = board([[2, 0], [4, 0]]);
        assert_eq!(game.try_insert_cell(1, 2), Ok(board([[2, 0], [4, 2]])));
        assert_eq!(
            game.try_insert_cell(2, 2),
            Err(EngineError::InsertOutOfRange { index: 2, empty: 2 })
        );
        assert_eq!(game.try_insert_cell(0, 3), Err(EngineError::InvalidInsertValue(3)));
        assert_eq!(game.try_insert_cell(0, 0), Err(EngineError::InvalidInsertValue(0)));
    }

    #[test]
    fn test_from_rows_rejects_overflowing_total() {
        let huge: [[Tile; 2]; 1] = [[1 << 63, 1 << 63]];
        assert_eq!(Board::from_rows(&huge), Err(EngineError::TotalOverflow));

        // The largest accepted total still merges and scores without overflow.
        let edge: [[Tile; 3]; 1] = [[1 << 62, 1 << 62, 0]];
        let b = Board::from_rows(&edge).unwrap();
        assert_eq!(b.slide_left(), board([[1 << 63, 0, 0]]));
        assert_eq!(b.slide_left().score(), b.score());
        assert_eq!(
            b.slide_left().try_insert_cell(0, 1 << 63),
            Err(EngineError::TotalOverflow)
        );
    }

    #[test]
    #[should_panic(expected = "invalid tile value 3")]
    #[cfg(debug_assertions)]
    fn test_insert_cell_rejects_invalid_value_in_debug() {
        let _ = Board::default().insert_cell(0, 3);
    }

    #[test]
    fn test_from_rows_validation() {
        let ragged: Vec<Row> = vec![vec![2, 0, 0, 0], vec![0, 0, 0]];
        assert_eq!(
            Board::from_rows(&ragged),
            Err(EngineError::Ragged { row: 1, len: 3, expected: 4 })
        );
        let ones: [[Tile; 2]; 1] = [[0, 1]];
        assert_eq!(
            Board::from_rows(&ones),
            Err(EngineError::InvalidTile { row: 0, col: 1, value: 1 })
        );
        let odd: Vec<Row> = vec![vec![2, 4], vec![6, 8]];
        assert_eq!(
            Board::try_from(odd),
            Err(EngineError::InvalidTile { row: 1, col: 0, value: 6 })
        );
        let game = board([[2, 4], [1024, 0]]);
        assert_eq!(Vec::<Row>::from(&game), vec![vec![2, 4], vec![1024, 0]]);
    }

    #[test]
    fn test_score_and_highest_tile() {
        let game = board([[2, 4, 0, 0], [0, 0, 0, 0], [0, 128, 0, 0], [0, 0, 0, 2048]]);
        assert_eq!(calculate_score(&game), 2182);
        assert_eq!(game.highest_tile(), 2048);
        assert_eq!(Board::default().score(), 0);
        assert_eq!(Board::default().highest_tile(), 0);
    }

    #[test]
    fn test_display() {
        let game = board([[2, 0, 0, 0], [0, 2048, 0, 0], [0, 0, 0, 0], [0, 0, 0, 4]]);
        let rendered = game.to_string();
        assert_eq!(rendered.lines().count(), 8);
        assert!(rendered.contains(" 2048  "));
        assert!(rendered.contains(&"-".repeat(32)));
    }

    #[test]
    fn it_move_from_key() {
        assert_eq!(Move::from_key("ArrowLeft"), Some(Move::Left));
        assert_eq!(Move::from_key(" W "), Some(Move::Up));
        assert_eq!(Move::from_key("down"), Some(Move::Down));
        assert_eq!(Move::from_key("d"), Some(Move::Right));
        assert_eq!(Move::from_key("x"), None);
    }

    #[test]
    fn prop_slide_preserves_length_and_is_stable() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..500 {
            let len = rng.gen_range(1..8);
            let row: Row = random_board(&mut rng, 1, len).row(0).to_vec();
            let once = slide(&row, len);
            assert_eq!(once.len(), len);
            let mergeable = once.windows(2).any(|p| p[0] != 0 && p[0] == p[1]);
            if !mergeable {
                assert_eq!(slide(&once, len), once, "row {row:?}");
            }
        }
    }

    #[test]
    fn prop_directions_are_mirror_and_transpose_of_left() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..300 {
            let rows = rng.gen_range(1..6);
            let cols = rng.gen_range(1..6);
            let b = random_board(&mut rng, rows, cols);
            assert_eq!(b.slide_right(), b.mirror().slide_left().mirror());
            assert_eq!(b.slide_up(), b.transpose().slide_left().transpose());
            assert_eq!(b.slide_down(), b.transpose().slide_right().transpose());
        }
    }

    #[test]
    fn prop_slides_conserve_score() {
        let mut rng = StdRng::seed_from_u64(23);
        for _ in 0..300 {
            let b = random_board(&mut rng, 4, 4);
            for dir in Move::ALL {
                let moved = b.shift(dir);
                assert_eq!(moved.score(), b.score(), "{dir} on {b:?}");
                assert_eq!((moved.rows(), moved.cols()), (4, 4));
            }
        }
    }

    #[test]
    fn prop_insert_fills_exactly_one_cell() {
        let mut rng = StdRng::seed_from_u64(5);
        for _ in 0..300 {
            let b = random_board(&mut rng, 4, 4);
            let empty = b.count_empty();
            if empty == 0 {
                continue;
            }
            assert!(!b.is_game_over());
            let idx = rng.gen_range(0..empty);
            let value = if rng.gen_bool(0.2) { 4 } else { 2 };
            assert_eq!(b.insert_cell(idx, value).count_empty(), empty - 1);
        }
    }
}
