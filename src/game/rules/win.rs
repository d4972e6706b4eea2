//! Win detection logic for bingo boards.

use tracing::instrument;

/// Checks whether a marked matrix contains a completed line.
///
/// Returns `true` iff some row, some column, the main diagonal, or the
/// anti-diagonal is entirely marked. An empty matrix is a vacuous non-win.
///
/// Callers are expected to pass a square matrix; rows shorter than the
/// matrix height count their missing cells as unmarked.
#[instrument(skip(marks), fields(size = marks.len()))]
pub fn check_win(marks: &[Vec<bool>]) -> bool {
    let size = marks.len();
    if size == 0 {
        return false;
    }

    let cell = |row: usize, col: usize| marks[row].get(col).copied().unwrap_or(false);

    let row_win = (0..size).any(|row| (0..size).all(|col| cell(row, col)));
    let col_win = (0..size).any(|col| (0..size).all(|row| cell(row, col)));
    let main_diag_win = (0..size).all(|i| cell(i, i));
    let anti_diag_win = (0..size).all(|i| cell(i, size - 1 - i));

    row_win || col_win || main_diag_win || anti_diag_win
}
