//! Game rules for bingo.

mod win;

pub use win::check_win;
