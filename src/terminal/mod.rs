//! Text front end: prompts, board and statistics rendering, menus.

mod console;
mod display;
mod menu;

pub use console::{Console, MoveInput, parse_coords, parse_move_input, parse_yes_no};
pub use display::{single_player_message, stats_table, two_player_message};
pub use menu::{Menu, is_end_of_input};
