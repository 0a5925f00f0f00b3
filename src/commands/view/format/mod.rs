//! Output formatting for list views

mod human;
mod json;
mod records;

pub use human::output_human;
pub use json::output_json;
pub use records::output_records;

use seernav_core::sort::Direction;

/// Short direction label shared by every format
fn direction_label(direction: Direction) -> &'static str {
    match direction {
        Direction::Ascending => "asc",
        Direction::Descending => "desc",
    }
}
