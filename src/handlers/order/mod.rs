use crate::console::{Console, ConsoleError};

use super::ask_number;

mod history;
mod info;
mod post;
mod update;

pub use history::{view_orders_of_any_user, view_own_orders, view_own_recent_orders, view_recent_orders_of_any_user};
pub use info::view_order_info;
pub use post::place_order;
pub use update::update_order_status;

// Number of orders listed by the recent-orders screens
pub const RECENT_ORDER_LIMIT: i32 = 5;

fn ask_order_id(console: &mut Console<'_>, prompt: &str) -> Result<Option<i32>, ConsoleError> {
    ask_number(console, prompt, "Invalid Order ID! Please enter a numeric value.")
}
