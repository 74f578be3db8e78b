pub mod item;
pub mod order;
pub mod store;
pub mod user;

pub use item::{ItemField, ItemInsertError, MenuFilter, SortOrder};
pub use order::{CreateOrderError, PlacedOrder, RecordedStatus};
pub use user::{RenameUserError, UserField, UserInsertError, UserProfile};
