mod get;
mod update;

pub use get::view_profile;
pub use update::{ask_new_password, update_profile};
pub(crate) use update::ask_new_phone_number;
