mod profile;
mod role;

pub use profile::update_user_profile;
pub use role::update_user_role;
