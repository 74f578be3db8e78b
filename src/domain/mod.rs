mod basket;
mod login_name;
mod order_status;
mod password;
mod phone_number;
mod price;
mod role;

pub use basket::{total_price, Basket, OrderLine};
pub use login_name::{LoginName, MAX_LOGIN_LENGTH};
pub use order_status::OrderStatus;
pub use password::{Password, MAX_PASSWORD_LENGTH};
pub use phone_number::PhoneNumber;
pub use price::Price;
pub use role::{Capability, Role};
