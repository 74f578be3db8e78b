mod administration;
mod helpers;
mod login;
mod order;
