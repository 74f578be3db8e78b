use std::{error::Error, fmt::Debug, str::FromStr};

use thiserror::Error;

use crate::{
    console::{Console, ConsoleError},
    executor::{DatabaseError, QueryExecutor},
    session::Session,
    utils::error_fmt_chain
};

pub mod admin;
pub mod authentication;
pub mod browse;
pub mod manage_menu;
pub mod order;
pub mod profile;
pub mod store;

// Signature shared by every entry of the authenticated menus
pub type Handler = fn(&mut QueryExecutor, &mut Console<'_>, &mut Session) -> Result<(), HandlerError>;

#[derive(Error)]
pub enum HandlerError{
    #[error(transparent)]
    Console(#[from] ConsoleError),
    #[error("Database error")]
    Database(#[from] DatabaseError),
    #[error("Unexpected error occured")]
    UnexpectedError(#[from] anyhow::Error)
}

impl Debug for HandlerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self)?;
        error_fmt_chain(f, &self.source())
    }
}

// Asks for a number; prints `invalid_message` and returns None when the
// answer does not parse
pub(crate) fn ask_number<T: FromStr>(
    console: &mut Console<'_>,
    prompt: &str,
    invalid_message: &str
) -> Result<Option<T>, ConsoleError> {
    let answer = console.ask(prompt)?;

    match answer.trim().parse::<T>() {
        Ok(number) => Ok(Some(number)),
        Err(_) => {
            console.say(invalid_message)?;
            Ok(None)
        }
    }
}
