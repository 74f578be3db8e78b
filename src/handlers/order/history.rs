use crate::{
    console::Console,
    db_interaction::order::print_orders_of,
    executor::QueryExecutor,
    handlers::HandlerError,
    session::Session
};

use super::RECENT_ORDER_LIMIT;

pub fn view_own_orders(
    executor: &mut QueryExecutor,
    console: &mut Console<'_>,
    session: &mut Session
) -> Result<(), HandlerError> {
    list_orders(executor, console, session.login().as_str(), None)
}

pub fn view_own_recent_orders(
    executor: &mut QueryExecutor,
    console: &mut Console<'_>,
    session: &mut Session
) -> Result<(), HandlerError> {
    list_orders(executor, console, session.login().as_str(), Some(RECENT_ORDER_LIMIT))
}

pub fn view_orders_of_any_user(
    executor: &mut QueryExecutor,
    console: &mut Console<'_>,
    _session: &mut Session
) -> Result<(), HandlerError> {
    let target = console.ask("Which user would you like to view orders for?")?;
    list_orders(executor, console, target.trim(), None)
}

pub fn view_recent_orders_of_any_user(
    executor: &mut QueryExecutor,
    console: &mut Console<'_>,
    _session: &mut Session
) -> Result<(), HandlerError> {
    let target = console.ask("Which user would you like to view recent orders for?")?;
    list_orders(executor, console, target.trim(), Some(RECENT_ORDER_LIMIT))
}

#[tracing::instrument(
    "Listing orders",
    skip(executor, console)
)]
fn list_orders(
    executor: &mut QueryExecutor,
    console: &mut Console<'_>,
    login: &str,
    limit: Option<i32>
) -> Result<(), HandlerError> {
    let kind = if limit.is_some() { "recent orders" } else { "orders" };

    console.say("")?;
    let order_count = print_orders_of(executor, login, limit, console.output())?;

    if order_count == 0 {
        console.say(format!("No {} found for user: {}", kind, login))?;
    } else {
        console.say(format!("\nFound {} {} for user: {}", order_count, kind, login))?;
    }

    Ok(())
}
