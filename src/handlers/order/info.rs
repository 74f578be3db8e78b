use crate::{
    console::Console,
    db_interaction::order::{order_owner, print_order_details},
    domain::Capability,
    executor::QueryExecutor,
    handlers::HandlerError,
    session::Session
};

use super::ask_order_id;

// Customers may only look at their own orders; staff may look at any
#[tracing::instrument(
    "Viewing order information",
    skip_all,
    fields(login = %session.login())
)]
pub fn view_order_info(
    executor: &mut QueryExecutor,
    console: &mut Console<'_>,
    session: &mut Session
) -> Result<(), HandlerError> {
    let Some(order_id) = ask_order_id(console, "Enter Order ID to view details: ")? else {
        return Ok(())
    };

    let Some(owner) = order_owner(executor, order_id)? else {
        console.say("Order not found!")?;
        return Ok(())
    };

    if !session.is(owner.trim()) && !session.can(Capability::ViewAnyOrders) {
        tracing::warn!("Denied access to order {} owned by {}", order_id, owner);
        console.say("You don't have permission to view this order!")?;
        return Ok(())
    }

    print_order_details(executor, order_id, console.output())?;

    Ok(())
}
