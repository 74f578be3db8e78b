use crate::{
    console::Console,
    db_interaction::{
        order::{order_status, update_order_status as set_order_status},
        RecordedStatus
    },
    domain::OrderStatus,
    executor::QueryExecutor,
    handlers::HandlerError,
    session::Session
};

use super::ask_order_id;

#[tracing::instrument(
    "Updating order status",
    skip_all,
    fields(login = %session.login())
)]
pub fn update_order_status(
    executor: &mut QueryExecutor,
    console: &mut Console<'_>,
    session: &mut Session
) -> Result<(), HandlerError> {
    let Some(order_id) = ask_order_id(console, "Enter Order ID to update: ")? else {
        return Ok(())
    };

    let Some(current_status) = order_status(executor, order_id)? else {
        console.say("Order not found!")?;
        return Ok(())
    };

    console.say(format!("Current status: {}", current_status))?;
    console.say("Select new status:")?;
    for (position, status) in OrderStatus::ALL.iter().enumerate() {
        console.say(format!("{}. {}", position + 1, status))?;
    }

    let Some(new_status) = OrderStatus::from_choice(console.read_choice()?) else {
        console.say("Invalid choice!")?;
        return Ok(())
    };

    if current_status == RecordedStatus::Known(new_status) {
        console.say("Order already has this status. No change needed.")?;
        return Ok(())
    }

    set_order_status(executor, order_id, new_status)?;
    tracing::info!("Order {} moved from {} to {}", order_id, current_status, new_status);
    console.say("Order status updated successfully!")?;

    Ok(())
}
