use crate::{
    console::{Console, ConsoleError},
    db_interaction::{
        item::item_price,
        order::{create_order, CreateOrderError},
        store::store_exists
    },
    domain::Basket,
    executor::QueryExecutor,
    handlers::{ask_number, HandlerError},
    session::Session
};

const DONE_KEYWORD: &str = "done";

#[tracing::instrument(
    "Placing order",
    skip_all,
    fields(login = %session.login())
)]
pub fn place_order(
    executor: &mut QueryExecutor,
    console: &mut Console<'_>,
    session: &mut Session
) -> Result<(), HandlerError> {
    let Some(store_id) = ask_store_id(executor, console)? else {
        console.say("Order cancelled.")?;
        return Ok(())
    };

    let basket = fill_basket(executor, console)?;

    match create_order(executor, session.login(), store_id, &basket) {
        Ok(order) => {
            console.say("\nOrder placed successfully!")?;
            console.say(format!("Order ID: {}", order.order_id))?;
            console.say(format!("Store ID: {}", order.store_id))?;
            console.say(format!("Total Price: ${:.2}", order.total_price))?;
            console.say("Items Ordered:")?;
            for line in order.lines.iter() {
                console.say(format!("- {} x{}", line.item_name, line.quantity))?;
            }
            Ok(())
        },
        Err(e @ (CreateOrderError::EmptyBasket
                | CreateOrderError::StoreNotFound(_)
                | CreateOrderError::ItemNotFound(_))) => {
            console.say(e.to_string())?;
            Ok(())
        },
        Err(e) => Err(anyhow::Error::new(e).into())
    }
}

// Re-prompts until an existing store is named; None when the user types `exit`
fn ask_store_id(
    executor: &mut QueryExecutor,
    console: &mut Console<'_>
) -> Result<Option<i32>, HandlerError> {
    loop {
        let Some(answer) = console.ask_or_exit("Enter the StoreID of the desired store (or 'exit' to cancel): ")? else {
            return Ok(None)
        };

        let Ok(store_id) = answer.trim().parse::<i32>() else {
            console.say("Invalid Store ID! Please enter a numeric value.")?;
            continue
        };

        if store_exists(executor, store_id)? {
            return Ok(Some(store_id))
        }

        console.say("Store ID not found. Please enter a valid store.")?;
    }
}

fn fill_basket(
    executor: &mut QueryExecutor,
    console: &mut Console<'_>
) -> Result<Basket, HandlerError> {
    let mut basket = Basket::new();

    loop {
        let item_name = console.ask("Enter item name (or type 'done' to finish ordering): ")?
                            .trim()
                            .to_string();

        if item_name.eq_ignore_ascii_case(DONE_KEYWORD) {
            return Ok(basket)
        }

        let Some(quantity) = ask_quantity(console)? else {
            continue
        };

        let Some(price) = item_price(executor, &item_name)? else {
            console.say("System was unable to locate item or price, please check input and try again!")?;
            continue
        };

        match basket.add(item_name.clone(), quantity) {
            Ok(()) => tracing::debug!("Added {} x{} at {}", item_name, quantity, price),
            Err(message) => console.say(message)?
        }
    }
}

fn ask_quantity(console: &mut Console<'_>) -> Result<Option<i32>, ConsoleError> {
    let quantity = ask_number::<i32>(
        console,
        "Enter desired quantity: ",
        "Invalid quantity! Please enter a whole number."
    )?;

    match quantity {
        Some(quantity) if quantity <= 0 => {
            console.say("Quantity must be a positive whole number.")?;
            Ok(None)
        },
        other => Ok(other)
    }
}
