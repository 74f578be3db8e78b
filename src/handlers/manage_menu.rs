use crate::{
    console::Console,
    db_interaction::{
        item::{count_order_references, delete_item, insert_item, item_exists, print_item, update_item_field},
        ItemField, ItemInsertError
    },
    domain::Price,
    executor::{Param, QueryExecutor},
    handlers::HandlerError,
    models::MenuItem,
    session::Session
};

// Widths of Items.itemName and Items.typeOfItem
const MAX_ITEM_NAME_LENGTH: usize = 50;
const MAX_ITEM_TYPE_LENGTH: usize = 40;

#[tracing::instrument(
    "Managing menu items",
    skip_all,
    fields(login = %session.login())
)]
pub fn manage_menu(
    executor: &mut QueryExecutor,
    console: &mut Console<'_>,
    session: &mut Session
) -> Result<(), HandlerError> {
    loop {
        console.say("\n---- Menu Management ----")?;
        console.say("1. Add new item")?;
        console.say("2. Update existing item")?;
        console.say("3. Delete item")?;
        console.say("4. Back to previous menu")?;

        match console.read_choice()? {
            1 => add_menu_item(executor, console)?,
            2 => update_menu_item(executor, console)?,
            3 => delete_menu_item(executor, console)?,
            4 => return Ok(()),
            _ => console.say("Invalid choice!")?
        }
    }
}

fn optional_text(value: String) -> Option<String> {
    let value = value.trim();
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

fn add_menu_item(
    executor: &mut QueryExecutor,
    console: &mut Console<'_>
) -> Result<(), HandlerError> {
    console.say("\n---- Add New Menu Item ----")?;

    let item_name = console.ask("Enter item name: ")?.trim().to_string();
    if item_name.is_empty() {
        console.say("Item name cannot be empty.")?;
        return Ok(())
    }
    if item_name.chars().count() > MAX_ITEM_NAME_LENGTH {
        console.say(format!("Item name cannot be over {} characters.", MAX_ITEM_NAME_LENGTH))?;
        return Ok(())
    }

    if item_exists(executor, &item_name)? {
        console.say("Item already exists! Please use update option instead.")?;
        return Ok(())
    }

    let ingredients = console.ask("Enter ingredients (comma separated): ")?;
    let type_of_item = console.ask("Enter type of item (e.g., pizza, drink, dessert): ")?;
    if type_of_item.trim().chars().count() > MAX_ITEM_TYPE_LENGTH {
        console.say(format!("Type of item cannot be over {} characters.", MAX_ITEM_TYPE_LENGTH))?;
        return Ok(())
    }

    let price = match Price::parse(&console.ask("Enter price: ")?) {
        Ok(price) => price,
        Err(message) => {
            console.say(message)?;
            return Ok(())
        }
    };

    let description = console.ask("Enter description: ")?;

    let item = MenuItem{
        itemname: item_name,
        ingredients: optional_text(ingredients),
        typeofitem: optional_text(type_of_item),
        price: price.amount(),
        description: optional_text(description)
    };

    match insert_item(executor, item) {
        Ok(()) => console.say("Menu item added successfully!")?,
        Err(e @ ItemInsertError::AlreadyExists(_)) => console.say(e.to_string())?,
        Err(e) => return Err(anyhow::Error::new(e).into())
    }

    Ok(())
}

fn update_menu_item(
    executor: &mut QueryExecutor,
    console: &mut Console<'_>
) -> Result<(), HandlerError> {
    console.say("\n---- Update Menu Item ----")?;

    let item_name = console.ask("Enter item name to update: ")?.trim().to_string();

    console.say("\nCurrent item details:")?;
    if print_item(executor, &item_name, console.output())? == 0 {
        console.say("Item not found!")?;
        return Ok(())
    }

    console.say("\nSelect field to update:")?;
    console.say("1. Ingredients")?;
    console.say("2. Type of item")?;
    console.say("3. Price")?;
    console.say("4. Description")?;

    let (field, value) = match console.read_choice()? {
        1 => (ItemField::Ingredients, Param::from(console.ask("Enter new ingredients: ")?.trim())),
        2 => {
            let item_type = console.ask("Enter new type: ")?.trim().to_string();
            if item_type.chars().count() > MAX_ITEM_TYPE_LENGTH {
                console.say(format!("Type of item cannot be over {} characters.", MAX_ITEM_TYPE_LENGTH))?;
                return Ok(())
            }
            (ItemField::TypeOfItem, Param::from(item_type))
        },
        3 => match Price::parse(&console.ask("Enter new price: ")?) {
            Ok(price) => (ItemField::Price, Param::from(price.amount())),
            Err(message) => {
                console.say(message)?;
                return Ok(())
            }
        },
        4 => (ItemField::Description, Param::from(console.ask("Enter new description: ")?.trim())),
        _ => {
            console.say("Invalid choice!")?;
            return Ok(())
        }
    };

    update_item_field(executor, &item_name, field, value)?;
    console.say("Menu item updated successfully!")?;

    Ok(())
}

// Order lines are left untouched; when any exist the deletion must be confirmed
fn delete_menu_item(
    executor: &mut QueryExecutor,
    console: &mut Console<'_>
) -> Result<(), HandlerError> {
    console.say("\n---- Delete Menu Item ----")?;

    let item_name = console.ask("Enter item name to delete: ")?.trim().to_string();

    if !item_exists(executor, &item_name)? {
        console.say("Item not found!")?;
        return Ok(())
    }

    let order_count = count_order_references(executor, &item_name)?;
    if order_count > 0 {
        console.say(format!("Warning: This item is used in {} orders.", order_count))?;
        if !console.confirm("Deleting this item will affect order history. Continue?")? {
            console.say("Deletion cancelled.")?;
            return Ok(())
        }
    }

    delete_item(executor, &item_name)?;
    tracing::info!("Deleted menu item {}", item_name);
    console.say("Menu item deleted successfully!")?;

    Ok(())
}
