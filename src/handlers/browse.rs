use crate::{
    console::Console,
    db_interaction::{item::print_menu, MenuFilter, SortOrder},
    domain::Price,
    executor::QueryExecutor,
    handlers::HandlerError,
    session::Session
};

#[tracing::instrument(
    "Browsing the menu",
    skip_all
)]
pub fn view_menu(
    executor: &mut QueryExecutor,
    console: &mut Console<'_>,
    _session: &mut Session
) -> Result<(), HandlerError> {
    loop {
        console.say("\n---- Browse Menu ----")?;
        console.say("1. View all items")?;
        console.say("2. Filter by item type")?;
        console.say("3. Filter by item price")?;
        console.say("4. Sort by price (ascending)")?;
        console.say("5. Sort by price (descending)")?;
        console.say("6. Go Back")?;

        let filter = match console.read_choice()? {
            1 => MenuFilter::All,
            2 => MenuFilter::ItemType(console.ask("Enter type to filter by: ")?.trim().to_string()),
            3 => match Price::parse(&console.ask("Enter maximum price of item: ")?) {
                Ok(limit) => MenuFilter::MaxPrice(limit),
                Err(message) => {
                    console.say(message)?;
                    continue
                }
            },
            4 => MenuFilter::ByPrice(SortOrder::Ascending),
            5 => MenuFilter::ByPrice(SortOrder::Descending),
            6 => return Ok(()),
            _ => {
                console.say("Invalid choice.")?;
                continue
            }
        };

        if print_menu(executor, &filter, console.output())? == 0 {
            console.say("No items found.")?;
        }
    }
}
