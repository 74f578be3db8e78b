use crate::{
    console::Console,
    db_interaction::store::print_stores,
    executor::QueryExecutor,
    handlers::HandlerError,
    session::Session
};

pub fn view_stores(
    executor: &mut QueryExecutor,
    console: &mut Console<'_>,
    _session: &mut Session
) -> Result<(), HandlerError> {
    console.say("\n---- Available Stores ----")?;
    let store_count = print_stores(executor, console.output())?;
    console.say(format!("\nTotal stores: {}", store_count))?;

    Ok(())
}
