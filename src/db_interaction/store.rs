use std::io::Write;

use crate::executor::{DatabaseError, QueryExecutor, Statement};

pub fn store_exists(
    executor: &mut QueryExecutor,
    store_id: i32
) -> Result<bool, DatabaseError> {
    let statement = Statement::new("SELECT storeID FROM Store WHERE storeID = $1")
                        .bind(store_id);

    Ok(executor.execute_query(&statement)? > 0)
}

#[tracing::instrument(
    "Printing stores",
    skip_all
)]
pub fn print_stores<W>(
    executor: &mut QueryExecutor,
    out: &mut W
) -> Result<usize, DatabaseError>
where
    W: Write + ?Sized
{
    let statement = Statement::new(
        "SELECT storeID, address, city, state, isOpen, reviewScore \
         FROM Store \
         ORDER BY reviewScore DESC NULLS LAST, storeID"
    );

    executor.execute_query_and_print_result(&statement, out)
}
