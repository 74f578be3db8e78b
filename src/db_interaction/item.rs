use std::{error::Error, fmt::Debug, io::Write};

use diesel::{ExpressionMethods, OptionalExtension, QueryDsl, RunQueryDsl};
use rust_decimal::Decimal;
use thiserror::Error;

use crate::{
    domain::Price,
    executor::{DatabaseError, Param, QueryExecutor, Statement},
    models::MenuItem,
    schema::items,
    utils::error_fmt_chain
};

const MENU_COLUMNS: &str =
    "SELECT itemName AS name, typeOfItem AS type, price, description FROM Items";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder{
    Ascending,
    Descending
}

impl SortOrder{
    fn keyword(&self) -> &'static str {
        match self {
            SortOrder::Ascending => "ASC",
            SortOrder::Descending => "DESC"
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum MenuFilter{
    All,
    ItemType(String),
    MaxPrice(Price),
    ByPrice(SortOrder)
}

impl MenuFilter{
    fn statement(&self) -> Statement {
        match self {
            MenuFilter::All => Statement::new(format!("{} ORDER BY itemName", MENU_COLUMNS)),
            MenuFilter::ItemType(item_type) => Statement::new(format!(
                "{} WHERE TRIM(LOWER(typeOfItem)) = TRIM(LOWER($1)) ORDER BY itemName",
                MENU_COLUMNS
            ))
            .bind(item_type.as_str()),
            MenuFilter::MaxPrice(limit) => Statement::new(format!(
                "{} WHERE price <= $1 ORDER BY price, itemName",
                MENU_COLUMNS
            ))
            .bind(limit.amount()),
            MenuFilter::ByPrice(order) => Statement::new(format!(
                "{} ORDER BY price {}, itemName",
                MENU_COLUMNS,
                order.keyword()
            ))
        }
    }
}

// Columns of Items that can be changed one at a time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemField{
    Ingredients,
    TypeOfItem,
    Price,
    Description
}

impl ItemField{
    fn column(&self) -> &'static str {
        match self {
            ItemField::Ingredients => "ingredients",
            ItemField::TypeOfItem => "typeOfItem",
            ItemField::Price => "price",
            ItemField::Description => "description"
        }
    }
}

#[tracing::instrument(
    "Printing menu items",
    skip(executor, out)
)]
pub fn print_menu<W>(
    executor: &mut QueryExecutor,
    filter: &MenuFilter,
    out: &mut W
) -> Result<usize, DatabaseError>
where
    W: Write + ?Sized
{
    executor.execute_query_and_print_result(&filter.statement(), out)
}

pub fn item_exists(
    executor: &mut QueryExecutor,
    item_name: &str
) -> Result<bool, DatabaseError> {
    let statement = Statement::new("SELECT itemName FROM Items WHERE itemName = $1")
                        .bind(item_name);

    Ok(executor.execute_query(&statement)? > 0)
}

pub fn item_price(
    executor: &mut QueryExecutor,
    item_name: &str
) -> Result<Option<Decimal>, DatabaseError> {
    Ok(items::table
        .select(items::price)
        .filter(items::itemname.eq(item_name))
        .first::<Decimal>(executor.connection())
        .optional()?)
}

pub fn print_item<W>(
    executor: &mut QueryExecutor,
    item_name: &str,
    out: &mut W
) -> Result<usize, DatabaseError>
where
    W: Write + ?Sized
{
    let statement = Statement::new(
        "SELECT itemName, ingredients, typeOfItem, price, description FROM Items WHERE itemName = $1"
    ).bind(item_name);

    executor.execute_query_and_print_result(&statement, out)
}

#[derive(Error)]
pub enum ItemInsertError{
    #[error("Item already exists! Please use update option instead.")]
    AlreadyExists(#[source] diesel::result::Error),
    #[error("Failed to insert into Items table")]
    InsertError(#[from] diesel::result::Error)
}

impl Debug for ItemInsertError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self)?;
        error_fmt_chain(f, &self.source())
    }
}

#[tracing::instrument(
    "Insert a menu item to db",
    skip(executor)
)]
pub fn insert_item(
    executor: &mut QueryExecutor,
    item: MenuItem
) -> Result<(), ItemInsertError> {
    diesel::insert_into(items::table)
        .values(item)
        .execute(executor.connection())
        .map_err(|e| {
            match e {
                diesel::result::Error::DatabaseError(
                    diesel::result::DatabaseErrorKind::UniqueViolation,
                    _
                ) => ItemInsertError::AlreadyExists(e),

                _ => ItemInsertError::InsertError(e)
            }
        })?;

    Ok(())
}

#[tracing::instrument(
    "Updating menu item field",
    skip(executor)
)]
pub fn update_item_field(
    executor: &mut QueryExecutor,
    item_name: &str,
    field: ItemField,
    value: Param
) -> Result<usize, DatabaseError> {
    let statement = Statement::new(format!(
        "UPDATE Items SET {} = $1 WHERE itemName = $2",
        field.column()
    ))
    .bind(value)
    .bind(item_name);

    executor.execute_update(&statement)
}

// Number of order lines naming the item
pub fn count_order_references(
    executor: &mut QueryExecutor,
    item_name: &str
) -> Result<usize, DatabaseError> {
    let statement = Statement::new("SELECT orderID FROM ItemsInOrder WHERE itemName = $1")
                        .bind(item_name);

    executor.execute_query(&statement)
}

#[tracing::instrument(
    "Deleting menu item",
    skip(executor)
)]
pub fn delete_item(
    executor: &mut QueryExecutor,
    item_name: &str
) -> Result<usize, DatabaseError> {
    Ok(diesel::delete(items::table)
        .filter(items::itemname.eq(item_name))
        .execute(executor.connection())?)
}
