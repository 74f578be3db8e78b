use std::{collections::HashMap, error::Error, fmt::Debug, io::Write};

use chrono::Utc;
use diesel::{
    sql_types::{Integer, Numeric, Text, Timestamptz},
    ExpressionMethods, OptionalExtension, QueryDsl, QueryableByName, RunQueryDsl
};
use rust_decimal::Decimal;
use thiserror::Error;

use crate::{
    domain::{total_price, Basket, LoginName, OrderLine, OrderStatus},
    executor::{DatabaseError, QueryExecutor, Statement},
    models::OrderLineModel,
    schema::{items, itemsinorder, store},
    utils::error_fmt_chain
};

// Locked so that concurrent clients cannot compute the same next id
const LOCK_ORDERS: &str = "LOCK TABLE FoodOrder IN SHARE ROW EXCLUSIVE MODE";

const INSERT_NEXT_ORDER: &str = "\
    INSERT INTO FoodOrder (orderID, login, storeID, totalPrice, orderTimestamp, orderStatus) \
    SELECT COALESCE(MAX(orderID), 0) + 1, $1, $2, $3, $4, $5 FROM FoodOrder \
    RETURNING orderID";

const ORDER_SUMMARY_COLUMNS: &str = "\
    SELECT o.orderID, o.totalPrice, o.orderTimestamp, o.orderStatus, s.storeID, s.address \
    FROM FoodOrder o JOIN Store s ON o.storeID = s.storeID";

#[derive(QueryableByName)]
struct InsertedOrder{
    #[diesel(sql_type = Integer)]
    orderid: i32
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlacedOrder{
    pub order_id: i32,
    pub store_id: i32,
    pub total_price: Decimal,
    pub lines: Vec<OrderLine>
}

// Error associated with placing an order and its line items
#[derive(Error)]
pub enum CreateOrderError{
    #[error("Order cancelled. No items were selected.")]
    EmptyBasket,
    #[error("Store ID {0} not found.")]
    StoreNotFound(i32),
    #[error("Item {0} is no longer on the menu.")]
    ItemNotFound(String),
    #[error("Failed to run query")]
    RunQueryError(#[from] diesel::result::Error)
}

impl Debug for CreateOrderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self)?;
        error_fmt_chain(f, &self.source())
    }
}

#[tracing::instrument(
    "Creating order and its line items",
    skip(executor, basket),
    fields(lines = basket.lines().len())
)]
pub fn create_order(
    executor: &mut QueryExecutor,
    login: &LoginName,
    store_id: i32,
    basket: &Basket
) -> Result<PlacedOrder, CreateOrderError> {
    if basket.is_empty() {
        return Err(CreateOrderError::EmptyBasket)
    }

    executor.transaction::<PlacedOrder, CreateOrderError, _>(|conn| {
        let found_store = store::table
            .find(store_id)
            .select(store::storeid)
            .first::<i32>(conn)
            .optional()?;

        if found_store.is_none() {
            return Err(CreateOrderError::StoreNotFound(store_id))
        }

        // Prices are read inside the transaction so the total matches the lines
        let prices: HashMap<String, Decimal> = items::table
            .filter(items::itemname.eq_any(basket.item_names()))
            .select((items::itemname, items::price))
            .load::<(String, Decimal)>(conn)?
            .into_iter()
            .collect();

        let total = total_price(basket.lines(), |name| prices.get(name).copied())
                        .map_err(CreateOrderError::ItemNotFound)?;

        diesel::sql_query(LOCK_ORDERS).execute(conn)?;

        let inserted = diesel::sql_query(INSERT_NEXT_ORDER)
            .bind::<Text, _>(login.as_str().to_string())
            .bind::<Integer, _>(store_id)
            .bind::<Numeric, _>(total)
            .bind::<Timestamptz, _>(Utc::now())
            .bind::<Text, _>(OrderStatus::Pending.as_str())
            .get_result::<InsertedOrder>(conn)?;

        let line_models: Vec<OrderLineModel> = basket.lines()
            .iter()
            .map(|line| OrderLineModel{
                orderid: inserted.orderid,
                itemname: line.item_name.clone(),
                quantity: line.quantity
            })
            .collect();

        diesel::insert_into(itemsinorder::table)
            .values(&line_models)
            .execute(conn)?;

        Ok(PlacedOrder{
            order_id: inserted.orderid,
            store_id,
            total_price: total,
            lines: basket.lines().to_vec()
        })
    })
}

// Orders placed by `login`, newest first, optionally only the latest `limit`
#[tracing::instrument(
    "Printing orders of user",
    skip(executor, out)
)]
pub fn print_orders_of<W>(
    executor: &mut QueryExecutor,
    login: &str,
    limit: Option<i32>,
    out: &mut W
) -> Result<usize, DatabaseError>
where
    W: Write + ?Sized
{
    let statement = match limit {
        Some(limit) => Statement::new(format!(
            "{} WHERE o.login = $1 ORDER BY o.orderTimestamp DESC, o.orderID DESC LIMIT $2",
            ORDER_SUMMARY_COLUMNS
        ))
        .bind(login)
        .bind(limit),
        None => Statement::new(format!(
            "{} WHERE o.login = $1 ORDER BY o.orderTimestamp DESC, o.orderID DESC",
            ORDER_SUMMARY_COLUMNS
        ))
        .bind(login)
    };

    executor.execute_query_and_print_result(&statement, out)
}

pub fn order_owner(
    executor: &mut QueryExecutor,
    order_id: i32
) -> Result<Option<String>, DatabaseError> {
    let statement = Statement::new("SELECT login FROM FoodOrder WHERE orderID = $1")
                        .bind(order_id);

    Ok(first_value(executor.execute_query_and_return_result(&statement)?))
}

// Status column as stored; rows written by other clients may hold values outside the menu
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordedStatus{
    Known(OrderStatus),
    Unrecognized(String)
}

impl RecordedStatus{
    fn parse(raw: &str) -> RecordedStatus {
        match raw.parse::<OrderStatus>() {
            Ok(status) => RecordedStatus::Known(status),
            Err(e) => {
                tracing::warn!("{}", e);
                RecordedStatus::Unrecognized(raw.trim().to_string())
            }
        }
    }
}

impl std::fmt::Display for RecordedStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecordedStatus::Known(status) => std::fmt::Display::fmt(status, f),
            RecordedStatus::Unrecognized(raw) => f.write_str(raw)
        }
    }
}

pub fn order_status(
    executor: &mut QueryExecutor,
    order_id: i32
) -> Result<Option<RecordedStatus>, DatabaseError> {
    let statement = Statement::new("SELECT orderStatus FROM FoodOrder WHERE orderID = $1")
                        .bind(order_id);

    Ok(first_value(executor.execute_query_and_return_result(&statement)?)
        .map(|status| RecordedStatus::parse(&status)))
}

fn first_value(rows: Vec<Vec<Option<String>>>) -> Option<String> {
    rows.into_iter().next()?.into_iter().next().flatten()
}

// Order header with its store, then one line per item with its subtotal
pub fn print_order_details<W>(
    executor: &mut QueryExecutor,
    order_id: i32,
    out: &mut W
) -> Result<usize, DatabaseError>
where
    W: Write + ?Sized
{
    let header = Statement::new(
        "SELECT o.orderID, o.login, o.totalPrice, o.orderTimestamp, o.orderStatus, \
                s.storeID, s.address, s.city, s.state \
         FROM FoodOrder o JOIN Store s ON o.storeID = s.storeID \
         WHERE o.orderID = $1"
    ).bind(order_id);

    let lines = Statement::new(
        "SELECT io.itemName, io.quantity, i.price, (i.price * io.quantity) AS subtotal \
         FROM ItemsInOrder io LEFT JOIN Items i ON io.itemName = i.itemName \
         WHERE io.orderID = $1 \
         ORDER BY io.itemName"
    ).bind(order_id);

    writeln!(out, "\n---- Order Information ----")?;
    executor.execute_query_and_print_result(&header, out)?;

    writeln!(out, "\n---- Items in Order ----")?;
    executor.execute_query_and_print_result(&lines, out)
}

#[tracing::instrument(
    "Updating order status",
    skip(executor)
)]
pub fn update_order_status(
    executor: &mut QueryExecutor,
    order_id: i32,
    status: OrderStatus
) -> Result<usize, DatabaseError> {
    let statement = Statement::new("UPDATE FoodOrder SET orderStatus = $1 WHERE orderID = $2")
                        .bind(status.as_str())
                        .bind(order_id);

    executor.execute_update(&statement)
}
