use std::thread;

use claim::{assert_err, assert_ok};
use diesel::{ExpressionMethods, QueryDsl, RunQueryDsl};
use pizzastore::{
    db_interaction::{order::create_order, CreateOrderError},
    domain::{Basket, LoginName},
    schema::{foodorder, itemsinorder}
};
use rust_decimal::Decimal;

use crate::helpers::{log_in, TestApp};

fn app_with_menu() -> TestApp{
    let mut app = TestApp::spawn_app();
    app.add_user("alice", "pw", "customer");
    app.add_user("bob", "pw", "customer");
    app.add_store(1, "4.5");
    app.add_store(2, "3.9");
    app.add_item("Pepperoni", "pizza", "9.99");
    app.add_item("Soda", "drink", "1.99");
    app
}

fn as_alice<'a>(steps: &[&'a str]) -> Vec<&'a str>{
    let mut script = log_in("alice", "pw");
    script.extend_from_slice(steps);
    script.extend(["20", "9"]);
    script
}

#[test]
fn placing_an_order_stores_header_lines_and_exact_total(){
    let mut app = app_with_menu();

    let output = app.run_script(&as_alice(&["4", "1", "Pepperoni", "2", "Soda", "1", "done"]));

    assert!(output.stdout.contains("Order placed successfully!"));
    assert!(output.stdout.contains("Order ID: 1"));
    assert!(output.stdout.contains("Total Price: $21.97"));
    assert!(output.stdout.contains("- Pepperoni x2"));

    let (login, total, status) = foodorder::table
        .select((foodorder::login, foodorder::totalprice, foodorder::orderstatus))
        .first::<(String, Decimal, String)>(app.conn())
        .unwrap();
    assert_eq!(login, "alice");
    assert_eq!(total, Decimal::new(2197, 2));
    assert_eq!(status, "Pending");
    assert_eq!(app.order_line_count(), 2);
}

#[test]
fn new_order_id_is_one_more_than_the_largest(){
    let mut app = app_with_menu();
    app.add_order(7, "bob", 1, "Soda", 1);

    let output = app.run_script(&as_alice(&["4", "2", "Soda", "1", "done"]));

    assert!(output.stdout.contains("Order ID: 8"));
    assert_eq!(app.order_ids(), vec![7, 8]);
}

#[test]
fn unknown_store_is_asked_again_and_exit_cancels(){
    let mut app = app_with_menu();

    let output = app.run_script(&as_alice(&["4", "99", "abc", "exit"]));

    assert!(output.stdout.contains("Store ID not found. Please enter a valid store."));
    assert!(output.stdout.contains("Invalid Store ID! Please enter a numeric value."));
    assert!(output.stdout.contains("Order cancelled."));
    assert!(app.order_ids().is_empty());
}

#[test]
fn empty_basket_cancels_the_order(){
    let mut app = app_with_menu();

    let output = app.run_script(&as_alice(&["4", "1", "done"]));

    assert!(output.stdout.contains("Order cancelled. No items were selected."));
    assert!(app.order_ids().is_empty());
}

#[test]
fn bad_lines_are_rejected_one_at_a_time(){
    let mut app = app_with_menu();

    let output = app.run_script(&as_alice(&[
        "4", "1",
        "Calzone", "1",
        "Soda", "0",
        "Soda", "two",
        "Soda", "1",
        "DONE"
    ]));

    assert!(output.stdout.contains("System was unable to locate item or price"));
    assert!(output.stdout.contains("Quantity must be a positive whole number."));
    assert!(output.stdout.contains("Invalid quantity! Please enter a whole number."));
    assert!(output.stdout.contains("Total Price: $1.99"));
    assert_eq!(app.order_line_count(), 1);
}

#[test]
fn repeated_items_are_merged_into_one_line(){
    let mut app = app_with_menu();

    app.run_script(&as_alice(&["4", "1", "Soda", "1", "Soda", "2", "done"]));

    let quantity = itemsinorder::table
        .filter(itemsinorder::itemname.eq("Soda"))
        .select(itemsinorder::quantity)
        .first::<i32>(app.conn())
        .unwrap();
    assert_eq!(quantity, 3);
    assert_eq!(app.order_line_count(), 1);
}

#[test]
fn unknown_item_aborts_the_whole_order(){
    let mut app = app_with_menu();
    let login = LoginName::parse("alice".to_string()).unwrap();
    let mut basket = Basket::new();
    basket.add("Soda".to_string(), 1).unwrap();
    basket.add("Calzone".to_string(), 1).unwrap();

    let result = create_order(&mut app.executor, &login, 1, &basket);

    assert!(matches!(assert_err!(result), CreateOrderError::ItemNotFound(name) if name == "Calzone"));
    assert!(app.order_ids().is_empty());
    assert_eq!(app.order_line_count(), 0);
}

#[test]
fn concurrent_clients_never_share_an_order_id(){
    let app = app_with_menu();

    let workers: Vec<_> = (0..4)
        .map(|_| {
            let mut executor = app.connect();
            thread::spawn(move || {
                let login = LoginName::parse("bob".to_string()).unwrap();
                let mut basket = Basket::new();
                basket.add("Soda".to_string(), 1).unwrap();

                (0..5)
                    .map(|_| assert_ok!(create_order(&mut executor, &login, 2, &basket)).order_id)
                    .collect::<Vec<_>>()
            })
        })
        .collect();

    let mut ids: Vec<i32> = workers.into_iter()
        .flat_map(|worker| worker.join().unwrap())
        .collect();
    ids.sort();

    assert_eq!(ids, (1..=20).collect::<Vec<_>>());
}

#[test]
fn history_lists_own_orders_and_recent_keeps_five(){
    let mut app = app_with_menu();
    for order_id in 1..=7 {
        app.add_order(order_id, "alice", 1, "Soda", 1);
    }
    app.add_order(8, "bob", 1, "Soda", 1);

    let output = app.run_script(&as_alice(&["5", "6"]));

    assert!(output.stdout.contains("Found 7 orders for user: alice"));
    assert!(output.stdout.contains("Found 5 recent orders for user: alice"));
}

#[test]
fn history_without_orders_says_so(){
    let mut app = app_with_menu();

    let output = app.run_script(&as_alice(&["5", "6"]));

    assert!(output.stdout.contains("No orders found for user: alice"));
    assert!(output.stdout.contains("No recent orders found for user: alice"));
}

#[test]
fn customers_only_see_details_of_their_own_orders(){
    let mut app = app_with_menu();
    app.add_order(1, "alice", 1, "Soda", 2);
    app.add_order(2, "bob", 1, "Soda", 1);

    let output = app.run_script(&as_alice(&["7", "1", "7", "2", "7", "3", "7", "x"]));

    assert!(output.stdout.contains("---- Items in Order ----"));
    assert!(output.stdout.contains("Soda\t2\t1.99\t3.98\t"));
    assert!(output.stdout.contains("You don't have permission to view this order!"));
    assert!(output.stdout.contains("Order not found!"));
    assert!(output.stdout.contains("Invalid Order ID! Please enter a numeric value."));
}

#[test]
fn drivers_see_any_order_and_update_its_status(){
    let mut app = app_with_menu();
    app.add_user("dan", "pw", "driver");
    app.add_order(1, "alice", 1, "Soda", 1);

    let mut script = log_in("dan", "pw");
    script.extend(["7", "1", "9", "1", "alice", "3", "1", "4", "4", "9", "20", "9"]);
    let output = app.run_script(&script);

    assert!(!output.stdout.contains("You don't have permission to view this order!"));
    assert!(output.stdout.contains("Found 1 orders for user: alice"));
    assert!(output.stdout.contains("Current status: Pending"));
    assert!(output.stdout.contains("Order status updated successfully!"));
    assert!(output.stdout.contains("Access Denied"));

    let status = foodorder::table
        .find(1)
        .select(foodorder::orderstatus)
        .first::<String>(app.conn())
        .unwrap();
    assert_eq!(status, "Out for Delivery");
}

#[test]
fn unlisted_stored_status_is_shown_and_can_be_replaced(){
    let mut app = app_with_menu();
    app.add_user("dan", "pw", "driver");
    app.add_order(1, "alice", 1, "Soda", 1);
    app.add_order(2, "alice", 1, "Soda", 1);
    diesel::update(foodorder::table.find(1))
        .set(foodorder::orderstatus.eq("Baking"))
        .execute(app.conn())
        .unwrap();

    let mut script = log_in("dan", "pw");
    script.extend(["9", "3", "1", "5", "3", "2", "1", "9", "20", "9"]);
    let output = app.run_script(&script);

    assert!(output.stdout.contains("Current status: Baking"));
    assert!(output.stdout.contains("Current status: Pending"));
    assert!(output.stdout.contains("Order already has this status. No change needed."));
    assert!(output.stderr.is_empty());

    let statuses = foodorder::table
        .order(foodorder::orderid)
        .select(foodorder::orderstatus)
        .load::<String>(app.conn())
        .unwrap();
    assert_eq!(statuses, vec!["Delivered", "Pending"]);
}
