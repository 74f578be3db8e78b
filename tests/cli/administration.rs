use diesel::{ExpressionMethods, QueryDsl, RunQueryDsl};
use pizzastore::schema::foodorder;

use crate::helpers::{log_in, TestApp};

fn app_with_users() -> TestApp{
    let mut app = TestApp::spawn_app();
    app.add_user("alice", "pw", "customer");
    app.add_user("carol", "pw", "customer");
    app.add_user("boss", "pw", "manager");
    app.add_store(1, "4.5");
    app.add_item("Soda", "drink", "1.99");
    app
}

fn as_boss<'a>(steps: &[&'a str]) -> Vec<&'a str>{
    let mut script = log_in("boss", "pw");
    script.extend_from_slice(steps);
    script.extend(["20", "9"]);
    script
}

#[test]
fn managers_change_roles(){
    let mut app = app_with_users();

    let output = app.run_script(&as_boss(&["9", "5", "alice", "2", "9"]));

    assert!(output.stdout.contains("Current role for alice: customer"));
    assert!(output.stdout.contains("alice has been updated to role: driver"));
    assert_eq!(app.user_row("alice").1, "driver");
}

#[test]
fn unchanged_role_is_a_no_op(){
    let mut app = app_with_users();

    let output = app.run_script(&as_boss(&["9", "5", "alice", "1", "5", "nobody", "9"]));

    assert!(output.stdout.contains("User already has this role. No change needed."));
    assert!(output.stdout.contains("User not found!"));
    assert_eq!(app.user_row("alice").1, "customer");
}

#[test]
fn demoting_yourself_takes_effect_in_the_session(){
    let mut app = app_with_users();

    let output = app.run_script(&as_boss(&["9", "5", "boss", "1", "9"]));

    assert!(output.stdout.contains("boss has been updated to role: customer"));
    assert!(output.stdout.contains("Access Denied: You do not have permission to access this menu."));
    assert_eq!(app.user_row("boss").1, "customer");
}

#[test]
fn renaming_a_user_moves_their_orders(){
    let mut app = app_with_users();
    app.add_order(1, "alice", 1, "Soda", 1);

    let output = app.run_script(&as_boss(&["9", "6", "alice", "1", "alicia", "9"]));

    assert!(output.stdout.contains("Username updated successfully from 'alice' to 'alicia'"));
    assert!(!output.stdout.contains("password"));
    assert_eq!(app.user_row("alicia").1, "customer");

    let owner = foodorder::table
        .filter(foodorder::orderid.eq(1))
        .select(foodorder::login)
        .first::<String>(app.conn())
        .unwrap();
    assert_eq!(owner, "alicia");
}

#[test]
fn renaming_onto_a_taken_login_is_refused(){
    let mut app = app_with_users();

    let output = app.run_script(&as_boss(&["9", "6", "alice", "1", "carol", "9"]));

    assert!(output.stdout.contains("Username already exists!"));
    assert_eq!(app.user_count(), 3);
    assert_eq!(app.user_row("alice").1, "customer");
}

#[test]
fn renaming_yourself_renames_the_session(){
    let mut app = app_with_users();

    let output = app.run_script(&as_boss(&["9", "6", "boss", "1", "chief", "9", "1"]));

    assert!(output.stdout.contains("Username: chief"));
}

#[test]
fn managers_reset_password_phone_and_favorites(){
    let mut app = app_with_users();

    let output = app.run_script(&as_boss(&[
        "9",
        "6", "alice", "2", "fresh", "fresh",
        "6", "alice", "3", "951-555-0142",
        "6", "alice", "4", "Soda",
        "6", "nobody",
        "9"
    ]));

    assert!(output.stdout.contains("Password updated successfully for user: alice"));
    assert!(output.stdout.contains("User not found!"));

    let (password, _, phone_number, favorite_items) = app.user_row("alice");
    assert_eq!(password, "fresh");
    assert_eq!(phone_number.as_deref(), Some("951-555-0142"));
    assert_eq!(favorite_items.as_deref(), Some("Soda"));
}

#[test]
fn drivers_cannot_reach_manager_entries(){
    let mut app = app_with_users();
    app.add_user("dan", "pw", "driver");

    let mut script = log_in("dan", "pw");
    script.extend(["9", "4", "5", "6", "9", "20", "9"]);
    let output = app.run_script(&script);

    assert_eq!(
        output.stdout.matches("Access Denied: You do not have permission to access this menu.").count(),
        3
    );
    assert!(!output.stdout.contains("Enter username to change role"));
    assert_eq!(app.user_row("alice").1, "customer");
    assert_eq!(app.item_price("Soda").map(|price| price.to_string()).as_deref(), Some("1.99"));
}

#[test]
fn over_long_password_and_phone_are_asked_again(){
    let mut app = app_with_users();
    let long_password = "p".repeat(31);

    let output = app.run_script(&as_boss(&[
        "9",
        "6", "alice", "2", &long_password, "fresh", "fresh",
        "6", "alice", "3", "+1 951 555 0101 ext. 12345", "951-555-0142",
        "9"
    ]));

    assert!(output.stdout.contains("Password cannot be over 30 characters."));
    assert!(output.stdout.contains("Phone number cannot be over 20 characters."));
    assert!(output.stderr.is_empty());

    let (password, _, phone_number, _) = app.user_row("alice");
    assert_eq!(password, "fresh");
    assert_eq!(phone_number.as_deref(), Some("951-555-0142"));
}
