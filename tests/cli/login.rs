use crate::helpers::{log_in, TestApp};

#[test]
fn matching_credentials_log_in_and_out(){
    let mut app = TestApp::spawn_app();
    app.add_user("alice", "pizza123", "customer");

    let mut script = log_in("alice", "pizza123");
    script.extend(["20", "9"]);
    let output = app.run_script(&script);

    assert!(output.stdout.contains("Login successful! Welcome, alice"));
    assert!(output.stdout.contains("20. Log out"));
    assert!(output.stderr.is_empty());
}

#[test]
fn wrong_password_is_rejected_until_exit(){
    let mut app = TestApp::spawn_app();
    app.add_user("alice", "pizza123", "customer");

    let output = app.run_script(&["2", "alice", "pizza", "alice", "PIZZA123", "exit", "9"]);

    assert_eq!(output.stdout.matches("Invalid username or password. Please try again.").count(), 2);
    assert!(!output.stdout.contains("Login successful!"));
}

#[test]
fn login_is_case_sensitive_and_never_partial(){
    let mut app = TestApp::spawn_app();
    app.add_user("alice", "pizza123", "customer");

    let output = app.run_script(&["2", "Alice", "pizza123", "ali", "pizza123", " alice", "pizza123", "exit", "9"]);

    assert!(!output.stdout.contains("Login successful!"));
}

#[test]
fn injection_text_does_not_bypass_the_password(){
    let mut app = TestApp::spawn_app();
    app.add_user("alice", "pizza123", "customer");

    let output = app.run_script(&["2", "alice' --", "x", "' OR '1'='1", "' OR '1'='1", "exit", "9"]);

    assert!(!output.stdout.contains("Login successful!"));
    assert_eq!(app.user_count(), 1);
}

#[test]
fn closing_input_mid_prompt_exits_cleanly(){
    let mut app = TestApp::spawn_app();

    let output = app.run_script(&["2", "alice"]);

    assert!(output.stdout.contains("Password: "));
    assert!(output.stderr.is_empty());
}

#[test]
fn unknown_and_non_numeric_choices_are_reported(){
    let mut app = TestApp::spawn_app();

    let output = app.run_script(&["5", "abc", "9"]);

    assert!(output.stdout.contains("Unrecognized choice!"));
    assert!(output.stdout.contains("Your input is invalid!"));
}

#[test]
fn customers_are_not_offered_staff_access(){
    let mut app = TestApp::spawn_app();
    app.add_user("alice", "pizza123", "customer");

    let mut script = log_in("alice", "pizza123");
    script.extend(["9", "20", "9"]);
    let output = app.run_script(&script);

    assert!(!output.stdout.contains("Access\n"));
    assert!(output.stdout.contains("Access Denied: You do not have permission to access this menu."));
}

#[test]
fn staff_menu_entry_is_labelled_with_the_role(){
    let mut app = TestApp::spawn_app();
    app.add_user("boss", "pw", "manager");
    app.add_user("dan", "pw", "driver");

    let mut script = log_in("boss", "pw");
    script.extend(["20"]);
    script.extend(log_in("dan", "pw"));
    script.extend(["9", "9", "20", "9"]);
    let output = app.run_script(&script);

    assert!(output.stdout.contains("9. Manager Access"));
    assert!(output.stdout.contains("9. Driver Access"));
    assert!(output.stdout.contains("---- Driver Menu ----"));
    assert!(!output.stdout.contains("4. Manage Menu Items"));
}

#[test]
fn profile_shows_empty_favorites_and_updates_own_account(){
    let mut app = TestApp::spawn_app();
    app.add_user("alice", "pizza123", "customer");

    let mut script = log_in("alice", "pizza123");
    script.extend([
        "1",
        "2", "1", "", "newpass", "newpass",
        "2", "951-555-0199",
        "3", "  Cheese Pizza, Soda ",
        "4",
        "20", "9"
    ]);
    let output = app.run_script(&script);

    assert!(output.stdout.contains("Username: alice"));
    assert!(output.stdout.contains("Favorite Items: (empty)"));
    assert!(output.stdout.contains("Password cannot be empty."));

    let (password, _, phone_number, favorite_items) = app.user_row("alice");
    assert_eq!(password, "newpass");
    assert_eq!(phone_number.as_deref(), Some("951-555-0199"));
    assert_eq!(favorite_items.as_deref(), Some("Cheese Pizza, Soda"));
}
