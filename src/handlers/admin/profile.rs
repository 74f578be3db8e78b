use secrecy::ExposeSecret;

use crate::{
    console::Console,
    db_interaction::{
        user::{login_exists, print_user_details, rename_user, update_user_field},
        RenameUserError, UserField
    },
    domain::LoginName,
    executor::QueryExecutor,
    handlers::{
        profile::{ask_new_password, ask_new_phone_number},
        HandlerError
    },
    session::Session
};

// Lets a manager change any account, their own included
#[tracing::instrument(
    "Updating profile of another user",
    skip_all,
    fields(login = %session.login())
)]
pub fn update_user_profile(
    executor: &mut QueryExecutor,
    console: &mut Console<'_>,
    session: &mut Session
) -> Result<(), HandlerError> {
    console.say("\n---- Update User Profile ----")?;

    let target = console.ask("Enter username to update profile: ")?.trim().to_string();

    console.say("\nCurrent user details:")?;
    if print_user_details(executor, &target, console.output())? == 0 {
        console.say("User not found!")?;
        return Ok(())
    }

    console.say("\nSelect field to update:")?;
    console.say("1. Username")?;
    console.say("2. Password")?;
    console.say("3. Phone Number")?;
    console.say("4. Favorite Items")?;
    console.say("5. Go Back")?;

    match console.read_choice()? {
        1 => change_login(executor, console, session, &target)?,
        2 => {
            let password = ask_new_password(console)?;
            update_user_field(executor, &target, UserField::Password, password.expose_secret())?;
            console.say(format!("Password updated successfully for user: {}", target))?;
        },
        3 => {
            let number = ask_new_phone_number(console)?;
            update_user_field(executor, &target, UserField::PhoneNumber, &number.inner())?;
            console.say(format!("Phone number updated successfully for user: {}", target))?;
        },
        4 => {
            let favorites = console.ask("Enter new favorite items: ")?;
            update_user_field(executor, &target, UserField::FavoriteItems, favorites.trim())?;
            console.say(format!("Favorite items updated successfully for user: {}", target))?;
        },
        5 => {},
        _ => console.say("Invalid choice!")?
    }

    Ok(())
}

fn change_login(
    executor: &mut QueryExecutor,
    console: &mut Console<'_>,
    session: &mut Session,
    target: &str
) -> Result<(), HandlerError> {
    let new_login = match LoginName::parse(console.ask("Enter new username: ")?) {
        Ok(login) => login,
        Err(message) => {
            console.say(message)?;
            return Ok(())
        }
    };

    if login_exists(executor, new_login.as_str())? {
        console.say("Username already exists! Please choose a different username.")?;
        return Ok(())
    }

    match rename_user(executor, target, &new_login) {
        Ok(()) => {
            console.say(format!("Username updated successfully from '{}' to '{}'", target, new_login))?;
            if session.is(target) {
                session.rename(new_login);
            }
            Ok(())
        },
        Err(e @ (RenameUserError::LoginNotUnique(_) | RenameUserError::UserNotFound)) => {
            console.say(e.to_string())?;
            Ok(())
        },
        Err(e) => Err(anyhow::Error::new(e).into())
    }
}
