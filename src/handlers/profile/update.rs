use secrecy::ExposeSecret;

use crate::{
    console::{Console, ConsoleError},
    db_interaction::user::{update_user_field, UserField},
    domain::{Password, PhoneNumber},
    executor::QueryExecutor,
    handlers::HandlerError,
    session::Session
};

// Submenu for changing the logged in user's own account
#[tracing::instrument(
    "Updating own profile",
    skip_all
)]
pub fn update_profile(
    executor: &mut QueryExecutor,
    console: &mut Console<'_>,
    session: &mut Session
) -> Result<(), HandlerError> {
    loop {
        console.say("\n---- Update Profile ----")?;
        console.say("1. Update Password")?;
        console.say("2. Update Phone Number")?;
        console.say("3. Update Favorite Items")?;
        console.say("4. Go Back")?;

        match console.read_choice()? {
            1 => {
                let password = ask_new_password(console)?;
                update_user_field(executor, session.login().as_str(), UserField::Password, password.expose_secret())?;
                console.say("Password updated!")?;
            },
            2 => {
                let number = ask_new_phone_number(console)?;
                update_user_field(executor, session.login().as_str(), UserField::PhoneNumber, &number.inner())?;
                console.say("Phone number updated!")?;
            },
            3 => {
                let favorites = console.ask("Enter your new favorite items: ")?;
                update_user_field(executor, session.login().as_str(), UserField::FavoriteItems, favorites.trim())?;
                console.say("Favorite items updated!")?;
            },
            4 => return Ok(()),
            _ => console.say("Invalid choice.")?
        }
    }
}

pub fn ask_new_password(console: &mut Console<'_>) -> Result<Password, ConsoleError> {
    loop {
        let password = match Password::parse(console.ask("Enter the new password: ")?) {
            Ok(password) => password,
            Err(message) => {
                console.say(message)?;
                continue
            }
        };

        let confirm_password = console.ask("Confirm the new password: ")?;
        if password.expose_secret() == confirm_password {
            return Ok(password)
        }

        console.say("The passwords do not match, please try again")?;
    }
}

pub(crate) fn ask_new_phone_number(console: &mut Console<'_>) -> Result<PhoneNumber, ConsoleError> {
    loop {
        match PhoneNumber::parse(console.ask("Enter the new phone number: ")?) {
            Ok(number) => return Ok(number),
            Err(message) => console.say(message)?
        }
    }
}
