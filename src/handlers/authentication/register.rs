use secrecy::ExposeSecret;

use crate::{
    console::{Console, ConsoleError},
    db_interaction::user::{insert_user, login_exists, UserInsertError},
    domain::{LoginName, Password, PhoneNumber, MAX_LOGIN_LENGTH},
    executor::QueryExecutor,
    handlers::HandlerError
};

// Creates a customer account. Typing `exit` at any prompt abandons it.
#[tracing::instrument(
    "User registration started",
    skip_all
)]
pub fn register(
    executor: &mut QueryExecutor,
    console: &mut Console<'_>
) -> Result<(), HandlerError> {
    console.say("\n---- Create User ----")?;
    console.say("At any prompt, type 'exit' to return to main menu\n")?;

    let Some(login) = ask_login(executor, console)? else {
        return returning_to_menu(console)
    };

    let Some(password) = ask_password(console)? else {
        return returning_to_menu(console)
    };

    let Some(phone_number) = ask_phone_number(console)? else {
        return returning_to_menu(console)
    };

    match insert_user(executor, &login, &password, &phone_number) {
        Ok(()) => {
            tracing::info!("Registered user {}", login);
            console.say("User created successfully!")?;
            console.say("Tip: After reviewing our menu, you can add your favorite items to your profile")?;
            console.say("by selecting the 'Update Profile' option from the main menu.")?;
            Ok(())
        },
        // Someone registered the same login between the check and the insert
        Err(e @ UserInsertError::LoginNotUnique(_)) => {
            console.say(e.to_string())?;
            Ok(())
        },
        Err(e) => Err(anyhow::Error::new(e).into())
    }
}

fn returning_to_menu(console: &mut Console<'_>) -> Result<(), HandlerError> {
    console.say("Returning to main menu...")?;
    Ok(())
}

fn ask_login(
    executor: &mut QueryExecutor,
    console: &mut Console<'_>
) -> Result<Option<LoginName>, HandlerError> {
    loop {
        let prompt = format!("Please enter a username! (Maximum {} characters)", MAX_LOGIN_LENGTH);
        let Some(answer) = console.ask_or_exit(prompt)? else {
            return Ok(None)
        };

        let login = match LoginName::parse(answer) {
            Ok(login) => login,
            Err(message) => {
                console.say(message)?;
                continue
            }
        };

        if login_exists(executor, login.as_str())? {
            console.say("Username already exists! Please choose a different one.")?;
            continue
        }

        return Ok(Some(login))
    }
}

fn ask_password(console: &mut Console<'_>) -> Result<Option<Password>, ConsoleError> {
    loop {
        let Some(answer) = console.ask_or_exit("Enter a password: ")? else {
            return Ok(None)
        };

        let password = match Password::parse(answer) {
            Ok(password) => password,
            Err(message) => {
                console.say(message)?;
                continue
            }
        };

        let Some(confirm_password) = console.ask_or_exit("Confirm your password: ")? else {
            return Ok(None)
        };

        if password.expose_secret() == confirm_password {
            return Ok(Some(password))
        }

        console.say("The passwords do not match, please try again")?;
    }
}

fn ask_phone_number(console: &mut Console<'_>) -> Result<Option<PhoneNumber>, ConsoleError> {
    loop {
        let Some(answer) = console.ask_or_exit("Enter your phone number: ")? else {
            return Ok(None)
        };

        match PhoneNumber::parse(answer) {
            Ok(number) => return Ok(Some(number)),
            Err(message) => console.say(message)?
        }
    }
}
