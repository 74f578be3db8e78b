use secrecy::SecretString;

use crate::{
    console::Console,
    db_interaction::user::authenticate,
    domain::LoginName,
    executor::QueryExecutor,
    handlers::HandlerError,
    session::Session
};

// Prompts until a login/password pair matches a Users row exactly.
// Typing `exit` as the username gives up and returns None.
#[tracing::instrument(
    "Logging in user",
    skip_all
)]
pub fn login(
    executor: &mut QueryExecutor,
    console: &mut Console<'_>
) -> Result<Option<Session>, HandlerError> {
    loop {
        let Some(entered_login) = console.ask_or_exit("Username: ")? else {
            console.say("Returning to main menu...")?;
            return Ok(None)
        };
        let entered_password = SecretString::from(console.ask("Password: ")?);

        let matched = match LoginName::parse(entered_login.clone()) {
            // Stored logins are never blank or over-long, and never padded
            Ok(login) if login.as_str() == entered_login => {
                authenticate(executor, login.as_str(), &entered_password)?
                    .map(|role| (login, role))
            },
            _ => None
        };

        match matched {
            Some((login, role)) => {
                tracing::info!("User {} logged in as {}", login, role);
                console.say(format!("Login successful! Welcome, {}", login))?;
                return Ok(Some(Session::new(login, role)))
            },
            None => {
                tracing::info!("Credentials did not match");
                console.say("Invalid username or password. Please try again.")?;
            }
        }
    }
}
