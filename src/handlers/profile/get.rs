use crate::{
    console::Console,
    db_interaction::user::get_user_profile,
    executor::QueryExecutor,
    handlers::HandlerError,
    session::Session
};

#[tracing::instrument(
    "Viewing own profile",
    skip_all
)]
pub fn view_profile(
    executor: &mut QueryExecutor,
    console: &mut Console<'_>,
    session: &mut Session
) -> Result<(), HandlerError> {
    let Some(profile) = get_user_profile(executor, session.login().as_str())? else {
        console.say("Error: User profile not found.")?;
        return Ok(())
    };

    let favorite_items = profile.favorite_items
        .filter(|items| !items.trim().is_empty())
        .unwrap_or_else(|| "(empty)".to_string());

    console.say("\n---- Profile Info ----")?;
    console.say(format!("Username: {}", profile.login))?;
    console.say(format!("Role: {}", profile.role))?;
    console.say(format!("Phone Number: {}", profile.phone_number.unwrap_or_default()))?;
    console.say(format!("Favorite Items: {}", favorite_items))?;

    Ok(())
}
