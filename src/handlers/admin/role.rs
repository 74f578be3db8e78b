use crate::{
    console::Console,
    db_interaction::user::{get_user_profile, update_user_field, UserField},
    domain::Role,
    executor::QueryExecutor,
    handlers::HandlerError,
    session::Session
};

#[tracing::instrument(
    "Updating user role",
    skip_all,
    fields(login = %session.login())
)]
pub fn update_user_role(
    executor: &mut QueryExecutor,
    console: &mut Console<'_>,
    session: &mut Session
) -> Result<(), HandlerError> {
    console.say("\n---- Update User Role ----")?;

    let target = console.ask("Enter username to change role: ")?.trim().to_string();

    let Some(profile) = get_user_profile(executor, &target)? else {
        console.say("User not found!")?;
        return Ok(())
    };

    console.say(format!("Current role for {}: {}", target, profile.role))?;
    console.say("Select new role:")?;
    for (position, role) in Role::ALL.iter().enumerate() {
        console.say(format!("{}. {}", position + 1, role.title()))?;
    }

    let Some(new_role) = Role::from_choice(console.read_choice()?) else {
        console.say("Invalid choice!")?;
        return Ok(())
    };

    if new_role.as_str() == profile.role {
        console.say("User already has this role. No change needed.")?;
        return Ok(())
    }

    update_user_field(executor, &target, UserField::Role, new_role.as_str())?;
    if session.is(&target) {
        session.set_role(new_role);
    }

    tracing::info!("{} changed role of {} from {} to {}", session.login(), target, profile.role, new_role);
    console.say(format!("{} has been updated to role: {}", target, new_role))?;

    Ok(())
}
