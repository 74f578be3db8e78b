use crate::{
    console::{Console, ConsoleError},
    domain::{Capability, Role},
    executor::QueryExecutor,
    handlers::{
        admin::{update_user_profile, update_user_role},
        authentication::{login, register},
        browse::view_menu,
        manage_menu::manage_menu,
        order::{
            place_order, update_order_status, view_order_info, view_orders_of_any_user,
            view_own_orders, view_own_recent_orders, view_recent_orders_of_any_user
        },
        profile::{update_profile, view_profile},
        store::view_stores,
        Handler, HandlerError
    },
    session::Session,
    utils::error_chain_message
};

const LOG_OUT_CHOICE: u32 = 20;
const STAFF_BACK_CHOICE: u32 = 9;
const ACCESS_DENIED: &str = "Access Denied: You do not have permission to access this menu.";

pub enum MenuState{
    Unauthenticated,
    Authenticated(Session),
    Exiting
}

enum Label{
    Plain(&'static str),
    // Prefixed with the role's title, e.g. "Manager Access"
    ForRole(&'static str)
}

pub struct Route{
    choice: u32,
    label: Label,
    capability: Option<Capability>,
    handler: Handler
}

impl Route{
    const fn open(choice: u32, label: &'static str, handler: Handler) -> Self {
        Route{ choice, label: Label::Plain(label), capability: None, handler }
    }

    const fn gated(choice: u32, label: &'static str, capability: Capability, handler: Handler) -> Self {
        Route{ choice, label: Label::Plain(label), capability: Some(capability), handler }
    }

    pub fn choice(&self) -> u32 {
        self.choice
    }

    pub fn label(&self, role: Role) -> String {
        match self.label {
            Label::Plain(label) => label.to_string(),
            Label::ForRole(label) => format!("{} {}", role.title(), label)
        }
    }

    pub fn is_allowed(&self, role: Role) -> bool {
        self.capability.map_or(true, |capability| role.allows(capability))
    }
}

pub static USER_ROUTES: [Route; 9] = [
    Route::open(1, "View Profile", view_profile),
    Route::open(2, "Update Profile", update_profile),
    Route::open(3, "View Menu", view_menu),
    Route::open(4, "Place Order", place_order),
    Route::open(5, "View Order History", view_own_orders),
    Route::open(6, "View Recent Orders", view_own_recent_orders),
    Route::open(7, "View Order Information", view_order_info),
    Route::open(8, "View Stores", view_stores),
    Route{
        choice: 9,
        label: Label::ForRole("Access"),
        capability: Some(Capability::StaffMenu),
        handler: staff_menu
    }
];

pub static STAFF_ROUTES: [Route; 6] = [
    Route::gated(1, "View Orders for Any User", Capability::ViewAnyOrders, view_orders_of_any_user),
    Route::gated(2, "View Recent Orders for Any User", Capability::ViewAnyOrders, view_recent_orders_of_any_user),
    Route::gated(3, "Update Order Status", Capability::UpdateOrderStatus, update_order_status),
    Route::gated(4, "Manage Menu Items", Capability::ManageMenu, manage_menu),
    Route::gated(5, "Update User Role", Capability::AdministerUsers, update_user_role),
    Route::gated(6, "Update User Profile", Capability::AdministerUsers, update_user_profile)
];

pub fn visible_routes(routes: &[Route], role: Role) -> impl Iterator<Item = &Route> {
    routes.iter().filter(move |route| route.is_allowed(role))
}

enum Lookup<'r>{
    Allowed(&'r Route),
    Denied,
    Unknown
}

fn lookup(routes: &[Route], choice: u32, role: Role) -> Lookup<'_> {
    match routes.iter().find(|route| route.choice == choice) {
        Some(route) if route.is_allowed(role) => Lookup::Allowed(route),
        Some(_) => Lookup::Denied,
        None => Lookup::Unknown
    }
}

// Drives the menus until the user exits or standard input is closed
pub fn run(
    executor: &mut QueryExecutor,
    console: &mut Console<'_>
) -> Result<(), ConsoleError> {
    let mut state = MenuState::Unauthenticated;

    loop {
        let step = match state {
            MenuState::Unauthenticated => main_menu(executor, console),
            MenuState::Authenticated(session) => user_menu(executor, console, session),
            MenuState::Exiting => return Ok(())
        };

        state = match step {
            Ok(next) => next,
            Err(ConsoleError::InputClosed) => {
                tracing::info!("Standard input closed, exiting");
                MenuState::Exiting
            },
            Err(e) => return Err(e)
        };
    }
}

fn main_menu(
    executor: &mut QueryExecutor,
    console: &mut Console<'_>
) -> Result<MenuState, ConsoleError> {
    console.say("MAIN MENU")?;
    console.say("---------")?;
    console.say("1. Create user")?;
    console.say("2. Log in")?;
    console.say("9. < EXIT")?;

    match console.read_choice()? {
        1 => {
            if let Err(e) = register(executor, console) {
                report(console, e)?;
            }
        },
        2 => match login(executor, console) {
            Ok(Some(session)) => return Ok(MenuState::Authenticated(session)),
            Ok(None) => {},
            Err(e) => report(console, e)?
        },
        9 => return Ok(MenuState::Exiting),
        _ => console.say("Unrecognized choice!")?
    }

    Ok(MenuState::Unauthenticated)
}

fn user_menu(
    executor: &mut QueryExecutor,
    console: &mut Console<'_>,
    mut session: Session
) -> Result<MenuState, ConsoleError> {
    console.say("MAIN MENU")?;
    console.say("---------")?;
    for route in visible_routes(&USER_ROUTES, session.role()) {
        console.say(format!("{}. {}", route.choice, route.label(session.role())))?;
    }
    console.say(".........................")?;
    console.say(format!("{}. Log out", LOG_OUT_CHOICE))?;

    let choice = console.read_choice()?;
    if choice == LOG_OUT_CHOICE {
        tracing::info!("User {} logged out", session.login());
        return Ok(MenuState::Unauthenticated)
    }

    match lookup(&USER_ROUTES, choice, session.role()) {
        Lookup::Allowed(route) => dispatch(route, executor, console, &mut session)?,
        Lookup::Denied => console.say(ACCESS_DENIED)?,
        Lookup::Unknown => console.say("Unrecognized choice!")?
    }

    Ok(MenuState::Authenticated(session))
}

// Loops until "back", or until the session's own role loses staff access
fn staff_menu(
    executor: &mut QueryExecutor,
    console: &mut Console<'_>,
    session: &mut Session
) -> Result<(), HandlerError> {
    while session.can(Capability::StaffMenu) {
        console.say(format!("\n---- {} Menu ----", session.role().title()))?;
        for route in visible_routes(&STAFF_ROUTES, session.role()) {
            console.say(format!("{}. {}", route.choice, route.label(session.role())))?;
        }
        console.say(format!("{}. Back to Main Menu", STAFF_BACK_CHOICE))?;

        let choice = console.read_choice()?;
        if choice == STAFF_BACK_CHOICE {
            return Ok(())
        }

        match lookup(&STAFF_ROUTES, choice, session.role()) {
            Lookup::Allowed(route) => dispatch(route, executor, console, session)?,
            Lookup::Denied => console.say(ACCESS_DENIED)?,
            Lookup::Unknown => console.say("Invalid choice!")?
        }
    }

    Ok(())
}

fn dispatch(
    route: &Route,
    executor: &mut QueryExecutor,
    console: &mut Console<'_>,
    session: &mut Session
) -> Result<(), ConsoleError> {
    match (route.handler)(executor, console, session) {
        Ok(()) => Ok(()),
        Err(e) => report(console, e)
    }
}

// Console failures end the session; anything else is shown and the menu goes on
fn report(console: &mut Console<'_>, error: HandlerError) -> Result<(), ConsoleError> {
    match error {
        HandlerError::Console(e) => Err(e),
        other => {
            tracing::error!(error.cause_chain = ?other, "Menu action failed");
            console.error(error_chain_message(&other))
        }
    }
}
