use std::str::FromStr;

// Access tier stored per user in `Users.role`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role{
    Customer,
    Driver,
    Manager
}

// Something a menu entry may require of the session's role
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability{
    StaffMenu,
    ViewAnyOrders,
    UpdateOrderStatus,
    ManageMenu,
    AdministerUsers
}

impl Role{
    pub const ALL: [Role; 3] = [Role::Customer, Role::Driver, Role::Manager];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Customer => "customer",
            Role::Driver => "driver",
            Role::Manager => "manager"
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Role::Customer => "Customer",
            Role::Driver => "Driver",
            Role::Manager => "Manager"
        }
    }

    pub fn allows(&self, capability: Capability) -> bool {
        match self {
            Role::Customer => false,
            Role::Driver => matches!(
                capability,
                Capability::StaffMenu | Capability::ViewAnyOrders | Capability::UpdateOrderStatus
            ),
            Role::Manager => true
        }
    }

    // Menu numbering used when picking a role: 1 customer, 2 driver, 3 manager
    pub fn from_choice(choice: u32) -> Option<Role> {
        Self::ALL.get((choice as usize).checked_sub(1)?).copied()
    }
}

impl FromStr for Role {
    type Err = String;

    // Stored values are fixed-width in some schemas, hence the trim
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "customer" => Ok(Role::Customer),
            "driver" => Ok(Role::Driver),
            "manager" => Ok(Role::Manager),
            other => Err(format!("{} is not a known role", other))
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
