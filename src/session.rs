use crate::domain::{Capability, LoginName, Role};

// Identity of the logged in user, resolved once at login
#[derive(Debug, Clone)]
pub struct Session{
    login: LoginName,
    role: Role
}

impl Session{
    pub fn new(login: LoginName, role: Role) -> Self {
        Session{ login, role }
    }

    pub fn login(&self) -> &LoginName {
        &self.login
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn can(&self, capability: Capability) -> bool {
        self.role.allows(capability)
    }

    pub fn is(&self, login: &str) -> bool {
        self.login.as_str() == login
    }

    // Keeps the session in step when an administrator edits their own account
    pub fn rename(&mut self, login: LoginName){
        self.login = login;
    }

    pub fn set_role(&mut self, role: Role){
        self.role = role;
    }
}
