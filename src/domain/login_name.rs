pub const MAX_LOGIN_LENGTH: usize = 50;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginName(String);

impl LoginName{
    pub fn parse(login: String) -> Result<LoginName, String>{
        let login = login.trim().to_string();

        if login.is_empty() {
            Err("Username cannot be empty. Please try again.".to_string())
        } else if login.chars().count() > MAX_LOGIN_LENGTH {
            Err(format!("Username cannot be over {} characters. Please try again.", MAX_LOGIN_LENGTH))
        } else {
            Ok(Self(login))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for LoginName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for LoginName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(&self.0, f)
    }
}
