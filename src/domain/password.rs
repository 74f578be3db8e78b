use secrecy::{ExposeSecret, SecretString};

// Width of Users.password
pub const MAX_PASSWORD_LENGTH: usize = 30;

pub struct Password(SecretString);

impl Password{
    pub fn parse(password: String) -> Result<Password, String>{
        if password.trim().is_empty() {
            Err("Password cannot be empty. Please try again.".to_string())
        } else if password.chars().count() > MAX_PASSWORD_LENGTH {
            Err(format!("Password cannot be over {} characters. Please try again.", MAX_PASSWORD_LENGTH))
        } else {
            Ok(Self(SecretString::from(password)))
        }
    }
}

impl ExposeSecret<str> for Password {
    fn expose_secret(&self) -> &str {
        self.0.expose_secret()
    }
}

impl std::fmt::Debug for Password {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Password([REDACTED])")
    }
}
