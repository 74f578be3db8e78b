use phonenumber::country;

// Width of Users.phoneNum
pub const MAX_PHONE_NUMBER_LENGTH: usize = 20;

#[derive(Debug, Clone)]
pub struct PhoneNumber(String);

impl PhoneNumber{
    pub fn parse(number: String) -> Result<PhoneNumber, String>{
        let number = number.trim().to_string();

        if number.is_empty() {
            return Err("Phone number cannot be empty. Please try again.".to_string())
        }

        if number.chars().count() > MAX_PHONE_NUMBER_LENGTH {
            return Err(format!(
                "Phone number cannot be over {} characters. Please try again.",
                MAX_PHONE_NUMBER_LENGTH
            ))
        }

        if phonenumber::parse(Some(country::US), number.clone()).is_ok(){
            Ok(Self(number))
        } else {
            Err(format!("{} is not a valid phone number. Please try again.", number))
        }
    }

    pub fn inner(&self) -> String {
        self.0.clone()
    }
}

impl std::fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(&self.0, f)
    }
}
