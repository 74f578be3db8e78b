use std::{error::Error, fmt::Debug, io::Write};

use diesel::{ExpressionMethods, OptionalExtension, QueryDsl, RunQueryDsl};
use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;

use crate::{
    domain::{LoginName, Password, PhoneNumber, Role},
    executor::{DatabaseError, QueryExecutor, Statement},
    models::NewUser,
    schema::{foodorder, users},
    utils::error_fmt_chain
};

// Columns of Users that can be changed one at a time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserField{
    Password,
    PhoneNumber,
    FavoriteItems,
    Role
}

impl UserField{
    fn column(&self) -> &'static str {
        match self {
            UserField::Password => "password",
            UserField::PhoneNumber => "phoneNum",
            UserField::FavoriteItems => "favoriteItems",
            UserField::Role => "role"
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserProfile{
    pub login: String,
    pub role: String,
    pub phone_number: Option<String>,
    pub favorite_items: Option<String>
}

pub fn login_exists(
    executor: &mut QueryExecutor,
    login: &str
) -> Result<bool, DatabaseError> {
    let statement = Statement::new("SELECT login FROM Users WHERE login = $1")
                        .bind(login);

    Ok(executor.execute_query(&statement)? > 0)
}

// Error associated with inserting user to Users table
#[derive(Error)]
pub enum UserInsertError{
    #[error("Username already exists! Please choose a different one.")]
    LoginNotUnique(#[source] diesel::result::Error),
    #[error("Failed to create user")]
    UnexpectedError(#[from] diesel::result::Error)
}

impl Debug for UserInsertError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self)?;
        error_fmt_chain(f, &self.source())
    }
}

#[tracing::instrument(
    "Inserting user into the database",
    skip(executor, password, phone_number)
)]
pub fn insert_user(
    executor: &mut QueryExecutor,
    login: &LoginName,
    password: &Password,
    phone_number: &PhoneNumber
) -> Result<(), UserInsertError> {
    let user = NewUser{
        login: login.as_str().to_string(),
        password: password.expose_secret().to_string(),
        role: Role::Customer.as_str().to_string(),
        favoriteitems: None,
        phonenum: Some(phone_number.inner())
    };

    diesel::insert_into(users::table)
        .values(&user)
        .execute(executor.connection())
        .map_err(|e| {
            match e {
                diesel::result::Error::DatabaseError(
                    diesel::result::DatabaseErrorKind::UniqueViolation,
                    _
                ) => UserInsertError::LoginNotUnique(e),

                _ => UserInsertError::UnexpectedError(e)
            }
        })?;

    Ok(())
}

// Role of the user whose login and password both match exactly
#[tracing::instrument(
    "Checking user credentials",
    skip(executor, password)
)]
pub fn authenticate(
    executor: &mut QueryExecutor,
    login: &str,
    password: &SecretString
) -> Result<Option<Role>, DatabaseError> {
    let stored_role = users::table
        .select(users::role)
        .filter(users::login.eq(login))
        .filter(users::password.eq(password.expose_secret()))
        .first::<String>(executor.connection())
        .optional()?;

    Ok(stored_role.map(|role| {
        role.parse::<Role>().unwrap_or_else(|e| {
            tracing::warn!("{}, treating user as a customer", e);
            Role::Customer
        })
    }))
}

#[tracing::instrument(
    "Get profile data of user",
    skip(executor)
)]
pub fn get_user_profile(
    executor: &mut QueryExecutor,
    login: &str
) -> Result<Option<UserProfile>, DatabaseError> {
    let statement = Statement::new(
        "SELECT login, role, phoneNum, favoriteItems FROM Users WHERE login = $1"
    ).bind(login);

    let profile = executor.execute_query_and_return_result(&statement)?
        .into_iter()
        .next()
        .map(|row| {
            let mut values = row.into_iter();
            UserProfile{
                login: values.next().flatten().unwrap_or_default(),
                role: values.next().flatten().unwrap_or_default().trim().to_string(),
                phone_number: values.next().flatten(),
                favorite_items: values.next().flatten()
            }
        });

    Ok(profile)
}

// Tabular dump of an account, password left out
pub fn print_user_details<W>(
    executor: &mut QueryExecutor,
    login: &str,
    out: &mut W
) -> Result<usize, DatabaseError>
where
    W: Write + ?Sized
{
    let statement = Statement::new(
        "SELECT login, role, phoneNum, favoriteItems FROM Users WHERE login = $1"
    ).bind(login);

    executor.execute_query_and_print_result(&statement, out)
}

#[tracing::instrument(
    "Updating user field",
    skip(executor, value)
)]
pub fn update_user_field(
    executor: &mut QueryExecutor,
    login: &str,
    field: UserField,
    value: &str
) -> Result<usize, DatabaseError> {
    let statement = Statement::new(format!(
        "UPDATE Users SET {} = $1 WHERE login = $2",
        field.column()
    ))
    .bind(value)
    .bind(login);

    executor.execute_update(&statement)
}

// Errors associated with changing a user's login
#[derive(Error)]
pub enum RenameUserError{
    #[error("Username already exists! Please choose a different username.")]
    LoginNotUnique(#[source] diesel::result::Error),
    #[error("User not found!")]
    UserNotFound,
    #[error("Failed due to database error")]
    QueryError(#[from] diesel::result::Error)
}

impl Debug for RenameUserError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self)?;
        error_fmt_chain(f, &self.source())
    }
}

// Moves the user's orders and account to `new_login` in one transaction
#[tracing::instrument(
    "Renaming user",
    skip(executor)
)]
pub fn rename_user(
    executor: &mut QueryExecutor,
    current_login: &str,
    new_login: &LoginName
) -> Result<(), RenameUserError> {
    executor.transaction::<_, RenameUserError, _>(|conn| {
        diesel::update(foodorder::table)
            .filter(foodorder::login.eq(current_login))
            .set(foodorder::login.eq(new_login.as_str()))
            .execute(conn)?;

        let affected_rows = diesel::update(users::table)
            .filter(users::login.eq(current_login))
            .set(users::login.eq(new_login.as_str()))
            .execute(conn)
            .map_err(|e| {
                match e {
                    diesel::result::Error::DatabaseError(
                        diesel::result::DatabaseErrorKind::UniqueViolation,
                        _
                    ) => RenameUserError::LoginNotUnique(e),

                    _ => RenameUserError::QueryError(e)
                }
            })?;

        if affected_rows == 0 {
            return Err(RenameUserError::UserNotFound)
        }

        Ok(())
    })
}
