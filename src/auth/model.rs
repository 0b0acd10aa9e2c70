use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::{error::CustomError, utils::required_field};

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Account {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Account about to be stored; `password` is already hashed.
pub struct NewAccount {
    pub name: String,
    pub email: String,
    pub password: String,
}

pub struct RegisterForm {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl RegisterForm {
    pub fn from_form(form: &HashMap<String, String>) -> Result<Self, CustomError> {
        Ok(RegisterForm {
            name: required_field(form, "name")?,
            email: required_field(form, "email")?,
            password: required_field(form, "password")?,
        })
    }
}

pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl LoginForm {
    pub fn from_form(form: &HashMap<String, String>) -> Result<Self, CustomError> {
        Ok(LoginForm {
            email: required_field(form, "email")?,
            password: required_field(form, "password")?,
        })
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub name: String,
    pub exp: usize,
}
