use serde::Deserialize;

use crate::types::user::Role;

#[derive(Deserialize)]
pub(crate) struct LoginData {
    pub(crate) email: String,
    pub(crate) password: String,
}

#[derive(Deserialize)]
pub(crate) struct NewUser {
    pub(crate) name: String,
    pub(crate) email: String,
    pub(crate) password: String,
    #[serde(default)]
    pub(crate) role: Role,
}

#[derive(Default, Deserialize)]
pub(crate) struct UpdateUser {
    pub(crate) name: Option<String>,
    pub(crate) email: Option<String>,
}

#[derive(Deserialize)]
pub(crate) struct NewDestination {
    pub(crate) name: String,
    #[serde(default)]
    pub(crate) description: String,
    pub(crate) location: String,
}

#[derive(Default, Deserialize)]
pub(crate) struct UpdateDestination {
    pub(crate) name: Option<String>,
    pub(crate) description: Option<String>,
    pub(crate) location: Option<String>,
}

#[derive(Deserialize)]
pub(crate) struct ValidateToken {
    pub(crate) token: Option<String>,
}
