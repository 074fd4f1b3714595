use serde::Serialize;

use crate::types::user::{Role, User};

#[derive(Serialize)]
pub(crate) struct Login {
    pub(crate) token: String,
    pub(crate) user: User,
}

impl Login {
    pub(crate) fn new(token: String, user: User) -> Self {
        Self { token, user }
    }
}

#[derive(Serialize)]
pub(crate) struct TokenValidation {
    pub(crate) message: &'static str,
    pub(crate) user_id: String,
    pub(crate) role: Role,
}

#[derive(Serialize)]
pub(crate) struct RoleInfo {
    pub(crate) role: Role,
}

#[derive(Serialize)]
pub(crate) struct Message {
    pub(crate) message: &'static str,
}
