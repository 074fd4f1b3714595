use regex::Regex;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::controllers::token::TokenController;
use crate::core::error::{self, Error};
use crate::types::request::{NewUser, UpdateUser};
use crate::types::user::User;
use crate::utils::auth::{hash_password, verify_password};

#[derive(Clone)]
pub(crate) struct UserController {
    users: Arc<RwLock<HashMap<String, User>>>,
    tokens: TokenController,
    email_pattern: Regex,
}

impl std::fmt::Debug for UserController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserController")
            .field("email_pattern", &self.email_pattern.as_str())
            .finish()
    }
}

impl UserController {
    pub(crate) fn new(tokens: TokenController) -> Result<Self, error::ConfigError> {
        Ok(Self {
            users: Arc::new(RwLock::new(HashMap::new())),
            tokens,
            email_pattern: Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$")?,
        })
    }

    pub(crate) async fn list(&self) -> Vec<User> {
        self.users.read().await.values().cloned().collect()
    }

    pub(crate) async fn get(&self, id: &str) -> Result<User, Error> {
        self.users
            .read()
            .await
            .get(id)
            .cloned()
            .ok_or(Error::UserNotFound)
    }

    pub(crate) async fn register(&self, params: NewUser) -> Result<User, Error> {
        if !self.email_pattern.is_match(&params.email) {
            return Err(Error::InvalidEmail);
        }

        let mut users = self.users.write().await;

        if users.values().any(|user| user.email == params.email) {
            return Err(Error::UserAlreadyExists);
        }

        let user = User {
            id: Uuid::new_v4().to_string(),
            name: params.name,
            email: params.email,
            password_hash: hash_password(&params.password),
            role: params.role,
        };

        users.insert(user.id.clone(), user.clone());

        tracing::info!(user_id = %user.id, role = %user.role, "registered user");

        Ok(user)
    }

    pub(crate) async fn update(&self, id: &str, params: UpdateUser) -> Result<User, Error> {
        if let Some(email) = &params.email {
            if !self.email_pattern.is_match(email) {
                return Err(Error::InvalidEmail);
            }
        }

        let mut users = self.users.write().await;

        if !users.contains_key(id) {
            return Err(Error::UserNotFound);
        }

        if let Some(email) = &params.email {
            if users
                .values()
                .any(|user| user.id != id && &user.email == email)
            {
                return Err(Error::UserAlreadyExists);
            }
        }

        let user = users.get_mut(id).ok_or(Error::UserNotFound)?;

        if let Some(name) = params.name {
            user.name = name;
        }

        if let Some(email) = params.email {
            user.email = email;
        }

        Ok(user.clone())
    }

    pub(crate) async fn login(&self, email: &str, password: &str) -> Result<(User, String), Error> {
        let user = self
            .users
            .read()
            .await
            .values()
            .find(|user| user.email == email)
            .cloned()
            .ok_or(Error::InvalidCredentials)?;

        if !verify_password(&user.password_hash, password) {
            return Err(Error::InvalidCredentials);
        }

        let token = self.tokens.issue(&user.id, user.role).await?;

        Ok((user, token))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::store::TokenStore;
    use crate::types::user::Role;

    fn controller() -> UserController {
        let tokens = TokenController::new(TokenStore::new(), "SECRET_KEY", false);
        UserController::new(tokens).unwrap()
    }

    fn new_user(email: &str, role: Role) -> NewUser {
        NewUser {
            name: "Ada".into(),
            email: email.into(),
            password: "hunter2".into(),
            role,
        }
    }

    #[tokio::test]
    async fn test_register_hashes_password() {
        let users = controller();

        let user = users
            .register(new_user("ada@example.com", Role::User))
            .await
            .unwrap();

        assert_eq!(user.password_hash, hash_password("hunter2"));
        assert_eq!(users.get(&user.id).await.unwrap().email, "ada@example.com");
    }

    #[tokio::test]
    async fn test_register_rejects_bad_email_and_duplicates() {
        let users = controller();

        assert!(matches!(
            users.register(new_user("not-an-email", Role::User)).await,
            Err(Error::InvalidEmail)
        ));

        users
            .register(new_user("ada@example.com", Role::User))
            .await
            .unwrap();

        assert!(matches!(
            users.register(new_user("ada@example.com", Role::Admin)).await,
            Err(Error::UserAlreadyExists)
        ));
        assert_eq!(users.list().await.len(), 1);
    }

    #[tokio::test]
    async fn test_login() {
        let users = controller();
        let registered = users
            .register(new_user("ada@example.com", Role::Admin))
            .await
            .unwrap();

        assert!(matches!(
            users.login("ada@example.com", "wrong").await,
            Err(Error::InvalidCredentials)
        ));
        assert!(matches!(
            users.login("nobody@example.com", "hunter2").await,
            Err(Error::InvalidCredentials)
        ));

        let (user, token) = users.login("ada@example.com", "hunter2").await.unwrap();
        assert_eq!(user.id, registered.id);

        let record = users.tokens.check(Some(&token), None).await.unwrap();
        assert_eq!(record.user_id, registered.id);
        assert_eq!(record.role, Role::Admin);
    }

    #[tokio::test]
    async fn test_update() {
        let users = controller();
        let user = users
            .register(new_user("ada@example.com", Role::User))
            .await
            .unwrap();

        let updated = users
            .update(
                &user.id,
                UpdateUser {
                    name: Some("Ada Lovelace".into()),
                    email: None,
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.name, "Ada Lovelace");
        assert_eq!(updated.email, "ada@example.com");

        assert!(matches!(
            users
                .update(
                    &user.id,
                    UpdateUser {
                        name: None,
                        email: Some("bad".into()),
                    },
                )
                .await,
            Err(Error::InvalidEmail)
        ));
        assert!(matches!(
            users.update("missing", UpdateUser::default()).await,
            Err(Error::UserNotFound)
        ));
    }

    #[tokio::test]
    async fn test_update_rejects_taken_email() {
        let users = controller();
        let ada = users
            .register(new_user("ada@example.com", Role::User))
            .await
            .unwrap();
        users
            .register(new_user("bob@example.com", Role::User))
            .await
            .unwrap();

        assert!(matches!(
            users
                .update(
                    &ada.id,
                    UpdateUser {
                        name: None,
                        email: Some("bob@example.com".into()),
                    },
                )
                .await,
            Err(Error::UserAlreadyExists)
        ));

        // Keeping one's own address is not a conflict
        let unchanged = users
            .update(
                &ada.id,
                UpdateUser {
                    name: None,
                    email: Some("ada@example.com".into()),
                },
            )
            .await
            .unwrap();
        assert_eq!(unchanged.email, "ada@example.com");

        let (user, _) = users.login("bob@example.com", "hunter2").await.unwrap();
        assert_ne!(user.id, ada.id);
    }
}
