use crate::controllers::destination::DestinationController;
use crate::controllers::token::TokenController;
use crate::controllers::user::UserController;
use crate::core::config::Args;
use crate::core::error::ConfigError;
use crate::token::store::TokenStore;

#[derive(Clone, Debug)]
pub(crate) struct AppState {
    pub(crate) tokens: TokenController,
    pub(crate) user_controller: UserController,
    pub(crate) destination_controller: DestinationController,
}

impl AppState {
    pub(crate) fn new(config: &Args) -> Result<Self, ConfigError> {
        let tokens = TokenController::new(TokenStore::new(), &config.secret, config.verify_signature);

        Ok(AppState {
            user_controller: UserController::new(tokens.clone())?,
            destination_controller: DestinationController::seeded(),
            tokens,
        })
    }
}
