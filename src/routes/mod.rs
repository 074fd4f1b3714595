pub(crate) mod auth;
pub(crate) mod destination;
pub(crate) mod router;
pub(crate) mod user;
