pub(crate) mod destination;
pub(crate) mod token;
pub(crate) mod user;
