pub mod client;
pub(crate) mod forward;
pub mod response;
pub mod serialization;
pub(crate) mod user_agent;
