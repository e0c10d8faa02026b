pub mod body;
pub mod error;
pub mod request_option;
pub mod settings;
pub mod validator;
