//! Client for the mockallan mock server.
//!
//! The SUT sends its requests to mockallan, either directly or through the
//! pass-through helpers here; the test then asks mockallan whether the
//! expected calls happened:
//!
//! ```no_run
//! # async fn demo() -> mockallan_client::Result<()> {
//! use mockallan_client::{MockallanClient, RequestOption};
//! use serde_json::json;
//!
//! let client = MockallanClient::new("http://127.0.0.1:8080")?;
//! client.post("/orders/order_9b3e", RequestOption::json(json!({"foo": "bar"}))).await?;
//! client.assert_called("POST", "/orders/order_9b3e").await?;
//! client.assert_called_once_with("POST", "/orders/order_9b3e", json!({"foo": "bar"})).await?;
//! # Ok(())
//! # }
//! ```
//!
//! Use [`blocking::MockallanClient`] from synchronous tests.

pub mod blocking;
pub mod core;
pub mod models;

pub use crate::core::client::MockallanClient;
pub use crate::core::response::{classify, Verdict};
pub use crate::core::serialization::{resolve, Strategy};
pub use crate::models::body::{Body, ExpectedBody};
pub use crate::models::error::{MockallanError, Result};
pub use crate::models::request_option::RequestOption;
pub use crate::models::settings::ClientSettings;
pub use crate::models::validator::Validator;
