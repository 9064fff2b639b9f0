pub mod actions;
pub mod api;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod executor;
pub mod server;
pub mod session;
pub mod ui;

pub use actions::{Action, Dispatcher};
pub use error::ClientError;
