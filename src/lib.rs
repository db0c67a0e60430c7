//! Lightning visualization client.
//!
//! Turns loosely shaped numeric input into the canonical payloads a
//! Lightning server understands, and creates visualizations either on a
//! server over HTTP or as standalone HTML documents.

pub mod backend;
pub mod client;
pub mod config;
pub mod convert;
pub mod data;
pub mod dispatch;
pub mod error;
pub mod payload;
pub mod plots;
pub mod session;
pub mod validate;
pub mod visualization;

pub use client::Lightning;
pub use config::{Config, Mode};
pub use data::Data;
pub use error::{Result, VizError};
pub use plots::{Options, Plot};
pub use session::{Credentials, Session};
pub use visualization::Visualization;
