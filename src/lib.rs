#![warn(clippy::all)]

#[macro_use]
extern crate log;

#[macro_use]
extern crate serde_derive;

pub mod alt_text;
pub mod command_line;
pub mod config;
mod constants;
pub mod error;
pub mod image;
pub mod metrics;
pub mod naming;
pub mod queries;
pub mod schema;
pub mod store;
pub mod upload;

pub use crate::config::{AltTextConfig, StoreConfig};
pub use crate::error::AppError;
pub use crate::image::{resolve, ImageSource, ImageUrlBuilder, RenderConfig, ResponsiveImageProps};
pub use crate::store::{ContentStore, HttpStore};
