// Calendar Layout Library
// Places time-grid events into date columns and overlap slots

pub mod error;
pub mod models;
pub mod services;
pub mod utils;

pub use error::{LayoutError, Result};
