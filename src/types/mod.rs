//! Data types shared by the row core.

mod annotation;
mod config;
mod index;
mod record;

pub use annotation::*;
pub use config::*;
pub use index::*;
pub use record::*;
