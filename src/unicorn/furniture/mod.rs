pub mod config;
pub mod curate;
pub mod error;
pub mod io;
pub mod logging;
pub mod model;
pub mod source;
pub mod sync;

pub use error::{CurationError, Result};
