pub mod cpi;
pub mod error;
pub mod mortgage;
pub mod report;

pub use error::{FinError, Result};
