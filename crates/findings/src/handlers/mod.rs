pub mod error;
pub mod findings;
pub mod health;

pub use error::{json_error_responses, AppError, AppResult};
