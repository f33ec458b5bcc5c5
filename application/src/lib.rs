pub mod dto;
pub mod error;
pub mod staging;
pub mod usecase;

pub use dto::*;
pub use error::ApplicationError;
pub use staging::JobScratch;
pub use usecase::*;
