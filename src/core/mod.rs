pub mod engine;
pub mod pipeline;

pub use crate::domain::model::{Opportunity, TransformResult};
pub use crate::domain::ports::{Pipeline, Storage};
pub use crate::utils::error::Result;
