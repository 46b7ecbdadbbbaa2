pub mod config;
pub mod error;
pub mod pipeline;
pub mod render;

pub use config::Config;
pub use error::{PipelineErr, Result};
