mod objective;
mod trainer;

pub use objective::Objective;
pub use trainer::{TrainOutcome, Trainer};
