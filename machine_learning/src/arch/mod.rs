pub mod activations;
mod logistic;
pub mod loss;
mod model;

pub use logistic::{FittedLogistic, LogisticRegression, Solver};
pub use model::Classifier;
