use std::{
    error::Error,
    fmt::{self, Display},
};

/// The result type used in the entire machine learning module.
pub type Result<T> = std::result::Result<T, MlErr>;

/// The machine learning module's error type.
#[derive(Debug, Clone, PartialEq)]
pub enum MlErr {
    SizeMismatch {
        what: &'static str,
        got: usize,
        expected: usize,
    },
    EmptyDataset,
    EmptyClass {
        class: usize,
    },
    InvalidStdDev {
        std_dev: f64,
    },
    InvalidStep {
        step: f64,
    },
    InvalidLabels {
        reason: &'static str,
    },
    InvalidHyperparameter {
        name: &'static str,
        value: f64,
    },
    SingularSystem {
        iteration: usize,
    },
    Diverged {
        iteration: usize,
    },
}

impl Display for MlErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MlErr::SizeMismatch {
                what,
                got,
                expected,
            } => write!(
                f,
                "There's a size mismatch in {what}, got {got} and expected {expected}"
            ),
            MlErr::EmptyDataset => write!(f, "The dataset has no samples"),
            MlErr::EmptyClass { class } => {
                write!(f, "Class {class} was requested with zero samples")
            }
            MlErr::InvalidStdDev { std_dev } => write!(
                f,
                "The standard deviation must be finite and non-negative, got {std_dev}"
            ),
            MlErr::InvalidStep { step } => {
                write!(f, "The grid step must be finite and positive, got {step}")
            }
            MlErr::InvalidLabels { reason } => write!(f, "Invalid labels: {reason}"),
            MlErr::InvalidHyperparameter { name, value } => {
                write!(f, "Invalid value {value} for hyperparameter {name}")
            }
            MlErr::SingularSystem { iteration } => write!(
                f,
                "The linear system became singular at solver iteration {iteration}"
            ),
            MlErr::Diverged { iteration } => write!(
                f,
                "The parameters stopped being finite at solver iteration {iteration}"
            ),
        }
    }
}

impl Error for MlErr {}
