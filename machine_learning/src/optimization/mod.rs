mod gradient_descent;
mod linalg;
mod newton;
mod optimizer;

pub use gradient_descent::GradientDescent;
pub use linalg::solve;
pub use newton::Newton;
pub use optimizer::Optimizer;
