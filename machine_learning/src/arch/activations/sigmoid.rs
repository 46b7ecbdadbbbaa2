/// The logistic function, evaluated without overflowing for large `|z|`.
#[derive(Clone, Copy, Debug, Default)]
pub struct Sigmoid;

impl Sigmoid {
    pub fn new() -> Self {
        Self
    }

    pub fn f(&self, z: f64) -> f64 {
        if z >= 0.0 {
            1. / (1. + (-z).exp())
        } else {
            let e = z.exp();
            e / (1. + e)
        }
    }

    pub fn df(&self, z: f64) -> f64 {
        let s = self.f(z);
        s * (1. - s)
    }
}

/// `ln(1 + e^z)`, stable on both tails.
pub fn softplus(z: f64) -> f64 {
    z.max(0.) + (-z.abs()).exp().ln_1p()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sigmoid_values() {
        let s = Sigmoid::new();

        assert_eq!(s.f(0.), 0.5);
        assert!((s.f(2.) + s.f(-2.) - 1.).abs() < 1e-12);
        assert_eq!(s.f(1000.), 1.);
        assert_eq!(s.f(-1000.), 0.);
        assert!(s.f(-1000.).is_finite());
        assert_eq!(s.df(0.), 0.25);
    }

    #[test]
    fn softplus_tails() {
        assert!((softplus(0.) - 2f64.ln()).abs() < 1e-12);
        assert_eq!(softplus(800.), 800.);
        assert!(softplus(-800.) >= 0. && softplus(-800.) < 1e-300);
    }
}
