use crate::symbolic::evaluator::DomainError;

/// Default step for the central difference quotient.
pub const DEFAULT_STEP: f64 = 1e-5;

/// Wraps a function in its central-difference derivative:
/// f'(x) ~ (f(x + h) - f(x - h)) / (2h).
/// Domain errors at either probe point propagate unchanged, so a derivative
/// request near a domain boundary fails loudly instead of extrapolating.
pub fn derivative_of<F>(f: F, h: f64) -> impl Fn(f64) -> Result<f64, DomainError>
where
    F: Fn(f64) -> Result<f64, DomainError>,
{
    move |x| Ok((f(x + h)? - f(x - h)?) / (2.0 * h))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_derivative_of_quadratic() {
        let f = |x: f64| Ok(x * x);
        let df = derivative_of(f, DEFAULT_STEP);
        assert_relative_eq!(df(3.0).unwrap(), 6.0, epsilon = 1e-6);
    }

    #[test]
    fn test_derivative_propagates_domain_error() {
        let f = |x: f64| {
            if x < 0.0 {
                Err(DomainError::SqrtOfNegative { value: x })
            } else {
                Ok(x.sqrt())
            }
        };
        let df = derivative_of(f, DEFAULT_STEP);
        assert!(df(0.0).is_err());
    }
}
