use crate::Utils::logging::init_term_logger;
use crate::numerical::differentiation::{DEFAULT_STEP, derivative_of};
use crate::numerical::trace::{IterationRecord, RootResult, RootStatus, trace_table};
use crate::symbolic::evaluator::{DomainError, EvaluableFunction};
use crate::symbolic::parse_expr::ParseError;
use log::{error, info, warn};
use thiserror::Error;

/// Below this magnitude the tangent line is treated as flat and the step is
/// refused instead of dividing by a near-zero derivative.
pub const DERIVATIVE_EPSILON: f64 = 1e-10;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum NewtonError {
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error("derivative {derivative} at x = {x} is below {epsilon}, tangent step refused")]
    DerivativeTooSmall {
        x: f64,
        derivative: f64,
        epsilon: f64,
    },
}

/// Newton-Raphson solver with a numerical central-difference derivative.
///
/// Follows the tangent line from an initial guess: x_new = x - f(x)/f'(x).
/// Stops when the residual or the relative change falls under the tolerance,
/// whichever happens first.
pub struct NewtonRaphson {
    pub function: EvaluableFunction,
    pub initial_guess: f64,
    pub tolerance: f64,
    pub max_iterations: usize,
    pub step: f64,
    pub i: usize,
    pub trace: Vec<IterationRecord>,
    pub result: Option<RootResult>,
    pub loglevel: Option<String>,
}

impl NewtonRaphson {
    pub fn new(
        function: EvaluableFunction,
        initial_guess: f64,
        tolerance: f64,
        max_iterations: usize,
    ) -> Self {
        assert!(tolerance >= 0.0, "tolerance must be non-negative");
        assert!(max_iterations > 0, "max_iterations must be positive");
        NewtonRaphson {
            function,
            initial_guess,
            tolerance,
            max_iterations,
            step: DEFAULT_STEP,
            i: 0,
            trace: Vec::new(),
            result: None,
            loglevel: Some("info".to_string()),
        }
    }

    /// Builds the solver straight from a "f(x) = ..." formula string.
    pub fn from_formula(
        formula: &str,
        initial_guess: f64,
        tolerance: f64,
        max_iterations: usize,
    ) -> Result<Self, ParseError> {
        let function = EvaluableFunction::from_formula(formula)?;
        Ok(NewtonRaphson::new(
            function,
            initial_guess,
            tolerance,
            max_iterations,
        ))
    }

    pub fn set_solver_params(&mut self, loglevel: Option<String>) {
        if let Some(level) = loglevel {
            assert!(
                ["debug", "info", "warn", "error", "off", "none"].contains(&level.as_str()),
                "loglevel must be one of debug, info, warn, error, off, none"
            );
            self.loglevel = Some(level);
        }
    }

    pub fn main_loop(&mut self) -> Result<(), NewtonError> {
        let function = self.function.clone();
        let derivative = derivative_of(
            {
                let f = function.clone();
                move |x| f.evaluate(x)
            },
            self.step,
        );
        let mut x = self.initial_guess;
        let mut previous_x: Option<f64> = None;
        self.i = 0;
        self.trace.clear();
        while self.i < self.max_iterations {
            let fx = function.evaluate(x)?;
            let fpx = derivative(x)?;
            if fpx.abs() < DERIVATIVE_EPSILON {
                error!("derivative {} at x = {} too small to step", fpx, x);
                return Err(NewtonError::DerivativeTooSmall {
                    x,
                    derivative: fpx,
                    epsilon: DERIVATIVE_EPSILON,
                });
            }
            let x_new = x - fx / fpx;
            let relative_error_percent = match previous_x {
                Some(prev) if x_new != 0.0 => Some(((x_new - prev) / x_new).abs() * 100.0),
                _ => None,
            };
            // the residual column holds f at the point the step started from
            let tolerance_met = fx.abs() < self.tolerance
                || relative_error_percent
                    .map(|rel| rel < self.tolerance * 100.0)
                    .unwrap_or(false);
            self.trace.push(IterationRecord {
                index: self.i,
                lower_bound: None,
                upper_bound: None,
                x: x_new,
                fx,
                derivative: Some(fpx),
                relative_error_percent,
                tolerance_met,
            });
            info!(
                "i = {}, x = {}, f(x) = {}, f'(x) = {}",
                self.i, x_new, fx, fpx
            );
            previous_x = Some(x_new);
            x = x_new;
            self.i += 1;
            if tolerance_met {
                self.result = Some(RootResult {
                    root: Some(x),
                    iteration_count: self.i,
                    trace: self.trace.clone(),
                    status: RootStatus::Converged,
                });
                return Ok(());
            }
        }
        warn!(
            "Newton-Raphson stopped after {} iterations without meeting the tolerance",
            self.max_iterations
        );
        self.result = Some(RootResult {
            root: Some(x),
            iteration_count: self.i,
            trace: self.trace.clone(),
            status: RootStatus::MaxIterationsReached,
        });
        Ok(())
    }

    pub fn solver(&mut self) -> Result<(), NewtonError> {
        info!(
            "Newton-Raphson from x0 = {}, tolerance {}, max {} iterations",
            self.initial_guess, self.tolerance, self.max_iterations
        );
        self.main_loop()?;
        if let Some(result) = &self.result {
            info!("\n{}", trace_table(&result.trace));
            match &result.status {
                RootStatus::Converged => info!(
                    "converged to {:?} in {} iterations",
                    result.root, result.iteration_count
                ),
                RootStatus::MaxIterationsReached => warn!(
                    "best estimate {:?} after {} iterations",
                    result.root, result.iteration_count
                ),
                RootStatus::Failed(reason) => error!("failed: {}", reason),
            }
        }
        Ok(())
    }

    pub fn solve(&mut self) -> Result<(), NewtonError> {
        init_term_logger(&self.loglevel);
        self.solver()
    }

    pub fn get_result(&self) -> RootResult {
        self.result.clone().expect("solve() has not been run yet")
    }
}

#[test]
fn test_newton_converges_on_cubic() {
    use approx::assert_relative_eq;
    let mut nr = NewtonRaphson::from_formula("f(x) = x^3 - x - 2", 1.5, 0.001, 100).unwrap();
    nr.set_solver_params(Some("off".to_string()));
    nr.solve().unwrap();
    let result = nr.get_result();
    assert_eq!(result.status, RootStatus::Converged);
    assert_eq!(result.iteration_count, 2);
    assert_relative_eq!(result.root.unwrap(), 1.52138, epsilon = 1e-4);
}

#[test]
fn test_newton_hits_iteration_cap_without_real_root() {
    // x^2 + 1 has no real root, the orbit wanders without converging
    let mut nr = NewtonRaphson::from_formula("f(x) = x^2 + 1", 1.5, 0.001, 50).unwrap();
    nr.set_solver_params(Some("off".to_string()));
    nr.solve().unwrap();
    let result = nr.get_result();
    assert_eq!(result.status, RootStatus::MaxIterationsReached);
    assert_eq!(result.iteration_count, 50);
    assert!(result.root.is_some());
}

#[test]
fn test_newton_refuses_flat_function() {
    let mut nr = NewtonRaphson::from_formula("f(x) = 1", 1.5, 0.001, 100).unwrap();
    nr.set_solver_params(Some("off".to_string()));
    let err = nr.solve().unwrap_err();
    assert!(matches!(err, NewtonError::DerivativeTooSmall { .. }));
}

#[test]
fn test_newton_trace_residual_belongs_to_step_start() {
    use approx::assert_relative_eq;
    let mut nr = NewtonRaphson::from_formula("f(x) = x^3 - x - 2", 1.5, 0.001, 100).unwrap();
    nr.set_solver_params(Some("off".to_string()));
    nr.solve().unwrap();
    let result = nr.get_result();
    let first = &result.trace[0];
    // each row pairs the new estimate with the residual of the point it left
    assert_relative_eq!(first.fx, -0.125, epsilon = 1e-9);
    assert!(first.x > 1.5);
}

#[test]
fn test_newton_trace_records_derivative() {
    let mut nr = NewtonRaphson::from_formula("f(x) = x^3 - x - 2", 1.5, 0.001, 100).unwrap();
    nr.set_solver_params(Some("off".to_string()));
    nr.solve().unwrap();
    let result = nr.get_result();
    assert!(result.trace.iter().all(|r| r.derivative.is_some()));
    assert!(result.trace[0].relative_error_percent.is_none());
    assert!(result.trace[1].relative_error_percent.is_some());
}
