use crate::Utils::logging::init_term_logger;
use crate::numerical::trace::{IterationRecord, RootResult, RootStatus, trace_table};
use crate::symbolic::evaluator::{DomainError, EvaluableFunction};
use crate::symbolic::parse_expr::ParseError;
use log::{error, info, warn};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum FalsePositionError {
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error(
        "no sign change on [{lower_bound}, {upper_bound}]: f(a) = {f_lower}, f(b) = {f_upper}"
    )]
    Bracket {
        lower_bound: f64,
        upper_bound: f64,
        f_lower: f64,
        f_upper: f64,
    },
    #[error("degenerate step: f(a) and f(b) are both {f_value}")]
    DegenerateStep { f_value: f64 },
}

/// Which condition ends the iteration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopCriterion {
    /// relative change between successive estimates, as a percentage
    RelativeChange,
    /// absolute residual |f(x)|
    Residual,
}

/// False position (regula falsi) solver.
///
/// Keeps a bracket [a, b] with f(a) * f(b) <= 0 and replaces one end with the
/// weighted secant point each iteration. Bounds may be given in either order.
/// A bracket that does not change sign gets exactly one midpoint repair
/// attempt before the run fails.
pub struct FalsePosition {
    pub function: EvaluableFunction,
    pub lower_bound: f64,
    pub upper_bound: f64,
    pub tolerance: f64,
    pub max_iterations: usize,
    pub criterion: StopCriterion,
    pub i: usize,
    pub trace: Vec<IterationRecord>,
    pub result: Option<RootResult>,
    pub loglevel: Option<String>,
}

impl FalsePosition {
    pub fn new(
        function: EvaluableFunction,
        lower_bound: f64,
        upper_bound: f64,
        tolerance: f64,
        max_iterations: usize,
    ) -> Self {
        assert!(tolerance >= 0.0, "tolerance must be non-negative");
        assert!(max_iterations > 0, "max_iterations must be positive");
        // callers may pass the bounds in either order
        let (lower_bound, upper_bound) = if lower_bound <= upper_bound {
            (lower_bound, upper_bound)
        } else {
            (upper_bound, lower_bound)
        };
        FalsePosition {
            function,
            lower_bound,
            upper_bound,
            tolerance,
            max_iterations,
            criterion: StopCriterion::RelativeChange,
            i: 0,
            trace: Vec::new(),
            result: None,
            loglevel: Some("info".to_string()),
        }
    }

    /// Builds the solver straight from a "f(x) = ..." formula string.
    pub fn from_formula(
        formula: &str,
        lower_bound: f64,
        upper_bound: f64,
        tolerance: f64,
        max_iterations: usize,
    ) -> Result<Self, ParseError> {
        let function = EvaluableFunction::from_formula(formula)?;
        Ok(FalsePosition::new(
            function,
            lower_bound,
            upper_bound,
            tolerance,
            max_iterations,
        ))
    }

    pub fn set_solver_params(&mut self, loglevel: Option<String>, criterion: Option<StopCriterion>) {
        if let Some(level) = loglevel {
            assert!(
                ["debug", "info", "warn", "error", "off", "none"].contains(&level.as_str()),
                "loglevel must be one of debug, info, warn, error, off, none"
            );
            self.loglevel = Some(level);
        }
        if let Some(criterion) = criterion {
            self.criterion = criterion;
        }
    }

    /// One midpoint repair attempt for a bracket without a sign change. The
    /// half that restores the sign change becomes the new bracket; if neither
    /// half does, the bracket is rejected.
    fn repair_bracket(&mut self) -> Result<(), FalsePositionError> {
        let f_lower = self.function.evaluate(self.lower_bound)?;
        let f_upper = self.function.evaluate(self.upper_bound)?;
        // an endpoint sitting exactly on a root is a valid bracket
        if f_lower * f_upper <= 0.0 {
            return Ok(());
        }
        warn!(
            "no sign change on [{}, {}], trying the midpoint",
            self.lower_bound, self.upper_bound
        );
        let midpoint = (self.lower_bound + self.upper_bound) / 2.0;
        let f_mid = self.function.evaluate(midpoint)?;
        if f_lower * f_mid <= 0.0 {
            self.upper_bound = midpoint;
            return Ok(());
        }
        if f_mid * f_upper <= 0.0 {
            self.lower_bound = midpoint;
            return Ok(());
        }
        error!(
            "bracket [{}, {}] rejected: f does not change sign even after midpoint repair",
            self.lower_bound, self.upper_bound
        );
        Err(FalsePositionError::Bracket {
            lower_bound: self.lower_bound,
            upper_bound: self.upper_bound,
            f_lower,
            f_upper,
        })
    }

    pub fn main_loop(&mut self) -> Result<(), FalsePositionError> {
        self.repair_bracket()?;
        let mut previous_x: Option<f64> = None;
        self.i = 0;
        self.trace.clear();
        while self.i < self.max_iterations {
            let f_lower = self.function.evaluate(self.lower_bound)?;
            let f_upper = self.function.evaluate(self.upper_bound)?;
            let denominator = f_lower - f_upper;
            if denominator == 0.0 {
                return Err(FalsePositionError::DegenerateStep { f_value: f_upper });
            }
            let x = self.upper_bound - f_upper * (self.lower_bound - self.upper_bound) / denominator;
            let fx = self.function.evaluate(x)?;

            let relative_error_percent = match previous_x {
                Some(prev) if x != 0.0 => Some(((x - prev) / x).abs() * 100.0),
                _ => None,
            };
            let tolerance_met = match self.criterion {
                StopCriterion::RelativeChange => relative_error_percent
                    .map(|rel| rel < self.tolerance * 100.0)
                    .unwrap_or(false),
                StopCriterion::Residual => fx.abs() < self.tolerance,
            };
            self.trace.push(IterationRecord {
                index: self.i,
                lower_bound: Some(self.lower_bound),
                upper_bound: Some(self.upper_bound),
                x,
                fx,
                derivative: None,
                relative_error_percent,
                tolerance_met,
            });
            info!(
                "i = {}, bracket = [{}, {}], x = {}, f(x) = {}",
                self.i, self.lower_bound, self.upper_bound, x, fx
            );
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
            if f_lower * fx < 0.0 {
                self.upper_bound = x;
            } else {
                self.lower_bound = x;
            }
            previous_x = Some(x);
        }
        warn!(
            "false position stopped after {} iterations without meeting the tolerance",
            self.max_iterations
        );
        self.result = Some(RootResult {
            root: previous_x,
            iteration_count: self.i,
            trace: self.trace.clone(),
            status: RootStatus::MaxIterationsReached,
        });
        Ok(())
    }

    pub fn solver(&mut self) -> Result<(), FalsePositionError> {
        info!(
            "false position on [{}, {}], tolerance {}, max {} iterations",
            self.lower_bound, self.upper_bound, self.tolerance, self.max_iterations
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

    pub fn solve(&mut self) -> Result<(), FalsePositionError> {
        init_term_logger(&self.loglevel);
        self.solver()
    }

    pub fn get_result(&self) -> RootResult {
        self.result.clone().expect("solve() has not been run yet")
    }
}

#[test]
fn test_false_position_converges_on_quadratic() {
    use approx::assert_relative_eq;
    let mut fp = FalsePosition::from_formula("f(x) = x^2 - 4", 0.0, 3.0, 0.0001, 100).unwrap();
    fp.set_solver_params(Some("off".to_string()), None);
    fp.solve().unwrap();
    let result = fp.get_result();
    assert_eq!(result.status, RootStatus::Converged);
    assert_eq!(result.iteration_count, 8);
    assert_relative_eq!(result.root.unwrap(), 2.0, epsilon = 1e-4);
}

#[test]
fn test_false_position_bracket_widths_shrink() {
    let mut fp = FalsePosition::from_formula("f(x) = x^2 - 4", 0.0, 3.0, 0.0001, 100).unwrap();
    fp.set_solver_params(Some("off".to_string()), None);
    fp.solve().unwrap();
    let result = fp.get_result();
    let widths: Vec<f64> = result
        .trace
        .iter()
        .map(|r| r.upper_bound.unwrap() - r.lower_bound.unwrap())
        .collect();
    for pair in widths.windows(2) {
        assert!(pair[1] <= pair[0]);
    }
}

#[test]
fn test_false_position_accepts_reversed_bounds() {
    use approx::assert_relative_eq;
    let mut fp = FalsePosition::from_formula("f(x) = x^2 - 4", 3.0, 0.0, 0.0001, 100).unwrap();
    assert_eq!(fp.lower_bound, 0.0);
    assert_eq!(fp.upper_bound, 3.0);
    fp.set_solver_params(Some("off".to_string()), None);
    fp.solve().unwrap();
    let result = fp.get_result();
    assert_eq!(result.status, RootStatus::Converged);
    assert_relative_eq!(result.root.unwrap(), 2.0, epsilon = 1e-4);
}

#[test]
fn test_false_position_accepts_endpoint_root() {
    use approx::assert_relative_eq;
    // f(2) = 0 exactly, so the bracket product is zero rather than negative
    let mut fp = FalsePosition::from_formula("f(x) = x^2 - 4", 2.0, 5.0, 0.0001, 100).unwrap();
    fp.set_solver_params(Some("off".to_string()), None);
    fp.solve().unwrap();
    let result = fp.get_result();
    assert_eq!(result.status, RootStatus::Converged);
    assert_relative_eq!(result.root.unwrap(), 2.0, epsilon = 1e-10);
}

#[test]
fn test_false_position_rejects_bad_bracket() {
    // f(3) = 5, f(5) = 21, midpoint f(4) = 12: repair cannot help
    let mut fp = FalsePosition::from_formula("f(x) = x^2 - 4", 3.0, 5.0, 0.0001, 100).unwrap();
    fp.set_solver_params(Some("off".to_string()), None);
    let err = fp.solve().unwrap_err();
    assert!(matches!(err, FalsePositionError::Bracket { .. }));
}

#[test]
fn test_false_position_midpoint_repair_recovers() {
    // f(-3) = 5, f(3) = 5: midpoint 0 has f = -4, so the repair restores a bracket
    let mut fp = FalsePosition::from_formula("f(x) = x^2 - 4", -3.0, 3.0, 0.0001, 100).unwrap();
    fp.set_solver_params(Some("off".to_string()), None);
    fp.solve().unwrap();
    let result = fp.get_result();
    assert_eq!(result.status, RootStatus::Converged);
}

#[test]
fn test_false_position_residual_criterion() {
    let mut fp = FalsePosition::from_formula("f(x) = x^2 - 4", 0.0, 3.0, 0.001, 100).unwrap();
    fp.set_solver_params(Some("off".to_string()), Some(StopCriterion::Residual));
    fp.solve().unwrap();
    let result = fp.get_result();
    assert_eq!(result.status, RootStatus::Converged);
    let last = result.trace.last().unwrap();
    assert!(last.fx.abs() < 0.001);
}
