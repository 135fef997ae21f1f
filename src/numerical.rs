#![allow(non_camel_case_types)]
#![allow(non_snake_case)]
/// numerical differentiation by the central difference quotient, used by the
/// Newton-Raphson engine and available on its own
/// ________________________________________________________________________________________________________________________________
pub mod differentiation;
///____________________________________________________________________________________________________________________________
/// per-iteration records, terminal statuses and the rendered convergence table
/// shared by both root-finding engines
/// ________________________________________________________________________________________________________________________________
pub mod trace;
///____________________________________________________________________________________________________________________________
/// # False position (regula falsi)
/// bracketing engine: keeps a sign-changing interval [a, b] and shrinks it with
/// the weighted secant update, with a one-shot midpoint repair of a bad bracket
///# Example
/// ```
/// use RustedRoots::numerical::false_position::FalsePosition;
/// let mut fp = FalsePosition::from_formula("f(x) = x^2 - 4", 0.0, 3.0, 0.0001, 100).unwrap();
/// fp.set_solver_params(Some("off".to_string()), None);
/// fp.solve().unwrap();
/// let result = fp.get_result();
/// println!("root = {:?} after {} iterations", result.root, result.iteration_count);
/// ```
/// ________________________________________________________________________________________________________________________________
pub mod false_position;
///____________________________________________________________________________________________________________________________
/// # Newton-Raphson
/// derivative-based engine: follows the tangent line from an initial guess,
/// with the derivative taken numerically and guarded against vanishing
///# Example
/// ```
/// use RustedRoots::numerical::newton_raphson::NewtonRaphson;
/// let mut nr = NewtonRaphson::from_formula("f(x) = x^3 - x - 2", 1.5, 0.001, 100).unwrap();
/// nr.set_solver_params(Some("off".to_string()));
/// nr.solve().unwrap();
/// let result = nr.get_result();
/// println!("root = {:?} after {} iterations", result.root, result.iteration_count);
/// ```
/// ________________________________________________________________________________________________________________________________
pub mod newton_raphson;
