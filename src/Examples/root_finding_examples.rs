use crate::numerical::false_position::{FalsePosition, StopCriterion};
use crate::numerical::newton_raphson::NewtonRaphson;
use crate::numerical::trace::trace_table;
use crate::symbolic::evaluator::EvaluableFunction;
use crate::symbolic::parse_expr::parse_formula;

pub fn root_finding_examples(example: usize) {
    match example {
        0 => {
            // parse a formula and evaluate it at a few points
            let input = "f(x) = x^2 - 4";
            let expr = parse_formula(input).unwrap();
            println!("parsed: {}", expr);
            let f = EvaluableFunction::from_formula(input).unwrap();
            for x in [-3.0, 0.0, 2.0, 3.0] {
                println!("f({}) = {}", x, f.evaluate(x).unwrap());
            }
        }
        1 => {
            // false position on a quadratic with a valid bracket
            let mut fp =
                FalsePosition::from_formula("f(x) = x^2 - 4", 0.0, 3.0, 0.0001, 100).unwrap();
            fp.solve().unwrap();
            let result = fp.get_result();
            println!("{}", trace_table(&result.trace));
            println!(
                "root = {:?}, status = {:?}, iterations = {}",
                result.root, result.status, result.iteration_count
            );
        }
        2 => {
            // same problem with the residual stop criterion
            let mut fp =
                FalsePosition::from_formula("f(x) = x^2 - 4", 0.0, 3.0, 0.001, 100).unwrap();
            fp.set_solver_params(Some("warn".to_string()), Some(StopCriterion::Residual));
            fp.solve().unwrap();
            let result = fp.get_result();
            println!("{}", trace_table(&result.trace));
            println!("root = {:?}", result.root);
        }
        3 => {
            // Newton-Raphson on a cubic
            let mut nr =
                NewtonRaphson::from_formula("f(x) = x^3 - x - 2", 1.5, 0.001, 100).unwrap();
            nr.solve().unwrap();
            let result = nr.get_result();
            println!("{}", trace_table(&result.trace));
            println!(
                "root = {:?}, status = {:?}, iterations = {}",
                result.root, result.status, result.iteration_count
            );
        }
        4 => {
            // a bracket without a sign change is rejected after one midpoint repair
            let mut fp =
                FalsePosition::from_formula("f(x) = x^2 - 4", 3.0, 5.0, 0.0001, 100).unwrap();
            match fp.solve() {
                Ok(()) => println!("unexpected success"),
                Err(e) => println!("rejected as expected: {}", e),
            }
        }
        5 => {
            // transcendental formula through both engines
            let input = "f(x) = exp(x) - 3*x";
            let mut fp = FalsePosition::from_formula(input, 0.0, 1.0, 0.0001, 100).unwrap();
            fp.set_solver_params(Some("warn".to_string()), None);
            fp.solve().unwrap();
            println!("false position: root = {:?}", fp.get_result().root);
            let mut nr = NewtonRaphson::from_formula(input, 0.5, 0.0001, 100).unwrap();
            nr.set_solver_params(Some("warn".to_string()));
            nr.solve().unwrap();
            println!("Newton-Raphson: root = {:?}", nr.get_result().root);
        }
        _ => {
            println!("no example with number {}", example);
        }
    }
}
