use tabled::builder::Builder;
use tabled::settings::Style;

/// One row of the convergence history. Bracketing engines fill the bound
/// columns, derivative engines fill the derivative column; the table renderer
/// only prints the columns that are actually populated.
#[derive(Debug, Clone, PartialEq)]
pub struct IterationRecord {
    pub index: usize,
    pub lower_bound: Option<f64>,
    pub upper_bound: Option<f64>,
    pub x: f64,
    pub fx: f64,
    pub derivative: Option<f64>,
    pub relative_error_percent: Option<f64>,
    pub tolerance_met: bool,
}

/// Terminal status of a root-finding run.
#[derive(Debug, Clone, PartialEq)]
pub enum RootStatus {
    Converged,
    MaxIterationsReached,
    Failed(String),
}

/// Everything a run produced: the root estimate (when one exists), the
/// iteration count, the full trace and the terminal status.
#[derive(Debug, Clone)]
pub struct RootResult {
    pub root: Option<f64>,
    pub iteration_count: usize,
    pub trace: Vec<IterationRecord>,
    pub status: RootStatus,
}

impl RootResult {
    /// Folds a typed engine error into a terminal result, for callers that
    /// need one result type for both outcomes.
    pub fn failed(reason: impl ToString) -> Self {
        RootResult {
            root: None,
            iteration_count: 0,
            trace: Vec::new(),
            status: RootStatus::Failed(reason.to_string()),
        }
    }
}

fn format_optional(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{:.10}", v),
        None => "N/A".to_string(),
    }
}

/// Renders the trace as a console table. Bound and derivative columns appear
/// only when at least one record populates them.
pub fn trace_table(trace: &[IterationRecord]) -> String {
    let has_bounds = trace.iter().any(|r| r.lower_bound.is_some());
    let has_derivative = trace.iter().any(|r| r.derivative.is_some());

    let mut builder = Builder::default();
    let mut header = vec!["i".to_string()];
    if has_bounds {
        header.push("a".to_string());
        header.push("b".to_string());
    }
    header.push("x".to_string());
    header.push("f(x)".to_string());
    if has_derivative {
        header.push("f'(x)".to_string());
    }
    header.push("rel error, %".to_string());
    builder.push_record(header);

    for record in trace {
        let mut row = vec![record.index.to_string()];
        if has_bounds {
            row.push(format_optional(record.lower_bound));
            row.push(format_optional(record.upper_bound));
        }
        row.push(format!("{:.10}", record.x));
        row.push(format!("{:.10}", record.fx));
        if has_derivative {
            row.push(format_optional(record.derivative));
        }
        row.push(format_optional(record.relative_error_percent));
        builder.push_record(row);
    }

    let mut table = builder.build();
    table.with(Style::modern_rounded());
    table.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(index: usize, x: f64) -> IterationRecord {
        IterationRecord {
            index,
            lower_bound: None,
            upper_bound: None,
            x,
            fx: x * x,
            derivative: Some(2.0 * x),
            relative_error_percent: None,
            tolerance_met: false,
        }
    }

    #[test]
    fn test_trace_table_derivative_column() {
        let table = trace_table(&[record(0, 1.0), record(1, 0.5)]);
        assert!(table.contains("f'(x)"));
        assert!(!table.contains(" a "));
        assert!(table.contains("N/A"));
    }

    #[test]
    fn test_trace_table_bound_columns() {
        let mut r = record(0, 1.5);
        r.lower_bound = Some(0.0);
        r.upper_bound = Some(3.0);
        r.derivative = None;
        let table = trace_table(&[r]);
        assert!(table.contains("0.0000000000"));
        assert!(table.contains("3.0000000000"));
        assert!(!table.contains("f'(x)"));
    }

    #[test]
    fn test_failed_result() {
        let result = RootResult::failed("bracket does not change sign");
        assert_eq!(result.root, None);
        assert_eq!(
            result.status,
            RootStatus::Failed("bracket does not change sign".to_string())
        );
    }
}
