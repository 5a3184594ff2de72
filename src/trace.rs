//! Step-by-step traces of algebraic operations.
//!
//! Every engine operation accepts an optional [`Trace`] and appends one line
//! per intermediate step. The lines are purely observational: the caller may
//! display them, store them, or drop them, but nothing in the engine ever
//! reads them back. Each call owns its own trace, so there is no global
//! logging state and concurrent callers never interleave.

/// An ordered sequence of human-readable step descriptions for one call.
///
/// The line format is for display only and is not a stable contract.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Trace {
    lines: Vec<String>,
}

impl Trace {
    /// Create an empty trace.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one step description.
    pub fn record(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
    }

    /// The recorded lines, in the order the steps happened.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Consume the trace, returning the recorded lines.
    pub fn into_lines(self) -> Vec<String> {
        self.lines
    }

    /// True if nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Record a line into an `Option<&mut Trace>` without consuming it.
///
/// Formatting only happens when a trace is actually attached.
macro_rules! trace_step {
    ($trace:expr, $($arg:tt)*) => {
        if let Some(t) = $trace.as_mut() {
            t.record(format!($($arg)*));
        }
    };
}

pub(crate) use trace_step;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_in_order() {
        let mut trace = Trace::new();
        assert!(trace.is_empty());
        trace.record("first");
        trace.record(String::from("second"));
        assert_eq!(trace.lines(), ["first", "second"]);
        assert_eq!(trace.into_lines(), vec!["first", "second"]);
    }

    #[test]
    fn trace_step_is_a_no_op_without_a_sink() {
        let mut none: Option<&mut Trace> = None;
        trace_step!(none, "never formatted {}", 42);

        let mut trace = Trace::new();
        let mut some = Some(&mut trace);
        trace_step!(some, "kept {}", 7);
        assert_eq!(trace.lines(), ["kept 7"]);
    }
}
