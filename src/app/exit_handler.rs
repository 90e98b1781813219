//! Exit code logic for the pyweek process.
//!
//! Single responsibility: map error counts to the process exit outcome.

use crate::ProcessExit;

/// Determines the process exit outcome from an error count.
pub(crate) fn determine_exit_outcome(errors: usize) -> ProcessExit {
    if errors == 0 {
        ProcessExit::Success
    } else {
        ProcessExit::Failure
    }
}

#[cfg(test)]
mod tests {
    use super::determine_exit_outcome;
    use crate::ProcessExit;

    #[test]
    fn test_exit_outcome_success_when_no_errors() {
        assert_eq!(determine_exit_outcome(0), ProcessExit::Success);
    }

    #[test]
    fn test_exit_outcome_failure_when_any_error() {
        assert_eq!(determine_exit_outcome(1), ProcessExit::Failure);
        assert_eq!(determine_exit_outcome(7), ProcessExit::Failure);
    }
}
