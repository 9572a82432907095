//! Classification of a work unit's outcome into a retry action.

/// What the engine should do with the outcome of one attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Stop and report success.
    Success,
    /// Transient failure: back off and try again while the budget allows.
    SoftFail,
    /// Non-retryable failure: stop and hand the error back untouched.
    HardFail,
}

/// Maps the outcome of one attempt to an [`Action`].
///
/// `Ok(())` stands for "no error" and should classify as [`Action::Success`].
/// Classifiers are consulted for every outcome, so one may also turn a
/// specific error into success (e.g. "already exists").
pub trait Classifier<E> {
    fn classify(&self, outcome: Result<(), &E>) -> Action;
}

impl<E, F> Classifier<E> for F
where
    F: Fn(Result<(), &E>) -> Action,
{
    fn classify(&self, outcome: Result<(), &E>) -> Action {
        self(outcome)
    }
}

/// Stock classifier: any error is transient.
pub fn retry_on_error<E>(outcome: Result<(), &E>) -> Action {
    match outcome {
        Ok(()) => Action::Success,
        Err(_) => Action::SoftFail,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn retry_on_error_maps_ok_and_err() {
        assert_eq!(retry_on_error::<String>(Ok(())), Action::Success);
        assert_eq!(
            retry_on_error(Err(&"boom".to_string())),
            Action::SoftFail
        );
    }

    #[test]
    fn closures_are_classifiers() {
        let fatal_on_auth = |outcome: Result<(), &u16>| match outcome {
            Ok(()) => Action::Success,
            Err(401) => Action::HardFail,
            Err(_) => Action::SoftFail,
        };
        assert_eq!(fatal_on_auth.classify(Err(&401)), Action::HardFail);
        assert_eq!(fatal_on_auth.classify(Err(&503)), Action::SoftFail);
        assert_eq!(fatal_on_auth.classify(Ok(())), Action::Success);
    }
}
