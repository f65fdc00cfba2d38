//! A backend that plays back a scripted sequence of completions.

use condsync_engine::{CapturedCall, SyncBackend, SyncModel, SyncOptions, SyncResult};
use condsync_protocol::{Response, Verb};
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::Arc;

/// One scripted completion.
#[derive(Debug, Clone)]
pub enum Step {
    /// Complete the call through the success continuation.
    Ok(Response),
    /// Complete the call through the error continuation.
    Err(Response),
    /// Leave the call in flight.
    Pending,
}

/// Shorthand for a success step.
pub fn ok(response: Response) -> Step {
    Step::Ok(response)
}

/// Shorthand for an error step.
pub fn err(response: Response) -> Step {
    Step::Err(response)
}

/// A backend that completes successive calls from a script.
///
/// Each call consumes the next step; calls past the end of the script are
/// left pending. Every call's resolved verb and options are recorded.
#[derive(Debug, Default)]
pub struct ScriptedBackend {
    script: Mutex<VecDeque<Step>>,
    calls: Mutex<Vec<CapturedCall>>,
}

/// Builds a scripted backend from a step sequence.
pub fn scripted(steps: impl IntoIterator<Item = Step>) -> Arc<ScriptedBackend> {
    Arc::new(ScriptedBackend::new(steps))
}

impl ScriptedBackend {
    /// Creates a backend from a step sequence.
    pub fn new(steps: impl IntoIterator<Item = Step>) -> Self {
        Self {
            script: Mutex::new(steps.into_iter().collect()),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Appends a step to the script.
    pub fn push(&self, step: Step) {
        self.script.lock().push_back(step);
    }

    /// Returns every call observed so far.
    pub fn calls(&self) -> Vec<CapturedCall> {
        self.calls.lock().clone()
    }

    /// Returns the most recent call, if any.
    pub fn last_call(&self) -> Option<CapturedCall> {
        self.calls.lock().last().cloned()
    }

    /// Returns the number of unconsumed script steps.
    pub fn remaining(&self) -> usize {
        self.script.lock().len()
    }
}

impl SyncBackend for ScriptedBackend {
    fn sync(
        &self,
        verb: Verb,
        _model: &Arc<dyn SyncModel>,
        mut options: SyncOptions,
    ) -> SyncResult<()> {
        self.calls.lock().push(CapturedCall {
            verb,
            headers: options.headers.clone(),
            params: options.params.clone(),
        });

        let step = self.script.lock().pop_front().unwrap_or(Step::Pending);
        match step {
            Step::Ok(response) => {
                if let Some(mut on_success) = options.on_success.take() {
                    on_success(&response);
                }
            }
            Step::Err(response) => {
                if let Some(mut on_error) = options.on_error.take() {
                    on_error(&response);
                }
            }
            Step::Pending => {}
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{memory_model, plain_ok};

    #[test]
    fn steps_are_consumed_in_order() {
        let backend = scripted([ok(plain_ok()), err(Response::new(500))]);
        let model = memory_model();

        let successes = Arc::new(Mutex::new(0usize));
        let errors = Arc::new(Mutex::new(0usize));

        for _ in 0..3 {
            let successes = Arc::clone(&successes);
            let errors = Arc::clone(&errors);
            let options = SyncOptions::new()
                .on_success(move |_| *successes.lock() += 1)
                .on_error(move |_| *errors.lock() += 1);
            backend.sync(Verb::Read, &model, options).unwrap();
        }

        assert_eq!(*successes.lock(), 1);
        assert_eq!(*errors.lock(), 1);
        assert_eq!(backend.calls().len(), 3);
        assert_eq!(backend.remaining(), 0);
    }
}
