//! Multi-step form controller: a totally ordered sequence of steps with
//! forward navigation gated on per-step validation and a single outbound
//! submission from the final step.

use tracing::{debug, info};

use super::fields::FormSession;
use crate::gateway::SubmissionOutcome;

/// One step of a workflow: ordered position plus the fields that must be
/// satisfied before the user may advance past it.
#[derive(Debug, Clone)]
pub struct StepDefinition {
    pub title: &'static str,
    pub required: &'static [&'static str],
}

/// Lifecycle of the whole form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormPhase {
    /// The user is editing some step; the step index is always in range.
    InProgress,
    /// A submission has been dispatched and has not resolved yet. The
    /// submit affordance stays disabled so a second click cannot start a
    /// concurrent attempt.
    Submitting,
    /// Terminal: the backend accepted the submission and the session has
    /// been cleared.
    Submitted,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormError {
    #[error("Please fill in all required fields before proceeding.")]
    IncompleteStep { step: usize },
    #[error("submit is only available from the final step")]
    NotOnFinalStep,
    #[error("a submission is already in progress")]
    SubmissionInFlight,
    #[error("this form was already submitted")]
    AlreadySubmitted,
}

/// Controller over steps `1..=N`, an owned [`FormSession`], and one
/// submission attempt at a time.
#[derive(Debug)]
pub struct MultiStepForm {
    steps: Vec<StepDefinition>,
    current: usize,
    session: FormSession,
    phase: FormPhase,
}

impl MultiStepForm {
    /// Build a controller positioned on step 1. The first step is taken
    /// separately so the sequence is non-empty by construction.
    pub fn new(first: StepDefinition, rest: Vec<StepDefinition>) -> Self {
        let mut steps = vec![first];
        steps.extend(rest);
        Self {
            steps,
            current: 1,
            session: FormSession::new(),
            phase: FormPhase::InProgress,
        }
    }

    pub fn session(&self) -> &FormSession {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut FormSession {
        &mut self.session
    }

    /// 1-based index of the current step.
    pub fn current_step(&self) -> usize {
        self.current
    }

    pub fn step_count(&self) -> usize {
        self.steps.len()
    }

    pub fn is_final_step(&self) -> bool {
        self.current == self.steps.len()
    }

    pub fn phase(&self) -> FormPhase {
        self.phase
    }

    fn validate_step(&self, step: usize) -> Result<(), FormError> {
        let definition = &self.steps[step - 1];
        let complete = definition
            .required
            .iter()
            .all(|field| self.session.is_satisfied(field));
        if complete {
            Ok(())
        } else {
            Err(FormError::IncompleteStep { step })
        }
    }

    /// Advance past the current step. Fails with one aggregate message
    /// when any required field of the step is unsatisfied; on the final
    /// step a passing `next` stays put (submission takes over there).
    pub fn next(&mut self) -> Result<usize, FormError> {
        self.validate_step(self.current)?;
        if self.current < self.steps.len() {
            self.current += 1;
            debug!(step = self.current, "advanced to next step");
        }
        Ok(self.current)
    }

    /// Move back one step. Backward navigation is never validated.
    pub fn prev(&mut self) -> usize {
        if self.current > 1 {
            self.current -= 1;
        }
        self.current
    }

    /// Re-validate the final step and mark the form as submitting. The
    /// returned session is what the caller serializes and sends; exactly
    /// one submission may be pending at a time.
    pub fn begin_submit(&mut self) -> Result<&FormSession, FormError> {
        match self.phase {
            FormPhase::Submitting => return Err(FormError::SubmissionInFlight),
            FormPhase::Submitted => return Err(FormError::AlreadySubmitted),
            FormPhase::InProgress => {}
        }
        if !self.is_final_step() {
            return Err(FormError::NotOnFinalStep);
        }
        self.validate_step(self.current)?;
        self.phase = FormPhase::Submitting;
        Ok(&self.session)
    }

    /// Record the outcome of the dispatched submission. Success is
    /// terminal and clears the session; Conflict and Failure return the
    /// form to the final step so the user may retry.
    pub fn resolve_submit(&mut self, outcome: &SubmissionOutcome) {
        self.phase = match outcome {
            SubmissionOutcome::Success(_) => {
                self.session.clear();
                info!("form submitted");
                FormPhase::Submitted
            }
            SubmissionOutcome::Conflict(_) | SubmissionOutcome::Failure(_) => FormPhase::InProgress,
        };
    }

    /// Run one whole submission attempt: gate, dispatch through `send`,
    /// and resolve. `send` performs the single outbound call.
    pub fn submit<F>(&mut self, send: F) -> Result<SubmissionOutcome, FormError>
    where
        F: FnOnce(&FormSession) -> SubmissionOutcome,
    {
        let outcome = {
            let session = self.begin_submit()?;
            send(session)
        };
        self.resolve_submit(&outcome);
        Ok(outcome)
    }
}
