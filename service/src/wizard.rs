//! Three-step flow state machine.
//!
//! Models the advocacy flow as an explicit finite-state machine:
//!
//! ```text
//! CollectingInfo --submit_info--> ShowingRepresentatives --choose_letter--> ReadyToSend
//!       ^                                                                      |
//!       +---------------------------- reset ----------------------------------+
//! ```
//!
//! Transitions fire only on success. A failed validation or lookup leaves
//! the machine where it was, and out-of-order calls are
//! [`WizardError::InvalidTransition`] errors rather than panics. Composing
//! the mailto link does not leave `ReadyToSend`, so a letter can be
//! re-composed any number of times.

use std::fmt;

use bv_directory::{Directory, Resolution, ResolveError};
use bv_letters::{compose_for, personalize, ComposeError, Letter, MailtoLink, Topic};
use thiserror::Error;

use crate::validation::{validate_form, FormError, FormInput};

/// The externally visible wizard states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardState {
    /// Waiting for the constituent's name and address.
    CollectingInfo,
    /// Officials matched, waiting for a letter choice.
    ShowingRepresentatives,
    /// Letter chosen, mailto link can be composed.
    ReadyToSend,
}

impl WizardState {
    /// Human-readable state name, used in transition errors.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::CollectingInfo => "collecting info",
            Self::ShowingRepresentatives => "showing representatives",
            Self::ReadyToSend => "ready to send",
        }
    }
}

impl fmt::Display for WizardState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Errors surfaced by wizard operations.
#[derive(Debug, Error)]
pub enum WizardError {
    /// The submitted form failed validation.
    #[error(transparent)]
    Validation(#[from] FormError),

    /// The address could not be matched to a senator and representative.
    #[error(transparent)]
    Resolve(#[from] ResolveError),

    /// The mailto link could not be composed.
    #[error(transparent)]
    Compose(#[from] ComposeError),

    /// An operation was called in a state that does not allow it.
    #[error("cannot {action} while {state}")]
    InvalidTransition {
        /// State the machine was in.
        state: WizardState,
        /// What the caller tried to do.
        action: &'static str,
    },
}

/// Data carried by each state.
enum Step {
    CollectingInfo,
    ShowingRepresentatives {
        form: FormInput,
        resolution: Resolution,
    },
    ReadyToSend {
        form: FormInput,
        resolution: Resolution,
        letter: &'static Letter,
    },
}

/// The wizard itself: a directory plus the current step.
pub struct Wizard {
    directory: Directory,
    step: Step,
}

impl Wizard {
    /// Start a new wizard in [`WizardState::CollectingInfo`].
    #[must_use]
    pub const fn new(directory: Directory) -> Self {
        Self {
            directory,
            step: Step::CollectingInfo,
        }
    }

    /// The current state.
    #[must_use]
    pub const fn state(&self) -> WizardState {
        match self.step {
            Step::CollectingInfo => WizardState::CollectingInfo,
            Step::ShowingRepresentatives { .. } => WizardState::ShowingRepresentatives,
            Step::ReadyToSend { .. } => WizardState::ReadyToSend,
        }
    }

    /// The matched officials, once `submit_info` has succeeded.
    #[must_use]
    pub const fn resolution(&self) -> Option<&Resolution> {
        match &self.step {
            Step::ShowingRepresentatives { resolution, .. }
            | Step::ReadyToSend { resolution, .. } => Some(resolution),
            Step::CollectingInfo => None,
        }
    }

    /// The chosen letter, once `choose_letter` has succeeded.
    #[must_use]
    pub const fn letter(&self) -> Option<&'static Letter> {
        match &self.step {
            Step::ReadyToSend { letter, .. } => Some(*letter),
            _ => None,
        }
    }

    /// Validate the form and match the constituent to their officials.
    ///
    /// On success the machine moves to
    /// [`WizardState::ShowingRepresentatives`] and the matched pair is
    /// returned. On failure the machine stays in
    /// [`WizardState::CollectingInfo`].
    ///
    /// # Errors
    /// [`WizardError::Validation`] for a rejected form,
    /// [`WizardError::Resolve`] for an unmatchable address, and
    /// [`WizardError::InvalidTransition`] when called out of order.
    pub fn submit_info(&mut self, input: &FormInput) -> Result<Resolution, WizardError> {
        if !matches!(self.step, Step::CollectingInfo) {
            return Err(WizardError::InvalidTransition {
                state: self.state(),
                action: "submit contact info",
            });
        }

        let form = validate_form(input)?;
        let resolution = self.directory.resolve(&form.address)?;

        self.step = Step::ShowingRepresentatives {
            form,
            resolution: resolution.clone(),
        };
        Ok(resolution)
    }

    /// Pick one of the four letters.
    ///
    /// On success the machine moves to [`WizardState::ReadyToSend`].
    ///
    /// # Errors
    /// [`WizardError::InvalidTransition`] unless the machine is showing
    /// representatives.
    pub fn choose_letter(&mut self, topic: Topic) -> Result<&'static Letter, WizardError> {
        match std::mem::replace(&mut self.step, Step::CollectingInfo) {
            Step::ShowingRepresentatives { form, resolution } => {
                let letter = topic.letter();
                self.step = Step::ReadyToSend {
                    form,
                    resolution,
                    letter,
                };
                Ok(letter)
            }
            other => {
                self.step = other;
                Err(WizardError::InvalidTransition {
                    state: self.state(),
                    action: "choose a letter",
                })
            }
        }
    }

    /// Personalize the chosen letter and compose the mailto link.
    ///
    /// Does not change state, so the link can be composed repeatedly.
    ///
    /// # Errors
    /// [`WizardError::Compose`] when neither official has a usable email,
    /// [`WizardError::InvalidTransition`] unless the machine is ready to
    /// send.
    pub fn compose(&self) -> Result<MailtoLink, WizardError> {
        match &self.step {
            Step::ReadyToSend {
                form,
                resolution,
                letter,
            } => {
                let personalized =
                    personalize(letter, &form.first_name, &form.last_name, resolution);
                Ok(compose_for(resolution, &personalized)?)
            }
            _ => Err(WizardError::InvalidTransition {
                state: self.state(),
                action: "compose the mailto link",
            }),
        }
    }

    /// Return to [`WizardState::CollectingInfo`], dropping all derived data.
    pub fn reset(&mut self) {
        self.step = Step::CollectingInfo;
    }
}
