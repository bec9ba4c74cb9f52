//! Submission flow state machine.

use crate::cart::LineItemStore;
use crate::CommerceError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// States of a return-order submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum SubmissionState {
    /// Editing the cart.
    #[default]
    Idle,
    /// Confirmation recap is showing.
    ReviewPending,
    /// The order is being posted.
    Submitting,
    /// The backend accepted the order.
    Success,
    /// The last attempt failed; the recap is still showing.
    Failed,
}

impl SubmissionState {
    pub fn as_str(&self) -> &'static str {
        match self {
            SubmissionState::Idle => "idle",
            SubmissionState::ReviewPending => "review_pending",
            SubmissionState::Submitting => "submitting",
            SubmissionState::Success => "success",
            SubmissionState::Failed => "failed",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            SubmissionState::Idle => "Idle",
            SubmissionState::ReviewPending => "Review",
            SubmissionState::Submitting => "Submitting",
            SubmissionState::Success => "Submitted",
            SubmissionState::Failed => "Failed",
        }
    }

    /// Whether the confirmation dialog is open in this state.
    pub fn is_dialog_open(&self) -> bool {
        matches!(
            self,
            SubmissionState::ReviewPending | SubmissionState::Submitting | SubmissionState::Failed
        )
    }
}

/// Submission flow state.
///
/// `Idle -> ReviewPending -> Submitting -> Success | Failed`. From `Failed`
/// the operator may confirm again or cancel back to `Idle`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SubmissionFlow {
    state: SubmissionState,
    attempts: u32,
    last_error: Option<String>,
}

impl SubmissionFlow {
    /// Create a new flow in `Idle`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state.
    pub fn state(&self) -> SubmissionState {
        self.state
    }

    /// Number of confirm attempts so far.
    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    /// Message of the last failed attempt.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Whether the confirmation dialog is open.
    pub fn is_dialog_open(&self) -> bool {
        self.state.is_dialog_open()
    }

    /// Open the confirmation recap.
    ///
    /// Rejected without changing state when the cart is empty or no return
    /// date is set.
    pub fn request_review(
        &mut self,
        store: &LineItemStore,
        return_date: Option<NaiveDate>,
    ) -> Result<SubmissionState, CommerceError> {
        if self.state != SubmissionState::Idle {
            return Err(self.invalid(SubmissionState::ReviewPending));
        }
        if store.is_empty() {
            return Err(CommerceError::EmptyOrder);
        }
        if return_date.is_none() {
            return Err(CommerceError::ValidationError(
                "return date is required".to_string(),
            ));
        }
        self.transition(SubmissionState::ReviewPending)
    }

    /// Close the recap without submitting. The cart is untouched.
    pub fn cancel(&mut self) -> Result<SubmissionState, CommerceError> {
        match self.state {
            SubmissionState::ReviewPending | SubmissionState::Failed => {
                self.last_error = None;
                self.transition(SubmissionState::Idle)
            }
            _ => Err(self.invalid(SubmissionState::Idle)),
        }
    }

    /// Confirm the recap and start submitting.
    pub fn confirm(&mut self) -> Result<SubmissionState, CommerceError> {
        match self.state {
            SubmissionState::ReviewPending | SubmissionState::Failed => {
                self.attempts += 1;
                self.transition(SubmissionState::Submitting)
            }
            _ => Err(self.invalid(SubmissionState::Submitting)),
        }
    }

    /// Record that the backend accepted the order.
    pub fn succeed(&mut self) -> Result<SubmissionState, CommerceError> {
        if self.state != SubmissionState::Submitting {
            return Err(self.invalid(SubmissionState::Success));
        }
        self.last_error = None;
        self.transition(SubmissionState::Success)
    }

    /// Record a failed attempt.
    pub fn fail(&mut self, message: impl Into<String>) -> Result<SubmissionState, CommerceError> {
        if self.state != SubmissionState::Submitting {
            return Err(self.invalid(SubmissionState::Failed));
        }
        self.last_error = Some(message.into());
        self.transition(SubmissionState::Failed)
    }

    /// Return to `Idle` from any state.
    pub fn reset(&mut self) {
        self.state = SubmissionState::Idle;
        self.attempts = 0;
        self.last_error = None;
    }

    fn transition(&mut self, to: SubmissionState) -> Result<SubmissionState, CommerceError> {
        tracing::debug!(from = self.state.as_str(), to = to.as_str(), "submission transition");
        self.state = to;
        Ok(to)
    }

    fn invalid(&self, to: SubmissionState) -> CommerceError {
        CommerceError::InvalidTransition {
            from: self.state.as_str().to_string(),
            to: to.as_str().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ProductOption;
    use crate::entry::EntryType;
    use crate::ids::ProductId;
    use crate::money::{Currency, Money};

    fn today() -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(2024, 5, 1)
    }

    fn filled_store() -> LineItemStore {
        let mut store = LineItemStore::new();
        store.add(
            &ProductOption::new(ProductId::new("p1"), "Dahi", Money::new(100, Currency::INR), 0.0),
            EntryType::Return,
        );
        store
    }

    #[test]
    fn test_flow_creation() {
        let flow = SubmissionFlow::new();
        assert_eq!(flow.state(), SubmissionState::Idle);
        assert!(!flow.is_dialog_open());
    }

    #[test]
    fn test_empty_cart_never_opens_review() {
        let mut flow = SubmissionFlow::new();
        assert_eq!(
            flow.request_review(&LineItemStore::new(), today()),
            Err(CommerceError::EmptyOrder)
        );
        assert_eq!(flow.state(), SubmissionState::Idle);
    }

    #[test]
    fn test_missing_date_blocks_review() {
        let mut flow = SubmissionFlow::new();
        assert!(flow.request_review(&filled_store(), None).is_err());
        assert_eq!(flow.state(), SubmissionState::Idle);
    }

    #[test]
    fn test_happy_path() {
        let mut flow = SubmissionFlow::new();
        flow.request_review(&filled_store(), today()).unwrap();
        assert!(flow.is_dialog_open());
        flow.confirm().unwrap();
        assert_eq!(flow.state(), SubmissionState::Submitting);
        flow.succeed().unwrap();
        assert_eq!(flow.state(), SubmissionState::Success);
        assert!(!flow.is_dialog_open());
    }

    #[test]
    fn test_cancel_returns_to_idle() {
        let mut flow = SubmissionFlow::new();
        flow.request_review(&filled_store(), today()).unwrap();
        flow.cancel().unwrap();
        assert_eq!(flow.state(), SubmissionState::Idle);
    }

    #[test]
    fn test_failure_keeps_dialog_open_and_allows_retry() {
        let mut flow = SubmissionFlow::new();
        flow.request_review(&filled_store(), today()).unwrap();
        flow.confirm().unwrap();
        flow.fail("Wallet locked").unwrap();

        assert_eq!(flow.state(), SubmissionState::Failed);
        assert!(flow.is_dialog_open());
        assert_eq!(flow.last_error(), Some("Wallet locked"));

        flow.confirm().unwrap();
        assert_eq!(flow.attempts(), 2);
        flow.succeed().unwrap();
        assert_eq!(flow.last_error(), None);
    }

    #[test]
    fn test_invalid_transitions() {
        let mut flow = SubmissionFlow::new();
        assert!(matches!(
            flow.confirm(),
            Err(CommerceError::InvalidTransition { .. })
        ));
        assert!(flow.succeed().is_err());
        assert!(flow.fail("x").is_err());
        assert!(flow.cancel().is_err());
        assert_eq!(flow.state(), SubmissionState::Idle);

        flow.request_review(&filled_store(), today()).unwrap();
        assert!(flow.request_review(&filled_store(), today()).is_err());
    }
}
