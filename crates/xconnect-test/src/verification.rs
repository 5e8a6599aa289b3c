//! Verification helpers for testing lifecycle operations
//!
//! Provides assertion helpers over the call log of [`FakeXconnect`]

use thiserror::Error;

use crate::fake_api::{ApiCall, FakeOp, FakeXconnect};

/// Verification error types
#[derive(Error, Debug)]
pub enum VerificationError {
    #[error("Expected {expected} {op:?} calls, found {actual}")]
    CallCountMismatch {
        op: FakeOp,
        expected: usize,
        actual: usize,
    },

    #[error("Expected no remote mutations, found {0:?}")]
    UnexpectedMutations(Vec<ApiCall>),

    #[error("Expected {first:?} before {second:?}")]
    OrderViolation { first: FakeOp, second: FakeOp },

    #[error("No {0:?} call was recorded")]
    CallNotFound(FakeOp),
}

/// Result type for verification operations
pub type VerifyResult<T> = Result<T, VerificationError>;

/// Call-log verification helper
pub struct CallVerifier<'a> {
    fake: &'a FakeXconnect,
}

impl<'a> CallVerifier<'a> {
    /// Create a new verifier over a fake's call log
    pub fn new(fake: &'a FakeXconnect) -> Self {
        Self { fake }
    }

    /// Verify the number of calls of one kind
    pub fn assert_count(&self, op: FakeOp, expected: usize) -> VerifyResult<()> {
        let actual = self.fake.count(op);
        if actual != expected {
            return Err(VerificationError::CallCountMismatch {
                op,
                expected,
                actual,
            });
        }
        Ok(())
    }

    /// Verify that nothing changed remote state
    pub fn assert_no_mutations(&self) -> VerifyResult<()> {
        let mutations = self.fake.mutations();
        if !mutations.is_empty() {
            return Err(VerificationError::UnexpectedMutations(mutations));
        }
        Ok(())
    }

    /// Verify that the first `first` call precedes the first `second` call
    pub fn assert_order(&self, first: FakeOp, second: FakeOp) -> VerifyResult<()> {
        let calls = self.fake.calls();
        let position = |op: FakeOp| {
            calls
                .iter()
                .position(|call| call.op() == op)
                .ok_or(VerificationError::CallNotFound(op))
        };

        if position(first)? > position(second)? {
            return Err(VerificationError::OrderViolation { first, second });
        }
        Ok(())
    }

    /// Return the single mutation call, failing if there is not exactly one
    pub fn only_mutation(&self) -> VerifyResult<ApiCall> {
        let mut mutations = self.fake.mutations();
        if mutations.len() != 1 {
            return Err(VerificationError::UnexpectedMutations(mutations));
        }
        Ok(mutations.remove(0))
    }
}
