//! Request body sent to the verification backend. The code is a one-time
//! secret, so `Debug` never prints it.

use super::code::CodeFields;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationPayload {
    pub code: String,
    pub email: String,
}

impl VerificationPayload {
    #[must_use]
    pub fn new(fields: &CodeFields, email: &str) -> Self {
        Self {
            code: fields.code(),
            email: email.to_string(),
        }
    }
}

impl fmt::Debug for VerificationPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VerificationPayload")
            .field("code", &"***")
            .field("email", &self.email)
            .finish()
    }
}
