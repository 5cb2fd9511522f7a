use thiserror::Error;

use crate::services::endpoints;
use crate::services::{ApiError, Backend};
use crate::stores::local_store::{clear_pending_email, KeyValueStore};

/// Number of cells in the signup code
pub const OTP_LENGTH: usize = 8;

/// Shown for any failed verification
pub const VERIFY_FAILED_MESSAGE: &str = "Something went wrong. Please try later";

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SignupError {
    #[error("Enter the 8 digit code")]
    InvalidCode,
    #[error("Something went wrong. Please try later")]
    Api(#[from] ApiError),
}

/// Code entry state: one digit per cell
#[derive(Debug, Clone, PartialEq)]
pub struct OtpCode {
    cells: Vec<String>,
}

impl Default for OtpCode {
    fn default() -> Self {
        Self {
            cells: vec![String::new(); OTP_LENGTH],
        }
    }
}

impl OtpCode {
    pub fn cells(&self) -> &[String] {
        &self.cells
    }

    /// Set cell `index` from raw input, keeping only its last digit.
    /// Returns true when the cell now holds a digit.
    pub fn set_cell(&mut self, index: usize, input: &str) -> bool {
        let Some(cell) = self.cells.get_mut(index) else {
            return false;
        };
        match input.chars().rev().find(|c| c.is_ascii_digit()) {
            Some(digit) => {
                *cell = digit.to_string();
                true
            }
            None => {
                cell.clear();
                false
            }
        }
    }

    /// Spread a pasted code across the cells starting at `index`
    pub fn paste(&mut self, index: usize, input: &str) {
        let digits = input.chars().filter(|c| c.is_ascii_digit());
        for (cell, digit) in self.cells.iter_mut().skip(index).zip(digits) {
            *cell = digit.to_string();
        }
    }

    pub fn is_complete(&self) -> bool {
        self.cells.iter().all(|c| c.len() == 1 && c.chars().all(|ch| ch.is_ascii_digit()))
    }

    pub fn joined(&self) -> String {
        self.cells.concat()
    }
}

/// Submit the code; on success the pending email is forgotten
pub async fn verify(
    backend: &dyn Backend,
    store: &dyn KeyValueStore,
    code: &OtpCode,
) -> Result<(), SignupError> {
    if !code.is_complete() {
        return Err(SignupError::InvalidCode);
    }

    endpoints::verify_signup(backend, &code.joined()).await.map_err(|e| {
        log::error!("Signup verification failed: {}", e);
        SignupError::Api(e)
    })?;

    clear_pending_email(store);
    log::info!("Signup verified");
    Ok(())
}
