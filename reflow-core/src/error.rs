//! Errors surfaced to operator-facing callers

use crate::traits::StorageError;

/// Errors from profile and process setters
///
/// Every error leaves the previous state untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ProfileError {
    /// Target is a built-in profile
    NotEditable,
    /// Value or index outside the accepted bounds
    ValueRejected,
    /// Storage collaborator refused the write
    Storage(StorageError),
}

impl From<StorageError> for ProfileError {
    fn from(err: StorageError) -> Self {
        ProfileError::Storage(err)
    }
}

/// Rejected process parameter (bake timer out of range)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ValueRejected;
