//! # Error Types
//!
//! Domain-specific error types for vitrine-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  vitrine-core errors (this file)                                       │
//! │  ├── CoreError        - Domain rule violations                         │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  vitrine-db errors (separate crate)                                    │
//! │  └── DbError          - Storage and SQL failures                       │
//! │                                                                         │
//! │  App errors                                                            │
//! │  ├── ApiError         - storefront `{code, message}` body              │
//! │  └── EndpointError    - catalog-api failure envelope                   │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → StoreError → ApiError → Browser   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Not-found is deliberately absent from [`CoreError`]: updating or removing
//! an unknown identifier is a no-op that the collection types signal with
//! `None` / `false`.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Domain rule violations.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Input validation failed (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Adding a hero image would exceed the maximum.
    ///
    /// ## When This Occurs
    /// - `add_image` with three images already configured
    /// - `reorder` with more than three images
    #[error("Hero banner cannot have more than {max} images")]
    HeroCapacityExceeded { max: usize },

    /// Removing a hero image would leave fewer than the minimum.
    ///
    /// ## When This Occurs
    /// - `delete_image` while a single image remains
    /// - `reorder` with an empty sequence
    #[error("Hero banner needs at least {min} image")]
    HeroMinimumImages { min: usize },

    /// Submitted admin credential does not match.
    #[error("Invalid admin password")]
    InvalidCredential,

    /// Operation requires a logged-in admin session.
    #[error("Admin session required")]
    NotAuthenticated,
}

impl CoreError {
    /// True for the two hero image bound violations.
    pub fn is_capacity(&self) -> bool {
        matches!(
            self,
            CoreError::HeroCapacityExceeded { .. } | CoreError::HeroMinimumImages { .. }
        )
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Raised before any state is touched, so a failed validation never
/// leaves a half-applied mutation behind.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or blank.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Duplicate value (e.g., product id already in the collection).
    #[error("{field} '{value}' already exists")]
    Duplicate { field: String, value: String },

    /// Value is not in the allowed set.
    #[error("{field} must be one of: {allowed:?}")]
    NotAllowed { field: String, allowed: Vec<String> },
}

impl ValidationError {
    /// Shorthand for [`ValidationError::Required`].
    pub fn required(field: impl Into<String>) -> Self {
        ValidationError::Required {
            field: field.into(),
        }
    }
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
