//! # Domain Errors
//!
//! Typed domain error definitions.
//!
//! # Error Code Ranges
//!
//! - **1000-1999**: Field validation errors
//! - **2000-2999**: Quota errors
//! - **3000-3999**: Arithmetic errors
//!
//! The `Display` text of each variant is the message shown to API clients.
//!
//! # Examples
//!
//! ```
//! use contas_api::domain::errors::DomainError;
//!
//! let error = DomainError::NonPositiveAmount;
//! assert_eq!(error.code(), 1001);
//! assert!(error.is_validation());
//! ```

use thiserror::Error;

/// Domain-level rule violation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    // ========================================================================
    // Validation Errors (1000-1999)
    // ========================================================================
    /// Amount is zero or negative.
    #[error("Valor deve ser positivo")]
    NonPositiveAmount,

    /// Description is blank after trimming.
    #[error("Descrição não pode ser vazia")]
    EmptyDescription,

    /// Kind is neither `Pagar` nor `Receber`.
    #[error("Tipo deve ser 'Pagar' ou 'Receber'")]
    InvalidKind(String),

    // ========================================================================
    // Quota Errors (2000-2999)
    // ========================================================================
    /// The month of the due date already holds more entries than allowed.
    #[error("Limite de contas atingido para o mês")]
    MonthlyQuotaExceeded {
        /// Due-date year.
        year: i32,
        /// Due-date month (1-12).
        month: u32,
        /// Configured limit.
        limit: u64,
    },

    // ========================================================================
    // Arithmetic Errors (3000-3999)
    // ========================================================================
    /// A monthly forecast total does not fit in a `Decimal`.
    #[error("Total do mês {month} excede o valor máximo representável")]
    ForecastOverflow {
        /// Month whose total overflowed (1-12).
        month: u32,
    },
}

impl DomainError {
    /// Returns the numeric error code.
    #[must_use]
    pub const fn code(&self) -> u32 {
        match self {
            Self::NonPositiveAmount => 1001,
            Self::EmptyDescription => 1002,
            Self::InvalidKind(_) => 1003,
            Self::MonthlyQuotaExceeded { .. } => 2001,
            Self::ForecastOverflow { .. } => 3001,
        }
    }

    /// Returns true for field validation errors.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(self.code(), 1000..=1999)
    }

    /// Returns true for quota errors.
    #[must_use]
    pub const fn is_quota(&self) -> bool {
        matches!(self.code(), 2000..=2999)
    }

    /// Returns true for arithmetic errors.
    #[must_use]
    pub const fn is_arithmetic(&self) -> bool {
        matches!(self.code(), 3000..=3999)
    }
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
