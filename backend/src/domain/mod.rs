//! Domain primitives, services, and ports.
//!
//! Purpose: hold the calculator core (operation registry, exact decimal
//! evaluation) and the account and record types the adapters persist. Nothing
//! in here depends on actix or Diesel.
//!
//! Public surface:
//! - `lookup`, `list_supported`, `evaluate`, `evaluate_tag`: the pure core.
//! - `Calculation`, `NewCalculation`, `User`, `UserAccount`: records.
//! - `Error` / `ErrorCode`: transport-agnostic failures returned by services.
//! - `CalculationService`, `UserAccountService`: driving port implementations.

pub mod auth;
pub mod calculation;
pub mod calculation_service;
pub mod error;
pub mod evaluator;
pub mod operand;
pub mod operation;
pub mod ports;
pub mod trace_id;
pub mod user;
pub mod user_account_service;

pub use self::auth::{
    CredentialsValidationError, LoginCredentials, PASSWORD_MIN, PasswordChange, Registration,
};
pub use self::calculation::{
    Calculation, CalculationDraft, CalculationId, NewCalculation, PAGE_LIMIT_DEFAULT,
    PAGE_LIMIT_MAX, PageRequest, PageRequestError,
};
pub use self::calculation_service::CalculationService;
pub use self::error::{Error, ErrorCode, ErrorValidationError, TRACE_ID_HEADER};
pub use self::evaluator::{CalculationError, evaluate, evaluate_tag};
pub use self::operand::{OPERAND_PRECISION, OPERAND_SCALE, Operand, OperandError};
pub use self::operation::{BinaryOp, OperationKind, list_supported, lookup};
pub use self::trace_id::TraceId;
pub use self::user::{
    Email, NewUser, PasswordHash, User, UserAccount, UserId, UserValidationError, Username,
};
pub use self::user_account_service::UserAccountService;
