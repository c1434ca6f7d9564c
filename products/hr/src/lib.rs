//! HR module: employee records and the service that owns their lifecycle.

mod employees;

pub use employees::{DbEmployeeService, EmployeeDto, EmployeeService, seed_demo_employees};

use sea_orm::DbErr;
use thiserror::Error;

pub type HrResult<T> = Result<T, HrError>;

#[derive(Debug, Error)]
pub enum HrError {
    #[error("employee {0} not found")]
    NotFound(i64),
    #[error("{0}")]
    Invalid(String),
    #[error("email {0} is already registered")]
    DuplicateEmail(String),
    #[error("database error: {0}")]
    Database(#[from] DbErr),
}
