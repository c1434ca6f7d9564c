//! `/api/employees` endpoints. Each handler forwards to the injected
//! [`EmployeeService`] and maps the outcome to a response.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::get,
};
use platform_api::{ApiError, ApiResult, internal_error};
use products_hr::{EmployeeDto, HrError};
use tracing::instrument;

use crate::http::AppState;

pub const BASE_PATH: &str = "/api/employees";
pub const DELETED_MESSAGE: &str = "Employee deleted successfully";

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_employees).post(create_employee))
        .route(
            "/{id}",
            get(get_employee)
                .put(update_employee)
                .delete(delete_employee),
        )
}

fn api_error(err: HrError) -> ApiError {
    match err {
        HrError::NotFound(_) => ApiError::NotFound(err.to_string()),
        HrError::Invalid(reason) => ApiError::InvalidInput(reason),
        HrError::DuplicateEmail(_) => ApiError::Conflict(err.to_string()),
        HrError::Database(_) => internal_error(err),
    }
}

#[instrument(name = "http.create_employee", skip_all)]
async fn create_employee(
    State(state): State<AppState>,
    Json(employee): Json<EmployeeDto>,
) -> ApiResult<(StatusCode, Json<EmployeeDto>)> {
    let saved = state
        .employees
        .create_employee(employee)
        .await
        .map_err(api_error)?;
    Ok((StatusCode::CREATED, Json(saved)))
}

#[instrument(name = "http.get_employee", skip(state))]
async fn get_employee(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<EmployeeDto>> {
    let employee = state
        .employees
        .get_employee_by_id(id)
        .await
        .map_err(api_error)?;
    Ok(Json(employee))
}

#[instrument(name = "http.list_employees", skip_all)]
async fn list_employees(State(state): State<AppState>) -> ApiResult<Json<Vec<EmployeeDto>>> {
    let employees = state
        .employees
        .get_all_employees()
        .await
        .map_err(api_error)?;
    Ok(Json(employees))
}

#[instrument(name = "http.update_employee", skip(state, employee))]
async fn update_employee(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(employee): Json<EmployeeDto>,
) -> ApiResult<Json<EmployeeDto>> {
    let updated = state
        .employees
        .update_employee(id, employee)
        .await
        .map_err(api_error)?;
    Ok(Json(updated))
}

#[instrument(name = "http.delete_employee", skip(state))]
async fn delete_employee(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<&'static str> {
    state
        .employees
        .delete_employee(id)
        .await
        .map_err(api_error)?;
    Ok(DELETED_MESSAGE)
}
