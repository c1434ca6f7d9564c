use async_trait::async_trait;
use entity::employees;
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, DbErr, EntityTrait, QueryOrder, Set, SqlErr,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use crate::{HrError, HrResult};

/// Flat employee record exchanged over the API boundary.
///
/// `id` is assigned by the database; it is ignored on create and on update
/// (the path id is authoritative there).
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeDto {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

impl EmployeeDto {
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            id: None,
            first_name: first_name.into(),
            last_name: last_name.into(),
            email: email.into(),
        }
    }

    fn validate(&self) -> HrResult<()> {
        let missing = [
            ("first name", &self.first_name),
            ("last name", &self.last_name),
            ("email", &self.email),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(field, _)| field)
        .collect::<Vec<_>>();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(HrError::Invalid(format!("{} required", missing.join(", "))))
        }
    }
}

impl From<employees::Model> for EmployeeDto {
    fn from(model: employees::Model) -> Self {
        Self {
            id: Some(model.id),
            first_name: model.first_name,
            last_name: model.last_name,
            email: model.email,
        }
    }
}

/// Employee lifecycle operations consumed by the HTTP layer.
#[async_trait]
pub trait EmployeeService: Send + Sync {
    async fn create_employee(&self, employee: EmployeeDto) -> HrResult<EmployeeDto>;
    async fn get_employee_by_id(&self, id: i64) -> HrResult<EmployeeDto>;
    async fn get_all_employees(&self) -> HrResult<Vec<EmployeeDto>>;
    async fn update_employee(&self, id: i64, employee: EmployeeDto) -> HrResult<EmployeeDto>;
    async fn delete_employee(&self, id: i64) -> HrResult<()>;
}

/// [`EmployeeService`] backed by the `employees` table.
#[derive(Clone, Debug)]
pub struct DbEmployeeService {
    pool: DatabaseConnection,
}

impl DbEmployeeService {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }

    async fn find(&self, id: i64) -> HrResult<employees::Model> {
        employees::Entity::find_by_id(id)
            .one(&self.pool)
            .await?
            .ok_or(HrError::NotFound(id))
    }
}

fn write_error(err: DbErr, email: &str) -> HrError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => HrError::DuplicateEmail(email.to_string()),
        _ => HrError::Database(err),
    }
}

/// The row can vanish between the read and the write of an update.
fn update_error(err: DbErr, id: i64, email: &str) -> HrError {
    match err {
        DbErr::RecordNotUpdated => HrError::NotFound(id),
        err => write_error(err, email),
    }
}

#[async_trait]
impl EmployeeService for DbEmployeeService {
    #[instrument(name = "hr.create_employee", skip_all)]
    async fn create_employee(&self, employee: EmployeeDto) -> HrResult<EmployeeDto> {
        employee.validate()?;
        let model = employees::ActiveModel {
            first_name: Set(employee.first_name),
            last_name: Set(employee.last_name),
            email: Set(employee.email.clone()),
            ..Default::default()
        }
        .insert(&self.pool)
        .await
        .map_err(|err| write_error(err, &employee.email))?;
        info!(employee_id = model.id, "employee created");
        Ok(model.into())
    }

    #[instrument(name = "hr.get_employee", skip(self))]
    async fn get_employee_by_id(&self, id: i64) -> HrResult<EmployeeDto> {
        self.find(id).await.map(Into::into)
    }

    #[instrument(name = "hr.list_employees", skip_all)]
    async fn get_all_employees(&self) -> HrResult<Vec<EmployeeDto>> {
        let rows = employees::Entity::find()
            .order_by_asc(employees::Column::Id)
            .all(&self.pool)
            .await?;
        debug!(count = rows.len(), "employees loaded");
        Ok(rows.into_iter().map(Into::into).collect())
    }

    #[instrument(name = "hr.update_employee", skip(self, employee))]
    async fn update_employee(&self, id: i64, employee: EmployeeDto) -> HrResult<EmployeeDto> {
        employee.validate()?;
        let mut active: employees::ActiveModel = self.find(id).await?.into();
        active.first_name = Set(employee.first_name);
        active.last_name = Set(employee.last_name);
        active.email = Set(employee.email.clone());
        let model = active
            .update(&self.pool)
            .await
            .map_err(|err| update_error(err, id, &employee.email))?;
        info!(employee_id = id, "employee updated");
        Ok(model.into())
    }

    #[instrument(name = "hr.delete_employee", skip(self))]
    async fn delete_employee(&self, id: i64) -> HrResult<()> {
        let result = employees::Entity::delete_by_id(id).exec(&self.pool).await?;
        if result.rows_affected == 0 {
            return Err(HrError::NotFound(id));
        }
        info!(employee_id = id, "employee deleted");
        Ok(())
    }
}

const DEMO_EMPLOYEES: [(&str, &str, &str); 5] = [
    ("Ramnesh", "Tendulkar", "ramnesh@example.com"),
    ("Sai", "Tendulkar", "sai@example.com"),
    ("Teja", "Tendulkar", "teja@example.com"),
    ("Reddy", "Tendulkar", "reddy@example.com"),
    ("Yeldandi", "Tendulkar", "yeldandi@example.com"),
];

/// Insert the demo roster when no employees exist yet. Returns how many rows
/// were created.
pub async fn seed_demo_employees(service: &dyn EmployeeService) -> HrResult<usize> {
    if !service.get_all_employees().await?.is_empty() {
        info!("employees already present; skipping seed");
        return Ok(0);
    }
    for (first, last, email) in DEMO_EMPLOYEES {
        service
            .create_employee(EmployeeDto::new(first, last, email))
            .await?;
    }
    Ok(DEMO_EMPLOYEES.len())
}
