use companies_core::error::AppError;
use companies_core::models::{Employee, NewEmployee};
use sqlx::{PgPool, Pool, Postgres};
use uuid::Uuid;

/// Repository for employees in PostgreSQL. Every lookup is scoped to a company.
#[derive(Clone)]
pub struct EmployeeRepository {
    pool: Pool<Postgres>,
}

impl EmployeeRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Employees of a company, ordered by name.
    pub async fn get_for_company(&self, company_id: Uuid) -> Result<Vec<Employee>, AppError> {
        let rows = sqlx::query_as::<_, EmployeeRow>(
            r#"
            SELECT id, name, age, position, company_id FROM employees
            WHERE company_id = $1
            ORDER BY name
            "#,
        )
        .bind(company_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    pub async fn get_for_company_by_id(
        &self,
        company_id: Uuid,
        id: Uuid,
    ) -> Result<Option<Employee>, AppError> {
        let row = sqlx::query_as::<_, EmployeeRow>(
            r#"
            SELECT id, name, age, position, company_id FROM employees
            WHERE company_id = $1 AND id = $2
            "#,
        )
        .bind(company_id)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(row.map(Into::into))
    }

    pub async fn create(
        &self,
        company_id: Uuid,
        employee: &NewEmployee,
    ) -> Result<Employee, AppError> {
        let row = sqlx::query_as::<_, EmployeeRow>(
            r#"
            INSERT INTO employees (name, age, position, company_id)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, age, position, company_id
            "#,
        )
        .bind(&employee.name)
        .bind(employee.age)
        .bind(&employee.position)
        .bind(company_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(row.into())
    }

    /// Persist name, age and position. Returns false if the employee no longer exists.
    pub async fn update(&self, employee: &Employee) -> Result<bool, AppError> {
        let result = sqlx::query(
            r#"
            UPDATE employees
            SET name = $3, age = $4, position = $5
            WHERE company_id = $1 AND id = $2
            "#,
        )
        .bind(employee.company_id)
        .bind(employee.id)
        .bind(&employee.name)
        .bind(employee.age)
        .bind(&employee.position)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(result.rows_affected() == 1)
    }

    pub async fn delete(&self, company_id: Uuid, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query(r#"DELETE FROM employees WHERE company_id = $1 AND id = $2"#)
            .bind(company_id)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(result.rows_affected() == 1)
    }
}

#[derive(sqlx::FromRow)]
pub(crate) struct EmployeeRow {
    id: Uuid,
    name: String,
    age: i32,
    position: String,
    company_id: Uuid,
}

impl From<EmployeeRow> for Employee {
    fn from(row: EmployeeRow) -> Self {
        Employee {
            id: row.id,
            name: row.name,
            age: row.age,
            position: row.position,
            company_id: row.company_id,
        }
    }
}
