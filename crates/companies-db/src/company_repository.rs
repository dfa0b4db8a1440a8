use companies_core::error::AppError;
use companies_core::models::{Company, Employee, NewCompany, NewEmployee};
use sqlx::{PgConnection, PgPool, Pool, Postgres, Transaction};
use uuid::Uuid;

use crate::employee_repository::EmployeeRow;

/// Repository for companies in PostgreSQL.
#[derive(Clone)]
pub struct CompanyRepository {
    pool: Pool<Postgres>,
}

impl CompanyRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// All companies, ordered by name.
    pub async fn get_all(&self) -> Result<Vec<Company>, AppError> {
        let rows = sqlx::query_as::<_, CompanyRow>(
            r#"SELECT id, name, address, country FROM companies ORDER BY name"#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<Option<Company>, AppError> {
        let row = sqlx::query_as::<_, CompanyRow>(
            r#"SELECT id, name, address, country FROM companies WHERE id = $1"#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(row.map(Into::into))
    }

    /// Companies whose id is in `ids`, ordered by name. Unknown ids are skipped.
    pub async fn get_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Company>, AppError> {
        let rows = sqlx::query_as::<_, CompanyRow>(
            r#"
            SELECT id, name, address, country FROM companies
            WHERE id = ANY($1)
            ORDER BY name
            "#,
        )
        .bind(ids)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    pub async fn create(&self, company: &NewCompany) -> Result<Company, AppError> {
        let (created, _) = self.create_with_employees(company, &[]).await?;
        Ok(created)
    }

    /// Insert a company and its initial employees in one transaction.
    pub async fn create_with_employees(
        &self,
        company: &NewCompany,
        employees: &[NewEmployee],
    ) -> Result<(Company, Vec<Employee>), AppError> {
        let mut tx = self.begin().await?;
        let created = insert_company(&mut tx, company, employees).await?;
        commit(tx).await?;

        tracing::debug!(company_id = %created.0.id, employees = created.1.len(), "Company created");
        Ok(created)
    }

    /// Insert several companies with their employees. Either all of them
    /// are stored or none is.
    pub async fn create_many(
        &self,
        companies: &[(NewCompany, Vec<NewEmployee>)],
    ) -> Result<Vec<(Company, Vec<Employee>)>, AppError> {
        let mut tx = self.begin().await?;
        let mut created = Vec::with_capacity(companies.len());
        for (company, employees) in companies {
            created.push(insert_company(&mut tx, company, employees).await?);
        }
        commit(tx).await?;

        tracing::debug!(companies = created.len(), "Company collection created");
        Ok(created)
    }

    /// Persist name, address and country of an existing company.
    /// Returns false if the company no longer exists.
    pub async fn update(&self, company: &Company) -> Result<bool, AppError> {
        self.update_with_employees(company, &[]).await
    }

    /// Update a company and add new employees to it in one transaction.
    /// Returns false, writing nothing, if the company no longer exists.
    pub async fn update_with_employees(
        &self,
        company: &Company,
        employees: &[NewEmployee],
    ) -> Result<bool, AppError> {
        let mut tx = self.begin().await?;

        let result = sqlx::query(
            r#"
            UPDATE companies
            SET name = $2, address = $3, country = $4
            WHERE id = $1
            "#,
        )
        .bind(company.id)
        .bind(&company.name)
        .bind(&company.address)
        .bind(&company.country)
        .execute(&mut *tx)
        .await
        .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        if result.rows_affected() != 1 {
            return Ok(false);
        }

        insert_employees(&mut tx, company.id, employees).await?;
        commit(tx).await?;
        Ok(true)
    }

    /// Delete a company; its employees go with it.
    pub async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query(r#"DELETE FROM companies WHERE id = $1"#)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(result.rows_affected() == 1)
    }
}

impl CompanyRepository {
    async fn begin(&self) -> Result<Transaction<'static, Postgres>, AppError> {
        self.pool
            .begin()
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }
}

async fn commit(tx: Transaction<'_, Postgres>) -> Result<(), AppError> {
    tx.commit()
        .await
        .map_err(|e| AppError::DatabaseError(e.to_string()))
}

async fn insert_company(
    conn: &mut PgConnection,
    company: &NewCompany,
    employees: &[NewEmployee],
) -> Result<(Company, Vec<Employee>), AppError> {
    let created: Company = sqlx::query_as::<_, CompanyRow>(
        r#"
        INSERT INTO companies (name, address, country)
        VALUES ($1, $2, $3)
        RETURNING id, name, address, country
        "#,
    )
    .bind(&company.name)
    .bind(&company.address)
    .bind(&company.country)
    .fetch_one(&mut *conn)
    .await
    .map_err(|e| AppError::DatabaseError(e.to_string()))?
    .into();

    let staff = insert_employees(conn, created.id, employees).await?;
    Ok((created, staff))
}

async fn insert_employees(
    conn: &mut PgConnection,
    company_id: Uuid,
    employees: &[NewEmployee],
) -> Result<Vec<Employee>, AppError> {
    let mut staff = Vec::with_capacity(employees.len());
    for employee in employees {
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
        .fetch_one(&mut *conn)
        .await
        .map_err(|e| AppError::DatabaseError(e.to_string()))?;
        staff.push(row.into());
    }
    Ok(staff)
}

// -- Internal row type for sqlx deserialization --

#[derive(sqlx::FromRow)]
struct CompanyRow {
    id: Uuid,
    name: String,
    address: String,
    country: String,
}

impl From<CompanyRow> for Company {
    fn from(row: CompanyRow) -> Self {
        Company {
            id: row.id,
            name: row.name,
            address: row.address,
            country: row.country,
        }
    }
}
