//! Mapping profile between persistence entities and transfer objects.
//!
//! Every conversion here is pure. Payloads are validated before they are
//! mapped, so none of these functions can fail.

use companies_core::models::{Company, Employee, NewCompany, NewEmployee};

use crate::dto::{
    CompanyDto, CompanyForCreationDto, CompanyForUpdateDto, CompanySummaryDto, EmployeeDto,
    EmployeeForCreationDto, EmployeeForUpdateDto,
};

/// `address` and `country` joined by a single space.
pub fn full_address(address: &str, country: &str) -> String {
    format!("{address} {country}")
}

impl From<&Company> for CompanyDto {
    fn from(c: &Company) -> Self {
        Self {
            id: c.id,
            name: c.name.clone(),
            full_address: full_address(&c.address, &c.country),
        }
    }
}

impl From<Company> for CompanyDto {
    fn from(c: Company) -> Self {
        Self::from(&c)
    }
}

impl From<&Company> for CompanySummaryDto {
    fn from(c: &Company) -> Self {
        Self {
            id: c.id,
            name: c.name.clone(),
        }
    }
}

impl From<&Employee> for EmployeeDto {
    fn from(e: &Employee) -> Self {
        Self {
            id: e.id,
            name: e.name.clone(),
            age: e.age,
            position: e.position.clone(),
        }
    }
}

impl From<Employee> for EmployeeDto {
    fn from(e: Employee) -> Self {
        Self {
            id: e.id,
            name: e.name,
            age: e.age,
            position: e.position,
        }
    }
}

impl From<&EmployeeForCreationDto> for NewEmployee {
    fn from(dto: &EmployeeForCreationDto) -> Self {
        Self {
            name: dto.name.clone(),
            age: dto.age.unwrap_or_default(),
            position: dto.position.clone(),
        }
    }
}

impl From<&CompanyForCreationDto> for NewCompany {
    fn from(dto: &CompanyForCreationDto) -> Self {
        Self {
            name: dto.name.clone(),
            address: dto.address.clone(),
            country: dto.country.clone(),
        }
    }
}

impl CompanyForCreationDto {
    /// Nested employees to insert alongside the company.
    pub fn new_employees(&self) -> Vec<NewEmployee> {
        self.employees
            .iter()
            .flatten()
            .map(NewEmployee::from)
            .collect()
    }
}

impl CompanyForUpdateDto {
    /// Overwrite the company's fields; the id is left alone.
    pub fn apply_to(&self, company: &mut Company) {
        company.name = self.name.clone();
        company.address = self.address.clone();
        company.country = self.country.clone();
    }

    /// Employees the update adds to the company.
    pub fn new_employees(&self) -> Vec<NewEmployee> {
        self.employees
            .iter()
            .flatten()
            .map(NewEmployee::from)
            .collect()
    }
}

impl EmployeeForUpdateDto {
    /// Overwrite the employee's fields; id and company are left alone.
    pub fn apply_to(&self, employee: &mut Employee) {
        employee.name = self.name.clone();
        if let Some(age) = self.age {
            employee.age = age;
        }
        employee.position = self.position.clone();
    }
}

/// Reverse mapping used to build the document a PATCH is applied to.
impl From<&Employee> for EmployeeForUpdateDto {
    fn from(e: &Employee) -> Self {
        Self {
            name: e.name.clone(),
            age: Some(e.age),
            position: e.position.clone(),
        }
    }
}
