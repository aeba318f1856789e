// ==========================================
// 테스트 데이터 빌더 - 통합 테스트용
// ==========================================

use chrono::NaiveDate;
use frame_insight::domain::assignment::Assignment;
use frame_insight::domain::employee::{ContractPeriod, Employee};
use frame_insight::domain::project::Project;
use frame_insight::domain::types::{EmploymentType, ProjectStatus, TechGrade};
use std::collections::BTreeMap;

/// 날짜 리터럴 축약
pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

// ==========================================
// EmployeeBuilder
// ==========================================

/// 테스트용 직원 빌더
pub struct EmployeeBuilder {
    employee: Employee,
}

impl EmployeeBuilder {
    pub fn new(id: &str, name: &str) -> Self {
        Self {
            employee: Employee {
                id: id.to_string(),
                name: name.to_string(),
                email: None,
                dept: "플랫폼 개발팀".to_string(),
                rank: "사원".to_string(),
                tech_grade: TechGrade::Junior,
                hire_year: 2024,
                employment_type: EmploymentType::Regular,
                salaries: BTreeMap::new(),
                contracts: Vec::new(),
                archived: false,
            },
        }
    }

    pub fn dept(mut self, dept: &str) -> Self {
        self.employee.dept = dept.to_string();
        self
    }

    pub fn rank(mut self, rank: &str) -> Self {
        self.employee.rank = rank.to_string();
        self
    }

    pub fn tech_grade(mut self, grade: TechGrade) -> Self {
        self.employee.tech_grade = grade;
        self
    }

    pub fn hire_year(mut self, year: i32) -> Self {
        self.employee.hire_year = year;
        self
    }

    /// 정규직 연봉 등록
    pub fn salary(mut self, fiscal_year: i32, annual_amount: i64) -> Self {
        self.employee.salaries.insert(fiscal_year, annual_amount);
        self
    }

    /// 프리랜서로 전환 + 계약 구간 추가
    pub fn freelance_contract(
        mut self,
        seq: i32,
        start: NaiveDate,
        end: NaiveDate,
        monthly_amount: i64,
    ) -> Self {
        self.employee.employment_type = EmploymentType::Freelance;
        self.employee.salaries.clear();
        self.employee.contracts.push(ContractPeriod {
            seq,
            start_date: start,
            end_date: end,
            monthly_amount,
        });
        self
    }

    pub fn archived(mut self) -> Self {
        self.employee.archived = true;
        self
    }

    pub fn build(self) -> Employee {
        self.employee
    }
}

// ==========================================
// ProjectBuilder
// ==========================================

/// 테스트용 프로젝트 빌더
pub struct ProjectBuilder {
    project: Project,
}

impl ProjectBuilder {
    pub fn new(code: &str, name: &str) -> Self {
        Self {
            project: Project {
                code: code.to_string(),
                name: name.to_string(),
                client: "LG CNS".to_string(),
                contract_amount: 732_000_000,
                execution_rate: 0.9,
                status: ProjectStatus::InProgress,
                sales_dept: "DX 사업본부".to_string(),
                sales_rate: 10.0,
                exec_dept: "플랫폼 개발팀".to_string(),
                exec_rate: 90.0,
                start_date: None,
                end_date: None,
                archived: false,
            },
        }
    }

    pub fn client(mut self, client: &str) -> Self {
        self.project.client = client.to_string();
        self
    }

    pub fn contract_amount(mut self, amount: i64) -> Self {
        self.project.contract_amount = amount;
        self
    }

    pub fn execution_rate(mut self, rate: f64) -> Self {
        self.project.execution_rate = rate;
        self
    }

    pub fn split(mut self, sales_dept: &str, sales_rate: f64, exec_dept: &str, exec_rate: f64) -> Self {
        self.project.sales_dept = sales_dept.to_string();
        self.project.sales_rate = sales_rate;
        self.project.exec_dept = exec_dept.to_string();
        self.project.exec_rate = exec_rate;
        self
    }

    pub fn status(mut self, status: ProjectStatus) -> Self {
        self.project.status = status;
        self
    }

    pub fn build(self) -> Project {
        self.project
    }
}

// ==========================================
// AssignmentBuilder
// ==========================================

/// 테스트용 배정 빌더
pub struct AssignmentBuilder {
    assignment: Assignment,
}

impl AssignmentBuilder {
    pub fn new(employee_id: &str, project_code: &str) -> Self {
        Self {
            assignment: Assignment {
                employee_id: employee_id.to_string(),
                project_code: project_code.to_string(),
                year: 2026,
                month: 10,
                man_month: 1.0,
            },
        }
    }

    pub fn period(mut self, year: i32, month: u32) -> Self {
        self.assignment.year = year;
        self.assignment.month = month;
        self
    }

    pub fn man_month(mut self, mm: f64) -> Self {
        self.assignment.man_month = mm;
        self
    }

    pub fn build(self) -> Assignment {
        self.assignment
    }
}
