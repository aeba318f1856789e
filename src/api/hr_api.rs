// ==========================================
// FrameInsight - 인사 정보 API
// ==========================================
// 책임: 직원 등록/조회/퇴사 처리, 월 원가 시뮬레이션
// 구조: API 계층 → Repository + ConfigManager + LaborCostEngine
// ==========================================

use std::sync::Arc;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::api::error::{ApiError, ApiResult};
use crate::config::config_manager::ConfigManager;
use crate::domain::employee::Employee;
use crate::domain::types::EmploymentType;
use crate::engine::labor_cost::LaborCostEngine;
use crate::repository::employee_repo::EmployeeRepository;

// ==========================================
// EmployeeWithCost - 직원 + 원가 조합
// ==========================================
/// 목록 화면용 직원 정보 (급여 표시액 + 월 원가)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmployeeWithCost {
    pub id: String,
    pub name: String,
    pub email: Option<String>,
    pub dept: String,
    pub rank: String,
    pub employment_type: EmploymentType,

    /// 급여 정보 표시액 (정규직 연봉 / 프리랜서 월 계약액)
    pub display_amount: i64,

    /// 월 인건비 원가 (원)
    pub monthly_cost: i64,
}

// ==========================================
// HrApi - 인사 정보 API
// ==========================================

/// 인사 정보 API
///
/// 책임:
/// 1. 직원 등록 (입력 검증 포함)
/// 2. 직원 목록/검색 조회 (월 원가 포함)
/// 3. 퇴사/복직 처리 (소프트 삭제)
/// 4. 월 인건비 원가 시뮬레이션
pub struct HrApi {
    employee_repo: Arc<EmployeeRepository>,
    config_manager: Arc<ConfigManager>,
    cost_engine: LaborCostEngine,
}

impl HrApi {
    pub fn new(employee_repo: Arc<EmployeeRepository>, config_manager: Arc<ConfigManager>) -> Self {
        Self {
            employee_repo,
            config_manager,
            cost_engine: LaborCostEngine::new(),
        }
    }

    // ==========================================
    // 등록/수정
    // ==========================================

    /// 직원 등록
    ///
    /// 검증:
    /// - 사번/성명 비어 있지 않음
    /// - 보상 기준은 고용 형태당 하나만 활성화 (정규직 ↔ 연봉,
    ///   프리랜서 ↔ 계약 이력)
    /// - 계약 구간은 시작일 ≤ 종료일
    pub fn register_employee(&self, employee: &Employee) -> ApiResult<()> {
        Self::validate_employee(employee)?;
        self.employee_repo.insert(employee)?;
        info!(employee_id = %employee.id, dept = %employee.dept, "직원 등록 완료");
        Ok(())
    }

    /// 직원 정보 수정
    pub fn update_employee(&self, employee: &Employee) -> ApiResult<()> {
        Self::validate_employee(employee)?;
        self.employee_repo.update(employee)?;
        Ok(())
    }

    /// 퇴사 처리 (archive) / 복직 처리 (restore)
    pub fn set_archived(&self, employee_id: &str, archived: bool) -> ApiResult<()> {
        if employee_id.trim().is_empty() {
            return Err(ApiError::InvalidInput("사번이 비어 있습니다".to_string()));
        }
        self.employee_repo.set_archived(employee_id, archived)?;
        info!(employee_id = %employee_id, archived, "직원 상태 변경");
        Ok(())
    }

    // ==========================================
    // 조회
    // ==========================================

    /// 직원 단건 조회
    pub fn get_employee(&self, employee_id: &str) -> ApiResult<Employee> {
        self.employee_repo
            .find_by_id(employee_id)?
            .ok_or_else(|| ApiError::NotFound(format!("Employee (id={})", employee_id)))
    }

    /// 직원 목록 조회 (월 원가 포함)
    ///
    /// # 매개변수
    /// - archived: true면 퇴사자 목록
    /// - eval_date: 원가 평가 기준일
    pub fn list_employees(
        &self,
        archived: bool,
        eval_date: NaiveDate,
    ) -> ApiResult<Vec<EmployeeWithCost>> {
        let employees = self.employee_repo.list(archived)?;
        self.with_costs(employees, eval_date)
    }

    /// 이름/부서 검색 (월 원가 포함)
    pub fn search_employees(
        &self,
        term: &str,
        eval_date: NaiveDate,
    ) -> ApiResult<Vec<EmployeeWithCost>> {
        let employees = self.employee_repo.search(term)?;
        self.with_costs(employees, eval_date)
    }

    // ==========================================
    // 원가 시뮬레이션
    // ==========================================

    /// 직원 월 원가 시뮬레이션
    ///
    /// 보상 데이터가 없으면 0원 (에러 아님).
    pub fn simulate_monthly_cost(&self, employee: &Employee, eval_date: NaiveDate) -> ApiResult<i64> {
        let standards = self.config_manager.cost_standards()?;
        Ok(self.cost_engine.monthly_cost(employee, &standards, eval_date))
    }

    /// 재직자 월 원가 총계
    pub fn total_monthly_cost(&self, eval_date: NaiveDate) -> ApiResult<i64> {
        Ok(self
            .list_employees(false, eval_date)?
            .iter()
            .map(|e| e.monthly_cost)
            .sum())
    }

    // ==========================================
    // 내부 헬퍼
    // ==========================================

    fn with_costs(
        &self,
        employees: Vec<Employee>,
        eval_date: NaiveDate,
    ) -> ApiResult<Vec<EmployeeWithCost>> {
        let standards = self.config_manager.cost_standards()?;
        Ok(employees
            .into_iter()
            .map(|emp| {
                let monthly_cost = self.cost_engine.monthly_cost(&emp, &standards, eval_date);
                EmployeeWithCost {
                    display_amount: emp.display_amount(eval_date),
                    monthly_cost,
                    id: emp.id,
                    name: emp.name,
                    email: emp.email,
                    dept: emp.dept,
                    rank: emp.rank,
                    employment_type: emp.employment_type,
                }
            })
            .collect())
    }

    fn validate_employee(employee: &Employee) -> ApiResult<()> {
        if employee.id.trim().is_empty() {
            return Err(ApiError::InvalidInput("사번이 비어 있습니다".to_string()));
        }
        if employee.name.trim().is_empty() {
            return Err(ApiError::InvalidInput(
                "직원 성명을 입력해주세요".to_string(),
            ));
        }
        match employee.employment_type {
            EmploymentType::Regular => {
                if !employee.contracts.is_empty() {
                    return Err(ApiError::ValidationError(
                        "정규직은 계약 이력을 가질 수 없습니다".to_string(),
                    ));
                }
            }
            EmploymentType::Freelance => {
                if !employee.salaries.is_empty() {
                    return Err(ApiError::ValidationError(
                        "프리랜서는 연봉 정보를 가질 수 없습니다".to_string(),
                    ));
                }
            }
        }
        for contract in &employee.contracts {
            if contract.start_date > contract.end_date {
                return Err(ApiError::ValidationError(format!(
                    "계약 구간이 올바르지 않습니다 (seq={}): 시작일이 종료일보다 늦습니다",
                    contract.seq
                )));
            }
            if contract.monthly_amount < 0 {
                return Err(ApiError::ValidationError(format!(
                    "월 계약 금액은 음수가 될 수 없습니다 (seq={})",
                    contract.seq
                )));
            }
        }
        for (year, amount) in &employee.salaries {
            if *amount < 0 {
                return Err(ApiError::ValidationError(format!(
                    "연봉은 음수가 될 수 없습니다 ({}년)",
                    year
                )));
            }
        }
        Ok(())
    }
}
