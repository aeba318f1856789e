// ==========================================
// FrameInsight - 기준정보 API
// ==========================================
// 책임: 원가 기준표/전사 설정/부서 목록 관리, 월별 목표와 마감,
//       부서 삭제 시 인원 이동
// ==========================================

use std::sync::Arc;

use chrono::NaiveDate;
use tracing::info;

use crate::api::error::{ApiError, ApiResult};
use crate::config::config_manager::ConfigManager;
use crate::domain::standards::{CompanySettings, CostStandard, MonthlyTarget, TargetItem};
use crate::domain::types::CloseState;
use crate::engine::labor_cost::LaborCostEngine;
use crate::repository::employee_repo::EmployeeRepository;
use crate::repository::target_repo::TargetRepository;

// ==========================================
// StandardInfoApi - 기준정보 API
// ==========================================

/// 기준정보 API
///
/// 책임:
/// 1. 원가 기준표 조회/저장 (요율 검증 포함)
/// 2. 전사 설정 조회/저장
/// 3. 부서 추가/삭제 (소속 인원은 지정 부서로 이동)
/// 4. 월별 목표 관리와 마감 상태 전이
/// 5. 부서별 월 원가 합계 조회
pub struct StandardInfoApi {
    config_manager: Arc<ConfigManager>,
    target_repo: Arc<TargetRepository>,
    employee_repo: Arc<EmployeeRepository>,
    cost_engine: LaborCostEngine,
}

impl StandardInfoApi {
    pub fn new(
        config_manager: Arc<ConfigManager>,
        target_repo: Arc<TargetRepository>,
        employee_repo: Arc<EmployeeRepository>,
    ) -> Self {
        Self {
            config_manager,
            target_repo,
            employee_repo,
            cost_engine: LaborCostEngine::new(),
        }
    }

    // ==========================================
    // 원가 기준표
    // ==========================================

    /// 원가 기준표 조회
    pub fn cost_standards(&self) -> ApiResult<Vec<CostStandard>> {
        Ok(self.config_manager.cost_standards()?)
    }

    /// 원가 기준표 저장
    ///
    /// 모든 요율은 0 이상이어야 한다.
    pub fn save_cost_standards(&self, standards: &[CostStandard]) -> ApiResult<()> {
        for std in standards {
            let rates = [
                ("보험 요율", std.insurance_rate),
                ("퇴직급여 요율", std.severance_rate),
                ("공통비 요율", std.overhead_rate),
                ("리스크 버퍼 요율", std.risk_buffer_rate),
            ];
            for (label, rate) in rates {
                if rate < 0.0 || !rate.is_finite() {
                    return Err(ApiError::ValidationError(format!(
                        "{}은 0 이상이어야 합니다: {}",
                        label, rate
                    )));
                }
            }
        }
        self.config_manager.save_cost_standards(standards)?;
        info!(count = standards.len(), "원가 기준표 저장");
        Ok(())
    }

    // ==========================================
    // 전사 설정
    // ==========================================

    /// 전사 설정 조회
    pub fn company_settings(&self) -> ApiResult<CompanySettings> {
        Ok(self.config_manager.company_settings()?)
    }

    /// 전사 설정 저장
    pub fn save_company_settings(&self, settings: &CompanySettings) -> ApiResult<()> {
        if settings.total_common_cost < 0 {
            return Err(ApiError::ValidationError(
                "전사 공통비는 음수가 될 수 없습니다".to_string(),
            ));
        }
        if settings.inter_dept_billing_rate < 0.0 {
            return Err(ApiError::ValidationError(
                "인력 대여 마크업 요율은 0 이상이어야 합니다".to_string(),
            ));
        }
        self.config_manager.save_company_settings(settings)?;
        Ok(())
    }

    // ==========================================
    // 부서 관리
    // ==========================================

    /// 부서 목록 조회
    pub fn departments(&self) -> ApiResult<Vec<String>> {
        Ok(self.config_manager.departments()?)
    }

    /// 부서 추가
    pub fn add_department(&self, name: &str) -> ApiResult<()> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ApiError::InvalidInput("부서명이 비어 있습니다".to_string()));
        }
        let mut departments = self.config_manager.departments()?;
        if departments.iter().any(|d| d == name) {
            return Err(ApiError::BusinessRuleViolation(format!(
                "이미 존재하는 부서입니다: {}",
                name
            )));
        }
        departments.push(name.to_string());
        self.config_manager.save_departments(&departments)?;
        Ok(())
    }

    /// 부서 삭제 (소속 인원 이동 포함)
    ///
    /// 소속 인원이 있으면 move_to가 필수이며, 전원을 해당 부서로
    /// 이동시킨 뒤 삭제한다.
    pub fn delete_department(&self, name: &str, move_to: Option<&str>) -> ApiResult<usize> {
        let mut departments = self.config_manager.departments()?;
        if !departments.iter().any(|d| d == name) {
            return Err(ApiError::NotFound(format!("부서: {}", name)));
        }

        let members = self.employee_repo.list_by_dept(name)?;
        let moved = if members.is_empty() {
            0
        } else {
            let target = move_to.ok_or_else(|| {
                ApiError::BusinessRuleViolation(format!(
                    "부서에 소속 인원이 {}명 있습니다. 이동할 부서를 지정해주세요",
                    members.len()
                ))
            })?;
            if target == name {
                return Err(ApiError::InvalidInput(
                    "이동할 부서가 삭제 대상 부서와 같습니다".to_string(),
                ));
            }
            if !departments.iter().any(|d| d == target) {
                return Err(ApiError::NotFound(format!("이동할 부서: {}", target)));
            }
            self.employee_repo.move_department(name, target)?
        };

        departments.retain(|d| d != name);
        self.config_manager.save_departments(&departments)?;
        info!(dept = %name, moved, "부서 삭제 및 인원 이동 완료");
        Ok(moved)
    }

    /// 부서 월 원가 합계 (재직자 기준)
    pub fn dept_monthly_cost(&self, dept: &str, eval_date: NaiveDate) -> ApiResult<i64> {
        let standards = self.config_manager.cost_standards()?;
        let members = self.employee_repo.list_by_dept(dept)?;
        Ok(members
            .iter()
            .map(|emp| self.cost_engine.monthly_cost(emp, &standards, eval_date))
            .sum())
    }

    // ==========================================
    // 월별 목표
    // ==========================================

    /// 부서-월 목표 조회
    pub fn monthly_target(&self, dept: &str, year: i32, month: u32) -> ApiResult<MonthlyTarget> {
        Self::validate_month(month)?;
        Ok(self.target_repo.find(dept, year, month)?)
    }

    /// 목표 항목 추가/수정 (마감 완료 월은 거부)
    pub fn upsert_target_item(
        &self,
        dept: &str,
        year: i32,
        month: u32,
        item: &TargetItem,
    ) -> ApiResult<()> {
        Self::validate_month(month)?;
        if item.title.trim().is_empty() {
            return Err(ApiError::InvalidInput("계획명이 비어 있습니다".to_string()));
        }
        self.target_repo.upsert_item(dept, year, month, item)?;
        Ok(())
    }

    /// 목표 항목 삭제
    pub fn delete_target_item(
        &self,
        dept: &str,
        year: i32,
        month: u32,
        item_id: &str,
    ) -> ApiResult<()> {
        Self::validate_month(month)?;
        self.target_repo.delete_item(dept, year, month, item_id)?;
        Ok(())
    }

    /// 월 목표 확정 (마감)
    pub fn close_month(&self, dept: &str, year: i32, month: u32) -> ApiResult<()> {
        Self::validate_month(month)?;
        self.target_repo
            .transition_close_state(dept, year, month, CloseState::Closed)?;
        info!(dept = %dept, year, month, "월 목표 확정");
        Ok(())
    }

    /// 월 목표 확정 해제 (관리자 재오픈)
    pub fn reopen_month(&self, dept: &str, year: i32, month: u32) -> ApiResult<()> {
        Self::validate_month(month)?;
        self.target_repo
            .transition_close_state(dept, year, month, CloseState::Open)?;
        info!(dept = %dept, year, month, "월 목표 확정 해제");
        Ok(())
    }

    /// 특정 월 부서별 목표 합계
    pub fn monthly_totals(&self, year: i32, month: u32) -> ApiResult<Vec<(String, i64)>> {
        Self::validate_month(month)?;
        Ok(self.target_repo.monthly_totals(year, month)?)
    }

    /// 부서 연간 누계 (1월 ~ 해당 월)
    pub fn cumulative_total(&self, dept: &str, year: i32, through_month: u32) -> ApiResult<i64> {
        Self::validate_month(through_month)?;
        Ok(self.target_repo.cumulative_total(dept, year, through_month)?)
    }

    fn validate_month(month: u32) -> ApiResult<()> {
        if !(1..=12).contains(&month) {
            return Err(ApiError::InvalidInput(format!(
                "월은 1~12 사이여야 합니다: {}",
                month
            )));
        }
        Ok(())
    }
}
