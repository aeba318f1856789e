// ==========================================
// FrameInsight - 인력 배정 API
// ==========================================
// 책임: 월별 투입 배정 관리, 가동률 조회, 부서별 가동 현황 리포트
// 제약: 초과 배정은 경고로만 보고한다 (저장 거부 없음)
// ==========================================

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::api::error::{ApiError, ApiResult};
use crate::config::config_manager::ConfigManager;
use crate::domain::assignment::{Assignment, UtilizationSummary};
use crate::domain::types::UtilizationClass;
use crate::engine::allocation::AllocationAggregator;
use crate::engine::labor_cost::LaborCostEngine;
use crate::repository::assignment_repo::AssignmentRepository;
use crate::repository::employee_repo::EmployeeRepository;

// ==========================================
// DTO 타입
// ==========================================

/// 부서별 가동 현황의 개인 항목
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersonUtilization {
    pub employee_id: String,
    pub name: String,
    pub rank: String,
    pub summary: UtilizationSummary,
}

/// 부서별 가동 현황 그룹
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeptUtilization {
    pub dept: String,
    pub members: Vec<PersonUtilization>,

    /// 부서 유휴 원가 합계 (원)
    pub idle_cost: i64,
}

// ==========================================
// AllocationApi - 인력 배정 API
// ==========================================

/// 인력 배정 API
///
/// 책임:
/// 1. 배정 등록/삭제 (입력 검증, 초과 배정 경고)
/// 2. 직원별 월 가동률 조회
/// 3. 부서별 가동 현황 리포트 (유휴 원가 포함)
pub struct AllocationApi {
    assignment_repo: Arc<AssignmentRepository>,
    employee_repo: Arc<EmployeeRepository>,
    config_manager: Arc<ConfigManager>,
    aggregator: AllocationAggregator,
    cost_engine: LaborCostEngine,
}

impl AllocationApi {
    pub fn new(
        assignment_repo: Arc<AssignmentRepository>,
        employee_repo: Arc<EmployeeRepository>,
        config_manager: Arc<ConfigManager>,
    ) -> Self {
        Self {
            assignment_repo,
            employee_repo,
            config_manager,
            aggregator: AllocationAggregator::new(),
            cost_engine: LaborCostEngine::new(),
        }
    }

    // ==========================================
    // 배정 관리
    // ==========================================

    /// 배정 등록/갱신
    ///
    /// # 반환
    /// - 갱신 후 해당 직원의 월 가동률 요약 (초과 배정 여부 포함)
    pub fn upsert_assignment(&self, assignment: &Assignment) -> ApiResult<UtilizationSummary> {
        if assignment.man_month < 0.0 || !assignment.man_month.is_finite() {
            return Err(ApiError::InvalidInput(format!(
                "투입 공수는 0 이상이어야 합니다: {}",
                assignment.man_month
            )));
        }
        if !(1..=12).contains(&assignment.month) {
            return Err(ApiError::InvalidInput(format!(
                "월은 1~12 사이여야 합니다: {}",
                assignment.month
            )));
        }
        // 직원 존재 확인
        self.employee_repo
            .find_by_id(&assignment.employee_id)?
            .ok_or_else(|| {
                ApiError::NotFound(format!("Employee (id={})", assignment.employee_id))
            })?;

        self.assignment_repo.upsert(assignment)?;
        self.utilization(&assignment.employee_id, assignment.year, assignment.month)
    }

    /// 배정 삭제
    pub fn remove_assignment(
        &self,
        employee_id: &str,
        project_code: &str,
        year: i32,
        month: u32,
    ) -> ApiResult<()> {
        self.assignment_repo
            .delete(employee_id, project_code, year, month)?;
        Ok(())
    }

    // ==========================================
    // 가동률 조회
    // ==========================================

    /// 직원별 월 가동률 요약
    pub fn utilization(
        &self,
        employee_id: &str,
        year: i32,
        month: u32,
    ) -> ApiResult<UtilizationSummary> {
        let assignments = self
            .assignment_repo
            .list_by_employee_month(employee_id, year, month)?;
        Ok(self
            .aggregator
            .aggregate(employee_id, year, month, &assignments))
    }

    /// 부서별 가동 현황 리포트
    ///
    /// 재직자 전원을 부서로 그룹화해 월 가동률과 부서 유휴 원가를
    /// 집계한다. 배정이 없는 직원은 Idle로 나타난다.
    pub fn dept_utilization_report(
        &self,
        year: i32,
        month: u32,
        eval_date: NaiveDate,
    ) -> ApiResult<Vec<DeptUtilization>> {
        let employees = self.employee_repo.list(false)?;
        let assignments = self.assignment_repo.list_by_month(year, month)?;
        let standards = self.config_manager.cost_standards()?;

        let mut groups: BTreeMap<String, DeptUtilization> = BTreeMap::new();
        for emp in employees {
            let summary = self.aggregator.aggregate(&emp.id, year, month, &assignments);
            let monthly_cost = self.cost_engine.monthly_cost(&emp, &standards, eval_date);
            let idle_cost = self
                .aggregator
                .idle_cost(monthly_cost, summary.total_man_month);

            let group = groups
                .entry(emp.dept.clone())
                .or_insert_with(|| DeptUtilization {
                    dept: emp.dept.clone(),
                    members: Vec::new(),
                    idle_cost: 0,
                });
            group.idle_cost += idle_cost;
            group.members.push(PersonUtilization {
                employee_id: emp.id,
                name: emp.name,
                rank: emp.rank,
                summary,
            });
        }

        Ok(groups.into_values().collect())
    }

    /// 초과 배정 인원 목록 (경고 대상)
    pub fn over_allocated(&self, year: i32, month: u32) -> ApiResult<Vec<UtilizationSummary>> {
        let employees = self.employee_repo.list(false)?;
        let assignments = self.assignment_repo.list_by_month(year, month)?;

        Ok(employees
            .iter()
            .map(|emp| self.aggregator.aggregate(&emp.id, year, month, &assignments))
            .filter(|summary| summary.class == UtilizationClass::OverAllocated)
            .collect())
    }
}
