// ==========================================
// FrameInsight - 손익 리포트 API
// ==========================================
// 책임: 월간 부서별 손익 리포트와 대시보드 KPI 집계
// 산식:
// - 매출: 부서 월 목표(기성) 합계
// - 직접비: 부서 인건비(전 인원 월 원가) + 비용 집행(수행 부서 귀속)
// - 공통비: 전사 공통비의 인원수 비례 배분
// - 유휴 원가: 인건비 중 미배정 공수 몫 (진단용 별도 표기)
// ==========================================

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::api::error::{ApiError, ApiResult};
use crate::config::config_manager::ConfigManager;
use crate::domain::types::{EmploymentType, ProfitGrade};
use crate::engine::allocation::AllocationAggregator;
use crate::engine::labor_cost::LaborCostEngine;
use crate::engine::profitability::{ProfitRow, ProfitabilityEngine};
use crate::engine::settlement::SettlementEngine;
use crate::repository::assignment_repo::AssignmentRepository;
use crate::repository::employee_repo::EmployeeRepository;
use crate::repository::project_repo::ProjectRepository;
use crate::repository::target_repo::TargetRepository;

// ==========================================
// 리포트 DTO
// ==========================================

/// 월간 손익 리포트의 부서 행
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeptReportRow {
    pub dept: String,

    /// 정규직 인원수
    pub headcount_regular: u32,

    /// 프리랜서 인원수
    pub headcount_freelance: u32,

    /// 매출 (부서 월 목표 기성, 원)
    pub revenue: i64,

    /// 인건비 (원)
    pub labor_cost: i64,

    /// 비용 집행 직접비 (원)
    pub direct_expense: i64,

    /// 배분 공통비 (원)
    pub common_cost: i64,

    /// 유휴 원가 (인건비 내 미배정 몫, 진단용)
    pub idle_cost: i64,

    /// 총 비용 (원)
    pub total_cost: i64,

    /// 영업이익 (원, 음수 가능)
    pub profit: i64,

    /// 이익률 (%)
    pub margin_pct: f64,

    /// 이익 기여율 (%, 부호 보존)
    pub contribution_pct: f64,

    /// 성적
    pub grade: ProfitGrade,
}

/// 월간 손익 리포트
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonthlyReport {
    pub year: i32,
    pub month: u32,
    pub rows: Vec<DeptReportRow>,
    pub total_revenue: i64,
    pub total_cost: i64,
    pub total_profit: i64,
    pub margin_pct: f64,

    /// 전사 목표 이익률 (%)
    pub target_margin_pct: f64,
}

/// 대시보드 부서 랭킹 항목
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeptRanking {
    pub dept: String,
    pub grade: ProfitGrade,
    pub contribution_pct: f64,
    pub profit: i64,
}

/// 대시보드 KPI 요약
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardSummary {
    pub year: i32,
    pub month: u32,
    pub total_revenue: i64,
    pub total_profit: i64,
    pub margin_pct: f64,
    pub target_margin_pct: f64,

    /// 전사 가동률 (%, 직원별 min(투입 합계, 1.0)의 평균)
    pub utilization_pct: f64,

    /// 전사 유휴 원가 합계 (원)
    pub idle_cost_total: i64,

    /// 기여율 내림차순 부서 랭킹
    pub ranking: Vec<DeptRanking>,
}

// ==========================================
// ReportApi - 손익 리포트 API
// ==========================================

/// 손익 리포트 API
pub struct ReportApi {
    employee_repo: Arc<EmployeeRepository>,
    project_repo: Arc<ProjectRepository>,
    assignment_repo: Arc<AssignmentRepository>,
    target_repo: Arc<TargetRepository>,
    config_manager: Arc<ConfigManager>,
    cost_engine: LaborCostEngine,
    aggregator: AllocationAggregator,
    profit_engine: ProfitabilityEngine,
    settlement_engine: SettlementEngine,
}

impl ReportApi {
    pub fn new(
        employee_repo: Arc<EmployeeRepository>,
        project_repo: Arc<ProjectRepository>,
        assignment_repo: Arc<AssignmentRepository>,
        target_repo: Arc<TargetRepository>,
        config_manager: Arc<ConfigManager>,
    ) -> Self {
        Self {
            employee_repo,
            project_repo,
            assignment_repo,
            target_repo,
            config_manager,
            cost_engine: LaborCostEngine::new(),
            aggregator: AllocationAggregator::new(),
            profit_engine: ProfitabilityEngine::new(),
            settlement_engine: SettlementEngine::new(),
        }
    }

    /// 월간 부서별 손익 리포트
    ///
    /// # 매개변수
    /// - eval_date: 인건비 평가 기준일 (해당 월의 임의 일자)
    pub fn monthly_report(
        &self,
        year: i32,
        month: u32,
        eval_date: NaiveDate,
    ) -> ApiResult<MonthlyReport> {
        if !(1..=12).contains(&month) {
            return Err(ApiError::InvalidInput(format!(
                "월은 1~12 사이여야 합니다: {}",
                month
            )));
        }

        let employees = self.employee_repo.list(false)?;
        let assignments = self.assignment_repo.list_by_month(year, month)?;
        let standards = self.config_manager.cost_standards()?;
        let settings = self.config_manager.company_settings()?;

        // 매출: 부서 월 목표(기성)
        let revenue_by_dept: BTreeMap<String, i64> = self
            .target_repo
            .monthly_totals(year, month)?
            .into_iter()
            .collect();

        // 부서 축: 설정된 부서 목록 + 데이터에 등장하는 부서
        let mut depts: Vec<String> = self.config_manager.departments()?;
        for emp in &employees {
            if !depts.contains(&emp.dept) {
                depts.push(emp.dept.clone());
            }
        }
        for dept in revenue_by_dept.keys() {
            if !depts.contains(dept) {
                depts.push(dept.clone());
            }
        }

        // 부서별 인원/인건비/유휴 원가 집계
        #[derive(Default)]
        struct DeptAccum {
            regular: u32,
            freelance: u32,
            labor_cost: i64,
            idle_cost: i64,
        }
        let mut accums: BTreeMap<String, DeptAccum> = BTreeMap::new();
        for emp in &employees {
            let monthly_cost = self.cost_engine.monthly_cost(emp, &standards, eval_date);
            let summary = self.aggregator.aggregate(&emp.id, year, month, &assignments);
            let accum = accums.entry(emp.dept.clone()).or_default();
            match emp.employment_type {
                EmploymentType::Regular => accum.regular += 1,
                EmploymentType::Freelance => accum.freelance += 1,
            }
            accum.labor_cost += monthly_cost;
            accum.idle_cost += self
                .aggregator
                .idle_cost(monthly_cost, summary.total_man_month);
        }

        // 비용 집행: 프로젝트의 수행 부서로 귀속
        let exec_dept_by_code: BTreeMap<String, String> = self
            .project_repo
            .list(true)?
            .into_iter()
            .map(|p| (p.code, p.exec_dept))
            .collect();
        let mut expense_by_dept: BTreeMap<String, i64> = BTreeMap::new();
        for record in self.project_repo.list_cost_records_by_month(month)? {
            if let Some(dept) = exec_dept_by_code.get(&record.project_code) {
                *expense_by_dept.entry(dept.clone()).or_insert(0) += record.amount;
            }
        }

        // 공통비: 인원수 비례 배분
        let headcounts: Vec<(String, u32)> = depts
            .iter()
            .map(|dept| {
                let accum = accums.get(dept);
                (
                    dept.clone(),
                    accum.map(|a| a.regular + a.freelance).unwrap_or(0),
                )
            })
            .collect();
        let common_by_dept: BTreeMap<String, i64> = self
            .settlement_engine
            .allocate_common_cost(settings.total_common_cost, &headcounts)
            .into_iter()
            .map(|share| (share.dept, share.amount))
            .collect();

        // 손익 롤업
        let profit_rows: Vec<ProfitRow> = depts
            .iter()
            .map(|dept| {
                let labor = accums.get(dept).map(|a| a.labor_cost).unwrap_or(0);
                let expense = expense_by_dept.get(dept).copied().unwrap_or(0);
                ProfitRow {
                    key: dept.clone(),
                    revenue: revenue_by_dept.get(dept).copied().unwrap_or(0),
                    direct_cost: labor + expense,
                    overhead_cost: common_by_dept.get(dept).copied().unwrap_or(0),
                }
            })
            .collect();
        let rollup = self.profit_engine.rollup(&profit_rows);

        let rows = rollup
            .rows
            .iter()
            .map(|row| {
                let accum = accums.get(&row.key);
                let expense = expense_by_dept.get(&row.key).copied().unwrap_or(0);
                DeptReportRow {
                    dept: row.key.clone(),
                    headcount_regular: accum.map(|a| a.regular).unwrap_or(0),
                    headcount_freelance: accum.map(|a| a.freelance).unwrap_or(0),
                    revenue: row.revenue,
                    labor_cost: accum.map(|a| a.labor_cost).unwrap_or(0),
                    direct_expense: expense,
                    common_cost: row.overhead_cost,
                    idle_cost: accum.map(|a| a.idle_cost).unwrap_or(0),
                    total_cost: row.total_cost,
                    profit: row.profit,
                    margin_pct: row.margin_pct,
                    contribution_pct: row.contribution_pct,
                    grade: row.grade,
                }
            })
            .collect();

        debug!(year, month, depts = depts.len(), "월간 손익 리포트 생성");

        Ok(MonthlyReport {
            year,
            month,
            rows,
            total_revenue: rollup.total_revenue,
            total_cost: rollup.total_cost,
            total_profit: rollup.total_profit,
            margin_pct: rollup.margin_pct,
            target_margin_pct: settings.target_margin_pct,
        })
    }

    /// 대시보드 KPI 요약
    pub fn dashboard_summary(
        &self,
        year: i32,
        month: u32,
        eval_date: NaiveDate,
    ) -> ApiResult<DashboardSummary> {
        let report = self.monthly_report(year, month, eval_date)?;

        // 전사 가동률: 직원별 min(투입 합계, 1.0)의 평균
        let employees = self.employee_repo.list(false)?;
        let assignments = self.assignment_repo.list_by_month(year, month)?;
        let utilization_pct = if employees.is_empty() {
            0.0
        } else {
            let used: f64 = employees
                .iter()
                .map(|emp| {
                    self.aggregator
                        .aggregate(&emp.id, year, month, &assignments)
                        .total_man_month
                        .min(1.0)
                })
                .sum();
            used / employees.len() as f64 * 100.0
        };

        let idle_cost_total = report.rows.iter().map(|r| r.idle_cost).sum();

        let mut ranking: Vec<DeptRanking> = report
            .rows
            .iter()
            .map(|row| DeptRanking {
                dept: row.dept.clone(),
                grade: row.grade,
                contribution_pct: row.contribution_pct,
                profit: row.profit,
            })
            .collect();
        ranking.sort_by(|a, b| {
            b.contribution_pct
                .partial_cmp(&a.contribution_pct)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        Ok(DashboardSummary {
            year,
            month,
            total_revenue: report.total_revenue,
            total_profit: report.total_profit,
            margin_pct: report.margin_pct,
            target_margin_pct: report.target_margin_pct,
            utilization_pct,
            idle_cost_total,
            ranking,
        })
    }
}
