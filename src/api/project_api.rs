// ==========================================
// FrameInsight - 프로젝트 API
// ==========================================
// 책임: 프로젝트 등록/조회/보관, 이슈 로그, 비용 집행 관리,
//       매출 인식과 수익성 시뮬레이션
// ==========================================

use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use tracing::info;
use uuid::Uuid;

use crate::api::error::{ApiError, ApiResult};
use crate::domain::project::{CostRecord, Project, ProjectIssue};
use crate::engine::profitability::{LaborInput, ProfitabilityEngine, ProjectSimulation};
use crate::engine::round_krw;
use crate::repository::project_repo::ProjectRepository;

/// 외주 용역비 비목 (수익성 시뮬레이션의 외주/경비 구분 기준)
const CATEGORY_OUTSOURCING: &str = "외주용역비";

/// 배분율 합계 허용 오차
const SPLIT_SUM_EPS: f64 = 1e-6;

// ==========================================
// ProjectApi - 프로젝트 API
// ==========================================

/// 프로젝트 API
///
/// 책임:
/// 1. 프로젝트 등록 (배분율 검증 포함)
/// 2. 목록/보관 관리
/// 3. 이슈 로그 기록
/// 4. 비용 집행 내역 관리
/// 5. 매출 인식액 계산과 수익성 시뮬레이션
pub struct ProjectApi {
    project_repo: Arc<ProjectRepository>,
    profit_engine: ProfitabilityEngine,
}

impl ProjectApi {
    pub fn new(project_repo: Arc<ProjectRepository>) -> Self {
        Self {
            project_repo,
            profit_engine: ProfitabilityEngine::new(),
        }
    }

    // ==========================================
    // 등록/조회
    // ==========================================

    /// 프로젝트 등록
    ///
    /// 검증:
    /// - 코드/이름 비어 있지 않음, 계약 금액 0 이상
    /// - 수행 인식 비율 0~1
    /// - 영업 + 수행 배분율 합계 100
    pub fn create_project(&self, project: &Project) -> ApiResult<()> {
        Self::validate_project(project)?;
        self.project_repo.insert(project)?;
        info!(code = %project.code, exec_dept = %project.exec_dept, "프로젝트 등록 완료");
        Ok(())
    }

    /// 프로젝트 수정
    pub fn update_project(&self, project: &Project) -> ApiResult<()> {
        Self::validate_project(project)?;
        self.project_repo.update(project)?;
        Ok(())
    }

    /// 프로젝트 단건 조회
    pub fn get_project(&self, code: &str) -> ApiResult<Project> {
        self.project_repo
            .find_by_code(code)?
            .ok_or_else(|| ApiError::NotFound(format!("Project (code={})", code)))
    }

    /// 프로젝트 목록 조회
    pub fn list_projects(&self, include_archived: bool) -> ApiResult<Vec<Project>> {
        Ok(self.project_repo.list(include_archived)?)
    }

    /// 보관/복원 처리
    ///
    /// 보관은 목록 표시만 제외한다. 통계/리포트에는 계속 반영된다.
    pub fn set_archived(&self, code: &str, archived: bool) -> ApiResult<()> {
        self.project_repo.set_archived(code, archived)?;
        Ok(())
    }

    // ==========================================
    // 이슈 로그
    // ==========================================

    /// 이슈/댓글 추가
    pub fn append_issue(
        &self,
        project_code: &str,
        author: &str,
        content: &str,
        entry_type: &str,
    ) -> ApiResult<ProjectIssue> {
        if content.trim().is_empty() {
            return Err(ApiError::InvalidInput("내용이 비어 있습니다".to_string()));
        }
        // 대상 존재 확인
        self.get_project(project_code)?;

        let issue = ProjectIssue {
            id: Uuid::new_v4().to_string(),
            project_code: project_code.to_string(),
            author: author.to_string(),
            content: content.to_string(),
            entry_type: entry_type.to_string(),
            created_at: Utc::now().naive_utc(),
        };
        self.project_repo.append_issue(&issue)?;
        Ok(issue)
    }

    /// 프로젝트 이슈 목록
    pub fn list_issues(&self, project_code: &str) -> ApiResult<Vec<ProjectIssue>> {
        Ok(self.project_repo.list_issues(project_code)?)
    }

    // ==========================================
    // 비용 집행
    // ==========================================

    /// 비용 집행 내역 추가
    pub fn add_cost_record(
        &self,
        project_code: &str,
        exec_date: NaiveDate,
        category: &str,
        vendor: Option<&str>,
        description: Option<&str>,
        amount: i64,
    ) -> ApiResult<CostRecord> {
        if amount < 0 {
            return Err(ApiError::InvalidInput(
                "집행 금액은 음수가 될 수 없습니다".to_string(),
            ));
        }
        if category.trim().is_empty() {
            return Err(ApiError::InvalidInput("비목이 비어 있습니다".to_string()));
        }
        self.get_project(project_code)?;

        let record = CostRecord {
            id: Uuid::new_v4().to_string(),
            exec_date,
            month: chrono::Datelike::month(&exec_date),
            project_code: project_code.to_string(),
            category: category.to_string(),
            vendor: vendor.map(|v| v.to_string()),
            description: description.map(|d| d.to_string()),
            amount,
        };
        self.project_repo.insert_cost_record(&record)?;
        Ok(record)
    }

    /// 비용 집행 내역 삭제
    pub fn delete_cost_record(&self, record_id: &str) -> ApiResult<()> {
        self.project_repo.delete_cost_record(record_id)?;
        Ok(())
    }

    /// 월별 비용 집행 내역
    pub fn list_cost_records_by_month(&self, month: u32) -> ApiResult<Vec<CostRecord>> {
        if !(1..=12).contains(&month) {
            return Err(ApiError::InvalidInput(format!(
                "월은 1~12 사이여야 합니다: {}",
                month
            )));
        }
        Ok(self.project_repo.list_cost_records_by_month(month)?)
    }

    // ==========================================
    // 매출 인식 / 수익성
    // ==========================================

    /// 배분율 기준 매출 인식액 (금액 × 배분율 / 100)
    pub fn recognized_revenue(amount: i64, rate_pct: f64) -> i64 {
        round_krw(amount as f64 * rate_pct / 100.0)
    }

    /// 수익성 시뮬레이션 (수기 인력 투입 입력)
    ///
    /// 수행 인식 금액은 프로젝트에서, 외주/경비는 비용 집행 내역에서
    /// 가져온다 (외주용역비 비목 → 외주, 나머지 → 경비).
    pub fn simulate_profitability(
        &self,
        project_code: &str,
        labor: &[LaborInput],
    ) -> ApiResult<ProjectSimulation> {
        let project = self.get_project(project_code)?;
        let records = self.project_repo.list_cost_records_by_project(project_code)?;

        let (outsourcing, expenses): (Vec<_>, Vec<_>) = records
            .iter()
            .partition(|r| r.category == CATEGORY_OUTSOURCING);
        let outsourcing_total: i64 = outsourcing.iter().map(|r| r.amount).sum();
        let expense_total: i64 = expenses.iter().map(|r| r.amount).sum();

        Ok(self.profit_engine.simulate_project(
            project.execution_amount(),
            labor,
            outsourcing_total,
            expense_total,
        ))
    }

    // ==========================================
    // 내부 헬퍼
    // ==========================================

    fn validate_project(project: &Project) -> ApiResult<()> {
        if project.code.trim().is_empty() {
            return Err(ApiError::InvalidInput(
                "프로젝트 코드가 비어 있습니다".to_string(),
            ));
        }
        if project.name.trim().is_empty() {
            return Err(ApiError::InvalidInput(
                "프로젝트명이 비어 있습니다".to_string(),
            ));
        }
        if project.contract_amount < 0 {
            return Err(ApiError::ValidationError(
                "계약 금액은 음수가 될 수 없습니다".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&project.execution_rate) {
            return Err(ApiError::ValidationError(format!(
                "수행 인식 비율은 0~1 사이여야 합니다: {}",
                project.execution_rate
            )));
        }
        let split_sum = project.sales_rate + project.exec_rate;
        if (split_sum - 100.0).abs() > SPLIT_SUM_EPS {
            return Err(ApiError::ValidationError(format!(
                "영업/수행 배분율 합계는 100이어야 합니다: {} + {} = {}",
                project.sales_rate, project.exec_rate, split_sum
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::ProjectStatus;

    fn base_project() -> Project {
        Project {
            code: "PJ-26-001".to_string(),
            name: "LG 베스트샵 개편".to_string(),
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
        }
    }

    #[test]
    fn test_recognized_revenue_split() {
        // 영업 10% / 수행 90% 배분
        assert_eq!(ProjectApi::recognized_revenue(732_000_000, 10.0), 73_200_000);
        assert_eq!(ProjectApi::recognized_revenue(732_000_000, 90.0), 658_800_000);
        assert_eq!(ProjectApi::recognized_revenue(0, 50.0), 0);
    }

    #[test]
    fn test_validate_split_sum_must_be_100() {
        let mut project = base_project();
        project.sales_rate = 30.0;
        project.exec_rate = 60.0;
        assert!(ProjectApi::validate_project(&project).is_err());

        project.exec_rate = 70.0;
        assert!(ProjectApi::validate_project(&project).is_ok());
    }

    #[test]
    fn test_validate_execution_rate_bounds() {
        let mut project = base_project();
        project.execution_rate = 1.2;
        assert!(ProjectApi::validate_project(&project).is_err());
    }
}
