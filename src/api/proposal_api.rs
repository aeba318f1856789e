// ==========================================
// FrameInsight - 제안 리뷰 API
// ==========================================
// 책임: RFP 기반 제안 관리, 인력 배정(내부 인력 원가 자동 산출),
//       리뷰 코멘트
// ==========================================

use std::sync::Arc;

use chrono::NaiveDate;
use tracing::info;
use uuid::Uuid;

use crate::api::error::{ApiError, ApiResult};
use crate::config::config_manager::ConfigManager;
use crate::domain::proposal::{AllocationKind, Proposal, ProposalAllocation, ProposalComment};
use crate::engine::labor_cost::LaborCostEngine;
use crate::engine::round_krw;
use crate::repository::employee_repo::EmployeeRepository;
use crate::repository::proposal_repo::ProposalRepository;

// ==========================================
// ProposalApi - 제안 리뷰 API
// ==========================================

/// 제안 리뷰 API
///
/// 책임:
/// 1. 제안 등록/조회/보관
/// 2. 인력 배정 (내부 인력은 월 원가 × M/M으로 원가 자동 산출,
///    수기 조정 가능)
/// 3. 리뷰 코멘트 기록
pub struct ProposalApi {
    proposal_repo: Arc<ProposalRepository>,
    employee_repo: Arc<EmployeeRepository>,
    config_manager: Arc<ConfigManager>,
    cost_engine: LaborCostEngine,
}

impl ProposalApi {
    pub fn new(
        proposal_repo: Arc<ProposalRepository>,
        employee_repo: Arc<EmployeeRepository>,
        config_manager: Arc<ConfigManager>,
    ) -> Self {
        Self {
            proposal_repo,
            employee_repo,
            config_manager,
            cost_engine: LaborCostEngine::new(),
        }
    }

    /// 제안 등록
    pub fn create_proposal(
        &self,
        title: &str,
        client: &str,
        budget: i64,
        due_date: Option<NaiveDate>,
    ) -> ApiResult<Proposal> {
        if title.trim().is_empty() {
            return Err(ApiError::InvalidInput("제안명이 비어 있습니다".to_string()));
        }
        if budget < 0 {
            return Err(ApiError::ValidationError(
                "제안 예산은 음수가 될 수 없습니다".to_string(),
            ));
        }

        let proposal = Proposal {
            id: Uuid::new_v4().to_string(),
            title: title.to_string(),
            client: client.to_string(),
            budget,
            due_date,
            status: "작성중".to_string(),
            archived: false,
            allocations: Vec::new(),
            comments: Vec::new(),
        };
        self.proposal_repo.insert(&proposal)?;
        info!(proposal_id = %proposal.id, title = %title, "제안 등록 완료");
        Ok(proposal)
    }

    /// 제안 단건 조회
    pub fn get_proposal(&self, id: &str) -> ApiResult<Proposal> {
        self.proposal_repo
            .find_by_id(id)?
            .ok_or_else(|| ApiError::NotFound(format!("Proposal (id={})", id)))
    }

    /// 제안 목록 조회
    pub fn list_proposals(&self, archived: bool) -> ApiResult<Vec<Proposal>> {
        Ok(self.proposal_repo.list(archived)?)
    }

    /// 제안 정보 갱신 (예산/상태 등)
    pub fn update_proposal(&self, proposal: &Proposal) -> ApiResult<()> {
        if proposal.budget < 0 {
            return Err(ApiError::ValidationError(
                "제안 예산은 음수가 될 수 없습니다".to_string(),
            ));
        }
        self.proposal_repo.update(proposal)?;
        Ok(())
    }

    /// 보관 처리 토글
    pub fn set_archived(&self, id: &str, archived: bool) -> ApiResult<()> {
        self.proposal_repo.set_archived(id, archived)?;
        Ok(())
    }

    // ==========================================
    // 인력 배정
    // ==========================================

    /// 내부 인력 배정 추가
    ///
    /// 원가를 지정하지 않으면 직원 월 원가 × M/M으로 자동 산출한다.
    pub fn add_internal_allocation(
        &self,
        proposal_id: &str,
        employee_id: &str,
        man_month: f64,
        cost_override: Option<i64>,
        eval_date: NaiveDate,
    ) -> ApiResult<Proposal> {
        if man_month < 0.0 || !man_month.is_finite() {
            return Err(ApiError::InvalidInput(format!(
                "투입 공수는 0 이상이어야 합니다: {}",
                man_month
            )));
        }
        let mut proposal = self.get_proposal(proposal_id)?;
        let employee = self
            .employee_repo
            .find_by_id(employee_id)?
            .ok_or_else(|| ApiError::NotFound(format!("Employee (id={})", employee_id)))?;

        let cost = match cost_override {
            Some(cost) => cost,
            None => {
                let standards = self.config_manager.cost_standards()?;
                let monthly = self.cost_engine.monthly_cost(&employee, &standards, eval_date);
                round_krw(monthly as f64 * man_month)
            }
        };

        proposal.allocations.push(ProposalAllocation {
            id: Uuid::new_v4().to_string(),
            kind: AllocationKind::Internal,
            employee_id: Some(employee_id.to_string()),
            external_name: None,
            man_month,
            cost,
        });
        self.proposal_repo.update(&proposal)?;
        Ok(proposal)
    }

    /// 외부 인력 배정 추가 (명칭 + 수기 원가 필수)
    pub fn add_external_allocation(
        &self,
        proposal_id: &str,
        external_name: &str,
        man_month: f64,
        cost: i64,
    ) -> ApiResult<Proposal> {
        if external_name.trim().is_empty() {
            return Err(ApiError::InvalidInput(
                "외부 인력 명칭이 비어 있습니다".to_string(),
            ));
        }
        if cost < 0 {
            return Err(ApiError::ValidationError(
                "배정 원가는 음수가 될 수 없습니다".to_string(),
            ));
        }
        let mut proposal = self.get_proposal(proposal_id)?;
        proposal.allocations.push(ProposalAllocation {
            id: Uuid::new_v4().to_string(),
            kind: AllocationKind::External,
            employee_id: None,
            external_name: Some(external_name.to_string()),
            man_month,
            cost,
        });
        self.proposal_repo.update(&proposal)?;
        Ok(proposal)
    }

    /// 배정 삭제
    pub fn remove_allocation(&self, proposal_id: &str, allocation_id: &str) -> ApiResult<Proposal> {
        let mut proposal = self.get_proposal(proposal_id)?;
        let before = proposal.allocations.len();
        proposal.allocations.retain(|a| a.id != allocation_id);
        if proposal.allocations.len() == before {
            return Err(ApiError::NotFound(format!(
                "ProposalAllocation (id={})",
                allocation_id
            )));
        }
        self.proposal_repo.update(&proposal)?;
        Ok(proposal)
    }

    // ==========================================
    // 리뷰 코멘트
    // ==========================================

    /// 코멘트 추가
    pub fn add_comment(
        &self,
        proposal_id: &str,
        author: &str,
        content: &str,
        date: NaiveDate,
    ) -> ApiResult<Proposal> {
        if content.trim().is_empty() {
            return Err(ApiError::InvalidInput("내용이 비어 있습니다".to_string()));
        }
        let mut proposal = self.get_proposal(proposal_id)?;
        proposal.comments.push(ProposalComment {
            id: Uuid::new_v4().to_string(),
            author: author.to_string(),
            content: content.to_string(),
            date,
        });
        self.proposal_repo.update(&proposal)?;
        Ok(proposal)
    }
}
