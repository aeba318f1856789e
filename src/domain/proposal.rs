// ==========================================
// FrameInsight - 제안(RFP) 도메인 모델
// ==========================================
// 책임: 제안 프로젝트, 인력 배정 내역, 리뷰 코멘트 정의
// ==========================================

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// 제안 인력 배정 구분
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AllocationKind {
    /// 내부 인력 (직원 사번으로 연결, 원가는 월 원가 × M/M 자동 산출)
    Internal,
    /// 외부 인력 (외주사 명칭과 수기 원가)
    External,
}

/// 제안 인력 배정 내역
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProposalAllocation {
    /// 배정 ID (UUID)
    pub id: String,

    /// 구분
    pub kind: AllocationKind,

    /// 내부 인력 사번 (Internal인 경우)
    #[serde(default)]
    pub employee_id: Option<String>,

    /// 외부 인력 명칭 (External인 경우, 예: "디자인 외주(A사)")
    #[serde(default)]
    pub external_name: Option<String>,

    /// 투입 공수 (M/M)
    pub man_month: f64,

    /// 배정 원가 (원) - 내부 인력은 자동 산출 후 수기 조정 가능
    pub cost: i64,
}

/// 제안 리뷰 코멘트
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProposalComment {
    /// 코멘트 ID (UUID)
    pub id: String,

    /// 작성자
    pub author: String,

    /// 내용
    pub content: String,

    /// 작성일
    pub date: NaiveDate,
}

/// 제안 프로젝트 (RFP 기반)
///
/// 인력 배정에 따라 담당 부서 비용 차감 / 소속 부서 매출 인정
/// 정산으로 이어진다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Proposal {
    /// 제안 ID (UUID)
    pub id: String,

    /// 제안명
    pub title: String,

    /// 고객사
    pub client: String,

    /// 제안 예산 (원)
    pub budget: i64,

    /// 제안 마감일
    #[serde(default)]
    pub due_date: Option<NaiveDate>,

    /// 상태 (작성중 / 제출 / 수주 / 실주)
    pub status: String,

    /// 보관 여부
    #[serde(default)]
    pub archived: bool,

    /// 인력 배정 내역
    #[serde(default)]
    pub allocations: Vec<ProposalAllocation>,

    /// 리뷰 코멘트
    #[serde(default)]
    pub comments: Vec<ProposalComment>,
}

impl Proposal {
    /// 총 배정 원가 합계
    pub fn total_allocation_cost(&self) -> i64 {
        self.allocations.iter().map(|a| a.cost).sum()
    }
}
