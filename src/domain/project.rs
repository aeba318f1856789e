// ==========================================
// FrameInsight - 프로젝트 도메인 모델
// ==========================================
// 책임: 프로젝트, 이슈 로그, 비용 집행 레코드 정의
// 제약: 영업/수행 매출 배분율 합계는 100이어야 한다 (API 계층에서 검증)
// ==========================================

use crate::domain::types::ProjectStatus;
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

// ==========================================
// Project - 프로젝트 엔티티
// ==========================================

/// 프로젝트
///
/// 계약 금액 중 execution_rate 비율만큼이 수행 매출로 인식되고,
/// 영업/수행 부서가 sales_rate/exec_rate 비율로 매출을 나눈다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    /// 프로젝트 코드 (예: PJ-26-001)
    pub code: String,

    /// 프로젝트명
    pub name: String,

    /// 고객사
    pub client: String,

    /// 계약 금액 (원)
    pub contract_amount: i64,

    /// 수행 인식 비율 (0.0 ~ 1.0)
    pub execution_rate: f64,

    /// 상태
    pub status: ProjectStatus,

    /// 영업 주체 부서
    pub sales_dept: String,

    /// 영업 매출 배분율 (%)
    pub sales_rate: f64,

    /// 수행 주체 부서
    pub exec_dept: String,

    /// 수행 매출 배분율 (%)
    pub exec_rate: f64,

    /// 수행 시작일
    #[serde(default)]
    pub start_date: Option<NaiveDate>,

    /// 수행 종료일
    #[serde(default)]
    pub end_date: Option<NaiveDate>,

    /// 보관 여부 (목록에서만 숨겨지며 통계에는 계속 반영)
    #[serde(default)]
    pub archived: bool,
}

impl Project {
    /// 수행 인식 금액 (계약 금액 × 수행 인식 비율)
    pub fn execution_amount(&self) -> i64 {
        (self.contract_amount as f64 * self.execution_rate).round() as i64
    }
}

// ==========================================
// ProjectIssue - 프로젝트 이슈 로그
// ==========================================

/// 프로젝트 이슈/댓글 항목
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectIssue {
    /// 항목 ID (UUID)
    pub id: String,

    /// 대상 프로젝트 코드
    pub project_code: String,

    /// 작성자
    pub author: String,

    /// 내용
    pub content: String,

    /// 구분 (issue / reply)
    pub entry_type: String,

    /// 작성 시각
    pub created_at: NaiveDateTime,
}

// ==========================================
// CostRecord - 비용 집행 레코드
// ==========================================

/// 비목별 비용 집행 내역 (외주 용역비, 경비, SW 구입비 등)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CostRecord {
    /// 레코드 ID (UUID)
    pub id: String,

    /// 집행 일자
    pub exec_date: NaiveDate,

    /// 귀속 월 (1~12)
    pub month: u32,

    /// 대상 프로젝트 코드
    pub project_code: String,

    /// 비목 (외주용역비 / 경비 / SW구입비 ...)
    pub category: String,

    /// 거래처
    #[serde(default)]
    pub vendor: Option<String>,

    /// 적요
    #[serde(default)]
    pub description: Option<String>,

    /// 금액 (원)
    pub amount: i64,
}
