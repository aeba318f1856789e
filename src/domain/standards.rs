// ==========================================
// FrameInsight - 기준정보 도메인 모델
// ==========================================
// 책임: 원가 기준표, 전사 설정, 월별 목표 정의
// 제약: 모든 요율은 음수가 될 수 없다 (0 이상인 분수 표현, 12% → 0.12)
// ==========================================

use crate::domain::types::{CloseState, EmploymentType};
use serde::{Deserialize, Serialize};

// ==========================================
// CostStandard - 고용 형태별 원가 기준
// ==========================================

/// 고용 형태별 원가 적용 기준
///
/// 월 기본급에 보험/퇴직급여/공통비 요율을 가산한 뒤
/// 리스크 버퍼를 곱해 월 원가를 산출한다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostStandard {
    /// 적용 대상 고용 형태
    pub employment_type: EmploymentType,

    /// 4대보험 요율
    pub insurance_rate: f64,

    /// 퇴직급여 요율
    pub severance_rate: f64,

    /// 공통비 요율
    pub overhead_rate: f64,

    /// 리스크 버퍼 요율
    pub risk_buffer_rate: f64,
}

impl CostStandard {
    /// 정규직 기본 기준 (보험 12%, 퇴직급여 8.33%, 공통비 15%, 버퍼 5%)
    pub fn default_regular() -> Self {
        Self {
            employment_type: EmploymentType::Regular,
            insurance_rate: 0.12,
            severance_rate: 0.0833,
            overhead_rate: 0.15,
            risk_buffer_rate: 0.05,
        }
    }

    /// 프리랜서 기본 기준 (보험 3.5%, 퇴직급여 0%, 공통비 5%, 버퍼 5%)
    pub fn default_freelance() -> Self {
        Self {
            employment_type: EmploymentType::Freelance,
            insurance_rate: 0.035,
            severance_rate: 0.0,
            overhead_rate: 0.05,
            risk_buffer_rate: 0.05,
        }
    }

    /// 기본 기준표 (설정 미등록 시 폴백)
    pub fn defaults() -> Vec<Self> {
        vec![Self::default_regular(), Self::default_freelance()]
    }
}

// ==========================================
// CompanySettings - 전사 설정
// ==========================================

/// 전사 공통 설정
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanySettings {
    /// 목표 이익률 (%)
    pub target_margin_pct: f64,

    /// 연간 목표 매출 (원)
    pub total_annual_revenue_target: i64,

    /// 월 전사 공통비 예산 (원)
    pub total_common_cost: i64,

    /// 부서 간 인력 대여 마크업 요율 (분수, 10% → 0.10)
    pub inter_dept_billing_rate: f64,
}

impl Default for CompanySettings {
    fn default() -> Self {
        Self {
            target_margin_pct: 20.0,
            total_annual_revenue_target: 20_000_000_000,
            total_common_cost: 120_000_000,
            inter_dept_billing_rate: 0.10,
        }
    }
}

// ==========================================
// MonthlyTarget - 월별 목표
// ==========================================

/// 월별 목표 계획 항목
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TargetItem {
    /// 항목 ID (UUID)
    pub id: String,

    /// 계획명 (예: "S물산 유지보수 고정 매출")
    pub title: String,

    /// 목표 금액 (원)
    pub amount: i64,
}

/// 부서의 특정 월 목표 묶음
///
/// close_state가 Closed이면 관리자 재오픈 전까지 항목 수정이 거부된다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonthlyTarget {
    /// 대상 부서
    pub dept: String,

    /// 귀속 연도
    pub year: i32,

    /// 귀속 월 (1~12)
    pub month: u32,

    /// 마감 상태
    pub close_state: CloseState,

    /// 목표 항목 목록
    pub items: Vec<TargetItem>,
}

impl MonthlyTarget {
    /// 월 목표 합계
    pub fn total_amount(&self) -> i64 {
        self.items.iter().map(|item| item.amount).sum()
    }
}
