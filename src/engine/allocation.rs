// ==========================================
// FrameInsight - 인력 배정 집계 엔진
// ==========================================
// 책임: 직원별 월 가동률 집계와 분류, 유휴 원가 산출
// 제약: 읽기 전용 진단 뷰. 초과 배정을 잘라내거나 거부하지 않는다
//       (차단/자동 재배분 여부는 미결 제품 이슈)
// ==========================================

use crate::domain::assignment::{Assignment, UtilizationSummary};
use crate::domain::types::UtilizationClass;
use crate::engine::round_krw;
use tracing::warn;

/// 완전 가동(1.0 M/M) 판정 허용 오차
const FULL_UTILIZATION_EPS: f64 = 1e-9;

// ==========================================
// AllocationAggregator - 가동률 집계기
// ==========================================

/// 인력 배정 집계기
pub struct AllocationAggregator;

impl AllocationAggregator {
    pub fn new() -> Self {
        Self
    }

    /// 특정 직원의 특정 월 가동률 집계
    ///
    /// 해당 월의 배정 공수를 합산하고 분류한다. 합계가 1.0을 넘으면
    /// 경고 로그를 남기지만 값은 그대로 보존한다.
    pub fn aggregate(
        &self,
        employee_id: &str,
        year: i32,
        month: u32,
        assignments: &[Assignment],
    ) -> UtilizationSummary {
        let items: Vec<Assignment> = assignments
            .iter()
            .filter(|a| a.employee_id == employee_id && a.year == year && a.month == month)
            .cloned()
            .collect();

        let total_man_month: f64 = items.iter().map(|a| a.man_month).sum();
        let class = Self::classify(total_man_month);

        if class == UtilizationClass::OverAllocated {
            warn!(
                employee_id = %employee_id,
                year,
                month,
                total_man_month,
                "초과 배정 감지 (경고 표시만, 차단하지 않음)"
            );
        }

        UtilizationSummary {
            employee_id: employee_id.to_string(),
            year,
            month,
            total_man_month,
            class,
            items,
        }
    }

    /// 가동률 분류
    ///
    /// 0 → 유휴, (0,1) → 부분 가동, 1.0(±ε) → 완전 가동, 1 초과 → 초과 배정
    pub fn classify(total_man_month: f64) -> UtilizationClass {
        if total_man_month <= 0.0 {
            UtilizationClass::Idle
        } else if (total_man_month - 1.0).abs() <= FULL_UTILIZATION_EPS {
            UtilizationClass::FullyUtilized
        } else if total_man_month < 1.0 {
            UtilizationClass::UnderUtilized
        } else {
            UtilizationClass::OverAllocated
        }
    }

    /// 유휴 원가 산출
    ///
    /// 미배정 공수(1 − 합계, 음수면 0)에 해당하는 월 원가.
    /// 부서별 손실 항목으로 리포트에 반영된다.
    pub fn idle_cost(&self, monthly_cost: i64, total_man_month: f64) -> i64 {
        let idle_fraction = (1.0 - total_man_month).max(0.0);
        round_krw(monthly_cost as f64 * idle_fraction)
    }
}

impl Default for AllocationAggregator {
    fn default() -> Self {
        Self::new()
    }
}
