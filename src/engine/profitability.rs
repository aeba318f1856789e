// ==========================================
// FrameInsight - 손익 집계 엔진
// ==========================================
// 책임: 부서/프로젝트 손익 롤업, 이익 기여율, 성적 부여,
//       프로젝트 수익성 시뮬레이션
// 제약: 0 나누기는 모두 0으로 수렴. 손실 부서의 음수 기여율은
//       유효한 값이며 잘라내지 않는다
// ==========================================

use crate::domain::types::ProfitGrade;
use serde::{Deserialize, Serialize};

// ==========================================
// 입력/출력 타입
// ==========================================

/// 손익 롤업 입력 행 (부서 또는 프로젝트 단위)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfitRow {
    /// 행 식별자 (부서명 또는 프로젝트 코드)
    pub key: String,

    /// 매출 (원)
    pub revenue: i64,

    /// 직접비 (원)
    pub direct_cost: i64,

    /// 공통비 (원)
    pub overhead_cost: i64,
}

/// 손익 롤업 결과 행
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfitRowResult {
    pub key: String,
    pub revenue: i64,
    pub direct_cost: i64,
    pub overhead_cost: i64,

    /// 총 비용 (직접비 + 공통비)
    pub total_cost: i64,

    /// 영업이익 (매출 − 총 비용, 음수 가능)
    pub profit: i64,

    /// 행 이익률 (%)
    pub margin_pct: f64,

    /// 전사 이익 대비 기여율 (%, 부호 보존)
    pub contribution_pct: f64,

    /// 성적
    pub grade: ProfitGrade,
}

/// 손익 롤업 전체 결과
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfitabilityRollup {
    pub total_revenue: i64,
    pub total_cost: i64,
    pub total_profit: i64,

    /// 전사 이익률 (%)
    pub margin_pct: f64,

    pub rows: Vec<ProfitRowResult>,
}

/// 프로젝트 시뮬레이션 인건비 입력
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LaborInput {
    /// 월 원가 (원)
    pub monthly_cost: i64,

    /// 투입 공수 (M/M)
    pub man_month: f64,
}

/// 프로젝트 수익성 시뮬레이션 결과
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectSimulation {
    /// 수행 인식 금액 (원)
    pub execution_amount: i64,

    /// 투입 인건비 합계 (원)
    pub labor_cost: i64,

    /// 외주/경비 합계 (원)
    pub direct_expense: i64,

    /// 총 비용 (원)
    pub total_cost: i64,

    /// 예상 이익 (원, 음수 가능)
    pub profit: i64,

    /// 예상 이익률 (%)
    pub margin_pct: f64,
}

// ==========================================
// ProfitabilityEngine - 손익 집계 엔진
// ==========================================

/// 손익 집계 엔진
pub struct ProfitabilityEngine;

impl ProfitabilityEngine {
    pub fn new() -> Self {
        Self
    }

    /// 손익 롤업
    ///
    /// 행별 이익 = 매출 − 직접비 − 공통비.
    /// 전사 이익률과 행별 기여율은 0 나누기 시 0으로 수렴한다.
    pub fn rollup(&self, rows: &[ProfitRow]) -> ProfitabilityRollup {
        let total_revenue: i64 = rows.iter().map(|r| r.revenue).sum();
        let total_cost: i64 = rows.iter().map(|r| r.direct_cost + r.overhead_cost).sum();
        let total_profit: i64 = rows
            .iter()
            .map(|r| r.revenue - r.direct_cost - r.overhead_cost)
            .sum();

        let margin_pct = Self::ratio_pct(total_profit, total_revenue);

        let row_results = rows
            .iter()
            .map(|row| {
                let total_row_cost = row.direct_cost + row.overhead_cost;
                let profit = row.revenue - total_row_cost;
                let row_margin = Self::ratio_pct(profit, row.revenue);
                let contribution = Self::ratio_pct(profit, total_profit);
                ProfitRowResult {
                    key: row.key.clone(),
                    revenue: row.revenue,
                    direct_cost: row.direct_cost,
                    overhead_cost: row.overhead_cost,
                    total_cost: total_row_cost,
                    profit,
                    margin_pct: row_margin,
                    contribution_pct: contribution,
                    grade: Self::grade(row_margin, contribution),
                }
            })
            .collect();

        ProfitabilityRollup {
            total_revenue,
            total_cost,
            total_profit,
            margin_pct,
            rows: row_results,
        }
    }

    /// 성적 부여
    ///
    /// 경계 포함(≥), 선언 순서대로 첫 매치:
    /// S: 이익률 25% 이상이고 기여율 15% 이상
    /// A: 이익률 15% 이상 / B: 5% 이상 / 그 외 C
    pub fn grade(margin_pct: f64, contribution_pct: f64) -> ProfitGrade {
        if margin_pct >= 25.0 && contribution_pct >= 15.0 {
            ProfitGrade::S
        } else if margin_pct >= 15.0 {
            ProfitGrade::A
        } else if margin_pct >= 5.0 {
            ProfitGrade::B
        } else {
            ProfitGrade::C
        }
    }

    /// 프로젝트 수익성 시뮬레이션
    ///
    /// 총 비용 = Σ(월 원가 × M/M) + 외주 + 경비.
    pub fn simulate_project(
        &self,
        execution_amount: i64,
        labor: &[LaborInput],
        outsourcing_total: i64,
        expense_total: i64,
    ) -> ProjectSimulation {
        let labor_cost: i64 = labor
            .iter()
            .map(|l| crate::engine::round_krw(l.monthly_cost as f64 * l.man_month))
            .sum();
        let direct_expense = outsourcing_total + expense_total;
        let total_cost = labor_cost + direct_expense;
        let profit = execution_amount - total_cost;

        ProjectSimulation {
            execution_amount,
            labor_cost,
            direct_expense,
            total_cost,
            profit,
            margin_pct: Self::ratio_pct(profit, execution_amount),
        }
    }

    /// 백분율 계산 (분모 0 방어)
    fn ratio_pct(numerator: i64, denominator: i64) -> f64 {
        if denominator == 0 {
            0.0
        } else {
            numerator as f64 / denominator as f64 * 100.0
        }
    }
}

impl Default for ProfitabilityEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(key: &str, revenue: i64, direct: i64, overhead: i64) -> ProfitRow {
        ProfitRow {
            key: key.to_string(),
            revenue,
            direct_cost: direct,
            overhead_cost: overhead,
        }
    }

    #[test]
    fn test_rollup_with_loss_making_row() {
        // 기준 케이스: 이익 30 + (−10) = 20, 이익률 13.3%, 2행 기여율 −50%
        let engine = ProfitabilityEngine::new();
        let rollup = engine.rollup(&[row("A", 100, 60, 10), row("B", 50, 55, 5)]);

        assert_eq!(rollup.total_revenue, 150);
        assert_eq!(rollup.total_profit, 20);
        assert!((rollup.margin_pct - 13.333333333333334).abs() < 1e-9);

        let b = &rollup.rows[1];
        assert_eq!(b.profit, -10);
        // 손실 행의 기여율은 음수 그대로 보존
        assert!((b.contribution_pct - (-50.0)).abs() < 1e-9);
    }

    #[test]
    fn test_zero_revenue_margin_is_zero() {
        let engine = ProfitabilityEngine::new();
        let rollup = engine.rollup(&[row("A", 0, 0, 0)]);
        assert_eq!(rollup.margin_pct, 0.0);
        assert_eq!(rollup.rows[0].contribution_pct, 0.0);
    }

    #[test]
    fn test_grade_boundaries_inclusive() {
        // 경계 정확히 25.0 / 15.0 → S (포함 판정)
        assert_eq!(ProfitabilityEngine::grade(25.0, 15.0), ProfitGrade::S);
        // 이익률 24.99% → S 탈락, 이익률 단독으로 A
        assert_eq!(ProfitabilityEngine::grade(24.99, 99.0), ProfitGrade::A);
        // 기여율 미달이면 이익률이 높아도 A
        assert_eq!(ProfitabilityEngine::grade(30.0, 14.99), ProfitGrade::A);
        assert_eq!(ProfitabilityEngine::grade(15.0, 0.0), ProfitGrade::A);
        assert_eq!(ProfitabilityEngine::grade(5.0, 0.0), ProfitGrade::B);
        assert_eq!(ProfitabilityEngine::grade(4.99, 0.0), ProfitGrade::C);
        assert_eq!(ProfitabilityEngine::grade(-10.0, -50.0), ProfitGrade::C);
    }

    #[test]
    fn test_simulate_project() {
        let engine = ProfitabilityEngine::new();
        let labor = vec![
            LaborInput {
                monthly_cost: 5_500_000,
                man_month: 6.0,
            },
            LaborInput {
                monthly_cost: 8_000_000,
                man_month: 5.5,
            },
        ];
        let sim = engine.simulate_project(658_800_000, &labor, 60_000_000, 12_000_000);
        assert_eq!(sim.labor_cost, 33_000_000 + 44_000_000);
        assert_eq!(sim.total_cost, 77_000_000 + 72_000_000);
        assert_eq!(sim.profit, 658_800_000 - 149_000_000);
        assert!(sim.margin_pct > 0.0);
    }

    #[test]
    fn test_simulate_project_zero_execution_amount() {
        let engine = ProfitabilityEngine::new();
        let sim = engine.simulate_project(0, &[], 0, 0);
        assert_eq!(sim.margin_pct, 0.0);
    }
}
