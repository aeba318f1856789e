// ==========================================
// FrameInsight - 정산 엔진
// ==========================================
// 책임: 부서 간 인력 대여 청구액 계산, 전사 공통비 인원수 비례 배분
// 제약: 대여 정산은 청구액 산식만 제공한다. 손익 롤업에 자동 반영하는
//       정산 알고리즘은 미결 제품 이슈로 남겨둔다
// ==========================================

use crate::engine::round_krw;
use serde::{Deserialize, Serialize};

/// 부서별 공통비 배분 결과
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommonCostShare {
    /// 부서명
    pub dept: String,

    /// 부서 인원수
    pub headcount: u32,

    /// 배분 금액 (원)
    pub amount: i64,
}

// ==========================================
// SettlementEngine - 정산 엔진
// ==========================================

/// 정산 엔진
pub struct SettlementEngine;

impl SettlementEngine {
    pub fn new() -> Self {
        Self
    }

    /// 부서 간 인력 대여 청구액
    ///
    /// 청구액 = 내부 원가 × (1 + 마크업 요율), 원 단위 반올림.
    pub fn billed_amount(&self, internal_cost: i64, markup_rate: f64) -> i64 {
        round_krw(internal_cost as f64 * (1.0 + markup_rate))
    }

    /// 전사 공통비를 부서별 인원수 비례로 배분
    ///
    /// 정수 나눗셈 잔액은 최대 인원 부서에 귀속시켜
    /// 배분 합계가 항상 총액과 일치하도록 한다.
    pub fn allocate_common_cost(
        &self,
        total_common_cost: i64,
        headcounts: &[(String, u32)],
    ) -> Vec<CommonCostShare> {
        let total_headcount: u32 = headcounts.iter().map(|(_, count)| count).sum();
        if total_headcount == 0 {
            return headcounts
                .iter()
                .map(|(dept, count)| CommonCostShare {
                    dept: dept.clone(),
                    headcount: *count,
                    amount: 0,
                })
                .collect();
        }

        let mut shares: Vec<CommonCostShare> = headcounts
            .iter()
            .map(|(dept, count)| CommonCostShare {
                dept: dept.clone(),
                headcount: *count,
                amount: total_common_cost * (*count as i64) / (total_headcount as i64),
            })
            .collect();

        // 잔액 귀속: 최대 인원 부서 (동률이면 먼저 선언된 부서)
        let allocated: i64 = shares.iter().map(|s| s.amount).sum();
        let remainder = total_common_cost - allocated;
        if remainder != 0 {
            if let Some(largest) = shares.iter_mut().max_by_key(|s| s.headcount) {
                largest.amount += remainder;
            }
        }

        shares
    }
}

impl Default for SettlementEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_billed_amount_markup() {
        let engine = SettlementEngine::new();
        // 10% 마크업
        assert_eq!(engine.billed_amount(5_000_000, 0.10), 5_500_000);
        // 마크업 0이면 원가 그대로
        assert_eq!(engine.billed_amount(5_000_000, 0.0), 5_000_000);
    }

    #[test]
    fn test_common_cost_allocation_is_lossless() {
        let engine = SettlementEngine::new();
        let headcounts = vec![
            ("DX 사업본부".to_string(), 5),
            ("플랫폼 개발팀".to_string(), 3),
            ("디자인팀".to_string(), 3),
        ];
        let shares = engine.allocate_common_cost(100_000_000, &headcounts);
        let total: i64 = shares.iter().map(|s| s.amount).sum();
        // 정수 잔액 포함 총액 보존
        assert_eq!(total, 100_000_000);
        // 인원수 비례 (5/11)
        assert!(shares[0].amount >= shares[1].amount);
    }

    #[test]
    fn test_common_cost_zero_headcount() {
        let engine = SettlementEngine::new();
        let shares =
            engine.allocate_common_cost(100_000_000, &[("플랫폼 개발팀".to_string(), 0)]);
        assert_eq!(shares[0].amount, 0);
    }
}
