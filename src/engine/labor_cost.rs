// ==========================================
// FrameInsight - 인건비 원가 엔진
// ==========================================
// 책임: 월 기본급 산정 + 요율 가산 월 원가 계산
// 제약: 순수 함수. 보상 데이터 부재는 에러가 아니라 0원 상태다
//       (연봉 미입력 신규 입사자 등은 유효한 상태)
// ==========================================

use crate::domain::employee::Employee;
use crate::domain::standards::CostStandard;
use crate::domain::types::EmploymentType;
use crate::engine::round_krw;
use chrono::{Datelike, NaiveDate};

// ==========================================
// LaborCostEngine - 인건비 원가 엔진
// ==========================================

/// 인건비 원가 엔진
///
/// 월 원가 산식:
/// ```text
/// loaded = base × (1 + 보험 + 퇴직급여 + 공통비)
/// total  = loaded × (1 + 리스크 버퍼)
/// ```
/// 결과는 원 단위 반올림(round-half-up).
pub struct LaborCostEngine;

impl LaborCostEngine {
    pub fn new() -> Self {
        Self
    }

    /// 평가일 기준 월 기본급 산정
    ///
    /// - 정규직: 평가 연도 이하 최신 회계연도의 연봉 ÷ 12
    ///   (해당 연도가 없으면 가장 이른 연도, 데이터가 없으면 0)
    /// - 프리랜서: 평가일을 포함하는 계약의 월 금액
    ///   (없으면 직전 종료 계약, 시작 전이면 0)
    pub fn monthly_base_amount(&self, employee: &Employee, eval_date: NaiveDate) -> i64 {
        match employee.employment_type {
            EmploymentType::Regular => employee
                .annual_salary_for(eval_date.year())
                .map(|annual| round_krw(annual as f64 / 12.0))
                .unwrap_or(0),
            EmploymentType::Freelance => employee
                .contract_for(eval_date)
                .map(|c| c.monthly_amount)
                .unwrap_or(0),
        }
    }

    /// 요율 가산 월 원가 계산
    ///
    /// base에 대해 단조 비감소이며, base가 0이면 결과도 0이다.
    pub fn loaded_monthly_cost(&self, base: i64, standard: &CostStandard) -> i64 {
        let loaded = base as f64
            * (1.0 + standard.insurance_rate + standard.severance_rate + standard.overhead_rate);
        round_krw(loaded * (1.0 + standard.risk_buffer_rate))
    }

    /// 고용 형태에 맞는 기준 선택
    ///
    /// 정확히 일치하는 기준이 없으면 첫 번째 설정 기준으로,
    /// 기준표가 비어 있으면 고용 형태별 기본 기준으로 폴백한다.
    pub fn standard_for(
        &self,
        employment_type: EmploymentType,
        standards: &[CostStandard],
    ) -> CostStandard {
        standards
            .iter()
            .find(|s| s.employment_type == employment_type)
            .or_else(|| standards.first())
            .cloned()
            .unwrap_or_else(|| match employment_type {
                EmploymentType::Regular => CostStandard::default_regular(),
                EmploymentType::Freelance => CostStandard::default_freelance(),
            })
    }

    /// 직원의 평가일 기준 월 원가
    pub fn monthly_cost(
        &self,
        employee: &Employee,
        standards: &[CostStandard],
        eval_date: NaiveDate,
    ) -> i64 {
        let base = self.monthly_base_amount(employee, eval_date);
        let standard = self.standard_for(employee.employment_type, standards);
        self.loaded_monthly_cost(base, &standard)
    }
}

impl Default for LaborCostEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::employee::ContractPeriod;
    use crate::domain::types::TechGrade;
    use std::collections::BTreeMap;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn standard(insurance: f64, severance: f64, overhead: f64, buffer: f64) -> CostStandard {
        CostStandard {
            employment_type: EmploymentType::Regular,
            insurance_rate: insurance,
            severance_rate: severance,
            overhead_rate: overhead,
            risk_buffer_rate: buffer,
        }
    }

    fn regular(salaries: &[(i32, i64)]) -> Employee {
        Employee {
            id: "EMP-2024-001".to_string(),
            name: "홍길동".to_string(),
            email: None,
            dept: "플랫폼 개발팀".to_string(),
            rank: "사원".to_string(),
            tech_grade: TechGrade::Junior,
            hire_year: 2024,
            employment_type: EmploymentType::Regular,
            salaries: salaries.iter().copied().collect(),
            contracts: Vec::new(),
            archived: false,
        }
    }

    #[test]
    fn test_reference_case() {
        // 기준 케이스: 600만원 기본급 × 1.3533 × 1.05 = 8,525,790원
        let engine = LaborCostEngine::new();
        let std = standard(0.12, 0.0833, 0.15, 0.05);
        assert_eq!(engine.loaded_monthly_cost(6_000_000, &std), 8_525_790);
    }

    #[test]
    fn test_zero_base_is_zero_cost() {
        let engine = LaborCostEngine::new();
        let std = standard(0.12, 0.0833, 0.15, 0.05);
        assert_eq!(engine.loaded_monthly_cost(0, &std), 0);
    }

    #[test]
    fn test_monotonic_in_base() {
        let engine = LaborCostEngine::new();
        let std = standard(0.12, 0.0833, 0.15, 0.05);
        let mut prev = 0;
        for base in (0..=10_000_000).step_by(500_000) {
            let cost = engine.loaded_monthly_cost(base, &std);
            assert!(cost >= prev, "base={} cost={} prev={}", base, cost, prev);
            prev = cost;
        }
    }

    #[test]
    fn test_missing_salary_evaluates_to_zero() {
        // 연봉 미입력 신규 입사자: 에러가 아니라 0원
        let engine = LaborCostEngine::new();
        let emp = regular(&[]);
        let std = standard(0.12, 0.0833, 0.15, 0.05);
        assert_eq!(engine.monthly_cost(&emp, &[std], date(2026, 3, 1)), 0);
    }

    #[test]
    fn test_regular_base_from_latest_year() {
        let engine = LaborCostEngine::new();
        let emp = regular(&[(2024, 60_000_000), (2026, 72_000_000)]);
        // 2025년 평가: 2024년 연봉 적용
        assert_eq!(
            engine.monthly_base_amount(&emp, date(2025, 6, 1)),
            5_000_000
        );
        // 2026년 평가: 2026년 연봉 적용
        assert_eq!(
            engine.monthly_base_amount(&emp, date(2026, 6, 1)),
            6_000_000
        );
    }

    #[test]
    fn test_freelance_gap_is_deterministic() {
        let engine = LaborCostEngine::new();
        let emp = Employee {
            id: "EMP-2024-025".to_string(),
            name: "한가인".to_string(),
            email: None,
            dept: "디자인팀".to_string(),
            rank: "사원".to_string(),
            tech_grade: TechGrade::Intermediate,
            hire_year: 2024,
            employment_type: EmploymentType::Freelance,
            salaries: BTreeMap::new(),
            contracts: vec![
                ContractPeriod {
                    seq: 1,
                    start_date: date(2024, 1, 1),
                    end_date: date(2024, 5, 31),
                    monthly_amount: 4_500_000,
                },
                ContractPeriod {
                    seq: 2,
                    start_date: date(2024, 8, 1),
                    end_date: date(2024, 12, 31),
                    monthly_amount: 5_000_000,
                },
            ],
            archived: false,
        };
        // 계약 공백기: 직전 종료 계약 금액으로 폴백, panic 없이 결정적
        assert_eq!(
            engine.monthly_base_amount(&emp, date(2024, 6, 15)),
            4_500_000
        );
    }

    #[test]
    fn test_standard_fallback_to_first_configured() {
        let engine = LaborCostEngine::new();
        // 정규직 기준만 등록된 상태에서 프리랜서 조회: 첫 기준으로 폴백
        let only_regular = vec![standard(0.12, 0.0833, 0.15, 0.05)];
        let picked = engine.standard_for(EmploymentType::Freelance, &only_regular);
        assert_eq!(picked.insurance_rate, 0.12);
        // 기준표 자체가 비어 있으면 내장 기본 기준
        let picked = engine.standard_for(EmploymentType::Freelance, &[]);
        assert_eq!(picked, CostStandard::default_freelance());
    }
}
