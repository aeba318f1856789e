// ==========================================
// FrameInsight - 직원 도메인 모델
// ==========================================
// 책임: 직원 엔티티와 보상 기준(연봉/계약) 조회 규칙
// 제약: 직원은 하드 삭제하지 않는다 (archived 플래그로 퇴사 처리,
//       과거 원가 귀속을 보존)
// ==========================================

use crate::domain::types::{EmploymentType, TechGrade};
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ==========================================
// ContractPeriod - 프리랜서 계약 이력
// ==========================================

/// 프리랜서 계약 구간
///
/// seq 순으로 정렬된 이력이며 구간은 [start_date, end_date] 양끝 포함이다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContractPeriod {
    /// 계약 차수 (1부터 시작)
    pub seq: i32,

    /// 계약 시작일
    pub start_date: NaiveDate,

    /// 계약 종료일
    pub end_date: NaiveDate,

    /// 월 계약 금액 (원)
    pub monthly_amount: i64,
}

impl ContractPeriod {
    /// 평가일이 계약 구간에 포함되는지 판정
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start_date <= date && date <= self.end_date
    }
}

// ==========================================
// Employee - 직원 엔티티
// ==========================================

/// 직원
///
/// 고용 형태에 따라 보상 기준이 달라진다:
/// - 정규직: salaries (회계연도 → 연봉)
/// - 프리랜서: contracts (계약 이력)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Employee {
    /// 사번 (예: EMP-2024-001)
    pub id: String,

    /// 성명
    pub name: String,

    /// 이메일
    #[serde(default)]
    pub email: Option<String>,

    /// 소속 부서
    pub dept: String,

    /// 직급 (사원/선임/책임/수석 등)
    pub rank: String,

    /// 기술 등급
    pub tech_grade: TechGrade,

    /// 입사 연도
    pub hire_year: i32,

    /// 고용 형태
    pub employment_type: EmploymentType,

    /// 회계연도별 연봉 (정규직, 원)
    #[serde(default)]
    pub salaries: BTreeMap<i32, i64>,

    /// 계약 이력 (프리랜서, seq 오름차순)
    #[serde(default)]
    pub contracts: Vec<ContractPeriod>,

    /// 퇴사 여부 (소프트 삭제)
    #[serde(default)]
    pub archived: bool,
}

impl Employee {
    /// 평가 연도에 적용할 연봉 조회 (정규직)
    ///
    /// 평가 연도 이하의 가장 최근 회계연도를 선택하고,
    /// 해당하는 연도가 없으면 가장 이른 연도로 폴백한다.
    /// 연봉 데이터가 전혀 없으면 None (신규 입사 등 유효한 상태).
    pub fn annual_salary_for(&self, eval_year: i32) -> Option<i64> {
        if self.salaries.is_empty() {
            return None;
        }
        self.salaries
            .range(..=eval_year)
            .next_back()
            .map(|(_, amount)| *amount)
            .or_else(|| self.salaries.values().next().copied())
    }

    /// 평가일에 유효한 계약 조회 (프리랜서)
    ///
    /// 평가일을 포함하는 계약을 우선 선택하고, 없으면 평가일 이전에
    /// 종료된 계약 중 가장 최근 것으로 폴백한다. 계약 공백기에도
    /// 결정적으로 동작해야 한다.
    pub fn contract_for(&self, eval_date: NaiveDate) -> Option<&ContractPeriod> {
        if let Some(active) = self.contracts.iter().find(|c| c.contains(eval_date)) {
            return Some(active);
        }
        self.contracts
            .iter()
            .filter(|c| c.end_date <= eval_date)
            .max_by_key(|c| c.end_date)
    }

    /// 표시용 급여 정보 (목록 화면)
    ///
    /// 정규직은 평가 연도 연봉, 프리랜서는 유효 계약의 월 금액.
    pub fn display_amount(&self, eval_date: NaiveDate) -> i64 {
        match self.employment_type {
            EmploymentType::Regular => self.annual_salary_for(eval_date.year()).unwrap_or(0),
            EmploymentType::Freelance => self
                .contract_for(eval_date)
                .map(|c| c.monthly_amount)
                .unwrap_or(0),
        }
    }
}

// ==========================================
// RawEmployeeRecord - 일괄 등록 원시 레코드
// ==========================================

/// Excel/CSV 일괄 등록에서 매핑된 원시 직원 레코드
///
/// 검증 전 단계의 값이므로 대부분 Option이다. 행 번호는
/// 에러/충돌 보고에 사용한다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawEmployeeRecord {
    /// 사번
    pub employee_id: Option<String>,

    /// 성명
    pub name: Option<String>,

    /// 이메일
    pub email: Option<String>,

    /// 소속 부서
    pub dept: Option<String>,

    /// 직급
    pub rank: Option<String>,

    /// 기술 등급 (한글 표기)
    pub tech_grade: Option<String>,

    /// 입사 연도
    pub hire_year: Option<i32>,

    /// 고용 형태 (한글 표기)
    pub employment_type: Option<String>,

    /// 회계연도 (미지정 시 입사 연도)
    pub fiscal_year: Option<i32>,

    /// 연봉 (정규직, 원)
    pub annual_salary: Option<i64>,

    /// 월 계약 금액 (프리랜서, 원)
    pub monthly_amount: Option<i64>,

    /// 계약 시작일 (프리랜서)
    pub contract_start: Option<NaiveDate>,

    /// 계약 종료일 (프리랜서)
    pub contract_end: Option<NaiveDate>,

    /// 원본 파일 행 번호 (헤더 제외, 1부터)
    pub row_number: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn regular_with_salaries(salaries: &[(i32, i64)]) -> Employee {
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
    fn test_salary_latest_year_not_after_eval() {
        let emp = regular_with_salaries(&[(2024, 50_000_000), (2025, 54_000_000), (2026, 58_000_000)]);
        assert_eq!(emp.annual_salary_for(2025), Some(54_000_000));
        assert_eq!(emp.annual_salary_for(2026), Some(58_000_000));
        // 2030년 평가여도 최신 연도로 수렴
        assert_eq!(emp.annual_salary_for(2030), Some(58_000_000));
    }

    #[test]
    fn test_salary_fallback_to_earliest() {
        let emp = regular_with_salaries(&[(2024, 50_000_000)]);
        // 평가 연도 이전 데이터만 있으면 가장 이른 연도로 폴백
        assert_eq!(emp.annual_salary_for(2023), Some(50_000_000));
    }

    #[test]
    fn test_salary_missing_is_none() {
        let emp = regular_with_salaries(&[]);
        assert_eq!(emp.annual_salary_for(2025), None);
    }

    #[test]
    fn test_contract_gap_falls_back_to_last_ended() {
        let mut emp = regular_with_salaries(&[]);
        emp.employment_type = EmploymentType::Freelance;
        emp.contracts = vec![
            ContractPeriod {
                seq: 1,
                start_date: date(2024, 1, 1),
                end_date: date(2024, 6, 30),
                monthly_amount: 4_500_000,
            },
            ContractPeriod {
                seq: 2,
                start_date: date(2024, 9, 1),
                end_date: date(2024, 12, 31),
                monthly_amount: 5_000_000,
            },
        ];

        // 계약 공백기 (7~8월): 직전 종료 계약으로 폴백
        let gap = emp.contract_for(date(2024, 7, 15)).unwrap();
        assert_eq!(gap.seq, 1);

        // 활성 구간은 해당 계약 선택
        let active = emp.contract_for(date(2024, 10, 1)).unwrap();
        assert_eq!(active.seq, 2);

        // 첫 계약 시작 전: 유효 계약 없음
        assert!(emp.contract_for(date(2023, 12, 1)).is_none());
    }
}
