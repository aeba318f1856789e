// ==========================================
// FrameInsight - 필드 매퍼 구현
// ==========================================
// 책임: 업로드 파일의 한글 헤더 → 표준 필드 매핑 + 타입 변환
// ==========================================

use crate::domain::employee::RawEmployeeRecord;
use crate::importer::employee_importer_trait::FieldMapper as FieldMapperTrait;
use crate::importer::error::ImportError;
use chrono::NaiveDate;
use std::collections::HashMap;

pub struct EmployeeFieldMapper;

impl FieldMapperTrait for EmployeeFieldMapper {
    fn map_to_raw_employee(
        &self,
        row: HashMap<String, String>,
        row_number: usize,
    ) -> Result<RawEmployeeRecord, Box<dyn std::error::Error>> {
        Ok(RawEmployeeRecord {
            // 주키
            employee_id: self.get_string(&row, "사번"),

            // 기본 인적 사항
            name: self.get_string(&row, "성명"),
            email: self.get_string(&row, "이메일"),
            dept: self.get_string(&row, "부서"),
            rank: self.get_string(&row, "직급"),
            tech_grade: self.get_string(&row, "기술등급"),
            hire_year: self.parse_i32(&row, "입사연도", row_number)?,
            employment_type: self.get_string(&row, "고용형태"),

            // 보상 정보
            fiscal_year: self.parse_i32(&row, "회계연도", row_number)?,
            annual_salary: self.parse_i64(&row, "연봉", row_number)?,
            monthly_amount: self.parse_i64(&row, "월계약금액", row_number)?,
            contract_start: self.parse_date(&row, "계약시작일", row_number)?,
            contract_end: self.parse_date(&row, "계약종료일", row_number)?,

            // 메타 정보
            row_number,
        })
    }
}

impl EmployeeFieldMapper {
    /// 문자열 필드 추출 (Option 반환), 가능한 컬럼명 별칭 지원
    fn get_string(&self, row: &HashMap<String, String>, key: &str) -> Option<String> {
        // 컬럼명 별칭 매핑
        let aliases: Vec<&str> = match key {
            "사번" => vec!["사번", "직원번호", "ID"],
            "성명" => vec!["성명", "이름", "직원명"],
            "부서" => vec!["부서", "소속부서", "소속"],
            "기술등급" => vec!["기술등급", "등급"],
            "고용형태" => vec!["고용형태", "고용구분"],
            "월계약금액" => vec!["월계약금액", "월단가"],
            _ => vec![key],
        };

        // 모든 별칭 시도
        for alias in aliases {
            if let Some(v) = row.get(alias) {
                let trimmed = v.trim();
                if !trimmed.is_empty() {
                    return Some(trimmed.to_string());
                }
            }
        }
        None
    }

    /// i32 필드 파싱
    fn parse_i32(
        &self,
        row: &HashMap<String, String>,
        key: &str,
        row_number: usize,
    ) -> Result<Option<i32>, ImportError> {
        match self.get_string(row, key) {
            Some(raw) => raw
                .replace(',', "")
                .parse::<i32>()
                .map(Some)
                .map_err(|e| ImportError::TypeConversionError {
                    row: row_number,
                    field: key.to_string(),
                    message: e.to_string(),
                }),
            None => Ok(None),
        }
    }

    /// i64 금액 필드 파싱 (천 단위 구분자 허용)
    fn parse_i64(
        &self,
        row: &HashMap<String, String>,
        key: &str,
        row_number: usize,
    ) -> Result<Option<i64>, ImportError> {
        match self.get_string(row, key) {
            Some(raw) => raw
                .replace(',', "")
                .parse::<i64>()
                .map(Some)
                .map_err(|e| ImportError::TypeConversionError {
                    row: row_number,
                    field: key.to_string(),
                    message: e.to_string(),
                }),
            None => Ok(None),
        }
    }

    /// 날짜 필드 파싱 (YYYY-MM-DD)
    fn parse_date(
        &self,
        row: &HashMap<String, String>,
        key: &str,
        row_number: usize,
    ) -> Result<Option<NaiveDate>, ImportError> {
        match self.get_string(row, key) {
            Some(raw) => NaiveDate::parse_from_str(&raw, "%Y-%m-%d").map(Some).map_err(
                |_| ImportError::DateFormatError {
                    row: row_number,
                    field: key.to_string(),
                    value: raw,
                },
            ),
            None => Ok(None),
        }
    }
}
