// ==========================================
// FrameInsight - 직원 일괄 등록 구현
// ==========================================
// 책임: 파싱 → 매핑 → 검증 → 저장 파이프라인과 결과 보고서 생성
// 제약: 충돌(중복 사번)은 자동 해소하지 않고 보고만 한다
// ==========================================

use crate::domain::employee::{ContractPeriod, Employee, RawEmployeeRecord};
use crate::domain::types::{EmploymentType, TechGrade};
use crate::importer::employee_importer_trait::{
    EmployeeImporter, FieldMapper as FieldMapperTrait, FileParser,
};
use crate::importer::error::ImportError;
use crate::importer::field_mapper::EmployeeFieldMapper;
use crate::importer::file_parser::{CsvParser, ExcelParser};
use crate::repository::employee_repo::EmployeeRepository;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::error::Error;
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};

// ==========================================
// 결과 보고서 타입
// ==========================================

/// 일괄 등록 충돌 항목 (중복 사번 등)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportConflict {
    /// 원본 파일 행 번호
    pub row_number: usize,

    /// 충돌 사번
    pub employee_id: String,

    /// 충돌 사유
    pub reason: String,
}

/// 일괄 등록 결과 보고서
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportReport {
    /// 파일의 데이터 행 수
    pub total_rows: usize,

    /// 등록 성공 건수
    pub imported: usize,

    /// 건너뛴 건수 (검증 실패 + 충돌)
    pub skipped: usize,

    /// 충돌 목록 (보고만, 자동 해소 없음)
    pub conflicts: Vec<ImportConflict>,

    /// 행 단위 에러 메시지
    pub errors: Vec<String>,
}

// ==========================================
// EmployeeImporterImpl - 일괄 등록 구현체
// ==========================================

/// 직원 일괄 등록 구현체
pub struct EmployeeImporterImpl {
    employee_repo: Arc<EmployeeRepository>,
}

impl EmployeeImporterImpl {
    pub fn new(employee_repo: Arc<EmployeeRepository>) -> Self {
        Self { employee_repo }
    }

    /// 매핑된 레코드 목록을 검증/저장하고 보고서 생성
    fn import_records(&self, records: Vec<RawEmployeeRecord>) -> ImportReport {
        let total_rows = records.len();
        let mut report = ImportReport {
            total_rows,
            imported: 0,
            skipped: 0,
            conflicts: Vec::new(),
            errors: Vec::new(),
        };
        let mut seen_ids: HashSet<String> = HashSet::new();

        for record in records {
            match self.validate_record(&record, &mut seen_ids) {
                Ok(ValidationOutcome::Valid(employee)) => {
                    match self.employee_repo.insert(&employee) {
                        Ok(()) => report.imported += 1,
                        Err(e) => {
                            report.skipped += 1;
                            report
                                .errors
                                .push(format!("행 {}: 저장 실패: {}", record.row_number, e));
                        }
                    }
                }
                Ok(ValidationOutcome::Conflict(conflict)) => {
                    report.skipped += 1;
                    report.conflicts.push(conflict);
                }
                Err(e) => {
                    report.skipped += 1;
                    report.errors.push(e.to_string());
                }
            }
        }

        info!(
            total = report.total_rows,
            imported = report.imported,
            skipped = report.skipped,
            conflicts = report.conflicts.len(),
            "직원 일괄 등록 완료"
        );
        report
    }

    /// 행 단위 검증과 Employee 변환
    fn validate_record(
        &self,
        record: &RawEmployeeRecord,
        seen_ids: &mut HashSet<String>,
    ) -> Result<ValidationOutcome, ImportError> {
        let employee_id = record
            .employee_id
            .clone()
            .ok_or(ImportError::PrimaryKeyMissing(record.row_number))?;

        let name = record.name.clone().ok_or_else(|| ImportError::FieldMappingError {
            row: record.row_number,
            message: "성명이 비어 있습니다".to_string(),
        })?;

        let employment_raw = record.employment_type.clone().unwrap_or_default();
        let employment_type = EmploymentType::parse_label(&employment_raw).ok_or_else(|| {
            ImportError::FieldMappingError {
                row: record.row_number,
                message: format!("고용형태를 해석할 수 없습니다: {}", employment_raw),
            }
        })?;

        let hire_year = record.hire_year.ok_or_else(|| ImportError::FieldMappingError {
            row: record.row_number,
            message: "입사연도가 비어 있습니다".to_string(),
        })?;

        // 파일 내 중복
        if !seen_ids.insert(employee_id.clone()) {
            return Ok(ValidationOutcome::Conflict(ImportConflict {
                row_number: record.row_number,
                employee_id,
                reason: "파일 내 중복 사번".to_string(),
            }));
        }

        // DB 중복
        let existing = self
            .employee_repo
            .find_by_id(&employee_id)
            .map_err(|e| ImportError::DatabaseError(e.to_string()))?;
        if existing.is_some() {
            warn!(employee_id = %employee_id, "이미 등록된 사번 (건너뜀)");
            return Ok(ValidationOutcome::Conflict(ImportConflict {
                row_number: record.row_number,
                employee_id,
                reason: "이미 등록된 사번".to_string(),
            }));
        }

        // 보상 기준 구성: 고용 형태당 하나만 활성화
        let mut salaries = std::collections::BTreeMap::new();
        let mut contracts = Vec::new();
        match employment_type {
            EmploymentType::Regular => {
                if let Some(annual) = record.annual_salary {
                    let fiscal_year = record.fiscal_year.unwrap_or(hire_year);
                    salaries.insert(fiscal_year, annual);
                }
                // 연봉 미기재는 에러가 아니다 (0원 원가로 평가)
            }
            EmploymentType::Freelance => {
                if let (Some(start), Some(end), Some(amount)) =
                    (record.contract_start, record.contract_end, record.monthly_amount)
                {
                    contracts.push(ContractPeriod {
                        seq: 1,
                        start_date: start,
                        end_date: end,
                        monthly_amount: amount,
                    });
                }
            }
        }

        Ok(ValidationOutcome::Valid(Employee {
            id: employee_id,
            name,
            email: record.email.clone(),
            dept: record.dept.clone().unwrap_or_else(|| "미지정".to_string()),
            rank: record.rank.clone().unwrap_or_else(|| "사원".to_string()),
            tech_grade: record
                .tech_grade
                .as_deref()
                .and_then(TechGrade::parse_label)
                .unwrap_or(TechGrade::Junior),
            hire_year,
            employment_type,
            salaries,
            contracts,
            archived: false,
        }))
    }

    /// 파서 선택 후 공통 파이프라인 실행
    fn run_pipeline(
        &self,
        file_path: &Path,
        parser: &dyn FileParser,
    ) -> Result<ImportReport, Box<dyn Error>> {
        let raw_rows = parser.parse_to_raw_records(file_path)?;

        let mapper = EmployeeFieldMapper;
        let mut records = Vec::new();
        let mut mapping_errors = Vec::new();
        for (idx, row) in raw_rows.into_iter().enumerate() {
            // 행 번호는 헤더 제외 1부터
            match mapper.map_to_raw_employee(row, idx + 1) {
                Ok(record) => records.push(record),
                Err(e) => mapping_errors.push(e.to_string()),
            }
        }

        let mut report = self.import_records(records);
        report.total_rows += mapping_errors.len();
        report.skipped += mapping_errors.len();
        report.errors.extend(mapping_errors);
        Ok(report)
    }
}

/// 행 검증 결과
enum ValidationOutcome {
    Valid(Employee),
    Conflict(ImportConflict),
}

#[async_trait]
impl EmployeeImporter for EmployeeImporterImpl {
    async fn import_from_excel<P: AsRef<Path> + Send>(
        &self,
        file_path: P,
    ) -> Result<ImportReport, Box<dyn Error>> {
        self.run_pipeline(file_path.as_ref(), &ExcelParser)
    }

    async fn import_from_csv<P: AsRef<Path> + Send>(
        &self,
        file_path: P,
    ) -> Result<ImportReport, Box<dyn Error>> {
        self.run_pipeline(file_path.as_ref(), &CsvParser)
    }

    async fn batch_import<P: AsRef<Path> + Send + Sync>(
        &self,
        file_paths: Vec<P>,
    ) -> Result<Vec<Result<ImportReport, String>>, Box<dyn Error>> {
        use futures::future::join_all;

        let tasks = file_paths.iter().map(|path| async move {
            let path = path.as_ref();
            let parser: &dyn FileParser = match path.extension().and_then(|e| e.to_str()) {
                Some("csv") => &CsvParser,
                _ => &ExcelParser,
            };
            self.run_pipeline(path, parser).map_err(|e| e.to_string())
        });

        Ok(join_all(tasks).await)
    }
}
