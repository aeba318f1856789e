// ==========================================
// FrameInsight - 직원 일괄 등록 API
// ==========================================
// 책임: 가져오기 파이프라인을 API 계층에 노출, 확장자별 파서 선택
// ==========================================

use std::path::Path;
use std::sync::Arc;

use tracing::info;

use crate::api::error::{ApiError, ApiResult};
use crate::importer::employee_importer::{EmployeeImporterImpl, ImportReport};
use crate::importer::employee_importer_trait::EmployeeImporter;

// ==========================================
// ImportApi - 일괄 등록 API
// ==========================================

/// 직원 일괄 등록 API
pub struct ImportApi {
    importer: Arc<EmployeeImporterImpl>,
}

impl ImportApi {
    pub fn new(importer: Arc<EmployeeImporterImpl>) -> Self {
        Self { importer }
    }

    /// 파일에서 직원 일괄 등록 (확장자에 따라 CSV/Excel 파서 선택)
    pub async fn import_employees<P: AsRef<Path> + Send>(
        &self,
        file_path: P,
    ) -> ApiResult<ImportReport> {
        let path = file_path.as_ref();
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .unwrap_or_default();

        let report = match ext.as_str() {
            "csv" => self.importer.import_from_csv(path).await,
            "xlsx" | "xls" => self.importer.import_from_excel(path).await,
            other => {
                return Err(ApiError::ImportError(format!(
                    "지원하지 않는 파일 형식입니다: {}",
                    other
                )))
            }
        }
        .map_err(|e| ApiError::ImportError(e.to_string()))?;

        info!(
            path = %path.display(),
            imported = report.imported,
            skipped = report.skipped,
            "직원 일괄 등록 처리"
        );
        Ok(report)
    }

    /// 복수 파일 일괄 등록
    pub async fn batch_import<P: AsRef<Path> + Send + Sync>(
        &self,
        file_paths: Vec<P>,
    ) -> ApiResult<Vec<Result<ImportReport, String>>> {
        self.importer
            .batch_import(file_paths)
            .await
            .map_err(|e| ApiError::ImportError(e.to_string()))
    }
}
