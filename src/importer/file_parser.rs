// ==========================================
// FrameInsight - 파일 파서 구현
// ==========================================
// 지원: Excel (.xlsx/.xls) / CSV (.csv)
// 책임: 파일을 헤더 기반 문자열 행 목록으로 변환
// ==========================================

use crate::importer::employee_importer_trait::FileParser;
use crate::importer::error::ImportError;
use calamine::{open_workbook, Reader, Xlsx};
use csv::ReaderBuilder;
use std::collections::HashMap;
use std::fs::File;
use std::path::Path;

// ==========================================
// CSV Parser 구현
// ==========================================
pub struct CsvParser;

impl FileParser for CsvParser {
    fn parse_to_raw_records(
        &self,
        file_path: &Path,
    ) -> Result<Vec<HashMap<String, String>>, Box<dyn std::error::Error>> {
        let path = file_path;

        // 파일 존재 확인
        if !path.exists() {
            return Err(Box::new(ImportError::FileNotFound(
                path.display().to_string(),
            )));
        }

        // 확장자 확인
        if let Some(ext) = path.extension() {
            if ext != "csv" {
                return Err(Box::new(ImportError::UnsupportedFormat(
                    ext.to_string_lossy().to_string(),
                )));
            }
        }

        // CSV 파일 열기
        let file = File::open(path)?;
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true) // 행 길이 불일치 허용
            .from_reader(file);

        // 헤더 읽기
        let headers: Vec<String> = reader
            .headers()?
            .iter()
            .map(|h| h.trim().to_string())
            .collect();

        // 전체 행 읽기
        let mut records = Vec::new();
        for result in reader.records() {
            let record = result?;
            let mut row_map = HashMap::new();

            for (col_idx, value) in record.iter().enumerate() {
                if let Some(header) = headers.get(col_idx) {
                    row_map.insert(header.clone(), value.trim().to_string());
                }
            }

            // 완전히 빈 행은 건너뜀
            if row_map.values().all(|v| v.is_empty()) {
                continue;
            }

            records.push(row_map);
        }

        Ok(records)
    }
}

// ==========================================
// Excel Parser 구현
// ==========================================
pub struct ExcelParser;

impl FileParser for ExcelParser {
    fn parse_to_raw_records(
        &self,
        file_path: &Path,
    ) -> Result<Vec<HashMap<String, String>>, Box<dyn std::error::Error>> {
        let path = file_path;

        // 파일 존재 확인
        if !path.exists() {
            return Err(Box::new(ImportError::FileNotFound(
                path.display().to_string(),
            )));
        }

        // 확장자 확인
        if let Some(ext) = path.extension() {
            let ext = ext.to_string_lossy().to_lowercase();
            if ext != "xlsx" && ext != "xls" {
                return Err(Box::new(ImportError::UnsupportedFormat(ext)));
            }
        }

        // 워크북 열기 (첫 시트 사용)
        let mut workbook: Xlsx<std::io::BufReader<File>> = open_workbook(path)
            .map_err(|e: calamine::XlsxError| ImportError::ExcelParseError(e.to_string()))?;
        let sheet_name = workbook
            .sheet_names()
            .first()
            .cloned()
            .ok_or_else(|| ImportError::ExcelParseError("시트가 없습니다".to_string()))?;
        let range = workbook
            .worksheet_range(&sheet_name)
            .map_err(|e| ImportError::ExcelParseError(e.to_string()))?;

        let mut rows = range.rows();

        // 첫 행을 헤더로 사용
        let headers: Vec<String> = match rows.next() {
            Some(header_row) => header_row
                .iter()
                .map(|cell| cell.to_string().trim().to_string())
                .collect(),
            None => return Ok(Vec::new()),
        };

        let mut records = Vec::new();
        for row in rows {
            let mut row_map = HashMap::new();
            for (col_idx, cell) in row.iter().enumerate() {
                if let Some(header) = headers.get(col_idx) {
                    row_map.insert(header.clone(), cell.to_string().trim().to_string());
                }
            }

            if row_map.values().all(|v| v.is_empty()) {
                continue;
            }

            records.push(row_map);
        }

        Ok(records)
    }
}
