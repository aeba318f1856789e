// ==========================================
// 테스트 보조 함수
// ==========================================
// 책임: 임시 테스트 데이터베이스 생성과 스키마 초기화
// ==========================================

use rusqlite::Connection;
use std::error::Error;
use tempfile::NamedTempFile;

/// 임시 테스트 데이터베이스 생성 + 스키마 초기화
///
/// # 반환
/// - NamedTempFile: 임시 데이터베이스 파일 (살아 있어야 함)
/// - String: 데이터베이스 파일 경로
pub fn create_test_db() -> Result<(NamedTempFile, String), Box<dyn Error>> {
    let temp_file = NamedTempFile::new()?;
    let db_path = temp_file.path().to_str().unwrap().to_string();

    let conn = Connection::open(&db_path)?;
    frame_insight::db::configure_sqlite_connection(&conn)?;
    frame_insight::db::init_schema(&conn)?;

    Ok((temp_file, db_path))
}
