// ==========================================
// FrameInsight - 인력 배정 데이터 저장소
// ==========================================
// 책임: assignment 테이블 CRUD
// 제약: 초과 배정(합계 1.0 초과)도 그대로 저장한다.
//       차단 여부 판단은 저장소의 몫이 아니다
// ==========================================

use crate::domain::assignment::Assignment;
use crate::repository::error::{RepositoryError, RepositoryResult};
use rusqlite::{params, Connection};
use std::sync::{Arc, Mutex};

// ==========================================
// AssignmentRepository - 배정 저장소
// ==========================================

/// 인력 배정 저장소
pub struct AssignmentRepository {
    conn: Arc<Mutex<Connection>>,
}

impl AssignmentRepository {
    pub fn new(db_path: &str) -> RepositoryResult<Self> {
        let conn = crate::db::open_sqlite_connection(db_path)
            .map_err(|e| RepositoryError::DatabaseConnectionError(e.to_string()))?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    fn get_conn(&self) -> RepositoryResult<std::sync::MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    /// 배정 등록/갱신 (동일 키 존재 시 공수만 갱신)
    pub fn upsert(&self, assignment: &Assignment) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        conn.execute(
            r#"
            INSERT INTO assignment (employee_id, project_code, year, month, man_month)
            VALUES (?1, ?2, ?3, ?4, ?5)
            ON CONFLICT (employee_id, project_code, year, month)
            DO UPDATE SET man_month = excluded.man_month
            "#,
            params![
                assignment.employee_id,
                assignment.project_code,
                assignment.year,
                assignment.month,
                assignment.man_month,
            ],
        )?;
        Ok(())
    }

    /// 배정 삭제
    pub fn delete(
        &self,
        employee_id: &str,
        project_code: &str,
        year: i32,
        month: u32,
    ) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        let deleted = conn.execute(
            r#"
            DELETE FROM assignment
            WHERE employee_id = ?1 AND project_code = ?2 AND year = ?3 AND month = ?4
            "#,
            params![employee_id, project_code, year, month],
        )?;
        if deleted == 0 {
            return Err(RepositoryError::NotFound {
                entity: "Assignment".to_string(),
                id: format!("{}/{}/{}-{}", employee_id, project_code, year, month),
            });
        }
        Ok(())
    }

    /// 직원의 월별 배정 목록
    pub fn list_by_employee_month(
        &self,
        employee_id: &str,
        year: i32,
        month: u32,
    ) -> RepositoryResult<Vec<Assignment>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(&format!(
            "{} WHERE employee_id = ?1 AND year = ?2 AND month = ?3 ORDER BY project_code",
            Self::SELECT_BASE
        ))?;
        let rows = stmt
            .query_map(params![employee_id, year, month], Self::map_row)?
            .collect::<Result<_, _>>()?;
        Ok(rows)
    }

    /// 특정 월의 전체 배정 목록
    pub fn list_by_month(&self, year: i32, month: u32) -> RepositoryResult<Vec<Assignment>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(&format!(
            "{} WHERE year = ?1 AND month = ?2 ORDER BY employee_id, project_code",
            Self::SELECT_BASE
        ))?;
        let rows = stmt
            .query_map(params![year, month], Self::map_row)?
            .collect::<Result<_, _>>()?;
        Ok(rows)
    }

    /// 프로젝트의 월별 배정 목록
    pub fn list_by_project_month(
        &self,
        project_code: &str,
        year: i32,
        month: u32,
    ) -> RepositoryResult<Vec<Assignment>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(&format!(
            "{} WHERE project_code = ?1 AND year = ?2 AND month = ?3 ORDER BY employee_id",
            Self::SELECT_BASE
        ))?;
        let rows = stmt
            .query_map(params![project_code, year, month], Self::map_row)?
            .collect::<Result<_, _>>()?;
        Ok(rows)
    }

    const SELECT_BASE: &'static str = r#"
        SELECT employee_id, project_code, year, month, man_month
        FROM assignment
    "#;

    fn map_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Assignment> {
        Ok(Assignment {
            employee_id: row.get(0)?,
            project_code: row.get(1)?,
            year: row.get(2)?,
            month: row.get(3)?,
            man_month: row.get(4)?,
        })
    }
}
