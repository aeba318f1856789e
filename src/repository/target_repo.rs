// ==========================================
// FrameInsight - 월별 목표 데이터 저장소
// ==========================================
// 책임: monthly_target / target_item 테이블 CRUD, 마감 상태 전이
// 제약: Closed 월의 목표 항목은 재오픈 전까지 수정 거부
// ==========================================

use crate::domain::standards::{MonthlyTarget, TargetItem};
use crate::domain::types::CloseState;
use crate::repository::error::{RepositoryError, RepositoryResult};
use rusqlite::{params, Connection, OptionalExtension};
use std::sync::{Arc, Mutex};

// ==========================================
// TargetRepository - 월별 목표 저장소
// ==========================================

/// 월별 목표 저장소
pub struct TargetRepository {
    conn: Arc<Mutex<Connection>>,
}

impl TargetRepository {
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

    /// 부서-월 목표 조회 (없으면 Open 상태의 빈 목표)
    pub fn find(&self, dept: &str, year: i32, month: u32) -> RepositoryResult<MonthlyTarget> {
        let conn = self.get_conn()?;
        let close_state = Self::read_close_state(&conn, dept, year, month)?;

        let mut stmt = conn.prepare(
            r#"
            SELECT id, title, amount
            FROM target_item
            WHERE dept = ?1 AND year = ?2 AND month = ?3
            ORDER BY id
            "#,
        )?;
        let items = stmt
            .query_map(params![dept, year, month], |row| {
                Ok(TargetItem {
                    id: row.get(0)?,
                    title: row.get(1)?,
                    amount: row.get(2)?,
                })
            })?
            .collect::<Result<_, _>>()?;

        Ok(MonthlyTarget {
            dept: dept.to_string(),
            year,
            month,
            close_state,
            items,
        })
    }

    /// 목표 항목 추가/갱신
    ///
    /// 대상 월이 Closed면 거부한다.
    pub fn upsert_item(
        &self,
        dept: &str,
        year: i32,
        month: u32,
        item: &TargetItem,
    ) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        Self::ensure_editable(&conn, dept, year, month)?;
        Self::ensure_target_row(&conn, dept, year, month)?;

        conn.execute(
            r#"
            INSERT INTO target_item (id, dept, year, month, title, amount)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            ON CONFLICT (id) DO UPDATE SET title = excluded.title, amount = excluded.amount
            "#,
            params![item.id, dept, year, month, item.title, item.amount],
        )?;
        Ok(())
    }

    /// 목표 항목 삭제
    pub fn delete_item(
        &self,
        dept: &str,
        year: i32,
        month: u32,
        item_id: &str,
    ) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        Self::ensure_editable(&conn, dept, year, month)?;

        let deleted = conn.execute(
            "DELETE FROM target_item WHERE id = ?1 AND dept = ?2 AND year = ?3 AND month = ?4",
            params![item_id, dept, year, month],
        )?;
        if deleted == 0 {
            return Err(RepositoryError::NotFound {
                entity: "TargetItem".to_string(),
                id: item_id.to_string(),
            });
        }
        Ok(())
    }

    /// 마감 상태 전이
    ///
    /// 허용 전이: Open → InProgress → Closed, Closed → Open (관리자 재오픈).
    /// 그 외는 InvalidStateTransition.
    pub fn transition_close_state(
        &self,
        dept: &str,
        year: i32,
        month: u32,
        next: CloseState,
    ) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        let current = Self::read_close_state(&conn, dept, year, month)?;

        let allowed = matches!(
            (current, next),
            (CloseState::Open, CloseState::InProgress)
                | (CloseState::Open, CloseState::Closed)
                | (CloseState::InProgress, CloseState::Closed)
                | (CloseState::Closed, CloseState::Open)
        );
        if !allowed {
            return Err(RepositoryError::InvalidStateTransition {
                from: current.to_string(),
                to: next.to_string(),
            });
        }

        Self::ensure_target_row(&conn, dept, year, month)?;
        conn.execute(
            r#"
            UPDATE monthly_target SET close_state = ?4
            WHERE dept = ?1 AND year = ?2 AND month = ?3
            "#,
            params![dept, year, month, next.to_string()],
        )?;
        Ok(())
    }

    /// 특정 월 전체 부서 목표 합계
    pub fn monthly_totals(&self, year: i32, month: u32) -> RepositoryResult<Vec<(String, i64)>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT dept, SUM(amount)
            FROM target_item
            WHERE year = ?1 AND month = ?2
            GROUP BY dept
            ORDER BY dept
            "#,
        )?;
        let rows = stmt
            .query_map(params![year, month], |row| {
                Ok((row.get::<_, String>(0)?, row.get::<_, i64>(1)?))
            })?
            .collect::<Result<_, _>>()?;
        Ok(rows)
    }

    /// 부서의 연간 누계 (1월부터 해당 월까지)
    pub fn cumulative_total(
        &self,
        dept: &str,
        year: i32,
        through_month: u32,
    ) -> RepositoryResult<i64> {
        let conn = self.get_conn()?;
        let total: Option<i64> = conn.query_row(
            r#"
            SELECT SUM(amount)
            FROM target_item
            WHERE dept = ?1 AND year = ?2 AND month <= ?3
            "#,
            params![dept, year, through_month],
            |row| row.get(0),
        )?;
        Ok(total.unwrap_or(0))
    }

    // ==========================================
    // 내부 헬퍼
    // ==========================================

    fn read_close_state(
        conn: &Connection,
        dept: &str,
        year: i32,
        month: u32,
    ) -> RepositoryResult<CloseState> {
        let raw: Option<String> = conn
            .query_row(
                "SELECT close_state FROM monthly_target WHERE dept = ?1 AND year = ?2 AND month = ?3",
                params![dept, year, month],
                |row| row.get(0),
            )
            .optional()?;

        Ok(match raw.as_deref() {
            Some("IN_PROGRESS") => CloseState::InProgress,
            Some("CLOSED") => CloseState::Closed,
            _ => CloseState::Open,
        })
    }

    fn ensure_editable(
        conn: &Connection,
        dept: &str,
        year: i32,
        month: u32,
    ) -> RepositoryResult<()> {
        if Self::read_close_state(conn, dept, year, month)? == CloseState::Closed {
            return Err(RepositoryError::BusinessRuleViolation(format!(
                "마감 완료된 월의 목표는 수정할 수 없습니다: {} {}년 {}월",
                dept, year, month
            )));
        }
        Ok(())
    }

    fn ensure_target_row(
        conn: &Connection,
        dept: &str,
        year: i32,
        month: u32,
    ) -> RepositoryResult<()> {
        conn.execute(
            r#"
            INSERT OR IGNORE INTO monthly_target (dept, year, month, close_state)
            VALUES (?1, ?2, ?3, 'OPEN')
            "#,
            params![dept, year, month],
        )?;
        Ok(())
    }
}
