// ==========================================
// FrameInsight - 프로젝트 데이터 저장소
// ==========================================
// 책임: project / project_issue / cost_record 테이블 CRUD
// 제약: Repository는 비즈니스 로직을 포함하지 않는다
// ==========================================

use crate::domain::project::{CostRecord, Project, ProjectIssue};
use crate::domain::types::ProjectStatus;
use crate::repository::employee_repo::parse_date_col;
use crate::repository::error::{RepositoryError, RepositoryResult};
use chrono::{NaiveDate, NaiveDateTime};
use rusqlite::{params, Connection, OptionalExtension};
use std::sync::{Arc, Mutex};

// ==========================================
// ProjectRepository - 프로젝트 저장소
// ==========================================

/// 프로젝트 저장소
///
/// 보관(archive)된 프로젝트는 목록에서만 제외되며,
/// 통계/리포트 쿼리에는 계속 포함된다.
pub struct ProjectRepository {
    conn: Arc<Mutex<Connection>>,
}

impl ProjectRepository {
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

    /// 프로젝트 등록
    pub fn insert(&self, project: &Project) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        conn.execute(
            r#"
            INSERT INTO project
                (code, name, client, contract_amount, execution_rate, status,
                 sales_dept, sales_rate, exec_dept, exec_rate,
                 start_date, end_date, archived)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)
            "#,
            params![
                project.code,
                project.name,
                project.client,
                project.contract_amount,
                project.execution_rate,
                project.status.to_string(),
                project.sales_dept,
                project.sales_rate,
                project.exec_dept,
                project.exec_rate,
                project.start_date.map(|d| d.format("%Y-%m-%d").to_string()),
                project.end_date.map(|d| d.format("%Y-%m-%d").to_string()),
                project.archived as i32,
            ],
        )?;
        Ok(())
    }

    /// 프로젝트 갱신
    pub fn update(&self, project: &Project) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        let updated = conn.execute(
            r#"
            UPDATE project
            SET name = ?2, client = ?3, contract_amount = ?4, execution_rate = ?5,
                status = ?6, sales_dept = ?7, sales_rate = ?8, exec_dept = ?9,
                exec_rate = ?10, start_date = ?11, end_date = ?12, archived = ?13
            WHERE code = ?1
            "#,
            params![
                project.code,
                project.name,
                project.client,
                project.contract_amount,
                project.execution_rate,
                project.status.to_string(),
                project.sales_dept,
                project.sales_rate,
                project.exec_dept,
                project.exec_rate,
                project.start_date.map(|d| d.format("%Y-%m-%d").to_string()),
                project.end_date.map(|d| d.format("%Y-%m-%d").to_string()),
                project.archived as i32,
            ],
        )?;
        if updated == 0 {
            return Err(RepositoryError::NotFound {
                entity: "Project".to_string(),
                id: project.code.clone(),
            });
        }
        Ok(())
    }

    /// 코드로 프로젝트 조회
    pub fn find_by_code(&self, code: &str) -> RepositoryResult<Option<Project>> {
        let conn = self.get_conn()?;
        let project = conn
            .query_row(
                &format!("{} WHERE code = ?1", Self::SELECT_BASE),
                params![code],
                Self::map_row,
            )
            .optional()?;
        Ok(project)
    }

    /// 프로젝트 목록 조회
    ///
    /// # 매개변수
    /// - include_archived: false면 보관 항목 제외
    pub fn list(&self, include_archived: bool) -> RepositoryResult<Vec<Project>> {
        let conn = self.get_conn()?;
        let sql = if include_archived {
            format!("{} ORDER BY code DESC", Self::SELECT_BASE)
        } else {
            format!("{} WHERE archived = 0 ORDER BY code DESC", Self::SELECT_BASE)
        };
        let mut stmt = conn.prepare(&sql)?;
        let projects = stmt
            .query_map([], Self::map_row)?
            .collect::<Result<_, _>>()?;
        Ok(projects)
    }

    /// 보관 처리 토글
    pub fn set_archived(&self, code: &str, archived: bool) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        let updated = conn.execute(
            "UPDATE project SET archived = ?2 WHERE code = ?1",
            params![code, archived as i32],
        )?;
        if updated == 0 {
            return Err(RepositoryError::NotFound {
                entity: "Project".to_string(),
                id: code.to_string(),
            });
        }
        Ok(())
    }

    // ==========================================
    // 이슈 로그
    // ==========================================

    /// 이슈/댓글 추가
    pub fn append_issue(&self, issue: &ProjectIssue) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        conn.execute(
            r#"
            INSERT INTO project_issue (id, project_code, author, content, entry_type, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
            params![
                issue.id,
                issue.project_code,
                issue.author,
                issue.content,
                issue.entry_type,
                issue.created_at.format("%Y-%m-%d %H:%M:%S").to_string(),
            ],
        )?;
        Ok(())
    }

    /// 프로젝트 이슈 목록 (작성 시각 순)
    pub fn list_issues(&self, project_code: &str) -> RepositoryResult<Vec<ProjectIssue>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT id, project_code, author, content, entry_type, created_at
            FROM project_issue
            WHERE project_code = ?1
            ORDER BY created_at
            "#,
        )?;
        let issues = stmt
            .query_map(params![project_code], |row| {
                let created_raw: String = row.get(5)?;
                Ok(ProjectIssue {
                    id: row.get(0)?,
                    project_code: row.get(1)?,
                    author: row.get(2)?,
                    content: row.get(3)?,
                    entry_type: row.get(4)?,
                    created_at: NaiveDateTime::parse_from_str(&created_raw, "%Y-%m-%d %H:%M:%S")
                        .unwrap_or_else(|_| {
                            NaiveDate::from_ymd_opt(1970, 1, 1)
                                .unwrap()
                                .and_hms_opt(0, 0, 0)
                                .unwrap()
                        }),
                })
            })?
            .collect::<Result<_, _>>()?;
        Ok(issues)
    }

    // ==========================================
    // 비용 집행 레코드
    // ==========================================

    /// 비용 집행 내역 추가
    pub fn insert_cost_record(&self, record: &CostRecord) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        conn.execute(
            r#"
            INSERT INTO cost_record
                (id, exec_date, month, project_code, category, vendor, description, amount)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            "#,
            params![
                record.id,
                record.exec_date.format("%Y-%m-%d").to_string(),
                record.month,
                record.project_code,
                record.category,
                record.vendor,
                record.description,
                record.amount,
            ],
        )?;
        Ok(())
    }

    /// 비용 집행 내역 삭제
    pub fn delete_cost_record(&self, id: &str) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        let deleted = conn.execute("DELETE FROM cost_record WHERE id = ?1", params![id])?;
        if deleted == 0 {
            return Err(RepositoryError::NotFound {
                entity: "CostRecord".to_string(),
                id: id.to_string(),
            });
        }
        Ok(())
    }

    /// 월별 비용 집행 내역 조회
    pub fn list_cost_records_by_month(&self, month: u32) -> RepositoryResult<Vec<CostRecord>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(&format!(
            "{} WHERE month = ?1 ORDER BY exec_date",
            Self::SELECT_COST_BASE
        ))?;
        let records = stmt
            .query_map(params![month], Self::map_cost_row)?
            .collect::<Result<_, _>>()?;
        Ok(records)
    }

    /// 프로젝트별 비용 집행 내역 조회
    pub fn list_cost_records_by_project(
        &self,
        project_code: &str,
    ) -> RepositoryResult<Vec<CostRecord>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(&format!(
            "{} WHERE project_code = ?1 ORDER BY exec_date",
            Self::SELECT_COST_BASE
        ))?;
        let records = stmt
            .query_map(params![project_code], Self::map_cost_row)?
            .collect::<Result<_, _>>()?;
        Ok(records)
    }

    // ==========================================
    // 내부 헬퍼
    // ==========================================

    const SELECT_BASE: &'static str = r#"
        SELECT code, name, client, contract_amount, execution_rate, status,
               sales_dept, sales_rate, exec_dept, exec_rate,
               start_date, end_date, archived
        FROM project
    "#;

    const SELECT_COST_BASE: &'static str = r#"
        SELECT id, exec_date, month, project_code, category, vendor, description, amount
        FROM cost_record
    "#;

    fn map_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Project> {
        let status_raw: String = row.get(5)?;
        Ok(Project {
            code: row.get(0)?,
            name: row.get(1)?,
            client: row.get(2)?,
            contract_amount: row.get(3)?,
            execution_rate: row.get(4)?,
            status: ProjectStatus::parse_label(&status_raw).unwrap_or(ProjectStatus::Pending),
            sales_dept: row.get(6)?,
            sales_rate: row.get(7)?,
            exec_dept: row.get(8)?,
            exec_rate: row.get(9)?,
            start_date: row
                .get::<_, Option<String>>(10)?
                .and_then(|s| NaiveDate::parse_from_str(&s, "%Y-%m-%d").ok()),
            end_date: row
                .get::<_, Option<String>>(11)?
                .and_then(|s| NaiveDate::parse_from_str(&s, "%Y-%m-%d").ok()),
            archived: row.get::<_, i32>(12)? != 0,
        })
    }

    fn map_cost_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<CostRecord> {
        Ok(CostRecord {
            id: row.get(0)?,
            exec_date: parse_date_col(row, 1)?,
            month: row.get(2)?,
            project_code: row.get(3)?,
            category: row.get(4)?,
            vendor: row.get(5)?,
            description: row.get(6)?,
            amount: row.get(7)?,
        })
    }
}
