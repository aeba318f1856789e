// ==========================================
// FrameInsight - 제안 데이터 저장소
// ==========================================
// 책임: proposal / proposal_allocation / proposal_comment 테이블 CRUD
// ==========================================

use crate::domain::proposal::{AllocationKind, Proposal, ProposalAllocation, ProposalComment};
use crate::repository::error::{RepositoryError, RepositoryResult};
use chrono::NaiveDate;
use rusqlite::{params, Connection, OptionalExtension};
use std::sync::{Arc, Mutex};

// ==========================================
// ProposalRepository - 제안 저장소
// ==========================================

/// 제안 저장소
pub struct ProposalRepository {
    conn: Arc<Mutex<Connection>>,
}

impl ProposalRepository {
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

    /// 제안 등록 (배정/코멘트 포함, 트랜잭션)
    pub fn insert(&self, proposal: &Proposal) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        let tx = conn
            .unchecked_transaction()
            .map_err(|e| RepositoryError::DatabaseTransactionError(e.to_string()))?;

        tx.execute(
            r#"
            INSERT INTO proposal (id, title, client, budget, due_date, status, archived)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            "#,
            params![
                proposal.id,
                proposal.title,
                proposal.client,
                proposal.budget,
                proposal.due_date.map(|d| d.format("%Y-%m-%d").to_string()),
                proposal.status,
                proposal.archived as i32,
            ],
        )?;
        Self::write_children(&tx, proposal)?;

        tx.commit()
            .map_err(|e| RepositoryError::DatabaseTransactionError(e.to_string()))?;
        Ok(())
    }

    /// 제안 갱신 (배정/코멘트는 전체 치환)
    pub fn update(&self, proposal: &Proposal) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        let tx = conn
            .unchecked_transaction()
            .map_err(|e| RepositoryError::DatabaseTransactionError(e.to_string()))?;

        let updated = tx.execute(
            r#"
            UPDATE proposal
            SET title = ?2, client = ?3, budget = ?4, due_date = ?5, status = ?6, archived = ?7
            WHERE id = ?1
            "#,
            params![
                proposal.id,
                proposal.title,
                proposal.client,
                proposal.budget,
                proposal.due_date.map(|d| d.format("%Y-%m-%d").to_string()),
                proposal.status,
                proposal.archived as i32,
            ],
        )?;
        if updated == 0 {
            return Err(RepositoryError::NotFound {
                entity: "Proposal".to_string(),
                id: proposal.id.clone(),
            });
        }

        tx.execute(
            "DELETE FROM proposal_allocation WHERE proposal_id = ?1",
            params![proposal.id],
        )?;
        tx.execute(
            "DELETE FROM proposal_comment WHERE proposal_id = ?1",
            params![proposal.id],
        )?;
        Self::write_children(&tx, proposal)?;

        tx.commit()
            .map_err(|e| RepositoryError::DatabaseTransactionError(e.to_string()))?;
        Ok(())
    }

    /// ID로 제안 조회
    pub fn find_by_id(&self, id: &str) -> RepositoryResult<Option<Proposal>> {
        let conn = self.get_conn()?;
        let proposal = conn
            .query_row(
                r#"
                SELECT id, title, client, budget, due_date, status, archived
                FROM proposal
                WHERE id = ?1
                "#,
                params![id],
                Self::map_row,
            )
            .optional()?;

        match proposal {
            Some(mut p) => {
                Self::load_children(&conn, &mut p)?;
                Ok(Some(p))
            }
            None => Ok(None),
        }
    }

    /// 제안 목록 조회
    pub fn list(&self, archived: bool) -> RepositoryResult<Vec<Proposal>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT id, title, client, budget, due_date, status, archived
            FROM proposal
            WHERE archived = ?1
            ORDER BY due_date IS NULL, due_date
            "#,
        )?;
        let mut proposals: Vec<Proposal> = stmt
            .query_map(params![archived as i32], Self::map_row)?
            .collect::<Result<_, _>>()?;

        for p in &mut proposals {
            Self::load_children(&conn, p)?;
        }
        Ok(proposals)
    }

    /// 보관 처리 토글
    pub fn set_archived(&self, id: &str, archived: bool) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        let updated = conn.execute(
            "UPDATE proposal SET archived = ?2 WHERE id = ?1",
            params![id, archived as i32],
        )?;
        if updated == 0 {
            return Err(RepositoryError::NotFound {
                entity: "Proposal".to_string(),
                id: id.to_string(),
            });
        }
        Ok(())
    }

    // ==========================================
    // 내부 헬퍼
    // ==========================================

    fn map_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Proposal> {
        Ok(Proposal {
            id: row.get(0)?,
            title: row.get(1)?,
            client: row.get(2)?,
            budget: row.get(3)?,
            due_date: row
                .get::<_, Option<String>>(4)?
                .and_then(|s| NaiveDate::parse_from_str(&s, "%Y-%m-%d").ok()),
            status: row.get(5)?,
            archived: row.get::<_, i32>(6)? != 0,
            allocations: Vec::new(),
            comments: Vec::new(),
        })
    }

    fn load_children(conn: &Connection, proposal: &mut Proposal) -> RepositoryResult<()> {
        let mut stmt = conn.prepare(
            r#"
            SELECT id, kind, employee_id, external_name, man_month, cost
            FROM proposal_allocation
            WHERE proposal_id = ?1
            ORDER BY id
            "#,
        )?;
        proposal.allocations = stmt
            .query_map(params![proposal.id], |row| {
                let kind_raw: String = row.get(1)?;
                Ok(ProposalAllocation {
                    id: row.get(0)?,
                    kind: if kind_raw == "EXTERNAL" {
                        AllocationKind::External
                    } else {
                        AllocationKind::Internal
                    },
                    employee_id: row.get(2)?,
                    external_name: row.get(3)?,
                    man_month: row.get(4)?,
                    cost: row.get(5)?,
                })
            })?
            .collect::<Result<_, _>>()?;

        let mut stmt = conn.prepare(
            r#"
            SELECT id, author, content, comment_date
            FROM proposal_comment
            WHERE proposal_id = ?1
            ORDER BY comment_date
            "#,
        )?;
        proposal.comments = stmt
            .query_map(params![proposal.id], |row| {
                let date_raw: String = row.get(3)?;
                Ok(ProposalComment {
                    id: row.get(0)?,
                    author: row.get(1)?,
                    content: row.get(2)?,
                    date: NaiveDate::parse_from_str(&date_raw, "%Y-%m-%d")
                        .unwrap_or_else(|_| NaiveDate::from_ymd_opt(1970, 1, 1).unwrap()),
                })
            })?
            .collect::<Result<_, _>>()?;
        Ok(())
    }

    fn write_children(conn: &Connection, proposal: &Proposal) -> RepositoryResult<()> {
        for alloc in &proposal.allocations {
            let kind = match alloc.kind {
                AllocationKind::Internal => "INTERNAL",
                AllocationKind::External => "EXTERNAL",
            };
            conn.execute(
                r#"
                INSERT INTO proposal_allocation
                    (id, proposal_id, kind, employee_id, external_name, man_month, cost)
                VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
                "#,
                params![
                    alloc.id,
                    proposal.id,
                    kind,
                    alloc.employee_id,
                    alloc.external_name,
                    alloc.man_month,
                    alloc.cost,
                ],
            )?;
        }
        for comment in &proposal.comments {
            conn.execute(
                r#"
                INSERT INTO proposal_comment (id, proposal_id, author, content, comment_date)
                VALUES (?1, ?2, ?3, ?4, ?5)
                "#,
                params![
                    comment.id,
                    proposal.id,
                    comment.author,
                    comment.content,
                    comment.date.format("%Y-%m-%d").to_string(),
                ],
            )?;
        }
        Ok(())
    }
}
