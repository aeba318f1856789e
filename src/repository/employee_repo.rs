// ==========================================
// FrameInsight - 직원 데이터 저장소
// ==========================================
// 책임: employee / employee_salary / employee_contract 테이블 CRUD
// 제약: Repository는 비즈니스 로직을 포함하지 않는다
// 제약: 모든 쿼리는 매개변수화 (SQL 인젝션 방지)
// ==========================================

use crate::domain::employee::{ContractPeriod, Employee};
use crate::domain::types::{EmploymentType, TechGrade};
use crate::repository::error::{RepositoryError, RepositoryResult};
use chrono::NaiveDate;
use rusqlite::{params, Connection, OptionalExtension};
use std::sync::{Arc, Mutex};

// ==========================================
// EmployeeRepository - 직원 저장소
// ==========================================

/// 직원 저장소
///
/// 직원은 하드 삭제하지 않는다. 퇴사 처리는 archived 플래그로만
/// 이루어지며 과거 원가 귀속 데이터를 보존한다.
pub struct EmployeeRepository {
    conn: Arc<Mutex<Connection>>,
}

impl EmployeeRepository {
    /// 새 저장소 인스턴스 생성
    ///
    /// # 매개변수
    /// - db_path: 데이터베이스 파일 경로
    pub fn new(db_path: &str) -> RepositoryResult<Self> {
        let conn = crate::db::open_sqlite_connection(db_path)
            .map_err(|e| RepositoryError::DatabaseConnectionError(e.to_string()))?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// 기존 연결로 저장소 생성
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    /// 데이터베이스 연결 획득
    fn get_conn(&self) -> RepositoryResult<std::sync::MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    /// 직원 등록 (연봉/계약 이력 포함, 트랜잭션)
    pub fn insert(&self, employee: &Employee) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        let tx = conn
            .unchecked_transaction()
            .map_err(|e| RepositoryError::DatabaseTransactionError(e.to_string()))?;

        tx.execute(
            r#"
            INSERT INTO employee
                (id, name, email, dept, rank, tech_grade, hire_year, employment_type, archived)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
            "#,
            params![
                employee.id,
                employee.name,
                employee.email,
                employee.dept,
                employee.rank,
                employee.tech_grade.to_string(),
                employee.hire_year,
                employee.employment_type.to_string(),
                employee.archived as i32,
            ],
        )?;

        Self::write_compensation(&tx, employee)?;

        tx.commit()
            .map_err(|e| RepositoryError::DatabaseTransactionError(e.to_string()))?;
        Ok(())
    }

    /// 직원 정보 갱신 (연봉/계약 이력은 전체 치환)
    pub fn update(&self, employee: &Employee) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        let tx = conn
            .unchecked_transaction()
            .map_err(|e| RepositoryError::DatabaseTransactionError(e.to_string()))?;

        let updated = tx.execute(
            r#"
            UPDATE employee
            SET name = ?2, email = ?3, dept = ?4, rank = ?5, tech_grade = ?6,
                hire_year = ?7, employment_type = ?8, archived = ?9
            WHERE id = ?1
            "#,
            params![
                employee.id,
                employee.name,
                employee.email,
                employee.dept,
                employee.rank,
                employee.tech_grade.to_string(),
                employee.hire_year,
                employee.employment_type.to_string(),
                employee.archived as i32,
            ],
        )?;
        if updated == 0 {
            return Err(RepositoryError::NotFound {
                entity: "Employee".to_string(),
                id: employee.id.clone(),
            });
        }

        tx.execute(
            "DELETE FROM employee_salary WHERE employee_id = ?1",
            params![employee.id],
        )?;
        tx.execute(
            "DELETE FROM employee_contract WHERE employee_id = ?1",
            params![employee.id],
        )?;
        Self::write_compensation(&tx, employee)?;

        tx.commit()
            .map_err(|e| RepositoryError::DatabaseTransactionError(e.to_string()))?;
        Ok(())
    }

    /// 사번으로 직원 조회
    pub fn find_by_id(&self, id: &str) -> RepositoryResult<Option<Employee>> {
        let conn = self.get_conn()?;
        let employee = conn
            .query_row(
                r#"
                SELECT id, name, email, dept, rank, tech_grade, hire_year,
                       employment_type, archived
                FROM employee
                WHERE id = ?1
                "#,
                params![id],
                Self::map_row,
            )
            .optional()?;

        match employee {
            Some(mut emp) => {
                Self::load_compensation(&conn, &mut emp)?;
                Ok(Some(emp))
            }
            None => Ok(None),
        }
    }

    /// 직원 목록 조회
    ///
    /// # 매개변수
    /// - archived: true면 퇴사자 목록, false면 재직자 목록
    pub fn list(&self, archived: bool) -> RepositoryResult<Vec<Employee>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT id, name, email, dept, rank, tech_grade, hire_year,
                   employment_type, archived
            FROM employee
            WHERE archived = ?1
            ORDER BY id
            "#,
        )?;
        let mut employees: Vec<Employee> = stmt
            .query_map(params![archived as i32], Self::map_row)?
            .collect::<Result<_, _>>()?;

        for emp in &mut employees {
            Self::load_compensation(&conn, emp)?;
        }
        Ok(employees)
    }

    /// 부서별 재직자 목록 조회
    pub fn list_by_dept(&self, dept: &str) -> RepositoryResult<Vec<Employee>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT id, name, email, dept, rank, tech_grade, hire_year,
                   employment_type, archived
            FROM employee
            WHERE dept = ?1 AND archived = 0
            ORDER BY id
            "#,
        )?;
        let mut employees: Vec<Employee> = stmt
            .query_map(params![dept], Self::map_row)?
            .collect::<Result<_, _>>()?;

        for emp in &mut employees {
            Self::load_compensation(&conn, emp)?;
        }
        Ok(employees)
    }

    /// 이름/부서 검색 (재직자 대상)
    pub fn search(&self, term: &str) -> RepositoryResult<Vec<Employee>> {
        let conn = self.get_conn()?;
        let pattern = format!("%{}%", term.trim());
        let mut stmt = conn.prepare(
            r#"
            SELECT id, name, email, dept, rank, tech_grade, hire_year,
                   employment_type, archived
            FROM employee
            WHERE archived = 0 AND (name LIKE ?1 OR dept LIKE ?1)
            ORDER BY id
            "#,
        )?;
        let mut employees: Vec<Employee> = stmt
            .query_map(params![pattern], Self::map_row)?
            .collect::<Result<_, _>>()?;

        for emp in &mut employees {
            Self::load_compensation(&conn, emp)?;
        }
        Ok(employees)
    }

    /// 퇴사/복직 처리 (소프트 삭제 토글)
    pub fn set_archived(&self, id: &str, archived: bool) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        let updated = conn.execute(
            "UPDATE employee SET archived = ?2 WHERE id = ?1",
            params![id, archived as i32],
        )?;
        if updated == 0 {
            return Err(RepositoryError::NotFound {
                entity: "Employee".to_string(),
                id: id.to_string(),
            });
        }
        Ok(())
    }

    /// 부서 일괄 이동 (부서 삭제 시 인원 이동)
    ///
    /// # 반환
    /// - 이동된 인원수
    pub fn move_department(&self, from_dept: &str, to_dept: &str) -> RepositoryResult<usize> {
        let conn = self.get_conn()?;
        let moved = conn.execute(
            "UPDATE employee SET dept = ?2 WHERE dept = ?1",
            params![from_dept, to_dept],
        )?;
        Ok(moved)
    }

    /// 부서별 재직 인원수 집계
    pub fn headcount_by_dept(&self) -> RepositoryResult<Vec<(String, u32)>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT dept, COUNT(*)
            FROM employee
            WHERE archived = 0
            GROUP BY dept
            ORDER BY dept
            "#,
        )?;
        let rows = stmt
            .query_map([], |row| Ok((row.get::<_, String>(0)?, row.get::<_, u32>(1)?)))?
            .collect::<Result<_, _>>()?;
        Ok(rows)
    }

    // ==========================================
    // 내부 헬퍼
    // ==========================================

    fn map_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Employee> {
        let tech_grade_raw: String = row.get(5)?;
        let employment_raw: String = row.get(7)?;
        Ok(Employee {
            id: row.get(0)?,
            name: row.get(1)?,
            email: row.get(2)?,
            dept: row.get(3)?,
            rank: row.get(4)?,
            tech_grade: TechGrade::parse_label(&tech_grade_raw).unwrap_or(TechGrade::Junior),
            hire_year: row.get(6)?,
            employment_type: EmploymentType::parse_label(&employment_raw)
                .unwrap_or(EmploymentType::Regular),
            salaries: Default::default(),
            contracts: Vec::new(),
            archived: row.get::<_, i32>(8)? != 0,
        })
    }

    /// 연봉/계약 이력 적재
    fn load_compensation(conn: &Connection, employee: &mut Employee) -> RepositoryResult<()> {
        let mut stmt = conn.prepare(
            "SELECT fiscal_year, annual_amount FROM employee_salary WHERE employee_id = ?1",
        )?;
        employee.salaries = stmt
            .query_map(params![employee.id], |row| {
                Ok((row.get::<_, i32>(0)?, row.get::<_, i64>(1)?))
            })?
            .collect::<Result<_, _>>()?;

        let mut stmt = conn.prepare(
            r#"
            SELECT seq, start_date, end_date, monthly_amount
            FROM employee_contract
            WHERE employee_id = ?1
            ORDER BY seq
            "#,
        )?;
        employee.contracts = stmt
            .query_map(params![employee.id], |row| {
                Ok(ContractPeriod {
                    seq: row.get(0)?,
                    start_date: parse_date_col(row, 1)?,
                    end_date: parse_date_col(row, 2)?,
                    monthly_amount: row.get(3)?,
                })
            })?
            .collect::<Result<_, _>>()?;
        Ok(())
    }

    /// 연봉/계약 이력 기록
    fn write_compensation(conn: &Connection, employee: &Employee) -> RepositoryResult<()> {
        for (fiscal_year, annual_amount) in &employee.salaries {
            conn.execute(
                r#"
                INSERT INTO employee_salary (employee_id, fiscal_year, annual_amount)
                VALUES (?1, ?2, ?3)
                "#,
                params![employee.id, fiscal_year, annual_amount],
            )?;
        }
        for contract in &employee.contracts {
            conn.execute(
                r#"
                INSERT INTO employee_contract
                    (employee_id, seq, start_date, end_date, monthly_amount)
                VALUES (?1, ?2, ?3, ?4, ?5)
                "#,
                params![
                    employee.id,
                    contract.seq,
                    contract.start_date.format("%Y-%m-%d").to_string(),
                    contract.end_date.format("%Y-%m-%d").to_string(),
                    contract.monthly_amount,
                ],
            )?;
        }
        Ok(())
    }
}

/// TEXT 컬럼의 날짜 파싱 (깨진 값은 1970-01-01로 수렴)
pub(crate) fn parse_date_col(row: &rusqlite::Row<'_>, idx: usize) -> rusqlite::Result<NaiveDate> {
    let raw: String = row.get(idx)?;
    Ok(NaiveDate::parse_from_str(&raw, "%Y-%m-%d")
        .unwrap_or_else(|_| NaiveDate::from_ymd_opt(1970, 1, 1).unwrap()))
}
