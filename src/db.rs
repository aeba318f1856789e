// ==========================================
// FrameInsight - SQLite 연결 초기화
// ==========================================
// 목표:
// - 모든 Connection::open의 PRAGMA 동작을 통일 (일부 모듈만 외래키
//   켜지는 상황 방지)
// - busy_timeout 통일로 동시 쓰기 시 간헐적 busy 오류 완화
// - 내장 DDL로 스키마 부트스트랩 (앱과 테스트가 동일 스키마 공유)
// ==========================================

use rusqlite::Connection;
use rusqlite::OptionalExtension;
use std::time::Duration;

/// 기본 busy_timeout (밀리초)
pub const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5_000;

/// 현재 코드가 기대하는 schema_version
pub const CURRENT_SCHEMA_VERSION: i64 = 1;

/// 내장 스키마 DDL
///
/// 테이블 전체를 IF NOT EXISTS로 선언하므로 반복 적용해도 안전하다.
const SCHEMA_DDL: &str = r#"
CREATE TABLE IF NOT EXISTS schema_version (
    version INTEGER PRIMARY KEY,
    applied_at TEXT NOT NULL DEFAULT (datetime('now'))
);

CREATE TABLE IF NOT EXISTS employee (
    id TEXT PRIMARY KEY,
    name TEXT NOT NULL,
    email TEXT,
    dept TEXT NOT NULL,
    rank TEXT NOT NULL,
    tech_grade TEXT NOT NULL,
    hire_year INTEGER NOT NULL,
    employment_type TEXT NOT NULL,
    archived INTEGER NOT NULL DEFAULT 0
);

CREATE TABLE IF NOT EXISTS employee_salary (
    employee_id TEXT NOT NULL REFERENCES employee(id) ON DELETE CASCADE,
    fiscal_year INTEGER NOT NULL,
    annual_amount INTEGER NOT NULL,
    PRIMARY KEY (employee_id, fiscal_year)
);

CREATE TABLE IF NOT EXISTS employee_contract (
    employee_id TEXT NOT NULL REFERENCES employee(id) ON DELETE CASCADE,
    seq INTEGER NOT NULL,
    start_date TEXT NOT NULL,
    end_date TEXT NOT NULL,
    monthly_amount INTEGER NOT NULL,
    PRIMARY KEY (employee_id, seq)
);

CREATE TABLE IF NOT EXISTS project (
    code TEXT PRIMARY KEY,
    name TEXT NOT NULL,
    client TEXT NOT NULL,
    contract_amount INTEGER NOT NULL,
    execution_rate REAL NOT NULL,
    status TEXT NOT NULL,
    sales_dept TEXT NOT NULL,
    sales_rate REAL NOT NULL,
    exec_dept TEXT NOT NULL,
    exec_rate REAL NOT NULL,
    start_date TEXT,
    end_date TEXT,
    archived INTEGER NOT NULL DEFAULT 0
);

CREATE TABLE IF NOT EXISTS project_issue (
    id TEXT PRIMARY KEY,
    project_code TEXT NOT NULL REFERENCES project(code) ON DELETE CASCADE,
    author TEXT NOT NULL,
    content TEXT NOT NULL,
    entry_type TEXT NOT NULL,
    created_at TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS cost_record (
    id TEXT PRIMARY KEY,
    exec_date TEXT NOT NULL,
    month INTEGER NOT NULL,
    project_code TEXT NOT NULL REFERENCES project(code) ON DELETE CASCADE,
    category TEXT NOT NULL,
    vendor TEXT,
    description TEXT,
    amount INTEGER NOT NULL
);

CREATE TABLE IF NOT EXISTS assignment (
    employee_id TEXT NOT NULL REFERENCES employee(id) ON DELETE CASCADE,
    project_code TEXT NOT NULL REFERENCES project(code) ON DELETE CASCADE,
    year INTEGER NOT NULL,
    month INTEGER NOT NULL,
    man_month REAL NOT NULL,
    PRIMARY KEY (employee_id, project_code, year, month)
);

CREATE TABLE IF NOT EXISTS proposal (
    id TEXT PRIMARY KEY,
    title TEXT NOT NULL,
    client TEXT NOT NULL,
    budget INTEGER NOT NULL,
    due_date TEXT,
    status TEXT NOT NULL,
    archived INTEGER NOT NULL DEFAULT 0
);

CREATE TABLE IF NOT EXISTS proposal_allocation (
    id TEXT PRIMARY KEY,
    proposal_id TEXT NOT NULL REFERENCES proposal(id) ON DELETE CASCADE,
    kind TEXT NOT NULL,
    employee_id TEXT,
    external_name TEXT,
    man_month REAL NOT NULL,
    cost INTEGER NOT NULL
);

CREATE TABLE IF NOT EXISTS proposal_comment (
    id TEXT PRIMARY KEY,
    proposal_id TEXT NOT NULL REFERENCES proposal(id) ON DELETE CASCADE,
    author TEXT NOT NULL,
    content TEXT NOT NULL,
    comment_date TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS monthly_target (
    dept TEXT NOT NULL,
    year INTEGER NOT NULL,
    month INTEGER NOT NULL,
    close_state TEXT NOT NULL DEFAULT 'OPEN',
    PRIMARY KEY (dept, year, month)
);

CREATE TABLE IF NOT EXISTS target_item (
    id TEXT PRIMARY KEY,
    dept TEXT NOT NULL,
    year INTEGER NOT NULL,
    month INTEGER NOT NULL,
    title TEXT NOT NULL,
    amount INTEGER NOT NULL,
    FOREIGN KEY (dept, year, month)
        REFERENCES monthly_target(dept, year, month) ON DELETE CASCADE
);

CREATE TABLE IF NOT EXISTS config_kv (
    scope_id TEXT NOT NULL,
    key TEXT NOT NULL,
    value TEXT NOT NULL,
    updated_at TEXT NOT NULL DEFAULT (datetime('now')),
    PRIMARY KEY (scope_id, key)
);

CREATE INDEX IF NOT EXISTS idx_employee_dept ON employee(dept);
CREATE INDEX IF NOT EXISTS idx_assignment_month ON assignment(year, month);
CREATE INDEX IF NOT EXISTS idx_cost_record_month ON cost_record(month, project_code);
"#;

/// SQLite 연결에 통일 PRAGMA 적용
///
/// - foreign_keys는 연결마다 별도로 켜야 한다
/// - busy_timeout도 연결마다 별도로 설정해야 한다
pub fn configure_sqlite_connection(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    conn.busy_timeout(Duration::from_millis(DEFAULT_BUSY_TIMEOUT_MS))?;
    Ok(())
}

/// SQLite 연결을 열고 통일 설정 적용
pub fn open_sqlite_connection(db_path: &str) -> rusqlite::Result<Connection> {
    let conn = Connection::open(db_path)?;
    configure_sqlite_connection(&conn)?;
    Ok(conn)
}

/// 스키마 부트스트랩
///
/// DDL 적용 후 schema_version을 기록한다. 멱등 적용 가능.
pub fn init_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(SCHEMA_DDL)?;
    conn.execute(
        "INSERT OR IGNORE INTO schema_version (version) VALUES (?1)",
        [CURRENT_SCHEMA_VERSION],
    )?;
    Ok(())
}

/// schema_version 조회 (테이블이 없으면 None)
pub fn read_schema_version(conn: &Connection) -> rusqlite::Result<Option<i64>> {
    let has_table: bool = conn
        .query_row(
            "SELECT 1 FROM sqlite_master WHERE type='table' AND name='schema_version' LIMIT 1",
            [],
            |_row| Ok(true),
        )
        .optional()?
        .unwrap_or(false);

    if !has_table {
        return Ok(None);
    }

    let v: Option<i64> =
        conn.query_row("SELECT MAX(version) FROM schema_version", [], |row| row.get(0))?;
    Ok(v)
}
