// ==========================================
// FrameInsight - 설정 관리자
// ==========================================
// 책임: 기준정보(원가 기준표, 전사 설정, 부서 목록) 적재/조회/저장
// 저장: config_kv 테이블 (key-value + scope), 구조화 값은 JSON 직렬화
// 제약: 모든 조회는 키 부재 시 기본값으로 폴백한다 (설정 미등록 상태도
//       유효한 상태)
// ==========================================

use crate::db::open_sqlite_connection;
use crate::domain::standards::{CompanySettings, CostStandard};
use rusqlite::{params, Connection};
use std::error::Error;
use std::sync::{Arc, Mutex};

/// config_kv 키: 원가 기준표
const KEY_COST_STANDARDS: &str = "cost_standards";

/// config_kv 키: 전사 설정
const KEY_COMPANY_SETTINGS: &str = "company_settings";

/// config_kv 키: 부서 목록
const KEY_DEPARTMENTS: &str = "departments";

/// 기본 부서 목록 (설정 미등록 시)
const DEFAULT_DEPARTMENTS: [&str; 7] = [
    "DX 사업본부",
    "플랫폼 개발팀",
    "디자인팀",
    "AI 연구소",
    "금융사업 2팀",
    "공공사업 1팀",
    "CSG",
];

// ==========================================
// ConfigManager - 설정 관리자
// ==========================================
pub struct ConfigManager {
    conn: Arc<Mutex<Connection>>,
}

impl ConfigManager {
    /// 새 ConfigManager 인스턴스 생성
    ///
    /// # 매개변수
    /// - db_path: 데이터베이스 파일 경로
    pub fn new(db_path: &str) -> Result<Self, Box<dyn Error>> {
        let conn = open_sqlite_connection(db_path)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// 기존 연결로 ConfigManager 생성
    ///
    /// 연결 동작 일관성을 위해 전달된 연결에도 통일 PRAGMA를 재적용한다 (멱등).
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Result<Self, Box<dyn Error>> {
        {
            let conn_guard = conn.lock().map_err(|e| format!("락 획득 실패: {}", e))?;
            crate::db::configure_sqlite_connection(&conn_guard)?;
        }
        Ok(Self { conn })
    }

    /// config_kv 테이블에서 설정값 조회 (scope_id='global')
    fn get_config_value(&self, key: &str) -> Result<Option<String>, Box<dyn Error>> {
        let conn = self.conn.lock().map_err(|e| format!("락 획득 실패: {}", e))?;

        let result = conn.query_row(
            "SELECT value FROM config_kv WHERE scope_id = 'global' AND key = ?1",
            params![key],
            |row| row.get::<_, String>(0),
        );

        match result {
            Ok(value) => Ok(Some(value)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(Box::new(e)),
        }
    }

    /// config_kv 테이블에 설정값 저장 (scope_id='global')
    fn set_config_value(&self, key: &str, value: &str) -> Result<(), Box<dyn Error>> {
        let conn = self.conn.lock().map_err(|e| format!("락 획득 실패: {}", e))?;
        conn.execute(
            r#"
            INSERT INTO config_kv (scope_id, key, value, updated_at)
            VALUES ('global', ?1, ?2, datetime('now'))
            ON CONFLICT (scope_id, key)
            DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at
            "#,
            params![key, value],
        )?;
        Ok(())
    }

    // ==========================================
    // 원가 기준표
    // ==========================================

    /// 원가 기준표 조회 (미등록 시 기본 기준표)
    pub fn cost_standards(&self) -> Result<Vec<CostStandard>, Box<dyn Error>> {
        match self.get_config_value(KEY_COST_STANDARDS)? {
            Some(raw) => {
                let standards: Vec<CostStandard> = serde_json::from_str(&raw)?;
                Ok(standards)
            }
            None => Ok(CostStandard::defaults()),
        }
    }

    /// 원가 기준표 저장
    pub fn save_cost_standards(&self, standards: &[CostStandard]) -> Result<(), Box<dyn Error>> {
        let raw = serde_json::to_string(standards)?;
        self.set_config_value(KEY_COST_STANDARDS, &raw)
    }

    // ==========================================
    // 전사 설정
    // ==========================================

    /// 전사 설정 조회 (미등록 시 기본값)
    pub fn company_settings(&self) -> Result<CompanySettings, Box<dyn Error>> {
        match self.get_config_value(KEY_COMPANY_SETTINGS)? {
            Some(raw) => {
                let settings: CompanySettings = serde_json::from_str(&raw)?;
                Ok(settings)
            }
            None => Ok(CompanySettings::default()),
        }
    }

    /// 전사 설정 저장
    pub fn save_company_settings(&self, settings: &CompanySettings) -> Result<(), Box<dyn Error>> {
        let raw = serde_json::to_string(settings)?;
        self.set_config_value(KEY_COMPANY_SETTINGS, &raw)
    }

    // ==========================================
    // 부서 목록
    // ==========================================

    /// 부서 목록 조회 (미등록 시 기본 목록)
    pub fn departments(&self) -> Result<Vec<String>, Box<dyn Error>> {
        match self.get_config_value(KEY_DEPARTMENTS)? {
            Some(raw) => {
                let depts: Vec<String> = serde_json::from_str(&raw)?;
                Ok(depts)
            }
            None => Ok(DEFAULT_DEPARTMENTS.iter().map(|d| d.to_string()).collect()),
        }
    }

    /// 부서 목록 저장
    pub fn save_departments(&self, departments: &[String]) -> Result<(), Box<dyn Error>> {
        let raw = serde_json::to_string(departments)?;
        self.set_config_value(KEY_DEPARTMENTS, &raw)
    }
}
