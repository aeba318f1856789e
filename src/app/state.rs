// ==========================================
// FrameInsight - 애플리케이션 상태
// ==========================================
// 책임: 애플리케이션 수준의 공유 상태와 API 인스턴스 관리
// ==========================================

use rusqlite::Connection;
use std::sync::{Arc, Mutex};

use crate::api::{
    AllocationApi, HrApi, ImportApi, ProjectApi, ProposalApi, ReportApi, StandardInfoApi,
};
use crate::config::config_manager::ConfigManager;
use crate::importer::employee_importer::EmployeeImporterImpl;
use crate::repository::{
    AssignmentRepository, EmployeeRepository, ProjectRepository, ProposalRepository,
    TargetRepository,
};

/// 애플리케이션 상태
///
/// 모든 API 인스턴스와 공유 리소스를 담는다.
/// Tauri 앱에서는 전역 상태로 관리된다.
pub struct AppState {
    /// 데이터베이스 경로
    pub db_path: String,

    /// 인사 정보 API
    pub hr_api: Arc<HrApi>,

    /// 기준정보 API
    pub standard_info_api: Arc<StandardInfoApi>,

    /// 프로젝트 API
    pub project_api: Arc<ProjectApi>,

    /// 인력 배정 API
    pub allocation_api: Arc<AllocationApi>,

    /// 손익 리포트 API
    pub report_api: Arc<ReportApi>,

    /// 제안 리뷰 API
    pub proposal_api: Arc<ProposalApi>,

    /// 직원 일괄 등록 API
    pub import_api: Arc<ImportApi>,

    /// 설정 관리자
    pub config_manager: Arc<ConfigManager>,
}

impl AppState {
    /// 새 AppState 인스턴스 생성
    ///
    /// # 매개변수
    /// - db_path: 데이터베이스 파일 경로
    ///
    /// # 설명
    /// 1. 공유 연결을 열고 통일 PRAGMA + 스키마 부트스트랩
    /// 2. Repository 계층 초기화
    /// 3. API 인스턴스 생성
    pub fn new(db_path: String) -> Result<Self, String> {
        tracing::info!("AppState 초기화, 데이터베이스 경로: {}", db_path);

        // 공유 데이터베이스 연결 생성
        let conn = Connection::open(&db_path).map_err(|e| format!("데이터베이스 열기 실패: {}", e))?;
        crate::db::configure_sqlite_connection(&conn)
            .map_err(|e| format!("PRAGMA 설정 실패: {}", e))?;
        crate::db::init_schema(&conn).map_err(|e| format!("스키마 초기화 실패: {}", e))?;
        let conn = Arc::new(Mutex::new(conn));

        // ==========================================
        // Repository 계층 초기화
        // ==========================================
        let employee_repo = Arc::new(EmployeeRepository::from_connection(conn.clone()));
        let project_repo = Arc::new(ProjectRepository::from_connection(conn.clone()));
        let assignment_repo = Arc::new(AssignmentRepository::from_connection(conn.clone()));
        let proposal_repo = Arc::new(ProposalRepository::from_connection(conn.clone()));
        let target_repo = Arc::new(TargetRepository::from_connection(conn.clone()));

        // 설정 관리자
        let config_manager = Arc::new(
            ConfigManager::from_connection(conn.clone())
                .map_err(|e| format!("ConfigManager 생성 실패: {}", e))?,
        );

        // 가져오기 파이프라인
        let importer = Arc::new(EmployeeImporterImpl::new(employee_repo.clone()));

        // ==========================================
        // API 계층 초기화
        // ==========================================
        let hr_api = Arc::new(HrApi::new(employee_repo.clone(), config_manager.clone()));
        let standard_info_api = Arc::new(StandardInfoApi::new(
            config_manager.clone(),
            target_repo.clone(),
            employee_repo.clone(),
        ));
        let project_api = Arc::new(ProjectApi::new(project_repo.clone()));
        let allocation_api = Arc::new(AllocationApi::new(
            assignment_repo.clone(),
            employee_repo.clone(),
            config_manager.clone(),
        ));
        let report_api = Arc::new(ReportApi::new(
            employee_repo.clone(),
            project_repo.clone(),
            assignment_repo.clone(),
            target_repo.clone(),
            config_manager.clone(),
        ));
        let proposal_api = Arc::new(ProposalApi::new(
            proposal_repo,
            employee_repo,
            config_manager.clone(),
        ));
        let import_api = Arc::new(ImportApi::new(importer));

        tracing::info!("AppState 초기화 완료");

        Ok(Self {
            db_path,
            hr_api,
            standard_info_api,
            project_api,
            allocation_api,
            report_api,
            proposal_api,
            import_api,
            config_manager,
        })
    }
}

/// 기본 데이터베이스 경로
///
/// 시스템 데이터 디렉터리 아래 frame-insight/frame_insight.db.
/// 디렉터리 확인이 불가능하면 현재 디렉터리로 폴백한다.
pub fn get_default_db_path() -> String {
    let base = dirs::data_dir().unwrap_or_else(|| std::path::PathBuf::from("."));
    let dir = base.join("frame-insight");
    if let Err(e) = std::fs::create_dir_all(&dir) {
        tracing::warn!("데이터 디렉터리 생성 실패 (현재 디렉터리 사용): {}", e);
        return "frame_insight.db".to_string();
    }
    dir.join("frame_insight.db").display().to_string()
}
