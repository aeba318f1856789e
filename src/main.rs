// ==========================================
// FrameInsight - 메인 진입점
// ==========================================
// 기술 스택: Tauri + Rust + SQLite
// 시스템 포지션: 프로젝트 손익 의사결정 지원 시스템
// ==========================================

// 콘솔 창 숨김 (Windows)
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use frame_insight::app::{get_default_db_path, AppState};

#[cfg(feature = "tauri-app")]
fn main() {
    use frame_insight::app::tauri_commands::*;

    // 로그 시스템 초기화
    frame_insight::logging::init();

    tracing::info!("==================================================");
    tracing::info!("FrameInsight - 프로젝트 손익 의사결정 지원 시스템");
    tracing::info!("시스템 버전: {}", frame_insight::VERSION);
    tracing::info!("==================================================");

    // 데이터베이스 경로 결정
    let db_path = get_default_db_path();
    tracing::info!("데이터베이스 사용: {}", db_path);

    // AppState 생성
    tracing::info!("AppState 초기화 중...");
    let app_state = AppState::new(db_path).expect("AppState 초기화 실패");

    tracing::info!("AppState 초기화 성공");
    tracing::info!("Tauri 앱 시작...");

    // Tauri 앱 시작
    tauri::Builder::default()
        .manage(app_state)
        .invoke_handler(tauri::generate_handler![
            // ==========================================
            // 인사 정보 명령 (6개)
            // ==========================================
            list_employees,
            search_employees,
            register_employee,
            archive_employee,
            simulate_employee_cost,
            import_employees,

            // ==========================================
            // 기준정보 명령 (12개)
            // ==========================================
            get_cost_standards,
            save_cost_standards,
            get_company_settings,
            save_company_settings,
            list_departments,
            add_department,
            delete_department,
            get_monthly_target,
            upsert_target_item,
            delete_target_item,
            close_month,
            reopen_month,

            // ==========================================
            // 프로젝트 명령 (7개)
            // ==========================================
            create_project,
            list_projects,
            archive_project,
            append_project_issue,
            add_cost_record,
            list_cost_records,
            simulate_project_profitability,

            // ==========================================
            // 인력 배정 명령 (3개)
            // ==========================================
            upsert_assignment,
            delete_assignment,
            dept_utilization_report,

            // ==========================================
            // 손익 리포트 명령 (2개)
            // ==========================================
            get_monthly_report,
            get_dashboard_summary,

            // ==========================================
            // 제안 리뷰 명령 (4개)
            // ==========================================
            create_proposal,
            list_proposals,
            add_proposal_allocation,
            add_proposal_comment,
        ])
        .run(tauri::generate_context!())
        .expect("Tauri 앱 시작 실패");

    tracing::info!("Tauri 앱 종료");
}

#[cfg(not(feature = "tauri-app"))]
fn main() {
    frame_insight::logging::init();

    tracing::info!("==================================================");
    tracing::info!("FrameInsight - 프로젝트 손익 의사결정 지원 시스템");
    tracing::info!("시스템 버전: {}", frame_insight::VERSION);
    tracing::info!("==================================================");

    // 헤드리스 모드: 스키마 부트스트랩까지만 수행
    let db_path = get_default_db_path();
    tracing::info!("데이터베이스 사용: {}", db_path);

    match AppState::new(db_path) {
        Ok(_state) => {
            tracing::info!("초기화 완료. 데스크톱 앱은 tauri-app 피처로 빌드하세요:");
            tracing::info!("  cargo run --features tauri-app");
        }
        Err(e) => {
            tracing::error!("초기화 실패: {}", e);
            std::process::exit(1);
        }
    }
}
