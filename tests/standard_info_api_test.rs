// ==========================================
// StandardInfoApi 통합 테스트
// ==========================================

mod helpers;
mod test_helpers;

use std::sync::Arc;

use frame_insight::api::error::ApiError;
use frame_insight::api::standard_info_api::StandardInfoApi;
use frame_insight::config::config_manager::ConfigManager;
use frame_insight::domain::standards::{CostStandard, TargetItem};
use frame_insight::domain::types::EmploymentType;
use frame_insight::repository::{EmployeeRepository, TargetRepository};
use helpers::test_data_builder::*;
use test_helpers::create_test_db;

fn build_api(db_path: &str) -> (StandardInfoApi, Arc<EmployeeRepository>) {
    let employee_repo = Arc::new(EmployeeRepository::new(db_path).unwrap());
    let target_repo = Arc::new(TargetRepository::new(db_path).unwrap());
    let config_manager = Arc::new(ConfigManager::new(db_path).unwrap());
    (
        StandardInfoApi::new(config_manager, target_repo, employee_repo.clone()),
        employee_repo,
    )
}

// ==========================================
// 원가 기준표
// ==========================================

#[test]
fn test_default_standards_when_unconfigured() {
    let (_tmp, db_path) = create_test_db().unwrap();
    let (api, _) = build_api(&db_path);

    let standards = api.cost_standards().unwrap();
    assert_eq!(standards.len(), 2);
    assert_eq!(standards[0].employment_type, EmploymentType::Regular);
    assert!((standards[0].severance_rate - 0.0833).abs() < 1e-12);
}

#[test]
fn test_save_standards_rejects_negative_rate() {
    let (_tmp, db_path) = create_test_db().unwrap();
    let (api, _) = build_api(&db_path);

    let mut standard = CostStandard::default_regular();
    standard.insurance_rate = -0.01;

    let err = api.save_cost_standards(&[standard]).unwrap_err();
    assert!(matches!(err, ApiError::ValidationError(_)));
}

#[test]
fn test_save_and_reload_standards() {
    let (_tmp, db_path) = create_test_db().unwrap();
    let (api, _) = build_api(&db_path);

    let mut standard = CostStandard::default_regular();
    standard.overhead_rate = 0.18;
    api.save_cost_standards(&[standard.clone()]).unwrap();

    let reloaded = api.cost_standards().unwrap();
    assert_eq!(reloaded.len(), 1);
    assert!((reloaded[0].overhead_rate - 0.18).abs() < 1e-12);
}

// ==========================================
// 부서 관리
// ==========================================

#[test]
fn test_add_department_rejects_duplicate() {
    let (_tmp, db_path) = create_test_db().unwrap();
    let (api, _) = build_api(&db_path);

    api.add_department("신사업팀").unwrap();
    let err = api.add_department("신사업팀").unwrap_err();
    assert!(matches!(err, ApiError::BusinessRuleViolation(_)));
}

#[test]
fn test_delete_department_requires_move_target_when_members_exist() {
    let (_tmp, db_path) = create_test_db().unwrap();
    let (api, employee_repo) = build_api(&db_path);

    employee_repo
        .insert(
            &EmployeeBuilder::new("EMP-1", "직원A")
                .dept("공공사업 1팀")
                .build(),
        )
        .unwrap();

    // 이동 부서 미지정 → 거부
    let err = api.delete_department("공공사업 1팀", None).unwrap_err();
    assert!(matches!(err, ApiError::BusinessRuleViolation(_)));

    // 이동 부서 지정 → 인원 이동 후 삭제
    let moved = api
        .delete_department("공공사업 1팀", Some("DX 사업본부"))
        .unwrap();
    assert_eq!(moved, 1);
    assert!(!api.departments().unwrap().contains(&"공공사업 1팀".to_string()));
    assert_eq!(employee_repo.list_by_dept("DX 사업본부").unwrap().len(), 1);
}

#[test]
fn test_dept_monthly_cost_sums_members() {
    let (_tmp, db_path) = create_test_db().unwrap();
    let (api, employee_repo) = build_api(&db_path);

    employee_repo
        .insert(
            &EmployeeBuilder::new("EMP-1", "김철수")
                .dept("DX 사업본부")
                .salary(2026, 72_000_000)
                .build(),
        )
        .unwrap();
    employee_repo
        .insert(
            &EmployeeBuilder::new("EMP-2", "이영희")
                .dept("DX 사업본부")
                .salary(2026, 48_000_000)
                .build(),
        )
        .unwrap();

    let total = api
        .dept_monthly_cost("DX 사업본부", date(2026, 10, 15))
        .unwrap();
    assert_eq!(total, 8_525_790 + 5_683_860);
}

// ==========================================
// 월별 목표와 마감
// ==========================================

#[test]
fn test_monthly_target_lifecycle() {
    let (_tmp, db_path) = create_test_db().unwrap();
    let (api, _) = build_api(&db_path);

    let item = TargetItem {
        id: "ti-1".to_string(),
        title: "L전자 GRS 2차 고도화 수주".to_string(),
        amount: 200_000_000,
    };
    api.upsert_target_item("플랫폼 개발팀", 2026, 10, &item)
        .unwrap();

    // 마감 후 수정 거부
    api.close_month("플랫폼 개발팀", 2026, 10).unwrap();
    let err = api
        .upsert_target_item("플랫폼 개발팀", 2026, 10, &item)
        .unwrap_err();
    assert!(matches!(err, ApiError::BusinessRuleViolation(_)));

    // 재오픈 후 수정 가능
    api.reopen_month("플랫폼 개발팀", 2026, 10).unwrap();
    api.upsert_target_item("플랫폼 개발팀", 2026, 10, &item)
        .unwrap();

    let target = api.monthly_target("플랫폼 개발팀", 2026, 10).unwrap();
    assert_eq!(target.total_amount(), 200_000_000);
    assert_eq!(api.cumulative_total("플랫폼 개발팀", 2026, 12).unwrap(), 200_000_000);
}

#[test]
fn test_invalid_month_rejected() {
    let (_tmp, db_path) = create_test_db().unwrap();
    let (api, _) = build_api(&db_path);

    let err = api.monthly_target("플랫폼 개발팀", 2026, 13).unwrap_err();
    assert!(matches!(err, ApiError::InvalidInput(_)));
}
