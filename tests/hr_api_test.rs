// ==========================================
// HrApi 통합 테스트
// ==========================================

mod helpers;
mod test_helpers;

use std::sync::Arc;

use frame_insight::api::error::ApiError;
use frame_insight::api::hr_api::HrApi;
use frame_insight::config::config_manager::ConfigManager;
use frame_insight::repository::EmployeeRepository;
use helpers::test_data_builder::*;
use test_helpers::create_test_db;

fn build_api(db_path: &str) -> HrApi {
    let employee_repo = Arc::new(EmployeeRepository::new(db_path).unwrap());
    let config_manager = Arc::new(ConfigManager::new(db_path).unwrap());
    HrApi::new(employee_repo, config_manager)
}

#[test]
fn test_register_requires_name() {
    let (_tmp, db_path) = create_test_db().unwrap();
    let api = build_api(&db_path);

    let mut employee = EmployeeBuilder::new("EMP-2026-001", "홍길동").build();
    employee.name = "  ".to_string();

    let err = api.register_employee(&employee).unwrap_err();
    assert!(matches!(err, ApiError::InvalidInput(_)));
}

#[test]
fn test_register_rejects_mixed_compensation_basis() {
    let (_tmp, db_path) = create_test_db().unwrap();
    let api = build_api(&db_path);

    // 정규직인데 계약 이력 보유 → 검증 실패
    let mut employee = EmployeeBuilder::new("EMP-2026-001", "홍길동")
        .salary(2026, 50_000_000)
        .build();
    employee
        .contracts
        .push(frame_insight::domain::employee::ContractPeriod {
            seq: 1,
            start_date: date(2026, 1, 1),
            end_date: date(2026, 12, 31),
            monthly_amount: 4_000_000,
        });

    let err = api.register_employee(&employee).unwrap_err();
    assert!(matches!(err, ApiError::ValidationError(_)));
}

#[test]
fn test_list_employees_includes_monthly_cost() {
    let (_tmp, db_path) = create_test_db().unwrap();
    let api = build_api(&db_path);

    api.register_employee(
        &EmployeeBuilder::new("EMP-2026-001", "김철수")
            .dept("DX 사업본부")
            .salary(2026, 72_000_000)
            .build(),
    )
    .unwrap();

    let list = api.list_employees(false, date(2026, 10, 15)).unwrap();
    assert_eq!(list.len(), 1);
    assert_eq!(list[0].display_amount, 72_000_000);
    // 600만원 기본급 × 1.3533 × 1.05 (기본 정규직 기준)
    assert_eq!(list[0].monthly_cost, 8_525_790);
}

#[test]
fn test_missing_salary_is_zero_cost_not_error() {
    let (_tmp, db_path) = create_test_db().unwrap();
    let api = build_api(&db_path);

    // 연봉 미입력 신규 입사자
    api.register_employee(&EmployeeBuilder::new("EMP-2026-009", "신입사원").build())
        .unwrap();

    let list = api.list_employees(false, date(2026, 10, 15)).unwrap();
    assert_eq!(list[0].monthly_cost, 0);
    assert_eq!(list[0].display_amount, 0);
}

#[test]
fn test_archive_and_total_cost() {
    let (_tmp, db_path) = create_test_db().unwrap();
    let api = build_api(&db_path);
    let eval = date(2026, 10, 15);

    api.register_employee(
        &EmployeeBuilder::new("EMP-1", "김철수")
            .salary(2026, 72_000_000)
            .build(),
    )
    .unwrap();
    api.register_employee(
        &EmployeeBuilder::new("EMP-2", "홍길동")
            .salary(2026, 48_000_000)
            .build(),
    )
    .unwrap();

    assert_eq!(api.total_monthly_cost(eval).unwrap(), 8_525_790 + 5_683_860);

    // 퇴사 처리 후 재직자 원가 합계에서 제외
    api.set_archived("EMP-1", true).unwrap();
    assert_eq!(api.total_monthly_cost(eval).unwrap(), 5_683_860);

    // 복직
    api.set_archived("EMP-1", false).unwrap();
    assert_eq!(api.list_employees(false, eval).unwrap().len(), 2);
}
