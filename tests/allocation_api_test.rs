// ==========================================
// AllocationApi 통합 테스트
// ==========================================

mod helpers;
mod test_helpers;

use std::sync::Arc;

use frame_insight::api::allocation_api::AllocationApi;
use frame_insight::api::error::ApiError;
use frame_insight::config::config_manager::ConfigManager;
use frame_insight::domain::types::UtilizationClass;
use frame_insight::repository::{
    AssignmentRepository, EmployeeRepository, ProjectRepository,
};
use helpers::test_data_builder::*;
use test_helpers::create_test_db;

struct TestContext {
    api: AllocationApi,
    employee_repo: Arc<EmployeeRepository>,
    project_repo: Arc<ProjectRepository>,
}

fn build_context(db_path: &str) -> TestContext {
    let employee_repo = Arc::new(EmployeeRepository::new(db_path).unwrap());
    let assignment_repo = Arc::new(AssignmentRepository::new(db_path).unwrap());
    let project_repo = Arc::new(ProjectRepository::new(db_path).unwrap());
    let config_manager = Arc::new(ConfigManager::new(db_path).unwrap());
    TestContext {
        api: AllocationApi::new(assignment_repo, employee_repo.clone(), config_manager),
        employee_repo,
        project_repo,
    }
}

#[test]
fn test_upsert_rejects_negative_man_month() {
    let (_tmp, db_path) = create_test_db().unwrap();
    let ctx = build_context(&db_path);

    let assignment = AssignmentBuilder::new("EMP-1", "PJ-26-001")
        .man_month(-0.5)
        .build();
    let err = ctx.api.upsert_assignment(&assignment).unwrap_err();
    assert!(matches!(err, ApiError::InvalidInput(_)));
}

#[test]
fn test_over_allocation_is_reported_not_rejected() {
    let (_tmp, db_path) = create_test_db().unwrap();
    let ctx = build_context(&db_path);

    ctx.employee_repo
        .insert(&EmployeeBuilder::new("EMP-1", "김철수").build())
        .unwrap();
    ctx.project_repo
        .insert(&ProjectBuilder::new("PJ-26-001", "프로젝트A").build())
        .unwrap();
    ctx.project_repo
        .insert(&ProjectBuilder::new("PJ-26-002", "프로젝트B").build())
        .unwrap();

    ctx.api
        .upsert_assignment(&AssignmentBuilder::new("EMP-1", "PJ-26-001").man_month(1.0).build())
        .unwrap();

    // 초과 배정도 저장되고 경고 분류만 붙는다
    let summary = ctx
        .api
        .upsert_assignment(&AssignmentBuilder::new("EMP-1", "PJ-26-002").man_month(0.5).build())
        .unwrap();
    assert_eq!(summary.class, UtilizationClass::OverAllocated);
    assert!((summary.total_man_month - 1.5).abs() < 1e-9);

    let over = ctx.api.over_allocated(2026, 10).unwrap();
    assert_eq!(over.len(), 1);
    assert_eq!(over[0].employee_id, "EMP-1");
}

#[test]
fn test_dept_report_groups_and_sums_idle_cost() {
    let (_tmp, db_path) = create_test_db().unwrap();
    let ctx = build_context(&db_path);
    let eval = date(2026, 10, 15);

    ctx.employee_repo
        .insert(
            &EmployeeBuilder::new("EMP-1", "김철수")
                .dept("DX 사업본부")
                .salary(2026, 72_000_000)
                .build(),
        )
        .unwrap();
    ctx.employee_repo
        .insert(
            &EmployeeBuilder::new("EMP-2", "홍길동")
                .dept("플랫폼 개발팀")
                .salary(2026, 48_000_000)
                .build(),
        )
        .unwrap();
    ctx.project_repo
        .insert(&ProjectBuilder::new("PJ-26-001", "프로젝트A").build())
        .unwrap();

    // EMP-1 완전 가동, EMP-2 미배정(유휴)
    ctx.api
        .upsert_assignment(&AssignmentBuilder::new("EMP-1", "PJ-26-001").man_month(1.0).build())
        .unwrap();

    let report = ctx.api.dept_utilization_report(2026, 10, eval).unwrap();
    assert_eq!(report.len(), 2);

    let dx = report.iter().find(|g| g.dept == "DX 사업본부").unwrap();
    assert_eq!(dx.idle_cost, 0);
    assert_eq!(
        dx.members[0].summary.class,
        UtilizationClass::FullyUtilized
    );

    let platform = report.iter().find(|g| g.dept == "플랫폼 개발팀").unwrap();
    assert_eq!(platform.members[0].summary.class, UtilizationClass::Idle);
    // 미배정 직원 월 원가 전액이 유휴 원가
    assert_eq!(platform.idle_cost, 5_683_860);
}

#[test]
fn test_remove_assignment() {
    let (_tmp, db_path) = create_test_db().unwrap();
    let ctx = build_context(&db_path);

    ctx.employee_repo
        .insert(&EmployeeBuilder::new("EMP-1", "김철수").build())
        .unwrap();
    ctx.project_repo
        .insert(&ProjectBuilder::new("PJ-26-001", "프로젝트A").build())
        .unwrap();
    ctx.api
        .upsert_assignment(&AssignmentBuilder::new("EMP-1", "PJ-26-001").man_month(0.7).build())
        .unwrap();

    ctx.api
        .remove_assignment("EMP-1", "PJ-26-001", 2026, 10)
        .unwrap();
    let summary = ctx.api.utilization("EMP-1", 2026, 10).unwrap();
    assert_eq!(summary.class, UtilizationClass::Idle);

    // 없는 배정 삭제 → NotFound
    let err = ctx
        .api
        .remove_assignment("EMP-1", "PJ-26-001", 2026, 10)
        .unwrap_err();
    assert!(matches!(err, ApiError::NotFound(_)));
}
