// ==========================================
// Repository 계층 통합 테스트
// ==========================================
// 테스트 범위: 임시 SQLite DB 기준 CRUD 왕복과 제약 동작
// ==========================================

mod helpers;
mod test_helpers;

use chrono::NaiveDate;
use frame_insight::domain::project::CostRecord;
use frame_insight::domain::standards::TargetItem;
use frame_insight::domain::types::CloseState;
use frame_insight::repository::{
    AssignmentRepository, EmployeeRepository, ProjectRepository, ProposalRepository,
    RepositoryError, TargetRepository,
};
use helpers::test_data_builder::*;
use test_helpers::create_test_db;

// ==========================================
// 직원 저장소
// ==========================================

#[test]
fn test_employee_roundtrip_with_compensation() {
    let (_tmp, db_path) = create_test_db().unwrap();
    let repo = EmployeeRepository::new(&db_path).unwrap();

    let employee = EmployeeBuilder::new("EMP-2024-001", "홍길동")
        .salary(2024, 50_000_000)
        .salary(2025, 54_000_000)
        .build();
    repo.insert(&employee).unwrap();

    let loaded = repo.find_by_id("EMP-2024-001").unwrap().unwrap();
    assert_eq!(loaded.name, "홍길동");
    assert_eq!(loaded.salaries.len(), 2);
    assert_eq!(loaded.salaries.get(&2025), Some(&54_000_000));

    // 프리랜서 계약 이력 왕복
    let freelancer = EmployeeBuilder::new("EMP-2024-025", "한가인")
        .dept("디자인팀")
        .freelance_contract(1, date(2024, 1, 1), date(2024, 12, 31), 4_500_000)
        .build();
    repo.insert(&freelancer).unwrap();

    let loaded = repo.find_by_id("EMP-2024-025").unwrap().unwrap();
    assert_eq!(loaded.contracts.len(), 1);
    assert_eq!(loaded.contracts[0].monthly_amount, 4_500_000);
    assert_eq!(loaded.contracts[0].start_date, date(2024, 1, 1));
}

#[test]
fn test_employee_archive_is_soft_delete() {
    let (_tmp, db_path) = create_test_db().unwrap();
    let repo = EmployeeRepository::new(&db_path).unwrap();

    repo.insert(&EmployeeBuilder::new("EMP-2024-001", "홍길동").build())
        .unwrap();
    repo.set_archived("EMP-2024-001", true).unwrap();

    // 재직자 목록에는 없지만 레코드는 보존
    assert!(repo.list(false).unwrap().is_empty());
    assert_eq!(repo.list(true).unwrap().len(), 1);
    assert!(repo.find_by_id("EMP-2024-001").unwrap().is_some());
}

#[test]
fn test_employee_duplicate_id_is_constraint_violation() {
    let (_tmp, db_path) = create_test_db().unwrap();
    let repo = EmployeeRepository::new(&db_path).unwrap();

    repo.insert(&EmployeeBuilder::new("EMP-2024-001", "홍길동").build())
        .unwrap();
    let err = repo
        .insert(&EmployeeBuilder::new("EMP-2024-001", "김철수").build())
        .unwrap_err();
    assert!(matches!(
        err,
        RepositoryError::UniqueConstraintViolation(_) | RepositoryError::DatabaseQueryError(_)
    ));
}

#[test]
fn test_employee_move_department() {
    let (_tmp, db_path) = create_test_db().unwrap();
    let repo = EmployeeRepository::new(&db_path).unwrap();

    repo.insert(
        &EmployeeBuilder::new("EMP-1", "직원A")
            .dept("공공사업 1팀")
            .build(),
    )
    .unwrap();
    repo.insert(
        &EmployeeBuilder::new("EMP-2", "직원B")
            .dept("공공사업 1팀")
            .build(),
    )
    .unwrap();

    let moved = repo.move_department("공공사업 1팀", "DX 사업본부").unwrap();
    assert_eq!(moved, 2);
    assert_eq!(repo.list_by_dept("DX 사업본부").unwrap().len(), 2);
    assert!(repo.list_by_dept("공공사업 1팀").unwrap().is_empty());
}

// ==========================================
// 프로젝트/비용 저장소
// ==========================================

#[test]
fn test_project_and_cost_records() {
    let (_tmp, db_path) = create_test_db().unwrap();
    let repo = ProjectRepository::new(&db_path).unwrap();

    let project = ProjectBuilder::new("PJ-26-001", "LG 베스트샵 개편").build();
    repo.insert(&project).unwrap();

    let loaded = repo.find_by_code("PJ-26-001").unwrap().unwrap();
    assert_eq!(loaded.execution_amount(), 658_800_000);

    // 비용 집행 레코드
    let record = CostRecord {
        id: "cr-1".to_string(),
        exec_date: NaiveDate::from_ymd_opt(2026, 10, 5).unwrap(),
        month: 10,
        project_code: "PJ-26-001".to_string(),
        category: "외주용역비".to_string(),
        vendor: Some("(주)데브솔루션".to_string()),
        description: Some("서버 개발 용역 1차".to_string()),
        amount: 22_000_000,
    };
    repo.insert_cost_record(&record).unwrap();

    let by_month = repo.list_cost_records_by_month(10).unwrap();
    assert_eq!(by_month.len(), 1);
    assert_eq!(by_month[0].amount, 22_000_000);

    // 보관: 목록에서 제외, 전체 조회에는 포함
    repo.set_archived("PJ-26-001", true).unwrap();
    assert!(repo.list(false).unwrap().is_empty());
    assert_eq!(repo.list(true).unwrap().len(), 1);
}

// ==========================================
// 배정 저장소
// ==========================================

#[test]
fn test_assignment_upsert_updates_man_month() {
    let (_tmp, db_path) = create_test_db().unwrap();
    let employee_repo = EmployeeRepository::new(&db_path).unwrap();
    let project_repo = ProjectRepository::new(&db_path).unwrap();
    let repo = AssignmentRepository::new(&db_path).unwrap();

    employee_repo
        .insert(&EmployeeBuilder::new("EMP-1", "직원A").build())
        .unwrap();
    project_repo
        .insert(&ProjectBuilder::new("PJ-26-001", "프로젝트A").build())
        .unwrap();

    let assignment = AssignmentBuilder::new("EMP-1", "PJ-26-001")
        .man_month(0.5)
        .build();
    repo.upsert(&assignment).unwrap();

    // 동일 키 재등록 → 공수 갱신
    let updated = AssignmentBuilder::new("EMP-1", "PJ-26-001")
        .man_month(0.8)
        .build();
    repo.upsert(&updated).unwrap();

    let rows = repo.list_by_employee_month("EMP-1", 2026, 10).unwrap();
    assert_eq!(rows.len(), 1);
    assert!((rows[0].man_month - 0.8).abs() < 1e-9);
}

// ==========================================
// 월별 목표 저장소
// ==========================================

#[test]
fn test_target_close_state_transitions() {
    let (_tmp, db_path) = create_test_db().unwrap();
    let repo = TargetRepository::new(&db_path).unwrap();

    let item = TargetItem {
        id: "ti-1".to_string(),
        title: "S물산 유지보수 고정 매출".to_string(),
        amount: 120_000_000,
    };
    repo.upsert_item("플랫폼 개발팀", 2026, 10, &item).unwrap();

    // 마감 → 수정 거부
    repo.transition_close_state("플랫폼 개발팀", 2026, 10, CloseState::Closed)
        .unwrap();
    let err = repo
        .upsert_item("플랫폼 개발팀", 2026, 10, &item)
        .unwrap_err();
    assert!(matches!(err, RepositoryError::BusinessRuleViolation(_)));

    // 잘못된 전이: Closed → InProgress
    let err = repo
        .transition_close_state("플랫폼 개발팀", 2026, 10, CloseState::InProgress)
        .unwrap_err();
    assert!(matches!(err, RepositoryError::InvalidStateTransition { .. }));

    // 재오픈 후 수정 가능
    repo.transition_close_state("플랫폼 개발팀", 2026, 10, CloseState::Open)
        .unwrap();
    repo.upsert_item("플랫폼 개발팀", 2026, 10, &item).unwrap();

    let target = repo.find("플랫폼 개발팀", 2026, 10).unwrap();
    assert_eq!(target.close_state, CloseState::Open);
    assert_eq!(target.total_amount(), 120_000_000);
}

// ==========================================
// 제안 저장소
// ==========================================

#[test]
fn test_proposal_roundtrip_with_children() {
    let (_tmp, db_path) = create_test_db().unwrap();
    let repo = ProposalRepository::new(&db_path).unwrap();

    let mut proposal = frame_insight::domain::proposal::Proposal {
        id: "prop-1".to_string(),
        title: "차세대 모바일 뱅킹 제안".to_string(),
        client: "K-Bank".to_string(),
        budget: 450_000_000,
        due_date: Some(date(2026, 11, 30)),
        status: "작성중".to_string(),
        archived: false,
        allocations: vec![frame_insight::domain::proposal::ProposalAllocation {
            id: "alloc-1".to_string(),
            kind: frame_insight::domain::proposal::AllocationKind::External,
            employee_id: None,
            external_name: Some("디자인 외주(A사)".to_string()),
            man_month: 1.0,
            cost: 4_500_000,
        }],
        comments: Vec::new(),
    };
    repo.insert(&proposal).unwrap();

    // 코멘트 추가 후 갱신 (자식 전체 치환)
    proposal
        .comments
        .push(frame_insight::domain::proposal::ProposalComment {
            id: "cmt-1".to_string(),
            author: "김철수".to_string(),
            content: "예산 재검토 필요".to_string(),
            date: date(2026, 10, 2),
        });
    repo.update(&proposal).unwrap();

    let loaded = repo.find_by_id("prop-1").unwrap().unwrap();
    assert_eq!(loaded.allocations.len(), 1);
    assert_eq!(loaded.comments.len(), 1);
    assert_eq!(loaded.total_allocation_cost(), 4_500_000);
}
