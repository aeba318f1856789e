// ==========================================
// FrameInsight - Tauri 명령
// ==========================================
// 책임: Tauri 명령 정의, 프런트엔드와 백엔드 API 연결
// ==========================================

#![cfg(feature = "tauri-app")]

use crate::api::error::ApiError;
use crate::app::state::AppState;
use crate::domain::assignment::Assignment;
use crate::domain::employee::Employee;
use crate::domain::project::Project;
use crate::domain::standards::{CompanySettings, CostStandard, TargetItem};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ==========================================
// 공통 도구: 에러 매핑, 날짜 파싱, 직렬화
// ==========================================

/// 에러 응답 (프런트엔드 반환용)
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ErrorResponse {
    /// 에러 코드
    code: String,

    /// 에러 메시지
    message: String,
}

/// ApiError를 JSON 문자열로 변환 (Tauri 요구 형식)
fn map_api_error(err: ApiError) -> String {
    let error_response = ErrorResponse {
        code: match &err {
            ApiError::InvalidInput(_) => "INVALID_INPUT",
            ApiError::NotFound(_) => "NOT_FOUND",
            ApiError::BusinessRuleViolation(_) => "BUSINESS_RULE_VIOLATION",
            ApiError::InvalidStateTransition { .. } => "INVALID_STATE_TRANSITION",
            ApiError::DatabaseError(_) => "DATABASE_ERROR",
            ApiError::DatabaseConnectionError(_) => "DATABASE_CONNECTION_ERROR",
            ApiError::DatabaseTransactionError(_) => "DATABASE_TRANSACTION_ERROR",
            ApiError::ImportError(_) => "IMPORT_ERROR",
            ApiError::ValidationError(_) => "VALIDATION_ERROR",
            ApiError::InternalError(_) => "INTERNAL_ERROR",
            ApiError::Other(_) => "OTHER_ERROR",
        }
        .to_string(),
        message: err.to_string(),
    };

    serde_json::to_string(&error_response).unwrap_or_else(|_| err.to_string())
}

/// 날짜 문자열 파싱
fn parse_date(date_str: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(date_str, "%Y-%m-%d")
        .map_err(|e| format!("날짜 형식 오류 (YYYY-MM-DD 기대): {}", e))
}

/// 결과 직렬화
fn to_json<T: Serialize>(value: &T) -> Result<String, String> {
    serde_json::to_string(value).map_err(|e| format!("직렬화 실패: {}", e))
}

// ==========================================
// 인사 정보 명령
// ==========================================

/// 직원 목록 조회
#[tauri::command(rename_all = "snake_case")]
pub async fn list_employees(
    state: tauri::State<'_, AppState>,
    archived: bool,
    eval_date: String,
) -> Result<String, String> {
    let eval_date = parse_date(&eval_date)?;
    let result = state
        .hr_api
        .list_employees(archived, eval_date)
        .map_err(map_api_error)?;
    to_json(&result)
}

/// 직원 검색
#[tauri::command(rename_all = "snake_case")]
pub async fn search_employees(
    state: tauri::State<'_, AppState>,
    term: String,
    eval_date: String,
) -> Result<String, String> {
    let eval_date = parse_date(&eval_date)?;
    let result = state
        .hr_api
        .search_employees(&term, eval_date)
        .map_err(map_api_error)?;
    to_json(&result)
}

/// 직원 등록
#[tauri::command(rename_all = "snake_case")]
pub async fn register_employee(
    state: tauri::State<'_, AppState>,
    employee: String,
) -> Result<String, String> {
    let employee: Employee =
        serde_json::from_str(&employee).map_err(|e| format!("역직렬화 실패: {}", e))?;
    state
        .hr_api
        .register_employee(&employee)
        .map_err(map_api_error)?;
    Ok("{}".to_string())
}

/// 퇴사/복직 처리
#[tauri::command(rename_all = "snake_case")]
pub async fn archive_employee(
    state: tauri::State<'_, AppState>,
    employee_id: String,
    archived: bool,
) -> Result<String, String> {
    state
        .hr_api
        .set_archived(&employee_id, archived)
        .map_err(map_api_error)?;
    Ok("{}".to_string())
}

/// 직원 월 원가 시뮬레이션
#[tauri::command(rename_all = "snake_case")]
pub async fn simulate_employee_cost(
    state: tauri::State<'_, AppState>,
    employee: String,
    eval_date: String,
) -> Result<String, String> {
    let employee: Employee =
        serde_json::from_str(&employee).map_err(|e| format!("역직렬화 실패: {}", e))?;
    let eval_date = parse_date(&eval_date)?;
    let cost = state
        .hr_api
        .simulate_monthly_cost(&employee, eval_date)
        .map_err(map_api_error)?;
    to_json(&cost)
}

/// 직원 일괄 등록 (Excel/CSV)
#[tauri::command(rename_all = "snake_case")]
pub async fn import_employees(
    state: tauri::State<'_, AppState>,
    file_path: String,
) -> Result<String, String> {
    let report = state
        .import_api
        .import_employees(&file_path)
        .await
        .map_err(map_api_error)?;
    to_json(&report)
}

// ==========================================
// 기준정보 명령
// ==========================================

/// 원가 기준표 조회
#[tauri::command(rename_all = "snake_case")]
pub async fn get_cost_standards(state: tauri::State<'_, AppState>) -> Result<String, String> {
    let result = state
        .standard_info_api
        .cost_standards()
        .map_err(map_api_error)?;
    to_json(&result)
}

/// 원가 기준표 저장
#[tauri::command(rename_all = "snake_case")]
pub async fn save_cost_standards(
    state: tauri::State<'_, AppState>,
    standards: String,
) -> Result<String, String> {
    let standards: Vec<CostStandard> =
        serde_json::from_str(&standards).map_err(|e| format!("역직렬화 실패: {}", e))?;
    state
        .standard_info_api
        .save_cost_standards(&standards)
        .map_err(map_api_error)?;
    Ok("{}".to_string())
}

/// 전사 설정 조회
#[tauri::command(rename_all = "snake_case")]
pub async fn get_company_settings(state: tauri::State<'_, AppState>) -> Result<String, String> {
    let result = state
        .standard_info_api
        .company_settings()
        .map_err(map_api_error)?;
    to_json(&result)
}

/// 전사 설정 저장
#[tauri::command(rename_all = "snake_case")]
pub async fn save_company_settings(
    state: tauri::State<'_, AppState>,
    settings: String,
) -> Result<String, String> {
    let settings: CompanySettings =
        serde_json::from_str(&settings).map_err(|e| format!("역직렬화 실패: {}", e))?;
    state
        .standard_info_api
        .save_company_settings(&settings)
        .map_err(map_api_error)?;
    Ok("{}".to_string())
}

/// 부서 목록 조회
#[tauri::command(rename_all = "snake_case")]
pub async fn list_departments(state: tauri::State<'_, AppState>) -> Result<String, String> {
    let result = state
        .standard_info_api
        .departments()
        .map_err(map_api_error)?;
    to_json(&result)
}

/// 부서 추가
#[tauri::command(rename_all = "snake_case")]
pub async fn add_department(
    state: tauri::State<'_, AppState>,
    name: String,
) -> Result<String, String> {
    state
        .standard_info_api
        .add_department(&name)
        .map_err(map_api_error)?;
    Ok("{}".to_string())
}

/// 부서 삭제 (인원 이동 포함)
#[tauri::command(rename_all = "snake_case")]
pub async fn delete_department(
    state: tauri::State<'_, AppState>,
    name: String,
    move_to: Option<String>,
) -> Result<String, String> {
    let moved = state
        .standard_info_api
        .delete_department(&name, move_to.as_deref())
        .map_err(map_api_error)?;
    to_json(&moved)
}

/// 부서-월 목표 조회
#[tauri::command(rename_all = "snake_case")]
pub async fn get_monthly_target(
    state: tauri::State<'_, AppState>,
    dept: String,
    year: i32,
    month: u32,
) -> Result<String, String> {
    let result = state
        .standard_info_api
        .monthly_target(&dept, year, month)
        .map_err(map_api_error)?;
    to_json(&result)
}

/// 목표 항목 추가/수정
#[tauri::command(rename_all = "snake_case")]
pub async fn upsert_target_item(
    state: tauri::State<'_, AppState>,
    dept: String,
    year: i32,
    month: u32,
    item: String,
) -> Result<String, String> {
    let item: TargetItem =
        serde_json::from_str(&item).map_err(|e| format!("역직렬화 실패: {}", e))?;
    state
        .standard_info_api
        .upsert_target_item(&dept, year, month, &item)
        .map_err(map_api_error)?;
    Ok("{}".to_string())
}

/// 목표 항목 삭제
#[tauri::command(rename_all = "snake_case")]
pub async fn delete_target_item(
    state: tauri::State<'_, AppState>,
    dept: String,
    year: i32,
    month: u32,
    item_id: String,
) -> Result<String, String> {
    state
        .standard_info_api
        .delete_target_item(&dept, year, month, &item_id)
        .map_err(map_api_error)?;
    Ok("{}".to_string())
}

/// 월 목표 확정
#[tauri::command(rename_all = "snake_case")]
pub async fn close_month(
    state: tauri::State<'_, AppState>,
    dept: String,
    year: i32,
    month: u32,
) -> Result<String, String> {
    state
        .standard_info_api
        .close_month(&dept, year, month)
        .map_err(map_api_error)?;
    Ok("{}".to_string())
}

/// 월 목표 확정 해제
#[tauri::command(rename_all = "snake_case")]
pub async fn reopen_month(
    state: tauri::State<'_, AppState>,
    dept: String,
    year: i32,
    month: u32,
) -> Result<String, String> {
    state
        .standard_info_api
        .reopen_month(&dept, year, month)
        .map_err(map_api_error)?;
    Ok("{}".to_string())
}

// ==========================================
// 프로젝트 명령
// ==========================================

/// 프로젝트 등록
#[tauri::command(rename_all = "snake_case")]
pub async fn create_project(
    state: tauri::State<'_, AppState>,
    project: String,
) -> Result<String, String> {
    let project: Project =
        serde_json::from_str(&project).map_err(|e| format!("역직렬화 실패: {}", e))?;
    state
        .project_api
        .create_project(&project)
        .map_err(map_api_error)?;
    Ok("{}".to_string())
}

/// 프로젝트 목록 조회
#[tauri::command(rename_all = "snake_case")]
pub async fn list_projects(
    state: tauri::State<'_, AppState>,
    include_archived: bool,
) -> Result<String, String> {
    let result = state
        .project_api
        .list_projects(include_archived)
        .map_err(map_api_error)?;
    to_json(&result)
}

/// 프로젝트 보관/복원
#[tauri::command(rename_all = "snake_case")]
pub async fn archive_project(
    state: tauri::State<'_, AppState>,
    code: String,
    archived: bool,
) -> Result<String, String> {
    state
        .project_api
        .set_archived(&code, archived)
        .map_err(map_api_error)?;
    Ok("{}".to_string())
}

/// 프로젝트 이슈 추가
#[tauri::command(rename_all = "snake_case")]
pub async fn append_project_issue(
    state: tauri::State<'_, AppState>,
    project_code: String,
    author: String,
    content: String,
    entry_type: String,
) -> Result<String, String> {
    let issue = state
        .project_api
        .append_issue(&project_code, &author, &content, &entry_type)
        .map_err(map_api_error)?;
    to_json(&issue)
}

/// 비용 집행 내역 추가
#[tauri::command(rename_all = "snake_case")]
pub async fn add_cost_record(
    state: tauri::State<'_, AppState>,
    project_code: String,
    exec_date: String,
    category: String,
    vendor: Option<String>,
    description: Option<String>,
    amount: i64,
) -> Result<String, String> {
    let exec_date = parse_date(&exec_date)?;
    let record = state
        .project_api
        .add_cost_record(
            &project_code,
            exec_date,
            &category,
            vendor.as_deref(),
            description.as_deref(),
            amount,
        )
        .map_err(map_api_error)?;
    to_json(&record)
}

/// 월별 비용 집행 내역 조회
#[tauri::command(rename_all = "snake_case")]
pub async fn list_cost_records(
    state: tauri::State<'_, AppState>,
    month: u32,
) -> Result<String, String> {
    let result = state
        .project_api
        .list_cost_records_by_month(month)
        .map_err(map_api_error)?;
    to_json(&result)
}

/// 프로젝트 수익성 시뮬레이션
#[tauri::command(rename_all = "snake_case")]
pub async fn simulate_project_profitability(
    state: tauri::State<'_, AppState>,
    project_code: String,
    labor: String,
) -> Result<String, String> {
    let labor: Vec<crate::engine::profitability::LaborInput> =
        serde_json::from_str(&labor).map_err(|e| format!("역직렬화 실패: {}", e))?;
    let result = state
        .project_api
        .simulate_profitability(&project_code, &labor)
        .map_err(map_api_error)?;
    to_json(&result)
}

// ==========================================
// 인력 배정 명령
// ==========================================

/// 배정 등록/갱신
#[tauri::command(rename_all = "snake_case")]
pub async fn upsert_assignment(
    state: tauri::State<'_, AppState>,
    assignment: String,
) -> Result<String, String> {
    let assignment: Assignment =
        serde_json::from_str(&assignment).map_err(|e| format!("역직렬화 실패: {}", e))?;
    let summary = state
        .allocation_api
        .upsert_assignment(&assignment)
        .map_err(map_api_error)?;
    to_json(&summary)
}

/// 배정 삭제
#[tauri::command(rename_all = "snake_case")]
pub async fn delete_assignment(
    state: tauri::State<'_, AppState>,
    employee_id: String,
    project_code: String,
    year: i32,
    month: u32,
) -> Result<String, String> {
    state
        .allocation_api
        .remove_assignment(&employee_id, &project_code, year, month)
        .map_err(map_api_error)?;
    Ok("{}".to_string())
}

/// 부서별 가동 현황 리포트
#[tauri::command(rename_all = "snake_case")]
pub async fn dept_utilization_report(
    state: tauri::State<'_, AppState>,
    year: i32,
    month: u32,
    eval_date: String,
) -> Result<String, String> {
    let eval_date = parse_date(&eval_date)?;
    let result = state
        .allocation_api
        .dept_utilization_report(year, month, eval_date)
        .map_err(map_api_error)?;
    to_json(&result)
}

// ==========================================
// 손익 리포트 명령
// ==========================================

/// 월간 손익 리포트
#[tauri::command(rename_all = "snake_case")]
pub async fn get_monthly_report(
    state: tauri::State<'_, AppState>,
    year: i32,
    month: u32,
    eval_date: String,
) -> Result<String, String> {
    let eval_date = parse_date(&eval_date)?;
    let result = state
        .report_api
        .monthly_report(year, month, eval_date)
        .map_err(map_api_error)?;
    to_json(&result)
}

/// 대시보드 KPI 요약
#[tauri::command(rename_all = "snake_case")]
pub async fn get_dashboard_summary(
    state: tauri::State<'_, AppState>,
    year: i32,
    month: u32,
    eval_date: String,
) -> Result<String, String> {
    let eval_date = parse_date(&eval_date)?;
    let result = state
        .report_api
        .dashboard_summary(year, month, eval_date)
        .map_err(map_api_error)?;
    to_json(&result)
}

// ==========================================
// 제안 리뷰 명령
// ==========================================

/// 제안 등록
#[tauri::command(rename_all = "snake_case")]
pub async fn create_proposal(
    state: tauri::State<'_, AppState>,
    title: String,
    client: String,
    budget: i64,
    due_date: Option<String>,
) -> Result<String, String> {
    let due_date = match due_date {
        Some(raw) => Some(parse_date(&raw)?),
        None => None,
    };
    let proposal = state
        .proposal_api
        .create_proposal(&title, &client, budget, due_date)
        .map_err(map_api_error)?;
    to_json(&proposal)
}

/// 제안 목록 조회
#[tauri::command(rename_all = "snake_case")]
pub async fn list_proposals(
    state: tauri::State<'_, AppState>,
    archived: bool,
) -> Result<String, String> {
    let result = state
        .proposal_api
        .list_proposals(archived)
        .map_err(map_api_error)?;
    to_json(&result)
}

/// 제안 내부 인력 배정 추가
#[tauri::command(rename_all = "snake_case")]
pub async fn add_proposal_allocation(
    state: tauri::State<'_, AppState>,
    proposal_id: String,
    employee_id: String,
    man_month: f64,
    cost_override: Option<i64>,
    eval_date: String,
) -> Result<String, String> {
    let eval_date = parse_date(&eval_date)?;
    let proposal = state
        .proposal_api
        .add_internal_allocation(&proposal_id, &employee_id, man_month, cost_override, eval_date)
        .map_err(map_api_error)?;
    to_json(&proposal)
}

/// 제안 코멘트 추가
#[tauri::command(rename_all = "snake_case")]
pub async fn add_proposal_comment(
    state: tauri::State<'_, AppState>,
    proposal_id: String,
    author: String,
    content: String,
    date: String,
) -> Result<String, String> {
    let date = parse_date(&date)?;
    let proposal = state
        .proposal_api
        .add_comment(&proposal_id, &author, &content, date)
        .map_err(map_api_error)?;
    to_json(&proposal)
}
