// ==========================================
// FrameInsight - API 계층
// ==========================================
// 책임: 비즈니스 API 인터페이스 제공, Tauri 명령에서 호출
// ==========================================

pub mod allocation_api;
pub mod error;
pub mod hr_api;
pub mod import_api;
pub mod project_api;
pub mod proposal_api;
pub mod report_api;
pub mod standard_info_api;

// 핵심 타입 재노출
pub use allocation_api::{AllocationApi, DeptUtilization, PersonUtilization};
pub use error::{ApiError, ApiResult};
pub use hr_api::{EmployeeWithCost, HrApi};
pub use import_api::ImportApi;
pub use project_api::ProjectApi;
pub use proposal_api::ProposalApi;
pub use report_api::{DashboardSummary, DeptRanking, DeptReportRow, MonthlyReport, ReportApi};
pub use standard_info_api::StandardInfoApi;
