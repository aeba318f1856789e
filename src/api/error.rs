// ==========================================
// FrameInsight - API 계층 에러 타입
// ==========================================
// 책임: API 에러 정의, Repository 에러를 사용자 친화적 메시지로 변환
// 제약: 모든 에러 메시지는 명시적 원인을 포함한다
// ==========================================

use crate::repository::error::RepositoryError;
use thiserror::Error;

/// API 계층 에러 타입
#[derive(Error, Debug)]
pub enum ApiError {
    // ==========================================
    // 비즈니스 규칙 에러
    // ==========================================
    #[error("잘못된 입력: {0}")]
    InvalidInput(String),

    #[error("리소스 없음: {0}")]
    NotFound(String),

    #[error("비즈니스 규칙 위반: {0}")]
    BusinessRuleViolation(String),

    #[error("잘못된 상태 전이: from={from} to={to}")]
    InvalidStateTransition { from: String, to: String },

    // ==========================================
    // 데이터 접근 에러
    // ==========================================
    #[error("데이터베이스 오류: {0}")]
    DatabaseError(String),

    #[error("데이터베이스 연결 실패: {0}")]
    DatabaseConnectionError(String),

    #[error("데이터베이스 트랜잭션 실패: {0}")]
    DatabaseTransactionError(String),

    // ==========================================
    // 가져오기/검증 에러
    // ==========================================
    #[error("파일 가져오기 실패: {0}")]
    ImportError(String),

    #[error("데이터 검증 실패: {0}")]
    ValidationError(String),

    // ==========================================
    // 공통 에러
    // ==========================================
    #[error("내부 오류: {0}")]
    InternalError(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

// Repository 에러 변환
impl From<RepositoryError> for ApiError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound { entity, id } => {
                ApiError::NotFound(format!("{} (id={})", entity, id))
            }
            RepositoryError::DatabaseConnectionError(msg) => {
                ApiError::DatabaseConnectionError(msg)
            }
            RepositoryError::DatabaseTransactionError(msg) => {
                ApiError::DatabaseTransactionError(msg)
            }
            RepositoryError::BusinessRuleViolation(msg) => ApiError::BusinessRuleViolation(msg),
            RepositoryError::InvalidStateTransition { from, to } => {
                ApiError::InvalidStateTransition { from, to }
            }
            RepositoryError::ValidationError(msg) => ApiError::ValidationError(msg),
            RepositoryError::FieldValueError { field, message } => {
                ApiError::ValidationError(format!("{}: {}", field, message))
            }
            other => ApiError::DatabaseError(other.to_string()),
        }
    }
}

// 설정 계층(Box<dyn Error>) 변환
impl From<Box<dyn std::error::Error>> for ApiError {
    fn from(err: Box<dyn std::error::Error>) -> Self {
        ApiError::InternalError(err.to_string())
    }
}

/// Result 타입 별칭
pub type ApiResult<T> = Result<T, ApiError>;
