// ==========================================
// FrameInsight - 도메인 타입 정의
// ==========================================
// 책임: 전 계층이 공유하는 열거형 타입 정의
// 직렬화 형식: SCREAMING_SNAKE_CASE (데이터베이스와 일치)
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 고용 형태 (Employment Type)
// ==========================================
// 정규직은 연봉 계약, 프리랜서는 기간 계약을 보상 기준으로 사용한다
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EmploymentType {
    Regular,   // 정규직
    Freelance, // 프리랜서
}

impl EmploymentType {
    /// 한글 표기
    pub fn label_ko(&self) -> &'static str {
        match self {
            EmploymentType::Regular => "정규직",
            EmploymentType::Freelance => "프리랜서",
        }
    }

    /// 한글 표기 또는 코드 문자열을 파싱 (Excel/CSV 업로드 대응)
    pub fn parse_label(value: &str) -> Option<Self> {
        match value.trim() {
            "정규직" | "REGULAR" | "Regular" => Some(EmploymentType::Regular),
            "프리랜서" | "FREELANCE" | "Freelance" => Some(EmploymentType::Freelance),
            _ => None,
        }
    }
}

impl fmt::Display for EmploymentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EmploymentType::Regular => write!(f, "REGULAR"),
            EmploymentType::Freelance => write!(f, "FREELANCE"),
        }
    }
}

// ==========================================
// 기술 등급 (Tech Grade)
// ==========================================
// 초급/중급/고급/특급 - 견적 단가 산정의 기준 축
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TechGrade {
    Junior,       // 초급
    Intermediate, // 중급
    Senior,       // 고급
    Expert,       // 특급
}

impl TechGrade {
    pub fn label_ko(&self) -> &'static str {
        match self {
            TechGrade::Junior => "초급",
            TechGrade::Intermediate => "중급",
            TechGrade::Senior => "고급",
            TechGrade::Expert => "특급",
        }
    }

    pub fn parse_label(value: &str) -> Option<Self> {
        match value.trim() {
            "초급" | "JUNIOR" => Some(TechGrade::Junior),
            "중급" | "INTERMEDIATE" => Some(TechGrade::Intermediate),
            "고급" | "SENIOR" => Some(TechGrade::Senior),
            "특급" | "EXPERT" => Some(TechGrade::Expert),
            _ => None,
        }
    }
}

impl fmt::Display for TechGrade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TechGrade::Junior => write!(f, "JUNIOR"),
            TechGrade::Intermediate => write!(f, "INTERMEDIATE"),
            TechGrade::Senior => write!(f, "SENIOR"),
            TechGrade::Expert => write!(f, "EXPERT"),
        }
    }
}

// ==========================================
// 프로젝트 상태 (Project Status)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProjectStatus {
    Pending,    // 진행대기
    InProgress, // 진행중
    Completed,  // 완료
}

impl ProjectStatus {
    pub fn label_ko(&self) -> &'static str {
        match self {
            ProjectStatus::Pending => "진행대기",
            ProjectStatus::InProgress => "진행중",
            ProjectStatus::Completed => "완료",
        }
    }

    pub fn parse_label(value: &str) -> Option<Self> {
        match value.trim() {
            "진행대기" | "PENDING" => Some(ProjectStatus::Pending),
            "진행중" | "IN_PROGRESS" => Some(ProjectStatus::InProgress),
            "완료" | "COMPLETED" => Some(ProjectStatus::Completed),
            _ => None,
        }
    }
}

impl fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProjectStatus::Pending => write!(f, "PENDING"),
            ProjectStatus::InProgress => write!(f, "IN_PROGRESS"),
            ProjectStatus::Completed => write!(f, "COMPLETED"),
        }
    }
}

// ==========================================
// 월 마감 상태 (Close State)
// ==========================================
// 대기 → 진행 → 완료. 완료된 월의 목표는 관리자 재오픈 전까지 수정 불가
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CloseState {
    Open,       // 대기
    InProgress, // 진행
    Closed,     // 완료
}

impl fmt::Display for CloseState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CloseState::Open => write!(f, "OPEN"),
            CloseState::InProgress => write!(f, "IN_PROGRESS"),
            CloseState::Closed => write!(f, "CLOSED"),
        }
    }
}

// ==========================================
// 가동률 분류 (Utilization Class)
// ==========================================
// 진단용 분류. 초과 배정도 거부하지 않고 표시만 한다
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UtilizationClass {
    Idle,          // 유휴
    UnderUtilized, // 부분 가동
    FullyUtilized, // 완전 가동
    OverAllocated, // 초과 배정
}

impl fmt::Display for UtilizationClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UtilizationClass::Idle => write!(f, "IDLE"),
            UtilizationClass::UnderUtilized => write!(f, "UNDER_UTILIZED"),
            UtilizationClass::FullyUtilized => write!(f, "FULLY_UTILIZED"),
            UtilizationClass::OverAllocated => write!(f, "OVER_ALLOCATED"),
        }
    }
}

// ==========================================
// 손익 성적 (Profit Grade)
// ==========================================
// 이익률/기여율 경계는 포함(≥) 판정, 선언 순서대로 첫 매치 적용
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProfitGrade {
    S,
    A,
    B,
    C,
}

impl ProfitGrade {
    /// 랭킹 정렬용 가중치 (높을수록 상위)
    pub fn rank(&self) -> u8 {
        match self {
            ProfitGrade::S => 4,
            ProfitGrade::A => 3,
            ProfitGrade::B => 2,
            ProfitGrade::C => 1,
        }
    }
}

impl fmt::Display for ProfitGrade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProfitGrade::S => write!(f, "S"),
            ProfitGrade::A => write!(f, "A"),
            ProfitGrade::B => write!(f, "B"),
            ProfitGrade::C => write!(f, "C"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_employment_type_parse_label() {
        assert_eq!(
            EmploymentType::parse_label("정규직"),
            Some(EmploymentType::Regular)
        );
        assert_eq!(
            EmploymentType::parse_label(" 프리랜서 "),
            Some(EmploymentType::Freelance)
        );
        assert_eq!(EmploymentType::parse_label("계약직"), None);
    }

    #[test]
    fn test_grade_rank_ordering() {
        assert!(ProfitGrade::S.rank() > ProfitGrade::A.rank());
        assert!(ProfitGrade::A.rank() > ProfitGrade::B.rank());
        assert!(ProfitGrade::B.rank() > ProfitGrade::C.rank());
    }

    #[test]
    fn test_serde_screaming_snake_case() {
        let json = serde_json::to_string(&ProjectStatus::InProgress).unwrap();
        assert_eq!(json, "\"IN_PROGRESS\"");
        let back: ProjectStatus = serde_json::from_str("\"COMPLETED\"").unwrap();
        assert_eq!(back, ProjectStatus::Completed);
    }
}
