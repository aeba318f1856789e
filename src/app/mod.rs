// ==========================================
// FrameInsight - 애플리케이션 계층
// ==========================================
// 책임: Tauri 통합, 프런트엔드와 백엔드 연결
// ==========================================

pub mod state;
pub mod tauri_commands;

// 재노출
pub use state::{get_default_db_path, AppState};

#[cfg(feature = "tauri-app")]
pub use tauri_commands::*;
