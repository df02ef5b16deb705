// ==========================================
// 步数报告服务 - 应用层
// ==========================================
// 职责: HTTP 集成,连接请求与各层
// ==========================================

pub mod handlers;
pub mod router;
pub mod state;

// 重导出
pub use router::build_router;
pub use state::AppState;
