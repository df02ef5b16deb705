// ==========================================
// 步数报告服务 - 配置层
// ==========================================
// 职责: 进程启动时从环境变量构造服务配置
// 约定: 配置只构造一次,通过 AppState 传递,不使用全局单例
// ==========================================

pub mod server_config;

// 重导出核心配置
pub use server_config::{config_keys, ServerConfig};
