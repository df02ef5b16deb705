// ==========================================
// 步数报告服务 - 核心库
// ==========================================
// 技术栈: axum + tokio + csv
// 系统定位: 上传 JSON/CSV 步数数据,校验并生成报告页面
// ==========================================

// 初始化消息目录（固定 fi 语言）
rust_i18n::i18n!("locales", fallback = "fi");

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 导入层 - CSV 记录解析 / JSON 解析
pub mod importer;

// 配置层 - 服务配置
pub mod config;

// 日志系统
pub mod logging;

// 消息目录
pub mod i18n;

// API 层 - 上传网关 / 转换编排 / 错误映射
pub mod api;

// 展示层 - HTML 渲染
pub mod view;

// 应用层 - HTTP 集成
pub mod app;

// ==========================================
// 重导出核心类型
// ==========================================

pub use domain::{DocumentFormat, RawDocument, Record, RecordSet, Report, ReportData};
pub use importer::{parse, ConversionOutcome, FailureKind, ValidationFailure};
pub use config::ServerConfig;
pub use api::{ApiError, ConversionOrchestrator, UploadGateway};
pub use app::{build_router, AppState};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
