// ==========================================
// 步数报告服务 - 领域模型层
// ==========================================
// 职责: 定义上传文档、步数记录、报告等领域实体
// 红线: 不含 I/O 逻辑,不含 HTTP 逻辑
// ==========================================

pub mod document;
pub mod record;

// 重导出核心类型
pub use document::{DocumentFormat, RawDocument, Report, ReportData};
pub use record::{Record, RecordSet};
