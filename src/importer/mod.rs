// ==========================================
// 步数报告服务 - 导入层
// ==========================================
// 职责: 上传文本 → 报告数据
// 支持: JSON, CSV
// ==========================================

// 模块声明
pub mod document_parser;
pub mod error;
pub mod record_parser;

// 重导出核心类型
pub use document_parser::{
    decode_text, CsvDocumentParser, DocumentParser, JsonDocumentParser, UniversalDocumentParser,
};
pub use error::{FailureKind, ImportError, ImportResult, ValidationFailure};
pub use record_parser::{numeric_value, parse, ConversionOutcome};
