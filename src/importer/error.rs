// ==========================================
// 步数报告服务 - 导入模块错误类型
// ==========================================
// 工具: thiserror 派生宏
// 说明: 校验失败是返回值,不是异常;行号/列号仅用于日志
// ==========================================

use thiserror::Error;

/// 校验失败原因码
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureKind {
    /// 字段数量不是 4
    MalformedRecord,
    /// 字段无法转换为数字
    NonNumericField,
}

impl FailureKind {
    pub fn code(&self) -> &'static str {
        match self {
            FailureKind::MalformedRecord => "MALFORMED_RECORD",
            FailureKind::NonNumericField => "NON_NUMERIC_FIELD",
        }
    }
}

/// CSV 校验失败
///
/// 整批失败策略：任意一行不合法，整个文档作废（不返回部分结果）
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationFailure {
    #[error("字段数量错误 (行 {line}): 期望 4 个字段，实际 {fields} 个")]
    MalformedRecord { line: usize, fields: usize },

    #[error("非数字字段 (行 {line}, 列 {column}): {value:?}")]
    NonNumericField {
        line: usize,
        column: usize,
        value: String,
    },
}

impl ValidationFailure {
    pub fn kind(&self) -> FailureKind {
        match self {
            ValidationFailure::MalformedRecord { .. } => FailureKind::MalformedRecord,
            ValidationFailure::NonNumericField { .. } => FailureKind::NonNumericField,
        }
    }

    /// 出错的源文件行号（1 起始，含表头行）
    pub fn line(&self) -> usize {
        match self {
            ValidationFailure::MalformedRecord { line, .. }
            | ValidationFailure::NonNumericField { line, .. } => *line,
        }
    }
}

// ==========================================
// ImportError - 文档导入错误
// ==========================================
#[derive(Error, Debug)]
pub enum ImportError {
    #[error("文件读取失败: {0}")]
    FileReadError(String),

    #[error("文件编码错误: 不是有效的 UTF-8 文本")]
    InvalidEncoding,

    #[error("JSON 解析失败: {0}")]
    JsonParseError(String),

    #[error("CSV 校验失败: {0}")]
    Validation(#[from] ValidationFailure),
}

// 实现 From<std::io::Error>
impl From<std::io::Error> for ImportError {
    fn from(err: std::io::Error) -> Self {
        ImportError::FileReadError(err.to_string())
    }
}

// 实现 From<serde_json::Error>
impl From<serde_json::Error> for ImportError {
    fn from(err: serde_json::Error) -> Self {
        ImportError::JsonParseError(err.to_string())
    }
}

/// Result 类型别名
pub type ImportResult<T> = Result<T, ImportError>;
