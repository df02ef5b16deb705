// ==========================================
// 步数报告服务 - API 层
// ==========================================
// 职责: 上传网关 + 转换编排 + 错误映射
// ==========================================

pub mod conversion_api;
pub mod error;
pub mod upload_api;

pub use conversion_api::{
    archive_file_name, derive_heading, ConversionError, ConversionOrchestrator, ConversionResult,
};
pub use error::{ApiError, ApiResult};
pub use upload_api::{
    check_file_name, StagedUpload, UploadError, UploadGateway, UploadResult, UPLOAD_FIELD,
};
