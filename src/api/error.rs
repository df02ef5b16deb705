// ==========================================
// 步数报告服务 - API层错误类型
// ==========================================
// 职责: 汇总上传/转换错误,映射为固定的用户消息和 HTTP 状态码
// 约定: 所有错误在请求边界处理,不允许让请求无响应
// ==========================================

use crate::api::conversion_api::ConversionError;
use crate::api::upload_api::UploadError;
use crate::i18n::t;
use crate::importer::{FailureKind, ImportError, ValidationFailure};
use axum::http::StatusCode;
use thiserror::Error;

/// API层错误类型
#[derive(Error, Debug)]
pub enum ApiError {
    // ==========================================
    // 上传错误
    // ==========================================
    #[error("文件格式不支持: {0}")]
    InvalidFormat(String),

    #[error("上传失败: {0}")]
    UploadRejected(String),

    #[error("文件缺失")]
    MissingFile,

    // ==========================================
    // 转换错误
    // ==========================================
    #[error("数据校验失败: {0}")]
    Validation(ValidationFailure),

    #[error("JSON 解析失败: {0}")]
    InvalidJson(String),

    // ==========================================
    // 通用错误
    // ==========================================
    #[error("资源未找到: {0}")]
    NotFound(String),

    #[error("内部错误: {0}")]
    InternalError(String),
}

impl ApiError {
    /// 错误码
    pub fn code(&self) -> &'static str {
        match self {
            ApiError::InvalidFormat(_) | ApiError::UploadRejected(_) => "UPLOAD_REJECTED",
            ApiError::MissingFile => "MISSING_FILE",
            ApiError::Validation(failure) => failure.kind().code(),
            ApiError::InvalidJson(_) => "INVALID_JSON",
            ApiError::NotFound(_) => "NOT_FOUND",
            ApiError::InternalError(_) => "INTERNAL",
        }
    }

    /// 面向用户的固定消息（来自消息目录,不含内部细节）
    pub fn user_message(&self) -> String {
        let key = match self {
            ApiError::InvalidFormat(_) => "upload.invalid_format",
            ApiError::UploadRejected(_) => "upload.failed",
            ApiError::MissingFile => "upload.missing_file",
            ApiError::Validation(failure) => match failure.kind() {
                FailureKind::MalformedRecord => "convert.malformed_record",
                FailureKind::NonNumericField => "convert.non_numeric_field",
            },
            ApiError::InvalidJson(_) => "convert.invalid_json",
            ApiError::NotFound(_) => "error.not_found",
            ApiError::InternalError(_) => "convert.failed",
        };
        t(key)
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidFormat(_) | ApiError::UploadRejected(_) => StatusCode::BAD_REQUEST,
            ApiError::MissingFile => StatusCode::OK,
            ApiError::Validation(_) | ApiError::InvalidJson(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// 提示码 → 用户消息；未知提示码返回 None（不回显任意文本）
    pub fn notice_for_code(code: &str) -> Option<String> {
        let key = match code {
            "missing_file" => "upload.missing_file",
            "upload_rejected" => "upload.failed",
            "invalid_format" => "upload.invalid_format",
            _ => return None,
        };
        Some(t(key))
    }
}

// ==========================================
// 从 UploadError 转换
// ==========================================
impl From<UploadError> for ApiError {
    fn from(err: UploadError) -> Self {
        match err {
            UploadError::MissingFile => ApiError::MissingFile,
            UploadError::UnsupportedExtension(name) => ApiError::InvalidFormat(name),
            UploadError::UnexpectedField(_)
            | UploadError::TooManyFiles
            | UploadError::Multipart(_) => ApiError::UploadRejected(err.to_string()),
            UploadError::Staging(msg) => ApiError::InternalError(msg),
        }
    }
}

// ==========================================
// 从 ConversionError 转换
// ==========================================
impl From<ConversionError> for ApiError {
    fn from(err: ConversionError) -> Self {
        match err {
            ConversionError::Archive(msg) => ApiError::InternalError(msg),
            ConversionError::Import(import) => import.into(),
        }
    }
}

impl From<ImportError> for ApiError {
    fn from(err: ImportError) -> Self {
        match err {
            ImportError::Validation(failure) => ApiError::Validation(failure),
            ImportError::JsonParseError(msg) => ApiError::InvalidJson(msg),
            ImportError::InvalidEncoding | ImportError::FileReadError(_) => {
                ApiError::InternalError(err.to_string())
            }
        }
    }
}

/// Result 类型别名
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upload_error_conversion() {
        let api_err: ApiError = UploadError::UnsupportedExtension("a.txt".to_string()).into();
        assert_eq!(api_err.code(), "UPLOAD_REJECTED");
        assert_eq!(api_err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            api_err.user_message(),
            "Virheellinen tiedostomuoto. Käytä ainoastaan JSON- tai CSV-tiedostoja."
        );

        let api_err: ApiError = UploadError::Multipart("stream error".to_string()).into();
        assert_eq!(api_err.code(), "UPLOAD_REJECTED");
        assert_eq!(api_err.user_message(), "Jotain meni vikaan");

        let api_err: ApiError = UploadError::TooManyFiles.into();
        assert_eq!(api_err.code(), "UPLOAD_REJECTED");

        let api_err: ApiError = UploadError::MissingFile.into();
        assert_eq!(api_err.code(), "MISSING_FILE");
        assert_eq!(api_err.status(), StatusCode::OK);
    }

    #[test]
    fn test_validation_messages() {
        let malformed: ApiError = ConversionError::Import(ImportError::Validation(
            ValidationFailure::MalformedRecord { line: 2, fields: 3 },
        ))
        .into();
        let non_numeric: ApiError = ConversionError::Import(ImportError::Validation(
            ValidationFailure::NonNumericField {
                line: 2,
                column: 2,
                value: "abc".to_string(),
            },
        ))
        .into();

        assert_eq!(malformed.code(), "MALFORMED_RECORD");
        assert_eq!(non_numeric.code(), "NON_NUMERIC_FIELD");
        assert_eq!(malformed.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_ne!(malformed.user_message(), non_numeric.user_message());
        // 用户消息不泄露行号等内部细节
        assert!(!non_numeric.user_message().contains("abc"));
    }

    #[test]
    fn test_invalid_json_and_internal() {
        let api_err: ApiError =
            ConversionError::Import(ImportError::JsonParseError("eof".to_string())).into();
        assert_eq!(api_err.code(), "INVALID_JSON");
        assert_eq!(api_err.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let api_err: ApiError = ConversionError::Archive("disk full".to_string()).into();
        assert_eq!(api_err.code(), "INTERNAL");
        assert_eq!(api_err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            api_err.user_message(),
            "Dataa ei voitu konvertoida. Jotain meni vikaan."
        );
    }

    #[test]
    fn test_notice_for_code() {
        assert_eq!(
            ApiError::notice_for_code("missing_file").as_deref(),
            Some("Virhe: tiedosto puuttuu")
        );
        assert_eq!(ApiError::notice_for_code("<script>"), None);
    }
}
