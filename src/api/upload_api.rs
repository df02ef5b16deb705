// ==========================================
// 步数报告服务 - 上传网关
// ==========================================
// 职责: 接收单个上传文件,校验扩展名,写入暂存目录
// 约定: 扩展名取自原始文件名,不看 Content-Type
//       暂存文件名为生成的 UUID,与原始文件名无关
// ==========================================

use crate::domain::document::DocumentFormat;
use axum::body::Bytes;
use axum::extract::Multipart;
use std::path::{Path, PathBuf};
use thiserror::Error;
use uuid::Uuid;

/// 表单中的文件字段名
pub const UPLOAD_FIELD: &str = "tiedosto";

// ==========================================
// UploadError - 上传层错误
// ==========================================
#[derive(Error, Debug)]
pub enum UploadError {
    #[error("文件缺失")]
    MissingFile,

    #[error("文件格式不支持: {0}（仅支持 .json/.csv）")]
    UnsupportedExtension(String),

    #[error("意外的文件字段: {0}")]
    UnexpectedField(String),

    #[error("每次只能上传一个文件")]
    TooManyFiles,

    #[error("multipart 解析失败: {0}")]
    Multipart(String),

    #[error("暂存文件写入失败: {0}")]
    Staging(String),
}

/// Result 类型别名
pub type UploadResult<T> = Result<T, UploadError>;

// ==========================================
// StagedUpload - 已暂存的上传文件
// ==========================================
#[derive(Debug, Clone)]
pub struct StagedUpload {
    /// 暂存 ID（暂存文件名）
    pub id: Uuid,
    /// 原始文件名（已去掉客户端路径）
    pub original_name: String,
    pub format: DocumentFormat,
    /// 暂存文件路径
    pub path: PathBuf,
    /// 字节数
    pub size: usize,
}

/// 从 multipart 中取出的文件部分
#[derive(Debug)]
struct FilePart {
    file_name: String,
    bytes: Bytes,
}

// ==========================================
// UploadGateway - 上传网关
// ==========================================
#[derive(Debug, Clone)]
pub struct UploadGateway {
    staging_dir: PathBuf,
}

impl UploadGateway {
    pub fn new<P: Into<PathBuf>>(staging_dir: P) -> Self {
        Self {
            staging_dir: staging_dir.into(),
        }
    }

    pub fn staging_dir(&self) -> &Path {
        &self.staging_dir
    }

    /// 接收上传：取出唯一文件 → 校验扩展名 → 写入暂存目录
    ///
    /// # 返回
    /// - Ok(StagedUpload): 暂存成功
    /// - Err(UploadError): 缺少文件、扩展名不支持、表单错误、写入失败
    pub async fn receive(&self, multipart: &mut Multipart) -> UploadResult<StagedUpload> {
        let part = read_single_file(multipart).await?;
        self.stage(&part.file_name, part.bytes).await
    }

    /// 写入暂存目录
    ///
    /// 扩展名不合格时不写任何文件
    pub async fn stage(&self, original_name: &str, bytes: Bytes) -> UploadResult<StagedUpload> {
        let original_name = client_file_name(original_name);
        let format = check_file_name(&original_name)?;

        let id = Uuid::new_v4();
        let path = self.staging_dir.join(id.to_string());
        tokio::fs::write(&path, &bytes)
            .await
            .map_err(|e| UploadError::Staging(format!("{}: {}", path.display(), e)))?;

        tracing::info!(
            upload_id = %id,
            original_name = %original_name,
            format = %format,
            size = bytes.len(),
            "上传文件已暂存"
        );

        Ok(StagedUpload {
            id,
            original_name,
            format,
            path,
            size: bytes.len(),
        })
    }
}

/// 校验原始文件名的扩展名（json / csv）
pub fn check_file_name(file_name: &str) -> UploadResult<DocumentFormat> {
    DocumentFormat::from_file_name(file_name)
        .ok_or_else(|| UploadError::UnsupportedExtension(file_name.to_string()))
}

/// 去掉部分浏览器附带的客户端路径（如 `C:\Users\x\data.csv`）
pub fn client_file_name(raw: &str) -> String {
    raw.rsplit(|c: char| c == '/' || c == '\\').next().unwrap_or(raw).trim().to_string()
}

/// 从 multipart 中读取唯一的文件字段
///
/// - 非文件字段忽略
/// - 文件名为空的文件字段视为未选择文件
/// - 扩展名在读取内容之前校验
/// - 出错后继续读完剩余字段（不读内容）,再返回第一个错误
async fn read_single_file(multipart: &mut Multipart) -> UploadResult<FilePart> {
    let mut found: Option<FilePart> = None;
    let mut rejection: Option<UploadError> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| UploadError::Multipart(e.to_string()))?
    {
        if rejection.is_some() {
            continue;
        }

        let Some(file_name) = field.file_name().map(str::to_string) else {
            continue;
        };

        let field_name = field.name().unwrap_or_default().to_string();
        if field_name != UPLOAD_FIELD {
            rejection = Some(UploadError::UnexpectedField(field_name));
            continue;
        }

        if file_name.trim().is_empty() {
            continue;
        }

        if found.is_some() {
            rejection = Some(UploadError::TooManyFiles);
            continue;
        }

        if let Err(err) = check_file_name(&client_file_name(&file_name)) {
            rejection = Some(err);
            continue;
        }

        let bytes = field
            .bytes()
            .await
            .map_err(|e| UploadError::Multipart(e.to_string()))?;

        found = Some(FilePart { file_name, bytes });
    }

    if let Some(err) = rejection {
        return Err(err);
    }
    found.ok_or(UploadError::MissingFile)
}
