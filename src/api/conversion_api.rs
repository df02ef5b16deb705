// ==========================================
// 步数报告服务 - 转换编排
// ==========================================
// 职责: 暂存文件 → 归档副本 → 文本 → 报告数据 → 报告
// 归档: <archive>/<format>/<暂存ID>.<format>,只追加,不修改不删除
// ==========================================

use crate::api::upload_api::StagedUpload;
use crate::domain::document::{DocumentFormat, RawDocument, Report};
use crate::importer::{decode_text, ImportError, UniversalDocumentParser};
use chrono::Local;
use std::path::{Path, PathBuf};
use thiserror::Error;
use uuid::Uuid;

// ==========================================
// ConversionError - 转换错误
// ==========================================
#[derive(Error, Debug)]
pub enum ConversionError {
    #[error("归档失败: {0}")]
    Archive(String),

    #[error(transparent)]
    Import(#[from] ImportError),
}

/// Result 类型别名
pub type ConversionResult<T> = Result<T, ConversionError>;

// ==========================================
// ConversionOrchestrator - 转换编排器
// ==========================================
pub struct ConversionOrchestrator {
    archive_dir: PathBuf,
    parser: UniversalDocumentParser,
}

impl ConversionOrchestrator {
    pub fn new<P: Into<PathBuf>>(archive_dir: P) -> Self {
        Self {
            archive_dir: archive_dir.into(),
            parser: UniversalDocumentParser,
        }
    }

    pub fn archive_dir(&self) -> &Path {
        &self.archive_dir
    }

    /// 归档副本路径: `<archive>/<format>/<id>.<format>`
    pub fn archive_path(&self, id: Uuid, format: DocumentFormat) -> PathBuf {
        self.archive_dir
            .join(format.as_str())
            .join(archive_file_name(id, format))
    }

    /// 转换一个已暂存的上传文件
    ///
    /// # 流程
    /// 1. 复制暂存文件到归档目录
    /// 2. 读取归档副本（UTF-8）
    /// 3. JSON 原样解析 / CSV 记录解析 + 校验
    /// 4. 由原始文件名派生标题
    ///
    /// # 返回
    /// - Ok(Report): 报告
    /// - Err(ConversionError): 归档失败、读取失败、校验失败
    pub async fn convert(&self, upload: &StagedUpload) -> ConversionResult<Report> {
        let archived_path = self.archive_path(upload.id, upload.format);

        tokio::fs::copy(&upload.path, &archived_path)
            .await
            .map_err(|e| ConversionError::Archive(format!("{}: {}", archived_path.display(), e)))?;
        tracing::debug!(
            upload_id = %upload.id,
            path = %archived_path.display(),
            "上传文件已归档"
        );

        let bytes = tokio::fs::read(&archived_path)
            .await
            .map_err(ImportError::from)?;
        let document = RawDocument::new(upload.format, decode_text(bytes)?);
        let data = self.parser.parse(&document)?;

        Ok(Report {
            id: upload.id,
            heading: derive_heading(&upload.original_name),
            format: upload.format,
            data,
            archived_path,
            generated_at: Local::now(),
        })
    }
}

/// 归档文件名: `<id>.<format>`
pub fn archive_file_name(id: Uuid, format: DocumentFormat) -> String {
    format!("{}.{}", id, format)
}

/// 由原始文件名派生标题
///
/// 去掉最后一个扩展名,下划线替换为空格,首字母大写
/// 例: `maaliskuu_2022.json` → `Maaliskuu 2022`
pub fn derive_heading(original_name: &str) -> String {
    let stem = original_name
        .rsplit_once('.')
        .map(|(stem, _)| stem)
        .unwrap_or(original_name);
    let spaced = stem.replace('_', " ");
    let trimmed = spaced.trim();

    let mut chars = trimmed.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
