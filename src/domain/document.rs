// ==========================================
// 步数报告服务 - 上传文档领域模型
// ==========================================
// 职责: 文档格式识别、原始文档、报告实体
// 格式识别: 只信任原始文件名后缀,不信任 Content-Type
//           （CSV 的 Content-Type 在不同浏览器间不一致，如 vnd.ms-excel）
// ==========================================

use crate::domain::record::RecordSet;
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use uuid::Uuid;

// ==========================================
// DocumentFormat - 文档格式
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentFormat {
    Json,
    Csv,
}

impl DocumentFormat {
    pub const ALL: [DocumentFormat; 2] = [DocumentFormat::Json, DocumentFormat::Csv];

    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentFormat::Json => "json",
            DocumentFormat::Csv => "csv",
        }
    }

    /// 原始文件名的最后一个后缀（小写）
    ///
    /// 无后缀或后缀为空时返回 None
    pub fn extension_of(file_name: &str) -> Option<String> {
        let (_, ext) = file_name.rsplit_once('.')?;
        if ext.is_empty() {
            return None;
        }
        Some(ext.to_ascii_lowercase())
    }

    /// 根据原始文件名识别格式
    pub fn from_file_name(file_name: &str) -> Option<Self> {
        Self::extension_of(file_name).and_then(|ext| ext.parse().ok())
    }

    /// 归档文件下载时使用的 Content-Type
    pub fn content_type(&self) -> &'static str {
        match self {
            DocumentFormat::Json => "application/json",
            DocumentFormat::Csv => "text/csv; charset=utf-8",
        }
    }
}

impl fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DocumentFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(DocumentFormat::Json),
            "csv" => Ok(DocumentFormat::Csv),
            other => Err(format!("unsupported document format: {}", other)),
        }
    }
}

// ==========================================
// RawDocument - 原始上传文档
// ==========================================
// 生命周期: 单次请求内有效
#[derive(Debug, Clone)]
pub struct RawDocument {
    pub format: DocumentFormat,
    pub text: String,
}

impl RawDocument {
    pub fn new(format: DocumentFormat, text: impl Into<String>) -> Self {
        Self {
            format,
            text: text.into(),
        }
    }
}

// ==========================================
// ReportData - 报告数据
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ReportData {
    /// CSV 转换后的记录集合
    Records(RecordSet),
    /// JSON 原样透传
    Document(serde_json::Value),
}

// ==========================================
// Report - 报告（展示层输入）
// ==========================================
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    /// 暂存 ID（同时是归档文件名主体）
    pub id: Uuid,
    /// 由原始文件名派生的标题
    pub heading: String,
    pub format: DocumentFormat,
    pub data: ReportData,
    /// 归档副本路径
    pub archived_path: PathBuf,
    pub generated_at: DateTime<Local>,
}

impl Report {
    /// 归档副本的下载地址（相对路径）
    pub fn archive_url(&self) -> String {
        format!("/{}/{}.{}", self.format, self.id, self.format)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_file_name() {
        assert_eq!(
            DocumentFormat::from_file_name("maaliskuu_2022.json"),
            Some(DocumentFormat::Json)
        );
        assert_eq!(
            DocumentFormat::from_file_name("huhtikuu_2022.CSV"),
            Some(DocumentFormat::Csv)
        );
        assert_eq!(DocumentFormat::from_file_name("notes.txt"), None);
        assert_eq!(DocumentFormat::from_file_name("csv"), None);
        assert_eq!(DocumentFormat::from_file_name("trailing."), None);
    }

    #[test]
    fn test_last_suffix_wins() {
        // 只看最后一个后缀
        assert_eq!(DocumentFormat::from_file_name("data.csv.txt"), None);
        assert_eq!(
            DocumentFormat::from_file_name("backup.2022.csv"),
            Some(DocumentFormat::Csv)
        );
    }

    #[test]
    fn test_extension_of() {
        assert_eq!(DocumentFormat::extension_of("a.TxT"), Some("txt".to_string()));
        assert_eq!(DocumentFormat::extension_of("noext"), None);
        assert_eq!(DocumentFormat::extension_of(".csv"), Some("csv".to_string()));
    }

    #[test]
    fn test_display_and_parse() {
        for format in DocumentFormat::ALL {
            let parsed: DocumentFormat = format.to_string().parse().unwrap();
            assert_eq!(parsed, format);
        }
        assert!("xlsx".parse::<DocumentFormat>().is_err());
    }
}
