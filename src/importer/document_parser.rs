// ==========================================
// 步数报告服务 - 文档解析器实现
// ==========================================
// 支持: JSON（原样透传）/ CSV（记录解析 + 校验）
// ==========================================

use crate::domain::document::{DocumentFormat, RawDocument, ReportData};
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::record_parser;

/// UTF-8 BOM（Excel 导出的 CSV 常带）
const UTF8_BOM: char = '\u{feff}';

// ==========================================
// DocumentParser Trait
// ==========================================
// 用途: 文本 → 报告数据
// 实现者: CsvDocumentParser, JsonDocumentParser
pub trait DocumentParser: Send + Sync {
    fn parse_document(&self, text: &str) -> ImportResult<ReportData>;
}

// ==========================================
// CSV Parser 实现
// ==========================================
pub struct CsvDocumentParser;

impl DocumentParser for CsvDocumentParser {
    fn parse_document(&self, text: &str) -> ImportResult<ReportData> {
        let records = record_parser::parse(text)?;
        Ok(ReportData::Records(records))
    }
}

// ==========================================
// JSON Parser 实现
// ==========================================
// 不做结构校验,原样交给展示层
pub struct JsonDocumentParser;

impl DocumentParser for JsonDocumentParser {
    fn parse_document(&self, text: &str) -> ImportResult<ReportData> {
        let value: serde_json::Value = serde_json::from_str(text)?;
        Ok(ReportData::Document(value))
    }
}

// ==========================================
// 通用文档解析器（根据格式自动选择）
// ==========================================
pub struct UniversalDocumentParser;

impl UniversalDocumentParser {
    pub fn parse(&self, document: &RawDocument) -> ImportResult<ReportData> {
        match document.format {
            DocumentFormat::Csv => CsvDocumentParser.parse_document(&document.text),
            DocumentFormat::Json => JsonDocumentParser.parse_document(&document.text),
        }
    }
}

/// 字节 → 文本（要求 UTF-8,去掉开头的 BOM）
pub fn decode_text(bytes: Vec<u8>) -> ImportResult<String> {
    let text = String::from_utf8(bytes).map_err(|_| ImportError::InvalidEncoding)?;
    match text.strip_prefix(UTF8_BOM) {
        Some(rest) => Ok(rest.to_string()),
        None => Ok(text),
    }
}
