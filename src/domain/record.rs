// ==========================================
// 步数报告服务 - 步数记录领域模型
// ==========================================
// 用途: CSV 解析层写入,展示层只读
// 对齐: 纯 JSON 上传文件使用的键名 (pp/kk/vvvv/askeleet)
// ==========================================

use serde::{Deserialize, Serialize};

// ==========================================
// Record - 单日步数记录
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// 日（保留原始文本，允许前导零，如 "01"）
    #[serde(rename = "pp")]
    pub day: String,

    /// 月
    #[serde(rename = "kk")]
    pub month: i64,

    /// 年
    #[serde(rename = "vvvv")]
    pub year: i64,

    /// 步数
    #[serde(rename = "askeleet")]
    pub steps: i64,
}

impl Record {
    pub fn new(day: impl Into<String>, month: i64, year: i64, steps: i64) -> Self {
        Self {
            day: day.into(),
            month,
            year,
            steps,
        }
    }
}

// ==========================================
// RecordSet - 有序记录集合
// ==========================================
// 顺序 = 输入行顺序,可为空
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordSet(Vec<Record>);

impl RecordSet {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn push(&mut self, record: Record) {
        self.0.push(record);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[Record] {
        &self.0
    }

    /// 总步数（饱和加法，超大输入不溢出）
    pub fn total_steps(&self) -> i64 {
        self.0
            .iter()
            .fold(0i64, |acc, record| acc.saturating_add(record.steps))
    }
}

impl From<Vec<Record>> for RecordSet {
    fn from(records: Vec<Record>) -> Self {
        Self(records)
    }
}

impl<'a> IntoIterator for &'a RecordSet {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
