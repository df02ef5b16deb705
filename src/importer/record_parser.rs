// ==========================================
// 步数报告服务 - CSV 记录解析器
// ==========================================
// 输入: 分号分隔文本,首行为表头（丢弃）
// 输出: RecordSet 或 ValidationFailure
// 约束: 纯函数,无 I/O,同一输入结果确定
// ==========================================

use crate::domain::record::{Record, RecordSet};
use crate::importer::error::ValidationFailure;
use csv::{ReaderBuilder, StringRecord, Terminator};

/// 每条记录的字段数量（pp;kk;vvvv;askeleet）
pub const FIELDS_PER_RECORD: usize = 4;

/// 字段分隔符
pub const FIELD_DELIMITER: u8 = b';';

/// CSV 解析结果
pub type ConversionOutcome = Result<RecordSet, ValidationFailure>;

/// 解析 CSV 文本为记录集合
///
/// # 规则
/// 1. 行只以 `\n` 或 `\r\n` 结尾，单独的 `\r` 是普通字符
/// 2. 第 1 行为表头，无论内容如何（包括空行）都直接丢弃，不校验字段数
/// 3. 空行（包括末尾换行后的空行）跳过
/// 4. 先对所有数据行做字段数校验（必须为 4），任何一行不合格即返回 MalformedRecord
/// 5. 再按输入顺序做数值校验，第一个非数字字段返回 NonNumericField
/// 6. 不做范围校验（如月份 1-12）
pub fn parse(raw_text: &str) -> ConversionOutcome {
    // 阶段 1: 结构校验
    let mut rows: Vec<(usize, StringRecord)> = Vec::new();
    for (idx, raw_line) in raw_text.split('\n').enumerate().skip(1) {
        let line = idx + 1;
        let text = raw_line.strip_suffix('\r').unwrap_or(raw_line);

        let row = match split_fields(line, text)? {
            Some(row) if !is_blank_line(&row) => row,
            _ => continue,
        };

        if row.len() != FIELDS_PER_RECORD {
            return Err(ValidationFailure::MalformedRecord {
                line,
                fields: row.len(),
            });
        }

        rows.push((line, row));
    }

    // 阶段 2: 数值校验 + 构造记录
    let mut records = RecordSet::new();
    for (line, row) in &rows {
        records.push(build_record(*line, row)?);
    }

    Ok(records)
}

// 按分号拆分单行；行尾已由调用方处理，因此终止符只认 `\n`
fn split_fields(line: usize, text: &str) -> Result<Option<StringRecord>, ValidationFailure> {
    let mut reader = ReaderBuilder::new()
        .delimiter(FIELD_DELIMITER)
        .has_headers(false)
        .flexible(true) // 字段数由 parse 自行校验
        .quoting(false)
        .terminator(Terminator::Any(b'\n'))
        .from_reader(text.as_bytes());

    let mut row = StringRecord::new();
    match reader.read_record(&mut row) {
        Ok(true) => Ok(Some(row)),
        Ok(false) => Ok(None),
        // 分隔符为 ASCII 且关闭了引号处理，读取内存文本时基本不会出错；一旦出错按结构错误处理
        Err(_) => Err(ValidationFailure::MalformedRecord { line, fields: 0 }),
    }
}

/// 判断字段文本是否可转换为数字，并返回整数值
///
/// # 规则
/// - 去掉首尾空白后解析
/// - 十进制整数直接接受（允许 `+`/`-` 号）
/// - 小数/科学计数法仅在为有限值且无小数部分时接受（如 "1000.0"、"1e3"）
/// - 空串、NaN、inf、带小数部分的值均视为非数字
///
/// 注意: 空字段不按 0 处理，`01;;2022;1000` 返回 NonNumericField
pub fn numeric_value(text: &str) -> Option<i64> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(value) = trimmed.parse::<i64>() {
        return Some(value);
    }

    let value: f64 = trimmed.parse().ok()?;
    if !value.is_finite() || value.fract() != 0.0 || value.abs() >= i64::MAX as f64 {
        return None;
    }

    Some(value as i64)
}

// 只有一个空白字段的行视为空行
fn is_blank_line(row: &StringRecord) -> bool {
    row.len() == 1 && row.get(0).map_or(true, |field| field.trim().is_empty())
}

fn build_record(line: usize, row: &StringRecord) -> Result<Record, ValidationFailure> {
    let mut numbers = [0i64; FIELDS_PER_RECORD];

    for (idx, field) in row.iter().enumerate() {
        numbers[idx] =
            numeric_value(field).ok_or_else(|| ValidationFailure::NonNumericField {
                line,
                column: idx + 1,
                value: field.to_string(),
            })?;
    }

    // 日字段保留文本形式（前导零）
    let day = row.get(0).unwrap_or_default().trim().to_string();

    Ok(Record {
        day,
        month: numbers[1],
        year: numbers[2],
        steps: numbers[3],
    })
}
