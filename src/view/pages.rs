// ==========================================
// 页面渲染
// ==========================================
// index  - 上传表单（可带内联提示）
// report - 报告页（标题 + 格式 + 表格）
// error  - 错误页（固定消息）
// ==========================================

use crate::api::upload_api::UPLOAD_FIELD;
use crate::domain::document::{Report, ReportData};
use crate::domain::record::RecordSet;
use crate::i18n::{t, t_with_args};
use crate::view::html::{escape, layout};
use serde_json::{Map, Value};

/// 记录键名 → 消息目录键
const COLUMN_LABELS: [(&str, &str); 4] = [
    ("pp", "report.day"),
    ("kk", "report.month"),
    ("vvvv", "report.year"),
    ("askeleet", "report.steps"),
];

const STEPS_KEY: &str = "askeleet";

/// 上传表单
pub fn index_page(notice: Option<&str>) -> String {
    let notice_html = notice
        .map(|msg| format!("<p class=\"notice\">{}</p>", escape(msg)))
        .unwrap_or_default();

    let body = format!(
        "<h1>{title}</h1>{notice}<p>{intro}</p><p class=\"meta\">{hint}</p>\
<form action=\"/upload\" method=\"post\" enctype=\"multipart/form-data\">\
<label>{label} <input type=\"file\" name=\"{field}\" accept=\".json,.csv\"></label> \
<button type=\"submit\">{submit}</button></form>",
        title = escape(&t("upload.title")),
        notice = notice_html,
        intro = escape(&t("upload.intro")),
        hint = escape(&t("upload.csv_hint")),
        label = escape(&t("upload.file_label")),
        field = UPLOAD_FIELD,
        submit = escape(&t("upload.submit")),
    );

    layout(&t("upload.title"), &body)
}

/// 报告页
pub fn report_page(report: &Report) -> String {
    let heading = if report.heading.is_empty() {
        t("report.title")
    } else {
        report.heading.clone()
    };

    let generated_at = report.generated_at.format("%d.%m.%Y %H:%M").to_string();
    let table = match &report.data {
        ReportData::Records(records) => records_table(records),
        ReportData::Document(value) => document_view(value),
    };

    let body = format!(
        "<h1>{heading}</h1>\
<p class=\"meta\">{format} &middot; <a href=\"{url}\">{original}</a></p>\
{table}\
<p class=\"meta\">{footer}</p>\
<p><a href=\"/\">{back}</a></p>",
        heading = escape(&heading),
        format = escape(&t_with_args(
            "report.format",
            &[("format", report.format.as_str())]
        )),
        url = escape(&report.archive_url()),
        original = escape(&t("report.original")),
        table = table,
        footer = escape(&t_with_args("app.footer", &[("time", generated_at.as_str())])),
        back = escape(&t("error.back")),
    );

    layout(&heading, &body)
}

/// 错误页
pub fn error_page(message: &str) -> String {
    let body = format!(
        "<h1>{title}</h1><p class=\"notice\">{message}</p><p><a href=\"/\">{back}</a></p>",
        title = escape(&t("error.title")),
        message = escape(message),
        back = escape(&t("error.back")),
    );

    layout(&t("error.title"), &body)
}

// ==========================================
// 表格渲染
// ==========================================

fn records_table(records: &RecordSet) -> String {
    if records.is_empty() {
        return empty_notice();
    }

    let mut rows = String::new();
    for record in records {
        rows.push_str(&format!(
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
            escape(&record.day),
            record.month,
            record.year,
            record.steps
        ));
    }

    format!(
        "<table><thead><tr>{}</tr></thead><tbody>{}</tbody>\
<tfoot><tr><td colspan=\"3\">{}</td><td>{}</td></tr></tfoot></table>",
        header_cells(COLUMN_LABELS.iter().map(|(key, _)| *key)),
        rows,
        escape(&t("report.total")),
        records.total_steps()
    )
}

/// JSON 文档: 对象数组渲染为表格,其他结构原样格式化输出
fn document_view(value: &Value) -> String {
    let Some(rows) = object_rows(value) else {
        let pretty = serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string());
        return format!("<pre>{}</pre>", escape(&pretty));
    };

    if rows.is_empty() {
        return empty_notice();
    }

    // 列 = 所有对象键的并集,按首次出现顺序
    let mut columns: Vec<&str> = Vec::new();
    for row in &rows {
        for key in row.keys() {
            if !columns.contains(&key.as_str()) {
                columns.push(key.as_str());
            }
        }
    }

    let mut body = String::new();
    for row in &rows {
        body.push_str("<tr>");
        for column in &columns {
            body.push_str(&format!(
                "<td>{}</td>",
                escape(&cell_text(row.get(*column)))
            ));
        }
        body.push_str("</tr>");
    }

    let footer = match steps_total(&rows) {
        Some(total) if columns.len() > 1 => {
            let steps_idx = columns.iter().position(|c| *c == STEPS_KEY);
            let cells: String = (0..columns.len())
                .map(|idx| {
                    if Some(idx) == steps_idx {
                        format!("<td>{}</td>", total)
                    } else if idx == 0 {
                        format!("<td>{}</td>", escape(&t("report.total")))
                    } else {
                        "<td></td>".to_string()
                    }
                })
                .collect();
            format!("<tfoot><tr>{}</tr></tfoot>", cells)
        }
        _ => String::new(),
    };

    format!(
        "<table><thead><tr>{}</tr></thead><tbody>{}</tbody>{}</table>",
        header_cells(columns.iter().copied()),
        body,
        footer
    )
}

/// 顶层为数组且所有元素都是对象时返回对象列表
fn object_rows(value: &Value) -> Option<Vec<&Map<String, Value>>> {
    value.as_array()?.iter().map(Value::as_object).collect()
}

/// 步数列合计（该列存在且全部为整数时）
fn steps_total(rows: &[&Map<String, Value>]) -> Option<i64> {
    let mut total = 0i64;
    let mut seen = false;
    for row in rows {
        match row.get(STEPS_KEY) {
            Some(value) => {
                total = total.saturating_add(value.as_i64()?);
                seen = true;
            }
            None => continue,
        }
    }
    seen.then_some(total)
}

fn header_cells<'a>(keys: impl Iterator<Item = &'a str>) -> String {
    keys.map(|key| format!("<th>{}</th>", escape(&column_label(key))))
        .collect()
}

fn column_label(key: &str) -> String {
    COLUMN_LABELS
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, label)| t(label))
        .unwrap_or_else(|| key.to_string())
}

fn cell_text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

fn empty_notice() -> String {
    format!("<p>{}</p>", escape(&t("report.empty")))
}
