// ==========================================
// HTML 基础工具
// ==========================================

use crate::i18n::t;

const STYLE: &str = "body{font-family:sans-serif;max-width:48rem;margin:2rem auto;padding:0 1rem;color:#222}\
table{border-collapse:collapse;width:100%}\
th,td{border:1px solid #ccc;padding:.3rem .6rem;text-align:left}\
th{background:#f2f2f2}\
tfoot td{font-weight:bold}\
.notice{color:#a00}\
.meta{color:#666;font-size:.9rem}";

/// HTML 转义（文本节点和双引号属性值通用）
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// 页面骨架
///
/// `title` 会被转义,`body` 视为已渲染的 HTML
pub fn layout(title: &str, body: &str) -> String {
    format!(
        "<!doctype html><html lang=\"fi\"><head><meta charset=\"utf-8\">\
<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\
<title>{} - {}</title><style>{}</style></head><body>{}</body></html>",
        escape(title),
        escape(&t("app.name")),
        STYLE,
        body
    )
}
