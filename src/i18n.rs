// ==========================================
// 消息目录 (i18n) 模块
// ==========================================
// 使用 rust-i18n 库,固定语言 fi（locales/fi.yml）
// 所有面向用户的文本都从这里取
// ==========================================
// 注意: rust_i18n::i18n! 宏已在 lib.rs 中初始化
// ==========================================

/// 固定语言
pub const LOCALE: &str = "fi";

/// 翻译消息（无参数）
///
/// # 示例
/// ```no_run
/// use step_report::i18n::t;
/// let msg = t("upload.missing_file");
/// ```
pub fn t(key: &str) -> String {
    rust_i18n::t!(key, locale = LOCALE).to_string()
}

/// 翻译消息（带参数）
///
/// # 示例
/// ```no_run
/// use step_report::i18n::t_with_args;
/// let msg = t_with_args("report.format", &[("format", "csv")]);
/// ```
pub fn t_with_args(key: &str, args: &[(&str, &str)]) -> String {
    let mut result = t(key);
    for (k, v) in args {
        let placeholder = format!("%{{{}}}", k);
        result = result.replace(&placeholder, v);
    }
    result
}
