// ==========================================
// 步数报告服务 - 展示层
// ==========================================
// 职责: 上传表单 / 报告页 / 错误页的 HTML 渲染
// 红线: 只做模板替换,不含业务逻辑
// ==========================================

pub mod html;
pub mod pages;

pub use pages::{error_page, index_page, report_page};
