// ==========================================
// 步数报告服务 - 路由
// ==========================================

use axum::extract::DefaultBodyLimit;
use axum::routing::get;
use axum::Router;

use crate::app::handlers;
use crate::app::state::AppState;

/// 构建路由
///
/// - `GET /`               上传表单（`?virhe=<code>` 显示内联提示）
/// - `POST /upload`        上传并生成报告（`GET /upload` 重定向到 `/`）
/// - `GET /:format/:name`  下载归档原件（json/ csv/）
pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/", get(handlers::index_handler))
        .route(
            "/upload",
            get(handlers::upload_form_redirect).post(handlers::upload_handler),
        )
        .route("/:format/:name", get(handlers::archive_handler))
        .fallback(handlers::not_found_handler)
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}
