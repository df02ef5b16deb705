// ==========================================
// 步数报告服务 - 请求处理函数
// ==========================================
// 流程: 上传网关 → 转换编排 → (CSV 记录解析) → 展示层
// 约定: 每个分支都显式渲染响应,请求不会无响应结束
// ==========================================

use std::time::Instant;

use axum::extract::multipart::MultipartRejection;
use axum::extract::{Multipart, Path, Query, State};
use axum::http::header;
use axum::response::{Html, IntoResponse, Redirect, Response};
use serde::Deserialize;
use uuid::Uuid;

use crate::api::{ApiError, ApiResult};
use crate::app::state::AppState;
use crate::domain::document::{DocumentFormat, Report};
use crate::view::{error_page, index_page, report_page};

/// 首页查询参数
#[derive(Debug, Default, Deserialize)]
pub struct IndexParams {
    /// 提示码（missing_file / upload_rejected / invalid_format）
    pub virhe: Option<String>,
}

// ==========================================
// GET /
// ==========================================
pub async fn index_handler(Query(params): Query<IndexParams>) -> Html<String> {
    let notice = params
        .virhe
        .as_deref()
        .and_then(ApiError::notice_for_code);
    Html(index_page(notice.as_deref()))
}

// ==========================================
// POST /upload
// ==========================================
pub async fn upload_handler(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Response {
    let started = Instant::now();

    let result = match multipart {
        Ok(mut multipart) => process_upload(&state, &mut multipart).await,
        Err(rejection) => Err(ApiError::UploadRejected(rejection.body_text())),
    };

    match result {
        Ok(report) => {
            tracing::info!(
                upload_id = %report.id,
                format = %report.format,
                elapsed_ms = started.elapsed().as_millis() as u64,
                "报告生成成功"
            );
            Html(report_page(&report)).into_response()
        }
        Err(err) => err.into_response(),
    }
}

async fn process_upload(state: &AppState, multipart: &mut Multipart) -> ApiResult<Report> {
    let staged = state.gateway.receive(multipart).await?;
    let report = state.orchestrator.convert(&staged).await?;
    Ok(report)
}

// ==========================================
// GET /:format/:name
// ==========================================
pub async fn archive_handler(
    State(state): State<AppState>,
    Path((format, name)): Path<(String, String)>,
) -> Response {
    match read_archived(&state, &format, &name).await {
        Ok((format, bytes)) => {
            ([(header::CONTENT_TYPE, format.content_type())], bytes).into_response()
        }
        Err(err) => err.into_response(),
    }
}

/// 只接受 `<uuid>.<format>` 形式的文件名,路径由 ID 重新拼接
async fn read_archived(
    state: &AppState,
    format: &str,
    name: &str,
) -> ApiResult<(DocumentFormat, Vec<u8>)> {
    let not_found = || ApiError::NotFound(format!("{}/{}", format, name));

    let format: DocumentFormat = format.parse().map_err(|_| not_found())?;
    let id = name
        .strip_suffix(&format!(".{}", format))
        .and_then(|stem| Uuid::parse_str(stem).ok())
        .ok_or_else(not_found)?;

    let path = state.orchestrator.archive_path(id, format);
    match tokio::fs::read(&path).await {
        Ok(bytes) => Ok((format, bytes)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(not_found()),
        Err(e) => Err(ApiError::InternalError(format!("{}: {}", path.display(), e))),
    }
}

// ==========================================
// 其他路径
// ==========================================
/// GET /upload（例如刷新结果页）重定向回上传表单
pub async fn upload_form_redirect() -> Redirect {
    Redirect::to("/")
}

pub async fn not_found_handler() -> Response {
    ApiError::NotFound("route".to_string()).into_response()
}

// ==========================================
// ApiError → HTML 响应
// ==========================================
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = self.user_message();

        match &self {
            ApiError::MissingFile => {
                tracing::info!(code = self.code(), "上传请求未包含文件");
                // 重新渲染上传表单并附带提示
                return (status, Html(index_page(Some(&message)))).into_response();
            }
            ApiError::Validation(failure) => {
                tracing::warn!(
                    code = self.code(),
                    line = failure.line(),
                    "CSV 校验失败: {}",
                    failure
                );
            }
            ApiError::InternalError(detail) => {
                tracing::error!(code = self.code(), "请求处理失败: {}", detail);
            }
            ApiError::NotFound(what) => {
                tracing::debug!(code = self.code(), "资源未找到: {}", what);
            }
            _ => {
                tracing::warn!(code = self.code(), "上传被拒绝: {}", self);
            }
        }

        (status, Html(error_page(&message))).into_response()
    }
}
