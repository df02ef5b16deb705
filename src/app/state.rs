// ==========================================
// 步数报告服务 - 应用状态
// ==========================================
// 职责: 持有服务配置和各层实例
// 约定: 进程启动时构造一次,通过 axum State 传给处理函数,不可变
// ==========================================

use std::sync::Arc;

use crate::api::{ConversionOrchestrator, UploadGateway};
use crate::config::ServerConfig;

/// 应用状态
///
/// 克隆只复制 Arc,各请求共享同一份只读实例
#[derive(Clone)]
pub struct AppState {
    /// 服务配置
    pub config: Arc<ServerConfig>,

    /// 上传网关
    pub gateway: Arc<UploadGateway>,

    /// 转换编排器
    pub orchestrator: Arc<ConversionOrchestrator>,
}

impl AppState {
    /// 根据配置创建 AppState
    ///
    /// 不创建目录；目录由 `ServerConfig::prepare_dirs` 负责
    pub fn new(config: ServerConfig) -> Self {
        tracing::info!(
            staging_dir = %config.staging_dir.display(),
            archive_dir = %config.archive_dir.display(),
            "初始化AppState"
        );

        let gateway = UploadGateway::new(config.staging_dir.clone());
        let orchestrator = ConversionOrchestrator::new(config.archive_dir.clone());

        Self {
            config: Arc::new(config),
            gateway: Arc::new(gateway),
            orchestrator: Arc::new(orchestrator),
        }
    }
}
