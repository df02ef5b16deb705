// ==========================================
// 步数报告服务 - 主入口
// ==========================================

use anyhow::Context;
use step_report::{build_router, logging, AppState, ServerConfig};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 初始化日志系统
    logging::init();

    tracing::info!("==================================================");
    tracing::info!("步数报告服务 版本: {}", step_report::VERSION);
    tracing::info!("==================================================");

    let config = ServerConfig::from_env();
    config
        .prepare_dirs()
        .await
        .context("无法创建暂存/归档目录")?;

    let addr = config.socket_addr();
    let app = build_router(AppState::new(config));

    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("无法监听 {}", addr))?;
    tracing::info!("服务已启动,监听 {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(wait_for_shutdown_signal())
        .await
        .context("服务异常退出")?;

    tracing::info!("服务已停止");
    Ok(())
}

async fn wait_for_shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};
        match (
            signal(SignalKind::terminate()),
            signal(SignalKind::interrupt()),
        ) {
            (Ok(mut sigterm), Ok(mut sigint)) => {
                tokio::select! {
                    _ = sigterm.recv() => {}
                    _ = sigint.recv() => {}
                }
            }
            _ => {
                tracing::error!("无法注册退出信号,仅响应 Ctrl-C");
                let _ = tokio::signal::ctrl_c().await;
            }
        }
    }
    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
    tracing::info!("收到退出信号,正在停止服务");
}
