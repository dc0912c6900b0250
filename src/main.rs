use std::sync::Arc;

use anyhow::{Context, Result};
use guwen_annotate::utils::logging;
use guwen_annotate::{api, Config, GuwenService, LlmClient};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // 初始化日志
    logging::init();

    // 加载配置
    let config = Config::load().context("加载配置失败")?;
    logging::log_startup(&config);

    // 初始化服务
    let client = LlmClient::new(&config).context("初始化 LLM 客户端失败")?;
    let service = Arc::new(GuwenService::new(client, &config));
    let app = api::router(service);

    let addr = config.server.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("无法监听地址: {}", addr))?;
    info!("✓ 服务已启动: http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("服务异常退出")?;

    info!("服务已停止");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("无法监听退出信号: {}", e);
    }
}
