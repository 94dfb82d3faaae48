//! Machine Doctor - 机器故障预测服务
//!
//! 启动顺序: 配置 -> 日志 -> 数据库 -> 模型 -> HTTP

use std::sync::Arc;

use machine_doctor::application::DiagnosisPipeline;
use machine_doctor::config::{load_config, print_config, LogConfig};
use machine_doctor::infrastructure::adapters::load_models_or_degraded;
use machine_doctor::infrastructure::http::{AppState, HttpServer};
use machine_doctor::infrastructure::persistence::sqlite::{
    create_pool, run_migrations, DatabaseConfig, SqliteDiagnosisStore,
    SqliteFailureDetailRepository, SqliteMachineRepository, SqliteReadingRepository,
};

fn init_tracing(log: &LogConfig) {
    let log_filter = format!("{},machine_doctor={},tower_http=debug", log.level, log.level);
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_filter));

    if log.json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(env_filter)
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(env_filter).init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 加载配置（优先级：环境变量 > 配置文件 > 默认值）
    let config = load_config().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;

    init_tracing(&config.log);

    tracing::info!("Machine Doctor - 机器故障预测服务");
    print_config(&config);

    // 确保数据目录存在
    if let Some(parent) = std::path::Path::new(&config.database.path).parent() {
        tokio::fs::create_dir_all(parent).await?;
    }

    // 初始化数据库
    let db_config = DatabaseConfig {
        database_url: config.database.database_url(),
        max_connections: config.database.max_connections,
    };
    let pool = create_pool(&db_config).await?;
    run_migrations(&pool).await?;

    // 加载模型；缺失时以降级模式启动，预测接口返回 503
    let pipeline = Arc::new(DiagnosisPipeline::from_optional(
        load_models_or_degraded(&config.models).await,
    ));

    let state = AppState::new(
        pipeline,
        Arc::new(SqliteMachineRepository::new(pool.clone())),
        Arc::new(SqliteReadingRepository::new(pool.clone())),
        Arc::new(SqliteFailureDetailRepository::new(pool.clone())),
        Arc::new(SqliteDiagnosisStore::new(pool.clone())),
    );

    let server = HttpServer::new(config.server.clone(), state);

    // 启动服务器（带优雅关闭）
    server
        .run_with_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %e, "Failed to listen for shutdown signal");
                return;
            }
            tracing::info!("Received shutdown signal");
        })
        .await?;

    pool.close().await;
    tracing::info!("Server shutdown complete");

    Ok(())
}
