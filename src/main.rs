use anyhow::{Context, Result};
use exam_extract::utils::logging;
use exam_extract::{App, Config};
use std::path::Path;

#[tokio::main]
async fn main() -> Result<()> {
    // 加载配置：CONFIG_FILE 指定时读 TOML，否则读环境变量
    let config = match std::env::var("CONFIG_FILE") {
        Ok(path) => Config::from_toml_file(Path::new(&path))
            .with_context(|| format!("无法加载配置文件: {}", path))?,
        Err(_) => Config::from_env(),
    };

    // 初始化日志
    logging::init(config.verbose_logging);

    // 初始化并运行应用
    App::initialize(config).await?.run().await?;

    Ok(())
}
