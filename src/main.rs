use anyhow::Result;
use pdf_batch_submit::utils::logging;
use pdf_batch_submit::{App, Config};

#[tokio::main]
async fn main() -> Result<()> {
    // 加载配置（PDF_CONFIG_FILE + 环境变量）
    let config = Config::load()?;

    // 初始化日志
    logging::init(config.verbose_logging);

    // 初始化并运行应用
    let stats = App::initialize(config).await?.run().await?;

    if stats.has_failures() {
        std::process::exit(1);
    }

    Ok(())
}
