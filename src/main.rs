use anyhow::Result;
use evo_scholar::selftest::run_self_tests;
use evo_scholar::utils::logging;
use evo_scholar::{Config, ResearchAgent};

#[tokio::main]
async fn main() -> Result<()> {
    // 初始化日志
    logging::init();

    // --test: 运行内置自检
    if std::env::args().skip(1).any(|arg| arg == "--test") {
        let report = run_self_tests().await;
        if !report.all_passed() {
            std::process::exit(1);
        }
        return Ok(());
    }

    // 加载配置
    let config = Config::from_env()?;

    // 运行代理
    ResearchAgent::new(config).run().await?;

    Ok(())
}
