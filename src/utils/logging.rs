/// 日志工具模块
///
/// 提供日志初始化与格式化输出的辅助函数。
/// 日志写到 stderr，stdout 只留给反馈与终稿。
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::Config;

/// 初始化 tracing 日志
///
/// 默认级别 info，可通过 `RUST_LOG` 覆盖
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// 记录程序启动信息
///
/// # 参数
/// - `config`: 运行配置
pub fn log_startup(config: &Config) {
    info!("{}", "=".repeat(60));
    info!(
        "🚀 研究代理启动 - {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("🤖 模型: {}", config.model);
    info!("🔁 迭代次数: {}", config.iterations);
    if config.test_mode {
        info!("🧪 测试模式：不访问网络");
    }
    info!("{}", "=".repeat(60));
}

/// 记录单次迭代的评估结果
///
/// # 参数
/// - `iteration`: 当前迭代（从 1 开始）
/// - `total`: 迭代总数
/// - `feedback`: 评估反馈
pub fn log_iteration(iteration: usize, total: usize, feedback: &str) {
    info!("{}", "─".repeat(60));
    info!("📦 第 {}/{} 次迭代", iteration, total);
    info!("📋 评估: {}", feedback);
}

/// 记录流程结束
pub fn log_finished(output_path: &str) {
    info!("\n{}", "=".repeat(60));
    info!(
        "✅ 完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("终稿已保存至: {}", output_path);
    info!("{}", "=".repeat(60));
}

/// 截断长文本用于日志显示
///
/// # 参数
/// - `text`: 原始文本
/// - `max_len`: 最大长度（字符数）
///
/// # 返回
/// 返回截断后的文本
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}
