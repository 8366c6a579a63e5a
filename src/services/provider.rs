//! 外部服务能力边界
//!
//! 检索与生成都只通过这两个 trait 暴露，测试模式下替换为固定数据实现

use async_trait::async_trait;

use crate::error::AppResult;
use crate::models::PaperSummary;

/// 论文检索能力
#[async_trait]
pub trait PaperSource: Send + Sync {
    /// 按提交时间倒序返回最多 `max_results` 篇论文
    async fn fetch(&self, query: &str, max_results: usize) -> AppResult<Vec<PaperSummary>>;
}

/// 文本生成能力
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> AppResult<String>;
}
