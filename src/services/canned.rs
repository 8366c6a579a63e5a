//! 测试模式下的固定数据实现

use async_trait::async_trait;
use tracing::debug;

use crate::error::AppResult;
use crate::models::PaperSummary;
use crate::services::provider::{PaperSource, TextGenerator};

/// 测试模式下生成服务的固定回复
pub const CANNED_PAPER: &str = "Title: Dummy Research Paper\n\
Abstract: This is a dummy abstract for testing purposes.\n\
Introduction: An introduction to the dummy paper.\n\
Proposed Method: A dummy method is proposed.\n\
Conclusion: The paper concludes with dummy insights.";

/// 忽略 prompt，始终返回 [`CANNED_PAPER`]
#[derive(Debug, Default, Clone, Copy)]
pub struct CannedGenerator;

#[async_trait]
impl TextGenerator for CannedGenerator {
    async fn generate(&self, prompt: &str) -> AppResult<String> {
        debug!("测试模式: 忽略 prompt ({} 字符)，返回固定论文", prompt.len());
        Ok(CANNED_PAPER.to_string())
    }
}

/// 返回固定论文列表，不访问网络
#[derive(Debug, Clone)]
pub struct CannedPapers {
    papers: Vec<PaperSummary>,
}

impl CannedPapers {
    pub fn new(papers: Vec<PaperSummary>) -> Self {
        Self { papers }
    }
}

impl Default for CannedPapers {
    fn default() -> Self {
        Self::new(vec![
            PaperSummary::new(
                "Dummy Paper on Quantum Biology",
                "A dummy abstract about coherence effects in photosynthesis.",
                "http://arxiv.org/abs/0000.00001v1",
            ),
            PaperSummary::new(
                "Dummy Paper on Neural Physics",
                "A dummy abstract about physics-informed neural networks.",
                "http://arxiv.org/abs/0000.00002v1",
            ),
        ])
    }
}

#[async_trait]
impl PaperSource for CannedPapers {
    async fn fetch(&self, query: &str, max_results: usize) -> AppResult<Vec<PaperSummary>> {
        debug!("测试模式: 检索 '{}' 返回固定论文", query);
        Ok(self.papers.iter().take(max_results).cloned().collect())
    }
}
