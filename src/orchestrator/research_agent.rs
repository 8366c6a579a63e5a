//! 研究代理 - 编排层
//!
//! ## 职责
//!
//! 本模块是整个应用的入口，按固定次数驱动"检索 → 生成 → 评估 → 改写"流程。
//!
//! ## 流程
//!
//! 1. **检索**：取最新的 arXiv 论文摘要
//! 2. **生成**：用摘要构建 prompt，得到初稿
//! 3. **迭代**（共 `iterations` 次）：写文件 → 评估 → 输出反馈 → 改写
//! 4. **收尾**：输出终稿并写文件
//!
//! 评估成功不会提前结束循环。

use tracing::info;

use crate::config::Config;
use crate::error::AppResult;
use crate::models::PaperSummary;
use crate::services::{
    ArxivSearch, CannedGenerator, CannedPapers, DraftWriter, LlmService, PaperSource,
    TextGenerator,
};
use crate::utils::logging::{log_finished, log_iteration, log_startup, truncate_text};
use crate::workflow::{evaluate, initial_prompt, refine_prompt};

/// 研究代理
pub struct ResearchAgent {
    config: Config,
    source: Box<dyn PaperSource>,
    generator: Box<dyn TextGenerator>,
    writer: DraftWriter,
}

impl ResearchAgent {
    /// 按配置选择服务实现：测试模式使用固定数据，否则访问 arXiv 与 LLM
    pub fn new(config: Config) -> Self {
        let (source, generator): (Box<dyn PaperSource>, Box<dyn TextGenerator>) =
            if config.test_mode {
                (Box::new(CannedPapers::default()), Box::new(CannedGenerator))
            } else {
                (
                    Box::new(ArxivSearch::new(&config)),
                    Box::new(LlmService::new(&config)),
                )
            };
        Self::with_services(config, source, generator)
    }

    /// 使用自定义服务实现创建
    pub fn with_services(
        config: Config,
        source: Box<dyn PaperSource>,
        generator: Box<dyn TextGenerator>,
    ) -> Self {
        let writer = DraftWriter::with_path(&config.output_file);
        Self {
            config,
            source,
            generator,
            writer,
        }
    }

    /// 检索最新论文
    pub async fn fetch_latest_papers(&self) -> AppResult<Vec<PaperSummary>> {
        self.source
            .fetch(&self.config.search_query, self.config.max_results)
            .await
    }

    /// 生成论文
    pub async fn generate_paper(&self, prompt: &str) -> AppResult<String> {
        info!("📝 生成论文，prompt: {}", truncate_text(prompt, 80));
        self.generator.generate(prompt).await
    }

    /// 评估论文
    pub fn evaluate_paper(&self, draft: &str) -> String {
        evaluate(draft, self.config.max_words)
    }

    /// 根据反馈改写论文
    pub async fn refine_paper(&self, draft: &str, feedback: &str) -> AppResult<String> {
        self.generate_paper(&refine_prompt(draft, feedback)).await
    }

    /// 运行完整流程，返回终稿
    pub async fn run(&self) -> AppResult<String> {
        log_startup(&self.config);

        let papers = self.fetch_latest_papers().await?;
        info!("✓ 检索到 {} 篇论文", papers.len());
        for paper in &papers {
            info!("  - {} ({})", truncate_text(&paper.title, 60), paper.link);
        }

        let mut draft = self.generate_paper(&initial_prompt(&papers)).await?;

        for iteration in 1..=self.config.iterations {
            self.writer.write(&draft).await?;

            let feedback = self.evaluate_paper(&draft);
            log_iteration(iteration, self.config.iterations, &feedback);
            println!("Iteration {} feedback: {}", iteration, feedback);

            draft = self.refine_paper(&draft, &feedback).await?;
        }

        println!("\nFinal Version of the Paper:");
        println!("{}", draft);
        self.writer.write(&draft).await?;

        log_finished(self.writer.path());
        Ok(draft)
    }
}
