//! # Evo Scholar
//!
//! 一个自我改进的研究代理：检索最新 arXiv 摘要，让 LLM 起草一篇跨学科短论文，
//! 按固定规则评估后反复改写。
//!
//! ## 架构设计
//!
//! 本系统采用分层架构：
//!
//! ### ① 数据层（Models）
//! - `models/` - `PaperSummary` 与对话请求结构 `ChatExchange`
//!
//! ### ② 业务能力层（Services）
//! - `services/` - 描述"我能做什么"
//! - `ArxivSearch` - arXiv 检索能力
//! - `LlmService` - LLM 生成能力
//! - `CannedPapers` / `CannedGenerator` - 测试模式下的固定数据
//! - `DraftWriter` - 写 generated_paper.txt 能力
//!
//! ### ③ 流程层（Workflow）
//! - `workflow/` - 评估规则与 prompt 模板
//!
//! ### ④ 编排层（Orchestration）
//! - `orchestrator/research_agent` - 固定次数的生成/改写循环
//!
//! ## 模块结构

pub mod config;
pub mod error;
pub mod models;
pub mod orchestrator;
pub mod selftest;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use config::Config;
pub use error::{AppError, AppResult};
pub use models::{ChatExchange, PaperSummary};
pub use orchestrator::ResearchAgent;
pub use services::{extract_text, PaperSource, TextGenerator};
pub use workflow::{evaluate, refine_prompt};
