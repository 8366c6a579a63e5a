//! 编排层（Orchestration Layer）
//!
//! ## 职责
//!
//! 本层负责流程调度，是整个系统的"指挥中心"。
//!
//! ## 层次关系
//!
//! ```text
//! research_agent (固定次数的生成/改写循环)
//!     ↓
//! workflow (评估、prompt 模板)
//!     ↓
//! services (能力层：arXiv 检索 / LLM 生成 / 草稿写入)
//! ```
//!
//! ## 设计原则
//!
//! 1. **单线程顺序执行**：所有外部调用依次 await，不 spawn 任务
//! 2. **向下依赖**：编排层 → workflow → services
//! 3. **无业务判断**：评估结果只用于输出和改写，不影响循环次数

pub mod research_agent;

pub use research_agent::ResearchAgent;
