//! 流程层：评估规则与 prompt 模板

pub mod evaluator;
pub mod prompts;

pub use evaluator::{evaluate, DEFAULT_MAX_WORDS, REQUIRED_SECTIONS};
pub use prompts::{initial_prompt, refine_prompt};
