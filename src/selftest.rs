//! 内置自检（`--test`）
//!
//! 全部在测试模式下运行，不访问网络

use std::path::PathBuf;

use tracing::{info, warn};

use crate::config::Config;
use crate::orchestrator::ResearchAgent;
use crate::services::canned::CANNED_PAPER;
use crate::services::extract_text;
use crate::workflow::evaluator::word_count;
use crate::workflow::{evaluate, DEFAULT_MAX_WORDS};

/// 单项检查结果
#[derive(Debug)]
pub struct CheckResult {
    pub name: &'static str,
    pub outcome: Result<(), String>,
}

/// 自检报告
#[derive(Debug, Default)]
pub struct SelfTestReport {
    pub results: Vec<CheckResult>,
}

impl SelfTestReport {
    pub fn failures(&self) -> usize {
        self.results.iter().filter(|r| r.outcome.is_err()).count()
    }

    pub fn all_passed(&self) -> bool {
        self.failures() == 0
    }

    fn record(&mut self, name: &'static str, outcome: Result<(), String>) {
        match &outcome {
            Ok(()) => println!("{} ... ok", name),
            Err(reason) => println!("{} ... FAILED: {}", name, reason),
        }
        self.results.push(CheckResult { name, outcome });
    }
}

/// 运行全部自检并在 stdout 输出结果
pub async fn run_self_tests() -> SelfTestReport {
    info!("🧪 运行自检");
    let mut report = SelfTestReport::default();

    report.record("extract_text_with_code_block", check_extract_with_block());
    report.record("extract_text_without_code_block", check_extract_without_block());
    report.record("evaluate_paper_success", check_evaluate_success());
    report.record("evaluate_paper_missing_sections", check_evaluate_missing());
    report.record("evaluate_paper_too_long", check_evaluate_too_long());
    report.record("refine_paper_returns_non_empty", check_refine().await);
    report.record("run_writes_canned_paper", check_full_run().await);

    let total = report.results.len();
    println!(
        "\nself-test result: {} passed; {} failed",
        total - report.failures(),
        report.failures()
    );
    if !report.all_passed() {
        warn!("⚠️ 自检失败 {}/{}", report.failures(), total);
    }
    report
}

fn expect_eq(actual: &str, expected: &str) -> Result<(), String> {
    if actual == expected {
        Ok(())
    } else {
        Err(format!("expected {:?}, got {:?}", expected, actual))
    }
}

fn expect_contains(haystack: &str, needle: &str) -> Result<(), String> {
    if haystack.contains(needle) {
        Ok(())
    } else {
        Err(format!("{:?} does not contain {:?}", haystack, needle))
    }
}

fn check_extract_with_block() -> Result<(), String> {
    let input = "Some text\n```python\nTitle: Test Paper\nAbstract: Test Abstract\n```";
    expect_eq(
        &extract_text(input),
        "Title: Test Paper\nAbstract: Test Abstract",
    )
}

fn check_extract_without_block() -> Result<(), String> {
    let input = "Title: Direct Text Paper\nAbstract: Direct Abstract";
    expect_eq(&extract_text(input), input)
}

fn check_evaluate_success() -> Result<(), String> {
    let paper = "Title: Test Research Paper\n\
                 Abstract: This is an abstract.\n\
                 Introduction: Intro here.\n\
                 Proposed Method: Method description.\n\
                 Conclusion: Final thoughts.";
    expect_contains(&evaluate(paper, DEFAULT_MAX_WORDS), "Success!")
}

fn check_evaluate_missing() -> Result<(), String> {
    let paper = "Title: Incomplete Paper\nAbstract: Missing sections.";
    expect_contains(
        &evaluate(paper, DEFAULT_MAX_WORDS),
        "Missing sections: Introduction:, Proposed Method:, Conclusion:.",
    )
}

fn check_evaluate_too_long() -> Result<(), String> {
    // 在完整论文后追加 max_words 个词，超出量即原文词数
    let paper = format!("{} {}", CANNED_PAPER, "filler ".repeat(DEFAULT_MAX_WORDS));
    expect_eq(
        &evaluate(&paper, DEFAULT_MAX_WORDS),
        &format!("Paper is too long by {} words.", word_count(CANNED_PAPER)),
    )
}

async fn check_refine() -> Result<(), String> {
    let agent = ResearchAgent::new(Config::test());
    let original = "Title: Original Paper\n\
                    Abstract: Original Abstract.\n\
                    Introduction: Some intro.\n\
                    Proposed Method: Some method.\n\
                    Conclusion: Some conclusion.";
    let feedback = "Paper is too long by 100 words. Missing sections: Results.";

    let refined = agent
        .refine_paper(original, feedback)
        .await
        .map_err(|e| e.to_string())?;

    if refined.is_empty() {
        return Err("refined paper is empty".to_string());
    }
    expect_contains(&refined, "Title:")?;
    expect_contains(&refined, "Abstract:")
}

async fn check_full_run() -> Result<(), String> {
    let output: PathBuf =
        std::env::temp_dir().join(format!("evo_scholar_selftest_{}.txt", std::process::id()));

    let mut config = Config::test();
    config.iterations = 1;
    config.output_file = output.to_string_lossy().into_owned();

    let agent = ResearchAgent::new(config);
    let result = agent.run().await.map_err(|e| e.to_string());
    let written = std::fs::read_to_string(&output).map_err(|e| e.to_string());
    let _ = std::fs::remove_file(&output);

    expect_eq(&result?, CANNED_PAPER)?;
    expect_eq(&written?, CANNED_PAPER)
}
