//! Prompt 模板

use crate::models::PaperSummary;

/// 根据检索到的论文构建首次生成的 prompt
pub fn initial_prompt(papers: &[PaperSummary]) -> String {
    let summaries = papers
        .iter()
        .map(PaperSummary::prompt_block)
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "Generate a new interdisciplinary research paper inspired by the following arXiv paper summaries:\n\
         {}\n\n\
         Your paper should be concise (under 500 words) and include the sections: Title, Abstract, \
         Introduction, Proposed Method, and Conclusion. Propose a novel concept by blending ideas from different STEM fields.",
        summaries
    )
}

/// 根据反馈构建改写 prompt，草稿与反馈原样嵌入
pub fn refine_prompt(draft: &str, feedback: &str) -> String {
    format!(
        "Refine the following research paper based on this feedback:\n{}\n\n\
         Paper:\n{}\n\n\
         Ensure the paper is concise (under 500 words), introduces a novel interdisciplinary concept \
         by blending ideas from different STEM fields, and includes the sections: Title, Abstract, \
         Introduction, Proposed Method, and Conclusion.",
        feedback, draft
    )
}
