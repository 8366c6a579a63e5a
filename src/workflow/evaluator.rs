//! 论文评估
//!
//! 纯函数，只做字数与章节标记两项检查，永远返回一段反馈文本

/// 默认字数上限
pub const DEFAULT_MAX_WORDS: usize = 500;

/// 必须出现的章节标记，按此顺序报告缺失项
pub const REQUIRED_SECTIONS: [&str; 5] = [
    "Title:",
    "Abstract:",
    "Introduction:",
    "Proposed Method:",
    "Conclusion:",
];

/// 按空白切分的词数
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// 缺失的章节标记（子串匹配，不要求独占一行）
pub fn missing_sections(text: &str) -> Vec<&'static str> {
    REQUIRED_SECTIONS
        .iter()
        .copied()
        .filter(|section| !text.contains(section))
        .collect()
}

/// 评估论文，返回反馈
pub fn evaluate(text: &str, max_words: usize) -> String {
    let words = word_count(text);
    let mut feedback = String::new();

    if words > max_words {
        feedback.push_str(&format!(
            "Paper is too long by {} words. ",
            words - max_words
        ));
    }

    let missing = missing_sections(text);
    if !missing.is_empty() {
        feedback.push_str(&format!("Missing sections: {}. ", missing.join(", ")));
    }

    if feedback.is_empty() {
        return format!("Success! Paper length is {} words.", words);
    }
    feedback.trim_end().to_string()
}
