use serde::{Deserialize, Serialize};

/// 检索得到的论文摘要
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaperSummary {
    pub title: String,
    /// 摘要，换行已替换为空格
    pub abstract_text: String,
    /// arXiv entry id（即论文链接）
    pub link: String,
}

impl PaperSummary {
    pub fn new(
        title: impl Into<String>,
        abstract_text: impl Into<String>,
        link: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            abstract_text: abstract_text.into(),
            link: link.into(),
        }
    }

    /// 用于拼接 prompt 的文本块
    pub fn prompt_block(&self) -> String {
        format!("Title: {}\nAbstract: {}", self.title, self.abstract_text)
    }
}
