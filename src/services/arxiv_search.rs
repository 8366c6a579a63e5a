//! 论文检索服务 - 业务能力层
//!
//! 只负责"检索 arXiv"能力，不关心流程

use std::sync::OnceLock;

use async_trait::async_trait;
use regex::{Captures, Regex};
use tracing::{debug, warn};

use crate::config::Config;
use crate::error::{AppError, AppResult, SearchError};
use crate::models::PaperSummary;
use crate::services::provider::PaperSource;

/// arXiv 检索服务
///
/// 职责：
/// - 发送一次检索请求（按提交时间倒序）
/// - 解析 Atom feed 为 [`PaperSummary`] 列表
/// - 不重试，错误原样向上抛出
pub struct ArxivSearch {
    client: reqwest::Client,
    api_url: String,
}

impl ArxivSearch {
    pub fn new(config: &Config) -> Self {
        Self::with_url(&config.arxiv_api_url)
    }

    /// 使用自定义接口地址创建
    pub fn with_url(api_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_url: api_url.into(),
        }
    }
}

#[async_trait]
impl PaperSource for ArxivSearch {
    async fn fetch(&self, query: &str, max_results: usize) -> AppResult<Vec<PaperSummary>> {
        if max_results == 0 {
            debug!("max_results 为 0，跳过检索");
            return Ok(Vec::new());
        }

        debug!("arXiv 检索: '{}' (最多 {} 篇)", query, max_results);

        let max_results = max_results.to_string();
        let response = self
            .client
            .get(&self.api_url)
            .query(&[
                ("search_query", query),
                ("start", "0"),
                ("max_results", max_results.as_str()),
                ("sortBy", "submittedDate"),
                ("sortOrder", "descending"),
            ])
            .send()
            .await
            .map_err(|e| {
                warn!("arXiv 请求失败: {}", e);
                AppError::search_request_failed(&self.api_url, e)
            })?;

        let status = response.status();
        if !status.is_success() {
            warn!("arXiv 返回状态码 {}", status);
            return Err(SearchError::BadStatus {
                endpoint: self.api_url.clone(),
                status,
            }
            .into());
        }

        let body = response
            .text()
            .await
            .map_err(|e| AppError::search_request_failed(&self.api_url, e))?;

        let papers = parse_feed(&body, &self.api_url)?;
        debug!("arXiv 返回 {} 篇论文", papers.len());
        Ok(papers)
    }
}

/// 解析 arXiv Atom feed，保持原有顺序
pub fn parse_feed(xml: &str, endpoint: &str) -> AppResult<Vec<PaperSummary>> {
    if !xml.contains("<feed") {
        return Err(SearchError::MalformedFeed {
            endpoint: endpoint.to_string(),
        }
        .into());
    }

    let mut papers = Vec::new();
    for entry in extract_blocks(xml, "entry") {
        match parse_entry(entry) {
            Some(paper) => papers.push(paper),
            None => warn!("跳过缺少 id 或 title 的 entry"),
        }
    }
    Ok(papers)
}

fn parse_entry(entry: &str) -> Option<PaperSummary> {
    let link = tag_text(entry, "id")?;
    let title = tag_text(entry, "title")?;
    let summary = tag_text(entry, "summary").unwrap_or_default();

    Some(PaperSummary {
        title: normalize_whitespace(&title),
        abstract_text: collapse_newlines(&summary),
        link: link.trim().to_string(),
    })
}

/// 取出所有 `<tag ...>...</tag>` 的内部文本
fn extract_blocks<'a>(xml: &'a str, tag: &str) -> Vec<&'a str> {
    let open = format!("<{}", tag);
    let close = format!("</{}>", tag);
    let mut blocks = Vec::new();
    let mut rest = xml;

    while let Some(start) = rest.find(&open) {
        let after_name = &rest[start + open.len()..];
        // 排除 <entryfoo> 这类前缀相同的标签
        if !after_name.starts_with(&['>', ' ', '\n', '\t', '\r'][..]) {
            rest = after_name;
            continue;
        }
        let Some(open_end) = after_name.find('>') else {
            break;
        };
        let body = &after_name[open_end + 1..];
        let Some(end) = body.find(&close) else {
            break;
        };
        blocks.push(&body[..end]);
        rest = &body[end + close.len()..];
    }

    blocks
}

/// 第一个 `<tag>` 的文本内容（已解码实体）
fn tag_text(xml: &str, tag: &str) -> Option<String> {
    extract_blocks(xml, tag)
        .into_iter()
        .next()
        .map(unescape_xml)
}

/// 命名实体与数字字符引用，一次扫描完成，避免 `&amp;lt;` 被解码两次
const ENTITY_PATTERN: &str = r"&(lt|gt|quot|apos|amp|#[xX][0-9a-fA-F]+|#[0-9]+);";

fn entity() -> Option<&'static Regex> {
    static ENTITY: OnceLock<Option<Regex>> = OnceLock::new();
    ENTITY.get_or_init(|| Regex::new(ENTITY_PATTERN).ok()).as_ref()
}

fn unescape_xml(text: &str) -> String {
    let Some(re) = entity() else {
        return text.to_string();
    };

    re.replace_all(text, |caps: &Captures| {
        let name = &caps[1];
        let decoded = match name {
            "lt" => Some('<'),
            "gt" => Some('>'),
            "quot" => Some('"'),
            "apos" => Some('\''),
            "amp" => Some('&'),
            _ => {
                let code = match name.strip_prefix("#x").or_else(|| name.strip_prefix("#X")) {
                    Some(hex) => u32::from_str_radix(hex, 16).ok(),
                    None => name[1..].parse::<u32>().ok(),
                };
                code.and_then(char::from_u32)
            }
        };
        // 无效码点保持原样
        decoded.map_or_else(|| caps[0].to_string(), String::from)
    })
    .into_owned()
}

/// 标题：所有空白（含换行缩进）压缩为单个空格
fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// 摘要：去掉首尾空白，换行替换为空格
fn collapse_newlines(text: &str) -> String {
    text.trim().replace('\n', " ")
}
