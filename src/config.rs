use std::str::FromStr;

use crate::error::{AppError, AppResult, ConfigError};

/// 程序配置
///
/// 构造后不再修改
#[derive(Clone, Debug)]
pub struct Config {
    /// 模型名称
    pub model: String,
    /// 改写迭代次数
    pub iterations: usize,
    /// 测试模式：不访问网络，使用固定数据
    pub test_mode: bool,
    // --- LLM 配置 ---
    pub api_key: String,
    pub api_base_url: String,
    // --- 检索配置 ---
    pub search_query: String,
    pub max_results: usize,
    pub arxiv_api_url: String,
    // --- 评估与输出 ---
    /// 论文字数上限
    pub max_words: usize,
    /// 输出文件
    pub output_file: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            model: "grok-2-latest".to_string(),
            iterations: 1,
            test_mode: false,
            api_key: String::new(),
            api_base_url: "https://api.x.ai/v1".to_string(),
            search_query: "interdisciplinary research AI biology physics".to_string(),
            max_results: 5,
            arxiv_api_url: "http://export.arxiv.org/api/query".to_string(),
            max_words: 500,
            output_file: "generated_paper.txt".to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> AppResult<Self> {
        let default = Self::default();
        Ok(Self {
            model: std::env::var("EVO_SCHOLAR_MODEL").unwrap_or(default.model),
            iterations: parse_env("EVO_SCHOLAR_ITERATIONS", default.iterations)?,
            test_mode: parse_env("EVO_SCHOLAR_TEST_MODE", default.test_mode)?,
            api_key: std::env::var("XAI_API_KEY").unwrap_or(default.api_key),
            api_base_url: std::env::var("EVO_SCHOLAR_API_BASE").unwrap_or(default.api_base_url),
            search_query: std::env::var("EVO_SCHOLAR_QUERY").unwrap_or(default.search_query),
            max_results: parse_env("EVO_SCHOLAR_MAX_RESULTS", default.max_results)?,
            arxiv_api_url: std::env::var("EVO_SCHOLAR_ARXIV_URL").unwrap_or(default.arxiv_api_url),
            max_words: default.max_words,
            output_file: std::env::var("EVO_SCHOLAR_OUTPUT").unwrap_or(default.output_file),
        })
    }

    /// 测试模式配置，不读取环境变量
    pub fn test() -> Self {
        Self {
            test_mode: true,
            ..Self::default()
        }
    }
}

fn parse_env<T: FromStr>(var_name: &str, default: T) -> AppResult<T> {
    match std::env::var(var_name) {
        Ok(value) => value.trim().parse::<T>().map_err(|_| {
            AppError::from(ConfigError::EnvVarParseFailed {
                var_name: var_name.to_string(),
                value,
                expected_type: std::any::type_name::<T>().to_string(),
            })
        }),
        Err(_) => Ok(default),
    }
}
