use thiserror::Error;

/// 应用程序错误类型
#[derive(Debug, Error)]
pub enum AppError {
    /// 论文检索错误
    #[error("检索错误: {0}")]
    Search(#[from] SearchError),
    /// LLM 服务错误
    #[error("LLM错误: {0}")]
    Llm(#[from] LlmError),
    /// 文件操作错误
    #[error("文件错误: {0}")]
    File(#[from] FileError),
    /// 配置错误
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),
}

/// 论文检索 (arXiv) 错误
#[derive(Debug, Error)]
pub enum SearchError {
    /// 网络请求失败
    #[error("检索请求失败 ({endpoint}): {source}")]
    RequestFailed {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },
    /// 返回非成功状态码
    #[error("检索服务返回状态码 {status} ({endpoint})")]
    BadStatus {
        endpoint: String,
        status: reqwest::StatusCode,
    },
    /// 返回内容不是 Atom feed
    #[error("检索服务返回的不是 Atom feed ({endpoint})")]
    MalformedFeed { endpoint: String },
}

/// LLM 服务错误
#[derive(Debug, Error)]
pub enum LlmError {
    /// 请求构建失败
    #[error("LLM 请求构建失败: {source}")]
    RequestBuildFailed {
        #[source]
        source: async_openai::error::OpenAIError,
    },
    /// API 调用失败
    #[error("LLM API调用失败 (模型: {model}): {source}")]
    ApiCallFailed {
        model: String,
        #[source]
        source: async_openai::error::OpenAIError,
    },
    /// 返回结果为空
    #[error("LLM返回结果为空 (模型: {model})")]
    EmptyResponse { model: String },
    /// 返回内容为空
    #[error("LLM返回内容为空 (模型: {model})")]
    EmptyContent { model: String },
}

/// 文件操作错误
#[derive(Debug, Error)]
pub enum FileError {
    /// 写入文件失败
    #[error("写入文件失败 ({path}): {source}")]
    WriteFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// 配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 环境变量解析失败
    #[error("环境变量 {var_name} 解析失败: 值 '{value}' 无法转换为 {expected_type}")]
    EnvVarParseFailed {
        var_name: String,
        value: String,
        expected_type: String,
    },
}

// ========== 便捷构造函数 ==========

impl AppError {
    /// 创建检索请求失败错误
    pub fn search_request_failed(endpoint: impl Into<String>, source: reqwest::Error) -> Self {
        AppError::Search(SearchError::RequestFailed {
            endpoint: endpoint.into(),
            source,
        })
    }

    /// 创建LLM API调用错误
    pub fn llm_api_failed(
        model: impl Into<String>,
        source: async_openai::error::OpenAIError,
    ) -> Self {
        AppError::Llm(LlmError::ApiCallFailed {
            model: model.into(),
            source,
        })
    }

    /// 创建文件写入错误
    pub fn file_write_failed(path: impl Into<String>, source: std::io::Error) -> Self {
        AppError::File(FileError::WriteFailed {
            path: path.into(),
            source,
        })
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;
