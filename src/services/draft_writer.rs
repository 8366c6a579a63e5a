//! 草稿写入服务 - 业务能力层
//!
//! 只负责"写 generated_paper.txt"能力，不关心流程

use tracing::debug;

use crate::error::{AppError, AppResult};

/// 草稿写入服务
///
/// 职责：
/// - 把当前草稿整体写入输出文件，覆盖旧内容
/// - 不保留历史版本
pub struct DraftWriter {
    output_path: String,
}

impl DraftWriter {
    /// 使用指定文件路径创建
    pub fn with_path(path: impl Into<String>) -> Self {
        Self {
            output_path: path.into(),
        }
    }

    pub fn path(&self) -> &str {
        &self.output_path
    }

    /// 覆盖写入草稿
    pub async fn write(&self, draft: &str) -> AppResult<()> {
        debug!("写入草稿: {} ({} 字节)", self.output_path, draft.len());

        tokio::fs::write(&self.output_path, draft)
            .await
            .map_err(|e| AppError::file_write_failed(&self.output_path, e))
    }
}
