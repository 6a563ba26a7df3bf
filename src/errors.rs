//! src/errors.rs

use thiserror::Error;

/// Failures crossing the report-generation service boundary.
#[derive(Debug, Error)]
pub enum LlmError {
    /// Transport-level failure before or while reading an HTTP exchange.
    #[error("调用 DeepSeek API 失败: {0}")]
    Http(#[from] reqwest::Error),
    /// The endpoint answered with a non-success status.
    #[error("调用 DeepSeek API 失败: {status}\n响应体: {body}")]
    Api {
        status: reqwest::StatusCode,
        body: String,
    },
    /// A success response carried no completions.
    #[error("API 调用成功，但返回的 'choices' 数组为空")]
    EmptyChoices,
}
