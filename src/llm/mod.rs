//! src/llm/mod.rs

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::errors::LlmError;

pub mod deepseek;

pub use deepseek::DeepSeekClient;

/// The `LLMClient` trait defines the interface for a chat-completion
/// backend: one system instruction, one user turn, one completion back.
#[async_trait]
pub trait LLMClient: Send + Sync {
    /// Returns the name of the LLM client.
    fn name(&self) -> &str;
    /// Calls the LLM and returns the generated completion.
    async fn call(&self, system_prompt: &str, user_prompt: &str) -> Result<String, LlmError>;
}

const REPORT_SYSTEM_PROMPT: &str = r#"
用户提交一些仓库中的git提交日志，请为它们生成一份工作日报，说明今天做了什么。

示例 MARKDOWN 输出:

- 今日工作完成情况:
1. 修复了浏览器xxx的bug
2. 优化了xxx
3. 完成了xxx功能
4. ...
- 明日工作计划:
1. 修复xxx的bug
2. 优化xxx
3. 完成xxx功能
4. ...
"#;

/// Asks the backend for a daily report over the accumulated
/// `repo:<path>: commit:<subject>` lines. The completion is returned
/// verbatim, with no validation of its shape.
pub async fn generate_daily_report(
    client: &dyn LLMClient,
    commits: &[String],
    date: NaiveDate,
) -> Result<String, LlmError> {
    println!("🤖 Calling {} to generate daily report...", client.name());

    let user_prompt = serde_json::json!({
        "commits": commits,
        "date": date.format("%Y-%m-%d").to_string(),
    })
    .to_string();

    client.call(REPORT_SYSTEM_PROMPT, &user_prompt).await
}
