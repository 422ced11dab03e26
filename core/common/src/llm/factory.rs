//! クライアントファクトリー
//!
//! プロバイダタイプに基づいて補完クライアントを作成します。

use crate::llm::config::EndpointConfig;
use crate::llm::echo::EchoClient;
use crate::llm::openai::OpenAiClient;
use crate::ports::outbound::{CompletionClient, Log};
use std::sync::Arc;

/// プロバイダタイプ
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProviderType {
    /// OpenAI Chat Completions（互換エンドポイント含む）
    #[default]
    OpenAi,
    /// Echo（ネットワークを使わない）
    Echo,
}

impl ProviderType {
    /// 文字列からプロバイダタイプを解析
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "openai" | "gpt" => Some(Self::OpenAi),
            "echo" => Some(Self::Echo),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OpenAi => "openai",
            Self::Echo => "echo",
        }
    }
}

/// プロバイダタイプに応じたクライアントを作成
pub fn create_client(
    provider: ProviderType,
    config: &EndpointConfig,
    log: Arc<dyn Log>,
) -> Arc<dyn CompletionClient> {
    match provider {
        ProviderType::OpenAi => Arc::new(OpenAiClient::new(config.clone(), log)),
        ProviderType::Echo => Arc::new(EchoClient::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::NoopLog;

    #[test]
    fn test_provider_type_parse() {
        assert_eq!(ProviderType::parse("openai"), Some(ProviderType::OpenAi));
        assert_eq!(ProviderType::parse("GPT"), Some(ProviderType::OpenAi));
        assert_eq!(ProviderType::parse("echo"), Some(ProviderType::Echo));
        assert_eq!(ProviderType::parse("gemini"), None);
    }

    #[test]
    fn test_provider_type_roundtrip_name() {
        for p in [ProviderType::OpenAi, ProviderType::Echo] {
            assert_eq!(ProviderType::parse(p.as_str()), Some(p));
        }
    }

    #[test]
    fn test_create_client() {
        let config = EndpointConfig::new("", None);
        let c = create_client(ProviderType::Echo, &config, Arc::new(NoopLog));
        assert_eq!(c.name(), "echo");
        let c = create_client(ProviderType::OpenAi, &config, Arc::new(NoopLog));
        assert_eq!(c.name(), "openai");
    }
}
