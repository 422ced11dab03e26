//! 標準環境変数解決実装（std::env を委譲）

use crate::error::Error;
use crate::ports::outbound::env_resolver::{
    ENV_API_KEY, ENV_ENDPOINT, ENV_LOG, ENV_MAX_HISTORY, ENV_MODEL,
};
use crate::ports::outbound::EnvResolver;
use std::env;
use std::path::PathBuf;

/// 標準環境変数解決実装
#[derive(Debug, Clone, Default)]
pub struct StdEnvResolver;

fn non_empty(name: &str) -> Option<String> {
    env::var(name).ok().filter(|s| !s.trim().is_empty())
}

/// GPTCHAT_MAX_HISTORY の値を解釈する
pub(crate) fn parse_max_history(raw: Option<String>) -> Result<Option<usize>, Error> {
    match raw {
        None => Ok(None),
        Some(s) => match s.trim().parse::<usize>() {
            Ok(n) if n > 0 => Ok(Some(n)),
            _ => Err(Error::env(format!(
                "{} must be a positive integer, got '{}'",
                ENV_MAX_HISTORY, s
            ))),
        },
    }
}

impl EnvResolver for StdEnvResolver {
    fn api_key(&self) -> Option<String> {
        env::var(ENV_API_KEY).ok()
    }

    fn endpoint(&self) -> Option<String> {
        non_empty(ENV_ENDPOINT)
    }

    fn model(&self) -> Option<String> {
        non_empty(ENV_MODEL)
    }

    fn max_history(&self) -> Result<Option<usize>, Error> {
        parse_max_history(non_empty(ENV_MAX_HISTORY))
    }

    fn log_path(&self) -> Option<PathBuf> {
        non_empty(ENV_LOG).map(PathBuf::from)
    }
}
