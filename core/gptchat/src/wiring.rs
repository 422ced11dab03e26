//! 配線: 設定を合成し、標準アダプタで会話セッションを組み立てる
//!
//! 設定の優先順位は CLI > 環境変数 > 既定値。起動時に一度だけ解決する。

use std::sync::Arc;

use common::adapter::{CompositeLog, FileJsonLog, NoopLog, StderrLog};
use common::domain::ModelName;
use common::error::Error;
use common::llm::config::DEFAULT_MODEL;
use common::llm::{create_client, EndpointConfig, LlmDriver, ProviderType};
use common::ports::outbound::{emit, EnvResolver, Log, LogLevel, LogRecord};

use crate::domain::SessionOptions;
use crate::usecase::chat_session::ChatSession;

/// main が保持する共有部品
pub struct App {
    pub env_resolver: Arc<dyn EnvResolver>,
    pub logger: Arc<dyn Log>,
}

/// セッション開始時に確定した設定
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedSettings {
    pub provider: ProviderType,
    pub endpoint: EndpointConfig,
    pub model: ModelName,
    pub system: Option<String>,
    pub max_history: Option<usize>,
}

/// ログ出力先を組み立てる（GPTCHAT_LOG があれば JSONL、`stderr` なら stderr にも出す）
pub fn build_logger(env: &dyn EnvResolver, stderr: bool) -> Arc<dyn Log> {
    let mut sinks: Vec<Arc<dyn Log>> = Vec::new();
    if let Some(path) = env.log_path() {
        sinks.push(Arc::new(FileJsonLog::new(path)));
    }
    if stderr {
        sinks.push(Arc::new(StderrLog::new(LogLevel::Debug)));
    }
    match sinks.len() {
        0 => Arc::new(NoopLog),
        1 => sinks.remove(0),
        _ => Arc::new(CompositeLog::new(sinks)),
    }
}

/// 配線: 標準アダプタで App を組み立てる
pub fn wire_app(env_resolver: Arc<dyn EnvResolver>, stderr_log: bool) -> App {
    let logger = build_logger(env_resolver.as_ref(), stderr_log);
    App {
        env_resolver,
        logger,
    }
}

/// CLI の指定と環境変数から設定を確定する
pub fn resolve_settings(
    options: &SessionOptions,
    env: &dyn EnvResolver,
) -> Result<ResolvedSettings, Error> {
    let endpoint_url = options.endpoint.clone().or_else(|| env.endpoint());
    let endpoint = EndpointConfig::new(env.api_key().unwrap_or_default(), endpoint_url);
    // 起動時に検証しておく（不正ならリクエスト前に Env エラー）
    endpoint.method()?;
    let model = options
        .model
        .clone()
        .or_else(|| env.model().map(ModelName::new))
        .unwrap_or_else(|| ModelName::new(DEFAULT_MODEL));
    let max_history = match options.max_history {
        Some(n) => Some(n),
        None => env.max_history()?,
    };
    Ok(ResolvedSettings {
        provider: options.provider,
        endpoint,
        model,
        system: options.system.clone(),
        max_history,
    })
}

/// 確定した設定から会話セッションを作る
pub fn build_session(settings: ResolvedSettings, log: Arc<dyn Log>) -> ChatSession {
    let client = create_client(settings.provider, &settings.endpoint, Arc::clone(&log));
    emit(
        log.as_ref(),
        LogRecord::new(LogLevel::Info, "session configured")
            .layer("wiring")
            .kind("lifecycle")
            .field("provider", client.name())
            .field("endpoint", settings.endpoint.endpoint_url.as_str())
            .field("model", settings.model.to_string())
            .field("max_history", settings.max_history),
    );
    let driver = LlmDriver::new(client, settings.endpoint.headers(), Arc::clone(&log));
    ChatSession::new(
        driver,
        settings.model,
        settings.system,
        settings.max_history,
        log,
    )
}

/// 設定の解決から会話セッションの作成までをまとめて行う
pub fn wire_session(options: &SessionOptions, app: &App) -> Result<ChatSession, Error> {
    let settings = resolve_settings(options, app.env_resolver.as_ref())?;
    Ok(build_session(settings, Arc::clone(&app.logger)))
}
