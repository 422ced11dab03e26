//! LLM 補完呼び出し
//!
//! リクエスト組み立て・クライアント（OpenAI 互換 / Echo）・応答抽出・ドライバーを提供します。

pub mod config;
pub mod driver;
pub mod echo;
pub mod factory;
pub mod openai;
pub mod request;
pub mod response;

pub use config::{CompletionHeaders, EndpointConfig};
pub use driver::LlmDriver;
pub use factory::{create_client, ProviderType};
pub use request::CompletionRequest;
pub use response::{extract, extract_reply, parse_response, CompletionResponse, Reply, NO_RESPONSE};
