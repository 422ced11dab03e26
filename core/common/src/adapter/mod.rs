//! アダプター（外界の I/O を ports の trait で実装）
//!
//! 補完クライアントの実装は llm モジュール側（openai / echo）に置く。

pub mod file_json_log;
pub mod std_env_resolver;

pub use file_json_log::{CompositeLog, FileJsonLog, NoopLog, StderrLog};
pub use std_env_resolver::StdEnvResolver;
