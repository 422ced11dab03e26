//! テスト用: 固定の応答を順に返す CompletionClient と、台本どおりに行を返す LineReader


#[cfg(test)]
pub use stub::{ScriptedReader, StubClient};
