//! Ports & Adapters のポート定義
//!
//! - inbound: main（CLI）がアプリを呼び出す入り口
//! - outbound: アプリが端末入力・割り込みなど外界に依頼するための trait

pub mod inbound;
pub mod outbound;
