//! Ports & Adapters のポート定義
//!
//! - inbound: なし（common はライブラリのためアプリの入り口を持たない）
//! - outbound: 補完クライアント・環境変数・ログなど、外界に依頼するための trait

pub mod outbound;
