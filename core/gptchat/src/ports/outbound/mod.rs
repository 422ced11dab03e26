//! Outbound ポート: アプリが外界（端末の行入力・割り込み）を使うための trait

pub mod interrupt_checker;
pub mod line_reader;

pub use interrupt_checker::InterruptChecker;
pub use line_reader::LineReader;
