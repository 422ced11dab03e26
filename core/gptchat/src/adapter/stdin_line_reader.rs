//! 標準入力から 1 行ずつ読む LineReader 実装

use crate::ports::outbound::LineReader;
use common::error::Error;
use std::io::{self, IsTerminal};

/// 標準入力の LineReader
pub struct StdinLineReader {
    stdin: io::Stdin,
}

impl StdinLineReader {
    pub fn new() -> Self {
        Self { stdin: io::stdin() }
    }
}

impl Default for StdinLineReader {
    fn default() -> Self {
        Self::new()
    }
}

impl LineReader for StdinLineReader {
    fn read_line(&mut self) -> Result<Option<String>, Error> {
        let mut line = String::new();
        let n = self
            .stdin
            .read_line(&mut line)
            .map_err(|e| Error::io_msg(format!("Failed to read input: {}", e)))?;
        if n == 0 {
            return Ok(None);
        }
        Ok(Some(line))
    }

    fn echoes_input(&self) -> bool {
        self.stdin.is_terminal()
    }
}
