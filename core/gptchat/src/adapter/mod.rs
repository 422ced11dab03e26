pub(crate) mod sigint_checker;
pub(crate) mod stdin_line_reader;
pub(crate) mod stub_client;

pub(crate) use sigint_checker::{install_exit_handler, NoopInterruptChecker, SigintChecker};
pub(crate) use stdin_line_reader::StdinLineReader;

#[cfg(test)]
pub(crate) use stub_client::{ScriptedReader, StubClient};
