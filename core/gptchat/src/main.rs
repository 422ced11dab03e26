mod adapter;
mod cli;
mod domain;
mod ports;
mod tui;
mod usecase;
mod wiring;

#[cfg(test)]
mod tests;

use std::io;
use std::process;
use std::sync::Arc;

use adapter::{install_exit_handler, NoopInterruptChecker, SigintChecker, StdinLineReader};
use cli::{config_to_command, parse_args, print_completion, ParseOutcome};
use common::adapter::StdEnvResolver;
use common::error::Error;
use common::ports::outbound::{emit, LogLevel, LogRecord};
use domain::ChatCommand;
use ports::inbound::UseCaseRunner;
use ports::outbound::InterruptChecker;
use usecase::line_mode::{run_line_session, FAREWELL};
use wiring::{wire_app, wire_session, App};

/// ChatCommand をディスパッチする Runner（match は main レイヤーに集約）
struct Runner {
    app: App,
}

impl Runner {
    fn run_line(&self, options: &domain::SessionOptions) -> Result<i32, Error> {
        let mut session = wire_session(options, &self.app)?;
        if let Err(e) = install_exit_handler(FAREWELL) {
            emit(
                self.app.logger.as_ref(),
                LogRecord::new(LogLevel::Warn, e.to_string()).layer("cli").kind("error"),
            );
        }
        let mut reader = StdinLineReader::new();
        // stdout はロックしたまま持たない（シグナルハンドラ側も書く）
        run_line_session(&mut session, &mut reader, &mut io::stdout())
    }

    fn run_interactive(&self, options: &domain::SessionOptions) -> Result<i32, Error> {
        let session = wire_session(options, &self.app)?;
        let checker: Box<dyn InterruptChecker> = match SigintChecker::new() {
            Ok(c) => Box::new(c),
            Err(e) => {
                emit(
                    self.app.logger.as_ref(),
                    LogRecord::new(LogLevel::Warn, format!("signal handler unavailable: {}", e))
                        .layer("cli")
                        .kind("error"),
                );
                Box::new(NoopInterruptChecker)
            }
        };
        tui::run_interactive(session, checker.as_ref(), Arc::clone(&self.app.logger))
    }
}

impl UseCaseRunner for Runner {
    fn run(&self, cmd: ChatCommand) -> Result<i32, Error> {
        let command_name = cmd.name();
        emit(
            self.app.logger.as_ref(),
            LogRecord::new(LogLevel::Info, "command started")
                .layer("cli")
                .kind("lifecycle")
                .field("command", command_name),
        );

        let result = match &cmd {
            ChatCommand::Help => {
                print_help();
                Ok(0)
            }
            ChatCommand::Line(options) => self.run_line(options),
            ChatCommand::Interactive(options) => self.run_interactive(options),
        };

        let code = match &result {
            Ok(code) => *code,
            Err(e) => e.exit_code(),
        };
        emit(
            self.app.logger.as_ref(),
            LogRecord::new(LogLevel::Info, "command finished")
                .layer("cli")
                .kind("lifecycle")
                .field("command", command_name)
                .field("exit_code", code),
        );
        if let Err(ref e) = result {
            emit(
                self.app.logger.as_ref(),
                LogRecord::new(LogLevel::Error, e.to_string()).layer("cli").kind("error"),
            );
        }
        result
    }
}

fn main() {
    let exit_code = match run() {
        Ok(code) => code,
        Err(e) => {
            if e.is_usage() {
                print_usage();
            }
            eprintln!("gptchat: {}", e);
            e.exit_code()
        }
    };
    process::exit(exit_code);
}

pub fn run() -> Result<i32, Error> {
    let config = match parse_args()? {
        ParseOutcome::Config(c) => c,
        ParseOutcome::GenerateCompletion(shell) => {
            print_completion(shell);
            return Ok(0);
        }
    };
    // 全画面モードでは stderr に書くと画面が崩れるので verbose を無視する
    let app = wire_app(Arc::new(StdEnvResolver), config.verbose && !config.tui);
    let runner = Runner { app };
    runner.run(config_to_command(config))
}

fn print_usage() {
    eprintln!("Usage: gptchat [options]");
}

fn print_help() {
    println!("Usage: gptchat [options]");
    println!("Options:");
    println!("  -h, --help                    Show this help message");
    println!("  --tui                         Start the full-screen interface (F2 toggles full screen, Esc quits)");
    println!("  -p, --provider <provider>     Completion provider: openai (default) or echo (offline)");
    println!("  -m, --model <model>           Model name. Default: $GPTCHAT_MODEL, or gpt-3.5-turbo");
    println!("  -S, --system <instruction>    System message placed at the start of the conversation");
    println!("  --endpoint <url>              Chat completion endpoint. Default: $GPTCHAT_ENDPOINT, or the OpenAI API");
    println!("  --max-history <N>             Send only the most recent N messages (system message is always kept)");
    println!("  -v, --verbose                 Emit debug logs to stderr (line mode only)");
    println!("  --generate <shell>            Generate shell completion script (bash, zsh, fish)");
    println!();
    println!("Environment:");
    println!("  OPENAI_API_KEY       Bearer token sent with every request");
    println!("  GPTCHAT_ENDPOINT     Chat completion endpoint URL");
    println!("  GPTCHAT_MODEL        Model name");
    println!("  GPTCHAT_MAX_HISTORY  Same as --max-history");
    println!("  GPTCHAT_LOG          Append JSONL logs to this file");
    println!();
    println!("Description:");
    println!("  Start a chat session. Each line you type is sent together with the conversation so far,");
    println!("  and the reply is printed. Press Ctrl+C (or send EOF) to stop.");
    println!();
    println!("Examples:");
    println!("  gptchat");
    println!("  gptchat -m gpt-4 -S \"Answer briefly.\"");
    println!("  gptchat --tui");
    println!("  gptchat -p echo");
}
