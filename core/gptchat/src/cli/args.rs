use crate::domain::{ChatCommand, SessionOptions};
use clap::builder::{ArgAction, RangedU64ValueParser};
use clap::value_parser;
use clap_complete::Shell;
use common::domain::ModelName;
use common::error::Error;
use common::llm::ProviderType;
use std::io;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Config {
    pub help: bool,
    /// --tui: 全画面モードで起動する
    pub tui: bool,
    /// -v / --verbose: デバッグログを stderr に出す（全画面モードでは無効）
    pub verbose: bool,
    pub provider: ProviderType,
    pub model: Option<ModelName>,
    pub system: Option<String>,
    pub endpoint: Option<String>,
    pub max_history: Option<usize>,
}

/// 解析結果: 通常の Config / 補完スクリプト生成
#[derive(Debug, Clone)]
pub enum ParseOutcome {
    Config(Config),
    GenerateCompletion(Shell),
}

fn build_clap_command() -> clap::Command {
    clap::Command::new("gptchat")
        .about("Chat with a language model from the terminal")
        .disable_help_flag(true)
        .arg(
            clap::Arg::new("help")
                .short('h')
                .long("help")
                .help("Show this help message")
                .action(ArgAction::SetTrue),
        )
        .arg(
            clap::Arg::new("tui")
                .long("tui")
                .help("Start the full-screen interface")
                .action(ArgAction::SetTrue),
        )
        .arg(
            clap::Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Emit debug logs to stderr (line mode only)")
                .action(ArgAction::SetTrue),
        )
        .arg(
            clap::Arg::new("provider")
                .short('p')
                .long("provider")
                .value_name("provider")
                .help("Completion provider (openai, echo)")
                .num_args(1),
        )
        .arg(
            clap::Arg::new("model")
                .short('m')
                .long("model")
                .value_name("model")
                .help("Model name (e.g. gpt-3.5-turbo, gpt-4)")
                .num_args(1),
        )
        .arg(
            clap::Arg::new("system")
                .short('S')
                .long("system")
                .value_name("instruction")
                .help("System message placed at the start of the conversation")
                .num_args(1),
        )
        .arg(
            clap::Arg::new("endpoint")
                .long("endpoint")
                .value_name("url")
                .help("Chat completion endpoint URL")
                .num_args(1),
        )
        .arg(
            clap::Arg::new("max-history")
                .long("max-history")
                .value_name("N")
                .help("Send only the most recent N messages (system message is always kept)")
                .value_parser(RangedU64ValueParser::<usize>::new().range(1..))
                .num_args(1),
        )
        .arg(
            clap::Arg::new("generate")
                .long("generate")
                .value_name("shell")
                .help("Generate shell completion script")
                .value_parser(value_parser!(Shell))
                .num_args(1),
        )
}

fn matches_to_config(matches: &clap::ArgMatches) -> Result<Config, Error> {
    let provider = match matches.get_one::<String>("provider") {
        Some(name) => ProviderType::parse(name)
            .ok_or_else(|| Error::invalid_argument(format!("Unknown provider: {}", name)))?,
        None => ProviderType::default(),
    };
    Ok(Config {
        help: matches.get_flag("help"),
        tui: matches.get_flag("tui"),
        verbose: matches.get_flag("verbose"),
        provider,
        model: matches
            .get_one::<String>("model")
            .map(|s| ModelName::new(s.clone())),
        system: matches.get_one::<String>("system").cloned(),
        endpoint: matches.get_one::<String>("endpoint").cloned(),
        max_history: matches.get_one::<usize>("max-history").copied(),
    })
}

fn parse_matches(matches: clap::ArgMatches) -> Result<ParseOutcome, Error> {
    if let Some(&shell) = matches.get_one::<Shell>("generate") {
        return Ok(ParseOutcome::GenerateCompletion(shell));
    }
    Ok(ParseOutcome::Config(matches_to_config(&matches)?))
}

/// コマンドラインを解析する。補完生成が要求された場合は ParseOutcome::GenerateCompletion を返す。
pub fn parse_args() -> Result<ParseOutcome, Error> {
    let matches = build_clap_command()
        .try_get_matches()
        .map_err(|e| Error::invalid_argument(e.to_string()))?;
    parse_matches(matches)
}

/// テスト用: 引数スライスから解析する
#[allow(dead_code)]
pub fn parse_args_from(args: &[&str]) -> Result<ParseOutcome, Error> {
    let matches = build_clap_command()
        .try_get_matches_from(args)
        .map_err(|e| Error::invalid_argument(e.to_string()))?;
    parse_matches(matches)
}

/// 補完スクリプトを標準出力に出力する。
pub fn print_completion(shell: Shell) {
    let mut cmd = build_clap_command();
    clap_complete::generate(shell, &mut cmd, "gptchat", &mut io::stdout());
}

/// Config を ChatCommand に変換する
pub fn config_to_command(config: Config) -> ChatCommand {
    if config.help {
        return ChatCommand::Help;
    }
    let options = SessionOptions {
        provider: config.provider,
        model: config.model,
        system: config.system,
        endpoint: config.endpoint,
        max_history: config.max_history,
    };
    if config.tui {
        ChatCommand::Interactive(options)
    } else {
        ChatCommand::Line(options)
    }
}
