//! minidbg CLI - コマンドラインインターフェース
//!
//! トレースを再生しながら行単位でステップ実行するデバッガ minidbg のREPLインターフェース

use anyhow::Result;
use clap::{Parser, Subcommand};
use minidbg_core::parse::BreakpointSpec;
use minidbg_core::{
    Breakpoint, Command, DebugError, Debugger, DebuggerConfig, Frame, PauseContext, PauseHandler,
    Session, StepCommand,
};
use minidbg_trace::{EventSource, TraceReader};
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::path::{Path, PathBuf};
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// 履歴ファイル名（ホームディレクトリ直下）
const HISTORY_FILE: &str = ".minidbg_history";

/// minidbg - Line-level breakpoint and step debugger
#[derive(Parser)]
#[command(name = "minidbg")]
#[command(version = "0.1.0")]
#[command(about = "Breakpoint-and-step debugger over recorded execution traces", long_about = None)]
struct Cli {
    /// Enable debug logging (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: DebugCommand,
}

#[derive(Subcommand)]
enum DebugCommand {
    /// Replay a trace under the debugger
    Run {
        /// Path to the trace file
        trace: PathBuf,

        /// Breakpoint to set before starting, as NAME=FILE:LINE
        #[arg(short = 'b', long = "break", value_name = "NAME=FILE:LINE")]
        breakpoints: Vec<BreakpointSpec>,

        /// Only subscribe to events while breakpoints exist or stepping is armed
        #[arg(long)]
        lazy_trace: bool,
    },

    /// Validate a trace file without running it
    Check {
        /// Path to the trace file
        trace: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        DebugCommand::Check { trace } => check_trace(&trace),
        DebugCommand::Run {
            trace,
            breakpoints,
            lazy_trace,
        } => {
            println!("minidbg - Line-level Debugger");
            println!("Version 0.1.0");
            println!();

            let debugger = init_debugger(&breakpoints, lazy_trace);
            run_repl(debugger, &trace)
        }
    }
}

/// ログ出力を初期化する
fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// デバッガを作成し、コマンドラインで指定されたブレークポイントを設定する
fn init_debugger(breakpoints: &[BreakpointSpec], lazy_trace: bool) -> Debugger {
    let config = if lazy_trace {
        DebuggerConfig::lazy()
    } else {
        DebuggerConfig::default()
    };
    let mut debugger = Debugger::new(config);

    for spec in breakpoints {
        debugger.add_breakpoint(spec.name.clone(), spec.file.clone(), spec.line);
        println!(
            "Breakpoint {} set at {}:{}",
            spec.name,
            spec.file.display(),
            spec.line
        );
    }

    debugger
}

/// トレースファイルを最後まで読み、不正な行がないか確認する
fn check_trace(path: &Path) -> Result<()> {
    let mut reader = TraceReader::open(path)?;
    let mut count = 0usize;
    while reader.next_event()?.is_some() {
        count += 1;
    }
    println!("{}: {} events OK", path.display(), count);
    Ok(())
}

fn history_path() -> Option<PathBuf> {
    home::home_dir().map(|dir| dir.join(HISTORY_FILE))
}

/// REPLループを実行する
fn run_repl(mut debugger: Debugger, trace: &Path) -> Result<()> {
    println!("Trace: {}", trace.display());
    println!("Type 'help' for available commands, 'run' to start, 'quit' to exit.");
    println!();

    let mut rl = DefaultEditor::new()?;
    let history = history_path();
    if let Some(path) = &history {
        // 初回起動時は履歴ファイルが存在しない
        let _ = rl.load_history(path);
    }

    let mut finished = false;

    loop {
        let readline = rl.readline("(minidbg) ");
        match readline {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }

                rl.add_history_entry(line)?;

                let command = match Command::parse(line) {
                    Ok(Some(command)) => command,
                    Ok(None) => continue,
                    Err(e) => {
                        eprintln!("Error: {}", e);
                        continue;
                    }
                };

                match command {
                    Command::Quit => {
                        println!("Goodbye!");
                        break;
                    }
                    Command::Run if finished => {
                        println!("The trace has already been replayed");
                    }
                    Command::Run => {
                        let reader = match TraceReader::open(trace) {
                            Ok(reader) => reader,
                            Err(e) => {
                                eprintln!("Error: {}", e);
                                continue;
                            }
                        };

                        // 再生中はセッションに貸し出す
                        let taken = std::mem::take(&mut debugger);
                        let handler = ReplPauseHandler { rl: &mut rl };
                        let (dbg, outcome) = replay(taken, reader, handler);
                        debugger = dbg;
                        match outcome {
                            Ok(()) => finished = true,
                            Err(e) => eprintln!("Error: {}", e),
                        }
                    }
                    command => handle_idle_command(&mut debugger, command),
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("CTRL-C");
                break;
            }
            Err(ReadlineError::Eof) => {
                println!("CTRL-D");
                break;
            }
            Err(err) => {
                eprintln!("Error: {:?}", err);
                break;
            }
        }
    }

    if let Some(path) = &history {
        if let Err(e) = rl.save_history(path) {
            debug!("failed to save history to {}: {}", path.display(), e);
        }
    }

    Ok(())
}

/// トレースを再生する
///
/// 停止するたびにハンドラを呼び出します。中断も含めて再生が終われば `Ok` です。
/// 結果にかかわらずデバッガ（とそのブレークポイント）は呼び出し元に返します。
fn replay<S, H>(
    debugger: Debugger,
    source: S,
    handler: H,
) -> (Debugger, minidbg_core::Result<()>)
where
    S: EventSource,
    H: PauseHandler,
{
    let mut session = Session::new(debugger, source, handler);

    let outcome = match session.run() {
        Ok(stats) => {
            println!();
            println!(
                "Program finished ({} events, {} pauses)",
                stats.events, stats.pauses
            );
            Ok(())
        }
        Err(DebugError::Aborted) => {
            println!("Execution aborted");
            Ok(())
        }
        Err(e) => Err(e),
    };

    (session.into_parts().0, outcome)
}

/// 実行前・実行後のプロンプトでコマンドを処理する
fn handle_idle_command(debugger: &mut Debugger, command: Command) {
    match command {
        Command::Break { name, file, line } => {
            println!("Breakpoint {} set at {}:{}", name, file.display(), line);
            debugger.add_breakpoint(name, file, line);
        }
        Command::Delete(name) => {
            let removed = debugger.delete_breakpoint(&name);
            print_deleted(&name, removed);
        }
        Command::Breakpoints => print_breakpoints(debugger.breakpoints()),
        Command::Help => print_help(),
        command if command.requires_pause() => {
            eprintln!("Error: the program is not paused");
        }
        _ => {}
    }
}

/// 停止中に入れ子のプロンプトを開くハンドラ
struct ReplPauseHandler<'a> {
    rl: &'a mut DefaultEditor,
}

impl PauseHandler for ReplPauseHandler<'_> {
    fn on_pause(&mut self, ctx: &mut PauseContext<'_>) -> minidbg_core::Result<StepCommand> {
        println!();
        for line in pause_banner(ctx.frame(), ctx.hits()) {
            println!("{}", line);
        }

        loop {
            let line = match self.rl.readline("(minidbg:paused) ") {
                Ok(line) => line,
                Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => {
                    return Err(DebugError::Aborted);
                }
                Err(err) => {
                    eprintln!("Error: {:?}", err);
                    return Err(DebugError::Aborted);
                }
            };

            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            if let Err(e) = self.rl.add_history_entry(line) {
                debug!("failed to add history entry: {}", e);
            }

            let command = match Command::parse(line) {
                Ok(Some(command)) => command,
                Ok(None) => continue,
                Err(e) => {
                    eprintln!("Error: {}", e);
                    continue;
                }
            };

            match command {
                Command::Step(step) => return Ok(step),
                Command::Quit => return Err(DebugError::Aborted),
                Command::Where => {
                    println!("At {} (depth {}, {})", ctx.frame(), ctx.depth(), ctx.state());
                }
                Command::Break { name, file, line } => {
                    println!("Breakpoint {} set at {}:{}", name, file.display(), line);
                    ctx.add_breakpoint(name, file, line);
                }
                Command::Delete(name) => {
                    let removed = ctx.delete_breakpoint(&name);
                    print_deleted(&name, removed);
                }
                Command::Breakpoints => print_breakpoints(ctx.breakpoints()),
                Command::Run => println!("The program is already running"),
                Command::Help => print_help(),
            }
        }
    }
}

/// 停止時に表示する通知行
fn pause_banner(frame: &Frame, hits: &[String]) -> Vec<String> {
    let mut lines: Vec<String> = hits
        .iter()
        .map(|name| format!("**** Hit breakpoint: {} ****", name))
        .collect();
    lines.push(format!("**** Breaking at {} ****", frame));
    lines
}

fn print_deleted(name: &str, removed: usize) {
    if removed == 0 {
        println!("No breakpoint named '{}'", name);
    } else {
        println!("Deleted {} breakpoint(s) named '{}'", removed, name);
    }
}

/// ブレークポイント一覧を表示するヘルパー関数
fn print_breakpoints<'a>(breakpoints: impl Iterator<Item = &'a Breakpoint>) {
    let breakpoints: Vec<_> = breakpoints.collect();
    if breakpoints.is_empty() {
        println!("No breakpoints");
        return;
    }

    println!("Breakpoints ({}):", breakpoints.len());
    for (i, bp) in breakpoints.iter().enumerate() {
        println!("  {}. {}", i + 1, bp);
    }
}

fn print_help() {
    println!("Available commands:");
    println!();
    println!("  help                     - Show this help message");
    println!("  quit/exit/q              - Exit the debugger (aborts a paused run)");
    println!("  run                      - Start replaying the trace");
    println!();
    println!("Breakpoint commands:");
    println!("  break <name> <file:line> - Set a named breakpoint");
    println!("  delete <name>            - Delete every breakpoint with that name");
    println!("  breakpoints              - List breakpoints");
    println!();
    println!("While paused:");
    println!("  cont (c)                 - Continue until the next breakpoint");
    println!("  step_over (n)            - Stop at the next line in this frame or its caller");
    println!("  step_in (s)              - Stop at the next line, entering calls");
    println!("  step_out (f)             - Stop once this frame returns");
    println!("  where (w)                - Show the current location and depth");
    println!();
    println!("Examples:");
    println!("  break bp1 lib/fib.rb:10");
    println!("  delete bp1");
}
