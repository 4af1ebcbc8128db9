//! デバッガコマンド

use crate::parse::parse_location;
use crate::{DebugError, Result, StepCommand};
use std::path::PathBuf;

/// デバッガコマンド
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// ブレークポイントを設定
    Break {
        name: String,
        file: PathBuf,
        line: u32,
    },
    /// 名前が一致するブレークポイントを削除
    Delete(String),
    /// ブレークポイント一覧表示
    Breakpoints,
    /// ステップコマンド（停止中のみ）
    Step(StepCommand),
    /// 停止位置と深さの表示（停止中のみ）
    Where,
    /// トレースの再生を開始
    Run,
    /// ヘルプ表示
    Help,
    /// 終了
    Quit,
}

impl Command {
    /// コマンド文字列をパースする
    ///
    /// 空行は `Ok(None)` です。未知のコマンドや引数の誤りはエラーになります。
    pub fn parse(input: &str) -> Result<Option<Self>> {
        let parts: Vec<&str> = input.split_whitespace().collect();
        if parts.is_empty() {
            return Ok(None);
        }

        let command = match parts[0] {
            "break" | "b" => match parts.as_slice() {
                [_, name, location] => {
                    let (file, line) = parse_location(location)?;
                    Command::Break {
                        name: name.to_string(),
                        file,
                        line,
                    }
                }
                _ => return Err(usage("break NAME FILE:LINE")),
            },
            "delete" | "d" => match parts.as_slice() {
                [_, name] => Command::Delete(name.to_string()),
                _ => return Err(usage("delete NAME")),
            },
            "breakpoints" | "info" => Command::Breakpoints,
            "cont" | "continue" | "c" => Command::Step(StepCommand::Continue),
            "step_over" | "next" | "n" => Command::Step(StepCommand::StepOver),
            "step_in" | "step" | "s" => Command::Step(StepCommand::StepIn),
            "step_out" | "finish" | "f" => Command::Step(StepCommand::StepOut),
            "where" | "w" => Command::Where,
            "run" | "r" => Command::Run,
            "help" | "h" | "?" => Command::Help,
            "quit" | "q" | "exit" => Command::Quit,
            other => {
                return Err(DebugError::InvalidCommand(format!(
                    "unknown command '{}', type 'help' for available commands",
                    other
                )))
            }
        };

        Ok(Some(command))
    }

    /// 停止中にしか意味を持たないコマンドか
    pub fn requires_pause(&self) -> bool {
        matches!(self, Command::Step(_) | Command::Where)
    }
}

fn usage(form: &str) -> DebugError {
    DebugError::InvalidCommand(format!("usage: {}", form))
}
