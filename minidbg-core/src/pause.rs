//! 停止中セッションとの橋渡し
//!
//! デバッガは停止を決めるとハンドラを同期的に呼び出し、ハンドラがステップコマンドを
//! 返すまでイベントソースは先に進みません。ハンドラ側で対話セッションをどう表示するかは
//! コアの関知するところではありません。

use crate::{Breakpoint, Debugger, Result, StepCommand, StepState};
use minidbg_trace::Frame;
use std::path::PathBuf;

/// 停止中のコンテキスト
///
/// ハンドラからはブレークポイントの追加・削除と状態の参照ができます。
/// ステップコマンドはハンドラの戻り値として渡します。
pub struct PauseContext<'a> {
    debugger: &'a mut Debugger,
    frame: &'a Frame,
    hits: &'a [String],
}

impl<'a> PauseContext<'a> {
    pub fn new(debugger: &'a mut Debugger, frame: &'a Frame, hits: &'a [String]) -> Self {
        Self {
            debugger,
            frame,
            hits,
        }
    }

    /// 停止位置
    pub fn frame(&self) -> &Frame {
        self.frame
    }

    /// この停止でヒットしたブレークポイント名
    pub fn hits(&self) -> &[String] {
        self.hits
    }

    pub fn depth(&self) -> i64 {
        self.debugger.depth()
    }

    pub fn state(&self) -> StepState {
        self.debugger.state()
    }

    pub fn add_breakpoint(&mut self, name: impl Into<String>, file: impl Into<PathBuf>, line: u32) {
        self.debugger.add_breakpoint(name, file, line);
    }

    pub fn delete_breakpoint(&mut self, name: &str) -> usize {
        self.debugger.delete_breakpoint(name)
    }

    pub fn breakpoints(&self) -> impl Iterator<Item = &Breakpoint> {
        self.debugger.breakpoints()
    }
}

/// 停止時に呼び出されるハンドラ
///
/// `Err` を返すとセッション全体が中断されます（例: `DebugError::Aborted`）。
pub trait PauseHandler {
    fn on_pause(&mut self, ctx: &mut PauseContext<'_>) -> Result<StepCommand>;
}

/// クロージャを停止ハンドラとして使うためのラッパ
pub struct FnHandler<F>(F);

/// クロージャから停止ハンドラを作成する
pub fn from_fn<F>(f: F) -> FnHandler<F>
where
    F: FnMut(&mut PauseContext<'_>) -> Result<StepCommand>,
{
    FnHandler(f)
}

impl<F> PauseHandler for FnHandler<F>
where
    F: FnMut(&mut PauseContext<'_>) -> Result<StepCommand>,
{
    fn on_pause(&mut self, ctx: &mut PauseContext<'_>) -> Result<StepCommand> {
        (self.0)(ctx)
    }
}
