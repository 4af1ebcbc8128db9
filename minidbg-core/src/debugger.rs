//! ステップコントローラ
//!
//! 実行イベントを1つずつ受け取り、停止すべきかを判定します。
//! イベント処理と停止中のコマンド処理は同じスレッド上で交互にしか起こらないため、
//! 内部状態はロックなしで `&mut self` から直接更新します。

use crate::{
    Breakpoint, BreakpointRegistry, DebugError, DebuggerConfig, DepthTracker, Result,
    StepCommand, StepState,
};
use minidbg_trace::{EventKind, Frame};
use std::path::PathBuf;
use tracing::{debug, info, trace};

/// 停止の通知
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Stop {
    /// このイベントでヒットしたブレークポイント名（登録順）
    pub hits: Vec<String>,
}

impl Stop {
    /// ブレークポイントによる停止か
    pub fn is_breakpoint(&self) -> bool {
        !self.hits.is_empty()
    }
}

/// デバッガ
///
/// ブレークポイントレジストリ・深さカウンタ・ステップ状態を所有します。
/// デバッグセッションごとに1つ作成し、再初期化はしません。
#[derive(Debug, Clone, Default)]
pub struct Debugger {
    config: DebuggerConfig,
    breakpoints: BreakpointRegistry,
    depth: DepthTracker,
    state: StepState,
    /// 停止中（ステップコマンド待ち）か
    paused: bool,
}

impl Debugger {
    /// 新しいデバッガを作成する
    pub fn new(config: DebuggerConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn config(&self) -> &DebuggerConfig {
        &self.config
    }

    /// ブレークポイントを設定する
    ///
    /// 同じ名前・同じ位置の重複登録も許されます。
    pub fn add_breakpoint(
        &mut self,
        name: impl Into<String>,
        file: impl Into<PathBuf>,
        line: u32,
    ) -> &mut Self {
        let bp = Breakpoint::new(name, file, line);
        debug!("add breakpoint {}", bp);
        self.breakpoints.add(bp);
        self
    }

    /// 名前が一致するブレークポイントをすべて削除する
    ///
    /// 削除した数を返します。該当がなくてもエラーにはなりません。
    pub fn delete_breakpoint(&mut self, name: &str) -> usize {
        let removed = self.breakpoints.delete(name);
        debug!("delete breakpoint '{}': {} removed", name, removed);
        removed
    }

    /// すべてのブレークポイントを取得する
    pub fn breakpoints(&self) -> impl Iterator<Item = &Breakpoint> {
        self.breakpoints.iter()
    }

    /// 現在の呼び出し深さ
    pub fn depth(&self) -> i64 {
        self.depth.current()
    }

    pub fn state(&self) -> StepState {
        self.state
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// 行イベントを処理する必要があるか
    pub fn wants_line_events(&self) -> bool {
        self.config.always_trace_calls || !self.breakpoints.is_empty() || self.state.is_stepping()
    }

    /// 呼び出し・復帰イベントを処理する必要があるか
    pub fn wants_depth_events(&self) -> bool {
        self.config.always_trace_calls || self.state.is_stepping()
    }

    /// 行イベントを処理する
    ///
    /// ブレークポイントにヒットした場合は現在の深さでステップ実行を再設定するため、
    /// 必ずその行で停止します。停止する場合は `Some` を返し、以降は
    /// ステップコマンドが発行されるまで停止状態になります。
    pub fn on_line(&mut self, frame: &Frame) -> Option<Stop> {
        trace!("line {} at depth {}", frame, self.depth.current());

        let hits: Vec<String> = self
            .breakpoints
            .find_matching(&frame.path, frame.line)
            .map(|bp| bp.name().to_string())
            .collect();

        if !hits.is_empty() {
            info!("hit breakpoint {} at {}", hits.join(", "), frame);
            self.state = StepState::Stepping {
                target_depth: self.depth.current(),
            };
        }

        if self.state.should_pause(self.depth.current()) {
            debug!("pause at {} ({})", frame, self.state);
            self.paused = true;
            Some(Stop { hits })
        } else {
            None
        }
    }

    /// 呼び出しイベントを処理する
    pub fn on_call(&mut self) {
        self.depth.on_call();
        trace!("call -> depth {}", self.depth.current());
    }

    /// 復帰イベントを処理する
    pub fn on_return(&mut self) {
        self.depth.on_return();
        trace!("return -> depth {}", self.depth.current());
    }

    /// 深さに影響するイベントを処理する
    ///
    /// 行イベントは無視されます。停止判定は行いません。
    pub fn on_depth_event(&mut self, kind: EventKind) {
        if kind.is_call() {
            self.on_call();
        } else if kind.is_return() {
            self.on_return();
        }
    }

    /// 実行を継続する（ステップ解除）
    pub fn cont(&mut self) -> Result<()> {
        self.apply(StepCommand::Continue)
    }

    /// 現在のフレームかそれより浅い位置の次の行まで実行する
    pub fn step_over(&mut self) -> Result<()> {
        self.apply(StepCommand::StepOver)
    }

    /// 呼び出しの中に入って次の行まで実行する
    pub fn step_in(&mut self) -> Result<()> {
        self.apply(StepCommand::StepIn)
    }

    /// 現在のフレームから呼び出し元に戻るまで実行する
    pub fn step_out(&mut self) -> Result<()> {
        self.apply(StepCommand::StepOut)
    }

    /// ステップコマンドを適用して停止状態を解除する
    ///
    /// 停止中でなければ状態を変更せずに `DebugError::NotPaused` を返します。
    pub fn apply(&mut self, command: StepCommand) -> Result<()> {
        if !self.paused {
            return Err(DebugError::NotPaused(command));
        }

        self.state = command.next_state(self.depth.current());
        self.paused = false;
        debug!("{} at depth {} -> {}", command, self.depth.current(), self.state);
        Ok(())
    }
}
