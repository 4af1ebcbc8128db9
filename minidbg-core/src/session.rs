//! デバッグセッション
//!
//! イベントソースから読み出したイベントをデバッガに渡し、停止したら
//! ハンドラに制御を移します。不正なイベントはイベントソース側でエラーになるため、
//! デバッガには整形済みのイベントしか届きません。

use crate::{Debugger, PauseContext, PauseHandler, Result};
use minidbg_trace::{EventSource, TraceEvent};
use tracing::debug;

/// セッションの統計
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionStats {
    /// ソースから読み出したイベント数
    pub events: usize,
    /// 処理した行イベント数
    pub lines: usize,
    /// 停止回数
    pub pauses: usize,
    /// 購読していなかったため読み飛ばしたイベント数
    pub skipped: usize,
}

/// イベントソースとデバッガと停止ハンドラを結びつけるセッション
pub struct Session<S, H> {
    debugger: Debugger,
    source: S,
    handler: H,
    stats: SessionStats,
}

impl<S: EventSource, H: PauseHandler> Session<S, H> {
    pub fn new(debugger: Debugger, source: S, handler: H) -> Self {
        Self {
            debugger,
            source,
            handler,
            stats: SessionStats::default(),
        }
    }

    /// イベントを1つ処理する
    ///
    /// ソースが終端に達していれば `false` を返します。
    pub fn step(&mut self) -> Result<bool> {
        match self.source.next_event()? {
            Some(event) => {
                self.stats.events += 1;
                self.dispatch(event)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// ソースが尽きるまで実行する
    pub fn run(&mut self) -> Result<SessionStats> {
        while self.step()? {}
        debug!("session finished: {:?}", self.stats);
        Ok(self.stats)
    }

    fn dispatch(&mut self, event: TraceEvent) -> Result<()> {
        match event {
            TraceEvent::Line(frame) => {
                if !self.debugger.wants_line_events() {
                    self.stats.skipped += 1;
                    return Ok(());
                }
                self.stats.lines += 1;

                if let Some(stop) = self.debugger.on_line(&frame) {
                    self.stats.pauses += 1;
                    let command = {
                        let mut ctx = PauseContext::new(&mut self.debugger, &frame, &stop.hits);
                        self.handler.on_pause(&mut ctx)?
                    };
                    self.debugger.apply(command)?;
                }
            }
            TraceEvent::Depth(kind) => {
                if !self.debugger.wants_depth_events() {
                    self.stats.skipped += 1;
                    return Ok(());
                }
                self.debugger.on_depth_event(kind);
            }
        }
        Ok(())
    }

    pub fn debugger(&self) -> &Debugger {
        &self.debugger
    }

    pub fn debugger_mut(&mut self) -> &mut Debugger {
        &mut self.debugger
    }

    pub fn stats(&self) -> SessionStats {
        self.stats
    }

    /// デバッガとハンドラを取り出す
    pub fn into_parts(self) -> (Debugger, H) {
        (self.debugger, self.handler)
    }
}
