//! セッション全体を通したステップ実行のテスト

use minidbg_core::{
    Debugger, DebuggerConfig, PauseContext, PauseHandler, Result, Session, StepCommand, StepState,
};
use minidbg_trace::{TraceEvent, TraceReader, VecSource};
use std::collections::VecDeque;
use std::io::Write;
use std::path::PathBuf;

/// 停止のたびに記録を取り、予定されたコマンドを順に返すハンドラ
#[derive(Default)]
struct Scripted {
    commands: VecDeque<StepCommand>,
    /// (ファイル, 行, 深さ, ヒットしたブレークポイント名)
    pauses: Vec<(String, u32, i64, Vec<String>)>,
}

impl Scripted {
    fn new(commands: impl IntoIterator<Item = StepCommand>) -> Self {
        Self {
            commands: commands.into_iter().collect(),
            pauses: Vec::new(),
        }
    }

    /// 停止位置を `FILE:LINE` で返す
    fn locations(&self) -> Vec<String> {
        self.pauses
            .iter()
            .map(|(file, line, _, _)| format!("{}:{}", file, line))
            .collect()
    }
}

impl PauseHandler for Scripted {
    fn on_pause(&mut self, ctx: &mut PauseContext<'_>) -> Result<StepCommand> {
        let frame = ctx.frame();
        self.pauses.push((
            frame.path.display().to_string(),
            frame.line,
            ctx.depth(),
            ctx.hits().to_vec(),
        ));
        Ok(self.commands.pop_front().unwrap_or(StepCommand::Continue))
    }
}

fn sample_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/data/sample.trace")
}

fn run_events(
    debugger: Debugger,
    events: Vec<TraceEvent>,
    handler: Scripted,
) -> (Debugger, Scripted) {
    let mut session = Session::new(debugger, VecSource::new(events), handler);
    session.run().unwrap();
    session.into_parts()
}

#[test]
fn test_breakpoint_scenario() {
    let mut dbg = Debugger::default();
    dbg.add_breakpoint("bp1", "a.rb", 10);

    let events = vec![
        TraceEvent::line("a.rb", 10),
        TraceEvent::line("a.rb", 11),
        TraceEvent::line("a.rb", 10),
    ];
    let (dbg, handler) = run_events(dbg, events, Scripted::new([StepCommand::Continue]));

    assert_eq!(handler.pauses.len(), 2);
    assert_eq!(
        handler.pauses[0],
        ("a.rb".to_string(), 10, 0, vec!["bp1".to_string()])
    );
    assert_eq!(handler.pauses[1].3, vec!["bp1".to_string()]);
    assert_eq!(dbg.state(), StepState::Running);
}

#[test]
fn test_step_over_runs_through_call() {
    let mut dbg = Debugger::default();
    dbg.add_breakpoint("bp", "a.rb", 1);

    let events = vec![
        TraceEvent::line("a.rb", 1),
        TraceEvent::call(),
        TraceEvent::line("b.rb", 20),
        TraceEvent::ret(),
        TraceEvent::line("a.rb", 2),
    ];
    let (_, handler) = run_events(dbg, events, Scripted::new([StepCommand::StepOver]));
    assert_eq!(handler.locations(), vec!["a.rb:1", "a.rb:2"]);
    assert_eq!(handler.pauses[1].2, 0);
}

#[test]
fn test_step_in_enters_call() {
    let mut dbg = Debugger::default();
    dbg.add_breakpoint("bp", "a.rb", 1);

    let events = vec![
        TraceEvent::line("a.rb", 1),
        TraceEvent::call(),
        TraceEvent::line("b.rb", 20),
        TraceEvent::ret(),
        TraceEvent::line("a.rb", 2),
    ];
    let (_, handler) = run_events(dbg, events, Scripted::new([StepCommand::StepIn]));
    assert_eq!(handler.locations(), vec!["a.rb:1", "b.rb:20", "a.rb:2"]);
    assert_eq!(handler.pauses[1].2, 1);
}

#[test]
fn test_step_out_pauses_in_caller() {
    let mut dbg = Debugger::default();
    dbg.add_breakpoint("inner", "b.rb", 20);

    let events = vec![
        TraceEvent::line("a.rb", 1),
        TraceEvent::call(),
        TraceEvent::line("b.rb", 20),
        TraceEvent::line("b.rb", 21),
        TraceEvent::call(),
        TraceEvent::line("c.rb", 5),
        TraceEvent::ret(),
        TraceEvent::line("b.rb", 22),
        TraceEvent::ret(),
        TraceEvent::line("a.rb", 2),
    ];
    let (_, handler) = run_events(dbg, events, Scripted::new([StepCommand::StepOut]));
    assert_eq!(handler.locations(), vec!["b.rb:20", "a.rb:2"]);
    assert_eq!(handler.pauses[1].2, 0);
}

#[test]
fn test_deleted_breakpoint_does_not_pause() {
    let mut dbg = Debugger::default();
    dbg.add_breakpoint("bp", "a.rb", 5)
        .add_breakpoint("bp", "a.rb", 5)
        .add_breakpoint("keep", "a.rb", 6);
    dbg.delete_breakpoint("bp");

    let events = vec![TraceEvent::line("a.rb", 5), TraceEvent::line("a.rb", 6)];
    let (_, handler) = run_events(dbg, events, Scripted::default());
    assert_eq!(handler.locations(), vec!["a.rb:6"]);
}

#[test]
fn test_replay_sample_trace_with_step_in() {
    let mut dbg = Debugger::default();
    dbg.add_breakpoint("entry", "main.rb", 2);

    let handler = Scripted::new([
        StepCommand::StepIn,   // main.rb:2 -> fib.rb:2
        StepCommand::StepOver, // fib.rb:2 -> fib.rb:3
        StepCommand::StepOver, // fib.rb:3 -> ブロック内は飛ばして fib.rb:6
        StepCommand::StepOut,  // fib.rb:6 -> main.rb:3
        StepCommand::Continue,
    ]);
    let reader = TraceReader::open(sample_path()).unwrap();
    let mut session = Session::new(dbg, reader, handler);
    let stats = session.run().unwrap();
    let (dbg, handler) = session.into_parts();

    assert_eq!(
        handler.pauses,
        vec![
            ("main.rb".to_string(), 2, 0, vec!["entry".to_string()]),
            ("fib.rb".to_string(), 2, 1, vec![]),
            ("fib.rb".to_string(), 3, 1, vec![]),
            ("fib.rb".to_string(), 6, 1, vec![]),
            ("main.rb".to_string(), 3, 0, vec![]),
        ]
    );
    assert_eq!(stats.pauses, 5);
    assert_eq!(stats.skipped, 0);
    assert_eq!(dbg.depth(), 0);
    assert_eq!(dbg.state(), StepState::Running);
}

#[test]
fn test_lazy_subscription_matches_always_on() {
    let run = |config: DebuggerConfig| {
        let mut dbg = Debugger::new(config);
        dbg.add_breakpoint("compute", "fib.rb", 3);
        let handler = Scripted::new([
            StepCommand::StepOver,
            StepCommand::StepOut,
            StepCommand::Continue,
            StepCommand::StepIn,
            StepCommand::Continue,
        ]);
        let reader = TraceReader::open(sample_path()).unwrap();
        let mut session = Session::new(dbg, reader, handler);
        let stats = session.run().unwrap();
        (session.into_parts().1.locations(), stats)
    };

    let (always, always_stats) = run(DebuggerConfig::default());
    let (lazy, lazy_stats) = run(DebuggerConfig::lazy());

    assert_eq!(
        always,
        vec!["fib.rb:3", "fib.rb:6", "main.rb:3", "fib.rb:3", "fib.rb:4"]
    );
    assert_eq!(lazy, always);
    assert_eq!(always_stats.skipped, 0);
    assert!(lazy_stats.skipped > 0);
}

#[test]
fn test_malformed_trace_stops_before_controller() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "line a.rb:1").unwrap();
    writeln!(file, "c_return").unwrap();
    writeln!(file, "line a.rb:2").unwrap();

    let mut dbg = Debugger::default();
    dbg.add_breakpoint("bp", "a.rb", 2);
    let reader = TraceReader::open(file.path()).unwrap();
    let mut session = Session::new(dbg, reader, Scripted::default());

    let err = session.run().unwrap_err();
    assert!(err.to_string().contains("line 2"));
    assert_eq!(session.stats().events, 1);
    assert!(!session.debugger().is_paused());
}
