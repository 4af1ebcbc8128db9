//! プロセス内レコーダ
//!
//! Rustプログラム自身に埋め込んで実行イベントを記録するためのプローブです。
//! 記録したイベント列は `VecSource` として再生できます。

use crate::{EventKind, Frame, TraceEvent, VecSource};
use std::path::PathBuf;

/// 実行イベントのレコーダ
#[derive(Debug, Clone, Default)]
pub struct Recorder {
    events: Vec<TraceEvent>,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// 行の実行を記録する
    pub fn line(&mut self, path: impl Into<PathBuf>, line: u32, label: Option<&str>) -> &mut Self {
        let mut frame = Frame::new(path, line);
        if let Some(label) = label {
            frame = frame.with_label(label);
        }
        self.events.push(TraceEvent::Line(frame));
        self
    }

    /// メソッド呼び出しを記録する
    pub fn call(&mut self) -> &mut Self {
        self.events.push(TraceEvent::Depth(EventKind::Call));
        self
    }

    /// ブロック呼び出しを記録する
    pub fn block_call(&mut self) -> &mut Self {
        self.events.push(TraceEvent::Depth(EventKind::BlockCall));
        self
    }

    /// 復帰を記録する
    pub fn ret(&mut self) -> &mut Self {
        self.events.push(TraceEvent::Depth(EventKind::Return));
        self
    }

    /// ブロックからの復帰を記録する
    pub fn block_ret(&mut self) -> &mut Self {
        self.events.push(TraceEvent::Depth(EventKind::BlockReturn));
        self
    }

    /// 記録済みのイベント
    pub fn events(&self) -> &[TraceEvent] {
        &self.events
    }

    /// トレース形式のテキストに書き出す
    pub fn to_trace_text(&self) -> String {
        let mut out = String::new();
        for event in &self.events {
            out.push_str(&event.to_string());
            out.push('\n');
        }
        out
    }

    /// 再生用のイベントソースに変換する
    pub fn into_source(self) -> VecSource {
        VecSource::new(self.events)
    }
}

/// 現在のソース位置で行イベントを記録する
///
/// ```
/// use minidbg_trace::{trace_line, Recorder};
///
/// let mut rec = Recorder::new();
/// trace_line!(rec);
/// trace_line!(rec, "demo#main");
/// assert_eq!(rec.events().len(), 2);
/// ```
#[macro_export]
macro_rules! trace_line {
    ($rec:expr) => {
        $rec.line(file!(), line!(), None)
    };
    ($rec:expr, $label:expr) => {
        $rec.line(file!(), line!(), Some($label))
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{parse_trace, EventSource};

    #[test]
    fn test_record_and_replay() {
        let mut rec = Recorder::new();
        rec.line("a.rb", 1, Some("Object#main"))
            .call()
            .line("a.rb", 5, None)
            .block_call()
            .block_ret()
            .ret();

        let mut source = rec.clone().into_source();
        assert_eq!(source.remaining(), 6);
        assert_eq!(
            source.next_event().unwrap(),
            Some(TraceEvent::Line(Frame::new("a.rb", 1).with_label("Object#main")))
        );

        let reparsed = parse_trace(&rec.to_trace_text()).unwrap();
        assert_eq!(reparsed, rec.events());
    }

    #[test]
    fn test_record_and_replay_spaced_path() {
        let mut rec = Recorder::new();
        rec.line("my project/a.rb", 3, Some("Foo#bar"))
            .call()
            .line("my project/b.rb", 8, None)
            .ret();

        let text = rec.to_trace_text();
        assert!(text.starts_with("line my project/a.rb:3 Foo#bar\n"));
        let reparsed = parse_trace(&text).unwrap();
        assert_eq!(reparsed, rec.events());
    }

    #[test]
    fn test_trace_line_macro_uses_call_site() {
        let mut rec = Recorder::new();
        let expected_line = line!() + 1;
        trace_line!(rec);
        match &rec.events()[0] {
            TraceEvent::Line(frame) => {
                assert_eq!(frame.line, expected_line);
                assert!(frame.path.ends_with("recorder.rs"));
            }
            other => panic!("unexpected event: {other}"),
        }
    }
}
