//! 実行イベント

use std::fmt;
use std::path::{Path, PathBuf};

/// イベントの種類
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// 新しい行の実行
    Line,
    /// メソッド呼び出し
    Call,
    /// ブロック呼び出し（合成的な呼び出し）
    BlockCall,
    /// メソッドからの復帰
    Return,
    /// ブロックからの復帰（合成的な復帰）
    BlockReturn,
}

impl EventKind {
    /// トレース形式でのキーワードからイベント種別を得る
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "line" => Some(EventKind::Line),
            "call" => Some(EventKind::Call),
            "b_call" => Some(EventKind::BlockCall),
            "return" => Some(EventKind::Return),
            "b_return" => Some(EventKind::BlockReturn),
            _ => None,
        }
    }

    /// トレース形式でのキーワード
    pub fn keyword(self) -> &'static str {
        match self {
            EventKind::Line => "line",
            EventKind::Call => "call",
            EventKind::BlockCall => "b_call",
            EventKind::Return => "return",
            EventKind::BlockReturn => "b_return",
        }
    }

    /// 呼び出し深さを1つ増やすイベントか
    pub fn is_call(self) -> bool {
        matches!(self, EventKind::Call | EventKind::BlockCall)
    }

    /// 呼び出し深さを1つ減らすイベントか
    pub fn is_return(self) -> bool {
        matches!(self, EventKind::Return | EventKind::BlockReturn)
    }
}

/// 行イベントが指すソース位置
///
/// `label` は定義スコープ・メソッド名（例: `Foo#bar`）で、表示専用です。
/// 停止判定には使われません。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub path: PathBuf,
    pub line: u32,
    pub label: Option<String>,
}

impl Frame {
    /// ラベルなしのフレームを作成する
    pub fn new(path: impl Into<PathBuf>, line: u32) -> Self {
        Self {
            path: path.into(),
            line,
            label: None,
        }
    }

    /// ラベルを付与する
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.label {
            Some(label) => write!(f, "{} ({}:{})", label, self.path.display(), self.line),
            None => write!(f, "{}:{}", self.path.display(), self.line),
        }
    }
}

/// 実行イベント
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TraceEvent {
    /// 行実行（位置情報付き）
    Line(Frame),
    /// 深さだけに影響するイベント（位置情報なし）
    Depth(EventKind),
}

impl TraceEvent {
    /// 行イベントを作成する
    pub fn line(path: impl Into<PathBuf>, line: u32) -> Self {
        TraceEvent::Line(Frame::new(path, line))
    }

    pub fn call() -> Self {
        TraceEvent::Depth(EventKind::Call)
    }

    pub fn ret() -> Self {
        TraceEvent::Depth(EventKind::Return)
    }

    /// イベントの種類
    pub fn kind(&self) -> EventKind {
        match self {
            TraceEvent::Line(_) => EventKind::Line,
            TraceEvent::Depth(kind) => *kind,
        }
    }
}

impl fmt::Display for TraceEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TraceEvent::Line(frame) => {
                write!(f, "line {}:{}", frame.path.display(), frame.line)?;
                if let Some(label) = &frame.label {
                    write!(f, " {}", label)?;
                }
                Ok(())
            }
            TraceEvent::Depth(kind) => f.write_str(kind.keyword()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_roundtrip() {
        for kind in [
            EventKind::Line,
            EventKind::Call,
            EventKind::BlockCall,
            EventKind::Return,
            EventKind::BlockReturn,
        ] {
            assert_eq!(EventKind::from_keyword(kind.keyword()), Some(kind));
        }
        assert_eq!(EventKind::from_keyword("c_call"), None);
    }

    #[test]
    fn test_call_return_classification() {
        assert!(EventKind::Call.is_call());
        assert!(EventKind::BlockCall.is_call());
        assert!(EventKind::Return.is_return());
        assert!(EventKind::BlockReturn.is_return());
        assert!(!EventKind::Line.is_call());
        assert!(!EventKind::Line.is_return());
    }

    #[test]
    fn test_frame_display() {
        let frame = Frame::new("a.rb", 10);
        assert_eq!(frame.to_string(), "a.rb:10");

        let frame = frame.with_label("Foo#bar");
        assert_eq!(frame.to_string(), "Foo#bar (a.rb:10)");
    }
}
