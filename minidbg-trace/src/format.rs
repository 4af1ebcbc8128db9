//! テキスト形式のトレース
//!
//! 1行に1イベントを記述します。空行と `#` で始まる行は無視されます。
//!
//! ```text
//! line a.rb:10 Foo#bar
//! call
//! b_call
//! return
//! b_return
//! ```

use crate::{EventKind, Frame, Result, TraceError, TraceEvent};
use regex::Regex;

/// トレース行のパーサ
pub struct TraceParser {
    /// `<kind> [<rest>]`
    event_pattern: Regex,
    /// `<path>:<lineno> [<label>]`
    location_pattern: Regex,
}

impl TraceParser {
    /// パーサを作成する
    pub fn new() -> Result<Self> {
        let event_pattern = Regex::new(r"^(\S+)(?:\s+(.*))?$")?;
        // パスは空白やコロンを含み得るので、`:<数字>` の直前までをパスとする
        let location_pattern = Regex::new(r"^(.+?):(\d+)(?:\s+(.+))?$")?;

        Ok(Self {
            event_pattern,
            location_pattern,
        })
    }

    /// 1行をパースする
    ///
    /// 空行とコメント行は `Ok(None)` を返します。
    /// `line_no` はエラー報告用の1始まりの行番号です。
    pub fn parse_line(&self, line_no: usize, text: &str) -> Result<Option<TraceEvent>> {
        let text = text.trim();
        if text.is_empty() || text.starts_with('#') {
            return Ok(None);
        }

        let caps = self
            .event_pattern
            .captures(text)
            .ok_or(TraceError::MissingLocation { line: line_no })?;
        let keyword = &caps[1];
        let rest = caps.get(2).map(|m| m.as_str().trim()).unwrap_or("");

        let kind = EventKind::from_keyword(keyword).ok_or_else(|| TraceError::UnknownKind {
            line: line_no,
            kind: keyword.to_string(),
        })?;

        match kind {
            EventKind::Line => self.parse_location(line_no, rest).map(Some),
            depth_kind => {
                if !rest.is_empty() {
                    return Err(TraceError::UnexpectedPayload {
                        line: line_no,
                        kind: keyword.to_string(),
                    });
                }
                Ok(Some(TraceEvent::Depth(depth_kind)))
            }
        }
    }

    fn parse_location(&self, line_no: usize, rest: &str) -> Result<TraceEvent> {
        let Some(caps) = self.location_pattern.captures(rest) else {
            // コロンはあるが行番号が数字でない
            if let Some((_, after)) = rest.rsplit_once(':') {
                let value = after.split_whitespace().next().unwrap_or("");
                return Err(TraceError::InvalidLineNumber {
                    line: line_no,
                    value: value.to_string(),
                });
            }
            return Err(TraceError::MissingLocation { line: line_no });
        };

        let value = &caps[2];
        let line = value
            .parse::<u32>()
            .ok()
            .filter(|n| *n > 0)
            .ok_or_else(|| TraceError::InvalidLineNumber {
                line: line_no,
                value: value.to_string(),
            })?;

        let mut frame = Frame::new(&caps[1], line);
        if let Some(label) = caps.get(3) {
            frame = frame.with_label(label.as_str().trim());
        }
        Ok(TraceEvent::Line(frame))
    }
}

/// トレース全体をパースする
///
/// 最初の不正な行でエラーを返します。
pub fn parse_trace(text: &str) -> Result<Vec<TraceEvent>> {
    let parser = TraceParser::new()?;
    let mut events = Vec::new();

    for (i, line) in text.lines().enumerate() {
        if let Some(event) = parser.parse_line(i + 1, line)? {
            events.push(event);
        }
    }

    Ok(events)
}
