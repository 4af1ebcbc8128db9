//! イベントソース

use crate::{Result, TraceEvent, TraceParser};
use std::collections::VecDeque;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::trace;

/// 実行イベントを順に供給するもの
///
/// `Ok(None)` はプログラムの終了を表します。
pub trait EventSource {
    fn next_event(&mut self) -> Result<Option<TraceEvent>>;
}

/// メモリ上のイベント列
#[derive(Debug, Clone, Default)]
pub struct VecSource {
    events: VecDeque<TraceEvent>,
}

impl VecSource {
    pub fn new(events: impl IntoIterator<Item = TraceEvent>) -> Self {
        Self {
            events: events.into_iter().collect(),
        }
    }

    /// 残りのイベント数
    pub fn remaining(&self) -> usize {
        self.events.len()
    }
}

impl EventSource for VecSource {
    fn next_event(&mut self) -> Result<Option<TraceEvent>> {
        Ok(self.events.pop_front())
    }
}

/// テキスト形式のトレースを逐次読み込むソース
///
/// 読み込みは1行ずつ行われるため、不正な行に到達するまでのイベントは
/// 通常どおり処理されます。
pub struct TraceReader<R> {
    reader: R,
    parser: TraceParser,
    line_no: usize,
    buf: String,
}

impl TraceReader<BufReader<File>> {
    /// トレースファイルを開く
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        Self::new(BufReader::new(file))
    }
}

impl<R: BufRead> TraceReader<R> {
    pub fn new(reader: R) -> Result<Self> {
        Ok(Self {
            reader,
            parser: TraceParser::new()?,
            line_no: 0,
            buf: String::new(),
        })
    }

    /// 最後に読み込んだ行番号
    pub fn line_no(&self) -> usize {
        self.line_no
    }
}

impl<R: BufRead> EventSource for TraceReader<R> {
    fn next_event(&mut self) -> Result<Option<TraceEvent>> {
        loop {
            self.buf.clear();
            if self.reader.read_line(&mut self.buf)? == 0 {
                return Ok(None);
            }
            self.line_no += 1;

            if let Some(event) = self.parser.parse_line(self.line_no, &self.buf)? {
                trace!("trace line {}: {}", self.line_no, event);
                return Ok(Some(event));
            }
        }
    }
}
