//! 行扫描器
//!
//! 把字节流切分成以换行结束的记录，再按空白切分字段。
//! 行号从 1 开始，空行和纯空白行计入行号但不会产出记录。

use std::io::{self, BufRead};
use std::str::SplitWhitespace;

/// 一条非空记录
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    number: usize,
    text: String,
}

impl Record {
    /// 源文件行号（从 1 开始）
    #[inline]
    pub fn number(&self) -> usize {
        self.number
    }

    /// 原始行内容（不含换行符）
    pub fn text(&self) -> &str {
        self.text.trim_end_matches(['\r', '\n'])
    }

    /// 按空白切分的字段
    pub fn fields(&self) -> SplitWhitespace<'_> {
        self.text.split_whitespace()
    }
}

/// 惰性行扫描器
///
/// 每次解析调用创建一个新的扫描器；读取失败原样返回 `io::Error`。
pub struct LineScanner<R> {
    reader: R,
    line: usize,
    buf: Vec<u8>,
}

impl<R: BufRead> LineScanner<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            line: 0,
            buf: Vec::new(),
        }
    }

    /// 已读取的行数（包括空行）
    pub fn lines_read(&self) -> usize {
        self.line
    }
}

impl<R: BufRead> Iterator for LineScanner<R> {
    type Item = io::Result<Record>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            self.buf.clear();
            match self.reader.read_until(b'\n', &mut self.buf) {
                Ok(0) => return None,
                Ok(_) => {
                    self.line += 1;
                    // 非 UTF-8 字节替换后交给字段解析报错
                    let text = String::from_utf8_lossy(&self.buf);
                    if text.trim().is_empty() {
                        continue;
                    }
                    return Some(Ok(Record {
                        number: self.line,
                        text: text.into_owned(),
                    }));
                }
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Some(Err(e)),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skips_blank_lines_but_counts_them() {
        let input = "v 1 2 3\n\n   \t\nf 1 2 3\n";
        let records: Vec<Record> = LineScanner::new(input.as_bytes())
            .collect::<io::Result<_>>()
            .unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].number(), 1);
        assert_eq!(records[1].number(), 4);
        assert_eq!(records[1].fields().collect::<Vec<_>>(), ["f", "1", "2", "3"]);
    }

    #[test]
    fn test_last_line_without_newline() {
        let mut scanner = LineScanner::new("# header\r\nvn 0 1 0".as_bytes());
        let first = scanner.next().unwrap().unwrap();
        assert_eq!(first.text(), "# header");
        let second = scanner.next().unwrap().unwrap();
        assert_eq!(second.number(), 2);
        assert_eq!(second.fields().count(), 4);
        assert!(scanner.next().is_none());
        assert_eq!(scanner.lines_read(), 2);
    }

    #[test]
    fn test_read_error_is_propagated() {
        struct Failing;
        impl io::Read for Failing {
            fn read(&mut self, _: &mut [u8]) -> io::Result<usize> {
                Err(io::Error::new(io::ErrorKind::BrokenPipe, "gone"))
            }
        }

        let mut scanner = LineScanner::new(io::BufReader::new(Failing));
        let err = scanner.next().unwrap().unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);
    }
}
