//! Wavefront OBJ 解析模块
//!
//! 逐行扫描输入流，按第一个字段分类后分派到对应的属性/面解析器，
//! 解析结果交给 `ElementSink`。提供两种访问方式：
//!
//! - `decode`：整文档解码，返回完整的 `Document` 或第一个错误
//! - `stream`：回调模式，每解析出一个元素就交给调用方的回调
//!
//! 两种方式共用 `parse` 这一条解析路径，校验规则完全一致。
//!
//! # 支持的元素
//!
//! ```text
//! # comment
//! v  x y z [w]      位置，w 缺省为 1
//! vt u v [w]        纹理坐标，w 缺省为 0
//! vn x y z          法线
//! f  v1 v2 v3       三角面，顶点为 p、p/t、p/t/n 或 p//n
//! ```
//!
//! 其他关键字记录日志后跳过。
//!
//! # 使用示例
//!
//! ```rust
//! use dist_obj::geometry::obj;
//!
//! let input = "v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n";
//! let doc = obj::decode(input.as_bytes())?;
//! assert_eq!(doc.faces().len(), 1);
//! # Ok::<(), dist_obj::core::ObjParseError>(())
//! ```

pub mod attribute;
pub mod document;
pub mod element;
pub mod face;
pub mod scanner;
pub mod sink;

use std::io::BufRead;

use tracing::{debug, warn};

use crate::core::config::LoaderConfig;
use crate::core::error::ObjParseError;

pub use document::{Document, DocumentBuilder};
pub use element::ElementKind;
pub use face::AttributeCounts;
pub use sink::{Callbacks, CallbacksBuilder, ElementSink};

use scanner::LineScanner;

/// 解析选项
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeOptions {
    /// 不支持的元素以 warn 级别报告（否则 debug）
    pub warn_unsupported: bool,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            warn_unsupported: true,
        }
    }
}

impl From<&LoaderConfig> for DecodeOptions {
    fn from(config: &LoaderConfig) -> Self {
        Self {
            warn_unsupported: config.warn_unsupported,
        }
    }
}

/// 一次解析调用的统计
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ParseSummary {
    /// 读取的总行数（包括空行）
    pub lines: usize,

    /// 各属性集合的元素数量
    pub counts: AttributeCounts,

    /// 面的数量
    pub faces: usize,

    /// 被跳过的不支持元素数量
    pub unsupported: usize,
}

/// 整文档解码
pub fn decode<R: BufRead>(reader: R) -> Result<Document, ObjParseError> {
    decode_with(reader, &DecodeOptions::default())
}

/// 带选项的整文档解码
///
/// 出错时已累积的数据全部丢弃。
pub fn decode_with<R: BufRead>(reader: R, options: &DecodeOptions) -> Result<Document, ObjParseError> {
    let mut builder = DocumentBuilder::new();
    let summary = parse(reader, &mut builder, options)?;

    debug!(
        lines = summary.lines,
        positions = summary.counts.positions,
        texcoords = summary.counts.texcoords,
        normals = summary.counts.normals,
        faces = summary.faces,
        unsupported = summary.unsupported,
        "OBJ decoded"
    );

    Ok(builder.build())
}

/// 回调模式：把每个解析出的元素交给调用方的回调
///
/// `Callbacks` 只能在四个回调都提供时构造，因此这里不会出现未绑定的回调。
pub fn stream<R: BufRead>(
    reader: R,
    mut callbacks: Callbacks<'_>,
    options: &DecodeOptions,
) -> Result<ParseSummary, ObjParseError> {
    parse(reader, &mut callbacks, options)
}

/// 解析整个输入流，把元素依次交给 `sink`
///
/// 遇到第一个错误立即返回；已经交给 `sink` 的元素由调用方决定是否丢弃。
pub fn parse<R, S>(reader: R, sink: &mut S, options: &DecodeOptions) -> Result<ParseSummary, ObjParseError>
where
    R: BufRead,
    S: ElementSink + ?Sized,
{
    let mut scanner = LineScanner::new(reader);
    let mut summary = ParseSummary::default();

    for record in scanner.by_ref() {
        let record = record.map_err(ObjParseError::Stream)?;
        let line = record.number();
        let fields: Vec<&str> = record.fields().collect();
        let Some((&keyword, rest)) = fields.split_first() else {
            continue;
        };

        let syntax = |kind| ObjParseError::Syntax { line, kind };

        match ElementKind::classify(keyword) {
            ElementKind::Comment => {}
            ElementKind::Position => {
                let position = attribute::parse_position(rest).map_err(syntax)?;
                sink.position(position);
                summary.counts.positions += 1;
            }
            ElementKind::Texcoord => {
                let texcoord = attribute::parse_texcoord(rest).map_err(syntax)?;
                sink.texcoord(texcoord);
                summary.counts.texcoords += 1;
            }
            ElementKind::Normal => {
                let normal = attribute::parse_normal(rest).map_err(syntax)?;
                sink.normal(normal);
                summary.counts.normals += 1;
            }
            ElementKind::Face => {
                let face = face::parse_face(rest, &summary.counts).map_err(|e| e.at_line(line))?;
                sink.face(face);
                summary.faces += 1;
            }
            ElementKind::Unsupported => {
                summary.unsupported += 1;
                if options.warn_unsupported {
                    warn!(line, element = keyword, "element not supported");
                } else {
                    debug!(line, element = keyword, "element not supported");
                }
            }
        }
    }

    summary.lines = scanner.lines_read();
    Ok(summary)
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::{Attribute, IndexError, SyntaxError};
    use crate::geometry::vertex::VertexIndex;
    use std::io;

    const TRIANGLE: &str = "v 0 0 0\nv 1 0 0\nv 0 1 0\n";

    fn triples(doc: &Document, face: usize) -> [(u32, u32, u32); 3] {
        doc.faces()[face].map(|v| (v.position, v.texcoord, v.normal))
    }

    #[test]
    fn test_scenario_a_positions_and_sentinels() {
        let input = format!("{}f 1 2 3\n", TRIANGLE);
        let doc = decode(input.as_bytes()).unwrap();

        assert_eq!(
            doc.positions(),
            &[[0.0, 0.0, 0.0, 1.0], [1.0, 0.0, 0.0, 1.0], [0.0, 1.0, 0.0, 1.0]]
        );
        assert_eq!(doc.faces().len(), 1);
        assert_eq!(triples(&doc, 0), [(0, 0, 0), (1, 0, 0), (2, 0, 0)]);
        assert!(doc.texcoords().is_empty());
        assert!(doc.normals().is_empty());
    }

    #[test]
    fn test_scenario_b_relative_equals_absolute() {
        let relative = decode(format!("{}f -1 -2 -3\n", TRIANGLE).as_bytes()).unwrap();
        let absolute = decode(format!("{}f 3 2 1\n", TRIANGLE).as_bytes()).unwrap();
        assert_eq!(relative.faces(), absolute.faces());
        assert_eq!(triples(&relative, 0), [(2, 0, 0), (1, 0, 0), (0, 0, 0)]);
    }

    #[test]
    fn test_scenario_c_zero_index() {
        let input = format!("{}f 0 1 2\n", TRIANGLE);
        let err = decode(input.as_bytes()).unwrap_err();

        assert_eq!(err.line(), Some(4));
        match err {
            ObjParseError::Index { kind: IndexError::Zero { attribute, .. }, .. } => {
                assert_eq!(attribute, Attribute::Position)
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_zero_index_rejected_regardless_of_size() {
        let input = format!("{}{}{}f 1 2 0\n", TRIANGLE, TRIANGLE, TRIANGLE);
        assert!(decode(input.as_bytes()).unwrap_err().is_index());
        assert!(decode("f 0 0 0\n".as_bytes()).unwrap_err().is_index());
    }

    #[test]
    fn test_scenario_d_mixed_elision() {
        let input = format!("{}vt 0 0\nvn 0 0 1\nvn 0 1 0\nf 1/1/1 2//2 3/1/1\n", TRIANGLE);
        let err = decode(input.as_bytes()).unwrap_err();
        assert!(err.is_syntax());
        assert_eq!(err.line(), Some(7));
        assert!(matches!(
            err,
            ObjParseError::Syntax { kind: SyntaxError::TexcoordElisionMismatch { vertex: 1 }, .. }
        ));
    }

    #[test]
    fn test_fixture_counts() {
        let input = fixtures::synthetic(1026, 1088, 2048, 2048);
        let doc = decode(input.as_bytes()).unwrap();

        assert_eq!(doc.positions().len(), 1026);
        assert_eq!(doc.texcoords().len(), 1088);
        assert_eq!(doc.normals().len(), 2048);
        assert_eq!(doc.faces().len(), 2048);
    }

    #[test]
    fn test_resolved_indices_in_bounds() {
        let input = fixtures::synthetic(50, 30, 20, 200);
        let doc = decode(input.as_bytes()).unwrap();

        for face in doc.faces() {
            for v in face {
                assert!((v.position as usize) < doc.positions().len());
                assert!((v.texcoord as usize) < doc.texcoords().len());
                assert!((v.normal as usize) < doc.normals().len());
            }
        }
    }

    #[test]
    fn test_texcoord_and_position_defaults() {
        let input = "v 1 2 3 4\nv 1 2 3\nvt 0.5 0.25\nvt 0.5 0.25 0.125\n";
        let doc = decode(input.as_bytes()).unwrap();
        assert_eq!(doc.positions()[0][3], 4.0);
        assert_eq!(doc.positions()[1][3], 1.0);
        assert_eq!(doc.texcoords()[0], [0.5, 0.25, 0.0]);
        assert_eq!(doc.texcoords()[1], [0.5, 0.25, 0.125]);
    }

    #[test]
    fn test_no_forward_references() {
        // 面只能引用此前已声明的属性
        let input = "v 0 0 0\nv 1 0 0\nf 1 2 3\nv 0 1 0\n";
        let err = decode(input.as_bytes()).unwrap_err();
        assert_eq!(err.line(), Some(3));
        assert!(matches!(
            err,
            ObjParseError::Index { kind: IndexError::OutOfRange { raw: 3, len: 2, .. }, .. }
        ));
    }

    #[test]
    fn test_relative_index_uses_length_at_face_time() {
        let input = "v 0 0 0\nv 1 0 0\nv 0 1 0\nf -3 -2 -1\nv 5 5 5\nf -3 -2 -1\n";
        let doc = decode(input.as_bytes()).unwrap();
        assert_eq!(doc.faces()[0][0], VertexIndex::new(0, 0, 0));
        assert_eq!(doc.faces()[1][0], VertexIndex::new(1, 0, 0));
        assert_eq!(doc.faces()[1][2], VertexIndex::new(3, 0, 0));
    }

    #[test]
    fn test_comments_blank_and_unsupported_lines() {
        let input = "# header\n\n   \no cube\ng group\ns 1\nusemtl red\n#v 9 9 9\nv 0 0 0\nvp 1 2\n";
        let mut builder = DocumentBuilder::new();
        let summary = parse(input.as_bytes(), &mut builder, &DecodeOptions::default()).unwrap();
        let doc = builder.build();

        assert_eq!(doc.positions().len(), 1);
        assert_eq!(summary.unsupported, 5);
        assert_eq!(summary.lines, 10);
    }

    #[test]
    fn test_quads_rejected() {
        let input = "v 0 0 0\nv 1 0 0\nv 1 1 0\nv 0 1 0\nf 1 2 3 4\n";
        let err = decode(input.as_bytes()).unwrap_err();
        assert_eq!(err.line(), Some(5));
        assert!(matches!(
            err,
            ObjParseError::Syntax { kind: SyntaxError::FieldCount { element: "f", found: 4, .. }, .. }
        ));
    }

    #[test]
    fn test_syntax_errors_carry_line_numbers() {
        let cases = [
            ("v 1 2\n", 1),
            ("\n\nvt 1\n", 3),
            ("vn 0 0\n", 1),
            ("# c\nv 1 two 3\n", 2),
            ("v 1 2 3 # trailing\n", 1),
        ];
        for (input, line) in cases {
            let err = decode(input.as_bytes()).unwrap_err();
            assert!(err.is_syntax(), "{:?}", input);
            assert_eq!(err.line(), Some(line), "{:?}", input);
        }
    }

    #[test]
    fn test_out_of_range_float_aborts_decode() {
        let err = decode("v 1e40 0 0\n".as_bytes()).unwrap_err();
        assert!(err.is_syntax());
        assert_eq!(err.line(), Some(1));

        let err = decode(format!("{}vn 0 0 -1e39\n", TRIANGLE).as_bytes()).unwrap_err();
        assert!(matches!(
            err,
            ObjParseError::Syntax { line: 4, kind: SyntaxError::InvalidNumber { .. } }
        ));
    }

    #[test]
    fn test_stream_error_is_distinct() {
        struct Failing(bool);
        impl io::Read for Failing {
            fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
                if self.0 {
                    return Err(io::Error::new(io::ErrorKind::ConnectionReset, "reset"));
                }
                self.0 = true;
                let data = b"v 0 0 0\n";
                buf[..data.len()].copy_from_slice(data);
                Ok(data.len())
            }
        }

        let err = decode(io::BufReader::new(Failing(false))).unwrap_err();
        match err {
            ObjParseError::Stream(e) => assert_eq!(e.kind(), io::ErrorKind::ConnectionReset),
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_stream_mode_matches_decode() {
        let input = fixtures::synthetic(40, 40, 10, 60);
        let doc = decode(input.as_bytes()).unwrap();

        let mut positions = Vec::new();
        let mut texcoords = 0;
        let mut normals = 0;
        let mut faces = Vec::new();
        let summary = {
            let callbacks = Callbacks::builder()
                .on_position(|p| positions.push(p))
                .on_texcoord(|_| texcoords += 1)
                .on_normal(|_| normals += 1)
                .on_face(|f| faces.push(f))
                .build()
                .unwrap();
            stream(input.as_bytes(), callbacks, &DecodeOptions::default()).unwrap()
        };

        assert_eq!(positions.as_slice(), doc.positions());
        assert_eq!(texcoords, doc.texcoords().len());
        assert_eq!(normals, doc.normals().len());
        assert_eq!(faces.as_slice(), doc.faces());
        assert_eq!(summary.faces, doc.faces().len());
    }

    #[test]
    fn test_stream_mode_applies_same_validation() {
        let callbacks = Callbacks::builder()
            .on_position(|_| {})
            .on_texcoord(|_| {})
            .on_normal(|_| {})
            .on_face(|_| {})
            .build()
            .unwrap();
        let input = format!("{}f 1 2 4\n", TRIANGLE);
        let err = stream(input.as_bytes(), callbacks, &DecodeOptions::default()).unwrap_err();
        assert!(err.is_index());
        assert_eq!(err.line(), Some(4));
    }

    #[test]
    fn test_options_from_loader_config() {
        let config = LoaderConfig {
            warn_unsupported: false,
            keep_last_good: true,
        };
        assert!(!DecodeOptions::from(&config).warn_unsupported);
    }
}
