//! 面解析与索引解析
//!
//! `f` 行必须恰好包含 3 个顶点描述，每个描述是 `p`、`p/t`、`p/t/n` 或 `p//n`。
//! 第一个顶点的分量数作为整个面的模板；所有原始索引先完成语法检查，
//! 再相对于各属性集合的 *当前* 长度解析成 0 基索引。
//!
//! 正索引 `k` 指向第 k 个已声明的元素，负索引 `-k` 解析为 `len - k`，
//! 两者都必须落在 `[0, len)` 内。

use crate::core::error::{Attribute, IndexError, ObjParseError, SyntaxError};
use crate::geometry::vertex::{Face, VertexIndex};

/// 解析面时各属性集合的当前长度
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct AttributeCounts {
    pub positions: usize,
    pub texcoords: usize,
    pub normals: usize,
}

impl AttributeCounts {
    fn of(&self, attribute: Attribute) -> usize {
        match attribute {
            Attribute::Position => self.positions,
            Attribute::Texcoord => self.texcoords,
            Attribute::Normal => self.normals,
        }
    }
}

/// 面解析错误，由调用方附加行号
#[derive(Debug, Clone, PartialEq)]
pub enum FaceError {
    Syntax(SyntaxError),
    Index(IndexError),
}

impl FaceError {
    pub fn at_line(self, line: usize) -> ObjParseError {
        match self {
            FaceError::Syntax(kind) => ObjParseError::Syntax { line, kind },
            FaceError::Index(kind) => ObjParseError::Index { line, kind },
        }
    }
}

impl From<SyntaxError> for FaceError {
    fn from(err: SyntaxError) -> Self {
        FaceError::Syntax(err)
    }
}

impl From<IndexError> for FaceError {
    fn from(err: IndexError) -> Self {
        FaceError::Index(err)
    }
}

/// 尚未解析的原始索引（1 基或负数相对索引）
#[derive(Debug, Default, Clone, Copy)]
struct RawVertex {
    position: i32,
    texcoord: Option<i32>,
    normal: Option<i32>,
}

/// 解析一条 `f` 行（不含关键字本身）
///
/// 任何错误都不会产生部分结果。
pub fn parse_face(fields: &[&str], counts: &AttributeCounts) -> Result<Face, FaceError> {
    if fields.len() != 3 {
        return Err(SyntaxError::FieldCount {
            element: "f",
            expected: "3",
            found: fields.len(),
        }
        .into());
    }

    let mut split: [Vec<&str>; 3] = Default::default();
    for (i, field) in fields.iter().enumerate() {
        let sub_fields: Vec<&str> = field.split('/').collect();
        if sub_fields.len() > 3 {
            return Err(SyntaxError::TooManyIndexFields {
                vertex: i,
                found: sub_fields.len(),
            }
            .into());
        }
        split[i] = sub_fields;
    }

    // 第一个顶点是后续顶点的模板
    let arity = split[0].len();
    let skip_texcoord = arity == 3 && split[0][1].is_empty();

    let mut raw = [RawVertex::default(); 3];
    for (i, sub_fields) in split.iter().enumerate() {
        raw[i] = parse_raw_vertex(i, sub_fields, arity, skip_texcoord)?;
    }

    let mut face = [VertexIndex::default(); 3];
    for (i, vertex) in raw.iter().enumerate() {
        face[i].position = resolve(vertex.position, Attribute::Position, i, counts)?;
        if let Some(texcoord) = vertex.texcoord {
            face[i].texcoord = resolve(texcoord, Attribute::Texcoord, i, counts)?;
        }
        if let Some(normal) = vertex.normal {
            face[i].normal = resolve(normal, Attribute::Normal, i, counts)?;
        }
    }

    Ok(face)
}

fn parse_raw_vertex(
    vertex: usize,
    sub_fields: &[&str],
    arity: usize,
    skip_texcoord: bool,
) -> Result<RawVertex, FaceError> {
    if sub_fields.len() != arity {
        return Err(SyntaxError::ArityMismatch {
            vertex,
            expected: arity,
            found: sub_fields.len(),
        }
        .into());
    }

    let position = parse_index(vertex, sub_fields[0], Attribute::Position)?;

    let texcoord = match arity {
        2 => Some(parse_index(vertex, sub_fields[1], Attribute::Texcoord)?),
        3 => {
            if sub_fields[1].is_empty() != skip_texcoord {
                return Err(SyntaxError::TexcoordElisionMismatch { vertex }.into());
            }
            if skip_texcoord {
                None
            } else {
                Some(parse_index(vertex, sub_fields[1], Attribute::Texcoord)?)
            }
        }
        _ => None,
    };

    let normal = if arity == 3 {
        Some(parse_index(vertex, sub_fields[2], Attribute::Normal)?)
    } else {
        None
    };

    Ok(RawVertex {
        position,
        texcoord,
        normal,
    })
}

fn parse_index(vertex: usize, field: &str, attribute: Attribute) -> Result<i32, FaceError> {
    let index = field.parse::<i32>().map_err(|e| SyntaxError::InvalidIndex {
        vertex,
        field: field.to_string(),
        reason: e.to_string(),
    })?;

    if index == 0 {
        return Err(IndexError::Zero { attribute, vertex }.into());
    }

    Ok(index)
}

/// 把原始索引解析为 `[0, len)` 内的 0 基索引
fn resolve(
    raw: i32,
    attribute: Attribute,
    vertex: usize,
    counts: &AttributeCounts,
) -> Result<u32, IndexError> {
    let len = counts.of(attribute);
    let resolved = if raw > 0 {
        i64::from(raw) - 1
    } else {
        len as i64 + i64::from(raw)
    };

    let out_of_range = IndexError::OutOfRange {
        attribute,
        vertex,
        raw,
        len,
    };

    if resolved < 0 || resolved >= len as i64 {
        return Err(out_of_range);
    }

    u32::try_from(resolved).map_err(|_| out_of_range)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counts(positions: usize, texcoords: usize, normals: usize) -> AttributeCounts {
        AttributeCounts {
            positions,
            texcoords,
            normals,
        }
    }

    fn triples(face: Face) -> [(u32, u32, u32); 3] {
        face.map(|v| (v.position, v.texcoord, v.normal))
    }

    #[test]
    fn test_position_only() {
        let face = parse_face(&["1", "2", "3"], &counts(3, 0, 0)).unwrap();
        assert_eq!(triples(face), [(0, 0, 0), (1, 0, 0), (2, 0, 0)]);
    }

    #[test]
    fn test_position_texcoord() {
        let face = parse_face(&["1/3", "2/2", "3/1"], &counts(3, 3, 0)).unwrap();
        assert_eq!(triples(face), [(0, 2, 0), (1, 1, 0), (2, 0, 0)]);
    }

    #[test]
    fn test_full_triples() {
        let face = parse_face(&["5/1/1", "3/2/1", "1/3/1"], &counts(5, 3, 1)).unwrap();
        assert_eq!(triples(face), [(4, 0, 0), (2, 1, 0), (0, 2, 0)]);
    }

    #[test]
    fn test_elided_texcoord() {
        let face = parse_face(&["5//1", "3//2", "1//2"], &counts(5, 0, 2)).unwrap();
        assert_eq!(triples(face), [(4, 0, 0), (2, 0, 1), (0, 0, 1)]);
    }

    #[test]
    fn test_relative_matches_absolute() {
        let relative = parse_face(&["-1", "-2", "-3"], &counts(3, 0, 0)).unwrap();
        let absolute = parse_face(&["3", "2", "1"], &counts(3, 0, 0)).unwrap();
        assert_eq!(relative, absolute);
    }

    #[test]
    fn test_relative_resolves_against_each_collection() {
        let face = parse_face(&["-1/-1/-1", "-2/-1/-2", "-3/-2/-1"], &counts(10, 4, 2)).unwrap();
        assert_eq!(triples(face), [(9, 3, 1), (8, 3, 0), (7, 2, 1)]);
    }

    #[test]
    fn test_relative_equivalence_property() {
        for n in 1..20usize {
            for k in 1..=n {
                let c = counts(n, 0, 0);
                let neg = format!("-{}", k);
                let pos = (n - k + 1).to_string();
                let relative = parse_face(&[neg.as_str(), "1", "1"], &c).unwrap();
                let absolute = parse_face(&[pos.as_str(), "1", "1"], &c).unwrap();
                assert_eq!(relative[0].position as usize, n - k);
                assert_eq!(relative, absolute);
            }
        }
    }

    #[test]
    fn test_wrong_vertex_count() {
        for fields in [&["1", "2"][..], &["1", "2", "3", "4"][..], &[][..]] {
            assert!(matches!(
                parse_face(fields, &counts(4, 0, 0)),
                Err(FaceError::Syntax(SyntaxError::FieldCount { element: "f", .. }))
            ));
        }
    }

    #[test]
    fn test_too_many_index_fields() {
        assert_eq!(
            parse_face(&["1/1/1", "2/2/2/2", "3/3/3"], &counts(3, 3, 3)),
            Err(FaceError::Syntax(SyntaxError::TooManyIndexFields { vertex: 1, found: 4 }))
        );
    }

    #[test]
    fn test_arity_mismatch() {
        assert_eq!(
            parse_face(&["1/1", "2", "3/3"], &counts(3, 3, 0)),
            Err(FaceError::Syntax(SyntaxError::ArityMismatch { vertex: 1, expected: 2, found: 1 }))
        );
    }

    #[test]
    fn test_texcoord_elision_mismatch() {
        assert_eq!(
            parse_face(&["1/1/1", "2//2", "3/3/3"], &counts(3, 3, 3)),
            Err(FaceError::Syntax(SyntaxError::TexcoordElisionMismatch { vertex: 1 }))
        );
        assert_eq!(
            parse_face(&["1//1", "2//2", "3/3/3"], &counts(3, 3, 3)),
            Err(FaceError::Syntax(SyntaxError::TexcoordElisionMismatch { vertex: 2 }))
        );
    }

    #[test]
    fn test_zero_index_rejected() {
        assert_eq!(
            parse_face(&["0", "1", "2"], &counts(100, 0, 0)),
            Err(FaceError::Index(IndexError::Zero { attribute: Attribute::Position, vertex: 0 }))
        );
        assert_eq!(
            parse_face(&["1/1/1", "2/2/0", "3/3/3"], &counts(3, 3, 3)),
            Err(FaceError::Index(IndexError::Zero { attribute: Attribute::Normal, vertex: 1 }))
        );
    }

    #[test]
    fn test_out_of_range() {
        assert_eq!(
            parse_face(&["1", "2", "4"], &counts(3, 0, 0)),
            Err(FaceError::Index(IndexError::OutOfRange {
                attribute: Attribute::Position,
                vertex: 2,
                raw: 4,
                len: 3,
            }))
        );
        assert!(matches!(
            parse_face(&["-4", "1", "2"], &counts(3, 0, 0)),
            Err(FaceError::Index(IndexError::OutOfRange { raw: -4, .. }))
        ));
        // 纹理集合为空时引用纹理索引
        assert!(matches!(
            parse_face(&["1/1", "2/1", "3/1"], &counts(3, 0, 0)),
            Err(FaceError::Index(IndexError::OutOfRange { attribute: Attribute::Texcoord, .. }))
        ));
    }

    #[test]
    fn test_syntax_checked_before_resolution() {
        // 第 0 个顶点越界，但第 2 个顶点的语法错误先被报告
        assert!(matches!(
            parse_face(&["9", "1", "x"], &counts(3, 0, 0)),
            Err(FaceError::Syntax(SyntaxError::InvalidIndex { vertex: 2, .. }))
        ));
    }

    #[test]
    fn test_invalid_index_field() {
        assert!(matches!(
            parse_face(&["1/", "2/1", "3/1"], &counts(3, 1, 0)),
            Err(FaceError::Syntax(SyntaxError::InvalidIndex { vertex: 0, .. }))
        ));
        assert!(matches!(
            parse_face(&["1.5", "2", "3"], &counts(3, 0, 0)),
            Err(FaceError::Syntax(SyntaxError::InvalidIndex { .. }))
        ));
    }

    #[test]
    fn test_at_line() {
        let err = FaceError::Index(IndexError::Zero { attribute: Attribute::Position, vertex: 0 })
            .at_line(4);
        assert_eq!(err.line(), Some(4));
        assert!(err.is_index());
    }
}
