//! 属性解析
//!
//! 把 `v` / `vt` / `vn` 后面的数值字段转换成定长的 f32 向量，
//! 并按格式规定填充缺省分量。行号由调用方附加。

use std::ops::RangeInclusive;

use crate::core::error::SyntaxError;
use crate::geometry::vertex::{Normal, Position, TexCoord};

/// `v x y z [w]`，w 缺省为 1
pub fn parse_position(fields: &[&str]) -> Result<Position, SyntaxError> {
    check_count("v", "3 or 4", 3..=4, fields.len())?;
    parse_components(fields, [0.0, 0.0, 0.0, 1.0])
}

/// `vt u v [w]`，w 缺省为 0；只有一个分量的纹理坐标不接受
pub fn parse_texcoord(fields: &[&str]) -> Result<TexCoord, SyntaxError> {
    check_count("vt", "2 or 3", 2..=3, fields.len())?;
    parse_components(fields, [0.0; 3])
}

/// `vn x y z`
pub fn parse_normal(fields: &[&str]) -> Result<Normal, SyntaxError> {
    check_count("vn", "3", 3..=3, fields.len())?;
    parse_components(fields, [0.0; 3])
}

fn check_count(
    element: &'static str,
    expected: &'static str,
    allowed: RangeInclusive<usize>,
    found: usize,
) -> Result<(), SyntaxError> {
    if allowed.contains(&found) {
        Ok(())
    } else {
        Err(SyntaxError::FieldCount {
            element,
            expected,
            found,
        })
    }
}

/// 依次覆盖 `defaults` 中的分量，未提供的分量保持缺省值
fn parse_components<const N: usize>(
    fields: &[&str],
    defaults: [f32; N],
) -> Result<[f32; N], SyntaxError> {
    let mut out = defaults;
    for (slot, field) in out.iter_mut().zip(fields) {
        *slot = parse_float(field)?;
    }
    Ok(out)
}

/// 超出 f32 范围的有限数值视为错误，显式写出的 inf / nan 保留
fn parse_float(field: &str) -> Result<f32, SyntaxError> {
    let value = field.parse::<f32>().map_err(|e| SyntaxError::InvalidNumber {
        field: field.to_string(),
        reason: e.to_string(),
    })?;

    if !value.is_finite() && !is_non_finite_literal(field) {
        return Err(SyntaxError::InvalidNumber {
            field: field.to_string(),
            reason: "value out of range for f32".to_string(),
        });
    }

    Ok(value)
}

fn is_non_finite_literal(field: &str) -> bool {
    let unsigned = field.trim_start_matches(['+', '-']);
    ["inf", "infinity", "nan"]
        .iter()
        .any(|literal| unsigned.eq_ignore_ascii_case(literal))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_defaults_w() {
        assert_eq!(parse_position(&["1", "2.5", "-3"]).unwrap(), [1.0, 2.5, -3.0, 1.0]);
        assert_eq!(parse_position(&["1", "2", "3", "0.5"]).unwrap(), [1.0, 2.0, 3.0, 0.5]);
    }

    #[test]
    fn test_position_field_count() {
        assert_eq!(
            parse_position(&["1", "2"]),
            Err(SyntaxError::FieldCount { element: "v", expected: "3 or 4", found: 2 })
        );
        assert!(parse_position(&["1", "2", "3", "4", "5"]).is_err());
    }

    #[test]
    fn test_texcoord_defaults_w() {
        assert_eq!(parse_texcoord(&["0.25", "0.75"]).unwrap(), [0.25, 0.75, 0.0]);
        assert_eq!(parse_texcoord(&["0.25", "0.75", "1"]).unwrap(), [0.25, 0.75, 1.0]);
    }

    #[test]
    fn test_single_component_texcoord_rejected() {
        assert!(matches!(
            parse_texcoord(&["0.5"]),
            Err(SyntaxError::FieldCount { element: "vt", found: 1, .. })
        ));
    }

    #[test]
    fn test_normal_requires_exactly_three() {
        assert_eq!(parse_normal(&["0", "1", "0"]).unwrap(), [0.0, 1.0, 0.0]);
        assert!(parse_normal(&["0", "1"]).is_err());
        assert!(parse_normal(&["0", "1", "0", "1"]).is_err());
    }

    #[test]
    fn test_invalid_number_names_field() {
        match parse_normal(&["0", "up", "0"]) {
            Err(SyntaxError::InvalidNumber { field, .. }) => assert_eq!(field, "up"),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_overflow_rejected() {
        match parse_position(&["1e40", "0", "0"]) {
            Err(SyntaxError::InvalidNumber { field, reason }) => {
                assert_eq!(field, "1e40");
                assert!(reason.contains("out of range"));
            }
            other => panic!("unexpected result: {:?}", other),
        }
        assert!(parse_normal(&["0", "-3.5e38", "0"]).is_err());
    }

    #[test]
    fn test_explicit_non_finite_literals_kept() {
        assert!(parse_normal(&["inf", "-Infinity", "0"]).unwrap()[1].is_infinite());
        assert!(parse_texcoord(&["NaN", "0"]).unwrap()[0].is_nan());
    }

    #[test]
    fn test_exponent_notation() {
        assert_eq!(parse_position(&["1e-3", "-2E2", "0"]).unwrap(), [0.001, -200.0, 0.0, 1.0]);
    }
}
