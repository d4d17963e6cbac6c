//! 元素分类
//!
//! 只根据记录的第一个字段判断元素种类。

/// OBJ 元素种类
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementKind {
    /// `#` 开头的注释
    Comment,
    /// `v`
    Position,
    /// `vt`
    Texcoord,
    /// `vn`
    Normal,
    /// `f`
    Face,
    /// 其他关键字（`o`、`g`、`s`、`usemtl` 等），记录日志后跳过
    Unsupported,
}

impl ElementKind {
    pub fn classify(token: &str) -> Self {
        if token.starts_with('#') {
            return ElementKind::Comment;
        }

        match token {
            "v" => ElementKind::Position,
            "vt" => ElementKind::Texcoord,
            "vn" => ElementKind::Normal,
            "f" => ElementKind::Face,
            _ => ElementKind::Unsupported,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify() {
        assert_eq!(ElementKind::classify("#"), ElementKind::Comment);
        assert_eq!(ElementKind::classify("#comment"), ElementKind::Comment);
        assert_eq!(ElementKind::classify("v"), ElementKind::Position);
        assert_eq!(ElementKind::classify("vt"), ElementKind::Texcoord);
        assert_eq!(ElementKind::classify("vn"), ElementKind::Normal);
        assert_eq!(ElementKind::classify("f"), ElementKind::Face);
    }

    #[test]
    fn test_exact_tokens_only() {
        assert_eq!(ElementKind::classify("vp"), ElementKind::Unsupported);
        assert_eq!(ElementKind::classify("V"), ElementKind::Unsupported);
        assert_eq!(ElementKind::classify("usemtl"), ElementKind::Unsupported);
        assert_eq!(ElementKind::classify("fo"), ElementKind::Unsupported);
    }
}
