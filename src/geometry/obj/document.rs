//! 解析结果文档
//!
//! `Document` 由一次解析调用构建，之后不可变。

use crate::geometry::vertex::{Face, Normal, Position, TexCoord};

use super::sink::ElementSink;

/// 一个输入流中全部几何声明的内存表示
///
/// 面中的索引均已解析为 0 基索引，并且在解析到该面时就已经在范围内。
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    positions: Box<[Position]>,
    texcoords: Box<[TexCoord]>,
    normals: Box<[Normal]>,
    faces: Box<[Face]>,
}

impl Document {
    pub fn positions(&self) -> &[Position] {
        &self.positions
    }

    pub fn texcoords(&self) -> &[TexCoord] {
        &self.texcoords
    }

    pub fn normals(&self) -> &[Normal] {
        &self.normals
    }

    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    pub fn has_texcoords(&self) -> bool {
        !self.texcoords.is_empty()
    }

    pub fn has_normals(&self) -> bool {
        !self.normals.is_empty()
    }

    /// 没有任何声明
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
            && self.texcoords.is_empty()
            && self.normals.is_empty()
            && self.faces.is_empty()
    }

    /// 第 `face` 个面的第 `vertex` 个顶点的位置
    pub fn vertex_position(&self, face: usize, vertex: usize) -> Option<&Position> {
        let index = self.faces.get(face)?.get(vertex)?.position;
        self.positions.get(index as usize)
    }

    /// 第 `face` 个面的第 `vertex` 个顶点的纹理坐标，文档没有纹理坐标时为 `None`
    pub fn vertex_texcoord(&self, face: usize, vertex: usize) -> Option<&TexCoord> {
        let index = self.faces.get(face)?.get(vertex)?.texcoord;
        self.texcoords.get(index as usize)
    }

    /// 第 `face` 个面的第 `vertex` 个顶点的法线，文档没有法线时为 `None`
    pub fn vertex_normal(&self, face: usize, vertex: usize) -> Option<&Normal> {
        let index = self.faces.get(face)?.get(vertex)?.normal;
        self.normals.get(index as usize)
    }
}

/// 把解析事件累积成 `Document` 的接收器
#[derive(Default, Debug)]
pub struct DocumentBuilder {
    positions: Vec<Position>,
    texcoords: Vec<TexCoord>,
    normals: Vec<Normal>,
    faces: Vec<Face>,
}

impl DocumentBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn build(self) -> Document {
        Document {
            positions: self.positions.into_boxed_slice(),
            texcoords: self.texcoords.into_boxed_slice(),
            normals: self.normals.into_boxed_slice(),
            faces: self.faces.into_boxed_slice(),
        }
    }
}

impl ElementSink for DocumentBuilder {
    fn position(&mut self, position: Position) {
        self.positions.push(position);
    }

    fn texcoord(&mut self, texcoord: TexCoord) {
        self.texcoords.push(texcoord);
    }

    fn normal(&mut self, normal: Normal) {
        self.normals.push(normal);
    }

    fn face(&mut self, face: Face) {
        self.faces.push(face);
    }
}
