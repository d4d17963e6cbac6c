//! 扁平网格模块
//!
//! 把 `Document` 中三套独立编号的属性（位置 / 纹理坐标 / 法线）
//! 压缩成一套共享的顶点编号：每个不同的 (位置, 纹理, 法线) 索引三元组
//! 只生成一条扁平顶点记录，索引缓冲区引用这些记录。
//!
//! # 架构说明
//!
//! ```text
//! Document (三套索引空间)
//!     ↓  MeshDeduplicator
//! FlatMesh (一套索引空间，可直接上传 GPU)
//! ```

use rustc_hash::FxHashMap;
use tracing::info;

use crate::core::error::MeshLoadError;

use super::obj::Document;
use super::vertex::{AttributeLayout, Normal, Position, TexCoord, VertexIndex};

/// 可直接上传 GPU 的扁平网格
///
/// 每种属性单独一个紧密排列的数组；`texcoords` / `normals`
/// 只有在源文档含有对应数据时才会被填充，此时与 `positions` 等长。
/// 构建完成后不再修改，替换当前网格应整体替换快照（见 `MeshSlot`）。
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FlatMesh {
    positions: Vec<Position>,
    texcoords: Vec<TexCoord>,
    normals: Vec<Normal>,
    indices: Vec<u32>,
    name: Option<String>,
}

impl FlatMesh {
    /// 对文档进行顶点去重，生成扁平网格
    ///
    /// 面引用了文档中不存在的属性时返回 `MeshLoadError::ValidationError`。
    pub fn from_document(document: &Document) -> Result<Self, MeshLoadError> {
        let mut dedup = MeshDeduplicator::new(document);
        for face in document.faces() {
            for vertex in face {
                dedup.add_vertex(*vertex)?;
            }
        }
        let mesh = dedup.build();

        info!(
            faces = document.faces().len(),
            vertices = mesh.vertex_count(),
            indices = mesh.index_count(),
            reuse = mesh.reuse_ratio(),
            "Mesh deduplicated"
        );

        Ok(mesh)
    }

    /// 设置网格名称
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn positions(&self) -> &[Position] {
        &self.positions
    }

    pub fn texcoords(&self) -> &[TexCoord] {
        &self.texcoords
    }

    pub fn normals(&self) -> &[Normal] {
        &self.normals
    }

    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    /// 获取顶点数量
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// 获取索引数量
    #[inline]
    pub fn index_count(&self) -> usize {
        self.indices.len()
    }

    /// 获取三角形数量
    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn has_texcoords(&self) -> bool {
        !self.texcoords.is_empty()
    }

    pub fn has_normals(&self) -> bool {
        !self.normals.is_empty()
    }

    /// 每个扁平顶点平均被引用的次数
    pub fn reuse_ratio(&self) -> f32 {
        if self.positions.is_empty() {
            return 0.0;
        }
        self.indices.len() as f32 / self.positions.len() as f32
    }

    /// 位置缓冲区的原始字节
    pub fn position_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.positions)
    }

    /// 纹理坐标缓冲区的原始字节（没有纹理坐标时为空）
    pub fn texcoord_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.texcoords)
    }

    /// 法线缓冲区的原始字节（没有法线时为空）
    pub fn normal_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.normals)
    }

    /// 索引缓冲区的原始字节
    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }

    /// 本网格实际包含的缓冲区布局，顺序为 position、texcoord、normal、index
    pub fn attribute_layouts(&self) -> Vec<AttributeLayout> {
        let mut layouts = vec![AttributeLayout::POSITION];
        if self.has_texcoords() {
            layouts.push(AttributeLayout::TEXCOORD);
        }
        if self.has_normals() {
            layouts.push(AttributeLayout::NORMAL);
        }
        layouts.push(AttributeLayout::INDEX);
        layouts
    }

    /// 验证网格数据的有效性
    ///
    /// 检查：
    /// - 索引数量是3的倍数
    /// - 所有索引都在顶点范围内
    /// - 纹理坐标 / 法线数组为空或与位置数组等长
    pub fn validate(&self) -> Result<(), String> {
        if self.indices.len() % 3 != 0 {
            return Err(format!(
                "index count must be a multiple of 3, got {}",
                self.indices.len()
            ));
        }

        let vertex_count = self.positions.len();
        if let Some((i, &index)) = self
            .indices
            .iter()
            .enumerate()
            .find(|(_, &index)| index as usize >= vertex_count)
        {
            return Err(format!(
                "index {} at position {} is out of range ({} vertices)",
                index, i, vertex_count
            ));
        }

        if self.has_texcoords() && self.texcoords.len() != vertex_count {
            return Err(format!(
                "texcoord count {} does not match vertex count {}",
                self.texcoords.len(),
                vertex_count
            ));
        }

        if self.has_normals() && self.normals.len() != vertex_count {
            return Err(format!(
                "normal count {} does not match vertex count {}",
                self.normals.len(),
                vertex_count
            ));
        }

        Ok(())
    }
}

/// 网格去重器
///
/// 按面的声明顺序遍历顶点，用索引三元组做精确匹配查找：
/// 见过的三元组直接复用扁平索引，新的三元组分配 `len(positions)` 作为索引
/// 并把引用的属性追加到扁平数组。
pub struct MeshDeduplicator<'a> {
    document: &'a Document,
    positions: Vec<Position>,
    texcoords: Vec<TexCoord>,
    normals: Vec<Normal>,
    indices: Vec<u32>,

    seen: FxHashMap<VertexIndex, u32>,
}

impl<'a> MeshDeduplicator<'a> {
    pub fn new(document: &'a Document) -> Self {
        let index_count = document.faces().len() * 3;
        Self {
            document,
            positions: Vec::new(),
            texcoords: Vec::new(),
            normals: Vec::new(),
            indices: Vec::with_capacity(index_count),
            seen: FxHashMap::default(),
        }
    }

    /// 追加一个面顶点，返回它的扁平索引
    pub fn add_vertex(&mut self, vertex: VertexIndex) -> Result<u32, MeshLoadError> {
        if let Some(&index) = self.seen.get(&vertex) {
            self.indices.push(index);
            return Ok(index);
        }

        let document = self.document;
        let position = lookup(document.positions(), vertex.position, "position")?;
        let texcoord = if document.has_texcoords() {
            Some(lookup(document.texcoords(), vertex.texcoord, "texcoord")?)
        } else {
            None
        };
        let normal = if document.has_normals() {
            Some(lookup(document.normals(), vertex.normal, "normal")?)
        } else {
            None
        };

        let index = self.positions.len() as u32;
        self.positions.push(position);
        self.texcoords.extend(texcoord);
        self.normals.extend(normal);

        self.seen.insert(vertex, index);
        self.indices.push(index);
        Ok(index)
    }

    /// 不同三元组的数量
    pub fn unique_count(&self) -> usize {
        self.seen.len()
    }

    pub fn build(self) -> FlatMesh {
        FlatMesh {
            positions: self.positions,
            texcoords: self.texcoords,
            normals: self.normals,
            indices: self.indices,
            name: None,
        }
    }
}

fn lookup<T: Copy>(items: &[T], index: u32, attribute: &str) -> Result<T, MeshLoadError> {
    items.get(index as usize).copied().ok_or_else(|| {
        MeshLoadError::ValidationError(format!(
            "{} index {} is out of range ({} declared)",
            attribute,
            index,
            items.len()
        ))
    })
}
