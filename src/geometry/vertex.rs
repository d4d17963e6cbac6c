//! 顶点属性与索引定义模块
//!
//! 定义 OBJ 文档中的三种属性记录、面顶点的索引三元组，
//! 以及扁平网格上传到 GPU 时的属性布局描述。

use std::mem::size_of;

/// 位置 (x, y, z, w)，缺省 w = 1
pub type Position = [f32; 4];

/// 纹理坐标 (u, v, w)，缺省 w = 0
pub type TexCoord = [f32; 3];

/// 法线 (x, y, z)
pub type Normal = [f32; 3];

/// 面：恰好 3 个顶点索引三元组
pub type Face = [VertexIndex; 3];

/// 顶点索引三元组
///
/// 三个分量都是已解析的 0 基索引。源顶点未提供某个属性时，
/// 对应分量为哨兵值 0；是否使用纹理/法线索引应由文档中对应集合
/// 是否为空决定，而不是看这个值。
///
/// 同时也是网格去重的键，使用精确的整数相等比较。
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VertexIndex {
    pub position: u32,
    pub texcoord: u32,
    pub normal: u32,
}

impl VertexIndex {
    #[inline]
    pub fn new(position: u32, texcoord: u32, normal: u32) -> Self {
        Self {
            position,
            texcoord,
            normal,
        }
    }
}

impl From<(u32, u32, u32)> for VertexIndex {
    fn from((position, texcoord, normal): (u32, u32, u32)) -> Self {
        Self::new(position, texcoord, normal)
    }
}

/// 属性分量的数据类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComponentType {
    Float32,
    Uint32,
}

/// 扁平网格中一个缓冲区的布局
///
/// 每种属性单独占用一个紧密排列的缓冲区，`stride` 即单条记录的字节数。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttributeLayout {
    /// 属性名称（position / texcoord / normal / index）
    pub name: &'static str,

    /// 每条记录的分量数
    pub components: u32,

    /// 分量类型
    pub component_type: ComponentType,

    /// 单条记录的字节数
    pub stride: u32,
}

impl AttributeLayout {
    pub const POSITION: Self = Self {
        name: "position",
        components: 4,
        component_type: ComponentType::Float32,
        stride: size_of::<Position>() as u32,
    };

    pub const TEXCOORD: Self = Self {
        name: "texcoord",
        components: 3,
        component_type: ComponentType::Float32,
        stride: size_of::<TexCoord>() as u32,
    };

    pub const NORMAL: Self = Self {
        name: "normal",
        components: 3,
        component_type: ComponentType::Float32,
        stride: size_of::<Normal>() as u32,
    };

    pub const INDEX: Self = Self {
        name: "index",
        components: 1,
        component_type: ComponentType::Uint32,
        stride: size_of::<u32>() as u32,
    };
}
