/// 几何体加载和处理模块
///
/// 把 Wavefront OBJ 文本解码为 `Document`，再去重为可直接上传 GPU 的 `FlatMesh`。
///
/// # 模块结构
///
/// - `vertex`: 属性记录、顶点索引三元组和缓冲区布局
/// - `obj`: OBJ 解析器（整文档 / 回调两种模式）
/// - `mesh`: 扁平网格与顶点去重
/// - `loaders`: 文件 / 内存加载入口
/// - `snapshot`: 支持热重载的当前网格槽位
///
/// # 架构设计
///
/// ```text
/// 文件 (OBJ)
///     ↓
/// obj::decode → Document (三套索引空间)
///     ↓
/// FlatMesh::from_document (去重)
///     ↓
/// MeshSlot (原子替换，供渲染读取)
/// ```
///
/// # 使用示例
///
/// ```rust,no_run
/// use dist_obj::geometry::loaders::{MeshLoader, ObjLoader};
/// use std::path::Path;
///
/// let mesh = ObjLoader::load_from_file(Path::new("model.obj"))?;
///
/// println!("顶点数: {}", mesh.vertex_count());
/// println!("三角形数: {}", mesh.triangle_count());
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```

pub mod vertex;
pub mod obj;
pub mod mesh;
pub mod loaders;
pub mod snapshot;

// 重新导出常用类型
pub use vertex::{AttributeLayout, Face, Normal, Position, TexCoord, VertexIndex};
pub use obj::Document;
pub use mesh::FlatMesh;
pub use snapshot::MeshSlot;
