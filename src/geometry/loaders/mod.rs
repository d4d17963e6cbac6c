/// 模型加载器模块
///
/// 提供统一的模型加载接口，把文件或内存中的模型解码并去重为 `FlatMesh`。
///
/// # 支持的格式
///
/// - **OBJ**: Wavefront OBJ 格式（三角面，`v`/`vt`/`vn`/`f`）
///
/// # 使用示例
///
/// ```rust,no_run
/// use dist_obj::geometry::loaders::{MeshLoader, ObjLoader};
/// use std::path::Path;
///
/// let mesh = ObjLoader::load_from_file(Path::new("model.obj"))?;
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
use crate::core::error::{MeshLoadError, Result};
use crate::geometry::mesh::FlatMesh;
use std::path::Path;

pub mod obj_loader;

// 重新导出加载器
pub use obj_loader::ObjLoader;

/// 网格加载器 trait
///
/// 所有格式的加载器都实现此 trait。
///
/// # 实现要求
///
/// - 加载器是无状态的（使用静态方法）
/// - 返回 CPU 侧的 `FlatMesh`，不涉及 GPU 资源
/// - 解析失败时不返回任何部分结果
pub trait MeshLoader {
    /// 从文件路径加载网格
    ///
    /// # 错误
    ///
    /// - 文件不存在或无法读取
    /// - 文件内容有语法或索引错误
    /// - 去重结果未通过校验
    fn load_from_file(path: &Path) -> Result<FlatMesh>;

    /// 从内存数据加载网格
    fn load_from_memory(data: &[u8]) -> Result<FlatMesh>;

    /// 获取支持的文件扩展名列表（小写，不含点号）
    fn supported_extensions() -> &'static [&'static str];
}

fn extension_of(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
}

/// 路径的扩展名是否有对应的加载器
pub fn is_supported(path: &Path) -> bool {
    extension_of(path)
        .map(|ext| ObjLoader::supported_extensions().contains(&ext.as_str()))
        .unwrap_or(false)
}

/// 根据文件扩展名选择合适的加载器
///
/// ```rust,no_run
/// use dist_obj::geometry::loaders::load_mesh;
/// use std::path::Path;
///
/// let mesh = load_mesh(Path::new("model.obj"))?;
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn load_mesh(path: &Path) -> Result<FlatMesh> {
    let extension = extension_of(path).ok_or_else(|| {
        MeshLoadError::UnsupportedFormat(format!(
            "cannot determine file extension of {}",
            path.display()
        ))
    })?;

    match extension.as_str() {
        "obj" => ObjLoader::load_from_file(path),
        _ => Err(MeshLoadError::UnsupportedFormat(format!(".{}", extension)).into()),
    }
}
