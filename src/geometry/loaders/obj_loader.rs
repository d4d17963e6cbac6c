/// OBJ 文件加载器
///
/// 使用 `geometry::obj` 解码 Wavefront OBJ 文件，再经过顶点去重得到 `FlatMesh`。
use super::MeshLoader;
use crate::core::error::{MeshLoadError, Result};
use crate::geometry::mesh::FlatMesh;
use crate::geometry::obj::{self, DecodeOptions, Document};
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

/// OBJ 格式加载器
///
/// # 使用示例
///
/// ```rust,no_run
/// use dist_obj::geometry::loaders::{MeshLoader, ObjLoader};
/// use std::path::Path;
///
/// let mesh = ObjLoader::load_from_file(Path::new("model.obj"))?;
/// println!("加载了 {} 个顶点", mesh.vertex_count());
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub struct ObjLoader;

impl ObjLoader {
    /// 只解码，不去重
    pub fn load_document(path: &Path) -> Result<Document> {
        Self::load_document_with(path, &DecodeOptions::default())
    }

    pub fn load_document_with(path: &Path, options: &DecodeOptions) -> Result<Document> {
        let reader = open(path)?;
        Ok(obj::decode_with(reader, options)?)
    }

    /// 按给定选项加载并去重
    pub fn load_from_file_with(path: &Path, options: &DecodeOptions) -> Result<FlatMesh> {
        let document = Self::load_document_with(path, options)?;
        let name = path.file_stem().and_then(|s| s.to_str()).unwrap_or("Unnamed");
        let mesh = flatten(&document)?.with_name(name);

        tracing::info!(
            path = %path.display(),
            vertices = mesh.vertex_count(),
            triangles = mesh.triangle_count(),
            "Loaded OBJ file"
        );

        Ok(mesh)
    }

    pub fn load_from_reader<R: BufRead>(reader: R, options: &DecodeOptions) -> Result<FlatMesh> {
        let document = obj::decode_with(reader, options)?;
        flatten(&document)
    }
}

impl MeshLoader for ObjLoader {
    fn load_from_file(path: &Path) -> Result<FlatMesh> {
        Self::load_from_file_with(path, &DecodeOptions::default())
    }

    fn load_from_memory(data: &[u8]) -> Result<FlatMesh> {
        Self::load_from_reader(data, &DecodeOptions::default())
    }

    fn supported_extensions() -> &'static [&'static str] {
        &["obj"]
    }
}

fn open(path: &Path) -> Result<BufReader<File>> {
    match File::open(path) {
        Ok(file) => Ok(BufReader::new(file)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            Err(MeshLoadError::FileNotFound(path.to_path_buf()).into())
        }
        Err(e) => Err(e.into()),
    }
}

fn flatten(document: &Document) -> Result<FlatMesh> {
    let mesh = FlatMesh::from_document(document)?;
    mesh.validate().map_err(MeshLoadError::ValidationError)?;
    Ok(mesh)
}
