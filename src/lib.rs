//! dist_obj - Wavefront OBJ 几何导入库
//!
//! 把 OBJ 文本解析为内存文档，并去重为单一索引空间的扁平网格，
//! 供渲染器直接上传到 GPU。
//!
//! # 模块结构
//!
//! - `core`: 核心功能模块（日志、配置、错误处理）
//! - `geometry`: 几何体模块（OBJ 解析、网格去重、加载器、网格快照）
//!
//! # 使用示例
//!
//! ```
//! use dist_obj::geometry::{obj, FlatMesh};
//!
//! let input = "v 0 0 0\nv 1 0 0\nv 1 1 0\nv 0 1 0\nf 1 2 3\nf 1 3 4\n";
//! let doc = obj::decode(input.as_bytes())?;
//! let mesh = FlatMesh::from_document(&doc)?;
//!
//! assert_eq!(mesh.vertex_count(), 4);
//! assert_eq!(mesh.indices(), &[0, 1, 2, 0, 2, 3]);
//! # Ok::<(), dist_obj::core::DistObjError>(())
//! ```

pub mod core;
pub mod geometry;
