/// OBJ 模型加载示例
///
/// 演示整文档解码、回调模式解析和顶点去重。
///
/// 运行方式：
/// ```
/// cargo run --example load_obj -- assets/monkey.obj
/// ```

use dist_obj::geometry::loaders::{MeshLoader, ObjLoader};
use dist_obj::geometry::obj::{self, Callbacks, DecodeOptions};
use dist_obj::geometry::FlatMesh;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

const CUBE_FACE: &str = "\
# 立方体的一个面，两个三角形共享对角线
v -1 -1 1
v 1 -1 1
v 1 1 1
v -1 1 1
vt 0 0
vt 1 0
vt 1 1
vt 0 1
vn 0 0 1
f 1/1/1 2/2/1 3/3/1
f -4/-4/-1 -2/-2/-1 -1/-1/-1
";

fn main() {
    // 初始化日志系统
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    println!("=== dist_obj OBJ 加载器示例 ===\n");

    // 1. 内存中的输入：解码 + 去重
    let doc = match obj::decode(CUBE_FACE.as_bytes()) {
        Ok(doc) => doc,
        Err(e) => {
            eprintln!("✗ 解码失败: {}", e);
            std::process::exit(1);
        }
    };
    let mesh = match FlatMesh::from_document(&doc) {
        Ok(mesh) => mesh,
        Err(e) => {
            eprintln!("✗ 去重失败: {}", e);
            std::process::exit(1);
        }
    };

    println!("文档: {} 个位置, {} 个纹理坐标, {} 条法线, {} 个面",
        doc.positions().len(), doc.texcoords().len(), doc.normals().len(), doc.faces().len());
    println!("网格: {} 个顶点, {} 个索引", mesh.vertex_count(), mesh.index_count());
    for (i, triangle) in mesh.indices().chunks(3).enumerate() {
        println!("  三角形 {}: {:?}", i, triangle);
    }

    // 2. 命令行给出的文件：回调模式统计，再整体加载
    let Some(path) = std::env::args().nth(1) else {
        return;
    };
    let path = Path::new(&path);
    println!("\n正在加载: {}", path.display());

    let file = match File::open(path) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("✗ 无法打开文件: {}", e);
            std::process::exit(1);
        }
    };

    let mut faces = 0;
    let callbacks = Callbacks::builder()
        .on_position(|_| {})
        .on_texcoord(|_| {})
        .on_normal(|_| {})
        .on_face(|_| faces += 1)
        .build();
    let streamed = callbacks
        .map_err(|e| e.to_string())
        .and_then(|cb| {
            obj::stream(BufReader::new(file), cb, &DecodeOptions::default())
                .map_err(|e| e.to_string())
        });

    match streamed {
        Ok(summary) => println!("回调模式: {} 行, {} 个面", summary.lines, faces),
        Err(e) => {
            eprintln!("✗ 解析失败: {}", e);
            std::process::exit(1);
        }
    }

    match ObjLoader::load_from_file(path) {
        Ok(mesh) => {
            println!("✓ 加载成功: {} 个顶点, {} 个三角形, 复用率 {:.2}",
                mesh.vertex_count(), mesh.triangle_count(), mesh.reuse_ratio());
        }
        Err(e) => {
            eprintln!("✗ 加载失败: {}", e);
            std::process::exit(1);
        }
    }
}
