//! 当前网格快照
//!
//! 渲染线程持有 `Arc<FlatMesh>` 读取网格，重新加载在另一条线程上完成。
//! 新网格完整构建并通过校验之后才整体替换句柄，读取方不会看到半成品。
//!
//! # 使用场景
//!
//! 1. **启动加载**：第一次 `reload` 填充快照
//! 2. **热重载**：文件变化后再次 `reload`，失败时保留上一个可用网格
//! 3. **渲染读取**：每帧 `current()` 克隆句柄，按 `generation()` 判断是否需要重新上传

use std::io::BufRead;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

use tracing::{info, warn};

use crate::core::config::Config;
use crate::core::error::Result;
use crate::geometry::loaders::ObjLoader;
use crate::geometry::mesh::FlatMesh;
use crate::geometry::obj::DecodeOptions;

/// 原子替换的网格槽位
pub struct MeshSlot {
    path: PathBuf,
    options: DecodeOptions,
    /// 重新加载失败时是否保留上一个网格
    keep_last_good: bool,
    current: RwLock<Option<Arc<FlatMesh>>>,
    /// 每次成功替换后递增
    generation: AtomicU64,
}

impl MeshSlot {
    /// 创建空槽位，尚未加载任何网格
    pub fn new(path: impl Into<PathBuf>, options: DecodeOptions, keep_last_good: bool) -> Self {
        Self {
            path: path.into(),
            options,
            keep_last_good,
            current: RwLock::new(None),
            generation: AtomicU64::new(0),
        }
    }

    /// 按配置中的模型路径和加载选项创建槽位
    pub fn from_config(config: &Config) -> Self {
        Self::new(
            &config.model.path,
            DecodeOptions::from(&config.loader),
            config.loader.keep_last_good,
        )
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// 当前网格；从未成功加载时为 `None`
    pub fn current(&self) -> Option<Arc<FlatMesh>> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// 成功替换的次数
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::Acquire)
    }

    /// 从槽位的文件路径重新加载
    pub fn reload(&self) -> Result<Arc<FlatMesh>> {
        let result = ObjLoader::load_from_file_with(&self.path, &self.options);
        self.commit(result)
    }

    /// 从任意输入重新加载
    pub fn reload_from_reader<R: BufRead>(&self, reader: R) -> Result<Arc<FlatMesh>> {
        let result = ObjLoader::load_from_reader(reader, &self.options);
        self.commit(result)
    }

    /// 替换当前网格，返回本次替换对应的代数
    fn swap(&self, mesh: Arc<FlatMesh>) -> u64 {
        let mut current = self.current.write().unwrap_or_else(PoisonError::into_inner);
        *current = Some(mesh);
        self.generation.fetch_add(1, Ordering::AcqRel) + 1
    }

    fn commit(&self, result: Result<FlatMesh>) -> Result<Arc<FlatMesh>> {
        match result {
            Ok(mesh) => {
                let mesh = Arc::new(mesh);
                let generation = self.swap(Arc::clone(&mesh));
                info!(
                    path = %self.path.display(),
                    generation,
                    "Mesh snapshot swapped"
                );
                Ok(mesh)
            }
            Err(e) => {
                if self.keep_last_good {
                    warn!(
                        path = %self.path.display(),
                        error = %e,
                        kept = self.generation(),
                        "Reload failed, keeping last good mesh"
                    );
                } else {
                    *self.current.write().unwrap_or_else(PoisonError::into_inner) = None;
                    warn!(path = %self.path.display(), error = %e, "Reload failed, mesh cleared");
                }
                Err(e)
            }
        }
    }
}
