//! 解析事件接收器
//!
//! 解析器只有一条解析路径，结果交给 `ElementSink`：
//! 整文档模式用 `DocumentBuilder` 累积，回调模式用 `Callbacks` 转发给调用方。

use crate::core::error::ConfigError;
use crate::geometry::vertex::{Face, Normal, Position, TexCoord};

/// 解析事件接收器
///
/// 每个元素在通过全部校验之后才会被交付；面中的索引已经解析完成。
pub trait ElementSink {
    fn position(&mut self, position: Position);
    fn texcoord(&mut self, texcoord: TexCoord);
    fn normal(&mut self, normal: Normal);
    fn face(&mut self, face: Face);
}

impl<S: ElementSink + ?Sized> ElementSink for &mut S {
    fn position(&mut self, position: Position) {
        (**self).position(position)
    }

    fn texcoord(&mut self, texcoord: TexCoord) {
        (**self).texcoord(texcoord)
    }

    fn normal(&mut self, normal: Normal) {
        (**self).normal(normal)
    }

    fn face(&mut self, face: Face) {
        (**self).face(face)
    }
}

type Callback<'a, T> = Box<dyn FnMut(T) + 'a>;

/// 调用方提供的四个回调
///
/// 只能通过 `CallbacksBuilder::build` 构造，缺少任何一个回调都会在解析开始前报错。
pub struct Callbacks<'a> {
    position: Callback<'a, Position>,
    texcoord: Callback<'a, TexCoord>,
    normal: Callback<'a, Normal>,
    face: Callback<'a, Face>,
}

impl<'a> Callbacks<'a> {
    pub fn builder() -> CallbacksBuilder<'a> {
        CallbacksBuilder::default()
    }
}

impl ElementSink for Callbacks<'_> {
    fn position(&mut self, position: Position) {
        (self.position)(position)
    }

    fn texcoord(&mut self, texcoord: TexCoord) {
        (self.texcoord)(texcoord)
    }

    fn normal(&mut self, normal: Normal) {
        (self.normal)(normal)
    }

    fn face(&mut self, face: Face) {
        (self.face)(face)
    }
}

/// `Callbacks` 构造器
#[derive(Default)]
pub struct CallbacksBuilder<'a> {
    position: Option<Callback<'a, Position>>,
    texcoord: Option<Callback<'a, TexCoord>>,
    normal: Option<Callback<'a, Normal>>,
    face: Option<Callback<'a, Face>>,
}

impl<'a> CallbacksBuilder<'a> {
    pub fn on_position(mut self, f: impl FnMut(Position) + 'a) -> Self {
        self.position = Some(Box::new(f));
        self
    }

    pub fn on_texcoord(mut self, f: impl FnMut(TexCoord) + 'a) -> Self {
        self.texcoord = Some(Box::new(f));
        self
    }

    pub fn on_normal(mut self, f: impl FnMut(Normal) + 'a) -> Self {
        self.normal = Some(Box::new(f));
        self
    }

    pub fn on_face(mut self, f: impl FnMut(Face) + 'a) -> Self {
        self.face = Some(Box::new(f));
        self
    }

    /// 四个回调都必须提供
    pub fn build(self) -> Result<Callbacks<'a>, ConfigError> {
        Ok(Callbacks {
            position: self.position.ok_or_else(|| missing("position"))?,
            texcoord: self.texcoord.ok_or_else(|| missing("texcoord"))?,
            normal: self.normal.ok_or_else(|| missing("normal"))?,
            face: self.face.ok_or_else(|| missing("face"))?,
        })
    }
}

fn missing(sink: &str) -> ConfigError {
    ConfigError::MissingField(format!("{} callback", sink))
}
