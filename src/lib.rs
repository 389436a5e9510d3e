//! Mesh Engine - 网格拓扑、骨骼动画与着色几何
//!
//! 提供：
//! - 经过校验的增量式网格构建（顶点 / 面 / 子集 / 骨骼 / 动画）
//! - 从静止姿态派生可变的网格状态
//! - 关键帧选取、插值和层级骨骼蒙皮
//! - 面 / 顶点法线与切线空间计算

pub mod animation;
pub mod geometry;
pub mod model;
pub mod skeleton;
pub mod skinning;

pub use animation::{BoneKey, BoneLayer, PlaybackConfig, SkeletalAnimation};
pub use model::{AnimatedMesh, Face, FaceKind, Mesh, MeshBuilder, MeshState, Subset, Vertex};
pub use skeleton::{Bone, BoneManager, BoneTransform};
pub use skinning::apply_bone_transforms;

use std::fmt;

use thiserror::Error;

/// 实体所在的容器类别
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EntityKind {
    Vertex,
    Face,
    Subset,
    Bone,
    Animation,
    Layer,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EntityKind::Vertex => "vertex",
            EntityKind::Face => "face",
            EntityKind::Subset => "subset",
            EntityKind::Bone => "bone",
            EntityKind::Animation => "animation",
            EntityKind::Layer => "layer",
        };
        f.write_str(name)
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MeshError {
    #[error("No such {kind}: {id}")]
    MissingKey { kind: EntityKind, id: String },

    #[error("Duplicate {kind}: {id}")]
    DuplicateKey { kind: EntityKind, id: String },

    #[error("Face {face} has {count} corners, only 3 or 4 are allowed")]
    InvalidCornerCount { face: String, count: usize },

    #[error("Face {face} has {actual} corners, expected {expected}")]
    ArityMismatch {
        face: String,
        expected: usize,
        actual: usize,
    },

    #[error("Face {face} has {corners} corners but {tex_coords} texture coordinates")]
    TexCoordCountMismatch {
        face: String,
        corners: usize,
        tex_coords: usize,
    },

    #[error("Connecting bone {child} to parent {parent} would form a cycle")]
    BoneCycle { parent: String, child: String },

    #[error("Duplicate key for animation {animation} layer {bone} frame {frame}")]
    DuplicateKeyFrame {
        animation: String,
        bone: String,
        frame: u32,
    },

    #[error("Layer {bone} of animation {animation} has no keys")]
    EmptyLayer { animation: String, bone: String },

    #[error("Layer {bone} of animation {animation} has keys {first}..={last} outside of length {length}")]
    KeyFrameOutOfRange {
        animation: String,
        bone: String,
        first: u32,
        last: u32,
        length: u32,
    },

    #[error("Invalid frames per second: {0}")]
    InvalidFrameRate(f32),

    #[error("Vertex {vertex} is pulled only by zero-weight bones")]
    ZeroPullWeight { vertex: String },
}

impl MeshError {
    pub(crate) fn missing(kind: EntityKind, id: impl Into<String>) -> Self {
        MeshError::MissingKey { kind, id: id.into() }
    }

    pub(crate) fn duplicate(kind: EntityKind, id: impl Into<String>) -> Self {
        MeshError::DuplicateKey { kind, id: id.into() }
    }

    /// 是否属于动画数据错误（而非构建时的引用 / 结构错误）
    pub fn is_animation_error(&self) -> bool {
        matches!(
            self,
            MeshError::EmptyLayer { .. }
                | MeshError::KeyFrameOutOfRange { .. }
                | MeshError::InvalidFrameRate(_)
                | MeshError::ZeroPullWeight { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, MeshError>;
