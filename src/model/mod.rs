//! 网格拓扑与运行时数据
//!
//! 所有实体由所属容器按 id 持有，实体之间只保存索引（不共享所有权）。

mod builder;
mod face;
mod mesh;
mod runtime;
mod state;
mod subset;
mod topology;

pub use builder::MeshBuilder;
pub use face::{Face, FaceKind};
pub use mesh::Mesh;
pub use runtime::AnimatedMesh;
pub use state::MeshState;
pub use subset::Subset;
pub use topology::Topology;

use glam::{Vec2, Vec3};

/// 纹理坐标
pub type TexCoords = Vec2;

/// 顶点
#[derive(Clone, Debug)]
pub struct Vertex {
    pub id: String,
    /// 网格空间位置
    pub position: Vec3,
    // 使用该顶点的角（非拥有的反向引用）
    corners: Vec<CornerRef>,
    // 拉动该顶点的骨骼索引
    bones: Vec<usize>,
}

impl Vertex {
    pub(crate) fn new(id: String, position: Vec3) -> Self {
        Self {
            id,
            position,
            corners: Vec::new(),
            bones: Vec::new(),
        }
    }

    /// 使用此顶点的所有角
    pub fn corners(&self) -> &[CornerRef] {
        &self.corners
    }

    /// 拉动此顶点的骨骼索引（网格状态中始终为空）
    pub fn bones(&self) -> &[usize] {
        &self.bones
    }

    pub(crate) fn push_corner(&mut self, corner: CornerRef) {
        self.corners.push(corner);
    }

    /// 返回 false 表示该骨骼已经在拉动此顶点
    pub(crate) fn push_bone(&mut self, bone: usize) -> bool {
        if self.bones.contains(&bone) {
            return false;
        }
        self.bones.push(bone);
        true
    }
}

/// 面的一个角：引用一个顶点，并带有该面上的纹理坐标
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Corner {
    /// 所属面的索引
    pub face: usize,
    /// 顶点索引
    pub vertex: usize,
    pub tex_coords: TexCoords,
}

/// 角的定位：面索引 + 角在面内的序号
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CornerRef {
    pub face: usize,
    pub corner: usize,
}
