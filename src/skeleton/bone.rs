//! 骨骼节点

use glam::Vec3;

/// 骨骼节点
#[derive(Clone, Debug)]
pub struct Bone {
    pub id: String,
    /// 静止姿态下的头部位置（网格空间），也是旋转支点
    pub head_position: Vec3,
    /// 拉动权重，相对于拉动同一顶点的其它骨骼
    pub weight: f32,
    parent: Option<usize>,
    // 被拉动的顶点索引
    vertices: Vec<usize>,
}

impl Bone {
    pub fn new(id: impl Into<String>, head_position: Vec3, weight: f32) -> Self {
        Self {
            id: id.into(),
            head_position,
            weight,
            parent: None,
            vertices: Vec::new(),
        }
    }

    /// 父骨骼索引，根骨骼为 None
    pub fn parent(&self) -> Option<usize> {
        self.parent
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    /// 该骨骼拉动的顶点索引
    pub fn vertices(&self) -> &[usize] {
        &self.vertices
    }

    pub(crate) fn set_parent(&mut self, parent: usize) {
        self.parent = Some(parent);
    }

    pub(crate) fn push_vertex(&mut self, vertex: usize) {
        if !self.vertices.contains(&vertex) {
            self.vertices.push(vertex);
        }
    }
}
