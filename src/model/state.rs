//! 网格状态（可变姿态）
//!
//! 复制静止网格的顶点 / 面 / 子集，id 与邻接结构完全相同，但拥有独立存储。
//! 骨骼与动画不复制，只能通过源网格查询。唯一可变的是顶点位置。

use glam::Vec3;

use super::{Face, Mesh, Subset, Topology, Vertex};
use crate::{EntityKind, MeshError, Result};

/// 网格状态
#[derive(Debug, Clone)]
pub struct MeshState {
    topology: Topology,
}

impl MeshState {
    /// 从静止网格派生，源网格不受影响
    pub fn derive(mesh: &Mesh) -> Result<Self> {
        let source = mesh.topology();
        let mut topology = Topology::new();

        for vertex in source.vertices() {
            topology.add_vertex(&vertex.id, vertex.position)?;
        }

        for face in source.faces() {
            let tex_coords: Vec<_> = face.corners().iter().map(|c| c.tex_coords).collect();
            let vertex_ids: Vec<&str> = face
                .vertex_indices()
                .map(|i| source.vertices()[i].id.as_str())
                .collect();
            topology.add_face(&face.id, face.smooth, &tex_coords, &vertex_ids)?;
        }

        for subset in source.subsets() {
            topology.add_subset(&subset.id)?;
            for face in subset.face_indices().filter_map(|i| source.face_at(i)) {
                topology.add_face_to_subset(&subset.id, &face.id, face.kind())?;
            }
        }

        log::debug!(
            "派生网格状态: {} 个顶点, {} 个面, {} 个子集",
            topology.vertex_count(),
            topology.face_count(),
            topology.subset_count(),
        );
        Ok(Self { topology })
    }

    pub fn topology(&self) -> &Topology {
        &self.topology
    }

    pub fn has_vertex(&self, id: &str) -> bool {
        self.topology.has_vertex(id)
    }

    pub fn vertex(&self, id: &str) -> Result<&Vertex> {
        self.topology.vertex(id)
    }

    pub fn vertices(&self) -> &[Vertex] {
        self.topology.vertices()
    }

    pub fn has_face(&self, id: &str) -> bool {
        self.topology.has_face(id)
    }

    pub fn face(&self, id: &str) -> Result<&Face> {
        self.topology.face(id)
    }

    pub fn faces(&self) -> &[Face] {
        self.topology.faces()
    }

    pub fn has_subset(&self, id: &str) -> bool {
        self.topology.has_subset(id)
    }

    pub fn subset(&self, id: &str) -> Result<&Subset> {
        self.topology.subset(id)
    }

    pub fn subsets(&self) -> &[Subset] {
        self.topology.subsets()
    }

    /// 统计 (四边形数量, 三角形数量)
    pub fn count_quads_triangles(&self) -> (usize, usize) {
        self.topology.count_quads_triangles()
    }

    /// 设置顶点位置
    pub fn set_vertex_position(&mut self, id: &str, position: Vec3) -> Result<()> {
        let index = self
            .topology
            .find_vertex(id)
            .ok_or_else(|| MeshError::missing(EntityKind::Vertex, id))?;
        self.topology.set_position_at(index, position);
        Ok(())
    }

    pub(crate) fn set_position_at(&mut self, index: usize, position: Vec3) {
        self.topology.set_position_at(index, position);
    }

    /// 所有顶点恢复到源网格的静止位置（按 id 匹配）
    pub fn restore_rest_pose(&mut self, mesh: &Mesh) -> Result<()> {
        let targets = mesh
            .vertices()
            .iter()
            .map(|v| {
                self.topology
                    .find_vertex(&v.id)
                    .map(|i| (i, v.position))
                    .ok_or_else(|| MeshError::missing(EntityKind::Vertex, v.id.as_str()))
            })
            .collect::<Result<Vec<_>>>()?;

        for (index, position) in targets {
            self.topology.set_position_at(index, position);
        }
        Ok(())
    }
}
