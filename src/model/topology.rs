//! 拓扑容器：顶点 / 面 / 子集
//!
//! 静止网格和网格状态共用同一份结构，各自独立持有存储。
//! 所有插入操作先完整校验再修改，失败时容器保持不变。

use std::collections::HashMap;

use glam::Vec3;

use super::{Corner, CornerRef, Face, FaceKind, Subset, TexCoords, Vertex};
use crate::{EntityKind, MeshError, Result};

#[derive(Clone, Debug, Default)]
pub struct Topology {
    vertices: Vec<Vertex>,
    faces: Vec<Face>,
    subsets: Vec<Subset>,
    vertex_index: HashMap<String, usize>,
    face_index: HashMap<String, usize>,
    subset_index: HashMap<String, usize>,
}

impl Topology {
    pub fn new() -> Self {
        Self::default()
    }

    // ========== 查询 ==========

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    pub fn subset_count(&self) -> usize {
        self.subsets.len()
    }

    pub fn find_vertex(&self, id: &str) -> Option<usize> {
        self.vertex_index.get(id).copied()
    }

    pub fn find_face(&self, id: &str) -> Option<usize> {
        self.face_index.get(id).copied()
    }

    pub fn find_subset(&self, id: &str) -> Option<usize> {
        self.subset_index.get(id).copied()
    }

    pub fn has_vertex(&self, id: &str) -> bool {
        self.vertex_index.contains_key(id)
    }

    pub fn has_face(&self, id: &str) -> bool {
        self.face_index.contains_key(id)
    }

    pub fn has_subset(&self, id: &str) -> bool {
        self.subset_index.contains_key(id)
    }

    pub fn vertex(&self, id: &str) -> Result<&Vertex> {
        self.find_vertex(id)
            .map(|i| &self.vertices[i])
            .ok_or_else(|| MeshError::missing(EntityKind::Vertex, id))
    }

    pub fn face(&self, id: &str) -> Result<&Face> {
        self.find_face(id)
            .map(|i| &self.faces[i])
            .ok_or_else(|| MeshError::missing(EntityKind::Face, id))
    }

    pub fn subset(&self, id: &str) -> Result<&Subset> {
        self.find_subset(id)
            .map(|i| &self.subsets[i])
            .ok_or_else(|| MeshError::missing(EntityKind::Subset, id))
    }

    pub fn vertex_at(&self, index: usize) -> Option<&Vertex> {
        self.vertices.get(index)
    }

    pub fn face_at(&self, index: usize) -> Option<&Face> {
        self.faces.get(index)
    }

    pub fn subset_at(&self, index: usize) -> Option<&Subset> {
        self.subsets.get(index)
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    pub fn subsets(&self) -> &[Subset] {
        &self.subsets
    }

    /// 按定位取角，定位不属于本拓扑时返回 None
    pub fn corner(&self, at: CornerRef) -> Option<&Corner> {
        self.faces.get(at.face)?.corner(at.corner)
    }

    /// 角所引用顶点的当前位置，角不属于本拓扑时返回 None
    pub fn corner_position(&self, corner: &Corner) -> Option<Vec3> {
        self.vertices.get(corner.vertex).map(|v| v.position)
    }

    /// 统计 (四边形数量, 三角形数量)
    pub fn count_quads_triangles(&self) -> (usize, usize) {
        let quads = self
            .faces
            .iter()
            .filter(|f| f.kind() == FaceKind::Quad)
            .count();
        (quads, self.faces.len() - quads)
    }

    // ========== 构建 ==========

    pub(crate) fn add_vertex(&mut self, id: &str, position: Vec3) -> Result<usize> {
        if self.has_vertex(id) {
            return Err(MeshError::duplicate(EntityKind::Vertex, id));
        }
        let index = self.vertices.len();
        self.vertices.push(Vertex::new(id.to_string(), position));
        self.vertex_index.insert(id.to_string(), index);
        Ok(index)
    }

    /// 添加面并建立角环，同时把每个角登记到其顶点上
    pub(crate) fn add_face<S: AsRef<str>>(
        &mut self,
        id: &str,
        smooth: bool,
        tex_coords: &[TexCoords],
        vertex_ids: &[S],
    ) -> Result<usize> {
        if FaceKind::from_corner_count(vertex_ids.len()).is_none() {
            return Err(MeshError::InvalidCornerCount {
                face: id.to_string(),
                count: vertex_ids.len(),
            });
        }
        if tex_coords.len() != vertex_ids.len() {
            return Err(MeshError::TexCoordCountMismatch {
                face: id.to_string(),
                corners: vertex_ids.len(),
                tex_coords: tex_coords.len(),
            });
        }
        if self.has_face(id) {
            return Err(MeshError::duplicate(EntityKind::Face, id));
        }

        let face_index = self.faces.len();
        let corners = vertex_ids
            .iter()
            .zip(tex_coords)
            .map(|(vertex_id, &tex_coords)| {
                let vertex_id = vertex_id.as_ref();
                let vertex = self
                    .find_vertex(vertex_id)
                    .ok_or_else(|| MeshError::missing(EntityKind::Vertex, vertex_id))?;
                Ok(Corner {
                    face: face_index,
                    vertex,
                    tex_coords,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let face = Face::new(id.to_string(), smooth, corners).ok_or_else(|| {
            MeshError::InvalidCornerCount {
                face: id.to_string(),
                count: vertex_ids.len(),
            }
        })?;

        for (i, corner) in face.corners().iter().enumerate() {
            self.vertices[corner.vertex].push_corner(CornerRef {
                face: face_index,
                corner: i,
            });
        }
        self.faces.push(face);
        self.face_index.insert(id.to_string(), face_index);
        Ok(face_index)
    }

    pub(crate) fn add_subset(&mut self, id: &str) -> Result<usize> {
        if self.has_subset(id) {
            return Err(MeshError::duplicate(EntityKind::Subset, id));
        }
        let index = self.subsets.len();
        self.subsets.push(Subset::new(id.to_string()));
        self.subset_index.insert(id.to_string(), index);
        Ok(index)
    }

    pub(crate) fn add_face_to_subset(
        &mut self,
        subset_id: &str,
        face_id: &str,
        expected: FaceKind,
    ) -> Result<()> {
        let subset = self
            .find_subset(subset_id)
            .ok_or_else(|| MeshError::missing(EntityKind::Subset, subset_id))?;
        let face = self
            .find_face(face_id)
            .ok_or_else(|| MeshError::missing(EntityKind::Face, face_id))?;

        let actual = self.faces[face].kind();
        if actual != expected {
            return Err(MeshError::ArityMismatch {
                face: face_id.to_string(),
                expected: expected.corner_count(),
                actual: actual.corner_count(),
            });
        }
        self.subsets[subset].insert(face);
        Ok(())
    }

    pub(crate) fn link_bone(&mut self, vertex: usize, bone: usize) -> bool {
        self.vertices[vertex].push_bone(bone)
    }

    pub(crate) fn set_position_at(&mut self, vertex: usize, position: Vec3) {
        self.vertices[vertex].position = position;
    }
}
