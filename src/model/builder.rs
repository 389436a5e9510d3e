//! 网格构建器
//!
//! 推荐调用顺序：顶点 -> 面 -> 子集 -> 骨骼 / 骨骼连接 -> 动画 / 关键帧。
//! 每个操作在修改之前完成全部校验，失败时构建器保持调用前的状态。
//! 需要“全有或全无”语义的调用方在第一次失败时丢弃构建器即可。

use std::collections::HashMap;

use glam::Vec3;

use super::{FaceKind, Mesh, TexCoords, Topology};
use crate::animation::{BoneKey, SkeletalAnimation};
use crate::skeleton::{BoneManager, BoneTransform};
use crate::{EntityKind, MeshError, Result};

/// 网格构建器
#[derive(Debug, Default)]
pub struct MeshBuilder {
    topology: Topology,
    bone_manager: BoneManager,
    animations: HashMap<String, SkeletalAnimation>,
}

impl MeshBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_vertex(&mut self, id: &str, position: Vec3) -> Result<()> {
        self.topology.add_vertex(id, position).map(|_| ())
    }

    /// 添加面，角的数量（3 或 4）决定是三角形还是四边形
    pub fn add_face<S: AsRef<str>>(
        &mut self,
        id: &str,
        smooth: bool,
        tex_coords: &[TexCoords],
        vertex_ids: &[S],
    ) -> Result<()> {
        self.topology
            .add_face(id, smooth, tex_coords, vertex_ids)
            .map(|_| ())
    }

    pub fn add_triangle(
        &mut self,
        id: &str,
        smooth: bool,
        tex_coords: [TexCoords; 3],
        vertex_ids: [&str; 3],
    ) -> Result<()> {
        self.add_face(id, smooth, &tex_coords, &vertex_ids)
    }

    pub fn add_quad(
        &mut self,
        id: &str,
        smooth: bool,
        tex_coords: [TexCoords; 4],
        vertex_ids: [&str; 4],
    ) -> Result<()> {
        self.add_face(id, smooth, &tex_coords, &vertex_ids)
    }

    pub fn add_subset(&mut self, id: &str) -> Result<()> {
        self.topology.add_subset(id).map(|_| ())
    }

    /// 把面加入子集，面的元数必须与 `expected` 一致
    pub fn add_face_to_subset(
        &mut self,
        subset_id: &str,
        face_id: &str,
        expected: FaceKind,
    ) -> Result<()> {
        self.topology.add_face_to_subset(subset_id, face_id, expected)
    }

    pub fn add_quad_to_subset(&mut self, subset_id: &str, quad_id: &str) -> Result<()> {
        self.add_face_to_subset(subset_id, quad_id, FaceKind::Quad)
    }

    pub fn add_triangle_to_subset(&mut self, subset_id: &str, triangle_id: &str) -> Result<()> {
        self.add_face_to_subset(subset_id, triangle_id, FaceKind::Triangle)
    }

    pub fn add_bone(&mut self, id: &str, head_position: Vec3, weight: f32) -> Result<()> {
        self.bone_manager
            .add_bone(id, head_position, weight)
            .map(|_| ())
    }

    /// 建立骨骼与顶点之间的双向拉动关系，重复连接不产生效果
    pub fn connect_bone_to_vertex(&mut self, bone_id: &str, vertex_id: &str) -> Result<()> {
        let bone = self.require_bone(bone_id)?;
        let vertex = self
            .topology
            .find_vertex(vertex_id)
            .ok_or_else(|| MeshError::missing(EntityKind::Vertex, vertex_id))?;

        if self.topology.link_bone(vertex, bone) {
            self.bone_manager.link_vertex(bone, vertex);
        }
        Ok(())
    }

    /// 设置子骨骼的父骨骼，会形成环时返回 [`MeshError::BoneCycle`]
    pub fn connect_bones(&mut self, parent_id: &str, child_id: &str) -> Result<()> {
        let parent = self.require_bone(parent_id)?;
        let child = self.require_bone(child_id)?;
        self.bone_manager.connect(parent, child)
    }

    pub fn add_animation(&mut self, id: &str, length: u32) -> Result<()> {
        if self.animations.contains_key(id) {
            return Err(MeshError::duplicate(EntityKind::Animation, id));
        }
        self.animations
            .insert(id.to_string(), SkeletalAnimation::new(id, length));
        Ok(())
    }

    pub fn add_layer(&mut self, animation_id: &str, bone_id: &str) -> Result<()> {
        let bone = self.require_bone(bone_id)?;
        self.animation_mut(animation_id)?.ensure_layer(bone_id, bone);
        Ok(())
    }

    /// 添加关键帧，骨骼层不存在时自动创建
    pub fn add_key(
        &mut self,
        animation_id: &str,
        bone_id: &str,
        frame: u32,
        transform: BoneTransform,
    ) -> Result<()> {
        let bone = self.require_bone(bone_id)?;
        self.animation_mut(animation_id)?
            .insert_key(bone_id, bone, BoneKey::new(frame, transform))
    }

    /// 完成构建
    pub fn build(self) -> Mesh {
        let (quads, triangles) = self.topology.count_quads_triangles();
        log::debug!(
            "网格构建完成: {} 个顶点, {} 个四边形, {} 个三角形, {} 个子集, {} 个骨骼, {} 个动画",
            self.topology.vertex_count(),
            quads,
            triangles,
            self.topology.subset_count(),
            self.bone_manager.bone_count(),
            self.animations.len(),
        );
        Mesh::from_parts(self.topology, self.bone_manager, self.animations)
    }

    fn require_bone(&self, id: &str) -> Result<usize> {
        self.bone_manager
            .find_bone_by_name(id)
            .ok_or_else(|| MeshError::missing(EntityKind::Bone, id))
    }

    fn animation_mut(&mut self, id: &str) -> Result<&mut SkeletalAnimation> {
        self.animations
            .get_mut(id)
            .ok_or_else(|| MeshError::missing(EntityKind::Animation, id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    fn builder_with_triangle() -> MeshBuilder {
        let mut b = MeshBuilder::new();
        b.add_vertex("v0", Vec3::ZERO).unwrap();
        b.add_vertex("v1", Vec3::X).unwrap();
        b.add_vertex("v2", Vec3::Y).unwrap();
        b.add_triangle("t", false, [Vec2::ZERO, Vec2::X, Vec2::Y], ["v0", "v1", "v2"])
            .unwrap();
        b
    }

    #[test]
    fn test_build_counts() {
        let mut b = builder_with_triangle();
        b.add_vertex("v3", Vec3::ONE).unwrap();
        b.add_quad("q", true, [Vec2::ZERO; 4], ["v0", "v1", "v3", "v2"])
            .unwrap();
        b.add_subset("body").unwrap();
        b.add_quad_to_subset("body", "q").unwrap();
        b.add_triangle_to_subset("body", "t").unwrap();

        let mesh = b.build();
        assert_eq!(mesh.vertices().len(), 4);
        assert_eq!(mesh.count_quads_triangles(), (1, 1));
        let body = mesh.subset("body").unwrap();
        assert_eq!(body.count_quads_triangles(mesh.topology()), (1, 1));
        assert!(mesh.face("q").unwrap().smooth);
    }

    #[test]
    fn test_triangle_as_quad_member_fails() {
        let mut b = builder_with_triangle();
        b.add_subset("s").unwrap();
        let err = b.add_face_to_subset("s", "t", FaceKind::Quad).unwrap_err();
        assert!(matches!(
            err,
            MeshError::ArityMismatch {
                expected: 4,
                actual: 3,
                ..
            }
        ));
        assert!(!err.is_animation_error());
        let mesh = b.build();
        assert!(mesh.subset("s").unwrap().is_empty());
    }

    #[test]
    fn test_bone_vertex_link_is_bidirectional() {
        let mut b = builder_with_triangle();
        b.add_bone("root", Vec3::ZERO, 1.0).unwrap();
        b.connect_bone_to_vertex("root", "v1").unwrap();
        b.connect_bone_to_vertex("root", "v1").unwrap();

        assert_eq!(
            b.connect_bone_to_vertex("nope", "v1").unwrap_err(),
            MeshError::missing(EntityKind::Bone, "nope")
        );
        assert_eq!(
            b.connect_bone_to_vertex("root", "nope").unwrap_err(),
            MeshError::missing(EntityKind::Vertex, "nope")
        );

        let mesh = b.build();
        let v1 = mesh.topology().find_vertex("v1").unwrap();
        assert_eq!(mesh.bone("root").unwrap().vertices(), &[v1]);
        assert_eq!(mesh.vertex("v1").unwrap().bones(), &[0]);
        assert!(mesh.vertex("v0").unwrap().bones().is_empty());
    }

    #[test]
    fn test_connect_bones() {
        let mut b = MeshBuilder::new();
        b.add_bone("a", Vec3::ZERO, 1.0).unwrap();
        b.add_bone("b", Vec3::Y, 1.0).unwrap();
        b.connect_bones("a", "b").unwrap();
        assert!(matches!(
            b.connect_bones("b", "a"),
            Err(MeshError::BoneCycle { .. })
        ));
        assert_eq!(
            b.connect_bones("a", "c").unwrap_err(),
            MeshError::missing(EntityKind::Bone, "c")
        );

        let mesh = b.build();
        assert_eq!(mesh.bone("b").unwrap().parent(), Some(0));
        assert!(mesh.bone("a").unwrap().is_root());
    }

    #[test]
    fn test_animation_errors() {
        let mut b = MeshBuilder::new();
        b.add_bone("a", Vec3::ZERO, 1.0).unwrap();
        b.add_animation("idle", 20).unwrap();
        assert_eq!(
            b.add_animation("idle", 5).unwrap_err(),
            MeshError::duplicate(EntityKind::Animation, "idle")
        );
        assert_eq!(
            b.add_layer("run", "a").unwrap_err(),
            MeshError::missing(EntityKind::Animation, "run")
        );
        assert_eq!(
            b.add_key("idle", "zz", 0, BoneTransform::IDENTITY).unwrap_err(),
            MeshError::missing(EntityKind::Bone, "zz")
        );

        b.add_key("idle", "a", 3, BoneTransform::IDENTITY).unwrap();
        assert!(matches!(
            b.add_key("idle", "a", 3, BoneTransform::IDENTITY),
            Err(MeshError::DuplicateKeyFrame { frame: 3, .. })
        ));

        let mesh = b.build();
        let idle = mesh.animation("idle").unwrap();
        assert_eq!(idle.length, 20);
        assert_eq!(idle.layer("a").unwrap().len(), 1);
        assert!(mesh.animation("run").is_err());
    }

    #[test]
    fn test_explicit_layer() {
        let mut b = MeshBuilder::new();
        b.add_bone("a", Vec3::ZERO, 1.0).unwrap();
        b.add_animation("idle", 20).unwrap();
        b.add_layer("idle", "a").unwrap();
        b.add_layer("idle", "a").unwrap();
        let mesh = b.build();
        let layer = mesh.animation("idle").unwrap().layer("a").unwrap();
        assert!(layer.is_empty());
        assert_eq!(layer.bone, 0);
    }
}
