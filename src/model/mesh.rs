//! 静止姿态网格
//!
//! 只能通过 [`MeshBuilder`](super::MeshBuilder) 构建，构建完成后没有任何修改接口。

use std::collections::HashMap;

use super::{Face, Subset, Topology, Vertex};
use crate::animation::{PlaybackConfig, SkeletalAnimation};
use crate::skeleton::{Bone, BoneManager, BoneTransforms};
use crate::{EntityKind, MeshError, Result};

/// 静止姿态网格
#[derive(Debug, Clone)]
pub struct Mesh {
    topology: Topology,
    bone_manager: BoneManager,
    animations: HashMap<String, SkeletalAnimation>,
}

impl Mesh {
    pub(crate) fn from_parts(
        topology: Topology,
        bone_manager: BoneManager,
        animations: HashMap<String, SkeletalAnimation>,
    ) -> Self {
        Self {
            topology,
            bone_manager,
            animations,
        }
    }

    pub fn topology(&self) -> &Topology {
        &self.topology
    }

    pub fn bone_manager(&self) -> &BoneManager {
        &self.bone_manager
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

    pub fn has_bone(&self, id: &str) -> bool {
        self.bone_manager.has_bone(id)
    }

    pub fn bone(&self, id: &str) -> Result<&Bone> {
        self.bone_manager.bone(id)
    }

    pub fn bones(&self) -> &[Bone] {
        self.bone_manager.bones()
    }

    pub fn has_animation(&self, id: &str) -> bool {
        self.animations.contains_key(id)
    }

    pub fn animation(&self, id: &str) -> Result<&SkeletalAnimation> {
        self.animations
            .get(id)
            .ok_or_else(|| MeshError::missing(EntityKind::Animation, id))
    }

    pub fn animations(&self) -> impl Iterator<Item = &SkeletalAnimation> {
        self.animations.values()
    }

    /// 统计 (四边形数量, 三角形数量)
    pub fn count_quads_triangles(&self) -> (usize, usize) {
        self.topology.count_quads_triangles()
    }

    /// 求出动画在给定时间点的骨骼变换
    pub fn bone_transforms_at(
        &self,
        animation_id: &str,
        elapsed_ms: u64,
        frames_per_second: f32,
        looping: bool,
    ) -> Result<BoneTransforms> {
        self.bone_transforms_with(
            animation_id,
            elapsed_ms,
            &PlaybackConfig::new(frames_per_second, looping),
        )
    }

    pub fn bone_transforms_with(
        &self,
        animation_id: &str,
        elapsed_ms: u64,
        config: &PlaybackConfig,
    ) -> Result<BoneTransforms> {
        self.animation(animation_id)?.transforms_at(elapsed_ms, config)
    }
}
