//! 骨骼管理器
//!
//! 骨骼组成森林：允许多个根骨骼，不允许父子环。

use std::collections::HashMap;

use glam::Vec3;

use super::Bone;
use crate::{EntityKind, MeshError, Result};

/// 骨骼管理器
#[derive(Clone, Debug, Default)]
pub struct BoneManager {
    bones: Vec<Bone>,
    name_to_index: HashMap<String, usize>,
}

impl BoneManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// 添加骨骼
    pub(crate) fn add_bone(&mut self, id: &str, head_position: Vec3, weight: f32) -> Result<usize> {
        if self.name_to_index.contains_key(id) {
            return Err(MeshError::duplicate(EntityKind::Bone, id));
        }
        let index = self.bones.len();
        self.bones.push(Bone::new(id, head_position, weight));
        self.name_to_index.insert(id.to_string(), index);
        Ok(index)
    }

    /// 设置父骨骼，会形成环的连接被拒绝（包括自身为父）
    pub(crate) fn connect(&mut self, parent: usize, child: usize) -> Result<()> {
        if self.chain(parent).any(|(index, _)| index == child) {
            return Err(MeshError::BoneCycle {
                parent: self.bones[parent].id.clone(),
                child: self.bones[child].id.clone(),
            });
        }
        self.bones[child].set_parent(parent);
        Ok(())
    }

    pub(crate) fn link_vertex(&mut self, bone: usize, vertex: usize) {
        self.bones[bone].push_vertex(vertex);
    }

    /// 通过名称查找骨骼
    pub fn find_bone_by_name(&self, name: &str) -> Option<usize> {
        self.name_to_index.get(name).copied()
    }

    pub fn has_bone(&self, name: &str) -> bool {
        self.name_to_index.contains_key(name)
    }

    /// 获取骨骼数量
    pub fn bone_count(&self) -> usize {
        self.bones.len()
    }

    /// 获取骨骼
    pub fn get_bone(&self, index: usize) -> Option<&Bone> {
        self.bones.get(index)
    }

    pub fn bone(&self, name: &str) -> Result<&Bone> {
        self.find_bone_by_name(name)
            .map(|i| &self.bones[i])
            .ok_or_else(|| MeshError::missing(EntityKind::Bone, name))
    }

    pub fn bones(&self) -> &[Bone] {
        &self.bones
    }

    /// 从 `start` 开始（包含自身）沿父链走到根骨骼
    pub fn chain(&self, start: usize) -> BoneChain<'_> {
        BoneChain {
            bones: &self.bones,
            next: Some(start).filter(|&i| i < self.bones.len()),
        }
    }
}

/// 沿父链向上的迭代器，产出 (骨骼索引, 骨骼)
pub struct BoneChain<'a> {
    bones: &'a [Bone],
    next: Option<usize>,
}

impl<'a> Iterator for BoneChain<'a> {
    type Item = (usize, &'a Bone);

    fn next(&mut self) -> Option<Self::Item> {
        let index = self.next?;
        let bone = &self.bones[index];
        self.next = bone.parent();
        Some((index, bone))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn arm() -> BoneManager {
        let mut bones = BoneManager::new();
        bones.add_bone("shoulder", Vec3::ZERO, 1.0).unwrap();
        bones.add_bone("elbow", Vec3::X, 1.0).unwrap();
        bones.add_bone("hand", Vec3::X * 2.0, 1.0).unwrap();
        bones.connect(0, 1).unwrap();
        bones.connect(1, 2).unwrap();
        bones
    }

    #[test]
    fn test_chain_walks_to_root() {
        let bones = arm();
        let ids: Vec<&str> = bones.chain(2).map(|(_, b)| b.id.as_str()).collect();
        assert_eq!(ids, vec!["hand", "elbow", "shoulder"]);
        assert_eq!(bones.chain(0).count(), 1);
        assert_eq!(bones.chain(99).count(), 0);
    }

    #[test]
    fn test_duplicate_bone() {
        let mut bones = arm();
        assert_eq!(
            bones.add_bone("elbow", Vec3::ZERO, 0.5).unwrap_err(),
            MeshError::duplicate(EntityKind::Bone, "elbow")
        );
        assert_eq!(bones.bone_count(), 3);
    }

    #[test]
    fn test_cycle_is_rejected() {
        let mut bones = BoneManager::new();
        bones.add_bone("a", Vec3::ZERO, 1.0).unwrap();
        bones.add_bone("b", Vec3::ZERO, 1.0).unwrap();
        bones.connect(0, 1).unwrap();

        let err = bones.connect(1, 0).unwrap_err();
        assert_eq!(
            err,
            MeshError::BoneCycle {
                parent: "b".into(),
                child: "a".into()
            }
        );
        assert!(bones.get_bone(0).unwrap().is_root());
        assert_eq!(bones.chain(1).count(), 2);
    }

    #[test]
    fn test_self_parent_is_rejected() {
        let mut bones = arm();
        assert!(matches!(bones.connect(1, 1), Err(MeshError::BoneCycle { .. })));
        // 更长的环同样被拒绝
        assert!(matches!(bones.connect(2, 0), Err(MeshError::BoneCycle { .. })));
    }

    #[test]
    fn test_reparent_keeps_forest() {
        let mut bones = arm();
        bones.add_bone("spine", Vec3::Y, 1.0).unwrap();
        bones.connect(3, 0).unwrap();
        let ids: Vec<usize> = bones.chain(2).map(|(i, _)| i).collect();
        assert_eq!(ids, vec![2, 1, 0, 3]);
    }
}
