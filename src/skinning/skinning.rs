//! 顶点蒙皮计算
//!
//! 每个被拉动的顶点：对每根拉动骨骼，从顶点静止位置出发，沿父链（含自身）向上，
//! 依次以各骨骼头部为支点应用其变换；再按骨骼权重加权平均。

use glam::Vec3;

use crate::model::{Mesh, MeshState, Vertex};
use crate::skeleton::{BoneManager, BoneTransform, BoneTransforms};
use crate::{EntityKind, MeshError, Result};

/// 把骨骼变换应用到网格状态
///
/// 没有拉动骨骼的顶点保持不变。先计算全部结果再写入，出错时状态不被修改。
pub fn apply_bone_transforms(
    mesh: &Mesh,
    transforms: &BoneTransforms,
    state: &mut MeshState,
) -> Result<()> {
    let bone_manager = mesh.bone_manager();
    let resolved = resolve_transforms(bone_manager, transforms)?;

    let mut updates = Vec::new();
    for vertex in mesh.vertices() {
        if vertex.bones().is_empty() {
            continue;
        }
        let target = state
            .topology()
            .find_vertex(&vertex.id)
            .ok_or_else(|| MeshError::missing(EntityKind::Vertex, vertex.id.as_str()))?;
        updates.push((target, skin_vertex(vertex, bone_manager, &resolved)?));
    }

    for (index, position) in updates {
        state.set_position_at(index, position);
    }
    Ok(())
}

/// 计算单个顶点的蒙皮位置
///
/// `resolved` 按骨骼索引存放变换，None 表示静止姿态。
/// 顶点引用的骨骼不在 `bone_manager` 中时返回 [`MeshError::MissingKey`]。
pub(crate) fn skin_vertex(
    vertex: &Vertex,
    bone_manager: &BoneManager,
    resolved: &[Option<BoneTransform>],
) -> Result<Vec3> {
    let mut sum_position = Vec3::ZERO;
    let mut sum_weight = 0.0;

    for &pulling in vertex.bones() {
        let bone = bone_manager
            .get_bone(pulling)
            .ok_or_else(|| MeshError::missing(EntityKind::Bone, format!("#{pulling}")))?;

        let mut position = vertex.position;
        for (index, link) in bone_manager.chain(pulling) {
            if let Some(transform) = resolved.get(index).copied().flatten() {
                position = transform.apply_about(position, link.head_position);
            }
        }

        sum_position += position * bone.weight;
        sum_weight += bone.weight;
    }

    if sum_weight == 0.0 {
        return Err(MeshError::ZeroPullWeight {
            vertex: vertex.id.clone(),
        });
    }
    Ok(sum_position / sum_weight)
}

/// 骨骼 id 映射转成按骨骼索引的表
fn resolve_transforms(
    bone_manager: &BoneManager,
    transforms: &BoneTransforms,
) -> Result<Vec<Option<BoneTransform>>> {
    let mut resolved = vec![None; bone_manager.bone_count()];
    for (id, transform) in transforms {
        let index = bone_manager
            .find_bone_by_name(id)
            .ok_or_else(|| MeshError::missing(EntityKind::Bone, id.as_str()))?;
        resolved[index] = Some(*transform);
    }
    Ok(resolved)
}
