//! 骨骼系统

mod bone;
mod manager;

pub use bone::Bone;
pub use manager::{BoneChain, BoneManager};

use std::collections::HashMap;

use glam::{Quat, Vec3};

/// 骨骼 id -> 相对静止姿态的变换
///
/// 不在映射中的骨骼视为处于静止姿态。
pub type BoneTransforms = HashMap<String, BoneTransform>;

/// 骨骼变换数据（旋转 + 平移）
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoneTransform {
    pub rotation: Quat,
    pub translation: Vec3,
}

impl Default for BoneTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl BoneTransform {
    /// 单位变换：无旋转、零平移
    pub const IDENTITY: Self = Self {
        rotation: Quat::IDENTITY,
        translation: Vec3::ZERO,
    };

    pub fn new(rotation: Quat, translation: Vec3) -> Self {
        Self {
            rotation,
            translation,
        }
    }

    pub fn from_translation(translation: Vec3) -> Self {
        Self::new(Quat::IDENTITY, translation)
    }

    pub fn from_rotation(rotation: Quat) -> Self {
        Self::new(rotation, Vec3::ZERO)
    }

    /// 插值：旋转球面插值，平移线性插值，`s` 取值 [0, 1]
    pub fn interpolate(&self, other: &BoneTransform, s: f32) -> BoneTransform {
        BoneTransform {
            rotation: self.rotation.slerp(other.rotation, s),
            translation: self.translation * (1.0 - s) + other.translation * s,
        }
    }

    /// 以 `pivot`（骨骼头部）为支点变换一个点
    pub fn apply_about(&self, point: Vec3, pivot: Vec3) -> Vec3 {
        self.rotation * (point - pivot) + pivot + self.translation
    }
}
