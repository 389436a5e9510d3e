//! 动画关键帧

use crate::skeleton::BoneTransform;

/// 骨骼关键帧
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoneKey {
    pub frame: u32,
    pub transform: BoneTransform,
}

impl BoneKey {
    pub fn new(frame: u32, transform: BoneTransform) -> Self {
        Self { frame, transform }
    }
}
