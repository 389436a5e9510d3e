//! 骨骼动画
//!
//! 一个动画由若干骨骼层组成，按骨骼 id 索引

use std::collections::HashMap;

use super::{BoneKey, BoneLayer, PlaybackConfig};
use crate::skeleton::{BoneTransform, BoneTransforms};
use crate::{EntityKind, MeshError, Result};

/// 骨骼动画
#[derive(Debug, Clone)]
pub struct SkeletalAnimation {
    pub id: String,
    /// 动画长度（帧数）
    pub length: u32,
    /// 骨骼层（骨骼 id -> 层）
    layers: HashMap<String, BoneLayer>,
}

impl SkeletalAnimation {
    pub fn new(id: impl Into<String>, length: u32) -> Self {
        Self {
            id: id.into(),
            length,
            layers: HashMap::new(),
        }
    }

    /// 确保骨骼层存在
    pub(crate) fn ensure_layer(&mut self, bone_id: &str, bone: usize) -> &mut BoneLayer {
        self.layers
            .entry(bone_id.to_string())
            .or_insert_with(|| BoneLayer::new(bone))
    }

    /// 插入关键帧，层不存在时自动创建
    pub(crate) fn insert_key(&mut self, bone_id: &str, bone: usize, key: BoneKey) -> Result<()> {
        let animation = self.id.clone();
        if !self.ensure_layer(bone_id, bone).insert_key(key) {
            return Err(MeshError::DuplicateKeyFrame {
                animation,
                bone: bone_id.to_string(),
                frame: key.frame,
            });
        }
        Ok(())
    }

    pub fn has_layer(&self, bone_id: &str) -> bool {
        self.layers.contains_key(bone_id)
    }

    pub fn layer(&self, bone_id: &str) -> Result<&BoneLayer> {
        self.layers
            .get(bone_id)
            .ok_or_else(|| MeshError::missing(EntityKind::Layer, bone_id))
    }

    /// (骨骼 id, 层)
    pub fn layers(&self) -> impl Iterator<Item = (&str, &BoneLayer)> {
        self.layers.iter().map(|(id, layer)| (id.as_str(), layer))
    }

    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    /// 求值单个骨骼层在 `frame` 处的变换
    pub fn sample_layer(&self, bone_id: &str, frame: f32, looping: bool) -> Result<BoneTransform> {
        let layer = self.layer(bone_id)?;
        let empty = || MeshError::EmptyLayer {
            animation: self.id.clone(),
            bone: bone_id.to_string(),
        };

        let (first, last) = layer.frame_range().ok_or_else(empty)?;
        if last > self.length {
            return Err(MeshError::KeyFrameOutOfRange {
                animation: self.id.clone(),
                bone: bone_id.to_string(),
                first,
                last,
                length: self.length,
            });
        }

        let pick = layer
            .pick_key_frames(frame, self.length, looping)
            .ok_or_else(empty)?;
        layer.sample(&pick).ok_or_else(empty)
    }

    /// 在给定时间点求出所有带层骨骼的变换
    ///
    /// 没有层的骨骼不会出现在结果里，调用方应视其为静止姿态。
    pub fn transforms_at(&self, elapsed_ms: u64, config: &PlaybackConfig) -> Result<BoneTransforms> {
        config.validate()?;
        if self.length == 0 {
            log::warn!("动画 {} 长度为 0，固定在第 0 帧", self.id);
        }

        let frame = config.frame_at(elapsed_ms, self.length);
        self.layers
            .keys()
            .map(|bone_id| {
                let transform = self.sample_layer(bone_id, frame, config.looping)?;
                Ok((bone_id.clone(), transform))
            })
            .collect()
    }
}
