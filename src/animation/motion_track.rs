//! 骨骼动画层
//!
//! 存储单个骨骼在一个动画中的所有关键帧，并提供前后关键帧的选取和插值

use std::collections::BTreeMap;

use super::BoneKey;
use crate::skeleton::BoneTransform;

/// 前后关键帧的选取结果
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct KeyFramePick {
    pub prev: u32,
    pub next: u32,
    pub distance_to_prev: f32,
    pub distance_to_next: f32,
}

impl KeyFramePick {
    /// 是否正好落在一个关键帧上
    pub fn is_exact(&self) -> bool {
        self.prev == self.next
    }

    /// 从前帧到后帧的插值系数 [0, 1]
    pub fn amount(&self) -> f32 {
        let total = self.distance_to_prev + self.distance_to_next;
        if total <= 0.0 {
            return 0.0;
        }
        self.distance_to_prev / total
    }
}

/// 骨骼动画层
#[derive(Clone, Debug)]
pub struct BoneLayer {
    /// 骨骼索引
    pub bone: usize,
    /// 关键帧映射（帧号 -> 关键帧）
    keys: BTreeMap<u32, BoneKey>,
}

impl BoneLayer {
    pub fn new(bone: usize) -> Self {
        Self {
            bone,
            keys: BTreeMap::new(),
        }
    }

    /// 插入关键帧，帧号已存在时返回 false 且不修改
    pub(crate) fn insert_key(&mut self, key: BoneKey) -> bool {
        if self.keys.contains_key(&key.frame) {
            return false;
        }
        self.keys.insert(key.frame, key);
        true
    }

    pub fn has_key(&self, frame: u32) -> bool {
        self.keys.contains_key(&frame)
    }

    pub fn key(&self, frame: u32) -> Option<&BoneKey> {
        self.keys.get(&frame)
    }

    /// 按帧号顺序的关键帧
    pub fn keys(&self) -> impl Iterator<Item = &BoneKey> {
        self.keys.values()
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// (第一帧, 最后一帧)，空层返回 None
    pub fn frame_range(&self) -> Option<(u32, u32)> {
        let first = *self.keys.keys().next()?;
        let last = *self.keys.keys().next_back()?;
        Some((first, last))
    }

    /// 查找 `frame` 前后的关键帧
    ///
    /// 前面没有关键帧时：循环则绕回最后一帧，否则夹到第一帧；
    /// 后面没有关键帧时对称处理。调用方需保证 `frame` 在 [0, length] 内。
    pub fn pick_key_frames(&self, frame: f32, length: u32, looping: bool) -> Option<KeyFramePick> {
        let (first, last) = self.frame_range()?;
        let length = length as f32;

        let prev = self.keys.range(..=frame.floor() as u32).next_back().map(|(&f, _)| f);
        let next = self.keys.range(frame.ceil() as u32..).next().map(|(&f, _)| f);

        let (prev, distance_to_prev) = match prev {
            Some(p) => (p, frame - p as f32),
            None if looping => (last, frame + (length - last as f32)),
            None => (first, (frame - first as f32).max(0.0)),
        };
        let (next, distance_to_next) = match next {
            Some(n) => (n, n as f32 - frame),
            None if looping => (first, length - frame + first as f32),
            None => (last, (last as f32 - frame).max(0.0)),
        };

        Some(KeyFramePick {
            prev,
            next,
            distance_to_prev,
            distance_to_next,
        })
    }

    /// 按选取结果求值：正好命中时原样返回关键帧变换，否则插值
    pub fn sample(&self, pick: &KeyFramePick) -> Option<BoneTransform> {
        let prev = self.keys.get(&pick.prev)?;
        if pick.is_exact() {
            return Some(prev.transform);
        }
        let next = self.keys.get(&pick.next)?;
        Some(prev.transform.interpolate(&next.transform, pick.amount()))
    }
}
