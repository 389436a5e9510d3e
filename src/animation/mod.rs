//! 动画系统
//!
//! 提供关键帧存储、前后关键帧选取与插值、播放时间换算。

mod config;
mod keyframe;
mod motion;
mod motion_track;

pub use config::{clamp_frame, modulate_frame, PlaybackConfig};
pub use keyframe::BoneKey;
pub use motion::SkeletalAnimation;
pub use motion_track::{BoneLayer, KeyFramePick};
