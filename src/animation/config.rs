//! 播放配置与时间换算

use crate::{MeshError, Result};

/// 播放配置
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlaybackConfig {
    /// 每秒帧数，必须为正
    pub frames_per_second: f32,
    /// 是否循环播放；否则停在最后一帧
    pub looping: bool,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            frames_per_second: 24.0,
            looping: true,
        }
    }
}

impl PlaybackConfig {
    pub fn new(frames_per_second: f32, looping: bool) -> Self {
        Self {
            frames_per_second,
            looping,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if !self.frames_per_second.is_finite() || self.frames_per_second <= 0.0 {
            return Err(MeshError::InvalidFrameRate(self.frames_per_second));
        }
        Ok(())
    }

    /// 经过的毫秒数换算为（小数）帧号
    pub fn frame_at(&self, elapsed_ms: u64, length: u32) -> f32 {
        if self.looping {
            modulate_frame(elapsed_ms, self.frames_per_second, length)
        } else {
            clamp_frame(elapsed_ms, self.frames_per_second, length)
        }
    }
}

/// 循环：时间按周期取模，结果落在 [0, length)
pub fn modulate_frame(elapsed_ms: u64, frames_per_second: f32, loop_frames: u32) -> f32 {
    let ms_period = 1000.0 * loop_frames as f32 / frames_per_second;
    let ms_per_frame = 1000.0 / frames_per_second;

    // 周期按整毫秒截断
    let period = ms_period as u64;
    if period == 0 {
        return 0.0;
    }
    (elapsed_ms % period) as f32 / ms_per_frame
}

/// 不循环：超过总时长后停在最后一帧
pub fn clamp_frame(elapsed_ms: u64, frames_per_second: f32, total_frames: u32) -> f32 {
    let ms_max = 1000.0 * total_frames as f32 / frames_per_second;
    let ms_per_frame = 1000.0 / frames_per_second;

    let elapsed = elapsed_ms as f32;
    // 到达末尾时直接返回最后一帧，避免浮点除法落在最后一帧之前
    if elapsed >= ms_max {
        return total_frames as f32;
    }
    elapsed / ms_per_frame
}
