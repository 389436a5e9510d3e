//! 动画网格运行时
//!
//! 持有共享的静止网格和一份自己的网格状态，按经过的时间驱动蒙皮

use std::sync::Arc;

use super::{Mesh, MeshState};
use crate::animation::PlaybackConfig;
use crate::skinning::apply_bone_transforms;
use crate::Result;

/// 动画网格运行时
#[derive(Debug, Clone)]
pub struct AnimatedMesh {
    mesh: Arc<Mesh>,
    state: MeshState,
    config: PlaybackConfig,
    /// 当前播放的动画 id
    animation: Option<String>,
}

impl AnimatedMesh {
    /// 创建运行时，状态处于静止姿态，使用默认播放配置
    pub fn new(mesh: Arc<Mesh>) -> Result<Self> {
        let state = MeshState::derive(&mesh)?;
        Ok(Self {
            mesh,
            state,
            config: PlaybackConfig::default(),
            animation: None,
        })
    }

    pub fn with_config(mesh: Arc<Mesh>, config: PlaybackConfig) -> Result<Self> {
        let mut animated = Self::new(mesh)?;
        animated.set_config(config)?;
        Ok(animated)
    }

    pub fn mesh(&self) -> &Arc<Mesh> {
        &self.mesh
    }

    pub fn state(&self) -> &MeshState {
        &self.state
    }

    pub fn config(&self) -> &PlaybackConfig {
        &self.config
    }

    pub fn current_animation(&self) -> Option<&str> {
        self.animation.as_deref()
    }

    /// 设置播放配置，帧率非法时保持原配置
    pub fn set_config(&mut self, config: PlaybackConfig) -> Result<()> {
        config.validate()?;
        self.config = config;
        Ok(())
    }

    /// 切换动画，None 表示停止播放
    pub fn set_animation(&mut self, animation_id: Option<&str>) -> Result<()> {
        match animation_id {
            Some(id) => {
                let animation = self.mesh.animation(id)?;
                log::info!(
                    "播放动画 {}: {} 帧, {} 个骨骼层",
                    id,
                    animation.length,
                    animation.layer_count()
                );
                self.animation = Some(id.to_string());
            }
            None => {
                log::debug!("停止动画播放");
                self.animation = None;
            }
        }
        Ok(())
    }

    /// 推进到 `elapsed_ms`（从动画开始计）
    ///
    /// 没有播放动画时不做任何事；出错时状态保持上一次的结果。
    pub fn update(&mut self, elapsed_ms: u64) -> Result<()> {
        let Some(id) = self.animation.as_deref() else {
            return Ok(());
        };
        let transforms = self.mesh.bone_transforms_with(id, elapsed_ms, &self.config)?;
        apply_bone_transforms(&self.mesh, &transforms, &mut self.state)
    }

    /// 回到静止姿态，当前动画保持不变
    pub fn reset(&mut self) -> Result<()> {
        self.state.restore_rest_pose(&self.mesh)
    }
}
