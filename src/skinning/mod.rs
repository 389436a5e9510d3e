//! 顶点蒙皮计算

mod skinning;

pub use skinning::apply_bone_transforms;
