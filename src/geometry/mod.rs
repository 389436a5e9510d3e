//! 着色几何：法线与切线空间
//!
//! 全部计算只读取拓扑，既可用于静止网格也可用于网格状态。

mod normals;
mod tangent;

pub use normals::{corner_normal, face_normal, shading_normal, vertex_normal};
pub use tangent::{
    corner_tangent_bitangent, face_tangent_bitangent, vertex_tangent_bitangent, TangentFrame,
};
