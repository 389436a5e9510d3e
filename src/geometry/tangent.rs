//! 切线空间
//!
//! 角的切线 / 副切线由前后两个角相对本角的位置差和纹理坐标差解 2x2 线性方程得到。
//! 面和顶点的结果与法线一样由角的结果求和再归一化。

use glam::Vec3;

use crate::model::{Face, Topology, Vertex};

/// 行列式绝对值低于此值视为纹理映射退化
const DEGENERATE_EPSILON: f32 = 1e-12;

/// 切线与副切线
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TangentFrame {
    pub tangent: Vec3,
    pub bitangent: Vec3,
}

impl TangentFrame {
    pub const ZERO: Self = Self {
        tangent: Vec3::ZERO,
        bitangent: Vec3::ZERO,
    };

    fn normalized(self) -> Self {
        Self {
            tangent: self.tangent.normalize_or_zero(),
            bitangent: self.bitangent.normalize_or_zero(),
        }
    }
}

impl std::ops::Add for TangentFrame {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            tangent: self.tangent + rhs.tangent,
            bitangent: self.bitangent + rhs.bitangent,
        }
    }
}

/// 角的切线与副切线，纹理坐标退化时返回零向量
///
/// 角下标越界或面引用的顶点不在 `topology` 中时返回 None。
pub fn corner_tangent_bitangent(
    topology: &Topology,
    face: &Face,
    corner: usize,
) -> Option<TangentFrame> {
    let this = face.corner(corner)?;
    let prev = face.prev(corner);
    let next = face.next(corner);

    let position = topology.corner_position(this)?;
    let dp1 = topology.corner_position(prev)? - position;
    let dp2 = topology.corner_position(next)? - position;
    let dt1 = prev.tex_coords - this.tex_coords;
    let dt2 = next.tex_coords - this.tex_coords;

    let det = dt1.x * dt2.y - dt2.x * dt1.y;
    if det.abs() < DEGENERATE_EPSILON {
        return Some(TangentFrame::ZERO);
    }

    let frame = TangentFrame {
        tangent: (dp1 * dt2.y - dp2 * dt1.y) / det,
        bitangent: (dp2 * dt1.x - dp1 * dt2.x) / det,
    };
    Some(frame.normalized())
}

/// 面的切线与副切线（平直着色）
pub fn face_tangent_bitangent(topology: &Topology, face: &Face) -> Option<TangentFrame> {
    let sum = (0..face.corner_count()).try_fold(TangentFrame::ZERO, |sum, i| {
        Some(sum + corner_tangent_bitangent(topology, face, i)?)
    })?;
    Some(sum.normalized())
}

/// 顶点的切线与副切线（平滑着色）
pub fn vertex_tangent_bitangent(topology: &Topology, vertex: &Vertex) -> Option<TangentFrame> {
    let sum = vertex
        .corners()
        .iter()
        .try_fold(TangentFrame::ZERO, |sum, at| {
            let face = topology.face_at(at.face)?;
            Some(sum + corner_tangent_bitangent(topology, face, at.corner)?)
        })?;
    Some(sum.normalized())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::face_normal;
    use crate::model::{Mesh, MeshBuilder};
    use glam::Vec2;

    fn approx(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < 1e-5
    }

    fn quad(uv: [Vec2; 4]) -> Mesh {
        let mut b = MeshBuilder::new();
        b.add_vertex("a", Vec3::new(0.0, 0.0, 0.0)).unwrap();
        b.add_vertex("b", Vec3::new(2.0, 0.0, 0.0)).unwrap();
        b.add_vertex("c", Vec3::new(2.0, 2.0, 0.0)).unwrap();
        b.add_vertex("d", Vec3::new(0.0, 2.0, 0.0)).unwrap();
        b.add_quad("q", true, uv, ["a", "b", "c", "d"]).unwrap();
        b.build()
    }

    #[test]
    fn test_uv_aligned_with_xy() {
        let mesh = quad([Vec2::ZERO, Vec2::X, Vec2::ONE, Vec2::Y]);
        let topology = mesh.topology();
        let face = mesh.face("q").unwrap();

        for i in 0..4 {
            let frame = corner_tangent_bitangent(topology, face, i).unwrap();
            assert!(approx(frame.tangent, Vec3::X));
            assert!(approx(frame.bitangent, Vec3::Y));
        }
        let frame = face_tangent_bitangent(topology, face).unwrap();
        assert!(approx(frame.tangent, Vec3::X));
        assert!(approx(frame.bitangent, Vec3::Y));
        // 切线、副切线与法线构成右手系
        assert!(approx(
            frame.tangent.cross(frame.bitangent),
            face_normal(topology, face).unwrap()
        ));

        let frame = vertex_tangent_bitangent(topology, mesh.vertex("c").unwrap()).unwrap();
        assert!(approx(frame.tangent, Vec3::X));
    }

    #[test]
    fn test_rotated_uv() {
        // 纹理 u 沿 +Y，v 沿 -X
        let mesh = quad([Vec2::Y, Vec2::ZERO, Vec2::X, Vec2::ONE]);
        let frame = face_tangent_bitangent(mesh.topology(), mesh.face("q").unwrap()).unwrap();
        assert!(approx(frame.tangent, Vec3::Y));
        assert!(approx(frame.bitangent, -Vec3::X));
    }

    #[test]
    fn test_degenerate_uv_is_zero() {
        let mesh = quad([Vec2::ZERO; 4]);
        let topology = mesh.topology();
        let face = mesh.face("q").unwrap();
        assert_eq!(corner_tangent_bitangent(topology, face, 0), Some(TangentFrame::ZERO));
        assert_eq!(face_tangent_bitangent(topology, face), Some(TangentFrame::ZERO));
        assert_eq!(
            vertex_tangent_bitangent(topology, mesh.vertex("a").unwrap()),
            Some(TangentFrame::ZERO)
        );
    }

    #[test]
    fn test_face_from_other_mesh() {
        let mut b = MeshBuilder::new();
        b.add_vertex("a", Vec3::ZERO).unwrap();
        let lone = b.build();
        let mesh = quad([Vec2::ZERO, Vec2::X, Vec2::ONE, Vec2::Y]);
        let face = mesh.face("q").unwrap();

        assert_eq!(corner_tangent_bitangent(lone.topology(), face, 1), None);
        assert_eq!(face_tangent_bitangent(lone.topology(), face), None);
        assert_eq!(
            vertex_tangent_bitangent(lone.topology(), mesh.vertex("c").unwrap()),
            None
        );
        assert_eq!(corner_tangent_bitangent(mesh.topology(), face, 4), None);
    }
}
