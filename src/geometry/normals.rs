//! 角 / 面 / 顶点法线

use glam::Vec3;

use crate::model::{CornerRef, Face, Topology, Vertex};

/// 角法线：cross(v - prev, next - v)，逆时针的面朝向右手法线方向
///
/// 角下标越界或面引用的顶点不在 `topology` 中时返回 None。
pub fn corner_normal(topology: &Topology, face: &Face, corner: usize) -> Option<Vec3> {
    let position = topology.corner_position(face.corner(corner)?)?;
    let prev = topology.corner_position(face.prev(corner))?;
    let next = topology.corner_position(face.next(corner))?;

    Some((position - prev).cross(next - position).normalize_or_zero())
}

/// 面法线（平直着色）
pub fn face_normal(topology: &Topology, face: &Face) -> Option<Vec3> {
    (0..face.corner_count())
        .map(|i| corner_normal(topology, face, i))
        .sum::<Option<Vec3>>()
        .map(Vec3::normalize_or_zero)
}

/// 顶点法线（平滑着色）：所有使用该顶点的角法线之和
pub fn vertex_normal(topology: &Topology, vertex: &Vertex) -> Option<Vec3> {
    vertex
        .corners()
        .iter()
        .map(|at| corner_normal(topology, topology.face_at(at.face)?, at.corner))
        .sum::<Option<Vec3>>()
        .map(Vec3::normalize_or_zero)
}

/// 按面的平滑标记选择顶点法线或面法线
pub fn shading_normal(topology: &Topology, at: CornerRef) -> Option<Vec3> {
    let face = topology.face_at(at.face)?;
    let corner = face.corner(at.corner)?;
    if face.smooth {
        vertex_normal(topology, topology.vertex_at(corner.vertex)?)
    } else {
        face_normal(topology, face)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Mesh, MeshBuilder, MeshState};
    use glam::Vec2;

    fn approx(a: Option<Vec3>, b: Vec3) -> bool {
        a.is_some_and(|a| (a - b).length() < 1e-5)
    }

    /// 两个四边形沿 X 轴折成 90 度：q0 在 XY 平面，q1 在 XZ 平面
    fn folded() -> Mesh {
        let mut b = MeshBuilder::new();
        b.add_vertex("a", Vec3::new(0.0, 0.0, 0.0)).unwrap();
        b.add_vertex("b", Vec3::new(1.0, 0.0, 0.0)).unwrap();
        b.add_vertex("c", Vec3::new(1.0, 1.0, 0.0)).unwrap();
        b.add_vertex("d", Vec3::new(0.0, 1.0, 0.0)).unwrap();
        b.add_vertex("e", Vec3::new(1.0, 0.0, -1.0)).unwrap();
        b.add_vertex("f", Vec3::new(0.0, 0.0, -1.0)).unwrap();
        let uv = [Vec2::ZERO, Vec2::X, Vec2::ONE, Vec2::Y];
        b.add_quad("q0", false, uv, ["a", "b", "c", "d"]).unwrap();
        b.add_quad("q1", true, uv, ["a", "b", "e", "f"]).unwrap();
        b.build()
    }

    #[test]
    fn test_ccw_quad_faces_z() {
        let mesh = folded();
        let topology = mesh.topology();
        let q0 = mesh.face("q0").unwrap();

        for i in 0..4 {
            assert!(approx(corner_normal(topology, q0, i), Vec3::Z));
        }
        assert!(approx(face_normal(topology, q0), Vec3::Z));
        assert!(approx(
            face_normal(topology, mesh.face("q1").unwrap()),
            Vec3::Y
        ));
    }

    #[test]
    fn test_vertex_normal_averages() {
        let mesh = folded();
        let topology = mesh.topology();

        let shared = (Vec3::Z + Vec3::Y).normalize();
        assert!(approx(vertex_normal(topology, mesh.vertex("a").unwrap()), shared));
        assert!(approx(vertex_normal(topology, mesh.vertex("c").unwrap()), Vec3::Z));
        assert!(approx(vertex_normal(topology, mesh.vertex("e").unwrap()), Vec3::Y));
    }

    #[test]
    fn test_shading_normal_respects_smooth() {
        let mesh = folded();
        let topology = mesh.topology();
        let a = mesh.vertex("a").unwrap();
        let shared = (Vec3::Z + Vec3::Y).normalize();

        for &at in a.corners() {
            let normal = shading_normal(topology, at);
            if topology.face_at(at.face).unwrap().smooth {
                assert!(approx(normal, shared));
            } else {
                assert!(approx(normal, Vec3::Z));
            }
        }
        assert!(shading_normal(topology, CornerRef { face: 9, corner: 0 }).is_none());
    }

    #[test]
    fn test_state_normals_follow_pose() {
        let mesh = folded();
        let mut state = MeshState::derive(&mesh).unwrap();
        // 把 q1 翻到与 q0 重合
        state.set_vertex_position("e", Vec3::new(1.0, 1.0, 0.0)).unwrap();
        state.set_vertex_position("f", Vec3::new(0.0, 1.0, 0.0)).unwrap();

        let topology = state.topology();
        assert!(approx(face_normal(topology, state.face("q1").unwrap()), Vec3::Z));
        assert!(approx(vertex_normal(topology, state.vertex("a").unwrap()), Vec3::Z));
        // 源网格不受影响
        assert!(approx(
            face_normal(mesh.topology(), mesh.face("q1").unwrap()),
            Vec3::Y
        ));
    }

    #[test]
    fn test_degenerate_face_is_zero() {
        let mut b = MeshBuilder::new();
        b.add_vertex("a", Vec3::ZERO).unwrap();
        b.add_vertex("b", Vec3::X).unwrap();
        b.add_vertex("c", Vec3::X * 2.0).unwrap();
        b.add_triangle("line", false, [Vec2::ZERO; 3], ["a", "b", "c"])
            .unwrap();
        let mesh = b.build();
        assert_eq!(
            face_normal(mesh.topology(), mesh.face("line").unwrap()),
            Some(Vec3::ZERO)
        );
    }

    #[test]
    fn test_face_from_other_mesh() {
        let mut b = MeshBuilder::new();
        b.add_vertex("a", Vec3::ZERO).unwrap();
        b.add_vertex("b", Vec3::X).unwrap();
        b.add_vertex("c", Vec3::Y).unwrap();
        b.add_triangle("t", false, [Vec2::ZERO; 3], ["a", "b", "c"])
            .unwrap();
        let small = b.build();
        let big = folded();

        // q1 引用的顶点索引超出 small 的范围
        let foreign = big.face("q1").unwrap();
        assert_eq!(face_normal(small.topology(), foreign), None);
        assert_eq!(corner_normal(small.topology(), foreign, 2), None);
        assert_eq!(vertex_normal(small.topology(), big.vertex("e").unwrap()), None);
        assert_eq!(corner_normal(big.topology(), foreign, 7), None);
    }
}
