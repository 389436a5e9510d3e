//! 子集定义（按材质分组的面集合）

use std::collections::BTreeSet;

use super::{FaceKind, Topology};

/// 子集
#[derive(Clone, Debug)]
pub struct Subset {
    pub id: String,
    // 面索引，与顺序无关
    faces: BTreeSet<usize>,
}

impl Subset {
    pub(crate) fn new(id: String) -> Self {
        Self {
            id,
            faces: BTreeSet::new(),
        }
    }

    pub(crate) fn insert(&mut self, face: usize) {
        self.faces.insert(face);
    }

    /// 成员面的索引
    pub fn face_indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.faces.iter().copied()
    }

    pub fn contains(&self, face: usize) -> bool {
        self.faces.contains(&face)
    }

    pub fn len(&self) -> usize {
        self.faces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }

    /// 统计 (四边形数量, 三角形数量)
    pub fn count_quads_triangles(&self, topology: &Topology) -> (usize, usize) {
        let mut quads = 0;
        let mut triangles = 0;
        for face in self.faces.iter().filter_map(|&i| topology.face_at(i)) {
            match face.kind() {
                FaceKind::Quad => quads += 1,
                FaceKind::Triangle => triangles += 1,
            }
        }
        (quads, triangles)
    }
}
