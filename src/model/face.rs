//! 面（三角形 / 四边形）

use super::Corner;

/// 面的元数，只有三角形和四边形两种
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FaceKind {
    Triangle,
    Quad,
}

impl FaceKind {
    pub const fn corner_count(self) -> usize {
        match self {
            FaceKind::Triangle => 3,
            FaceKind::Quad => 4,
        }
    }

    pub fn from_corner_count(count: usize) -> Option<Self> {
        match count {
            3 => Some(FaceKind::Triangle),
            4 => Some(FaceKind::Quad),
            _ => None,
        }
    }
}

#[derive(Clone, Debug)]
enum FaceCorners {
    Triangle([Corner; 3]),
    Quad([Corner; 4]),
}

/// 面
///
/// 角按逆时针顺序存放（与 Blender 一致），环上的前后邻居由下标取模得到。
#[derive(Clone, Debug)]
pub struct Face {
    pub id: String,
    /// 平滑着色（使用顶点法线）还是平直着色（使用面法线）
    pub smooth: bool,
    corners: FaceCorners,
}

impl Face {
    /// `corners` 的长度必须是 3 或 4
    pub(crate) fn new(id: String, smooth: bool, corners: Vec<Corner>) -> Option<Self> {
        let corners = match corners.len() {
            3 => FaceCorners::Triangle(<[Corner; 3]>::try_from(corners).ok()?),
            4 => FaceCorners::Quad(<[Corner; 4]>::try_from(corners).ok()?),
            _ => return None,
        };
        Some(Self { id, smooth, corners })
    }

    pub fn kind(&self) -> FaceKind {
        match self.corners {
            FaceCorners::Triangle(_) => FaceKind::Triangle,
            FaceCorners::Quad(_) => FaceKind::Quad,
        }
    }

    pub fn corner_count(&self) -> usize {
        self.kind().corner_count()
    }

    pub fn corners(&self) -> &[Corner] {
        match &self.corners {
            FaceCorners::Triangle(c) => c,
            FaceCorners::Quad(c) => c,
        }
    }

    pub fn corner(&self, index: usize) -> Option<&Corner> {
        self.corners().get(index)
    }

    /// 环上前一个角的下标
    pub fn prev_index(&self, index: usize) -> usize {
        let n = self.corner_count();
        (index + n - 1) % n
    }

    /// 环上后一个角的下标
    pub fn next_index(&self, index: usize) -> usize {
        (index + 1) % self.corner_count()
    }

    pub fn prev(&self, index: usize) -> &Corner {
        &self.corners()[self.prev_index(index)]
    }

    pub fn next(&self, index: usize) -> &Corner {
        &self.corners()[self.next_index(index)]
    }

    /// 按角的顺序返回顶点索引
    pub fn vertex_indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.corners().iter().map(|c| c.vertex)
    }
}
