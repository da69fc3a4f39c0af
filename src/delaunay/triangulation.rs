use std::fmt::Debug;

use crate::delaunay::{planar, spatial, utils};
use crate::error::GeometryError;

/// 可做 Delaunay 剖分的点类型
///
/// 为 `[f64; 2]`（三角形）和 `[f64; 3]`（四面体）实现，
/// 单纯形的顶点数恒为维数加一。
pub trait Triangulate: Copy + Debug + PartialEq + AsRef<[f64]> {
    /// 单纯形顶点索引
    type Simplex: Copy + Debug + PartialEq + AsRef<[usize]>;

    const DIMENSIONS: usize;

    /// 对点集做完整的 Delaunay 剖分
    fn triangulate(points: &[Self]) -> Result<Vec<Self::Simplex>, GeometryError>;

    /// 检查剖分结果是否满足空外接圆（球）性质
    fn is_delaunay(points: &[Self], simplices: &[Self::Simplex]) -> bool;
}

impl Triangulate for [f64; 2] {
    type Simplex = [usize; 3];

    const DIMENSIONS: usize = 2;

    fn triangulate(points: &[Self]) -> Result<Vec<Self::Simplex>, GeometryError> {
        planar::triangulate(points)
    }

    fn is_delaunay(points: &[Self], simplices: &[Self::Simplex]) -> bool {
        utils::validate_delaunay(simplices, points)
    }
}

impl Triangulate for [f64; 3] {
    type Simplex = [usize; 4];

    const DIMENSIONS: usize = 3;

    fn triangulate(points: &[Self]) -> Result<Vec<Self::Simplex>, GeometryError> {
        spatial::tetrahedralize(points)
    }

    fn is_delaunay(points: &[Self], simplices: &[Self::Simplex]) -> bool {
        utils::validate_delaunay_3d(simplices, points)
    }
}
