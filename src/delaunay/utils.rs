//! Delaunay 三角剖分工具函数模块
//!
//! 提供输入检查、退化判定和结果验证功能。

use std::collections::BTreeMap;

use crate::delaunay::tetrahedron::{orientation, Tetrahedron};
use crate::delaunay::triangle::Triangle;
use crate::error::GeometryError;
use crate::vector::{dot, norm, sub};

// ============================================================================
// 公开 API
// ============================================================================

/// 二维外接圆判定使用的相对容差
pub const CIRCUM_TOLERANCE: f64 = 1e-9;

/// 验证二维三角剖分是否满足 Delaunay 性质
///
/// Delaunay 性质：任意三角形的外接圆内不包含其他点。
/// 索引越界或三角形含重复顶点时返回 `false`。
pub fn validate_delaunay(simplices: &[[usize; 3]], points: &[[f64; 2]]) -> bool {
    for simplex in simplices {
        if !indices_valid(simplex, points.len()) {
            return false;
        }

        let triangle = Triangle::new(simplex.map(|i| points[i]));
        let violated = points
            .iter()
            .enumerate()
            .filter(|(i, _)| !simplex.contains(i))
            .any(|(_, &p)| triangle.contains_in_circumcircle(p, CIRCUM_TOLERANCE));
        if violated {
            return false;
        }
    }
    true
}

/// 验证三维四面体剖分是否是点集的 Delaunay 剖分
///
/// 除空外接球性质外还检查剖分覆盖整个凸包：
/// - 内部面恰好被两个四面体共享，且两个对顶点分居面的两侧
/// - 只属于一个四面体的面必须是凸包的支撑面，其余点都不在它外侧
///
/// 凸包附近缺失的四面体会留下一个非支撑的边界面，在这里被发现。
pub fn validate_delaunay_3d(simplices: &[[usize; 4]], points: &[[f64; 3]]) -> bool {
    if simplices.is_empty() {
        return false;
    }

    let mut faces: BTreeMap<[usize; 3], Vec<usize>> = BTreeMap::new();
    for simplex in simplices {
        if !indices_valid(simplex, points.len()) {
            return false;
        }

        let tetrahedron = Tetrahedron::new(*simplex);
        if tetrahedron.orientation(points) == 0.0 {
            return false;
        }
        let violated = points
            .iter()
            .enumerate()
            .filter(|(i, _)| !simplex.contains(i))
            .any(|(_, &p)| tetrahedron.contains_in_circumsphere(points, p));
        if violated {
            return false;
        }

        for slot in 0..4 {
            let mut key = tetrahedron.face_opposite(slot);
            key.sort_unstable();
            faces.entry(key).or_default().push(simplex[slot]);
        }
    }

    faces.iter().all(|(face, opposite)| {
        let [a, b, c] = face.map(|i| points[i]);
        let above = |p: [f64; 3]| orientation(a, b, c, p);
        match opposite.as_slice() {
            [first, second] => (above(points[*first]) > 0.0) != (above(points[*second]) > 0.0),
            [only] => {
                let inner = above(points[*only]) > 0.0;
                points.iter().all(|&p| {
                    let side = above(p);
                    side == 0.0 || (side > 0.0) == inner
                })
            }
            _ => false,
        }
    })
}

// ============================================================================
// 内部辅助函数
// ============================================================================

/// 检查点数与坐标有效性
pub(crate) fn check_input<const D: usize>(points: &[[f64; D]]) -> Result<(), GeometryError> {
    if points.len() < D + 1 {
        return Err(GeometryError::TooFewPoints {
            dimensions: D,
            required: D + 1,
            actual: points.len(),
        });
    }
    if let Some(index) = points
        .iter()
        .position(|p| p.iter().any(|x| !x.is_finite()))
    {
        return Err(GeometryError::NonFinite { index });
    }
    Ok(())
}

/// 点集张成的仿射子空间维数
///
/// 以第一个点为原点做贪心 Gram-Schmidt 正交化，
/// 残差长度低于 `tolerance * 尺度` 的方向视为不存在。
pub(crate) fn affine_dimension<const D: usize>(points: &[[f64; D]], tolerance: f64) -> usize {
    let Some(origin) = points.first() else {
        return 0;
    };

    let scale = points
        .iter()
        .map(|p| norm(&sub(p, origin)))
        .fold(0.0, f64::max);
    if scale == 0.0 {
        return 0;
    }

    let mut basis: Vec<[f64; D]> = Vec::with_capacity(D);
    for p in points {
        if basis.len() == D {
            break;
        }
        let mut residual = sub(p, origin);
        // 两次投影，减少舍入误差残留
        for _ in 0..2 {
            for b in &basis {
                let k = dot(&residual, b);
                for (r, bi) in residual.iter_mut().zip(b) {
                    *r -= k * bi;
                }
            }
        }
        let len = norm(&residual);
        if len > tolerance * scale {
            basis.push(residual.map(|r| r / len));
        }
    }
    basis.len()
}

/// 将仿射维数不足转换为对应的退化错误
pub(crate) fn check_span<const D: usize>(points: &[[f64; D]]) -> Result<(), GeometryError> {
    match affine_dimension(points, SPAN_TOLERANCE) {
        rank if rank >= D => Ok(()),
        0 => Err(GeometryError::Degenerate("coincident")),
        1 => Err(GeometryError::Degenerate("collinear")),
        _ => Err(GeometryError::Degenerate("coplanar")),
    }
}

/// 仿射维数判定的相对容差
const SPAN_TOLERANCE: f64 = 1e-10;

fn indices_valid<const K: usize>(simplex: &[usize; K], point_count: usize) -> bool {
    simplex.iter().all(|&i| i < point_count)
        && (0..K).all(|a| (a + 1..K).all(|b| simplex[a] != simplex[b]))
}
