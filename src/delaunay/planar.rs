use std::collections::HashSet;

use crate::delaunay::triangle::Triangle;
use crate::delaunay::utils::{check_input, check_span};
use crate::error::GeometryError;

/// 执行二维 Delaunay 三角剖分，返回三角形顶点索引列表
///
/// 每次调用都从零开始计算，具体算法交给 `delaunator`。
/// 重复点只参与一次剖分，其余副本不会出现在任何三角形中。
pub fn triangulate(points: &[[f64; 2]]) -> Result<Vec<[usize; 3]>, GeometryError> {
    check_input(points)?;
    check_span(points)?;

    // 去除重复点，记录每个唯一点在原始输入中的索引
    let mut seen = HashSet::with_capacity(points.len());
    let mut source_index = Vec::with_capacity(points.len());
    let mut input = Vec::with_capacity(points.len());
    for (i, p) in points.iter().enumerate() {
        // -0.0 与 0.0 视为同一点
        let key = (
            (p[0] + 0.0).to_bits(),
            (p[1] + 0.0).to_bits(),
        );
        if seen.insert(key) {
            source_index.push(i);
            input.push(delaunator::Point { x: p[0], y: p[1] });
        }
    }

    let triangulation = delaunator::triangulate(&input);

    // 共线点集在容差之内可能仍被 delaunator 判定为无三角形
    if triangulation.triangles.is_empty() {
        return Err(GeometryError::Degenerate("collinear"));
    }

    let triangles: Vec<[usize; 3]> = triangulation
        .triangles
        .chunks_exact(3)
        .map(|t| [t[0], t[1], t[2]].map(|i| source_index[i]))
        .filter(|t| Triangle::new(t.map(|i| points[i])).orientation() != 0.0)
        .collect();

    log::trace!(
        "triangulated {} points ({} unique) into {} triangles, {} on hull",
        points.len(),
        input.len(),
        triangles.len(),
        triangulation.hull.len()
    );

    Ok(triangles)
}
