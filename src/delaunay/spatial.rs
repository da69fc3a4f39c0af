use std::collections::{BTreeMap, HashSet};

use robust::{orient2d, Coord};

use crate::delaunay::tetrahedron::{orientation, Tetrahedron, INFINITE};
use crate::delaunay::utils::{check_input, check_span};
use crate::error::GeometryError;

/// 执行三维 Delaunay 四面体剖分，返回四面体顶点索引列表
///
/// 使用 Bowyer-Watson 算法逐点插入：删除外接球包含新点的四面体，
/// 再用空腔边界面与新点连成新四面体。
///
/// 凸包外侧由幽灵四面体（凸包面 + 无穷远点）表示，不使用有限大小的
/// 超级四面体，所以凸包附近的四面体不会丢失。所有判定都是精确谓词。
///
/// 内部维护的不变量：每个四面体都是正向的。对幽灵四面体而言，
/// 把无穷远点换成凸包外侧的任意点后朝向为正。
pub fn tetrahedralize(points: &[[f64; 3]]) -> Result<Vec<[usize; 4]>, GeometryError> {
    check_input(points)?;
    check_span(points)?;

    // 去除重复点：与已出现的点重合时跳过
    let mut seen = HashSet::with_capacity(points.len());
    let unique: Vec<usize> = (0..points.len())
        .filter(|&i| {
            let fresh = seen.insert(points[i].map(|x| (x + 0.0).to_bits()));
            if !fresh {
                log::trace!("skipping duplicate point {}", i);
            }
            fresh
        })
        .collect();

    let seed =
        initial_tetrahedron(points, &unique).ok_or(GeometryError::Degenerate("coplanar"))?;

    let mut tetrahedra = Vec::with_capacity(8 * unique.len());
    tetrahedra.push(seed);
    for slot in 0..4 {
        // 换入无穷远点后再交换两个顶点，使其外侧为正向
        tetrahedra.push(seed.with_vertex(slot, INFINITE).flipped());
    }

    // 逐点插入
    for &index in &unique {
        if seed.vertices.contains(&index) {
            continue;
        }
        let point = points[index];

        // 找出与当前点冲突的所有四面体
        let conflicts: Vec<bool> = tetrahedra
            .iter()
            .map(|t| in_conflict(t, point, &tetrahedra, points))
            .collect();
        let mut cavity = Vec::new();
        let mut kept = Vec::with_capacity(tetrahedra.len() + 8);
        for (tetrahedron, bad) in tetrahedra.into_iter().zip(conflicts) {
            if bad {
                cavity.push(tetrahedron);
            } else {
                kept.push(tetrahedron);
            }
        }
        tetrahedra = kept;

        // 空腔边界：只属于一个冲突四面体的面
        let mut boundary: BTreeMap<[usize; 3], (usize, Tetrahedron, usize)> = BTreeMap::new();
        for tetrahedron in &cavity {
            for slot in 0..4 {
                let mut key = tetrahedron.face_opposite(slot);
                key.sort_unstable();
                boundary
                    .entry(key)
                    .and_modify(|entry| entry.0 += 1)
                    .or_insert((1, *tetrahedron, slot));
            }
        }

        // 新点从空腔内部看到每个边界面，原位替换对顶点即保持朝向
        for (count, tetrahedron, slot) in boundary.into_values() {
            if count == 1 {
                tetrahedra.push(tetrahedron.with_vertex(slot, index));
            }
        }
    }

    let simplices: Vec<[usize; 4]> = tetrahedra
        .into_iter()
        .filter(|t| !t.is_ghost())
        .map(|t| t.vertices)
        .collect();

    log::trace!(
        "tetrahedralized {} points into {} tetrahedra",
        points.len(),
        simplices.len()
    );

    Ok(simplices)
}

/// 点是否落在四面体的冲突区域内
///
/// 有限四面体：严格位于外接球内。
/// 幽灵四面体：严格位于凸包面外侧；与该面共面时，落在面的外接圆内才算，
/// 这等价于面另一侧的有限四面体外接球包含该点。
fn in_conflict(
    tetrahedron: &Tetrahedron,
    point: [f64; 3],
    all: &[Tetrahedron],
    coords: &[[f64; 3]],
) -> bool {
    let Some(slot) = tetrahedron.vertices.iter().position(|&v| v == INFINITE) else {
        return tetrahedron.contains_in_circumsphere(coords, point);
    };

    let [a, b, c, d] = tetrahedron
        .vertices
        .map(|v| if v == INFINITE { point } else { coords[v] });
    let side = orientation(a, b, c, d);
    if side != 0.0 {
        return side > 0.0;
    }

    let face = tetrahedron.face_opposite(slot);
    all.iter()
        .find(|n| !n.is_ghost() && face.iter().all(|v| n.vertices.contains(v)))
        .is_some_and(|n| n.contains_in_circumsphere(coords, point))
}

/// 选出四个不共面的点作为初始四面体，并调整为正向
fn initial_tetrahedron(points: &[[f64; 3]], unique: &[usize]) -> Option<Tetrahedron> {
    let &a = unique.first()?;
    let &b = unique.get(1)?;
    let &c = unique
        .iter()
        .find(|&&i| !collinear(points[a], points[b], points[i]))?;
    let &d = unique
        .iter()
        .find(|&&i| orientation(points[a], points[b], points[c], points[i]) != 0.0)?;

    let seed = Tetrahedron::new([a, b, c, d]);
    Some(if seed.orientation(points) > 0.0 {
        seed
    } else {
        seed.flipped()
    })
}

/// 三点在三个坐标平面上的投影都共线时，三点共线
fn collinear(a: [f64; 3], b: [f64; 3], c: [f64; 3]) -> bool {
    [(0, 1), (1, 2), (2, 0)].iter().all(|&(i, j)| {
        let project = |p: [f64; 3]| Coord { x: p[i], y: p[j] };
        orient2d(project(a), project(b), project(c)) == 0.0
    })
}
