use robust::{insphere, orient3d, Coord3D};

/// 无穷远顶点的索引
///
/// 含有它的四面体是"幽灵四面体"：一个凸包面加上无穷远点，
/// 代表该面外侧的整个半空间。
pub const INFINITE: usize = usize::MAX;

/// 四面体结构，只存储顶点索引
///
/// 几何判定全部交给 `robust` 的精确谓词，结果符号总是正确的，
/// 不需要容差。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tetrahedron {
    pub vertices: [usize; 4],
}

pub(crate) fn coord(p: [f64; 3]) -> Coord3D<f64> {
    Coord3D {
        x: p[0],
        y: p[1],
        z: p[2],
    }
}

/// 四点的有向体积符号（精确），共面时为零
pub(crate) fn orientation(a: [f64; 3], b: [f64; 3], c: [f64; 3], d: [f64; 3]) -> f64 {
    orient3d(coord(a), coord(b), coord(c), coord(d))
}

impl Tetrahedron {
    pub fn new(vertices: [usize; 4]) -> Self {
        Self { vertices }
    }

    pub fn is_ghost(&self) -> bool {
        self.vertices.contains(&INFINITE)
    }

    /// 有向体积的六倍，符号由精确谓词给出；幽灵四面体返回 0
    pub fn orientation(&self, coords: &[[f64; 3]]) -> f64 {
        if self.is_ghost() {
            return 0.0;
        }
        let [a, b, c, d] = self.vertices.map(|i| coords[i]);
        orientation(a, b, c, d)
    }

    pub fn volume(&self, coords: &[[f64; 3]]) -> f64 {
        self.orientation(coords).abs() / 6.0
    }

    /// 判断点是否严格位于外接球内，与顶点顺序无关
    ///
    /// 退化（共面）四面体没有外接球，返回 `false`。
    pub fn contains_in_circumsphere(&self, coords: &[[f64; 3]], point: [f64; 3]) -> bool {
        let sign = self.orientation(coords);
        if sign == 0.0 {
            return false;
        }
        let [a, b, c, d] = self.vertices.map(|i| coords[i]);
        let inside = insphere(coord(a), coord(b), coord(c), coord(d), coord(point));
        inside * sign.signum() > 0.0
    }

    /// 第 `slot` 个顶点对面的三角面，其余顶点保持原顺序
    pub fn face_opposite(&self, slot: usize) -> [usize; 3] {
        let v = self.vertices;
        match slot {
            0 => [v[1], v[2], v[3]],
            1 => [v[0], v[2], v[3]],
            2 => [v[0], v[1], v[3]],
            _ => [v[0], v[1], v[2]],
        }
    }

    /// 把第 `slot` 个顶点换成 `vertex`，其余位置不变
    pub fn with_vertex(&self, slot: usize, vertex: usize) -> Self {
        let mut vertices = self.vertices;
        vertices[slot] = vertex;
        Self { vertices }
    }

    /// 交换两个顶点，翻转朝向
    pub fn flipped(&self) -> Self {
        let [a, b, c, d] = self.vertices;
        Self {
            vertices: [b, a, c, d],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CORNER: [[f64; 3]; 4] = [
        [0.0, 0.0, 0.0],
        [1.0, 0.0, 0.0],
        [0.0, 1.0, 0.0],
        [0.0, 0.0, 1.0],
    ];

    #[test]
    fn circumsphere_of_corner_tetrahedron() {
        let t = Tetrahedron::new([0, 1, 2, 3]);
        assert!((t.volume(&CORNER) - 1.0 / 6.0).abs() < 1e-12);

        for t in [t, t.flipped()] {
            assert!(t.contains_in_circumsphere(&CORNER, [0.5, 0.5, 0.5]));
            assert!(!t.contains_in_circumsphere(&CORNER, [2.0, 2.0, 2.0]));
            // 球面上的点
            assert!(!t.contains_in_circumsphere(&CORNER, [1.0, 1.0, 1.0]));
        }
    }

    #[test]
    fn flipping_reverses_orientation() {
        let t = Tetrahedron::new([0, 1, 2, 3]);
        let o = t.orientation(&CORNER);
        assert!(o != 0.0);
        assert_eq!(t.flipped().orientation(&CORNER).signum(), -o.signum());
    }

    #[test]
    fn flat_tetrahedron_has_no_circumsphere() {
        let flat = [
            [0.0, 0.0, 0.0],
            [1.0, 0.0, 0.0],
            [0.0, 1.0, 0.0],
            [1.0, 1.0, 0.0],
        ];
        let t = Tetrahedron::new([0, 1, 2, 3]);
        assert_eq!(t.volume(&flat), 0.0);
        assert!(!t.contains_in_circumsphere(&flat, [0.5, 0.5, 0.0]));
        assert!(!t.contains_in_circumsphere(&flat, [100.0, 0.0, 0.0]));
    }

    #[test]
    fn faces_drop_one_slot_each() {
        let t = Tetrahedron::new([4, 5, 6, 7]);
        assert_eq!(t.face_opposite(0), [5, 6, 7]);
        assert_eq!(t.face_opposite(3), [4, 5, 6]);
        assert_eq!(t.with_vertex(2, 9).vertices, [4, 5, 9, 7]);
        assert!(t.with_vertex(1, INFINITE).is_ghost());
        assert!(!t.is_ghost());
    }
}
