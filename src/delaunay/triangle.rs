/// 三角形结构，存储三个顶点坐标
#[derive(Debug, Clone, Copy)]
pub struct Triangle {
    pub points: [[f64; 2]; 3],
}

impl Triangle {
    /// 创建新的三角形
    pub fn new(points: [[f64; 2]; 3]) -> Self {
        Self { points }
    }

    /// 有向面积的两倍（逆时针为正）
    pub fn orientation(&self) -> f64 {
        let [a, b, c] = self.points;
        (b[0] - a[0]) * (c[1] - a[1]) - (b[1] - a[1]) * (c[0] - a[0])
    }

    /// 三角形面积
    pub fn area(&self) -> f64 {
        0.5 * self.orientation().abs()
    }

    /// 判断一个点是否严格位于三角形的外接圆内
    ///
    /// `tolerance` 为相对容差，落在圆周附近的点视为不在圆内。
    pub fn contains_in_circumcircle(&self, point: [f64; 2], tolerance: f64) -> bool {
        let area = self.orientation();
        // 退化三角形没有外接圆
        if area.abs() < f64::EPSILON {
            return false;
        }

        // 使用相对坐标减少数值误差
        let [a, b, c] = self.points.map(|p| [p[0] - point[0], p[1] - point[1]]);
        let a_squared = a[0] * a[0] + a[1] * a[1];
        let b_squared = b[0] * b[0] + b[1] * b[1];
        let c_squared = c[0] * c[0] + c[1] * c[1];

        let det = a[0] * (b[1] * c_squared - c[1] * b_squared)
            + b[0] * (c[1] * a_squared - a[1] * c_squared)
            + c[0] * (a[1] * b_squared - b[1] * a_squared);

        // 行列式的量级随坐标四次方增长，按三角形尺度缩放容差
        let scale = a_squared.max(b_squared).max(c_squared);
        let epsilon = tolerance * scale * area.abs();

        // 判断三角形方向
        if area > 0.0 {
            det > epsilon
        } else {
            det < -epsilon
        }
    }
}
