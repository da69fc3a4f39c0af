#[cfg(test)]
mod tests {
    use super::super::planar::triangulate;
    use super::super::spatial::tetrahedralize;
    use super::super::tetrahedron::{orientation, Tetrahedron};
    use super::super::triangle::Triangle;
    use super::super::utils::{validate_delaunay, validate_delaunay_3d};
    use crate::error::GeometryError;
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha8Rng;
    use rand_distr::{Distribution, Normal};

    fn total_area(triangles: &[[usize; 3]], points: &[[f64; 2]]) -> f64 {
        triangles
            .iter()
            .map(|t| Triangle::new(t.map(|i| points[i])).area())
            .sum()
    }

    fn total_volume(tetrahedra: &[[usize; 4]], points: &[[f64; 3]]) -> f64 {
        tetrahedra
            .iter()
            .map(|t| Tetrahedron::new(*t).volume(points))
            .sum()
    }

    /// 暴力求凸包体积：其余点都在同一侧的三元组就是凸包面，
    /// 与质心连成四面体求和。要求点集处于一般位置。
    fn hull_volume(points: &[[f64; 3]]) -> f64 {
        let n = points.len() as f64;
        let centroid: [f64; 3] =
            std::array::from_fn(|k| points.iter().map(|p| p[k]).sum::<f64>() / n);

        let mut volume = 0.0;
        for i in 0..points.len() {
            for j in i + 1..points.len() {
                for k in j + 1..points.len() {
                    let (a, b, c) = (points[i], points[j], points[k]);
                    let sides: Vec<f64> = points
                        .iter()
                        .enumerate()
                        .filter(|(m, _)| ![i, j, k].contains(m))
                        .map(|(_, &p)| orientation(a, b, c, p))
                        .collect();
                    if sides.iter().all(|s| *s > 0.0) || sides.iter().all(|s| *s < 0.0) {
                        volume += orientation(a, b, c, centroid).abs() / 6.0;
                    }
                }
            }
        }
        volume
    }

    fn gaussian_cloud(seed: u64, count: usize, flatten: f64) -> Vec<[f64; 3]> {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let normal = Normal::new(0.0, 10.0).unwrap();
        (0..count)
            .map(|_| {
                let p: [f64; 3] = std::array::from_fn(|_| normal.sample(&mut rng));
                [p[0], p[1], p[2] * flatten]
            })
            .collect()
    }

    fn assert_covers_hull(points: &[[f64; 3]], tolerance: f64, label: &str) {
        let tetrahedra = tetrahedralize(points).unwrap();
        assert_well_formed(&tetrahedra, points.len());
        assert!(validate_delaunay_3d(&tetrahedra, points), "{} failed validation", label);

        let covered = total_volume(&tetrahedra, points);
        let hull = hull_volume(points);
        assert!(
            (covered - hull).abs() <= tolerance * hull,
            "{}: tetrahedra cover {} of hull volume {}",
            label,
            covered,
            hull
        );
    }

    fn assert_well_formed<const K: usize>(simplices: &[[usize; K]], point_count: usize) {
        assert!(!simplices.is_empty());
        for simplex in simplices {
            for (a, &i) in simplex.iter().enumerate() {
                assert!(i < point_count, "index {} out of range", i);
                assert!(!simplex[a + 1..].contains(&i), "repeated index in {:?}", simplex);
            }
        }
    }

    #[test]
    fn test_simple_triangle() {
        let points = vec![[0.0, 0.0], [1.0, 0.0], [0.0, 1.0]];

        let triangles = triangulate(&points).unwrap();
        assert_eq!(triangles.len(), 1);
        assert!(validate_delaunay(&triangles, &points));
    }

    #[test]
    fn test_square() {
        // 正方形恰好产生两个三角形，面积各为一半，互不重叠
        let points = vec![[0.0, 0.0], [1.0, 0.0], [0.0, 1.0], [1.0, 1.0]];

        let triangles = triangulate(&points).unwrap();
        assert_eq!(triangles.len(), 2);
        assert_well_formed(&triangles, points.len());
        for t in &triangles {
            assert!((Triangle::new(t.map(|i| points[i])).area() - 0.5).abs() < 1e-12);
        }
        assert!((total_area(&triangles, &points) - 1.0).abs() < 1e-12);
        assert!(validate_delaunay(&triangles, &points));
    }

    #[test]
    fn test_pentagon() {
        // 凸多边形中，三角形数 = 顶点数 - 2
        let points = vec![[0.0, 0.0], [1.0, 0.0], [1.5, 0.5], [0.5, 1.0], [0.0, 0.5]];

        let triangles = triangulate(&points).unwrap();
        assert_eq!(triangles.len(), 3);
        assert!(validate_delaunay(&triangles, &points));
    }

    #[test]
    fn test_collinear_points() {
        // 三点共线加一个离线点，仍可剖分
        let points = vec![[0.0, 0.0], [1.0, 0.0], [2.0, 0.0], [0.0, 1.0]];

        let triangles = triangulate(&points).unwrap();
        assert_eq!(triangles.len(), 2);
        assert!((total_area(&triangles, &points) - 1.0).abs() < 1e-12);
        assert!(validate_delaunay(&triangles, &points));
    }

    #[test]
    fn test_all_collinear_is_degenerate() {
        let points = vec![[0.0, 0.0], [1.0, 1.0], [2.0, 2.0], [-3.0, -3.0]];
        assert_eq!(
            triangulate(&points),
            Err(GeometryError::Degenerate("collinear"))
        );
    }

    #[test]
    fn test_coincident_is_degenerate() {
        let points = vec![[4.0, 4.0]; 5];
        assert_eq!(
            triangulate(&points),
            Err(GeometryError::Degenerate("coincident"))
        );
    }

    #[test]
    fn test_duplicate_points() {
        // 重复点只参与一次剖分
        let points = vec![[0.0, 0.0], [0.0, 0.0], [1.0, 0.0], [0.0, 1.0]];

        let triangles = triangulate(&points).unwrap();
        assert_eq!(triangles.len(), 1);
        assert!(validate_delaunay(&triangles, &points));
    }

    #[test]
    fn test_too_few_points() {
        // 少于三个点直接报错，而不是返回空结果
        for n in 0..3 {
            let points: Vec<[f64; 2]> = (0..n).map(|i| [i as f64, (i * i) as f64]).collect();
            assert_eq!(
                triangulate(&points),
                Err(GeometryError::TooFewPoints {
                    dimensions: 2,
                    required: 3,
                    actual: n
                })
            );
        }
    }

    #[test]
    fn test_non_finite_point() {
        let points = vec![[0.0, 0.0], [1.0, 0.0], [f64::NAN, 1.0]];
        assert_eq!(
            triangulate(&points),
            Err(GeometryError::NonFinite { index: 2 })
        );
    }

    #[test]
    fn test_random_points() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let points: Vec<[f64; 2]> = (0..200)
            .map(|_| [rng.random_range(-20.0..20.0), rng.random_range(-20.0..20.0)])
            .collect();

        let triangles = triangulate(&points).unwrap();
        assert_well_formed(&triangles, points.len());
        assert!(validate_delaunay(&triangles, &points));
    }

    #[test]
    fn test_single_tetrahedron() {
        let points = vec![
            [0.0, 0.0, 0.0],
            [1.0, 0.0, 0.0],
            [0.0, 1.0, 0.0],
            [0.0, 0.0, 1.0],
        ];

        let tetrahedra = tetrahedralize(&points).unwrap();
        assert_eq!(tetrahedra.len(), 1);
        assert_well_formed(&tetrahedra, points.len());
        assert!(validate_delaunay_3d(&tetrahedra, &points));
    }

    #[test]
    fn test_interior_point_splits_tetrahedron() {
        // 内部一点把四面体分成四个
        let points = vec![
            [0.0, 0.0, 0.0],
            [1.0, 0.0, 0.0],
            [0.0, 1.0, 0.0],
            [0.0, 0.0, 1.0],
            [0.2, 0.2, 0.2],
        ];

        let tetrahedra = tetrahedralize(&points).unwrap();
        assert_eq!(tetrahedra.len(), 4);
        assert!(tetrahedra.iter().all(|t| t.contains(&4)));
        assert!((total_volume(&tetrahedra, &points) - 1.0 / 6.0).abs() < 1e-12);
        assert!(validate_delaunay_3d(&tetrahedra, &points));
    }

    #[test]
    fn test_point_outside_face_adds_hull_tetrahedron() {
        // 第五个点在斜面外侧，必须补上凸包上的第二个四面体
        let points = vec![
            [0.0, 0.0, 0.0],
            [1.0, 0.0, 0.0],
            [0.0, 1.0, 0.0],
            [0.0, 0.0, 1.0],
            [2.0, 2.0, 2.0],
        ];

        let tetrahedra = tetrahedralize(&points).unwrap();
        assert_eq!(tetrahedra.len(), 2);
        assert!((total_volume(&tetrahedra, &points) - hull_volume(&points)).abs() < 1e-12);
        assert!(validate_delaunay_3d(&tetrahedra, &points));
    }

    #[test]
    fn test_coplanar_is_degenerate() {
        let points = vec![
            [0.0, 0.0, 1.0],
            [1.0, 0.0, 1.0],
            [0.0, 1.0, 1.0],
            [1.0, 1.0, 1.0],
            [0.5, 0.3, 1.0],
        ];
        assert_eq!(
            tetrahedralize(&points),
            Err(GeometryError::Degenerate("coplanar"))
        );
    }

    #[test]
    fn test_too_few_points_3d() {
        let points = vec![[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]];
        assert_eq!(
            tetrahedralize(&points),
            Err(GeometryError::TooFewPoints {
                dimensions: 3,
                required: 4,
                actual: 3
            })
        );
    }

    #[test]
    fn test_duplicate_points_3d() {
        let points = vec![
            [0.0, 0.0, 0.0],
            [1.0, 0.0, 0.0],
            [1.0, 0.0, 0.0],
            [0.0, 1.0, 0.0],
            [0.0, 0.0, 1.0],
        ];

        let tetrahedra = tetrahedralize(&points).unwrap();
        assert_eq!(tetrahedra.len(), 1);
        assert!(!tetrahedra[0].contains(&2));
    }

    #[test]
    fn test_random_points_3d() {
        let mut rng = ChaCha8Rng::seed_from_u64(12);
        let points: Vec<[f64; 3]> = (0..60)
            .map(|_| std::array::from_fn(|_| rng.random_range(-10.0..10.0)))
            .collect();

        let tetrahedra = tetrahedralize(&points).unwrap();
        assert_well_formed(&tetrahedra, points.len());
        assert!(validate_delaunay_3d(&tetrahedra, &points));
    }

    #[test]
    fn test_small_clouds_cover_hull() {
        // 十个点的高斯点云：凸包附近的四面体最容易丢失
        for seed in 0..500 {
            let points = gaussian_cloud(seed, 10, 1.0);
            assert_covers_hull(&points, 1e-9, &format!("seed {}", seed));
        }
    }

    #[test]
    fn test_flat_clouds_cover_hull() {
        // 接近共面的点云，凸包上满是细长四面体
        for seed in 0..200 {
            let points = gaussian_cloud(seed, 12, 0.01);
            assert_covers_hull(&points, 1e-6, &format!("flat seed {}", seed));
        }
    }

    #[test]
    fn test_cube_corners() {
        // 八个共球点，剖分不唯一，但总体积必须是 1
        let points: Vec<[f64; 3]> = (0..8)
            .map(|i| [(i & 1) as f64, ((i >> 1) & 1) as f64, ((i >> 2) & 1) as f64])
            .collect();

        let tetrahedra = tetrahedralize(&points).unwrap();
        assert_well_formed(&tetrahedra, points.len());
        assert!((total_volume(&tetrahedra, &points) - 1.0).abs() < 1e-12);
        assert!(validate_delaunay_3d(&tetrahedra, &points));
    }

    #[test]
    fn test_recompute_is_stateless() {
        let points = vec![[0.0, 0.0], [3.0, 0.5], [1.0, 2.0], [2.5, 3.0], [0.3, 1.1]];
        let first = triangulate(&points).unwrap();
        let second = triangulate(&points).unwrap();
        assert_eq!(first, second);
    }
}
