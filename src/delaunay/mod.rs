//! Delaunay 三角剖分模块
//!
//! 每一帧根据所有气泡中心的当前位置重新计算剖分：
//! - **二维**: 三角形，委托给 `delaunator`
//! - **三维**: 四面体，Bowyer-Watson 算法，幽灵四面体表示凸包外侧，
//!   判定使用 `robust` 精确谓词
//!
//! # 架构概览
//!
//! ```text
//! 气泡中心 (Vec<[f64; D]>)
//!        │
//!        ▼
//! ┌──────────────────────┐
//! │ Triangulate::        │  ── 输入检查 / 退化判定
//! │   triangulate()      │
//! └────────┬─────────────┘
//!          │
//!          ▼
//!   单纯形索引 (Vec<[usize; D + 1]>)
//!          │
//!          ▼
//!      交给渲染器
//! ```
//!
//! # 使用示例
//!
//! ```ignore
//! use bubbles::delaunay::Triangulate;
//!
//! let points = vec![[0.0, 0.0], [1.0, 0.0], [0.0, 1.0], [1.0, 1.0]];
//! let triangles = <[f64; 2]>::triangulate(&points)?;
//! assert_eq!(triangles.len(), 2);
//! ```
//!
//! 结果不保留任何状态，相邻两次调用之间三角形的顺序也不保证稳定。
//!
//! # 模块结构
//!
//! - `planar`: 二维剖分
//! - `spatial`: 三维剖分
//! - `triangle` / `tetrahedron`: 单纯形几何判定
//! - `utils`: 验证和辅助工具

mod planar;
mod spatial;
mod tetrahedron;
mod triangle;
mod triangulation;
mod utils;

#[cfg(test)]
mod tests;

// ============================================================================
// 公开 API
// ============================================================================

/// 二维 Delaunay 三角剖分函数
pub use planar::triangulate;

/// 三维 Delaunay 四面体剖分函数
pub use spatial::tetrahedralize;

/// 按维数分派的剖分接口
pub use triangulation::Triangulate;

/// 单纯形几何结构
///
/// 用于几何计算和验证。
pub use tetrahedron::Tetrahedron;
pub use triangle::Triangle;

/// Delaunay 验证函数
///
/// 验证剖分结果是否满足 Delaunay 性质。
pub use utils::{validate_delaunay, validate_delaunay_3d};
