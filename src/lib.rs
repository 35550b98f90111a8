//! GraphMatch - 图匹配算法引擎
//!
//! 面向顶点/边集合的图算法库，支持：
//! - 二分图判定（BFS / 迭代式 DFS 双染色）
//! - 二分图最大匹配（交错路增广）
//! - 一般图最大匹配（带花树收缩）
//! - 最小费用完美指派（匈牙利算法）
//! - 边表 / 邻接矩阵两种文本格式的读写

pub mod algorithm;
pub mod cli;
pub mod error;
pub mod graph;
pub mod io;

// 重导出常用类型
pub use algorithm::{
    max_matching_auto, Assignment, AssignmentSolver, BipartiteChecker, BipartiteMatcher,
    BlossomMatcher, Coloring, Matching,
};
pub use error::{Error, Result};
pub use graph::{Edge, Graph, Vertex, VertexId};

/// 库版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
