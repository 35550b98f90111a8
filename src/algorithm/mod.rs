//! 图算法模块
//!
//! 包含二分图判定、最大匹配（二分图 / 一般图）与最小费用指派算法

mod assignment;
mod bipartite;
mod blossom;
mod matching;

pub use assignment::{Assignment, AssignmentSolver, NO_EDGE};
pub use bipartite::{BipartiteChecker, Coloring};
pub use blossom::BlossomMatcher;
pub use matching::{max_matching_auto, BipartiteMatcher, Matching};
