//! 最小费用完美指派（匈牙利算法）
//!
//! 原始-对偶方法：维护行列位势，每行做一次增广搜索，复杂度 O(n³)。
//! 两个顶点集之间的费用取自连接边的权重；没有边的格子填充有限的
//! 大哨兵值 `NO_EDGE`（不用真正的无穷大，否则位势更新算术会失效）。
//! 结果总费用超过 `NO_EDGE / 2` 说明完美指派必须借助不存在的边，
//! 判为不可行。

use crate::error::{Error, Result};
use crate::graph::{Graph, VertexId};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// "无边" 哨兵费用
///
/// 远大于任何现实的边权之和的有限常数。
pub const NO_EDGE: f64 = 1e9;

/// 指派结果
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Assignment {
    /// 最小总费用
    pub total_cost: f64,
    /// (左顶点, 右顶点) 指派对
    pub pairs: Vec<(VertexId, VertexId)>,
}

/// 指派求解器
pub struct AssignmentSolver {
    graph: Arc<Graph>,
}

impl AssignmentSolver {
    /// 创建求解器
    pub fn new(graph: Arc<Graph>) -> Self {
        Self { graph }
    }

    /// 求两个等长顶点集之间的最小费用完美指派
    ///
    /// 两个集合都为空时返回费用 0 和空指派。
    pub fn solve(&self, left: &[VertexId], right: &[VertexId]) -> Result<Assignment> {
        if left.len() != right.len() {
            return Err(Error::InvalidArgument(format!(
                "两侧顶点数必须相等: {} != {}",
                left.len(),
                right.len()
            )));
        }
        for &id in left.iter().chain(right.iter()) {
            if !self.graph.contains_vertex(id) {
                return Err(Error::NotFound(format!("顶点 {} 不存在", id)));
            }
        }

        let n = left.len();
        if n == 0 {
            return Ok(Assignment {
                total_cost: 0.0,
                pairs: Vec::new(),
            });
        }

        let cost = self.cost_matrix(left, right);

        // 匈牙利算法，1 基下标；p[j] = 第 j 列当前指派的行
        let mut u = vec![0.0; n + 1];
        let mut v = vec![0.0; n + 1];
        let mut p = vec![0usize; n + 1];
        let mut way = vec![0usize; n + 1];

        for i in 1..=n {
            p[0] = i;
            let mut j0 = 0;
            let mut minv = vec![f64::INFINITY; n + 1];
            let mut used = vec![false; n + 1];
            loop {
                used[j0] = true;
                let i0 = p[j0];
                let mut delta = f64::INFINITY;
                let mut j1 = 0;
                for j in 1..=n {
                    if !used[j] {
                        let cur = cost[i0 - 1][j - 1] - u[i0] - v[j];
                        if cur < minv[j] {
                            minv[j] = cur;
                            way[j] = j0;
                        }
                        if minv[j] < delta {
                            delta = minv[j];
                            j1 = j;
                        }
                    }
                }
                for j in 0..=n {
                    if used[j] {
                        u[p[j]] += delta;
                        v[j] -= delta;
                    } else {
                        minv[j] -= delta;
                    }
                }
                j0 = j1;
                if p[j0] == 0 {
                    break;
                }
            }
            // 沿 way 链回翻增广路
            loop {
                let j1 = way[j0];
                p[j0] = p[j1];
                j0 = j1;
                if j0 == 0 {
                    break;
                }
            }
            debug!(row = i, "指派行处理完成");
        }

        let mut total_cost = 0.0;
        let mut pairs = Vec::with_capacity(n);
        for j in 1..=n {
            let i = p[j];
            total_cost += cost[i - 1][j - 1];
            pairs.push((left[i - 1], right[j - 1]));
        }
        pairs.sort_by_key(|&(l, _)| left.iter().position(|&x| x == l));

        if total_cost > NO_EDGE / 2.0 {
            return Err(Error::Infeasible(format!(
                "仅用真实边无法构成完美指派（总费用 {} 超过哨兵阈值）",
                total_cost
            )));
        }

        Ok(Assignment { total_cost, pairs })
    }

    /// 由边权构建费用矩阵
    ///
    /// (left, right) 的费用 = 连接两者的边权：无向边两种存储顺序都算，
    /// 有向边只认 left→right 方向。没有合格边时取 `NO_EDGE`。
    /// 同一对顶点同时有有向边和无向边时取较小权重。
    fn cost_matrix(&self, left: &[VertexId], right: &[VertexId]) -> Vec<Vec<f64>> {
        let n = left.len();
        let mut left_pos: HashMap<VertexId, Vec<usize>> = HashMap::new();
        for (i, &id) in left.iter().enumerate() {
            left_pos.entry(id).or_default().push(i);
        }
        let mut right_pos: HashMap<VertexId, Vec<usize>> = HashMap::new();
        for (j, &id) in right.iter().enumerate() {
            right_pos.entry(id).or_default().push(j);
        }

        let mut cost = vec![vec![NO_EDGE; n]; n];
        let mut assign = |from: VertexId, to: VertexId, w: f64| {
            if let (Some(is), Some(js)) = (left_pos.get(&from), right_pos.get(&to)) {
                for &i in is {
                    for &j in js {
                        if cost[i][j] > w {
                            cost[i][j] = w;
                        }
                    }
                }
            }
        };
        for edge in self.graph.edges() {
            assign(edge.from(), edge.to(), edge.weight());
            if !edge.is_directed() {
                assign(edge.to(), edge.from(), edge.weight());
            }
        }
        cost
    }
}
