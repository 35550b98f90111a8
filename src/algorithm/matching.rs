//! 二分图最大匹配
//!
//! 基于交错路增广的经典算法（Kuhn 风格，未做 Hopcroft-Karp 优化），
//! 最坏复杂度 O(V·E)。从染色结果的 0 侧逐点发起 BFS 增广，
//! 顶点按插入顺序处理以保证结果可复现。

use crate::algorithm::bipartite::BipartiteChecker;
use crate::algorithm::blossom::BlossomMatcher;
use crate::error::{Error, Result};
use crate::graph::{Graph, VertexId};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::Arc;
use tracing::debug;

/// 匹配结果
///
/// 每个顶点至多出现在一个匹配对中。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Matching {
    /// 匹配对（无序对，按发现顺序）
    pub pairs: Vec<(VertexId, VertexId)>,
}

impl Matching {
    /// 匹配对数量
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// 判断顶点是否被匹配覆盖
    pub fn covers(&self, id: VertexId) -> bool {
        self.pairs.iter().any(|&(a, b)| a == id || b == id)
    }
}

/// 二分图最大匹配器
pub struct BipartiteMatcher {
    graph: Arc<Graph>,
}

impl BipartiteMatcher {
    /// 创建匹配器
    pub fn new(graph: Arc<Graph>) -> Self {
        Self { graph }
    }

    /// 求最大匹配
    ///
    /// 先做二分判定；非二分图返回 `InvalidState`。
    pub fn max_matching(&self) -> Result<Matching> {
        let coloring = BipartiteChecker::new(self.graph.clone()).check();
        if !coloring.is_bipartite {
            return Err(Error::InvalidState(
                "图不是二分图，无法做二分图匹配".to_string(),
            ));
        }

        let adj = self.graph.adjacency();
        // 左侧 = 颜色 0，按顶点插入顺序
        let lefts: Vec<VertexId> = self
            .graph
            .vertex_ids()
            .into_iter()
            .filter(|id| coloring.colors.get(id) == Some(&0))
            .collect();

        let mut match_left: HashMap<VertexId, VertexId> = HashMap::new();
        let mut match_right: HashMap<VertexId, VertexId> = HashMap::new();

        for &u in &lefts {
            if self.augment(u, &adj, &mut match_left, &mut match_right) {
                debug!(from = u.as_u64(), "找到增广路");
            }
        }

        let pairs = lefts
            .iter()
            .filter_map(|&l| match_left.get(&l).map(|&r| (l, r)))
            .collect();
        Ok(Matching { pairs })
    }

    /// 从未匹配的左顶点 `u` 出发做 BFS 增广
    ///
    /// 在交错结构上搜索：左到右走非匹配边，右到左走匹配边。
    /// 到达未匹配的右顶点即沿父指针翻转路径。
    fn augment(
        &self,
        u: VertexId,
        adj: &indexmap::IndexMap<VertexId, Vec<VertexId>>,
        match_left: &mut HashMap<VertexId, VertexId>,
        match_right: &mut HashMap<VertexId, VertexId>,
    ) -> bool {
        let mut queue = VecDeque::new();
        queue.push_back(u);
        let mut visited_left = HashSet::new();
        visited_left.insert(u);
        let mut visited_right = HashSet::new();
        // 右顶点 -> 发现它的左顶点
        let mut parent: HashMap<VertexId, VertexId> = HashMap::new();

        while let Some(x) = queue.pop_front() {
            for &y in &adj[&x] {
                if !visited_right.insert(y) {
                    continue;
                }
                parent.insert(y, x);
                match match_right.get(&y).copied() {
                    None => {
                        // 增广：沿父指针翻转匹配状态
                        let mut right = y;
                        loop {
                            let left = parent[&right];
                            let prev = match_left.insert(left, right);
                            match_right.insert(right, left);
                            if left == u {
                                return true;
                            }
                            // left 原先的配偶是路径上前一个右顶点
                            right = prev.expect("交错路上的左顶点必有原配偶");
                        }
                    }
                    Some(z) => {
                        if visited_left.insert(z) {
                            queue.push_back(z);
                        }
                    }
                }
            }
        }
        false
    }
}

/// 最大匹配调度入口
///
/// 未知结构时的控制流：先做二分判定，二分图走交错路匹配（快路径），
/// 否则退回带花树算法。被选中算法的前置条件错误原样向上传播。
pub fn max_matching_auto(graph: Arc<Graph>) -> Result<Matching> {
    let coloring = BipartiteChecker::new(graph.clone()).check();
    if coloring.is_bipartite {
        debug!("图为二分图，使用交错路匹配");
        BipartiteMatcher::new(graph).max_matching()
    } else {
        debug!("图非二分图，使用带花树匹配");
        BlossomMatcher::new(graph).max_matching()
    }
}
