//! 一般图最大匹配（带花树算法）
//!
//! 对每个未匹配顶点做交错树 BFS；遇到连接两个同色（外层）顶点的边时
//! 说明找到奇环（"花"），求出两端在交错树中的最近公共祖先后，把环上
//! 顶点通过 base 映射数组收缩为一个逻辑基点继续搜索；搜到未匹配顶点
//! 即沿父指针翻转增广。复杂度 O(V³)。
//!
//! 本算法只对无向图有定义，存在任何有向边时直接拒绝。

use crate::algorithm::matching::Matching;
use crate::error::{Error, Result};
use crate::graph::{Graph, VertexId};
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use tracing::debug;

const NONE: usize = usize::MAX;

/// 一般图最大匹配器
pub struct BlossomMatcher {
    graph: Arc<Graph>,
}

impl BlossomMatcher {
    /// 创建匹配器
    pub fn new(graph: Arc<Graph>) -> Self {
        Self { graph }
    }

    /// 求最大匹配
    ///
    /// 前置条件：所有边都是无向边，否则返回 `InvalidState`。
    pub fn max_matching(&self) -> Result<Matching> {
        let ids = self.graph.vertex_ids();
        let n = ids.len();
        let slot: HashMap<VertexId, usize> =
            ids.iter().enumerate().map(|(i, &id)| (id, i)).collect();

        // 按插入顺序构建稠密邻接表，所有调用内状态都是平铺数组
        let mut adj: Vec<Vec<usize>> = vec![Vec::new(); n];
        for edge in self.graph.edges() {
            if edge.is_directed() {
                return Err(Error::InvalidState(format!(
                    "带花树算法只支持无向图，发现有向边 {} -> {}",
                    edge.from(),
                    edge.to()
                )));
            }
            let a = slot[&edge.from()];
            let b = slot[&edge.to()];
            adj[a].push(b);
            adj[b].push(a);
        }

        let mut search = Search {
            adj,
            mate: vec![NONE; n],
            p: vec![NONE; n],
            base: (0..n).collect(),
            used: vec![false; n],
            blossom: vec![false; n],
        };

        for v in 0..n {
            if search.mate[v] != NONE {
                continue;
            }
            let end = search.find_path(v);
            if end != NONE {
                debug!(root = ids[v].as_u64(), end = ids[end].as_u64(), "增广成功");
                search.augment(end);
            }
        }

        let pairs = (0..n)
            .filter(|&i| search.mate[i] != NONE && i < search.mate[i])
            .map(|i| (ids[i], ids[search.mate[i]]))
            .collect();
        Ok(Matching { pairs })
    }
}

/// 单次调用私有的搜索状态
///
/// base 映射是搜索局部量，`find_path` 开头整体重置。
struct Search {
    adj: Vec<Vec<usize>>,
    mate: Vec<usize>,
    p: Vec<usize>,
    base: Vec<usize>,
    used: Vec<bool>,
    blossom: Vec<bool>,
}

impl Search {
    /// 从未匹配顶点 `root` 生长交错树
    ///
    /// 返回增广路的另一端（未匹配顶点），找不到返回 `NONE`。
    fn find_path(&mut self, root: usize) -> usize {
        let n = self.adj.len();
        self.used.iter_mut().for_each(|u| *u = false);
        self.p.iter_mut().for_each(|x| *x = NONE);
        for (i, b) in self.base.iter_mut().enumerate() {
            *b = i;
        }

        self.used[root] = true;
        let mut queue = VecDeque::new();
        queue.push_back(root);

        while let Some(v) = queue.pop_front() {
            for idx in 0..self.adj[v].len() {
                let to = self.adj[v][idx];
                if self.base[v] == self.base[to] || self.mate[v] == to {
                    continue;
                }
                if to == root || (self.mate[to] != NONE && self.p[self.mate[to]] != NONE) {
                    // 两个外层顶点相遇：奇环，收缩花
                    let curbase = self.lca(v, to);
                    debug!(v, to, curbase, "收缩花");
                    self.blossom.iter_mut().for_each(|b| *b = false);
                    self.mark_path(v, curbase, to);
                    self.mark_path(to, curbase, v);
                    // 所有共享旧基点的顶点一并重定位到新基点
                    for i in 0..n {
                        if self.blossom[self.base[i]] {
                            self.base[i] = curbase;
                            if !self.used[i] {
                                self.used[i] = true;
                                queue.push_back(i);
                            }
                        }
                    }
                } else if self.p[to] == NONE {
                    self.p[to] = v;
                    if self.mate[to] == NONE {
                        return to;
                    }
                    // to 已匹配：其配偶成为新的外层顶点
                    self.used[self.mate[to]] = true;
                    queue.push_back(self.mate[to]);
                }
            }
        }
        NONE
    }

    /// 沿父指针翻转匹配状态，完成一次增广
    fn augment(&mut self, mut v: usize) {
        while v != NONE {
            let pv = self.p[v];
            let ppv = self.mate[pv];
            self.mate[v] = pv;
            self.mate[pv] = v;
            v = ppv;
        }
    }

    /// 求两个顶点在交错树中（按基点）的最近公共祖先
    fn lca(&self, mut a: usize, mut b: usize) -> usize {
        let mut marked = vec![false; self.adj.len()];
        a = self.base[a];
        loop {
            marked[a] = true;
            if self.mate[a] == NONE {
                break;
            }
            a = self.base[self.p[self.mate[a]]];
        }
        b = self.base[b];
        loop {
            if marked[b] {
                return b;
            }
            b = self.base[self.p[self.mate[b]]];
        }
    }

    /// 把 `v` 到基点 `b` 之间环上的顶点标入花中，并重接父指针
    fn mark_path(&mut self, mut v: usize, b: usize, mut child: usize) {
        while self.base[v] != b {
            self.blossom[self.base[v]] = true;
            self.blossom[self.base[self.mate[v]]] = true;
            self.p[v] = child;
            child = self.mate[v];
            v = self.p[self.mate[v]];
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{Edge, Vertex};

    fn build(vertices: &[u64], edges: &[(u64, u64)]) -> Arc<Graph> {
        let graph = Graph::new();
        for &id in vertices {
            graph
                .add_vertex(Vertex::new(VertexId::new(id), format!("V{}", id), 0.0).unwrap())
                .unwrap();
        }
        for &(from, to) in edges {
            graph
                .add_edge(Edge::new(VertexId::new(from), VertexId::new(to), 1.0, false).unwrap())
                .unwrap();
        }
        graph
    }

    fn assert_valid_matching(graph: &Arc<Graph>, matching: &Matching) {
        let mut seen = std::collections::HashSet::new();
        for &(a, b) in &matching.pairs {
            assert!(seen.insert(a), "顶点 {} 重复出现", a);
            assert!(seen.insert(b), "顶点 {} 重复出现", b);
            // 匹配对之间必须有边
            assert!(
                graph.get_edge(a, b).is_some() || graph.get_edge(b, a).is_some(),
                "匹配对 ({}, {}) 之间没有边",
                a,
                b
            );
        }
    }

    #[test]
    fn test_six_vertex_perfect_matching() {
        // 含奇环结构的 6 顶点图，完美匹配大小 3
        let graph = build(
            &[1, 2, 3, 4, 5, 6],
            &[(1, 2), (1, 3), (2, 4), (3, 5), (4, 6), (5, 6)],
        );
        let matching = BlossomMatcher::new(graph.clone()).max_matching().unwrap();
        assert_eq!(matching.len(), 3);
        assert_valid_matching(&graph, &matching);
    }

    #[test]
    fn test_triangle() {
        let graph = build(&[1, 2, 3], &[(1, 2), (2, 3), (3, 1)]);
        let matching = BlossomMatcher::new(graph.clone()).max_matching().unwrap();
        assert_eq!(matching.len(), 1);
        assert_valid_matching(&graph, &matching);
    }

    #[test]
    fn test_odd_cycle_five() {
        // 5 环：最大匹配 2
        let graph = build(&[1, 2, 3, 4, 5], &[(1, 2), (2, 3), (3, 4), (4, 5), (5, 1)]);
        let matching = BlossomMatcher::new(graph.clone()).max_matching().unwrap();
        assert_eq!(matching.len(), 2);
        assert_valid_matching(&graph, &matching);
    }

    #[test]
    fn test_blossom_with_stem() {
        // 经典花茎结构：三角形 3-4-5 挂在路径 1-2-3 上，外加 5-6
        // 需要收缩才能找到完美匹配 {1-2, 3-4, 5-6}
        let graph = build(
            &[1, 2, 3, 4, 5, 6],
            &[(1, 2), (2, 3), (3, 4), (4, 5), (5, 3), (5, 6)],
        );
        let matching = BlossomMatcher::new(graph.clone()).max_matching().unwrap();
        assert_eq!(matching.len(), 3);
        assert_valid_matching(&graph, &matching);
    }

    #[test]
    fn test_directed_edge_rejected() {
        let graph = Graph::new();
        for id in 1..=2 {
            graph
                .add_vertex(Vertex::new(VertexId::new(id), format!("V{}", id), 0.0).unwrap())
                .unwrap();
        }
        graph
            .add_edge(Edge::new(VertexId::new(1), VertexId::new(2), 1.0, true).unwrap())
            .unwrap();

        let result = BlossomMatcher::new(graph).max_matching();
        assert!(matches!(result, Err(Error::InvalidState(_))));
    }

    #[test]
    fn test_empty_graph() {
        let graph = Graph::new();
        let matching = BlossomMatcher::new(graph).max_matching().unwrap();
        assert!(matching.is_empty());
    }

    #[test]
    fn test_isolated_vertices() {
        let graph = build(&[1, 2, 3, 4], &[(2, 3)]);
        let matching = BlossomMatcher::new(graph.clone()).max_matching().unwrap();
        assert_eq!(matching.len(), 1);
        assert_valid_matching(&graph, &matching);
    }

    #[test]
    fn test_petersen_graph() {
        // Petersen 图有完美匹配（大小 5）
        let graph = build(
            &[1, 2, 3, 4, 5, 6, 7, 8, 9, 10],
            &[
                (1, 2),
                (2, 3),
                (3, 4),
                (4, 5),
                (5, 1),
                (6, 8),
                (8, 10),
                (10, 7),
                (7, 9),
                (9, 6),
                (1, 6),
                (2, 7),
                (3, 8),
                (4, 9),
                (5, 10),
            ],
        );
        let matching = BlossomMatcher::new(graph.clone()).max_matching().unwrap();
        assert_eq!(matching.len(), 5);
        assert_valid_matching(&graph, &matching);
    }
}
