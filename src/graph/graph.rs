//! 图数据结构
//!
//! 顶点与边均按插入顺序存储，算法的确定性依赖该顺序。

use super::edge::Edge;
use super::vertex::{Vertex, VertexId};
use crate::error::{Error, Result};
use indexmap::IndexMap;
use parking_lot::RwLock;
use std::sync::Arc;
use tracing::debug;

/// 图
///
/// 通过 `Arc<Graph>` 在算法之间共享读访问；内部使用读写锁，
/// 算法一侧只读，互不干扰。
pub struct Graph {
    /// 顶点表（按插入顺序）
    vertices: RwLock<IndexMap<VertexId, Vertex>>,
    /// 边表（按插入顺序，以有序 (from, to) 对为键）
    edges: RwLock<IndexMap<(VertexId, VertexId), Edge>>,
}

impl Graph {
    /// 创建空图
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            vertices: RwLock::new(IndexMap::new()),
            edges: RwLock::new(IndexMap::new()),
        })
    }

    // ==================== 顶点操作 ====================

    /// 添加顶点，ID 必须唯一
    pub fn add_vertex(&self, vertex: Vertex) -> Result<()> {
        let mut vertices = self.vertices.write();
        if vertices.contains_key(&vertex.id()) {
            return Err(Error::InvalidArgument(format!(
                "顶点 {} 已存在",
                vertex.id()
            )));
        }
        debug!(id = vertex.id().as_u64(), "添加顶点");
        vertices.insert(vertex.id(), vertex);
        Ok(())
    }

    /// 获取顶点
    pub fn get_vertex(&self, id: VertexId) -> Option<Vertex> {
        self.vertices.read().get(&id).cloned()
    }

    /// 更新顶点
    pub fn update_vertex(&self, vertex: Vertex) -> Result<()> {
        let mut vertices = self.vertices.write();
        if !vertices.contains_key(&vertex.id()) {
            return Err(Error::NotFound(format!("顶点 {} 不存在", vertex.id())));
        }
        vertices.insert(vertex.id(), vertex);
        Ok(())
    }

    /// 删除顶点，级联删除所有关联的边
    pub fn remove_vertex(&self, id: VertexId) -> Result<()> {
        let mut vertices = self.vertices.write();
        if vertices.shift_remove(&id).is_none() {
            return Err(Error::NotFound(format!("顶点 {} 不存在", id)));
        }
        let mut edges = self.edges.write();
        edges.retain(|_, e| e.from() != id && e.to() != id);
        debug!(id = id.as_u64(), "删除顶点及其关联边");
        Ok(())
    }

    /// 判断顶点是否存在
    pub fn contains_vertex(&self, id: VertexId) -> bool {
        self.vertices.read().contains_key(&id)
    }

    /// 获取所有顶点 ID（插入顺序）
    pub fn vertex_ids(&self) -> Vec<VertexId> {
        self.vertices.read().keys().copied().collect()
    }

    /// 获取所有顶点（插入顺序）
    pub fn vertices(&self) -> Vec<Vertex> {
        self.vertices.read().values().cloned().collect()
    }

    /// 获取顶点数量
    pub fn vertex_count(&self) -> usize {
        self.vertices.read().len()
    }

    // ==================== 边操作 ====================

    /// 添加边
    ///
    /// 两个端点必须已存在；同一有序 (from, to) 对只能出现一次。
    /// 注意：一条有向边 A→B 和一条存储为 A–B 的无向边键不同，可以共存，
    /// 遍历时各按自己的方向规则处理。
    pub fn add_edge(&self, edge: Edge) -> Result<()> {
        let vertices = self.vertices.read();
        if !vertices.contains_key(&edge.from()) {
            return Err(Error::NotFound(format!("源顶点 {} 不存在", edge.from())));
        }
        if !vertices.contains_key(&edge.to()) {
            return Err(Error::NotFound(format!("目标顶点 {} 不存在", edge.to())));
        }
        let mut edges = self.edges.write();
        let key = (edge.from(), edge.to());
        if edges.contains_key(&key) {
            return Err(Error::InvalidArgument(format!(
                "边 {} -> {} 已存在",
                edge.from(),
                edge.to()
            )));
        }
        debug!(
            from = edge.from().as_u64(),
            to = edge.to().as_u64(),
            directed = edge.is_directed(),
            "添加边"
        );
        edges.insert(key, edge);
        Ok(())
    }

    /// 获取边（按有序 (from, to) 对）
    pub fn get_edge(&self, from: VertexId, to: VertexId) -> Option<Edge> {
        self.edges.read().get(&(from, to)).cloned()
    }

    /// 删除边（按有序 (from, to) 对）
    pub fn remove_edge(&self, from: VertexId, to: VertexId) -> Result<()> {
        let mut edges = self.edges.write();
        if edges.shift_remove(&(from, to)).is_none() {
            return Err(Error::NotFound(format!("边 {} -> {} 不存在", from, to)));
        }
        Ok(())
    }

    /// 获取所有边（插入顺序）
    pub fn edges(&self) -> Vec<Edge> {
        self.edges.read().values().cloned().collect()
    }

    /// 获取边数量
    pub fn edge_count(&self) -> usize {
        self.edges.read().len()
    }

    // ==================== 邻居查询 ====================

    /// 按遍历规则获取顶点的邻居
    ///
    /// 有向边只沿正向，无向边两个方向都算；邻居按边的插入顺序返回。
    pub fn neighbors(&self, id: VertexId) -> Vec<VertexId> {
        self.edges
            .read()
            .values()
            .filter_map(|e| e.traverse_from(id))
            .collect()
    }

    /// 构建整图的邻接表（按遍历规则，顺序确定）
    ///
    /// 供算法一次性构建调用内私有的邻接结构，避免逐点扫描边表。
    pub fn adjacency(&self) -> IndexMap<VertexId, Vec<VertexId>> {
        let vertices = self.vertices.read();
        let edges = self.edges.read();
        let mut adj: IndexMap<VertexId, Vec<VertexId>> =
            vertices.keys().map(|&id| (id, Vec::new())).collect();
        for edge in edges.values() {
            if let Some(list) = adj.get_mut(&edge.from()) {
                list.push(edge.to());
            }
            if !edge.is_directed() {
                if let Some(list) = adj.get_mut(&edge.to()) {
                    list.push(edge.from());
                }
            }
        }
        adj
    }
}
