//! 边定义

use crate::error::{Error, Result};
use crate::graph::vertex::VertexId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// 边
///
/// 有向边仅能从 `from` 遍历到 `to`；无向边只存储一次，但可以从任一端遍历。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    /// 源顶点 ID
    from: VertexId,
    /// 目标顶点 ID
    to: VertexId,
    /// 边权重（正数）
    weight: f64,
    /// 是否有向
    directed: bool,
}

impl Edge {
    /// 创建新边
    ///
    /// 不允许自环；权重必须为正数（NaN 同样被拒绝）。
    pub fn new(from: VertexId, to: VertexId, weight: f64, directed: bool) -> Result<Self> {
        if from == to {
            return Err(Error::InvalidArgument(format!("不允许自环: {}", from)));
        }
        if !(weight > 0.0) {
            return Err(Error::InvalidArgument(format!(
                "边权重必须为正数: {}",
                weight
            )));
        }
        Ok(Self {
            from,
            to,
            weight,
            directed,
        })
    }

    /// 获取源顶点 ID
    pub fn from(&self) -> VertexId {
        self.from
    }

    /// 获取目标顶点 ID
    pub fn to(&self) -> VertexId {
        self.to
    }

    /// 获取边权重
    pub fn weight(&self) -> f64 {
        self.weight
    }

    /// 是否为有向边
    pub fn is_directed(&self) -> bool {
        self.directed
    }

    /// 设置边权重（重新校验）
    pub fn set_weight(&mut self, weight: f64) -> Result<()> {
        if !(weight > 0.0) {
            return Err(Error::InvalidArgument(format!(
                "边权重必须为正数: {}",
                weight
            )));
        }
        self.weight = weight;
        Ok(())
    }

    /// 设置方向标志
    pub fn set_directed(&mut self, directed: bool) {
        self.directed = directed;
    }

    /// 按遍历规则判断能否从 `v` 沿此边走到对端
    ///
    /// 有向边只允许正向；无向边两个方向都允许。
    pub fn traverse_from(&self, v: VertexId) -> Option<VertexId> {
        if v == self.from {
            Some(self.to)
        } else if v == self.to && !self.directed {
            Some(self.from)
        } else {
            None
        }
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let separator = if self.directed { " -> " } else { " -- " };
        let directed_str = if self.directed { "yes" } else { "no" };
        write!(
            f,
            "{}{}{} (weight: {}, directed: {})",
            self.from, separator, self.to, self.weight, directed_str
        )
    }
}
