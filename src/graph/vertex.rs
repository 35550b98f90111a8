//! 顶点定义

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// 顶点 ID（全局唯一，非负）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct VertexId(pub u64);

impl VertexId {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl From<u64> for VertexId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl fmt::Display for VertexId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 顶点
///
/// 权重仅作为附加信息，算法本身不使用顶点权重。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vertex {
    /// 顶点 ID
    id: VertexId,
    /// 顶点标签（非空）
    label: String,
    /// 顶点权重
    weight: f64,
}

impl Vertex {
    /// 创建新顶点，标签不能为空
    pub fn new(id: VertexId, label: impl Into<String>, weight: f64) -> Result<Self> {
        let label = label.into();
        if label.is_empty() {
            return Err(Error::InvalidArgument("顶点标签不能为空".to_string()));
        }
        Ok(Self { id, label, weight })
    }

    /// 获取顶点 ID
    pub fn id(&self) -> VertexId {
        self.id
    }

    /// 获取顶点标签
    pub fn label(&self) -> &str {
        &self.label
    }

    /// 获取顶点权重
    pub fn weight(&self) -> f64 {
        self.weight
    }

    /// 设置顶点标签（重新校验）
    pub fn set_label(&mut self, label: impl Into<String>) -> Result<()> {
        let label = label.into();
        if label.is_empty() {
            return Err(Error::InvalidArgument("顶点标签不能为空".to_string()));
        }
        self.label = label;
        Ok(())
    }

    /// 设置顶点权重
    pub fn set_weight(&mut self, weight: f64) {
        self.weight = weight;
    }
}

impl fmt::Display for Vertex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ID: {} | Label: {} | Weight: {}",
            self.id, self.label, self.weight
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vertex_basic() {
        let v = Vertex::new(VertexId::new(1), "A", 10.0).unwrap();

        assert_eq!(v.id().as_u64(), 1);
        assert_eq!(v.label(), "A");
        assert_eq!(v.weight(), 10.0);
    }

    #[test]
    fn test_vertex_empty_label() {
        let result = Vertex::new(VertexId::new(1), "", 0.0);
        assert!(matches!(result, Err(Error::InvalidArgument(_))));
    }

    #[test]
    fn test_vertex_setters() {
        let mut v = Vertex::new(VertexId::new(1), "A", 1.0).unwrap();

        v.set_label("B").unwrap();
        assert_eq!(v.label(), "B");

        assert!(v.set_label("").is_err());
        assert_eq!(v.label(), "B");

        v.set_weight(3.5);
        assert_eq!(v.weight(), 3.5);
    }

    #[test]
    fn test_vertex_display() {
        let v = Vertex::new(VertexId::new(1), "A", 10.0).unwrap();
        assert_eq!(format!("{}", v), "ID: 1 | Label: A | Weight: 10");
    }
}
