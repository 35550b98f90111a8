//! 图的文本格式读写
//!
//! 支持两种磁盘格式：
//! - 边表格式：首行顶点数，随后每行 `id label weight`；
//!   再一行边数，随后每行 `fromId toId weight directedFlag(0|1)`。
//! - 邻接矩阵格式：N 行 N 列实数；非零格 (i, j) 生成一条边，
//!   (i, j) ≠ (j, i) 时为有向边，否则为无向边；顶点按 1..N 合成，
//!   标签为 V1..VN。
//!
//! 解析统一走 `Vertex::new` / `Edge::new` / `Graph::add_*` 的校验路径，
//! 与手工构建的图遵守同样的不变量。

use crate::error::{Error, Result};
use crate::graph::{Edge, Graph, Vertex, VertexId};
use std::fmt::Write as _;
use std::path::Path;
use std::sync::Arc;
use tracing::debug;

// ==================== 边表格式 ====================

/// 把图格式化为边表文本
pub fn format_edge_list(graph: &Graph) -> String {
    let mut out = String::new();
    let vertices = graph.vertices();
    let _ = writeln!(out, "{}", vertices.len());
    for v in &vertices {
        let _ = writeln!(out, "{} {} {}", v.id(), v.label(), v.weight());
    }
    let edges = graph.edges();
    let _ = writeln!(out, "{}", edges.len());
    for e in &edges {
        let _ = writeln!(
            out,
            "{} {} {} {}",
            e.from(),
            e.to(),
            e.weight(),
            if e.is_directed() { 1 } else { 0 }
        );
    }
    out
}

/// 从边表文本解析图
pub fn parse_edge_list(input: &str) -> Result<Arc<Graph>> {
    let mut tokens = input.split_whitespace();
    let graph = Graph::new();

    let vertex_count: usize = next_token(&mut tokens, "顶点数")?
        .parse()
        .map_err(|_| Error::ParseError("无法解析顶点数".to_string()))?;

    for i in 0..vertex_count {
        let id: u64 = parse_field(&mut tokens, i, "顶点 ID")?;
        let label = next_token(&mut tokens, "顶点标签")?;
        let weight: f64 = parse_field(&mut tokens, i, "顶点权重")?;
        graph.add_vertex(Vertex::new(VertexId::new(id), label, weight)?)?;
    }

    let edge_count: usize = next_token(&mut tokens, "边数")?
        .parse()
        .map_err(|_| Error::ParseError("无法解析边数".to_string()))?;

    for i in 0..edge_count {
        let from: u64 = parse_field(&mut tokens, i, "源顶点 ID")?;
        let to: u64 = parse_field(&mut tokens, i, "目标顶点 ID")?;
        let weight: f64 = parse_field(&mut tokens, i, "边权重")?;
        let flag = next_token(&mut tokens, "方向标志")?;
        let directed = match flag {
            "0" => false,
            "1" => true,
            other => {
                return Err(Error::ParseError(format!(
                    "第 {} 条边的方向标志必须是 0 或 1: {}",
                    i, other
                )))
            }
        };
        graph.add_edge(Edge::new(VertexId::new(from), VertexId::new(to), weight, directed)?)?;
    }

    debug!(
        vertices = graph.vertex_count(),
        edges = graph.edge_count(),
        "边表解析完成"
    );
    Ok(graph)
}

/// 保存为边表文件
pub fn save_edge_list<P: AsRef<Path>>(graph: &Graph, path: P) -> Result<()> {
    std::fs::write(path, format_edge_list(graph))?;
    Ok(())
}

/// 从边表文件加载
pub fn load_edge_list<P: AsRef<Path>>(path: P) -> Result<Arc<Graph>> {
    let input = std::fs::read_to_string(path)?;
    parse_edge_list(&input)
}

// ==================== 邻接矩阵格式 ====================

/// 把图格式化为邻接矩阵文本
///
/// 按顶点插入顺序确定行列位置；该格式不携带顶点 ID 与标签，
/// 重新加载时会合成 1..N 的 ID。
pub fn format_adjacency_matrix(graph: &Graph) -> String {
    let ids = graph.vertex_ids();
    let pos: std::collections::HashMap<VertexId, usize> =
        ids.iter().enumerate().map(|(i, &id)| (id, i)).collect();
    let n = ids.len();
    let mut cells = vec![vec![0.0f64; n]; n];
    for e in graph.edges() {
        let i = pos[&e.from()];
        let j = pos[&e.to()];
        cells[i][j] = e.weight();
        if !e.is_directed() {
            cells[j][i] = e.weight();
        }
    }

    let mut out = String::new();
    for row in &cells {
        let line: Vec<String> = row.iter().map(|w| w.to_string()).collect();
        let _ = writeln!(out, "{}", line.join(" "));
    }
    out
}

/// 从邻接矩阵文本解析图
pub fn parse_adjacency_matrix(input: &str) -> Result<Arc<Graph>> {
    let mut cells: Vec<Vec<f64>> = Vec::new();
    for (lineno, line) in input.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let row: std::result::Result<Vec<f64>, _> =
            line.split_whitespace().map(|t| t.parse()).collect();
        let row = row.map_err(|_| {
            Error::ParseError(format!("第 {} 行存在无法解析的矩阵元素", lineno + 1))
        })?;
        cells.push(row);
    }

    let n = cells.len();
    for (i, row) in cells.iter().enumerate() {
        if row.len() != n {
            return Err(Error::ParseError(format!(
                "矩阵必须是方阵：第 {} 行有 {} 列，期望 {}",
                i + 1,
                row.len(),
                n
            )));
        }
        if cells[i][i] != 0.0 {
            return Err(Error::ParseError(format!(
                "矩阵对角元 ({0}, {0}) 非零，自环不被允许",
                i + 1
            )));
        }
    }

    let graph = Graph::new();
    for i in 0..n {
        graph.add_vertex(Vertex::new(
            VertexId::new(i as u64 + 1),
            format!("V{}", i + 1),
            0.0,
        )?)?;
    }
    for i in 0..n {
        for j in 0..n {
            if i == j || cells[i][j] == 0.0 {
                continue;
            }
            if cells[i][j] == cells[j][i] {
                // 对称非零：无向边，只存一次
                if i < j {
                    graph.add_edge(Edge::new(
                        VertexId::new(i as u64 + 1),
                        VertexId::new(j as u64 + 1),
                        cells[i][j],
                        false,
                    )?)?;
                }
            } else {
                graph.add_edge(Edge::new(
                    VertexId::new(i as u64 + 1),
                    VertexId::new(j as u64 + 1),
                    cells[i][j],
                    true,
                )?)?;
            }
        }
    }

    debug!(
        vertices = graph.vertex_count(),
        edges = graph.edge_count(),
        "邻接矩阵解析完成"
    );
    Ok(graph)
}

/// 保存为邻接矩阵文件
pub fn save_adjacency_matrix<P: AsRef<Path>>(graph: &Graph, path: P) -> Result<()> {
    std::fs::write(path, format_adjacency_matrix(graph))?;
    Ok(())
}

/// 从邻接矩阵文件加载
pub fn load_adjacency_matrix<P: AsRef<Path>>(path: P) -> Result<Arc<Graph>> {
    let input = std::fs::read_to_string(path)?;
    parse_adjacency_matrix(&input)
}

// ==================== 解析辅助 ====================

fn next_token<'a>(tokens: &mut impl Iterator<Item = &'a str>, what: &str) -> Result<&'a str> {
    tokens
        .next()
        .ok_or_else(|| Error::ParseError(format!("无法读取{}：输入提前结束", what)))
}

fn parse_field<'a, T: std::str::FromStr>(
    tokens: &mut impl Iterator<Item = &'a str>,
    index: usize,
    what: &str,
) -> Result<T> {
    let token = next_token(tokens, what)?;
    token
        .parse()
        .map_err(|_| Error::ParseError(format!("第 {} 条记录的{}无法解析: {}", index, what, token)))
}

#[cfg(test)]
mod tests {
    use super::*;

    const GOLDEN_EDGE_LIST: &str = "4\n\
        1 A 10\n\
        2 B 20\n\
        3 C 15\n\
        4 D 25\n\
        4\n\
        1 2 5 0\n\
        1 4 3 0\n\
        3 2 7 0\n\
        3 4 2 0\n";

    #[test]
    fn test_edge_list_golden_roundtrip() {
        let graph = parse_edge_list(GOLDEN_EDGE_LIST).unwrap();
        assert_eq!(graph.vertex_count(), 4);
        assert_eq!(graph.edge_count(), 4);
        assert_eq!(graph.get_vertex(VertexId::new(2)).unwrap().label(), "B");

        // 逐字节还原
        assert_eq!(format_edge_list(&graph), GOLDEN_EDGE_LIST);
    }

    #[test]
    fn test_edge_list_empty_graph() {
        let graph = Graph::new();
        let text = format_edge_list(&graph);
        assert_eq!(text, "0\n0\n");

        let parsed = parse_edge_list(&text).unwrap();
        assert_eq!(parsed.vertex_count(), 0);
        assert_eq!(parsed.edge_count(), 0);
    }

    #[test]
    fn test_edge_list_directed_flag() {
        let input = "2\n1 A 1\n2 B 2\n1\n1 2 4.5 1\n";
        let graph = parse_edge_list(input).unwrap();
        let e = graph.get_edge(VertexId::new(1), VertexId::new(2)).unwrap();
        assert!(e.is_directed());
        assert_eq!(e.weight(), 4.5);

        let bad = "2\n1 A 1\n2 B 2\n1\n1 2 4.5 2\n";
        assert!(matches!(parse_edge_list(bad), Err(Error::ParseError(_))));
    }

    #[test]
    fn test_edge_list_truncated() {
        let input = "2\n1 A 1\n";
        assert!(matches!(parse_edge_list(input), Err(Error::ParseError(_))));
    }

    #[test]
    fn test_edge_list_invalid_edge() {
        // 自环在数据模型层被拒绝
        let input = "1\n1 A 1\n1\n1 1 2 0\n";
        assert!(matches!(
            parse_edge_list(input),
            Err(Error::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_matrix_parse() {
        // 1-2 无向（对称），1->3 有向（不对称）
        let input = "0 5 2\n5 0 0\n0 0 0\n";
        let graph = parse_adjacency_matrix(input).unwrap();
        assert_eq!(graph.vertex_count(), 3);
        assert_eq!(graph.edge_count(), 2);
        assert_eq!(graph.get_vertex(VertexId::new(1)).unwrap().label(), "V1");

        let undirected = graph.get_edge(VertexId::new(1), VertexId::new(2)).unwrap();
        assert!(!undirected.is_directed());
        assert_eq!(undirected.weight(), 5.0);

        let directed = graph.get_edge(VertexId::new(1), VertexId::new(3)).unwrap();
        assert!(directed.is_directed());
        assert_eq!(directed.weight(), 2.0);
    }

    #[test]
    fn test_matrix_asymmetric_both_nonzero() {
        // 两个方向非零但不相等：生成两条有向边
        let input = "0 3\n4 0\n";
        let graph = parse_adjacency_matrix(input).unwrap();
        assert_eq!(graph.edge_count(), 2);
        assert!(graph
            .get_edge(VertexId::new(1), VertexId::new(2))
            .unwrap()
            .is_directed());
        assert!(graph
            .get_edge(VertexId::new(2), VertexId::new(1))
            .unwrap()
            .is_directed());
    }

    #[test]
    fn test_matrix_rejects_diagonal() {
        let input = "1 0\n0 0\n";
        assert!(matches!(
            parse_adjacency_matrix(input),
            Err(Error::ParseError(_))
        ));
    }

    #[test]
    fn test_matrix_rejects_ragged() {
        let input = "0 1\n1\n";
        assert!(matches!(
            parse_adjacency_matrix(input),
            Err(Error::ParseError(_))
        ));
    }

    #[test]
    fn test_matrix_roundtrip() {
        let input = "0 5 2\n5 0 0\n0 0 0\n";
        let graph = parse_adjacency_matrix(input).unwrap();
        assert_eq!(format_adjacency_matrix(&graph), input);
    }

    #[test]
    fn test_file_roundtrip() {
        use std::io::Write;
        let graph = parse_edge_list(GOLDEN_EDGE_LIST).unwrap();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("graph.txt");
        save_edge_list(&graph, &path).unwrap();
        let loaded = load_edge_list(&path).unwrap();
        assert_eq!(format_edge_list(&loaded), GOLDEN_EDGE_LIST);

        // 矩阵文件
        let mpath = dir.path().join("matrix.txt");
        let mut f = std::fs::File::create(&mpath).unwrap();
        write!(f, "0 1\n1 0\n").unwrap();
        let mgraph = load_adjacency_matrix(&mpath).unwrap();
        assert_eq!(mgraph.edge_count(), 1);
        save_adjacency_matrix(&mgraph, &mpath).unwrap();
        assert_eq!(std::fs::read_to_string(&mpath).unwrap(), "0 1\n1 0\n");
    }
}
