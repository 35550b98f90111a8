//! 结果打印器
//!
//! 把图和各算法结果渲染为表格文本

use crate::algorithm::{Assignment, Coloring, Matching};
use crate::graph::Graph;
use prettytable::{format, row, Cell, Row, Table};

/// 结果打印器
#[derive(Default)]
pub struct Printer;

impl Printer {
    pub fn new() -> Self {
        Self
    }

    /// 打印图的顶点表与边表
    pub fn print_graph(&self, graph: &Graph) -> String {
        let mut vertex_table = Table::new();
        vertex_table.set_format(*format::consts::FORMAT_BOX_CHARS);
        vertex_table.set_titles(row!["ID", "Label", "Weight"]);
        for v in graph.vertices() {
            vertex_table.add_row(Row::new(vec![
                Cell::new(&v.id().to_string()),
                Cell::new(v.label()),
                Cell::new(&v.weight().to_string()),
            ]));
        }

        let mut edge_table = Table::new();
        edge_table.set_format(*format::consts::FORMAT_BOX_CHARS);
        edge_table.set_titles(row!["From", "To", "Weight", "Directed"]);
        for e in graph.edges() {
            edge_table.add_row(Row::new(vec![
                Cell::new(&e.from().to_string()),
                Cell::new(&e.to().to_string()),
                Cell::new(&e.weight().to_string()),
                Cell::new(if e.is_directed() { "yes" } else { "no" }),
            ]));
        }

        format!("顶点:\n{}边:\n{}", vertex_table, edge_table)
    }

    /// 打印统计信息
    pub fn print_stats(&self, vertex_count: usize, edge_count: usize) -> String {
        let mut table = Table::new();
        table.set_format(*format::consts::FORMAT_BOX_CHARS);
        table.set_titles(row!["Property", "Value"]);
        table.add_row(row!["Vertex Count", vertex_count.to_string()]);
        table.add_row(row!["Edge Count", edge_count.to_string()]);
        table.to_string()
    }

    /// 打印染色结果
    pub fn print_coloring(&self, coloring: &Coloring) -> String {
        let mut table = Table::new();
        table.set_format(*format::consts::FORMAT_BOX_CHARS);
        table.set_titles(row!["Vertex", "Color"]);
        for (id, color) in &coloring.colors {
            table.add_row(row![id.to_string(), color.to_string()]);
        }
        table.to_string()
    }

    /// 打印匹配结果
    pub fn print_matching(&self, matching: &Matching) -> String {
        if matching.is_empty() {
            return "（空匹配）\n".to_string();
        }
        let mut table = Table::new();
        table.set_format(*format::consts::FORMAT_BOX_CHARS);
        table.set_titles(row!["Vertex A", "Vertex B"]);
        for &(a, b) in &matching.pairs {
            table.add_row(row![a.to_string(), b.to_string()]);
        }
        format!("{}匹配对数: {}\n", table, matching.len())
    }

    /// 打印指派结果
    pub fn print_assignment(&self, assignment: &Assignment) -> String {
        let mut table = Table::new();
        table.set_format(*format::consts::FORMAT_BOX_CHARS);
        table.set_titles(row!["Left", "Right"]);
        for &(l, r) in &assignment.pairs {
            table.add_row(row![l.to_string(), r.to_string()]);
        }
        format!("{}总费用: {}\n", table, assignment.total_cost)
    }

    /// 打印帮助信息
    pub fn print_help() -> String {
        r#"
═══════════════════════════════════════════════════════════════
                   GraphMatch CLI 命令帮助
═══════════════════════════════════════════════════════════════

基础命令:
  help, h, ?             显示帮助
  quit, exit, q          退出程序
  stats, info            显示图统计信息
  print                  打印当前图

图编辑:
  addv <id> <标签> <权重>        添加顶点
  adde <from> <to> <权重> <0|1>  添加边（1 = 有向）
  rmv <id>                       删除顶点（级联删除关联边）
  rme <from> <to>                删除边

算法:
  bipartite [bfs|dfs] [json]  二分图判定（默认 bfs）
  match [json]                最大匹配（自动选择算法）
  matchb [json]               二分图最大匹配（交错路）
  matchg [json]               一般图最大匹配（带花树）
  assign <l1,l2,..> <r1,r2,..> [json]
                              最小费用指派
  demo                        运行内置演示

文件:
  save <文件>    保存为边表格式
  load <文件>    从边表格式加载
  savem <文件>   保存为邻接矩阵格式
  loadm <文件>   从邻接矩阵格式加载

═══════════════════════════════════════════════════════════════
"#
        .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{Edge, Vertex, VertexId};

    #[test]
    fn test_print_graph() {
        let graph = Graph::new();
        graph
            .add_vertex(Vertex::new(VertexId::new(1), "A", 1.0).unwrap())
            .unwrap();
        graph
            .add_vertex(Vertex::new(VertexId::new(2), "B", 2.0).unwrap())
            .unwrap();
        graph
            .add_edge(Edge::new(VertexId::new(1), VertexId::new(2), 5.0, false).unwrap())
            .unwrap();

        let out = Printer::new().print_graph(&graph);
        assert!(out.contains("A"));
        assert!(out.contains("5"));
        assert!(out.contains("no"));
    }

    #[test]
    fn test_print_matching_empty() {
        let out = Printer::new().print_matching(&Matching { pairs: vec![] });
        assert!(out.contains("空匹配"));
    }

    #[test]
    fn test_print_stats() {
        let out = Printer::new().print_stats(3, 2);
        assert!(out.contains("3"));
        assert!(out.contains("2"));
    }
}
