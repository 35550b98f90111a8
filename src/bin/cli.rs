//! GraphMatch CLI 工具
//!
//! 交互式命令行界面：构建图、运行二分判定 / 匹配 / 指派算法、
//! 读写两种文本格式。

use clap::Parser;
use colored::Colorize;
use graphmatch::algorithm::{
    max_matching_auto, AssignmentSolver, BipartiteChecker, BipartiteMatcher, BlossomMatcher,
};
use graphmatch::cli::Printer;
use graphmatch::graph::{Edge, Graph, Vertex, VertexId};
use graphmatch::io;
use std::io::{stdin, stdout, BufRead, Write};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "graphmatch-cli")]
#[command(about = "GraphMatch 命令行工具")]
struct Args {
    /// 启动时加载的边表文件
    #[arg(short, long)]
    load: Option<String>,

    /// 启动时加载的邻接矩阵文件
    #[arg(short, long)]
    matrix: Option<String>,

    /// 执行单个命令后退出
    #[arg(short = 'e', long)]
    execute: Option<String>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    println!("GraphMatch - 图匹配算法引擎 v{}", graphmatch::VERSION);
    println!("====================================");

    let mut graph = if let Some(path) = &args.load {
        let g = io::load_edge_list(path)?;
        println!("已从边表文件加载: {}", path);
        g
    } else if let Some(path) = &args.matrix {
        let g = io::load_adjacency_matrix(path)?;
        println!("已从邻接矩阵文件加载: {}", path);
        g
    } else {
        Graph::new()
    };

    println!("  顶点数: {}", graph.vertex_count());
    println!("  边数: {}", graph.edge_count());

    // 单个命令模式
    if let Some(cmd) = args.execute {
        if let Err(e) = handle_command(&mut graph, &cmd) {
            eprintln!("{} {}", "错误:".red(), e);
            std::process::exit(1);
        }
        return Ok(());
    }

    // 交互模式
    println!("\n输入 'help' 查看命令列表，'quit' 退出\n");

    let stdin = stdin();
    loop {
        print!("graphmatch> ");
        stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }

        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        match handle_command(&mut graph, line) {
            Ok(true) => break,
            Ok(false) => {}
            Err(e) => println!("{} {}", "错误:".red(), e),
        }
    }

    println!("再见！");
    Ok(())
}

/// 处理一条命令，返回 Ok(true) 表示退出
fn handle_command(graph: &mut Arc<Graph>, input: &str) -> Result<bool, Box<dyn std::error::Error>> {
    let parts: Vec<&str> = input.split_whitespace().collect();
    let Some(first) = parts.first() else {
        return Ok(false);
    };
    let cmd = first.to_lowercase();
    let args = &parts[1..];
    let printer = Printer::new();
    let as_json = args.last() == Some(&"json");

    match cmd.as_str() {
        "quit" | "exit" | "q" => return Ok(true),
        "help" | "h" | "?" => println!("{}", Printer::print_help()),
        "stats" | "info" => println!("{}", printer.print_stats(graph.vertex_count(), graph.edge_count())),
        "print" => println!("{}", printer.print_graph(graph)),

        "addv" => {
            let (id, label, weight) = match args {
                [id, label, weight] => (id.parse()?, *label, weight.parse()?),
                _ => return Err("用法: addv <id> <标签> <权重>".into()),
            };
            graph.add_vertex(Vertex::new(VertexId::new(id), label, weight)?)?;
            println!("已添加顶点 {}", id);
        }
        "adde" => {
            let (from, to, weight, flag) = match args {
                [f, t, w, d] => (f.parse()?, t.parse()?, w.parse()?, *d),
                _ => return Err("用法: adde <from> <to> <权重> <0|1>".into()),
            };
            let directed = match flag {
                "0" => false,
                "1" => true,
                _ => return Err("方向标志必须是 0 或 1".into()),
            };
            graph.add_edge(Edge::new(
                VertexId::new(from),
                VertexId::new(to),
                weight,
                directed,
            )?)?;
            println!("已添加边 {} {} {}", from, if directed { "->" } else { "--" }, to);
        }
        "rmv" => {
            let id: u64 = args.first().ok_or("用法: rmv <id>")?.parse()?;
            graph.remove_vertex(VertexId::new(id))?;
            println!("已删除顶点 {} 及其关联边", id);
        }
        "rme" => {
            let (from, to) = match args {
                [f, t] => (f.parse()?, t.parse()?),
                _ => return Err("用法: rme <from> <to>".into()),
            };
            graph.remove_edge(VertexId::new(from), VertexId::new(to))?;
            println!("已删除边 {} -> {}", from, to);
        }

        "bipartite" => {
            let checker = BipartiteChecker::new(graph.clone());
            let result = if args.first() == Some(&"dfs") {
                checker.check_dfs()
            } else {
                checker.check()
            };
            if as_json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                let verdict = if result.is_bipartite {
                    "二分图 ✓".green()
                } else {
                    "非二分图 ✗".red()
                };
                println!("结果: {}", verdict);
                println!("{}", printer.print_coloring(&result));
            }
        }
        "match" | "matchb" | "matchg" => {
            let result = match cmd.as_str() {
                "matchb" => BipartiteMatcher::new(graph.clone()).max_matching()?,
                "matchg" => BlossomMatcher::new(graph.clone()).max_matching()?,
                _ => max_matching_auto(graph.clone())?,
            };
            if as_json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                println!("{}", printer.print_matching(&result));
            }
        }
        "assign" => {
            let (left, right) = match args {
                [l, r] | [l, r, _] => (parse_id_list(l)?, parse_id_list(r)?),
                _ => return Err("用法: assign <l1,l2,..> <r1,r2,..>".into()),
            };
            let result = AssignmentSolver::new(graph.clone()).solve(&left, &right)?;
            if as_json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                println!("{}", printer.print_assignment(&result));
            }
        }
        "demo" => run_demo(),

        "save" => {
            let path = args.first().ok_or("用法: save <文件>")?;
            io::save_edge_list(graph, path)?;
            println!("已保存到 {}", path);
        }
        "savem" => {
            let path = args.first().ok_or("用法: savem <文件>")?;
            io::save_adjacency_matrix(graph, path)?;
            println!("已保存到 {}", path);
        }
        "load" => {
            let path = args.first().ok_or("用法: load <文件>")?;
            *graph = io::load_edge_list(path)?;
            println!(
                "已从 {} 加载: {} 个顶点, {} 条边",
                path,
                graph.vertex_count(),
                graph.edge_count()
            );
        }
        "loadm" => {
            let path = args.first().ok_or("用法: loadm <文件>")?;
            *graph = io::load_adjacency_matrix(path)?;
            println!(
                "已从 {} 加载: {} 个顶点, {} 条边",
                path,
                graph.vertex_count(),
                graph.edge_count()
            );
        }

        _ => return Err(format!("未知命令: {}（输入 help 查看帮助）", cmd).into()),
    }
    Ok(false)
}

/// 解析逗号分隔的顶点 ID 列表
fn parse_id_list(input: &str) -> Result<Vec<VertexId>, Box<dyn std::error::Error>> {
    input
        .split(',')
        .filter(|s| !s.is_empty())
        .map(|s| Ok(VertexId::new(s.trim().parse()?)))
        .collect()
}

/// 内置演示：二分图、三角形与多分量场景
fn run_demo() {
    let printer = Printer::new();

    let scenarios: [(&str, &[u64], &[(u64, u64)]); 3] = [
        ("4 顶点二分图", &[1, 2, 3, 4], &[(1, 2), (1, 4), (3, 2), (3, 4)]),
        ("三角形 1-2-3-1", &[1, 2, 3], &[(1, 2), (2, 3), (3, 1)]),
        ("两个独立分量", &[1, 2, 3, 4, 5], &[(1, 2), (3, 4), (4, 5)]),
    ];

    for (name, vertices, edges) in scenarios {
        println!("\n═══ 演示: {} ═══", name);
        let graph = Graph::new();
        for &id in vertices {
            let vertex = match Vertex::new(VertexId::new(id), format!("V{}", id), 0.0) {
                Ok(v) => v,
                Err(e) => {
                    println!("{} {}", "错误:".red(), e);
                    return;
                }
            };
            if let Err(e) = graph.add_vertex(vertex) {
                println!("{} {}", "错误:".red(), e);
                return;
            }
        }
        for &(from, to) in edges {
            let edge = match Edge::new(VertexId::new(from), VertexId::new(to), 1.0, false) {
                Ok(e) => e,
                Err(e) => {
                    println!("{} {}", "错误:".red(), e);
                    return;
                }
            };
            if let Err(e) = graph.add_edge(edge) {
                println!("{} {}", "错误:".red(), e);
                return;
            }
        }

        let result = BipartiteChecker::new(graph.clone()).check();
        let verdict = if result.is_bipartite {
            "二分图 ✓".green()
        } else {
            "非二分图 ✗".red()
        };
        println!("二分判定: {}", verdict);

        match max_matching_auto(graph) {
            Ok(matching) => println!("{}", printer.print_matching(&matching)),
            Err(e) => println!("{} {}", "错误:".red(), e),
        }
    }
}
