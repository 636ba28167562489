use std::fs::File;
use std::io::{BufRead, BufReader};
use std::time::Instant;

use anyhow::{bail, ensure, Context, Result};
use densegraph_core::euler::reference;
use densegraph_core::{
    generate, BreadthFirstPaths, Digraph, DirectedEulerianCycle, DirectedEulerianPath,
    SymbolUndirected,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde_json::json;
use tracing::{debug, info, warn};

mod config;

use config::Config;

fn main() -> Result<()> {
    dotenv::dotenv().ok();
    init_tracing();

    let mut args: Vec<String> = std::env::args().collect();
    let json = args.iter().any(|a| a == "--json");
    args.retain(|a| a != "--json");

    let mode = args.get(1).map(|s| s.as_str()).unwrap_or("all");

    if mode == "help" || mode == "--help" {
        print_help();
        return Ok(());
    }

    if mode == "symbol" {
        let (Some(file), Some(delimiter), Some(source)) = (args.get(2), args.get(3), args.get(4))
        else {
            bail!("usage: densegraph-bench symbol <file> <delimiter> <source> [--json]");
        };
        return run_symbol(file, delimiter, source, json);
    }

    let config = Config::from_env(args.get(2).map(|s| s.as_str()), json)?;
    info!(
        vertices = config.vertices,
        edge_factor = config.edge_factor,
        seed = config.seed,
        certify = config.certify,
        "configuration loaded"
    );

    let runs: Vec<(&str, fn(&Config, usize) -> Result<()>)> = match mode {
        "bfs" => vec![("BFS over simple graphs", run_bfs)],
        "euler" => vec![("Eulerian cycles", run_euler)],
        "path" => vec![("Eulerian paths", run_path)],
        "all" => vec![
            ("BFS over simple graphs", run_bfs as fn(&Config, usize) -> Result<()>),
            ("Eulerian cycles", run_euler),
            ("Eulerian paths", run_path),
        ],
        _ => bail!("unknown mode: {}. Use --help for options.", mode),
    };

    if !config.json {
        println!("densegraph-bench");
        println!("================");
        println!();
    }

    for (name, run) in runs {
        if !config.json {
            println!("--- {} ---", name);
            println!(
                "{:>10} {:>12} {:>12} {:>10} {:>10}",
                "vertices", "edges", "result", "time", "certified"
            );
            println!("{:->10} {:->12} {:->12} {:->10} {:->10}", "", "", "", "", "");
        }
        for size in sizes(config.vertices) {
            run(&config, size)?;
        }
        if !config.json {
            println!();
        }
    }

    Ok(())
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "densegraph_bench=info,densegraph_core=warn".into()),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn print_help() {
    println!("Usage: densegraph-bench [mode] [vertex_count] [--json]");
    println!("       densegraph-bench symbol <file> <delimiter> <source> [--json]");
    println!();
    println!("Modes:");
    println!("  all         Run bfs, euler and path (default)");
    println!("  bfs         Single-source BFS over random simple graphs");
    println!("  euler       Eulerian cycles over random closed walks, plus a split digraph");
    println!("  path        Eulerian paths over random open walks");
    println!("  symbol      Degrees of separation from <source> in a delimited file");
    println!();
    println!("Settings (environment or .env):");
    for line in config::describe() {
        println!("{}", line);
    }
}

/// Sizes grow by 10x up to the configured vertex count.
fn sizes(max: usize) -> Vec<usize> {
    let mut sizes = Vec::new();
    let mut v = max;
    while v >= 10 && sizes.len() < 4 {
        sizes.push(v);
        v /= 10;
    }
    if sizes.is_empty() {
        sizes.push(max);
    }
    sizes.reverse();
    sizes
}

fn report(
    config: &Config,
    mode: &str,
    vertices: usize,
    edges: usize,
    result: String,
    ms: f64,
    certified: bool,
) {
    if config.json {
        println!(
            "{}",
            json!({
                "mode": mode,
                "vertices": vertices,
                "edges": edges,
                "result": result,
                "time_ms": ms,
                "certified": certified,
            })
        );
    } else {
        let certified = if certified { "yes" } else { "-" };
        println!(
            "{:>10} {:>12} {:>12} {:>8.1}ms {:>10}",
            vertices, edges, result, ms, certified
        );
    }
}

fn run_bfs(config: &Config, v: usize) -> Result<()> {
    let mut rng = StdRng::seed_from_u64(config.seed);
    let max_edges = v * (v - 1) / 2;
    let e = (v * config.edge_factor).min(max_edges);

    let t = Instant::now();
    let graph = generate::simple(v, e, &mut rng)?;
    debug!(
        vertices = v,
        edges = e,
        memory_mb = graph.memory_usage() as f64 / 1_048_576.0,
        elapsed_ms = t.elapsed().as_secs_f64() * 1000.0,
        "generated simple graph"
    );

    let t = Instant::now();
    let bfs = BreadthFirstPaths::new(&graph, 0)?;
    let ms = t.elapsed().as_secs_f64() * 1000.0;

    let result = format!("{} @ {}", bfs.reached(), bfs.max_depth().unwrap_or(0));
    report(config, "bfs", v, e, result, ms, false);
    Ok(())
}

fn run_euler(config: &Config, v: usize) -> Result<()> {
    let mut rng = StdRng::seed_from_u64(config.seed);
    let e = v * config.edge_factor;

    let digraph = generate::eulerian_cycle(v, e, &mut rng)?;
    let (found, ms) = analyze_cycle(config, &digraph)?;
    ensure!(found, "generated eulerian digraph with {} edges was rejected", e);
    report(config, "euler", v, e, "cycle".into(), ms, config.certify);

    // Two balanced halves with no edge between them: must be rejected.
    let half = (v / 2).max(1);
    let left = generate::eulerian_cycle(half, e / 2 + 1, &mut rng)?;
    let right = generate::eulerian_cycle(half, e / 2 + 1, &mut rng)?;
    let split = disjoint_union(&left, &right)?;
    let (found, ms) = analyze_cycle(config, &split)?;
    ensure!(!found, "split digraph produced an eulerian cycle");
    report(
        config,
        "euler-split",
        split.vertex_count(),
        split.edge_count(),
        "none".into(),
        ms,
        config.certify,
    );
    Ok(())
}

/// Time the analyzer; with certification on, a disagreement with the
/// reference check is an error.
fn analyze_cycle(config: &Config, digraph: &Digraph) -> Result<(bool, f64)> {
    let t = Instant::now();
    let euler = DirectedEulerianCycle::new(digraph);
    let ms = t.elapsed().as_secs_f64() * 1000.0;

    if config.certify {
        let expected = reference::has_eulerian_cycle(digraph);
        let trail_ok = euler
            .cycle()
            .map_or(true, |c| reference::is_eulerian_trail(digraph, c));
        if expected != euler.has_eulerian_cycle() || !trail_ok {
            warn!(edges = digraph.edge_count(), "eulerian cycle disagrees with reference check");
            bail!("certification failed");
        }
    }
    Ok((euler.has_eulerian_cycle(), ms))
}

fn run_path(config: &Config, v: usize) -> Result<()> {
    let mut rng = StdRng::seed_from_u64(config.seed);
    let e = v * config.edge_factor;

    let digraph = generate::eulerian_path(v, e, &mut rng)?;
    let t = Instant::now();
    let euler = DirectedEulerianPath::new(&digraph);
    let ms = t.elapsed().as_secs_f64() * 1000.0;

    let Some(path) = euler.path() else {
        bail!("generated eulerian path digraph with {} edges was rejected", e);
    };

    if config.certify
        && !(reference::has_eulerian_path(&digraph) && reference::is_eulerian_trail(&digraph, path))
    {
        warn!(edges = e, "eulerian path disagrees with reference check");
        bail!("certification failed");
    }

    let result = format!("{} -> {}", path[0], path[path.len() - 1]);
    report(config, "path", v, e, result, ms, config.certify);
    Ok(())
}

/// `b`'s vertices are shifted past `a`'s; no edge joins the two parts.
fn disjoint_union(a: &Digraph, b: &Digraph) -> Result<Digraph> {
    let offset = a.vertex_count();
    let edges = a
        .edges()
        .chain(b.edges().map(|(v, w)| (v + offset, w + offset)));
    Ok(Digraph::from_edges(offset + b.vertex_count(), edges)?)
}

fn run_symbol(file: &str, delimiter: &str, source: &str, json: bool) -> Result<()> {
    let t = Instant::now();
    let reader = BufReader::new(File::open(file).with_context(|| format!("cannot open {}", file))?);
    let lines = reader
        .lines()
        .collect::<std::io::Result<Vec<String>>>()
        .with_context(|| format!("cannot read {}", file))?;

    let sg = SymbolUndirected::new(lines, delimiter)?;
    info!(
        names = sg.len(),
        edges = sg.graph().edge_count(),
        elapsed_ms = t.elapsed().as_secs_f64() * 1000.0,
        "loaded {}",
        file
    );

    let Some(s) = sg.index(source) else {
        bail!("{} not in database", source);
    };
    let bfs = BreadthFirstPaths::new(sg.graph(), s)?;

    for (id, name) in sg.names().enumerate() {
        let route: Option<Vec<&str>> = bfs
            .path_to(id)
            .map(|p| p.into_iter().filter_map(|v| sg.name(v)).collect());
        if json {
            println!(
                "{}",
                json!({
                    "name": name,
                    "distance": bfs.dist_to(id),
                    "route": route,
                })
            );
        } else {
            match (bfs.dist_to(id), route) {
                (Some(d), Some(route)) => println!("{:>4}  {}  ({})", d, name, route.join(" -> ")),
                _ => println!("{:>4}  {}  (not connected)", "-", name),
            }
        }
    }
    Ok(())
}
