use canopy_core::{
    AssetGraph, CollapseState, DefaultTheme, EdgeVisualStyle, Filter, LayoutOptions,
    NodeVisualStyle, PositionedGraph, PositionedNode, RankDir, ViewConfig, VisibleEdge,
    compute_visible, layout_visible,
};
use serde::Serialize;
use std::io::Read;

#[derive(Debug)]
enum CliError {
    Usage(&'static str),
    Io(std::io::Error),
    Canopy(canopy_core::Error),
    Json(serde_json::Error),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Usage(msg) => write!(f, "{msg}"),
            CliError::Io(err) => write!(f, "I/O error: {err}"),
            CliError::Canopy(err) => write!(f, "{err}"),
            CliError::Json(err) => write!(f, "JSON error: {err}"),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<canopy_core::Error> for CliError {
    fn from(value: canopy_core::Error) -> Self {
        Self::Canopy(value)
    }
}

impl From<canopy_core::CyclicGraphError> for CliError {
    fn from(value: canopy_core::CyclicGraphError) -> Self {
        Self::Canopy(value.into())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

#[derive(Debug, Clone, Copy, Default)]
enum Command {
    Visible,
    #[default]
    Layout,
    Inspect,
}

#[derive(Debug, Default)]
struct Args {
    command: Command,
    input: Option<String>,
    demo: bool,
    pretty: bool,
    filter: Filter,
    collapse: Vec<String>,
    direction: Option<RankDir>,
    config: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct StyledNode<'a> {
    #[serde(flatten)]
    node: &'a PositionedNode,
    style: NodeVisualStyle,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct StyledEdge<'a> {
    #[serde(flatten)]
    edge: &'a VisibleEdge,
    style: EdgeVisualStyle,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct LayoutOut<'a> {
    filter: &'static str,
    direction: RankDir,
    width: f64,
    height: f64,
    nodes: Vec<StyledNode<'a>>,
    edges: Vec<StyledEdge<'a>>,
}

impl<'a> LayoutOut<'a> {
    fn new(filter: Filter, graph: &'a PositionedGraph) -> Self {
        let theme = DefaultTheme;
        Self {
            filter: filter.label(),
            direction: graph.direction,
            width: graph.width,
            height: graph.height,
            nodes: graph
                .nodes
                .iter()
                .map(|node| StyledNode {
                    node,
                    style: NodeVisualStyle::for_node(node, &theme),
                })
                .collect(),
            edges: graph
                .edges
                .iter()
                .map(|edge| StyledEdge {
                    edge,
                    style: EdgeVisualStyle::for_edge(edge, &theme),
                })
                .collect(),
        }
    }
}

fn usage() -> &'static str {
    "canopy-cli\n\
\n\
USAGE:\n\
  canopy-cli [layout] [--filter <f>] [--collapse <id>]... [--direction TB|BT|LR|RL] [--config <path>] [--pretty] [--demo|<path>|-]\n\
  canopy-cli visible [--filter <f>] [--collapse <id>]... [--pretty] [--demo|<path>|-]\n\
  canopy-cli inspect [--pretty] [--demo|<path>|-]\n\
\n\
NOTES:\n\
  - If <path> is omitted or '-', the dataset JSON is read from stdin.\n\
  - --demo uses the built-in cloud inventory instead of reading input.\n\
  - Filters: All, Alerts, Misconfigurations.\n\
  - --collapse may be repeated; ids without resolvable children are ignored.\n\
  - Set RUST_LOG (e.g. RUST_LOG=canopy_core=debug) for diagnostics on stderr.\n\
"
}

fn parse_args(argv: &[String]) -> Result<Args, CliError> {
    let mut args = Args::default();

    let mut it = argv.iter().skip(1);
    while let Some(a) = it.next() {
        match a.as_str() {
            "--help" | "-h" => return Err(CliError::Usage(usage())),
            "visible" => args.command = Command::Visible,
            "layout" => args.command = Command::Layout,
            "inspect" => args.command = Command::Inspect,
            "--pretty" => args.pretty = true,
            "--demo" => args.demo = true,
            "--filter" => {
                let Some(name) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.filter = name.parse::<Filter>()?;
            }
            "--collapse" => {
                let Some(id) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.collapse.push(id.clone());
            }
            "--direction" => {
                let Some(dir) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                let dir = dir
                    .parse::<RankDir>()
                    .map_err(canopy_core::Error::from)?;
                args.direction = Some(dir);
            }
            "--config" => {
                let Some(path) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.config = Some(path.clone());
            }
            "--" => {
                if let Some(rest) = it.next() {
                    if args.input.is_some() {
                        return Err(CliError::Usage(usage()));
                    }
                    args.input = Some(rest.clone());
                }
                if it.next().is_some() {
                    return Err(CliError::Usage(usage()));
                }
            }
            "-" => {
                if args.input.is_some() {
                    return Err(CliError::Usage(usage()));
                }
                args.input = Some("-".to_string());
            }
            other if other.starts_with('-') => return Err(CliError::Usage(usage())),
            path => {
                if args.input.is_some() {
                    return Err(CliError::Usage(usage()));
                }
                args.input = Some(path.to_string());
            }
        }
    }

    if args.demo && args.input.is_some() {
        return Err(CliError::Usage(usage()));
    }
    Ok(args)
}

fn read_input(input: Option<&str>) -> Result<String, CliError> {
    match input {
        None | Some("-") => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
        Some(path) => Ok(std::fs::read_to_string(path)?),
    }
}

fn write_json(value: &impl Serialize, pretty: bool) -> Result<(), CliError> {
    if pretty {
        serde_json::to_writer_pretty(std::io::stdout().lock(), value)?;
    } else {
        serde_json::to_writer(std::io::stdout().lock(), value)?;
    }
    println!();
    Ok(())
}

fn load_graph(args: &Args) -> Result<AssetGraph, CliError> {
    if args.demo {
        return Ok(AssetGraph::demo());
    }
    let text = read_input(args.input.as_deref())?;
    Ok(AssetGraph::from_json_str(&text)?)
}

fn load_config(args: &Args) -> Result<ViewConfig, CliError> {
    let mut config = match args.config.as_deref() {
        Some(path) => ViewConfig::from_json_str(&std::fs::read_to_string(path)?)?,
        None => ViewConfig::default(),
    };
    if let Some(direction) = args.direction {
        config.direction = direction;
    }
    Ok(config)
}

fn collapse_state(graph: &AssetGraph, ids: &[String]) -> CollapseState {
    let mut state = CollapseState::new();
    for id in ids {
        if graph.is_collapsible(id) {
            state.set(id.as_str(), true);
        } else {
            tracing::warn!(id = %id, "ignoring --collapse: node has no resolvable children");
        }
    }
    state
}

fn run(args: Args) -> Result<(), CliError> {
    let graph = load_graph(&args)?;

    match args.command {
        Command::Inspect => write_json(graph.report(), args.pretty),
        Command::Visible => {
            let collapse = collapse_state(&graph, &args.collapse);
            let visible = compute_visible(&graph, &collapse, args.filter)?;
            write_json(&visible, args.pretty)
        }
        Command::Layout => {
            let config = load_config(&args)?;
            let collapse = collapse_state(&graph, &args.collapse);
            let visible = compute_visible(&graph, &collapse, args.filter)?;
            let positioned = layout_visible(&visible, &LayoutOptions::from(&config));
            write_json(&LayoutOut::new(args.filter, &positioned), args.pretty)
        }
    }
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    init_tracing();

    let args = match parse_args(&std::env::args().collect::<Vec<_>>()) {
        Ok(v) => v,
        Err(CliError::Usage(msg)) => {
            eprintln!("{msg}");
            std::process::exit(2);
        }
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    };

    if let Err(err) = run(args) {
        eprintln!("{err}");
        std::process::exit(1);
    }
}
