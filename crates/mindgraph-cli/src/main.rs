use std::collections::BTreeSet;
use std::io::Read;

use mindgraph_core::{MindMapDocument, demo_document, document_to_json, parse_document};
use serde::Serialize;

#[derive(Debug)]
enum CliError {
    Usage(&'static str),
    Io(std::io::Error),
    MindMap(mindgraph_core::Error),
    Json(serde_json::Error),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Usage(msg) => write!(f, "{msg}"),
            CliError::Io(err) => write!(f, "I/O error: {err}"),
            CliError::MindMap(err) => write!(f, "{err}"),
            CliError::Json(err) => write!(f, "JSON error: {err}"),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<mindgraph_core::Error> for CliError {
    fn from(value: mindgraph_core::Error) -> Self {
        Self::MindMap(value)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

#[derive(Debug, Clone, Copy, Default)]
enum Command {
    #[default]
    Inspect,
    Validate,
    Fmt,
    Demo,
}

#[derive(Debug, Default)]
struct Args {
    command: Command,
    input: Option<String>,
    out: Option<String>,
    compact: bool,
}

fn usage() -> &'static str {
    "mindgraph-cli\n\
\n\
USAGE:\n\
  mindgraph-cli inspect [--compact] [<path>|-]\n\
  mindgraph-cli validate [--compact] [<path>|-]\n\
  mindgraph-cli fmt [--out <path>] [<path>|-]\n\
  mindgraph-cli demo [--out <path>]\n\
\n\
NOTES:\n\
  - If <path> is omitted or '-', input is read from stdin.\n\
  - inspect prints collection counts and layout settings as JSON.\n\
  - validate reports dangling edge endpoints, dangling cluster members, and\n\
    nodes claimed by more than one cluster; exits 3 when any are found.\n\
  - fmt re-serializes the document pretty-printed to stdout or --out.\n\
  - demo writes the starter document to stdout or --out.\n\
"
}

fn parse_args(argv: &[String]) -> Result<Args, CliError> {
    let mut args = Args::default();

    let mut it = argv.iter().skip(1).peekable();
    while let Some(a) = it.next() {
        match a.as_str() {
            "--help" | "-h" => return Err(CliError::Usage(usage())),
            "inspect" => args.command = Command::Inspect,
            "validate" => args.command = Command::Validate,
            "fmt" => args.command = Command::Fmt,
            "demo" => args.command = Command::Demo,
            "--compact" => args.compact = true,
            "--out" => {
                let Some(out) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.out = Some(out.clone());
            }
            other if other.starts_with("--") => return Err(CliError::Usage(usage())),
            path => {
                if args.input.is_some() {
                    return Err(CliError::Usage(usage()));
                }
                args.input = Some(path.to_string());
            }
        }
    }

    Ok(args)
}

fn read_input(input: Option<&str>) -> Result<String, CliError> {
    match input {
        Some(path) if path != "-" => Ok(std::fs::read_to_string(path)?),
        _ => {
            let mut text = String::new();
            std::io::stdin().read_to_string(&mut text)?;
            Ok(text)
        }
    }
}

fn load_document(input: Option<&str>) -> Result<MindMapDocument, CliError> {
    let text = read_input(input)?;
    Ok(parse_document(&text)?)
}

fn write_output(out: Option<&str>, text: &str) -> Result<(), CliError> {
    match out {
        Some(path) if path != "-" => {
            std::fs::write(path, format!("{text}\n"))?;
        }
        _ => println!("{text}"),
    }
    Ok(())
}

#[derive(Serialize)]
struct InspectOut {
    nodes: usize,
    links: usize,
    clusters: usize,
    notes: usize,
    orientation: Option<String>,
    curve: Option<String>,
}

#[derive(Serialize)]
struct ValidateOut {
    ok: bool,
    /// Edge ids whose source or target is not a known node id.
    dangling_links: Vec<String>,
    /// `cluster-id/node-id` pairs for members that are not known node ids.
    dangling_cluster_members: Vec<String>,
    /// Node ids claimed more than once across cluster member lists.
    multi_cluster_nodes: Vec<String>,
}

fn inspect(document: &MindMapDocument) -> InspectOut {
    InspectOut {
        nodes: document.nodes.len(),
        links: document.links.len(),
        clusters: document.clusters.as_ref().map_or(0, |c| c.len()),
        notes: document.notes.as_ref().map_or(0, |n| n.len()),
        orientation: document.orientation.map(|o| o.as_str().to_string()),
        curve: document
            .curve
            .and_then(|c| serde_json::to_value(c).ok())
            .and_then(|v| v.as_str().map(|s| s.to_string())),
    }
}

fn validate(document: &MindMapDocument) -> ValidateOut {
    let node_ids: BTreeSet<&str> = document.nodes.iter().map(|n| n.id.as_str()).collect();

    let mut dangling_links = Vec::new();
    for edge in &document.links {
        if !node_ids.contains(edge.source.as_str()) || !node_ids.contains(edge.target.as_str()) {
            dangling_links.push(edge.id.clone());
        }
    }

    let mut dangling_cluster_members = Vec::new();
    let mut seen_members: BTreeSet<&str> = BTreeSet::new();
    let mut multi_cluster_nodes = Vec::new();
    if let Some(clusters) = &document.clusters {
        for cluster in clusters {
            for member in &cluster.child_node_ids {
                if !node_ids.contains(member.as_str()) {
                    dangling_cluster_members.push(format!("{}/{member}", cluster.id));
                }
                if !seen_members.insert(member.as_str()) {
                    multi_cluster_nodes.push(member.clone());
                }
            }
        }
    }

    ValidateOut {
        ok: dangling_links.is_empty()
            && dangling_cluster_members.is_empty()
            && multi_cluster_nodes.is_empty(),
        dangling_links,
        dangling_cluster_members,
        multi_cluster_nodes,
    }
}

fn to_json<T: Serialize>(value: &T, compact: bool) -> Result<String, CliError> {
    if compact {
        Ok(serde_json::to_string(value)?)
    } else {
        Ok(serde_json::to_string_pretty(value)?)
    }
}

fn run(args: Args) -> Result<i32, CliError> {
    match args.command {
        Command::Inspect => {
            let document = load_document(args.input.as_deref())?;
            let out = to_json(&inspect(&document), args.compact)?;
            write_output(args.out.as_deref(), &out)?;
            Ok(0)
        }
        Command::Validate => {
            let document = load_document(args.input.as_deref())?;
            let report = validate(&document);
            let out = to_json(&report, args.compact)?;
            write_output(args.out.as_deref(), &out)?;
            Ok(if report.ok { 0 } else { 3 })
        }
        Command::Fmt => {
            let document = load_document(args.input.as_deref())?;
            let out = document_to_json(&document)?;
            write_output(args.out.as_deref(), &out)?;
            Ok(0)
        }
        Command::Demo => {
            let out = document_to_json(&demo_document())?;
            write_output(args.out.as_deref(), &out)?;
            Ok(0)
        }
    }
}

fn main() {
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

    match run(args) {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    }
}
