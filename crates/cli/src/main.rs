use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::io;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Instant;

use anyhow::{Context, bail};
use clap::{CommandFactory, Parser};
use clap_complete::Shell;
use ladle_core::{ErrorKind, Ladle, LadleConfig, NodeKind, Query, Root, fetch_file, fetch_stdin, fetch_url};
use owo_colors::OwoColorize;
use serde::Serialize;
use tracing::debug;
use tracing_subscriber::EnvFilter;

mod echo;

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// What to print for each selected node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputFormat {
    Text,
    FullText,
    Html,
    Attrs,
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Ok(Self::Text),
            "full-text" | "fulltext" | "full" => Ok(Self::FullText),
            "html" => Ok(Self::Html),
            "attrs" | "attributes" => Ok(Self::Attrs),
            "json" => Ok(Self::Json),
            _ => Err(format!(
                "Invalid format: {}. Valid options: text, full-text, html, attrs, json",
                s
            )),
        }
    }
}

/// One `--find` step: `tag`, `tag@key=value` or `@key=value`
#[derive(Debug, Clone, PartialEq, Eq)]
struct FindStep {
    tag: String,
    attribute: Option<(String, String)>,
}

impl FindStep {
    fn query(&self) -> ladle_core::Result<Query<'_>> {
        match &self.attribute {
            Some((key, value)) => Query::from_args(&[self.tag.as_str(), key.as_str(), value.as_str()]),
            None => Query::from_args(&[self.tag.as_str()]),
        }
    }
}

impl fmt::Display for FindStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.attribute {
            Some((key, value)) => write!(f, "{}@{}={}", self.tag, key, value),
            None => write!(f, "{}", self.tag),
        }
    }
}

impl FromStr for FindStep {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (tag, attribute) = match s.split_once('@') {
            Some((tag, attr)) => {
                let (key, value) = attr
                    .split_once('=')
                    .ok_or_else(|| format!("Invalid query: {}. Expected tag@key=value", s))?;
                if key.is_empty() {
                    return Err(format!("Invalid query: {}. Attribute key is empty", s));
                }
                (tag, Some((key.to_string(), value.to_string())))
            }
            None => (s, None),
        };

        if tag.is_empty() && attribute.is_none() {
            return Err("Invalid query: empty. Use a tag name or @key=value".to_string());
        }
        Ok(Self { tag: tag.to_string(), attribute })
    }
}

/// Find elements in HTML pages and print their text, attributes or markup
#[derive(Parser, Debug)]
#[command(name = "ladle")]
#[command(author = "Ladle Contributors")]
#[command(version)]
#[command(about = "Find elements in HTML pages by tag and attribute", long_about = None)]
struct Args {
    /// URL to fetch, local HTML file, or "-" for stdin
    #[arg(value_name = "INPUT", required_unless_present = "completions")]
    input: Option<String>,

    /// Query step, applied in order: tag, tag@key=value, or @key=value for any tag
    #[arg(short = 'q', long = "find", value_name = "QUERY")]
    find: Vec<FindStep>,

    /// Compare attribute values as whole strings instead of class tokens
    #[arg(long)]
    strict: bool,

    /// Return every match of the last query step instead of the first
    #[arg(short, long)]
    all: bool,

    /// Output format (text, full-text, html, attrs, json)
    #[arg(short, long, default_value = "full-text", value_name = "FORMAT")]
    format: OutputFormat,

    /// Output file (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// HTTP timeout in seconds
    #[arg(long, default_value = "30", value_name = "SECS")]
    timeout: u64,

    /// Custom User-Agent for HTTP requests
    #[arg(long, value_name = "UA")]
    user_agent: Option<String>,

    /// Extra request header, NAME:VALUE (repeatable)
    #[arg(short = 'H', long = "header", value_name = "NAME:VALUE")]
    headers: Vec<String>,

    /// Request cookie, NAME=VALUE (repeatable)
    #[arg(long = "cookie", value_name = "NAME=VALUE")]
    cookies: Vec<String>,

    /// Abort on the first failed lookup instead of reporting it
    #[arg(long)]
    fail_fast: bool,

    /// Generate shell completion script
    #[arg(long, value_name = "SHELL")]
    completions: Option<Shell>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

/// One selected node as printed by `--format json`
#[derive(Debug, Serialize)]
struct NodeRecord<'a> {
    kind: NodeKind,
    value: &'a str,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    attrs: BTreeMap<&'a str, &'a str>,
    text: String,
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "ladle_core=debug,ladle=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn build_config(args: &Args) -> anyhow::Result<LadleConfig> {
    let mut builder = LadleConfig::builder().fail_fast(args.fail_fast).timeout(args.timeout);

    if let Some(ua) = &args.user_agent {
        builder = builder.user_agent(ua);
    }
    for header in &args.headers {
        let (name, value) = header
            .split_once(':')
            .with_context(|| format!("Invalid header (expected NAME:VALUE): {}", header))?;
        builder = builder.header(name.trim(), value.trim());
    }
    for cookie in &args.cookies {
        let (name, value) = cookie
            .split_once('=')
            .with_context(|| format!("Invalid cookie (expected NAME=VALUE): {}", cookie))?;
        builder = builder.cookie(name.trim(), value.trim());
    }

    Ok(builder.build())
}

async fn read_input(input: &str, config: &LadleConfig, verbose: bool) -> anyhow::Result<String> {
    if input == "-" {
        if verbose {
            echo::print_step(1, 3, "Reading from stdin");
        }
        fetch_stdin().context("Failed to read from stdin")
    } else if input.starts_with("http://") || input.starts_with("https://") {
        if verbose {
            echo::print_step(1, 3, &format!("Fetching from {}", input.bright_white().underline()));
        }
        fetch_url(input, &config.fetch).await.context("Failed to fetch URL")
    } else {
        if verbose {
            echo::print_step(1, 3, &format!("Reading from file {}", input.bright_white()));
        }
        fetch_file(input).with_context(|| format!("Failed to read file: {}", input))
    }
}

/// Applies every step but the last with `find`, then the last one with `find`
/// or `find_all`.
fn select<'a>(root: Root<'a>, steps: &[FindStep], strict: bool, all: bool) -> anyhow::Result<Vec<Root<'a>>> {
    let Some((last, leading)) = steps.split_last() else {
        return Ok(vec![root]);
    };

    let mut current = root;
    for step in leading {
        let query = step.query()?;
        current = if strict { current.find_strict(query) } else { current.find(query) };
    }

    let query = last.query()?;
    let selected = if all {
        if strict { current.find_all_strict(query)? } else { current.find_all(query)? }
    } else {
        let found = if strict { current.find_strict(query) } else { current.find(query) };
        vec![found.into_result()?]
    };
    Ok(selected)
}

/// Renders the selected nodes. With `all`, every format lists its nodes, an
/// empty selection included, and nodes without a text child print empty text.
fn render(nodes: &[Root<'_>], format: OutputFormat, all: bool) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => {
            let records = nodes
                .iter()
                .map(|node| {
                    Ok(NodeRecord {
                        kind: node.kind()?,
                        value: node.node_value()?,
                        attrs: node.attrs().map(|a| a.into_iter().collect()).unwrap_or_default(),
                        text: node.full_text()?,
                    })
                })
                .collect::<ladle_core::Result<Vec<_>>>()?;
            Ok(serde_json::to_string_pretty(&records)? + "\n")
        }
        OutputFormat::Attrs => {
            let maps = nodes
                .iter()
                .map(|node| node.attrs().map(|a| a.into_iter().collect::<BTreeMap<_, _>>()))
                .collect::<ladle_core::Result<Vec<_>>>()?;
            let json = match (all, maps.as_slice()) {
                (false, [single]) => serde_json::to_string_pretty(single)?,
                _ => serde_json::to_string_pretty(&maps)?,
            };
            Ok(json + "\n")
        }
        OutputFormat::Text | OutputFormat::FullText | OutputFormat::Html => {
            let mut out = String::new();
            for node in nodes {
                let line = match format {
                    OutputFormat::Text => match node.text() {
                        Ok(text) => text.to_string(),
                        Err(err) if all && err.kind() == ErrorKind::NoTextNode => String::new(),
                        Err(err) => return Err(err.into()),
                    },
                    OutputFormat::FullText => node.full_text()?,
                    _ => node.html()?,
                };
                out.push_str(&line);
                out.push('\n');
            }
            Ok(out)
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    if let Some(shell) = args.completions {
        clap_complete::generate(shell, &mut Args::command(), "ladle", &mut io::stdout());
        return Ok(());
    }

    init_tracing(args.verbose);
    if args.verbose {
        echo::print_banner();
        echo::print_info("Debug logging enabled");
        eprintln!();
    }

    let Some(input) = args.input.as_deref() else {
        bail!("No input given");
    };
    let config = build_config(&args)?;
    let mut timings = Vec::new();
    let started = Instant::now();

    let html = read_input(input, &config, args.verbose).await?;
    timings.push(("read", started.elapsed()));
    if args.verbose {
        eprintln!("  {} {}\n", "Size:".dimmed(), echo::format_size(html.len()).bright_white());
        echo::print_step(2, 3, "Parsing HTML document");
    }

    let step_start = Instant::now();
    let doc = Ladle::with_config(config).parse(&html).context("Failed to parse HTML")?;
    timings.push(("parse", step_start.elapsed()));

    if args.verbose {
        if let Some(title) = doc.title() {
            eprintln!("  {} {}", "Title:".dimmed(), title.bright_white());
        }
        eprintln!();
        echo::print_step(3, 3, &format!("Running {} query step(s)", args.find.len()));
    }

    debug!(steps = args.find.len(), strict = args.strict, all = args.all, "running query");
    let step_start = Instant::now();
    let selected = select(doc.root(), &args.find, args.strict, args.all).context("Query failed")?;
    let output = render(&selected, args.format, args.all)?;
    timings.push(("query", step_start.elapsed()));

    if args.verbose {
        let steps: Vec<String> = args.find.iter().map(FindStep::to_string).collect();
        echo::print_selection(&steps, selected.len(), args.strict);
        echo::print_timing_summary(started.elapsed(), &timings);
    }
    if args.all && selected.is_empty() {
        echo::print_warning("No matches");
    }

    match args.output {
        Some(path) => {
            fs::write(&path, output).with_context(|| format!("Failed to write to file: {}", path.display()))?;
            echo::print_success(&format!("Output written to {}", path.display().bright_white()));
        }
        None => {
            print!("{}", output);
        }
    }

    Ok(())
}
