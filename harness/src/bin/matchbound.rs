use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::PathBuf;

use log::{error, info, LevelFilter};
use structopt::StructOpt;

use matchbound_harness::gnp::{generate_gnp, seeded_rng};
use matchbound_harness::io::{read_edge_list, write_edge_list};
use matchbound_harness::logging::init_logger;
use matchbound_harness::oracle::{check_result, OracleCheck};
use matchbound_harness::render::write_dot;
use matchbound_harness::report_dir::{verify_run_dir, write_run_dir};
use matchbound_harness::runner::{run_instance, RunError};
use matchbound_kernel::graph::{NodeId, ProblemGraphV1};
use matchbound_search::observer::LogObserver;
use matchbound_search::policy::{DedupPolicyV1, FrontierOrderV1, PruneRuleV1, SearchPolicyV1};

#[derive(Debug, StructOpt)]
#[structopt(
    name = "matchbound",
    about = "Maximum matching by best-first branch-and-bound"
)]
struct Opt {
    /// Edge list to solve. A G(n,p) graph is sampled if not specified.
    #[structopt(parse(from_os_str))]
    input: Option<PathBuf>,

    /// Number of nodes to sample
    #[structopt(short, long, default_value = "7")]
    nodes: NodeId,

    /// Edge probability
    #[structopt(short, long, default_value = "0.4")]
    probability: f64,

    /// Seed value
    #[structopt(short, long)]
    seed: Option<u64>,

    /// Frontier order: `best-bound` or `depth`
    #[structopt(long, default_value = "best-bound", parse(try_from_str = parse_order))]
    order: FrontierOrderV1,

    /// Disable duplicate suppression
    #[structopt(long)]
    no_dedup: bool,

    /// Keep exploring nodes that tie the incumbent and report co-optimal matchings
    #[structopt(long)]
    keep_ties: bool,

    /// Stop after this many iterations
    #[structopt(long)]
    max_iterations: Option<u64>,

    /// Fail if the frontier grows beyond this many nodes
    #[structopt(long)]
    max_frontier: Option<u64>,

    /// Write the best matching as DOT
    #[structopt(long, parse(from_os_str))]
    dot: Option<PathBuf>,

    /// Write the instance as an edge list
    #[structopt(long, parse(from_os_str))]
    save_graph: Option<PathBuf>,

    /// Write report, trace and rendering into this directory, then verify it
    #[structopt(short, long, parse(from_os_str))]
    out_dir: Option<PathBuf>,

    /// Cross-check the result against exhaustive enumeration
    #[structopt(long)]
    verify: bool,

    /// Verbose mode (-v, -vv, -vvv, etc.)
    #[structopt(short, long, parse(from_occurrences))]
    verbose: usize,
}

fn parse_order(s: &str) -> Result<FrontierOrderV1, String> {
    match s.to_lowercase().as_str() {
        "best-bound" | "best_bound" => Ok(FrontierOrderV1::BestBound),
        "depth" => Ok(FrontierOrderV1::Depth),
        other => Err(format!("unknown frontier order: {other}")),
    }
}

impl Opt {
    fn policy(&self) -> SearchPolicyV1 {
        SearchPolicyV1 {
            frontier_order: self.order,
            dedup: if self.no_dedup {
                DedupPolicyV1::Disabled
            } else {
                DedupPolicyV1::DecidedEdges
            },
            prune_rule: if self.keep_ties {
                PruneRuleV1::KeepTies
            } else {
                PruneRuleV1::CutTies
            },
            max_iterations: self.max_iterations,
            max_frontier_size: self.max_frontier,
        }
    }

    fn load_graph(&self) -> Result<ProblemGraphV1, RunError> {
        match &self.input {
            Some(path) => {
                info!("reading {}", path.display());
                Ok(read_edge_list(BufReader::new(File::open(path)?))?)
            }
            None => {
                info!(
                    "sampling G({}, {}) with seed {:?}",
                    self.nodes, self.probability, self.seed
                );
                Ok(generate_gnp(
                    &mut seeded_rng(self.seed),
                    self.nodes,
                    self.probability,
                )?)
            }
        }
    }
}

fn run(opt: &Opt) -> Result<(), RunError> {
    let graph = opt.load_graph()?;
    if let Some(path) = &opt.save_graph {
        write_edge_list(&graph, BufWriter::new(File::create(path)?))?;
    }

    let outcome = run_instance(graph, &opt.policy(), &mut LogObserver, opt.out_dir.is_some())?;
    let result = &outcome.result;

    match result.best_state() {
        Some(best) => {
            println!("size {}", best.matching_size());
            for edge in best.matching() {
                println!("{} {}", edge.u, edge.v);
            }
        }
        None => println!("no matching found within the iteration budget"),
    }
    println!(
        "c iterations={} termination={} optimal={} co_optimal={} report={}",
        result.iterations(),
        result.termination.as_str(),
        result.is_optimal(),
        result.co_optimal.len(),
        outcome.report.digest
    );

    if opt.verify {
        match check_result(&outcome.graph, result) {
            OracleCheck::Agrees { size } => {
                info!("oracle agrees: maximum matching size {size}");
            }
            OracleCheck::Mismatch { found, expected } => {
                return Err(RunError::OracleMismatch { found, expected });
            }
            OracleCheck::Skipped => {
                info!("oracle skipped: search not exhaustive or graph too large");
            }
        }
    }

    if let (Some(path), Some(best)) = (&opt.dot, result.best_state()) {
        write_dot(best, BufWriter::new(File::create(path)?))?;
    }

    if let Some(dir) = &opt.out_dir {
        write_run_dir(&outcome, dir)?;
        let digest = verify_run_dir(dir)?;
        info!("run directory {} verified ({digest})", dir.display());
    }
    Ok(())
}

fn main() {
    let opt = Opt::from_args();
    if let Err(e) = init_logger(LevelFilter::Warn, opt.verbose) {
        eprintln!("logger: {e}");
    }

    if let Err(e) = run(&opt) {
        error!("{e}");
        std::process::exit(1);
    }
}
