#![doc = include_str!("../README.md")]

use gridpaths::grid::{CellKind, Grid};
use gridpaths::search::HamiltonianSearch;
use gridpaths::stats::{SearchAllStats, SearchStatsCollector};
use cpu_time::ProcessTime;
use fsum::FSum;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::collections::HashMap;
use std::time::Duration;
use std::{env, fs, process};

/// Collects node statistics and prints the running count every 10000 paths.
#[derive(Default)]
struct PrintProgress {
    stats: SearchAllStats,
}

impl SearchStatsCollector for PrintProgress {
    #[inline(always)] fn expanded(&mut self) -> bool { self.stats.expanded += 1; true }
    #[inline(always)] fn pruned(&mut self) { self.stats.pruned += 1; }

    fn progress(&mut self, paths: u64, elapsed: Duration) {
        println!("  paths so far: {}  after {:.2} s", paths, elapsed.as_secs_f64());
    }
}

fn run(name: &str, grid: &Grid, repeats: usize) {
    println!("---=== {} ({}x{}) ===---", name, grid.width(), grid.height());
    print!("{}", grid);
    let search = HamiltonianSearch::new(grid);
    let mut wall_times = Vec::with_capacity(repeats);
    let mut cpu_times = Vec::with_capacity(repeats);
    for repeat in 0..repeats {
        let mut progress = PrintProgress::default();
        let cpu_start = ProcessTime::try_now().expect("Getting process time failed");
        let result = search.count_paths_stats(&mut progress);
        let cpu_elapsed = cpu_start.try_elapsed().expect("Getting process time failed");
        wall_times.push(result.elapsed.as_secs_f64());
        cpu_times.push(cpu_elapsed.as_secs_f64());
        if repeat == 0 {
            println!("number of paths: {}", result.paths);
            println!("{} cells expanded, {} branches pruned by the connectivity check",
                     progress.stats.expanded, progress.stats.pruned);
        }
    }
    println!("{:.4} s wall, {:.4} s cpu{}",
             FSum::with_all(wall_times.iter().cloned()).value() / repeats as f64,
             FSum::with_all(cpu_times.iter().cloned()).value() / repeats as f64,
             if repeats > 1 { format!(" (average of {} runs)", repeats) } else { String::new() });
}

/// The 7x8 grid of the Quora datacenter cooling problem; counts 301716 paths.
fn cooling_grid() -> Grid {
    Grid::parse("S......\n\
                 .......\n\
                 .......\n\
                 .......\n\
                 .......\n\
                 .......\n\
                 .......\n\
                 E....##").unwrap()
}

/// Returns the open `cols` x `rows` grid with source and sink in opposite corners.
fn open_grid(cols: u8, rows: u8) -> Grid {
    let len = cols as usize * rows as usize;
    let mut kinds = vec![CellKind::Empty; len];
    kinds[0] = CellKind::Source;
    kinds[len - 1] = CellKind::Sink;
    Grid::new(cols, rows, kinds).unwrap()
}

/// Returns a corner-to-corner grid with `blocked` obstacles placed at random.
fn random_grid(rng: &mut ChaCha8Rng, cols: u8, rows: u8, blocked: usize) -> Grid {
    let len = cols as usize * rows as usize;
    let mut kinds = vec![CellKind::Empty; len];
    kinds[0] = CellKind::Source;
    kinds[len - 1] = CellKind::Sink;
    let mut placed = 0;
    while placed < blocked {
        let cell = rng.gen_range(1..len - 1);
        if kinds[cell] == CellKind::Empty {
            kinds[cell] = CellKind::Blocked;
            placed += 1;
        }
    }
    Grid::new(cols, rows, kinds).unwrap()
}

enum Args {
    Run(HashMap<String, bool>),
    Help(Vec<String>),
}

impl Args {
    fn new() -> Self {
        let args: HashMap<String, bool> = env::args().skip(1).map(|s| (s, false)).collect();
        if args.is_empty() { Self::Help(Vec::new()) } else { Self::Run(args) }
    }

    fn case(&mut self, s: &str) -> bool {
        match self {
            &mut Self::Run(ref mut set) => {
                if let Some(used) = set.get_mut(s) {
                    *used = true;
                    true
                } else { false }
            }
            &mut Self::Help(ref mut v) => { v.push(s.to_string()); false }
        }
    }

    /// Returns values of all arguments of the form `<prefix><value>` and marks them used.
    fn with_prefix(&mut self, prefix: &str) -> Vec<String> {
        match self {
            &mut Self::Run(ref mut set) => {
                let mut values = Vec::new();
                for (arg, used) in set.iter_mut() {
                    if let Some(value) = arg.strip_prefix(prefix) {
                        *used = true;
                        values.push(value.to_string());
                    }
                }
                values
            }
            &mut Self::Help(ref mut v) => { v.push(format!("{}<value>", prefix)); Vec::new() }
        }
    }
}

impl Drop for Args {
    fn drop(&mut self) {
        match self {
            Self::Run(ref set) => {
                for (k, used) in set {
                    if !used { eprintln!("Unrecognized argument: {}", k); }
                }
            }
            Self::Help(ref v) => {
                println!("Acceptable arguments:");
                for a in v { println!(" {}", a); }
            }
        }
    }
}

fn main() {
    let mut args = Args::new();

    let repeats = args.with_prefix("repeats=").last()
        .map(|v| v.parse().expect("repeats must be a positive number"))
        .filter(|&r| r > 0)
        .unwrap_or(1);

    if args.case("cooling") {
        run("cooling", &cooling_grid(), repeats);
    }

    for n in 3..=8u8 {
        if args.case(&format!("open{}", n)) {
            run(&format!("open{}", n), &open_grid(n, n), repeats);
        }
    }

    for seed in args.with_prefix("random s=") {
        let seed: u64 = seed.parse().expect("random seed must be a number");
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        run(&format!("random s={}", seed), &random_grid(&mut rng, 6, 7, 5), repeats);
    }

    for path in args.with_prefix("file=") {
        match fs::read_to_string(&path) {
            Ok(content) => match Grid::parse(content.trim_end()) {
                Ok(grid) => run(&path, &grid, repeats),
                Err(err) => {
                    eprintln!("{}: {}", path, err);
                    process::exit(1);
                }
            },
            Err(err) => {
                eprintln!("{}: {}", path, err);
                process::exit(1);
            }
        }
    }
}
