//! Life Farm CLI - Run Life patterns and farm seeds from JSON configuration.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use life_farm::{
    schema::{FarmConfig, RunConfig},
    sim::{Farm, FarmStats, Grid, HarvestExport},
};

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage(&args[0]);
        std::process::exit(1);
    }

    match args[1].as_str() {
        "--example" => print_example_configs(),
        "run" => run(&args[2..]),
        "farm" => farm(&args[2..]),
        _ => {
            print_usage(&args[0]);
            std::process::exit(1);
        }
    }
}

fn print_usage(program: &str) {
    eprintln!("Usage: {} <run|farm> <config.json> [...]", program);
    eprintln!();
    eprintln!("Run Life patterns on a torus, or farm every small seed.");
    eprintln!();
    eprintln!("Commands:");
    eprintln!("  run <config.json> [steps]      Run one pattern and report its progress");
    eprintln!("  farm <config.json> [out.json]  Plant every seed within the cell budget");
    eprintln!();
    eprintln!("Example configurations are printed with the --example flag.");
}

fn run(args: &[String]) {
    let Some(config_path) = args.first().map(PathBuf::from) else {
        eprintln!("Usage: run <config.json> [steps]");
        std::process::exit(1);
    };
    let config: RunConfig = load_config(&config_path);
    if let Err(e) = config.validate() {
        eprintln!("Invalid configuration: {}", e);
        std::process::exit(1);
    }
    let steps = args
        .get(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(config.steps);

    let pattern = config.pattern.build(config.width, config.height);
    let mut grid = Grid::new(config.width, config.height);
    if let Err(e) = grid.populate(&pattern) {
        eprintln!("Error planting pattern: {}", e);
        std::process::exit(1);
    }

    println!("Life Run");
    println!("========");
    println!("Grid: {}x{}", grid.width(), grid.height());
    println!("Population: {}", grid.population());
    println!("Steps: {}", steps);
    println!();

    let start = Instant::now();
    for i in 0..steps {
        grid.cycle();

        // Print progress every 10%
        if (i + 1) % (steps / 10).max(1) == 0 {
            println!(
                "  Cycle {}/{}: population={}, born={}, died={}",
                i + 1,
                steps,
                grid.population(),
                grid.new_born().len(),
                grid.new_dead().len()
            );
        }
    }

    let elapsed = start.elapsed();
    println!();
    println!("Final state:");
    println!("  Population: {}", grid.population());
    println!("  Generations: {}", grid.generations());
    println!(
        "Time: {:.2}s ({:.1} cycles/s)",
        elapsed.as_secs_f32(),
        steps as f32 / elapsed.as_secs_f32()
    );
}

fn farm(args: &[String]) {
    let Some(config_path) = args.first().map(PathBuf::from) else {
        eprintln!("Usage: farm <config.json> [harvest.json]");
        std::process::exit(1);
    };
    let config: FarmConfig = load_config(&config_path);
    if let Err(e) = config.validate() {
        eprintln!("Invalid configuration: {}", e);
        std::process::exit(1);
    }
    let out_path = args.get(1).map(PathBuf::from);

    println!("Seed Farm");
    println!("=========");
    println!("Land: {}x{}", config.width, config.height);
    println!("Cell budget: {}", config.max_cells);
    println!();

    let mut farm = Farm::from_config(&config);
    let start = Instant::now();
    let outcome = farm.plant(config.max_cells).unwrap_or_else(|e| {
        eprintln!("Error farming: {}", e);
        std::process::exit(1);
    });
    let elapsed = start.elapsed();

    let stats = FarmStats::from_farm(&farm);
    println!("Outcome: {:?}", outcome);
    println!("  Seeds: {}", stats.seeds);
    println!("  Canonical: {}", stats.canonical);
    println!("  Variants: {}", stats.variants);
    println!("  Distinct states: {}", stats.distinct_states);
    println!("  Longest run: {} generations", stats.longest_run);
    println!("  Peak population: {}", stats.peak_population);
    println!(
        "Time: {:.2}s ({:.1} seeds/s)",
        elapsed.as_secs_f32(),
        stats.seeds as f32 / elapsed.as_secs_f32()
    );

    let export = HarvestExport::from_farm(&farm);
    println!();
    println!("Longest-running seeds:");
    for seed in export.top_runs(5) {
        println!(
            "  {}: {} cells, {} generations, peak {}{}",
            seed.number,
            seed.cells.len(),
            seed.generations,
            seed.max_living,
            if seed.is_canonical() { "" } else { " (variant)" }
        );
    }

    if let Some(path) = out_path {
        if let Err(e) = export.save(&path) {
            eprintln!("Error writing harvest: {}", e);
            std::process::exit(1);
        }
        println!();
        println!("Harvest written to {}", path.display());
    }
}

fn load_config<T: serde::de::DeserializeOwned>(path: &Path) -> T {
    let content = fs::read_to_string(path).unwrap_or_else(|e| {
        eprintln!("Error reading config file: {}", e);
        std::process::exit(1);
    });
    serde_json::from_str(&content).unwrap_or_else(|e| {
        eprintln!("Error parsing config: {}", e);
        std::process::exit(1);
    })
}

fn print_example_configs() {
    println!("Example run configuration (run.json):");
    println!(
        "{}",
        serde_json::to_string_pretty(&RunConfig::default()).unwrap()
    );
    println!();
    println!("Example farm configuration (farm.json):");
    println!(
        "{}",
        serde_json::to_string_pretty(&FarmConfig::default()).unwrap()
    );
}
