use std::path::PathBuf;
use std::process;

use voxlight_bench::report;
use voxlight_bench::runner::BenchmarkRunner;
use voxlight_bench::scenes;
use voxlight_core::LightingConfig;

fn usage() {
    eprintln!("Usage: bake-bench [OPTIONS]");
    eprintln!("  --config <path>                RON lighting config (default: built-in)");
    eprintln!("  --baseline <path>              Load baseline JSON for comparison");
    eprintln!("  --output <path>                Save current results as JSON baseline");
    eprintln!("  --regression-threshold <pct>   Regression threshold percentage (default: 10)");
    eprintln!("  --iterations <n>               Bakes per scene (default: 20)");
    eprintln!("  --lights <n>                   Dynamic lights in the flicker scene (default: 256)");
}

fn next_arg(args: &[String], i: &mut usize, flag: &str) -> String {
    *i += 1;
    match args.get(*i) {
        Some(value) => value.clone(),
        None => {
            eprintln!("{flag} requires a value");
            process::exit(1);
        }
    }
}

fn parse_or_exit<T: std::str::FromStr>(value: &str, flag: &str) -> T {
    value.parse().unwrap_or_else(|_| {
        eprintln!("invalid {flag} value: {value}");
        process::exit(1);
    })
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = std::env::args().collect();

    let mut config_path: Option<PathBuf> = None;
    let mut baseline_path: Option<PathBuf> = None;
    let mut output_path: Option<PathBuf> = None;
    let mut regression_threshold = 10.0f64;
    let mut iterations = 20u32;
    let mut light_count = 256u32;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--config" => config_path = Some(PathBuf::from(next_arg(&args, &mut i, "--config"))),
            "--baseline" => {
                baseline_path = Some(PathBuf::from(next_arg(&args, &mut i, "--baseline")))
            }
            "--output" => output_path = Some(PathBuf::from(next_arg(&args, &mut i, "--output"))),
            "--regression-threshold" => {
                let v = next_arg(&args, &mut i, "--regression-threshold");
                regression_threshold = parse_or_exit(&v, "--regression-threshold");
            }
            "--iterations" => {
                let v = next_arg(&args, &mut i, "--iterations");
                iterations = parse_or_exit(&v, "--iterations");
            }
            "--lights" => {
                let v = next_arg(&args, &mut i, "--lights");
                light_count = parse_or_exit(&v, "--lights");
            }
            "--help" | "-h" => {
                usage();
                process::exit(0);
            }
            other => {
                eprintln!("Unknown argument: {}", other);
                usage();
                process::exit(1);
            }
        }
        i += 1;
    }

    let config = match config_path {
        Some(ref path) => {
            let text = std::fs::read_to_string(path).unwrap_or_else(|e| {
                eprintln!("failed to read {}: {e}", path.display());
                process::exit(1);
            });
            LightingConfig::from_ron_str(&text).unwrap_or_else(|e| {
                eprintln!("{}: {e}", path.display());
                process::exit(1);
            })
        }
        None => LightingConfig::default(),
    };
    let (resolution, steps) = (config.lightmap_resolution, config.shadow_max_steps);
    log::info!("Lightmap resolution {resolution}^3, {steps} shadow steps");

    let runner = BenchmarkRunner::new(config, iterations).unwrap_or_else(|e| {
        eprintln!("{e}");
        process::exit(1);
    });

    let mut results: Vec<_> = scenes::standard_scenes()
        .iter()
        .map(|scene| runner.run_scene(scene))
        .collect();
    results.push(runner.run_flicker(light_count));

    println!("\n## Bake Benchmark Results\n");
    println!("{}", report::format_markdown(&results));

    if let Some(ref path) = output_path {
        let baseline = report::Baseline {
            label: format!("bench-{}", process::id()),
            lightmap_resolution: resolution,
            shadow_max_steps: steps,
            results: results.clone(),
        };
        match report::save_baseline(path, &baseline) {
            Ok(()) => log::info!("Saved baseline to {}", path.display()),
            Err(e) => log::error!("Failed to save baseline to {}: {e}", path.display()),
        }
    }

    if let Some(ref path) = baseline_path {
        if let Some(baseline) = report::load_baseline(path) {
            let regressions =
                report::compare(&results, &baseline, resolution, steps, regression_threshold);
            println!(
                "{}",
                report::format_comparison(&regressions, regression_threshold)
            );
            if !regressions.is_empty() {
                eprintln!(
                    "ERROR: {} regressions detected, exiting with code 1",
                    regressions.len()
                );
                process::exit(1);
            }
        } else {
            log::warn!("Baseline file not found: {}", path.display());
        }
    }

    log::info!("Benchmark complete.");
}
