use std::fmt::Write as _;
use std::path::Path;

use crate::runner::BenchmarkResult;

/// Saved results plus the lighting config they were measured with.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct Baseline {
    pub label: String,
    pub lightmap_resolution: u32,
    pub shadow_max_steps: u32,
    pub results: Vec<BenchmarkResult>,
}

/// A scene whose mean time grew past the threshold.
#[derive(Debug, Clone, PartialEq)]
pub struct Regression {
    pub scene_name: String,
    pub pct_change: f64,
}

/// Load a baseline from a JSON file. Returns None if it is missing or unreadable.
pub fn load_baseline(path: &Path) -> Option<Baseline> {
    let contents = std::fs::read_to_string(path).ok()?;
    match serde_json::from_str(&contents) {
        Ok(baseline) => Some(baseline),
        Err(e) => {
            log::warn!("Ignoring unreadable baseline {}: {e}", path.display());
            None
        }
    }
}

pub fn save_baseline(path: &Path, baseline: &Baseline) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(baseline).map_err(std::io::Error::other)?;
    std::fs::write(path, json)
}

/// Scenes present in both runs whose mean grew by more than `threshold_pct`.
/// Baselines taken with a different bake config are not comparable and
/// yield nothing.
pub fn compare(
    current: &[BenchmarkResult],
    baseline: &Baseline,
    lightmap_resolution: u32,
    shadow_max_steps: u32,
    threshold_pct: f64,
) -> Vec<Regression> {
    if baseline.lightmap_resolution != lightmap_resolution
        || baseline.shadow_max_steps != shadow_max_steps
    {
        log::warn!(
            "Baseline '{}' used resolution {} / {} steps; skipping comparison",
            baseline.label,
            baseline.lightmap_resolution,
            baseline.shadow_max_steps
        );
        return Vec::new();
    }

    current
        .iter()
        .filter_map(|result| {
            let base = baseline
                .results
                .iter()
                .find(|b| b.scene_name == result.scene_name)?;
            if base.timings.mean_ms <= 0.0 {
                return None;
            }
            let pct_change =
                (result.timings.mean_ms - base.timings.mean_ms) / base.timings.mean_ms * 100.0;
            (pct_change > threshold_pct).then(|| Regression {
                scene_name: result.scene_name.clone(),
                pct_change,
            })
        })
        .collect()
}

/// Markdown summary table.
pub fn format_markdown(results: &[BenchmarkResult]) -> String {
    let mut out = String::new();
    out.push_str("| Scene | Solid voxels | Chunks | Iters | Mean (ms) | Median (ms) | P95 (ms) | Max (ms) |\n");
    out.push_str("|-------|--------------|--------|-------|-----------|-------------|----------|----------|\n");

    for r in results {
        let _ = writeln!(
            out,
            "| {} | {} | {} | {} | {:.3} | {:.3} | {:.3} | {:.3} |",
            r.scene_name,
            r.solid_voxels,
            r.chunk_count,
            r.iterations,
            r.timings.mean_ms,
            r.timings.median_ms,
            r.timings.p95_ms,
            r.timings.max_ms,
        );
    }

    out
}

pub fn format_comparison(regressions: &[Regression], threshold_pct: f64) -> String {
    if regressions.is_empty() {
        return format!("All scenes within {threshold_pct:.0}% threshold. No regressions detected.\n");
    }

    let mut out = format!("REGRESSIONS DETECTED (>{threshold_pct:.0}% threshold):\n");
    for r in regressions {
        let _ = writeln!(out, "  - {}: +{:.1}%", r.scene_name, r.pct_change);
    }
    out
}
