// scripts/benchmark.rs
use fdm_pricer::analytics::bs_analytic;
use fdm_pricer::fdm::{FdmConfig, FdmEngine, GreeksSelection, Payoff};
use fdm_pricer::math_utils::Timer;
use fdm_pricer::mesh::{LogSpaceBoundaries, MaturityBoundaries};
use fdm_pricer::models::{BlackScholes, FlatRate, Instrument};
use fdm_pricer::FdmResult;
use std::env;
use std::fs::File;
use std::io::{self, Write};

const S0: f64 = 100.0;
const K: f64 = 100.0;
const R: f64 = 0.05;
const SIGMA: f64 = 0.2;
const T: f64 = 1.0;

#[derive(Debug)]
struct SystemInfo {
    os: String,
    cpu_cores: usize,
    rustc_flags: String,
    rayon_threads: usize,
}

impl SystemInfo {
    fn gather() -> Self {
        Self {
            os: env::consts::OS.to_string(),
            cpu_cores: num_cpus::get(),
            rustc_flags: env::var("RUSTFLAGS").unwrap_or_else(|_| "default".to_string()),
            rayon_threads: rayon::current_num_threads(),
        }
    }
}

#[derive(Debug)]
struct BenchmarkResult {
    name: String,
    space_intervals: usize,
    time_steps: usize,
    time_ms: f64,
    value: f64,
    analytic_value: f64,
}

impl BenchmarkResult {
    fn relative_error(&self) -> f64 {
        (self.value - self.analytic_value).abs() / self.analytic_value.abs()
    }
}

fn call_engine(config: FdmConfig) -> FdmResult<FdmEngine> {
    FdmEngine::new(
        Box::new(BlackScholes),
        Box::new(FlatRate::new(R)),
        Box::new(Payoff::EuropeanCall { k: K }),
        Box::new(LogSpaceBoundaries::default()),
        Box::new(MaturityBoundaries),
        config,
    )
}

fn run_refinement_benchmarks(parallel: bool) -> FdmResult<Vec<BenchmarkResult>> {
    let inst = Instrument::new(S0, SIGMA, T, R)?;
    let analytic = bs_analytic::bs_call_price(S0, K, R, SIGMA, T);
    let mut results = Vec::new();

    for (theta, scheme) in [(0.5, "CN"), (1.0, "Implicit")] {
        for h in [0.04, 0.02, 0.01, 0.005, 0.0025] {
            let engine = call_engine(FdmConfig {
                dx: h,
                dt: h,
                theta,
                parallel,
                ..Default::default()
            })?;

            let mut timer = Timer::new();
            timer.start();
            let solution = engine.solve(&inst)?;
            let value = solution.price_at(S0)?;
            let time_ms = timer.elapsed_ms();

            results.push(BenchmarkResult {
                name: format!("{} call h={}{}", scheme, h, if parallel { " (par)" } else { "" }),
                space_intervals: solution.mesh().space_intervals,
                time_steps: solution.mesh().time_steps,
                time_ms,
                value,
                analytic_value: analytic,
            });
        }
    }
    Ok(results)
}

fn run_greeks_benchmark() -> FdmResult<Vec<BenchmarkResult>> {
    let inst = Instrument::new(S0, SIGMA, T, R)?;
    let engine = call_engine(FdmConfig::default())?;

    let mut timer = Timer::new();
    timer.start();
    let greeks = engine.sensitivities(&inst, GreeksSelection::ALL)?;
    let time_ms = timer.elapsed_ms();
    let mesh = *engine.solve(&inst)?.mesh();

    let rows = [
        ("Delta", greeks.delta, bs_analytic::bs_call_delta(S0, K, R, SIGMA, T)),
        ("Gamma", greeks.gamma, bs_analytic::bs_gamma(S0, K, R, SIGMA, T)),
        ("Theta", greeks.theta, -bs_analytic::bs_call_theta(S0, K, R, SIGMA, T)),
        ("Vega", greeks.vega, bs_analytic::bs_vega(S0, K, R, SIGMA, T)),
    ];
    Ok(rows
        .into_iter()
        .filter_map(|(name, value, analytic_value)| {
            value.map(|value| BenchmarkResult {
                name: format!("Greeks batch: {}", name),
                space_intervals: mesh.space_intervals,
                time_steps: mesh.time_steps,
                time_ms,
                value,
                analytic_value,
            })
        })
        .collect())
}

fn write_results_to_csv(results: &[BenchmarkResult], system_info: &SystemInfo, filename: &str) -> io::Result<()> {
    let mut file = File::create(filename)?;

    writeln!(file, "# System Information")?;
    writeln!(file, "# OS: {}", system_info.os)?;
    writeln!(file, "# CPU Cores: {}", system_info.cpu_cores)?;
    writeln!(file, "# RUSTFLAGS: {}", system_info.rustc_flags)?;
    writeln!(file, "# Rayon Threads: {}", system_info.rayon_threads)?;
    writeln!(
        file,
        "# Benchmark Date: {}",
        chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC")
    )?;
    writeln!(file, "#")?;
    writeln!(file, "Benchmark,Space_Intervals,Time_Steps,Time_ms,Value,Analytic_Value,Relative_Error")?;

    for result in results {
        writeln!(
            file,
            "{},{},{},{:.3},{:.8},{:.8},{:.3e}",
            result.name,
            result.space_intervals,
            result.time_steps,
            result.time_ms,
            result.value,
            result.analytic_value,
            result.relative_error()
        )?;
    }
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("fdm-pricer Benchmark Suite");
    println!("==========================\n");

    let system_info = SystemInfo::gather();
    println!("System Information:");
    println!("  OS: {}", system_info.os);
    println!("  CPU Cores: {}", system_info.cpu_cores);
    println!("  RUSTFLAGS: {}", system_info.rustc_flags);
    println!("  Rayon Threads: {}", system_info.rayon_threads);
    println!();

    println!("Running mesh refinement benchmarks...");
    let mut all_results = run_refinement_benchmarks(false)?;
    all_results.extend(run_refinement_benchmarks(true)?);

    println!("Running Greeks benchmark...");
    all_results.extend(run_greeks_benchmark()?);

    println!("\n{:=<96}", "");
    println!("BENCHMARK RESULTS");
    println!("{:=<96}", "");
    println!(
        "{:<32} {:>8} {:>8} {:>12} {:>12} {:>12} {:>10}",
        "Benchmark", "N", "T", "Time (ms)", "Value", "Analytic", "Rel Error"
    );
    println!("{:-<96}", "");
    for result in &all_results {
        println!(
            "{:<32} {:>8} {:>8} {:>12.2} {:>12.6} {:>12.6} {:>10.2e}",
            result.name,
            result.space_intervals,
            result.time_steps,
            result.time_ms,
            result.value,
            result.analytic_value,
            result.relative_error()
        );
    }
    println!("{:=<96}", "");

    if env::args().any(|arg| arg == "--csv") {
        let timestamp = chrono::Utc::now().format("%Y%m%d_%H%M%S");
        let filename = format!("benchmark_results_{}.csv", timestamp);
        write_results_to_csv(&all_results, &system_info, &filename)?;
        println!("\nResults saved to: {}", filename);
    }

    println!("\nBenchmark complete!");
    Ok(())
}
