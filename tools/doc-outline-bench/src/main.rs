use std::fs;
use std::hint::black_box;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{ensure, Context, Result};
use clap::Parser;
use doc_outline::{build_outline, segment, DocPage};
use doc_outline_config::{OutputFormat, RenderSettings};
use doc_outline_format::Renderer;

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Benchmark harness for the doc-outline pipeline"
)]
struct Args {
    /// Document to benchmark; a synthetic document is generated when omitted
    #[arg(long, value_name = "PATH")]
    path: Option<PathBuf>,

    /// Number of sections in the synthetic document
    #[arg(long, default_value_t = 5_000)]
    sections: usize,

    /// Number of warm-up iterations (not counted in results)
    #[arg(long, default_value_t = 1)]
    warmup: usize,

    /// Number of measured iterations
    #[arg(long, default_value_t = 10)]
    iterations: usize,
}

fn main() -> Result<()> {
    let args = Args::parse();
    ensure!(args.iterations > 0, "--iterations must be at least 1");

    let text = match &args.path {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("failed to read benchmark input {}", path.display()))?,
        None => synthetic_document(args.sections),
    };
    let sections = segment(&text);
    let page = DocPage::new("bench", &text);
    let renderer = Renderer::from_settings(RenderSettings::default()).with_format(OutputFormat::Html);

    let results = [
        benchmark("segment", args.warmup, args.iterations, || {
            black_box(segment(black_box(&text)));
        }),
        benchmark("build-outline", args.warmup, args.iterations, || {
            black_box(build_outline(black_box(&sections)));
        }),
        benchmark("render-html-page", args.warmup, args.iterations, || {
            black_box(renderer.render_page(black_box(&page)));
        }),
    ];

    print_summary(text.len(), sections.len(), &results);
    Ok(())
}

// Cycles through levels 1..=6 with a few body lines and an occasional fence.
fn synthetic_document(sections: usize) -> String {
    let mut text = String::from("Preamble line before any heading.\n\n");
    for index in 0..sections {
        let level = index % 6 + 1;
        text.push_str(&format!("{} Heading {index}\n", "#".repeat(level)));
        text.push_str("Body text for this section.\n\nAnother paragraph.\n");
        if index % 10 == 0 {
            text.push_str("```\nlet x = 1;\n```\n");
        }
    }
    text
}

struct BenchResult {
    name: String,
    iterations: usize,
    average: Duration,
    median: Duration,
}

fn benchmark<F>(name: &str, warmup: usize, iterations: usize, mut f: F) -> BenchResult
where
    F: FnMut(),
{
    for _ in 0..warmup {
        f();
    }

    let mut samples = Vec::with_capacity(iterations);
    for _ in 0..iterations {
        let start = Instant::now();
        f();
        samples.push(start.elapsed());
    }

    samples.sort();
    let total = samples
        .iter()
        .copied()
        .fold(Duration::ZERO, |acc, sample| acc + sample);
    let average = total / (iterations as u32);
    let median = samples[samples.len() / 2];

    BenchResult {
        name: name.to_string(),
        iterations,
        average,
        median,
    }
}

fn print_summary(bytes: usize, sections: usize, results: &[BenchResult]) {
    println!("doc-outline benchmark results ({bytes} bytes, {sections} sections):\n");
    for result in results {
        println!(
            "- {}: avg {:?} (median {:?}) over {} iterations",
            result.name, result.average, result.median, result.iterations
        );
    }
}
