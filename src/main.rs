//! Segwise: Customer Segmentation CLI using K-Means clustering
//!
//! This is the main entrypoint that orchestrates data loading, clustering,
//! chart rendering, and CSV export. Every invocation is one full pipeline
//! run over the input file; nothing is cached between runs.

use anyhow::{Context, Result};
use clap::Parser;
use segwise::pipeline::PipelineOutput;
use segwise::{run_pipeline, viz, Args};
use std::time::Instant;

fn main() -> Result<()> {
    // Parse command-line arguments
    let args = Args::parse();

    if args.verbose {
        println!("Segwise - Customer Segmentation using K-Means");
        println!("=============================================\n");
    }

    run_full_pipeline(&args)
}

/// Run the full segmentation pipeline: load, cluster, render, export.
fn run_full_pipeline(args: &Args) -> Result<()> {
    let start_time = Instant::now();

    // Step 1: Read the input file
    if args.verbose {
        println!("Step 1: Reading input file");
        println!("  Input file: {}", args.input);
    }

    let bytes = std::fs::read(&args.input)
        .with_context(|| format!("failed to read input file '{}'", args.input))?;

    // Step 2: Parse, validate, and cluster in one pass
    if args.verbose {
        println!("\nStep 2: Running clustering pipeline");
        println!("  Features: {}", args.features.join(", "));
        println!("  Number of clusters: {}", args.clusters);
        println!("  Seed: {}", args.seed);
        println!("  Max iterations: {}", args.max_iters);
        println!("  Tolerance: {}", args.tolerance);
    }

    let pipeline_start = Instant::now();
    let output = run_pipeline(&bytes, &args.pipeline_config())?;
    let pipeline_time = pipeline_start.elapsed();

    println!("✓ Clustered {} customers", output.dataset.n_rows());
    if args.verbose {
        println!("  Pipeline time: {:.2}s", pipeline_time.as_secs_f64());
        println!("  Feature matrix shape: {:?}", output.matrix.shape());
        println!("  Inertia: {:.2}", output.model.inertia);
    }

    // Step 3: Preview and cluster statistics
    println!("\n=== Input Preview (first 5 rows) ===");
    print_table(
        output.dataset.headers(),
        output.dataset.head(5).iter().map(|row| row.as_slice()),
    );

    println!("\n=== Cluster Distribution ===");
    for summary in &output.summaries {
        println!(
            "Cụm {}: {} customers ({:.1}%)",
            summary.cluster, summary.count, summary.share
        );
    }

    println!("\n=== Mean Attributes per Cluster ===");
    print_summary_table(&output, &args.features);

    // Step 4: Render charts
    if args.verbose {
        println!("\nStep 3: Rendering charts");
        println!("  Chart file: {}", args.output);
    }

    let viz_start = Instant::now();
    let pie_path = viz::render_charts(&output, &args.features, &args.output)?;
    let viz_time = viz_start.elapsed();

    println!("\n✓ Charts rendered");
    if args.verbose {
        println!("  Rendering time: {:.2}s", viz_time.as_secs_f64());
    }

    // Step 5: Export the annotated dataset
    let csv_bytes = output.dataset.to_csv_bytes()?;
    std::fs::write(&args.export, csv_bytes)
        .with_context(|| format!("failed to write export file '{}'", args.export))?;
    println!("✓ Labeled dataset exported");

    let total_time = start_time.elapsed();
    println!("\n=== Pipeline Complete ===");
    println!("Total processing time: {:.2}s", total_time.as_secs_f64());
    println!("Cluster chart saved to: {}", args.output);
    println!("Pie chart saved to: {pie_path}");
    println!("Export saved to: {}", args.export);

    Ok(())
}

/// Print rows as an aligned console table under the given headers.
fn print_table<'a>(headers: &[String], rows: impl Iterator<Item = &'a [String]> + Clone) {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows.clone() {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let header_line: Vec<String> = headers
        .iter()
        .zip(&widths)
        .map(|(h, &w)| format!("{h:>w$}"))
        .collect();
    println!("{}", header_line.join(" | "));

    for row in rows {
        let line: Vec<String> = row
            .iter()
            .zip(&widths)
            .map(|(cell, &w)| format!("{cell:>w$}"))
            .collect();
        println!("{}", line.join(" | "));
    }
}

/// Print the per-cluster mean of each selected feature.
fn print_summary_table(output: &PipelineOutput, features: &[String]) {
    let mut headers = vec!["Cluster".to_string()];
    headers.extend(features.iter().cloned());

    let rows: Vec<Vec<String>> = output
        .summaries
        .iter()
        .map(|summary| {
            let mut row = vec![summary.cluster.to_string()];
            row.extend(summary.means.iter().map(|mean| format!("{mean:.2}")));
            row
        })
        .collect();

    print_table(&headers, rows.iter().map(|row| row.as_slice()));
}
