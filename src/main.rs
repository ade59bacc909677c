//! BasketForge: Market basket analysis CLI using the Apriori algorithm
//!
//! This is the main entrypoint that orchestrates data loading, mining,
//! rule generation, reporting, and recommendations.

use anyhow::Result;
use basketforge::{load_transactions, viz, Args, BasketAnalysis};
use clap::Parser;
use std::time::Instant;

fn main() -> Result<()> {
    // Parse command-line arguments
    let args = Args::parse();

    if args.verbose {
        println!("BasketForge - Market Basket Analysis using Apriori");
        println!("==================================================\n");
    }

    // Check if in recommendation mode
    if let Some(product) = args.recommend.clone() {
        run_recommendation_mode(&args, &product)?;
    } else {
        run_full_pipeline(&args)?;
    }

    Ok(())
}

/// Run recommendation mode for a single product
fn run_recommendation_mode(args: &Args, product: &str) -> Result<()> {
    println!("=== Recommendation Mode ===");
    println!("Product: {}", product);

    let start_time = Instant::now();

    if args.verbose {
        println!("\nLoading transactions from: {}", args.input);
    }
    let transactions =
        load_transactions(&args.input, &args.transaction_col, &args.item_col)?;

    if args.verbose {
        println!("Loaded {} transactions", transactions.len());
        println!("\nMining rules (min_support {}, min_confidence {}, min_lift {}, metric {})...",
            args.min_support, args.min_confidence, args.min_lift, args.metric);
    }

    let analysis = BasketAnalysis::run(&transactions, args.mining_config())?;
    let recommendations = analysis.recommendations_for(product);

    let elapsed = start_time.elapsed();

    if recommendations.is_empty() {
        println!("\nNo rules involve '{}' - nothing to recommend.", product);
        println!("Try lowering the thresholds or check the product name.");
    } else {
        println!("\nCustomers buying '{}' also buy:", product);
        for rec in &recommendations {
            println!(
                "  {} (confidence {:.2}, lift {:.2})",
                rec.consequent, rec.confidence, rec.lift
            );
        }
    }
    println!("\nProcessing time: {:.2}s", elapsed.as_secs_f64());

    Ok(())
}

/// Run full analysis pipeline
fn run_full_pipeline(args: &Args) -> Result<()> {
    println!("=== Full Analysis Pipeline ===\n");

    let start_time = Instant::now();

    // Step 1: Load transactions
    if args.verbose {
        println!("Step 1: Loading transactions");
        println!("  Input file: {}", args.input);
    }

    let load_start = Instant::now();
    let transactions =
        load_transactions(&args.input, &args.transaction_col, &args.item_col)?;
    let load_time = load_start.elapsed();

    println!("✓ Data loaded: {} transactions", transactions.len());
    if args.verbose {
        println!("  Loading time: {:.2}s", load_time.as_secs_f64());
    }

    // Step 2: Mine itemsets and generate rules
    if args.verbose {
        println!("\nStep 2: Mining frequent itemsets and rules");
        println!("  min_support: {}", args.min_support);
        println!("  min_confidence: {}", args.min_confidence);
        println!("  min_lift: {}", args.min_lift);
        println!("  metric: {}", args.metric);
    }

    let mine_start = Instant::now();
    let analysis = BasketAnalysis::run(&transactions, args.mining_config())?;
    let mine_time = mine_start.elapsed();

    println!(
        "✓ Mined {} frequent itemsets, {} rules",
        analysis.itemsets().len(),
        analysis.rules().len()
    );
    if args.verbose {
        println!("  Mining time: {:.2}s", mine_time.as_secs_f64());
    }

    // Step 3: Report and charts
    if args.verbose {
        println!("\nStep 3: Generating report and charts");
        println!("  Output file: {}", args.output);
    }

    let viz_start = Instant::now();
    viz::generate_visualization_report(&analysis, &args.output, args.top)?;
    let viz_time = viz_start.elapsed();

    if args.verbose {
        println!("  Visualization time: {:.2}s", viz_time.as_secs_f64());
    }

    // Step 4: Optional CSV export
    if let Some(export_dir) = &args.export_dir {
        std::fs::create_dir_all(export_dir)?;
        let rules_path = format!("{}/rules.csv", export_dir);
        let itemsets_path = format!("{}/frequent_itemsets.csv", export_dir);
        basketforge::export::write_rules_csv(
            analysis.rules(),
            analysis.data().universe(),
            &rules_path,
        )?;
        basketforge::export::write_itemsets_csv(
            analysis.itemsets(),
            analysis.data().universe(),
            &itemsets_path,
        )?;
        println!("\n✓ Results exported to {} and {}", rules_path, itemsets_path);
    }

    let total_time = start_time.elapsed();
    println!("\n=== Pipeline Complete ===");
    println!("Total processing time: {:.2}s", total_time.as_secs_f64());
    println!("Main plot saved to: {}", args.output);

    Ok(())
}
