//! Visualization functions using Plotters for association rule analysis

use plotters::prelude::*;

use crate::analysis::BasketAnalysis;
use crate::encode::BasketData;
use crate::rules::RuleSet;

/// Scatter plot of the rule collection: support against confidence, with
/// point size and color scaled by lift.
///
/// # Arguments
/// * `rules` - Generated rule collection
/// * `output_path` - Path to save the PNG plot
/// * `plot_title` - Title for the plot
pub fn create_rule_scatter(
    rules: &RuleSet,
    output_path: &str,
    plot_title: Option<&str>,
) -> crate::Result<()> {
    if rules.is_empty() {
        anyhow::bail!("no rules to plot");
    }
    let title = plot_title.unwrap_or("Association Rules: Support vs Confidence (sized by Lift)");

    let supports: Vec<f64> = rules.iter().map(|r| r.support).collect();
    let confidences: Vec<f64> = rules.iter().map(|r| r.confidence).collect();
    let lifts: Vec<f64> = rules.iter().map(|r| r.lift).collect();

    // Calculate plot bounds with some padding
    let sup_min = supports.iter().fold(f64::INFINITY, |a, &b| a.min(b)) - 0.05;
    let sup_max = supports.iter().fold(f64::NEG_INFINITY, |a, &b| a.max(b)) + 0.05;
    let conf_min = confidences.iter().fold(f64::INFINITY, |a, &b| a.min(b)) - 0.05;
    let conf_max = confidences.iter().fold(f64::NEG_INFINITY, |a, &b| a.max(b)) + 0.05;
    let lift_min = lifts.iter().fold(f64::INFINITY, |a, &b| a.min(b));
    let lift_max = lifts.iter().fold(f64::NEG_INFINITY, |a, &b| a.max(b));

    let root = BitMapBackend::new(output_path, (800, 600)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(title, ("sans-serif", 24))
        .margin(10)
        .x_label_area_size(50)
        .y_label_area_size(60)
        .build_cartesian_2d(sup_min..sup_max, conf_min..conf_max)?;

    chart
        .configure_mesh()
        .x_desc("Support")
        .y_desc("Confidence")
        .axis_desc_style(("sans-serif", 15))
        .draw()?;

    for rule in rules.iter() {
        let radius = (3.0 + rule.lift * 2.0).min(12.0) as i32;
        // Shade from blue (weakest lift) to red (strongest).
        let t = if lift_max > lift_min {
            (rule.lift - lift_min) / (lift_max - lift_min)
        } else {
            1.0
        };
        let color = RGBColor((t * 255.0) as u8, 60, (255.0 - t * 255.0) as u8);
        chart.draw_series(std::iter::once(Circle::new(
            (rule.support, rule.confidence),
            radius,
            color.filled(),
        )))?;
    }

    root.present()?;
    println!("Rule scatter plot saved to: {}", output_path);

    Ok(())
}

/// Bar chart of the strongest rules by lift.
pub fn create_top_rules_chart(
    rules: &RuleSet,
    output_path: &str,
    top_n: usize,
) -> crate::Result<()> {
    let top = rules.top(top_n);
    if top.is_empty() {
        anyhow::bail!("no rules to plot");
    }
    let max_lift = top.iter().map(|r| r.lift).fold(1.0_f64, f64::max);

    let root = BitMapBackend::new(output_path, (600, 400)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(format!("Top {} Rules by Lift", top.len()), ("sans-serif", 24))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(50)
        .build_cartesian_2d(0f64..(top.len() as f64), 0f64..(max_lift * 1.1))?;

    chart
        .configure_mesh()
        .x_desc("Rule rank")
        .y_desc("Lift")
        .axis_desc_style(("sans-serif", 15))
        .draw()?;

    for (rank, rule) in top.iter().enumerate() {
        chart.draw_series(std::iter::once(Rectangle::new(
            [(rank as f64 + 0.1, 0.0), (rank as f64 + 0.9, rule.lift)],
            BLUE.filled(),
        )))?;
    }

    root.present()?;
    println!("Top rules chart saved to: {}", output_path);

    Ok(())
}

/// Bar chart of the most frequently purchased items.
pub fn create_item_frequency_chart(
    data: &BasketData,
    output_path: &str,
    top_n: usize,
) -> crate::Result<()> {
    let mut counts: Vec<(usize, usize)> =
        data.item_frequencies().into_iter().enumerate().collect();
    counts.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
    counts.truncate(top_n);
    if counts.is_empty() {
        anyhow::bail!("no items to plot");
    }
    let max_count = counts.iter().map(|&(_, c)| c).max().unwrap_or(1) as f64;

    let root = BitMapBackend::new(output_path, (600, 400)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(
            format!("Top {} Most Frequently Purchased Items", counts.len()),
            ("sans-serif", 24),
        )
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(50)
        .build_cartesian_2d(0f64..(counts.len() as f64), 0f64..(max_count * 1.1))?;

    chart
        .configure_mesh()
        .x_desc("Item rank")
        .y_desc("Transactions")
        .axis_desc_style(("sans-serif", 15))
        .draw()?;

    for (rank, &(_, count)) in counts.iter().enumerate() {
        chart.draw_series(std::iter::once(Rectangle::new(
            [(rank as f64 + 0.1, 0.0), (rank as f64 + 0.9, count as f64)],
            GREEN.filled(),
        )))?;
    }

    root.present()?;
    println!("Item frequency chart saved to: {}", output_path);

    Ok(())
}

/// Print aggregate statistics and the strongest rules to the console.
pub fn print_rule_statistics(analysis: &BasketAnalysis, top_n: usize) -> crate::Result<()> {
    let summary = analysis.summary()?;
    let universe = analysis.data().universe();

    println!("\n=== Analysis Summary ===");
    println!("Transactions: {}", summary.transaction_count);
    println!("Distinct products: {}", summary.universe_size);
    println!("Frequent itemsets: {}", summary.itemset_count);
    println!("Association rules: {}", summary.rule_count);
    println!(
        "Mean support/confidence/lift: {:.3} / {:.3} / {:.3}",
        summary.mean_support, summary.mean_confidence, summary.mean_lift
    );
    println!(
        "Strongest rule: {} (lift {:.2}, confidence {:.2})",
        summary.top_rule, summary.top_rule_lift, summary.top_rule_confidence
    );

    println!("\nTop rules:");
    println!("  Antecedent -> Consequent | Support | Confidence | Lift");
    println!("  -------------------------|---------|------------|-----");
    for rule in analysis.top_rules(top_n) {
        println!(
            "  {} -> {} | {:.3} | {:.3} | {:.2}",
            rule.antecedent_label(universe),
            rule.consequent_label(universe),
            rule.support,
            rule.confidence,
            rule.lift
        );
    }

    Ok(())
}

/// Generate a comprehensive visualization report
pub fn generate_visualization_report(
    analysis: &BasketAnalysis,
    base_output_path: &str,
    top_n: usize,
) -> crate::Result<()> {
    create_rule_scatter(analysis.rules(), base_output_path, None)?;

    let top_rules_path = base_output_path.replace(".png", "_top_rules.png");
    create_top_rules_chart(analysis.rules(), &top_rules_path, top_n)?;

    let items_path = base_output_path.replace(".png", "_items.png");
    create_item_frequency_chart(analysis.data(), &items_path, top_n)?;

    print_rule_statistics(analysis, top_n)?;

    Ok(())
}
