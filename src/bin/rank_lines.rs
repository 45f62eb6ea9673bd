use edgel_lines::config::rank_lines;
use edgel_lines::field::io::{load_grid_json, write_json_file};
use edgel_lines::field::GridView;
use edgel_lines::EdgelPipeline;
use std::env;
use std::path::Path;

fn main() {
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let config_path = env::args().nth(1).ok_or_else(usage)?;
    let config = rank_lines::load_config(Path::new(&config_path))?;

    let field = load_grid_json(&config.input)?;
    if field.is_empty() {
        return Err(format!("Grid {} is empty", config.input.display()));
    }

    let pipeline = EdgelPipeline::new(config.params);
    let mut report = pipeline.run(&field, &config.thresholds);
    if let Some(k) = config.output.top_k {
        report.lines.truncate(k);
    }

    write_json_file(&config.output.report_json, &report)?;

    let edgels = &report.trace.edgels;
    println!(
        "{}x{} field: {} edgels, {} saddles ({} dropped), {:.3} ms",
        field.rows(),
        field.cols(),
        edgels.edgels,
        edgels.saddle_cells,
        edgels.dropped_saddles.len(),
        report.trace.timings.total_ms
    );
    match report.best() {
        Some(best) => println!(
            "Best line: theta={:.2}° cost={:.3} edgels={}",
            best.fit.theta.to_degrees(),
            best.cost.cost_final,
            best.fit.num_edgels
        ),
        None => println!("No lines found"),
    }
    println!(
        "Saved {} ranked lines to {}",
        report.lines.len(),
        config.output.report_json.display()
    );

    Ok(())
}

fn usage() -> String {
    "Usage: rank_lines <config.json>".to_string()
}
