use std::env;
use std::path::Path;
use trait_annotator::config::detect;
use trait_annotator::image::io::{load_grayscale_f32, write_json_file};
use trait_annotator::pipeline::run_detection;

fn main() {
    env_logger::init();
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let config_path = env::args().nth(1).ok_or_else(usage)?;
    let config = detect::load_config(Path::new(&config_path))?;

    let image = load_grayscale_f32(&config.input)?;
    let report = run_detection(&image, &config.params()).map_err(|e| e.to_string())?;
    write_json_file(&config.output.result_json, &report)?;

    println!(
        "Detected {} line(s) along [{}] deg in {}x{} image ({:.2} ms)",
        report.traits.len(),
        report
            .orientation
            .orientations_deg
            .iter()
            .map(|d| format!("{d:.1}"))
            .collect::<Vec<_>>()
            .join(", "),
        report.input.width,
        report.input.height,
        report.timings.total_ms
    );
    for column in &report.projection.columns {
        println!(
            "  {:>6.1} deg: {} line(s) at peaks {:?}",
            column.orientation_deg, column.line_count, column.peaks
        );
    }
    println!("Saved report to {}", config.output.result_json.display());
    Ok(())
}

fn usage() -> String {
    "Usage: trait_detect_demo <config.json>".to_string()
}
