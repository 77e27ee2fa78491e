//! Ordered Waitlist - Binary Entry Point
//!
//! Runs the demo workload with default settings and prints the list
//! before and after the concurrent phase. Set `RUST_LOG=debug` for
//! per-operation logging.

use log::LevelFilter;
use simple_logger::SimpleLogger;

use ordered_waitlist::{demo, DemoConfig};

fn format_values(values: &[i64]) -> String {
    values
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(" -> ")
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    SimpleLogger::new()
        .with_level(LevelFilter::Info)
        .env()
        .init()?;

    let config = DemoConfig::default();

    println!("===========================================");
    println!("  Ordered Waitlist - demo");
    println!("===========================================");
    println!();
    println!("Workers per phase: {}", config.threads);
    println!("Remove positions:  0..{}", config.max_position);
    println!("Late values:       0..{}", config.value_range);
    println!();

    let report = demo::run(&config)?;

    println!("After first insert phase:");
    println!("  {}", format_values(&report.initial));
    println!();
    println!("Removers:");
    for (position, removed) in report.positions.iter().zip(&report.removed) {
        match removed {
            Some(value) => println!("  position {} -> removed {}", position, value),
            None => println!("  position {} -> not found", position),
        }
    }
    println!("Late inserts: {:?}", report.late_values);
    println!();
    println!("After concurrent phase:");
    println!("  {}", format_values(&report.remaining));
    println!();

    println!(
        "Program taken {:.3}ms",
        report.elapsed.as_secs_f64() * 1000.0
    );

    Ok(())
}
