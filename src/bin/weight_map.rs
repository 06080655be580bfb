//! Prints a saved weight grid as an ASCII heat map with a few totals

use std::env;
use walkgrid::output::{heat_map, read_weight_file};

fn main() -> anyhow::Result<()> {
    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        eprintln!("Usage: {} <weights.txt>", args[0]);
        eprintln!("Renders the per-cell visit weights written at the end of a run");
        std::process::exit(1);
    }

    let filename = &args[1];
    let grid = read_weight_file(filename)?;

    println!("=== Weight Map: {} ({}x{}) ===\n", filename, grid.size, grid.size);
    print!("{}", heat_map(&grid));

    println!("\n=== Summary ===");
    println!("Total weight: {}", grid.total_weight());
    println!("Max weight: {}", grid.max_weight());
    println!(
        "Visited cells: {} of {}",
        grid.visited_cells(),
        grid.size * grid.size
    );

    Ok(())
}
