use std::env;
use std::process::exit;

use svgpath_normalize::{parse_with_options, Options};

fn main() {
    // Logging
    env_logger::init();

    // Argument parsing
    let args: Vec<_> = env::args().collect();
    let options = match args.len() {
        2 => Options::new(),
        3 => match args[2].parse::<u32>() {
            Ok(steps) => Options::new().arc_steps(steps),
            Err(_) => {
                println!("Arc steps must be a positive integer, got {}", args[2]);
                exit(1);
            }
        },
        _ => {
            println!("Usage: {} <path data> [arc steps]", args[0]);
            exit(1);
        }
    };

    // Normalize
    let path = parse_with_options(&args[1], &options).unwrap_or_else(|e| {
        println!("Error: {}", e);
        exit(2);
    });

    // Print data
    println!("Found {} commands.", path.len());
    for command in &path {
        println!("- {:?}", command);
    }
}
