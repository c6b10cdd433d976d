//! Compare sorting strategies across input sizes.
//!
//! Run with: `cargo run --release --example sorting`

use pacebench::generate_json_report;
use pacebench::prelude::*;

fn insertion_sort(data: &mut Vec<u64>) {
    for i in 1..data.len() {
        let mut j = i;
        while j > 0 && data[j - 1] > data[j] {
            data.swap(j - 1, j);
            j -= 1;
        }
    }
}

fn make_input(size: usize) -> Vec<u64> {
    // Deterministic pseudo-random input so every candidate sorts the same data
    let mut state = 0x9e37_79b9_7f4a_7c15u64;
    (0..size)
        .map(|_| {
            state = state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
            state >> 33
        })
        .collect()
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter("pacebench=info")
        .init();

    let mut suite = Suite::new("sorting");
    suite
        .settings(AccuracySettings::fast())
        .observer(ConsoleProgress::new(6))
        .param("size", [100usize, 1_000])
        .register("std_stable", |p| {
            let mut data = make_input(p.int("size").unwrap_or(0) as usize);
            data.sort();
            data
        })
        .register("std_unstable", |p| {
            let mut data = make_input(p.int("size").unwrap_or(0) as usize);
            data.sort_unstable();
            data
        })
        .register("insertion", |p| {
            let mut data = make_input(p.int("size").unwrap_or(0) as usize);
            insertion_sort(&mut data);
            data
        });

    let results = suite.run()?;
    println!("{}", results.render());

    let json = generate_json_report(&results.to_report())?;
    std::fs::create_dir_all("target/pacebench")?;
    std::fs::write("target/pacebench/sorting.json", json)?;
    eprintln!("JSON report written to target/pacebench/sorting.json");

    Ok(())
}
