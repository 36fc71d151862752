//! ScopeTime Runtime
//!
//! Minimal binary that links the instrumentation crate and runs a nested
//! demo workload, first against the default stderr sinks and then routed
//! into report files

use std::thread::sleep;
use std::time::Duration;

use anyhow::Result;
use scopetime::{time_scope, TimingSettings};

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    tracing::info!("ScopeTime demo starting");

    tracing::info!("Pass 1: reports to stderr");
    run_workload();

    tracing::info!("Pass 2: reports to demo.log / demo.csv");
    let settings = TimingSettings {
        tree: true,
        table: true,
        file_basename: Some("demo".to_string()),
    };
    {
        let _sinks = settings.apply();
        run_workload();
    }

    tracing::info!("Done; report files stay next to the binary");
    Ok(())
}

fn run_workload() {
    time_scope!("workload");
    for shard in 0..3 {
        load_shard(shard);
    }
    merge_shards();
}

fn load_shard(shard: u32) {
    time_scope!(format!("load_shard({})", shard), "load");
    sleep(Duration::from_millis(2));
}

fn merge_shards() {
    time_scope!("merge");
    sleep(Duration::from_millis(1));
}
