//! Async pipeline demo: several producer threads hand lines to the
//! background writer, and shutdown drains everything that was queued.
//!
//! Run with: cargo run --example async_logging

use logentia::{log, set_thread_name, Logger, LoggerConfig};
use std::sync::Arc;
use std::thread;
use std::time::Instant;

const PRODUCERS: usize = 4;
const PER_PRODUCER: usize = 1000;

fn main() {
    let logger = Arc::new(Logger::new(
        LoggerConfig::new()
            .with_max_level(5)
            .with_topics(false)
            .with_async_mode(true)
            .with_project_name("async_demo"),
    ));

    let start = Instant::now();
    let mut handles = Vec::new();
    for id in 0..PRODUCERS {
        let logger = Arc::clone(&logger);
        handles.push(thread::spawn(move || {
            set_thread_name(format!("producer-{id}"));
            for seq in 0..PER_PRODUCER {
                log!(logger, "LOAD", 5, "producer {} message {}", id, seq);
            }
        }));
    }
    for handle in handles {
        handle.join().unwrap();
    }
    let queued = start.elapsed();

    // Blocks until every queued line has reached the sinks.
    logger.shutdown();
    let drained = start.elapsed();

    println!(
        "queued {} lines in {queued:?}, fully drained in {drained:?}",
        PRODUCERS * PER_PRODUCER
    );
}
