//! Basic usage of the logging engine: filtering, timestamps, call-site
//! detail and title+body blocks.
//!
//! Run with: cargo run --example basic_usage

use logentia::{detailed_log, log, time_log, Logger, LoggerConfig};

fn main() {
    let logger = Logger::new(
        LoggerConfig::new()
            .with_max_level(3)
            .with_file(false)
            .with_topic_list(["INIT", "BLE", "SENSOR"]),
    );

    // Plain lines at increasing verbosity. Level 4 and 5 are dropped by
    // the max-level filter above.
    log!(logger, "INIT", 1, "boot complete");
    log!(logger, "BLE", 2, "advertising as {}", "node-07");
    log!(logger, "BLE", 3, "scan window opened for {}s", 30);
    log!(logger, "BLE", 4, "raw advertisement dump follows");
    log!(logger, "BLE", 5, "this never shows either");

    // Topic filtering: NETWORK is not on the list.
    log!(logger, "NETWORK", 1, "silently discarded");

    // Timestamped line.
    time_log!(logger, "SENSOR", 2, "temperature {:.1}C", 21.4);

    // Explicit call-site detail, regardless of the detail level.
    detailed_log!(logger, "SENSOR", 3, "calibration pass {}", 2);

    // Title plus indented body.
    logger.log_block(
        "Upload complete",
        "chunks: 12\nbytes: 49152\nretries: 0",
        "SENSOR",
        2,
    );

    logger.shutdown();
}
