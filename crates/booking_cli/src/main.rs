//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `booking_core` linkage.
//! - With a database path argument, print per-status booking counts of that
//!   store so a file can be inspected without a UI.

use booking_core::{BookingRepository, SqliteBlobStore, StoreBookingRepository};
use std::process::ExitCode;

fn main() -> ExitCode {
    println!("booking_core ping={}", booking_core::ping());
    println!("booking_core version={}", booking_core::core_version());

    let Some(db_path) = std::env::args().nth(1) else {
        return ExitCode::SUCCESS;
    };

    let store = match SqliteBlobStore::open(&db_path) {
        Ok(store) => store,
        Err(err) => {
            eprintln!("open {db_path} failed: {err}");
            return ExitCode::FAILURE;
        }
    };
    match StoreBookingRepository::new(&store).count_bookings_by_status() {
        Ok(counts) => {
            println!(
                "bookings total={} pending={} confirmed={} cancelled={}",
                counts.total, counts.pending, counts.confirmed, counts.cancelled
            );
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("count failed: {err}");
            ExitCode::FAILURE
        }
    }
}
