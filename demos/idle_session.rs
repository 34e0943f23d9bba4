// ============================================================================
// Idle Session Example
// ============================================================================

use chrono::Utc;
use idle_economy::prelude::*;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{info, Level};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt().with_max_level(Level::DEBUG).init();

    println!("=== Idle Economy Example ===\n");

    let path = std::env::temp_dir().join("idle_session_save.json");
    let _ = std::fs::remove_file(&path);
    let clock = ManualClock::new(Utc::now());

    // First session: click, buy, let it tick for a minute
    let mut game = EconomyBuilder::new()
        .with_persistence(FileStore::new(&path))
        .with_event_handler(Arc::new(LoggingEventHandler))
        .with_clock(Arc::new(clock.clone()))
        .build_game()?;

    println!("Clicking 60 times...");
    for _ in 0..60 {
        game.click();
    }
    println!("Balance: {}", game.balance_display(false));

    for name in ["sword", "shield"] {
        let price = game.economy().price_for_n_units(name, 1);
        match game.purchase(name, 1) {
            Ok(()) => println!("Bought 1 {} for {}", name, price.to_display_string()),
            Err(e) => println!("Could not buy {}: {}", name, e),
        }
    }
    println!(
        "Production: {}/s",
        game.economy().production_rate().to_display_string()
    );

    let t0 = Instant::now();
    game.start(t0);
    // A 250 ms stall between frames still yields every tick
    let mut now = t0;
    for _ in 0..240 {
        now += Duration::from_millis(250);
        clock.advance_millis(250);
        game.frame(now);
    }
    game.stop();

    info!(
        "Applied {} ticks, balance {}",
        game.economy().ticks_applied(),
        game.balance_display(false)
    );
    drop(game);

    // Second session after an hour away
    clock.advance_millis(60 * 60 * 1000);
    let game = EconomyBuilder::new()
        .with_persistence(FileStore::new(&path))
        .with_clock(Arc::new(clock.clone()))
        .build_game()?;

    println!("\n=== After One Hour Offline ===");
    println!("Balance: {}", game.balance_display(false));
    println!("Scientific: {}", game.balance_display(true));

    println!("\nNext unit prices:");
    for (id, item) in game.economy().catalog().iter().take(4) {
        let owned = game.economy().owned_count_by_id(id);
        if let Some(price) = game.economy().price_for_nth_unit_by_id(id, owned) {
            println!(
                "  {} {:<8} owned {:>3}  next {}",
                item.icon,
                item.name,
                owned,
                price.to_scientific_string()
            );
        }
    }

    std::fs::remove_file(&path)?;
    Ok(())
}
