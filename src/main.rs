use color_eyre::eyre::{eyre, Result};
use database::{RosterGenerator, RosterLoader};
use env_logger::Env;
use itertools::Itertools;
use lineup_core::utils::TimeEstimation;
use lineup_core::{LineupGrid, LineupService, PlayerStats, RotationConfig};
use log::info;
use std::env;

fn main() -> Result<()> {
    color_eyre::install()?;

    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let (rosters, estimated) = TimeEstimation::estimate(|| match env::var("ROSTER") {
        Ok(path) => RosterLoader::load_from_file(path),
        Err(_) => RosterLoader::load(),
    });
    let rosters = rosters.map_err(|e| eyre!(e))?;

    info!("rosters loaded: {} ms", estimated);

    let team = env::var("TEAM").unwrap_or_else(|_| String::from("demo"));
    let entity = RosterLoader::find(&rosters, &team).ok_or_else(|| eyre!("unknown team: {}", team))?;
    let (roster, availability) = RosterGenerator::generate(entity).map_err(|e| eyre!(e))?;

    let mut config = RotationConfig::default();
    if let Ok(periods) = env::var("PERIODS") {
        config = config.with_periods(periods.parse()?);
    }
    if let Ok(quota) = env::var("QUOTA") {
        config = config.with_sitting_quota(quota.parse()?);
    }

    let mut service = LineupService::new(roster, availability, config);

    let (report, estimated) = TimeEstimation::estimate(|| service.auto_fill_all());
    let report = report?;

    info!("lineup built: {} ms", estimated);

    print_grid(service.grid());
    print_stats(&service.player_stats());

    for violation in &report.validation.violations {
        println!("! {}", violation);
    }
    println!(
        "preferred positions: {:.1}%",
        report.validation.preferred_compliance()
    );

    Ok(())
}

fn print_grid(grid: &LineupGrid) {
    for (period, assignment) in grid.periods() {
        let field = assignment
            .positions()
            .iter()
            .map(|(position, player)| match player {
                Some(player) => format!("{}={}", position, player),
                None => format!("{}=-", position),
            })
            .join(" ");

        println!(
            "P{} {} | bench: {} | jersey: {}",
            period,
            field,
            assignment.bench().iter().join(", "),
            assignment.jersey().iter().join(", ")
        );
    }
}

fn print_stats(stats: &[PlayerStats]) {
    for entry in stats {
        println!(
            "{:<10} {:>5.1} min  sits {:<8} {}",
            entry.player,
            entry.total_minutes,
            entry.sit_periods().iter().join(","),
            entry
                .positions
                .iter()
                .map(|(position, count)| format!("{}x{}", position, count))
                .join(" ")
        );
    }
}
