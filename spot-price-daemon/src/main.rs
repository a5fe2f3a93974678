use anyhow::Context;
use chrono::{Days, Local};
use log::{error, info, warn, LevelFilter};
use spot_price_lib::prices::region::PriceRegion;
use spot_price_loader::{Config, PriceStore, RelayClient};
use std::{error::Error, sync::Arc};
use syslog::{BasicLogger, Facility, Formatter3164};
use tokio_cron_scheduler::{Job, JobScheduler};

const COMPARE_REGIONS_VAR: &str = "SPOT_PRICE_COMPARE_REGIONS";
const QUESTION_VAR: &str = "SPOT_PRICE_QUESTION";

// Minute 1 of every hour
const REFRESH_SCHEDULE: &str = "0 1 * * * *";

#[tokio::main()]
async fn main() -> Result<(), Box<dyn Error>> {
    init_logging();

    println!(
        "Starting Spot Price Daemon (spotpriced) v{}",
        env!("CARGO_PKG_VERSION")
    );

    // Fail early on a broken configuration
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load config: {e}");
            std::process::exit(1);
        }
    };
    let region = config.region;

    let store = Arc::new(PriceStore::new(&config).context("Failed to create price store")?);
    let relay = RelayClient::new(&config).context("Failed to create relay client")?;

    refresh_and_report(&store, region).await;
    compare_regions(&store, region).await?;

    if let Some(question) = std::env::var(QUESTION_VAR).ok().filter(|q| !q.trim().is_empty()) {
        match relay.send_request(&store, &question).await {
            Ok(reply) => info!("Relay reply: {reply}"),
            Err(e) => error!("Failed to ask the relay: {e}"),
        }
    }

    let sched = JobScheduler::new().await?;

    let job_store = store.clone();
    let mut refresh_job = Job::new_async(REFRESH_SCHEDULE, move |_, _| {
        let store = job_store.clone();
        Box::pin(async move {
            refresh_and_report(&store, region).await;
        })
    })?;

    refresh_job
        .on_stop_notification_add(
            &sched,
            Box::new(|job_id, notification_id, type_of_notification| {
                Box::pin(async move {
                    info!(
                        "Job {:?} was completed, notification {:?} ran ({:?})",
                        job_id, notification_id, type_of_notification
                    );
                })
            }),
        )
        .await?;

    sched.add(refresh_job).await?;
    sched.start().await?;

    tokio::signal::ctrl_c()
        .await
        .context("Failed to listen for shutdown signal")?;
    info!("Shutting down");
    Ok(())
}

fn syslog_formatter() -> Formatter3164 {
    Formatter3164 {
        facility: Facility::LOG_DAEMON,
        hostname: None,
        process: "spotpriced".into(),
        pid: 0,
    }
}

/// Syslog unless `RUST_LOG` asks for console output
fn use_syslog(rust_log: Option<&str>) -> bool {
    rust_log.map_or(true, |filter| filter.trim().is_empty())
}

fn init_logging() {
    if !use_syslog(std::env::var("RUST_LOG").ok().as_deref()) {
        env_logger::init();
        return;
    }

    match syslog::unix(syslog_formatter()) {
        Ok(logger) => {
            let installed = log::set_boxed_logger(Box::new(BasicLogger::new(logger)))
                .map(|()| log::set_max_level(LevelFilter::Info));
            if let Err(e) = installed {
                eprintln!("Failed to install syslog logger: {e}");
            }
        }
        Err(e) => {
            env_logger::init();
            warn!("Syslog is not available, logging to stderr: {e}");
        }
    }
}

async fn refresh_and_report(store: &PriceStore, region: PriceRegion) {
    let today = Local::now().date_naive();
    store.fetch_prices(today, region).await;

    if let Some(e) = store.error() {
        error!("Price refresh for {region} failed: {e}");
        return;
    }

    info!(
        "{region} {today}: average {:.4} NOK/kWh, highest {:.4} NOK/kWh",
        store.average_price(),
        store.highest_price()
    );
    match store.current_price() {
        Some(price) => info!(
            "Current price in {region}: {:.4} NOK/kWh ({} - {})",
            price.nok_per_kwh,
            price.time_start.format("%H:%M"),
            price.time_end.format("%H:%M")
        ),
        None => warn!("No price for the current hour in {region}"),
    }
}

/// Saves yesterday in the home region and today in every extra region as comparisons
async fn compare_regions(store: &PriceStore, home: PriceRegion) -> anyhow::Result<()> {
    let today = Local::now().date_naive();
    let extra_regions = match std::env::var(COMPARE_REGIONS_VAR) {
        Ok(regions) => regions
            .split(',')
            .filter(|code| !code.trim().is_empty())
            .map(|code| code.parse::<PriceRegion>())
            .collect::<Result<Vec<_>, _>>()
            .with_context(|| format!("Invalid {COMPARE_REGIONS_VAR}"))?,
        Err(_) => Vec::new(),
    };

    let mut wanted = Vec::with_capacity(extra_regions.len() + 1);
    if let Some(yesterday) = today.checked_sub_days(Days::new(1)) {
        wanted.push((yesterday, home, format!("{home} yesterday")));
    }
    wanted.extend(
        extra_regions
            .into_iter()
            .filter(|region| *region != home)
            .map(|region| (today, region, format!("{region} today"))),
    );

    for (date, region, label) in wanted {
        if store.add_comparison(date, region, label).await.is_none() {
            warn!("Skipping comparison for {region} on {date}");
        }
    }

    for entry in store.comparisons() {
        info!(
            "Comparison {} ({}): average {:.4} NOK/kWh, highest {:.4} NOK/kWh",
            entry.id,
            entry.label,
            entry.average_price(),
            entry.highest_price()
        );
    }
    Ok(())
}
