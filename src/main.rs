use activity_indicator::settings::{Args, DemoSettings};
use activity_indicator::{ActivityTracker, LogIndicator};
use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Default)]
struct Observed {
    events: u64,
    peak: u64,
}

async fn run_workers(tracker: &ActivityTracker, settings: DemoSettings) -> anyhow::Result<()> {
    let mut workers = tokio::task::JoinSet::new();
    for worker in 0..settings.workers {
        let tracker = tracker.clone();
        workers.spawn(async move {
            for round in 0..settings.rounds {
                let _activity = tracker.guard();
                tracing::trace!(worker, round, "activity open");
                tokio::time::sleep(settings.hold).await;
            }
        });
    }
    while let Some(res) = workers.join_next().await {
        res.context("worker task failed")?;
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    let settings = DemoSettings::try_from(args)?;
    tracing::info!(?settings, "starting");

    let rt = tokio::runtime::Runtime::new().context("cannot start tokio runtime")?;
    let tracker = ActivityTracker::new(LogIndicator::default());
    let (subscription, events) = tracker.subscribe();

    let observer = rt.spawn(async move {
        let mut observed = Observed::default();
        while let Ok(event) = events.recv().await {
            observed.events += 1;
            observed.peak = observed.peak.max(event.count);
        }
        observed
    });

    rt.block_on(async {
        run_workers(&tracker, settings).await?;
        for _ in 0..settings.extra_ends {
            tracker.end();
        }
        tracker.idle().await;
        anyhow::Ok(())
    })?;

    tracker.unsubscribe(subscription);
    let observed = rt.block_on(observer).context("observer task failed")?;

    println!(
        "events: {}, peak: {}, final count: {}, visible: {}, unbalanced ends: {}",
        observed.events,
        observed.peak,
        tracker.count(),
        tracker.is_visible(),
        tracker.unbalanced_ends()
    );
    Ok(())
}
