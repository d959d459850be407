use std::time::Duration;

use clap::Parser;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SettingsError {
    #[error("--workers must be at least 1")]
    NoWorkers,
    #[error("--rounds must be at least 1")]
    NoRounds,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct DemoSettings {
    pub workers: usize,
    pub rounds: usize,
    pub hold: Duration,
    pub extra_ends: usize,
}

impl Default for DemoSettings {
    fn default() -> Self {
        Self {
            workers: 8,
            rounds: 16,
            hold: Duration::from_millis(2),
            extra_ends: 0,
        }
    }
}

#[derive(Parser, Debug)]
#[command(author, about = "Drive an activity tracker from concurrent workers", long_about = None)]
pub struct Args {
    #[arg(long, short, default_value_t = 8, help = "number of concurrent workers")]
    pub workers: usize,
    #[arg(long, short, default_value_t = 16, help = "activities started by each worker")]
    pub rounds: usize,
    #[arg(long = "hold-ms", default_value_t = 2, help = "how long each activity stays open")]
    pub hold_ms: u64,
    #[arg(long = "extra-ends", default_value_t = 0, help = "unbalanced end() calls issued afterwards")]
    pub extra_ends: usize,
}

impl TryFrom<Args> for DemoSettings {
    type Error = SettingsError;

    fn try_from(args: Args) -> Result<Self, Self::Error> {
        if args.workers == 0 {
            return Err(SettingsError::NoWorkers);
        }
        if args.rounds == 0 {
            return Err(SettingsError::NoRounds);
        }
        Ok(Self {
            workers: args.workers,
            rounds: args.rounds,
            hold: Duration::from_millis(args.hold_ms),
            extra_ends: args.extra_ends,
        })
    }
}
