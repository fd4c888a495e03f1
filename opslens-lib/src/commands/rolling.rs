use super::Host;
use super::common::{CommonArgs, Session};
use crate::Result;
use crate::analytics::rolling_average;
use crate::reports::Report;
use chrono::Utc;
use clap::Parser;

#[derive(Parser, Debug)]
pub struct RollingArgs {
    /// Host whose runs are averaged
    #[arg(long, value_name = "HOST")]
    pub host: String,

    /// Metric name, such as `health_score`
    #[arg(long, value_name = "KEY")]
    pub key: String,

    /// Number of days to cover (1..=365, default from the configuration)
    #[arg(long, value_name = "N", value_parser = clap::value_parser!(u32).range(1..=365))]
    pub days: Option<u32>,

    #[command(flatten)]
    pub common: CommonArgs,
}

pub fn show_rolling<H: Host>(host: &mut H, args: &RollingArgs) -> Result<()> {
    let mut session = Session::new(host, &args.common)?;

    let days = args.days.unwrap_or(session.config.default_rolling_days);
    let points = rolling_average(&session.store, &args.host, &args.key, days, Utc::now())?;
    session.report(&Report::Rolling {
        host: &args.host,
        key: &args.key,
        points: &points,
    })
}
