use super::Host;
use super::common::{CommonArgs, Session};
use crate::Result;
use crate::reports::Report;
use crate::storage::Store;
use clap::Parser;

#[derive(Parser, Debug)]
pub struct RunsArgs {
    /// Maximum number of runs to list (1..=200, default from the configuration)
    #[arg(long, value_name = "N", value_parser = clap::builder::RangedU64ValueParser::<usize>::new().range(1..=200))]
    pub limit: Option<usize>,

    #[command(flatten)]
    pub common: CommonArgs,
}

pub fn list_runs<H: Host>(host: &mut H, args: &RunsArgs) -> Result<()> {
    let mut session = Session::new(host, &args.common)?;

    let limit = args.limit.unwrap_or(session.config.list_limit);
    let runs = session.store.list_runs(limit)?;
    session.report(&Report::Runs(&runs))
}
