use super::Host;
use super::common::{CommonArgs, Session};
use crate::Result;
use crate::analytics::diff_runs;
use crate::reports::Report;
use crate::runs::RunId;
use clap::Parser;

#[derive(Parser, Debug)]
pub struct DiffArgs {
    /// Baseline run
    #[arg(value_name = "RUN_A")]
    pub run_a: RunId,

    /// Run compared against the baseline
    #[arg(value_name = "RUN_B")]
    pub run_b: RunId,

    #[command(flatten)]
    pub common: CommonArgs,
}

pub fn diff_two_runs<H: Host>(host: &mut H, args: &DiffArgs) -> Result<()> {
    let mut session = Session::new(host, &args.common)?;

    let deltas = diff_runs(&session.store, args.run_a, args.run_b)?;
    session.report(&Report::Diff {
        run_a: args.run_a,
        run_b: args.run_b,
        deltas: &deltas,
    })
}
