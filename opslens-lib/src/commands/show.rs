use super::Host;
use super::common::{CommonArgs, Session};
use crate::Result;
use crate::reports::Report;
use crate::runs::RunId;
use crate::storage::Store;
use clap::Parser;
use ohno::IntoAppError;

#[derive(Parser, Debug)]
pub struct ShowArgs {
    /// Id of the run to show
    #[arg(value_name = "RUN_ID")]
    pub run_id: RunId,

    #[command(flatten)]
    pub common: CommonArgs,
}

pub fn show_run<H: Host>(host: &mut H, args: &ShowArgs) -> Result<()> {
    let mut session = Session::new(host, &args.common)?;

    let run = session.store.get_run(args.run_id)?.into_app_err("run not found")?;
    let metrics = session.store.get_metrics(args.run_id)?;
    session.report(&Report::RunDetail { run: &run, metrics: &metrics })
}
