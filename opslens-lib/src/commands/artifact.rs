use super::Host;
use super::common::{CommonArgs, Session};
use crate::Result;
use crate::reports::Report;
use crate::runs::RunId;
use crate::storage::Store;
use clap::Parser;
use ohno::IntoAppError;

#[derive(Parser, Debug)]
pub struct ArtifactArgs {
    /// Id of the run the artifact belongs to
    #[arg(value_name = "RUN_ID")]
    pub run_id: RunId,

    /// Artifact name, such as `df.txt` or `log_tail.txt`
    #[arg(value_name = "NAME")]
    pub name: String,

    #[command(flatten)]
    pub common: CommonArgs,
}

pub fn show_artifact<H: Host>(host: &mut H, args: &ArtifactArgs) -> Result<()> {
    let mut session = Session::new(host, &args.common)?;

    let content = session
        .store
        .get_artifact(args.run_id, &args.name)?
        .into_app_err("artifact not found")?;
    session.report(&Report::Artifact {
        name: &args.name,
        content: &content,
    })
}
