//! Projects command implementation.

use crate::cli::ProjectsArgs;
use crate::error::Result;
use crate::output::Formatter;
use sigclust_domain::CountSource;
use sigclust_store::TsvCountStore;

/// Execute the projects command.
pub async fn execute_projects(args: ProjectsArgs, formatter: &Formatter) -> Result<()> {
    let store = TsvCountStore::open(&args.data_dir)?;
    let projects = store.projects()?;
    println!("{}", formatter.format_projects(&projects));
    Ok(())
}
