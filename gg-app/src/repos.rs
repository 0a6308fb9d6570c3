use crate::args::ReposArgs;
use crate::table::TableWriter;
use anyhow::{Context, Result};
use futures_util::{pin_mut, TryStreamExt};
use gg_lib::{list_repositories, load_token, GitHubClient, ListOptions, RepositoryDirectory};
use log::debug;
use std::io::{stdout, Write};

pub async fn run(api_url: &str, args: &ReposArgs) -> Result<()> {
    let options = args.list_options();
    debug!("listing repositories with {:?}", options);

    let client = make_client(api_url).context("Cannot create GitHub client")?;
    write_repos(&options, &client, stdout()).await
}

fn make_client(api_url: &str) -> Result<GitHubClient> {
    let token = load_token()?;
    Ok(GitHubClient::new(api_url, &token)?)
}

/// Streams the listing into an aligned table on `out`.
///
/// Rows gathered before an error are still written.
pub async fn write_repos<D, W>(options: &ListOptions, directory: &D, out: W) -> Result<()>
where
    D: RepositoryDirectory + ?Sized,
    W: Write,
{
    let mut table = TableWriter::new(out);
    let entries = list_repositories(options, directory);
    pin_mut!(entries);
    while let Some(entry) = entries.try_next().await? {
        table.push(entry);
    }
    table.finish()?;
    Ok(())
}
