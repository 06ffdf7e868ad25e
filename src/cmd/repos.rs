// gittty: Git lifeline for the TTY
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Repos command implementation for gittty.

use anyhow::Context;
use tracing::info;

use crate::cli::repos::ReposArgs;
use crate::config::Config;
use crate::error::Result;
use crate::hosting::RemoteRepository;

/// Main handler for the repos command.
///
/// # Errors
///
/// Returns an error if the service cannot be reached or refuses the token.
pub async fn run_repos_command(args: &ReposArgs, config: &Config) -> Result<()> {
    let client = config.hosting_client(args.service);
    if !client.has_token() {
        info!(service = %args.service, "no token configured, asking anonymously");
    }

    if args.whoami {
        let user = client
            .current_user()
            .await
            .with_context(|| format!("could not reach {}", args.service))?;
        match user.name {
            Some(name) => println!("{} ({name})", user.login),
            None => println!("{}", user.login),
        }
        return Ok(());
    }

    let limit = args.limit.unwrap_or(config.hosting.per_page);
    let repos = client
        .repositories(limit)
        .await
        .with_context(|| format!("could not list repositories on {}", args.service))?;

    if repos.is_empty() {
        println!("No repositories found");
    }
    for line in format_repositories(&repos, args.ssh) {
        println!("{line}");
    }
    Ok(())
}

/// One line per repository: name, visibility and the URL to pass to `clone`.
#[must_use]
pub fn format_repositories(repos: &[RemoteRepository], ssh: bool) -> Vec<String> {
    let width = repos.iter().map(|r| r.full_name.len()).max().unwrap_or(0);
    repos
        .iter()
        .map(|r| {
            let url = if ssh { &r.ssh_url } else { &r.https_url };
            let visibility = if r.private { "private" } else { "public" };
            format!("{:<width$}  {visibility:<7}  {url}", r.full_name)
        })
        .collect()
}
