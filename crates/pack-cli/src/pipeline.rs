//! The archive build pipeline
//!
//! Strictly sequential and fail-fast: every validation and selection
//! step runs before the output file is created, so no failure leaves
//! a partial archive behind.

use std::fs;

use tracing::debug;

use pack_archive::{ARCHIVE_EXTENSION, ArchiveWriter};
use pack_git::Repo;
use pack_select::{ExplicitName, Selection, parse_manifest, resolve};

use crate::cli::Cli;
use crate::error::{CliError, Result};

pub fn run(cli: &Cli) -> Result<()> {
    validate_selection_sources(cli)?;

    let repo = match &cli.repo {
        Some(path) => Repo::open(path)?,
        None => Repo::discover(std::env::current_dir()?)?,
    };
    let commit = repo.resolve_commit(&cli.commit)?;
    debug!(refspec = %cli.commit, commit = %commit, "resolved target commit");

    let selection = build_selection(cli, &repo, commit)?;

    let entries = repo.list_tracked_files(commit)?;
    let paths: Vec<&str> = entries.iter().map(|entry| entry.path.as_str()).collect();
    let included = resolve(&selection, &paths)?;

    let archive_name = format!("{}-{}.{}", cli.archive_base, cli.commit, ARCHIVE_EXTENSION);
    let root = archive_root(&cli.archive_base);

    let mut writer = ArchiveWriter::create(archive_name.as_str(), cli.force)?;
    for idx in included {
        let entry = &entries[idx];
        let data = repo.read_blob(entry.blob)?;
        let mtime = repo.timestamp_for_path(&entry.path, commit)?;
        writer.append_file(
            &format!("{root}/{}", entry.path),
            entry.mode.permission_bits(),
            mtime,
            &data,
        )?;
    }
    writer.finish()?;

    println!("{archive_name}");
    Ok(())
}

/// Exactly one selection source: a working-copy manifest, a
/// commit-versioned manifest, or positional filespecs.
fn validate_selection_sources(cli: &Cli) -> Result<()> {
    let sources = [
        cli.manifest.is_some(),
        cli.commit_manifest.is_some(),
        !cli.filespecs.is_empty(),
    ];
    match sources.iter().filter(|present| **present).count() {
        0 => Err(CliError::user(
            "nothing to select: provide --manifest, --commit-manifest, or filespecs",
        )),
        1 => Ok(()),
        _ => Err(CliError::user(
            "conflicting selection sources: use only one of --manifest, --commit-manifest, or filespecs",
        )),
    }
}

fn build_selection(cli: &Cli, repo: &Repo, commit: pack_git::Oid) -> Result<Selection> {
    if let Some(path) = &cli.manifest {
        let text = fs::read_to_string(path)?;
        return Ok(Selection::Manifest(parse_manifest(&text)?));
    }
    if let Some(path) = &cli.commit_manifest {
        let text = repo.manifest_at(commit, path)?;
        return Ok(Selection::Manifest(parse_manifest(&text)?));
    }
    let names = cli
        .filespecs
        .iter()
        .map(|name| ExplicitName::parse(name))
        .collect::<pack_select::Result<Vec<_>>>()?;
    Ok(Selection::Explicit(names))
}

/// Final path segment of the archive base name; entry paths inside
/// the archive are rooted under it.
fn archive_root(archive_base: &str) -> &str {
    archive_base
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(archive_base)
}
