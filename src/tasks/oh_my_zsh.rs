//! Oh My Zsh and its custom plugins.
use anyhow::Result;

use super::{Context, ProcessOpts, Task, TaskResult, process_resources, process_resources_remove};
use crate::resources::oh_my_zsh::OhMyZshResource;
use crate::resources::plugin::ZshPluginResource;

/// Build the Oh My Zsh resource from the manifest.
pub(super) fn framework(ctx: &Context) -> OhMyZshResource<'_> {
    let omz = &ctx.manifest().oh_my_zsh;
    OhMyZshResource::new(
        ctx.oh_my_zsh_dir(),
        omz.install_url.clone(),
        omz.install_sha256.clone(),
        ctx.executor.as_ref(),
        ctx.downloader.as_ref(),
    )
}

/// Build one resource per configured plugin.
pub(super) fn plugins(ctx: &Context) -> Vec<ZshPluginResource> {
    let dir = ctx.plugins_dir();
    ctx.manifest()
        .oh_my_zsh
        .plugins
        .iter()
        .map(|p| ZshPluginResource::new(p.name.clone(), p.url.clone(), dir.join(&p.name)))
        .collect()
}

/// Install Oh My Zsh.
#[derive(Debug)]
pub struct InstallOhMyZsh;

impl Task for InstallOhMyZsh {
    fn name(&self) -> &'static str {
        "Install Oh My Zsh"
    }

    super::task_deps![super::packages::InstallPackages];

    fn should_run(&self, _ctx: &Context) -> bool {
        true
    }

    fn run(&self, ctx: &Context) -> Result<TaskResult> {
        process_resources(ctx, [framework(ctx)], &ProcessOpts::apply_all("install"))
    }
}

/// Clone Zsh plugins into the Oh My Zsh custom directory.
#[derive(Debug)]
pub struct InstallZshPlugins;

impl Task for InstallZshPlugins {
    fn name(&self) -> &'static str {
        "Install Zsh plugins"
    }

    super::task_deps![InstallOhMyZsh];

    fn should_run(&self, ctx: &Context) -> bool {
        !ctx.manifest().oh_my_zsh.plugins.is_empty()
    }

    fn run(&self, ctx: &Context) -> Result<TaskResult> {
        process_resources(ctx, plugins(ctx), &ProcessOpts::apply_all("clone"))
    }
}

/// Delete cloned plugins.
#[derive(Debug)]
pub struct RemoveZshPlugins;

impl Task for RemoveZshPlugins {
    fn name(&self) -> &'static str {
        "Remove Zsh plugins"
    }

    super::task_deps![super::files::RestoreBackups];

    fn should_run(&self, ctx: &Context) -> bool {
        !ctx.manifest().oh_my_zsh.plugins.is_empty()
    }

    fn run(&self, ctx: &Context) -> Result<TaskResult> {
        process_resources_remove(ctx, plugins(ctx), "remove")
    }
}

/// Delete the Oh My Zsh directory.
#[derive(Debug)]
pub struct RemoveOhMyZsh;

impl Task for RemoveOhMyZsh {
    fn name(&self) -> &'static str {
        "Remove Oh My Zsh"
    }

    super::task_deps![RemoveZshPlugins];

    fn should_run(&self, _ctx: &Context) -> bool {
        true
    }

    fn run(&self, ctx: &Context) -> Result<TaskResult> {
        process_resources_remove(ctx, [framework(ctx)], "remove")
    }
}
