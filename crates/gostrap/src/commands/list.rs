//! List command

use super::Workspace;
use crate::output;
use anyhow::Result;

pub fn run() -> Result<()> {
    let workspace = Workspace::load()?;
    let templates = workspace.registry.templates();
    let dependencies = workspace.registry.dependencies();

    output::header("Project kinds");
    for kind in templates.kinds() {
        output::kv(kind.as_str(), kind.description());
    }

    output::header("CLI frameworks");
    output::kv(dependencies.sentinel(), "standard library only (default)");
    for framework in dependencies.frameworks() {
        let packages = dependencies
            .dependencies_for(framework)
            .map(|ids| ids.join(", "))
            .unwrap_or_default();
        output::kv(framework, &packages);
    }

    output::header("Projects directory");
    output::kv("path", workspace.projects_dir.as_str());

    Ok(())
}
