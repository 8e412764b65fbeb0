//! Action dispatcher: resolves tool ids and drives the command runner

use super::Action;
use crate::error::{ActionError, Error, Result};
use crate::output::{ActionEvent, ActionOutput, NullOutput};
use crate::profile::Profile;
use crate::registry::{ToolEntry, ToolRegistry};
use crate::runner::{CommandRunner, CommandSpec, ExecutionResult};
use std::sync::Arc;
use tokio::sync::{Mutex, MutexGuard};
use tracing::{debug, info, warn};

/// Runs profile actions, one at a time.
///
/// The registry and the output sink are injected; the dispatcher holds no
/// other state than the in-flight guard.
pub struct ActionDispatcher {
    profile: Profile,
    runner: Arc<dyn CommandRunner>,
    in_flight: Mutex<()>,
}

impl ActionDispatcher {
    pub fn new(profile: Profile, runner: Arc<dyn CommandRunner>) -> Self {
        Self {
            profile,
            runner,
            in_flight: Mutex::new(()),
        }
    }

    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    pub fn registry(&self) -> &ToolRegistry {
        &self.profile.registry
    }

    /// All tools, in display order. No side effects.
    pub fn list(&self) -> Result<&[ToolEntry]> {
        self.ensure_supported(Action::List)?;
        Ok(self.profile.registry.all())
    }

    /// Install a single tool through its registry command
    pub async fn install(&self, id: &str, output: &dyn ActionOutput) -> Result<ExecutionResult> {
        self.ensure_supported(Action::Install)?;
        let entry = self.resolve(id)?;
        let spec = entry.install_command.clone();

        let _guard = self.begin()?;
        info!("Installing {}", entry.id);
        let result = self
            .run_step(Action::Install, Some(id), &spec, output)
            .await?;
        self.complete(Action::Install, Some(id), result, output)
            .await
    }

    /// Upgrade a single tool's package
    pub async fn update(&self, id: &str, output: &dyn ActionOutput) -> Result<ExecutionResult> {
        self.ensure_supported(Action::Update)?;
        let entry = self.resolve(id)?;
        let spec = self.profile.package_manager.upgrade([entry.package.as_str()]);

        let _guard = self.begin()?;
        info!("Updating {}", entry.id);
        let result = self
            .run_step(Action::Update, Some(id), &spec, output)
            .await?;
        self.complete(Action::Update, Some(id), result, output)
            .await
    }

    /// Run the tool's version command and return its first output line.
    ///
    /// Blank lines are skipped, so output such as `"\nFoo 1.0"` reports
    /// `Foo 1.0`. A command that prints only blank lines fails the check.
    pub async fn check_version(&self, id: &str) -> Result<String> {
        let spec = self.version_check_command(id)?;

        let _guard = self.begin()?;
        let output = NullOutput;
        let result = self
            .run_step(Action::CheckVersion, Some(id), &spec, &output)
            .await?;
        output_finished(&output, Action::CheckVersion, Some(id), &result).await?;

        if !result.success() {
            warn!("Version check for {} ended with {:?}", id, result.outcome());
            return Err(ActionError::VersionCheckFailed { id: id.to_string() }.into());
        }

        match result.first_line() {
            Some(line) => Ok(line.trim().to_string()),
            None => {
                warn!("Version check for {} printed nothing", id);
                Err(ActionError::VersionCheckFailed { id: id.to_string() }.into())
            }
        }
    }

    /// Command used by [`check_version`](Self::check_version)
    pub fn version_check_command(&self, id: &str) -> Result<CommandSpec> {
        self.ensure_supported(Action::CheckVersion)?;
        Ok(self.resolve(id)?.version_command.clone())
    }

    /// Install every registry entry in a single package-manager invocation
    pub async fn install_all(&self, output: &dyn ActionOutput) -> Result<ExecutionResult> {
        self.ensure_supported(Action::InstallAll)?;
        let spec = self.install_all_command();

        let _guard = self.begin()?;
        info!("Installing all {} tools", self.profile.registry.len());
        let result = self
            .run_step(Action::InstallAll, None, &spec, output)
            .await?;
        self.complete(Action::InstallAll, None, result, output)
            .await
    }

    /// Command used by [`install_all`](Self::install_all)
    pub fn install_all_command(&self) -> CommandSpec {
        self.profile
            .package_manager
            .install(self.profile.registry.ids())
    }

    /// Clone the external project, then run its installer.
    ///
    /// The installer only runs if the clone succeeded. The returned result
    /// belongs to the last step that ran.
    pub async fn install_external_project(
        &self,
        output: &dyn ActionOutput,
    ) -> Result<ExecutionResult> {
        self.ensure_supported(Action::InstallExternal)?;
        let project = self.profile.external_project.as_ref().ok_or_else(|| {
            ActionError::UnsupportedAction {
                action: Action::InstallExternal.to_string(),
                profile: self.profile.kind.to_string(),
            }
        })?;
        let target = Some(project.name.as_str());

        let _guard = self.begin()?;
        info!("Installing {} from {}", project.name, project.repository);

        let mut result = self
            .run_step(Action::InstallExternal, target, &project.clone_command(), output)
            .await?;
        if result.success() {
            result = self
                .run_step(
                    Action::InstallExternal,
                    target,
                    &project.install_command(),
                    output,
                )
                .await?;
        }

        self.complete(Action::InstallExternal, target, result, output)
            .await
    }

    fn ensure_supported(&self, action: Action) -> Result<()> {
        if self.profile.supports(action) {
            Ok(())
        } else {
            Err(ActionError::UnsupportedAction {
                action: action.to_string(),
                profile: self.profile.kind.to_string(),
            }
            .into())
        }
    }

    /// Resolve a user-supplied id. Never touches the runner.
    fn resolve(&self, id: &str) -> Result<&ToolEntry> {
        if id.trim().is_empty() {
            return Err(ActionError::NoToolSelected.into());
        }
        debug!("Resolving tool id '{}'", id);
        Ok(self.profile.registry.lookup(id)?)
    }

    fn begin(&self) -> Result<MutexGuard<'_, ()>> {
        self.in_flight
            .try_lock()
            .map_err(|_| Error::from(ActionError::Busy))
    }

    async fn run_step(
        &self,
        action: Action,
        target: Option<&str>,
        spec: &CommandSpec,
        output: &dyn ActionOutput,
    ) -> Result<ExecutionResult> {
        output
            .emit_event(ActionEvent::Started {
                action,
                target: target.map(str::to_string),
                command: spec.display(),
            })
            .await
            .map_err(|e| Error::Output(e.to_string()))?;

        self.runner.run(spec, output).await
    }

    async fn complete(
        &self,
        action: Action,
        target: Option<&str>,
        result: ExecutionResult,
        output: &dyn ActionOutput,
    ) -> Result<ExecutionResult> {
        output_finished(output, action, target, &result).await?;
        output
            .flush()
            .await
            .map_err(|e| Error::Output(e.to_string()))?;

        if !result.success() {
            warn!("{} failed: {:?}", action, result.outcome());
        }
        Ok(result.into_checked()?)
    }
}

async fn output_finished(
    output: &dyn ActionOutput,
    action: Action,
    target: Option<&str>,
    result: &ExecutionResult,
) -> Result<()> {
    output
        .emit_event(ActionEvent::Finished {
            action,
            target: target.map(str::to_string),
            outcome: result.outcome(),
        })
        .await
        .map_err(|e| Error::Output(e.to_string()))
}
