//! Heroku and Docker CLI invocations.
//!
//! `HerokuGateway` knows which commands to run; the `CommandRunner` port
//! knows how to run them. Every Heroku call carries the API key through
//! the child environment, never on the command line.

use std::path::Path;
use std::sync::Arc;

use tracing::{debug, info};

use crate::domain::{ApiKey, AppName};
use crate::error::BotError;
use crate::ports::{CommandOutput, CommandRunner, CommandSpec};
use crate::settings::{DEFAULT_CONTAINER_PATH, DEFAULT_PROCESS_TYPE, DEFAULT_REGISTRY_HOST};

/// Environment variable the Heroku CLI reads its credential from.
pub const HEROKU_API_KEY_ENV: &str = "HEROKU_API_KEY";

/// Executables and registry layout used to build commands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayConfig {
    pub heroku_bin: String,
    pub docker_bin: String,
    pub registry_host: String,
    pub process_type: String,
    pub container_path: String,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            heroku_bin: "heroku".to_string(),
            docker_bin: "docker".to_string(),
            registry_host: DEFAULT_REGISTRY_HOST.to_string(),
            process_type: DEFAULT_PROCESS_TYPE.to_string(),
            container_path: DEFAULT_CONTAINER_PATH.to_string(),
        }
    }
}

/// Builds and runs the Heroku/Docker commands behind each chat command.
#[derive(Clone)]
pub struct HerokuGateway {
    runner: Arc<dyn CommandRunner>,
    config: GatewayConfig,
}

impl HerokuGateway {
    pub fn new(runner: Arc<dyn CommandRunner>, config: GatewayConfig) -> Self {
        Self { runner, config }
    }

    /// Registry reference for an app's image, without a tag.
    pub fn image_ref(&self, app: &AppName) -> String {
        format!(
            "{}/{}/{}",
            self.config.registry_host, app, self.config.process_type
        )
    }

    /// `heroku apps --json`, returning raw stdout.
    pub async fn list_apps(&self, key: &ApiKey) -> Result<String, BotError> {
        let spec = self.heroku(key).args(["apps", "--json"]);
        let output = self.run_checked(&spec).await?;
        Ok(output.stdout)
    }

    /// `heroku container:login`, which logs Docker into the registry.
    pub async fn container_login(&self, key: &ApiKey) -> Result<(), BotError> {
        let spec = self.heroku(key).arg("container:login");
        self.run_checked(&spec).await?;
        Ok(())
    }

    /// `docker pull <registry>/<app>/<process_type>`.
    pub async fn pull_image(&self, app: &AppName) -> Result<(), BotError> {
        let spec = self.docker().arg("pull").arg(self.image_ref(app));
        self.run_checked(&spec).await?;
        Ok(())
    }

    /// `docker create <image>:latest`, returning the new container ID.
    pub async fn create_container(&self, app: &AppName) -> Result<String, BotError> {
        let spec = self
            .docker()
            .arg("create")
            .arg(format!("{}:latest", self.image_ref(app)));
        let output = self.run_checked(&spec).await?;

        let id = output
            .stdout
            .lines()
            .map(str::trim)
            .rfind(|line| !line.is_empty())
            .ok_or(BotError::MissingContainerId)?;
        info!(app = %app, container = %id, "Created container");
        Ok(id.to_string())
    }

    /// `docker cp <id>:<container_path> <dest>`.
    pub async fn copy_from_container(
        &self,
        container_id: &str,
        dest: &Path,
    ) -> Result<(), BotError> {
        let spec = self
            .docker()
            .arg("cp")
            .arg(format!("{container_id}:{}", self.config.container_path))
            .arg(dest.to_string_lossy());
        self.run_checked(&spec).await?;
        Ok(())
    }

    /// `docker rm <id>`.
    pub async fn remove_container(&self, container_id: &str) -> Result<(), BotError> {
        let spec = self.docker().arg("rm").arg(container_id);
        self.run_checked(&spec).await?;
        Ok(())
    }

    fn heroku(&self, key: &ApiKey) -> CommandSpec {
        CommandSpec::new(&self.config.heroku_bin).secret_env(HEROKU_API_KEY_ENV, key.expose())
    }

    fn docker(&self) -> CommandSpec {
        CommandSpec::new(&self.config.docker_bin)
    }

    async fn run_checked(&self, spec: &CommandSpec) -> Result<CommandOutput, BotError> {
        debug!(command = %spec.display(), "Running external command");
        let output = self.runner.run(spec).await?;
        debug!(command = %spec.display(), status = ?output.status, "External command finished");
        Ok(output.check(spec)?)
    }
}
