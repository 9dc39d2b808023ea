//! systemd unit rendering.

use crate::config::DeployConfig;
use crate::deploy::error::{DeployError, DeployResult};
use crate::deploy::templates::get_template;
use std::path::Path;

/// Template file the unit is rendered from.
const UNIT_TEMPLATE: &str = "backend.service";

/// Values substituted into the unit template.
#[derive(Debug, Clone)]
pub struct UnitSpec {
    /// systemd service name, also used in the unit description.
    pub service_name: String,

    /// Full `ExecStart=` line: interpreter, `-u`, absolute script path.
    pub exec_start: String,

    /// Absolute working directory of the service.
    pub working_dir: String,

    /// Absolute path the unit appends stdout/stderr to.
    pub log_path: String,
}

impl UnitSpec {
    /// Build the spec from the deploy configuration.
    ///
    /// The entry point and log path are made absolute against `root`
    /// because systemd resolves nothing relative to the unit file.
    pub fn from_config(deploy: &DeployConfig, interpreter: &Path, root: &Path) -> Self {
        let entry_point = root.join(&deploy.entry_point);
        let log_path = root.join(&deploy.log);

        Self {
            service_name: deploy.service_name.clone(),
            exec_start: format!(
                "{} -u {}",
                interpreter.display(),
                entry_point.display()
            ),
            working_dir: root.display().to_string(),
            log_path: log_path.display().to_string(),
        }
    }

    /// Render the unit file content.
    ///
    /// # Errors
    ///
    /// Returns `DeployError::TemplateNotFound` if the embedded template
    /// is missing, which would be a packaging defect.
    pub fn render(&self) -> DeployResult<String> {
        let template = get_template(UNIT_TEMPLATE)
            .ok_or_else(|| DeployError::TemplateNotFound(UNIT_TEMPLATE.to_string()))?;

        Ok(template
            .replace("{{service_name}}", &self.service_name)
            .replace("{{exec_start}}", &self.exec_start)
            .replace("{{working_dir}}", &self.working_dir)
            .replace("{{log_path}}", &self.log_path))
    }
}
