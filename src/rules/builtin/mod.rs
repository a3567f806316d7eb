// Tue Aug 18 2026 - Alex

pub mod actions;
pub mod compose;
pub mod dockerfile;
pub mod env_file;
pub mod generic;
pub mod kubernetes;

use crate::rules::rule::Rule;
use std::sync::Arc;

/// Every built-in rule in its fixed registration order. The order is part of
/// the reproducibility contract: evaluation and reporting follow it.
pub fn all_rules() -> Vec<Arc<dyn Rule>> {
    vec![
        Arc::new(generic::EmptyDocumentRule),
        Arc::new(generic::VersionNoteRule),
        Arc::new(compose::ComposeVersionRule),
        Arc::new(compose::ComposeImagePinRule),
        Arc::new(compose::ComposePrivilegedRule),
        Arc::new(kubernetes::K8sRequiredFieldsRule),
        Arc::new(kubernetes::K8sResourceLimitsRule),
        Arc::new(kubernetes::K8sPrivilegedRule),
        Arc::new(kubernetes::K8sImagePinRule),
        Arc::new(dockerfile::DockerfileFromRule),
        Arc::new(dockerfile::DockerfileBasePinRule),
        Arc::new(dockerfile::DockerfileUserRule),
        Arc::new(env_file::EnvSyntaxRule),
        Arc::new(env_file::EnvUnquotedSpacesRule),
        Arc::new(env_file::EnvPlaintextSecretRule),
        Arc::new(actions::ActionsRunsOnRule),
        Arc::new(actions::ActionsMutableRefRule),
    ]
}
