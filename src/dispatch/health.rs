use super::probe::ToolProbe;
use crate::backends::BackendRegistry;
use crate::toolchain::ToolchainId;
use serde::{Deserialize, Serialize};

/// Generator availability for one backend, independent of any repository
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthEntry {
    pub toolchain: ToolchainId,
    pub generator: String,
    pub probe: String,
    pub available: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub install_hint: Option<String>,
}

pub async fn check_health(registry: &BackendRegistry, probe: &dyn ToolProbe) -> Vec<HealthEntry> {
    let mut entries = Vec::with_capacity(registry.len());
    for backend in registry.iter() {
        let availability = backend.probe();
        let available = probe.is_available(&availability).await;
        entries.push(HealthEntry {
            toolchain: backend.toolchain(),
            generator: backend.generator().to_string(),
            probe: availability.to_string(),
            available,
            install_hint: (!available).then(|| backend.install_hint().to_string()),
        });
    }
    entries
}
