//! Availability-zone listing consumed by `$[cd_genaz]` directives.

use async_trait::async_trait;
use cideploy_common::error::Result;

/// Source of the availability zones currently usable in a region.
#[async_trait]
pub trait ZoneLister: Send + Sync {
    /// Region the zones belong to.
    fn region(&self) -> &str;

    /// Lists the names of the currently available zones.
    ///
    /// # Errors
    ///
    /// Returns an error if the zones cannot be listed.
    async fn list_zones(&self) -> Result<Vec<String>>;
}

/// A fixed zone list.
#[cfg(test)]
#[derive(Debug, Clone, Default)]
pub struct StaticZones {
    region: String,
    zones: Vec<String>,
}

#[cfg(test)]
impl StaticZones {
    /// Creates a lister that always returns `zones`.
    #[must_use]
    pub fn new(region: impl Into<String>, zones: Vec<String>) -> Self {
        Self {
            region: region.into(),
            zones,
        }
    }
}

#[cfg(test)]
#[async_trait]
impl ZoneLister for StaticZones {
    fn region(&self) -> &str {
        &self.region
    }

    async fn list_zones(&self) -> Result<Vec<String>> {
        Ok(self.zones.clone())
    }
}
