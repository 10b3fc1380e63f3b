//! Startup catalog of analyzable samples.

use std::collections::HashSet;

use shared::domain::SampleId;
use tracing::{error, info, warn};

use crate::{ClientError, DiagnosisService};

/// Ordered, duplicate-free list of samples in server order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SampleCatalog {
    samples: Vec<SampleId>,
}

impl SampleCatalog {
    pub fn from_ids(ids: impl IntoIterator<Item = SampleId>) -> Self {
        let mut seen = HashSet::new();
        let mut samples = Vec::new();
        for id in ids {
            if seen.insert(id.clone()) {
                samples.push(id);
            } else {
                warn!(sample_id = %id, "dropping duplicate sample id from catalog");
            }
        }
        Self { samples }
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn first(&self) -> Option<&SampleId> {
        self.samples.first()
    }

    pub fn contains(&self, id: &SampleId) -> bool {
        self.samples.contains(id)
    }

    pub fn position(&self, id: &SampleId) -> Option<usize> {
        self.samples.iter().position(|sample| sample == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &SampleId> {
        self.samples.iter()
    }

    /// Label shown in the sample picker; ids themselves are opaque.
    pub fn display_label(index: usize) -> String {
        format!("Heart Sound #{}", index + 1)
    }

    pub fn label_for(&self, id: &SampleId) -> Option<String> {
        self.position(id).map(Self::display_label)
    }
}

pub async fn load_catalog<S>(service: &S) -> Result<SampleCatalog, ClientError>
where
    S: DiagnosisService + ?Sized,
{
    match service.list_sounds().await {
        Ok(ids) => {
            let catalog = SampleCatalog::from_ids(ids);
            info!(samples = catalog.len(), "sample catalog loaded");
            Ok(catalog)
        }
        Err(err) => {
            error!(error = %err, "failed to load sample catalog");
            Err(err)
        }
    }
}

/// Guards the once-per-page catalog fetch.
#[derive(Debug, Default)]
pub struct CatalogLoader {
    started: bool,
}

impl CatalogLoader {
    /// Returns `true` the first time only.
    pub fn begin(&mut self) -> bool {
        !std::mem::replace(&mut self.started, true)
    }
}
