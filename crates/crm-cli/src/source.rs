//! Lookup source selection for the binary.

use std::future::Future;
use std::time::Duration;

use crm_lookup::{
    Candidate, CandidateId, HttpLookupClient, LookupSettings, LookupSource, MemoryLookup,
};

/// Simulated latency of the offline source.
const OFFLINE_LATENCY: Duration = Duration::from_millis(150);

/// Either the HTTP backend or the built-in offline data set.
#[derive(Debug, Clone)]
pub enum CliSource {
    /// Remote collection.
    Http(HttpLookupClient),
    /// Built-in sample customers.
    Offline(MemoryLookup),
}

impl CliSource {
    /// Builds the source for the given settings.
    pub fn new(settings: &LookupSettings, offline: bool) -> crm_lookup::Result<Self> {
        if offline {
            Ok(Self::offline())
        } else {
            HttpLookupClient::new(settings).map(Self::Http)
        }
    }

    /// The offline sample data set.
    pub fn offline() -> Self {
        Self::Offline(MemoryLookup::new(sample_customers()).with_latency(OFFLINE_LATENCY))
    }

    /// Short description for log output.
    pub fn describe(&self) -> String {
        match self {
            Self::Http(client) => client.collection_url().to_string(),
            Self::Offline(memory) => format!("offline ({} sample customers)", memory.len()),
        }
    }
}

impl LookupSource for CliSource {
    fn search(&self, text: &str) -> impl Future<Output = crm_lookup::Result<Vec<Candidate>>> + Send {
        async move {
            match self {
                Self::Http(client) => client.search(text).await,
                Self::Offline(memory) => memory.search(text).await,
            }
        }
    }

    fn fetch_by_id(
        &self,
        id: &CandidateId,
    ) -> impl Future<Output = crm_lookup::Result<Candidate>> + Send {
        async move {
            match self {
                Self::Http(client) => client.fetch_by_id(id).await,
                Self::Offline(memory) => memory.fetch_by_id(id).await,
            }
        }
    }
}

/// Customers served by `--offline`.
pub fn sample_customers() -> Vec<Candidate> {
    vec![
        Candidate::new(42, "Acme Inc").with_detail("billing@acme.test"),
        Candidate::new(43, "Acme Logistics").with_detail("ops@acme-logistics.test"),
        Candidate::new(7, "Beta Co").with_detail("hello@beta.test"),
        Candidate::new(3, "Gamma Partners"),
        Candidate::new(11, "Delta LLC").with_detail("finance@delta.test"),
        Candidate::new(12, "Epsilon Trading"),
        Candidate::new(19, "Zeta Health").with_detail("contact@zeta.test"),
        Candidate::new("cust-omega", "Omega Holdings"),
    ]
}
