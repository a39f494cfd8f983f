// ABOUTME: Submission collaborator for completed quote requests
// Demo-grade stub: simulates network latency and always accepts

use anyhow::Result;
use chrono::{DateTime, Utc};
use std::time::Duration;
use tracing::info;
use uuid::Uuid;

use crate::schema::FormValues;

/// What the quote desk hands back for an accepted request.
#[derive(Debug, Clone)]
pub struct SubmissionReceipt {
    pub reference: Uuid,
    pub submitted_at: DateTime<Utc>,
}

/// Stand-in for the real quote-desk API. Waits out a simulated round trip
/// and accepts every payload.
#[derive(Debug, Clone)]
pub struct SubmissionClient {
    latency: Duration,
}

impl Default for SubmissionClient {
    fn default() -> Self {
        Self { latency: Duration::from_millis(800) }
    }
}

impl SubmissionClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Zero-latency variant for tests.
    pub fn immediate() -> Self {
        Self { latency: Duration::ZERO }
    }

    pub async fn submit(&self, values: &FormValues) -> Result<SubmissionReceipt> {
        info!(
            org = %values.org_name,
            service = values.service_type.as_wire(),
            "Submitting quote request"
        );

        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }

        let receipt = SubmissionReceipt {
            reference: Uuid::new_v4(),
            submitted_at: Utc::now(),
        };
        info!("Quote request accepted, reference {}", receipt.reference);
        Ok(receipt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_submit_returns_a_reference() {
        let client = SubmissionClient::immediate();
        let receipt = client.submit(&FormValues::defaults()).await.unwrap();
        assert!(!receipt.reference.is_nil());
    }
}
