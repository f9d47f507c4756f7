//! Classifier client trait

use async_trait::async_trait;
use riskwatch_core::TransportError;

/// Transport to the external classifier oracle.
///
/// Sends a fully built prompt and returns the oracle's raw reply text. The
/// reply is not interpreted here; that is the parser's job.
#[async_trait]
pub trait ClassifierClient: Send + Sync {
    /// Send the prompt and wait for exactly one reply or failure
    async fn classify(&self, prompt: &str) -> Result<String, TransportError>;

    /// Name of the backing model, for logs
    fn name(&self) -> &str;
}
