//! Traits for code delivery and generation

use async_trait::async_trait;
use rand::{rngs::OsRng, Rng};

use crate::domain::value_objects::Channel;

use super::types::OutboundCode;

/// Delivers codes over one channel (SMS gateway, SMTP, ...)
#[async_trait]
pub trait CodeDispatcher: Send + Sync {
    /// Channel this dispatcher serves
    fn channel(&self) -> Channel;

    /// Send a code, returning the provider's message id
    async fn dispatch(&self, message: &OutboundCode) -> Result<String, String>;
}

/// Produces numeric codes of a given length
pub trait CodeGenerator: Send + Sync {
    fn generate(&self, length: usize) -> String;
}

/// Uniformly random digits drawn from the operating system CSPRNG
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomCodeGenerator;

impl CodeGenerator for RandomCodeGenerator {
    fn generate(&self, length: usize) -> String {
        let mut rng = OsRng;
        (0..length)
            .map(|_| char::from(b'0' + rng.gen_range(0..10u8)))
            .collect()
    }
}
