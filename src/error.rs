// Harness error taxonomy: readiness failures abort the run, everything else
// fails a single scenario and the run continues.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum HarnessError {
    #[error("server not ready after {attempts} status probes")]
    ServerNotReady { attempts: u32 },

    #[error(transparent)]
    Http(#[from] reqwest::Error),

    #[error("{endpoint} returned status {status}, allowed {allowed:?}")]
    UnexpectedStatus {
        endpoint: &'static str,
        status: u16,
        allowed: Vec<u16>,
    },

    #[error("no latency samples recorded")]
    NoSamples,
}
