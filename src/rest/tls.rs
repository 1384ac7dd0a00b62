//! Certificate trust policy for the HTTPS transport.

use crate::error::CoinSpotError;

/// Which server certificates the client accepts.
///
/// Verification is on unless [`TrustPolicy::DangerAcceptInvalidCerts`] is
/// chosen explicitly.
#[derive(Clone, Default)]
pub enum TrustPolicy {
    /// Verify against the platform's trust store.
    #[default]
    SystemRoots,
    /// Verify against the given PEM bundle only.
    PinnedCa(Vec<u8>),
    /// Accept any certificate. Only for local test endpoints.
    DangerAcceptInvalidCerts,
}

impl TrustPolicy {
    /// Trust only the CAs in a PEM bundle.
    pub fn pinned_ca_pem(pem: impl Into<Vec<u8>>) -> Self {
        TrustPolicy::PinnedCa(pem.into())
    }

    /// Configure a reqwest client builder with this policy.
    pub(crate) fn apply(
        &self,
        builder: reqwest::ClientBuilder,
    ) -> Result<reqwest::ClientBuilder, CoinSpotError> {
        match self {
            TrustPolicy::SystemRoots => Ok(builder),
            TrustPolicy::PinnedCa(pem) => {
                let certificates = reqwest::Certificate::from_pem_bundle(pem)
                    .map_err(|e| CoinSpotError::Tls(format!("invalid PEM bundle: {e}")))?;
                if certificates.is_empty() {
                    return Err(CoinSpotError::Tls(
                        "PEM bundle contains no certificates".to_string(),
                    ));
                }

                tracing::debug!(count = certificates.len(), "pinning CA certificates");
                Ok(builder.tls_certs_only(certificates))
            }
            TrustPolicy::DangerAcceptInvalidCerts => {
                tracing::warn!("TLS certificate verification is disabled");
                Ok(builder.danger_accept_invalid_certs(true))
            }
        }
    }
}

impl std::fmt::Debug for TrustPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TrustPolicy::SystemRoots => write!(f, "SystemRoots"),
            TrustPolicy::PinnedCa(pem) => write!(f, "PinnedCa({} bytes)", pem.len()),
            TrustPolicy::DangerAcceptInvalidCerts => write!(f, "DangerAcceptInvalidCerts"),
        }
    }
}
