//! Journal (`tracing`)
//!
//! - natif : `tracing-subscriber` fmt, filtre via `RUST_LOG` (défaut : info)
//! - wasm32 : pas d’abonné, les macros `tracing` restent sans effet

/// Filtre utilisé quand `RUST_LOG` est absent ou invalide.
#[cfg(not(target_arch = "wasm32"))]
const FILTRE_DEFAUT: &str = "info";

#[cfg(not(target_arch = "wasm32"))]
pub fn initialiser() {
    use tracing_subscriber::EnvFilter;

    let filtre = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(FILTRE_DEFAUT));

    // try_init : un second appel (tests, ré-entrée) ne doit pas paniquer
    if tracing_subscriber::fmt()
        .with_env_filter(filtre)
        .with_target(false)
        .try_init()
        .is_err()
    {
        tracing::debug!("abonné tracing déjà installé");
    }
}

#[cfg(target_arch = "wasm32")]
pub fn initialiser() {}
