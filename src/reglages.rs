//! Réglages : adresse du service + chemins + délai
//!
//! Ordre de priorité :
//! 1. variable d’environnement `CALCNUM_URL` (adresse du service seulement)
//! 2. fichier `reglages.toml` du dossier de configuration de la plateforme
//!    - Linux : ~/.config/calculatrice-numerique/
//!    - macOS : ~/Library/Application Support/org.calculatrice-numerique.Calculatrice-numerique/
//!    - Windows : %APPDATA%\calculatrice-numerique\Calculatrice numerique\config\
//! 3. valeurs par défaut
//!
//! En wasm32 : valeurs par défaut uniquement (pas de système de fichiers).

use serde::Deserialize;
use thiserror::Error;

use crate::noyau::Genre;

/// Variable d’environnement qui remplace l’adresse du service.
pub const VAR_URL: &str = "CALCNUM_URL";

pub const FICHIER_REGLAGES: &str = "reglages.toml";

#[derive(Debug, Error)]
pub enum ErreurReglages {
    #[error("lecture de {chemin} impossible : {source}")]
    Lecture {
        chemin: String,
        source: std::io::Error,
    },

    #[cfg(not(target_arch = "wasm32"))]
    #[error("reglages.toml invalide : {0}")]
    Format(#[from] toml::de::Error),
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Reglages {
    /// Adresse de base, sans barre finale (ex: http://127.0.0.1:8000).
    pub url_service: String,
    pub chemin_derivee: String,
    pub chemin_integrale: String,
    /// Délai max d’une requête (natif seulement).
    pub delai_secondes: u64,
}

impl Default for Reglages {
    fn default() -> Self {
        Self {
            url_service: "http://127.0.0.1:8000".to_string(),
            chemin_derivee: "/turunan".to_string(),
            chemin_integrale: "/integral".to_string(),
            delai_secondes: 30,
        }
    }
}

impl Reglages {
    /// Adresse complète du point d’accès pour une famille de méthode.
    pub fn point_acces(&self, genre: Genre) -> String {
        let chemin = match genre {
            Genre::Derivee => &self.chemin_derivee,
            Genre::Integrale => &self.chemin_integrale,
        };
        format!(
            "{}/{}",
            self.url_service.trim_end_matches('/'),
            chemin.trim_start_matches('/')
        )
    }

    /// Lit un contenu TOML (champs absents = valeurs par défaut).
    #[cfg(not(target_arch = "wasm32"))]
    pub fn depuis_toml(contenu: &str) -> Result<Self, ErreurReglages> {
        Ok(toml::from_str(contenu)?)
    }

    /// Applique la surcharge d’environnement (valeur non vide seulement).
    pub fn surcharger_url(mut self, url: Option<String>) -> Self {
        if let Some(u) = url.map(|u| u.trim().to_string()).filter(|u| !u.is_empty()) {
            self.url_service = u;
        }
        self
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub fn chemin_reglages() -> Option<std::path::PathBuf> {
    directories::ProjectDirs::from("org", "calculatrice-numerique", "Calculatrice numerique")
        .map(|d| d.config_dir().join(FICHIER_REGLAGES))
}

#[cfg(not(target_arch = "wasm32"))]
fn lire_fichier(chemin: &std::path::Path) -> Result<Option<Reglages>, ErreurReglages> {
    match std::fs::read_to_string(chemin) {
        Ok(contenu) => Reglages::depuis_toml(&contenu).map(Some),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(source) => Err(ErreurReglages::Lecture {
            chemin: chemin.display().to_string(),
            source,
        }),
    }
}

/// Charge les réglages ; toute anomalie retombe sur les valeurs par défaut.
#[cfg(not(target_arch = "wasm32"))]
pub fn charger() -> Reglages {
    let base = match chemin_reglages() {
        None => {
            tracing::warn!("dossier de configuration introuvable, réglages par défaut");
            Reglages::default()
        }
        Some(chemin) => match lire_fichier(&chemin) {
            Ok(Some(r)) => {
                tracing::info!(chemin = %chemin.display(), "réglages chargés");
                r
            }
            Ok(None) => {
                tracing::info!(chemin = %chemin.display(), "pas de fichier de réglages, valeurs par défaut");
                Reglages::default()
            }
            Err(e) => {
                tracing::warn!(erreur = %e, "réglages ignorés, valeurs par défaut");
                Reglages::default()
            }
        },
    };

    base.surcharger_url(std::env::var(VAR_URL).ok())
}

#[cfg(target_arch = "wasm32")]
pub fn charger() -> Reglages {
    Reglages::default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn points_d_acces() {
        let r = Reglages {
            url_service: "http://svc:9000/".into(),
            ..Reglages::default()
        };
        assert_eq!(r.point_acces(Genre::Derivee), "http://svc:9000/turunan");
        assert_eq!(r.point_acces(Genre::Integrale), "http://svc:9000/integral");
    }

    #[test]
    fn toml_partiel() {
        let r = Reglages::depuis_toml("url_service = \"https://calc.example\"\ndelai_secondes = 5\n")
            .unwrap();
        assert_eq!(r.url_service, "https://calc.example");
        assert_eq!(r.delai_secondes, 5);
        assert_eq!(r.chemin_derivee, "/turunan");
    }

    #[test]
    fn toml_invalide() {
        assert!(matches!(
            Reglages::depuis_toml("delai_secondes = \"longtemps\""),
            Err(ErreurReglages::Format(_))
        ));
    }

    #[test]
    fn surcharge_env() {
        let r = Reglages::default().surcharger_url(Some("  ".into()));
        assert_eq!(r, Reglages::default());
        let r = Reglages::default().surcharger_url(Some("http://autre:1".into()));
        assert_eq!(r.url_service, "http://autre:1");
    }
}
