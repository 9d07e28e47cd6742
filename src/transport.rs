//! Transport HTTP vers le service de méthodes numériques.
//!
//! L’UI ne bloque jamais :
//! - natif : un thread par envoi (client reqwest bloquant, délai configurable)
//! - wasm32 : une future locale (client reqwest asynchrone / fetch)
//!
//! Chaque envoi revient par un canal `mpsc` sous forme de `Retour`
//! (numéro de soumission + issue réseau brute). L’interprétation se fait
//! côté UI, dans le noyau.

use std::sync::mpsc::Sender;

use reqwest::header::CONTENT_TYPE;

use crate::noyau::{IssueReseau, Methode, Requete};
use crate::reglages::Reglages;

const TYPE_FORMULAIRE: &str = "application/x-www-form-urlencoded";

/// Réponse (ou absence de réponse) d’un envoi numéroté.
#[derive(Clone, Debug)]
pub struct Retour {
    pub numero: u64,
    pub methode: Methode,
    pub issue: IssueReseau,
}

#[derive(Clone, Debug)]
pub struct ClientCalcul {
    reglages: Reglages,
    #[cfg(not(target_arch = "wasm32"))]
    http: reqwest::blocking::Client,
    #[cfg(target_arch = "wasm32")]
    http: reqwest::Client,
}

impl ClientCalcul {
    #[cfg(not(target_arch = "wasm32"))]
    pub fn new(reglages: Reglages) -> Result<Self, reqwest::Error> {
        let http = reqwest::blocking::Client::builder()
            .user_agent(concat!("calculatrice-numerique/", env!("CARGO_PKG_VERSION")))
            .timeout(std::time::Duration::from_secs(reglages.delai_secondes))
            .build()?;
        Ok(Self { reglages, http })
    }

    #[cfg(target_arch = "wasm32")]
    pub fn new(reglages: Reglages) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder().build()?;
        Ok(Self { reglages, http })
    }

    /// Lance l’envoi sans attendre. `reveil` est appelé une fois le retour
    /// posté dans le canal (typiquement : redessiner l’UI).
    #[cfg(not(target_arch = "wasm32"))]
    pub fn envoyer(
        &self,
        numero: u64,
        requete: Requete,
        sortie: Sender<Retour>,
        reveil: impl Fn() + Send + 'static,
    ) {
        let url = self.reglages.point_acces(requete.genre());
        let http = self.http.clone();

        tracing::info!(numero, methode = %requete.methode, url = %url, "envoi");

        std::thread::spawn(move || {
            let resultat = http
                .post(&url)
                .header(CONTENT_TYPE, TYPE_FORMULAIRE)
                .body(requete.corps)
                .send();

            let issue = match resultat {
                Ok(reponse) => {
                    let statut = reponse.status().as_u16();
                    let corps = reponse.text().unwrap_or_else(|e| {
                        tracing::warn!(erreur = %e, "corps de réponse illisible");
                        String::new()
                    });
                    IssueReseau::Recue { statut, corps }
                }
                Err(e) => IssueReseau::SansReponse {
                    cause: e.to_string(),
                },
            };

            poster(&sortie, numero, requete.methode, issue);
            reveil();
        });
    }

    #[cfg(target_arch = "wasm32")]
    pub fn envoyer(
        &self,
        numero: u64,
        requete: Requete,
        sortie: Sender<Retour>,
        reveil: impl Fn() + 'static,
    ) {
        let url = self.reglages.point_acces(requete.genre());
        let http = self.http.clone();

        tracing::info!(numero, methode = %requete.methode, url = %url, "envoi");

        wasm_bindgen_futures::spawn_local(async move {
            let resultat = http
                .post(&url)
                .header(CONTENT_TYPE, TYPE_FORMULAIRE)
                .body(requete.corps)
                .send()
                .await;

            let issue = match resultat {
                Ok(reponse) => {
                    let statut = reponse.status().as_u16();
                    let corps = reponse.text().await.unwrap_or_default();
                    IssueReseau::Recue { statut, corps }
                }
                Err(e) => IssueReseau::SansReponse {
                    cause: e.to_string(),
                },
            };

            poster(&sortie, numero, requete.methode, issue);
            reveil();
        });
    }
}

fn poster(sortie: &Sender<Retour>, numero: u64, methode: Methode, issue: IssueReseau) {
    // Récepteur fermé = écran détruit : le retour n’intéresse plus personne.
    if sortie
        .send(Retour {
            numero,
            methode,
            issue,
        })
        .is_err()
    {
        tracing::debug!(numero, "retour abandonné (écran fermé)");
    }
}
