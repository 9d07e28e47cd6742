//! src/app/etat.rs
//!
//! État UI (sans vue).
//!
//! Rôle : contenir le formulaire, l’éditeur, le résultat affiché et les
//! envois en cours ; offrir les actions (soumettre, CLR, AC) sans logique
//! d’affichage.
//!
//! Contrats :
//! - Un seul résultat « vivant » (pas d’historique).
//! - Toute erreur (locale, domaine, transport, HTTP) arrive au même format.
//! - Plusieurs envois peuvent être en vol : la réponse au plus grand numéro gagne.

use std::sync::mpsc::{self, Receiver, Sender};

use crate::noyau::apercu::Apercu;
use crate::noyau::expression::Expression;
use crate::noyau::reponse::ErreurCalcul;
use crate::noyau::{
    construire, interpreter, AdaptateurEditeur, Formulaire, Issue, IssueReseau, Methode,
    Sequenceur,
};
use crate::reglages::Reglages;
use crate::transport::{ClientCalcul, Retour};

use super::champ::ChampMath;

#[derive(Debug)]
pub struct AppNumerique {
    // --- entrée utilisateur ---
    pub formulaire: Formulaire,
    pub editeur: AdaptateurEditeur,
    pub champ: ChampMath,
    /// Vue texte secondaire (miroir éditable de l’expression).
    pub miroir: String,
    pub apercu: Apercu,

    // --- sortie ---
    pub resultat: Option<Issue>,

    // --- envois ---
    sequenceur: Sequenceur,
    client: Option<ClientCalcul>,
    retours_tx: Sender<Retour>,
    retours_rx: Receiver<Retour>,

    // --- UX ---
    pub focus_entree: bool,
}

impl AppNumerique {
    pub fn new(reglages: Reglages) -> Self {
        let client = match ClientCalcul::new(reglages) {
            Ok(c) => Some(c),
            Err(e) => {
                tracing::error!(erreur = %e, "client HTTP indisponible");
                None
            }
        };
        Self::avec_client(client)
    }

    fn avec_client(client: Option<ClientCalcul>) -> Self {
        let (retours_tx, retours_rx) = mpsc::channel();
        let editeur = AdaptateurEditeur::default()
            .avec_rappel(|accepte| tracing::debug!(accepte, "expression acceptée"));
        let mut champ = ChampMath::default();
        editeur.attacher(&mut champ);
        let miroir = editeur.accepte().to_string();

        Self {
            formulaire: Formulaire::default(),
            editeur,
            champ,
            miroir,
            apercu: Apercu::default(),
            resultat: None,
            sequenceur: Sequenceur::default(),
            client,
            retours_tx,
            retours_rx,
            focus_entree: true,
        }
    }

    /* ------------------------ Actions « boutons » ------------------------ */

    /// AC : formulaire + expression + résultat remis à zéro.
    pub fn reset_total(&mut self) {
        self.formulaire.vider();
        self.editeur
            .reinitialiser(Expression::default(), &mut self.champ);
        self.editeur.synchroniser_miroir(&mut self.miroir);
        self.clear_resultats();
    }

    /// CLR : efface le résultat (les envois en vol restent valables).
    pub fn clear_resultats(&mut self) {
        self.resultat = None;
        self.focus_entree = true;
    }

    /// Édition dans la vue texte : filtre, pousse dans le widget, puis le miroir
    /// reprend la valeur acceptée (forme nettoyée, ou ancienne valeur si rejet).
    pub fn editer_miroir(&mut self) {
        let texte = self.miroir.clone();
        self.editeur.sur_texte_brut(&texte, &mut self.champ);
        self.editeur.synchroniser_miroir(&mut self.miroir);
    }

    pub fn choisir_methode(&mut self, methode: Methode) {
        self.formulaire.choisir_methode(methode);
    }

    pub fn en_attente(&self) -> bool {
        self.sequenceur.en_attente() > 0
    }

    /// Valide + envoie. Une erreur de validation remplace le résultat tout de
    /// suite (et prend un numéro, pour qu’une vieille réponse ne l’écrase pas).
    pub fn soumettre(&mut self, reveil: impl Fn() + Send + 'static) {
        let methode = self.formulaire.methode();
        let numero = self.sequenceur.emettre();

        let requete = match construire(methode, self.editeur.accepte(), &self.formulaire.champs) {
            Ok(r) => r,
            Err(e) => {
                tracing::info!(champ = ?e.champ(), erreur = %e, "formulaire incomplet");
                self.appliquer(numero, Issue::Erreur(ErreurCalcul::validation(&e, methode)));
                return;
            }
        };

        match &self.client {
            Some(client) => {
                client.envoyer(numero, requete, self.retours_tx.clone(), reveil);
            }
            None => {
                let issue = IssueReseau::SansReponse {
                    cause: "client HTTP indisponible".to_string(),
                };
                self.appliquer(numero, interpreter(&issue, methode));
            }
        }
    }

    /// À appeler à chaque frame : consomme les retours arrivés.
    pub fn recevoir_retours(&mut self) {
        while let Ok(retour) = self.retours_rx.try_recv() {
            let issue = interpreter(&retour.issue, Some(retour.methode));
            self.appliquer(retour.numero, issue);
        }
    }

    fn appliquer(&mut self, numero: u64, issue: Issue) {
        if !self.sequenceur.accepter(numero) {
            return;
        }
        match &issue {
            Issue::Succes(r) => tracing::info!(numero, methode = %r.methode, "résultat reçu"),
            Issue::Erreur(e) => tracing::info!(numero, genre = ?e.genre, "erreur : {}", e.message),
        }
        self.resultat = Some(issue);
        self.focus_entree = true;
    }
}
