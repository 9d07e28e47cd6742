//! Noyau : édition d’expression + orchestration requête/réponse
//!
//! Organisation interne :
//! - filtre.rs     : grammaire restreinte (caractères + bornes \frac / ^)
//! - expression.rs : modèle (brut / accepté)
//! - editeur.rs    : adaptateur widget math <-> modèle (trait WidgetMath)
//! - apercu.rs     : rendu lisible de l’expression acceptée (mémo)
//! - methode.rs    : méthodes + schéma de paramètres
//! - requete.rs    : formulaire + constructeur de requête
//! - reponse.rs    : interprète de réponse (succès / domaine / transport / HTTP)
//! - soumission.rs : numérotation des envois (la plus récente gagne)
//!
//! Aucun calcul numérique ici : le service distant s’en charge.

pub mod apercu;
pub mod editeur;
pub mod expression;
pub mod filtre;
pub mod methode;
pub mod reponse;
pub mod requete;
pub mod soumission;

#[cfg(test)]
mod tests_proprietes;

#[cfg(test)]
mod tests_aller_retour;

// API publique minimale
pub use editeur::{AdaptateurEditeur, WidgetMath};
pub use methode::{Genre, Methode};
pub use reponse::{interpreter, ErreurCalcul, Issue, IssueReseau, ResultatCalcul};
pub use requete::{construire, Formulaire, Requete};
pub use soumission::Sequenceur;
