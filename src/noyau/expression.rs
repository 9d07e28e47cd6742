// src/noyau/expression.rs
//
// Modèle d’expression : dernière édition tentée + dernière forme acceptée.
//
// Contrat :
// - `accepte` est toujours valide pour la grammaire (filtre.rs)
// - `accepte` ne change QUE si l’édition passe le filtre

use super::filtre::filtrer;

/// Expression par défaut (même formule que l’écran d’origine).
pub const EXPRESSION_DEFAUT: &str = "\\frac{1}{2}x^2+3x+4";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Expression {
    brut: String,
    accepte: String,
}

impl Default for Expression {
    fn default() -> Self {
        Self::new(EXPRESSION_DEFAUT)
    }
}

impl Expression {
    /// Nouvelle expression : la valeur initiale passe elle aussi par le filtre.
    pub fn new(initiale: &str) -> Self {
        let accepte = filtrer(initiale, "");
        Self {
            brut: initiale.to_string(),
            accepte,
        }
    }

    pub fn brut(&self) -> &str {
        &self.brut
    }

    pub fn accepte(&self) -> &str {
        &self.accepte
    }

    /// Propose une édition. Retourne `true` si `accepte` a changé.
    pub fn proposer(&mut self, candidat: &str) -> bool {
        self.brut = candidat.to_string();

        let filtre = filtrer(candidat, &self.accepte);
        if filtre == self.accepte {
            return false;
        }

        self.accepte = filtre;
        true
    }
}
