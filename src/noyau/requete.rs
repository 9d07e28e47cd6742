// src/noyau/requete.rs
//
// Formulaire + constructeur de requête
// ------------------------------------
// Les champs numériques sont un type somme indexé par la famille de méthode :
// chaque variante porte EXACTEMENT ses paramètres. Changer de méthode
// reconstruit la variante (les paramètres hors schéma disparaissent).
//
// Validation dans un ordre fixe, arrêt au premier manque :
//   méthode -> expression -> paramètres du schéma (dans l’ordre du schéma)

use thiserror::Error;

use super::methode::{Genre, Methode, Parametre, CHAMP_EXPRESSION, CHAMP_METHODE};

#[derive(Debug, Error)]
pub enum ErreurValidation {
    #[error("aucune méthode choisie")]
    MethodeAbsente,

    #[error("expression vide")]
    ExpressionVide,

    #[error("champ requis manquant : {}", .0.nom_fil())]
    ChampManquant(Parametre),

    #[error("encodage du formulaire impossible : {0}")]
    Encodage(#[from] serde_urlencoded::ser::Error),
}

impl ErreurValidation {
    /// Champ fautif (nom sur le fil), si l’erreur en désigne un.
    pub fn champ(&self) -> Option<&'static str> {
        match self {
            ErreurValidation::MethodeAbsente => Some(CHAMP_METHODE),
            ErreurValidation::ExpressionVide => Some(CHAMP_EXPRESSION),
            ErreurValidation::ChampManquant(p) => Some(p.nom_fil()),
            ErreurValidation::Encodage(_) => None,
        }
    }
}

/// Champs numériques du formulaire, par famille de méthode.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Champs {
    #[default]
    Aucun,
    Derivee {
        x: String,
        h: String,
    },
    Riemann {
        borne_inf: String,
        borne_sup: String,
        h: String,
    },
    Segments {
        borne_inf: String,
        borne_sup: String,
        n: String,
    },
}

impl Champs {
    /// Variante vide adaptée à `methode`.
    pub fn pour(methode: Methode) -> Self {
        match methode {
            Methode::DifferenceAvant | Methode::DifferenceArriere | Methode::DifferenceCentrale => {
                Champs::Derivee {
                    x: String::new(),
                    h: String::new(),
                }
            }
            Methode::Riemann => Champs::Riemann {
                borne_inf: String::new(),
                borne_sup: String::new(),
                h: String::new(),
            },
            Methode::Trapezes | Methode::Simpson => Champs::Segments {
                borne_inf: String::new(),
                borne_sup: String::new(),
                n: String::new(),
            },
        }
    }

    pub fn valeur(&self, p: Parametre) -> Option<&str> {
        let v = match (self, p) {
            (Champs::Derivee { x, .. }, Parametre::X) => x,
            (Champs::Derivee { h, .. }, Parametre::H) => h,
            (Champs::Riemann { borne_inf, .. }, Parametre::BorneInf) => borne_inf,
            (Champs::Riemann { borne_sup, .. }, Parametre::BorneSup) => borne_sup,
            (Champs::Riemann { h, .. }, Parametre::H) => h,
            (Champs::Segments { borne_inf, .. }, Parametre::BorneInf) => borne_inf,
            (Champs::Segments { borne_sup, .. }, Parametre::BorneSup) => borne_sup,
            (Champs::Segments { n, .. }, Parametre::N) => n,
            _ => return None,
        };
        Some(v.as_str())
    }

    pub fn valeur_mut(&mut self, p: Parametre) -> Option<&mut String> {
        let v = match (self, p) {
            (Champs::Derivee { x, .. }, Parametre::X) => x,
            (Champs::Derivee { h, .. }, Parametre::H) => h,
            (Champs::Riemann { borne_inf, .. }, Parametre::BorneInf) => borne_inf,
            (Champs::Riemann { borne_sup, .. }, Parametre::BorneSup) => borne_sup,
            (Champs::Riemann { h, .. }, Parametre::H) => h,
            (Champs::Segments { borne_inf, .. }, Parametre::BorneInf) => borne_inf,
            (Champs::Segments { borne_sup, .. }, Parametre::BorneSup) => borne_sup,
            (Champs::Segments { n, .. }, Parametre::N) => n,
            _ => return None,
        };
        Some(v)
    }

    /// Re-forme les champs pour `methode` : on garde les valeurs que les deux
    /// schémas partagent, le reste est perdu.
    pub fn convertir(&self, methode: Methode) -> Self {
        let mut nouveaux = Champs::pour(methode);
        for &p in methode.parametres() {
            if let (Some(ancien), Some(cible)) = (self.valeur(p), nouveaux.valeur_mut(p)) {
                cible.push_str(ancien);
            }
        }
        nouveaux
    }
}

/// État du formulaire (une instance par écran).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Formulaire {
    methode: Option<Methode>,
    pub champs: Champs,
}

impl Formulaire {
    pub fn methode(&self) -> Option<Methode> {
        self.methode
    }

    pub fn choisir_methode(&mut self, methode: Methode) {
        if self.methode == Some(methode) {
            return;
        }
        self.champs = self.champs.convertir(methode);
        self.methode = Some(methode);
    }

    pub fn vider(&mut self) {
        *self = Formulaire::default();
    }
}

/// Requête prête à partir : point d’accès + corps form-encoded.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Requete {
    pub methode: Methode,
    pub champs: Vec<(&'static str, String)>,
    pub corps: String,
}

impl Requete {
    pub fn genre(&self) -> Genre {
        self.methode.genre()
    }

    #[cfg(test)]
    pub fn champ(&self, nom: &str) -> Option<&str> {
        self.champs
            .iter()
            .find(|(n, _)| *n == nom)
            .map(|(_, v)| v.as_str())
    }
}

/// Construit la requête ou signale le PREMIER champ manquant.
pub fn construire(
    methode: Option<Methode>,
    expression: &str,
    champs: &Champs,
) -> Result<Requete, ErreurValidation> {
    let methode = methode.ok_or(ErreurValidation::MethodeAbsente)?;

    let expression = expression.trim();
    if expression.is_empty() {
        return Err(ErreurValidation::ExpressionVide);
    }

    let mut paires: Vec<(&'static str, String)> =
        Vec::with_capacity(2 + methode.parametres().len());
    paires.push((CHAMP_METHODE, methode.etiquette().to_string()));
    paires.push((CHAMP_EXPRESSION, expression.to_string()));

    for &p in methode.parametres() {
        let v = champs
            .valeur(p)
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .ok_or(ErreurValidation::ChampManquant(p))?;
        paires.push((p.nom_fil(), v.to_string()));
    }

    let corps = serde_urlencoded::to_string(&paires)?;

    Ok(Requete {
        methode,
        champs: paires,
        corps,
    })
}
