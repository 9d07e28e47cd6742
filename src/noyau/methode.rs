// src/noyau/methode.rs
//
// Méthodes numériques + schéma de paramètres
// -----------------------------------------
// Table statique, seule source de vérité pour :
// - la visibilité des champs dans le formulaire (vue.rs)
// - la validation du constructeur de requête (requete.rs)

use std::fmt;

/// Famille d’opération (détermine aussi le point d’accès distant).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Genre {
    Derivee,
    Integrale,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Methode {
    DifferenceAvant,
    DifferenceArriere,
    DifferenceCentrale,
    Riemann,
    Trapezes,
    Simpson,
}

/// Paramètre numérique du formulaire (hors méthode et expression).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Parametre {
    /// Point d’évaluation.
    X,
    /// Pas.
    H,
    BorneInf,
    BorneSup,
    /// Nombre de segments.
    N,
}

/// Nom de champ « méthode » sur le fil.
pub const CHAMP_METHODE: &str = "metode";

/// Nom de champ « expression » sur le fil.
pub const CHAMP_EXPRESSION: &str = "fungsi";

impl Parametre {
    /// Nom du champ sur le fil (form-encoded).
    pub fn nom_fil(self) -> &'static str {
        match self {
            Parametre::X => "x",
            Parametre::H => "h",
            Parametre::BorneInf => "batas_bawah",
            Parametre::BorneSup => "batas_atas",
            Parametre::N => "N",
        }
    }

    pub fn libelle(self) -> &'static str {
        match self {
            Parametre::X => "Point x",
            Parametre::H => "Pas h",
            Parametre::BorneInf => "Borne inférieure",
            Parametre::BorneSup => "Borne supérieure",
            Parametre::N => "Segments N",
        }
    }
}

impl Methode {
    pub const TOUTES: [Methode; 6] = [
        Methode::DifferenceAvant,
        Methode::DifferenceArriere,
        Methode::DifferenceCentrale,
        Methode::Riemann,
        Methode::Trapezes,
        Methode::Simpson,
    ];

    /// Étiquette échangée avec le service.
    pub fn etiquette(self) -> &'static str {
        match self {
            Methode::DifferenceAvant => "forward-difference",
            Methode::DifferenceArriere => "backward-difference",
            Methode::DifferenceCentrale => "central-difference",
            Methode::Riemann => "riemann",
            Methode::Trapezes => "trapezoidal",
            Methode::Simpson => "simpson",
        }
    }

    pub fn depuis_etiquette(s: &str) -> Option<Methode> {
        Methode::TOUTES.into_iter().find(|m| m.etiquette() == s)
    }

    pub fn libelle(self) -> &'static str {
        match self {
            Methode::DifferenceAvant => "Différence avant",
            Methode::DifferenceArriere => "Différence arrière",
            Methode::DifferenceCentrale => "Différence centrale",
            Methode::Riemann => "Riemann",
            Methode::Trapezes => "Trapèzes",
            Methode::Simpson => "Simpson",
        }
    }

    pub fn genre(self) -> Genre {
        match self {
            Methode::DifferenceAvant | Methode::DifferenceArriere | Methode::DifferenceCentrale => {
                Genre::Derivee
            }
            Methode::Riemann | Methode::Trapezes | Methode::Simpson => Genre::Integrale,
        }
    }

    /// Paramètres requis, dans l’ordre de validation.
    ///
    /// Dérivées : x, h. Riemann : bornes + h. Trapèzes/Simpson : bornes + N.
    pub fn parametres(self) -> &'static [Parametre] {
        match self {
            Methode::DifferenceAvant | Methode::DifferenceArriere | Methode::DifferenceCentrale => {
                &[Parametre::X, Parametre::H]
            }
            Methode::Riemann => &[Parametre::BorneInf, Parametre::BorneSup, Parametre::H],
            Methode::Trapezes | Methode::Simpson => {
                &[Parametre::BorneInf, Parametre::BorneSup, Parametre::N]
            }
        }
    }

    #[cfg(test)]
    pub fn requiert(self, p: Parametre) -> bool {
        self.parametres().contains(&p)
    }
}

impl fmt::Display for Methode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.etiquette())
    }
}

impl Genre {
    pub fn libelle(self) -> &'static str {
        match self {
            Genre::Derivee => "Dérivée",
            Genre::Integrale => "Intégrale",
        }
    }
}
