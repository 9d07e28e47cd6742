// src/noyau/editeur.rs
//
// Adaptateur d’éditeur (widget math riche <-> modèle d’expression)
// ---------------------------------------------------------------
// Le widget appartient à l’hôte (vue egui, champ web, etc.).
// L’adaptateur ne le possède jamais : chaque notification lui passe
// `&mut dyn WidgetMath`, et toute synchro passe par cette interface étroite.
//
// Contrats :
// - changement widget -> filtre -> modèle (+ rappel) OU retour visuel à `accepte`
// - jamais de ré-écriture d’une valeur que le widget détient déjà (anti-boucle)
// - le miroir texte passe par le même filtre, puis pousse dans le widget

use super::expression::Expression;

/// Modèle « exposant » inséré par le bouton xⁿ.
pub const GABARIT_EXPOSANT: &str = "^n";

/// Modèle « fraction » inséré par le bouton a/b.
pub const GABARIT_FRACTION: &str = "\\frac{1}{2}";

/// Capacité minimale exposée par un widget d’édition math.
///
/// Les notifications (changement, focus, flou) sont relayées par l’hôte vers
/// `AdaptateurEditeur::sur_changement`, `sur_focus` et `sur_flou`.
pub trait WidgetMath {
    /// Valeur textuelle courante (LaTeX).
    fn valeur(&self) -> String;

    /// Écriture impérative de la valeur.
    fn definir_valeur(&mut self, latex: &str);
}

/// Issue d’une notification de changement.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Changement {
    /// Le modèle a une nouvelle valeur acceptée.
    Accepte,
    /// Édition refusée : le widget a été ramené à la valeur acceptée.
    Rejete,
    /// Rien à faire (le widget montre déjà la valeur acceptée).
    Inchange,
}

type Rappel = Box<dyn FnMut(&str)>;

pub struct AdaptateurEditeur {
    expression: Expression,
    focus: bool,
    rappel: Option<Rappel>,
}

impl Default for AdaptateurEditeur {
    fn default() -> Self {
        Self::new(Expression::default())
    }
}

impl std::fmt::Debug for AdaptateurEditeur {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdaptateurEditeur")
            .field("expression", &self.expression)
            .field("focus", &self.focus)
            .field("rappel", &self.rappel.is_some())
            .finish()
    }
}

impl AdaptateurEditeur {
    pub fn new(expression: Expression) -> Self {
        Self {
            expression,
            focus: false,
            rappel: None,
        }
    }

    /// Rappel appelé avec la nouvelle valeur acceptée, à chaque changement.
    pub fn avec_rappel(mut self, rappel: impl FnMut(&str) + 'static) -> Self {
        self.rappel = Some(Box::new(rappel));
        self
    }

    pub fn accepte(&self) -> &str {
        self.expression.accepte()
    }

    pub fn a_le_focus(&self) -> bool {
        self.focus
    }

    pub fn sur_focus(&mut self) {
        self.focus = true;
    }

    pub fn sur_flou(&mut self) {
        self.focus = false;
    }

    /// Montage du widget : on lui pousse la valeur acceptée (si besoin).
    pub fn attacher(&self, widget: &mut dyn WidgetMath) {
        pousser_si_different(widget, self.expression.accepte());
    }

    /// Notification « l’utilisateur a modifié le widget ».
    pub fn sur_changement(&mut self, widget: &mut dyn WidgetMath) -> Changement {
        let valeur = widget.valeur();
        if valeur == self.expression.accepte() {
            return Changement::Inchange;
        }
        self.appliquer(&valeur, widget)
    }

    /// Bouton xⁿ : ajoute le gabarit puis rejoue le pipeline d’édition.
    pub fn inserer_exposant(&mut self, widget: &mut dyn WidgetMath) -> Changement {
        self.inserer(widget, GABARIT_EXPOSANT)
    }

    /// Bouton a/b : ajoute le gabarit puis rejoue le pipeline d’édition.
    pub fn inserer_fraction(&mut self, widget: &mut dyn WidgetMath) -> Changement {
        self.inserer(widget, GABARIT_FRACTION)
    }

    /// Édition depuis la vue texte secondaire.
    pub fn sur_texte_brut(&mut self, texte: &str, widget: &mut dyn WidgetMath) -> Changement {
        if texte == self.expression.accepte() {
            pousser_si_different(widget, texte);
            return Changement::Inchange;
        }
        self.appliquer(texte, widget)
    }

    /// Recopie la valeur acceptée dans le tampon de la vue texte (si besoin).
    pub fn synchroniser_miroir(&self, miroir: &mut String) {
        if miroir.as_str() != self.expression.accepte() {
            miroir.clear();
            miroir.push_str(self.expression.accepte());
        }
    }

    /// Remplace l’expression (remise à zéro du formulaire).
    pub fn reinitialiser(&mut self, expression: Expression, widget: &mut dyn WidgetMath) {
        let change = expression.accepte() != self.expression.accepte();
        self.expression = expression;
        pousser_si_different(widget, self.expression.accepte());
        if change {
            self.notifier();
        }
    }

    fn inserer(&mut self, widget: &mut dyn WidgetMath, gabarit: &str) -> Changement {
        let mut valeur = widget.valeur();
        valeur.push_str(gabarit);
        widget.definir_valeur(&valeur);
        self.sur_changement(widget)
    }

    fn appliquer(&mut self, candidat: &str, widget: &mut dyn WidgetMath) -> Changement {
        let change = self.expression.proposer(candidat);

        // Accepté ou non, le widget doit montrer la forme acceptée
        // (forme nettoyée si acceptée, ancienne valeur si rejetée).
        pousser_si_different(widget, self.expression.accepte());

        if change {
            self.notifier();
            Changement::Accepte
        } else {
            tracing::debug!(
                brut = self.expression.brut(),
                "édition ramenée à la valeur acceptée"
            );
            Changement::Rejete
        }
    }

    fn notifier(&mut self) {
        if let Some(rappel) = self.rappel.as_mut() {
            rappel(self.expression.accepte());
        }
    }
}

fn pousser_si_different(widget: &mut dyn WidgetMath, valeur: &str) {
    if widget.valeur() != valeur {
        widget.definir_valeur(valeur);
    }
}
