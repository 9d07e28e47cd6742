//! Aller-retour complet (sans réseau) :
//! édition -> filtre -> formulaire -> requête -> réponse simulée -> affichage.
//!
//! Le service est remplacé par un écho : il renvoie `fungsi` tel que reçu.

use super::editeur::{AdaptateurEditeur, Changement, WidgetMath};
use super::expression::Expression;
use super::methode::{Methode, Parametre};
use super::reponse::{interpreter, Issue, IssueReseau};
use super::requete::{construire, Formulaire};
use super::soumission::Sequenceur;

struct ChampTexte(String);

impl WidgetMath for ChampTexte {
    fn valeur(&self) -> String {
        self.0.clone()
    }
    fn definir_valeur(&mut self, latex: &str) {
        self.0 = latex.to_string();
    }
}

/// Service factice : lit le corps form-encoded et renvoie un succès JSON.
fn service_echo(corps: &str) -> IssueReseau {
    let paires: Vec<(String, String)> =
        serde_urlencoded::from_str(corps).unwrap_or_else(|e| panic!("corps illisible: {e}"));
    let valeur = |nom: &str| {
        paires
            .iter()
            .find(|(n, _)| n == nom)
            .map(|(_, v)| v.clone())
            .unwrap_or_default()
    };

    let json = serde_json::json!({
        "fungsi": valeur("fungsi"),
        "turunan": "x",
        "metode": valeur("metode"),
        "hasil_numerik": 1.0,
        "hasil_analitik": 1,
        "error_relatif": "0",
    });

    IssueReseau::Recue {
        statut: 200,
        corps: json.to_string(),
    }
}

#[test]
fn expression_filtree_revient_inchangee() {
    let mut editeur = AdaptateurEditeur::new(Expression::new("x"));
    let mut widget = ChampTexte("x".into());

    widget.0 = "\\frac{1}{2} x^2 + 3x, y = 4.5 ∀".into();
    assert_eq!(editeur.sur_changement(&mut widget), Changement::Accepte);
    let accepte = editeur.accepte().to_string();
    assert_eq!(accepte, "\\frac{1}{2}x^2+3x,y=4.5");

    let mut formulaire = Formulaire::default();
    formulaire.choisir_methode(Methode::DifferenceAvant);
    *formulaire.champs.valeur_mut(Parametre::X).unwrap() = "2".into();
    *formulaire.champs.valeur_mut(Parametre::H).unwrap() = "0.01".into();

    let requete = construire(formulaire.methode(), &accepte, &formulaire.champs).unwrap();

    match interpreter(&service_echo(&requete.corps), formulaire.methode()) {
        Issue::Succes(r) => {
            assert_eq!(r.expression, accepte);
            assert_eq!(r.methode, "forward-difference");
            assert_eq!(r.valeur_analytique, "1");
        }
        Issue::Erreur(e) => panic!("succès attendu, reçu {e}"),
    }
}

#[test]
fn deux_envois_desordonnes_le_plus_recent_reste() {
    let mut seq = Sequenceur::default();
    let mut affiche: Option<Issue> = None;

    let mut formulaire = Formulaire::default();
    formulaire.choisir_methode(Methode::Simpson);
    *formulaire.champs.valeur_mut(Parametre::BorneInf).unwrap() = "0".into();
    *formulaire.champs.valeur_mut(Parametre::BorneSup).unwrap() = "1".into();
    *formulaire.champs.valeur_mut(Parametre::N).unwrap() = "10".into();

    let r1 = construire(formulaire.methode(), "x^2", &formulaire.champs).unwrap();
    let n1 = seq.emettre();
    let r2 = construire(formulaire.methode(), "x^3", &formulaire.champs).unwrap();
    let n2 = seq.emettre();

    // La seconde réponse arrive d’abord, puis la première.
    for (n, corps) in [(n2, &r2.corps), (n1, &r1.corps)] {
        if seq.accepter(n) {
            affiche = Some(interpreter(&service_echo(corps), formulaire.methode()));
        }
    }

    match affiche {
        Some(Issue::Succes(r)) => assert_eq!(r.expression, "x^3"),
        autre => panic!("attendu le succès de x^3, reçu {autre:?}"),
    }
}
