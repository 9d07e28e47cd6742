// src/noyau/reponse.rs
//
// Interprète de réponse
// ---------------------
// Entrée : ce qui est revenu du réseau (ou rien).
// Sortie : succès, ou enregistrement d’erreur uniforme (genre, méthode, message).
//
// Règles :
// - 2xx : présence de `hasil_analitik` => succès ; sinon message => erreur de domaine
// - pas de réponse => échec de transport (message fixe)
// - 400 / 422 / 500 / autre : préfixe fixe + détail du service
// - toute erreur porte une méthode : celle du corps, sinon la locale, sinon "unknown"

use std::fmt;

use serde::Deserialize;

use super::methode::{Genre, Methode};
use super::requete::ErreurValidation;

/// Message de l’échec de transport (aucune réponse reçue).
pub const MESSAGE_INJOIGNABLE: &str = "service unreachable";

/// Méthode affichée quand ni le corps ni le formulaire n’en donnent une.
pub const METHODE_INCONNUE: &str = "unknown";

const PREFIXE_400: &str = "Requête invalide : ";
const PREFIXE_422: &str = "Données refusées par le service :";
const PREFIXE_500: &str = "Erreur interne du service : ";
const REPONSE_INATTENDUE: &str = "réponse inattendue du service";

/// Ce que la couche réseau rapporte.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum IssueReseau {
    /// Aucune réponse (DNS, connexion refusée, délai dépassé…).
    SansReponse { cause: String },
    /// Réponse reçue : statut HTTP + corps brut.
    Recue { statut: u16, corps: String },
}

/// Résultat de calcul (variante succès).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ResultatCalcul {
    pub methode: String,
    /// Famille du calcul : méthode locale, sinon étiquette du corps si reconnue.
    pub genre: Option<Genre>,
    pub expression: String,
    /// Dérivée ou primitive selon la méthode.
    pub expression_transformee: String,
    pub valeur_numerique: String,
    pub valeur_analytique: String,
    pub erreur_relative: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GenreErreur {
    /// Détectée localement, jamais envoyée.
    Validation,
    /// Le service a compris mais refuse la mathématique.
    Domaine,
    /// Aucune réponse.
    Transport,
    /// 400
    RequeteInvalide,
    /// 422
    DonneesRefusees,
    /// 500
    Serveur,
    /// Autre statut.
    Autre(u16),
}

/// Enregistrement d’erreur uniforme (pour l’affichage).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ErreurCalcul {
    pub genre: GenreErreur,
    pub methode: String,
    pub message: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Issue {
    Succes(ResultatCalcul),
    Erreur(ErreurCalcul),
}

impl ErreurCalcul {
    pub fn validation(e: &ErreurValidation, methode: Option<Methode>) -> Self {
        Self {
            genre: GenreErreur::Validation,
            methode: methode_ou_inconnue(None, methode),
            message: e.to_string(),
        }
    }
}

impl fmt::Display for ErreurCalcul {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.methode, self.message)
    }
}

/* ------------------------ Corps JSON (tolérant) ------------------------ */

/// Valeur « lâche » : nombre ou texte selon l’humeur du service.
#[derive(Clone, Debug, Deserialize)]
#[serde(untagged)]
enum Valeur {
    Texte(String),
    Nombre(serde_json::Number),
    Booleen(bool),
}

impl Valeur {
    /// `null`, tableaux et objets ne comptent pas comme valeur.
    fn depuis_json(v: &serde_json::Value) -> Option<Self> {
        match v {
            serde_json::Value::String(s) => Some(Valeur::Texte(s.clone())),
            serde_json::Value::Number(n) => Some(Valeur::Nombre(n.clone())),
            serde_json::Value::Bool(b) => Some(Valeur::Booleen(*b)),
            _ => None,
        }
    }

    fn en_texte(&self) -> String {
        match self {
            Valeur::Texte(s) => s.clone(),
            Valeur::Nombre(n) => n.to_string(),
            Valeur::Booleen(b) => b.to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct DetailChamp {
    #[serde(default)]
    loc: Vec<Valeur>,
    msg: String,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Detail {
    Champs(Vec<DetailChamp>),
    Texte(String),
    Autre(serde_json::Value),
}

/// Corps lu champ par champ : un champ absent, mal typé ou doublé par son
/// alias n’invalide jamais les autres.
#[derive(Debug, Default)]
struct Corps {
    metode: Option<String>,
    fungsi: Option<Valeur>,
    turunan: Option<Valeur>,
    hasil_numerik: Option<Valeur>,
    hasil_analitik: Option<Valeur>,
    error_relatif: Option<Valeur>,
    message: Option<String>,
    detail: Option<Detail>,
}

impl Corps {
    fn lire(brut: &str) -> Self {
        let carte = match serde_json::from_str::<serde_json::Value>(brut) {
            Ok(serde_json::Value::Object(carte)) => carte,
            Ok(_) => {
                tracing::debug!("corps de réponse JSON mais pas un objet");
                return Corps::default();
            }
            Err(e) => {
                tracing::debug!(erreur = %e, "corps de réponse non JSON");
                return Corps::default();
            }
        };

        // Nom principal d’abord, puis les alias.
        let champ = |noms: &[&str]| {
            noms.iter()
                .find_map(|nom| carte.get(*nom).and_then(Valeur::depuis_json))
        };

        Corps {
            metode: champ(&["metode"]).map(|v| v.en_texte()),
            fungsi: champ(&["fungsi"]),
            turunan: champ(&["turunan", "antiturunan"]),
            hasil_numerik: champ(&["hasil_numerik"]),
            hasil_analitik: champ(&["hasil_analitik"]),
            error_relatif: champ(&["error_relatif", "error"]),
            message: champ(&["message", "pesan"]).map(|v| v.en_texte()),
            detail: carte
                .get("detail")
                .filter(|d| !d.is_null())
                .and_then(|d| Detail::deserialize(d).ok()),
        }
    }
}

/* ------------------------ Interprétation ------------------------ */

/// Classe une issue réseau. `locale` = méthode choisie dans le formulaire.
pub fn interpreter(issue: &IssueReseau, locale: Option<Methode>) -> Issue {
    match issue {
        IssueReseau::SansReponse { cause } => {
            tracing::info!(cause = %cause, "aucune réponse du service");
            Issue::Erreur(ErreurCalcul {
                genre: GenreErreur::Transport,
                methode: methode_ou_inconnue(None, locale),
                message: MESSAGE_INJOIGNABLE.to_string(),
            })
        }
        IssueReseau::Recue { statut, corps } => {
            let corps = Corps::lire(corps);
            if (200..300).contains(statut) {
                interpreter_succes(corps, locale)
            } else {
                Issue::Erreur(interpreter_statut(*statut, corps, locale))
            }
        }
    }
}

fn interpreter_succes(corps: Corps, locale: Option<Methode>) -> Issue {
    let methode = methode_ou_inconnue(corps.metode.as_deref(), locale);

    if let Some(analytique) = corps.hasil_analitik {
        let genre = locale
            .or_else(|| corps.metode.as_deref().and_then(Methode::depuis_etiquette))
            .map(Methode::genre);
        let texte = |v: Option<Valeur>| v.map(|v| v.en_texte()).unwrap_or_default();
        return Issue::Succes(ResultatCalcul {
            methode,
            genre,
            expression: texte(corps.fungsi),
            expression_transformee: texte(corps.turunan),
            valeur_numerique: texte(corps.hasil_numerik),
            valeur_analytique: analytique.en_texte(),
            erreur_relative: texte(corps.error_relatif),
        });
    }

    let (genre, message) = match corps.message {
        Some(m) => (GenreErreur::Domaine, m),
        None => (GenreErreur::Autre(200), REPONSE_INATTENDUE.to_string()),
    };

    Issue::Erreur(ErreurCalcul {
        genre,
        methode,
        message,
    })
}

fn interpreter_statut(statut: u16, corps: Corps, locale: Option<Methode>) -> ErreurCalcul {
    let methode = methode_ou_inconnue(corps.metode.as_deref(), locale);
    let detail = corps.detail;

    let (genre, message) = match statut {
        400 => (
            GenreErreur::RequeteInvalide,
            format!("{PREFIXE_400}{}", detail_texte(detail.as_ref())),
        ),
        422 => (GenreErreur::DonneesRefusees, message_422(detail.as_ref())),
        500 => (
            GenreErreur::Serveur,
            format!("{PREFIXE_500}{}", detail_texte(detail.as_ref())),
        ),
        autre => {
            let msg = match detail.as_ref() {
                Some(d) => detail_texte(Some(d)),
                None => corps
                    .message
                    .unwrap_or_else(|| format!("erreur inconnue (HTTP {autre})")),
            };
            (GenreErreur::Autre(autre), msg)
        }
    };

    ErreurCalcul {
        genre,
        methode,
        message,
    }
}

/// 422 : une ligne "champ: message" par enregistrement.
fn message_422(detail: Option<&Detail>) -> String {
    match detail {
        Some(Detail::Champs(champs)) if !champs.is_empty() => {
            let lignes: Vec<String> = champs
                .iter()
                .map(|c| {
                    let champ = c.loc.last().map(Valeur::en_texte).unwrap_or_default();
                    format!("{champ}: {}", c.msg)
                })
                .collect();
            format!("{PREFIXE_422}\n{}", lignes.join("\n"))
        }
        autre => format!("{PREFIXE_422} {}", detail_texte(autre)),
    }
}

fn detail_texte(detail: Option<&Detail>) -> String {
    match detail {
        Some(Detail::Texte(s)) => s.clone(),
        Some(Detail::Champs(champs)) => champs
            .iter()
            .map(|c| c.msg.as_str())
            .collect::<Vec<_>>()
            .join("; "),
        Some(Detail::Autre(v)) => v.to_string(),
        None => "détail indisponible".to_string(),
    }
}

fn methode_ou_inconnue(corps: Option<&str>, locale: Option<Methode>) -> String {
    corps
        .filter(|m| !m.trim().is_empty())
        .map(str::to_string)
        .or_else(|| locale.map(|m| m.etiquette().to_string()))
        .unwrap_or_else(|| METHODE_INCONNUE.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recue(statut: u16, corps: &str) -> IssueReseau {
        IssueReseau::Recue {
            statut,
            corps: corps.to_string(),
        }
    }

    fn erreur(i: Issue) -> ErreurCalcul {
        match i {
            Issue::Erreur(e) => e,
            Issue::Succes(r) => panic!("attendu une erreur, reçu {r:?}"),
        }
    }

    #[test]
    fn succes_simpson() {
        let corps = r#"{"hasil_analitik":"5","hasil_numerik":"5.01","metode":"simpson","error_relatif":"0.002"}"#;
        let Issue::Succes(r) = interpreter(&recue(200, corps), None) else {
            panic!("succès attendu");
        };
        assert_eq!(r.valeur_analytique, "5");
        assert_eq!(r.valeur_numerique, "5.01");
        assert_eq!(r.methode, "simpson");
        assert_eq!(r.erreur_relative, "0.002");
    }

    #[test]
    fn valeurs_numeriques_acceptees() {
        let corps = r#"{"hasil_analitik":2.0,"hasil_numerik":2.001,"error":0.0005,"turunan":"2x"}"#;
        let Issue::Succes(r) = interpreter(&recue(200, corps), Some(Methode::DifferenceAvant))
        else {
            panic!("succès attendu");
        };
        assert_eq!(r.valeur_analytique, "2.0");
        assert_eq!(r.valeur_numerique, "2.001");
        assert_eq!(r.erreur_relative, "0.0005");
        assert_eq!(r.expression_transformee, "2x");
        assert_eq!(r.methode, "forward-difference");
    }

    #[test]
    fn champ_et_alias_ensemble_restent_un_succes() {
        let corps = r#"{"hasil_analitik":2.0,"hasil_numerik":2.01,"error_relatif":0.005,"error":"0.5%","metode":"simpson"}"#;
        let Issue::Succes(r) = interpreter(&recue(200, corps), Some(Methode::Simpson)) else {
            panic!("succès attendu");
        };
        assert_eq!(r.valeur_analytique, "2.0");
        assert_eq!(r.erreur_relative, "0.005");
    }

    #[test]
    fn champ_annexe_mal_type_ignore() {
        let corps = r#"{"hasil_analitik":"1/3","fungsi":["x"],"turunan":{"a":1},"hasil_numerik":null}"#;
        let Issue::Succes(r) = interpreter(&recue(200, corps), Some(Methode::Trapezes)) else {
            panic!("succès attendu");
        };
        assert_eq!(r.valeur_analytique, "1/3");
        assert_eq!(r.expression, "");
        assert_eq!(r.expression_transformee, "");
        assert_eq!(r.valeur_numerique, "");
    }

    #[test]
    fn message_et_pesan_ensemble_restent_domaine() {
        let corps = r#"{"message":"a","pesan":"b","metode":"riemann"}"#;
        let e = erreur(interpreter(&recue(200, corps), None));
        assert_eq!(e.genre, GenreErreur::Domaine);
        assert_eq!(e.message, "a");
    }

    #[test]
    fn genre_vient_de_la_methode_locale() {
        let corps = r#"{"metode":"Integrasi Simpson","hasil_analitik":1}"#;
        let Issue::Succes(r) = interpreter(&recue(200, corps), Some(Methode::Simpson)) else {
            panic!("succès attendu");
        };
        assert_eq!(r.methode, "Integrasi Simpson");
        assert_eq!(r.genre, Some(Genre::Integrale));

        // Sans méthode locale : étiquette du corps si elle est reconnue.
        let corps = r#"{"metode":"backward-difference","hasil_analitik":1}"#;
        let Issue::Succes(r) = interpreter(&recue(200, corps), None) else {
            panic!("succès attendu");
        };
        assert_eq!(r.genre, Some(Genre::Derivee));
    }

    #[test]
    fn erreur_de_domaine_en_200() {
        let corps = r#"{"message":"fungsi tidak terdefinisi","metode":"riemann"}"#;
        let e = erreur(interpreter(&recue(200, corps), Some(Methode::Simpson)));
        assert_eq!(e.genre, GenreErreur::Domaine);
        assert_eq!(e.methode, "riemann");
        assert_eq!(e.message, "fungsi tidak terdefinisi");
    }

    #[test]
    fn erreur_de_domaine_pesan_methode_locale() {
        let corps = r#"{"hasil_numerik":1.0,"pesan":"Integral analitik tidak dapat dihitung"}"#;
        let e = erreur(interpreter(&recue(200, corps), Some(Methode::Trapezes)));
        assert_eq!(e.genre, GenreErreur::Domaine);
        assert_eq!(e.methode, "trapezoidal");
    }

    #[test]
    fn corps_2xx_vide_n_est_pas_un_succes() {
        let e = erreur(interpreter(&recue(200, "{}"), None));
        assert_eq!(e.genre, GenreErreur::Autre(200));
        assert_eq!(e.methode, METHODE_INCONNUE);
    }

    #[test]
    fn statut_422_liste_les_champs() {
        let corps = r#"{"detail":[{"loc":["body","x"],"msg":"field required"},{"loc":["body",0,"h"],"msg":"value is not a valid float"}]}"#;
        let e = erreur(interpreter(&recue(422, corps), Some(Methode::DifferenceAvant)));
        assert_eq!(e.genre, GenreErreur::DonneesRefusees);
        assert!(e.message.contains("x: field required"), "{}", e.message);
        assert!(e.message.contains("\nh: value is not a valid float"));
        assert_eq!(e.methode, "forward-difference");
    }

    #[test]
    fn statuts_400_500_et_autres() {
        let e = erreur(interpreter(
            &recue(400, r#"{"detail":"batas_bawah harus lebih kecil dari batas_atas."}"#),
            Some(Methode::Riemann),
        ));
        assert_eq!(e.genre, GenreErreur::RequeteInvalide);
        assert_eq!(
            e.message,
            "Requête invalide : batas_bawah harus lebih kecil dari batas_atas."
        );

        let e = erreur(interpreter(&recue(500, r#"{"detail":"boom"}"#), None));
        assert_eq!(e.genre, GenreErreur::Serveur);
        assert_eq!(e.message, "Erreur interne du service : boom");
        assert_eq!(e.methode, METHODE_INCONNUE);

        let e = erreur(interpreter(&recue(404, r#"{"detail":"Not Found"}"#), None));
        assert_eq!(e.genre, GenreErreur::Autre(404));
        assert_eq!(e.message, "Not Found");

        let e = erreur(interpreter(&recue(502, "<html>bad gateway</html>"), None));
        assert_eq!(e.message, "erreur inconnue (HTTP 502)");
    }

    #[test]
    fn sans_reponse_message_fixe() {
        let issue = IssueReseau::SansReponse {
            cause: "connection refused".into(),
        };
        let e = erreur(interpreter(&issue, Some(Methode::Simpson)));
        assert_eq!(e.genre, GenreErreur::Transport);
        assert_eq!(e.message, MESSAGE_INJOIGNABLE);
        assert_eq!(e.methode, "simpson");
    }

    #[test]
    fn validation_locale_uniforme() {
        let e = ErreurCalcul::validation(&ErreurValidation::ExpressionVide, None);
        assert_eq!(e.genre, GenreErreur::Validation);
        assert_eq!(e.methode, METHODE_INCONNUE);
        assert_eq!(e.to_string(), "[unknown] expression vide");
    }
}
