// src/noyau/apercu.rs
//
// Aperçu « joli » de l’expression acceptée (lecture seule)
// -------------------------------------------------------
// \frac{1}{2}x^2+3x  ->  1/2·x²+3x   (approximativement)
//
// Transformation pure. Le mémo `Apercu` ne la relance que si la valeur
// acceptée change (pas de recalcul à chaque frame).

/// Profondeur de groupes rendue ; au-delà le texte reste brut.
/// (l’écho `fungsi` du service n’est pas borné par le filtre)
pub const PROFONDEUR_MAX: usize = 16;

/// Mémo : (source acceptée -> rendu).
#[derive(Clone, Debug, Default)]
pub struct Apercu {
    source: Option<String>,
    rendu: String,
    recalculs: usize,
}

impl Apercu {
    /// Rendu courant ; recalcule seulement si `accepte` a changé.
    pub fn actualiser(&mut self, accepte: &str) -> &str {
        if self.source.as_deref() != Some(accepte) {
            self.rendu = rendre(accepte);
            self.source = Some(accepte.to_string());
            self.recalculs += 1;
        }
        &self.rendu
    }

    #[cfg(test)]
    pub fn recalculs(&self) -> usize {
        self.recalculs
    }
}

/// LaTeX restreint -> texte lisible (Unicode).
pub fn rendre(latex: &str) -> String {
    let chars: Vec<char> = latex.chars().collect();
    let mut out = String::with_capacity(latex.len());
    rendre_dans(&chars, &mut out, 0);
    out
}

fn rendre_dans(chars: &[char], out: &mut String, profondeur: usize) {
    if profondeur > PROFONDEUR_MAX {
        out.extend(chars);
        return;
    }

    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];

        if c == '\\' {
            let (commande, fin) = lire_commande(chars, i + 1);
            i = fin;
            match commande.as_str() {
                "frac" => {
                    let (num, apres_num) = lire_groupe(chars, i, profondeur);
                    let (den, apres_den) = lire_groupe(chars, apres_num, profondeur);
                    i = apres_den;
                    ecrire_operande(&num, out);
                    out.push('/');
                    ecrire_operande(&den, out);
                    // facteur collé juste après une fraction : on marque le produit
                    if i < chars.len() && (chars[i].is_ascii_alphanumeric() || chars[i] == '(') {
                        out.push('·');
                    }
                }
                "cdot" | "times" => out.push('·'),
                "left" | "right" => {}
                "pi" => out.push('π'),
                // commande inconnue : on la laisse visible
                autre => {
                    out.push('\\');
                    out.push_str(autre);
                }
            }
            continue;
        }

        if c == '^' {
            let (exposant, fin) = lire_groupe(chars, i + 1, profondeur);
            i = fin;
            match en_exposant(&exposant) {
                Some(sup) => out.push_str(&sup),
                None => {
                    out.push('^');
                    ecrire_operande(&exposant, out);
                }
            }
            continue;
        }

        if c == '{' || c == '}' {
            i += 1;
            continue;
        }

        out.push(c);
        i += 1;
    }
}

/// Nom de commande après `\` : lettres ASCII.
fn lire_commande(chars: &[char], debut: usize) -> (String, usize) {
    let mut fin = debut;
    while fin < chars.len() && chars[fin].is_ascii_alphabetic() {
        fin += 1;
    }
    (chars[debut..fin].iter().collect(), fin)
}

/// Groupe `{...}` (accolades équilibrées) ou un seul caractère.
/// Retourne le contenu rendu et l’indice suivant.
fn lire_groupe(chars: &[char], debut: usize, profondeur: usize) -> (String, usize) {
    if debut >= chars.len() {
        return (String::new(), debut);
    }

    if chars[debut] != '{' {
        let mut s = String::new();
        rendre_dans(&chars[debut..debut + 1], &mut s, profondeur + 1);
        return (s, debut + 1);
    }

    let mut profondeur = 0usize;
    let mut i = debut;
    while i < chars.len() {
        match chars[i] {
            '{' => profondeur += 1,
            '}' => {
                profondeur -= 1;
                if profondeur == 0 {
                    let mut s = String::new();
                    rendre_dans(&chars[debut + 1..i], &mut s, profondeur + 1);
                    return (s, i + 1);
                }
            }
            _ => {}
        }
        i += 1;
    }

    // accolade jamais fermée : tout le reste est le groupe
    let mut s = String::new();
    rendre_dans(&chars[debut + 1..], &mut s, profondeur + 1);
    (s, chars.len())
}

fn ecrire_operande(s: &str, out: &mut String) {
    if s.is_empty() {
        return;
    }
    if s.chars().all(|c| c.is_ascii_alphanumeric() || c == '.') {
        out.push_str(s);
    } else {
        out.push('(');
        out.push_str(s);
        out.push(')');
    }
}

fn en_exposant(s: &str) -> Option<String> {
    if s.is_empty() {
        return None;
    }
    s.chars()
        .map(|c| match c {
            '0' => Some('⁰'),
            '1' => Some('¹'),
            '2' => Some('²'),
            '3' => Some('³'),
            '4' => Some('⁴'),
            '5' => Some('⁵'),
            '6' => Some('⁶'),
            '7' => Some('⁷'),
            '8' => Some('⁸'),
            '9' => Some('⁹'),
            '-' => Some('⁻'),
            '+' => Some('⁺'),
            'n' => Some('ⁿ'),
            _ => None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fraction_et_puissance() {
        assert_eq!(rendre("\\frac{1}{2}x^2+3x+4"), "1/2·x²+3x+4");
        assert_eq!(rendre("x^{10}-1"), "x¹⁰-1");
        assert_eq!(rendre("x^n"), "xⁿ");
    }

    #[test]
    fn groupes_composes() {
        assert_eq!(rendre("\\frac{x+1}{x-1}"), "(x+1)/(x-1)");
        assert_eq!(rendre("2^{x+y}"), "2^(x+y)");
        assert_eq!(rendre("\\left(x\\right)\\cdot3"), "(x)·3");
    }

    #[test]
    fn entree_tronquee_ne_panique_pas() {
        assert_eq!(rendre("\\frac{1"), "1/");
        assert_eq!(rendre("x^"), "x^");
        assert_eq!(rendre("\\"), "\\");
    }

    #[test]
    fn imbrication_profonde_bornee() {
        let profond = "x^{".repeat(10_000) + &"}".repeat(10_000);
        let rendu = rendre(&profond);
        assert!(rendu.starts_with('x'));
        assert!(rendu.contains("^{"), "le reste est laissé brut");

        // Imbrication raisonnable : rendu normal.
        assert_eq!(rendre("\\frac{\\frac{1}{2}}{3}"), "(1/2)/3");
    }

    #[test]
    fn memo_ne_recalcule_que_sur_changement() {
        let mut a = Apercu::default();
        assert_eq!(a.actualiser("x^2"), "x²");
        assert_eq!(a.actualiser("x^2"), "x²");
        assert_eq!(a.recalculs(), 1);
        assert_eq!(a.actualiser("x^3"), "x³");
        assert_eq!(a.recalculs(), 2);
    }
}
