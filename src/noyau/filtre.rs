// src/noyau/filtre.rs
//
// Filtre de grammaire (entrée LaTeX restreinte)
// ---------------------------------------------
// Le widget d’édition peut produire n’importe quel fragment LaTeX.
// Ce filtre est la seule porte vers le modèle d’expression :
// - caractères admis : lettres/chiffres ASCII + `+ - * / ( ) ^ \ { } = . ,`
// - au plus 2 `\frac` et au plus 2 `^`
// - sinon : l’édition ENTIÈRE est rejetée (on rend le dernier accepté)

/// Construction « fraction » comptée par le filtre.
pub const FRACTION: &str = "\\frac";

/// Opérateur « exposant » compté par le filtre.
pub const EXPOSANT: char = '^';

/// Bornes structurelles (au-delà : rejet total).
pub const MAX_FRACTIONS: usize = 2;
pub const MAX_EXPOSANTS: usize = 2;

/// Caractère admis par la grammaire restreinte ?
pub fn caractere_admis(c: char) -> bool {
    c.is_ascii_alphanumeric()
        || matches!(
            c,
            '+' | '-' | '*' | '/' | '(' | ')' | '^' | '\\' | '{' | '}' | '=' | '.' | ','
        )
}

/// Filtre une édition candidate.
///
/// - Retire tout caractère hors grammaire.
/// - Si le résultat dépasse les bornes (fractions / exposants), rend
///   `dernier_accepte` tel quel : pas de réparation partielle.
///
/// Pure et totale : la sortie ne dépend que des deux arguments.
pub fn filtrer(candidat: &str, dernier_accepte: &str) -> String {
    let filtre: String = candidat.chars().filter(|&c| caractere_admis(c)).collect();

    let fractions = filtre.matches(FRACTION).count();
    let exposants = filtre.matches(EXPOSANT).count();

    if fractions > MAX_FRACTIONS || exposants > MAX_EXPOSANTS {
        tracing::debug!(fractions, exposants, "édition rejetée par le filtre");
        return dernier_accepte.to_string();
    }

    filtre
}
