//! Tests de propriétés (filtre) : déterminisme + idempotence + rejet total.
//!
//! - RNG déterministe (seed fixe), pas de dépendance de test supplémentaire
//! - entrées générées dans un alphabet qui mélange grammaire admise et parasites
//! - budget temps global

use std::time::{Duration, Instant};

use super::filtre::{caractere_admis, filtrer, MAX_EXPOSANTS, MAX_FRACTIONS};

/* ------------------------ RNG déterministe minimal ------------------------ */

struct Rng {
    state: u64,
}

impl Rng {
    fn new(seed: u64) -> Self {
        Self { state: seed }
    }
    fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.state >> 32) as u32
    }
    fn pick(&mut self, n: u32) -> u32 {
        if n == 0 {
            0
        } else {
            self.next_u32() % n
        }
    }
}

fn budget(start: Instant, max: Duration) {
    if start.elapsed() > max {
        panic!("budget temps dépassé: {:?}", max);
    }
}

const MORCEAUX: [&str; 16] = [
    "x", "2", "+", "-", "^", "\\frac{1}{2}", "(", ")", " ", "é", "$", "\\sqrt", "{", "}", ".", "π",
];

fn gen_edition(rng: &mut Rng, longueur: usize) -> String {
    (0..longueur)
        .map(|_| MORCEAUX[rng.pick(MORCEAUX.len() as u32) as usize])
        .collect()
}

/// Expression admissible (servira de « dernier accepté »).
fn gen_admissible(rng: &mut Rng) -> String {
    let brut = gen_edition(rng, 6);
    filtrer(&brut, "x")
}

fn admissible(s: &str) -> bool {
    s.chars().all(caractere_admis)
        && s.matches("\\frac").count() <= MAX_FRACTIONS
        && s.matches('^').count() <= MAX_EXPOSANTS
}

#[test]
fn prop_filtre_idempotent() {
    let t0 = Instant::now();
    let max = Duration::from_millis(300);
    let mut rng = Rng::new(0xF1_17E5);

    for _ in 0..400 {
        budget(t0, max);

        let precedent = gen_admissible(&mut rng);
        let candidat = gen_edition(&mut rng, 12);

        let une_fois = filtrer(&candidat, &precedent);
        let deux_fois = filtrer(&une_fois, &une_fois);
        assert_eq!(une_fois, deux_fois, "candidat={candidat:?} precedent={precedent:?}");
    }
}

#[test]
fn prop_sortie_toujours_admissible() {
    let mut rng = Rng::new(0xC0FFEE);

    for _ in 0..400 {
        let precedent = gen_admissible(&mut rng);
        assert!(admissible(&precedent), "{precedent:?}");

        let candidat = gen_edition(&mut rng, 16);
        let sortie = filtrer(&candidat, &precedent);
        assert!(admissible(&sortie), "candidat={candidat:?} sortie={sortie:?}");
    }
}

#[test]
fn prop_rejet_tout_ou_rien() {
    let mut rng = Rng::new(0xBADC0DE);

    for _ in 0..200 {
        let precedent = gen_admissible(&mut rng);
        let valide = gen_edition(&mut rng, 4).replace(|c: char| c == '^' || c == '\\', "");

        // Trois fractions + un morceau valide : tout doit être jeté.
        let candidat = format!("{valide}\\frac{{1}}{{2}}\\frac{{3}}{{4}}\\frac{{5}}{{6}}");
        assert_eq!(filtrer(&candidat, &precedent), precedent);
    }
}

#[test]
fn prop_determinisme() {
    let mut a = Rng::new(42);
    let mut b = Rng::new(42);
    for _ in 0..100 {
        let ca = gen_edition(&mut a, 10);
        let cb = gen_edition(&mut b, 10);
        assert_eq!(filtrer(&ca, "x"), filtrer(&cb, "x"));
    }
}
