// src/noyau/soumission.rs
//
// Numérotation des soumissions
// ----------------------------
// Rien n’empêche deux envois rapprochés ; les réponses peuvent revenir dans
// le désordre. Règle : la réponse au plus grand numéro gagne.
// - chaque envoi reçoit un numéro strictement croissant
// - une réponse n’est appliquée que si son numéro dépasse le dernier appliqué
//   (une réponse ancienne arrivée en retard est ignorée)

#[derive(Clone, Debug, Default)]
pub struct Sequenceur {
    dernier_emis: u64,
    dernier_applique: u64,
}

impl Sequenceur {
    /// Numéro du prochain envoi (commence à 1).
    pub fn emettre(&mut self) -> u64 {
        self.dernier_emis += 1;
        self.dernier_emis
    }

    /// La réponse `numero` doit-elle remplacer le résultat affiché ?
    pub fn accepter(&mut self, numero: u64) -> bool {
        if numero <= self.dernier_applique || numero > self.dernier_emis {
            tracing::debug!(
                numero,
                dernier_applique = self.dernier_applique,
                "réponse périmée ignorée"
            );
            return false;
        }
        self.dernier_applique = numero;
        true
    }

    /// Envois dont la réponse n’a pas encore été appliquée ni dépassée.
    pub fn en_attente(&self) -> u64 {
        self.dernier_emis - self.dernier_applique
    }
}
