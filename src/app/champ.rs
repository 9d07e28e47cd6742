//! src/app/champ.rs
//!
//! Widget d’édition math côté egui.
//!
//! Le tampon appartient au widget (egui l’édite directement) ; le noyau n’y
//! accède que via `WidgetMath`.

use crate::noyau::WidgetMath;

#[derive(Clone, Debug, Default)]
pub struct ChampMath {
    pub texte: String,
}

impl WidgetMath for ChampMath {
    fn valeur(&self) -> String {
        self.texte.clone()
    }

    fn definir_valeur(&mut self, latex: &str) {
        self.texte.clear();
        self.texte.push_str(latex);
    }
}
