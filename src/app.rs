// src/app.rs
//
// Calculatrice numérique — module App (racine)
// --------------------------------------------
// Rôle:
// - Déclarer les sous-modules (champ.rs + etat.rs + vue.rs)
// - Ré-exporter AppNumerique (pour main.rs: use crate::app::AppNumerique;)
// - Fournir l’impl eframe::App (compatible NATIF + WEB)
//
// Important:
// - Les retours réseau sont consommés ici, une fois par frame, avant la vue.
// - Enter est géré dans vue.rs (quand un champ a le focus).

pub mod champ;
pub mod etat;
pub mod vue;

pub use etat::AppNumerique;

use eframe::egui;

impl eframe::App for AppNumerique {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.recevoir_retours();

        // ESC = effacer seulement le résultat (comme bouton "CLR").
        let esc = ctx.input(|i| i.key_pressed(egui::Key::Escape));
        if esc {
            self.clear_resultats();
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            self.ui(ui);
        });
    }
}
