// src/app/vue.rs
//
// Vue (UI egui) — natif + web
// ---------------------------
// Objectifs :
// - Même AppNumerique (etat.rs) pour natif + wasm
// - Le champ math est un widget dont l’état appartient à egui : chaque
//   modification est relayée à l’adaptateur (noyau::editeur), jamais traitée ici
// - Seuls les champs du schéma de la méthode choisie sont affichés
// - Enter dans un champ = Calculer

use eframe::egui;

use crate::noyau::apercu::rendre;
use crate::noyau::{ErreurCalcul, Genre, Issue, Methode, ResultatCalcul};

use super::etat::AppNumerique;

impl AppNumerique {
    /// UI principale : à appeler depuis eframe::App::update(...)
    pub fn ui(&mut self, ui: &mut egui::Ui) {
        ui.spacing_mut().item_spacing = egui::vec2(6.0, 6.0);

        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                ui.heading("Calculatrice numérique");
                ui.add_space(6.0);

                self.ui_methode(ui);

                ui.add_space(6.0);
                self.ui_parametres(ui);

                ui.add_space(8.0);
                ui.separator();
                ui.add_space(8.0);

                self.ui_expression(ui);

                ui.add_space(8.0);
                self.ui_actions(ui);

                ui.add_space(8.0);
                ui.separator();
                ui.add_space(8.0);

                self.ui_resultat(ui);
            });
    }

    fn ui_methode(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.label("Méthode :");

            let courante = self.formulaire.methode();
            let texte = courante.map_or("— choisir —", Methode::libelle);

            let mut choix = None;
            egui::ComboBox::from_id_salt("choix_methode")
                .selected_text(texte)
                .width(220.0)
                .show_ui(ui, |ui| {
                    for genre in [Genre::Derivee, Genre::Integrale] {
                        ui.weak(genre.libelle());
                        for m in Methode::TOUTES.into_iter().filter(|m| m.genre() == genre) {
                            if ui.selectable_label(courante == Some(m), m.libelle()).clicked() {
                                choix = Some(m);
                            }
                        }
                    }
                });

            if let Some(m) = choix {
                self.choisir_methode(m);
            }
        });
    }

    fn ui_parametres(&mut self, ui: &mut egui::Ui) {
        let Some(methode) = self.formulaire.methode() else {
            ui.weak("Choisissez une méthode pour voir ses paramètres.");
            return;
        };

        let mut enter = false;
        egui::Grid::new("parametres_methode")
            .num_columns(2)
            .spacing([8.0, 6.0])
            .show(ui, |ui| {
                for &p in methode.parametres() {
                    ui.label(p.libelle());
                    if let Some(valeur) = self.formulaire.champs.valeur_mut(p) {
                        let resp = ui.add(
                            egui::TextEdit::singleline(valeur)
                                .id_salt(("parametre", p.nom_fil()))
                                .hint_text(p.nom_fil())
                                .desired_width(160.0),
                        );
                        if resp.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                            enter = true;
                        }
                    }
                    ui.end_row();
                }
            });

        if enter {
            self.soumettre_depuis(ui.ctx());
        }
    }

    fn ui_expression(&mut self, ui: &mut egui::Ui) {
        ui.label("Fonction f(x) :");

        // Gabarits (passent par le même pipeline qu’une frappe)
        ui.horizontal(|ui| {
            if ui
                .add_sized([40.0, 28.0], egui::Button::new("xⁿ"))
                .on_hover_text("Ajoute un exposant")
                .clicked()
            {
                self.editeur.inserer_exposant(&mut self.champ);
                self.focus_entree = true;
            }
            if ui
                .add_sized([40.0, 28.0], egui::Button::new("a/b"))
                .on_hover_text("Ajoute une fraction \\frac{1}{2}")
                .clicked()
            {
                self.editeur.inserer_fraction(&mut self.champ);
                self.focus_entree = true;
            }
        });

        // Widget math : cadre accentué quand il a le focus
        let stroke = if self.editeur.a_le_focus() {
            ui.visuals().selection.stroke
        } else {
            ui.visuals().widgets.noninteractive.bg_stroke
        };

        let resp = egui::Frame::group(ui.style())
            .stroke(stroke)
            .show(ui, |ui| {
                ui.add(
                    egui::TextEdit::singleline(&mut self.champ.texte)
                        .id_salt("champ_math")
                        .desired_width(ui.available_width())
                        .font(egui::TextStyle::Monospace),
                )
            })
            .inner;

        if self.focus_entree {
            resp.request_focus();
            self.focus_entree = false;
        }
        if resp.gained_focus() {
            self.editeur.sur_focus();
        }
        if resp.lost_focus() {
            self.editeur.sur_flou();
        }
        if resp.changed() {
            self.editeur.sur_changement(&mut self.champ);
        }
        if resp.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
            self.soumettre_depuis(ui.ctx());
        }

        // Aperçu : recalculé seulement quand la valeur acceptée change
        let rendu = self.apercu.actualiser(self.editeur.accepte()).to_string();
        ui.horizontal(|ui| {
            ui.label("Aperçu :");
            ui.monospace(rendu);
        });

        // Vue texte secondaire
        ui.add_space(4.0);
        let resp_miroir = ui.add(
            egui::TextEdit::multiline(&mut self.miroir)
                .id_salt("miroir_texte")
                .hint_text("Expression en texte (fractions et puissances seulement)")
                .desired_rows(2)
                .desired_width(ui.available_width())
                .code_editor(),
        );
        if resp_miroir.changed() {
            self.editer_miroir();
        } else if !resp_miroir.has_focus() {
            self.editeur.synchroniser_miroir(&mut self.miroir);
        }

        ui.add_space(4.0);
        ui.weak("Formats pris en charge : fraction \\frac{1}{2}, puissance x^2 (au plus deux de chaque).");
    }

    fn ui_actions(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            if ui
                .add_sized([96.0, 32.0], egui::Button::new("Calculer"))
                .clicked()
            {
                self.soumettre_depuis(ui.ctx());
            }

            if ui
                .add_sized([56.0, 30.0], egui::Button::new("CLR"))
                .on_hover_text("Efface le résultat")
                .clicked()
            {
                self.clear_resultats();
            }

            if ui
                .add_sized([56.0, 30.0], egui::Button::new("AC"))
                .on_hover_text("Remise à zéro totale")
                .clicked()
            {
                self.reset_total();
            }

            if self.en_attente() {
                ui.spinner();
                ui.weak("calcul en cours…");
            }
        });
    }

    fn ui_resultat(&mut self, ui: &mut egui::Ui) {
        match &self.resultat {
            None => {
                ui.weak("Aucun résultat pour l’instant.");
            }
            Some(Issue::Succes(r)) => Self::ui_succes(ui, r),
            Some(Issue::Erreur(e)) => Self::ui_erreur(ui, e),
        }
    }

    fn ui_succes(ui: &mut egui::Ui, r: &ResultatCalcul) {
        let transformee = match r.genre {
            Some(Genre::Integrale) => "Primitive",
            Some(Genre::Derivee) => "Dérivée",
            None => "Transformée",
        };

        egui::Grid::new("resultat_calcul")
            .num_columns(2)
            .spacing([12.0, 6.0])
            .show(ui, |ui| {
                Self::ligne(ui, "Méthode", &r.methode);
                Self::ligne(ui, "Fonction", &rendre(&r.expression));
                Self::ligne(ui, transformee, &r.expression_transformee);
                Self::ligne(ui, "Numérique", &r.valeur_numerique);
                Self::ligne(ui, "Analytique", &r.valeur_analytique);
                Self::ligne(ui, "Erreur relative", &r.erreur_relative);
            });
    }

    fn ui_erreur(ui: &mut egui::Ui, e: &ErreurCalcul) {
        ui.label(format!("Méthode : {}", e.methode));
        ui.colored_label(ui.visuals().error_fg_color, &e.message);
    }

    fn ligne(ui: &mut egui::Ui, titre: &str, valeur: &str) {
        ui.label(format!("{titre} :"));
        if valeur.is_empty() {
            ui.weak("—");
        } else {
            ui.monospace(valeur);
        }
        ui.end_row();
    }

    fn soumettre_depuis(&mut self, ctx: &egui::Context) {
        let ctx = ctx.clone();
        self.soumettre(move || ctx.request_repaint());
        self.focus_entree = true;
    }
}
