use eframe::egui::{Key, RichText, Ui};
use fuzzy_matcher::FuzzyMatcher;
use fuzzy_matcher::skim::SkimMatcherV2;

use super::super::ViewModel;
use super::super::sim::Phase;

const MAX_SUGGESTIONS: usize = 5;

impl ViewModel {
    pub(in crate::app) fn draw_controls(&mut self, ui: &mut Ui) {
        ui.heading("Flavor search");
        ui.separator();
        ui.add_space(4.0);

        let search_response = ui
            .text_edit_singleline(&mut self.search_input)
            .on_hover_text("Type a flavor and press Enter to chart its pairings.");
        let submitted =
            search_response.lost_focus() && ui.input(|input| input.key_pressed(Key::Enter));
        let clicked = ui.button("Add flavor").clicked();
        if submitted || clicked {
            self.submit_search();
            search_response.request_focus();
        }

        self.draw_suggestions(ui);

        ui.add_space(8.0);
        ui.separator();
        ui.label(RichText::new("Active flavors").strong());

        if self.terms.is_empty() {
            ui.label(RichText::new("none yet").weak());
        } else {
            let mut removed = None;
            for term in &self.terms {
                ui.horizontal(|ui| {
                    ui.label(term);
                    if ui.small_button("✕").on_hover_text("Remove this flavor").clicked() {
                        removed = Some(term.clone());
                    }
                });
            }
            if let Some(term) = removed {
                self.remove_term(&term);
            }

            if ui.button("Clear all").clicked() {
                self.clear_terms();
            }
        }

        ui.add_space(8.0);
        ui.separator();
        ui.label(RichText::new("Simulation").strong());

        match (&self.snapshot, &self.sim) {
            (Some(snapshot), Some(sim)) => {
                ui.label(format!(
                    "{} flavors, {} pairings",
                    snapshot.node_count(),
                    snapshot.link_count()
                ));
                let phase = match sim.phase() {
                    Phase::Running => "running",
                    Phase::Idle => "settled",
                };
                ui.label(format!("alpha {:.3} ({phase})", sim.alpha()));
            }
            _ => {
                ui.label(RichText::new("no graph").weak());
            }
        }

        if self.fetch_in_flight() {
            ui.horizontal(|ui| {
                ui.spinner();
                ui.label("fetching recommendations...");
            });
        }

        ui.add_space(8.0);
        ui.separator();
        ui.label(RichText::new(format!("endpoint: {}", self.endpoint)).weak().small());
        ui.add_space(4.0);
        ui.label(
            RichText::new("Drag a node to pin it; double-click to release.")
                .weak()
                .small(),
        );
    }

    /// Offers flavors already present in the chart that fuzzily match the
    /// search box, so related terms can be promoted to searches of their own.
    fn draw_suggestions(&mut self, ui: &mut Ui) {
        let query = self.search_input.trim().to_lowercase();
        if query.is_empty() {
            return;
        }
        let Some(snapshot) = &self.snapshot else {
            return;
        };

        let matcher = SkimMatcherV2::default();
        let mut matches: Vec<(i64, String)> = snapshot
            .nodes
            .iter()
            .filter(|node| !self.terms.contains(&node.key))
            .filter_map(|node| {
                matcher
                    .fuzzy_match(&node.key, &query)
                    .map(|score| (score, node.key.clone()))
            })
            .collect();
        matches.sort_by(|a, b| b.0.cmp(&a.0));

        let mut chosen = None;
        for (_score, key) in matches.into_iter().take(MAX_SUGGESTIONS) {
            if ui.small_button(&key).clicked() {
                chosen = Some(key);
            }
        }
        if let Some(key) = chosen {
            self.search_input.clear();
            self.add_term(&key);
        }
    }
}
