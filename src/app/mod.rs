use std::collections::HashMap;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

use eframe::egui::{self, Context, Vec2, vec2};
use tracing::{debug, info, warn};

use crate::recommend::{RecommendClient, Recommendation};
use crate::util::normalize_term;

pub mod graph;
pub mod sim;

mod render_utils;
mod ui;

use graph::{DragController, GraphSnapshot, build_snapshot};
use sim::Simulation;

pub struct FlavorGraphApp {
    model: ViewModel,
}

impl FlavorGraphApp {
    pub fn new(
        _cc: &eframe::CreationContext<'_>,
        endpoint: String,
        initial_flavors: Vec<String>,
    ) -> Self {
        let mut model = ViewModel::new(endpoint);
        for flavor in &initial_flavors {
            model.add_term(flavor);
        }
        Self { model }
    }
}

impl eframe::App for FlavorGraphApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        self.model.poll_fetches();
        self.model.show(ctx);
    }
}

/// A completed background fetch, tagged with the generation it was started
/// for. Results from a superseded generation are discarded on receipt.
struct FetchOutcome {
    generation: u64,
    by_term: Vec<(String, Vec<Recommendation>)>,
}

struct ViewModel {
    endpoint: String,
    search_input: String,
    terms: Vec<String>,
    recommendations: HashMap<String, Vec<Recommendation>>,
    fetch_generation: u64,
    fetch_rx: Option<Receiver<FetchOutcome>>,
    snapshot: Option<GraphSnapshot>,
    sim: Option<Simulation>,
    drag: DragController,
    pan: Vec2,
    zoom: f32,
    viewport: Vec2,
}

impl ViewModel {
    fn new(endpoint: String) -> Self {
        Self {
            endpoint,
            search_input: String::new(),
            terms: Vec::new(),
            recommendations: HashMap::new(),
            fetch_generation: 0,
            fetch_rx: None,
            snapshot: None,
            sim: None,
            drag: DragController::default(),
            pan: Vec2::ZERO,
            zoom: 1.0,
            viewport: vec2(1280.0, 800.0),
        }
    }

    fn add_term(&mut self, raw: &str) {
        let Some(term) = normalize_term(raw) else {
            return;
        };
        if self.terms.contains(&term) {
            return;
        }

        self.terms.push(term);
        self.refresh_recommendations();
    }

    fn remove_term(&mut self, term: &str) {
        let before = self.terms.len();
        self.terms.retain(|existing| existing != term);
        if self.terms.len() != before {
            self.refresh_recommendations();
        }
    }

    fn clear_terms(&mut self) {
        if !self.terms.is_empty() {
            self.terms.clear();
            self.refresh_recommendations();
        }
    }

    fn submit_search(&mut self) {
        let input = std::mem::take(&mut self.search_input);
        self.add_term(&input);
    }

    /// Kicks off a background fetch for the whole term set. Bumping the
    /// generation is the only cancellation mechanism: a fetch still in flight
    /// will come back tagged with a stale generation and be dropped.
    fn refresh_recommendations(&mut self) {
        self.fetch_generation = self.fetch_generation.wrapping_add(1);
        let generation = self.fetch_generation;

        if self.terms.is_empty() {
            self.fetch_rx = None;
            self.recommendations.clear();
            self.rebuild_layout();
            return;
        }

        info!(generation, terms = ?self.terms, "fetching recommendations");
        let endpoint = self.endpoint.clone();
        let terms = self.terms.clone();
        let (tx, rx) = mpsc::channel();

        thread::spawn(move || {
            let by_term = match RecommendClient::new(&endpoint) {
                Ok(client) => client.fetch_all(&terms),
                Err(error) => {
                    warn!(%error, "could not build recommendation client");
                    terms.into_iter().map(|term| (term, Vec::new())).collect()
                }
            };
            let _ = tx.send(FetchOutcome { generation, by_term });
        });

        self.fetch_rx = Some(rx);
    }

    fn poll_fetches(&mut self) {
        let Some(rx) = self.fetch_rx.take() else {
            return;
        };

        match rx.try_recv() {
            Ok(outcome) => self.apply_fetch_outcome(outcome),
            Err(TryRecvError::Empty) => self.fetch_rx = Some(rx),
            Err(TryRecvError::Disconnected) => {
                warn!("recommendation fetch worker disconnected");
            }
        }
    }

    fn apply_fetch_outcome(&mut self, outcome: FetchOutcome) {
        if outcome.generation != self.fetch_generation {
            debug!(
                received = outcome.generation,
                current = self.fetch_generation,
                "discarding stale fetch result"
            );
            return;
        }

        self.recommendations = outcome.by_term.into_iter().collect();
        self.rebuild_layout();
    }

    /// Discards the running simulation wholesale and lays the new snapshot
    /// out from scratch. Prior node positions are deliberately not reused;
    /// the per-key seed jitter keeps identical inputs from flickering.
    fn rebuild_layout(&mut self) {
        self.drag.invalidate();
        self.sim = None;
        self.snapshot = build_snapshot(&self.terms, &self.recommendations);

        if let Some(snapshot) = &self.snapshot {
            info!(
                nodes = snapshot.node_count(),
                links = snapshot.link_count(),
                "rebuilt flavor graph"
            );
            self.sim = Some(Simulation::new(snapshot.node_count(), self.viewport));
        }
    }

    fn fetch_in_flight(&self) -> bool {
        self.fetch_rx.is_some()
    }

    fn show(&mut self, ctx: &Context) {
        egui::SidePanel::left("controls")
            .default_width(260.0)
            .show(ctx, |ui| self.draw_controls(ui));
        egui::CentralPanel::default().show(ctx, |ui| self.draw_graph(ui));
    }
}
