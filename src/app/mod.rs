use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver};
use std::thread;

use eframe::egui::{self, Context, Pos2, Vec2};

use crate::stemma::{RelationKind, StemmaData, builtin_corpus, load_stemma_file};

mod export;
mod graph;
mod physics;
mod projection;
mod render_utils;
mod ui;
mod view_state;

use physics::Simulation;
use projection::ProjectedNode;
use view_state::ViewState;

pub struct StemmaViewerApp {
    dataset_path: Option<PathBuf>,
    state: AppState,
}

enum AppState {
    Loading {
        rx: Receiver<Result<StemmaData, String>>,
    },
    Ready(Box<ViewModel>),
    Error(String),
}

pub(crate) struct ViewModel {
    data: StemmaData,
    view: ViewState,
    nodes: Vec<ProjectedNode>,
    projection_dirty: bool,
    projection_revision: u64,
    graph_cache: Option<RenderGraph>,
    search_match_cache: Option<SearchMatchCache>,
    pan: Vec2,
    zoom: f32,
    visible_node_count: usize,
    visible_edge_count: usize,
    export_status: Option<String>,
}

struct SearchMatchCache {
    query: String,
    projection_revision: u64,
    matches: Arc<HashSet<usize>>,
}

struct RenderGraph {
    nodes: Vec<RenderNode>,
    edges: Vec<RenderEdge>,
    sim: Simulation,
    screen_positions: Vec<Pos2>,
    screen_radii: Vec<f32>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum RenderNodeKind {
    Archetype,
    FamilyCollapsed,
    FamilyExpanded,
    Witness,
}

struct RenderNode {
    id: String,
    label: String,
    kind: RenderNodeKind,
    family_id: Option<String>,
    citation_count: usize,
    search_text: String,
    world_pos: Vec2,
    velocity: Vec2,
    base_radius: f32,
}

struct RenderEdge {
    source: usize,
    target: usize,
    kind: RelationKind,
    confidence: f32,
}

impl StemmaViewerApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, dataset_path: Option<PathBuf>) -> Self {
        let state = match &dataset_path {
            Some(path) => Self::start_load(path.clone()),
            None => AppState::Ready(Box::new(ViewModel::new(builtin_corpus()))),
        };

        Self {
            dataset_path,
            state,
        }
    }

    fn start_load(path: PathBuf) -> AppState {
        let (tx, rx) = mpsc::channel();

        thread::spawn(move || {
            let result = load_stemma_file(&path).map_err(|error| format!("{error:#}"));
            let _ = tx.send(result);
        });

        AppState::Loading { rx }
    }
}

impl eframe::App for StemmaViewerApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        let mut transition = None;

        match &mut self.state {
            AppState::Loading { rx } => {
                if let Ok(result) = rx.try_recv() {
                    transition = Some(match result {
                        Ok(data) => AppState::Ready(Box::new(ViewModel::new(data))),
                        Err(error) => AppState::Error(error),
                    });
                }

                egui::CentralPanel::default().show(ctx, |ui| {
                    ui.vertical_centered(|ui| {
                        ui.add_space(120.0);
                        ui.heading("Loading stemma dataset...");
                        ui.add_space(8.0);
                        ui.spinner();
                    });
                });
            }
            AppState::Error(error) => {
                egui::CentralPanel::default().show(ctx, |ui| {
                    ui.heading("Failed to load stemma dataset");
                    ui.add_space(6.0);
                    ui.label(error.as_str());
                    ui.add_space(10.0);
                    if let Some(path) = &self.dataset_path
                        && ui.button("Retry").clicked()
                    {
                        transition = Some(Self::start_load(path.clone()));
                    }
                });
            }
            AppState::Ready(model) => {
                model.show(ctx);
            }
        }

        if let Some(next_state) = transition {
            self.state = next_state;
        }
    }
}
