use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

use eframe::egui::{self, Context};
use log::error;

use crate::dataset::{Author, CollaborationNetwork, load_dataset};
use crate::palette::Palette;

mod graph;
mod interaction;
mod legend;
mod physics;
mod render_utils;
mod transition;
mod ui;

pub use physics::SimulationConfig;

use interaction::{InteractionController, SubscriptionId};
use legend::Legend;
use physics::Simulation;
use ui::info::{AuthorCard, InfoPanel};

pub struct CoauthorGraphApp {
    dataset_path: PathBuf,
    config: SimulationConfig,
    state: AppState,
}

enum AppState {
    Loading {
        rx: Receiver<Result<CollaborationNetwork, String>>,
    },
    Ready(Box<ViewModel>),
    Error(String),
}

struct ViewModel {
    network: CollaborationNetwork,
    palette: Palette,
    simulation: Simulation,
    controller: InteractionController,
    legend: Legend,
    info: InfoPanel,
    hover_subscription: Option<SubscriptionId>,
    mounted: bool,
    show_about: bool,
}

impl ViewModel {
    fn new(network: CollaborationNetwork, config: SimulationConfig) -> Self {
        let palette = Palette::research_areas();
        let simulation = Simulation::new(&network, config);
        let mut controller = InteractionController::new(network.connectivity.clone(), &network);
        let legend = Legend::new(palette.entries().len());

        let (tx, rx) = mpsc::channel();
        let hover_subscription =
            controller.subscribe_hover(Box::new(move |author: Option<&Author>| {
                let _ = tx.send(author.map(AuthorCard::from_author));
            }));

        Self {
            network,
            palette,
            simulation,
            controller,
            legend,
            info: InfoPanel::new(rx),
            hover_subscription: Some(hover_subscription),
            mounted: false,
            show_about: false,
        }
    }
}

impl Drop for ViewModel {
    fn drop(&mut self) {
        if let Some(subscription) = self.hover_subscription.take() {
            self.controller.unsubscribe(subscription);
        }
        self.controller.teardown(&mut self.simulation);
    }
}

impl CoauthorGraphApp {
    pub fn new(
        _cc: &eframe::CreationContext<'_>,
        dataset_path: PathBuf,
        config: SimulationConfig,
    ) -> Self {
        let state = Self::start_load(dataset_path.clone());
        Self {
            dataset_path,
            config,
            state,
        }
    }

    fn spawn_load(dataset_path: PathBuf) -> Receiver<Result<CollaborationNetwork, String>> {
        let (tx, rx) = mpsc::channel();

        thread::spawn(move || {
            let result = load_dataset(&dataset_path)
                .map(|dataset| CollaborationNetwork::build(&dataset))
                .map_err(|error| format!("{error:#}"));
            let _ = tx.send(result);
        });

        rx
    }

    fn start_load(dataset_path: PathBuf) -> AppState {
        AppState::Loading {
            rx: Self::spawn_load(dataset_path),
        }
    }
}

impl eframe::App for CoauthorGraphApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        let mut transition = None;

        match &mut self.state {
            AppState::Loading { rx } => {
                match rx.try_recv() {
                    Ok(Ok(network)) => {
                        transition = Some(AppState::Ready(Box::new(ViewModel::new(
                            network,
                            self.config,
                        ))));
                    }
                    Ok(Err(message)) => {
                        error!("failed to load dataset: {message}");
                        transition = Some(AppState::Error(message));
                    }
                    Err(TryRecvError::Empty) => ctx.request_repaint(),
                    Err(TryRecvError::Disconnected) => {
                        transition = Some(AppState::Error(
                            "Background load worker disconnected".to_owned(),
                        ));
                    }
                }

                egui::CentralPanel::default().show(ctx, |ui| {
                    ui.vertical_centered(|ui| {
                        ui.add_space(120.0);
                        ui.heading("Carregando rede de colaboração...");
                        ui.add_space(8.0);
                        ui.spinner();
                    });
                });
            }
            AppState::Error(message) => {
                egui::CentralPanel::default().show(ctx, |ui| {
                    ui.heading("Falha ao carregar a rede de colaboração");
                    ui.add_space(6.0);
                    ui.label(message.as_str());
                    ui.add_space(10.0);
                    if ui.button("Tentar novamente").clicked() {
                        transition = Some(Self::start_load(self.dataset_path.clone()));
                    }
                });
            }
            AppState::Ready(model) => model.show(ctx),
        }

        if let Some(next_state) = transition {
            self.state = next_state;
        }
    }
}
