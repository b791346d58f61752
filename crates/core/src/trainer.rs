//! Timer-driven training simulation over the shared store.

use crate::clock::Clock;
use crate::models::{ChatRole, TrainingPhase, TrainingUpdate};
use crate::store::Store;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{info, warn};

pub const PROGRESS_STEP: u8 = 5;
const PREPARING_CEILING: u8 = 30;
const TRAINING_CEILING: u8 = 90;

pub const MSG_MISSING_INPUTS: &str = "Please select model file and at least one data source";
pub const MSG_PREPARING: &str = "Preparing data for training...";
pub const MSG_PREPROCESSING: &str = "Preprocessing data sources...";
pub const MSG_COMPLETED: &str = "Training completed successfully";
pub const MSG_CHAT_READY: &str =
    "Training completed. You can now chat with the AI about your email and folder data.";

pub struct Trainer {
    store: Store,
    clock: Arc<dyn Clock>,
    tick: Duration,
}

impl Trainer {
    pub fn new(store: Store, clock: Arc<dyn Clock>, tick: Duration) -> Self {
        Self { store, clock, tick }
    }

    /// Fire-and-forget start; the run mutates the store as it goes.
    pub fn start(self) -> JoinHandle<()> {
        tokio::spawn(async move { self.run().await })
    }

    /// One full simulated run. Callers must not invoke this while a run is
    /// already preparing/training; the triggering view disables the control.
    pub async fn run(&self) {
        if self.store.model_file().is_none() || !self.store.has_data_source() {
            warn!("training rejected: no model file or data source selected");
            self.store.update_training(TrainingUpdate {
                phase: Some(TrainingPhase::Failed),
                message: Some(MSG_MISSING_INPUTS.to_string()),
                ..Default::default()
            });
            return;
        }

        info!("starting training run");
        self.store.update_training(TrainingUpdate {
            phase: Some(TrainingPhase::Preparing),
            progress: Some(0),
            message: Some(MSG_PREPARING.to_string()),
        });

        let mut progress: u8 = 0;
        loop {
            self.clock.sleep(self.tick).await;
            progress += PROGRESS_STEP;
            if progress <= PREPARING_CEILING {
                self.store.update_training(TrainingUpdate {
                    phase: Some(TrainingPhase::Preparing),
                    progress: Some(progress),
                    message: Some(MSG_PREPROCESSING.to_string()),
                });
            } else if progress <= TRAINING_CEILING {
                self.store.update_training(TrainingUpdate {
                    phase: Some(TrainingPhase::Training),
                    progress: Some(progress),
                    message: Some(format!("Training in progress: {}%", progress)),
                });
            } else {
                // Past 90% the recurring step stops and completion is forced.
                self.store.update_training(TrainingUpdate {
                    phase: Some(TrainingPhase::Completed),
                    progress: Some(100),
                    message: Some(MSG_COMPLETED.to_string()),
                });
                self.store.push_chat_message(ChatRole::System, MSG_CHAT_READY);
                info!("training run completed");
                break;
            }
        }
    }
}
