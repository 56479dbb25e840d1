use crossterm::event::{self, Event as CrosstermEvent, KeyEvent, KeyEventKind, MouseEvent};
use std::time::Duration;
use tokio::sync::mpsc;
use anyhow::Result;
use tracing::{debug, error};

use crate::api::ArtworkPage;
use crate::viewer::{Accumulation, AccumulationProgress};

/// Application events
#[derive(Debug, Clone)]
pub enum Event {
    /// Keyboard input event
    Key(KeyEvent),

    /// Mouse input event
    Mouse(MouseEvent),

    /// Terminal resize event
    Resize(u16, u16),

    /// Periodic tick event
    Tick,

    /// A page fetch finished
    PageLoaded {
        request_id: u64,
        result: Result<ArtworkPage, String>,
    },

    /// The row accumulator fetched another page
    AccumulationProgress(AccumulationProgress),

    /// The row accumulator finished
    AccumulationFinished(Result<Accumulation, String>),
}

/// Event handler merging terminal input and background task results
pub struct EventHandler {
    /// Event receiver channel
    receiver: mpsc::UnboundedReceiver<Event>,

    /// Event sender channel
    sender: mpsc::UnboundedSender<Event>,
}

impl EventHandler {
    /// Create a new event handler and start reading terminal input
    pub fn new(tick_interval: Duration) -> Self {
        let (sender, receiver) = mpsc::unbounded_channel();

        let input_sender = sender.clone();
        tokio::task::spawn_blocking(move || {
            if let Err(e) = Self::read_input(&input_sender, tick_interval) {
                error!("Terminal input reader stopped: {}", e);
            }
        });

        Self { receiver, sender }
    }

    /// Forward crossterm events until the receiving side goes away
    fn read_input(sender: &mpsc::UnboundedSender<Event>, tick_interval: Duration) -> Result<()> {
        loop {
            let next = if event::poll(tick_interval)? {
                match Self::convert_crossterm_event(event::read()?) {
                    Some(event) => event,
                    None => continue,
                }
            } else {
                Event::Tick
            };

            if sender.send(next).is_err() {
                debug!("Event receiver dropped, stopping input reader");
                return Ok(());
            }
        }
    }

    /// Get the next event
    pub async fn next(&mut self) -> Option<Event> {
        self.receiver.recv().await
    }

    /// Convert crossterm events to application events
    fn convert_crossterm_event(event: CrosstermEvent) -> Option<Event> {
        match event {
            CrosstermEvent::Key(key_event) if key_event.kind == KeyEventKind::Press => {
                Some(Event::Key(key_event))
            }
            CrosstermEvent::Mouse(mouse_event) => Some(Event::Mouse(mouse_event)),
            CrosstermEvent::Resize(width, height) => Some(Event::Resize(width, height)),
            _ => None,
        }
    }

    /// Get a clone of the sender
    pub fn sender(&self) -> mpsc::UnboundedSender<Event> {
        self.sender.clone()
    }
}
