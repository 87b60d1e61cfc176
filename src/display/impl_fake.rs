use crate::display::interface::Display;
use std::error::Error;
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone, PartialEq)]
pub enum Shown {
    Label(String),
    Notice(String),
    Cleared,
}

/// Records what would have been shown. Clones share the record.
#[derive(Debug, Clone, Default)]
pub struct DisplayFake {
    shown: Arc<Mutex<Vec<Shown>>>,
}

impl DisplayFake {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shown(&self) -> Vec<Shown> {
        self.shown
            .lock()
            .map(|shown| shown.clone())
            .unwrap_or_default()
    }

    fn push(&self, item: Shown) -> Result<(), Box<dyn Error + Send + Sync>> {
        self.shown.lock().map_err(|e| e.to_string())?.push(item);
        Ok(())
    }
}

impl Display for DisplayFake {
    fn show_label(&mut self, label: &str) -> Result<(), Box<dyn Error + Send + Sync>> {
        self.push(Shown::Label(label.to_string()))
    }

    fn show_notice(&mut self, message: &str) -> Result<(), Box<dyn Error + Send + Sync>> {
        self.push(Shown::Notice(message.to_string()))
    }

    fn clear(&mut self) -> Result<(), Box<dyn Error + Send + Sync>> {
        self.push(Shown::Cleared)
    }
}
