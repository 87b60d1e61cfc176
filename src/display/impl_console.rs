use crate::display::interface::Display;
use std::error::Error;

pub struct DisplayConsole {
    title: String,
    line: String,
}

impl DisplayConsole {
    pub fn new(title: &str) -> Self {
        Self {
            title: title.to_string(),
            line: String::new(),
        }
    }

    fn render(&self) {
        let width = self.title.chars().count().max(self.line.chars().count()) + 2;
        println!("┌{}┐", "─".repeat(width));
        println!("│ {:<w$} │", self.title, w = width - 2);
        println!("├{}┤", "─".repeat(width));
        println!("│ {:<w$} │", self.line, w = width - 2);
        println!("└{}┘", "─".repeat(width));
    }
}

impl Display for DisplayConsole {
    fn show_label(&mut self, label: &str) -> Result<(), Box<dyn Error + Send + Sync>> {
        self.line = label.to_string();
        self.render();
        Ok(())
    }

    fn show_notice(&mut self, message: &str) -> Result<(), Box<dyn Error + Send + Sync>> {
        self.line = format!("! {}", message);
        self.render();
        Ok(())
    }

    fn clear(&mut self) -> Result<(), Box<dyn Error + Send + Sync>> {
        self.line.clear();
        Ok(())
    }
}
