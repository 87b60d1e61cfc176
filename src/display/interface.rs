use std::error::Error;

/// Where classification results end up in front of the user.
pub trait Display: Send + Sync {
    /// Show the predicted label as plain text.
    fn show_label(&mut self, label: &str) -> Result<(), Box<dyn Error + Send + Sync>>;

    /// Short, transient notice such as "pick a picture first".
    fn show_notice(&mut self, message: &str) -> Result<(), Box<dyn Error + Send + Sync>>;

    /// Remove any label or notice currently shown.
    fn clear(&mut self) -> Result<(), Box<dyn Error + Send + Sync>>;
}
