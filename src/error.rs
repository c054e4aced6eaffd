#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    /// Result file missing, unreadable, or not valid JSON.
    pub fn input(message: impl Into<String>) -> Self {
        Self::new(2, message)
    }

    /// Result file parsed, but its shape does not match the expected store
    /// layout (missing subtree, malformed epsilon-point key, ...).
    pub fn schema(message: impl Into<String>) -> Self {
        Self::new(3, message)
    }

    /// Fitting-stage failure (unsolvable design matrix, no samples).
    pub fn fit(message: impl Into<String>) -> Self {
        Self::new(4, message)
    }

    /// Figure rendering or figure-file write failure.
    pub fn render(message: impl Into<String>) -> Self {
        Self::new(5, message)
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}
