/// Application root, the target of both the gate and a successful verification.
pub const ROOT_PATH: &str = "/";

/// Capability to move the user to another page.
pub trait Navigator {
    fn navigate_to(&mut self, path: &str);
}

/// Records the requested location so a server can answer with a redirect.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Redirector {
    location: Option<String>,
}

impl Redirector {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }

    #[must_use]
    pub fn into_location(self) -> Option<String> {
        self.location
    }
}

impl Navigator for Redirector {
    fn navigate_to(&mut self, path: &str) {
        self.location = Some(path.to_string());
    }
}
