/// Identity of an authenticated caller, derived from a verified token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    subject: String,
    authorities: Vec<String>,
}

impl Identity {
    /// Identity for `subject` with no granted authorities.
    pub fn new(subject: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            authorities: Vec::new(),
        }
    }

    /// Username the identity was issued for.
    pub fn subject(&self) -> &str {
        &self.subject
    }

    pub fn authorities(&self) -> &[String] {
        &self.authorities
    }
}
