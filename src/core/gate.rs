use crate::config::GateConfig;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateOutcome {
    Accepted,
    Rejected { message: String },
}

impl GateOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted)
    }
}

/// Unlock-code check. No lockout: any number of wrong attempts may be
/// followed by the right one.
#[derive(Debug, Clone)]
pub struct Gate {
    secret: String,
    digits_only: bool,
    error_message: String,
}

impl Gate {
    pub fn new(config: &GateConfig) -> Self {
        Self {
            secret: config.secret.clone(),
            digits_only: config.digits_only,
            error_message: config.error_message.clone(),
        }
    }

    pub fn sanitize(&self, input: &str) -> String {
        if self.digits_only {
            input.chars().filter(|c| c.is_ascii_digit()).collect()
        } else {
            input.trim().to_string()
        }
    }

    pub fn check(&self, input: &str) -> GateOutcome {
        if self.sanitize(input) == self.secret {
            GateOutcome::Accepted
        } else {
            GateOutcome::Rejected {
                message: self.error_message.clone(),
            }
        }
    }

    pub fn secret_len(&self) -> usize {
        self.secret.chars().count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gate() -> Gate {
        Gate::new(&GateConfig::default())
    }

    #[test]
    fn test_correct_code() {
        assert!(gate().check("1999200120092012").is_accepted());
    }

    #[test]
    fn test_wrong_code_has_message() {
        match gate().check("0000000000000000") {
            GateOutcome::Rejected { message } => assert!(!message.is_empty()),
            GateOutcome::Accepted => panic!("wrong code accepted"),
        }
    }

    #[test]
    fn test_separators_are_stripped() {
        assert!(gate().check("1999 2001-2009/2012").is_accepted());
    }

    #[test]
    fn test_prefix_is_not_enough() {
        assert!(!gate().check("19992001").is_accepted());
        assert!(!gate().check("").is_accepted());
    }

    #[test]
    fn test_literal_mode() {
        let config = GateConfig {
            secret: "open sesame".to_string(),
            digits_only: false,
            ..GateConfig::default()
        };
        let gate = Gate::new(&config);
        assert!(gate.check("  open sesame ").is_accepted());
        assert!(!gate.check("open-sesame").is_accepted());
    }
}
