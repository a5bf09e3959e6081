/// A single named password strength rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PasswordRule {
    /// At least this many characters
    MinLength(usize),
    /// At least one ASCII lowercase letter
    Lowercase,
    /// At least one ASCII uppercase letter
    Uppercase,
    /// At least one ASCII digit
    Digit,
    /// At least one character that is neither alphanumeric nor whitespace
    Symbol,
}

impl PasswordRule {
    /// Stable rule name, used in configuration and logs.
    pub fn name(&self) -> &'static str {
        match self {
            PasswordRule::MinLength(_) => "min_length",
            PasswordRule::Lowercase => "lowercase",
            PasswordRule::Uppercase => "uppercase",
            PasswordRule::Digit => "digit",
            PasswordRule::Symbol => "symbol",
        }
    }

    pub fn is_satisfied_by(&self, password: &str) -> bool {
        match self {
            PasswordRule::MinLength(min) => password.chars().count() >= *min,
            PasswordRule::Lowercase => password.chars().any(|c| c.is_ascii_lowercase()),
            PasswordRule::Uppercase => password.chars().any(|c| c.is_ascii_uppercase()),
            PasswordRule::Digit => password.chars().any(|c| c.is_ascii_digit()),
            PasswordRule::Symbol => password
                .chars()
                .any(|c| !c.is_alphanumeric() && !c.is_whitespace()),
        }
    }

    /// Human readable requirement, suitable for API responses.
    pub fn message(&self) -> String {
        match self {
            PasswordRule::MinLength(min) => {
                format!("Password must be at least {} characters long", min)
            }
            PasswordRule::Lowercase => {
                "Password must contain at least one lowercase letter".to_string()
            }
            PasswordRule::Uppercase => {
                "Password must contain at least one uppercase letter".to_string()
            }
            PasswordRule::Digit => "Password must contain at least one number".to_string(),
            PasswordRule::Symbol => "Password must contain at least one symbol".to_string(),
        }
    }
}

/// Password strength policy made of named rules.
///
/// The default set is: minimum length 6, one lowercase letter, one digit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordPolicy {
    rules: Vec<PasswordRule>,
}

impl PasswordPolicy {
    pub const DEFAULT_MIN_LENGTH: usize = 6;

    pub fn new(rules: Vec<PasswordRule>) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &[PasswordRule] {
        &self.rules
    }

    /// Messages for every rule the password breaks, in rule order.
    pub fn violations(&self, password: &str) -> Vec<String> {
        self.rules
            .iter()
            .filter(|rule| !rule.is_satisfied_by(password))
            .map(PasswordRule::message)
            .collect()
    }

    pub fn is_satisfied_by(&self, password: &str) -> bool {
        self.rules.iter().all(|rule| rule.is_satisfied_by(password))
    }
}

impl Default for PasswordPolicy {
    fn default() -> Self {
        Self::new(vec![
            PasswordRule::MinLength(Self::DEFAULT_MIN_LENGTH),
            PasswordRule::Lowercase,
            PasswordRule::Digit,
        ])
    }
}
