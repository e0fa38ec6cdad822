// Rampart - request parameter validation for Rust
//
// Validates named request parameters against per-parameter rules and
// collects error messages per parameter, with overrides layered from the
// rule identifier, pass-wide messages and per-parameter messages.

// Re-export core functionality
pub use rampart_core::*;

// Re-export the validation engine
pub use rampart_validation;
pub use rampart_validation::{
    AssertionFailure, Fallback, Message, Messages, Rule, RuleSet, RuleSpec, Rules,
    ValidationError, ValidationPipe, Validator, Violation, messages, rules,
};

// Re-export optional crates
#[cfg(feature = "config")]
pub use rampart_config;

#[cfg(feature = "config")]
pub use rampart_config::{ConfigError, ValidationConfig};

/// Built-in rules
pub mod validators {
    pub use rampart_validation::{
        Alnum, Alpha, Between, Digit, Email, In, IntVal, Length, Matches, Max, Min, NotEmpty,
        Required, Url, Uuid,
    };
}

// Prelude for common imports
pub mod prelude {
    pub use crate::validators::*;
    pub use crate::{
        Error, Fallback, HttpRequest, HttpResponse, Messages, ParamSource, Rule, RuleSet,
        RuleSpec, Rules, ValidationPipe, Validator, messages, rules,
    };

    #[cfg(feature = "config")]
    pub use crate::ValidationConfig;
}
