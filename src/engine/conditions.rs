//! Condition predicates and their decode step.
//!
//! Raw rule conditions are single-key YAML maps. The registry decodes
//! each one exactly once into a [`CompiledCondition`], so evaluation
//! works over typed values and never performs a runtime cast. Unknown
//! predicate names and malformed arguments survive decoding as their
//! own variants instead of failing the rule set.

use std::collections::{HashMap, HashSet};

use globset::GlobMatcher;
use serde_yaml::Value;

use crate::rules::Condition;
use crate::scanner::SignalStore;

/// A typed signal expectation used by `signal_equals`.
#[derive(Debug, Clone, PartialEq)]
pub enum SignalValue {
    /// Expect a boolean signal.
    Bool(bool),
    /// Expect a string signal.
    Str(String),
    /// Expect an integer signal.
    Int(i64),
}

impl SignalValue {
    fn from_yaml(value: &Value) -> Option<Self> {
        match value {
            Value::Bool(b) => Some(SignalValue::Bool(*b)),
            Value::String(s) => Some(SignalValue::Str(s.clone())),
            Value::Number(n) => n.as_i64().map(SignalValue::Int),
            _ => None,
        }
    }

    /// Whether an absent signal satisfies this expectation: absence
    /// compares as the zero value of the expected type.
    fn matches_absent(&self) -> bool {
        match self {
            SignalValue::Bool(expected) => !expected,
            SignalValue::Str(expected) => expected.is_empty(),
            SignalValue::Int(expected) => *expected == 0,
        }
    }
}

/// A condition decoded into its typed form.
#[derive(Debug, Clone)]
pub enum CompiledCondition {
    /// `file_exists`: basename equality or glob over relative paths.
    FileExists {
        /// The raw pattern, used for basename equality.
        pattern: String,
        /// Compiled glob; `None` when the pattern is not a valid glob.
        glob: Option<GlobMatcher>,
    },
    /// `code_contains`: case-sensitive substring over captured content.
    CodeContains {
        /// The substring to search for.
        needle: String,
    },
    /// `signal_equals`: typed comparison against one signal.
    SignalEquals {
        /// Signal key, looked up bool -> string -> int.
        key: String,
        /// Expected value.
        expected: SignalValue,
    },
    /// A predicate registered in-process; its raw argument is carried
    /// through to the handler.
    Custom {
        /// Registered predicate name.
        name: String,
        /// Raw YAML argument.
        arg: Value,
    },
    /// A known predicate whose argument had the wrong shape. Evaluates
    /// false without affecting the rest of the rule.
    Malformed {
        /// The predicate name.
        name: String,
    },
    /// A predicate name nobody registered. Marks the whole rule
    /// unsupported.
    Unsupported {
        /// The unrecognized name.
        name: String,
    },
}

/// Handler for an in-process custom predicate.
pub type CustomCondition = fn(arg: &Value, signals: &SignalStore) -> bool;

/// Named predicate registry. Built explicitly so tests and embedders
/// can extend or replace it without global state.
pub struct ConditionRegistry {
    custom: HashMap<String, CustomCondition>,
}

impl ConditionRegistry {
    /// Registry with the built-in predicates only.
    pub fn builtin() -> Self {
        Self {
            custom: HashMap::new(),
        }
    }

    /// Register an additional named predicate. Built-in names cannot be
    /// overridden; they are matched first during decoding.
    pub fn register(&mut self, name: &str, handler: CustomCondition) {
        self.custom.insert(name.to_string(), handler);
    }

    /// Decode one raw condition. Only the first key of the map is
    /// considered, matching the one-predicate-per-entry rule format.
    pub fn compile(&self, raw: &Condition) -> CompiledCondition {
        let Some((name, arg)) = raw.iter().next() else {
            return CompiledCondition::Unsupported {
                name: String::from("<empty>"),
            };
        };

        match name.as_str() {
            "file_exists" => match arg.as_str() {
                Some(pattern) => CompiledCondition::FileExists {
                    pattern: pattern.to_string(),
                    glob: compile_glob(pattern),
                },
                None => CompiledCondition::Malformed { name: name.clone() },
            },
            "code_contains" => match arg.as_str() {
                Some(needle) => CompiledCondition::CodeContains {
                    needle: needle.to_string(),
                },
                None => CompiledCondition::Malformed { name: name.clone() },
            },
            "signal_equals" => compile_signal_equals(name, arg),
            _ => {
                if self.custom.contains_key(name) {
                    CompiledCondition::Custom {
                        name: name.clone(),
                        arg: arg.clone(),
                    }
                } else {
                    CompiledCondition::Unsupported { name: name.clone() }
                }
            }
        }
    }

    /// Evaluate a decoded condition against the finished store.
    /// `Unsupported` conditions are handled by the caller before this
    /// point and evaluate false here as a backstop.
    pub fn evaluate(&self, condition: &CompiledCondition, signals: &SignalStore) -> bool {
        match condition {
            CompiledCondition::FileExists { pattern, glob } => {
                file_exists(pattern, glob.as_ref(), &signals.files())
            }
            CompiledCondition::CodeContains { needle } => signals
                .content_map()
                .values()
                .any(|content| content.contains(needle)),
            CompiledCondition::SignalEquals { key, expected } => {
                signal_equals(key, expected, signals)
            }
            CompiledCondition::Custom { name, arg } => match self.custom.get(name) {
                Some(handler) => handler(arg, signals),
                None => false,
            },
            CompiledCondition::Malformed { .. } => false,
            CompiledCondition::Unsupported { .. } => false,
        }
    }
}

impl Default for ConditionRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Compile a glob, treating `*` as not crossing `/`. Invalid patterns
/// yield `None` and fall back to basename equality only.
fn compile_glob(pattern: &str) -> Option<GlobMatcher> {
    globset::GlobBuilder::new(pattern)
        .literal_separator(true)
        .build()
        .ok()
        .map(|g| g.compile_matcher())
}

fn compile_signal_equals(name: &str, arg: &Value) -> CompiledCondition {
    let Some(mapping) = arg.as_mapping() else {
        return CompiledCondition::Malformed {
            name: name.to_string(),
        };
    };
    let Some((key, expected)) = mapping.iter().next() else {
        return CompiledCondition::Malformed {
            name: name.to_string(),
        };
    };
    let (Some(key), Some(expected)) = (key.as_str(), SignalValue::from_yaml(expected)) else {
        return CompiledCondition::Malformed {
            name: name.to_string(),
        };
    };

    CompiledCondition::SignalEquals {
        key: key.to_string(),
        expected,
    }
}

fn file_exists(pattern: &str, glob: Option<&GlobMatcher>, files: &HashSet<String>) -> bool {
    // Exact basename match first: a bare "README.md" pattern matches
    // the file anywhere in the tree.
    for path in files {
        let basename = path.rsplit('/').next().unwrap_or(path.as_str());
        if basename == pattern {
            return true;
        }
    }

    if let Some(glob) = glob {
        for path in files {
            if glob.is_match(path) {
                return true;
            }
        }
    }
    false
}

fn signal_equals(key: &str, expected: &SignalValue, signals: &SignalStore) -> bool {
    // Lookup priority: bool, then string, then int. A signal present
    // under a different type than expected compares unequal.
    if let Some(actual) = signals.bool_signal(key) {
        return *expected == SignalValue::Bool(actual);
    }
    if let Some(actual) = signals.string_signal(key) {
        return *expected == SignalValue::Str(actual);
    }
    if let Some(actual) = signals.int_signal(key) {
        return *expected == SignalValue::Int(actual);
    }

    // Absent signals compare as the zero value of the expected type.
    expected.matches_absent()
}
