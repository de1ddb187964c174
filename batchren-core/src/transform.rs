use crate::error::ValidationError;
use regex::{NoExpand, RegexBuilder};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::warn;

/// Zero-padded width used by numbering mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum NumberWidth {
    One,
    #[default]
    Two,
    Three,
    Four,
}

impl NumberWidth {
    pub fn digits(self) -> usize {
        match self {
            Self::One => 1,
            Self::Two => 2,
            Self::Three => 3,
            Self::Four => 4,
        }
    }
}

impl TryFrom<u8> for NumberWidth {
    type Error = ValidationError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::One),
            2 => Ok(Self::Two),
            3 => Ok(Self::Three),
            4 => Ok(Self::Four),
            other => Err(ValidationError::InvalidWidth(other)),
        }
    }
}

impl From<NumberWidth> for u8 {
    fn from(width: NumberWidth) -> Self {
        // digits() is at most 4
        width.digits() as Self
    }
}

/// The active transformation together with its parameters.
///
/// Only one mode is active at a time; switching modes replaces the value and
/// with it the previous mode's parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum TransformMode {
    Replace {
        old: String,
        new: String,
        case_sensitive: bool,
    },
    Prefix {
        prefix: String,
    },
    Suffix {
        suffix: String,
    },
    RemoveStart {
        count: usize,
    },
    RemoveEnd {
        count: usize,
    },
    Numbering {
        start: u64,
        step: u64,
        width: NumberWidth,
        separator: String,
    },
}

impl TransformMode {
    pub fn is_numbering(&self) -> bool {
        matches!(self, Self::Numbering { .. })
    }

    /// Short human readable name of the mode, without parameters
    pub fn name(&self) -> &'static str {
        match self {
            Self::Replace { .. } => "Replace text",
            Self::Prefix { .. } => "Add prefix",
            Self::Suffix { .. } => "Add suffix",
            Self::RemoveStart { .. } => "Remove from start",
            Self::RemoveEnd { .. } => "Remove from end",
            Self::Numbering { .. } => "Numbering",
        }
    }

    /// Check parameters before any planning runs.
    pub fn validate(&self) -> Result<(), ValidationError> {
        match self {
            Self::Replace { old, new, .. } => {
                if old.is_empty() {
                    return Err(ValidationError::EmptySearch);
                }
                reject_separator("replacement", new)
            },
            Self::Prefix { prefix } => {
                if prefix.is_empty() {
                    return Err(ValidationError::EmptyPrefix);
                }
                reject_separator("prefix", prefix)
            },
            Self::Suffix { suffix } => {
                if suffix.is_empty() {
                    return Err(ValidationError::EmptySuffix);
                }
                reject_separator("suffix", suffix)
            },
            Self::RemoveStart { count } | Self::RemoveEnd { count } => {
                if *count == 0 {
                    return Err(ValidationError::ZeroValue { field: "count" });
                }
                Ok(())
            },
            Self::Numbering {
                start,
                step,
                separator,
                ..
            } => {
                if *start == 0 {
                    return Err(ValidationError::ZeroValue { field: "start" });
                }
                if *step == 0 {
                    return Err(ValidationError::ZeroValue { field: "step" });
                }
                reject_separator("separator", separator)
            },
        }
    }
}

impl fmt::Display for TransformMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Replace {
                old,
                new,
                case_sensitive,
            } => write!(
                f,
                "{} ({:?} -> {:?}, {})",
                self.name(),
                old,
                new,
                if *case_sensitive {
                    "case-sensitive"
                } else {
                    "ignore case"
                }
            ),
            Self::Prefix { prefix } => write!(f, "{} ({:?})", self.name(), prefix),
            Self::Suffix { suffix } => write!(f, "{} ({:?})", self.name(), suffix),
            Self::RemoveStart { count } | Self::RemoveEnd { count } => {
                write!(f, "{} ({} characters)", self.name(), count)
            },
            Self::Numbering {
                start,
                step,
                width,
                separator,
            } => write!(
                f,
                "{} (start {}, step {}, width {}, separator {:?})",
                self.name(),
                start,
                step,
                width.digits(),
                separator
            ),
        }
    }
}

fn reject_separator(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if contains_separator(value) {
        return Err(ValidationError::PathSeparator {
            field,
            value: value.to_string(),
        });
    }
    Ok(())
}

pub(crate) fn contains_separator(value: &str) -> bool {
    value
        .chars()
        .any(|c| std::path::is_separator(c) || c == '\0')
}

/// Split a file name at its last `.` into stem and extension.
///
/// The extension keeps its leading dot; a name without a dot has an empty
/// extension.
pub fn split_name(filename: &str) -> (&str, &str) {
    match filename.rfind('.') {
        Some(pos) => filename.split_at(pos),
        None => (filename, ""),
    }
}

/// Compute the new name for `filename`.
///
/// `ordinal` is the zero-based position of the file within the selection and
/// is only used by numbering. The function never fails: when the mode cannot
/// be applied the original name is returned unchanged.
pub fn transform(filename: &str, mode: &TransformMode, ordinal: usize) -> String {
    let (stem, extension) = split_name(filename);

    match mode {
        TransformMode::Replace {
            old,
            new,
            case_sensitive,
        } => {
            if old.is_empty() {
                return filename.to_string();
            }
            if *case_sensitive {
                return filename.replace(old.as_str(), new);
            }
            match RegexBuilder::new(&regex::escape(old))
                .case_insensitive(true)
                .build()
            {
                Ok(pattern) => pattern.replace_all(filename, NoExpand(new)).into_owned(),
                Err(e) => {
                    warn!(filename, error = %e, "case-insensitive replace failed, keeping name");
                    filename.to_string()
                },
            }
        },

        TransformMode::Prefix { prefix } => format!("{prefix}{filename}"),

        TransformMode::Suffix { suffix } => format!("{stem}{suffix}{extension}"),

        TransformMode::RemoveStart { count } => {
            if *count < filename.chars().count() {
                skip_chars(filename, *count).to_string()
            } else if !extension.is_empty() {
                extension.to_string()
            } else {
                filename.to_string()
            }
        },

        TransformMode::RemoveEnd { count } => {
            let stem_len = stem.chars().count();
            if *count < stem_len {
                format!("{}{}", take_chars(stem, stem_len - count), extension)
            } else {
                extension.to_string()
            }
        },

        TransformMode::Numbering {
            start,
            step,
            width,
            separator,
        } => {
            let number = u64::try_from(ordinal)
                .ok()
                .and_then(|ordinal| ordinal.checked_mul(*step))
                .and_then(|offset| offset.checked_add(*start));
            match number {
                Some(number) => format!(
                    "{number:0width$}{separator}{filename}",
                    width = width.digits()
                ),
                None => {
                    warn!(
                        filename,
                        ordinal, start, step, "numbering overflowed, keeping name"
                    );
                    filename.to_string()
                },
            }
        },
    }
}

fn skip_chars(s: &str, n: usize) -> &str {
    match s.char_indices().nth(n) {
        Some((pos, _)) => &s[pos..],
        None => "",
    }
}

fn take_chars(s: &str, n: usize) -> &str {
    match s.char_indices().nth(n) {
        Some((pos, _)) => &s[..pos],
        None => s,
    }
}
