#![no_main]

use batchren_core::transform::{transform, NumberWidth, TransformMode};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if data.len() < 2 {
        return;
    }

    let count = usize::from(data[0] % 16) + 1;
    let input = String::from_utf8_lossy(&data[1..]);
    let mut parts = input.splitn(2, '\n');
    let name: String = parts.next().unwrap_or_default().chars().take(100).collect();
    let text: String = parts.next().unwrap_or("x").chars().take(20).collect();

    let modes = [
        TransformMode::Replace {
            old: text.clone(),
            new: "_".to_string(),
            case_sensitive: data[0] % 2 == 0,
        },
        TransformMode::Prefix {
            prefix: text.clone(),
        },
        TransformMode::Suffix {
            suffix: text.clone(),
        },
        TransformMode::RemoveStart { count },
        TransformMode::RemoveEnd { count },
        TransformMode::Numbering {
            start: u64::MAX - 1,
            step: u64::from(data[0]) + 1,
            width: NumberWidth::One,
            separator: text,
        },
    ];

    for mode in &modes {
        if mode.validate().is_err() {
            continue;
        }
        let renamed = transform(&name, mode, count);
        assert_eq!(renamed, transform(&name, mode, count), "transform must be deterministic");

        // Valid parameters never carry a separator, so none can appear
        if !name.chars().any(std::path::is_separator) {
            assert!(
                !renamed.chars().any(std::path::is_separator),
                "{mode:?} turned {name:?} into {renamed:?}"
            );
        }

        match mode {
            TransformMode::Prefix { prefix } => assert_eq!(renamed, format!("{prefix}{name}")),
            TransformMode::Replace {
                old,
                case_sensitive: true,
                ..
            } if !name.contains(old.as_str()) => {
                assert_eq!(renamed, name, "no match must leave the name unchanged");
            },
            _ => {},
        }

        // Applying the same mode twice must never panic either
        let _ = transform(&renamed, mode, count);
    }
});
