// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Fuzz target for dataset rows and result-file checkpoints.

#![no_main]

use libfuzzer_sys::fuzz_target;
use sciqa::batch::{checkpoint_from, line_id, parse_line};

fuzz_target!(|data: &str| {
    for line in data.lines() {
        if let Some(record) = parse_line(line) {
            assert_eq!(line_id(line), Some(record.id.as_str()));
            assert!(!record.id.is_empty());
            assert!(record.candidates.iter().all(|c| !c.is_empty()));
        }
    }

    if let Some(id) = checkpoint_from(data) {
        assert!(!id.is_empty());
        assert_ne!(id, "id");
    }
});
