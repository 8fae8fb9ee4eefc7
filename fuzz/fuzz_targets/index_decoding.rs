// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Fuzz target for index file decoding.
//!
//! Arbitrary bytes must be rejected with an error, never a panic, and an
//! index that does decode must be searchable.

#![no_main]

use libfuzzer_sys::fuzz_target;
use sciqa::index::storage::decode_index;
use sciqa::{Field, LengthNorm, Operator, SearchIndex, SearchRequest};

fuzz_target!(|data: &[u8]| {
    if let Ok(index) = decode_index(data) {
        let request = SearchRequest {
            query: "water",
            default_field: Field::Text,
            operator: Operator::Or,
            top_n: 10,
            length_norm: LengthNorm::Classic,
        };
        let _ = index.search(&request);
    }
});
