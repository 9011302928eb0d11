/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

//! Formatting values as URI path labels

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

// Everything outside RFC 3986 `pchar` is escaped: unreserved, sub-delims, `:` and `@` pass through.
const GREEDY: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~')
    .remove(b'!')
    .remove(b'$')
    .remove(b'&')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')')
    .remove(b'*')
    .remove(b'+')
    .remove(b',')
    .remove(b';')
    .remove(b'=')
    .remove(b':')
    .remove(b'@')
    .remove(b'/');

const SEGMENT: &AsciiSet = &GREEDY.add(b'/');

/// How `/` inside a label value is treated.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum EncodingStrategy {
    /// The label occupies exactly one path segment; `/` is escaped.
    Default,
    /// The label may span several path segments; `/` is kept.
    Greedy,
}

/// Percent-encode `value` for use as a path label.
pub fn fmt_string<T: AsRef<str>>(value: T, strategy: EncodingStrategy) -> String {
    let set = match strategy {
        EncodingStrategy::Default => SEGMENT,
        EncodingStrategy::Greedy => GREEDY,
    };
    utf8_percent_encode(value.as_ref(), set).to_string()
}
