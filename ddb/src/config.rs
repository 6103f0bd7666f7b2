/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

//! Settings that shape how entities are written.

/// Marshaling options applied by [`Write`](crate::Write).
#[derive(Debug, Clone)]
pub struct Config {
    empty_collections: bool,
}

impl Default for Config {
    fn default() -> Self {
        Builder::default().build()
    }
}

impl Config {
    /// Create a new `Config` builder
    pub fn builder() -> Builder {
        Builder::default()
    }

    /// Whether empty lists, maps and sets are written as part of put payloads.
    pub fn empty_collections(&self) -> bool {
        self.empty_collections
    }
}

/// Fluent style builder for [Config]
#[derive(Debug, Clone, Default)]
pub struct Builder {
    empty_collections: Option<bool>,
}

impl Builder {
    /// Write top-level empty lists, maps and sets instead of omitting them.
    ///
    /// Enabled by default.
    pub fn empty_collections(mut self, enabled: bool) -> Self {
        self.empty_collections = Some(enabled);
        self
    }

    /// Consumes the builder and constructs a [`Config`]
    pub fn build(self) -> Config {
        Config {
            empty_collections: self.empty_collections.unwrap_or(true),
        }
    }
}
