//! Precomputed phrases for every group value.

use std::time::Instant;

use crate::render::GroupRenderer;

/// Number of distinct group values.
pub const GROUP_VALUES: usize = 1000;

/// Read-only phrase tables for all 1000 group values, built once.
///
/// One table is kept per variant so lookups never have to patch a phrase:
///
/// - leading vs. non-leading group (the "không trăm" filler and `lẻ` only
///   appear in non-leading groups);
/// - lowest group vs. groups carrying a scale word, only when the renderer's
///   lexicon reads digit 4 differently above the lowest group.
///
/// Every entry is byte-identical to [`GroupRenderer::render`] for the same
/// inputs.
#[derive(Debug)]
pub struct GroupCache {
    tables: Box<[Box<[Box<str>]>]>,
    index_sensitive: bool,
}

impl GroupCache {
    /// Renders every variant with `renderer`.
    pub fn build(renderer: &GroupRenderer) -> Self {
        let started = Instant::now();
        let index_sensitive = renderer.lexicon().depends_on_group_index();
        let classes = if index_sensitive { 2 } else { 1 };

        let mut tables = Vec::with_capacity(classes * 2);
        for class in 0..classes {
            // Any index > 0 stands for the whole "above units" class.
            let group_index = class;
            for is_first_group in [false, true] {
                let table: Box<[Box<str>]> = (0..GROUP_VALUES as u16)
                    .map(|value| {
                        renderer
                            .render(value, is_first_group, group_index)
                            .into_boxed_str()
                    })
                    .collect();
                tables.push(table);
            }
        }

        tracing::debug!(
            variants = tables.len(),
            elapsed_us = started.elapsed().as_micros() as u64,
            "group cache built"
        );

        Self {
            tables: tables.into_boxed_slice(),
            index_sensitive,
        }
    }

    /// Number of 1000-entry tables held.
    pub fn variants(&self) -> usize {
        self.tables.len()
    }

    /// Cached phrase for `value`. Zero maps to the empty string.
    #[inline]
    pub fn lookup(&self, value: u16, is_first_group: bool, group_index: usize) -> &str {
        debug_assert!((value as usize) < GROUP_VALUES);
        let class = usize::from(self.index_sensitive && group_index > 0);
        let variant = class * 2 + usize::from(is_first_group);
        &self.tables[variant][value as usize % GROUP_VALUES]
    }
}
