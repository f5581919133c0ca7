//! Min-max normalization of a character set's glyph brightness.

use crate::cache::GlyphBrightnessCache;
use crate::glyph::GlyphRasterizer;
use crate::matcher::closest_index;
use crate::{GlyphtoneError, Result};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaleEntry {
    pub normalized: f64,
    pub raw: f64,
    pub ch: char,
}

/// Normalized brightness of one character set, sorted ascending.
///
/// Characters sharing a raw brightness collapse into one entry; the lowest
/// code point is kept.
#[derive(Debug, Clone)]
pub struct BrightnessScale {
    entries: Vec<ScaleEntry>,
    values: Vec<f64>,
}

impl BrightnessScale {
    /// Every character of `charset` must already be in `cache`.
    pub fn build<R: GlyphRasterizer>(
        cache: &GlyphBrightnessCache<R>,
        charset: &[char],
    ) -> Result<Self> {
        let mut raw: Vec<(f64, char)> = charset
            .iter()
            .map(|&ch| {
                cache
                    .brightness_of(ch)
                    .map(|b| (b, ch))
                    .ok_or(GlyphtoneError::UnknownCharacter(ch))
            })
            .collect::<Result<_>>()?;

        raw.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));
        raw.dedup_by(|later, kept| later.0 == kept.0);

        let (min, max) = match (raw.first(), raw.last()) {
            (Some(first), Some(last)) => (first.0, last.0),
            _ => return Err(GlyphtoneError::EmptyCharset),
        };

        let span = max - min;
        if span == 0.0 {
            log::warn!(
                "all {} characters share brightness {:.4}, normalizing to 0",
                charset.len(),
                min
            );
        }

        let entries: Vec<ScaleEntry> = raw
            .into_iter()
            .map(|(raw, ch)| {
                let normalized = if span == 0.0 { 0.0 } else { (raw - min) / span };
                ScaleEntry { normalized, raw, ch }
            })
            .collect();
        let values = entries.iter().map(|e| e.normalized).collect();

        Ok(Self { entries, values })
    }

    /// Sorted normalized values.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn entries(&self) -> &[ScaleEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Character whose normalized brightness is nearest `target`.
    pub fn nearest(&self, target: f64) -> Option<char> {
        closest_index(target, &self.values).map(|i| self.entries[i].ch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::tests::TableRasterizer;

    fn cache_with(ink: &[(char, usize)]) -> GlyphBrightnessCache<TableRasterizer> {
        let mut cache = GlyphBrightnessCache::new(TableRasterizer::new(ink));
        let chars: Vec<char> = ink.iter().map(|(c, _)| *c).collect();
        cache.ensure_known(&chars);
        cache
    }

    #[test]
    fn test_min_max_rescale() {
        let cache = cache_with(&[('.', 16), (':', 32), ('#', 80)]);
        let scale = BrightnessScale::build(&cache, &['#', '.', ':']).unwrap();
        assert_eq!(scale.values(), &[0.0, 0.25, 1.0]);
        let chars: Vec<char> = scale.entries().iter().map(|e| e.ch).collect();
        assert_eq!(chars, vec!['.', ':', '#']);
        assert_eq!(scale.entries()[2].raw, 80.0 / 256.0);
        assert_eq!(scale.nearest(0.25), Some(':'));
    }

    #[test]
    fn test_scale_uses_only_requested_set() {
        let cache = cache_with(&[(' ', 0), ('.', 16), (':', 32), ('#', 80)]);
        let scale = BrightnessScale::build(&cache, &['.', ':']).unwrap();
        assert_eq!(scale.values(), &[0.0, 1.0]);
        assert_eq!(scale.nearest(0.4), Some('.'));
        assert_eq!(scale.nearest(0.6), Some(':'));
    }

    #[test]
    fn test_equal_brightness_keeps_lowest_code_point() {
        let cache = cache_with(&[('b', 10), ('a', 10), ('#', 90)]);
        let scale = BrightnessScale::build(&cache, &['b', '#', 'a']).unwrap();
        assert_eq!(scale.len(), 2);
        assert_eq!(scale.nearest(0.0), Some('a'));
    }

    #[test]
    fn test_degenerate_range() {
        let cache = cache_with(&[('x', 40), ('o', 40)]);
        let scale = BrightnessScale::build(&cache, &['x', 'o']).unwrap();
        assert_eq!(scale.values(), &[0.0]);
        assert_eq!(scale.nearest(0.9), Some('o'));

        let single = BrightnessScale::build(&cache, &['x']).unwrap();
        assert!(single.values().iter().all(|v| v.is_finite()));
        assert_eq!(single.nearest(0.1), Some('x'));
    }

    #[test]
    fn test_empty_charset() {
        let cache = cache_with(&[]);
        assert!(matches!(
            BrightnessScale::build(&cache, &[]),
            Err(GlyphtoneError::EmptyCharset)
        ));
    }

    #[test]
    fn test_unknown_character() {
        let cache = cache_with(&[('a', 1)]);
        assert!(matches!(
            BrightnessScale::build(&cache, &['a', 'z']),
            Err(GlyphtoneError::UnknownCharacter('z'))
        ));
    }
}
