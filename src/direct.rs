//! Uncached converter that renders every group on every call.

use crate::config::ConverterConfig;
use crate::error::ConvertError;
use crate::render::GroupRenderer;
use crate::segment::segment;
use crate::tables::lexicon::{Lexicon, ZERO_WORD};
use crate::tables::scale::scale_word;
use crate::{normalize, validate, NumberConverter};

/// Straightforward converter: segment, render each group, join.
///
/// Holds no tables or pools and allocates freely. Its output is the
/// reference that [`VietnameseConverter`](crate::VietnameseConverter) must
/// reproduce byte for byte under the same configuration.
#[derive(Debug, Clone)]
pub struct DirectConverter {
    renderer: GroupRenderer,
    default_currency: String,
}

impl Default for DirectConverter {
    fn default() -> Self {
        Self::new()
    }
}

impl DirectConverter {
    pub fn new() -> Self {
        Self::with_config(&ConverterConfig::default())
    }

    /// Uses the lexical and filler settings of `config`; pool and metrics
    /// settings do not apply.
    pub fn with_config(config: &ConverterConfig) -> Self {
        Self {
            renderer: GroupRenderer::new(Lexicon::new(config.four_form), config.filler),
            default_currency: config.default_currency.clone(),
        }
    }
}

impl NumberConverter for DirectConverter {
    fn convert(&self, number: i64, currency: &str) -> Result<String, ConvertError> {
        let number = validate(number)?;

        let mut text = if number == 0 {
            ZERO_WORD.to_string()
        } else {
            let groups = segment(number);
            let mut parts = Vec::with_capacity(groups.len());
            let mut leading = true;
            for group in groups.iter().filter(|g| g.value != 0) {
                let mut phrase = self.renderer.render(group.value, leading, group.index);
                let scale = scale_word(group.index);
                if !scale.is_empty() {
                    phrase.push(' ');
                    phrase.push_str(&scale);
                }
                parts.push(phrase);
                leading = false;
            }
            normalize(&parts.join(" ")).into_owned()
        };

        if !currency.is_empty() {
            text.push(' ');
            text.push_str(currency);
        }
        Ok(text)
    }

    fn default_currency(&self) -> &str {
        &self.default_currency
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::FillerStyle;

    #[test]
    fn renders_basic_numbers() {
        let direct = DirectConverter::new();
        assert_eq!(direct.convert_default(0).unwrap(), "không đồng");
        assert_eq!(direct.convert_default(5).unwrap(), "năm đồng");
        assert_eq!(direct.convert_default(15).unwrap(), "mười lăm đồng");
        assert_eq!(direct.convert_default(101).unwrap(), "một trăm lẻ một đồng");
        assert_eq!(direct.convert(1_000_000, "").unwrap(), "một triệu");
    }

    #[test]
    fn full_filler_configuration() {
        let direct = DirectConverter::with_config(&ConverterConfig {
            filler: FillerStyle::Full,
            ..ConverterConfig::default()
        });
        assert_eq!(
            direct.convert_default(1_001).unwrap(),
            "một nghìn không trăm lẻ một đồng"
        );
    }

    #[test]
    fn validates_input() {
        let direct = DirectConverter::new();
        assert_eq!(direct.convert(-1, ""), Err(ConvertError::NegativeNumber(-1)));
        assert_eq!(
            direct.convert(1_000_000_000_000_000, ""),
            Err(ConvertError::NumberTooLarge(1_000_000_000_000_000))
        );
    }
}
