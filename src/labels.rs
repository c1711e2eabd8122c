//! Length-tiered label typography
//!
//! A poster style may declare label rules: attribute overrides applied to a
//! label element once its text reaches a minimum length. Rules are tried in
//! declaration order and the first match wins. Factor overrides multiply the
//! element's original attribute value, which is captured out of band the
//! first time a rule touches it, so applying rules repeatedly never
//! compounds.

use std::collections::HashMap;
use std::hash::Hash;

use tracing::{debug, warn};

use crate::catalog::{AttributeValue, Catalog, LabelName, LabelRule, PosterStyle};
use crate::error::Result;
use crate::svg::{parse_number, SvgDocument};

/// Current text of the poster labels
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LabelTexts {
    pub header: String,
    pub small_header: String,
    pub text: String,
}

impl LabelTexts {
    pub fn new(
        header: impl Into<String>,
        small_header: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        Self {
            header: header.into(),
            small_header: small_header.into(),
            text: text.into(),
        }
    }

    pub fn get(&self, label: LabelName) -> &str {
        match label {
            LabelName::Header => &self.header,
            LabelName::SmallHeader => &self.small_header,
            LabelName::Text => &self.text,
        }
    }
}

/// Pre-scaling attribute values, keyed by element and attribute name.
///
/// A value is recorded once and never overwritten. An attribute that was
/// absent when first seen is recorded as absent.
#[derive(Debug, Clone)]
pub struct OriginalAttributes<N> {
    values: HashMap<(N, String), Option<String>>,
}

impl<N: Copy + Eq + Hash> OriginalAttributes<N> {
    pub fn new() -> Self {
        Self {
            values: HashMap::new(),
        }
    }

    /// Record the attribute's current value unless already recorded, and
    /// return the recorded one
    pub fn capture<D>(&mut self, doc: &D, node: N, name: &str) -> Option<&str>
    where
        D: SvgDocument<Node = N>,
    {
        self.values
            .entry((node, name.to_string()))
            .or_insert_with(|| doc.attribute(node, name).map(str::to_string))
            .as_deref()
    }

    /// The recorded original, if the attribute has been captured and existed
    pub fn original(&self, node: N, name: &str) -> Option<&str> {
        self.values
            .get(&(node, name.to_string()))
            .and_then(|v| v.as_deref())
    }

    pub fn is_captured(&self, node: N, name: &str) -> bool {
        self.values.contains_key(&(node, name.to_string()))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<N: Copy + Eq + Hash> Default for OriginalAttributes<N> {
    fn default() -> Self {
        Self::new()
    }
}

/// First rule whose label text is at least `min_length` characters long
pub fn select_rule<'a>(style: &'a PosterStyle, labels: &LabelTexts) -> Option<&'a LabelRule> {
    style
        .label_rules
        .iter()
        .find(|rule| labels.get(rule.label).chars().count() >= rule.min_length)
}

/// Apply the matching label rule of `style` to the document.
///
/// The rule's target is the element whose id is the rule's label name.
/// Returns the applied rule, or `None` when no rule matched or its target
/// is not in the document.
pub fn apply_label_rules<'a, D: SvgDocument>(
    doc: &mut D,
    originals: &mut OriginalAttributes<D::Node>,
    style: &'a PosterStyle,
    labels: &LabelTexts,
) -> Option<&'a LabelRule> {
    let rule = select_rule(style, labels)?;
    let Some(target) = doc.element_by_id(rule.label.as_str()) else {
        warn!(style = %style.id, label = %rule.label, "label rule target not found in document");
        return None;
    };
    debug!(style = %style.id, label = %rule.label, min_length = rule.min_length, "applying label rule");

    for (name, value) in &rule.svg_attributes {
        let original = originals.capture(&*doc, target, name).and_then(parse_number);
        match value {
            AttributeValue::Literal(literal) => doc.set_attribute(target, name, literal),
            AttributeValue::Factor(factor) => match original {
                Some(original) => {
                    doc.set_attribute(target, name, &(original * factor).to_string());
                }
                None => {
                    warn!(attribute = %name, label = %rule.label, "no numeric original value to scale, leaving attribute as is");
                }
            },
        }
    }

    Some(rule)
}

/// Resolve `style_id` in the catalog and apply its matching label rule
pub fn change_dynamic_attributes<'c, D: SvgDocument>(
    catalog: &'c Catalog,
    doc: &mut D,
    originals: &mut OriginalAttributes<D::Node>,
    style_id: &str,
    labels: &LabelTexts,
) -> Result<Option<&'c LabelRule>> {
    let style = catalog.find_style(style_id)?;
    Ok(apply_label_rules(doc, originals, style, labels))
}
