//! The attribute schema shared by every selection.

use std::borrow::Cow;
use std::collections::HashMap;

use indexmap::IndexSet;
use tracing::trace;
use varsel_attr::{Attribute, AttributeContainer, AttributeError, AttributeRegistry, AttributeValue};

use crate::{
    CompatibilityRule, DisambiguationRule, PrecedenceResult, PrecedenceSorter, Result, SchemaError,
};

/// Rules configured for one attribute.
#[derive(Debug, Clone, Default)]
pub struct AttributeRules {
    pub compatibility:  CompatibilityRule,
    pub disambiguation: DisambiguationRule,
}

/// Registered attributes, their rules and the precedence order.
///
/// A schema is assembled once through [`SchemaBuilder`] and never changes
/// afterwards. It is `Send + Sync`; share it by reference or `Arc`.
#[derive(Debug, Clone)]
pub struct Schema {
    registry:   AttributeRegistry,
    rules:      HashMap<String, AttributeRules>,
    precedence: PrecedenceSorter,
}

static DEFAULT_RULES: AttributeRules = AttributeRules {
    compatibility:  CompatibilityRule::Equality,
    disambiguation: DisambiguationRule::KeepAll,
};

impl Schema {
    pub fn builder() -> SchemaBuilder { SchemaBuilder::default() }

    pub fn has_attribute(&self, attribute: &Attribute) -> bool {
        self.registry.has_attribute(attribute)
    }

    pub fn get_attribute(&self, name: &str) -> Option<&Attribute> {
        self.registry.get_attribute(name)
    }

    pub fn rules(&self, name: &str) -> &AttributeRules {
        self.rules.get(name).unwrap_or(&DEFAULT_RULES)
    }

    /// Attributes carried by any candidate but absent from `requested`, in
    /// first-seen order.
    ///
    /// Registered attributes come back with their registered type. Unknown
    /// ones are returned as found.
    pub fn collect_extra_attributes<'a, I>(
        &self,
        candidates: I,
        requested: &AttributeContainer,
    ) -> Vec<Attribute>
    where
        I: IntoIterator<Item = &'a AttributeContainer>,
    {
        let mut extras: IndexSet<&str> = IndexSet::new();
        let mut found = Vec::new();
        for candidate in candidates {
            for attribute in candidate.attributes() {
                if requested.contains(attribute.name()) || !extras.insert(attribute.name()) {
                    continue;
                }
                let attribute = match self.get_attribute(attribute.name()) {
                    Some(registered) => registered.clone(),
                    None => {
                        trace!(attribute = attribute.name(), "extra attribute is not registered");
                        attribute.clone()
                    }
                };
                found.push(attribute);
            }
        }
        found
    }

    /// Coerce `value` to the registered type of `attribute`.
    pub fn normalize<'v>(
        &self,
        attribute: &Attribute,
        value: &'v AttributeValue,
    ) -> Option<Cow<'v, AttributeValue>> {
        let kind = self
            .get_attribute(attribute.name())
            .map_or(attribute.kind(), Attribute::kind);
        value.coerce(kind)
    }

    /// Whether `candidate` may satisfy `requested` for `attribute`.
    ///
    /// Values that cannot be coerced to the registered type are incompatible.
    pub fn match_value(
        &self,
        attribute: &Attribute,
        requested: &AttributeValue,
        candidate: &AttributeValue,
    ) -> Result<bool> {
        let registered = self.registry.resolve(attribute)?;
        let (Some(requested), Some(candidate)) = (
            requested.coerce(registered.kind()),
            candidate.coerce(registered.kind()),
        ) else {
            trace!(attribute = registered.name(), "type mismatch treated as incompatible");
            return Ok(false);
        };

        self.rules(registered.name())
            .compatibility
            .is_compatible(&requested, &candidate)
            .map_err(|source| SchemaError::Rule {
                attribute: registered.name().to_string(),
                source,
            })
    }

    /// Narrow the distinct `candidates` values of `attribute` to the best ones.
    ///
    /// `candidates` must already be normalized. A requested value that cannot
    /// be coerced counts as absent.
    pub fn disambiguate(
        &self,
        attribute: &Attribute,
        requested: Option<&AttributeValue>,
        candidates: &[AttributeValue],
    ) -> Result<Vec<AttributeValue>> {
        let registered = self.registry.resolve(attribute)?;
        let requested = requested.and_then(|value| value.coerce(registered.kind()));

        let best = self
            .rules(registered.name())
            .disambiguation
            .best(requested.as_deref(), candidates)
            .map_err(|source| SchemaError::Rule {
                attribute: registered.name().to_string(),
                source,
            })?;

        if best.is_empty() && !candidates.is_empty() {
            return Err(SchemaError::EmptyDisambiguation {
                attribute:  registered.name().to_string(),
                candidates: candidates.len(),
            });
        }
        Ok(best)
    }

    pub fn order_by_precedence(&self, attributes: &[Attribute]) -> PrecedenceResult {
        self.precedence.order_by_precedence(attributes)
    }
}

/// Collects attributes, rules and precedence, validated in [`build`](Self::build).
#[derive(Debug, Default)]
pub struct SchemaBuilder {
    attributes:     Vec<Attribute>,
    compatibility:  Vec<(String, CompatibilityRule)>,
    disambiguation: Vec<(String, DisambiguationRule)>,
    precedence:     Vec<String>,
}

impl SchemaBuilder {
    pub fn attribute(mut self, attribute: Attribute) -> Self {
        self.attributes.push(attribute);
        self
    }

    pub fn compatibility(mut self, name: impl Into<String>, rule: CompatibilityRule) -> Self {
        self.compatibility.push((name.into(), rule));
        self
    }

    pub fn disambiguation(mut self, name: impl Into<String>, rule: DisambiguationRule) -> Self {
        self.disambiguation.push((name.into(), rule));
        self
    }

    /// Replace the precedence list, highest precedence first.
    pub fn precedence<I, S>(mut self, order: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.precedence = order.into_iter().map(Into::into).collect();
        self
    }

    pub fn build(self) -> Result<Schema> {
        let mut registry = AttributeRegistry::new();
        for attribute in self.attributes {
            registry.register(attribute)?;
        }

        let known = |name: &str| -> Result<()> {
            match registry.get_attribute(name) {
                Some(_) => Ok(()),
                None => Err(AttributeError::Unregistered(name.to_string()).into()),
            }
        };

        let mut rules: HashMap<String, AttributeRules> = HashMap::new();
        for (name, rule) in self.compatibility {
            known(&name)?;
            rules.entry(name).or_default().compatibility = rule;
        }
        for (name, rule) in self.disambiguation {
            known(&name)?;
            rules.entry(name).or_default().disambiguation = rule;
        }

        let mut seen = IndexSet::new();
        for name in &self.precedence {
            known(name)?;
            if !seen.insert(name.as_str()) {
                return Err(SchemaError::DuplicatePrecedence(name.clone()));
            }
        }

        Ok(Schema {
            registry,
            rules,
            precedence: PrecedenceSorter::new(self.precedence),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use varsel_attr::AttributeType;

    fn schema() -> Schema {
        Schema::builder()
            .attribute(Attribute::new("os", AttributeType::String))
            .attribute(Attribute::new("arch", AttributeType::String))
            .attribute(Attribute::new("jvm", AttributeType::Integer))
            .attribute(Attribute::new("tier", AttributeType::String))
            .compatibility("jvm", CompatibilityRule::AtMost)
            .disambiguation("jvm", DisambiguationRule::Highest)
            .disambiguation("tier", DisambiguationRule::prefer("free"))
            .precedence(["os", "arch"])
            .build()
            .unwrap()
    }

    #[test]
    fn test_schema_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Schema>();
    }

    #[test]
    fn test_match_value_defaults_to_equality() {
        let schema = schema();
        let os = Attribute::raw("os");
        assert!(schema.match_value(&os, &"linux".into(), &"linux".into()).unwrap());
        assert!(!schema.match_value(&os, &"linux".into(), &"windows".into()).unwrap());
    }

    #[test]
    fn test_match_value_coerces_raw_values() {
        let schema = schema();
        let jvm = Attribute::new("jvm", AttributeType::Integer);
        assert!(schema
            .match_value(&jvm, &AttributeValue::Integer(17), &"11".into())
            .unwrap());
        assert!(!schema
            .match_value(&jvm, &AttributeValue::Integer(17), &"21".into())
            .unwrap());
        assert!(!schema
            .match_value(&jvm, &AttributeValue::Integer(17), &"eleven".into())
            .unwrap());
    }

    #[test]
    fn test_match_value_declared_type_mismatch_is_incompatible() {
        let schema = schema();
        let jvm = Attribute::new("jvm", AttributeType::Bool);
        assert!(!schema
            .match_value(&jvm, &AttributeValue::Bool(true), &"17".into())
            .unwrap());

        let best = schema
            .disambiguate(&jvm, Some(&AttributeValue::Bool(true)), &[AttributeValue::Integer(8)])
            .unwrap();
        assert_eq!(best, [AttributeValue::Integer(8)]);
    }

    #[test]
    fn test_match_value_unregistered_is_an_error() {
        let err = schema()
            .match_value(&Attribute::raw("flavor"), &"debug".into(), &"debug".into())
            .unwrap_err();
        assert!(matches!(
            err,
            SchemaError::Attribute(AttributeError::Unregistered(ref name)) if name == "flavor"
        ));
    }

    #[test]
    fn test_rule_error_is_wrapped_not_replaced() {
        #[derive(Debug)]
        struct Broken;
        impl std::fmt::Display for Broken {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result { f.write_str("broken") }
        }
        impl std::error::Error for Broken {}

        let schema = Schema::builder()
            .attribute(Attribute::raw("os"))
            .compatibility("os", CompatibilityRule::custom(|_, _| Err(Broken.into())))
            .build()
            .unwrap();

        let err = schema
            .match_value(&Attribute::raw("os"), &"linux".into(), &"linux".into())
            .unwrap_err();
        let SchemaError::Rule { attribute, source } = err else {
            panic!("expected a rule error");
        };
        assert_eq!(attribute, "os");
        assert!(source.downcast_ref::<Broken>().is_some());
    }

    #[test]
    fn test_disambiguate_without_request_uses_default() {
        let schema = schema();
        let values: Vec<AttributeValue> = vec!["pro".into(), "free".into()];
        let best = schema
            .disambiguate(&Attribute::raw("tier"), None, &values)
            .unwrap();
        assert_eq!(best, vec![AttributeValue::from("free")]);
    }

    #[test]
    fn test_disambiguate_empty_result_is_contract_violation() {
        let schema = Schema::builder()
            .attribute(Attribute::raw("os"))
            .disambiguation("os", DisambiguationRule::custom(|_, _| Ok(Vec::new())))
            .build()
            .unwrap();

        let err = schema
            .disambiguate(&Attribute::raw("os"), None, &[AttributeValue::from("linux")])
            .unwrap_err();
        assert!(matches!(err, SchemaError::EmptyDisambiguation { candidates: 1, .. }));
    }

    #[test]
    fn test_collect_extra_attributes_first_seen() {
        let schema = schema();
        let requested = AttributeContainer::raw([("os", "linux")]);
        let candidates = [
            AttributeContainer::raw([("os", "linux"), ("jvm", "17")]),
            AttributeContainer::raw([("libc", "gnu"), ("jvm", "11"), ("tier", "free")]),
        ];

        let extras = schema.collect_extra_attributes(&candidates, &requested);
        assert_eq!(
            extras,
            vec![
                Attribute::new("jvm", AttributeType::Integer),
                Attribute::raw("libc"),
                Attribute::raw("tier"),
            ]
        );
    }

    #[test]
    fn test_build_rejects_unknown_names() {
        let err = Schema::builder()
            .attribute(Attribute::raw("os"))
            .precedence(["os", "arch"])
            .build()
            .unwrap_err();
        assert!(matches!(err, SchemaError::Attribute(AttributeError::Unregistered(_))));

        let err = Schema::builder()
            .disambiguation("tier", DisambiguationRule::Highest)
            .build()
            .unwrap_err();
        assert!(matches!(err, SchemaError::Attribute(AttributeError::Unregistered(_))));
    }

    #[test]
    fn test_build_rejects_duplicate_precedence() {
        let err = Schema::builder()
            .attribute(Attribute::raw("os"))
            .precedence(["os", "os"])
            .build()
            .unwrap_err();
        assert!(matches!(err, SchemaError::DuplicatePrecedence(ref name) if name == "os"));
    }

    #[test]
    fn test_build_rejects_conflicting_registration() {
        let err = Schema::builder()
            .attribute(Attribute::raw("jvm"))
            .attribute(Attribute::new("jvm", AttributeType::Integer))
            .build()
            .unwrap_err();
        assert!(matches!(err, SchemaError::Attribute(AttributeError::Conflict { .. })));
    }

    #[test]
    fn test_order_by_precedence_uses_configured_list() {
        let attributes = vec![Attribute::raw("tier"), Attribute::raw("arch"), Attribute::raw("os")];
        let result = schema().order_by_precedence(&attributes);
        assert_eq!(result.sorted(), [2, 1]);
        assert_eq!(result.unsorted(), [0]);
    }
}
