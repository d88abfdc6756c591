//! Reference resolution
//!
//! Follows each property's `$ref` to the definition with the matching registry
//! key and inlines a copy of that definition's properties, recursively.

use crate::document::Document;
use crate::{SwaggerError, SwaggerResult};
use serde::{Deserialize, Serialize};
use std::ops::AddAssign;
use swagger_schema::{reference_target, Property, SchemaObject};
use tracing::{debug, info, warn};

/// Resolution policy
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolverConfig {
    /// Fail on a `$ref` with no matching definition instead of leaving it un-inlined
    #[serde(default = "default_fail_on_unresolved")]
    pub fail_on_unresolved: bool,
}

fn default_fail_on_unresolved() -> bool {
    true
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            fail_on_unresolved: default_fail_on_unresolved(),
        }
    }
}

/// Counters reported by a resolution run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResolutionStats {
    /// References inlined, nested ones included
    pub inlined: usize,

    /// References left un-inlined because no definition matched
    pub unresolved: usize,
}

impl AddAssign for ResolutionStats {
    fn add_assign(&mut self, other: Self) {
        self.inlined += other.inlined;
        self.unresolved += other.unresolved;
    }
}

/// Inlines `$ref` targets into properties
pub struct Resolver {
    config: ResolverConfig,
}

impl Default for Resolver {
    fn default() -> Self {
        Self::new(ResolverConfig::default())
    }
}

impl Resolver {
    pub fn new(config: ResolverConfig) -> Self {
        Self { config }
    }

    /// Resolve one property against a definition table.
    ///
    /// A property without `$ref` is left alone. Otherwise its `properties`
    /// become a copy of the target's, and each copy is resolved in turn.
    /// Revisiting a reference already on the current chain is an error.
    pub fn resolve(
        &self,
        property: &mut Property,
        definitions: &[SchemaObject],
    ) -> SwaggerResult<ResolutionStats> {
        let mut stats = ResolutionStats::default();
        let mut chain = Vec::new();
        self.resolve_chain(property, definitions, &mut chain, &mut stats)?;
        Ok(stats)
    }

    fn resolve_chain(
        &self,
        property: &mut Property,
        definitions: &[SchemaObject],
        chain: &mut Vec<String>,
        stats: &mut ResolutionStats,
    ) -> SwaggerResult<()> {
        let Some(reference) = property.reference.clone() else {
            return Ok(());
        };

        let depth = chain.len();
        let outcome = self.inline_target(property, reference, definitions, chain, stats);
        chain.truncate(depth);
        outcome
    }

    /// Follow `reference` through alias and array-wrapper definitions (whose
    /// own `ref` takes precedence) to a concrete one, then inline its fields.
    /// Every definition visited stays on `chain` while the copy is resolved.
    fn inline_target(
        &self,
        property: &mut Property,
        mut reference: String,
        definitions: &[SchemaObject],
        chain: &mut Vec<String>,
        stats: &mut ResolutionStats,
    ) -> SwaggerResult<()> {
        let definition = loop {
            let target = reference_target(&reference);

            if chain.contains(&target) {
                let mut cycle = chain.clone();
                cycle.push(target);
                return Err(SwaggerError::CyclicReference { chain: cycle });
            }

            let Some(definition) = definitions.iter().find(|d| d.registry_key == target) else {
                if self.config.fail_on_unresolved {
                    return Err(SwaggerError::UnresolvedReference {
                        reference,
                        property: property.name.clone(),
                    });
                }
                warn!(
                    "Leaving property {} un-inlined: no definition for {}",
                    property.name, reference
                );
                property.properties.clear();
                stats.unresolved += 1;
                return Ok(());
            };

            chain.push(target);
            match &definition.reference {
                Some(next) => {
                    debug!("Following {} to {}", definition.registry_key, next);
                    reference = next.clone();
                }
                None => break definition,
            }
        };

        debug!(
            "Inlining {} into property {}",
            definition.registry_key, property.name
        );
        property.properties = definition.properties.clone();
        stats.inlined += 1;

        for nested in &mut property.properties {
            self.resolve_chain(nested, definitions, chain, stats)?;
        }

        Ok(())
    }

    /// Resolve every property of every definition.
    ///
    /// Lookups go against a snapshot taken before any mutation, so the result
    /// does not depend on definition order and a second run changes nothing.
    pub fn resolve_document(&self, document: &mut Document) -> SwaggerResult<ResolutionStats> {
        let snapshot = document.definitions.clone();
        let mut stats = ResolutionStats::default();

        for definition in &mut document.definitions {
            for property in &mut definition.properties {
                stats += self.resolve(property, &snapshot)?;
            }
        }

        info!(
            "Resolved references: {} inlined, {} unresolved",
            stats.inlined, stats.unresolved
        );
        Ok(stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use swagger_schema::SchemaParser;
    use serde_json::json;

    fn definition(key: &str, node: serde_json::Value) -> SchemaObject {
        let mut schema = SchemaParser::new().decode_schema(&node, key).unwrap();
        schema.registry_key = key.to_string();
        schema
    }

    fn referencing(name: &str, reference: &str) -> Property {
        Property {
            name: name.to_string(),
            reference: Some(reference.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_no_reference_is_noop() {
        let resolver = Resolver::default();
        let mut property = Property::new("id");
        let stats = resolver.resolve(&mut property, &[]).unwrap();
        assert_eq!(stats, ResolutionStats::default());
        assert!(property.properties.is_empty());
    }

    #[test]
    fn test_resolves_by_registry_key_not_display_name() {
        let table = vec![definition(
            "Category",
            json!({"xml": {"name": "Cat"}, "properties": {"id": {"type": "integer"}}}),
        )];
        let resolver = Resolver::default();

        let mut by_key = referencing("category", "#/definitions/Category");
        resolver.resolve(&mut by_key, &table).unwrap();
        assert_eq!(by_key.properties.len(), 1);

        let mut by_display = referencing("category", "#/definitions/Cat");
        let err = resolver.resolve(&mut by_display, &table).unwrap_err();
        assert!(matches!(
            err,
            SwaggerError::UnresolvedReference { ref property, .. } if property == "category"
        ));
    }

    #[test]
    fn test_nested_references_resolve_recursively() {
        let table = vec![
            definition("Pet", json!({"properties": {"category": {"$ref": "#/definitions/Category"}}})),
            definition("Category", json!({"properties": {"id": {"type": "integer"}}})),
        ];
        let resolver = Resolver::default();

        let mut owner = referencing("pet", "#/definitions/Pet");
        let stats = resolver.resolve(&mut owner, &table).unwrap();

        assert_eq!(stats.inlined, 2);
        assert_eq!(owner.properties[0].name, "category");
        assert_eq!(owner.properties[0].properties[0].name, "id");
    }

    #[test]
    fn test_self_reference_is_cyclic() {
        let table = vec![definition(
            "Node",
            json!({"properties": {"next": {"$ref": "#/definitions/Node"}}}),
        )];
        let resolver = Resolver::default();

        let mut head = referencing("head", "#/definitions/Node");
        let err = resolver.resolve(&mut head, &table).unwrap_err();
        match err {
            SwaggerError::CyclicReference { chain } => assert_eq!(chain, vec!["Node", "Node"]),
            other => panic!("expected cyclic reference, got {other}"),
        }
    }

    #[test]
    fn test_shared_target_is_not_a_cycle() {
        let table = vec![
            definition(
                "Order",
                json!({"properties": {
                    "billing": {"$ref": "#/definitions/Address"},
                    "shipping": {"$ref": "#/definitions/Address"}
                }}),
            ),
            definition("Address", json!({"properties": {"street": {"type": "string"}}})),
        ];
        let resolver = Resolver::default();

        let mut order = referencing("order", "#/definitions/Order");
        let stats = resolver.resolve(&mut order, &table).unwrap();
        assert_eq!(stats.inlined, 3);
    }

    #[test]
    fn test_alias_definition_inlines_its_target() {
        let table = vec![
            definition("PetAlias", json!({"$ref": "#/definitions/Pet"})),
            definition("Pet", json!({"properties": {"id": {"type": "integer"}, "name": {"type": "string"}}})),
        ];
        let resolver = Resolver::default();

        let mut pet = referencing("pet", "#/definitions/PetAlias");
        let stats = resolver.resolve(&mut pet, &table).unwrap();

        assert_eq!(stats.inlined, 1);
        let names: Vec<_> = pet.properties.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["id", "name"]);
    }

    #[test]
    fn test_array_wrapper_definition_inlines_element() {
        let table = vec![
            definition(
                "Pets",
                json!({"type": "array", "items": {"$ref": "#/definitions/Pet"}}),
            ),
            definition("Pet", json!({"properties": {"id": {"type": "integer"}}})),
        ];
        let resolver = Resolver::default();

        let mut pets = referencing("pets", "#/definitions/Pets");
        resolver.resolve(&mut pets, &table).unwrap();

        assert_eq!(pets.properties.len(), 1);
        assert_eq!(pets.properties[0].name, "id");
    }

    #[test]
    fn test_alias_loop_is_cyclic() {
        let table = vec![
            definition("A", json!({"$ref": "#/definitions/B"})),
            definition("B", json!({"$ref": "#/definitions/A"})),
        ];
        let resolver = Resolver::default();

        let mut a = referencing("a", "#/definitions/A");
        match resolver.resolve(&mut a, &table).unwrap_err() {
            SwaggerError::CyclicReference { chain } => assert_eq!(chain, vec!["A", "B", "A"]),
            other => panic!("expected cyclic reference, got {other}"),
        }
    }

    #[test]
    fn test_alias_to_missing_definition() {
        let table = vec![definition("PetAlias", json!({"$ref": "#/definitions/Gone"}))];

        let mut pet = referencing("pet", "#/definitions/PetAlias");
        let err = Resolver::default().resolve(&mut pet, &table).unwrap_err();
        assert!(matches!(
            err,
            SwaggerError::UnresolvedReference { ref reference, .. } if reference == "#/definitions/Gone"
        ));
    }

    #[test]
    fn test_shared_alias_is_not_a_cycle() {
        let table = vec![
            definition(
                "Order",
                json!({"properties": {
                    "billing": {"$ref": "#/definitions/Addr"},
                    "shipping": {"$ref": "#/definitions/Addr"}
                }}),
            ),
            definition("Addr", json!({"$ref": "#/definitions/Address"})),
            definition("Address", json!({"properties": {"street": {"type": "string"}}})),
        ];

        let mut order = referencing("order", "#/definitions/Order");
        let stats = Resolver::default().resolve(&mut order, &table).unwrap();
        assert_eq!(stats.inlined, 3);
        assert_eq!(order.properties[1].properties[0].name, "street");
    }

    #[test]
    fn test_unresolved_can_be_skipped() {
        let resolver = Resolver::new(ResolverConfig {
            fail_on_unresolved: false,
        });
        let mut property = referencing("owner", "#/definitions/Missing");
        let stats = resolver.resolve(&mut property, &[]).unwrap();

        assert_eq!(stats.unresolved, 1);
        assert!(property.properties.is_empty());
    }

    #[test]
    fn test_resolver_config_defaults_from_yaml() {
        let config: ResolverConfig = serde_yaml::from_str("{}").unwrap();
        assert!(config.fail_on_unresolved);
    }
}
