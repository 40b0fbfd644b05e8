//! Schema contract and type registry
//!
//! `schema.graphqls` is the authoritative description of the API. The
//! resolvers are bound by derive macros, so before a schema is handed out the
//! SDL they produce is compared with the contract: every declared type, field,
//! argument and interface must be bound with the same signature, and nothing
//! undeclared may be exposed on a declared type.

use async_graphql::parser::parse_schema;
use async_graphql::parser::types::{
    BaseType, FieldDefinition, OperationType, ServiceDocument, Type, TypeKind, TypeSystemDefinition,
};
use async_graphql::parser::Positioned;
use async_graphql::Name;
use std::collections::{BTreeMap, BTreeSet, HashMap};

use crate::errors::ConfigurationError;

/// The schema text shipped with the crate
pub const SCHEMA_CONTRACT: &str = include_str!("schema.graphqls");

#[derive(Debug, Clone, PartialEq, Eq)]
struct FieldSignature {
    ty: String,
    arguments: BTreeMap<String, String>,
}

#[derive(Debug, Clone)]
struct TypeSignature {
    kind: &'static str,
    implements: BTreeSet<String>,
    fields: BTreeMap<String, FieldSignature>,
}

impl TypeSignature {
    fn leaf(kind: &'static str) -> Self {
        Self {
            kind,
            implements: BTreeSet::new(),
            fields: BTreeMap::new(),
        }
    }
}

fn names(names: &[Positioned<Name>]) -> BTreeSet<String> {
    names.iter().map(|name| name.node.to_string()).collect()
}

fn field_signatures(fields: &[Positioned<FieldDefinition>]) -> BTreeMap<String, FieldSignature> {
    fields
        .iter()
        .map(|field| {
            let arguments = field
                .node
                .arguments
                .iter()
                .map(|arg| {
                    let arg = &arg.node;
                    (arg.name.node.to_string(), arg.ty.node.to_string())
                })
                .collect();
            (
                field.node.name.node.to_string(),
                FieldSignature {
                    ty: field.node.ty.node.to_string(),
                    arguments,
                },
            )
        })
        .collect()
}

fn signatures(document: &ServiceDocument) -> BTreeMap<String, TypeSignature> {
    let mut types = BTreeMap::new();
    for definition in &document.definitions {
        let TypeSystemDefinition::Type(definition) = definition else {
            continue;
        };
        let definition = &definition.node;

        let signature = match &definition.kind {
            TypeKind::Object(object) => TypeSignature {
                kind: "type",
                implements: names(&object.implements),
                fields: field_signatures(&object.fields),
            },
            TypeKind::Interface(interface) => TypeSignature {
                kind: "interface",
                implements: names(&interface.implements),
                fields: field_signatures(&interface.fields),
            },
            TypeKind::InputObject(input) => TypeSignature {
                kind: "input",
                implements: BTreeSet::new(),
                fields: input
                    .fields
                    .iter()
                    .map(|field| {
                        (
                            field.node.name.node.to_string(),
                            FieldSignature {
                                ty: field.node.ty.node.to_string(),
                                arguments: BTreeMap::new(),
                            },
                        )
                    })
                    .collect(),
            },
            TypeKind::Scalar => TypeSignature::leaf("scalar"),
            TypeKind::Enum(_) => TypeSignature::leaf("enum"),
            TypeKind::Union(_) => TypeSignature::leaf("union"),
        };
        types.insert(definition.name.node.to_string(), signature);
    }
    types
}

fn describe_arguments(arguments: &BTreeMap<String, String>) -> String {
    let rendered: Vec<String> = arguments
        .iter()
        .map(|(name, ty)| format!("{}: {}", name, ty))
        .collect();
    format!("({})", rendered.join(", "))
}

fn describe_set(names: &BTreeSet<String>) -> String {
    names.iter().cloned().collect::<Vec<_>>().join(" & ")
}

/// Return type of a field, with list wrappers reduced to a flag
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldType {
    pub named: String,
    pub is_list: bool,
}

impl From<&Type> for FieldType {
    fn from(ty: &Type) -> Self {
        match &ty.base {
            BaseType::Named(name) => FieldType {
                named: name.to_string(),
                is_list: false,
            },
            BaseType::List(inner) => FieldType {
                is_list: true,
                ..FieldType::from(inner.as_ref())
            },
        }
    }
}

/// Field types of every composite type, used for static query analysis
#[derive(Debug, Clone, Default)]
pub struct TypeRegistry {
    fields: HashMap<String, HashMap<String, FieldType>>,
    query: Option<String>,
    mutation: Option<String>,
    subscription: Option<String>,
}

impl TypeRegistry {
    fn from_document(document: &ServiceDocument) -> Self {
        let mut registry = TypeRegistry::default();
        let mut explicit_roots = false;

        for definition in &document.definitions {
            match definition {
                TypeSystemDefinition::Schema(schema) => {
                    explicit_roots = true;
                    let schema = &schema.node;
                    registry.query = schema.query.as_ref().map(|name| name.node.to_string());
                    registry.mutation = schema.mutation.as_ref().map(|name| name.node.to_string());
                    registry.subscription = schema
                        .subscription
                        .as_ref()
                        .map(|name| name.node.to_string());
                }
                TypeSystemDefinition::Type(definition) => {
                    let definition = &definition.node;
                    let fields = match &definition.kind {
                        TypeKind::Object(object) => &object.fields,
                        TypeKind::Interface(interface) => &interface.fields,
                        _ => continue,
                    };
                    registry.fields.insert(
                        definition.name.node.to_string(),
                        fields
                            .iter()
                            .map(|field| {
                                (
                                    field.node.name.node.to_string(),
                                    FieldType::from(&field.node.ty.node),
                                )
                            })
                            .collect(),
                    );
                }
                TypeSystemDefinition::Directive(_) => {}
            }
        }

        if !explicit_roots {
            let conventional =
                |name: &str| registry.fields.contains_key(name).then(|| name.to_string());
            let roots = (
                conventional("Query"),
                conventional("Mutation"),
                conventional("Subscription"),
            );
            (registry.query, registry.mutation, registry.subscription) = roots;
        }
        registry
    }

    /// Root type an operation starts from
    pub fn root(&self, operation: OperationType) -> Option<&str> {
        match operation {
            OperationType::Query => self.query.as_deref(),
            OperationType::Mutation => self.mutation.as_deref(),
            OperationType::Subscription => self.subscription.as_deref(),
        }
    }

    pub fn field(&self, parent: &str, field: &str) -> Option<&FieldType> {
        self.fields.get(parent).and_then(|fields| fields.get(field))
    }
}

/// The parsed schema text
pub struct SchemaContract {
    types: BTreeMap<String, TypeSignature>,
    registry: TypeRegistry,
}

impl SchemaContract {
    pub fn parse(sdl: &str) -> Result<Self, ConfigurationError> {
        let document =
            parse_schema(sdl).map_err(|e| ConfigurationError::MalformedSchema(e.to_string()))?;
        Ok(Self {
            types: signatures(&document),
            registry: TypeRegistry::from_document(&document),
        })
    }

    pub fn registry(&self) -> &TypeRegistry {
        &self.registry
    }

    /// Check the SDL of an executable schema against the contract
    pub fn verify(&self, bound_sdl: &str) -> Result<(), ConfigurationError> {
        let bound = parse_schema(bound_sdl).map_err(|e| {
            ConfigurationError::MalformedSchema(format!("executable schema: {}", e))
        })?;
        let bound = signatures(&bound);

        for (type_name, declared) in &self.types {
            let Some(actual) = bound.get(type_name) else {
                return Err(ConfigurationError::MissingType {
                    type_name: type_name.clone(),
                });
            };

            if declared.kind != actual.kind {
                return Err(ConfigurationError::TypeMismatch {
                    location: type_name.clone(),
                    declared: declared.kind.to_string(),
                    bound: actual.kind.to_string(),
                });
            }

            if declared.implements != actual.implements {
                return Err(ConfigurationError::TypeMismatch {
                    location: format!("{} interfaces", type_name),
                    declared: describe_set(&declared.implements),
                    bound: describe_set(&actual.implements),
                });
            }

            for (field, signature) in &declared.fields {
                let Some(bound_signature) = actual.fields.get(field) else {
                    return Err(ConfigurationError::UnboundField {
                        type_name: type_name.clone(),
                        field: field.clone(),
                    });
                };

                if signature.ty != bound_signature.ty {
                    return Err(ConfigurationError::TypeMismatch {
                        location: format!("{}.{}", type_name, field),
                        declared: signature.ty.clone(),
                        bound: bound_signature.ty.clone(),
                    });
                }

                if signature.arguments != bound_signature.arguments {
                    return Err(ConfigurationError::TypeMismatch {
                        location: format!("{}.{} arguments", type_name, field),
                        declared: describe_arguments(&signature.arguments),
                        bound: describe_arguments(&bound_signature.arguments),
                    });
                }
            }

            if let Some(field) = actual
                .fields
                .keys()
                .find(|field| !declared.fields.contains_key(*field))
            {
                return Err(ConfigurationError::UndeclaredField {
                    type_name: type_name.clone(),
                    field: field.clone(),
                });
            }
        }

        Ok(())
    }
}
