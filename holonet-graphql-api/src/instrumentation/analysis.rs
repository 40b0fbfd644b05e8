//! Static analysis of an executable document
//!
//! Walks the selected operation against the type registry to compute its
//! nesting depth and estimated cost. Fragment spreads and inline fragments
//! are inlined where they appear; they never add depth themselves.

use async_graphql::parser::types::{ExecutableDocument, Selection, SelectionSet};
use std::sync::Arc;

use crate::wiring::{FieldType, TypeRegistry};

/// Depth and cost of one operation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QueryShape {
    /// Longest chain of fields that carry a selection set
    pub depth: usize,
    pub complexity: usize,
}

/// A field as seen by a cost function
#[derive(Debug, Clone, Copy)]
pub struct FieldRef<'a> {
    pub parent_type: Option<&'a str>,
    pub name: &'a str,
    /// Declared return type; `None` for fields the registry does not know
    pub ty: Option<&'a FieldType>,
}

impl FieldRef<'_> {
    pub fn is_list(&self) -> bool {
        self.ty.is_some_and(|ty| ty.is_list)
    }
}

/// Cost of a single field given the summed cost of its sub-selection
pub trait FieldComplexity: Send + Sync + 'static {
    fn cost(&self, field: FieldRef<'_>, children: usize) -> usize;
}

/// Unit cost per field, with list fields multiplying their sub-selection
/// by an assumed element count
#[derive(Debug, Clone, Copy)]
pub struct ListMultiplier {
    estimate: usize,
}

impl ListMultiplier {
    pub fn new(estimate: usize) -> Self {
        Self { estimate }
    }
}

impl Default for ListMultiplier {
    fn default() -> Self {
        Self::new(5)
    }
}

impl FieldComplexity for ListMultiplier {
    fn cost(&self, field: FieldRef<'_>, children: usize) -> usize {
        let children = if field.is_list() {
            self.estimate.saturating_mul(children)
        } else {
            children
        };
        children.saturating_add(1)
    }
}

pub struct QueryAnalyzer {
    registry: Arc<TypeRegistry>,
    cost: Arc<dyn FieldComplexity>,
}

impl QueryAnalyzer {
    pub fn new(registry: Arc<TypeRegistry>, cost: Arc<dyn FieldComplexity>) -> Self {
        Self { registry, cost }
    }

    /// Shape of the operation that will run, or of the only one when unnamed.
    ///
    /// An operation that cannot be found has the empty shape; execution
    /// reports that on its own.
    pub fn analyze(
        &self,
        document: &ExecutableDocument,
        operation_name: Option<&str>,
    ) -> QueryShape {
        let operation = document
            .operations
            .iter()
            .find(|(name, _)| match operation_name {
                Some(wanted) => name.is_some_and(|name| name.as_str() == wanted),
                None => true,
            });
        let Some((_, operation)) = operation else {
            return QueryShape::default();
        };

        let root = self.registry.root(operation.node.ty);
        let mut walk = Walk {
            analyzer: self,
            document,
            fragments_in_use: Vec::new(),
        };
        walk.selection_set(root, &operation.node.selection_set.node)
    }
}

struct Walk<'a> {
    analyzer: &'a QueryAnalyzer,
    document: &'a ExecutableDocument,
    fragments_in_use: Vec<&'a str>,
}

impl<'a> Walk<'a> {
    fn selection_set(&mut self, parent: Option<&'a str>, set: &'a SelectionSet) -> QueryShape {
        let mut shape = QueryShape::default();
        for selection in &set.items {
            let inner = match &selection.node {
                Selection::Field(field) => {
                    let field = &field.node;
                    let name = field.name.node.as_str();
                    // Introspection is not costed
                    if name.starts_with("__") {
                        continue;
                    }

                    let ty = parent.and_then(|parent| self.analyzer.registry.field(parent, name));
                    let field_ref = FieldRef {
                        parent_type: parent,
                        name,
                        ty,
                    };

                    if field.selection_set.node.items.is_empty() {
                        QueryShape {
                            depth: 0,
                            complexity: self.analyzer.cost.cost(field_ref, 0),
                        }
                    } else {
                        let child_type = ty.map(|ty| ty.named.as_str());
                        let children = self.selection_set(child_type, &field.selection_set.node);
                        QueryShape {
                            depth: children.depth + 1,
                            complexity: self.analyzer.cost.cost(field_ref, children.complexity),
                        }
                    }
                }
                Selection::FragmentSpread(spread) => {
                    let name = spread.node.fragment_name.node.as_str();
                    if self.fragments_in_use.contains(&name) {
                        continue;
                    }
                    let Some(fragment) =
                        self.document.fragments.get(&spread.node.fragment_name.node)
                    else {
                        continue;
                    };

                    self.fragments_in_use.push(name);
                    let on = fragment.node.type_condition.node.on.node.as_str();
                    let inner = self.selection_set(Some(on), &fragment.node.selection_set.node);
                    self.fragments_in_use.pop();
                    inner
                }
                Selection::InlineFragment(fragment) => {
                    let on = fragment
                        .node
                        .type_condition
                        .as_ref()
                        .map(|condition| condition.node.on.node.as_str())
                        .or(parent);
                    self.selection_set(on, &fragment.node.selection_set.node)
                }
            };

            shape.depth = shape.depth.max(inner.depth);
            shape.complexity = shape.complexity.saturating_add(inner.complexity);
        }
        shape
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wiring::{SchemaContract, SCHEMA_CONTRACT};
    use async_graphql::parser::parse_query;

    fn analyzer() -> QueryAnalyzer {
        let contract = SchemaContract::parse(SCHEMA_CONTRACT).unwrap();
        QueryAnalyzer::new(
            Arc::new(contract.registry().clone()),
            Arc::new(ListMultiplier::default()),
        )
    }

    fn shape(query: &str) -> QueryShape {
        analyzer().analyze(&parse_query(query).unwrap(), None)
    }

    fn sized(depth: usize, complexity: usize) -> QueryShape {
        QueryShape { depth, complexity }
    }

    #[test]
    fn test_scalar_leaves_add_no_depth() {
        let shape = shape(
            r#"{ getCharacterById(id: "c1") { name ... on Biological { starship { name } } } }"#,
        );
        assert_eq!(shape, sized(2, 4));
    }

    #[test]
    fn test_list_fields_multiply_their_subtree() {
        let shape =
            shape(r#"{ getCharacterById(id: "c1") { friends { friends { friends { name } } } } }"#);
        // name 1, friends 1+5*1, friends 1+5*6, friends 1+5*31, root 1+156
        assert_eq!(shape.complexity, 157);
        assert_eq!(shape.depth, 4);
    }

    #[test]
    fn test_fragments_are_inlined_without_depth() {
        let shape = shape(
            r#"
            query {
                getCharacterById(id: "c1") {
                    ...Names
                    ... on Biological { starship { name } }
                }
            }
            fragment Names on Character { id name }
            "#,
        );
        assert_eq!(shape, sized(2, 1 + 1 + 1 + 2));
    }

    #[test]
    fn test_fragment_cycles_terminate() {
        let shape = shape(
            r#"
            { getCharacterById(id: "c1") { ...A } }
            fragment A on Character { name ...B }
            fragment B on Character { id ...A }
            "#,
        );
        assert_eq!(shape, sized(1, 3));
    }

    #[test]
    fn test_selects_named_operation() {
        let document = parse_query(
            r#"
            query Shallow { getStarshipById(id: "s1") { name } }
            query Deep { getCharacterById(id: "c1") { friends { name } } }
            "#,
        )
        .unwrap();
        let analyzer = analyzer();

        assert_eq!(analyzer.analyze(&document, Some("Shallow")).depth, 1);
        assert_eq!(analyzer.analyze(&document, Some("Deep")).depth, 2);
        assert_eq!(
            analyzer.analyze(&document, Some("Missing")),
            QueryShape::default()
        );
    }

    #[test]
    fn test_mutations_start_from_mutation_root() {
        let shape = shape(
            r#"mutation { saveDroidCharacter(input: { name: "R2-D2" }) { id friends { name } } }"#,
        );
        assert_eq!(shape, sized(2, 1 + 1 + 6));
    }

    #[test]
    fn test_introspection_is_free() {
        let shape = shape("{ __schema { types { name } } __typename }");
        assert_eq!(shape, QueryShape::default());
    }

    #[test]
    fn test_custom_cost_function() {
        struct Flat;
        impl FieldComplexity for Flat {
            fn cost(&self, _field: FieldRef<'_>, children: usize) -> usize {
                children + 2
            }
        }

        let contract = SchemaContract::parse(SCHEMA_CONTRACT).unwrap();
        let analyzer = QueryAnalyzer::new(Arc::new(contract.registry().clone()), Arc::new(Flat));
        let document =
            parse_query(r#"{ getCharacterById(id: "c1") { friends { name } } }"#).unwrap();
        assert_eq!(analyzer.analyze(&document, None).complexity, 6);
    }
}
