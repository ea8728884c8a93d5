//! Generator state: name indices over the model, the type resolver, and
//! transitive property collection.
//!
//! Resolution is deliberately lossy at the edges: intersections, tuples,
//! multi-member unions and unknown kinds all collapse to `any`. Anonymous
//! literal types are promoted to fresh `Literal<N>` names as they are
//! encountered; the promotion counter is the only state that mutates across
//! the three file emissions, which is why they run in a fixed order.

use std::collections::{BTreeMap, HashMap, HashSet};

use crate::model::{
    Enumeration, LiteralType, Model, Notification, Property, Request, Structure, Type, TypeAlias,
};

/// Holds the parsed model and the lookup indices used during generation.
pub struct Generator<'m> {
    pub model: &'m Model,

    structs: HashMap<&'m str, &'m Structure>,
    enums: HashMap<&'m str, &'m Enumeration>,
    aliases: HashMap<&'m str, &'m TypeAlias>,
    requests: HashMap<&'m str, &'m Request>,
    notifications: HashMap<&'m str, &'m Notification>,

    // Anonymous literal types promoted to named Go structs, keyed by the
    // generated name. BTreeMap keeps emission order stable.
    named_literals: BTreeMap<String, &'m LiteralType>,
    literal_counter: usize,
}

impl<'m> Generator<'m> {
    /// Build a generator from a parsed model, indexing every named item.
    /// Names are expected to be unique; on a duplicate the last entry wins
    /// and a warning is logged.
    pub fn new(model: &'m Model) -> Self {
        let mut gen = Generator {
            model,
            structs: HashMap::with_capacity(model.structures.len()),
            enums: HashMap::with_capacity(model.enumerations.len()),
            aliases: HashMap::with_capacity(model.type_aliases.len()),
            requests: HashMap::with_capacity(model.requests.len()),
            notifications: HashMap::with_capacity(model.notifications.len()),
            named_literals: BTreeMap::new(),
            literal_counter: 0,
        };

        for strc in &model.structures {
            if gen.structs.insert(strc.name.as_str(), strc).is_some() {
                tracing::warn!(name = %strc.name, "duplicate structure name in model");
            }
        }

        for enm in &model.enumerations {
            if gen.enums.insert(enm.name.as_str(), enm).is_some() {
                tracing::warn!(name = %enm.name, "duplicate enumeration name in model");
            }
        }

        for alias in &model.type_aliases {
            if gen.aliases.insert(alias.name.as_str(), alias).is_some() {
                tracing::warn!(name = %alias.name, "duplicate type alias name in model");
            }
        }

        for req in &model.requests {
            if gen.requests.insert(req.method.as_str(), req).is_some() {
                tracing::warn!(method = %req.method, "duplicate request method in model");
            }
        }

        for notif in &model.notifications {
            if gen.notifications.insert(notif.method.as_str(), notif).is_some() {
                tracing::warn!(method = %notif.method, "duplicate notification method in model");
            }
        }

        gen
    }

    // ------------------------------ Resolver ------------------------------ //

    /// Convert an LSP type expression into its Go type string. Anonymous
    /// literals are promoted to named structs as a side effect.
    pub fn resolve_type(&mut self, ty: Option<&'m Type>) -> String {
        let Some(ty) = ty else {
            return "any".to_string();
        };

        match ty {
            Type::Base { name } => base_type(name).to_string(),
            Type::Reference { name } => name.clone(),
            Type::Array { element } => format!("[]{}", self.resolve_type(element.as_deref())),
            Type::Map { key, value } => format!(
                "map[{}]{}",
                self.resolve_type(key.as_deref()),
                self.resolve_type(value.as_deref())
            ),
            Type::Or { items } => self.resolve_union(items),
            // Documented limitation: intersections and tuples are opaque.
            Type::And { .. } | Type::Tuple { .. } => "any".to_string(),
            Type::Literal(lit) => self.promote_literal(lit.as_ref()),
            Type::StringLiteral(_) => "string".to_string(),
            Type::IntegerLiteral(_) => "int32".to_string(),
            Type::BooleanLiteral(_) => "bool".to_string(),
            Type::Unknown { .. } => "any".to_string(),
        }
    }

    /// Resolve a method params/result type; named structures render as
    /// pointers.
    pub fn resolve_method_type(&mut self, ty: Option<&'m Type>) -> String {
        let Some(ty) = ty else {
            return String::new();
        };

        let resolved = self.resolve_type(Some(ty));
        if resolved == "any" {
            return resolved;
        }

        if self.structs.contains_key(resolved.as_str()) {
            return format!("*{resolved}");
        }

        resolved
    }

    /// Union handling:
    ///   - `T | null` → `*T` when `T` is not already nil-representable
    ///   - two or more non-null members → `any`
    fn resolve_union(&mut self, items: &'m [Type]) -> String {
        let non_null: Vec<&'m Type> = items.iter().filter(|item| !item.is_null()).collect();
        let has_null = non_null.len() < items.len();

        if non_null.len() == 1 {
            let resolved = self.resolve_type(Some(non_null[0]));
            if has_null && needs_pointer_for_null(&resolved) {
                return format!("*{resolved}");
            }

            return resolved;
        }

        "any".to_string()
    }

    /// Assign a fresh `Literal<N>` name to an anonymous literal and register
    /// it for emission in the types file. A literal kind with no body is
    /// opaque.
    fn promote_literal(&mut self, lit: Option<&'m LiteralType>) -> String {
        let Some(lit) = lit else {
            return "any".to_string();
        };

        self.literal_counter += 1;
        let name = format!("Literal{}", self.literal_counter);
        tracing::debug!(name = %name, properties = lit.properties.len(), "promoted literal type");
        self.named_literals.insert(name.clone(), lit);

        name
    }

    /// Names of all literals promoted so far, in emission (name) order.
    pub fn promoted_literal_names(&self) -> Vec<String> {
        self.named_literals.keys().cloned().collect()
    }

    /// Look up a promoted literal by generated name.
    pub fn promoted_literal(&self, name: &str) -> Option<&'m LiteralType> {
        self.named_literals.get(name).copied()
    }

    // ------------------------- Property collection ------------------------ //

    /// All properties of a structure for emission: own properties first,
    /// then `extends` bases, then `mixins`, each in declaration order.
    /// First occurrence wins on name conflicts; a visited set guards
    /// against inheritance cycles.
    pub fn collect_properties(&self, structure: &'m Structure) -> Vec<&'m Property> {
        // The visited set is per query: a structure mixed into two siblings
        // must contribute to both.
        let mut visited = HashSet::new();

        self.collect_properties_impl(structure, &mut visited)
    }

    fn collect_properties_impl(
        &self,
        structure: &'m Structure,
        visited: &mut HashSet<&'m str>,
    ) -> Vec<&'m Property> {
        if !visited.insert(structure.name.as_str()) {
            return Vec::new();
        }

        let mut seen = HashSet::new();
        let mut result = Vec::new();

        for prop in &structure.properties {
            if seen.insert(prop.name.as_str()) {
                result.push(prop);
            }
        }

        for base in structure.extends.iter().chain(structure.mixins.iter()) {
            let Some(name) = base.reference_name() else {
                continue;
            };
            let Some(base) = self.structs.get(name) else {
                continue;
            };

            for prop in self.collect_properties_impl(base, visited) {
                if seen.insert(prop.name.as_str()) {
                    result.push(prop);
                }
            }
        }

        result
    }
}

// ------------------------------ Base types -------------------------------- //

/// The closed base-type table. Unknown names fall through to `any`.
fn base_type(name: &str) -> &'static str {
    match name {
        "string" | "RegExp" => "string",
        "DocumentUri" => "DocumentURI",
        "URI" => "URI",
        "integer" => "int32",
        "uinteger" => "uint32",
        "decimal" => "float64",
        "boolean" => "bool",
        "null" | "LSPAny" | "LSPObject" => "any",
        "LSPArray" => "[]any",
        _ => "any",
    }
}

/// Whether a Go type needs a pointer wrapper to represent null/absent.
/// Slices, maps and `any` already have a nil state of their own.
pub(crate) fn needs_pointer_for_null(go_type: &str) -> bool {
    if go_type.starts_with('*') || go_type.starts_with("[]") || go_type.starts_with("map[") {
        return false;
    }

    go_type != "any"
}

/// Wrap an optional field's type in a pointer unless it is already
/// nil-representable.
pub(crate) fn optional_type(go_type: String, optional: bool) -> String {
    if optional && needs_pointer_for_null(&go_type) {
        return format!("*{go_type}");
    }

    go_type
}

// --------------------------------- Tests ---------------------------------- //

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::model::Model;

    fn model_from(json: serde_json::Value) -> Model {
        serde_json::from_value(json).expect("valid model")
    }

    fn ty(json: serde_json::Value) -> Type {
        serde_json::from_value(json).expect("valid type")
    }

    fn empty_model() -> serde_json::Value {
        serde_json::json!({
            "metaData": {"version": "3.17.0"},
            "requests": [], "notifications": [], "structures": [],
            "enumerations": [], "typeAliases": []
        })
    }

    #[test]
    fn resolves_base_types() {
        let model = model_from(empty_model());
        let mut gen = Generator::new(&model);

        let cases = [
            ("string", "string"),
            ("RegExp", "string"),
            ("DocumentUri", "DocumentURI"),
            ("URI", "URI"),
            ("integer", "int32"),
            ("uinteger", "uint32"),
            ("decimal", "float64"),
            ("boolean", "bool"),
            ("null", "any"),
            ("LSPAny", "any"),
            ("LSPObject", "any"),
            ("LSPArray", "[]any"),
            ("somethingNew", "any"),
        ];

        let bases: Vec<(&str, &str, Type)> = cases
            .into_iter()
            .map(|(name, want)| (name, want, ty(serde_json::json!({"kind": "base", "name": name}))))
            .collect();

        for (name, want, base) in &bases {
            assert_eq!(gen.resolve_type(Some(base)), *want, "base {name}");
        }

        assert_eq!(gen.resolve_type(None), "any");
    }

    #[test]
    fn resolves_containers() {
        let model = model_from(empty_model());
        let mut gen = Generator::new(&model);

        let arr = ty(serde_json::json!({
            "kind": "array",
            "element": {"kind": "reference", "name": "CompletionItem"},
        }));
        assert_eq!(gen.resolve_type(Some(&arr)), "[]CompletionItem");

        let map = ty(serde_json::json!({
            "kind": "map",
            "key": {"kind": "base", "name": "DocumentUri"},
            "value": {"kind": "array", "element": {"kind": "reference", "name": "TextEdit"}},
        }));
        assert_eq!(gen.resolve_type(Some(&map)), "map[DocumentURI][]TextEdit");
    }

    #[test]
    fn absent_payloads_resolve_to_any() {
        let model = model_from(empty_model());
        let mut gen = Generator::new(&model);

        let arr = ty(serde_json::json!({"kind": "array"}));
        assert_eq!(gen.resolve_type(Some(&arr)), "[]any");

        let map = ty(serde_json::json!({"kind": "map", "key": {"kind": "base", "name": "string"}}));
        assert_eq!(gen.resolve_type(Some(&map)), "map[string]any");

        // A literal kind with no body is opaque and promotes nothing.
        let lit = ty(serde_json::json!({"kind": "literal"}));
        assert_eq!(gen.resolve_type(Some(&lit)), "any");
        assert!(gen.promoted_literal_names().is_empty());
    }

    #[test]
    fn nullable_union_lifts_to_pointer() {
        let model = model_from(empty_model());
        let mut gen = Generator::new(&model);

        let int_or_null = ty(serde_json::json!({
            "kind": "or",
            "items": [{"kind": "base", "name": "integer"}, {"kind": "base", "name": "null"}],
        }));
        assert_eq!(gen.resolve_type(Some(&int_or_null)), "*int32");

        // Already-nil-representable members stay bare.
        let arr_or_null = ty(serde_json::json!({
            "kind": "or",
            "items": [
                {"kind": "array", "element": {"kind": "base", "name": "string"}},
                {"kind": "base", "name": "null"},
            ],
        }));
        assert_eq!(gen.resolve_type(Some(&arr_or_null)), "[]string");

        let any_or_null = ty(serde_json::json!({
            "kind": "or",
            "items": [{"kind": "base", "name": "LSPAny"}, {"kind": "base", "name": "null"}],
        }));
        assert_eq!(gen.resolve_type(Some(&any_or_null)), "any");
    }

    #[test]
    fn ambiguous_unions_collapse_to_any() {
        let model = model_from(empty_model());
        let mut gen = Generator::new(&model);

        let union = ty(serde_json::json!({
            "kind": "or",
            "items": [
                {"kind": "reference", "name": "MarkupContent"},
                {"kind": "reference", "name": "MarkedString"},
                {"kind": "array", "element": {"kind": "reference", "name": "MarkedString"}},
            ],
        }));
        assert_eq!(gen.resolve_type(Some(&union)), "any");
    }

    #[test]
    fn intersections_and_tuples_are_opaque() {
        let model = model_from(empty_model());
        let mut gen = Generator::new(&model);

        let and = ty(serde_json::json!({
            "kind": "and",
            "items": [{"kind": "reference", "name": "A"}, {"kind": "reference", "name": "B"}],
        }));
        assert_eq!(gen.resolve_type(Some(&and)), "any");

        let tuple = ty(serde_json::json!({
            "kind": "tuple",
            "items": [{"kind": "base", "name": "uinteger"}, {"kind": "base", "name": "uinteger"}],
        }));
        assert_eq!(gen.resolve_type(Some(&tuple)), "any");
    }

    #[test]
    fn literal_promotion_is_ordered_and_registered() {
        let model = model_from(empty_model());
        let mut gen = Generator::new(&model);

        let lit = ty(serde_json::json!({
            "kind": "literal",
            "value": {"properties": [{"name": "name", "type": {"kind": "base", "name": "string"}}]},
        }));

        assert_eq!(gen.resolve_type(Some(&lit)), "Literal1");
        assert_eq!(gen.resolve_type(Some(&lit)), "Literal2");
        assert_eq!(gen.promoted_literal_names(), vec!["Literal1", "Literal2"]);
        assert_eq!(gen.promoted_literal("Literal1").unwrap().properties.len(), 1);
    }

    #[test]
    fn method_types_render_structures_as_pointers() {
        let mut json = empty_model();
        json["structures"] = serde_json::json!([
            {"name": "HoverParams", "properties": []},
        ]);
        json["typeAliases"] = serde_json::json!([
            {"name": "DocumentDiagnosticReport", "type": {"kind": "base", "name": "LSPAny"}},
        ]);
        let model = model_from(json);
        let mut gen = Generator::new(&model);

        let params = ty(serde_json::json!({"kind": "reference", "name": "HoverParams"}));
        assert_eq!(gen.resolve_method_type(Some(&params)), "*HoverParams");

        // Aliases and unresolved references stay by value.
        let alias = ty(serde_json::json!({"kind": "reference", "name": "DocumentDiagnosticReport"}));
        assert_eq!(gen.resolve_method_type(Some(&alias)), "DocumentDiagnosticReport");

        assert_eq!(gen.resolve_method_type(None), "");
    }

    fn inheritance_model() -> Model {
        let mut json = empty_model();
        json["structures"] = serde_json::json!([
            {
                "name": "Child",
                "extends": [{"kind": "reference", "name": "Parent"}],
                "mixins": [{"kind": "reference", "name": "Mixin"}],
                "properties": [
                    {"name": "own", "type": {"kind": "base", "name": "string"}},
                    {"name": "shadowed", "type": {"kind": "base", "name": "string"}},
                ],
            },
            {
                "name": "Parent",
                "extends": [{"kind": "reference", "name": "Child"}],
                "properties": [
                    {"name": "inherited", "type": {"kind": "base", "name": "string"}},
                    {"name": "shadowed", "type": {"kind": "base", "name": "integer"}},
                ],
            },
            {
                "name": "Mixin",
                "properties": [{"name": "mixedIn", "type": {"kind": "base", "name": "boolean"}}],
            },
            {
                "name": "OtherChild",
                "mixins": [{"kind": "reference", "name": "Mixin"}],
                "properties": [],
            },
        ]);

        model_from(json)
    }

    #[test]
    fn collects_own_then_extends_then_mixins() {
        let model = inheritance_model();
        let gen = Generator::new(&model);

        let child = &model.structures[0];
        let names: Vec<&str> = gen
            .collect_properties(child)
            .iter()
            .map(|p| p.name.as_str())
            .collect();

        // Own properties win over the ancestor's `shadowed`; the cycle back
        // to Child through Parent terminates.
        assert_eq!(names, vec!["own", "shadowed", "inherited", "mixedIn"]);
    }

    #[test]
    fn visited_set_is_per_query() {
        let model = inheritance_model();
        let gen = Generator::new(&model);

        let child = &model.structures[0];
        let other = &model.structures[3];

        // Mixin contributes to one sibling...
        assert!(gen.collect_properties(child).iter().any(|p| p.name == "mixedIn"));

        // ...and must still contribute to another queried afterwards.
        let names: Vec<&str> = gen
            .collect_properties(other)
            .iter()
            .map(|p| p.name.as_str())
            .collect();
        assert_eq!(names, vec!["mixedIn"]);
    }

    #[test]
    fn pointer_and_optional_rules() {
        assert!(needs_pointer_for_null("int32"));
        assert!(needs_pointer_for_null("Position"));
        assert!(!needs_pointer_for_null("*Position"));
        assert!(!needs_pointer_for_null("[]string"));
        assert!(!needs_pointer_for_null("map[string]any"));
        assert!(!needs_pointer_for_null("any"));

        assert_eq!(optional_type("int32".into(), true), "*int32");
        assert_eq!(optional_type("[]CompletionItem".into(), true), "[]CompletionItem");
        assert_eq!(optional_type("int32".into(), false), "int32");
    }
}
