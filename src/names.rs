//! LSP identifier → Go identifier mapping.
//!
//! Property names become exported PascalCase fields with well-known
//! abbreviations upcased; method strings map to short names, fully
//! qualified names, and `Method*` constants.

// ------------------------------- Tables ----------------------------------- //

/// Abbreviations upcased when they open a field name and are followed by
/// end-of-string or another capital (`uriScheme` → `URIScheme`, but
/// `identifier` stays `Identifier`).
const ABBREVIATION_PREFIXES: &[(&str, &str)] = &[
    ("Uri", "URI"),
    ("Id", "ID"),
    ("Json", "JSON"),
    ("Utf", "UTF"),
    ("Lsp", "LSP"),
    ("Url", "URL"),
    ("Html", "HTML"),
    ("Css", "CSS"),
];

/// Canonical spellings for whole property names.
fn field_name_override(lsp_name: &str) -> Option<&'static str> {
    Some(match lsp_name {
        "uri" => "URI",
        "id" => "ID",
        "jsonrpc" => "JSONRPC",
        "documentUri" => "DocumentURI",
        "baseUri" => "BaseURI",
        "rootUri" => "RootURI",
        "resourceUri" => "ResourceURI",
        "oldUri" => "OldURI",
        "newUri" => "NewURI",
        "scopeUri" => "ScopeURI",
        "textDocument" => "TextDocument",
        _ => return None,
    })
}

// ------------------------------ Conversions ------------------------------- //

/// Convert an LSP property name (camelCase) to an exported Go field name.
pub fn field_name(lsp_name: &str) -> String {
    if lsp_name.is_empty() {
        return String::new();
    }

    if let Some(mapped) = field_name_override(lsp_name) {
        return mapped.to_string();
    }

    let result = capitalize(lsp_name);

    for (mixed, upper) in ABBREVIATION_PREFIXES {
        if let Some(rest) = result.strip_prefix(mixed) {
            if rest.is_empty() || rest.chars().next().is_some_and(char::is_uppercase) {
                return format!("{upper}{rest}");
            }
        }
    }

    result
}

/// Short Go method name: the segment after the last slash, capitalized.
/// `textDocument/completion` → `Completion`, `initialize` → `Initialize`.
///
/// When short names collide across methods, the planner switches the losers
/// to [`method_full_name`].
pub fn method_short_name(method: &str) -> String {
    let name = match method.rfind('/') {
        Some(idx) => &method[idx + 1..],
        None => method,
    };

    capitalize(name)
}

/// Fully qualified Go method name: strip a leading `$/`, capitalize every
/// non-empty segment, concatenate. `$/cancelRequest` → `CancelRequest`,
/// `textDocument/semanticTokens/full` → `TextDocumentSemanticTokensFull`.
pub fn method_full_name(method: &str) -> String {
    let method = method.strip_prefix("$/").unwrap_or(method);

    method
        .split('/')
        .filter(|part| !part.is_empty())
        .map(capitalize)
        .collect()
}

/// Go constant name for an LSP method string:
/// `textDocument/hover` → `MethodTextDocumentHover`.
pub fn method_const_name(method: &str) -> String {
    format!("Method{}", method_full_name(method))
}

/// Go constant name for an enumeration member: enum name plus the
/// capitalized value name.
pub fn enum_value_name(enum_name: &str, value_name: &str) -> String {
    if value_name.is_empty() {
        return enum_name.to_string();
    }

    format!("{enum_name}{}", capitalize(value_name))
}

/// Go struct tag preserving the wire name; optional fields marshal with
/// `omitempty`.
pub fn json_tag(lsp_name: &str, optional: bool) -> String {
    if optional {
        format!("`json:\"{lsp_name},omitempty\"`")
    } else {
        format!("`json:\"{lsp_name}\"`")
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();

    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().chain(chars).collect(),
    }
}

// --------------------------------- Tests ---------------------------------- //

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn field_names_capitalize_and_upcase_abbreviations() {
        assert_eq!(field_name("line"), "Line");
        assert_eq!(field_name("character"), "Character");
        assert_eq!(field_name("uriScheme"), "URIScheme");
        assert_eq!(field_name("htmlTags"), "HTMLTags");
        // Prefix only fires before a capital or end-of-string.
        assert_eq!(field_name("identifier"), "Identifier");
        assert_eq!(field_name("cssText"), "CSSText");
    }

    #[test]
    fn field_name_overrides_win_over_prefixes() {
        assert_eq!(field_name("uri"), "URI");
        assert_eq!(field_name("jsonrpc"), "JSONRPC");
        assert_eq!(field_name("rootUri"), "RootURI");
        assert_eq!(field_name("textDocument"), "TextDocument");
        assert_eq!(field_name(""), "");
    }

    #[test]
    fn short_method_names() {
        assert_eq!(method_short_name("initialize"), "Initialize");
        assert_eq!(method_short_name("textDocument/completion"), "Completion");
        assert_eq!(method_short_name("textDocument/semanticTokens/full"), "Full");
        assert_eq!(method_short_name("$/cancelRequest"), "CancelRequest");
    }

    #[test]
    fn full_method_names() {
        assert_eq!(method_full_name("$/cancelRequest"), "CancelRequest");
        assert_eq!(
            method_full_name("textDocument/semanticTokens/full"),
            "TextDocumentSemanticTokensFull"
        );
        assert_eq!(method_full_name("workspace/diagnostic"), "WorkspaceDiagnostic");
    }

    #[test]
    fn method_constant_names() {
        assert_eq!(method_const_name("textDocument/hover"), "MethodTextDocumentHover");
        assert_eq!(method_const_name("$/progress"), "MethodProgress");
    }

    #[test]
    fn enum_value_names() {
        assert_eq!(enum_value_name("CompletionItemKind", "text"), "CompletionItemKindText");
        assert_eq!(enum_value_name("MarkupKind", ""), "MarkupKind");
    }

    #[test]
    fn json_tags() {
        assert_eq!(json_tag("line", false), "`json:\"line\"`");
        assert_eq!(json_tag("version", true), "`json:\"version,omitempty\"`");
    }
}
