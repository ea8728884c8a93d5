//! Method planning: which requests and notifications land on the Server and
//! Client interfaces, under which Go names, with which signatures.
//!
//! Naming runs in two passes. An override table first pins a handful of
//! legacy short names; a collision pass then renames every remaining method
//! whose short name is claimed more than once to its fully qualified form.
//! Merging the passes would lose the pins, so order matters.

use std::collections::HashMap;

use crate::generator::Generator;
use crate::model::{Notification, Request};
use crate::names;

/// One entry on the Server or Client interface.
#[derive(Debug, Clone)]
pub struct MethodInfo {
    /// Raw LSP method string, e.g. `textDocument/completion`.
    pub method: String,
    /// Go method name, e.g. `Completion`.
    pub go_name: String,
    pub doc: String,
    pub is_request: bool,
    /// Go type for params; empty when the method takes none.
    pub params_type: String,
    /// Go type for the result; empty for notifications and result-less requests.
    pub result_type: String,
}

impl MethodInfo {
    /// Render the Go method signature from the stored parts.
    pub fn signature(&self) -> String {
        match (self.params_type.is_empty(), self.result_type.is_empty()) {
            (false, false) => format!(
                "{}(ctx context.Context, params {}) ({}, error)",
                self.go_name, self.params_type, self.result_type
            ),
            (false, true) => format!(
                "{}(ctx context.Context, params {}) error",
                self.go_name, self.params_type
            ),
            (true, false) => format!(
                "{}(ctx context.Context) ({}, error)",
                self.go_name, self.result_type
            ),
            (true, true) => format!("{}(ctx context.Context) error", self.go_name),
        }
    }
}

/// Preferred Go names for specific LSP methods. Entries keep the short names
/// of the pre-3.17 protocol library where newer methods would otherwise force
/// a rename; pinned methods are exempt from the collision pass.
fn method_name_override(method: &str) -> Option<&'static str> {
    Some(match method {
        // textDocument/ notifications collide with notebookDocument/*.
        "textDocument/didOpen" => "DidOpen",
        "textDocument/didClose" => "DidClose",
        "textDocument/didChange" => "DidChange",
        "textDocument/didSave" => "DidSave",

        // The resolve family collides with itself under the short name "Resolve".
        "completionItem/resolve" => "CompletionResolve",
        "codeLens/resolve" => "CodeLensResolve",
        "documentLink/resolve" => "DocumentLinkResolve",
        "codeAction/resolve" => "CodeActionResolve",
        "inlayHint/resolve" => "InlayHintResolve",
        "workspaceSymbol/resolve" => "WorkspaceSymbolResolve",

        // textDocument/diagnostic keeps the short name; workspace/diagnostic
        // falls back to its full form.
        "textDocument/diagnostic" => "Diagnostic",

        // Legacy plurals.
        "textDocument/foldingRange" => "FoldingRanges",
        "workspace/symbol" => "Symbols",

        // Semantic tokens keep their historical prefix.
        "textDocument/semanticTokens/full" => "SemanticTokensFull",
        "textDocument/semanticTokens/full/delta" => "SemanticTokensFullDelta",
        "textDocument/semanticTokens/range" => "SemanticTokensRange",

        "window/workDoneProgress/cancel" => "WorkDoneProgressCancel",
        _ => return None,
    })
}

/// All methods on the Server interface (client→server and both directions),
/// disambiguated and sorted by LSP method string.
pub fn collect_server_methods(gen: &mut Generator<'_>) -> Vec<MethodInfo> {
    let model = gen.model;
    let mut methods = Vec::new();

    for req in &model.requests {
        if req.proposed || !req.message_direction.targets_server() {
            continue;
        }

        methods.push(build_request_method(gen, req));
    }

    for notif in &model.notifications {
        if notif.proposed || !notif.message_direction.targets_server() {
            continue;
        }

        methods.push(build_notification_method(gen, notif));
    }

    disambiguate_methods(&mut methods);
    methods.sort_by(|a, b| a.method.cmp(&b.method));

    methods
}

/// All methods on the Client interface (server→client and both directions),
/// disambiguated and sorted by LSP method string.
pub fn collect_client_methods(gen: &mut Generator<'_>) -> Vec<MethodInfo> {
    let model = gen.model;
    let mut methods = Vec::new();

    for req in &model.requests {
        if req.proposed || !req.message_direction.targets_client() {
            continue;
        }

        methods.push(build_request_method(gen, req));
    }

    for notif in &model.notifications {
        if notif.proposed || !notif.message_direction.targets_client() {
            continue;
        }

        methods.push(build_notification_method(gen, notif));
    }

    disambiguate_methods(&mut methods);
    methods.sort_by(|a, b| a.method.cmp(&b.method));

    methods
}

fn build_request_method<'m>(gen: &mut Generator<'m>, req: &'m Request) -> MethodInfo {
    MethodInfo {
        method: req.method.clone(),
        go_name: names::method_short_name(&req.method),
        doc: req.documentation.clone(),
        is_request: true,
        params_type: gen.resolve_method_type(req.params.as_ref()),
        result_type: gen.resolve_method_type(req.result.as_ref()),
    }
}

fn build_notification_method<'m>(gen: &mut Generator<'m>, notif: &'m Notification) -> MethodInfo {
    MethodInfo {
        method: notif.method.clone(),
        go_name: names::method_short_name(&notif.method),
        doc: notif.documentation.clone(),
        is_request: false,
        params_type: gen.resolve_method_type(notif.params.as_ref()),
        result_type: String::new(),
    }
}

/// Apply the override table, then rename the remaining colliding short names
/// to their fully qualified forms. Pinned names keep their pin even if the
/// pin itself still collides.
fn disambiguate_methods(methods: &mut [MethodInfo]) {
    let mut pinned = vec![false; methods.len()];

    for (idx, info) in methods.iter_mut().enumerate() {
        if let Some(name) = method_name_override(&info.method) {
            info.go_name = name.to_string();
            pinned[idx] = true;
        }
    }

    let mut counts: HashMap<String, usize> = HashMap::with_capacity(methods.len());
    for info in methods.iter() {
        *counts.entry(info.go_name.clone()).or_default() += 1;
    }

    let colliding: Vec<bool> = methods
        .iter()
        .map(|info| counts[info.go_name.as_str()] > 1)
        .collect();

    for (idx, info) in methods.iter_mut().enumerate() {
        if pinned[idx] || !colliding[idx] {
            continue;
        }

        info.go_name = names::method_full_name(&info.method);
    }
}

// --------------------------------- Tests ---------------------------------- //
