//! The server file: method-name constants, the Server interface and the
//! dispatch switch.

use std::collections::HashSet;
use std::fmt::{self, Write};

use crate::emit::{go_quote, write_header, write_method_doc};
use crate::generator::Generator;
use crate::methods::{self, MethodInfo};
use crate::names;

pub(crate) fn emit(gen: &mut Generator<'_>) -> Result<String, fmt::Error> {
    let mut buf = String::with_capacity(40 * 1024);
    write_header(
        &mut buf,
        &gen.model.meta_data.version,
        "protocol",
        &["context", "encoding/json", "go.lsp.dev/jsonrpc2"],
    )?;

    let server_methods = methods::collect_server_methods(gen);
    let client_methods = methods::collect_client_methods(gen);

    // Constants for both method sets, deduplicated by constant name.
    buf.push_str("// LSP method name constants.\n");
    buf.push_str("const (\n");

    let mut emitted = HashSet::new();

    for info in server_methods.iter().chain(client_methods.iter()) {
        let const_name = names::method_const_name(&info.method);
        if emitted.insert(const_name.clone()) {
            writeln!(buf, "\t{} = {}", const_name, go_quote(&info.method))?;
        }
    }

    buf.push_str(")\n\n");

    buf.push_str("// Server defines the interface for an LSP server.\n");
    buf.push_str("// All methods correspond to LSP requests and notifications\n");
    buf.push_str("// directed from client to server.\n");
    buf.push_str("type Server interface {\n");

    for info in &server_methods {
        write_method_doc(&mut buf, &info.doc, &info.go_name, &info.method)?;
        writeln!(buf, "\t{}", info.signature())?;
    }

    buf.push('\n');
    buf.push_str("\t// Request is a catch-all handler for any LSP method not covered by the\n");
    buf.push_str("\t// interface above.  The method string is the raw LSP method name and\n");
    buf.push_str("\t// params is the already-decoded parameter value.\n");
    buf.push_str("\tRequest(ctx context.Context, method string, params any) (any, error)\n");
    buf.push_str("}\n\n");

    buf.push_str(
        "// serverDispatch dispatches a JSON-RPC request to the appropriate Server method.\n",
    );
    buf.push_str(
        "func serverDispatch(ctx context.Context, server Server, reply jsonrpc2.Replier, req jsonrpc2.Request) error {\n",
    );
    buf.push_str("\tswitch req.Method() {\n");

    for info in &server_methods {
        writeln!(buf, "\tcase {}:", go_quote(&info.method))?;

        if info.is_request {
            write_request_dispatch(&mut buf, info)?;
        } else {
            write_notification_dispatch(&mut buf, info)?;
        }
    }

    buf.push_str("\tdefault:\n");
    buf.push_str("\t\tvar params any\n");
    buf.push_str("\t\tif req.Params() != nil {\n");
    buf.push_str("\t\t\tif err := json.Unmarshal(req.Params(), &params); err != nil {\n");
    buf.push_str("\t\t\t\treturn replyParseError(ctx, reply, err)\n");
    buf.push_str("\t\t\t}\n");
    buf.push_str("\t\t}\n");
    buf.push_str("\t\tresp, err := server.Request(ctx, req.Method(), params)\n");
    buf.push_str("\t\treturn reply(ctx, resp, err)\n");
    buf.push_str("\t}\n");
    buf.push_str("}\n");

    Ok(buf)
}

/// Dispatch case for a request: decode params, invoke, forward result and
/// error to the reply callback.
fn write_request_dispatch(buf: &mut String, info: &MethodInfo) -> fmt::Result {
    if !info.params_type.is_empty() {
        let bare = info.params_type.strip_prefix('*').unwrap_or(&info.params_type);
        writeln!(buf, "\t\tvar params {bare}")?;
        buf.push_str("\t\tif err := json.Unmarshal(req.Params(), &params); err != nil {\n");
        buf.push_str("\t\t\treturn replyParseError(ctx, reply, err)\n");
        buf.push_str("\t\t}\n");
    }

    match (info.params_type.is_empty(), info.result_type.is_empty()) {
        (false, false) => {
            writeln!(buf, "\t\tresult, err := server.{}(ctx, &params)", info.go_name)?;
            buf.push_str("\t\treturn reply(ctx, result, err)\n");
        }
        (false, true) => {
            writeln!(buf, "\t\terr := server.{}(ctx, &params)", info.go_name)?;
            buf.push_str("\t\treturn reply(ctx, nil, err)\n");
        }
        (true, false) => {
            writeln!(buf, "\t\tresult, err := server.{}(ctx)", info.go_name)?;
            buf.push_str("\t\treturn reply(ctx, result, err)\n");
        }
        (true, true) => {
            writeln!(buf, "\t\terr := server.{}(ctx)", info.go_name)?;
            buf.push_str("\t\treturn reply(ctx, nil, err)\n");
        }
    }

    Ok(())
}

/// Dispatch case for a notification: decode params, invoke, no reply.
fn write_notification_dispatch(buf: &mut String, info: &MethodInfo) -> fmt::Result {
    if info.params_type.is_empty() {
        return writeln!(buf, "\t\treturn server.{}(ctx)", info.go_name);
    }

    let bare = info.params_type.strip_prefix('*').unwrap_or(&info.params_type);
    writeln!(buf, "\t\tvar params {bare}")?;
    buf.push_str("\t\tif err := json.Unmarshal(req.Params(), &params); err != nil {\n");
    buf.push_str("\t\t\treturn replyParseError(ctx, reply, err)\n");
    buf.push_str("\t\t}\n");
    writeln!(buf, "\t\treturn server.{}(ctx, &params)", info.go_name)
}
