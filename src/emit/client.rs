//! The client file: the Client interface and a dispatcher that forwards
//! interface calls onto a JSON-RPC connection.

use std::fmt::{self, Write};

use crate::emit::{go_quote, write_header, write_method_doc};
use crate::generator::Generator;
use crate::methods::{self, MethodInfo};

pub(crate) fn emit(gen: &mut Generator<'_>) -> Result<String, fmt::Error> {
    let mut buf = String::with_capacity(10 * 1024);
    write_header(
        &mut buf,
        &gen.model.meta_data.version,
        "protocol",
        &["context", "go.lsp.dev/jsonrpc2"],
    )?;

    let client_methods = methods::collect_client_methods(gen);

    buf.push_str("// Client defines the interface for an LSP client.\n");
    buf.push_str("// All methods correspond to LSP requests and notifications\n");
    buf.push_str("// directed from server to client.\n");
    buf.push_str("type Client interface {\n");

    for info in &client_methods {
        write_method_doc(&mut buf, &info.doc, &info.go_name, &info.method)?;
        writeln!(buf, "\t{}", info.signature())?;
    }

    buf.push_str("}\n\n");

    buf.push_str("type clientDispatcher struct {\n");
    buf.push_str("\tconn jsonrpc2.Conn\n");
    buf.push_str("\tlogger Logger\n");
    buf.push_str("}\n\n");

    buf.push_str(
        "// ClientDispatcher returns a Client that dispatches LSP requests/notifications\n",
    );
    buf.push_str("// across the given jsonrpc2 connection.\n");
    buf.push_str("//\n");
    buf.push_str("// The logger parameter is used for protocol-level logging. Pass NopLogger()\n");
    buf.push_str("// (or nil) to disable logging.\n");
    buf.push_str("func ClientDispatcher(conn jsonrpc2.Conn, logger Logger) Client {\n");
    buf.push_str("\tif logger == nil {\n");
    buf.push_str("\t\tlogger = NopLogger()\n");
    buf.push_str("\t}\n");
    buf.push_str("\treturn &clientDispatcher{conn: conn, logger: logger}\n");
    buf.push_str("}\n\n");

    for info in &client_methods {
        write_client_method(&mut buf, info)?;
    }

    Ok(buf)
}

/// One forwarder on the dispatcher: requests go through the connection's
/// synchronous call and decode the response; notifications fire and forget.
fn write_client_method(buf: &mut String, info: &MethodInfo) -> fmt::Result {
    writeln!(buf, "func (c *clientDispatcher) {} {{", info.signature())?;

    if !info.is_request {
        if info.params_type.is_empty() {
            writeln!(buf, "\treturn c.conn.Notify(ctx, {}, nil)", go_quote(&info.method))?;
        } else {
            writeln!(buf, "\treturn c.conn.Notify(ctx, {}, params)", go_quote(&info.method))?;
        }

        buf.push_str("}\n\n");

        return Ok(());
    }

    if info.result_type.is_empty() {
        if info.params_type.is_empty() {
            writeln!(buf, "\t_, err := c.conn.Call(ctx, {}, nil, nil)", go_quote(&info.method))?;
        } else {
            writeln!(
                buf,
                "\t_, err := c.conn.Call(ctx, {}, params, nil)",
                go_quote(&info.method)
            )?;
        }

        buf.push_str("\treturn err\n");
        buf.push_str("}\n\n");

        return Ok(());
    }

    let bare_result = info.result_type.strip_prefix('*');
    let is_ptr = bare_result.is_some();
    let bare_result = bare_result.unwrap_or(&info.result_type);

    writeln!(buf, "\tvar result {bare_result}")?;

    if info.params_type.is_empty() {
        writeln!(
            buf,
            "\t_, err := c.conn.Call(ctx, {}, nil, &result)",
            go_quote(&info.method)
        )?;
    } else {
        writeln!(
            buf,
            "\t_, err := c.conn.Call(ctx, {}, params, &result)",
            go_quote(&info.method)
        )?;
    }

    buf.push_str("\tif err != nil {\n");

    // A pointer result reports failure as nil; a value result needs an
    // explicit zero value.
    if is_ptr {
        buf.push_str("\t\treturn nil, err\n");
    } else {
        writeln!(buf, "\t\tvar zero {bare_result}")?;
        buf.push_str("\t\treturn zero, err\n");
    }

    buf.push_str("\t}\n");

    if is_ptr {
        buf.push_str("\treturn &result, nil\n");
    } else {
        buf.push_str("\treturn result, nil\n");
    }

    buf.push_str("}\n\n");

    Ok(())
}
