//! The types file: every structure, enumeration and type alias, plus the
//! anonymous literals promoted while resolving them.

use std::fmt::{self, Write};

use crate::emit::{go_quote, write_doc, write_field_doc, write_header};
use crate::generator::{optional_type, Generator};
use crate::model::{EnumBaseType, Property};
use crate::names;

pub(crate) fn emit(gen: &mut Generator<'_>) -> Result<String, fmt::Error> {
    let mut buf = String::with_capacity(256 * 1024);
    write_header(
        &mut buf,
        &gen.model.meta_data.version,
        "protocol",
        &["encoding/json"],
    )?;

    let model = gen.model;

    for strc in &model.structures {
        if strc.proposed {
            continue;
        }

        write_doc(&mut buf, &strc.documentation, &strc.name)?;
        writeln!(buf, "type {} struct {{", strc.name)?;

        for prop in gen.collect_properties(strc) {
            write_field(&mut buf, gen, prop)?;
        }

        buf.push_str("}\n\n");
    }

    for enm in &model.enumerations {
        if enm.proposed {
            continue;
        }

        let go_type = enum_base_type(&enm.base);

        write_doc(&mut buf, &enm.documentation, &enm.name)?;
        writeln!(buf, "type {} {}\n", enm.name, go_type)?;
        buf.push_str("const (\n");

        for val in &enm.values {
            if val.proposed {
                continue;
            }

            write_field_doc(&mut buf, &val.documentation)?;

            let const_name = names::enum_value_name(&enm.name, &val.name);

            if go_type == "string" {
                let text = match val.value.as_str() {
                    Some(s) => s.to_string(),
                    None => val.value.to_string(),
                };
                writeln!(buf, "\t{} {} = {}", const_name, enm.name, go_quote(&text))?;
            } else {
                writeln!(
                    buf,
                    "\t{} {} = {}",
                    const_name,
                    enm.name,
                    format_numeric_value(&val.value)
                )?;
            }
        }

        buf.push_str(")\n\n");
    }

    for alias in &model.type_aliases {
        if alias.proposed {
            continue;
        }

        write_doc(&mut buf, &alias.documentation, &alias.name)?;
        let go_type = gen.resolve_type(Some(&alias.ty));
        writeln!(buf, "type {} = {}\n", alias.name, go_type)?;
    }

    // Promoted literals, in name order. The name list is snapshotted first:
    // resolving a literal's own properties may promote further literals,
    // which then belong to a later generation run, not this buffer.
    for name in gen.promoted_literal_names() {
        let Some(lit) = gen.promoted_literal(&name) else {
            continue;
        };

        writeln!(buf, "type {name} struct {{")?;

        for prop in &lit.properties {
            write_field(&mut buf, gen, prop)?;
        }

        buf.push_str("}\n\n");
    }

    buf.push_str("// Ensure json import is used.\nvar _ = json.RawMessage{}\n");

    Ok(buf)
}

fn write_field<'m>(
    buf: &mut String,
    gen: &mut Generator<'m>,
    prop: &'m Property,
) -> fmt::Result {
    if prop.proposed {
        return Ok(());
    }

    write_field_doc(buf, &prop.documentation)?;

    let go_type = optional_type(gen.resolve_type(Some(&prop.ty)), prop.optional);

    writeln!(
        buf,
        "\t{} {} {}",
        names::field_name(&prop.name),
        go_type,
        names::json_tag(&prop.name, prop.optional)
    )
}

/// Go scalar underlying an enumeration.
fn enum_base_type(base: &EnumBaseType) -> &'static str {
    match base.name.as_str() {
        "integer" => "int32",
        "uinteger" => "uint32",
        _ => "string",
    }
}

/// Numeric enum values arrive as JSON numbers; format as signed integers.
fn format_numeric_value(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                i.to_string()
            } else if let Some(f) = n.as_f64() {
                (f as i64).to_string()
            } else {
                n.to_string()
            }
        }
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_formatting() {
        assert_eq!(format_numeric_value(&serde_json::json!(1)), "1");
        assert_eq!(format_numeric_value(&serde_json::json!(-2)), "-2");
        assert_eq!(format_numeric_value(&serde_json::json!(2.0)), "2");
    }

    #[test]
    fn enum_bases() {
        let base = |name: &str| EnumBaseType {
            kind: "base".into(),
            name: name.into(),
        };
        assert_eq!(enum_base_type(&base("integer")), "int32");
        assert_eq!(enum_base_type(&base("uinteger")), "uint32");
        assert_eq!(enum_base_type(&base("string")), "string");
    }
}
