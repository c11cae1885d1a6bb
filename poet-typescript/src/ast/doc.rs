//! JSDoc comment blocks.

use tspoet_codegen::Code;

/// A JSDoc block, one ` * ` line per line of `doc`.
///
/// Trailing newlines in `doc` are ignored; blank lines inside it print as a
/// bare ` *`. Empty docs produce empty code.
pub(crate) fn jsdoc(doc: &str) -> Code {
    let doc = doc.trim_end_matches('\n');
    if doc.is_empty() {
        return Code::new();
    }
    let mut out = String::from("/**\n");
    for line in doc.lines() {
        if line.is_empty() {
            out.push_str(" *\n");
        } else {
            out.push_str(" * ");
            out.push_str(line);
            out.push('\n');
        }
    }
    out.push_str(" */\n");
    Code::new().text(out)
}
