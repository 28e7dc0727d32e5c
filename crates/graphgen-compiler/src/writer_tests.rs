use indoc::indoc;

use crate::{CodeWriter, Separator};

#[test]
fn nested_blocks_indent_by_four_spaces() {
    let mut w = CodeWriter::new();
    w.open("struct A {");
    w.line("int mX = 0;");
    w.open("void f() {");
    w.line("return;");
    w.close("}");
    w.close("};");

    assert_eq!(
        w.finish(),
        indoc! {"
            struct A {
                int mX = 0;
                void f() {
                    return;
                }
            };
        "}
    );
}

#[test]
fn blank_lines_carry_no_indentation() {
    let mut w = CodeWriter::new();
    w.indented(|w| {
        w.line("a");
        w.line("");
        w.line("b");
    });

    assert_eq!(w.finish(), "    a\n\n    b\n");
}

#[test]
fn text_indents_every_line() {
    let mut w = CodeWriter::new();
    w.indent();
    w.text("int f() const;\n\nint g() const;\n");

    assert_eq!(w.as_str(), "    int f() const;\n\n    int g() const;\n");
}

#[test]
fn finish_ends_with_one_newline() {
    let mut w = CodeWriter::new();
    w.line("x");
    w.blank();
    w.blank();

    assert_eq!(w.finish(), "x\n");
}

#[test]
fn dedent_saturates_at_zero() {
    let mut w = CodeWriter::new();
    w.dedent();
    w.line("x");

    assert_eq!(w.level(), 0);
    assert_eq!(w.as_str(), "x\n");
}

#[test]
fn separator_skips_the_first_section() {
    let mut w = CodeWriter::new();
    let mut sep = Separator::new();
    for name in ["a", "b"] {
        sep.next(&mut w);
        w.line(name);
    }

    assert_eq!(w.as_str(), "a\n\nb\n");
}
