mod setup;

use mathbox::{parse, parse_and_layout, ParseErrorKind, RenderCommand, Settings};
use pretty_assertions::assert_eq;
use setup::*;

fn glyph_lines(log: &[String]) -> Vec<String> {
    log.iter()
        .filter(|line| line.starts_with("glyph"))
        .cloned()
        .collect()
}

// ---- input handling ----

#[test]
fn empty_input_is_rejected() {
    let err = layout("").unwrap_err();
    assert!(matches!(*err.kind, ParseErrorKind::EmptyFormula));
    let err = layout("   \t ").unwrap_err();
    assert!(matches!(*err.kind, ParseErrorKind::EmptyFormula));
}

#[test]
fn non_positive_width_is_rejected() {
    let settings = Settings::builder().width(0.0).build();
    let err = layout_with("x", &settings).unwrap_err();
    assert!(matches!(*err.kind, ParseErrorKind::EmptyFormula));
}

#[test]
fn whitespace_between_atoms_is_ignored() {
    let spaced = record(&layout("   x    y  ").unwrap());
    let tight = record(&layout("xy").unwrap());
    assert_eq!(spaced, tight);
}

#[test]
fn grouping_is_transparent() {
    let grouped = record(&layout("{x}").unwrap());
    let bare = record(&layout("x").unwrap());
    assert_eq!(grouped, bare);
}

#[test]
fn comments_run_to_end_of_line() {
    let commented = record(&layout("x % ignored y\n+1").unwrap());
    let plain = record(&layout("x+1").unwrap());
    assert_eq!(commented, plain);
}

// ---- determinism and replay ----

#[test]
fn identical_input_gives_identical_commands() {
    let first = layout("\\frac{a+b}{c}\\sqrt{2}").unwrap();
    let second = layout("\\frac{a+b}{c}\\sqrt{2}").unwrap();
    assert_eq!(first.commands(), second.commands());
}

#[test]
fn replaying_a_render_is_stable() {
    let render = layout("e^{i\\pi}+1=0").unwrap();
    assert_eq!(record(&render), record(&render));
}

#[test]
fn parse_is_side_effect_free() {
    let settings = display_settings();
    let first = parse(ctx(), "a_k^2", &settings).unwrap();
    let second = parse(ctx(), "a_k^2", &settings).unwrap();
    assert_eq!(first, second);
}

// ---- spacing ----

#[test]
fn binary_glue_widens_a_row() {
    let sum = layout("a+b").unwrap();
    let tight = layout("ab").unwrap();
    assert!(sum.width > tight.width);
}

#[test]
fn demoted_binary_loses_its_glue() {
    // A leading minus is ordinary; every fixed-backend glyph is the same
    // width, so "-x" must measure exactly like two plain letters.
    let negated = layout("-x").unwrap();
    let letters = layout("ax").unwrap();
    assert_eq!(negated.width, letters.width);
    // Between two operands the same minus carries medium glue.
    let bound = layout("a-x").unwrap();
    let tight = layout("abx").unwrap();
    assert!(bound.width > tight.width);
}

#[test]
fn explicit_kerns_take_space() {
    let quad = layout("a\\quad b").unwrap();
    let thin = layout("a\\, b").unwrap();
    let none = layout("ab").unwrap();
    assert!(quad.width > thin.width);
    assert!(thin.width > none.width);
}

#[test]
fn script_glue_is_tight() {
    // Inside a superscript the medium binary glue drops to nothing.
    let scripted = layout("x^{a+b}").unwrap();
    let unscripted = layout("x^{ab}").unwrap();
    let base_diff = layout("a+b").unwrap().width - layout("ab").unwrap().width;
    assert!(scripted.width - unscripted.width < base_diff);
}

// ---- scripts ----

#[test]
fn superscripts_render_at_script_size() {
    let log = record(&layout("x^2").unwrap());
    let glyphs = glyph_lines(&log);
    assert_eq!(glyphs.len(), 2);
    assert!(glyphs[0].ends_with("20.000"), "base at text size: {}", glyphs[0]);
    assert!(glyphs[1].ends_with("14.000"), "script shrinks: {}", glyphs[1]);
}

#[test]
fn double_superscript_is_an_error() {
    let err = layout("x^2^3").unwrap_err();
    assert!(matches!(*err.kind, ParseErrorKind::DoubleSuperscript));
}

#[test]
fn scripts_extend_both_directions() {
    let base = layout("x").unwrap();
    let both = layout("x_i^2").unwrap();
    assert!(both.height > base.height);
    assert!(both.depth > base.depth);
}

#[test]
fn primes_attach_as_superscripts() {
    let primed = layout("f'").unwrap();
    let plain = layout("f").unwrap();
    assert!(primed.width > plain.width);
    assert!(primed.height > plain.height);
}

#[test]
fn limits_stack_in_display_mode() {
    let display = layout("\\sum_{i=0}^{n}").unwrap();
    let inline = layout_with("\\sum_{i=0}^{n}", &inline_settings()).unwrap();
    assert!(display.height + display.depth > inline.height + inline.depth);
}

#[test]
fn limits_without_operator_is_an_error() {
    let err = layout("x\\limits^2").unwrap_err();
    assert!(matches!(*err.kind, ParseErrorKind::LimitsWithoutOperator));
}

// ---- fractions and radicals ----

#[test]
fn display_fractions_are_taller_than_inline() {
    let display = layout("\\frac{1}{2}").unwrap();
    let inline = layout_with("\\frac{1}{2}", &inline_settings()).unwrap();
    assert!(display.height + display.depth > inline.height + inline.depth);
}

#[test]
fn fraction_draws_exactly_one_bar() {
    let log = record(&layout("\\frac{1}{2}").unwrap());
    let bars: Vec<&String> = log.iter().filter(|line| line.starts_with("fill")).collect();
    assert_eq!(bars.len(), 1);
}

#[test]
fn binom_draws_no_bar_but_delimiters() {
    let log = record(&layout("\\binom{n}{k}").unwrap());
    assert!(!log.iter().any(|line| line.starts_with("fill")));
    let glyphs = glyph_lines(&log);
    // ( n k ) once each
    assert_eq!(glyphs.len(), 4);
}

#[test]
fn sqrt_covers_its_radicand() {
    let root = layout("\\sqrt{x}").unwrap();
    let plain = layout("x").unwrap();
    assert!(root.height > plain.height);
    assert!(root.width > plain.width);
    let log = record(&root);
    assert!(log.iter().any(|line| line.starts_with("fill")), "overbar drawn");
}

#[test]
fn over_behaves_like_frac() {
    let infix = record(&layout("{a \\over b}").unwrap());
    let command = record(&layout("\\frac{a}{b}").unwrap());
    assert_eq!(infix, command);
}

// ---- delimiters ----

#[test]
fn sized_delimiters_grow_with_their_command() {
    let plain = layout("(x)").unwrap();
    let big = layout("\\bigl(x\\bigr)").unwrap();
    let bigg = layout("\\Biggl(x\\Biggr)").unwrap();
    assert!(big.height + big.depth > plain.height + plain.depth);
    assert!(bigg.height + bigg.depth > big.height + big.depth);
}

#[test]
fn left_right_matches_content_height() {
    let tall = layout("\\left(\\frac{a}{b}\\right)").unwrap();
    let short = layout("\\left(x\\right)").unwrap();
    assert!(tall.height + tall.depth > short.height + short.depth);
}

#[test]
fn unmatched_left_is_an_error() {
    let err = layout("\\left( x").unwrap_err();
    assert!(matches!(*err.kind, ParseErrorKind::MissingRight));
}

#[test]
fn middle_outside_left_right_is_an_error() {
    let err = layout("a \\middle| b").unwrap_err();
    assert!(matches!(*err.kind, ParseErrorKind::UnexpectedMiddle));
}

// ---- macros ----

#[test]
fn user_macros_substitute_arguments() {
    let settings = display_settings();
    let defined = parse_and_layout(
        ctx(),
        "\\newcommand{\\sq}[1]{#1^2}\\sq{x}",
        &settings,
    )
    .unwrap();
    let expanded = layout("x^2").unwrap();
    assert_eq!(record(&defined), record(&expanded));
}

#[test]
fn user_macros_persist_across_calls() {
    let settings = display_settings();
    parse_and_layout(ctx(), "\\newcommand{\\half}{\\frac{1}{2}}x", &settings).unwrap();
    let reused = parse_and_layout(ctx(), "\\half", &settings).unwrap();
    let direct = layout("\\frac{1}{2}").unwrap();
    assert_eq!(record(&reused), record(&direct));
}

#[test]
fn redefining_a_macro_without_renew_is_an_error() {
    let settings = display_settings();
    let err = parse_and_layout(
        ctx(),
        "\\newcommand{\\f}{a}\\newcommand{\\f}{b}",
        &settings,
    )
    .unwrap_err();
    assert!(matches!(*err.kind, ParseErrorKind::MacroRedefinition { .. }));
}

#[test]
fn runaway_expansion_is_capped() {
    let settings = display_settings();
    let err = parse_and_layout(ctx(), "\\newcommand{\\x}{\\x}\\x", &settings).unwrap_err();
    assert!(matches!(*err.kind, ParseErrorKind::TooManyExpansions));
}

#[test]
fn undefined_control_sequence_is_reported() {
    let err = layout("\\nosuchthing").unwrap_err();
    assert!(matches!(
        *err.kind,
        ParseErrorKind::UndefinedControlSequence { .. }
    ));
}

// ---- environments ----

#[test]
fn matrix_columns_align_across_rows() {
    let log = record(&layout("\\begin{matrix}a&b\\\\c&d\\end{matrix}").unwrap());
    let glyphs = glyph_lines(&log);
    assert_eq!(glyphs.len(), 4);
    let x_of = |line: &String| -> f64 {
        line.split_whitespace().nth(3).and_then(|v| v.parse().ok()).unwrap()
    };
    // a above c, b above d
    assert_eq!(x_of(&glyphs[0]), x_of(&glyphs[2]));
    assert_eq!(x_of(&glyphs[1]), x_of(&glyphs[3]));
}

#[test]
fn pmatrix_adds_parentheses() {
    let wrapped = layout("\\begin{pmatrix}a&b\\\\c&d\\end{pmatrix}").unwrap();
    let bare = layout("\\begin{matrix}a&b\\\\c&d\\end{matrix}").unwrap();
    assert!(wrapped.width > bare.width);
}

#[test]
fn mismatched_environment_names_are_an_error() {
    let err = layout("\\begin{matrix}a\\end{pmatrix}").unwrap_err();
    assert!(matches!(
        *err.kind,
        ParseErrorKind::MismatchedEnvironment { .. }
    ));
}

#[test]
fn unknown_environment_is_an_error() {
    let err = layout("\\begin{nope}x\\end{nope}").unwrap_err();
    assert!(matches!(*err.kind, ParseErrorKind::NoSuchEnvironment { .. }));
}

// ---- color and phantom ----

#[test]
fn textcolor_scopes_and_restores() {
    let log = record(&layout("a\\textcolor{red}{b}c").unwrap());
    let colors: Vec<&String> = log.iter().filter(|line| line.starts_with("color")).collect();
    assert_eq!(
        colors,
        ["color ff000000", "color ffff0000", "color ff000000"]
    );
}

#[test]
fn phantom_reserves_space_without_drawing() {
    let phantom = layout("\\phantom{x}y").unwrap();
    let visible = layout("xy").unwrap();
    assert_eq!(phantom.width, visible.width);
    let glyphs = glyph_lines(&record(&phantom));
    assert_eq!(glyphs.len(), 1);
}

// ---- whole-stream properties ----

#[test]
fn stream_begins_with_the_foreground_color() {
    let render = layout("x").unwrap();
    assert!(matches!(
        render.commands().first(),
        Some(RenderCommand::SetColor(_))
    ));
}

#[test]
fn fill_width_pads_to_the_requested_width() {
    let settings = Settings::builder().width(500.0).fill_width(true).build();
    let render = layout_with("x", &settings).unwrap();
    assert!((render.width - 500.0).abs() < 1e-9);
}

#[test]
fn named_operators_render_upright_text() {
    let log = record(&layout("\\sin x").unwrap());
    let glyphs = glyph_lines(&log);
    // s i n x
    assert_eq!(glyphs.len(), 4);
    assert!(glyphs[0].contains("roman"));
    assert!(glyphs[3].contains("italic"));
}
