//! mathbox - LaTeX math typesetting to a renderer-agnostic command stream
//!
//! A formula string goes through macro expansion and parsing into an atom
//! tree, the atom tree is measured into TeX-style boxes, and the boxes are
//! flattened into paint commands any drawing surface can replay.
#![warn(missing_docs)]
#![warn(clippy::nursery)]
#![warn(clippy::pedantic)]
#![warn(clippy::str_to_string)]
#![warn(clippy::std_instead_of_core)]
#![warn(clippy::std_instead_of_alloc)]
#![warn(clippy::print_stdout)]
#![warn(clippy::print_stderr)]
#![warn(clippy::panic)]
#![warn(clippy::expect_used)]
#![warn(clippy::unwrap_in_result)]
#![warn(clippy::if_then_some_else_none)]
#![warn(clippy::get_unwrap)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::unimplemented)]
#![warn(clippy::clone_on_ref_ptr)]
#![warn(clippy::undocumented_unsafe_blocks)]
#![warn(clippy::ref_patterns)]
#![allow(clippy::indexing_slicing)]
#![allow(clippy::string_slice)]
#![allow(clippy::pub_use)]
#![allow(clippy::float_cmp)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::struct_excessive_bools)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::unreadable_literal)]
#![allow(clippy::single_call_fn)]

extern crate alloc;

pub mod atom;
pub mod boxes;
pub mod build;
pub mod environment;
pub mod environments;
pub mod font_metrics;
pub mod functions;
pub mod glue;
pub mod lexer;
pub mod macro_expander;
pub mod macros;
pub mod namespace;
/// Core parsing logic for LaTeX mathematical expressions.
pub mod parser;
pub mod render;
pub mod style;
pub mod symbols;
pub mod types;
pub mod units;

use crate::atom::Atom;
use crate::environment::Environment;
use crate::environments::{EnvHandler, Environments};
use crate::functions::{FunctionSpec, Functions};
use crate::macros::MacroDefinition;
use crate::namespace::Mapping;
use crate::symbols::Symbols;

pub use crate::boxes::MathBox;
pub use crate::font_metrics::{FontBackend, TextShaper};
pub use crate::render::{DrawingSurface, Render, RenderCommand};
pub use crate::style::Style;
pub use crate::types::{Color, ParseError, ParseErrorKind, Settings};

/// Shared registries and host bindings for parsing and layout.
///
/// A context owns the command, symbol, environment and built-in macro
/// tables plus the font backend that supplies every measurement. Building
/// one is not free, so hosts keep a context alive and parse many formulas
/// against it; all per-call state lives in [`Settings`].
pub struct MathContext {
    symbols: Symbols,
    functions: Functions,
    environments: Environments,
    builtin_macros: Mapping<MacroDefinition>,
    backend: Box<dyn FontBackend + Send + Sync>,
    shaper: Option<Box<dyn TextShaper + Send + Sync>>,
}

impl MathContext {
    /// A context with every built-in command registered, measuring with
    /// `backend`.
    #[must_use]
    pub fn new(backend: Box<dyn FontBackend + Send + Sync>) -> Self {
        let mut builtin_macros = Mapping::default();
        for (name, definition) in &macros::BUILTIN_MACROS {
            builtin_macros.insert((*name).to_owned(), definition.clone());
        }
        Self {
            symbols: symbols::create_symbols(),
            functions: functions::create_functions(),
            environments: environments::create_environments(),
            builtin_macros,
            backend,
            shaper: None,
        }
    }

    /// Install a host text shaper for `\text{...}` runs.
    #[must_use]
    pub fn with_shaper(mut self, shaper: Box<dyn TextShaper + Send + Sync>) -> Self {
        self.shaper = Some(shaper);
        self
    }

    /// The symbol tables.
    #[must_use]
    pub fn symbols(&self) -> &Symbols {
        &self.symbols
    }

    /// Whether `name` (without backslash) is a registered command.
    #[must_use]
    pub fn has_function(&self, name: &str) -> bool {
        self.functions.contains_key(name)
    }

    /// The registered command spec for `name` (without backslash).
    #[must_use]
    pub fn function(&self, name: &str) -> Option<&FunctionSpec> {
        self.functions.get(name)
    }

    /// The handler for environment `name`, if registered.
    #[must_use]
    pub fn environment(&self, name: &str) -> Option<EnvHandler> {
        self.environments.get(name).copied()
    }

    /// The built-in macro table, cloned into each expansion session.
    #[must_use]
    pub fn builtin_macros(&self) -> &Mapping<MacroDefinition> {
        &self.builtin_macros
    }

    /// The font backend measurements come from.
    #[must_use]
    pub fn backend(&self) -> &dyn FontBackend {
        self.backend.as_ref()
    }

    /// The installed text shaper, if any.
    #[must_use]
    pub fn shaper(&self) -> Option<&(dyn TextShaper + Send + Sync)> {
        self.shaper.as_deref()
    }
}

impl core::fmt::Debug for MathContext {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("MathContext")
            .field("functions", &self.functions.len())
            .field("environments", &self.environments.len())
            .field("builtin_macros", &self.builtin_macros.len())
            .finish_non_exhaustive()
    }
}

/// Parse a formula into its atom tree without laying it out.
pub fn parse(
    ctx: &MathContext,
    expression: &str,
    settings: &Settings,
) -> Result<Vec<Atom>, ParseError> {
    parser::Parser::new(ctx, expression, settings).parse()
}

/// Parse and lay out a formula, producing a replayable [`Render`].
///
/// The returned value carries the formula's width, height above the
/// baseline and depth below it, plus the paint-command stream. Empty or
/// whitespace-only input and a non-positive width are rejected with
/// [`ParseErrorKind::EmptyFormula`] before any parsing happens.
pub fn parse_and_layout(
    ctx: &MathContext,
    expression: &str,
    settings: &Settings,
) -> Result<Render, ParseError> {
    if expression.trim().is_empty() || settings.width <= 0.0 {
        return Err(ParseError::new(ParseErrorKind::EmptyFormula));
    }
    log::debug!("parsing formula: {expression:?}");
    let atoms = parse(ctx, expression, settings)?;
    let style = if settings.display_mode {
        Style::DISPLAY
    } else {
        Style::TEXT
    };
    let env = Environment::new(ctx.backend(), style, settings.text_size, settings.color);
    let mut root = build::build_formula(ctx, &env, &atoms)?;
    if settings.fill_width && settings.width.is_finite() && root.width() < settings.width {
        root = pad_to_width(root, settings.width);
    }
    if settings.color != Color::BLACK {
        root = MathBox::Colored {
            color: settings.color,
            child: Box::new(root),
        };
    }
    log::trace!(
        "layout finished: {:.2} x {:.2}+{:.2}",
        root.width(),
        root.height(),
        root.depth()
    );
    Ok(Render::new(&root, settings.color))
}

/// Center a finished line inside the requested width.
fn pad_to_width(root: MathBox, width: f64) -> MathBox {
    let slack = (width - root.width()) / 2.0;
    MathBox::HBox(boxes::HBox::new(vec![
        boxes::HChild::plain(MathBox::Kern { width: slack }),
        boxes::HChild::plain(root),
        boxes::HChild::plain(MathBox::Kern { width: slack }),
    ]))
}
