//! # Template Module
//!
//! Renders skill descriptions containing numbered placeholders:
//!
//! ```text
//! "Skill DMG|{param1:F1P}"  with params [1.2345]  →  "Skill DMG|123.5%"
//! ```
//!
//! ## Placeholder Grammar
//!
//! ```text
//! placeholder := "{" "param" INDEX ":" SPEC "}"
//! INDEX       := decimal digits, 1-based into the parameter list
//! SPEC        := "" | "I" | ["F" DIGITS*] ["P"]
//! ```
//!
//! - `F<n>` renders with `n` decimal places (`F` alone means 0)
//! - no `F` renders as an integer
//! - trailing `P` multiplies by 100 and appends `%`
//!
//! The source is tokenized into literal and placeholder segments first and
//! the output is assembled into a fresh buffer, so substitutions of any
//! length never shift the positions of later placeholders.

use crate::AmberError;
use crate::primitives::PLACEHOLDER_KEYWORD;

// =============================================================================
// FORMAT SPEC
// =============================================================================

/// How a single placeholder renders its value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FormatSpec {
    /// Digits after the decimal point.
    pub decimals: usize,
    /// Render as a percentage (`value * 100` followed by `%`).
    pub percent: bool,
}

impl FormatSpec {
    /// Parse the text after the colon of a placeholder.
    ///
    /// `fragment` is the whole placeholder, used for diagnostics.
    fn parse(spec: &str, fragment: &str) -> Result<Self, AmberError> {
        if spec == "I" {
            return Ok(Self::default());
        }

        let mut rest = spec;
        let mut decimals = 0;

        if let Some(after_f) = rest.strip_prefix('F') {
            let digits_len = after_f
                .find(|c: char| !c.is_ascii_digit())
                .unwrap_or(after_f.len());
            let (digits, tail) = after_f.split_at(digits_len);
            if !digits.is_empty() {
                decimals = digits.parse::<usize>().map_err(|_| {
                    AmberError::template("invalid decimal place count", fragment)
                })?;
            }
            rest = tail;
        }

        let percent = match rest {
            "" => false,
            "P" => true,
            other => {
                return Err(AmberError::template(
                    format!("unexpected `{}` in format spec", other),
                    fragment,
                ));
            }
        };

        Ok(Self { decimals, percent })
    }

    /// Render `value` according to this spec.
    #[must_use]
    pub fn format(&self, value: f64) -> String {
        if self.percent {
            format!("{:.*}%", self.decimals, value * 100.0)
        } else {
            format!("{:.*}", self.decimals, value)
        }
    }
}

// =============================================================================
// SEGMENTS
// =============================================================================

/// A parsed `{paramN:SPEC}` token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placeholder<'a> {
    /// 1-based parameter number.
    pub param: usize,
    pub spec: FormatSpec,
    /// The placeholder as written in the source.
    pub source: &'a str,
}

/// A span of a tokenized template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'a> {
    Literal(&'a str),
    Placeholder(Placeholder<'a>),
}

/// A tokenized description template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template<'a> {
    segments: Vec<Segment<'a>>,
}

impl<'a> Template<'a> {
    /// Tokenize `source` into literal and placeholder segments.
    ///
    /// # Errors
    /// `TemplateSyntaxError` when a `{` has no closing `}`, the body does not
    /// start with `param`, the index is not numeric, the `:` is missing, or
    /// the spec is not recognised.
    pub fn parse(source: &'a str) -> Result<Self, AmberError> {
        let mut segments = Vec::new();
        let mut rest = source;

        while let Some(open) = rest.find('{') {
            if open > 0 {
                segments.push(Segment::Literal(&rest[..open]));
            }
            let tail = &rest[open..];
            let close = tail
                .find('}')
                .ok_or_else(|| AmberError::template("unclosed placeholder", tail))?;
            let fragment = &tail[..=close];
            segments.push(Segment::Placeholder(parse_placeholder(fragment)?));
            rest = &tail[close + 1..];
        }

        if !rest.is_empty() {
            segments.push(Segment::Literal(rest));
        }

        Ok(Self { segments })
    }

    #[must_use]
    pub fn segments(&self) -> &[Segment<'a>] {
        &self.segments
    }

    /// Placeholders in source order.
    pub fn placeholders(&self) -> impl Iterator<Item = &Placeholder<'a>> {
        self.segments.iter().filter_map(|segment| match segment {
            Segment::Placeholder(p) => Some(p),
            Segment::Literal(_) => None,
        })
    }

    /// Substitute `params` into every placeholder.
    ///
    /// Fails with `TemplateSyntaxError` if a placeholder references a
    /// parameter beyond the end of `params`.
    pub fn render(&self, params: &[f64]) -> Result<String, AmberError> {
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Placeholder(p) => {
                    let value = params.get(p.param - 1).ok_or_else(|| {
                        AmberError::template(
                            format!(
                                "parameter {} out of range for {} parameters",
                                p.param,
                                params.len()
                            ),
                            p.source,
                        )
                    })?;
                    out.push_str(&p.spec.format(*value));
                }
            }
        }
        Ok(out)
    }
}

/// Parse a full `{...}` fragment.
fn parse_placeholder(fragment: &str) -> Result<Placeholder<'_>, AmberError> {
    let body = &fragment[1..fragment.len() - 1];

    let after_keyword = body
        .strip_prefix(PLACEHOLDER_KEYWORD)
        .ok_or_else(|| AmberError::template("expected `param`", fragment))?;

    let (index, spec) = after_keyword
        .split_once(':')
        .ok_or_else(|| AmberError::template("missing `:` after parameter index", fragment))?;

    if index.is_empty() || !index.bytes().all(|b| b.is_ascii_digit()) {
        return Err(AmberError::template("non-numeric parameter index", fragment));
    }
    let param = index
        .parse::<usize>()
        .map_err(|_| AmberError::template("parameter index too large", fragment))?;
    if param == 0 {
        return Err(AmberError::template("parameter indices start at 1", fragment));
    }

    Ok(Placeholder {
        param,
        spec: FormatSpec::parse(spec, fragment)?,
        source: fragment,
    })
}

// =============================================================================
// ENTRY POINTS
// =============================================================================

/// Render a single description line.
pub fn render_template(description: &str, params: &[f64]) -> Result<String, AmberError> {
    Template::parse(description)?.render(params)
}

/// Render description lines, dropping empty ones.
///
/// Fails on the first malformed line; no partial result is returned.
pub fn render_lines<S: AsRef<str>>(lines: &[S], params: &[f64]) -> Result<Vec<String>, AmberError> {
    lines
        .iter()
        .map(|line| line.as_ref())
        .filter(|line: &&str| !line.is_empty())
        .map(|line| render_template(line, params))
        .collect()
}

/// Split a newline-separated description and render each non-empty line.
pub fn render_description(text: &str, params: &[f64]) -> Result<Vec<String>, AmberError> {
    let lines: Vec<&str> = text.split('\n').collect();
    render_lines(&lines, params)
}

// =============================================================================
// TESTS
// =============================================================================
